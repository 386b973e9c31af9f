//! Error types for the render device layer
//!
//! Every driver call made during initialization can fail. Each failure is
//! reported with the platform status code and the step that failed, grouped
//! by the kind of operation that was being attempted.

use std::fmt;
use crate::driver::StatusCode;

/// Result type for render device operations
pub type Result<T> = std::result::Result<T, Error>;

/// Render device errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Adapter, monitor or display-mode enumeration failed
    DeviceQueryFailure { step: String, code: StatusCode },

    /// Joint creation of device, swap chain and immediate context failed
    DeviceCreationFailure { step: String, code: StatusCode },

    /// Render target, depth buffer/state/view or rasterizer state creation failed
    ResourceCreationFailure { step: String, code: StatusCode },

    /// Reading the adapter description or memory failed
    AdapterInfoFailure { step: String, code: StatusCode },

    /// Presenting the back buffer failed
    PresentFailure { code: StatusCode },

    /// Leaving exclusive full-screen mode failed during shutdown
    ShutdownFailure { step: String, code: StatusCode },

    /// Parameters rejected before any driver call was made
    InvalidConfiguration(String),
}

impl Error {
    pub fn device_query(step: impl Into<String>, code: StatusCode) -> Self {
        Error::DeviceQueryFailure { step: step.into(), code }
    }

    pub fn device_creation(step: impl Into<String>, code: StatusCode) -> Self {
        Error::DeviceCreationFailure { step: step.into(), code }
    }

    pub fn resource_creation(step: impl Into<String>, code: StatusCode) -> Self {
        Error::ResourceCreationFailure { step: step.into(), code }
    }

    pub fn adapter_info(step: impl Into<String>, code: StatusCode) -> Self {
        Error::AdapterInfoFailure { step: step.into(), code }
    }

    pub fn shutdown(step: impl Into<String>, code: StatusCode) -> Self {
        Error::ShutdownFailure { step: step.into(), code }
    }

    /// Platform status code carried by the error, if any
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            Error::DeviceQueryFailure { code, .. }
            | Error::DeviceCreationFailure { code, .. }
            | Error::ResourceCreationFailure { code, .. }
            | Error::AdapterInfoFailure { code, .. }
            | Error::ShutdownFailure { code, .. }
            | Error::PresentFailure { code } => Some(*code),
            Error::InvalidConfiguration(_) => None,
        }
    }

    /// Human-readable description of the step that failed
    pub fn step(&self) -> &str {
        match self {
            Error::DeviceQueryFailure { step, .. }
            | Error::DeviceCreationFailure { step, .. }
            | Error::ResourceCreationFailure { step, .. }
            | Error::AdapterInfoFailure { step, .. }
            | Error::ShutdownFailure { step, .. } => step,
            Error::PresentFailure { .. } => "Presenting the back buffer",
            Error::InvalidConfiguration(msg) => msg,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DeviceQueryFailure { step, code } => {
                write!(f, "Device query failed: {} (status {})", step, code)
            }
            Error::DeviceCreationFailure { step, code } => {
                write!(f, "Device creation failed: {} (status {})", step, code)
            }
            Error::ResourceCreationFailure { step, code } => {
                write!(f, "Resource creation failed: {} (status {})", step, code)
            }
            Error::AdapterInfoFailure { step, code } => {
                write!(f, "Adapter info failed: {} (status {})", step, code)
            }
            Error::PresentFailure { code } => write!(f, "Present failed (status {})", code),
            Error::ShutdownFailure { step, code } => {
                write!(f, "Shutdown failed: {} (status {})", step, code)
            }
            Error::InvalidConfiguration(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
