/// Platform status codes returned by driver calls

use std::fmt;

/// Result type for raw driver calls
pub type DriverResult<T> = std::result::Result<T, StatusCode>;

/// 32-bit platform status code (HRESULT layout: negative values are failures)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusCode(pub i32);

impl StatusCode {
    pub const OK: StatusCode = StatusCode(0);
    pub const E_FAIL: StatusCode = StatusCode(0x8000_4005_u32 as i32);
    pub const E_INVALIDARG: StatusCode = StatusCode(0x8007_0057_u32 as i32);
    pub const E_OUTOFMEMORY: StatusCode = StatusCode(0x8007_000E_u32 as i32);
    pub const DXGI_ERROR_INVALID_CALL: StatusCode = StatusCode(0x887A_0001_u32 as i32);
    pub const DXGI_ERROR_NOT_FOUND: StatusCode = StatusCode(0x887A_0002_u32 as i32);
    pub const DXGI_ERROR_MORE_DATA: StatusCode = StatusCode(0x887A_0003_u32 as i32);
    pub const DXGI_ERROR_UNSUPPORTED: StatusCode = StatusCode(0x887A_0004_u32 as i32);
    pub const DXGI_ERROR_DEVICE_REMOVED: StatusCode = StatusCode(0x887A_0005_u32 as i32);
    pub const DXGI_ERROR_NOT_CURRENTLY_AVAILABLE: StatusCode = StatusCode(0x887A_0022_u32 as i32);

    /// Raw signed value
    pub fn code(self) -> i32 {
        self.0
    }

    pub fn is_failure(self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.code() as u32)
    }
}
