//! Unit tests for refresh_rate.rs

use crate::bootstrap::refresh_rate::*;
use crate::driver::{DisplayMode, RefreshRate};

#[test]
fn test_single_match() {
    let modes = vec![DisplayMode::new(800, 600, 60, 1)];
    assert_eq!(select_refresh_rate(&modes, 800, 600), Some(RefreshRate::new(60, 1)));
}

#[test]
fn test_last_match_wins() {
    let modes = vec![
        DisplayMode::new(800, 600, 60, 1),
        DisplayMode::new(1024, 768, 60, 1),
        DisplayMode::new(800, 600, 75, 1),
        DisplayMode::new(800, 600, 59940, 1000),
        DisplayMode::new(1920, 1080, 144, 1),
    ];
    assert_eq!(select_refresh_rate(&modes, 800, 600), Some(RefreshRate::new(59940, 1000)));
    assert_eq!(select_refresh_rate(&modes, 1024, 768), Some(RefreshRate::new(60, 1)));
}

#[test]
fn test_width_and_height_must_both_match() {
    let modes = vec![
        DisplayMode::new(800, 768, 60, 1),
        DisplayMode::new(1024, 600, 60, 1),
    ];
    assert_eq!(select_refresh_rate(&modes, 800, 600), None);
}

#[test]
fn test_no_match_returns_none() {
    let modes = vec![DisplayMode::new(640, 480, 60, 1)];
    assert_eq!(select_refresh_rate(&modes, 800, 600), None);
    assert_eq!(select_refresh_rate(&[], 800, 600), None);
}
