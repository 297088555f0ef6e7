//! Fixtures for handler tests: the Turin delivery settings and a few
//! customer coordinates with known outcomes.

use std::path::PathBuf;
use std::sync::OnceLock;

use crate::middleware::RequestId;
use crate::state::AppState;

pub const TEST_SETTINGS_PATH: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../docs/fixtures/turin_delivery_settings.json"
);

static TEST_STATE: OnceLock<AppState> = OnceLock::new();

/// Shared state loaded from the fixture settings (cached after first use).
///
/// # Panics
///
/// Panics if the fixture cannot be loaded.
pub fn test_state() -> AppState {
    TEST_STATE
        .get_or_init(|| {
            let path = fixture_settings_path();
            AppState::load(&path)
                .unwrap_or_else(|e| panic!("failed to load test fixture from {:?}: {}", path, e))
        })
        .clone()
}

pub fn fixture_settings_path() -> PathBuf {
    PathBuf::from(TEST_SETTINGS_PATH)
}

/// Customer coordinates relative to the fixture restaurant (45.0703, 7.6869).
pub mod fixture_points {
    /// The restaurant itself: `centro`, 0 km.
    pub const RESTAURANT: (f64, f64) = (45.0703, 7.6869);

    /// About 7.3 km due north: `periferia`.
    pub const PERIFERIA: (f64, f64) = (45.1360, 7.6869);

    /// About 15 km due north: out of range.
    pub const BEYOND_RANGE: (f64, f64) = (45.2052, 7.6869);
}

pub fn test_request_id() -> String {
    format!("test-{}", RequestId::generate())
}
