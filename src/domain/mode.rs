//! Operating mode selection, fixed once at process start.

use serde::{Deserialize, Serialize};

/// Process-wide operating mode for the dispatch layer.
///
/// Derived once at startup and never mutated afterwards; the dispatcher only
/// ever reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperatingMode {
    /// Real network calls to the configured providers.
    Live,
    /// No live provider available; completions are synthesized offline.
    Offline,
    /// Mocks explicitly requested by the caller or environment.
    Mock,
}

impl OperatingMode {
    /// Whether this mode substitutes offline synthesis for eligible models.
    pub fn substitutes_offline(&self) -> bool {
        matches!(self, Self::Offline | Self::Mock)
    }
}

/// Dispatch configuration, constructed once and threaded explicitly into the
/// dispatcher rather than read from ambient global state.
#[derive(Debug, Clone, Copy)]
pub struct DispatchConfig {
    mode: OperatingMode,
}

impl DispatchConfig {
    pub fn new(mode: OperatingMode) -> Self {
        Self { mode }
    }

    pub fn live() -> Self {
        Self::new(OperatingMode::Live)
    }

    pub fn offline() -> Self {
        Self::new(OperatingMode::Offline)
    }

    pub fn mock() -> Self {
        Self::new(OperatingMode::Mock)
    }

    /// Derive the mode from the use-mocks signal and live-provider availability.
    pub fn detect(use_mocks: bool, provider_available: bool) -> Self {
        if use_mocks {
            Self::mock()
        } else if !provider_available {
            Self::offline()
        } else {
            Self::live()
        }
    }

    /// Derive the mode from the `MOCK_DEPENDENCIES` environment variable.
    pub fn from_env() -> Self {
        let use_mocks = std::env::var("MOCK_DEPENDENCIES")
            .map(|v| v == "1")
            .unwrap_or(false);
        Self::detect(use_mocks, true)
    }

    pub fn mode(&self) -> OperatingMode {
        self.mode
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self::live()
    }
}
