use core::fmt;

use serde::{Deserialize, Serialize};

/// High-level capability labels for routing, errors, and telemetry.
///
/// These map one-to-one with facade endpoints and allow consistent Display
/// formatting and match-exhaustive handling when adding new capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Capability {
    /// Historical price series for a single asset over a trailing window.
    Series,
    /// Batch latest prices for a set of assets.
    Spot,
    /// Full dashboard refresh: fan-out series fetch plus analytics.
    Refresh,
}

impl Capability {
    /// Stable, kebab-case identifier for logs/errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Series => "series",
            Self::Spot => "spot",
            Self::Refresh => "refresh",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
