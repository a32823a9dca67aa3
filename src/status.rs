//! Status indicator patterns.

use crate::config::DecoderConfig;

/// Status indicator patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusPattern {
    /// Fun mode
    Solid,
    /// DMX mode, no valid signal
    SlowBlink,
    /// DMX mode, frames are being committed
    FastBlink,
}

impl StatusPattern {
    /// Indicator level for the given tick count.
    ///
    /// Blinking patterns are dark while their tick bit is set.
    pub const fn is_lit(self, ticks: u32, config: &DecoderConfig) -> bool {
        match self {
            Self::Solid => true,
            Self::SlowBlink => ticks & config.slow_blink_mask == 0,
            Self::FastBlink => ticks & config.fast_blink_mask == 0,
        }
    }
}
