//! Decoder timing and threshold configuration.
//!
//! Everything here is fixed at build time. The defaults reproduce the
//! reference board: ~490 Hz PWM refresh, one second of DMX loss tolerance
//! and the two status blink rates.

use embassy_time::Duration;

use crate::color::{Rgb, rgb_from_u32};

/// Duration of the least significant PWM phase.
///
/// A full cycle lasts `255 * DEFAULT_PHASE_UNIT` (2.04 ms).
pub const DEFAULT_PHASE_UNIT: Duration = Duration::from_micros(8);

/// PWM cycles without a committed frame before the signal counts as lost (~1 s)
pub const DEFAULT_LOSS_THRESHOLD: u16 = 480;

/// Tick bit driving the "no signal" blink (~1 s on, ~1 s off)
pub const DEFAULT_SLOW_BLINK_MASK: u32 = 0x200;

/// Tick bit driving the "signal present" blink (~130 ms on, ~130 ms off)
pub const DEFAULT_FAST_BLINK_MASK: u32 = 0x40;

/// Longest phase unit whose full 255-unit cycle still fits the tick counter
pub const MAX_PHASE_UNIT_TICKS: u64 = u64::MAX / 255;

/// Dim white shown by Fun programs that are not implemented
pub const DEFAULT_PLACEHOLDER_COLOR: Rgb = rgb_from_u32(0x20_20_20);

/// Error returned by [`DecoderConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// PWM phase unit is zero, the timer would fire continuously
    ZeroPhaseUnit,
    /// PWM phase unit so long that the phase durations overflow
    PhaseUnitTooLong,
    /// Loss threshold is zero, the signal would never count as present
    ZeroLossThreshold,
    /// A blink mask must select exactly one tick bit
    BlinkMaskNotSingleBit,
}

/// Configuration for the decoder core
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    pub phase_unit: Duration,
    pub loss_threshold: u16,
    pub slow_blink_mask: u32,
    pub fast_blink_mask: u32,
    pub placeholder_color: Rgb,
}

impl DecoderConfig {
    pub const DEFAULT: Self = Self {
        phase_unit: DEFAULT_PHASE_UNIT,
        loss_threshold: DEFAULT_LOSS_THRESHOLD,
        slow_blink_mask: DEFAULT_SLOW_BLINK_MASK,
        fast_blink_mask: DEFAULT_FAST_BLINK_MASK,
        placeholder_color: DEFAULT_PLACEHOLDER_COLOR,
    };

    /// Check that the configuration can drive the hardware
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.phase_unit.as_ticks() == 0 {
            return Err(ConfigError::ZeroPhaseUnit);
        }
        if self.phase_unit.as_ticks() > MAX_PHASE_UNIT_TICKS {
            return Err(ConfigError::PhaseUnitTooLong);
        }
        if self.loss_threshold == 0 {
            return Err(ConfigError::ZeroLossThreshold);
        }
        if !self.slow_blink_mask.is_power_of_two() || !self.fast_blink_mask.is_power_of_two() {
            return Err(ConfigError::BlinkMaskNotSingleBit);
        }
        Ok(())
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
