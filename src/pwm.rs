//! Bit-angle PWM generator.
//!
//! An 8-bit intensity is rendered as 8 timer phases, one per bit, each
//! lasting twice as long as the next one. During a phase every channel whose
//! intensity has that bit set is on. Over a full cycle a channel at
//! intensity `v` is on for `v` phase units out of 255, with only 8 timer
//! reloads instead of 256.
//!
//! The generator is also the system time base: the tick counter and the DMX
//! loss timeout advance once per full cycle.

use embassy_time::Duration;

use crate::color::{CHANNELS, channels};
use crate::hal::{ChannelOutput, PhaseTimer};
use crate::state::DeviceState;

/// Number of phases in a PWM cycle, one per intensity bit
pub const PHASE_COUNT: usize = 8;

/// A single PWM phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phase {
    /// Intensity bit rendered in this phase
    pub mask: u8,
    /// How long the outputs hold for this phase
    pub duration: Duration,
}

/// Phase sequence of one PWM cycle, most significant bit first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTable {
    phases: [Phase; PHASE_COUNT],
}

impl PhaseTable {
    /// Build the binary-weighted table where the phase for bit `n` lasts
    /// `unit * 2^n`
    #[allow(clippy::cast_lossless)]
    pub const fn binary_weighted(unit: Duration) -> Self {
        let mut phases = [Phase {
            mask: 0,
            duration: Duration::from_ticks(0),
        }; PHASE_COUNT];

        let mut index = 0;
        while index < PHASE_COUNT {
            let mask = 0x80 >> index;
            phases[index] = Phase {
                mask,
                duration: Duration::from_ticks(unit.as_ticks() * mask as u64),
            };
            index += 1;
        }

        Self { phases }
    }

    /// Get the phase at `index`, wrapping around the cycle
    pub const fn phase(&self, index: usize) -> Phase {
        self.phases[index % PHASE_COUNT]
    }

    /// Total duration of one PWM cycle
    pub fn cycle_duration(&self) -> Duration {
        self.phases
            .iter()
            .fold(Duration::from_ticks(0), |total, phase| total + phase.duration)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Phase> {
        self.phases.iter()
    }
}

/// Output levels for one phase, `true` where the value has `mask` set
#[inline]
pub fn levels_for<const N: usize>(mask: u8, values: [u8; N]) -> [bool; N] {
    values.map(|value| value & mask != 0)
}

/// Timer interrupt handler state
pub struct BitAnglePwm<'a> {
    state: &'a DeviceState,
    table: PhaseTable,
    phase: usize,
}

impl<'a> BitAnglePwm<'a> {
    pub const fn new(state: &'a DeviceState, table: PhaseTable) -> Self {
        Self {
            state,
            table,
            phase: 0,
        }
    }

    /// Arm the timer for the first phase of the first cycle
    pub fn start<T: PhaseTimer>(&mut self, timer: &mut T) {
        self.phase = 0;
        timer.schedule(self.table.phase(0).duration);
    }

    /// Handle a timer expiration.
    ///
    /// Renders the current phase from the display color, arms the timer for
    /// as long as this phase holds and steps to the next phase. Stepping past
    /// the least significant phase restarts the cycle and accounts one tick.
    pub fn on_timer<O: ChannelOutput, T: PhaseTimer>(&mut self, output: &mut O, timer: &mut T) {
        let phase = self.table.phase(self.phase);
        let levels: [bool; CHANNELS] = levels_for(phase.mask, channels(self.state.display()));
        output.write(levels);
        timer.schedule(phase.duration);

        if self.phase + 1 >= PHASE_COUNT {
            self.phase = 0;
            self.state.complete_cycle();
        } else {
            self.phase += 1;
        }
    }

    /// Phase that the next timer expiration renders
    pub const fn next_phase(&self) -> Phase {
        self.table.phase(self.phase)
    }

    pub const fn table(&self) -> &PhaseTable {
        &self.table
    }
}
