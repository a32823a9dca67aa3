//! Hardware seams.
//!
//! The decoder core never touches registers. Board support implements these
//! traits (or uses the pin adapters from [`pins`]) and calls the handlers
//! from its interrupt vectors.

mod pins;

use embassy_time::Duration;

pub use pins::{ActiveLowIndicator, PinChannels, PinSwitches};

use crate::color::CHANNELS;
use crate::switches::SwitchSettings;

/// Color output lines
///
/// Called from the timer interrupt, must not block.
pub trait ChannelOutput {
    /// Drive the lines, `true` means the channel is on (red, green, blue)
    fn write(&mut self, levels: [bool; CHANNELS]);
}

/// One-shot timer driving the PWM phases
pub trait PhaseTimer {
    /// Fire the next timer interrupt after `duration`
    fn schedule(&mut self, duration: Duration);
}

/// Status indicator line
pub trait StatusIndicator {
    fn set_lit(&mut self, lit: bool);
}

/// Hardware watchdog
pub trait Watchdog {
    /// Restart the watchdog countdown
    fn feed(&mut self);
}

/// Interrupt sources enabled by the main loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptSet {
    /// PWM timer only, DMX reception suspended
    TimerOnly,
    /// PWM timer and serial receive
    TimerAndSerial,
}

/// Interrupt controller
pub trait InterruptControl {
    fn enable(&mut self, set: InterruptSet);
}

/// Configuration switches
pub trait SwitchInputs {
    fn read(&mut self) -> SwitchSettings;
}

impl<F: FnMut() -> SwitchSettings> SwitchInputs for F {
    fn read(&mut self) -> SwitchSettings {
        self()
    }
}

/// Switches read as whole port bytes in the reference board layout.
///
/// `port1` and `port3` return the current input levels of P1 and P3, see
/// [`SwitchSettings::from_ports`].
pub struct PortSwitches<P1, P3> {
    port1: P1,
    port3: P3,
}

impl<P1, P3> PortSwitches<P1, P3>
where
    P1: FnMut() -> u8,
    P3: FnMut() -> u8,
{
    pub const fn new(port1: P1, port3: P3) -> Self {
        Self { port1, port3 }
    }
}

impl<P1, P3> SwitchInputs for PortSwitches<P1, P3>
where
    P1: FnMut() -> u8,
    P3: FnMut() -> u8,
{
    fn read(&mut self) -> SwitchSettings {
        SwitchSettings::from_ports((self.port1)(), (self.port3)())
    }
}
