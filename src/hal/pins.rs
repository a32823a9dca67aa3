//! Adapters from `embedded-hal` digital pins to the decoder seams.
//!
//! Pin errors are ignored: the adapters run inside interrupt handlers that
//! have nowhere to report them. Use pins with `Infallible` errors.

use embedded_hal::digital::{InputPin, OutputPin, PinState};

use super::{ChannelOutput, StatusIndicator, SwitchInputs};
use crate::color::CHANNELS;
use crate::switches::{ADDRESS_BITS, SwitchSettings};

/// Three push-pull color lines, high = on
pub struct PinChannels<R, G, B> {
    red: R,
    green: G,
    blue: B,
}

impl<R: OutputPin, G: OutputPin, B: OutputPin> PinChannels<R, G, B> {
    pub const fn new(red: R, green: G, blue: B) -> Self {
        Self { red, green, blue }
    }

    pub fn release(self) -> (R, G, B) {
        (self.red, self.green, self.blue)
    }
}

impl<R: OutputPin, G: OutputPin, B: OutputPin> ChannelOutput for PinChannels<R, G, B> {
    fn write(&mut self, levels: [bool; CHANNELS]) {
        let [red, green, blue] = levels;
        let _ = self.red.set_state(PinState::from(red));
        let _ = self.green.set_state(PinState::from(green));
        let _ = self.blue.set_state(PinState::from(blue));
    }
}

/// Status LED wired between the supply and the pin (low = lit)
pub struct ActiveLowIndicator<P> {
    pin: P,
}

impl<P: OutputPin> ActiveLowIndicator<P> {
    pub const fn new(pin: P) -> Self {
        Self { pin }
    }

    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> StatusIndicator for ActiveLowIndicator<P> {
    fn set_lit(&mut self, lit: bool) {
        let _ = self.pin.set_state(PinState::from(!lit));
    }
}

/// Mode and address switches on individual input pins.
///
/// `address[0]` is switch 1 (address bit 0). A pin that fails to read is
/// treated as high, the same as an open switch.
pub struct PinSwitches<P> {
    mode: P,
    address: [P; ADDRESS_BITS as usize],
}

impl<P: InputPin> PinSwitches<P> {
    pub const fn new(mode: P, address: [P; ADDRESS_BITS as usize]) -> Self {
        Self { mode, address }
    }
}

impl<P: InputPin> SwitchInputs for PinSwitches<P> {
    fn read(&mut self) -> SwitchSettings {
        let mode_high = self.mode.is_high().unwrap_or(true);
        let levels = self
            .address
            .iter_mut()
            .enumerate()
            .fold(0u16, |levels, (bit, pin)| {
                if pin.is_high().unwrap_or(true) {
                    levels | (1 << bit)
                } else {
                    levels
                }
            });
        SwitchSettings::from_levels(mode_high, levels)
    }
}
