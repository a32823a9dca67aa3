#![allow(dead_code)]

use std::cell::Cell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use myrtio_dmx_decoder::{
    ChannelOutput, DeviceState, DmxReceiver, Duration, InterruptControl, InterruptSet,
    PhaseTimer, RxEvent, StatusIndicator, SwitchSettings, Watchdog,
};

/// Records every write to the color lines
#[derive(Default)]
pub struct RecordingOutput {
    pub writes: Vec<[bool; 3]>,
}

impl ChannelOutput for RecordingOutput {
    fn write(&mut self, levels: [bool; 3]) {
        self.writes.push(levels);
    }
}

/// Records every timer reload
#[derive(Default)]
pub struct RecordingTimer {
    pub schedules: Vec<Duration>,
}

impl PhaseTimer for RecordingTimer {
    fn schedule(&mut self, duration: Duration) {
        self.schedules.push(duration);
    }
}

#[derive(Default)]
pub struct FakeIndicator {
    pub lit: Option<bool>,
}

impl StatusIndicator for FakeIndicator {
    fn set_lit(&mut self, lit: bool) {
        self.lit = Some(lit);
    }
}

#[derive(Default)]
pub struct CountingWatchdog {
    pub feeds: usize,
}

impl Watchdog for CountingWatchdog {
    fn feed(&mut self) {
        self.feeds += 1;
    }
}

#[derive(Default)]
pub struct FakeInterrupts {
    pub enabled: Option<InterruptSet>,
}

impl InterruptControl for FakeInterrupts {
    fn enable(&mut self, set: InterruptSet) {
        self.enabled = Some(set);
    }
}

/// Switch bank that tests can flip while the controller owns a reader
pub type SharedSwitches = Rc<Cell<SwitchSettings>>;

pub fn switch_reader(switches: SharedSwitches) -> impl FnMut() -> SwitchSettings {
    move || switches.get()
}

/// Output pin remembering its last level
#[derive(Clone, Default)]
pub struct FakePin {
    pub high: Rc<Cell<bool>>,
}

impl ErrorType for FakePin {
    type Error = Infallible;
}

impl OutputPin for FakePin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high.set(true);
        Ok(())
    }
}

impl InputPin for FakePin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.high.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.high.get())
    }
}

/// Feed correctly framed bytes without a break
pub fn send_slots(receiver: &mut DmxReceiver<'_>, slots: &[u8]) {
    for &slot in slots {
        receiver.on_event(RxEvent::Data(slot));
    }
}

/// Feed a break, closing the frame in progress
pub fn send_break(receiver: &mut DmxReceiver<'_>) {
    receiver.on_event(RxEvent::FramingError(0));
}

/// Feed `slots` (start code first) and close the frame with a break
pub fn send_frame(receiver: &mut DmxReceiver<'_>, slots: &[u8]) {
    send_slots(receiver, slots);
    send_break(receiver);
}

/// Advance the tick counter by `cycles` PWM cycles
pub fn run_cycles(state: &DeviceState, cycles: u32) {
    for _ in 0..cycles {
        state.complete_cycle();
    }
}
