#![no_std]

pub mod color;
pub mod config;
pub mod controller;
pub mod dmx;
pub mod fun;
pub mod hal;
pub mod pwm;
pub mod state;
pub mod status;
pub mod switches;

pub use config::{ConfigError, DecoderConfig};
pub use controller::{ModeController, Peripherals};
pub use dmx::{DmxReceiver, FrameFault, FrameState, RxEvent};
pub use fun::FunProgram;
pub use hal::{
    ChannelOutput, InterruptControl, InterruptSet, PhaseTimer, PortSwitches, StatusIndicator,
    SwitchInputs, Watchdog,
};
pub use pwm::{BitAnglePwm, Phase, PhaseTable};
pub use state::{DeviceState, DmxStats};
pub use status::StatusPattern;
pub use switches::{Address, Mode, SwitchSettings};

pub use color::Rgb;
pub use embassy_time::Duration;

/// The three handlers of a decoder, sharing one [`DeviceState`].
///
/// Board support splits this and hands `pwm` to the timer interrupt,
/// `receiver` to the serial interrupt and `controller` to `main`.
pub struct Decoder<'a, S, L, W, I> {
    pub pwm: BitAnglePwm<'a>,
    pub receiver: DmxReceiver<'a>,
    pub controller: ModeController<'a, S, L, W, I>,
}

impl<'a, S, L, W, I> Decoder<'a, S, L, W, I>
where
    S: SwitchInputs,
    L: StatusIndicator,
    W: Watchdog,
    I: InterruptControl,
{
    /// Build the handlers from a validated configuration
    pub fn new(
        state: &'a DeviceState,
        config: DecoderConfig,
        peripherals: Peripherals<S, L, W, I>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            pwm: BitAnglePwm::new(state, PhaseTable::binary_weighted(config.phase_unit)),
            receiver: DmxReceiver::new(state),
            controller: ModeController::new(state, config, peripherals),
        })
    }
}
