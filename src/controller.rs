//! Mode controller, the cooperative main loop.
//!
//! Every pass feeds the watchdog, re-reads the switches and decides where the
//! display color comes from. Nothing here blocks, a pass takes a few
//! microseconds, so the ~4 s watchdog is always fed in time.

#[cfg(feature = "log")]
use esp_println::println;

use crate::config::DecoderConfig;
use crate::fun::fun_color;
use crate::hal::{InterruptControl, InterruptSet, StatusIndicator, SwitchInputs, Watchdog};
use crate::state::DeviceState;
use crate::status::StatusPattern;
use crate::switches::{Address, Mode};

/// Peripherals owned by the main loop
pub struct Peripherals<S, L, W, I> {
    pub switches: S,
    pub indicator: L,
    pub watchdog: W,
    pub interrupts: I,
}

/// Main loop state
pub struct ModeController<'a, S, L, W, I> {
    state: &'a DeviceState,
    config: DecoderConfig,
    peripherals: Peripherals<S, L, W, I>,
    mode: Option<Mode>,
    signal_present: bool,
}

impl<'a, S, L, W, I> ModeController<'a, S, L, W, I>
where
    S: SwitchInputs,
    L: StatusIndicator,
    W: Watchdog,
    I: InterruptControl,
{
    pub const fn new(
        state: &'a DeviceState,
        config: DecoderConfig,
        peripherals: Peripherals<S, L, W, I>,
    ) -> Self {
        Self {
            state,
            config,
            peripherals,
            mode: None,
            signal_present: false,
        }
    }

    /// Run the main loop forever
    pub fn run(mut self) -> ! {
        loop {
            self.poll();
        }
    }

    /// Run one main loop pass
    ///
    /// Returns the status pattern shown during this pass.
    pub fn poll(&mut self) -> StatusPattern {
        self.peripherals.watchdog.feed();

        let settings = self.peripherals.switches.read();
        self.state.set_address(settings.address);
        self.state.set_mode(settings.mode);
        self.track_mode(settings.mode, settings.address);

        let pattern = match settings.mode {
            Mode::Dmx => self.poll_dmx(),
            Mode::Fun => self.poll_fun(settings.address),
        };

        let lit = pattern.is_lit(self.state.ticks(), &self.config);
        self.peripherals.indicator.set_lit(lit);

        pattern
    }

    fn poll_dmx(&mut self) -> StatusPattern {
        self.peripherals
            .interrupts
            .enable(InterruptSet::TimerAndSerial);

        let lost = self.state.expire_signal(self.config.loss_threshold);
        self.track_signal(!lost);
        if lost {
            StatusPattern::SlowBlink
        } else {
            StatusPattern::FastBlink
        }
    }

    fn poll_fun(&mut self, address: Address) -> StatusPattern {
        self.peripherals.interrupts.enable(InterruptSet::TimerOnly);
        self.state
            .set_display(fun_color(address, self.config.placeholder_color));
        StatusPattern::Solid
    }

    #[allow(unused_variables)]
    fn track_mode(&mut self, mode: Mode, address: Address) {
        if self.mode == Some(mode) {
            return;
        }
        #[cfg(feature = "log")]
        println!(
            "[ModeController.poll] mode {:?} -> {:?}, address {}",
            self.mode,
            mode,
            address.value()
        );
        self.mode = Some(mode);
        // Reception restarts from scratch after Fun mode
        self.signal_present = false;
    }

    fn track_signal(&mut self, present: bool) {
        if self.signal_present == present {
            return;
        }
        #[cfg(feature = "log")]
        {
            let stats = self.state.dmx_stats();
            println!(
                "[ModeController.poll] dmx signal {}: committed={} length_changes={} bad_start_codes={} framing_errors={}",
                if present { "acquired" } else { "lost" },
                stats.committed,
                stats.length_changes,
                stats.bad_start_codes,
                stats.framing_errors
            );
        }
        self.signal_present = present;
    }

    /// Mode applied by the last pass
    pub const fn mode(&self) -> Option<Mode> {
        self.mode
    }

    /// Whether the last DMX pass saw a committed frame within the loss threshold
    pub const fn signal_present(&self) -> bool {
        self.signal_present
    }

    pub const fn peripherals(&self) -> &Peripherals<S, L, W, I> {
        &self.peripherals
    }
}
