//! Device state shared between the interrupt handlers and the main loop.
//!
//! | field        | writer                         | readers                  |
//! |--------------|--------------------------------|--------------------------|
//! | display      | DMX receiver, mode controller  | PWM generator            |
//! | ticks        | PWM generator                  | mode controller          |
//! | dmx_timeout  | PWM generator, DMX receiver    | mode controller          |
//! |              | (mode controller clamps)       |                          |
//! | address      | mode controller                | DMX receiver             |
//! | mode         | mode controller                | anyone                   |
//! | dmx_stats    | DMX receiver                   | mode controller          |
//!
//! Each access runs inside a critical section, so a single field is never
//! torn. Reading two fields is not atomic: the main loop may see a color
//! from before a commit together with a newer tick count. For a lighting
//! output that lasts at most one PWM cycle and is accepted.

use core::cell::Cell;

use critical_section::Mutex;

use crate::color::{BLACK, Rgb};
use crate::config::DEFAULT_LOSS_THRESHOLD;
use crate::switches::{Address, Mode};

/// Wrapping counters describing DMX reception, for diagnostics only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DmxStats {
    /// Frames whose staged color was published
    pub committed: u16,
    /// Frames dropped because the slot count changed
    pub length_changes: u16,
    /// Frames dropped because of a non-zero start code
    pub bad_start_codes: u16,
    /// Frames dropped because a byte arrived with a framing error
    pub framing_errors: u16,
}

/// Process-wide decoder state
pub struct DeviceState {
    display: Mutex<Cell<Rgb>>,
    ticks: Mutex<Cell<u32>>,
    dmx_timeout: Mutex<Cell<u16>>,
    address: Mutex<Cell<Address>>,
    mode: Mutex<Cell<Mode>>,
    dmx_stats: Mutex<Cell<DmxStats>>,
}

impl DeviceState {
    /// Create the power-on state.
    ///
    /// The DMX timeout starts at `loss_threshold`, so no signal is reported
    /// before the first valid frame.
    pub const fn new(loss_threshold: u16) -> Self {
        Self {
            display: Mutex::new(Cell::new(BLACK)),
            ticks: Mutex::new(Cell::new(0)),
            dmx_timeout: Mutex::new(Cell::new(loss_threshold)),
            address: Mutex::new(Cell::new(Address::new(0))),
            mode: Mutex::new(Cell::new(Mode::Dmx)),
            dmx_stats: Mutex::new(Cell::new(DmxStats {
                committed: 0,
                length_changes: 0,
                bad_start_codes: 0,
                framing_errors: 0,
            })),
        }
    }

    /// Color currently rendered by the PWM generator
    pub fn display(&self) -> Rgb {
        critical_section::with(|cs| self.display.borrow(cs).get())
    }

    pub fn set_display(&self, color: Rgb) {
        critical_section::with(|cs| self.display.borrow(cs).set(color));
    }

    /// PWM cycles since power-on, wrapping
    pub fn ticks(&self) -> u32 {
        critical_section::with(|cs| self.ticks.borrow(cs).get())
    }

    /// PWM cycles since the last committed DMX frame
    pub fn dmx_timeout(&self) -> u16 {
        critical_section::with(|cs| self.dmx_timeout.borrow(cs).get())
    }

    /// Account one finished PWM cycle
    pub fn complete_cycle(&self) {
        critical_section::with(|cs| {
            let ticks = self.ticks.borrow(cs);
            ticks.set(ticks.get().wrapping_add(1));
            let timeout = self.dmx_timeout.borrow(cs);
            timeout.set(timeout.get().saturating_add(1));
        });
    }

    /// Publish a validated DMX color and restart the loss timeout
    pub fn commit(&self, color: Rgb) {
        critical_section::with(|cs| {
            self.display.borrow(cs).set(color);
            self.dmx_timeout.borrow(cs).set(0);
        });
    }

    /// Blank the output if no frame was committed for `threshold` cycles.
    ///
    /// The timeout is clamped to `threshold` so it cannot wrap back to a
    /// fresh value. Returns `true` if the signal is lost.
    pub fn expire_signal(&self, threshold: u16) -> bool {
        critical_section::with(|cs| {
            let timeout = self.dmx_timeout.borrow(cs);
            if timeout.get() < threshold {
                return false;
            }
            timeout.set(threshold);
            self.display.borrow(cs).set(BLACK);
            true
        })
    }

    pub fn address(&self) -> Address {
        critical_section::with(|cs| self.address.borrow(cs).get())
    }

    pub fn set_address(&self, address: Address) {
        critical_section::with(|cs| self.address.borrow(cs).set(address));
    }

    pub fn mode(&self) -> Mode {
        critical_section::with(|cs| self.mode.borrow(cs).get())
    }

    pub fn set_mode(&self, mode: Mode) {
        critical_section::with(|cs| self.mode.borrow(cs).set(mode));
    }

    pub fn dmx_stats(&self) -> DmxStats {
        critical_section::with(|cs| self.dmx_stats.borrow(cs).get())
    }

    pub(crate) fn update_dmx_stats(&self, update: impl FnOnce(&mut DmxStats)) {
        critical_section::with(|cs| {
            let cell = self.dmx_stats.borrow(cs);
            let mut stats = cell.get();
            update(&mut stats);
            cell.set(stats);
        });
    }
}

impl Default for DeviceState {
    fn default() -> Self {
        Self::new(DEFAULT_LOSS_THRESHOLD)
    }
}
