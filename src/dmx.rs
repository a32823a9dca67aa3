//! DMX512 frame receiver.
//!
//! Runs in the serial receive interrupt (250 kbaud, 8 data bits, 2 stop
//! bits). A frame starts with a break, which the UART reports as a framing
//! error carrying a zero byte, followed by the start code in slot 0 and one
//! byte per channel from slot 1 on.
//!
//! Channel values are collected into a staging color and published only at
//! the next break, and only if nothing went wrong in the frame:
//!
//! - a byte with a framing error (other than the break),
//! - a start code other than [`DIMMER_START_CODE`],
//! - a slot count that differs from the previous frame.
//!
//! After a length change two frames of the new length are needed before the
//! output follows again. A dropped frame is never reported, the previous
//! color stays and the loss timeout keeps running.

use crate::color::{BLACK, Rgb};
use crate::state::DeviceState;

pub const BAUD_RATE: u32 = 250_000;

/// Start code of a standard dimmer packet
pub const DIMMER_START_CODE: u8 = 0x00;

/// Byte received by the UART
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RxEvent {
    /// Correctly framed byte
    Data(u8),
    /// Byte received with a framing error
    FramingError(u8),
}

impl RxEvent {
    /// The break reads as a zero byte with a framing error
    pub const fn is_break(self) -> bool {
        matches!(self, Self::FramingError(0))
    }
}

/// Receiver state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameState {
    /// No break seen since power-on, received bytes are never trusted
    Idle,
    /// Receiving the slots of a frame opened by a break
    InFrame,
    /// The last break closed a valid frame and published its color, left at
    /// the first byte of the next frame
    Committing,
}

/// Reason a frame will not be committed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameFault {
    /// The frame was not opened by a break
    NoBreak,
    /// A byte arrived with a framing error
    Framing,
    /// Start code was not a dimmer start code
    StartCode,
    /// Slot count differs from the previous frame
    LengthChanged,
}

/// Serial interrupt handler state
pub struct DmxReceiver<'a> {
    state: &'a DeviceState,
    frame: FrameState,
    staging: Rgb,
    /// Index of the next slot, equal to the number of slots received so far
    next_slot: u16,
    last_length: u16,
    /// First fault of the current frame, `None` while the frame is good
    fault: Option<FrameFault>,
}

impl<'a> DmxReceiver<'a> {
    pub const fn new(state: &'a DeviceState) -> Self {
        Self {
            state,
            frame: FrameState::Idle,
            staging: BLACK,
            next_slot: 0,
            last_length: 0,
            fault: Some(FrameFault::NoBreak),
        }
    }

    /// Handle one byte from the UART
    pub fn on_event(&mut self, event: RxEvent) {
        if self.frame == FrameState::Committing && !event.is_break() {
            self.frame = FrameState::InFrame;
        }
        match event {
            RxEvent::FramingError(0) => self.close_frame(),
            RxEvent::FramingError(_) => {
                self.invalidate(FrameFault::Framing);
                self.next_slot = self.next_slot.saturating_add(1);
            }
            RxEvent::Data(byte) => self.receive_slot(byte),
        }
    }

    fn receive_slot(&mut self, byte: u8) {
        let slot = self.next_slot;
        if slot == 0 {
            if byte != DIMMER_START_CODE {
                self.invalidate(FrameFault::StartCode);
            }
        } else {
            // Address is re-read on every byte, a switch change can tear one frame
            let address = self.state.address().value();
            match slot.wrapping_sub(address) {
                0 => self.staging.r = byte,
                1 => self.staging.g = byte,
                2 => self.staging.b = byte,
                _ => {}
            }
        }
        self.next_slot = slot.saturating_add(1);
    }

    fn close_frame(&mut self) {
        let length = self.next_slot;
        if length != self.last_length {
            self.last_length = length;
            self.invalidate(FrameFault::LengthChanged);
        }

        if self.frame != FrameState::Idle {
            self.record_outcome();
        }
        self.frame = if self.fault.is_none() {
            self.state.commit(self.staging);
            FrameState::Committing
        } else {
            FrameState::InFrame
        };

        self.staging = BLACK;
        self.fault = None;
        self.next_slot = 0;
    }

    fn record_outcome(&self) {
        let fault = self.fault;
        self.state.update_dmx_stats(|stats| {
            let counter = match fault {
                None => &mut stats.committed,
                Some(FrameFault::LengthChanged) => &mut stats.length_changes,
                Some(FrameFault::StartCode) => &mut stats.bad_start_codes,
                Some(FrameFault::Framing) => &mut stats.framing_errors,
                Some(FrameFault::NoBreak) => return,
            };
            *counter = counter.wrapping_add(1);
        });
    }

    /// Keep the first fault, later ones do not change the outcome
    fn invalidate(&mut self, fault: FrameFault) {
        if self.fault.is_none() {
            self.fault = Some(fault);
        }
    }

    pub const fn frame_state(&self) -> FrameState {
        self.frame
    }

    /// Whether the frame in progress is still eligible for commit
    pub const fn is_good(&self) -> bool {
        self.fault.is_none()
    }

    pub const fn fault(&self) -> Option<FrameFault> {
        self.fault
    }

    /// Slots received since the last break, start code included
    pub const fn slots_received(&self) -> u16 {
        self.next_slot
    }

    /// Slot count of the previous frame
    pub const fn last_frame_length(&self) -> u16 {
        self.last_length
    }

    pub const fn staging(&self) -> Rgb {
        self.staging
    }
}
