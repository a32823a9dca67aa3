//! Configuration switch decoding.
//!
//! The board carries ten DIP switches. Switch 10 selects the operating mode,
//! switches 1-9 form a 9-bit address. Every switch grounds its line when ON,
//! so all inputs are active low.

/// Number of address switches
pub const ADDRESS_BITS: u32 = 9;

const ADDRESS_MASK: u16 = (1 << ADDRESS_BITS) - 1;

/// Port 3 bit carrying the mode switch (high = switch OFF = DMX mode)
const PORT3_MODE_BIT: u8 = 0x20;

/// Operating mode selected by the mode switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Color is driven by the DMX512 bus
    #[default]
    Dmx,
    /// Stand-alone mode, color is picked from the address switches
    Fun,
}

/// 9-bit switch address.
///
/// In DMX mode this is the first of the three channel slots the decoder
/// listens to. In Fun mode its bits select the program and color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Address(u16);

impl Address {
    pub const MAX: u16 = ADDRESS_MASK;

    /// Create an address, discarding bits above bit 8
    pub const fn new(raw: u16) -> Self {
        Self(raw & ADDRESS_MASK)
    }

    pub const fn value(self) -> u16 {
        self.0
    }

    /// Check if address bit `bit` (0-8) is set
    pub const fn bit(self, bit: u32) -> bool {
        bit < ADDRESS_BITS && self.0 & (1 << bit) != 0
    }
}

/// Decoded state of the configuration switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SwitchSettings {
    pub mode: Mode,
    pub address: Address,
}

impl SwitchSettings {
    /// Decode raw line levels.
    ///
    /// `mode_high` is the level of the mode line. `address_levels` holds the
    /// address line levels, bit 0 for switch 1, a set bit meaning the line is
    /// high (switch OFF).
    pub const fn from_levels(mode_high: bool, address_levels: u16) -> Self {
        let mode = if mode_high { Mode::Dmx } else { Mode::Fun };
        Self {
            mode,
            address: Address::new(!address_levels),
        }
    }

    /// Decode the reference board port layout.
    ///
    /// Mode is on P3.5, address bit 0 on P3.7, address bits 1-8 on P1.0-P1.7.
    #[allow(clippy::cast_lossless)]
    pub const fn from_ports(port1: u8, port3: u8) -> Self {
        let levels = ((port1 as u16) << 1) | (port3 >> 7) as u16;
        Self::from_levels(port3 & PORT3_MODE_BIT != 0, levels)
    }
}
