//! Stand-alone ("Fun") mode programs.
//!
//! Address bits 7 and 8 select the program, bits 0-6 its parameter. Only the
//! static color program exists; fade, jump and strobe are reserved and show
//! the placeholder color.

use crate::color::{BLACK, Rgb, rgb_from_u32};
use crate::switches::Address;

const PROGRAM_SHIFT: u16 = 7;
const PROGRAM_MASK: u16 = 0b11;

const PROGRAM_ID_STATIC: u16 = 0;
const PROGRAM_ID_FADE: u16 = 1;
const PROGRAM_ID_JUMP: u16 = 2;

/// Number of low address bits used as program parameter
pub const PARAMETER_BITS: u32 = 7;

/// Static program palette, indexed by the selecting address bit
pub const PALETTE: [Rgb; PARAMETER_BITS as usize] = [
    rgb_from_u32(0xFF_00_00), // red
    rgb_from_u32(0x00_FF_00), // green
    rgb_from_u32(0x00_00_FF), // blue
    rgb_from_u32(0xFF_FF_00), // yellow
    rgb_from_u32(0xFF_00_FF), // magenta
    rgb_from_u32(0x00_FF_FF), // cyan
    rgb_from_u32(0xFF_FF_FF), // white
];

/// Fun mode program selected by address bits 7 and 8
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunProgram {
    /// Static color picked by the highest set parameter bit
    StaticColor,
    /// Reserved: color fade
    Fade,
    /// Reserved: color jump
    Jump,
    /// Reserved: strobe
    Strobe,
}

impl FunProgram {
    pub const fn from_address(address: Address) -> Self {
        match (address.value() >> PROGRAM_SHIFT) & PROGRAM_MASK {
            PROGRAM_ID_STATIC => Self::StaticColor,
            PROGRAM_ID_FADE => Self::Fade,
            PROGRAM_ID_JUMP => Self::Jump,
            _ => Self::Strobe,
        }
    }

    pub const fn is_implemented(self) -> bool {
        matches!(self, Self::StaticColor)
    }
}

/// Color of the static program.
///
/// The highest set bit among address bits 0-6 picks the [`PALETTE`] entry,
/// no bit set gives black.
#[allow(clippy::cast_possible_truncation)]
pub const fn static_color(address: Address) -> Rgb {
    let parameter = address.value() & ((1 << PARAMETER_BITS) - 1);
    if parameter == 0 {
        return BLACK;
    }
    let bit = (u16::BITS - 1 - parameter.leading_zeros()) as usize;
    PALETTE[bit]
}

/// Color shown in Fun mode for `address`
pub const fn fun_color(address: Address, placeholder: Rgb) -> Rgb {
    match FunProgram::from_address(address) {
        FunProgram::StaticColor => static_color(address),
        FunProgram::Fade | FunProgram::Jump | FunProgram::Strobe => placeholder,
    }
}
