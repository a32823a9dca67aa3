use smart_leds::RGB8;

/// Number of color channels driven by the decoder
pub const CHANNELS: usize = 3;

pub type Rgb = RGB8;

pub const BLACK: Rgb = rgb_from_u32(0x00_00_00);

/// Create an RGB color from a u32 value (0xRRGGBB format)
#[allow(clippy::cast_possible_truncation)]
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}

/// Split a color into per-channel intensities in output order (red, green, blue)
#[inline]
pub const fn channels(color: Rgb) -> [u8; CHANNELS] {
    [color.r, color.g, color.b]
}
