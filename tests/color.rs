mod tests {
    use myrtio_dmx_decoder::color::{BLACK, Rgb, channels, rgb_from_u32};

    #[test]
    fn test_rgb_from_u32() {
        assert_eq!(rgb_from_u32(0xFF_80_01), Rgb { r: 255, g: 128, b: 1 });
        assert_eq!(rgb_from_u32(0xAB_00_00_00), BLACK);
    }

    #[test]
    fn test_channels_order() {
        assert_eq!(channels(Rgb { r: 1, g: 2, b: 3 }), [1, 2, 3]);
        assert_eq!(channels(BLACK), [0, 0, 0]);
    }
}
