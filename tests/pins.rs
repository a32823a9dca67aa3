mod common;

mod tests {
    use myrtio_dmx_decoder::hal::{ActiveLowIndicator, PinChannels};
    use myrtio_dmx_decoder::{ChannelOutput, StatusIndicator};

    use super::common::FakePin;

    #[test]
    fn test_pin_channels_follow_levels() {
        let pins: [FakePin; 3] = Default::default();
        let [red, green, blue] = pins.clone();
        let mut channels = PinChannels::new(red, green, blue);

        channels.write([true, false, true]);
        assert!(pins[0].high.get());
        assert!(!pins[1].high.get());
        assert!(pins[2].high.get());

        channels.write([false, true, false]);
        assert!(!pins[0].high.get());
        assert!(pins[1].high.get());
        assert!(!pins[2].high.get());
    }

    #[test]
    fn test_indicator_is_active_low() {
        let pin = FakePin::default();
        let mut indicator = ActiveLowIndicator::new(pin.clone());

        indicator.set_lit(true);
        assert!(!pin.high.get());
        indicator.set_lit(false);
        assert!(pin.high.get());
    }
}
