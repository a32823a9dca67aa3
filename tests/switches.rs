mod common;

mod tests {
    use std::cell::Cell;

    use myrtio_dmx_decoder::hal::PinSwitches;
    use myrtio_dmx_decoder::{Address, Mode, PortSwitches, SwitchInputs, SwitchSettings};

    use super::common::FakePin;

    #[test]
    fn test_address_masks_to_nine_bits() {
        assert_eq!(Address::new(0xFFFF).value(), 0x1FF);
        assert_eq!(Address::new(0x200).value(), 0);
        assert!(Address::new(0x100).bit(8));
        assert!(!Address::new(0x100).bit(9));
    }

    #[test]
    fn test_all_switches_off() {
        let settings = SwitchSettings::from_ports(0xFF, 0xFF);
        assert_eq!(settings.mode, Mode::Dmx);
        assert_eq!(settings.address, Address::new(0));
    }

    #[test]
    fn test_mode_switch_on_selects_fun() {
        let settings = SwitchSettings::from_ports(0xFF, 0xFF & !0x20);
        assert_eq!(settings.mode, Mode::Fun);
    }

    #[test]
    fn test_port_address_bits() {
        // Switch 1 on P3.7
        assert_eq!(SwitchSettings::from_ports(0xFF, 0x7F).address.value(), 0x001);
        // Switches 2-9 on P1.0-P1.7
        assert_eq!(SwitchSettings::from_ports(0xFE, 0xFF).address.value(), 0x002);
        assert_eq!(SwitchSettings::from_ports(0x7F, 0xFF).address.value(), 0x100);
        assert_eq!(SwitchSettings::from_ports(0x00, 0x7F).address.value(), 0x1FF);
        // Other port 3 pins do not leak into the address
        assert_eq!(SwitchSettings::from_ports(0xFF, 0x80).address.value(), 0);
    }

    #[test]
    fn test_from_levels() {
        let settings = SwitchSettings::from_levels(true, 0b1_1111_1010);
        assert_eq!(settings.mode, Mode::Dmx);
        assert_eq!(settings.address.value(), 0b101);
        assert_eq!(SwitchSettings::from_levels(false, 0x1FF).mode, Mode::Fun);
    }

    #[test]
    fn test_pin_switches_are_active_low() {
        let mode = FakePin::default();
        let address: [FakePin; 9] = Default::default();
        for pin in &address {
            pin.high.set(true);
        }
        mode.high.set(true);
        address[0].high.set(false);
        address[8].high.set(false);

        let mut switches = PinSwitches::new(mode.clone(), address.clone());
        let settings = switches.read();
        assert_eq!(settings.mode, Mode::Dmx);
        assert_eq!(settings.address.value(), 0x101);

        mode.high.set(false);
        assert_eq!(switches.read().mode, Mode::Fun);
    }

    #[test]
    fn test_port_switches_follow_port_levels() {
        let port1 = Cell::new(0xFF_u8);
        let port3 = Cell::new(0xFF_u8);
        let mut switches = PortSwitches::new(|| port1.get(), || port3.get());

        let settings = switches.read();
        assert_eq!(settings.mode, Mode::Dmx);
        assert_eq!(settings.address, Address::new(0));

        // Switches 1 and 9 on, mode switch on
        port1.set(0x7F);
        port3.set(0x7F & !0x20);
        let settings = switches.read();
        assert_eq!(settings.mode, Mode::Fun);
        assert_eq!(settings.address.value(), 0x101);
        assert_eq!(settings, SwitchSettings::from_ports(0x7F, 0x5F));
    }
}
