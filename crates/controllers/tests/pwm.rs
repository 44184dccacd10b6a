use std::convert::Infallible;

use amiacs_controllers::{PwmBank, TriColorController};
use amiacs_core::{
    AnalogOutput, ConfigurationError, Controller, Error, Pin, SlicePixels, TriColorPins, RGB8,
};
use embedded_hal::pwm::{ErrorType, SetDutyCycle};

#[derive(Debug, Clone, Copy)]
struct FakePwm {
    duty: u16,
}

impl ErrorType for FakePwm {
    type Error = Infallible;
}

impl SetDutyCycle for FakePwm {
    fn max_duty_cycle(&self) -> u16 {
        1000
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.duty = duty;
        Ok(())
    }
}

fn duties(bank: &PwmBank<FakePwm, 3>) -> [u16; 3] {
    [0, 1, 2].map(|i| bank.channel(Pin(i)).unwrap().duty)
}

#[test]
fn test_pwm_bank_drives_tri_color() {
    let _ = env_logger::try_init();

    let bank = PwmBank::new([FakePwm { duty: 500 }; 3]);
    let pins = TriColorPins::new(Pin(0), Pin(1), Pin(2));
    let mut controller = TriColorController::new(bank, pins).unwrap();

    controller.init().unwrap();
    assert_eq!(duties(controller.output()), [0, 0, 0]);

    let frame = [RGB8::new(255, 0, 51)];
    controller.show_pixels(&mut SlicePixels::new(&frame)).unwrap();
    assert_eq!(duties(controller.output()), [1000, 0, 200]);
}

#[test]
fn test_pwm_bank_unknown_pin() {
    let mut bank = PwmBank::new([FakePwm { duty: 0 }; 2]);

    assert!(bank.is_valid_pin(Pin(1)));
    assert!(!bank.is_valid_pin(Pin(2)));
    assert_eq!(
        bank.write_analog_level(Pin(2), 10),
        Err(Error::Configuration(ConfigurationError::UnknownPin(2)))
    );

    let pins = TriColorPins::new(Pin(0), Pin(1), Pin(2));
    assert_eq!(
        TriColorController::new(bank, pins).err(),
        Some(Error::Configuration(ConfigurationError::UnknownPin(2)))
    );
}
