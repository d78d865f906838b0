//! Controller input ($4016)
//!
//! Reference: https://www.nesdev.org/wiki/Standard_controller

bitflags! {
    // https://wiki.nesdev.com/w/index.php/Controller_reading_code
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct JoypadButton: u8 {
        const BUTTON_A = 1 << 0;
        const BUTTON_B = 1 << 1;
        const SELECT   = 1 << 2;
        const START    = 1 << 3;
        const UP       = 1 << 4;
        const DOWN     = 1 << 5;
        const LEFT     = 1 << 6;
        const RIGHT    = 1 << 7;
    }
}

pub struct Joypad {
    strobe: bool,
    button_index: u8,
    button_status: JoypadButton,
}

impl Joypad {
    pub fn new() -> Self {
        Joypad {
            strobe: false,
            button_index: 0,
            button_status: JoypadButton::empty(),
        }
    }

    pub fn set_button(&mut self, button: JoypadButton, pressed: bool) {
        self.button_status.set(button, pressed);
    }

    /// Strobe is the last bit of the written byte; while high the shift
    /// register keeps reloading from button A.
    pub fn write(&mut self, data: u8) {
        self.strobe = data & 1 == 1;
        if self.strobe {
            self.button_index = 0;
        }
    }

    /// Shifts one button bit out per read. With nothing pressed (and once
    /// the register is exhausted) this reads 0.
    pub fn read(&mut self) -> u8 {
        if self.button_index > 7 {
            return 0;
        }
        let response = (self.button_status.bits() >> self.button_index) & 1;
        if !self.strobe {
            self.button_index += 1;
        }
        response
    }
}

impl Default for Joypad {
    fn default() -> Self {
        Joypad::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_idle_joypad_reads_zero() {
        let mut joypad = Joypad::new();
        joypad.write(1);
        joypad.write(0);
        for _ in 0..16 {
            assert_eq!(joypad.read(), 0);
        }
    }

    #[test]
    fn test_buttons_shift_out_in_order() {
        let mut joypad = Joypad::new();
        joypad.set_button(JoypadButton::BUTTON_A, true);
        joypad.set_button(JoypadButton::START, true);
        joypad.write(1);
        joypad.write(0);
        let bits: Vec<u8> = (0..8).map(|_| joypad.read()).collect();
        assert_eq!(bits, vec![1, 0, 0, 1, 0, 0, 0, 0]);
    }

    #[test]
    fn test_strobe_high_keeps_reloading_button_a() {
        let mut joypad = Joypad::new();
        joypad.set_button(JoypadButton::BUTTON_A, true);
        joypad.write(1);
        assert_eq!(joypad.read(), 1);
        assert_eq!(joypad.read(), 1);
    }
}
