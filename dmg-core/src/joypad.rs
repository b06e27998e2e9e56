//! Joypad button state and the synthesized JOYP (0xFF00) register.
//!
//! Button levels on the hardware are active-low: a pressed button reads as
//! 0 in the selected row. Internally buttons are stored as logical
//! pressed/released flags and the electrical levels are synthesized when
//! the register is read.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    A,
    B,
    Start,
    Select,
    Up,
    Down,
    Left,
    Right,
}

/// Which button rows are currently selected, as set by writes to JOYP
/// bits 4-5.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoypadMode {
    Neither,
    Actions,
    Directions,
    Both,
}

impl JoypadMode {
    pub fn from_joyp_write(value: u8) -> Self {
        match (value >> 4) & 0x03 {
            0x00 => Self::Neither,
            0x01 => Self::Actions,
            0x02 => Self::Directions,
            0x03 => Self::Both,
            _ => unreachable!("2-bit value"),
        }
    }

    fn actions_selected(self) -> bool {
        matches!(self, Self::Actions | Self::Both)
    }

    fn directions_selected(self) -> bool {
        matches!(self, Self::Directions | Self::Both)
    }

    fn any_selected(self) -> bool {
        !matches!(self, Self::Neither)
    }
}

#[derive(Debug, Clone)]
pub struct JoypadState {
    mode: JoypadMode,
    a: bool,
    b: bool,
    start: bool,
    select: bool,
    up: bool,
    down: bool,
    left: bool,
    right: bool,
}

impl JoypadState {
    pub fn new() -> Self {
        Self {
            mode: JoypadMode::Both,
            a: false,
            b: false,
            start: false,
            select: false,
            up: false,
            down: false,
            left: false,
            right: false,
        }
    }

    fn field_mut(&mut self, button: Button) -> &mut bool {
        match button {
            Button::A => &mut self.a,
            Button::B => &mut self.b,
            Button::Start => &mut self.start,
            Button::Select => &mut self.select,
            Button::Up => &mut self.up,
            Button::Down => &mut self.down,
            Button::Left => &mut self.left,
            Button::Right => &mut self.right,
        }
    }

    pub fn set_pressed(&mut self, button: Button, pressed: bool) {
        *self.field_mut(button) = pressed;
        log::debug!("Button {button:?} pressed={pressed}, current state: {self:?}");
    }

    pub fn set_mode(&mut self, mode: JoypadMode) {
        self.mode = mode;
    }

    /// Synthesize the value read from JOYP.
    ///
    /// Bits 6-7 always read as 1. Bit 4 reads as 1 while any row is
    /// selected. The low nibble carries the active-low levels of the
    /// selected row(s); with both rows selected the rows are ORed, so a
    /// button only reads as pressed if its bit is low in every selected
    /// row.
    pub fn joyp_value(&self) -> u8 {
        let mut value = 0xC0 | if self.mode.any_selected() { 0x10 } else { 0x00 };

        if self.mode.directions_selected() {
            value |= (u8::from(!self.down) << 3)
                | (u8::from(!self.up) << 2)
                | (u8::from(!self.left) << 1)
                | u8::from(!self.right);
        }
        if self.mode.actions_selected() {
            value |= (u8::from(!self.start) << 3)
                | (u8::from(!self.select) << 2)
                | (u8::from(!self.b) << 1)
                | u8::from(!self.a);
        }

        value
    }
}
