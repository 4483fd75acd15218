//! HT16D35B command opcodes and the power-on configuration sequence.

/// Command opcodes
pub struct Cmd;
impl Cmd {
    /// Reset all registers to their defaults
    pub const SOFTWARE_RESET: u8 = 0xCC;
    /// Binary or grayscale display mode
    pub const MODE_SELECT: u8 = 0x31;
    /// Number of active COM outputs minus one
    pub const COM_OUTPUT: u8 = 0x32;
    /// Oscillator and display enable
    pub const SYSTEM_CONTROL: u8 = 0x35;
    /// ROW constant current ratio
    pub const CONSTANT_CURRENT: u8 = 0x36;
    /// Global duty, 0–63
    pub const GLOBAL_BRIGHTNESS: u8 = 0x37;
    /// COM output enable mask
    pub const COM_PIN_CONTROL: u8 = 0x41;
    /// ROW output enable mask, 4 bytes
    pub const ROW_PIN_CONTROL: u8 = 0x42;
    /// Write one display RAM byte: `[address, value]`
    pub const WRITE_DISPLAY_RAM: u8 = 0x80;
    /// Set the display RAM read address: `[address]`
    pub const READ_DISPLAY_RAM: u8 = 0x81;
}

/// Command payload values
pub struct Flag;
impl Flag {
    /// On/off per element
    pub const MODE_BINARY: u8 = 0x01;
    /// COM0–COM7
    pub const COM_OUTPUT_8: u8 = 0x07;
    /// Maximum ROW current
    pub const CURRENT_MAX: u8 = 0x00;
    /// All eight COM outputs
    pub const COM_ALL: u8 = 0xFF;
    /// All 32 ROW outputs
    pub const ROW_ALL: [u8; 4] = [0xFF; 4];
    /// Oscillator running, COM scan active
    pub const OSC_ON_DISPLAY_ON: u8 = 0x03;
}

/// Settle time after a software reset
pub const RESET_SETTLE_MS: u8 = 5;

/// An opcode plus its payload, sent as one transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Command<'a> {
    /// Opcode byte
    pub opcode: u8,
    /// Payload bytes following the opcode; empty for bare commands
    pub payload: &'a [u8],
}

impl<'a> Command<'a> {
    /// A command with payload.
    #[must_use]
    pub const fn new(opcode: u8, payload: &'a [u8]) -> Self {
        Self { opcode, payload }
    }

    /// A command without payload.
    #[must_use]
    pub const fn bare(opcode: u8) -> Command<'static> {
        Command {
            opcode,
            payload: &[],
        }
    }
}

/// Steps of the controller init sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitStep {
    /// Send the software reset command
    SoftwareReset,
    /// Wait a number of milliseconds
    DelayMs(u8),
    /// Send a fixed command
    Cmd(Command<'static>),
    /// Send the global brightness command with the configured level
    Brightness,
    /// Zero all display RAM and the pixel buffer, then flush
    ClearDisplay,
}

/// Power-on sequence for a KEM-5088 in binary mode.
pub const INIT_SEQUENCE: &[InitStep] = &[
    InitStep::SoftwareReset,
    InitStep::DelayMs(RESET_SETTLE_MS),
    InitStep::Cmd(Command::new(Cmd::MODE_SELECT, &[Flag::MODE_BINARY])),
    InitStep::Cmd(Command::new(Cmd::COM_OUTPUT, &[Flag::COM_OUTPUT_8])),
    InitStep::Cmd(Command::new(Cmd::CONSTANT_CURRENT, &[Flag::CURRENT_MAX])),
    InitStep::Brightness,
    InitStep::Cmd(Command::new(Cmd::COM_PIN_CONTROL, &[Flag::COM_ALL])),
    InitStep::Cmd(Command::new(Cmd::ROW_PIN_CONTROL, &Flag::ROW_ALL)),
    InitStep::Cmd(Command::new(Cmd::SYSTEM_CONTROL, &[Flag::OSC_ON_DISPLAY_ON])),
    InitStep::ClearDisplay,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcodes() {
        assert_eq!(Cmd::SOFTWARE_RESET, 0xCC);
        assert_eq!(Cmd::MODE_SELECT, 0x31);
        assert_eq!(Cmd::COM_OUTPUT, 0x32);
        assert_eq!(Cmd::SYSTEM_CONTROL, 0x35);
        assert_eq!(Cmd::CONSTANT_CURRENT, 0x36);
        assert_eq!(Cmd::GLOBAL_BRIGHTNESS, 0x37);
        assert_eq!(Cmd::COM_PIN_CONTROL, 0x41);
        assert_eq!(Cmd::ROW_PIN_CONTROL, 0x42);
        assert_eq!(Cmd::WRITE_DISPLAY_RAM, 0x80);
        assert_eq!(Cmd::READ_DISPLAY_RAM, 0x81);
    }

    #[test]
    fn test_bare_command_has_no_payload() {
        let reset = Command::bare(Cmd::SOFTWARE_RESET);
        assert_eq!(reset.opcode, 0xCC);
        assert!(reset.payload.is_empty());
    }

    #[test]
    fn test_init_sequence_order() {
        assert_eq!(INIT_SEQUENCE.first(), Some(&InitStep::SoftwareReset));
        assert_eq!(INIT_SEQUENCE.last(), Some(&InitStep::ClearDisplay));
        // reset settles for at least 5 ms before anything else is sent
        match INIT_SEQUENCE[1] {
            InitStep::DelayMs(ms) => assert!(ms >= 5),
            other => panic!("expected delay after reset, got {other:?}"),
        }
        assert_eq!(
            INIT_SEQUENCE[7],
            InitStep::Cmd(Command::new(0x42, &[0xFF, 0xFF, 0xFF, 0xFF]))
        );
        assert_eq!(
            INIT_SEQUENCE[8],
            InitStep::Cmd(Command::new(0x35, &[0x03]))
        );
    }
}
