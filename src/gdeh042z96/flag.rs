/// Data values sent along with the commands in [`crate::Cmd`].
///
/// The update sequence values differ from the 0xC7 the controller datasheet suggests.
/// 0xF7 and 0xFF were picked on real panels and give the expected refresh behavior.
pub struct Flag;
#[allow(missing_docs)]
impl Flag {
    // Data Entry Mode (0x11) flags
    pub const DATA_ENTRY_INCRY_INCRX: u8 = 0x03; // Y increment, X increment

    // Display Update Control 2 (0x22) sequences
    pub const DISPLAY_UPDATE_FULL: u8 = 0xF7;
    pub const DISPLAY_UPDATE_PARTIAL: u8 = 0xFF;

    // Display Update Control 1 (0x21) for partial refresh
    pub const DISPLAY_UPDATE_CTRL1_PARTIAL: [u8; 2] = [0x00, 0x00];

    // Border Waveform Control (0x3C)
    pub const BORDER_WAVEFORM_PARTIAL: u8 = 0x80;

    // Deep Sleep Mode (0x10)
    pub const DEEP_SLEEP_MODE_1: u8 = 0x01;

    // RAM fill values used when a plane is not supplied
    pub const RAM_FILL_WHITE: u8 = 0xFF;
    pub const RAM_FILL_NO_RED: u8 = 0x00;
}
