//! SSD1306 command stream encoding
//!
//! Every transmission to the controller leads with a marker byte
//! selecting what the bytes after it mean: `0x00` feeds the command
//! decoder, `0x40` streams into display RAM at the current address.
//! This module holds the opcode table and builds marker-prefixed
//! command frames as owned buffers; deciding *when* to send them is the
//! terminal's job.

use heapless::Vec;

/// Marker selecting the command decoder
pub const COMMAND_MARKER: u8 = 0x00;

/// Marker selecting pixel data
pub const DATA_MARKER: u8 = 0x40;

/// Longest command frame the driver builds (marker + opcode + two args)
pub const MAX_COMMAND_LEN: usize = 4;

/// Controller opcodes
pub mod opcode {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const COLOR_NORMAL: u8 = 0xA6;
    pub const COLOR_INVERT: u8 = 0xA7;
    /// Light every pixel regardless of RAM (hides content)
    pub const ALL_ON: u8 = 0xA5;
    /// Resume showing RAM content
    pub const FOLLOW_RAM: u8 = 0xA4;
    pub const SET_CONTRAST: u8 = 0x81;
    /// Page address window: start page, end page
    pub const PAGE_RANGE: u8 = 0x22;
    /// Column address window: start column, end column
    pub const COLUMN_RANGE: u8 = 0x21;
    /// Display start line, low six bits hold the line
    pub const START_LINE: u8 = 0x40;
    pub const DISPLAY_OFFSET: u8 = 0xD3;
    pub const COM_SCAN_NORMAL: u8 = 0xC0;
    pub const COM_SCAN_REVERSED: u8 = 0xC8;
    pub const COM_PINS: u8 = 0xDA;
    pub const CLOCK_DIV: u8 = 0xD5;
    pub const CHARGE_PUMP: u8 = 0x8D;
    pub const ADDRESS_MODE: u8 = 0x20;
}

/// Build a command frame: the command marker followed by the opcode
/// bytes in order
///
/// `ops` must fit the frame capacity; excess bytes are dropped, which
/// no internal caller can trigger.
pub fn frame(ops: &[u8]) -> Vec<u8, MAX_COMMAND_LEN> {
    debug_assert!(ops.len() < MAX_COMMAND_LEN);

    let mut buf = Vec::new();
    let _ = buf.push(COMMAND_MARKER);
    let _ = buf.extend_from_slice(ops);
    buf
}

/// Page-address window command, inclusive on both ends
pub fn page_range(start: u8, end: u8) -> Vec<u8, MAX_COMMAND_LEN> {
    frame(&[opcode::PAGE_RANGE, start, end])
}

/// Column-address window command, inclusive on both ends
pub fn column_range(start: u8, end: u8) -> Vec<u8, MAX_COMMAND_LEN> {
    frame(&[opcode::COLUMN_RANGE, start, end])
}

/// Display-start-line command for a pixel line in `0..64`
pub fn start_line(line: u8) -> Vec<u8, MAX_COMMAND_LEN> {
    frame(&[opcode::START_LINE | (line & 0x3F)])
}
