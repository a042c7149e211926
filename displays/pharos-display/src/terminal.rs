//! SSD1306 character terminal
//!
//! The driver holds the logical cursor and the hardware scroll register
//! and keeps the controller's page/column address windows consistent
//! with them across an unbounded byte stream. Glyphs are transmitted
//! directly into the addressed window; there is no framebuffer.
//!
//! Scrolling works on the controller's page ring: when the cursor runs
//! off the bottom row, the display-start-line register advances by one
//! glyph height, the row that just wrapped off the top becomes the new
//! bottom row, and that row is blanked before anything is printed into
//! it. Row-to-page mapping therefore goes through
//! [`Geometry::physical_page`] everywhere an address is issued.
//!
//! All operations are blocking and take `&mut self`; a multi-step
//! operation (address command plus data stream) assumes it owns the bus
//! address until it returns.

use heapless::Vec;
use pharos_hal::{DelayMs, I2cBus};

use crate::command::{self, opcode, DATA_MARKER};
use crate::font::{Font, PRINTABLE_COUNT};
use crate::geometry::{
    ConfigError, Cursor, Geometry, DISPLAY_HEIGHT, DISPLAY_WIDTH, MAX_FONT_WIDTH, PAGE_HEIGHT,
};

/// Factory-default 7-bit I2C address of SSD1306 modules
pub const DEFAULT_ADDRESS: u8 = 0x3C;

/// First printable byte; also the font table base
const PRINTABLE_BASE: u8 = 0x20;

/// How long the visual bell holds inverted colors, in milliseconds
const BELL_HOLD_MS: u32 = 60;

/// Pixel-data bytes per blanking transmission
const BLANK_CHUNK: usize = 32;

/// Transmission buffer capacity: data marker plus the largest glyph
const GLYPH_TX_CAP: usize = 1 + (MAX_FONT_WIDTH as usize * PAGE_HEIGHT as usize) / 8;

/// Errors returned by terminal operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TermError<E> {
    /// The underlying bus transfer failed
    Bus(E),
    /// Byte outside the printable range with no control meaning
    Unsupported(u8),
}

impl<E> From<E> for TermError<E> {
    fn from(err: E) -> Self {
        TermError::Bus(err)
    }
}

/// Terminal configuration
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// 7-bit I2C address of the controller
    pub address: u8,
    /// Mirror the long edge (COM output scan direction)
    pub flip_long_edge: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            flip_long_edge: false,
        }
    }
}

/// Scrolling text terminal on an SSD1306 controller
///
/// Construct with [`Ssd1306Term::new`], then run [`Ssd1306Term::init`]
/// once to program the controller and blank the screen. After that,
/// feed bytes through [`Ssd1306Term::write`] / [`Ssd1306Term::put_char`]
/// or format into it via `core::fmt::Write`.
pub struct Ssd1306Term<B, D> {
    bus: B,
    delay: D,
    address: u8,
    flip_long_edge: bool,
    font: Font,
    geo: Geometry,
    cursor: Cursor,
    start_line: u8,
}

impl<B, D> Ssd1306Term<B, D>
where
    B: I2cBus,
    D: DelayMs,
{
    /// Create a terminal for the given font
    ///
    /// No bus traffic happens here. Fails if the glyph cell is not one
    /// page tall, is wider than [`MAX_FONT_WIDTH`], or the font table
    /// does not cover the whole printable range.
    pub fn new(bus: B, delay: D, font: Font, config: Config) -> Result<Self, ConfigError> {
        let geo = Geometry::new(font.width(), font.height())?;
        if font.glyph_count() < PRINTABLE_COUNT {
            return Err(ConfigError::FontTable);
        }

        Ok(Self {
            bus,
            delay,
            address: config.address,
            flip_long_edge: config.flip_long_edge,
            font,
            geo,
            cursor: Cursor::default(),
            start_line: 0,
        })
    }

    /// One-time controller setup, then a full clear
    pub fn init(&mut self) -> Result<(), B::Error> {
        self.command(&[opcode::DISPLAY_OFFSET, 0])?; // start mapping at COM0
        if self.flip_long_edge {
            self.command(&[opcode::COM_SCAN_REVERSED])?;
        } else {
            self.command(&[opcode::COM_SCAN_NORMAL])?;
        }
        self.command(&[opcode::COM_PINS, 0x12])?; // alternative COM pin config
        self.command(&[opcode::SET_CONTRAST, 127])?;
        self.command(&[opcode::FOLLOW_RAM])?;
        self.command(&[opcode::CLOCK_DIV, 0x80])?; // DIV=1, default oscillator
        self.command(&[opcode::CHARGE_PUMP, 0x14])?; // charge pump on
        self.command(&[opcode::ADDRESS_MODE, 0])?; // horizontal addressing
        self.on()?;
        self.clear()
    }

    /// Blank the whole screen, reset the scroll register and home the
    /// cursor
    pub fn clear(&mut self) -> Result<(), B::Error> {
        self.blank_pages(0, self.geo.rows - 1)?;
        self.set_start_line(0)?;
        self.set_cursor(0, 0)
    }

    /// Blank from the cursor to the end of its row
    ///
    /// Implemented as a run of space glyphs through the current address
    /// window. With `restore_cursor` the pre-call address is reissued
    /// afterwards; otherwise the controller is left pointing past the
    /// blanked run while the logical cursor stays put.
    pub fn clear_columns_after_cursor(&mut self, restore_cursor: bool) -> Result<(), B::Error> {
        for _ in self.cursor.column..self.geo.columns {
            self.draw_glyph(0)?;
        }
        if restore_cursor {
            let Cursor { column, row } = self.cursor;
            self.set_cursor(column, row)?;
        }
        Ok(())
    }

    /// Blank every row strictly below the cursor row
    pub fn clear_lines_after_cursor(&mut self, restore_cursor: bool) -> Result<(), B::Error> {
        if self.cursor.row + 1 < self.geo.rows {
            self.blank_pages(self.cursor.row + 1, self.geo.rows - 1)?;
            if restore_cursor {
                let Cursor { column, row } = self.cursor;
                self.set_cursor(column, row)?;
            }
        }
        Ok(())
    }

    /// Blank the rest of the row, then everything below it
    ///
    /// With `reset_to_origin` the cursor is homed to (0, 0) afterwards;
    /// otherwise it is restored to where it was.
    pub fn clear_after_cursor(&mut self, reset_to_origin: bool) -> Result<(), B::Error> {
        self.clear_columns_after_cursor(false)?;
        self.clear_lines_after_cursor(!reset_to_origin)?;
        if reset_to_origin {
            self.set_cursor(0, 0)?;
        }
        Ok(())
    }

    /// Interpret one byte
    ///
    /// Control codes act on terminal state; printable bytes
    /// (`0x20..=0x7F`) render a glyph and advance the cursor. Anything
    /// else is rejected as [`TermError::Unsupported`]. A rejected byte
    /// changes nothing; a bus failure mid-operation leaves the
    /// controller's address registers wherever the last successful
    /// command put them.
    pub fn put_char(&mut self, byte: u8) -> Result<(), TermError<B::Error>> {
        match byte {
            b'\n' => {
                // line feed only; the column is kept
                let Cursor { column, row } = self.cursor;
                self.set_cursor(column, row + 1)?;
            }
            b'\r' => self.set_cursor(0, self.cursor.row)?,
            0x08 => {
                // visual bell
                self.color_invert()?;
                self.delay.delay_ms(BELL_HOLD_MS);
                self.color_normal()?;
            }
            0x0C => self.clear()?,
            0x00 => {}
            0x01 => {
                // cursor right without printing
                self.cursor.column += 1;
                self.apply_cursor()?;
            }
            0x02 => self.clear_columns_after_cursor(true)?,
            0x03 => self.clear_lines_after_cursor(true)?,
            0x04 => self.clear_after_cursor(true)?,
            PRINTABLE_BASE..=0x7F => {
                let drawn = self.draw_glyph(byte - PRINTABLE_BASE);
                self.cursor.column += 1;
                if self.cursor.column >= self.geo.columns {
                    self.apply_cursor()?;
                }
                drawn?;
            }
            other => return Err(TermError::Unsupported(other)),
        }
        Ok(())
    }

    /// Feed a byte stream through the interpreter
    ///
    /// Returns how many bytes were consumed: the full length on
    /// success, or the index of the first unsupported byte, whose
    /// predecessors have already taken effect. Bus failures abort with
    /// `Err` instead of a count.
    pub fn write(&mut self, data: &[u8]) -> Result<usize, B::Error> {
        for (consumed, &byte) in data.iter().enumerate() {
            match self.put_char(byte) {
                Ok(()) => {}
                Err(TermError::Unsupported(_)) => return Ok(consumed),
                Err(TermError::Bus(err)) => return Err(err),
            }
        }
        Ok(data.len())
    }

    /// Write a string slice; same contract as [`Ssd1306Term::write`]
    pub fn puts(&mut self, s: &str) -> Result<usize, B::Error> {
        self.write(s.as_bytes())
    }

    /// Place the cursor
    ///
    /// No clamping is applied; callers pass coordinates inside the
    /// character grid. Coordinates just past the right or bottom edge
    /// resolve through the same wrap-and-scroll rule as printing.
    pub fn set_cursor(&mut self, column: u8, row: u8) -> Result<(), B::Error> {
        self.cursor = Cursor { column, row };
        self.apply_cursor()
    }

    /// Current logical cursor as (column, row)
    pub fn cursor(&self) -> (u8, u8) {
        (self.cursor.column, self.cursor.row)
    }

    /// Current hardware scroll register value in pixel lines
    pub fn start_line(&self) -> u8 {
        self.start_line
    }

    /// Character columns across the panel
    pub fn columns(&self) -> u8 {
        self.geo.columns
    }

    /// Character rows down the panel
    pub fn rows(&self) -> u8 {
        self.geo.rows
    }

    pub fn off(&mut self) -> Result<(), B::Error> {
        self.command(&[opcode::DISPLAY_OFF])
    }

    pub fn on(&mut self) -> Result<(), B::Error> {
        self.command(&[opcode::DISPLAY_ON])
    }

    pub fn color_normal(&mut self) -> Result<(), B::Error> {
        self.command(&[opcode::COLOR_NORMAL])
    }

    pub fn color_invert(&mut self) -> Result<(), B::Error> {
        self.command(&[opcode::COLOR_INVERT])
    }

    /// Light the whole panel, hiding RAM content
    pub fn hide(&mut self) -> Result<(), B::Error> {
        self.command(&[opcode::ALL_ON])
    }

    /// Show RAM content again after [`Ssd1306Term::hide`]
    pub fn show(&mut self) -> Result<(), B::Error> {
        self.command(&[opcode::FOLLOW_RAM])
    }

    /// Set panel contrast, 0-255
    pub fn set_contrast(&mut self, level: u8) -> Result<(), B::Error> {
        self.command(&[opcode::SET_CONTRAST, level])
    }

    /// Push the logical cursor out to the controller's address windows
    ///
    /// Resolves overflow first: a column past the right edge wraps to
    /// the next row, a row past the bottom clamps to the last row and
    /// scrolls the viewport by one glyph height. The row that scrolls
    /// into view still holds whatever was printed there a screenful
    /// ago, so it is blanked before the column window is narrowed to
    /// the cursor.
    fn apply_cursor(&mut self) -> Result<(), B::Error> {
        let mut exposed_row = false;
        if self.cursor.column >= self.geo.columns {
            self.cursor.column = 0;
            self.cursor.row += 1;
        }
        if self.cursor.row >= self.geo.rows {
            self.cursor.row = self.geo.rows - 1;
            self.set_start_line(self.start_line + self.geo.font_height)?;
            exposed_row = true;
        }

        let page = self.geo.physical_page(self.start_line, self.cursor.row);
        self.transmit(&command::page_range(page, page))?;
        if exposed_row {
            self.transmit(&command::column_range(0, DISPLAY_WIDTH - 1))?;
            self.blank_stream(DISPLAY_WIDTH as usize)?;
        }
        let column = self.cursor.column * self.geo.font_width;
        self.transmit(&command::column_range(column, DISPLAY_WIDTH - 1))
    }

    /// Program the display-start-line register, wrapping on the panel
    /// height
    fn set_start_line(&mut self, line: u8) -> Result<(), B::Error> {
        self.start_line = line % DISPLAY_HEIGHT;
        self.transmit(&command::start_line(self.start_line))
    }

    /// Zero-fill the page window `start..=end` across the full panel
    /// width
    fn blank_pages(&mut self, start: u8, end: u8) -> Result<(), B::Error> {
        self.transmit(&command::page_range(start, end))?;
        self.transmit(&command::column_range(0, DISPLAY_WIDTH - 1))?;
        let pages = (end - start + 1) as usize;
        self.blank_stream(pages * DISPLAY_WIDTH as usize)
    }

    /// Stream `len` zero bytes of pixel data through the current window
    fn blank_stream(&mut self, len: usize) -> Result<(), B::Error> {
        let mut chunk = [0u8; 1 + BLANK_CHUNK];
        chunk[0] = DATA_MARKER;
        for _ in 0..len / BLANK_CHUNK {
            self.transmit(&chunk)?;
        }
        Ok(())
    }

    /// Transmit one glyph bitmap into the current address window
    ///
    /// The controller advances its column pointer by the glyph width;
    /// the logical cursor is the caller's business.
    fn draw_glyph(&mut self, index: u8) -> Result<(), B::Error> {
        let mut buf: Vec<u8, GLYPH_TX_CAP> = Vec::new();
        let _ = buf.push(DATA_MARKER);
        let _ = buf.extend_from_slice(self.font.glyph(index as usize));
        self.transmit(&buf)
    }

    /// Marker-prefix `ops` as a command frame and transmit it
    fn command(&mut self, ops: &[u8]) -> Result<(), B::Error> {
        let frame = command::frame(ops);
        self.transmit(&frame)
    }

    fn transmit(&mut self, bytes: &[u8]) -> Result<(), B::Error> {
        self.bus.write(self.address, bytes)
    }
}

/// Formatting support: `write!` feeds the interpreter like
/// [`Ssd1306Term::write`]; any rejected byte or bus failure surfaces as
/// `fmt::Error`
impl<B, D> core::fmt::Write for Ssd1306Term<B, D>
where
    B: I2cBus,
    D: DelayMs,
{
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        match self.write(s.as_bytes()) {
            Ok(consumed) if consumed == s.len() => Ok(()),
            _ => Err(core::fmt::Error),
        }
    }
}
