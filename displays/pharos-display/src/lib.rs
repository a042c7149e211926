//! SSD1306 text-terminal driver
//!
//! Drives a 128x64 SSD1306-class OLED controller as a scrolling
//! character terminal over I2C. The controller's RAM is page-addressed
//! (one page = an 8 pixel tall strip), and the driver never keeps a
//! framebuffer: glyphs are transmitted straight into the addressed
//! window, and vertical scrolling is done with the controller's
//! display-start-line register, so a full-screen scroll moves no pixel
//! data at all.
//!
//! The driver owns two pieces of state and keeps the controller's
//! addressing registers consistent with them across every operation:
//!
//! - the cursor: logical (column, row) of the next glyph
//! - the viewport offset: the hardware scroll register, in pixel lines
//!
//! Bytes fed to [`terminal::Ssd1306Term::write`] are interpreted
//! through a small control-code protocol (`\n`, `\r`, form feed, bell,
//! clear-to-end variants) with everything in `0x20..=0x7F` rendered
//! through a fixed-cell bitmap font.
//!
//! # Modules
//!
//! - [`geometry`] - display/font metrics and the cursor type
//! - [`command`] - controller opcodes and command-frame building
//! - [`font`] - bitmap font type plus the bundled 6x8 ASCII font
//! - [`terminal`] - the driver itself

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod command;
pub mod font;
pub mod geometry;
pub mod terminal;

// Re-export the public surface at crate root for convenience
pub use font::{Font, FONT_6X8};
pub use geometry::{ConfigError, Cursor, Geometry};
pub use terminal::{Config, Ssd1306Term, TermError, DEFAULT_ADDRESS};
