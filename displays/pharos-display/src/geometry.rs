//! Display and font geometry
//!
//! All metrics are fixed at construction. The character grid is derived
//! from the panel size and the glyph cell; the only hard requirement is
//! that the glyph cell is exactly one controller page tall, so a text
//! row and a hardware page coincide.

/// Panel width in pixels
pub const DISPLAY_WIDTH: u8 = 128;

/// Panel height in pixels
pub const DISPLAY_HEIGHT: u8 = 64;

/// Height in pixels of one controller page
pub const PAGE_HEIGHT: u8 = 8;

/// Widest supported glyph cell in pixels
///
/// Bounds the stack buffer a glyph transmission is staged in.
pub const MAX_FONT_WIDTH: u8 = 32;

/// Errors for driver configurations that can never work
///
/// Detected before any bus traffic; a driver with one of these is not
/// constructed at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Font height does not equal the controller page height
    FontHeight,
    /// Font width is zero or wider than [`MAX_FONT_WIDTH`]
    FontWidth,
    /// Font table does not cover the whole printable range
    FontTable,
}

/// Logical position of the next glyph
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cursor {
    /// Character column, `0..columns`
    pub column: u8,
    /// Character row, `0..rows`
    pub row: u8,
}

/// Fixed display and font metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Geometry {
    /// Glyph cell width in pixels
    pub font_width: u8,
    /// Glyph cell height in pixels (always [`PAGE_HEIGHT`])
    pub font_height: u8,
    /// Bytes per packed glyph bitmap
    pub glyph_len: usize,
    /// Character columns across the panel
    pub columns: u8,
    /// Character rows down the panel
    pub rows: u8,
}

impl Geometry {
    /// Derive the character grid for a glyph cell
    ///
    /// Fails if the cell is not one page tall or its width is out of
    /// range. Pixels left over on the right edge are simply unused.
    pub fn new(font_width: u8, font_height: u8) -> Result<Self, ConfigError> {
        if font_height != PAGE_HEIGHT {
            return Err(ConfigError::FontHeight);
        }
        if font_width == 0 || font_width > MAX_FONT_WIDTH {
            return Err(ConfigError::FontWidth);
        }

        Ok(Self {
            font_width,
            font_height,
            glyph_len: font_width as usize * font_height as usize / 8,
            columns: DISPLAY_WIDTH / font_width,
            rows: DISPLAY_HEIGHT / font_height,
        })
    }

    /// Number of hardware pages on the panel
    pub fn pages(&self) -> u8 {
        DISPLAY_HEIGHT / PAGE_HEIGHT
    }

    /// Controller page that backs `row` under the given scroll register
    ///
    /// Once the viewport has scrolled, the controller's page 0 is no
    /// longer the topmost visible row; rows map onto pages modulo the
    /// page ring.
    pub fn physical_page(&self, start_line: u8, row: u8) -> u8 {
        (start_line / self.font_height + row) % (DISPLAY_HEIGHT / self.font_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_for_6x8_font() {
        let geo = Geometry::new(6, 8).unwrap();
        assert_eq!(geo.columns, 21);
        assert_eq!(geo.rows, 8);
        assert_eq!(geo.glyph_len, 6);
        assert_eq!(geo.pages(), 8);
    }

    #[test]
    fn test_grid_for_8x8_font() {
        let geo = Geometry::new(8, 8).unwrap();
        assert_eq!(geo.columns, 16);
        assert_eq!(geo.rows, 8);
        assert_eq!(geo.glyph_len, 8);
    }

    #[test]
    fn test_font_height_must_match_page() {
        assert_eq!(Geometry::new(6, 16), Err(ConfigError::FontHeight));
        assert_eq!(Geometry::new(6, 7), Err(ConfigError::FontHeight));
    }

    #[test]
    fn test_font_width_bounds() {
        assert_eq!(Geometry::new(0, 8), Err(ConfigError::FontWidth));
        assert_eq!(Geometry::new(MAX_FONT_WIDTH + 1, 8), Err(ConfigError::FontWidth));
        assert!(Geometry::new(MAX_FONT_WIDTH, 8).is_ok());
    }

    #[test]
    fn test_physical_page_unscrolled() {
        let geo = Geometry::new(6, 8).unwrap();
        for row in 0..8 {
            assert_eq!(geo.physical_page(0, row), row);
        }
    }

    #[test]
    fn test_physical_page_wraps_after_scroll() {
        let geo = Geometry::new(6, 8).unwrap();
        // One row scrolled: the bottom row lands back on page 0
        assert_eq!(geo.physical_page(8, 0), 1);
        assert_eq!(geo.physical_page(8, 7), 0);
        // Seven rows scrolled
        assert_eq!(geo.physical_page(56, 0), 7);
        assert_eq!(geo.physical_page(56, 7), 6);
    }
}
