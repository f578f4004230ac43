//! Row-major cell grids and the grid renderer.

use std::fmt::Write as _;

use super::charset::GlyphRamp;
use super::downsample::BrightnessGrid;
use super::mapping::{map_all, RenderedCell};
use super::markup::{push_escaped_char, StyledText};
use super::palette::Palette;

/// A rectangular, row-major grid of cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid<T> {
    columns: u32,
    rows: u32,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    /// Wrap row-major cells.
    ///
    /// # Panics
    /// If `cells.len() != columns * rows`.
    pub fn from_cells(columns: u32, rows: u32, cells: Vec<T>) -> Self {
        assert_eq!(
            cells.len(),
            columns as usize * rows as usize,
            "grid of {}x{} needs {} cells",
            columns,
            rows,
            columns as usize * rows as usize
        );
        Self {
            columns,
            rows,
            cells,
        }
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// All cells, top-left to bottom-right.
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    pub fn get(&self, x: u32, y: u32) -> Option<&T> {
        if x >= self.columns || y >= self.rows {
            return None;
        }
        self.cells.get(y as usize * self.columns as usize + x as usize)
    }

    /// Iterate rows top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[T]> {
        // chunks() rejects 0; an empty grid has no cells to chunk anyway
        self.cells.chunks(self.columns.max(1) as usize)
    }
}

/// The complete styled rendering of one image.
pub type RenderedGrid = Grid<RenderedCell>;

/// Map every brightness sample to a rendered cell, keeping row-major order.
pub fn render(
    brightness: &BrightnessGrid,
    ramp: &GlyphRamp,
    palette: &Palette,
) -> RenderedGrid {
    let cells = map_all(brightness.cells(), ramp, palette);
    Grid::from_cells(brightness.columns(), brightness.rows(), cells)
}

impl RenderedGrid {
    /// One `<span style="color:…">glyph</span>` per cell, `\n` after each row.
    ///
    /// Every cell is emitted, blank-looking glyphs included, so the markup
    /// keeps the grid's rectangular shape.
    pub fn to_markup(&self) -> StyledText {
        // `<span style="color:#rrggbb">` + glyph + `</span>` is about 35 bytes
        let mut out = String::with_capacity(self.cells.len() * 36 + self.rows as usize);
        for row in self.iter_rows() {
            for cell in row {
                let _ = write!(out, "<span style=\"color:{}\">", cell.color);
                push_escaped_char(&mut out, cell.glyph);
                out.push_str("</span>");
            }
            out.push('\n');
        }
        StyledText::from_escaped(out)
    }

    /// The glyphs alone, one string per row.
    pub fn to_plain_rows(&self) -> Vec<String> {
        self.iter_rows()
            .map(|row| row.iter().map(|cell| cell.glyph).collect())
            .collect()
    }

    /// 24-bit ANSI colored text for terminal display, one line per row.
    ///
    /// Color escapes are only emitted when the color changes within a row,
    /// and every row ends with a reset.
    pub fn to_ansi(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() * 4);
        for row in self.iter_rows() {
            let mut current = None;
            for cell in row {
                if current != Some(cell.color) {
                    let c = cell.color;
                    let _ = write!(out, "\x1b[38;2;{};{};{}m", c.r, c.g, c.b);
                    current = Some(c);
                }
                out.push(cell.glyph);
            }
            out.push_str("\x1b[0m\n");
        }
        out
    }
}
