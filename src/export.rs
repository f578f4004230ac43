//! SVG export of a rendered grid.
//!
//! The export wraps the grid's styled markup in an SVG `<foreignObject>` so
//! the file reproduces what the host displayed: same box size, same font
//! stack, same spacing. The core only builds the file; writing it anywhere is
//! the job of a [`DownloadSink`] supplied by the host.

use std::fmt::{self, Write as _};

use thiserror::Error;

use crate::ascii::{escape_attr, GridSize, StyledText};

/// Deterministic name of the exported file.
pub const EXPORT_FILE_NAME: &str = "ascii-art.svg";

/// MIME type of the exported file.
pub const SVG_MIME_TYPE: &str = "image/svg+xml";

/// Horizontal advance of a monospace glyph, 0.6 em, as a ratio so that
/// whole font sizes give whole pixel advances.
const MONOSPACE_ADVANCE_EM: (f32, f32) = (3.0, 5.0);

/// What browsers use for `line-height: normal` with common monospace fonts,
/// 1.2 em.
const NORMAL_LINE_HEIGHT_EM: (f32, f32) = (6.0, 5.0);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("nothing has been rendered yet")]
    NothingRendered,
    #[error("rendered box is empty ({width}x{height})")]
    EmptyBox { width: u32, height: u32 },
    #[error("failed to deliver export: {0}")]
    Delivery(String),
}

/// A CSS length that may be left to the font (`normal`).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Spacing {
    #[default]
    Normal,
    Px(f32),
}

impl fmt::Display for Spacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Spacing::Normal => f.write_str("normal"),
            Spacing::Px(px) => write!(f, "{}px", px),
        }
    }
}

/// Typography of the displayed grid, as computed by the host at render time.
#[derive(Debug, Clone, PartialEq)]
pub struct Typography {
    /// CSS font stack, e.g. `"Courier New", monospace`
    pub font_family: String,
    /// Font size in pixels
    pub font_size: f32,
    pub line_height: Spacing,
    pub letter_spacing: Spacing,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            font_family: "monospace".to_string(),
            font_size: 10.0,
            line_height: Spacing::Normal,
            letter_spacing: Spacing::Normal,
        }
    }
}

impl Typography {
    /// Line height in pixels, resolving `normal`.
    pub fn line_height_px(&self) -> f32 {
        match self.line_height {
            Spacing::Normal => {
                let (num, den) = NORMAL_LINE_HEIGHT_EM;
                self.font_size * num / den
            }
            Spacing::Px(px) => px,
        }
    }

    /// Horizontal space one cell takes, in pixels.
    pub fn cell_advance_px(&self) -> f32 {
        let spacing = match self.letter_spacing {
            Spacing::Normal => 0.0,
            Spacing::Px(px) => px,
        };
        let (num, den) = MONOSPACE_ADVANCE_EM;
        self.font_size * num / den + spacing
    }
}

/// On-screen size of the rendered grid in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderBox {
    pub width: u32,
    pub height: u32,
}

impl RenderBox {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Estimate the box a grid occupies when laid out with `typography`.
    ///
    /// For hosts that have no layout engine to measure. Hosts that display
    /// the grid should pass the measured box instead.
    pub fn estimate(grid: GridSize, typography: &Typography) -> Self {
        let width = (grid.columns as f32 * typography.cell_advance_px()).ceil();
        let height = (grid.rows as f32 * typography.line_height_px()).ceil();
        Self {
            width: width.max(0.0) as u32,
            height: height.max(0.0) as u32,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Colors of the export container, as CSS color values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportStyle {
    pub background: String,
    pub foreground: String,
}

impl Default for ExportStyle {
    fn default() -> Self {
        Self {
            background: "black".to_string(),
            foreground: "#0f0".to_string(),
        }
    }
}

/// A finished export, ready to be handed to a [`DownloadSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Host collaborator that receives finished exports.
pub trait DownloadSink {
    fn deliver(&mut self, file: ExportFile) -> Result<(), ExportError>;
}

/// Sink that keeps exports in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub files: Vec<ExportFile>,
}

impl DownloadSink for MemorySink {
    fn deliver(&mut self, file: ExportFile) -> Result<(), ExportError> {
        self.files.push(file);
        Ok(())
    }
}

/// Build the SVG document for a rendered grid.
///
/// The markup is embedded inside a `<foreignObject>` sized to `render_box`.
/// Glyph text in [`StyledText`] is already escaped; typography and style
/// values are escaped here before going into attributes.
///
/// # Errors
/// `ExportError::EmptyBox` if the box has zero width or height.
pub fn export_svg(
    markup: &StyledText,
    render_box: RenderBox,
    typography: &Typography,
    style: &ExportStyle,
) -> Result<ExportFile, ExportError> {
    if render_box.is_empty() {
        return Err(ExportError::EmptyBox {
            width: render_box.width,
            height: render_box.height,
        });
    }

    let RenderBox { width, height } = render_box;
    let css = format!(
        "margin:0; padding:0; background:{}; color:{}; font-family:{}; font-size:{}px; \
         line-height:{}; letter-spacing:{}; white-space:pre;",
        style.background,
        style.foreground,
        typography.font_family,
        typography.font_size,
        typography.line_height,
        typography.letter_spacing,
    );

    let mut svg = String::with_capacity(markup.len() + 512);
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = width,
        h = height,
    );
    let _ = writeln!(
        svg,
        r#"  <foreignObject x="0" y="0" width="{}" height="{}">"#,
        width, height
    );
    let _ = write!(
        svg,
        r#"    <div xmlns="http://www.w3.org/1999/xhtml" style="{}">"#,
        escape_attr(&css)
    );
    svg.push_str(markup.as_str());
    svg.push_str("</div>\n  </foreignObject>\n</svg>\n");

    Ok(ExportFile {
        file_name: EXPORT_FILE_NAME.to_string(),
        mime_type: SVG_MIME_TYPE,
        bytes: svg.into_bytes(),
    })
}
