//! Grid dimension calculation for aspect-ratio-correct rendering.

use thiserror::Error;

/// Default cell aspect ratio (cell height / cell width).
/// 1.0 keeps the grid's columns/rows equal to the image's width/height.
pub const DEFAULT_CHAR_ASPECT_RATIO: f32 = 1.0;

/// Default share of the viewport's shorter side given to the grid.
pub const DEFAULT_VIEWPORT_FRACTION: f32 = 0.9;

/// Size of a character grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridSize {
    pub columns: u32,
    pub rows: u32,
}

impl GridSize {
    pub const fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    pub fn cell_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    pub fn is_empty(&self) -> bool {
        self.columns == 0 || self.rows == 0
    }
}

/// Space available to the host for displaying the grid, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SizingError {
    #[error("sizing policy needs a viewport but none was provided")]
    MissingViewport,
    #[error("source image has zero width or height")]
    EmptyImage,
}

/// How the grid size is derived from the image.
///
/// Every policy drives one axis from a budget and scales the other from the
/// image aspect ratio, so `columns / rows` tracks `width / height` (corrected
/// by the cell aspect ratio) to the nearest integer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizingPolicy {
    /// The longer image side gets `min(viewport.width, viewport.height) * fraction` cells.
    ViewportFraction { fraction: f32 },
    /// Width gets `columns` cells, never more than the image has pixels.
    MaxColumns { columns: u32 },
    /// Largest grid that fits inside `columns × rows`.
    FitBox { columns: u32, rows: u32 },
}

impl Default for SizingPolicy {
    fn default() -> Self {
        SizingPolicy::ViewportFraction {
            fraction: DEFAULT_VIEWPORT_FRACTION,
        }
    }
}

impl SizingPolicy {
    pub fn name(&self) -> &'static str {
        match self {
            SizingPolicy::ViewportFraction { .. } => "viewport-fraction",
            SizingPolicy::MaxColumns { .. } => "max-columns",
            SizingPolicy::FitBox { .. } => "fit-box",
        }
    }

    pub fn needs_viewport(&self) -> bool {
        matches!(self, SizingPolicy::ViewportFraction { .. })
    }

    /// Compute the grid for an image of `img_width × img_height` pixels.
    ///
    /// # Arguments
    /// * `img_width` - Width of the source image in pixels
    /// * `img_height` - Height of the source image in pixels
    /// * `viewport` - Display area, required by `ViewportFraction`
    /// * `char_aspect` - Cell height / cell width (1.0 for square cells)
    pub fn grid_for(
        &self,
        img_width: u32,
        img_height: u32,
        viewport: Option<Viewport>,
        char_aspect: f32,
    ) -> Result<GridSize, SizingError> {
        if img_width == 0 || img_height == 0 {
            return Err(SizingError::EmptyImage);
        }

        // Compensate for non-square cells. Cells char_aspect times taller
        // than wide need char_aspect times fewer rows.
        let target_aspect = img_width as f32 / img_height as f32 * char_aspect;

        let grid = match *self {
            SizingPolicy::ViewportFraction { fraction } => {
                let viewport = viewport.ok_or(SizingError::MissingViewport)?;
                let budget = (viewport.width.min(viewport.height) as f32 * fraction).round();
                fit_longer_side(budget.max(1.0) as u32, target_aspect)
            }
            SizingPolicy::MaxColumns { columns } => {
                let columns = columns.min(img_width).max(1);
                GridSize::new(columns, scale_rows(columns, target_aspect))
            }
            SizingPolicy::FitBox { columns, rows } => {
                calculate_dimensions_with_aspect(columns.max(1), rows.max(1), target_aspect)
            }
        };

        Ok(grid)
    }
}

/// Give the budget to whichever axis is longer after aspect correction.
fn fit_longer_side(budget: u32, target_aspect: f32) -> GridSize {
    if target_aspect > 1.0 {
        GridSize::new(budget, scale_rows(budget, target_aspect))
    } else {
        GridSize::new(scale_columns(budget, target_aspect), budget)
    }
}

fn scale_rows(columns: u32, target_aspect: f32) -> u32 {
    ((columns as f32 / target_aspect).round() as u32).max(1)
}

fn scale_columns(rows: u32, target_aspect: f32) -> u32 {
    ((rows as f32 * target_aspect).round() as u32).max(1)
}

/// Fit a grid with the given columns/rows ratio inside a bounding box.
///
/// Tries the full width first and falls back to the full height when the
/// derived row count does not fit.
///
/// # Example
/// ```ignore
/// // A 4:3 image in an 80x24 box is height-bound
/// let grid = calculate_dimensions_with_aspect(80, 24, 4.0 / 3.0);
/// assert_eq!(grid, GridSize::new(32, 24));
/// ```
pub fn calculate_dimensions_with_aspect(
    max_columns: u32,
    max_rows: u32,
    target_aspect: f32,
) -> GridSize {
    let columns = max_columns;
    // Very wide images round to zero rows; one row still fits the box
    let rows = ((columns as f32 / target_aspect).round() as u32).max(1);

    if rows <= max_rows {
        GridSize::new(columns, rows)
    } else {
        // Width-constrained doesn't fit, use height-constrained
        let rows = max_rows;
        let columns = ((rows as f32 * target_aspect).round() as u32).min(max_columns);
        GridSize::new(columns.max(1), rows.max(1))
    }
}
