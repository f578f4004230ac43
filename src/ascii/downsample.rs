//! Resampling a decoded image down (or up) to a character grid.

use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage};

use super::dimensions::GridSize;
use super::grayscale::Brightness;
use super::grid::Grid;
use crate::decode::DecodeError;

/// Grid of per-cell brightness samples.
pub type BrightnessGrid = Grid<Brightness>;

/// Resampling filter used to bring the image to grid resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Resample {
    /// Nearest-neighbour pick, sharp and blocky.
    Nearest,
    /// Bilinear (triangle) filter.
    #[default]
    Bilinear,
    /// Average of every source pixel covered by the cell.
    BoxAverage,
}

impl Resample {
    pub fn name(&self) -> &'static str {
        match self {
            Resample::Nearest => "nearest",
            Resample::Bilinear => "bilinear",
            Resample::BoxAverage => "box-average",
        }
    }
}

/// Sample an image into a brightness grid of exactly `grid` cells.
///
/// The image is resized to `columns × rows` pixels and each pixel becomes one
/// sample, `(r + g + b) / 3`. Alpha is dropped before resizing so it never
/// leaks into the color channels.
///
/// # Errors
/// `DecodeError::EmptyImage` when the image has no pixels and
/// `DecodeError::EmptyGrid` when the grid has no cells.
pub fn sample(
    image: &DynamicImage,
    grid: GridSize,
    resample: Resample,
) -> Result<BrightnessGrid, DecodeError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(DecodeError::EmptyImage);
    }
    if grid.is_empty() {
        return Err(DecodeError::EmptyGrid);
    }

    let rgb = image.to_rgb8();
    let resized = match resample {
        Resample::Nearest => imageops::resize(&rgb, grid.columns, grid.rows, FilterType::Nearest),
        Resample::Bilinear => imageops::resize(&rgb, grid.columns, grid.rows, FilterType::Triangle),
        Resample::BoxAverage => box_average(&rgb, grid),
    };

    let cells = resized
        .pixels()
        .map(|p| {
            let [r, g, b] = p.0;
            Brightness::from_rgb(r, g, b)
        })
        .collect();

    Ok(Grid::from_cells(grid.columns, grid.rows, cells))
}

/// Downsample by averaging all source pixels that fall into each cell.
///
/// Cells that cover no source pixel (grid larger than the image) take the
/// nearest source pixel instead.
fn box_average(src: &RgbImage, grid: GridSize) -> RgbImage {
    let (img_width, img_height) = src.dimensions();

    // Size of each cell in pixels (as floats for accurate mapping)
    let cell_w = img_width as f32 / grid.columns as f32;
    let cell_h = img_height as f32 / grid.rows as f32;

    let mut out = RgbImage::new(grid.columns, grid.rows);

    for cy in 0..grid.rows {
        for cx in 0..grid.columns {
            let start_x = (cx as f32 * cell_w) as u32;
            let end_x = (((cx + 1) as f32 * cell_w) as u32).min(img_width);
            let start_y = (cy as f32 * cell_h) as u32;
            let end_y = (((cy + 1) as f32 * cell_h) as u32).min(img_height);

            let mut sum = [0u32; 3];
            let mut count = 0u32;

            for py in start_y..end_y {
                for px in start_x..end_x {
                    let p = src.get_pixel(px, py).0;
                    for (acc, channel) in sum.iter_mut().zip(p) {
                        *acc += channel as u32;
                    }
                    count += 1;
                }
            }

            let pixel = if count > 0 {
                sum.map(|s| (s / count) as u8)
            } else {
                src.get_pixel(
                    start_x.min(img_width - 1),
                    start_y.min(img_height - 1),
                )
                .0
            };
            out.put_pixel(cx, cy, image::Rgb(pixel));
        }
    }

    out
}
