//! The conversion pipeline and its interactive session state.
//!
//! [`render_image`] is the pure pipeline: decoded image and settings in,
//! rendered art out. [`Session`] wraps it with the state a host needs for one
//! interactive session:
//!
//! ```text
//! Idle -> Decoding -> Sampling -> Rendering -> Displayed -> Exporting -> Displayed
//!             \___________\____________\
//!                                       -> Failed -> (acknowledge) -> Idle
//! ```
//!
//! Every load takes a [`LoadTicket`] stamped with a new generation. Results
//! for anything but the latest generation are dropped, so a slow decode can
//! never overwrite a newer image.

use std::sync::Arc;

use image::DynamicImage;
use thiserror::Error;

use crate::ascii::{
    render, sample, BrightnessGrid, GridSize, RenderedGrid, SizingError, StyledText, Viewport,
};
use crate::config::Settings;
use crate::decode::{decode_async, DecodeError, ImageDecoder};
use crate::export::{export_svg, DownloadSink, ExportError, RenderBox, Typography};

/// Errors that stop a load.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Sizing(#[from] SizingError),
}

/// Where the session currently is in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineState {
    #[default]
    Idle,
    Decoding,
    Sampling,
    Rendering,
    Displayed,
    Exporting,
    Failed,
}

/// A fully rendered image, ready for display and export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArt {
    pub grid: RenderedGrid,
    pub markup: StyledText,
    /// Source image size in pixels
    pub source_width: u32,
    pub source_height: u32,
}

impl RenderedArt {
    pub fn grid_size(&self) -> GridSize {
        GridSize::new(self.grid.columns(), self.grid.rows())
    }
}

/// Run the synchronous part of the pipeline on a decoded image.
///
/// Sizes the grid with the settings' policy, samples, maps and renders.
/// `viewport` is only consulted by viewport-driven sizing policies.
pub fn render_image(
    image: &DynamicImage,
    settings: &Settings,
    viewport: Option<Viewport>,
) -> Result<RenderedArt, PipelineError> {
    let brightness = sample_stage(image, settings, viewport)?;
    Ok(render_stage(image, &brightness, settings))
}

fn sample_stage(
    image: &DynamicImage,
    settings: &Settings,
    viewport: Option<Viewport>,
) -> Result<BrightnessGrid, PipelineError> {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(DecodeError::EmptyImage.into());
    }
    let grid = settings
        .sizing
        .grid_for(width, height, viewport, settings.char_aspect)?;
    Ok(sample(image, grid, settings.resample)?)
}

fn render_stage(
    image: &DynamicImage,
    brightness: &BrightnessGrid,
    settings: &Settings,
) -> RenderedArt {
    let grid = render(brightness, &settings.ramp, &settings.palette);
    let markup = grid.to_markup();
    RenderedArt {
        grid,
        markup,
        source_width: image.width(),
        source_height: image.height(),
    }
}

/// Proof that a load was started, carrying its generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a load ticket must be passed to Session::complete_load"]
pub struct LoadTicket {
    generation: u64,
}

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What happened to a completed load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The new grid replaced whatever was displayed
    Displayed,
    /// A newer load was started in the meantime; the result was discarded
    Stale,
}

/// One interactive conversion session.
///
/// Mutated only through `&mut self`, so there is exactly one writer.
#[derive(Debug)]
pub struct Session {
    settings: Settings,
    generation: u64,
    state: PipelineState,
    displayed: Option<RenderedArt>,
    last_error: Option<PipelineError>,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            generation: 0,
            state: PipelineState::Idle,
            displayed: None,
            last_error: None,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Generation of the most recent load.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The grid currently on display, if any. Failed loads leave it as is.
    pub fn displayed(&self) -> Option<&RenderedArt> {
        self.displayed.as_ref()
    }

    pub fn last_error(&self) -> Option<&PipelineError> {
        self.last_error.as_ref()
    }

    fn transition(&mut self, next: PipelineState) {
        log::debug!("pipeline {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    /// Start a new load. Any load still in flight becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.last_error = None;
        self.transition(PipelineState::Decoding);
        LoadTicket {
            generation: self.generation,
        }
    }

    /// Finish a load with its settled decode result.
    ///
    /// Stale tickets are ignored and return `Ok(LoadOutcome::Stale)` without
    /// touching any state. On error the session moves to `Failed` and the
    /// previously displayed grid is kept.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        decoded: Result<DynamicImage, DecodeError>,
        viewport: Option<Viewport>,
    ) -> Result<LoadOutcome, PipelineError> {
        if ticket.generation != self.generation {
            log::warn!(
                "dropping stale load (generation {}, current {})",
                ticket.generation,
                self.generation
            );
            return Ok(LoadOutcome::Stale);
        }

        let rendered = self.run_stages(decoded, viewport);
        self.settle(rendered).map(|_| LoadOutcome::Displayed)
    }

    /// Record the result of the current load and move to its final state.
    fn settle(
        &mut self,
        rendered: Result<RenderedArt, PipelineError>,
    ) -> Result<&RenderedArt, PipelineError> {
        match rendered {
            Ok(art) => {
                log::info!(
                    "rendered {}x{} image as {}x{} grid",
                    art.source_width,
                    art.source_height,
                    art.grid.columns(),
                    art.grid.rows()
                );
                self.transition(PipelineState::Displayed);
                Ok(&*self.displayed.insert(art))
            }
            Err(e) => {
                log::warn!("load failed: {}", e);
                self.last_error = Some(e.clone());
                self.transition(PipelineState::Failed);
                Err(e)
            }
        }
    }

    fn run_stages(
        &mut self,
        decoded: Result<DynamicImage, DecodeError>,
        viewport: Option<Viewport>,
    ) -> Result<RenderedArt, PipelineError> {
        let image = decoded?;
        self.transition(PipelineState::Sampling);
        let brightness = sample_stage(&image, &self.settings, viewport)?;
        self.transition(PipelineState::Rendering);
        Ok(render_stage(&image, &brightness, &self.settings))
    }

    /// Decode `bytes` off-thread and render the result.
    ///
    /// Convenience for hosts that run one load at a time. Hosts that allow
    /// overlapping loads should use [`begin_load`](Self::begin_load),
    /// [`decode_async`] and [`complete_load`](Self::complete_load) directly.
    pub async fn load<D>(
        &mut self,
        decoder: Arc<D>,
        bytes: Vec<u8>,
        viewport: Option<Viewport>,
    ) -> Result<&RenderedArt, PipelineError>
    where
        D: ImageDecoder + ?Sized + 'static,
    {
        // `&mut self` is held across the await, so no newer load can start
        // and this one can never go stale
        let _ticket = self.begin_load();
        let decoded = decode_async(decoder, bytes).await;
        let rendered = self.run_stages(decoded, viewport);
        self.settle(rendered)
    }

    /// Acknowledge a failure and return to `Idle`.
    pub fn acknowledge(&mut self) {
        if self.state == PipelineState::Failed {
            self.last_error = None;
            self.transition(PipelineState::Idle);
        }
    }

    /// Export the displayed grid as SVG and hand it to `sink`.
    ///
    /// `render_box` and `typography` describe the grid as the host actually
    /// displayed it. Nothing is delivered on error.
    pub fn export(
        &mut self,
        render_box: RenderBox,
        typography: &Typography,
        sink: &mut dyn DownloadSink,
    ) -> Result<(), ExportError> {
        let Some(art) = &self.displayed else {
            return Err(ExportError::NothingRendered);
        };
        let file = export_svg(&art.markup, render_box, typography, &self.settings.export_style)?;

        let previous = self.state;
        self.transition(PipelineState::Exporting);
        let delivered = sink.deliver(file);
        self.transition(previous);

        match &delivered {
            Ok(()) => log::info!(
                "exported {} ({}x{})",
                crate::export::EXPORT_FILE_NAME,
                render_box.width,
                render_box.height
            ),
            Err(e) => log::warn!("export delivery failed: {}", e),
        }
        delivered
    }
}
