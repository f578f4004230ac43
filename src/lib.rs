//! asciify library crate.
//!
//! Turns a raster image into a grid of colored glyphs and exports the
//! result as a self-contained SVG document.
//!
//! ```no_run
//! use std::sync::Arc;
//! use asciify::config::Settings;
//! use asciify::decode::StandardDecoder;
//! use asciify::session::Session;
//!
//! # async fn demo(bytes: Vec<u8>) -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = Session::new(Settings::default());
//! let viewport = asciify::ascii::Viewport { width: 120, height: 40 };
//! let art = session
//!     .load(Arc::new(StandardDecoder::new()), bytes, Some(viewport))
//!     .await?;
//! for row in art.grid.to_plain_rows() {
//!     println!("{}", row);
//! }
//! # Ok(())
//! # }
//! ```

pub mod ascii;
pub mod config;
pub mod decode;
pub mod export;
pub mod session;
