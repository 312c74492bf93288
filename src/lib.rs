//! quotecard renders short inspirational quotes into shareable images.
//!
//! The entry point is [`QuoteRenderer::render`]: it takes a [`RenderRequest`] (text, optional
//! author, watermark flag, quality tier) and an explicit [`Rng64`], and returns encoded bytes plus
//! a MIME type.
//!
//! # Pipeline overview
//!
//! 1. **Layout**: fit the quote font size, greedy-wrap the words and center the block
//!    ([`layout`]). Layout is pure and driven by a [`TextMeasure`] implementation.
//! 2. **Raster**: paint a random palette gradient, draw the placed text with `vello_cpu` and
//!    encode PNG ([`render::raster`]).
//! 3. **Fallback**: on any [`RasterError`] the SVG renderer ([`render::vector`]) produces the
//!    result instead. Callers never see a raster error.
//!
//! Quote composition and the hourly batch job live in [`quote`] and [`batch`].
//!
//! # Features
//!
//! - `raster` (default): PNG output via `vello_cpu`, `parley` and `image`. Without it every render
//!   is SVG.
#![forbid(unsafe_code)]

#[cfg(feature = "raster")]
mod assets;
mod foundation;

/// Parallel batch rendering for the periodic generation job.
pub mod batch;
/// Renderer and generator configuration.
pub mod config;
/// Pure text layout: fitting, wrapping and placement.
pub mod layout;
/// Quote composition and records.
pub mod quote;
pub mod render;

#[cfg(feature = "raster")]
pub use assets::fonts::{TextBrushRgba8, TextLayoutEngine};
pub use batch::{BatchEntry, BatchManifest, HOURLY_BATCH_SIZE, generate_batch, render_batch};
pub use config::{
    DEFAULT_PALETTE, FontConfig, Gradient, QuoteCardConfig, RenderConfig, SAFE_BEIGE,
    WATERMARK_TEXT,
};
pub use foundation::core::{Canvas, FontRole, Quality, Rgb8};
pub use foundation::error::{QuoteCardError, QuoteCardResult, RasterError, RasterResult};
pub use foundation::rng::Rng64;
pub use layout::{
    LayoutMetrics, PlacedText, QuoteLayout, TextExtent, TextMeasure, fit_font_size, layout_quote,
    wrap_words,
};
pub use quote::{Category, GenerateRequest, QuoteRecord, generate_original_quote};
pub use render::{
    ImageFormat, QuoteRenderer, RASTER_AVAILABLE, RenderReport, RenderRequest, RenderedImage,
    render,
};
