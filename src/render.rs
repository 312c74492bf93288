//! Quote card rendering: a PNG renderer with an SVG fallback.

pub mod raster;
pub mod vector;

use crate::{
    config::RenderConfig,
    foundation::{
        core::{Canvas, Quality},
        error::RasterError,
        rng::Rng64,
    },
};

/// Whether this build can produce PNG output (cargo feature `raster`).
pub const RASTER_AVAILABLE: bool = cfg!(feature = "raster");

/// The four inputs a quote card is rendered from.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RenderRequest {
    /// Quote body.
    pub text: String,
    /// Optional attribution.
    #[serde(default)]
    pub author: Option<String>,
    /// Overlay the branding string.
    #[serde(default = "default_true")]
    pub watermark: bool,
    /// Quality tier.
    #[serde(default)]
    pub quality: Quality,
}

fn default_true() -> bool {
    true
}

impl RenderRequest {
    /// Watermarked standard-quality request without an author.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: None,
            watermark: true,
            quality: Quality::Standard,
        }
    }

    /// Set the author line.
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Enable or disable the watermark.
    pub fn watermark(mut self, watermark: bool) -> Self {
        self.watermark = watermark;
        self
    }

    /// Set the quality tier.
    pub fn quality(mut self, quality: Quality) -> Self {
        self.quality = quality;
        self
    }

    /// Author to attribute, if any. An empty author draws no attribution line.
    pub fn attribution(&self) -> Option<&str> {
        self.author.as_deref().filter(|a| !a.is_empty())
    }
}

/// Encoding of a rendered card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// Raster output.
    Png,
    /// Vector fallback output.
    Svg,
}

impl ImageFormat {
    /// MIME type served for this format.
    pub fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Svg => "image/svg+xml",
        }
    }

    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }
}

/// Encoded quote card.
#[derive(Clone, Debug)]
pub struct RenderedImage {
    /// Encoded bytes (PNG data or UTF-8 SVG).
    pub bytes: Vec<u8>,
    /// Encoding of `bytes`.
    pub format: ImageFormat,
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
}

impl RenderedImage {
    /// MIME type of `bytes`.
    pub fn mime(&self) -> &'static str {
        self.format.mime()
    }
}

/// Rendered card plus the raster failure that forced the fallback, if any.
#[derive(Debug)]
pub struct RenderReport {
    /// The image returned to the caller.
    pub image: RenderedImage,
    /// Why the raster path was not used.
    pub raster_error: Option<RasterError>,
}

impl RenderReport {
    /// Whether the SVG fallback produced the image.
    pub fn used_fallback(&self) -> bool {
        self.raster_error.is_some()
    }
}

/// Renders quote cards, trying PNG first and falling back to SVG.
///
/// Holds only immutable configuration; one renderer can serve concurrent calls.
#[derive(Clone, Debug, Default)]
pub struct QuoteRenderer {
    config: RenderConfig,
}

impl QuoteRenderer {
    /// Renderer using `config`.
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render `request`; never fails.
    pub fn render(&self, request: &RenderRequest, rng: &mut Rng64) -> RenderedImage {
        self.render_report(request, rng).image
    }

    /// Render `request` and report whether the fallback engaged.
    ///
    /// The raster path is attempted once; any [`RasterError`] is logged and the SVG renderer
    /// produces the result instead.
    #[tracing::instrument(
        skip(self, request, rng),
        fields(chars = request.text.chars().count(), quality = ?request.quality)
    )]
    pub fn render_report(&self, request: &RenderRequest, rng: &mut Rng64) -> RenderReport {
        let canvas = Canvas::for_quality(request.quality);
        let raster = if RASTER_AVAILABLE {
            raster::render_raster(request, canvas, &self.config, rng)
        } else {
            Err(RasterError::DependencyMissing)
        };

        match raster {
            Ok(image) => RenderReport {
                image,
                raster_error: None,
            },
            Err(err) => {
                match &err {
                    RasterError::DependencyMissing => {
                        tracing::debug!("raster support not compiled in; rendering svg");
                    }
                    RasterError::AssetUnavailable { .. } | RasterError::DrawingFailure(_) => {
                        tracing::warn!(error = %err, "raster rendering failed; falling back to svg");
                    }
                }
                RenderReport {
                    image: vector::render_vector(request, canvas, &self.config),
                    raster_error: Some(err),
                }
            }
        }
    }
}

/// Render a quote card with the default configuration.
pub fn render(
    text: &str,
    author: Option<&str>,
    watermark: bool,
    quality: Quality,
    rng: &mut Rng64,
) -> RenderedImage {
    let request = RenderRequest {
        text: text.to_string(),
        author: author.map(str::to_string),
        watermark,
        quality,
    };
    QuoteRenderer::default().render(&request, rng)
}
