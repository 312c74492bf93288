use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::foundation::{
    core::{FontRole, Rgb8},
    error::{QuoteCardError, QuoteCardResult},
};

/// Fixed branding string drawn by the watermark.
pub const WATERMARK_TEXT: &str = "ViralQuoteMachine.com";

/// Affiliate tag used when none is configured.
pub const DEFAULT_AFFILIATE_TAG: &str = "yourtag-20";

const DEJAVU_DIR: &str = "/usr/share/fonts/truetype/dejavu";

/// One `(top, bottom)` pair of the background palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Gradient {
    /// Color of the first scanline.
    pub top: Rgb8,
    /// Color the gradient approaches at the bottom edge.
    pub bottom: Rgb8,
}

impl Gradient {
    const fn new(top: Rgb8, bottom: Rgb8) -> Self {
        Self { top, bottom }
    }
}

/// Built-in background palette.
pub const DEFAULT_PALETTE: [Gradient; 4] = [
    Gradient::new(Rgb8::new(245, 240, 232), Rgb8::new(222, 203, 182)),
    Gradient::new(Rgb8::new(250, 242, 234), Rgb8::new(221, 214, 200)),
    Gradient::new(Rgb8::new(240, 235, 226), Rgb8::new(210, 200, 190)),
    Gradient::new(Rgb8::new(255, 247, 240), Rgb8::new(232, 222, 210)),
];

/// Neutral fill painted before the gradient.
pub const SAFE_BEIGE: Rgb8 = Rgb8::new(238, 232, 223);

/// Ordered font candidates per role.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Candidates for the quote body.
    pub bold: Vec<PathBuf>,
    /// Candidates for the author line and watermark.
    pub light: Vec<PathBuf>,
}

impl Default for FontConfig {
    fn default() -> Self {
        let dejavu = |name: &str| Path::new(DEJAVU_DIR).join(name);
        Self {
            bold: vec![dejavu("DejaVuSans-Bold.ttf"), dejavu("DejaVuSerif-Bold.ttf")],
            light: vec![dejavu("DejaVuSans.ttf"), dejavu("DejaVuSerif.ttf")],
        }
    }
}

impl FontConfig {
    /// Candidate list for `role`.
    pub fn candidates(&self, role: FontRole) -> &[PathBuf] {
        match role {
            FontRole::Bold => &self.bold,
            FontRole::Light => &self.light,
        }
    }

    /// Resolve the font file for `role`.
    ///
    /// Returns the first candidate that exists on disk, otherwise the first candidate as-is so that
    /// loading it reports the missing file. `None` only when the list is empty.
    pub fn resolve(&self, role: FontRole) -> Option<&Path> {
        let candidates = self.candidates(role);
        candidates
            .iter()
            .find(|p| p.exists())
            .or_else(|| candidates.first())
            .map(PathBuf::as_path)
    }
}

/// Visual parameters of the renderers.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Font candidates.
    pub fonts: FontConfig,
    /// Opaque fill under the gradient.
    pub background: Rgb8,
    /// Gradient pairs picked uniformly per render.
    pub palette: Vec<Gradient>,
    /// Branding string used by the watermark.
    pub watermark_text: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            fonts: FontConfig::default(),
            background: SAFE_BEIGE,
            palette: DEFAULT_PALETTE.to_vec(),
            watermark_text: WATERMARK_TEXT.to_string(),
        }
    }
}

impl RenderConfig {
    /// Check invariants the renderers rely on.
    pub fn validate(&self) -> QuoteCardResult<()> {
        if self.palette.is_empty() {
            return Err(QuoteCardError::config("palette must contain at least one gradient"));
        }
        if self.watermark_text.trim().is_empty() {
            return Err(QuoteCardError::config("watermark_text must be non-empty"));
        }
        Ok(())
    }
}

/// Complete configuration file.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct QuoteCardConfig {
    /// Renderer settings.
    pub render: RenderConfig,
    /// Tag appended to generated affiliate links.
    pub affiliate_tag: String,
}

impl Default for QuoteCardConfig {
    fn default() -> Self {
        Self {
            render: RenderConfig::default(),
            affiliate_tag: DEFAULT_AFFILIATE_TAG.to_string(),
        }
    }
}

impl QuoteCardConfig {
    /// Parse and validate a JSON configuration file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> QuoteCardResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| QuoteCardError::serde(format!("parse config '{}': {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse and validate configuration from a JSON string.
    pub fn from_json_str(json: &str) -> QuoteCardResult<Self> {
        let cfg: Self =
            serde_json::from_str(json).map_err(|e| QuoteCardError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check invariants of every section.
    pub fn validate(&self) -> QuoteCardResult<()> {
        self.render.validate()?;
        if self.affiliate_tag.trim().is_empty() {
            return Err(QuoteCardError::config("affiliate_tag must be non-empty"));
        }
        Ok(())
    }
}
