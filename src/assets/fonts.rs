use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};

use crate::{
    config::FontConfig,
    foundation::{
        core::{FontRole, Rgb8},
        error::{RasterError, RasterResult},
    },
    layout::{TextExtent, TextMeasure},
};

/// RGBA8 brush color used by Parley text layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextBrushRgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl From<Rgb8> for TextBrushRgba8 {
    fn from(c: Rgb8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: 255,
        }
    }
}

/// A role's face, registered alone in its own font collection so that family lookups cannot
/// resolve to another role's face of the same family.
struct RegisteredFont {
    font_ctx: parley::FontContext,
    path: PathBuf,
    family_name: String,
    data: vello_cpu::peniko::FontData,
}

/// Parley layout engine holding the bold and light faces of one render.
///
/// Each render builds its own engine, so concurrent renders share nothing but the font files on
/// disk.
pub struct TextLayoutEngine {
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    bold: RegisteredFont,
    light: RegisteredFont,
}

impl TextLayoutEngine {
    /// Resolve and load both font roles from `fonts`.
    pub fn from_config(fonts: &FontConfig) -> RasterResult<Self> {
        let bold = load_role(fonts, FontRole::Bold)?;
        let light = load_role(fonts, FontRole::Light)?;
        Ok(Self {
            layout_ctx: parley::LayoutContext::new(),
            bold,
            light,
        })
    }

    fn font(&self, role: FontRole) -> &RegisteredFont {
        match role {
            FontRole::Bold => &self.bold,
            FontRole::Light => &self.light,
        }
    }

    /// Family name registered for `role`.
    pub fn family_name(&self, role: FontRole) -> &str {
        &self.font(role).family_name
    }

    /// File the `role` face was loaded from.
    pub fn font_path(&self, role: FontRole) -> &Path {
        &self.font(role).path
    }

    /// Contents of the `role` font file.
    pub fn font_data(&self, role: FontRole) -> &vello_cpu::peniko::FontData {
        &self.font(role).data
    }

    /// Shape a single unbroken line of text.
    pub fn layout_line(
        &mut self,
        role: FontRole,
        text: &str,
        size_px: u32,
        brush: TextBrushRgba8,
    ) -> RasterResult<parley::Layout<TextBrushRgba8>> {
        if size_px == 0 {
            return Err(RasterError::drawing("font size must be > 0"));
        }
        let font = match role {
            FontRole::Bold => &mut self.bold,
            FontRole::Light => &mut self.light,
        };
        let family_name = font.family_name.clone();

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut font.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px as f32));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

impl TextMeasure for TextLayoutEngine {
    fn measure(&mut self, role: FontRole, text: &str, size_px: u32) -> RasterResult<TextExtent> {
        let layout = self.layout_line(role, text, size_px, TextBrushRgba8::default())?;
        Ok(TextExtent {
            width: layout.width().max(0.0).ceil() as u32,
            height: layout.height().max(0.0).ceil() as u32,
        })
    }
}

fn load_role(fonts: &FontConfig, role: FontRole) -> RasterResult<RegisteredFont> {
    let path = fonts
        .resolve(role)
        .ok_or_else(|| RasterError::asset(role, PathBuf::new(), "no font candidates configured"))?
        .to_path_buf();
    let bytes = std::fs::read(&path).map_err(|e| RasterError::asset(role, &path, e))?;

    let mut font_ctx = parley::FontContext::default();
    let families = font_ctx
        .collection
        .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
    let family_id = families
        .first()
        .map(|(id, _)| *id)
        .ok_or_else(|| RasterError::asset(role, &path, "no font families in file"))?;
    let family_name = font_ctx
        .collection
        .family_name(family_id)
        .ok_or_else(|| RasterError::asset(role, &path, "registered font family has no name"))?
        .to_string();

    tracing::debug!(%role, path = %path.display(), family = %family_name, "font resolved");

    let data = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), 0);
    Ok(RegisteredFont {
        font_ctx,
        path,
        family_name,
        data,
    })
}
