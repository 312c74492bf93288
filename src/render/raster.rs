use crate::{
    config::RenderConfig,
    foundation::{
        core::{Canvas, Rgb8},
        error::RasterResult,
        rng::Rng64,
    },
    render::{RenderRequest, RenderedImage},
};

#[cfg(feature = "raster")]
use crate::{
    assets::fonts::{TextBrushRgba8, TextLayoutEngine},
    config::Gradient,
    foundation::error::RasterError,
    layout::{LayoutMetrics, PlacedText, layout_quote},
    render::ImageFormat,
};

#[cfg(feature = "raster")]
const QUOTE_COLOR: Rgb8 = Rgb8::new(30, 30, 30);
#[cfg(feature = "raster")]
const AUTHOR_COLOR: Rgb8 = Rgb8::new(60, 60, 60);
#[cfg(feature = "raster")]
const WATERMARK_COLOR: Rgb8 = Rgb8::new(80, 80, 80);

/// Render the quote card as a PNG.
///
/// Draws the background gradient, the fitted and wrapped quote, the author line and the
/// watermark, then encodes with maximum compression. Any failure is reported as a
/// [`RasterError`](crate::RasterError) for the dispatcher to absorb.
#[cfg(feature = "raster")]
pub fn render_raster(
    request: &RenderRequest,
    canvas: Canvas,
    config: &RenderConfig,
    rng: &mut Rng64,
) -> RasterResult<RenderedImage> {
    let (w16, h16) = surface_size(canvas)?;
    let gradient = rng.choose(&config.palette).copied();

    let mut engine = TextLayoutEngine::from_config(&config.fonts)?;
    let metrics = LayoutMetrics::for_canvas(canvas);
    let watermark = request.watermark.then_some(config.watermark_text.as_str());
    let layout = layout_quote(
        &mut engine,
        metrics,
        &request.text,
        request.attribution(),
        watermark,
    )?;

    let mut ctx = vello_cpu::RenderContext::new(w16, h16);
    paint_background(&mut ctx, canvas, config.background, gradient);

    for line in &layout.lines {
        draw_text(&mut ctx, &mut engine, line, QUOTE_COLOR)?;
    }
    if let Some(author) = &layout.author {
        draw_text(&mut ctx, &mut engine, author, AUTHOR_COLOR)?;
    }
    if let Some(mark) = &layout.watermark {
        draw_text(&mut ctx, &mut engine, mark, WATERMARK_COLOR)?;
    }

    ctx.flush();
    let mut pixmap = vello_cpu::Pixmap::new(w16, h16);
    ctx.render_to_pixmap(&mut pixmap);

    let bytes = encode_png(pixmap.data_as_u8_slice(), canvas.width, canvas.height)?;
    Ok(RenderedImage {
        bytes,
        format: ImageFormat::Png,
        width: canvas.width,
        height: canvas.height,
    })
}

/// Stand-in used when the crate is built without the `raster` feature.
#[cfg(not(feature = "raster"))]
pub fn render_raster(
    _request: &RenderRequest,
    _canvas: Canvas,
    _config: &RenderConfig,
    _rng: &mut Rng64,
) -> RasterResult<RenderedImage> {
    Err(crate::foundation::error::RasterError::DependencyMissing)
}

#[cfg(feature = "raster")]
fn surface_size(canvas: Canvas) -> RasterResult<(u16, u16)> {
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| RasterError::drawing("canvas width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| RasterError::drawing("canvas height exceeds u16"))?;
    if w == 0 || h == 0 {
        return Err(RasterError::drawing("canvas must be non-empty"));
    }
    Ok((w, h))
}

/// Color of scanline `y` of a `height`-row gradient.
pub fn gradient_row(top: Rgb8, bottom: Rgb8, y: u32, height: u32) -> Rgb8 {
    let ratio = f64::from(y) / f64::from(height.max(1));
    top.lerp_trunc(bottom, ratio)
}

#[cfg(feature = "raster")]
fn paint_background(
    ctx: &mut vello_cpu::RenderContext,
    canvas: Canvas,
    background: Rgb8,
    gradient: Option<Gradient>,
) {
    let w = f64::from(canvas.width);
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(color(background));
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, f64::from(canvas.height)));

    let Some(Gradient { top, bottom }) = gradient else {
        return;
    };
    for y in 0..canvas.height {
        ctx.set_paint(color(gradient_row(top, bottom, y, canvas.height)));
        let y0 = f64::from(y);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, y0, w, y0 + 1.0));
    }
}

#[cfg(feature = "raster")]
fn draw_text(
    ctx: &mut vello_cpu::RenderContext,
    engine: &mut TextLayoutEngine,
    placed: &PlacedText,
    fill: Rgb8,
) -> RasterResult<()> {
    if placed.text.is_empty() {
        return Ok(());
    }
    let layout = engine.layout_line(
        placed.role,
        &placed.text,
        placed.size_px,
        TextBrushRgba8::from(fill),
    )?;

    ctx.set_transform(vello_cpu::kurbo::Affine::translate((
        f64::from(placed.x),
        f64::from(placed.y),
    )));
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let brush = run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                brush.r, brush.g, brush.b, brush.a,
            ));
            let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(run.run().font())
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    Ok(())
}

#[cfg(feature = "raster")]
fn color(c: Rgb8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, 255)
}

/// Encode an opaque RGBA8 buffer as RGB PNG with best compression and adaptive filtering.
#[cfg(feature = "raster")]
fn encode_png(rgba: &[u8], width: u32, height: u32) -> RasterResult<Vec<u8>> {
    use image::ImageEncoder as _;
    use image::codecs::png::{CompressionType, FilterType, PngEncoder};

    let rgb: Vec<u8> = rgba
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();

    let mut out = Vec::new();
    PngEncoder::new_with_quality(&mut out, CompressionType::Best, FilterType::Adaptive)
        .write_image(&rgb, width, height, image::ExtendedColorType::Rgb8)
        .map_err(|e| RasterError::drawing(format!("encode png: {e}")))?;
    Ok(out)
}
