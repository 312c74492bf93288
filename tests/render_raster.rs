#![cfg(feature = "raster")]

use quotecard::{
    Canvas, FontConfig, FontRole, ImageFormat, LayoutMetrics, Quality, QuoteRenderer,
    RenderConfig, RenderRequest, Rng64, TextLayoutEngine, TextMeasure, layout_quote,
};

/// Engine over the default DejaVu fonts, `None` when they are not installed.
fn system_engine() -> Option<TextLayoutEngine> {
    let fonts = FontConfig::default();
    if !fonts.bold.iter().any(|p| p.exists()) || !fonts.light.iter().any(|p| p.exists()) {
        return None;
    }
    TextLayoutEngine::from_config(&fonts).ok()
}

#[test]
fn png_scenario_with_system_fonts() {
    if system_engine().is_none() {
        return;
    }
    let renderer = QuoteRenderer::new(RenderConfig::default());
    let req = RenderRequest::new("Dream big. Own your story.").author("Anon");
    let report = renderer.render_report(&req, &mut Rng64::new(1));
    assert!(report.raster_error.is_none(), "{:?}", report.raster_error);
    assert_eq!(report.image.format, ImageFormat::Png);
    assert_eq!(report.image.mime(), "image/png");
    assert_eq!(&report.image.bytes[..8], b"\x89PNG\r\n\x1a\n");

    let decoded = image::load_from_memory(&report.image.bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (1200, 1500));
}

#[test]
fn same_seed_same_png() {
    if system_engine().is_none() {
        return;
    }
    let renderer = QuoteRenderer::default();
    let req = RenderRequest::new("Progress beats perfection.").watermark(false);
    let a = renderer.render(&req, &mut Rng64::new(99));
    let b = renderer.render(&req, &mut Rng64::new(99));
    assert_eq!(a.bytes, b.bytes);
}

#[test]
fn top_row_matches_chosen_gradient() {
    if system_engine().is_none() {
        return;
    }
    let req = RenderRequest::new("").watermark(false);
    let image = QuoteRenderer::default().render(&req, &mut Rng64::new(5));
    let rgb = image::load_from_memory(&image.bytes).unwrap().to_rgb8();

    let expected = *Rng64::new(5).choose(&quotecard::DEFAULT_PALETTE).unwrap();
    let px = rgb.get_pixel(600, 0);
    assert_eq!(px.0, [expected.top.r, expected.top.g, expected.top.b]);
}

#[test]
fn empty_text_renders_png() {
    if system_engine().is_none() {
        return;
    }
    let image = QuoteRenderer::default().render(
        &RenderRequest::new("").watermark(false),
        &mut Rng64::new(3),
    );
    assert_eq!(image.format, ImageFormat::Png);
}

#[test]
fn high_quality_png_is_larger() {
    if system_engine().is_none() {
        return;
    }
    let image = QuoteRenderer::default().render(
        &RenderRequest::new("Laugh often.").quality(Quality::High),
        &mut Rng64::new(3),
    );
    let decoded = image::load_from_memory(&image.bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (1800, 2250));
}

#[test]
fn wrapped_lines_respect_usable_width_with_real_metrics() {
    let Some(mut engine) = system_engine() else {
        return;
    };
    let metrics = LayoutMetrics::for_canvas(Canvas::STANDARD);
    let text = "Tiny steps compound into greatness. Your future self is watching. \
                Energy flows where focus goes. Pneumonoultramicroscopicsilicovolcanoconiosis!";
    let layout = layout_quote(&mut engine, metrics, text, Some("Anon"), Some("brand")).unwrap();

    assert!(layout.quote_size >= 18 && layout.quote_size <= 120);
    let rejoined: Vec<&str> = layout
        .lines
        .iter()
        .flat_map(|l| l.text.split(' '))
        .collect();
    assert_eq!(rejoined, text.split_whitespace().collect::<Vec<_>>());

    for line in &layout.lines {
        let w = engine
            .measure(FontRole::Bold, &line.text, layout.quote_size)
            .unwrap()
            .width;
        assert!(w <= metrics.max_text_width || !line.text.contains(' '));
    }
}
