//! Text fitting, word wrapping and block placement for the raster renderer.
//!
//! Everything here is pure integer layout driven by a [`TextMeasure`] implementation, so the same
//! code runs against real font metrics in production and a synthetic measurer in tests.

use crate::foundation::{
    core::{Canvas, FontRole},
    error::RasterResult,
};

/// Smallest quote font size tried by [`fit_font_size`].
pub const MIN_FONT_SIZE: u32 = 18;
/// Decrement between candidate font sizes.
pub const FONT_SIZE_STEP: u32 = 2;
/// Vertical gap between wrapped quote lines.
pub const LINE_SPACING: i32 = 10;

/// Rendered extent of a single line of text, in whole pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextExtent {
    /// Advance width.
    pub width: u32,
    /// Line height.
    pub height: u32,
}

/// Measures single-line text set in one of the two font roles.
pub trait TextMeasure {
    /// Extent of `text` (no line breaks) at `size_px`.
    fn measure(&mut self, role: FontRole, text: &str, size_px: u32) -> RasterResult<TextExtent>;
}

/// Canvas-relative layout constants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutMetrics {
    /// Canvas width.
    pub width: u32,
    /// Canvas height.
    pub height: u32,
    /// Side margin, 8% of width.
    pub margin: u32,
    /// Width available to quote lines.
    pub max_text_width: u32,
    /// First size tried when fitting, 10% of width.
    pub start_font_size: u32,
    /// Size of the author line and watermark, 3.5% of width.
    pub secondary_font_size: u32,
    /// Gap between the quote block and the author line, 2% of height.
    pub author_offset: u32,
}

impl LayoutMetrics {
    /// Derive layout constants for `canvas`.
    pub fn for_canvas(canvas: Canvas) -> Self {
        let width = canvas.width;
        let height = canvas.height;
        let frac = |v: u32, f: f64| (f64::from(v) * f) as u32;
        let margin = frac(width, 0.08);
        Self {
            width,
            height,
            margin,
            max_text_width: width.saturating_sub(margin * 2),
            start_font_size: frac(width, 0.10),
            secondary_font_size: frac(width, 0.035).max(1),
            author_offset: frac(height, 0.02),
        }
    }
}

/// A run of text with its top-left position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacedText {
    /// Text to draw.
    pub text: String,
    /// Font role to draw it with.
    pub role: FontRole,
    /// Font size in pixels.
    pub size_px: u32,
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Measured extent.
    pub extent: TextExtent,
}

/// Fully placed quote card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuoteLayout {
    /// Metrics the layout was computed with.
    pub metrics: LayoutMetrics,
    /// Chosen quote font size.
    pub quote_size: u32,
    /// Wrapped quote lines, top to bottom.
    pub lines: Vec<PlacedText>,
    /// Height of the quote block including inter-line spacing.
    pub block_height: i32,
    /// Author attribution, when an author was given.
    pub author: Option<PlacedText>,
    /// Watermark, when enabled.
    pub watermark: Option<PlacedText>,
}

/// Largest candidate size at which every hard line of `text` fits within `max_width`.
///
/// Candidates run from `start_size` downwards in steps of [`FONT_SIZE_STEP`] while above
/// [`MIN_FONT_SIZE`]; when none fits the floor size is returned regardless of overflow.
pub fn fit_font_size<M: TextMeasure + ?Sized>(
    measure: &mut M,
    text: &str,
    max_width: u32,
    start_size: u32,
) -> RasterResult<u32> {
    let mut size = start_size;
    while size > MIN_FONT_SIZE {
        if multiline_width(measure, text, size)? <= max_width {
            return Ok(size);
        }
        size -= FONT_SIZE_STEP;
    }
    Ok(MIN_FONT_SIZE)
}

fn multiline_width<M: TextMeasure + ?Sized>(
    measure: &mut M,
    text: &str,
    size_px: u32,
) -> RasterResult<u32> {
    let mut widest = 0;
    for line in text.split('\n') {
        widest = widest.max(measure.measure(FontRole::Bold, line, size_px)?.width);
    }
    Ok(widest)
}

/// Greedy word wrap.
///
/// Words are appended to the current line while the joined candidate still fits `max_width`; a
/// word that does not fit starts a new line. Words are never split, so a single word wider than
/// `max_width` occupies its own overflowing line. Empty or all-whitespace text yields no lines.
pub fn wrap_words<M: TextMeasure + ?Sized>(
    measure: &mut M,
    text: &str,
    size_px: u32,
    max_width: u32,
) -> RasterResult<Vec<String>> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if measure.measure(FontRole::Bold, &candidate, size_px)?.width <= max_width {
            current = candidate;
        } else {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    Ok(lines)
}

/// Total height of a block of lines separated by [`LINE_SPACING`]; zero for no lines.
pub fn block_height(heights: &[u32]) -> i32 {
    let sum: i64 = heights.iter().map(|&h| i64::from(h)).sum();
    let gaps = i64::from(LINE_SPACING) * heights.len().saturating_sub(1) as i64;
    (sum + gaps) as i32
}

/// Top of a block of `block_height` centered on a canvas of `height` (floor division).
pub fn centered_top(height: u32, block_height: i32) -> i32 {
    (height as i32 - block_height).div_euclid(2)
}

fn centered_left(width: u32, line_width: u32) -> i32 {
    (width as i32 - line_width as i32).div_euclid(2)
}

/// Text of the author line.
pub fn author_line(author: &str) -> String {
    format!("— {author}")
}

/// Place the quote, author line and watermark on the canvas described by `metrics`.
pub fn layout_quote<M: TextMeasure + ?Sized>(
    measure: &mut M,
    metrics: LayoutMetrics,
    text: &str,
    author: Option<&str>,
    watermark: Option<&str>,
) -> RasterResult<QuoteLayout> {
    let quote_size = fit_font_size(
        measure,
        text,
        metrics.max_text_width,
        metrics.start_font_size,
    )?;
    let wrapped = wrap_words(measure, text, quote_size, metrics.max_text_width)?;

    let mut extents = Vec::with_capacity(wrapped.len());
    for line in &wrapped {
        extents.push(measure.measure(FontRole::Bold, line, quote_size)?);
    }
    let heights: Vec<u32> = extents.iter().map(|e| e.height).collect();
    let block_height = block_height(&heights);

    let mut y = centered_top(metrics.height, block_height);
    let mut lines = Vec::with_capacity(wrapped.len());
    for (line, extent) in wrapped.into_iter().zip(extents) {
        lines.push(PlacedText {
            x: centered_left(metrics.width, extent.width),
            y,
            text: line,
            role: FontRole::Bold,
            size_px: quote_size,
            extent,
        });
        y += extent.height as i32 + LINE_SPACING;
    }

    let secondary = metrics.secondary_font_size;
    let author = match author.filter(|a| !a.is_empty()) {
        Some(name) => {
            let text = author_line(name);
            let extent = measure.measure(FontRole::Light, &text, secondary)?;
            Some(PlacedText {
                x: centered_left(metrics.width, extent.width),
                y: y + metrics.author_offset as i32,
                text,
                role: FontRole::Light,
                size_px: secondary,
                extent,
            })
        }
        None => None,
    };

    let watermark = match watermark {
        Some(brand) => {
            let extent = measure.measure(FontRole::Light, brand, secondary)?;
            Some(PlacedText {
                x: metrics.width as i32 - extent.width as i32 - metrics.margin as i32,
                y: metrics.height as i32 - extent.height as i32 - metrics.margin as i32,
                text: brand.to_string(),
                role: FontRole::Light,
                size_px: secondary,
                extent,
            })
        }
        None => None,
    };

    tracing::debug!(quote_size, lines = lines.len(), block_height, "quote layout");

    Ok(QuoteLayout {
        metrics,
        quote_size,
        lines,
        block_height,
        author,
        watermark,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every char advances `size/2`, lines are `size` tall.
    struct HalfEm;

    impl TextMeasure for HalfEm {
        fn measure(&mut self, _role: FontRole, text: &str, size_px: u32) -> RasterResult<TextExtent> {
            Ok(TextExtent {
                width: text.chars().count() as u32 * size_px / 2,
                height: size_px,
            })
        }
    }

    #[test]
    fn metrics_follow_canvas_ratios() {
        let m = LayoutMetrics::for_canvas(Canvas::STANDARD);
        assert_eq!(m.margin, 96);
        assert_eq!(m.max_text_width, 1008);
        assert_eq!(m.start_font_size, 120);
        assert_eq!(m.secondary_font_size, 42);
        assert_eq!(m.author_offset, 30);
    }

    #[test]
    fn short_text_keeps_start_size() {
        assert_eq!(fit_font_size(&mut HalfEm, "Hi", 1008, 120).unwrap(), 120);
    }

    #[test]
    fn fit_picks_largest_fitting_step() {
        // 20 chars * size/2 <= 1008  =>  size <= 100.8; steps are 120, 118, ..., 100.
        let text = "abcdefghijklmnopqrst";
        assert_eq!(fit_font_size(&mut HalfEm, text, 1008, 120).unwrap(), 100);
    }

    #[test]
    fn fit_uses_widest_hard_line() {
        let text = "ab\nabcdefghijklmnopqrst";
        assert_eq!(fit_font_size(&mut HalfEm, text, 1008, 120).unwrap(), 100);
    }

    #[test]
    fn fit_clamps_to_floor() {
        let text = "x".repeat(500);
        assert_eq!(fit_font_size(&mut HalfEm, &text, 1008, 120).unwrap(), MIN_FONT_SIZE);
    }

    #[test]
    fn wrap_is_greedy_and_keeps_words_whole() {
        // size 20 -> 10px per char, width 100 -> at most 10 chars per line
        let lines = wrap_words(&mut HalfEm, "aaa bbb ccc dddd e", 20, 100).unwrap();
        assert_eq!(lines, vec!["aaa bbb", "ccc dddd e"]);
        for line in &lines {
            assert!(line.chars().count() * 10 <= 100);
        }
    }

    #[test]
    fn wrap_puts_oversized_word_alone() {
        let lines = wrap_words(&mut HalfEm, "hi supercalifragilistic yo", 20, 100).unwrap();
        assert_eq!(lines, vec!["hi", "supercalifragilistic", "yo"]);
    }

    #[test]
    fn wrap_of_blank_text_is_empty() {
        assert!(wrap_words(&mut HalfEm, "", 20, 100).unwrap().is_empty());
        assert!(wrap_words(&mut HalfEm, "  \n\t ", 20, 100).unwrap().is_empty());
    }

    #[test]
    fn block_height_adds_spacing_between_lines_only() {
        assert_eq!(block_height(&[]), 0);
        assert_eq!(block_height(&[40]), 40);
        assert_eq!(block_height(&[40, 40, 30]), 130);
    }

    #[test]
    fn centered_top_floors() {
        assert_eq!(centered_top(1500, 131), 684);
        assert_eq!(centered_top(10, 15), -3);
    }

    #[test]
    fn layout_centers_block_and_places_extras() {
        let metrics = LayoutMetrics::for_canvas(Canvas::STANDARD);
        let layout = layout_quote(
            &mut HalfEm,
            metrics,
            "Dream big. Own your story.",
            Some("Anon"),
            Some("ViralQuoteMachine.com"),
        )
        .unwrap();

        let n = layout.lines.len() as i32;
        let sum: i32 = layout.lines.iter().map(|l| l.extent.height as i32).sum();
        assert_eq!(layout.block_height, sum + 10 * (n - 1));
        assert_eq!(layout.lines[0].y, (1500 - layout.block_height).div_euclid(2));
        for pair in layout.lines.windows(2) {
            assert_eq!(pair[1].y, pair[0].y + pair[0].extent.height as i32 + 10);
        }
        for line in &layout.lines {
            assert_eq!(line.x, (1200 - line.extent.width as i32).div_euclid(2));
        }

        let last = layout.lines.last().unwrap();
        let author = layout.author.as_ref().unwrap();
        assert_eq!(author.text, "— Anon");
        assert_eq!(author.size_px, 42);
        assert_eq!(author.y, last.y + last.extent.height as i32 + 10 + 30);

        let wm = layout.watermark.as_ref().unwrap();
        assert_eq!(wm.x + wm.extent.width as i32 + 96, 1200);
        assert_eq!(wm.y + wm.extent.height as i32 + 96, 1500);
    }

    #[test]
    fn empty_text_layout_has_no_lines() {
        let metrics = LayoutMetrics::for_canvas(Canvas::STANDARD);
        let layout = layout_quote(&mut HalfEm, metrics, "", None, None).unwrap();
        assert!(layout.lines.is_empty());
        assert_eq!(layout.block_height, 0);
        assert!(layout.author.is_none());
        assert!(layout.watermark.is_none());
    }

    #[test]
    fn watermark_position_ignores_quote_length() {
        let metrics = LayoutMetrics::for_canvas(Canvas::STANDARD);
        let a = layout_quote(&mut HalfEm, metrics, "short", None, Some("brand")).unwrap();
        let long = "word ".repeat(80);
        let b = layout_quote(&mut HalfEm, metrics, &long, None, Some("brand")).unwrap();
        assert_eq!(a.watermark, b.watermark);
    }

    #[test]
    fn empty_author_is_not_placed() {
        let m = LayoutMetrics::for_canvas(Canvas::STANDARD);
        let layout = layout_quote(&mut HalfEm, m, "Hello there", Some(""), None).unwrap();
        assert!(layout.author.is_none());
    }
}
