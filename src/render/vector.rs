use crate::{
    config::RenderConfig,
    foundation::core::Canvas,
    layout::author_line,
    render::{ImageFormat, RenderRequest, RenderedImage},
};

const GRADIENT_TOP: &str = "#faf2ea";
const GRADIENT_BOTTOM: &str = "#e5d8c9";
const FG: &str = "#2e2a27";
const SUB: &str = "#4b463f";

/// Replace `&`, `<` and `>` with their entities and drop characters XML 1.0 forbids.
pub fn escape_markup(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\t' | '\n' | '\r' => out.push(c),
            '\u{0}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}' => {}
            _ => out.push(c),
        }
    }
    out
}

/// Render the quote card as a standalone SVG document.
///
/// Never fails: all user text is escaped and line breaking is left to the SVG viewer.
pub fn render_vector(
    request: &RenderRequest,
    canvas: Canvas,
    config: &RenderConfig,
) -> RenderedImage {
    let Canvas { width, height } = canvas;
    let text_width = width.saturating_sub(160);

    let author = match request.attribution() {
        Some(name) => format!(
            "<text x='50%' y='65%' fill='{SUB}' font-family='sans-serif' font-size='36' text-anchor='middle'>{}</text>",
            escape_markup(&author_line(name))
        ),
        None => String::new(),
    };
    let watermark = if request.watermark {
        format!(
            "<text x='{}' y='{}' fill='{SUB}' font-family='sans-serif' font-size='36' text-anchor='end'>{}</text>",
            width.saturating_sub(40),
            height.saturating_sub(40),
            escape_markup(&config.watermark_text)
        )
    } else {
        String::new()
    };

    let svg = format!(
        "<svg xmlns='http://www.w3.org/2000/svg' width='{width}' height='{height}' viewBox='0 0 {width} {height}'>
  <defs>
    <linearGradient id='g' x1='0' y1='0' x2='0' y2='1'>
      <stop offset='0%' stop-color='{GRADIENT_TOP}'/>
      <stop offset='100%' stop-color='{GRADIENT_BOTTOM}'/>
    </linearGradient>
  </defs>
  <rect width='100%' height='100%' fill='url(#g)'/>
  <foreignObject x='80' y='20%' width='{text_width}' height='50%'>
    <div xmlns='http://www.w3.org/1999/xhtml' style='font-family:sans-serif;color:{FG};font-size:64px;line-height:1.2;text-align:center;font-weight:800;'>
      {text}
    </div>
  </foreignObject>
  {author}
  {watermark}
</svg>",
        text = escape_markup(&request.text),
    );

    RenderedImage {
        bytes: svg.into_bytes(),
        format: ImageFormat::Svg,
        width,
        height,
    }
}
