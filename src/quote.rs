//! Quote composition and the stored quote record.

use std::fmt;

use crate::{
    foundation::{core::Quality, rng::Rng64},
    render::RenderRequest,
};

const STARTS: [&str; 6] = [
    "Dream big.",
    "Progress beats perfection.",
    "Stay consistent.",
    "Love loudly.",
    "Hustle quietly.",
    "Laugh often.",
];

const MIDDLES: [&str; 6] = [
    "Every day is a fresh page.",
    "Tiny steps compound into greatness.",
    "Your future self is watching.",
    "Energy flows where focus goes.",
    "Discipline is a form of self-love.",
    "Make it fun and it lasts.",
];

const ENDS: [&str; 6] = [
    "Start now.",
    "Own your story.",
    "You are the advantage.",
    "Design your day.",
    "Share the joy.",
    "Let momentum carry you.",
];

const AFFILIATE_BASE: &str = "https://www.amazon.com/s?k=";
const AFFILIATE_KEYWORDS: [&str; 3] = ["motivational+books", "journals", "poster+frame"];

/// Quote category.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// General motivation; also the fallback for unknown names.
    #[default]
    Motivational,
    /// Relationships.
    Love,
    /// Work and entrepreneurship.
    Business,
    /// Training and health.
    Fitness,
    /// Light-hearted.
    Funny,
}

impl Category {
    /// Every category, in canonical order.
    pub const ALL: [Category; 5] = [
        Category::Motivational,
        Category::Love,
        Category::Business,
        Category::Fitness,
        Category::Funny,
    ];

    /// Lowercase identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Motivational => "motivational",
            Self::Love => "love",
            Self::Business => "business",
            Self::Fitness => "fitness",
            Self::Funny => "funny",
        }
    }

    /// Parse a category name; anything unknown maps to [`Category::Motivational`].
    pub fn parse_or_default(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == name)
            .unwrap_or_default()
    }

    /// Capitalized label used in SEO titles.
    pub fn title(self) -> &'static str {
        match self {
            Self::Motivational => "Motivational",
            Self::Love => "Love",
            Self::Business => "Business",
            Self::Fitness => "Fitness",
            Self::Funny => "Funny",
        }
    }

    fn suffix(self) -> Option<&'static str> {
        match self {
            Self::Motivational => None,
            Self::Business => Some("Build value, not vanity."),
            Self::Fitness => Some("Sweat is an investment."),
            Self::Love => Some("Choose each other daily."),
            Self::Funny => Some("Coffee first, ambition second."),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compose an original quote from one start, middle and end phrase plus the category suffix.
pub fn generate_original_quote(category: Category, rng: &mut Rng64) -> String {
    let parts = [
        STARTS[rng.index(STARTS.len())],
        MIDDLES[rng.index(MIDDLES.len())],
        ENDS[rng.index(ENDS.len())],
    ];
    let mut text = parts.join(" ");
    if let Some(suffix) = category.suffix() {
        text.push(' ');
        text.push_str(suffix);
    }
    text
}

/// Affiliate search links attached to every quote.
pub fn build_affiliate_links(tag: &str) -> Vec<String> {
    AFFILIATE_KEYWORDS
        .iter()
        .map(|k| format!("{AFFILIATE_BASE}{k}&tag={tag}"))
        .collect()
}

/// `"<first 60 chars> | <Category> Quote"`.
pub fn seo_title(text: &str, category: Category) -> String {
    let head: String = text.chars().take(60).collect();
    format!("{head} | {} Quote", category.title())
}

/// Inputs of a quote generation request.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GenerateRequest {
    /// Use this text instead of composing one.
    #[serde(default)]
    pub text: Option<String>,
    /// Category name; unknown or missing means motivational.
    #[serde(default)]
    pub category: Option<String>,
    /// Attribution.
    #[serde(default)]
    pub author: Option<String>,
    /// Premium requests get no watermark and high quality.
    #[serde(default)]
    pub premium: bool,
}

/// A quote with its engagement and publishing metadata.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct QuoteRecord {
    /// Quote body.
    pub text: String,
    /// Category.
    pub category: Category,
    /// Attribution.
    pub author: Option<String>,
    /// Whether images carry the watermark.
    pub watermark: bool,
    /// Rendering tier.
    pub quality: Quality,
    /// Affiliate links.
    pub affiliate_links: Vec<String>,
    /// Like counter.
    pub likes: u64,
    /// View counter.
    pub views: u64,
    /// Whether the quote was posted to social platforms.
    pub posted: bool,
    /// Platforms it was posted to.
    pub platforms: Vec<String>,
    /// Page title.
    pub seo_title: String,
    /// Page description.
    pub seo_description: String,
}

impl QuoteRecord {
    /// Fresh record with zeroed counters.
    pub fn new(
        text: String,
        category: Category,
        author: Option<String>,
        premium: bool,
        affiliate_tag: &str,
    ) -> Self {
        Self {
            seo_title: seo_title(&text, category),
            seo_description: text.clone(),
            affiliate_links: build_affiliate_links(affiliate_tag),
            text,
            category,
            author,
            watermark: !premium,
            quality: Quality::for_premium(premium),
            likes: 0,
            views: 0,
            posted: false,
            platforms: Vec::new(),
        }
    }

    /// Build the record for a generate request.
    ///
    /// Supplied text is trimmed; without text (or with blank text) an original quote is composed
    /// for the category.
    pub fn from_request(req: &GenerateRequest, affiliate_tag: &str, rng: &mut Rng64) -> Self {
        let category = req
            .category
            .as_deref()
            .map(Category::parse_or_default)
            .unwrap_or_default();
        let text = match req.text.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => generate_original_quote(category, rng),
        };
        Self::new(text, category, req.author.clone(), req.premium, affiliate_tag)
    }

    /// Rendering inputs of this record.
    pub fn render_request(&self) -> RenderRequest {
        RenderRequest {
            text: self.text.clone(),
            author: self.author.clone(),
            watermark: self.watermark,
            quality: self.quality,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_quote_has_three_phrases_and_suffix() {
        let mut rng = Rng64::new(9);
        let text = generate_original_quote(Category::Fitness, &mut rng);
        assert!(STARTS.iter().any(|s| text.starts_with(s)));
        assert!(MIDDLES.iter().any(|m| text.contains(m)));
        assert!(text.ends_with("Sweat is an investment."));

        let plain = generate_original_quote(Category::Motivational, &mut rng);
        assert!(ENDS.iter().any(|e| plain.ends_with(e)));
    }

    #[test]
    fn generation_is_seed_deterministic() {
        let a = generate_original_quote(Category::Love, &mut Rng64::new(5));
        let b = generate_original_quote(Category::Love, &mut Rng64::new(5));
        assert_eq!(a, b);
    }

    #[test]
    fn unknown_category_is_motivational() {
        assert_eq!(Category::parse_or_default("funny"), Category::Funny);
        assert_eq!(Category::parse_or_default("gardening"), Category::Motivational);
        assert_eq!(Category::parse_or_default("Funny"), Category::Motivational);
    }

    #[test]
    fn affiliate_links_carry_tag() {
        let links = build_affiliate_links("me-21");
        assert_eq!(links.len(), 3);
        assert_eq!(links[0], "https://www.amazon.com/s?k=motivational+books&tag=me-21");
        assert!(links.iter().all(|l| l.ends_with("&tag=me-21")));
    }

    #[test]
    fn seo_title_truncates_by_chars() {
        let text = "é".repeat(80);
        let title = seo_title(&text, Category::Love);
        assert_eq!(title, format!("{} | Love Quote", "é".repeat(60)));
    }

    #[test]
    fn premium_request_drops_watermark() {
        let req = GenerateRequest {
            text: Some("  Be kind.  ".to_string()),
            category: Some("business".to_string()),
            author: Some("Ada".to_string()),
            premium: true,
        };
        let rec = QuoteRecord::from_request(&req, "t-20", &mut Rng64::new(1));
        assert_eq!(rec.text, "Be kind.");
        assert_eq!(rec.category, Category::Business);
        assert!(!rec.watermark);
        assert_eq!(rec.quality, Quality::High);
        assert_eq!(rec.seo_description, "Be kind.");

        let render = rec.render_request();
        assert_eq!(render.author.as_deref(), Some("Ada"));
        assert!(!render.watermark);
    }

    #[test]
    fn empty_request_composes_text() {
        let rec = QuoteRecord::from_request(&GenerateRequest::default(), "t-20", &mut Rng64::new(2));
        assert_eq!(rec.category, Category::Motivational);
        assert!(!rec.text.is_empty());
        assert!(rec.watermark);
        assert_eq!(rec.quality, Quality::Standard);
        assert_eq!(rec.likes, 0);
    }

    #[test]
    fn record_json_uses_lowercase_enums() {
        let rec = QuoteRecord::new("x".into(), Category::Funny, None, false, "t");
        let v = serde_json::to_value(&rec).unwrap();
        assert_eq!(v["category"], "funny");
        assert_eq!(v["quality"], "standard");
    }
}
