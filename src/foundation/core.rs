use std::fmt;

/// Opaque 8-bit RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Construct from channel values.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear interpolation between `self` and `other`, truncating each channel.
    pub fn lerp_trunc(self, other: Self, ratio: f64) -> Self {
        let mix = |a: u8, b: u8| (f64::from(a) * (1.0 - ratio) + f64::from(b) * ratio) as u8;
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }

    /// `#rrggbb` hex form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Output canvas size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Default portrait canvas used by the standard quality tier.
    pub const STANDARD: Self = Self {
        width: 1200,
        height: 1500,
    };

    /// Canvas used by the high quality tier (1.5x standard, same 4:5 aspect).
    pub const HIGH: Self = Self {
        width: 1800,
        height: 2250,
    };

    /// Canvas dimensions for a quality tier.
    pub fn for_quality(quality: Quality) -> Self {
        match quality {
            Quality::Standard => Self::STANDARD,
            Quality::High => Self::HIGH,
        }
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Rendering quality tier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    /// Free tier, 1200x1500.
    #[default]
    Standard,
    /// Premium tier, rendered on a larger canvas.
    High,
}

impl Quality {
    /// Tier granted to a request: premium requests render in high quality.
    pub fn for_premium(premium: bool) -> Self {
        if premium { Self::High } else { Self::Standard }
    }
}

/// Typographic role a font is resolved for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontRole {
    /// Bold display face used for the quote body.
    Bold,
    /// Light face used for the author line and the watermark.
    Light,
}

impl fmt::Display for FontRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bold => f.write_str("bold"),
            Self::Light => f.write_str("light"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_trunc_endpoints_and_truncation() {
        let top = Rgb8::new(245, 240, 232);
        let bottom = Rgb8::new(222, 203, 182);
        assert_eq!(top.lerp_trunc(bottom, 0.0), top);
        // 245*0.5 + 222*0.5 = 233.5 -> 233
        assert_eq!(top.lerp_trunc(bottom, 0.5).r, 233);
    }

    #[test]
    fn hex_is_lowercase_and_padded() {
        assert_eq!(Rgb8::new(250, 2, 234).to_hex(), "#fa02ea");
    }

    #[test]
    fn quality_selects_canvas() {
        assert_eq!(Canvas::for_quality(Quality::Standard), Canvas::STANDARD);
        assert_eq!(Canvas::for_quality(Quality::High).width, 1800);
        assert_eq!(Quality::for_premium(true), Quality::High);
        assert_eq!(Quality::default(), Quality::Standard);
    }
}
