//! 8-bit RGB colors, HSL construction, and RGB interpolation.
//!
//! Palettes are built in HSL (hue in degrees, saturation and lightness in
//! percent) and stored as [`Rgb8`], whose canonical text form is a lowercase
//! `#rrggbb` string.

use crate::error::GenError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// sRGB color with 8-bit channels.
///
/// Serializes as a hex string `"#rrggbb"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    /// Creates a color from its three channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a hex color string like "#ff00aa" or "ff00aa" (case insensitive).
    ///
    /// Returns `GenError::InvalidColor` if the input is not a valid 6-digit hex color.
    pub fn from_hex(hex: &str) -> Result<Rgb8, GenError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(GenError::InvalidColor(format!(
                "expected 6 hex digits, got {hex:?}"
            )));
        }
        let channel = |range: std::ops::Range<usize>, name: &str| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|e| GenError::InvalidColor(format!("invalid {name} component: {e}")))
        };
        Ok(Rgb8 {
            r: channel(0..2, "red")?,
            g: channel(2..4, "green")?,
            b: channel(4..6, "blue")?,
        })
    }

    /// Converts the color to a lowercase hex string like `"#rrggbb"`.
    pub fn to_hex(self) -> String {
        self.to_string()
    }

    /// Builds a color from HSL using the chroma/hue-function formula.
    ///
    /// `h` is in degrees and wraps into [0, 360); `s` and `l` are percentages
    /// clamped to [0, 100]. Each channel is rounded to the nearest 8-bit value.
    pub fn from_hsl(h: f64, s: f64, l: f64) -> Rgb8 {
        let h = h.rem_euclid(360.0);
        let s = (s / 100.0).clamp(0.0, 1.0);
        let l = (l / 100.0).clamp(0.0, 1.0);
        let a = s * l.min(1.0 - l);
        let f = |n: f64| {
            let k = (n + h / 30.0) % 12.0;
            let c = l - a * (k - 3.0).min(9.0 - k).min(1.0).max(-1.0);
            to_channel(255.0 * c)
        };
        Rgb8 {
            r: f(0.0),
            g: f(8.0),
            b: f(4.0),
        }
    }

    /// Per-channel linear interpolation from `self` toward `other`.
    ///
    /// `t = 0` yields `self`, `t = 1` yields `other`. Values of `t` outside
    /// [0, 1] extrapolate; channels saturate at 0 and 255.
    pub fn lerp(self, other: Rgb8, t: f64) -> Rgb8 {
        let mix = |a: u8, b: u8| {
            let a = a as f64;
            let b = b as f64;
            to_channel(a + (b - a) * t)
        };
        Rgb8 {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }
}

/// Rounds half-up to the nearest integer and saturates into a channel.
fn to_channel(v: f64) -> u8 {
    (v + 0.5).floor().clamp(0.0, 255.0) as u8
}

/// Converts HSL (degrees, percent, percent) straight to a `#rrggbb` string.
pub fn hsl_to_hex(h: f64, s: f64, l: f64) -> String {
    Rgb8::from_hsl(h, s, l).to_hex()
}

/// Interpolates two hex colors per channel in 8-bit RGB space.
///
/// Returns `GenError::InvalidColor` if either input fails to parse.
pub fn lerp_color(hex1: &str, hex2: &str, t: f64) -> Result<String, GenError> {
    let a = Rgb8::from_hex(hex1)?;
    let b = Rgb8::from_hex(hex2)?;
    Ok(a.lerp(b, t).to_hex())
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb8 {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rgb8::from_hex(s)
    }
}

impl Serialize for Rgb8 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb8 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgb8::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
