//! Color-theory palette synthesis driven by a seeded PRNG.
//!
//! Every generator picks its random choices (base hue, per-color saturation
//! and lightness, jitter) from a caller-owned [`Mulberry32`] and advances it
//! by a fixed, documented number of draws. A sketch that mixes palette
//! generation with other random decisions on one engine therefore replays
//! exactly from its seed.
//!
//! Colors are built in HSL and returned as [`Rgb8`] inside a [`Palette`],
//! whose index order is meaningful (hue spread, lightness ramp).

use crate::color::Rgb8;
use crate::error::GenError;
use crate::params::{param_f64, param_range};
use crate::prng::Mulberry32;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An ordered, non-empty sequence of colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    colors: Vec<Rgb8>,
}

impl Palette {
    /// Creates a palette from a vector of colors.
    ///
    /// Requires at least one color.
    pub fn new(colors: Vec<Rgb8>) -> Result<Self, GenError> {
        if colors.is_empty() {
            return Err(GenError::InvalidCount(0));
        }
        Ok(Self { colors })
    }

    /// Creates a palette by parsing hex color strings.
    ///
    /// Each string can be "#rrggbb" or "rrggbb" (case insensitive).
    pub fn from_hex(hexes: &[&str]) -> Result<Self, GenError> {
        let colors: Result<Vec<Rgb8>, GenError> =
            hexes.iter().map(|h| Rgb8::from_hex(h)).collect();
        Self::new(colors?)
    }

    /// Returns the number of colors in this palette.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Returns true if this palette has no colors. (Always false for valid palettes.)
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The colors in order.
    pub fn colors(&self) -> &[Rgb8] {
        &self.colors
    }

    /// The colors as `#rrggbb` strings, in order.
    pub fn to_hex(&self) -> Vec<String> {
        self.colors.iter().map(|c| c.to_hex()).collect()
    }

    /// Samples the palette as a gradient at parameter `t` in [0, 1].
    ///
    /// Colors are evenly spaced along `t`; between stops the two neighbours
    /// are interpolated in RGB. `t` is clamped and NaN is treated as 0.
    pub fn sample(&self, t: f64) -> Rgb8 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let n = self.colors.len();
        if n == 1 {
            return self.colors[0];
        }

        let scaled = t * (n - 1) as f64;
        let idx = (scaled as usize).min(n - 2);
        let frac = scaled - idx as f64;
        self.colors[idx].lerp(self.colors[idx + 1], frac)
    }
}

/// A dark background with a set of bright accents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DarkAccentPalette {
    pub background: Rgb8,
    pub accents: Palette,
    /// The background followed by the accents.
    pub all: Palette,
}

/// Saturation, lightness, and hue-spread settings for [`harmonic_palette`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteOptions {
    /// Saturation range in percent, sampled per color.
    pub saturation: (f64, f64),
    /// Lightness range in percent, sampled per color.
    pub lightness: (f64, f64),
    /// Degrees of hue covered from the first color to the last.
    pub hue_spread: f64,
}

impl Default for PaletteOptions {
    fn default() -> Self {
        Self {
            saturation: (40.0, 80.0),
            lightness: (30.0, 70.0),
            hue_spread: 360.0,
        }
    }
}

impl PaletteOptions {
    /// Reads `saturation` and `lightness` (`[lo, hi]` arrays) and `hue_spread`
    /// from a JSON object, keeping defaults for anything missing.
    pub fn from_json(params: &Value) -> Self {
        let d = Self::default();
        Self {
            saturation: param_range(params, "saturation", d.saturation),
            lightness: param_range(params, "lightness", d.lightness),
            hue_spread: param_f64(params, "hue_spread", d.hue_spread),
        }
    }

    /// Default options with a different hue spread.
    pub fn with_spread(hue_spread: f64) -> Self {
        Self {
            hue_spread,
            ..Self::default()
        }
    }
}

fn check_count(count: usize) -> Result<(), GenError> {
    if count == 0 {
        return Err(GenError::InvalidCount(count));
    }
    Ok(())
}

/// Hue of color `i` of `count` spread linearly from `base`.
///
/// A single color sits at the midpoint of the spread.
fn spread_hue(base: f64, i: usize, count: usize, spread: f64) -> f64 {
    let t = if count == 1 {
        0.5
    } else {
        i as f64 / (count - 1) as f64
    };
    (base + t * spread).rem_euclid(360.0)
}

/// Generates `count` colors with a random base hue interpolated across
/// `options.hue_spread` degrees.
///
/// Draws: one for the base hue, then saturation and lightness per color
/// (`1 + 2 * count` in total).
pub fn harmonic_palette(
    rng: &mut Mulberry32,
    count: usize,
    options: &PaletteOptions,
) -> Result<Palette, GenError> {
    check_count(count)?;
    let base = rng.range(0.0, 360.0);
    tracing::debug!(count, base, spread = options.hue_spread, "harmonic palette");

    let (s0, s1) = options.saturation;
    let (l0, l1) = options.lightness;
    let colors = (0..count)
        .map(|i| {
            let hue = spread_hue(base, i, count, options.hue_spread);
            let sat = rng.range(s0, s1);
            let lit = rng.range(l0, l1);
            Rgb8::from_hsl(hue, sat, lit)
        })
        .collect();
    Palette::new(colors)
}

/// Colors close together on the wheel: harmonic with a 60 degree spread.
pub fn analogous_palette(rng: &mut Mulberry32, count: usize) -> Result<Palette, GenError> {
    harmonic_palette(rng, count, &PaletteOptions::with_spread(60.0))
}

/// Harmonic with a 240 degree spread.
pub fn triadic_palette(rng: &mut Mulberry32, count: usize) -> Result<Palette, GenError> {
    harmonic_palette(rng, count, &PaletteOptions::with_spread(240.0))
}

/// Alternates a random base hue and its opposite, each jittered by up to
/// 15 degrees.
///
/// Draws: one for the base hue, then jitter, saturation, and lightness per
/// color (`1 + 3 * count`).
pub fn complementary_palette(rng: &mut Mulberry32, count: usize) -> Result<Palette, GenError> {
    check_count(count)?;
    let base = rng.range(0.0, 360.0);
    tracing::debug!(count, base, "complementary palette");

    let colors = (0..count)
        .map(|i| {
            let opposite = if i % 2 == 0 { 0.0 } else { 180.0 };
            let hue = (base + opposite + rng.range(-15.0, 15.0)).rem_euclid(360.0);
            let sat = rng.range(40.0, 80.0);
            let lit = rng.range(30.0, 70.0);
            Rgb8::from_hsl(hue, sat, lit)
        })
        .collect();
    Palette::new(colors)
}

/// One random hue and saturation with lightness ramping from 20 to 80.
///
/// Draws exactly two values regardless of `count`.
pub fn mono_palette(rng: &mut Mulberry32, count: usize) -> Result<Palette, GenError> {
    check_count(count)?;
    let hue = rng.range(0.0, 360.0);
    let sat = rng.range(20.0, 60.0);
    tracing::debug!(count, hue, sat, "mono palette");

    let denom = count.saturating_sub(1).max(1) as f64;
    let colors = (0..count)
        .map(|i| Rgb8::from_hsl(hue, sat, 20.0 + 60.0 * i as f64 / denom))
        .collect();
    Palette::new(colors)
}

/// A dim, desaturated background plus `accent_count` saturated accents.
///
/// Draws: three for the background, one for the accent hue spread (60 to
/// 200 degrees), then the harmonic accents (`4 + 1 + 2 * accent_count`).
pub fn dark_accent_palette(
    rng: &mut Mulberry32,
    accent_count: usize,
) -> Result<DarkAccentPalette, GenError> {
    check_count(accent_count)?;
    let bg_hue = rng.range(0.0, 360.0);
    let bg_sat = rng.range(5.0, 15.0);
    let bg_lit = rng.range(5.0, 12.0);
    let background = Rgb8::from_hsl(bg_hue, bg_sat, bg_lit);

    let options = PaletteOptions {
        saturation: (60.0, 90.0),
        lightness: (50.0, 80.0),
        hue_spread: rng.range(60.0, 200.0),
    };
    let accents = harmonic_palette(rng, accent_count, &options)?;

    let mut all = Vec::with_capacity(accents.len() + 1);
    all.push(background);
    all.extend_from_slice(accents.colors());
    Ok(DarkAccentPalette {
        background,
        accents,
        all: Palette::new(all)?,
    })
}

/// The palette generators, selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteKind {
    Harmonic,
    Analogous,
    Complementary,
    Triadic,
    Mono,
    DarkAccent,
}

impl PaletteKind {
    const ALL: [PaletteKind; 6] = [
        PaletteKind::Harmonic,
        PaletteKind::Analogous,
        PaletteKind::Complementary,
        PaletteKind::Triadic,
        PaletteKind::Mono,
        PaletteKind::DarkAccent,
    ];

    /// Looks up a generator by its kebab-case name.
    pub fn from_name(name: &str) -> Result<Self, GenError> {
        Self::ALL
            .into_iter()
            .find(|k| k.name() == name)
            .ok_or_else(|| GenError::UnknownPalette(name.to_string()))
    }

    /// All generator names, in declaration order.
    pub fn list_names() -> Vec<&'static str> {
        Self::ALL.iter().map(|k| k.name()).collect()
    }

    /// Canonical lowercase name, as accepted by [`PaletteKind::from_name`].
    pub fn name(self) -> &'static str {
        match self {
            PaletteKind::Harmonic => "harmonic",
            PaletteKind::Analogous => "analogous",
            PaletteKind::Complementary => "complementary",
            PaletteKind::Triadic => "triadic",
            PaletteKind::Mono => "mono",
            PaletteKind::DarkAccent => "dark-accent",
        }
    }

    /// Conventional color count for this generator (accent count for
    /// dark-accent).
    pub fn default_count(self) -> usize {
        match self {
            PaletteKind::Harmonic | PaletteKind::Analogous | PaletteKind::Mono => 5,
            PaletteKind::Complementary => 4,
            PaletteKind::Triadic => 6,
            PaletteKind::DarkAccent => 3,
        }
    }

    /// Runs the generator. `options` only applies to [`PaletteKind::Harmonic`];
    /// dark-accent returns the combined background-plus-accents palette.
    pub fn generate(
        self,
        rng: &mut Mulberry32,
        count: usize,
        options: &PaletteOptions,
    ) -> Result<Palette, GenError> {
        match self {
            PaletteKind::Harmonic => harmonic_palette(rng, count, options),
            PaletteKind::Analogous => analogous_palette(rng, count),
            PaletteKind::Complementary => complementary_palette(rng, count),
            PaletteKind::Triadic => triadic_palette(rng, count),
            PaletteKind::Mono => mono_palette(rng, count),
            PaletteKind::DarkAccent => dark_accent_palette(rng, count).map(|p| p.all),
        }
    }
}
