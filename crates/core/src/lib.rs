#![deny(unsafe_code)]
//! Deterministic procedural primitives for generative art.
//!
//! Provides the `Mulberry32` seeded PRNG and its samplers, derived noise
//! fields (fBM, domain warping, curl, ridged) over an injected `BaseNoise`,
//! `Rgb8` colors with HSL construction and interpolation, seeded palette
//! generators, and JSON parameter helpers.

pub mod color;
pub mod error;
pub mod noise;
pub mod palette;
pub mod params;
pub mod prng;

pub use color::{hsl_to_hex, lerp_color, Rgb8};
pub use error::GenError;
pub use crate::noise::{
    curl_noise, fbm, ridge_noise, warped_noise, BaseNoise, CurlField, FbmField, FbmParams,
    NoiseFnAdapter, PerlinNoise, RidgeParams, RidgedField, ScalarField, VectorField, WarpParams,
    WarpedField,
};
pub use palette::{
    analogous_palette, complementary_palette, dark_accent_palette, harmonic_palette,
    mono_palette, triadic_palette, DarkAccentPalette, Palette, PaletteKind, PaletteOptions,
};
pub use prng::Mulberry32;
