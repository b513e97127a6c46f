//! Derived noise fields built on an injected base coherent-noise function.
//!
//! Every function here takes the base noise explicitly as a [`BaseNoise`]
//! implementation; there is no ambient noise source. Base noise is expected
//! to return values in [0, 1] and to be deterministic for fixed inputs, which
//! makes every derived field pure: identical coordinates, parameters, and
//! base noise always give the identical sample.
//!
//! The free functions ([`fbm`], [`warped_noise`], [`curl_noise`],
//! [`ridge_noise`]) are the primitives. The field objects ([`FbmField`],
//! [`WarpedField`], [`RidgedField`], [`CurlField`]) bundle a base noise with
//! validated parameters so sampling cannot fail.

use crate::error::GenError;
use crate::params::{param_f64, param_u32};
use ::noise::{NoiseFn, Perlin};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A base 2D coherent-noise function with output in [0, 1].
pub trait BaseNoise {
    /// Samples the noise at (x, y).
    fn noise(&self, x: f64, y: f64) -> f64;
}

impl<F> BaseNoise for F
where
    F: Fn(f64, f64) -> f64,
{
    fn noise(&self, x: f64, y: f64) -> f64 {
        self(x, y)
    }
}

/// Adapts a `noise`-crate generator (output in [-1, 1]) to a [`BaseNoise`]
/// in [0, 1].
#[derive(Debug, Clone)]
pub struct NoiseFnAdapter<N> {
    inner: N,
}

impl<N> NoiseFnAdapter<N>
where
    N: NoiseFn<f64, 2>,
{
    /// Wraps a 2D `noise`-crate generator.
    pub fn new(inner: N) -> Self {
        Self { inner }
    }
}

impl<N> BaseNoise for NoiseFnAdapter<N>
where
    N: NoiseFn<f64, 2>,
{
    /// Coordinates are wrapped into `[0, LATTICE_PERIOD)` before sampling so
    /// the lattice index always fits in `isize`; non-finite coordinates
    /// sample the neutral 0.5.
    fn noise(&self, x: f64, y: f64) -> f64 {
        if !x.is_finite() || !y.is_finite() {
            return NEUTRAL;
        }
        let point = [
            x.rem_euclid(LATTICE_PERIOD),
            y.rem_euclid(LATTICE_PERIOD),
        ];
        ((self.inner.get(point) + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}

/// Wrap period for adapter coordinates. A multiple of the 256-entry
/// permutation table, so lattice generators repeat seamlessly across it.
const LATTICE_PERIOD: f64 = 16_777_216.0;

/// Mid-range value returned where no meaningful sample exists.
const NEUTRAL: f64 = 0.5;

/// Seeded Perlin noise remapped to [0, 1].
pub type PerlinNoise = NoiseFnAdapter<Perlin>;

impl PerlinNoise {
    /// Creates Perlin base noise with the given seed.
    pub fn perlin(seed: u32) -> Self {
        Self::new(Perlin::new(seed))
    }
}

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

/// Default scene-to-noise scale for warped and curl noise.
pub const DEFAULT_SCALE: f64 = 0.005;

/// Offset of the second warp field's sampling origin.
const WARP_OFFSET: (f64, f64) = (5.2, 1.3);

/// Finite-difference step for curl noise, in scene space.
const CURL_EPS: f64 = 1e-4;

/// Parameters for layered (fBM) noise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FbmParams {
    pub octaves: u32,
    pub lacunarity: f64,
    pub gain: f64,
}

impl Default for FbmParams {
    fn default() -> Self {
        Self {
            octaves: 4,
            lacunarity: 2.0,
            gain: 0.5,
        }
    }
}

impl FbmParams {
    /// Reads `octaves`, `lacunarity`, and `gain` from a JSON object, falling
    /// back to the defaults for missing or mistyped keys.
    pub fn from_json(params: &Value) -> Self {
        let d = Self::default();
        Self {
            octaves: param_u32(params, "octaves", d.octaves),
            lacunarity: param_f64(params, "lacunarity", d.lacunarity),
            gain: param_f64(params, "gain", d.gain),
        }
    }

    /// Returns `GenError::InvalidOctaves` if `octaves` is zero and
    /// `GenError::InvalidGain` if `gain` is negative or not finite.
    pub fn validate(&self) -> Result<(), GenError> {
        validate_layers(self.octaves, self.gain)
    }
}

/// Parameters for domain-warped noise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarpParams {
    /// Scene-to-noise scale applied to the input coordinates.
    pub scale: f64,
    /// Displacement applied by the two warp fields.
    pub warp_amount: f64,
    pub octaves: u32,
    pub lacunarity: f64,
    pub gain: f64,
}

impl Default for WarpParams {
    fn default() -> Self {
        let fbm = FbmParams::default();
        Self {
            scale: DEFAULT_SCALE,
            warp_amount: 4.0,
            octaves: fbm.octaves,
            lacunarity: fbm.lacunarity,
            gain: fbm.gain,
        }
    }
}

impl WarpParams {
    /// Reads warp parameters from a JSON object (`scale`, `warp_amount`,
    /// `octaves`, `lacunarity`, `gain`).
    pub fn from_json(params: &Value) -> Self {
        let d = Self::default();
        let fbm = FbmParams::from_json(params);
        Self {
            scale: param_f64(params, "scale", d.scale),
            warp_amount: param_f64(params, "warp_amount", d.warp_amount),
            octaves: fbm.octaves,
            lacunarity: fbm.lacunarity,
            gain: fbm.gain,
        }
    }

    /// The fBM parameters used for both the warp fields and the final sample.
    pub fn fbm(&self) -> FbmParams {
        FbmParams {
            octaves: self.octaves,
            lacunarity: self.lacunarity,
            gain: self.gain,
        }
    }

    /// Same checks as [`FbmParams::validate`].
    pub fn validate(&self) -> Result<(), GenError> {
        validate_layers(self.octaves, self.gain)
    }
}

/// Parameters for ridged noise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RidgeParams {
    /// Scene-to-noise scale. The default of 1.0 samples the coordinates as given.
    pub scale: f64,
    pub octaves: u32,
    pub lacunarity: f64,
    pub gain: f64,
}

impl Default for RidgeParams {
    fn default() -> Self {
        let fbm = FbmParams::default();
        Self {
            scale: 1.0,
            octaves: fbm.octaves,
            lacunarity: fbm.lacunarity,
            gain: fbm.gain,
        }
    }
}

impl RidgeParams {
    /// Reads ridge parameters from a JSON object (`scale`, `octaves`,
    /// `lacunarity`, `gain`).
    pub fn from_json(params: &Value) -> Self {
        let d = Self::default();
        let fbm = FbmParams::from_json(params);
        Self {
            scale: param_f64(params, "scale", d.scale),
            octaves: fbm.octaves,
            lacunarity: fbm.lacunarity,
            gain: fbm.gain,
        }
    }

    /// Same checks as [`FbmParams::validate`].
    pub fn validate(&self) -> Result<(), GenError> {
        validate_layers(self.octaves, self.gain)
    }
}

fn validate_layers(octaves: u32, gain: f64) -> Result<(), GenError> {
    if octaves == 0 {
        return Err(GenError::InvalidOctaves(octaves));
    }
    if !gain.is_finite() || gain < 0.0 {
        return Err(GenError::InvalidGain(gain));
    }
    Ok(())
}

/// Divides the octave sum by the summed amplitude.
///
/// Falls back to [`NEUTRAL`] when amplitudes overflow, so the result is
/// always finite.
fn normalize(value: f64, max: f64) -> f64 {
    let v = value / max;
    if v.is_finite() {
        v
    } else {
        NEUTRAL
    }
}

// ---------------------------------------------------------------------------
// Primitives
// ---------------------------------------------------------------------------

/// Fractal Brownian motion: `octaves` layers of base noise at frequencies
/// multiplied by `lacunarity` and amplitudes multiplied by `gain`, normalized
/// by the total amplitude so the result stays in about [0, 1].
///
/// Operates directly in the caller's coordinate space. With one octave the
/// result is exactly `noise(x, y)`.
pub fn fbm<N>(noise: &N, x: f64, y: f64, params: &FbmParams) -> Result<f64, GenError>
where
    N: BaseNoise + ?Sized,
{
    params.validate()?;
    Ok(fbm_unchecked(noise, x, y, params))
}

fn fbm_unchecked<N>(noise: &N, x: f64, y: f64, params: &FbmParams) -> f64
where
    N: BaseNoise + ?Sized,
{
    let (value, max, _, _) = (0..params.octaves).fold(
        (0.0, 0.0, 1.0, 1.0),
        |(value, max, amp, freq): (f64, f64, f64, f64), _| {
            (
                value + amp * noise.noise(x * freq, y * freq),
                max + amp,
                amp * params.gain,
                freq * params.lacunarity,
            )
        },
    );
    normalize(value, max)
}

/// Domain-warped noise: two fBM fields (the second sampled from a fixed
/// offset origin) displace the scaled coordinates by `warp_amount` before a
/// final fBM evaluation.
pub fn warped_noise<N>(noise: &N, x: f64, y: f64, params: &WarpParams) -> Result<f64, GenError>
where
    N: BaseNoise + ?Sized,
{
    params.validate()?;
    Ok(warped_unchecked(noise, x, y, params))
}

fn warped_unchecked<N>(noise: &N, x: f64, y: f64, params: &WarpParams) -> f64
where
    N: BaseNoise + ?Sized,
{
    let fbm = params.fbm();
    let sx = x * params.scale;
    let sy = y * params.scale;
    let qx = fbm_unchecked(noise, sx, sy, &fbm);
    let qy = fbm_unchecked(noise, sx + WARP_OFFSET.0, sy + WARP_OFFSET.1, &fbm);
    fbm_unchecked(
        noise,
        sx + params.warp_amount * qx,
        sy + params.warp_amount * qy,
        &fbm,
    )
}

/// Curl of the base noise: an approximately divergence-free vector field.
///
/// Central differences with a step of `1e-4` in scene space:
/// `dx = dN/dy`, `dy = -dN/dx`. The vector is not normalized; its magnitude
/// follows the local slope of the noise.
pub fn curl_noise<N>(noise: &N, x: f64, y: f64, scale: f64) -> (f64, f64)
where
    N: BaseNoise + ?Sized,
{
    let n_up = noise.noise(x * scale, (y + CURL_EPS) * scale);
    let n_down = noise.noise(x * scale, (y - CURL_EPS) * scale);
    let n_right = noise.noise((x + CURL_EPS) * scale, y * scale);
    let n_left = noise.noise((x - CURL_EPS) * scale, y * scale);

    let dx = (n_up - n_down) / (2.0 * CURL_EPS);
    let dy = -(n_right - n_left) / (2.0 * CURL_EPS);
    (dx, dy)
}

/// Ridged multifractal noise.
///
/// Each octave folds its sample into a ridge (`1 - |2n - 1|`), squares it,
/// and multiplies it by the previous octave's folded output, so ridges in
/// finer octaves only appear where coarser octaves already ridge. The sum is
/// normalized by the total amplitude. Output is in [0, 1] for base noise in
/// [0, 1].
pub fn ridge_noise<N>(noise: &N, x: f64, y: f64, params: &RidgeParams) -> Result<f64, GenError>
where
    N: BaseNoise + ?Sized,
{
    params.validate()?;
    Ok(ridge_unchecked(noise, x, y, params))
}

fn ridge_unchecked<N>(noise: &N, x: f64, y: f64, params: &RidgeParams) -> f64
where
    N: BaseNoise + ?Sized,
{
    let sx = x * params.scale;
    let sy = y * params.scale;
    let mut value = 0.0;
    let mut max = 0.0;
    let mut amp = 1.0;
    let mut freq = 1.0;
    let mut prev = 1.0;

    for _ in 0..params.octaves {
        let n = noise.noise(sx * freq, sy * freq);
        let ridge = 1.0 - (n * 2.0 - 1.0).abs();
        let n = ridge * ridge * prev;
        prev = n;
        value += amp * n;
        max += amp;
        amp *= params.gain;
        freq *= params.lacunarity;
    }

    normalize(value, max)
}

// ---------------------------------------------------------------------------
// Field objects
// ---------------------------------------------------------------------------

/// A scalar field over the plane.
pub trait ScalarField: Send + Sync {
    /// Sample the field at (x, y).
    fn sample(&self, x: f64, y: f64) -> f64;
}

/// A 2D vector field over the plane.
pub trait VectorField: Send + Sync {
    /// Sample the field at (x, y), returning (dx, dy).
    fn sample(&self, x: f64, y: f64) -> (f64, f64);
}

/// fBM over an owned base noise.
pub struct FbmField<N> {
    noise: N,
    params: FbmParams,
}

/// Domain-warped noise over an owned base noise.
pub struct WarpedField<N> {
    noise: N,
    params: WarpParams,
}

/// Ridged noise over an owned base noise.
pub struct RidgedField<N> {
    noise: N,
    params: RidgeParams,
}

/// Curl noise over an owned base noise.
pub struct CurlField<N> {
    noise: N,
    scale: f64,
}

impl<N: BaseNoise> FbmField<N> {
    /// Creates an fBM field, rejecting zero octaves.
    pub fn new(noise: N, params: FbmParams) -> Result<Self, GenError> {
        params.validate()?;
        tracing::debug!(?params, "fbm field");
        Ok(Self { noise, params })
    }
}

impl<N: BaseNoise> WarpedField<N> {
    /// Creates a domain-warped field, rejecting zero octaves.
    pub fn new(noise: N, params: WarpParams) -> Result<Self, GenError> {
        params.validate()?;
        tracing::debug!(?params, "warped field");
        Ok(Self { noise, params })
    }
}

impl<N: BaseNoise> RidgedField<N> {
    /// Creates a ridged field, rejecting zero octaves.
    pub fn new(noise: N, params: RidgeParams) -> Result<Self, GenError> {
        params.validate()?;
        tracing::debug!(?params, "ridged field");
        Ok(Self { noise, params })
    }
}

impl<N: BaseNoise> CurlField<N> {
    /// Creates a curl field sampling the base noise at `scale`.
    pub fn new(noise: N, scale: f64) -> Self {
        Self { noise, scale }
    }
}

impl<N: BaseNoise + Send + Sync> ScalarField for FbmField<N> {
    fn sample(&self, x: f64, y: f64) -> f64 {
        fbm_unchecked(&self.noise, x, y, &self.params)
    }
}

impl<N: BaseNoise + Send + Sync> ScalarField for WarpedField<N> {
    fn sample(&self, x: f64, y: f64) -> f64 {
        warped_unchecked(&self.noise, x, y, &self.params)
    }
}

impl<N: BaseNoise + Send + Sync> ScalarField for RidgedField<N> {
    fn sample(&self, x: f64, y: f64) -> f64 {
        ridge_unchecked(&self.noise, x, y, &self.params)
    }
}

impl<N: BaseNoise + Send + Sync> VectorField for CurlField<N> {
    fn sample(&self, x: f64, y: f64) -> (f64, f64) {
        curl_noise(&self.noise, x, y, self.scale)
    }
}
