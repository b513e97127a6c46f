//! Deterministic PRNG based on the mulberry32 algorithm.
//!
//! Provides a small, seedable pseudo-random number generator whose output is
//! bit-for-bit stable across platforms: the core step is pure wrapping `u32`
//! arithmetic, and every derived sampler draws a fixed number of values from
//! it. Compositions that mix palette choices with other random decisions on
//! one engine therefore replay exactly from the seed.

use crate::error::GenError;
use serde::{Deserialize, Serialize};

/// Mulberry32 deterministic PRNG. Same seed always produces the same sequence.
///
/// Each draw advances the 32-bit state exactly once. There is no rewind;
/// replaying a stream means constructing a new engine from the same seed and
/// issuing the same calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    /// Odd increment added to the state on every step.
    const INCREMENT: u32 = 0x6D2B_79F5;

    /// 2^32, the divisor mapping a `u32` output into [0, 1).
    const SCALE: f64 = 4_294_967_296.0;

    /// Creates a new PRNG from a 32-bit signed seed. Every seed is valid.
    pub fn new(seed: i32) -> Self {
        Self {
            state: seed as u32,
        }
    }

    /// Creates a new PRNG from a wider seed, keeping only its low 32 bits.
    ///
    /// `from_i64(42 + (1 << 32))` and `new(42)` produce the same stream.
    pub fn from_i64(seed: i64) -> Self {
        Self::new(seed as i32)
    }

    /// Advances the state and returns the next 32-bit output.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(Self::INCREMENT);
        let s = self.state;
        let mut t = (s ^ (s >> 15)).wrapping_mul(1 | s);
        t = t.wrapping_add((t ^ (t >> 7)).wrapping_mul(61 | t)) ^ t;
        t ^ (t >> 14)
    }

    /// Returns a uniformly distributed f64 in [0, 1).
    pub fn uniform(&mut self) -> f64 {
        self.next_u32() as f64 / Self::SCALE
    }

    /// Returns a uniformly distributed f64 in [min, max).
    ///
    /// Returns `min` when `min == max`. Reversed bounds are not rejected:
    /// the result then lies in (max, min].
    pub fn range(&mut self, min: f64, max: f64) -> f64 {
        min + self.uniform() * (max - min)
    }

    /// Returns a uniformly distributed integer in [min, max], both inclusive.
    ///
    /// Returns `min` when `min == max`.
    pub fn int(&mut self, min: i64, max: i64) -> i64 {
        let span = (max as i128 - min as i128 + 1) as f64;
        let offset = (self.uniform() * span).floor() as i128;
        let v = (min as i128 + offset) as i64;
        if min <= max {
            v.min(max)
        } else {
            v
        }
    }

    /// Picks one element of `items` uniformly.
    ///
    /// Returns `GenError::EmptySequence` for an empty slice without
    /// advancing the state.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Result<&'a T, GenError> {
        if items.is_empty() {
            return Err(GenError::EmptySequence);
        }
        let idx = index_below(self.uniform(), items.len());
        Ok(&items[idx])
    }

    /// Returns a shuffled copy of `items` (Fisher-Yates, last index first).
    ///
    /// Draws `items.len() - 1` values; the input is never mutated.
    pub fn shuffle<T: Clone>(&mut self, items: &[T]) -> Vec<T> {
        let mut out = items.to_vec();
        for i in (1..out.len()).rev() {
            let j = index_below(self.uniform(), i + 1);
            out.swap(i, j);
        }
        out
    }

    /// Returns a normally distributed f64 via the Box-Muller transform.
    ///
    /// Always draws exactly two values. A first draw of exactly 0 is clamped
    /// to the smallest positive normal f64 so the logarithm stays finite.
    pub fn gaussian(&mut self, mean: f64, stddev: f64) -> f64 {
        let u1 = self.uniform().max(f64::MIN_POSITIVE);
        let u2 = self.uniform();
        let z = (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos();
        mean + z * stddev
    }

    /// `gaussian` with mean 0 and standard deviation 1.
    pub fn standard_normal(&mut self) -> f64 {
        self.gaussian(0.0, 1.0)
    }

    /// Returns true with probability `p`, computed as `uniform() < p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.uniform() < p
    }

    /// A fair coin: `chance(0.5)`.
    pub fn coin(&mut self) -> bool {
        self.chance(0.5)
    }

    /// Splits off an independent child stream seeded from one draw.
    ///
    /// Useful for handing each worker thread its own engine while keeping the
    /// whole run reproducible from the parent seed.
    pub fn derive(&mut self) -> Self {
        Self {
            state: self.next_u32(),
        }
    }
}

/// Maps a unit draw onto `0..len`, guarding the upper edge.
fn index_below(u: f64, len: usize) -> usize {
    ((u * len as f64) as usize).min(len - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- Golden values --

    #[test]
    fn uniform_produces_known_golden_values_for_seed_42() {
        // If this test breaks, the PRNG algorithm changed and every sketch
        // replayed from a seed is invalidated.
        let mut rng = Mulberry32::new(42);
        assert_eq!(rng.uniform(), 0.6011037519201636);
        assert_eq!(rng.uniform(), 0.44829055899754167);
        assert_eq!(rng.uniform(), 0.8524657934904099);
    }

    #[test]
    fn next_u32_produces_known_golden_values_for_seed_42() {
        let mut rng = Mulberry32::new(42);
        assert_eq!(rng.next_u32(), 2_581_720_956);
        assert_eq!(rng.next_u32(), 1_925_393_290);
        assert_eq!(rng.next_u32(), 3_661_312_704);
    }

    #[test]
    fn negative_and_zero_seeds_are_valid() {
        let mut neg = Mulberry32::new(-1);
        assert_eq!(neg.uniform(), 0.8964226141106337);
        let mut zero = Mulberry32::new(0);
        assert_eq!(zero.uniform(), 0.26642920868471265);
    }

    #[test]
    fn wide_seed_is_coerced_to_32_bits() {
        let mut wide = Mulberry32::from_i64(42 + (1_i64 << 32));
        let mut narrow = Mulberry32::new(42);
        for _ in 0..10 {
            assert_eq!(wide.next_u32(), narrow.next_u32());
        }
        assert_eq!(Mulberry32::from_i64(-1), Mulberry32::new(-1));
        assert_eq!(
            Mulberry32::from_i64(u32::MAX as i64),
            Mulberry32::new(-1)
        );
    }

    // -- Determinism --

    #[test]
    fn two_instances_with_same_seed_produce_identical_sequences() {
        let mut rng_a = Mulberry32::new(42);
        let mut rng_b = Mulberry32::new(42);
        for i in 0..1000 {
            assert_eq!(
                rng_a.next_u32(),
                rng_b.next_u32(),
                "sequences diverged at index {i}"
            );
        }
    }

    #[test]
    fn mixed_call_sequence_is_reproducible() {
        let run = |seed: i32| {
            let mut rng = Mulberry32::new(seed);
            let mut out = Vec::new();
            out.push(rng.uniform());
            out.push(rng.range(-5.0, 5.0));
            out.push(rng.int(0, 9) as f64);
            out.push(rng.gaussian(0.0, 1.0));
            out.push(if rng.chance(0.3) { 1.0 } else { 0.0 });
            out.extend(rng.shuffle(&[1.0, 2.0, 3.0, 4.0]));
            out.push(*rng.pick(&[7.0, 8.0, 9.0]).unwrap());
            out
        };
        assert_eq!(run(1234), run(1234));
        assert_ne!(run(1234), run(1235));
    }

    // -- Ranges --

    #[test]
    fn uniform_always_in_unit_interval() {
        let mut rng = Mulberry32::new(12345);
        for i in 0..10_000 {
            let v = rng.uniform();
            assert!(
                (0.0..1.0).contains(&v),
                "uniform() = {v} out of [0, 1) at iteration {i}"
            );
        }
    }

    #[test]
    fn range_stays_within_specified_bounds() {
        let mut rng = Mulberry32::new(9999);
        for i in 0..10_000 {
            let v = rng.range(10.0, 20.0);
            assert!(
                (10.0..20.0).contains(&v),
                "range(10, 20) = {v} out of bounds at iteration {i}"
            );
        }
    }

    #[test]
    fn range_with_equal_bounds_returns_min() {
        let mut rng = Mulberry32::new(5);
        for _ in 0..100 {
            assert_eq!(rng.range(3.5, 3.5), 3.5);
        }
    }

    #[test]
    fn int_is_inclusive_on_both_ends() {
        let mut rng = Mulberry32::new(7777);
        let mut seen = [false; 6];
        for i in 0..10_000 {
            let v = rng.int(0, 5);
            assert!((0..=5).contains(&v), "int(0, 5) = {v} at iteration {i}");
            seen[v as usize] = true;
        }
        assert!(seen.iter().all(|&s| s), "not every value drawn: {seen:?}");
    }

    #[test]
    fn int_with_equal_bounds_returns_min() {
        let mut rng = Mulberry32::new(77);
        for _ in 0..100 {
            assert_eq!(rng.int(-4, -4), -4);
        }
    }

    #[test]
    fn int_handles_extreme_bounds() {
        let mut rng = Mulberry32::new(3);
        for _ in 0..1000 {
            let v = rng.int(i64::MIN, i64::MAX);
            assert!((i64::MIN..=i64::MAX).contains(&v));
        }
    }

    // -- pick / shuffle --

    #[test]
    fn pick_on_empty_slice_is_invalid_argument() {
        let mut rng = Mulberry32::new(1);
        let before = rng.clone();
        let empty: [u8; 0] = [];
        let err = rng.pick(&empty).unwrap_err();
        assert_eq!(err, GenError::EmptySequence);
        assert!(err.is_invalid_argument());
        assert_eq!(rng, before, "failed pick must not advance the state");
    }

    #[test]
    fn pick_returns_an_element_and_reaches_all() {
        let mut rng = Mulberry32::new(2024);
        let items = ["a", "b", "c", "d"];
        let mut seen = [false; 4];
        for _ in 0..1000 {
            let p = rng.pick(&items).unwrap();
            let idx = items.iter().position(|x| x == p).unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn shuffle_leaves_input_untouched_and_preserves_multiset() {
        let mut rng = Mulberry32::new(42);
        let input = vec![1, 2, 2, 3, 5, 8, 13];
        let snapshot = input.clone();
        let out = rng.shuffle(&input);
        assert_eq!(input, snapshot);
        let mut sorted = out.clone();
        sorted.sort();
        assert_eq!(sorted, snapshot);
    }

    #[test]
    fn shuffle_draws_len_minus_one_values() {
        let mut a = Mulberry32::new(8);
        let mut b = Mulberry32::new(8);
        a.shuffle(&[0; 10]);
        for _ in 0..9 {
            b.next_u32();
        }
        assert_eq!(a, b);
    }

    #[test]
    fn shuffle_of_empty_and_single_do_not_draw() {
        let mut rng = Mulberry32::new(8);
        let before = rng.clone();
        assert!(rng.shuffle::<u8>(&[]).is_empty());
        assert_eq!(rng.shuffle(&[9]), vec![9]);
        assert_eq!(rng, before);
    }

    // -- gaussian / chance --

    #[test]
    fn gaussian_draws_two_values_and_is_finite() {
        let mut a = Mulberry32::new(99);
        let mut b = Mulberry32::new(99);
        for _ in 0..1000 {
            let v = a.gaussian(0.0, 1.0);
            assert!(v.is_finite());
            b.next_u32();
            b.next_u32();
        }
        assert_eq!(a, b);
    }

    #[test]
    fn gaussian_has_roughly_requested_moments() {
        let mut rng = Mulberry32::new(31337);
        let n = 20_000;
        let samples: Vec<f64> = (0..n).map(|_| rng.gaussian(10.0, 2.0)).collect();
        let mean = samples.iter().sum::<f64>() / n as f64;
        let var = samples.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;
        assert!((mean - 10.0).abs() < 0.1, "mean {mean}");
        assert!((var.sqrt() - 2.0).abs() < 0.1, "stddev {}", var.sqrt());
    }

    #[test]
    fn chance_extremes() {
        let mut rng = Mulberry32::new(4);
        for _ in 0..1000 {
            assert!(!rng.chance(0.0));
            assert!(rng.chance(1.0));
        }
    }

    #[test]
    fn chance_matches_uniform_comparison() {
        let mut a = Mulberry32::new(55);
        let mut b = Mulberry32::new(55);
        for _ in 0..100 {
            assert_eq!(a.chance(0.5), b.uniform() < 0.5);
        }
    }

    #[test]
    fn standard_normal_is_unit_gaussian() {
        let mut a = Mulberry32::new(21);
        let mut b = Mulberry32::new(21);
        for _ in 0..200 {
            assert_eq!(a.standard_normal(), b.gaussian(0.0, 1.0));
        }
        assert_eq!(a, b);
    }

    #[test]
    fn coin_is_even_chance() {
        let mut a = Mulberry32::new(22);
        let mut b = Mulberry32::new(22);
        let mut heads = 0;
        for _ in 0..10_000 {
            let c = a.coin();
            assert_eq!(c, b.chance(0.5));
            heads += usize::from(c);
        }
        assert_eq!(a, b);
        assert!((4_500..=5_500).contains(&heads), "heads = {heads}");
    }

    // -- derive --

    #[test]
    fn derived_streams_are_reproducible_and_distinct() {
        let mut parent_a = Mulberry32::new(10);
        let mut parent_b = Mulberry32::new(10);
        let mut child_a = parent_a.derive();
        let mut child_b = parent_b.derive();
        assert_eq!(child_a, child_b);
        assert_eq!(parent_a, parent_b);
        let sibling = parent_a.derive();
        assert_ne!(child_a.clone(), sibling);
        assert_eq!(child_a.next_u32(), child_b.next_u32());
    }

    // -- Serialization roundtrip --

    #[test]
    fn serialization_roundtrip_preserves_state() {
        let mut rng = Mulberry32::new(42);
        for _ in 0..50 {
            rng.next_u32();
        }
        let json = serde_json::to_string(&rng).unwrap();
        let mut restored: Mulberry32 = serde_json::from_str(&json).unwrap();
        for i in 0..100 {
            assert_eq!(
                rng.next_u32(),
                restored.next_u32(),
                "sequences diverged after deserialization at index {i}"
            );
        }
    }

    // -- Property-based tests --

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn uniform_in_unit_interval_for_any_seed(seed: i32) {
                let mut rng = Mulberry32::new(seed);
                for _ in 0..100 {
                    let v = rng.uniform();
                    prop_assert!(
                        (0.0..1.0).contains(&v),
                        "uniform() = {v} out of [0, 1) for seed {seed}"
                    );
                }
            }

            #[test]
            fn range_in_bounds_for_any_seed_and_range(
                seed: i32,
                min in -1e6_f64..1e6,
                max in -1e6_f64..1e6,
            ) {
                prop_assume!(min < max);
                let mut rng = Mulberry32::new(seed);
                for _ in 0..100 {
                    let v = rng.range(min, max);
                    prop_assert!(
                        v >= min && v < max,
                        "range({min}, {max}) = {v} out of bounds for seed {seed}"
                    );
                }
            }

            #[test]
            fn int_in_bounds_for_any_seed_and_range(
                seed: i32,
                min in -10_000_i64..10_000,
                width in 0_i64..10_000,
            ) {
                let max = min + width;
                let mut rng = Mulberry32::new(seed);
                for _ in 0..100 {
                    let v = rng.int(min, max);
                    prop_assert!(
                        v >= min && v <= max,
                        "int({min}, {max}) = {v} out of bounds for seed {seed}"
                    );
                }
            }

            #[test]
            fn shuffle_is_a_permutation(
                seed: i32,
                items in proptest::collection::vec(any::<u16>(), 0..64),
            ) {
                let mut rng = Mulberry32::new(seed);
                let out = rng.shuffle(&items);
                prop_assert_eq!(out.len(), items.len());
                let mut a = out.clone();
                let mut b = items.clone();
                a.sort_unstable();
                b.sort_unstable();
                prop_assert_eq!(a, b);
            }

            #[test]
            fn uniform_approximate_uniformity(seed: i32) {
                let mut rng = Mulberry32::new(seed);
                let mut buckets = [0u32; 10];
                for _ in 0..10_000 {
                    let v = rng.uniform();
                    let idx = (v * 10.0).min(9.0) as usize;
                    buckets[idx] += 1;
                }
                // Expected ~1000 per bucket; loose bound avoids flakes.
                for (i, &count) in buckets.iter().enumerate() {
                    prop_assert!(
                        count >= 500,
                        "bucket {i} has only {count} values for seed {seed}"
                    );
                }
            }
        }
    }
}
