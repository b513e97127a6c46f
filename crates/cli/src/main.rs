#![deny(unsafe_code)]
//! CLI binary for the genart procedural primitives.
//!
//! Subcommands:
//! - `random` — draw values from a seeded stream
//! - `shuffle` / `pick` — permute or choose from the given items
//! - `palette <kind>` — generate a seeded palette
//! - `noise <field>` — sample a derived noise field over seeded Perlin noise
//! - `hsl` / `lerp` — color conversions
//! - `list` — print palette kinds and noise fields

mod error;

use clap::{Parser, Subcommand, ValueEnum};
use error::CliError;
use genart_core::params::param_usize;
use genart_core::{
    curl_noise, dark_accent_palette, fbm, hsl_to_hex, lerp_color, ridge_noise, warped_noise,
    DarkAccentPalette, FbmParams, Mulberry32, Palette, PaletteKind, PaletteOptions, PerlinNoise,
    RidgeParams, WarpParams,
};
use serde_json::{json, Value};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "genart", about = "Deterministic generative-art primitives")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Log level filter (error, warn, info, debug, trace). Overrides RUST_LOG.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum Dist {
    Uniform,
    Range,
    Int,
    Gaussian,
    Chance,
}

#[derive(Clone, Copy, ValueEnum)]
enum NoiseField {
    Fbm,
    Warped,
    Ridge,
    Curl,
}

#[derive(Subcommand)]
enum Command {
    /// Draw values from a seeded stream.
    Random {
        /// PRNG seed (coerced to 32 bits).
        #[arg(long, default_value_t = 42, allow_negative_numbers = true)]
        seed: i64,

        /// Number of draws.
        #[arg(short, long, default_value_t = 3)]
        count: usize,

        /// Distribution to draw from.
        #[arg(long, value_enum, default_value_t = Dist::Uniform)]
        dist: Dist,

        /// Lower bound for `range` and `int`.
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        min: f64,

        /// Upper bound for `range` and `int`.
        #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
        max: f64,

        /// Mean for `gaussian`.
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        mean: f64,

        /// Standard deviation for `gaussian`.
        #[arg(long, default_value_t = 1.0)]
        stddev: f64,

        /// Probability for `chance`.
        #[arg(long, default_value_t = 0.5)]
        p: f64,
    },
    /// Print a seeded permutation of the items.
    Shuffle {
        #[arg(long, default_value_t = 42, allow_negative_numbers = true)]
        seed: i64,

        items: Vec<String>,
    },
    /// Print one seeded choice from the items.
    Pick {
        #[arg(long, default_value_t = 42, allow_negative_numbers = true)]
        seed: i64,

        items: Vec<String>,
    },
    /// Generate a palette.
    Palette {
        /// Palette kind (harmonic, analogous, complementary, triadic, mono, dark-accent).
        kind: String,

        #[arg(long, default_value_t = 42, allow_negative_numbers = true)]
        seed: i64,

        /// Number of colors (accents for dark-accent). Defaults per kind.
        #[arg(short, long)]
        count: Option<usize>,

        /// Options as JSON. `count` applies to every kind; saturation,
        /// lightness and hue_spread apply only to harmonic.
        #[arg(long, default_value = "{}")]
        params: String,
    },
    /// Sample a derived noise field at one point.
    Noise {
        #[arg(value_enum)]
        field: NoiseField,

        #[arg(long, allow_negative_numbers = true)]
        x: f64,

        #[arg(long, allow_negative_numbers = true)]
        y: f64,

        /// Seed of the Perlin base noise.
        #[arg(long, default_value_t = 0)]
        noise_seed: u32,

        /// Field parameters as JSON (octaves, lacunarity, gain, scale, warp_amount).
        #[arg(long, default_value = "{}")]
        params: String,
    },
    /// Convert HSL (degrees, percent, percent) to hex.
    Hsl {
        #[arg(allow_negative_numbers = true)]
        h: f64,
        s: f64,
        l: f64,
    },
    /// Interpolate two hex colors.
    Lerp {
        from: String,
        to: String,
        #[arg(allow_negative_numbers = true)]
        t: f64,
    },
    /// List palette kinds and noise fields.
    List,
}

fn parse_params(params: &str) -> Result<Value, CliError> {
    serde_json::from_str(params).map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))
}

fn emit(json_mode: bool, value: Value, text: impl FnOnce() -> String) -> Result<(), CliError> {
    if json_mode {
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", text());
    }
    Ok(())
}

fn palette_json(kind: PaletteKind, seed: i64, colors: &Palette) -> Value {
    json!({"kind": kind.name(), "seed": seed, "colors": colors})
}

fn dark_accent_json(seed: i64, p: &DarkAccentPalette) -> Value {
    json!({
        "kind": PaletteKind::DarkAccent.name(),
        "seed": seed,
        "background": p.background,
        "accents": p.accents,
        "all": p.all,
    })
}

fn run(cli: Cli) -> Result<(), CliError> {
    let json_mode = cli.json;
    match cli.command {
        Command::Random {
            seed,
            count,
            dist,
            min,
            max,
            mean,
            stddev,
            p,
        } => {
            let mut rng = Mulberry32::from_i64(seed);
            let draws: Vec<Value> = (0..count)
                .map(|_| match dist {
                    Dist::Uniform => json!(rng.uniform()),
                    Dist::Range => json!(rng.range(min, max)),
                    Dist::Int => json!(rng.int(min as i64, max as i64)),
                    Dist::Gaussian => json!(rng.gaussian(mean, stddev)),
                    Dist::Chance => json!(rng.chance(p)),
                })
                .collect();
            tracing::info!(seed, count, "drew values");
            let text = draws
                .iter()
                .map(Value::to_string)
                .collect::<Vec<_>>()
                .join("\n");
            emit(json_mode, json!({"seed": seed, "values": draws}), || text)?;
        }
        Command::Shuffle { seed, items } => {
            let shuffled = Mulberry32::from_i64(seed).shuffle(&items);
            let text = shuffled.join(" ");
            emit(json_mode, json!({"seed": seed, "items": shuffled}), || text)?;
        }
        Command::Pick { seed, items } => {
            let mut rng = Mulberry32::from_i64(seed);
            let choice = rng.pick(&items)?.clone();
            let text = choice.clone();
            emit(json_mode, json!({"seed": seed, "item": choice}), || text)?;
        }
        Command::Palette {
            kind,
            seed,
            count,
            params,
        } => {
            let params = parse_params(&params)?;
            let kind = PaletteKind::from_name(&kind)?;
            let count = count.unwrap_or_else(|| param_usize(&params, "count", kind.default_count()));
            let mut rng = Mulberry32::from_i64(seed);

            if kind == PaletteKind::DarkAccent {
                let p = dark_accent_palette(&mut rng, count)?;
                let text = format!(
                    "background: {}\naccents: {}",
                    p.background,
                    p.accents.to_hex().join(" ")
                );
                emit(json_mode, dark_accent_json(seed, &p), || text)?;
            } else {
                let options = PaletteOptions::from_json(&params);
                let p = kind.generate(&mut rng, count, &options)?;
                let text = p.to_hex().join(" ");
                emit(json_mode, palette_json(kind, seed, &p), || text)?;
            }
        }
        Command::Noise {
            field,
            x,
            y,
            noise_seed,
            params,
        } => {
            let params = parse_params(&params)?;
            let base = PerlinNoise::perlin(noise_seed);
            let value = match field {
                NoiseField::Fbm => json!(fbm(&base, x, y, &FbmParams::from_json(&params))?),
                NoiseField::Warped => {
                    json!(warped_noise(&base, x, y, &WarpParams::from_json(&params))?)
                }
                NoiseField::Ridge => {
                    json!(ridge_noise(&base, x, y, &RidgeParams::from_json(&params))?)
                }
                NoiseField::Curl => {
                    let scale = genart_core::params::param_f64(
                        &params,
                        "scale",
                        genart_core::noise::DEFAULT_SCALE,
                    );
                    let (dx, dy) = curl_noise(&base, x, y, scale);
                    json!([dx, dy])
                }
            };
            let text = value.to_string();
            emit(json_mode, json!({"x": x, "y": y, "value": value}), || text)?;
        }
        Command::Hsl { h, s, l } => {
            let hex = hsl_to_hex(h, s, l);
            let text = hex.clone();
            emit(json_mode, json!({"hex": hex}), || text)?;
        }
        Command::Lerp { from, to, t } => {
            let hex = lerp_color(&from, &to, t)?;
            let text = hex.clone();
            emit(json_mode, json!({"hex": hex}), || text)?;
        }
        Command::List => {
            let palettes = PaletteKind::list_names();
            let fields = ["fbm", "warped", "ridge", "curl"];
            let text = format!(
                "Palettes:\n  {}\nNoise fields:\n  {}",
                palettes.join(", "),
                fields.join(", ")
            );
            emit(
                json_mode,
                json!({"palettes": palettes, "noise_fields": fields}),
                || text,
            )?;
        }
    }

    Ok(())
}

/// Installs a stderr `fmt` subscriber. `--log-level` wins over `RUST_LOG`,
/// which wins over the default of `warn`.
fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        tracing::debug!(exit_code = e.exit_code(), "command failed");
        if json_mode {
            let j = json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
