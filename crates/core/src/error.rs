//! Error types for the genart core.

use thiserror::Error;

/// Errors produced by core operations.
///
/// Every variant is an invalid-argument condition: the core performs no I/O,
/// so nothing here is transient or retryable.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GenError {
    /// `pick` was called on an empty sequence.
    #[error("invalid argument: cannot pick from an empty sequence")]
    EmptySequence,

    /// A layered noise function was asked for zero octaves.
    #[error("invalid argument: octave count must be at least 1, got {0}")]
    InvalidOctaves(u32),

    /// A layered noise function was given a negative or non-finite gain.
    #[error("invalid argument: gain must be finite and non-negative, got {0}")]
    InvalidGain(f64),

    /// A palette function was asked for zero colors.
    #[error("invalid argument: palette color count must be at least 1, got {0}")]
    InvalidCount(usize),

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A palette kind name was not recognized.
    #[error("unknown palette kind: {0}")]
    UnknownPalette(String),
}

impl GenError {
    /// True for errors caused by a caller-supplied argument.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            GenError::EmptySequence
                | GenError::InvalidOctaves(_)
                | GenError::InvalidGain(_)
                | GenError::InvalidCount(_)
                | GenError::InvalidColor(_)
                | GenError::UnknownPalette(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sequence_displays_readable_message() {
        let msg = format!("{}", GenError::EmptySequence);
        assert!(
            msg.contains("empty"),
            "expected message mentioning empty, got: {msg}"
        );
    }

    #[test]
    fn invalid_octaves_includes_value() {
        let msg = format!("{}", GenError::InvalidOctaves(0));
        assert!(msg.contains("octave"), "missing subject in: {msg}");
        assert!(msg.contains('0'), "missing value in: {msg}");
    }

    #[test]
    fn invalid_gain_includes_value() {
        let msg = format!("{}", GenError::InvalidGain(-1.5));
        assert!(msg.contains("gain"), "missing subject in: {msg}");
        assert!(msg.contains("-1.5"), "missing value in: {msg}");
    }

    #[test]
    fn invalid_count_includes_value() {
        let msg = format!("{}", GenError::InvalidCount(0));
        assert!(msg.contains("count"), "missing subject in: {msg}");
    }

    #[test]
    fn invalid_color_includes_message() {
        let msg = format!("{}", GenError::InvalidColor("bad hex".into()));
        assert!(msg.contains("bad hex"), "missing message in: {msg}");
    }

    #[test]
    fn unknown_palette_includes_name() {
        let msg = format!("{}", GenError::UnknownPalette("plaid".into()));
        assert!(msg.contains("plaid"), "missing name in: {msg}");
    }

    #[test]
    fn every_variant_is_invalid_argument() {
        let all = [
            GenError::EmptySequence,
            GenError::InvalidOctaves(0),
            GenError::InvalidGain(-1.0),
            GenError::InvalidCount(0),
            GenError::InvalidColor("x".into()),
            GenError::UnknownPalette("x".into()),
        ];
        for err in all {
            assert!(err.is_invalid_argument(), "{err:?} not flagged");
        }
    }

    #[test]
    fn gen_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GenError>();
    }

    #[test]
    fn gen_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<GenError>();
    }
}
