//! Pianoroll ↔ interval transduction
//!
//! Every transform takes explicit operands and returns a fresh grid. The
//! stateful operand cache lives in [`crate::embedder::Embedder`].
//!
//! # Reference policies
//! - **melodic**: each note against the last sounded note
//! - **harmonic**: each note against the nearest lower note of a reference pianoroll
//! - **barwise**: each note against the first note of its bar; first notes of bars
//!   chain to the first note of the previous non-empty bar

pub mod barwise;
pub mod chunk;
pub mod harmonic;
pub mod lead_voice;
pub mod melodic;

pub use chunk::{chunk, merge};
pub use lead_voice::{extract_lead_voice, extract_lead_voice_in_place, SILENT_PITCH};

use crate::error::{EmbeddingError, Result};

/// Highest MIDI pitch / velocity
pub const MIDI_MAX: i64 = 127;

/// Check a pitch, origin or velocity against the MIDI range
pub(crate) fn check_midi(name: &'static str, value: i64) -> Result<u8> {
    EmbeddingError::check_range(name, value, 0, MIDI_MAX)?;
    Ok(value as u8)
}

pub(crate) fn check_leading_silence(leading_silence: usize, rows: usize) -> Result<()> {
    if leading_silence >= rows {
        return Err(EmbeddingError::InvalidConfiguration(format!(
            "leading silence ({}) must be less than the number of intervals ({})",
            leading_silence, rows
        )));
    }
    Ok(())
}

pub(crate) fn check_pixels(name: &'static str, pixels: usize) -> Result<()> {
    if pixels < 1 {
        return Err(EmbeddingError::InvalidConfiguration(format!(
            "{} must be a positive integer",
            name
        )));
    }
    Ok(())
}

pub(crate) fn check_same_rows(grid: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(EmbeddingError::RowCountMismatch { grid, expected, actual });
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_check_midi() {
        assert_eq!(check_midi("origin", 60).unwrap(), 60);
        assert_eq!(check_midi("velocity", 128).unwrap_err().kind(), ErrorKind::OutOfRange);
        assert_eq!(check_midi("pitch", -1).unwrap_err().kind(), ErrorKind::OutOfRange);
    }

    #[test]
    fn test_check_leading_silence() {
        assert!(check_leading_silence(0, 1).is_ok());
        assert_eq!(
            check_leading_silence(2, 1).unwrap_err().kind(),
            ErrorKind::InvalidConfiguration
        );
    }
}
