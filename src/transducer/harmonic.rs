//! Harmonic intervals
//!
//! Each lead-voice note is measured against the nearest lower active lane of
//! a reference pianoroll at the same step. Given an ATB pianoroll as the
//! reference and the soprano's harmonic intervals, decoding returns the
//! soprano line.

use crate::error::Result;
use crate::models::{Grid, Interval, IntervalSequence, Pianoroll, FEATURE_DIMENSIONS, NOTES_IN_MIDI};

use super::lead_voice::{extract_lead_voice, SILENT_PITCH};
use super::{check_midi, check_same_rows};

/// Harmonic intervals of the lead voice of `pianoroll` against `reference`.
///
/// Steps where the lead voice rests, or where nothing sounds below it in the
/// reference, hold the silence sentinel.
pub fn intervals_from_pianoroll(
    reference: &Pianoroll,
    pianoroll: &Pianoroll,
) -> Result<IntervalSequence> {
    pianoroll.expect_width("pianoroll", NOTES_IN_MIDI)?;
    reference.expect_width("reference pianoroll", NOTES_IN_MIDI)?;
    check_same_rows("reference pianoroll", pianoroll.rows(), reference.rows())?;

    let notes = extract_lead_voice(pianoroll)?;
    log::debug!("harmonic intervals: {} steps", notes.len());

    let mut intervals = Grid::zeros(notes.len(), FEATURE_DIMENSIONS);
    for (step, &note) in notes.iter().enumerate() {
        if note == SILENT_PITCH {
            continue;
        }
        let below = &reference.row(step)[..usize::from(note)];
        if let Some(lane) = below.iter().rposition(|&velocity| velocity != 0) {
            let semitones = i32::from(note) - lane as i32;
            intervals
                .row_mut(step)
                .copy_from_slice(&Interval::from_semitones(semitones).specs());
        }
    }

    Ok(intervals)
}

/// Place each interval on top of the lead voice of `reference`.
///
/// Steps where the reference rests stay empty. The silence sentinel counts
/// as 0 semitones, so it doubles the anchor.
pub fn pianoroll_from_intervals(
    reference: &Pianoroll,
    intervals: &IntervalSequence,
    velocity: i64,
) -> Result<Pianoroll> {
    reference.expect_width("pianoroll", NOTES_IN_MIDI)?;
    intervals.expect_width("intervals", FEATURE_DIMENSIONS)?;
    let velocity = check_midi("velocity", velocity)?;
    check_same_rows("intervals", reference.rows(), intervals.rows())?;

    let anchors = extract_lead_voice(reference)?;
    log::debug!("pianoroll from harmonic intervals: {} steps", anchors.len());

    let mut pianoroll = Grid::zeros(intervals.rows(), NOTES_IN_MIDI);
    for (step, &anchor) in anchors.iter().enumerate() {
        if anchor == SILENT_PITCH {
            continue;
        }
        let interval = Interval::from_specs(intervals.row(step))?;
        let lane = check_midi("pitch", i64::from(anchor) + i64::from(interval.semitones()))?;
        pianoroll.set(step, usize::from(lane), velocity);
    }

    Ok(pianoroll)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EmbeddingError, ErrorKind};
    use crate::transducer::test_support::pianoroll_from_pitches;

    #[test]
    fn test_interval_ladder() {
        let mut pianoroll = Grid::zeros(15, NOTES_IN_MIDI);
        for i in 2..15 {
            pianoroll.set(i, 0, 100);
            pianoroll.set(i, i, 100);
        }
        let actual = intervals_from_pianoroll(&pianoroll, &pianoroll).unwrap();
        let expected = vec![
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
            vec![2, 1, 0, 0],
            vec![3, -1, 0, 0],
            vec![3, 1, 0, 0],
            vec![4, 0, 0, 0],
            vec![5, -2, 0, 0],
            vec![5, 0, 0, 0],
            vec![6, -1, 0, 0],
            vec![6, 1, 0, 0],
            vec![7, -1, 0, 0],
            vec![7, 1, 0, 0],
            vec![1, 0, 0, 1],
            vec![2, -1, 0, 1],
            vec![2, 1, 0, 1],
        ];
        assert_eq!(actual.to_rows(), expected);
    }

    #[test]
    fn test_silent_reference_gives_silence() {
        let subject = pianoroll_from_pitches(&[72, 74, 76], 100);
        let reference = pianoroll_from_pitches(&[60, 0, 64], 100);
        let intervals = intervals_from_pianoroll(&reference, &subject).unwrap();
        assert_eq!(intervals.row(0), &[1, 0, 0, 1]);
        assert_eq!(intervals.row(1), &[0, 0, 0, 0]);
        assert_eq!(intervals.row(2), &[1, 0, 0, 1]);
    }

    #[test]
    fn test_reference_above_subject_is_ignored() {
        let subject = pianoroll_from_pitches(&[60], 100);
        let reference = pianoroll_from_pitches(&[67], 100);
        let intervals = intervals_from_pianoroll(&reference, &subject).unwrap();
        assert_eq!(intervals.row(0), &[0, 0, 0, 0]);
    }

    #[test]
    fn test_decode_against_reference() {
        let mut pianoroll = Grid::zeros(15, NOTES_IN_MIDI);
        for i in 1..15 {
            pianoroll.set(i, 1, 100);
            pianoroll.set(i, i, 100);
        }
        let intervals = intervals_from_pianoroll(&pianoroll, &pianoroll).unwrap();

        let mut reference = Grid::zeros(15, NOTES_IN_MIDI);
        for i in 2..15 {
            reference.set(i, 1, 100);
        }

        let mut expected = Grid::zeros(15, NOTES_IN_MIDI);
        for i in 2..15 {
            expected.set(i, i, 100);
        }

        let actual = pianoroll_from_intervals(&reference, &intervals, 100).unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_silent_interval_doubles_the_anchor() {
        let reference = pianoroll_from_pitches(&[60, 60, 0], 100);
        let intervals =
            Grid::from_rows(vec![vec![0i8, 0, 0, 0], vec![3, 1, 0, 0], vec![3, 1, 0, 0]]).unwrap();
        let actual = pianoroll_from_intervals(&reference, &intervals, 80).unwrap();
        assert_eq!(actual.get(0, 60), 80);
        assert_eq!(actual.row(0).iter().filter(|&&v| v != 0).count(), 1);
        assert_eq!(actual.get(1, 64), 80);
        // A resting reference places nothing whatever the interval
        assert!(actual.row(2).iter().all(|&v| v == 0));
    }

    #[test]
    fn test_shape_errors() {
        let good: Pianoroll = Grid::zeros(1, NOTES_IN_MIDI);
        let narrow: Pianoroll = Grid::zeros(1, 1);
        let wide: Pianoroll = Grid::zeros(1, 150);
        for (reference, pianoroll) in [(&good, &narrow), (&good, &wide), (&narrow, &good)] {
            let err = intervals_from_pianoroll(reference, pianoroll).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::DimensionMismatch);
        }

        let longer: Pianoroll = Grid::zeros(2, NOTES_IN_MIDI);
        assert!(matches!(
            intervals_from_pianoroll(&longer, &good),
            Err(EmbeddingError::RowCountMismatch { expected: 1, actual: 2, .. })
        ));
    }

    #[test]
    fn test_decode_range_errors() {
        let reference = pianoroll_from_pitches(&[120], 100);
        let intervals = Grid::from_rows(vec![vec![1i8, 0, 0, 1]]).unwrap();
        assert!(matches!(
            pianoroll_from_intervals(&reference, &intervals, 100),
            Err(EmbeddingError::OutOfRange { name: "pitch", .. })
        ));
        assert!(matches!(
            pianoroll_from_intervals(&reference, &intervals, -1),
            Err(EmbeddingError::OutOfRange { name: "velocity", .. })
        ));
    }
}
