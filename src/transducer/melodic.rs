//! Melodic intervals
//!
//! Each sounded note is measured against the last sounded note before it.
//! The interval sequence has the same length as the pianoroll; row 0 has no
//! predecessor and is kept as a silent placeholder.

use crate::error::Result;
use crate::models::{Grid, Interval, IntervalSequence, Pianoroll, FEATURE_DIMENSIONS, NOTES_IN_MIDI};

use super::lead_voice::{extract_lead_voice, SILENT_PITCH};
use super::{check_leading_silence, check_midi};

/// Melodic intervals of the lead voice of `pianoroll`
pub fn intervals_from_pianoroll(pianoroll: &Pianoroll) -> Result<IntervalSequence> {
    let notes = extract_lead_voice(pianoroll)?;
    log::debug!("melodic intervals: {} steps", notes.len());
    Ok(intervals_from_notes(&notes))
}

/// Melodic intervals of a pitch sequence (`SILENT_PITCH` = rest).
///
/// The reference starts at step 0 even when step 0 is a rest, so the first
/// sounded note of a sequence that opens with a rest is measured from pitch 0.
pub fn intervals_from_notes(notes: &[u8]) -> IntervalSequence {
    let mut intervals = Grid::zeros(notes.len(), FEATURE_DIMENSIONS);
    let mut last_voiced = 0;

    for step in 1..notes.len() {
        if notes[step] == SILENT_PITCH {
            continue;
        }
        let semitones = i32::from(notes[step]) - i32::from(notes[last_voiced]);
        intervals
            .row_mut(step)
            .copy_from_slice(&Interval::from_semitones(semitones).specs());
        last_voiced = step;
    }

    intervals
}

/// Rebuild a monophonic pianoroll from melodic intervals.
///
/// `origin` sounds at step `leading_silence`; the intervals after it are
/// applied cumulatively. A row identical to the one before it reuses the
/// previous semitone delta.
pub fn pianoroll_from_intervals(
    intervals: &IntervalSequence,
    origin: i64,
    velocity: i64,
    leading_silence: usize,
) -> Result<Pianoroll> {
    intervals.expect_width("intervals", FEATURE_DIMENSIONS)?;
    check_leading_silence(leading_silence, intervals.rows())?;
    let origin = check_midi("origin", origin)?;
    let velocity = check_midi("velocity", velocity)?;

    log::debug!(
        "pianoroll from melodic intervals: {} steps, origin {}, leading silence {}",
        intervals.rows(),
        origin,
        leading_silence
    );

    let mut pianoroll = Grid::zeros(intervals.rows(), NOTES_IN_MIDI);
    pianoroll.set(leading_silence, usize::from(origin), velocity);

    let mut pitch = i64::from(origin);
    let mut delta = 0;
    let mut previous: Option<Interval> = None;

    for step in leading_silence + 1..intervals.rows() {
        let interval = Interval::from_specs(intervals.row(step))?;
        if !interval.is_silence() {
            if previous != Some(interval) {
                delta = interval.semitones();
            }
            pitch += i64::from(delta);
            let lane = check_midi("pitch", pitch)?;
            pianoroll.set(step, usize::from(lane), velocity);
        }
        previous = Some(interval);
    }

    Ok(pianoroll)
}
