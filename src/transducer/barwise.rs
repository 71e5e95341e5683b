//! Barwise intervals
//!
//! The timeline is cut into bars of `pixels_per_bar` steps. Notes inside a
//! bar are measured against the bar's first note; the first note of a bar is
//! measured against the first note of the previous non-empty bar. A trailing
//! partial bar is not encoded.

use crate::error::Result;
use crate::models::{Grid, Interval, IntervalSequence, Pianoroll, FEATURE_DIMENSIONS, NOTES_IN_MIDI};

use super::lead_voice::{extract_lead_voice, SILENT_PITCH};
use super::{check_leading_silence, check_midi, check_pixels};

pub fn intervals_from_pianoroll(
    pianoroll: &Pianoroll,
    pixels_per_bar: usize,
) -> Result<IntervalSequence> {
    pianoroll.expect_width("pianoroll", NOTES_IN_MIDI)?;
    check_pixels("pixels_per_bar", pixels_per_bar)?;

    let notes = extract_lead_voice(pianoroll)?;
    let mut intervals = Grid::zeros(notes.len(), FEATURE_DIMENSIONS);

    // The chain starts from the first sounded note of the whole piece
    let Some(&first_note) = notes.iter().find(|&&note| note != SILENT_PITCH) else {
        return Ok(intervals);
    };
    log::debug!(
        "barwise intervals: {} steps, {} pixels per bar",
        notes.len(),
        pixels_per_bar
    );

    let mut bar_reference = first_note;
    for (bar_number, bar) in notes.chunks_exact(pixels_per_bar).enumerate() {
        let bar_start = bar_number * pixels_per_bar;
        let Some(offset) = bar.iter().position(|&note| note != SILENT_PITCH) else {
            log::trace!("bar {} is empty", bar_number);
            continue;
        };

        let bar_origin = bar[offset];
        write_interval(&mut intervals, bar_start + offset, bar_origin, bar_reference);
        bar_reference = bar_origin;

        for (position, &note) in bar.iter().enumerate().skip(offset + 1) {
            if note != SILENT_PITCH {
                write_interval(&mut intervals, bar_start + position, note, bar_origin);
            }
        }
    }

    Ok(intervals)
}

fn write_interval(intervals: &mut IntervalSequence, step: usize, note: u8, reference: u8) {
    let semitones = i32::from(note) - i32::from(reference);
    intervals
        .row_mut(step)
        .copy_from_slice(&Interval::from_semitones(semitones).specs());
}

/// Rebuild a monophonic pianoroll from barwise intervals.
///
/// `origin` sounds at `leading_silence`. At every bar boundary the bar origin
/// becomes unknown; the first non-silent interval of the bar is applied to the
/// last known bar origin and establishes the new one.
pub fn pianoroll_from_intervals(
    intervals: &IntervalSequence,
    origin: i64,
    velocity: i64,
    leading_silence: usize,
    pixels_per_bar: usize,
) -> Result<Pianoroll> {
    check_pixels("pixels_per_bar", pixels_per_bar)?;
    intervals.expect_width("intervals", FEATURE_DIMENSIONS)?;
    check_leading_silence(leading_silence, intervals.rows())?;
    let origin = check_midi("origin", origin)?;
    let velocity = check_midi("velocity", velocity)?;

    log::debug!(
        "pianoroll from barwise intervals: {} steps, origin {}, {} pixels per bar",
        intervals.rows(),
        origin,
        pixels_per_bar
    );

    let mut pianoroll = Grid::zeros(intervals.rows(), NOTES_IN_MIDI);
    pianoroll.set(leading_silence, usize::from(origin), velocity);

    let mut last_known_origin = i64::from(origin);
    let mut origin_known = false;

    for step in leading_silence..intervals.rows() {
        if step % pixels_per_bar == 0 {
            origin_known = false;
        }
        let interval = Interval::from_specs(intervals.row(step))?;
        if interval.is_silence() {
            continue;
        }

        let pitch = if origin_known {
            last_known_origin + i64::from(interval.semitones())
        } else {
            last_known_origin += i64::from(interval.semitones());
            origin_known = true;
            last_known_origin
        };
        let lane = check_midi("pitch", pitch)?;
        pianoroll.set(step, usize::from(lane), velocity);
    }

    Ok(pianoroll)
}
