//! Lead-voice extraction
//!
//! Picks the highest sounding pitch at every time step. Given the pianoroll
//! of an SATB choir this returns the soprano line.

use crate::error::Result;
use crate::models::{Pianoroll, NOTES_IN_MIDI};

/// Pitch reported for a step with no active lane.
///
/// This is also MIDI pitch 0 (C-1); a sounding C-1 is indistinguishable from
/// a rest.
pub const SILENT_PITCH: u8 = 0;

/// Highest active lane per step, `SILENT_PITCH` where nothing sounds
pub fn extract_lead_voice(pianoroll: &Pianoroll) -> Result<Vec<u8>> {
    pianoroll.expect_width("pianoroll", NOTES_IN_MIDI)?;
    Ok(pianoroll.iter_rows().map(highest_active_lane).collect())
}

/// Same result as [`extract_lead_voice`], but clips every cell of the grid to
/// 0/1 in place instead of leaving it untouched
pub fn extract_lead_voice_in_place(pianoroll: &mut Pianoroll) -> Result<Vec<u8>> {
    pianoroll.expect_width("pianoroll", NOTES_IN_MIDI)?;
    for cell in pianoroll.as_mut_slice() {
        *cell = (*cell).min(1);
    }
    Ok(pianoroll.iter_rows().map(highest_active_lane).collect())
}

fn highest_active_lane(row: &[u8]) -> u8 {
    row.iter()
        .rposition(|&velocity| velocity != 0)
        .map_or(SILENT_PITCH, |lane| lane as u8)
}
