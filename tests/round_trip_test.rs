// Round trips through the whole pipeline: pianoroll -> intervals -> chunks -> RLE and back

use music_embedding::compression::rle;
use music_embedding::transducer::{self, barwise, harmonic, melodic};
use music_embedding::{Grid, Pianoroll, FEATURE_DIMENSIONS, NOTES_IN_MIDI};

const PIXELS_PER_BAR: usize = 96;

/// Two bars of a wandering melody with a rest every seventh step
fn melody() -> Vec<u8> {
    (0..2 * PIXELS_PER_BAR)
        .map(|step| if step % 7 == 3 { 0 } else { 60 + ((step * 5) % 17) as u8 })
        .collect()
}

fn pianoroll_from_pitches(pitches: &[u8], velocity: u8) -> Pianoroll {
    let mut pianoroll = Grid::zeros(pitches.len(), NOTES_IN_MIDI);
    for (step, &pitch) in pitches.iter().enumerate() {
        if pitch != 0 {
            pianoroll.set(step, usize::from(pitch), velocity);
        }
    }
    pianoroll
}

#[test]
fn test_melodic_pipeline_round_trip() {
    let pitches = melody();
    let pianoroll = pianoroll_from_pitches(&pitches, 100);

    let intervals =
        melodic::intervals_from_pianoroll(&pianoroll).expect("melodic encode should succeed");
    assert_eq!(intervals.rows(), pianoroll.rows());
    assert_eq!(intervals.width(), FEATURE_DIMENSIONS);

    let chunks = transducer::chunk(&intervals, PIXELS_PER_BAR).expect("chunking should succeed");
    assert_eq!(chunks.len(), 2);

    let compressed = rle::compress_bulk(&chunks).expect("bulk compress should succeed");
    let decompressed = rle::decompress_bulk(&compressed).expect("bulk decompress should succeed");
    let merged = transducer::merge(&decompressed).expect("merge should succeed");
    assert_eq!(merged, intervals);

    let rebuilt = melodic::pianoroll_from_intervals(&merged, i64::from(pitches[0]), 100, 0)
        .expect("melodic decode should succeed");
    assert_eq!(rebuilt, pianoroll);
}

#[test]
fn test_barwise_pipeline_round_trip() {
    let pitches = melody();
    let pianoroll = pianoroll_from_pitches(&pitches, 100);

    let intervals = barwise::intervals_from_pianoroll(&pianoroll, PIXELS_PER_BAR)
        .expect("barwise encode should succeed");
    let compressed = rle::compress(&intervals).expect("compress should succeed");
    let decompressed = rle::decompress(&compressed).expect("decompress should succeed");

    let rebuilt = barwise::pianoroll_from_intervals(
        &decompressed,
        i64::from(pitches[0]),
        100,
        0,
        PIXELS_PER_BAR,
    )
    .expect("barwise decode should succeed");
    assert_eq!(transducer::extract_lead_voice(&rebuilt).unwrap(), pitches);
}

#[test]
fn test_harmonic_soprano_over_bass() {
    let soprano: Vec<u8> = melody().iter().map(|&p| if p == 0 { 0 } else { p + 12 }).collect();
    let bass: Vec<u8> = (0..soprano.len())
        .map(|step| if step % 11 == 0 { 0 } else { 48 })
        .collect();

    let soprano_roll = pianoroll_from_pitches(&soprano, 100);
    let bass_roll = pianoroll_from_pitches(&bass, 100);

    let intervals = harmonic::intervals_from_pianoroll(&bass_roll, &soprano_roll)
        .expect("harmonic encode should succeed");
    let rebuilt = harmonic::pianoroll_from_intervals(&bass_roll, &intervals, 100)
        .expect("harmonic decode should succeed");

    // Wherever the bass rests the soprano cannot be recovered; where the
    // soprano rests the silence interval doubles the bass
    let expected: Vec<u8> = soprano
        .iter()
        .zip(&bass)
        .map(|(&s, &b)| match (s, b) {
            (_, 0) => 0,
            (0, b) => b,
            (s, _) => s,
        })
        .collect();
    assert_eq!(transducer::extract_lead_voice(&rebuilt).unwrap(), expected);
}

#[test]
fn test_rle_shrinks_sustained_intervals() {
    // A long run of repeated notes encodes to unison after the first step
    let pianoroll = pianoroll_from_pitches(&[64; 96], 100);
    let intervals = melodic::intervals_from_pianoroll(&pianoroll).unwrap();
    let compressed = rle::compress(&intervals).unwrap();
    assert_eq!(
        compressed.to_rows(),
        vec![vec![0, 0, 0, 0, 1], vec![1, 0, 0, 0, 95]]
    );
}
