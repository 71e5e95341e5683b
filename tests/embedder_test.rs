// Embedder session: operand caching and configuration defaults

use music_embedding::{
    Embedder, EmbedderConfig, EmbeddingError, ErrorKind, Grid, Pianoroll, NOTES_IN_MIDI,
};

fn satb() -> Pianoroll {
    // Soprano, alto, tenor, bass over four steps
    let voices: [[usize; 4]; 4] = [
        [72, 74, 76, 77],
        [67, 67, 69, 69],
        [64, 62, 60, 60],
        [48, 43, 45, 41],
    ];
    let mut pianoroll = Grid::zeros(4, NOTES_IN_MIDI);
    for voice in voices {
        for (step, lane) in voice.into_iter().enumerate() {
            pianoroll.set(step, lane, 100);
        }
    }
    pianoroll
}

#[test]
fn test_lead_voice_of_satb_is_soprano() {
    let mut embedder = Embedder::default();
    embedder.set_pianoroll(satb());
    assert_eq!(embedder.extract_lead_voice(true).unwrap(), vec![72, 74, 76, 77]);
}

#[test]
fn test_session_chains_operations() {
    let config = EmbedderConfig { origin: 72, pixels_per_bar: 2, ..Default::default() };
    let mut embedder = Embedder::new(config).expect("valid config");

    embedder
        .melodic_intervals_from_pianoroll(Some(satb()))
        .expect("melodic encode should succeed");

    // Chunk, compress and restore the cached intervals without passing them again
    let chunks = embedder.chunk(None, None).expect("chunking should succeed");
    assert_eq!(chunks.len(), 2);
    let compressed = embedder.compress_bulk(&chunks).unwrap();
    let restored = embedder.decompress_bulk(&compressed).unwrap();
    embedder.merge(&restored).unwrap();

    let soprano = embedder
        .pianoroll_from_melodic_intervals(None, None, Some(90), 0)
        .expect("melodic decode should succeed");
    assert_eq!(embedder.extract_lead_voice(true).unwrap(), vec![72, 74, 76, 77]);
    assert_eq!(soprano.get(0, 72), 90);
}

#[test]
fn test_errors_carry_kind_and_operand() {
    let mut embedder = Embedder::default();
    match embedder.barwise_intervals_from_pianoroll(None, None) {
        Err(EmbeddingError::MissingOperand(name)) => assert_eq!(name, "pianoroll"),
        other => panic!("expected a missing pianoroll, got {:?}", other),
    }

    let err = embedder
        .barwise_intervals_from_pianoroll(Some(satb()), Some(0))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
    // The rejected pianoroll was not cached
    assert!(embedder.pianoroll().is_none());
}

#[test]
fn test_config_from_json() {
    let config =
        EmbedderConfig::from_json(r#"{"default_velocity": 64, "pixels_per_bar": 48}"#).unwrap();
    let embedder = Embedder::new(config).unwrap();
    assert_eq!(embedder.config().default_velocity, 64);
    assert_eq!(embedder.config().origin, 60);
    assert_eq!(embedder.config().pixels_per_bar, 48);
}
