//! Stateful embedding session
//!
//! [`Embedder`] wraps the pure transforms in [`crate::transducer`] and
//! [`crate::compression`] with an operand cache: grid arguments are optional,
//! an omitted one falls back to the last pianoroll or interval sequence the
//! session saw. Scalar arguments left as `None` come from the
//! [`EmbedderConfig`].
//!
//! The cache is only written after a call succeeds, so a failed call leaves
//! the session as it was.

use crate::compression::rle;
use crate::config::EmbedderConfig;
use crate::error::{EmbeddingError, Result};
use crate::models::{IntervalSequence, Pianoroll, RleSequence};
use crate::transducer::{self, barwise, harmonic, melodic};

#[derive(Debug, Clone, Default)]
pub struct Embedder {
    config: EmbedderConfig,
    pianoroll: Option<Pianoroll>,
    intervals: Option<IntervalSequence>,
}

impl Embedder {
    pub fn new(config: EmbedderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            pianoroll: None,
            intervals: None,
        })
    }

    pub fn config(&self) -> &EmbedderConfig {
        &self.config
    }

    /// Replace the configuration, keeping the cached operands
    pub fn set_config(&mut self, config: EmbedderConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Last pianoroll passed in or produced
    pub fn pianoroll(&self) -> Option<&Pianoroll> {
        self.pianoroll.as_ref()
    }

    /// Last interval sequence passed in or produced
    pub fn intervals(&self) -> Option<&IntervalSequence> {
        self.intervals.as_ref()
    }

    pub fn set_pianoroll(&mut self, pianoroll: Pianoroll) {
        self.pianoroll = Some(pianoroll);
    }

    pub fn set_intervals(&mut self, intervals: IntervalSequence) {
        self.intervals = Some(intervals);
    }

    /// Drop both cached grids
    pub fn clear(&mut self) {
        self.pianoroll = None;
        self.intervals = None;
    }

    // ============================================================================
    // Operand resolution
    // ============================================================================

    fn resolve_pianoroll<'a>(&'a self, pianoroll: Option<&'a Pianoroll>) -> Result<&'a Pianoroll> {
        pianoroll
            .or(self.pianoroll.as_ref())
            .ok_or(EmbeddingError::MissingOperand("pianoroll"))
    }

    fn resolve_intervals<'a>(
        &'a self,
        intervals: Option<&'a IntervalSequence>,
    ) -> Result<&'a IntervalSequence> {
        intervals
            .or(self.intervals.as_ref())
            .ok_or(EmbeddingError::MissingOperand("intervals"))
    }

    fn origin(&self, origin: Option<i64>) -> i64 {
        origin.unwrap_or_else(|| i64::from(self.config.origin))
    }

    fn velocity(&self, velocity: Option<i64>) -> i64 {
        velocity.unwrap_or_else(|| i64::from(self.config.default_velocity))
    }

    fn pixels_per_bar(&self, pixels_per_bar: Option<usize>) -> usize {
        pixels_per_bar.unwrap_or(self.config.pixels_per_bar)
    }

    // ============================================================================
    // Lead voice
    // ============================================================================

    /// Highest sounding pitch of the cached pianoroll at every step.
    ///
    /// With `preserve_input == false` the cached pianoroll is binarised
    /// (velocities clipped to 0/1) as a side effect.
    pub fn extract_lead_voice(&mut self, preserve_input: bool) -> Result<Vec<u8>> {
        let pianoroll = self
            .pianoroll
            .as_mut()
            .ok_or(EmbeddingError::MissingOperand("pianoroll"))?;
        if preserve_input {
            transducer::extract_lead_voice(pianoroll)
        } else {
            transducer::extract_lead_voice_in_place(pianoroll)
        }
    }

    // ============================================================================
    // Melodic
    // ============================================================================

    pub fn melodic_intervals_from_pianoroll(
        &mut self,
        pianoroll: Option<Pianoroll>,
    ) -> Result<IntervalSequence> {
        let intervals =
            melodic::intervals_from_pianoroll(self.resolve_pianoroll(pianoroll.as_ref())?)?;
        self.remember(pianoroll, Some(intervals.clone()));
        Ok(intervals)
    }

    pub fn pianoroll_from_melodic_intervals(
        &mut self,
        intervals: Option<IntervalSequence>,
        origin: Option<i64>,
        velocity: Option<i64>,
        leading_silence: usize,
    ) -> Result<Pianoroll> {
        let pianoroll = melodic::pianoroll_from_intervals(
            self.resolve_intervals(intervals.as_ref())?,
            self.origin(origin),
            self.velocity(velocity),
            leading_silence,
        )?;
        self.remember(Some(pianoroll.clone()), intervals);
        Ok(pianoroll)
    }

    // ============================================================================
    // Harmonic
    // ============================================================================

    /// Harmonic intervals of the lead voice of `pianoroll` (or the cached one)
    /// against `reference`
    pub fn harmonic_intervals_from_pianoroll(
        &mut self,
        reference: &Pianoroll,
        pianoroll: Option<Pianoroll>,
    ) -> Result<IntervalSequence> {
        let intervals = harmonic::intervals_from_pianoroll(
            reference,
            self.resolve_pianoroll(pianoroll.as_ref())?,
        )?;
        self.remember(pianoroll, Some(intervals.clone()));
        Ok(intervals)
    }

    /// Rebuild a voice on top of `reference` (or the cached pianoroll)
    pub fn pianoroll_from_harmonic_intervals(
        &mut self,
        reference: Option<Pianoroll>,
        intervals: Option<IntervalSequence>,
        velocity: Option<i64>,
    ) -> Result<Pianoroll> {
        let pianoroll = harmonic::pianoroll_from_intervals(
            self.resolve_pianoroll(reference.as_ref())?,
            self.resolve_intervals(intervals.as_ref())?,
            self.velocity(velocity),
        )?;
        self.remember(Some(pianoroll.clone()), intervals);
        Ok(pianoroll)
    }

    // ============================================================================
    // Barwise
    // ============================================================================

    pub fn barwise_intervals_from_pianoroll(
        &mut self,
        pianoroll: Option<Pianoroll>,
        pixels_per_bar: Option<usize>,
    ) -> Result<IntervalSequence> {
        let intervals = barwise::intervals_from_pianoroll(
            self.resolve_pianoroll(pianoroll.as_ref())?,
            self.pixels_per_bar(pixels_per_bar),
        )?;
        self.remember(pianoroll, Some(intervals.clone()));
        Ok(intervals)
    }

    pub fn pianoroll_from_barwise_intervals(
        &mut self,
        intervals: Option<IntervalSequence>,
        origin: Option<i64>,
        velocity: Option<i64>,
        leading_silence: usize,
        pixels_per_bar: Option<usize>,
    ) -> Result<Pianoroll> {
        let pianoroll = barwise::pianoroll_from_intervals(
            self.resolve_intervals(intervals.as_ref())?,
            self.origin(origin),
            self.velocity(velocity),
            leading_silence,
            self.pixels_per_bar(pixels_per_bar),
        )?;
        self.remember(Some(pianoroll.clone()), intervals);
        Ok(pianoroll)
    }

    // ============================================================================
    // Chunking
    // ============================================================================

    /// Split `intervals` (or the cached sequence) into chunks of
    /// `pixels_per_chunk` rows, one bar by default
    pub fn chunk(
        &self,
        intervals: Option<&IntervalSequence>,
        pixels_per_chunk: Option<usize>,
    ) -> Result<Vec<IntervalSequence>> {
        transducer::chunk(
            self.resolve_intervals(intervals)?,
            self.pixels_per_bar(pixels_per_chunk),
        )
    }

    /// Concatenate chunks; the result becomes the cached sequence
    pub fn merge(&mut self, chunks: &[IntervalSequence]) -> Result<IntervalSequence> {
        let intervals = transducer::merge(chunks)?;
        self.intervals = Some(intervals.clone());
        Ok(intervals)
    }

    // ============================================================================
    // RLE
    // ============================================================================

    pub fn compress(&mut self, intervals: Option<IntervalSequence>) -> Result<RleSequence> {
        let rle = rle::compress(self.resolve_intervals(intervals.as_ref())?)?;
        self.remember(None, intervals);
        Ok(rle)
    }

    /// Expand `rle`; the result becomes the cached sequence
    pub fn decompress(&mut self, rle: &RleSequence) -> Result<IntervalSequence> {
        let intervals = rle::decompress(rle)?;
        self.intervals = Some(intervals.clone());
        Ok(intervals)
    }

    /// Bulk variants leave the cache untouched
    pub fn compress_bulk(&self, batch: &[IntervalSequence]) -> Result<Vec<RleSequence>> {
        rle::compress_bulk(batch)
    }

    pub fn decompress_bulk(&self, batch: &[RleSequence]) -> Result<Vec<IntervalSequence>> {
        rle::decompress_bulk(batch)
    }

    fn remember(&mut self, pianoroll: Option<Pianoroll>, intervals: Option<IntervalSequence>) {
        if let Some(pianoroll) = pianoroll {
            self.pianoroll = Some(pianoroll);
        }
        if let Some(intervals) = intervals {
            self.intervals = Some(intervals);
        }
    }
}
