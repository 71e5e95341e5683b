//! Music-theoretic interval descriptors
//!
//! An interval is stored as four small integers:
//! `[order, type, is_descending, octave_offset]`.
//!
//! - `order`: 1 = unison .. 7 = seventh, 0 is reserved for silence
//! - `type`: -2 dim, -1 min, 0 perfect, 1 Maj, 2 Aug
//! - `is_descending`: 0 or 1
//! - `octave_offset`: whole octaves on top of the simple interval, 0..=9
//!
//! `[0, 0, 0, 0]` is the silence sentinel. Conversion from a signed semitone
//! distance goes through the 12-entry Q-table below; the reverse direction
//! uses a 7×5 table covering every (order, type) pair.

use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};
use std::fmt;

use crate::error::{EmbeddingError, Result};
use crate::models::grid::FEATURE_DIMENSIONS;

/// Interval quality, stored as its signed integer code
#[repr(i8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
pub enum IntervalType {
    Diminished = -2,
    Minor = -1,
    Perfect = 0,
    Major = 1,
    Augmented = 2,
}

impl IntervalType {
    pub const ALL: [IntervalType; 5] = [
        IntervalType::Diminished,
        IntervalType::Minor,
        IntervalType::Perfect,
        IntervalType::Major,
        IntervalType::Augmented,
    ];

    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|t| i64::from(t.code()) == code)
    }

    pub fn code(self) -> i8 {
        self as i8
    }

    /// Position in a 5-wide one-hot vector
    pub fn index(self) -> usize {
        (self.code() + 2) as usize
    }

    /// Word used by [`Interval::name`]
    pub fn word(self) -> &'static str {
        match self {
            IntervalType::Diminished => "dim",
            IntervalType::Minor => "min",
            IntervalType::Perfect => "perfect",
            IntervalType::Major => "Maj",
            IntervalType::Augmented => "Aug",
        }
    }
}

/// Semitone remainder (0..12) → (order, type)
const Q_TABLE: [(u8, IntervalType); 12] = [
    (1, IntervalType::Perfect),    // 0: perfect 1st
    (2, IntervalType::Minor),      // 1: min 2nd
    (2, IntervalType::Major),      // 2: Maj 2nd
    (3, IntervalType::Minor),      // 3: min 3rd
    (3, IntervalType::Major),      // 4: Maj 3rd
    (4, IntervalType::Perfect),    // 5: perfect 4th
    (5, IntervalType::Diminished), // 6: dim 5th
    (5, IntervalType::Perfect),    // 7: perfect 5th
    (6, IntervalType::Minor),      // 8: min 6th
    (6, IntervalType::Major),      // 9: Maj 6th
    (7, IntervalType::Minor),      // 10: min 7th
    (7, IntervalType::Major),      // 11: Maj 7th
];

/// (order - 1, type + 2) → semitones within one octave.
/// Perfect on 2/3/6/7 reads as Major; min/Maj on 1/4/5 read as perfect.
const SEMITONE_TABLE: [[i32; 5]; 7] = [
    // dim min perf Maj Aug
    [-1, 0, 0, 0, 1],  // 1st
    [0, 1, 2, 2, 3],   // 2nd
    [2, 3, 4, 4, 5],   // 3rd
    [4, 5, 5, 5, 6],   // 4th
    [6, 7, 7, 7, 8],   // 5th
    [7, 8, 9, 9, 10],  // 6th
    [9, 10, 11, 11, 12], // 7th
];

pub const ORDER_RANGE: (i64, i64) = (0, 7);
pub const TYPE_RANGE: (i64, i64) = (-2, 2);
pub const DESCENDING_RANGE: (i64, i64) = (0, 1);
pub const OCTAVE_RANGE: (i64, i64) = (0, 9);

/// A validated interval descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "IntervalSpecs", into = "IntervalSpecs")]
pub struct Interval {
    order: u8,
    interval_type: IntervalType,
    is_descending: bool,
    octave_offset: u8,
}

/// Named-field form of a descriptor, as exchanged with JSON / JavaScript
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalSpecs {
    pub interval_order: i64,
    pub interval_type: i64,
    pub is_descending: i64,
    pub octave_offset: i64,
}

impl TryFrom<IntervalSpecs> for Interval {
    type Error = EmbeddingError;

    fn try_from(specs: IntervalSpecs) -> Result<Self> {
        Interval::new(
            specs.interval_order,
            specs.interval_type,
            specs.is_descending,
            specs.octave_offset,
        )
    }
}

impl From<Interval> for IntervalSpecs {
    fn from(interval: Interval) -> Self {
        let [order, interval_type, is_descending, octave_offset] = interval.specs();
        IntervalSpecs {
            interval_order: order.into(),
            interval_type: interval_type.into(),
            is_descending: is_descending.into(),
            octave_offset: octave_offset.into(),
        }
    }
}

impl Default for Interval {
    /// Perfect unison, ascending
    fn default() -> Self {
        Interval {
            order: 1,
            interval_type: IntervalType::Perfect,
            is_descending: false,
            octave_offset: 0,
        }
    }
}

impl Interval {
    /// Build a descriptor, validating every field against its inclusive range
    pub fn new(
        order: i64,
        interval_type: i64,
        is_descending: i64,
        octave_offset: i64,
    ) -> Result<Self> {
        EmbeddingError::check_range("interval_order", order, ORDER_RANGE.0, ORDER_RANGE.1)?;
        EmbeddingError::check_range("interval_type", interval_type, TYPE_RANGE.0, TYPE_RANGE.1)?;
        EmbeddingError::check_range(
            "is_descending",
            is_descending,
            DESCENDING_RANGE.0,
            DESCENDING_RANGE.1,
        )?;
        EmbeddingError::check_range(
            "octave_offset",
            octave_offset,
            OCTAVE_RANGE.0,
            OCTAVE_RANGE.1,
        )?;

        let interval_type =
            IntervalType::from_code(interval_type).ok_or(EmbeddingError::OutOfRange {
                name: "interval_type",
                value: interval_type,
                min: TYPE_RANGE.0,
                max: TYPE_RANGE.1,
            })?;

        Ok(Interval {
            order: order as u8,
            interval_type,
            is_descending: is_descending == 1,
            octave_offset: octave_offset as u8,
        })
    }

    /// Build a descriptor from a `[order, type, is_descending, octave_offset]` row
    pub fn from_specs<T: Copy + Into<i64>>(specs: &[T]) -> Result<Self> {
        if specs.len() != FEATURE_DIMENSIONS {
            return Err(EmbeddingError::DimensionMismatch {
                grid: "intervals",
                expected: FEATURE_DIMENSIONS,
                actual: specs.len(),
            });
        }
        Interval::new(specs[0].into(), specs[1].into(), specs[2].into(), specs[3].into())
    }

    /// The silence sentinel `[0, 0, 0, 0]`
    pub const fn silence() -> Self {
        Interval {
            order: 0,
            interval_type: IntervalType::Perfect,
            is_descending: false,
            octave_offset: 0,
        }
    }

    /// Decompose a signed semitone distance using the Q-table.
    ///
    /// Accepts any integer. Octave counts that do not fit a `u8` saturate.
    pub fn from_semitones(semitones: i32) -> Self {
        let magnitude = semitones.unsigned_abs();
        let (order, interval_type) = Q_TABLE[(magnitude % 12) as usize];
        Interval {
            order,
            interval_type,
            is_descending: semitones < 0,
            octave_offset: u8::try_from(magnitude / 12).unwrap_or(u8::MAX),
        }
    }

    /// Signed distance in semitones
    pub fn semitones(&self) -> i32 {
        let base = match self.order {
            0 => 0,
            order => SEMITONE_TABLE[usize::from(order) - 1][self.interval_type.index()],
        };
        let semitones = base + i32::from(self.octave_offset) * 12;
        if self.is_descending {
            -semitones
        } else {
            semitones
        }
    }

    pub fn is_silence(&self) -> bool {
        *self == Interval::silence()
    }

    pub fn order(&self) -> u8 {
        self.order
    }

    pub fn interval_type(&self) -> IntervalType {
        self.interval_type
    }

    pub fn is_descending(&self) -> bool {
        self.is_descending
    }

    pub fn octave_offset(&self) -> u8 {
        self.octave_offset
    }

    /// The descriptor as a grid row
    pub fn specs(&self) -> [i8; FEATURE_DIMENSIONS] {
        [
            self.order as i8,
            self.interval_type.code(),
            i8::from(self.is_descending),
            i8::try_from(self.octave_offset).unwrap_or(i8::MAX),
        ]
    }

    /// Replace all four fields. Nothing changes when validation fails.
    pub fn set_specs<T: Copy + Into<i64>>(&mut self, specs: &[T]) -> Result<()> {
        *self = Interval::from_specs(specs)?;
        Ok(())
    }

    pub fn to_one_hot(&self) -> OneHotInterval {
        let mut interval_order = [0u8; 7];
        if self.order > 0 {
            interval_order[usize::from(self.order) - 1] = 1;
        }
        let mut interval_type = [0u8; 5];
        interval_type[self.interval_type.index()] = 1;
        OneHotInterval {
            interval_order,
            interval_type,
            is_descending: u8::from(self.is_descending),
            octave_offset: self.octave_offset,
        }
    }

    /// Rebuild from indicator vectors (argmax picks the index).
    ///
    /// An all-zero order vector decodes to order 0, so silence survives the
    /// round trip. Indicators may be scores or probabilities.
    pub fn from_one_hot<T: PartialOrd + Copy + Default>(
        interval_order: &[T],
        interval_type: &[T],
        is_descending: i64,
        octave_offset: i64,
    ) -> Result<Self> {
        if interval_order.len() != 7 {
            return Err(EmbeddingError::DimensionMismatch {
                grid: "one-hot interval_order",
                expected: 7,
                actual: interval_order.len(),
            });
        }
        if interval_type.len() != 5 {
            return Err(EmbeddingError::DimensionMismatch {
                grid: "one-hot interval_type",
                expected: 5,
                actual: interval_type.len(),
            });
        }

        let order = if interval_order.iter().all(|v| *v == T::default()) {
            0
        } else {
            argmax(interval_order) as i64 + 1
        };
        let quality = argmax(interval_type) as i64 - 2;

        Interval::new(order, quality, is_descending, octave_offset)
    }

    /// Human-readable name, e.g. "Descending min 2nd" or "perfect 8th"
    pub fn name(&self) -> String {
        if self.is_silence() {
            return "Silence".to_string();
        }

        let mut output = String::new();
        if self.is_descending {
            output.push_str("Descending ");
        }
        output.push_str(self.interval_type.word());
        output.push(' ');
        output.push_str(&ordinal(u32::from(self.order) + u32::from(self.octave_offset) * 7));
        output
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// One-hot view: order and type as indicator vectors, the rest scalar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneHotInterval {
    pub interval_order: [u8; 7],
    pub interval_type: [u8; 5],
    pub is_descending: u8,
    pub octave_offset: u8,
}

impl OneHotInterval {
    pub fn decode(&self) -> Result<Interval> {
        Interval::from_one_hot(
            &self.interval_order,
            &self.interval_type,
            self.is_descending.into(),
            self.octave_offset.into(),
        )
    }
}

/// First index of the maximum value
fn argmax<T: PartialOrd + Copy>(values: &[T]) -> usize {
    let mut best = 0;
    for (i, value) in values.iter().enumerate().skip(1) {
        if *value > values[best] {
            best = i;
        }
    }
    best
}

/// 1 → "1st", 12 → "12th", 22 → "22nd", 113 → "113th"
fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n / 10 % 10) {
        (_, 1) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

// ============================================================================
// Free-function forms
// ============================================================================

pub fn semitone_to_interval(semitones: i32) -> Interval {
    Interval::from_semitones(semitones)
}

/// Validate a raw descriptor row and return its semitone distance
pub fn interval_to_semitone<T: Copy + Into<i64>>(specs: &[T]) -> Result<i32> {
    Ok(Interval::from_specs(specs)?.semitones())
}

pub fn silence_specs() -> [i8; FEATURE_DIMENSIONS] {
    Interval::silence().specs()
}

/// True when a raw row equals the silence sentinel
pub fn is_silence_row<T: Copy + Into<i64>>(row: &[T]) -> bool {
    row.len() == FEATURE_DIMENSIONS && row.iter().all(|&v| v.into() == 0)
}

/// Name of the interval spanning `semitones`
pub fn interval_name(semitones: i32) -> String {
    Interval::from_semitones(semitones).name()
}
