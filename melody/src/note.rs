//! Notes and melodies.

use rand::Rng;

use crate::scale::ScaleDegree;

/// Maximum number of notes a melody may carry.
pub const MAX_NOTES: usize = 24;

/// Duration substituted for missing or invalid note durations.
pub const DEFAULT_NOTE_DURATION: f64 = 0.4;

/// Degree sequence of the fallback melody.
pub const DEFAULT_MELODY_DEGREES: [u8; 12] = [1, 3, 5, 6, 5, 3, 1, 2, 4, 6, 5, 3];

/// A single playable tone.
///
/// The frequency is always the table value for the degree; there is no way
/// to construct a note whose frequency disagrees with its degree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    degree: ScaleDegree,
    frequency: f64,
    duration: f64,
}

impl Note {
    /// Creates a note. Non-finite or non-positive durations become
    /// [`DEFAULT_NOTE_DURATION`].
    pub fn new(degree: ScaleDegree, duration: f64) -> Self {
        let duration = if duration.is_finite() && duration > 0.0 {
            duration
        } else {
            DEFAULT_NOTE_DURATION
        };
        Self {
            degree,
            frequency: degree.frequency(),
            duration,
        }
    }

    /// Creates a note from a wire label; unknown labels resolve to Do.
    pub fn from_label(label: &str, duration: f64) -> Self {
        Self::new(ScaleDegree::from_label(label), duration)
    }

    pub fn degree(&self) -> ScaleDegree {
        self.degree
    }

    /// Frequency in Hz.
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Duration in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }
}

/// An ordered sequence of notes, at most [`MAX_NOTES`] long.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Melody {
    notes: Vec<Note>,
}

impl Melody {
    /// Creates a melody, truncating to [`MAX_NOTES`].
    pub fn new(mut notes: Vec<Note>) -> Self {
        notes.truncate(MAX_NOTES);
        Self { notes }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Note> {
        self.notes.iter()
    }

    /// Total playback time in seconds.
    pub fn total_duration(&self) -> f64 {
        self.notes.iter().map(|n| n.duration()).sum()
    }
}

impl<'a> IntoIterator for &'a Melody {
    type Item = &'a Note;
    type IntoIter = std::slice::Iter<'a, Note>;

    fn into_iter(self) -> Self::IntoIter {
        self.notes.iter()
    }
}

impl FromIterator<Note> for Melody {
    fn from_iter<I: IntoIterator<Item = Note>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// The hardcoded fallback melody.
///
/// Degrees 1,3,5,6,5,3,1,2,4,6,5,3 with durations drawn uniformly from
/// [0.3, 0.6).
pub fn default_melody() -> Melody {
    let mut rng = rand::thread_rng();
    DEFAULT_MELODY_DEGREES
        .iter()
        .map(|&d| Note::new(ScaleDegree::from_number(d), rng.gen_range(0.3..0.6)))
        .collect()
}
