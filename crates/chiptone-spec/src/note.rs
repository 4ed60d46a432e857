//! Equal-tempered pitch mapping.

use serde::{Deserialize, Serialize};

/// Reference pitch index (A4).
pub const REFERENCE_NOTE: u8 = 69;

/// Reference frequency for [`REFERENCE_NOTE`], in Hz.
pub const REFERENCE_FREQUENCY: f64 = 440.0;

/// Highest note index in the MIDI range.
pub const MAX_NOTE: u8 = 127;

/// A pitch index on the 12-tone equal-tempered scale (MIDI numbering).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Note(pub u8);

impl Note {
    /// Middle C.
    pub const C4: Note = Note(60);
    /// Concert A.
    pub const A4: Note = Note(REFERENCE_NOTE);

    /// Frequency of this note in Hz.
    pub fn frequency(self) -> f64 {
        midi_to_frequency(self.0)
    }
}

impl From<u8> for Note {
    fn from(value: u8) -> Self {
        Note(value)
    }
}

/// Converts a note index to frequency in Hz (A4 = 440 Hz).
pub fn midi_to_frequency(midi_note: u8) -> f64 {
    REFERENCE_FREQUENCY * 2.0_f64.powf((midi_note as f64 - REFERENCE_NOTE as f64) / 12.0)
}
