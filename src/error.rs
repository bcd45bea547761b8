use failure::Fail;

use crate::note::NoteId;

#[derive(Debug, Fail, PartialEq)]
pub enum NoteError {
  #[fail(display = "MIDI note number out of range [0, 127]: {}", midi)]
  MidiOutOfRange { midi: i64 },

  #[fail(display = "Unknown pitch name: {:?}", name)]
  UnknownPitchName { name: String },

  #[fail(
    display = "Key colour mismatch for {}: isWhite = {}",
    name, is_white
  )]
  KeyColorMismatch { name: String, is_white: bool },

  #[fail(
    display = "Pitch {}{} does not match MIDI note {}",
    name, octave, midi
  )]
  PitchMismatch { name: String, octave: i32, midi: u8 },

  #[fail(display = "Non-finite value in {}", field)]
  NonFinite { field: String },

  #[fail(display = "Note stored under {:?} has id {:?}", key, id)]
  KeyMismatch { key: NoteId, id: NoteId },

  #[fail(display = "No live note with id {:?}", id)]
  UnknownNote { id: NoteId },

  #[fail(display = "MIDI note {} is not on the keyboard", midi)]
  KeyOutOfRange { midi: u8 },

  #[fail(display = "Invalid keyboard range: {} > {}", lowest, highest)]
  InvalidRange { lowest: u8, highest: u8 },

  #[fail(display = "Failed to handle JSON: {}", cause)]
  Json { cause: String },
}

impl From<serde_json::Error> for NoteError {
  fn from(err: serde_json::Error) -> NoteError {
    NoteError::Json {
      cause: err.to_string(),
    }
  }
}
