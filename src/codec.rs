//! JSON wire format for notes and note dictionaries.
//!
//! Encoding never validates, decoding always does: a decoded value satisfies
//! the same invariants as one built through the typed API.

use crate::dict::NoteDict;
use crate::error::NoteError;
use crate::note::Note;

pub fn note_to_json(note: &Note) -> Result<String, NoteError> {
  Ok(serde_json::to_string(note)?)
}

pub fn note_from_json(json: &str) -> Result<Note, NoteError> {
  let note: Note = serde_json::from_str(json)?;
  note.validate()?;
  Ok(note)
}

pub fn dict_to_json(notes: &NoteDict) -> Result<String, NoteError> {
  Ok(serde_json::to_string(notes)?)
}

pub fn dict_to_json_pretty(notes: &NoteDict) -> Result<String, NoteError> {
  Ok(serde_json::to_string_pretty(notes)?)
}

pub fn dict_from_json(json: &str) -> Result<NoteDict, NoteError> {
  let notes: NoteDict = serde_json::from_str(json)?;
  notes.validate()?;
  Ok(notes)
}
