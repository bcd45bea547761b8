use std::collections::HashMap;

use log::debug;
use serde_derive::{Deserialize, Serialize};

use crate::error::NoteError;
use crate::note::{Note, NoteId};

/// Live notes indexed by id.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct NoteDict {
  notes: HashMap<NoteId, Note>,
}

impl NoteDict {
  pub fn new() -> NoteDict {
    NoteDict::default()
  }

  pub fn with_capacity(capacity: usize) -> NoteDict {
    NoteDict {
      notes: HashMap::with_capacity(capacity),
    }
  }

  pub fn get(&self, id: &str) -> Option<&Note> {
    self.notes.get(id)
  }

  pub fn get_mut(&mut self, id: &str) -> Option<&mut Note> {
    self.notes.get_mut(id)
  }

  pub fn contains(&self, id: &str) -> bool {
    self.notes.contains_key(id)
  }

  /// Adds or replaces the note at `id`. A note that already carries a
  /// different id is rejected.
  pub fn insert<T>(&mut self, id: T, note: Note) -> Result<Option<Note>, NoteError>
  where
    T: Into<NoteId>,
  {
    let id = id.into();
    if let Some(note_id) = note.id.as_ref() {
      if *note_id != id {
        return Err(NoteError::KeyMismatch {
          key: id,
          id: note_id.clone(),
        });
      }
    }
    Ok(self.notes.insert(id, note))
  }

  /// Inserts the note under its own id, assigning one first if needed.
  pub fn track(&mut self, mut note: Note) -> NoteId {
    let id = note.track();
    debug!("Tracking {}{} as {}", note.name, note.octave, id);
    self.notes.insert(id.clone(), note);
    id
  }

  pub fn remove(&mut self, id: &str) -> Option<Note> {
    self.notes.remove(id)
  }

  pub fn release(&mut self, id: &str, now: f64) -> Result<(), NoteError> {
    let note = self.notes.get_mut(id).ok_or_else(|| NoteError::UnknownNote {
      id: id.to_string(),
    })?;
    debug!("Releasing {} at {}", id, now);
    note.release(now);
    Ok(())
  }

  /// Discards the notes whose lifecycle is complete by `now` and returns them.
  pub fn remove_finished(&mut self, now: f64, decay: f64) -> Vec<Note> {
    let finished: Vec<NoteId> = self
      .notes
      .iter()
      .filter(|(_id, note)| note.is_finished(now, decay))
      .map(|(id, _note)| id.clone())
      .collect();

    finished
      .iter()
      .filter_map(|id| {
        debug!("Discarding finished note {}", id);
        self.notes.remove(id)
      })
      .collect()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&NoteId, &Note)> {
    self.notes.iter()
  }

  pub fn ids(&self) -> impl Iterator<Item = &NoteId> {
    self.notes.keys()
  }

  pub fn len(&self) -> usize {
    self.notes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.notes.is_empty()
  }

  pub fn validate(&self) -> Result<(), NoteError> {
    for (key, note) in self.notes.iter() {
      if let Some(id) = note.id.as_ref() {
        if id != key {
          return Err(NoteError::KeyMismatch {
            key: key.clone(),
            id: id.clone(),
          });
        }
      }
      note.validate()?;
    }
    Ok(())
  }
}

#[cfg(test)]
mod test {

  use super::NoteDict;
  use crate::error::NoteError;
  use crate::note::Note;

  fn middle_c() -> Note {
    Note::new(60, 0, 4, "C", true).unwrap()
  }

  #[test]
  /// A note inserted under an id is retrieved unchanged through that id
  pub fn insert_and_get() {
    let mut dict = NoteDict::new();
    let note = middle_c();
    assert_eq!(dict.insert("n1", note.clone()), Ok(None));
    assert_eq!(dict.get("n1"), Some(&note));
    assert_eq!(dict.get("n2"), None);
    assert!(dict.contains("n1"));
    assert_eq!(dict.len(), 1);
  }

  #[test]
  pub fn insert_replaces() {
    let mut dict = NoteDict::new();
    dict.insert("n1", middle_c()).unwrap();
    let d4 = Note::new(62, 2, 4, "D", true).unwrap();
    assert_eq!(dict.insert("n1", d4.clone()), Ok(Some(middle_c())));
    assert_eq!(dict.get("n1"), Some(&d4));
    assert_eq!(dict.len(), 1);
  }

  #[test]
  pub fn remove() {
    let mut dict = NoteDict::new();
    dict.insert("n1", middle_c()).unwrap();
    assert_eq!(dict.remove("n1"), Some(middle_c()));
    assert_eq!(dict.remove("n1"), None);
    assert!(dict.is_empty());
  }

  #[test]
  /// Tracked notes are stored under their own id
  pub fn track_keys_equal_ids() {
    let mut dict = NoteDict::new();
    let id1 = dict.track(middle_c());
    let id2 = dict.track(middle_c());
    assert_ne!(id1, id2);

    let mut named = middle_c();
    named.id = Some("n1".into());
    assert_eq!(dict.track(named), "n1");

    assert_eq!(dict.len(), 3);
    for (key, note) in dict.iter() {
      assert_eq!(note.id.as_ref(), Some(key));
    }
    assert_eq!(dict.validate(), Ok(()));
  }

  #[test]
  pub fn release() {
    let mut dict = NoteDict::new();
    let mut note = middle_c();
    note.press(1.0);
    let id = dict.track(note);

    dict.release(&id, 1.25).unwrap();
    let note = dict.get(&id).unwrap();
    assert_eq!(note.released, Some(true));
    assert_eq!(note.duration, Some(0.25));

    assert_eq!(
      dict.release("missing", 2.0),
      Err(NoteError::UnknownNote {
        id: "missing".into()
      })
    );
  }

  #[test]
  pub fn remove_finished() {
    let mut dict = NoteDict::new();

    let mut held = middle_c();
    held.press(0.0);
    let held_id = dict.track(held);

    let mut short = Note::new(64, 4, 4, "E", true).unwrap();
    short.press(0.0);
    let short_id = dict.track(short);
    dict.release(&short_id, 1.0).unwrap();

    assert!(dict.remove_finished(1.2, 0.5).is_empty());

    let removed = dict.remove_finished(1.5, 0.5);
    assert_eq!(removed.len(), 1);
    assert_eq!(removed[0].id.as_ref(), Some(&short_id));
    assert!(dict.contains(&held_id));
    assert!(!dict.contains(&short_id));
  }

  #[test]
  /// A note carrying another id cannot be stored, so the dict stays encodable
  pub fn insert_key_mismatch() {
    let mut dict = NoteDict::new();
    let mut note = middle_c();
    note.id = Some("n2".into());
    assert_eq!(
      dict.insert("n1", note.clone()),
      Err(NoteError::KeyMismatch {
        key: "n1".into(),
        id: "n2".into()
      })
    );
    assert!(dict.is_empty());

    assert_eq!(dict.insert("n2", note.clone()), Ok(None));
    assert_eq!(dict.get("n2"), Some(&note));
    assert_eq!(dict.validate(), Ok(()));
  }

  #[test]
  pub fn validate_key_mismatch() {
    let mut dict = NoteDict::new();
    dict.insert("n1", middle_c()).unwrap();
    dict.get_mut("n1").unwrap().id = Some("n2".into());
    assert_eq!(
      dict.validate(),
      Err(NoteError::KeyMismatch {
        key: "n1".into(),
        id: "n2".into()
      })
    );
  }

  #[test]
  pub fn validate_notes() {
    let mut dict = NoteDict::new();
    dict
      .insert("n1", Note::new(61, 1, 4, "C#", true).unwrap())
      .unwrap();
    assert!(dict.validate().is_err());
  }
}
