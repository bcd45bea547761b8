use log::debug;

use crate::config::Keyboard as KeyboardConfig;
use crate::dict::NoteDict;
use crate::error::NoteError;
use crate::note::{Note, NoteId};
use crate::pitch;

/// The keys displayed by a virtual keyboard, ordered by MIDI number.
#[derive(Debug, Clone)]
pub struct Keyboard {
  keys: Vec<Note>,
  white_key_width: f64,
}

impl Keyboard {
  pub fn new(config: &KeyboardConfig) -> Result<Keyboard, NoteError> {
    let lowest = pitch::check_midi(i64::from(config.lowest))?;
    let highest = pitch::check_midi(i64::from(config.highest))?;
    if lowest > highest {
      return Err(NoteError::InvalidRange { lowest, highest });
    }

    let mut keys = Vec::with_capacity(usize::from(highest - lowest) + 1);
    let mut white_index = 0u32;
    for (position, midi) in (lowest..=highest).enumerate() {
      let mut key = Note::from_midi(midi, position as u32)?;
      let left = f64::from(white_index) * config.white_key_width;
      if key.is_white {
        key.pos_x = Some(left);
        white_index += 1;
      } else {
        key.pos_x = Some((left - config.black_key_width / 2.0).max(0.0));
      }
      keys.push(key);
    }

    debug!(
      "Keyboard [{}, {}] with {} keys ({} white)",
      lowest,
      highest,
      keys.len(),
      white_index
    );

    Ok(Keyboard {
      keys,
      white_key_width: config.white_key_width,
    })
  }

  pub fn key(&self, midi: u8) -> Option<&Note> {
    let lowest = self.keys.first()?.midi;
    midi
      .checked_sub(lowest)
      .and_then(|index| self.keys.get(usize::from(index)))
  }

  pub fn keys(&self) -> &[Note] {
    self.keys.as_slice()
  }

  pub fn white_keys(&self) -> impl Iterator<Item = &Note> {
    self.keys.iter().filter(|key| key.is_white)
  }

  pub fn black_keys(&self) -> impl Iterator<Item = &Note> {
    self.keys.iter().filter(|key| !key.is_white)
  }

  pub fn len(&self) -> usize {
    self.keys.len()
  }

  pub fn is_empty(&self) -> bool {
    self.keys.is_empty()
  }

  pub fn width(&self) -> f64 {
    self.white_keys().count() as f64 * self.white_key_width
  }

  /// Starts a new tracked instance of the key at `midi` and returns its id.
  pub fn press(&self, midi: u8, time: f64, notes: &mut NoteDict) -> Result<NoteId, NoteError> {
    let mut note = self
      .key(midi)
      .cloned()
      .ok_or(NoteError::KeyOutOfRange { midi })?;
    note.id = None;
    note.press(time);
    Ok(notes.track(note))
  }
}
