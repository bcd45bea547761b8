use log::trace;
use serde_derive::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::NoteError;
use crate::pitch::{self, PitchClass};

pub type NoteId = String;

/// A musical note as shown by a keyboard or a piano-roll.
///
/// The pitch identity (`midi`, `position`, `octave`, `name`, `is_white`) is
/// always present. Everything else is playback or visual state that is filled
/// in and updated while the note is alive.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Note {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id: Option<NoteId>,

  #[serde(deserialize_with = "pitch::deserialize_midi")]
  pub midi: u8,
  pub position: u32,
  pub octave: i32,
  pub name: String,
  pub is_white: bool,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub pos_x: Option<f64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub start_pos_y: Option<f64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub end_pos_y: Option<f64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub height: Option<f64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub moving: Option<bool>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub duration: Option<f64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub time_start: Option<f64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub released: Option<bool>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub active: Option<bool>,
}

impl Note {
  pub fn new<T>(
    midi: u8,
    position: u32,
    octave: i32,
    name: T,
    is_white: bool,
  ) -> Result<Note, NoteError>
  where
    T: Into<String>,
  {
    let midi = pitch::check_midi(i64::from(midi))?;
    Ok(Note {
      id: None,
      midi,
      position,
      octave,
      name: name.into(),
      is_white,
      pos_x: None,
      start_pos_y: None,
      end_pos_y: None,
      height: None,
      moving: None,
      duration: None,
      time_start: None,
      released: None,
      active: None,
    })
  }

  /// Builds a note whose octave, name and key colour are derived from `midi`.
  pub fn from_midi(midi: u8, position: u32) -> Result<Note, NoteError> {
    let class = PitchClass::from_midi(midi);
    Note::new(
      midi,
      position,
      pitch::octave_of(midi),
      class.name(),
      class.is_white(),
    )
  }

  pub fn pitch(&self) -> Result<PitchClass, NoteError> {
    PitchClass::parse(&self.name)
  }

  pub fn validate(&self) -> Result<(), NoteError> {
    let midi = pitch::check_midi(i64::from(self.midi))?;
    let class = self.pitch()?;

    if class.is_white() != self.is_white {
      return Err(NoteError::KeyColorMismatch {
        name: self.name.clone(),
        is_white: self.is_white,
      });
    }

    if PitchClass::from_midi(midi) != class || pitch::octave_of(midi) != self.octave {
      return Err(NoteError::PitchMismatch {
        name: self.name.clone(),
        octave: self.octave,
        midi,
      });
    }

    self.check_finite()
  }

  fn check_finite(&self) -> Result<(), NoteError> {
    let fields = [
      ("posX", self.pos_x),
      ("startPosY", self.start_pos_y),
      ("endPosY", self.end_pos_y),
      ("height", self.height),
      ("duration", self.duration),
      ("timeStart", self.time_start),
    ];
    match fields
      .iter()
      .find(|(_field, value)| value.map_or(false, |value| !value.is_finite()))
    {
      Some((field, _value)) => Err(NoteError::NonFinite {
        field: (*field).to_string(),
      }),
      None => Ok(()),
    }
  }

  /// Assigns a fresh id unless the note already has one.
  pub fn track(&mut self) -> NoteId {
    if let Some(id) = self.id.as_ref() {
      return id.clone();
    }
    let id = Uuid::new_v4().to_string();
    trace!("Assigned id {} to {}{}", id, self.name, self.octave);
    self.id = Some(id.clone());
    id
  }

  pub fn press(&mut self, time_start: f64) {
    self.time_start = Some(time_start);
    self.duration = None;
    self.active = Some(true);
    self.released = Some(false);
    self.moving = Some(true);
  }

  pub fn release(&mut self, now: f64) {
    let duration = self
      .time_start
      .map_or(0.0, |time_start| (now - time_start).max(0.0));
    self.duration = Some(duration);
    self.active = Some(false);
    self.released = Some(true);
  }

  pub fn set_bar(&mut self, start_y: f64, end_y: f64) {
    self.start_pos_y = Some(start_y);
    self.end_pos_y = Some(end_y);
    self.height = Some((end_y - start_y).abs());
  }

  pub fn stop_moving(&mut self) {
    self.moving = Some(false);
  }

  pub fn is_sounding(&self) -> bool {
    self.active.unwrap_or(false) && !self.released.unwrap_or(false)
  }

  /// Whether the note has been released and its decay has run out by `now`.
  pub fn is_finished(&self, now: f64, decay: f64) -> bool {
    if !self.released.unwrap_or(false) {
      return false;
    }
    let end = self.time_start.unwrap_or(0.0) + self.duration.unwrap_or(0.0);
    end + decay <= now
  }
}
