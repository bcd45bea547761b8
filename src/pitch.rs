use std::fmt;

use serde::de::{Deserialize, Deserializer, Error};

use crate::error::NoteError;

pub const MIDI_MIN: u8 = 0;
pub const MIDI_MAX: u8 = 127;

pub const SEMITONES_PER_OCTAVE: u8 = 12;

// MIDI 60 is C4
const MIDI_OCTAVE_OFFSET: i32 = 1;

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum PitchClass {
  C,
  CSharp,
  D,
  DSharp,
  E,
  F,
  FSharp,
  G,
  GSharp,
  A,
  ASharp,
  B,
}

const PITCH_CLASSES: [PitchClass; 12] = [
  PitchClass::C,
  PitchClass::CSharp,
  PitchClass::D,
  PitchClass::DSharp,
  PitchClass::E,
  PitchClass::F,
  PitchClass::FSharp,
  PitchClass::G,
  PitchClass::GSharp,
  PitchClass::A,
  PitchClass::ASharp,
  PitchClass::B,
];

impl PitchClass {
  pub fn from_midi(midi: u8) -> PitchClass {
    PITCH_CLASSES[usize::from(midi % SEMITONES_PER_OCTAVE)]
  }

  /// Parses a pitch name such as `"C"`, `"D#"` or `"Eb"`.
  pub fn parse(name: &str) -> Result<PitchClass, NoteError> {
    let unknown = || NoteError::UnknownPitchName {
      name: name.to_string(),
    };

    let mut chars = name.chars();
    let natural = match chars.next() {
      Some('C') => 0,
      Some('D') => 2,
      Some('E') => 4,
      Some('F') => 5,
      Some('G') => 7,
      Some('A') => 9,
      Some('B') => 11,
      _ => return Err(unknown()),
    };

    let shift: i32 = match chars.as_str() {
      "" => 0,
      "#" => 1,
      "b" => -1,
      _ => return Err(unknown()),
    };

    let semitones = i32::from(SEMITONES_PER_OCTAVE);
    let index = (natural + shift + semitones) % semitones;
    Ok(PITCH_CLASSES[index as usize])
  }

  pub fn semitone(self) -> u8 {
    self as u8
  }

  pub fn name(self) -> &'static str {
    match self {
      PitchClass::C => "C",
      PitchClass::CSharp => "C#",
      PitchClass::D => "D",
      PitchClass::DSharp => "D#",
      PitchClass::E => "E",
      PitchClass::F => "F",
      PitchClass::FSharp => "F#",
      PitchClass::G => "G",
      PitchClass::GSharp => "G#",
      PitchClass::A => "A",
      PitchClass::ASharp => "A#",
      PitchClass::B => "B",
    }
  }

  pub fn is_white(self) -> bool {
    match self {
      PitchClass::CSharp
      | PitchClass::DSharp
      | PitchClass::FSharp
      | PitchClass::GSharp
      | PitchClass::ASharp => false,
      _ => true,
    }
  }
}

impl fmt::Display for PitchClass {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str(self.name())
  }
}

pub fn octave_of(midi: u8) -> i32 {
  i32::from(midi / SEMITONES_PER_OCTAVE) - MIDI_OCTAVE_OFFSET
}

pub fn midi_of(pitch: PitchClass, octave: i32) -> Result<u8, NoteError> {
  let midi = (i64::from(octave) + i64::from(MIDI_OCTAVE_OFFSET)) * i64::from(SEMITONES_PER_OCTAVE)
    + i64::from(pitch.semitone());
  check_midi(midi)
}

pub fn check_midi(value: i64) -> Result<u8, NoteError> {
  if value < i64::from(MIDI_MIN) || value > i64::from(MIDI_MAX) {
    Err(NoteError::MidiOutOfRange { midi: value })
  } else {
    Ok(value as u8)
  }
}

/// Deserializes a MIDI note number, rejecting values outside [0, 127].
pub fn deserialize_midi<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
  D: Deserializer<'de>,
{
  let value = i64::deserialize(deserializer)?;
  check_midi(value).map_err(D::Error::custom)
}
