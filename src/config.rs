use failure::Error;

use serde_derive::Deserialize;

use std::fs;
use std::path::Path;

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Keyboard {
  pub lowest: u8,
  pub highest: u8,
  pub white_key_width: f64,
  pub black_key_width: f64,
}

impl Default for Keyboard {
  fn default() -> Keyboard {
    Keyboard {
      lowest: 21,
      highest: 108,
      white_key_width: 24.0,
      black_key_width: 14.0,
    }
  }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Notes {
  /// Time a released note keeps animating before it is discarded
  pub decay: f64,
}

impl Default for Notes {
  fn default() -> Notes {
    Notes { decay: 0.5 }
  }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Config {
  pub keyboard: Keyboard,
  pub notes: Notes,
}

impl Config {
  pub fn from_file<P>(path: P) -> Result<Config, Error>
  where
    P: AsRef<Path>,
  {
    let content = fs::read_to_string(path)?;
    Config::from_str(&content)
  }

  pub fn from_str(content: &str) -> Result<Config, Error> {
    Ok(toml::from_str(content)?)
  }
}
