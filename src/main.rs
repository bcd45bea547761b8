use std::fs::File;
use std::io::Read;

use log::{debug, info};

use failure::{Error, Fail};

use piano_notes::{codec, config::Config, Keyboard, NoteDict};

const PIANO_NOTES_CONFIG: &str = "PIANO_NOTES_CONFIG";
const DEFAULT_PIANO_NOTES_CONFIG: &str = "notes.toml";

const PIANO_NOTES_LOG_CONFIG: &str = "PIANO_NOTES_LOG_CONFIG";
const DEFAULT_PIANO_NOTES_LOG_CONFIG: &str = "log4rs.yaml";

#[derive(Debug, Fail)]
enum MainError {
  #[fail(display = "Failed to init logging: {}", cause)]
  LoggingInit { cause: String },

  #[fail(display = "Missing file argument for {}", command)]
  MissingArgument { command: String },

  #[fail(display = "Unknown command: {}", command)]
  UnknownCommand { command: String },
}

fn main() -> Result<(), Error> {
  init_logging()?;

  let config = init_config()?;

  let keyboard = init_keyboard(&config)?;

  let mut args = std::env::args().skip(1);
  let command = args.next().unwrap_or_else(|| "layout".to_string());

  match command.as_str() {
    "layout" => layout(&keyboard),
    "validate" => {
      let path = args
        .next()
        .ok_or_else(|| MainError::MissingArgument {
          command: command.clone(),
        })?;
      validate(path.as_str())
    }
    "demo" => demo(&keyboard, &config),
    _ => Err(MainError::UnknownCommand { command }.into()),
  }
}

fn init_logging() -> Result<(), Error> {
  let log_config_path = std::env::var(PIANO_NOTES_LOG_CONFIG)
    .unwrap_or_else(|_| DEFAULT_PIANO_NOTES_LOG_CONFIG.to_string());

  log4rs::init_file(log_config_path.as_str(), Default::default()).map_err(|err| {
    MainError::LoggingInit {
      cause: err.to_string(),
    }
  })?;

  Ok(())
}

fn init_config() -> Result<Config, Error> {
  let config_path =
    std::env::var(PIANO_NOTES_CONFIG).unwrap_or_else(|_| DEFAULT_PIANO_NOTES_CONFIG.to_string());

  info!("Loading notes configuration from {} ...", config_path);
  let config = Config::from_file(config_path.as_str())?;
  debug!("{:#?}", config);

  Ok(config)
}

fn init_keyboard(config: &Config) -> Result<Keyboard, Error> {
  info!("Initialising the keyboard ...");

  let keyboard = Keyboard::new(&config.keyboard)?;

  Ok(keyboard)
}

fn layout(keyboard: &Keyboard) -> Result<(), Error> {
  println!("{}", serde_json::to_string_pretty(keyboard.keys())?);
  Ok(())
}

fn validate(path: &str) -> Result<(), Error> {
  info!("Validating notes from {} ...", path);

  let mut content = String::new();
  File::open(path)?.read_to_string(&mut content)?;
  let notes = codec::dict_from_json(&content)?;

  println!("{}: {} notes OK", path, notes.len());
  Ok(())
}

fn demo(keyboard: &Keyboard, config: &Config) -> Result<(), Error> {
  let decay = config.notes.decay;
  let midi = keyboard
    .white_keys()
    .nth(keyboard.white_keys().count() / 2)
    .map(|key| key.midi)
    .unwrap_or(60);

  let mut notes = NoteDict::new();

  let id = keyboard.press(midi, 0.0, &mut notes)?;
  println!("pressed:\n{}", codec::dict_to_json_pretty(&notes)?);

  notes.release(&id, 1.0)?;
  println!("released:\n{}", codec::dict_to_json_pretty(&notes)?);

  let removed = notes.remove_finished(1.0 + decay, decay);
  info!("Discarded {} notes", removed.len());
  println!("finished:\n{}", codec::dict_to_json_pretty(&notes)?);

  Ok(())
}
