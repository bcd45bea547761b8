pub mod codec;
pub mod config;
pub mod dict;
pub mod error;
pub mod keyboard;
pub mod note;
pub mod pitch;
pub mod todo;

pub use crate::dict::NoteDict;
pub use crate::error::NoteError;
pub use crate::keyboard::Keyboard;
pub use crate::note::{Note, NoteId};
pub use crate::pitch::PitchClass;
