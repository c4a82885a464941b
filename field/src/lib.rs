mod field;
mod difficulty;
mod error;
mod reveal;

pub use difficulty::Difficulty;
pub use error::FieldError;
pub use field::{Cell, Coord, Field, State, MAX_CELLS, MINE};
pub use reveal::Reveal;
