pub mod room;

pub use room::{Block, Room};
