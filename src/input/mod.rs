pub mod events;
pub mod handler;

pub use events::{InputEvent, KeyCode, MapAction};
pub use handler::InputHandler;
