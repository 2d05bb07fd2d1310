mod header_bar;
mod input;
mod status_bar;

pub use header_bar::HeaderBar;
pub use input::TextInput;
pub use status_bar::{StatusBar, StatusLevel};
