mod probe;
mod send;
mod settings_path;

pub use probe::run_probe;
pub use send::{run_send, SendArgs};
pub use settings_path::run_settings_path;
