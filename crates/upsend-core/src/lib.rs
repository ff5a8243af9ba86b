pub mod error;
pub mod head_probe;
pub mod logging;
pub mod name_changer;
pub mod policy;
pub mod session;
pub mod settings;
pub mod source_file;
pub mod transfer;
