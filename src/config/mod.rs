mod settings;

pub use settings::{ClientSettings, LoggingSettings, Settings};
