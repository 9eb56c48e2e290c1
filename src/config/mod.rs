mod settings;

pub use settings::{AzureSettings, OutputSettings, Settings};
