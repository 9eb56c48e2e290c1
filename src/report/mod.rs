pub mod console;
pub mod markdown;
mod palette;
