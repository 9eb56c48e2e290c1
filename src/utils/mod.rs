mod multi_progress;
mod progress_style;

pub use multi_progress::MultiProgressSpinner;
pub use progress_style::ProgressStyleTemplate;
