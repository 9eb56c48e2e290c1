use crate::utils::ProgressStyleTemplate;
use indicatif::{MultiProgress, ProgressBar};
use std::time::Duration;

pub trait MultiProgressSpinner {
    /// Appends a ticking spinner line, one per analyzed sprint.
    fn add_spinner(&self, message: String) -> ProgressBar;
}

impl MultiProgressSpinner for MultiProgress {
    fn add_spinner(&self, message: String) -> ProgressBar {
        let pb = self.add(ProgressBar::new_spinner());
        pb.set_style(ProgressStyleTemplate::spinner());
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }
}
