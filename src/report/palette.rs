use crossterm::style::Stylize;

/// Terminal highlighting that can be switched off as a whole.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn alert(&self, text: String) -> String {
        self.paint(text, |t| t.red().to_string())
    }

    pub fn ok(&self, text: String) -> String {
        self.paint(text, |t| t.green().to_string())
    }

    pub fn strong(&self, text: String) -> String {
        self.paint(text, |t| t.bold().to_string())
    }

    fn paint(&self, text: String, style: impl FnOnce(String) -> String) -> String {
        if self.enabled {
            style(text)
        } else {
            text
        }
    }
}
