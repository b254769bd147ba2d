//! Terminal colours. Styling is decided once per output stream and is off
//! for pipes, `--json` and when `NO_COLOR` is set.

use std::env;
use std::io::IsTerminal;

use owo_colors::{OwoColorize, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn plain() -> Self {
        Self { enabled: false }
    }

    #[cfg(test)]
    pub fn colored() -> Self {
        Self { enabled: true }
    }

    /// Colour when `stream` is a terminal and `NO_COLOR` is unset or empty
    pub fn detect(stream: &impl IsTerminal) -> Self {
        let no_color = env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty());

        Self {
            enabled: stream.is_terminal() && !no_color,
        }
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.enabled {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn heading(&self, text: &str) -> String {
        self.paint(text, Style::new().cyan().bold())
    }

    pub fn title(&self, text: &str) -> String {
        self.paint(text, Style::new().bright_white().bold())
    }

    pub fn hours(&self, text: &str) -> String {
        self.paint(text, Style::new().green())
    }

    pub fn warning(&self, text: &str) -> String {
        self.paint(text, Style::new().yellow())
    }

    pub fn error(&self, text: &str) -> String {
        self.paint(text, Style::new().red().bold())
    }

    pub fn dim(&self, text: &str) -> String {
        self.paint(text, Style::new().dimmed())
    }
}
