//! Terminal rendering module for rich markdown output
//!
//! Renders the core's markdown through termimad, with a plain-text fallback
//! for `--no-color` and for piping output elsewhere.

use anyhow::Result;
use termimad::{MadSkin, crossterm::style::Color};

/// How a single markdown line is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineStyle {
    Header,
    Overdue,
    Text,
}

impl LineStyle {
    fn of(line: &str) -> Self {
        if line.starts_with('#') {
            LineStyle::Header
        } else if line.contains("**Overdue**") {
            LineStyle::Overdue
        } else {
            LineStyle::Text
        }
    }
}

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
    overdue_skin: MadSkin,
}

impl TerminalRenderer {
    /// Create a new terminal renderer
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Green);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        let mut overdue_skin = skin.clone();
        overdue_skin.bold.set_fg(Color::Red);

        Self {
            rich_enabled,
            skin,
            overdue_skin,
        }
    }

    /// Render markdown text to terminal
    pub fn render(&self, markdown: &str) -> Result<()> {
        if !self.rich_enabled {
            print!("{markdown}");
            return Ok(());
        }

        for line in markdown.lines() {
            match LineStyle::of(line) {
                // Headings keep their hashes.
                LineStyle::Header => print!("\x1b[32m{line}\x1b[0m"),
                LineStyle::Overdue => self.overdue_skin.print_inline(line),
                LineStyle::Text => self.skin.print_inline(line),
            }
            println!();
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}
