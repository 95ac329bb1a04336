use cmdbox_core::command::CommandExecutor;
use tracing::{debug, info};
use unicode_segmentation::UnicodeSegmentation;

use super::{App, LineKind};

impl App {
    /// Commit the box contents: drop the draft slot, snap back to the tail,
    /// record the line, open a fresh draft, then run the command.
    pub fn submit(&mut self) {
        let text = self.input.clone();
        if text.is_empty() {
            return;
        }

        self.history.pop();
        self.history.restore();
        self.history.push(text.clone());
        self.history.push(String::new());
        self.show_text(String::new());
        self.output_scroll = 0;

        self.run_command(&text);
    }

    pub fn history_back(&mut self) {
        let text = self.history.back().clone();
        debug!(target: "tui", "history back -> {}", self.history.cursor());
        self.show_text(text);
    }

    pub fn history_forward(&mut self) {
        let text = self.history.forward().clone();
        debug!(target: "tui", "history forward -> {}", self.history.cursor());
        self.show_text(text);
    }

    // Replaces the box contents without recording an edit.
    fn show_text(&mut self, text: String) {
        self.input = text;
        self.input_cursor = self.input.graphemes(true).count();
        self.input_error = false;
    }

    fn run_command(&mut self, text: &str) {
        self.push_output(LineKind::Echo, format!("> {}", text));
        match self.book.execute(text) {
            Ok(res) => {
                info!(target: "tui", "command ok: exit={}", res.exit);
                self.push_output(LineKind::Info, res.feedback);
                if res.exit {
                    self.should_quit = true;
                }
            }
            Err(e) => {
                info!(target: "tui", "command failed: {}", e);
                self.input_error = true;
                self.push_output(LineKind::Error, e.to_string());
            }
        }
        self.save_if_changed();
    }
}
