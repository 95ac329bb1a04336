use unicode_segmentation::UnicodeSegmentation;

use super::App;

fn is_blank(g: &str) -> bool {
    g.trim().is_empty()
}

impl App {
    // Every user edit goes through here so the draft slot under the history
    // cursor always mirrors what is in the box.
    fn on_text_changed(&mut self) {
        self.input_error = false;
        self.history.set_current_state(self.input.clone());
    }

    fn splice(&mut self, start: usize, end: usize, with: &str) {
        let parts: Vec<&str> = self.input.graphemes(true).collect();
        let end = end.min(parts.len());
        let start = start.min(end);
        let mut next = parts[..start].concat();
        next.push_str(with);
        next.push_str(&parts[end..].concat());
        self.input = next;
        self.input_cursor = start + with.graphemes(true).count();
        self.on_text_changed();
    }

    pub fn insert_text(&mut self, s: &str) {
        // The box is single-line; pasted newlines become spaces.
        let clean = s.replace(['\r', '\n'], " ");
        if clean.is_empty() {
            return;
        }
        let at = self.input_cursor;
        self.splice(at, at, &clean);
    }

    pub fn delete_left_grapheme(&mut self) {
        if self.input_cursor == 0 {
            return;
        }
        let at = self.input_cursor;
        self.splice(at - 1, at, "");
    }

    pub fn delete_right_grapheme(&mut self) {
        let len = self.input.graphemes(true).count();
        if self.input_cursor >= len {
            return;
        }
        let at = self.input_cursor;
        self.splice(at, at + 1, "");
    }

    pub fn delete_prev_word(&mut self) {
        let start = self.word_start_before(self.input_cursor);
        if start == self.input_cursor {
            return;
        }
        let at = self.input_cursor;
        self.splice(start, at, "");
    }

    pub fn kill_to_start(&mut self) {
        if self.input_cursor == 0 {
            return;
        }
        let at = self.input_cursor;
        self.splice(0, at, "");
    }

    pub fn kill_to_end(&mut self) {
        let len = self.input.graphemes(true).count();
        if self.input_cursor >= len {
            return;
        }
        let at = self.input_cursor;
        self.splice(at, len, "");
    }

    pub fn move_cursor_end(&mut self) {
        self.input_cursor = self.input.graphemes(true).count();
    }

    pub fn move_cursor_word_left(&mut self) {
        self.input_cursor = self.word_start_before(self.input_cursor);
    }

    pub fn move_cursor_word_right(&mut self) {
        let parts: Vec<&str> = self.input.graphemes(true).collect();
        let mut i = self.input_cursor.min(parts.len());
        while i < parts.len() && is_blank(parts[i]) {
            i += 1;
        }
        while i < parts.len() && !is_blank(parts[i]) {
            i += 1;
        }
        self.input_cursor = i;
    }

    fn word_start_before(&self, from: usize) -> usize {
        let parts: Vec<&str> = self.input.graphemes(true).collect();
        let mut i = from.min(parts.len());
        while i > 0 && is_blank(parts[i - 1]) {
            i -= 1;
        }
        while i > 0 && !is_blank(parts[i - 1]) {
            i -= 1;
        }
        i
    }
}
