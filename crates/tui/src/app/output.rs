use textwrap::{wrap, Options};

use super::{App, LineKind, OutputLine};

impl App {
    pub fn push_output<S: Into<String>>(&mut self, kind: LineKind, text: S) {
        let text: String = text.into();
        for line in text.lines() {
            self.output.push(OutputLine {
                kind,
                text: line.to_string(),
            });
        }
        let limit = self.config.output_limit.max(1);
        if self.output.len() > limit {
            let excess = self.output.len() - limit;
            self.output.drain(..excess);
        }
        // Force a rewrap on the next draw.
        self.output_wrap_width = 0;
        self.dirty = true;
    }

    pub fn ensure_output_wrapped(&mut self, width: u16) {
        let width = width.max(1);
        if self.output_wrap_width == width {
            return;
        }
        self.output_cache.clear();
        let opts = Options::new(width as usize).subsequent_indent("  ");
        for l in &self.output {
            if l.text.is_empty() {
                self.output_cache.push((l.kind, String::new()));
                continue;
            }
            for w in wrap(&l.text, opts.clone()) {
                self.output_cache.push((l.kind, w.into_owned()));
            }
        }
        self.output_wrap_width = width;
    }

    /// Returns `(first visible line, clamped scroll)`; scroll counts lines up
    /// from the bottom.
    pub fn output_window(&self, viewport: u16) -> (usize, u16) {
        let total = self.output_cache.len();
        let viewport = viewport.max(1) as usize;
        let max_scroll = u16::try_from(total.saturating_sub(viewport)).unwrap_or(u16::MAX);
        let scroll = self.output_scroll.min(max_scroll);
        let start = total.saturating_sub(viewport + scroll as usize);
        (start, scroll)
    }
}
