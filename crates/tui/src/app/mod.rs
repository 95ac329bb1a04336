use cmdbox_core::book::AddressBook;
use cmdbox_core::history::HistoryBuffer;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::Rect;
use tracing::{info, warn};
use unicode_segmentation::UnicodeSegmentation;

use crate::config::AppConfig;

pub mod history;
pub mod input;
pub mod output;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind {
    Echo,
    Info,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputLine {
    pub kind: LineKind,
    pub text: String,
}

pub struct App {
    pub config: AppConfig,
    pub book: AddressBook,
    saved_revision: u64,
    pub history: HistoryBuffer<String>,
    pub input: String,
    pub input_cursor: usize,
    pub input_error: bool,
    pub output: Vec<OutputLine>,
    pub output_cache: Vec<(LineKind, String)>,
    pub output_wrap_width: u16,
    pub output_scroll: u16,
    pub output_area: Option<Rect>,
    pub output_viewport: u16,
    pub show_help: bool,
    pub should_quit: bool,
    pub dirty: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let mut book = AddressBook::new();
        if config.persist_contacts {
            if let Some(dir) = &config.data_dir {
                match crate::persist::load_contacts(dir) {
                    Ok(contacts) => {
                        info!(target: "tui", "loaded {} contact(s)", contacts.len());
                        book = AddressBook::from_contacts(contacts);
                    }
                    Err(e) => warn!(target: "tui", "load contacts: {:#}", e),
                }
            }
        }
        Self::with_book(config, book)
    }

    pub fn with_book(config: AppConfig, book: AddressBook) -> Self {
        let saved_revision = book.revision();
        let mut s = Self {
            config,
            book,
            saved_revision,
            history: HistoryBuffer::new(String::new()),
            input: String::new(),
            input_cursor: 0,
            input_error: false,
            output: Vec::new(),
            output_cache: Vec::new(),
            output_wrap_width: 0,
            output_scroll: 0,
            output_area: None,
            output_viewport: 0,
            show_help: false,
            should_quit: false,
            dirty: true,
        };
        s.push_output(LineKind::Info, "Type a command and press Enter. F1 for help.");
        s
    }

    pub(crate) fn save_if_changed(&mut self) {
        if self.book.revision() == self.saved_revision {
            return;
        }
        self.saved_revision = self.book.revision();
        if !self.config.persist_contacts {
            return;
        }
        let Some(dir) = self.config.data_dir.clone() else {
            return;
        };
        if let Err(e) = crate::persist::save_contacts(&dir, self.book.contacts()) {
            warn!(target: "tui", "save contacts: {:#}", e);
            self.push_output(LineKind::Error, format!("could not save contacts: {}", e));
        }
    }

    // The help overlay owns the keyboard, pasted text included.
    pub fn on_paste(&mut self, text: &str) {
        if self.show_help {
            return;
        }
        self.insert_text(text);
        self.dirty = true;
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        self.dirty = true;

        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?')) {
                self.show_help = false;
            }
            return;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Esc => self.should_quit = true,
            KeyCode::F(1) => self.show_help = true,
            KeyCode::Char('?') if self.input.is_empty() => self.show_help = true,

            KeyCode::Enter => {
                info!(target: "tui", "on_key: Enter => submit");
                self.submit();
            }
            KeyCode::Up if key.modifiers.is_empty() => self.history_back(),
            KeyCode::Down if key.modifiers.is_empty() => self.history_forward(),

            KeyCode::Backspace => self.delete_left_grapheme(),
            KeyCode::Delete => self.delete_right_grapheme(),
            KeyCode::Char('w') if ctrl => self.delete_prev_word(),
            KeyCode::Char('u') if ctrl => self.kill_to_start(),
            KeyCode::Char('k') if ctrl => self.kill_to_end(),
            KeyCode::Char('a') if ctrl => self.input_cursor = 0,
            KeyCode::Char('e') if ctrl => self.move_cursor_end(),
            KeyCode::Home => self.input_cursor = 0,
            KeyCode::End => self.move_cursor_end(),
            KeyCode::Left if ctrl => self.move_cursor_word_left(),
            KeyCode::Right if ctrl => self.move_cursor_word_right(),
            KeyCode::Left => {
                self.input_cursor = self.input_cursor.saturating_sub(1);
            }
            KeyCode::Right => {
                let len = self.input.graphemes(true).count();
                if self.input_cursor < len {
                    self.input_cursor += 1;
                }
            }
            KeyCode::Char(ch) if !ctrl => {
                let mut buf = [0u8; 4];
                self.insert_text(ch.encode_utf8(&mut buf));
            }

            KeyCode::PageUp => {
                let step = self.output_viewport.max(1);
                self.output_scroll = self.output_scroll.saturating_add(step);
            }
            KeyCode::PageDown => {
                let step = self.output_viewport.max(1);
                self.output_scroll = self.output_scroll.saturating_sub(step);
            }
            _ => {
                self.dirty = false;
            }
        }
    }
}
