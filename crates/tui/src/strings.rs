// Centralized UI strings and labels. ASCII-friendly by default.

use unicode_width::UnicodeWidthStr;

pub const INPUT_HINT: &str = "Type a command, Enter to run, Up/Down for history";

// UI block titles (keep surrounding spaces for visual padding)
pub const TITLE_CONTACTS: &str = " Contacts ";
pub const TITLE_OUTPUT: &str = " Output ";
pub const TITLE_INPUT: &str = " Command ";
pub const TITLE_HELP: &str = " Help / Shortcuts ";

pub fn contacts_title(shown: usize, total: usize) -> String {
    if shown == total {
        format!(" Contacts ({}) ", total)
    } else {
        format!(" Contacts ({}/{}) ", shown, total)
    }
}

// Build the status bar line with width-aware compaction.
// - history_pos/history_len: cursor position in the input history (1-based)
// - browsing: whether the cursor is off the newest entry
pub fn build_status_line(
    history_pos: usize,
    history_len: usize,
    browsing: bool,
    shown: usize,
    total: usize,
    max_width: u16,
) -> String {
    let mut segments: Vec<String> = Vec::new();
    let mark = if browsing { "*" } else { "" };
    segments.push(format!("Hist:{}/{}{}", history_pos, history_len, mark));
    segments.push(format!("Shown:{}/{}", shown, total));
    // Hints ordered by importance; appended while space allows.
    let hints: [&str; 4] = [
        "Enter: run",
        "Up/Down: history",
        "PgUp/PgDn: scroll",
        "F1: help",
    ];
    for h in hints {
        segments.push(h.to_string());
    }

    let sep = "  |  ";
    let mut out = String::new();
    let mut used = 0usize;
    for (i, seg) in segments.iter().enumerate() {
        let segw = UnicodeWidthStr::width(seg.as_str());
        let addw = segw
            + if i == 0 {
                0
            } else {
                UnicodeWidthStr::width(sep)
            };
        if used + addw > max_width as usize {
            break;
        }
        if i > 0 {
            out.push_str(sep);
            used += UnicodeWidthStr::width(sep);
        }
        out.push_str(seg);
        used += segw;
    }
    out
}

pub fn help_lines_ascii() -> Vec<String> {
    let mut lines: Vec<String> = vec![
        "Keys".into(),
        "  Enter: Run    Up/Down: Browse history    Esc/Ctrl-C: Quit".into(),
        "  Editing a recalled line changes that history entry".into(),
        "  Home/End, Ctrl+A/E: Line start/end    Ctrl+Arrow: Word move".into(),
        "  Ctrl+W: Delete prev word    Ctrl+U/K: Kill to start/end".into(),
        "  PgUp/PgDn: Scroll output    F1 or ? on empty line: This panel".into(),
        "Commands".into(),
    ];
    for u in cmdbox_core::book::usage_lines() {
        lines.push(format!("  {}", u));
    }
    lines
}
