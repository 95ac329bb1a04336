use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap},
    Frame,
};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::app::{App, LineKind};
use crate::strings::{
    build_status_line, contacts_title, help_lines_ascii, INPUT_HINT, TITLE_CONTACTS, TITLE_HELP,
    TITLE_INPUT, TITLE_OUTPUT,
};
use crate::theme::THEME;

pub fn draw(f: &mut Frame, app: &mut App) {
    // Layout: contacts list on the left (capped at 40 cols), output/status/input on the right
    let side = (f.area().width / 3).min(40);
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(side), Constraint::Min(10)])
        .split(f.area());
    draw_contacts(f, chunks[0], app);
    draw_main(f, chunks[1], app);

    if app.show_help {
        draw_help(f, f.area());
    }
}

fn draw_contacts(f: &mut Frame, area: Rect, app: &App) {
    if area.width == 0 {
        return;
    }
    let total = app.book.contacts().len();
    let title = if total == 0 {
        TITLE_CONTACTS.to_string()
    } else {
        contacts_title(app.book.shown_len(), total)
    };
    let block = Block::default()
        .title(Span::styled(
            title,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(THEME.border_inactive));
    let lines: Vec<Line> = app
        .book
        .shown()
        .enumerate()
        .map(|(i, c)| {
            Line::from(vec![
                Span::styled(format!("{:>2}. ", i + 1), Style::default().fg(Color::DarkGray)),
                Span::raw(c.summary()),
            ])
        })
        .collect();
    let para = Paragraph::new(lines).block(block);
    f.render_widget(para, area);
}

fn draw_main(f: &mut Frame, area: Rect, app: &mut App) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(area);

    app.output_area = Some(main_chunks[0]);
    draw_output(f, main_chunks[0], app);
    draw_status(f, main_chunks[1], app);
    draw_input(f, main_chunks[2], app);
}

fn draw_output(f: &mut Frame, area: Rect, app: &mut App) {
    let block = Block::default()
        .title(TITLE_OUTPUT)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(THEME.border_inactive));

    let inner_width = area.width.saturating_sub(2);
    let inner_height = area.height.saturating_sub(2);
    app.ensure_output_wrapped(inner_width);
    app.output_viewport = inner_height;
    let (start, scroll) = app.output_window(inner_height);
    app.output_scroll = scroll;

    let vis_lines: Vec<Line> = app
        .output_cache
        .iter()
        .skip(start)
        .take(inner_height as usize)
        .map(|(kind, text)| {
            let style = match kind {
                LineKind::Echo => Style::default().fg(THEME.echo_fg),
                LineKind::Info => Style::default(),
                LineKind::Error => Style::default().fg(THEME.error_fg),
            };
            Line::from(Span::styled(text.clone(), style))
        })
        .collect();
    let para = Paragraph::new(vis_lines).block(block);
    f.render_widget(para, area);

    let inner = Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    };
    let total = app.output_cache.len();
    if total > inner.height as usize {
        let mut sb_state = ScrollbarState::new(total).position(start);
        let sb = Scrollbar::default().orientation(ScrollbarOrientation::VerticalRight);
        f.render_stateful_widget(sb, inner, &mut sb_state);
    }
}

fn draw_input(f: &mut Frame, area: Rect, app: &App) {
    let border_style = if app.input_error {
        Style::default().fg(THEME.border_error)
    } else {
        Style::default().fg(THEME.border_focus)
    };
    let block = Block::default()
        .title(TITLE_INPUT)
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner_width = area.width.saturating_sub(2);
    let graphemes: Vec<&str> = app.input.graphemes(true).collect();
    let upto = app.input_cursor.min(graphemes.len());
    let caret_col = UnicodeWidthStr::width(graphemes[..upto].concat().as_str()) as u16;
    let offset_x = caret_col.saturating_sub(inner_width.saturating_sub(1));

    let para = if app.input.is_empty() {
        let hint = Line::from(Span::styled(
            INPUT_HINT,
            Style::default().fg(Color::DarkGray),
        ));
        Paragraph::new(hint).block(block)
    } else {
        let style = if app.input_error {
            Style::default().fg(THEME.error_fg)
        } else {
            Style::default()
        };
        Paragraph::new(Line::from(Span::styled(app.input.clone(), style)))
            .block(block)
            .scroll((0, offset_x))
    };
    f.render_widget(para, area);

    if !app.show_help && area.width > 2 && area.height > 2 {
        let cursor_x = area.x + 1 + caret_col - offset_x;
        f.set_cursor_position(Position::new(cursor_x, area.y + 1));
    }
}

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let tips = build_status_line(
        app.history.cursor() + 1,
        app.history.len(),
        !app.history.is_at_tail(),
        app.book.shown_len(),
        app.book.contacts().len(),
        area.width.saturating_sub(2),
    );
    let info = Line::from(Span::styled(tips, Style::default().fg(THEME.status_fg)));
    let para = Paragraph::new(info).block(Block::default().borders(Borders::ALL));
    f.render_widget(para, area);
}

fn draw_help(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(70, 70, area);
    let block = Block::default()
        .title(Span::styled(
            TITLE_HELP,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL);
    let lines = help_lines_ascii()
        .into_iter()
        .map(Line::from)
        .collect::<Vec<Line>>();
    let para = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(Clear, popup_area);
    f.render_widget(para, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    let horiz = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vert[1]);
    horiz[1]
}
