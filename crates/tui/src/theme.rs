use ratatui::style::Color;

pub struct Theme {
    pub border_focus: Color,
    pub border_inactive: Color,
    pub border_error: Color,
    pub echo_fg: Color,
    pub error_fg: Color,
    pub status_fg: Color,
}

pub const THEME: Theme = Theme {
    border_focus: Color::Cyan,
    border_inactive: Color::DarkGray,
    border_error: Color::Red,
    echo_fg: Color::Blue,
    error_fg: Color::Red,
    status_fg: Color::Gray,
};
