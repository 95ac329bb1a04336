use std::time::{Duration, Instant};

use crossterm::event::{self, Event, MouseEventKind};
use ratatui::{backend::Backend, Terminal};
use tracing::info;

use crate::{app::App, ui};

pub fn run<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> anyhow::Result<()> {
    let mut last_draw = Instant::now();
    let heartbeat = Duration::from_millis(500);
    loop {
        if app.dirty || last_draw.elapsed() >= heartbeat {
            terminal.draw(|f| ui::draw(f, app))?;
            app.dirty = false;
            last_draw = Instant::now();
        }

        if event::poll(Duration::from_millis(120))? {
            match event::read()? {
                Event::Key(key) => app.on_key(key),
                Event::Paste(s) => app.on_paste(&s),
                Event::Resize(_, _) => app.dirty = true,
                Event::Mouse(me) => {
                    let Some(area) = app.output_area else {
                        continue;
                    };
                    let inside = me.column >= area.x
                        && me.column < area.x + area.width
                        && me.row >= area.y
                        && me.row < area.y + area.height;
                    if !inside {
                        continue;
                    }
                    match me.kind {
                        MouseEventKind::ScrollUp => {
                            app.output_scroll = app.output_scroll.saturating_add(3);
                            app.dirty = true;
                        }
                        MouseEventKind::ScrollDown => {
                            app.output_scroll = app.output_scroll.saturating_sub(3);
                            app.dirty = true;
                        }
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        if app.should_quit {
            info!(target: "tui", "quit requested");
            break;
        }
    }
    Ok(())
}
