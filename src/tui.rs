use ratatui::style::{Color, Modifier, Style};
use ratatui::DefaultTerminal;

use crate::error::Result;

pub const HEADER_STYLE: Style = Style::new()
    .fg(Color::Yellow)
    .add_modifier(Modifier::BOLD);

pub const FOOTER_STYLE: Style = Style::new().fg(Color::DarkGray);

pub const WARNING_STYLE: Style = Style::new().fg(Color::Red);

pub const SELECTED_STYLE: Style = Style::new()
    .bg(Color::Rgb(40, 40, 60))
    .add_modifier(Modifier::BOLD);

/// Run `body` on an initialised terminal, restoring it afterwards and on
/// panic.
pub fn with_terminal<F>(body: F) -> Result<()>
where
    F: FnOnce(&mut DefaultTerminal) -> Result<()>,
{
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        ratatui::restore();
        hook(info);
    }));

    let mut terminal = ratatui::init();
    let result = body(&mut terminal);
    ratatui::restore();
    result
}
