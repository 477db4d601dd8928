use chrono::{DateTime, Local};
use ratatui::style::{Color, Modifier, Style};

use crate::{
    error::AppError,
    model::{Model, NavigationState},
    settings::DateFormat,
    terminal::TerminalWrapper,
};

mod detail;
mod list;
mod statusline;

pub fn render_model(terminal: &mut TerminalWrapper, model: &Model) -> Result<(), AppError> {
    terminal.draw(|frame| {
        let now = Local::now();
        match model.state {
            NavigationState::Detail => detail::view(model, frame, &now),
            NavigationState::Listing | NavigationState::Terminated => {
                list::view(model, frame, &now)
            }
        }

        statusline::view(model, frame, model.layout.statusline);
    })
}

fn dimmed() -> Style {
    Style::default().fg(Color::DarkGray)
}

fn highlighted() -> Style {
    Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
}

pub fn format_timestamp(
    timestamp: &DateTime<Local>,
    now: &DateTime<Local>,
    format: DateFormat,
) -> String {
    match format {
        DateFormat::Absolute => timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
        DateFormat::Relative => format_relative(timestamp, now),
    }
}

fn format_relative(timestamp: &DateTime<Local>, now: &DateTime<Local>) -> String {
    let seconds = now.signed_duration_since(*timestamp).num_seconds();
    if seconds < 0 {
        return String::from("in the future");
    }

    let (value, unit) = match seconds {
        0..=59 => return String::from("just now"),
        60..=3_599 => (seconds / 60, "minute"),
        3_600..=86_399 => (seconds / 3_600, "hour"),
        86_400..=2_591_999 => (seconds / 86_400, "day"),
        2_592_000..=31_535_999 => (seconds / 2_592_000, "month"),
        _ => (seconds / 31_536_000, "year"),
    };

    if value == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", value, unit)
    }
}
