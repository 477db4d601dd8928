use chrono::{DateTime, Local};
use junkyard_inventory::File;
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use crate::{model::Model, settings::DateFormat};

use super::{dimmed, format_timestamp, highlighted};

pub fn view(model: &Model, frame: &mut Frame, now: &DateTime<Local>) {
    let block = Block::bordered().title(" junkyard ");
    let rect = model.layout.main;

    if !model.loaded {
        let loading = Paragraph::new(Line::styled("loading...", dimmed())).block(block);
        frame.render_widget(loading, rect);
        return;
    }

    let lines: Vec<_> = model
        .visible_entries()
        .into_iter()
        .enumerate()
        .skip(model.list.offset)
        .take(model.list.height)
        .map(|(index, file)| get_line(model, file, index == model.cursor, now))
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), rect);
}

fn get_line(model: &Model, file: &File, focused: bool, now: &DateTime<Local>) -> Line<'static> {
    let marker = if model.selection.contains(&file.id) {
        "● "
    } else {
        "  "
    };

    let origin = file
        .from
        .parent()
        .map(|parent| parent.display().to_string())
        .unwrap_or_default();

    let line = Line::from(vec![
        Span::styled(marker, Style::default().fg(Color::Yellow)),
        Span::raw(format!("{}{}", file.name, get_suffix(file))),
        Span::styled(
            format!("  {}", format_timestamp(&file.timestamp, now, DateFormat::Relative)),
            dimmed(),
        ),
        Span::styled(format!("  {}", origin), dimmed()),
    ]);

    if focused {
        line.style(highlighted())
    } else {
        line
    }
}

fn get_suffix(file: &File) -> &'static str {
    match file.to.symlink_metadata() {
        Ok(metadata) if metadata.is_dir() => "/",
        Ok(_) => "",
        Err(_) => "?",
    }
}
