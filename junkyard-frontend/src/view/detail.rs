use chrono::{DateTime, Local};
use junkyard_inventory::size::format_size;
use ratatui::{
    layout::Alignment,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use crate::{model::Model, preview::Preview};

use super::{dimmed, format_timestamp};

pub fn view(model: &Model, frame: &mut Frame, now: &DateTime<Local>) {
    let file = match model.focused() {
        Some(it) => it,
        None => return,
    };

    let size = model
        .detail
        .size
        .map(format_size)
        .unwrap_or_else(|| String::from("-"));

    let header = vec![
        get_field("name", file.name.clone()),
        get_field("origin", file.from.display().to_string()),
        get_field(
            "deleted",
            format_timestamp(&file.timestamp, now, model.date_format),
        ),
        get_field("size", size),
    ];

    let title = if model.selection.contains(&file.id) {
        " details (selected) "
    } else {
        " details "
    };

    frame.render_widget(
        Paragraph::new(header).block(Block::bordered().title(title)),
        model.layout.header,
    );

    let block = Block::bordered().title(get_preview_title(model));
    let paragraph = match &model.detail.preview {
        None => Paragraph::new(Line::styled("loading...", dimmed())),
        Some(Preview::None(_, media_type)) => Paragraph::new(vec![
            Line::styled("cannot preview", Style::default().fg(Color::Red)),
            Line::styled(media_type.clone(), dimmed()),
        ])
        .alignment(Alignment::Center),
        Some(preview) => {
            let viewport = &model.detail.viewport;
            let lines: Vec<_> = preview
                .lines()
                .iter()
                .skip(viewport.offset)
                .take(viewport.height)
                .map(|line| Line::raw(line.clone()))
                .collect();

            Paragraph::new(lines)
        }
    };

    frame.render_widget(paragraph.block(block), model.layout.preview);
}

fn get_preview_title(model: &Model) -> String {
    let total = match &model.detail.preview {
        Some(preview) if !model.detail.cannot_preview() => preview.lines().len(),
        _ => return String::from(" preview "),
    };

    if total == 0 {
        return String::from(" preview ");
    }

    let first = model.detail.viewport.offset + 1;
    let last = (model.detail.viewport.offset + model.detail.viewport.height).min(total);

    format!(" preview {}-{}/{} ", first, last, total)
}

fn get_field(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<9}", label), dimmed()),
        Span::raw(value),
    ])
}
