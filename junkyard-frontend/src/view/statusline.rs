use ratatui::{
    prelude::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use crate::model::{Model, NavigationState};

use super::dimmed;

pub fn view(model: &Model, frame: &mut Frame, rect: Rect) {
    let mode = get_mode_content(model);
    let position = get_position_content(model);

    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(mode.width() as u16),
            Constraint::Length(position.width() as u16),
        ])
        .split(rect);

    frame.render_widget(
        Block::default().style(Style::default().bg(Color::Black)),
        rect,
    );

    frame.render_widget(Paragraph::new(mode), layout[0]);
    frame.render_widget(Paragraph::new(position), layout[1]);
}

fn get_mode_content(model: &Model) -> Line<'static> {
    let label = match (model.state, model.search.editing) {
        (NavigationState::Detail, _) => "DETAIL",
        (_, true) => "SEARCH",
        _ => "LIST",
    };

    let mut content = vec![Span::styled(
        format!(" {} ", label),
        Style::default().fg(Color::Black).bg(Color::Green),
    )];

    if model.search.editing {
        content.push(Span::raw(format!(" /{}", model.search.query)));
    } else if !model.search.query.is_empty() {
        content.push(Span::styled(
            format!(" filter: {}", model.search.query),
            dimmed(),
        ));
    }

    Line::from(content)
}

fn get_position_content(model: &Model) -> Line<'static> {
    let mut content = Vec::new();
    if !model.key_sequence.is_empty() {
        content.push(Span::raw(format!("{} ", model.key_sequence)));
    }

    if !model.selection.is_empty() {
        content.push(Span::styled(
            format!("{} selected ", model.selection.len()),
            Style::default().fg(Color::Yellow),
        ));
    }

    let count = model.visible_entries().len();
    let position = if count == 0 { 0 } else { model.cursor + 1 };

    content.push(Span::styled(
        format!("{}/{} ", position, count),
        Style::default().fg(Color::Gray),
    ));

    Line::from(content)
}
