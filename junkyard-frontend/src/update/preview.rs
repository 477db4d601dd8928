use crate::{
    action::Action,
    model::{Model, NavigationState},
    preview::Preview,
    task::Task,
};

use super::{finish_task, run_task};

#[derive(Debug)]
pub enum PreviewScroll {
    Bottom,
    Down,
    HalfPageDown,
    HalfPageUp,
    Top,
    Up,
}

pub fn request(model: &mut Model) -> Vec<Action> {
    let path = match model.focused() {
        Some(file) => file.to.clone(),
        None => return Vec::new(),
    };

    model.detail.reset();

    vec![run_task(model, Task::LoadPreview(path))]
}

#[tracing::instrument(skip(model, content))]
pub fn loaded(model: &mut Model, content: Preview, size: Option<u64>) -> Vec<Action> {
    finish_task(model);

    if model.state != NavigationState::Detail {
        return Vec::new();
    }

    let is_focused = model
        .focused()
        .is_some_and(|file| file.to.as_path() == content.path());

    if !is_focused {
        tracing::debug!("discarding stale preview for {:?}", content.path());
        return Vec::new();
    }

    model.detail.preview = Some(content);
    model.detail.size = size;
    model.detail.viewport.offset = 0;

    Vec::new()
}

pub fn scroll(model: &mut Model, scroll: PreviewScroll) -> Vec<Action> {
    if model.state != NavigationState::Detail {
        return Vec::new();
    }

    let total = model
        .detail
        .preview
        .as_ref()
        .map(|preview| preview.lines().len())
        .unwrap_or(0);

    let viewport = &mut model.detail.viewport;
    match scroll {
        PreviewScroll::Bottom => viewport.offset = viewport.max_offset(total),
        PreviewScroll::Down => viewport.scroll_down(1, total),
        PreviewScroll::HalfPageDown => {
            let count = viewport.half_page();
            viewport.scroll_down(count, total);
        }
        PreviewScroll::HalfPageUp => {
            let count = viewport.half_page();
            viewport.scroll_up(count);
        }
        PreviewScroll::Top => viewport.offset = 0,
        PreviewScroll::Up => viewport.scroll_up(1),
    }

    Vec::new()
}
