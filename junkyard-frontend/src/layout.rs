use ratatui::prelude::{Constraint, Direction, Layout, Rect};

pub const DETAIL_HEADER_HEIGHT: u16 = 6;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppLayout {
    pub main: Rect,
    pub header: Rect,
    pub preview: Rect,
    pub statusline: Rect,
}

impl AppLayout {
    pub fn new(rect: Rect) -> Self {
        let main = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(rect);

        let detail = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(DETAIL_HEADER_HEIGHT), Constraint::Min(0)])
            .split(main[0]);

        Self {
            main: main[0],
            header: detail[0],
            preview: detail[1],
            statusline: main[1],
        }
    }

    /// Rows available inside the bordered entry list.
    pub fn list_height(&self) -> usize {
        usize::from(self.main.height.saturating_sub(2))
    }

    /// Rows available inside the bordered preview.
    pub fn preview_height(&self) -> usize {
        usize::from(self.preview.height.saturating_sub(2))
    }
}
