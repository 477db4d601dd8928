use std::collections::VecDeque;

use junkyard_inventory::File;
use junkyard_keymap::MessageResolver;

use crate::{error::AppError, event::Envelope, layout::AppLayout, preview::Preview, settings::DateFormat};

use self::{selection::SelectionSet, viewport::ViewPort};

pub mod selection;
pub mod viewport;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum NavigationState {
    Detail,
    #[default]
    Listing,
    Terminated,
}

/// State of one interactive restore session.
#[derive(Debug, Default)]
pub struct Model {
    pub cursor: usize,
    pub date_format: DateFormat,
    pub deferred: VecDeque<Envelope>,
    pub detail: Detail,
    pub entries: Vec<File>,
    pub key_sequence: String,
    pub layout: AppLayout,
    pub list: ViewPort,
    pub loaded: bool,
    pub outcome: Option<Result<Vec<File>, AppError>>,
    pub pending: usize,
    pub resolver: MessageResolver,
    pub search: Search,
    pub selection: SelectionSet,
    pub state: NavigationState,
}

impl Model {
    pub fn new(date_format: DateFormat) -> Self {
        Self {
            date_format,
            ..Default::default()
        }
    }

    pub fn set_layout(&mut self, layout: AppLayout) {
        self.list.height = layout.list_height();
        self.list.follow(self.cursor);
        self.detail.viewport.height = layout.preview_height();
        self.layout = layout;
    }

    /// Entries matching the current name search, in display order.
    pub fn visible_entries(&self) -> Vec<&File> {
        let query = self.search.query.to_lowercase();
        self.entries
            .iter()
            .filter(|file| query.is_empty() || file.name.to_lowercase().contains(&query))
            .collect()
    }

    pub fn focused(&self) -> Option<&File> {
        self.visible_entries().get(self.cursor).copied()
    }
}

#[derive(Debug, Default)]
pub struct Detail {
    pub preview: Option<Preview>,
    pub size: Option<u64>,
    pub viewport: ViewPort,
}

impl Detail {
    pub fn cannot_preview(&self) -> bool {
        matches!(self.preview, Some(Preview::None(_, _)))
    }

    pub fn reset(&mut self) {
        self.preview = None;
        self.size = None;
        self.viewport.offset = 0;
    }
}

#[derive(Debug, Default)]
pub struct Search {
    pub editing: bool,
    pub query: String,
}
