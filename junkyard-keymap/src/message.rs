use std::fmt::Display;

#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum Mode {
    Detail,
    #[default]
    List,
    Search,
}

impl Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let content = match self {
            Mode::Detail => "detail",
            Mode::List => "list",
            Mode::Search => "search",
        };

        write!(f, "{}", content)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Binding {
    pub kind: BindingKind,
    pub repeat: Option<usize>,
    pub repeatable: bool,
}

impl Default for Binding {
    fn default() -> Self {
        Self {
            kind: BindingKind::default(),
            repeat: None,
            repeatable: true,
        }
    }
}

impl Binding {
    pub fn from_message(message: KeymapMessage) -> Self {
        Self {
            kind: BindingKind::Message(message),
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum BindingKind {
    Message(KeymapMessage),
    #[default]
    None,
    Repeat,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum KeySequence {
    Completed(String),
    Changed(String),
    None,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum KeymapMessage {
    ApplySearch,
    ClearSearch,
    Confirm,
    CursorBottom,
    CursorDown,
    CursorTop,
    CursorUp,
    DeleteSearchChar,
    Deselect,
    HideDetails,
    InsertSearch(String),
    NextEntry,
    PreviewBottom,
    PreviewDown,
    PreviewHalfPageDown,
    PreviewHalfPageUp,
    PreviewTop,
    PreviewUp,
    PreviousEntry,
    Quit,
    ShowDetails,
    StartSearch,
    ToggleDateFormat,
    ToggleSelection,
}

impl KeymapMessage {
    /// Messages a count prefix multiplies. Everything else is emitted once.
    pub fn is_countable(&self) -> bool {
        matches!(
            self,
            KeymapMessage::CursorDown
                | KeymapMessage::CursorUp
                | KeymapMessage::Deselect
                | KeymapMessage::NextEntry
                | KeymapMessage::PreviewDown
                | KeymapMessage::PreviewHalfPageDown
                | KeymapMessage::PreviewHalfPageUp
                | KeymapMessage::PreviewUp
                | KeymapMessage::PreviousEntry
                | KeymapMessage::ToggleSelection
        )
    }
}
