pub(crate) mod ask_ai;
pub(crate) mod header;
pub(crate) mod note_card;
pub(crate) mod note_editor;
pub(crate) mod search_bar;
pub(crate) mod toaster;
pub mod ui;

pub(crate) use ask_ai::AskAiPanel;
pub(crate) use header::AppLayout;
pub(crate) use note_card::NoteCard;
pub(crate) use note_editor::NoteEditor;
pub(crate) use search_bar::SearchBar;
pub(crate) use toaster::ToastViewport;
