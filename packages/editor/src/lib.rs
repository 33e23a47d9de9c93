//! # DFN Editor
//!
//! Document model and editing engine for DFN novels.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ markup: DFN text ⇄ styled tree              │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Novel → chapters → extracts         │
//! │  - Pure structural operations               │
//! │  - Validated mutations                      │
//! │  - Snapshot undo/redo                       │
//! │  - Search, replace, autosave                │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ format: .dfn export / import                │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Operations never mutate**: each returns a new novel; unknown ids
//!    give back an equal copy
//! 2. **Containers hold no text**: a chapter with extracts has empty content
//! 3. **History is snapshots**: undo restores a whole previous novel
//!
//! ## Usage
//!
//! ```rust
//! use dfn_editor::{EditSession, EditorConfig, Mutation, Novel};
//!
//! let mut session = EditSession::new(Novel::sample(), EditorConfig::default());
//!
//! session.apply(Mutation::UpdateTitle {
//!     slide_id: "chapter-3".to_string(),
//!     title: "The Storm".to_string(),
//! });
//! assert_eq!(session.novel().slide("chapter-3").unwrap().title, "The Storm");
//!
//! session.undo();
//! assert_ne!(session.novel().slide("chapter-3").unwrap().title, "The Storm");
//! ```

mod autosave;
mod clipboard;
mod config;
mod errors;
mod history;
mod ids;
mod model;
mod mutations;
mod operations;
mod search;
mod session;
mod stats;
mod storage;
mod suggest;

pub use autosave::{AutosaveScheduler, SaveStatus};
pub use clipboard::{copy_slide, cut_slide, paste_slide, Clipboard};
pub use config::EditorConfig;
pub use errors::EditorError;
pub use history::History;
pub use ids::{document_seed, session_seed, IdGenerator, IdKind};
pub use model::{Novel, Slide, SlideId, SlideStatus};
pub use mutations::{Mutation, MutationContext, MutationError, MutationResult};
pub use operations::{
    add_slide, check_move, delete_slide, duplicate_slide, find_slide, move_slide, next_active_after_delete,
    slide_path, update_content, update_status, update_title, DropPosition, SlideLocation, SlidePath,
    NEW_CHAPTER_TITLE, NEW_EXTRACT_TITLE,
};
pub use search::{replace_all, replace_one, search, Direction, SearchMatch, SearchState};
pub use session::{ChangeCause, ChangeEvent, ChangeListener, EditSession};
pub use stats::{word_count, NovelStats, SlideStats, WORDS_PER_MINUTE};
pub use storage::{load_or_default, JsonFileStore, MemoryStore, NovelStore, StoreError};
pub use suggest::{
    clean_suggestion, suggestion_input, truncate_chars, SuggestError, SuggestionOutcome, TitleRequest,
    TitleSuggester,
};
