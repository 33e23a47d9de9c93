//! # Edit Session
//!
//! One user's editing state over a novel: history, active slide, clipboard,
//! search cursor and pending autosave.
//!
//! Every change funnels through [`EditSession::apply`]. A mutation that
//! produces an equal novel leaves history, revision and listeners untouched.
//! Errors never escape `apply`; they are logged and treated as no-ops.
//! [`EditSession::try_apply`] reports them instead.

use crate::autosave::{AutosaveScheduler, SaveStatus};
use crate::clipboard::Clipboard;
use crate::config::EditorConfig;
use crate::errors::EditorError;
use crate::history::History;
use crate::ids::IdGenerator;
use crate::model::{Novel, Slide, SlideId};
use crate::mutations::{Mutation, MutationContext, MutationError, MutationResult};
use crate::operations::next_active_after_delete;
use crate::search::{Direction, SearchMatch, SearchState};
use crate::storage::{load_or_default, NovelStore};
use crate::suggest::{
    clean_suggestion, suggestion_input, SuggestError, SuggestionOutcome, TitleRequest, TitleSuggester,
};
use dfn_markup::{highlight_occurrence, parse, StyledDocument};
use std::time::Instant;
use tracing::{debug, info};

/// Why the document changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeCause {
    Edit,
    Undo,
    Redo,
}

/// Published after every change to the current novel
#[derive(Debug, Clone, Copy)]
pub struct ChangeEvent<'a> {
    pub novel: &'a Novel,
    pub revision: u64,
    pub cause: ChangeCause,
}

/// Observer of document changes
pub trait ChangeListener {
    fn on_change(&mut self, event: &ChangeEvent<'_>);
}

impl<F> ChangeListener for F
where
    F: FnMut(&ChangeEvent<'_>),
{
    fn on_change(&mut self, event: &ChangeEvent<'_>) {
        self(event)
    }
}

pub struct EditSession {
    config: EditorConfig,
    history: History,
    active_id: Option<SlideId>,
    clipboard: Option<Clipboard>,
    search: SearchState,
    ids: IdGenerator,
    autosave: AutosaveScheduler,

    /// Bumped on every change, including undo and redo
    revision: u64,

    listeners: Vec<Box<dyn ChangeListener>>,
}

impl EditSession {
    pub fn new(novel: Novel, config: EditorConfig) -> Self {
        let ids = IdGenerator::for_session(&novel.title);
        let active_id = novel.first_chapter_id().map(str::to_string);

        Self {
            history: History::with_max_levels(novel, config.history_limit),
            autosave: AutosaveScheduler::new(config.autosave_debounce),
            config,
            active_id,
            clipboard: None,
            search: SearchState::new(),
            ids,
            revision: 0,
            listeners: Vec::new(),
        }
    }

    /// Start from the stored novel, or the sample when the store has none
    pub fn load(store: &dyn NovelStore, config: EditorConfig) -> Self {
        Self::new(load_or_default(store), config)
    }

    pub fn with_id_generator(mut self, ids: IdGenerator) -> Self {
        self.ids = ids;
        self
    }

    pub fn novel(&self) -> &Novel {
        self.history.current()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn clipboard(&self) -> Option<&Clipboard> {
        self.clipboard.as_ref()
    }

    pub fn search_state(&self) -> &SearchState {
        &self.search
    }

    pub fn autosave(&self) -> &AutosaveScheduler {
        &self.autosave
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    pub fn active_slide(&self) -> Option<&Slide> {
        self.active_id.as_deref().and_then(|id| self.novel().slide(id))
    }

    /// Make `id` the active slide. Unknown ids are ignored.
    pub fn select(&mut self, id: &str) -> bool {
        if !self.novel().contains_id(id) {
            debug!(slide_id = %id, "select: unknown slide");
            return false;
        }
        self.active_id = Some(id.to_string());
        true
    }

    pub fn subscribe(&mut self, listener: impl ChangeListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Apply a mutation; returns whether the document changed
    pub fn apply(&mut self, mutation: Mutation) -> bool {
        self.apply_at(mutation, Instant::now())
    }

    pub fn apply_at(&mut self, mutation: Mutation, now: Instant) -> bool {
        match self.try_apply_at(mutation, now) {
            Ok(changed) => changed,
            Err(err) => {
                debug!(error = %err, "Mutation ignored");
                false
            }
        }
    }

    pub fn try_apply(&mut self, mutation: Mutation) -> Result<bool, EditorError> {
        self.try_apply_at(mutation, Instant::now())
    }

    pub fn try_apply_at(&mut self, mutation: Mutation, now: Instant) -> Result<bool, EditorError> {
        let mut ctx = MutationContext {
            ids: &mut self.ids,
            clipboard: &mut self.clipboard,
            search: &self.search,
        };
        let MutationResult { novel, created } = mutation.apply(self.history.current(), &mut ctx)?;

        let next_active = match (&mutation, created) {
            (_, Some(created)) => Some(created),
            (Mutation::DeleteSlide { slide_id } | Mutation::CutSlide { slide_id }, None)
                if self.active_id.as_deref().is_some_and(|id| !novel.contains_id(id)) =>
            {
                next_active_after_delete(self.history.current(), &novel, slide_id)
            }
            _ => self.active_id.clone(),
        };

        if !self.history.commit_with_description(novel, mutation.description()) {
            return Ok(false);
        }

        self.active_id = next_active;
        self.after_change(ChangeCause::Edit, now);
        Ok(true)
    }

    pub fn undo(&mut self) -> bool {
        self.undo_at(Instant::now())
    }

    pub fn undo_at(&mut self, now: Instant) -> bool {
        if !self.history.undo() {
            return false;
        }
        self.after_change(ChangeCause::Undo, now);
        true
    }

    pub fn redo(&mut self) -> bool {
        self.redo_at(Instant::now())
    }

    pub fn redo_at(&mut self, now: Instant) -> bool {
        if !self.history.redo() {
            return false;
        }
        self.after_change(ChangeCause::Redo, now);
        true
    }

    fn after_change(&mut self, cause: ChangeCause, now: Instant) {
        let novel = self.history.current();

        if self.active_id.as_deref().is_some_and(|id| !novel.contains_id(id)) {
            self.active_id = novel.first_chapter_id().map(str::to_string);
        }
        if self.search.is_active() {
            self.search.refresh(novel);
        }

        self.revision += 1;
        self.autosave.schedule(novel.clone(), now);

        let event = ChangeEvent {
            novel,
            revision: self.revision,
            cause,
        };
        for listener in &mut self.listeners {
            listener.on_change(&event);
        }
    }

    /// Search the whole novel; the first match's slide becomes active
    pub fn find(&mut self, query: &str) -> usize {
        self.search.set_query(self.history.current(), query);
        self.activate_current_match();
        self.search.matches().len()
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
    }

    /// Step to the next or previous match, wrapping around
    pub fn navigate(&mut self, direction: Direction) -> Option<SearchMatch> {
        let found = self.search.navigate(direction).cloned();
        self.activate_current_match();
        found
    }

    fn activate_current_match(&mut self) {
        if let Some(found) = self.search.current_match() {
            self.active_id = Some(found.slide_id.clone());
        }
    }

    pub fn replace_current(&mut self, replacement: &str) -> bool {
        self.apply(Mutation::ReplaceOne {
            replacement: replacement.to_string(),
        })
    }

    /// Replace every match of the current query
    pub fn replace_all(&mut self, replacement: &str) -> bool {
        self.apply(Mutation::ReplaceAll {
            query: self.search.query().to_string(),
            replacement: replacement.to_string(),
        })
    }

    /// Styled tree of the active slide, with the current match highlighted
    pub fn active_document(&self) -> Option<StyledDocument> {
        let slide = self.active_slide()?;
        let doc = parse(&slide.content);

        match self.search.current_occurrence() {
            Some((slide_id, occurrence)) if slide_id == slide.id => {
                Some(highlight_occurrence(&doc, self.search.query(), occurrence))
            }
            _ => Some(doc),
        }
    }

    /// Snapshot the input for a title suggestion
    pub fn begin_title_suggestion(&self, id: &str, limit: usize) -> Result<TitleRequest, EditorError> {
        let slide = self
            .novel()
            .slide(id)
            .ok_or_else(|| MutationError::SlideNotFound(id.to_string()))?;
        let input = suggestion_input(slide, limit);
        if input.is_empty() {
            return Err(SuggestError::EmptyInput.into());
        }

        Ok(TitleRequest {
            slide_id: id.to_string(),
            revision: self.revision,
            input,
        })
    }

    /// Apply a suggestion result unless the document moved on since `request`
    pub fn finish_title_suggestion(
        &mut self,
        request: &TitleRequest,
        result: Result<String, SuggestError>,
    ) -> SuggestionOutcome {
        if request.revision != self.revision || !self.novel().contains_id(&request.slide_id) {
            debug!(slide_id = %request.slide_id, "Discarding stale title suggestion");
            return SuggestionOutcome::Stale;
        }

        let raw = match result {
            Ok(raw) => raw,
            Err(err) => return SuggestionOutcome::Failed(err.to_string()),
        };
        let Some(title) = clean_suggestion(&raw) else {
            return SuggestionOutcome::Failed(SuggestError::EmptySuggestion.to_string());
        };

        self.apply(Mutation::UpdateTitle {
            slide_id: request.slide_id.clone(),
            title: title.clone(),
        });
        SuggestionOutcome::Applied(title)
    }

    /// Run a suggestion synchronously against `suggester`
    pub fn suggest_title(&mut self, id: &str, suggester: &dyn TitleSuggester) -> SuggestionOutcome {
        let request = match self.begin_title_suggestion(id, self.config.suggest_input_limit) {
            Ok(request) => request,
            Err(err) => return SuggestionOutcome::Failed(err.to_string()),
        };
        let result = suggester.suggest_title(&request.input);
        self.finish_title_suggestion(&request, result)
    }

    /// Write the pending autosave if its debounce window has passed
    pub fn poll_autosave(&mut self, store: &mut dyn NovelStore, now: Instant) -> SaveStatus {
        self.autosave.flush(store, now)
    }

    /// Save the current novel immediately
    pub fn save_now(&mut self, store: &mut dyn NovelStore) -> Result<(), EditorError> {
        store.save(self.history.current())?;
        self.autosave.cancel();
        info!(title = %self.novel().title, revision = self.revision, "Novel saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SlideStatus;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn session() -> EditSession {
        EditSession::new(Novel::sample(), EditorConfig::default()).with_id_generator(IdGenerator::from_seed("s"))
    }

    #[test]
    fn test_session_creation() {
        let session = session();
        assert_eq!(session.active_id(), Some("chapter-1"));
        assert_eq!(session.revision(), 0);
        assert!(session.clipboard().is_none());
        assert!(!session.history().can_undo());
    }

    #[test]
    fn test_new_slide_becomes_active() {
        let mut session = session();
        assert!(session.apply(Mutation::AddSlide {
            parent_id: Some("chapter-2".into())
        }));

        let active = session.active_slide().unwrap();
        assert_eq!(active.title, "New Extract");
        assert_eq!(session.revision(), 1);
        assert_eq!(session.novel().slide("chapter-2").unwrap().content, "");
    }

    #[test]
    fn test_invalid_mutation_is_noop() {
        let mut session = session();
        assert!(!session.apply(Mutation::DeleteSlide {
            slide_id: "missing".into()
        }));
        assert_eq!(session.revision(), 0);
        assert_eq!(session.history().len(), 1);

        let err = session
            .try_apply(Mutation::PasteSlide { target_id: None })
            .unwrap_err();
        assert!(matches!(err, EditorError::Mutation(MutationError::EmptyClipboard)));
    }

    #[test]
    fn test_unchanged_result_is_not_committed() {
        let mut session = session();
        let events = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&events);
        session.subscribe(move |_: &ChangeEvent<'_>| *counter.borrow_mut() += 1);

        assert!(!session.apply(Mutation::UpdateStatus {
            slide_id: "chapter-1".into(),
            status: SlideStatus::Complete,
        }));
        assert!(!session.apply(Mutation::CopySlide {
            slide_id: "chapter-1".into()
        }));

        assert_eq!(*events.borrow(), 0);
        assert_eq!(session.history().len(), 1);
        assert!(session.clipboard().is_some());
    }

    #[test]
    fn test_deleting_active_slide_moves_selection() {
        let mut session = session();
        session.select("extract-1-1");

        session.apply(Mutation::DeleteSlide {
            slide_id: "extract-1-1".into(),
        });
        assert_eq!(session.active_id(), Some("extract-1-2"));

        session.apply(Mutation::DeleteSlide {
            slide_id: "chapter-1".into(),
        });
        assert_eq!(session.active_id(), Some("chapter-2"));
    }

    #[test]
    fn test_undo_redo_notify_listeners() {
        let mut session = session();
        let causes = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&causes);
        session.subscribe(move |event: &ChangeEvent<'_>| sink.borrow_mut().push(event.cause));

        session.apply(Mutation::UpdateTitle {
            slide_id: "chapter-2".into(),
            title: "Renamed".into(),
        });
        assert!(session.undo());
        assert_eq!(session.novel().slide("chapter-2").unwrap().title, "Chapter 2: The Conspiracy");
        assert!(session.redo());
        assert!(!session.redo());

        assert_eq!(
            *causes.borrow(),
            [ChangeCause::Edit, ChangeCause::Undo, ChangeCause::Redo]
        );
        assert_eq!(session.revision(), 3);
    }

    #[test]
    fn test_undo_repairs_dangling_active_id() {
        let mut session = session();
        session.apply(Mutation::AddSlide { parent_id: None });
        let added = session.active_id().map(str::to_string).unwrap();

        session.undo();
        assert!(!session.novel().contains_id(&added));
        assert_eq!(session.active_id(), Some("chapter-1"));
    }

    #[test]
    fn test_find_navigate_replace() {
        let mut session = session();
        let count = session.find("moonlight");
        assert_eq!(count, 1);
        assert_eq!(session.active_id(), Some("extract-1-1"));

        assert!(session.replace_current("starlight"));
        let content = &session.novel().slide("extract-1-1").unwrap().content;
        assert!(content.contains("[color=rgb(250,150,150)]starlight[/color]"));
        assert!(session.search_state().matches().is_empty());
        assert_eq!(session.search_state().current_index(), None);
    }

    #[test]
    fn test_active_document_highlights_current_match() {
        let mut session = session();
        session.find("whispered");

        let doc = session.active_document().unwrap();
        assert_ne!(doc, parse(&session.active_slide().unwrap().content));
        assert_eq!(
            dfn_markup::serialize(&doc),
            session.active_slide().unwrap().content
        );
    }

    #[test]
    fn test_replace_all_through_session() {
        let mut session = session();
        session.find("she");
        assert!(session.replace_all("he"));
        assert_eq!(session.find("she"), 0);
    }

    #[test]
    fn test_title_suggestion_applies_cleaned_title() {
        struct Fixed;
        impl TitleSuggester for Fixed {
            fn suggest_title(&self, input: &str) -> Result<String, SuggestError> {
                assert!(input.len() <= 2000);
                Ok("  \"Moonlit Whispers\" ".to_string())
            }
        }

        let mut session = session();
        let outcome = session.suggest_title("extract-1-1", &Fixed);
        assert_eq!(outcome, SuggestionOutcome::Applied("Moonlit Whispers".into()));
        assert_eq!(session.novel().slide("extract-1-1").unwrap().title, "Moonlit Whispers");
    }

    #[test]
    fn test_stale_suggestion_is_discarded() {
        let mut session = session();
        let request = session.begin_title_suggestion("extract-1-2", 50).unwrap();
        assert!(request.input.chars().count() <= 50);

        session.apply(Mutation::DeleteSlide {
            slide_id: "extract-1-2".into(),
        });
        let outcome = session.finish_title_suggestion(&request, Ok("Too Late".into()));
        assert_eq!(outcome, SuggestionOutcome::Stale);
        assert!(!session.novel().iter_slides().any(|s| s.title == "Too Late"));
    }

    #[test]
    fn test_suggestion_failure_is_recoverable() {
        let mut session = session();
        let request = session.begin_title_suggestion("chapter-3", 100).unwrap();
        let before = session.novel().clone();

        let outcome = session.finish_title_suggestion(&request, Err(SuggestError::Unavailable("offline".into())));
        assert!(matches!(outcome, SuggestionOutcome::Failed(_)));

        let request = session.begin_title_suggestion("chapter-3", 100).unwrap();
        let outcome = session.finish_title_suggestion(&request, Ok("\"\"".into()));
        assert!(matches!(outcome, SuggestionOutcome::Failed(_)));
        assert_eq!(session.novel(), &before);
    }

    #[test]
    fn test_autosave_after_edit() {
        let start = Instant::now();
        let mut session = session();
        let mut store = crate::storage::MemoryStore::new();
        let due = start + session.config().autosave_debounce;

        session.apply_at(
            Mutation::UpdateTitle {
                slide_id: "chapter-3".into(),
                title: "Finale".into(),
            },
            start,
        );
        assert_eq!(session.poll_autosave(&mut store, start), SaveStatus::Pending);
        assert_eq!(session.poll_autosave(&mut store, due), SaveStatus::Saved);
        let saved = store.load().unwrap().unwrap();
        assert_eq!(saved.slide("chapter-3").unwrap().title, "Finale");
    }
}
