//! # Novel Mutations
//!
//! Serializable semantic operations on a [`Novel`].
//!
//! ## Design Principles
//!
//! 1. **Intent-preserving**: each mutation names one editor action
//! 2. **Validated**: [`Mutation::validate`] reports why an action cannot apply
//! 3. **Pure**: applying never touches the input novel; it yields a new one
//!
//! ## Mutation Semantics
//!
//! ### Structural (add, delete, duplicate, cut, paste, move)
//! - New slides get fresh ids from the session's [`IdGenerator`]
//! - Deleting a chapter removes its extracts
//! - Attaching the first extract to a chapter clears the chapter's content
//!
//! ### Field updates
//! - Atomic replacement of one field, last write wins
//! - Containers never take content
//!
//! ### Replace
//! - `ReplaceOne` rewrites exactly the current search match
//! - `ReplaceAll` is a literal, case-insensitive replacement everywhere

use crate::clipboard::{copy_slide, cut_slide, paste_slide, Clipboard};
use crate::ids::IdGenerator;
use crate::model::{Novel, SlideId, SlideStatus};
use crate::operations::{
    add_slide, check_move, delete_slide, duplicate_slide, find_slide, move_slide, update_content,
    update_status, update_title, DropPosition,
};
use crate::search::{replace_all, replace_one, SearchState};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Semantic mutations (intent-preserving operations)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Mutation {
    /// New chapter, or new extract under `parent_id`
    AddSlide { parent_id: Option<SlideId> },

    DeleteSlide { slide_id: SlideId },

    DuplicateSlide { slide_id: SlideId },

    /// Fill the clipboard, document unchanged
    CopySlide { slide_id: SlideId },

    CutSlide { slide_id: SlideId },

    PasteSlide { target_id: Option<SlideId> },

    MoveSlide {
        dragged_id: SlideId,
        target_id: SlideId,
        position: DropPosition,
    },

    UpdateContent { slide_id: SlideId, content: String },

    UpdateTitle { slide_id: SlideId, title: String },

    UpdateStatus { slide_id: SlideId, status: SlideStatus },

    /// Replace the current search match
    ReplaceOne { replacement: String },

    ReplaceAll { query: String, replacement: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MutationError {
    #[error("Slide not found: {0}")]
    SlideNotFound(SlideId),

    #[error("Not a chapter: {0}")]
    NotAChapter(SlideId),

    #[error("Invalid move: {0}")]
    InvalidMove(String),

    #[error("Chapter {0} has extracts and holds no content of its own")]
    ContainerContent(SlideId),

    #[error("Clipboard is empty")]
    EmptyClipboard,

    #[error("No chapter to paste the extract into")]
    NoChapter,

    #[error("No current search match")]
    NoCurrentMatch,

    #[error("Search query is empty")]
    EmptyQuery,
}

/// Session state a mutation reads or writes besides the novel
pub struct MutationContext<'a> {
    pub ids: &'a mut IdGenerator,
    pub clipboard: &'a mut Option<Clipboard>,
    pub search: &'a SearchState,
}

/// Result of applying a mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationResult {
    pub novel: Novel,

    /// Slide created by the mutation, if any
    pub created: Option<SlideId>,
}

impl MutationResult {
    fn unchanged(novel: &Novel) -> Self {
        Self {
            novel: novel.clone(),
            created: None,
        }
    }

    fn edited(novel: Novel) -> Self {
        Self { novel, created: None }
    }
}

impl Mutation {
    /// Short label for history entries and logs
    pub fn description(&self) -> &'static str {
        match self {
            Mutation::AddSlide { parent_id: None } => "Add chapter",
            Mutation::AddSlide { parent_id: Some(_) } => "Add extract",
            Mutation::DeleteSlide { .. } => "Delete",
            Mutation::DuplicateSlide { .. } => "Duplicate",
            Mutation::CopySlide { .. } => "Copy",
            Mutation::CutSlide { .. } => "Cut",
            Mutation::PasteSlide { .. } => "Paste",
            Mutation::MoveSlide { .. } => "Move",
            Mutation::UpdateContent { .. } => "Edit content",
            Mutation::UpdateTitle { .. } => "Rename",
            Mutation::UpdateStatus { .. } => "Change status",
            Mutation::ReplaceOne { .. } => "Replace",
            Mutation::ReplaceAll { .. } => "Replace all",
        }
    }

    /// Apply to `novel` with validation
    pub fn apply(&self, novel: &Novel, ctx: &mut MutationContext<'_>) -> Result<MutationResult, MutationError> {
        self.validate(novel, ctx.clipboard.as_ref(), ctx.search)?;

        let result = match self {
            Mutation::AddSlide { parent_id } => {
                let (novel, created) = add_slide(novel, parent_id.as_deref(), ctx.ids);
                MutationResult { novel, created }
            }

            Mutation::DeleteSlide { slide_id } => MutationResult::edited(delete_slide(novel, slide_id)),

            Mutation::DuplicateSlide { slide_id } => {
                let (novel, created) = duplicate_slide(novel, slide_id, ctx.ids);
                MutationResult { novel, created }
            }

            Mutation::CopySlide { slide_id } => {
                *ctx.clipboard = copy_slide(novel, slide_id);
                MutationResult::unchanged(novel)
            }

            Mutation::CutSlide { slide_id } => {
                let (novel, clipboard) = cut_slide(novel, slide_id);
                *ctx.clipboard = clipboard;
                MutationResult::edited(novel)
            }

            Mutation::PasteSlide { target_id } => match ctx.clipboard.as_ref() {
                Some(clipboard) => {
                    let (novel, created) = paste_slide(novel, clipboard, target_id.as_deref(), ctx.ids);
                    MutationResult { novel, created }
                }
                None => return Err(MutationError::EmptyClipboard),
            },

            Mutation::MoveSlide {
                dragged_id,
                target_id,
                position,
            } => MutationResult::edited(move_slide(novel, dragged_id, target_id, *position)),

            Mutation::UpdateContent { slide_id, content } => {
                MutationResult::edited(update_content(novel, slide_id, content))
            }

            Mutation::UpdateTitle { slide_id, title } => MutationResult::edited(update_title(novel, slide_id, title)),

            Mutation::UpdateStatus { slide_id, status } => {
                MutationResult::edited(update_status(novel, slide_id, status))
            }

            Mutation::ReplaceOne { replacement } => {
                let index = ctx.search.current_index().ok_or(MutationError::NoCurrentMatch)?;
                MutationResult::edited(replace_one(novel, ctx.search.matches(), index, replacement))
            }

            Mutation::ReplaceAll { query, replacement } => {
                MutationResult::edited(replace_all(novel, query, replacement))
            }
        };

        Ok(result)
    }

    /// Validate without applying
    pub fn validate(
        &self,
        novel: &Novel,
        clipboard: Option<&Clipboard>,
        search: &SearchState,
    ) -> Result<(), MutationError> {
        let require = |id: &str| {
            find_slide(novel, id)
                .map(|_| ())
                .ok_or_else(|| MutationError::SlideNotFound(id.to_string()))
        };

        match self {
            Mutation::AddSlide { parent_id: None } => Ok(()),

            Mutation::AddSlide {
                parent_id: Some(parent_id),
            } => {
                let parent = find_slide(novel, parent_id)
                    .ok_or_else(|| MutationError::SlideNotFound(parent_id.clone()))?;
                if parent.parent.is_some() {
                    return Err(MutationError::NotAChapter(parent_id.clone()));
                }
                Ok(())
            }

            Mutation::DeleteSlide { slide_id }
            | Mutation::DuplicateSlide { slide_id }
            | Mutation::CopySlide { slide_id }
            | Mutation::CutSlide { slide_id }
            | Mutation::UpdateTitle { slide_id, .. }
            | Mutation::UpdateStatus { slide_id, .. } => require(slide_id.as_str()),

            Mutation::UpdateContent { slide_id, .. } => {
                let location = find_slide(novel, slide_id)
                    .ok_or_else(|| MutationError::SlideNotFound(slide_id.clone()))?;
                if location.slide.is_container() {
                    return Err(MutationError::ContainerContent(slide_id.clone()));
                }
                Ok(())
            }

            Mutation::PasteSlide { target_id } => {
                let clipboard = clipboard.ok_or(MutationError::EmptyClipboard)?;
                match target_id {
                    Some(target_id) => require(target_id.as_str()),
                    None if !clipboard.is_chapter() && novel.slides.is_empty() => Err(MutationError::NoChapter),
                    None => Ok(()),
                }
            }

            Mutation::MoveSlide {
                dragged_id,
                target_id,
                position,
            } => check_move(novel, dragged_id, target_id, *position),

            Mutation::ReplaceOne { .. } => {
                let match_ = search.current_match().ok_or(MutationError::NoCurrentMatch)?;
                require(match_.slide_id.as_str())
            }

            Mutation::ReplaceAll { query, .. } => {
                if query.is_empty() {
                    return Err(MutationError::EmptyQuery);
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Slide;

    struct Fixture {
        ids: IdGenerator,
        clipboard: Option<Clipboard>,
        search: SearchState,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                ids: IdGenerator::from_seed("m"),
                clipboard: None,
                search: SearchState::default(),
            }
        }

        fn apply(&mut self, novel: &Novel, mutation: Mutation) -> Result<MutationResult, MutationError> {
            let mut ctx = MutationContext {
                ids: &mut self.ids,
                clipboard: &mut self.clipboard,
                search: &self.search,
            };
            mutation.apply(novel, &mut ctx)
        }
    }

    #[test]
    fn test_mutation_serialization() {
        let mutation = Mutation::MoveSlide {
            dragged_id: "extract-1-1".to_string(),
            target_id: "chapter-2".to_string(),
            position: DropPosition::Inside,
        };

        let json = serde_json::to_string(&mutation).unwrap();
        assert!(json.contains("\"inside\""));
        let deserialized: Mutation = serde_json::from_str(&json).unwrap();

        assert_eq!(mutation, deserialized);
    }

    #[test]
    fn test_validation_rejects_unknown_ids() {
        let novel = Novel::sample();
        let search = SearchState::default();

        let mutation = Mutation::UpdateTitle {
            slide_id: "".to_string(),
            title: "x".to_string(),
        };
        assert_eq!(
            mutation.validate(&novel, None, &search),
            Err(MutationError::SlideNotFound(String::new()))
        );
    }

    #[test]
    fn test_add_extract_requires_chapter_parent() {
        let novel = Novel::sample();
        let mutation = Mutation::AddSlide {
            parent_id: Some("extract-1-1".to_string()),
        };
        assert_eq!(
            mutation.validate(&novel, None, &SearchState::default()),
            Err(MutationError::NotAChapter("extract-1-1".to_string()))
        );
    }

    #[test]
    fn test_copy_then_paste_through_context() {
        let novel = Novel::sample();
        let mut fixture = Fixture::new();

        let copied = fixture
            .apply(&novel, Mutation::CopySlide { slide_id: "chapter-2".into() })
            .unwrap();
        assert_eq!(copied.novel, novel);
        assert!(fixture.clipboard.is_some());

        let pasted = fixture.apply(&novel, Mutation::PasteSlide { target_id: None }).unwrap();
        let created = pasted.created.unwrap();
        assert_eq!(pasted.novel.slides.last().map(|s| &s.id), Some(&created));
    }

    #[test]
    fn test_paste_needs_clipboard() {
        let novel = Novel::sample();
        let mut fixture = Fixture::new();
        assert_eq!(
            fixture.apply(&novel, Mutation::PasteSlide { target_id: None }),
            Err(MutationError::EmptyClipboard)
        );
    }

    #[test]
    fn test_container_content_is_rejected() {
        let novel = Novel::sample();
        let mutation = Mutation::UpdateContent {
            slide_id: "chapter-1".into(),
            content: "stray".into(),
        };
        assert_eq!(
            mutation.validate(&novel, None, &SearchState::default()),
            Err(MutationError::ContainerContent("chapter-1".into()))
        );
    }

    #[test]
    fn test_replace_one_without_search_fails() {
        let novel = Novel::new("N").with_slides(vec![Slide::chapter("a", "A").with_content("x")]);
        let mut fixture = Fixture::new();
        assert_eq!(
            fixture.apply(&novel, Mutation::ReplaceOne { replacement: "y".into() }),
            Err(MutationError::NoCurrentMatch)
        );
    }

    #[test]
    fn test_replace_one_uses_current_match() {
        let novel = Novel::new("N").with_slides(vec![Slide::chapter("a", "A").with_content("cat cat")]);
        let mut fixture = Fixture::new();
        fixture.search.set_query(&novel, "cat");
        fixture.search.navigate(crate::search::Direction::Next);

        let result = fixture
            .apply(&novel, Mutation::ReplaceOne { replacement: "dog".into() })
            .unwrap();
        assert_eq!(result.novel.slides[0].content, "cat dog");
    }
}
