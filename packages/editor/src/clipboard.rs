//! Copy, cut and paste of slide subtrees
//!
//! The clipboard owns a deep snapshot, so later edits to the novel never show
//! through. Every paste mints fresh ids for the pasted slide and its extracts.

use crate::ids::IdGenerator;
use crate::model::{Novel, Slide, SlideId};
use crate::operations::{clone_with_fresh_ids, delete_slide, find_slide};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Snapshot of one chapter (with its extracts) or one extract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clipboard {
    slide: Slide,
}

impl Clipboard {
    pub fn new(slide: Slide) -> Self {
        Self { slide }
    }

    pub fn slide(&self) -> &Slide {
        &self.slide
    }

    /// Pastes as a top-level chapter
    pub fn is_chapter(&self) -> bool {
        self.slide.is_chapter_shaped()
    }
}

pub fn copy_slide(novel: &Novel, id: &str) -> Option<Clipboard> {
    find_slide(novel, id).map(|location| Clipboard::new(location.slide.clone()))
}

/// Copy then delete
pub fn cut_slide(novel: &Novel, id: &str) -> (Novel, Option<Clipboard>) {
    match copy_slide(novel, id) {
        Some(clipboard) => (delete_slide(novel, id), Some(clipboard)),
        None => {
            debug!(slide_id = %id, "cut_slide: unknown slide");
            (novel.clone(), None)
        }
    }
}

/// Paste a fresh copy of the clipboard.
///
/// Chapters land at top level: appended without a target, otherwise right
/// after the chapter that is or contains the target. Extracts go into the
/// target chapter (appended), right after a target extract, or into the first
/// chapter when there is no target.
pub fn paste_slide(
    novel: &Novel,
    clipboard: &Clipboard,
    target_id: Option<&str>,
    ids: &mut IdGenerator,
) -> (Novel, Option<SlideId>) {
    let mut next = novel.clone();
    let mut pasted = clone_with_fresh_ids(clipboard.slide(), novel, ids);
    let new_id = pasted.id.clone();

    let location = match target_id {
        Some(target_id) => match find_slide(novel, target_id) {
            Some(location) => Some(location.path),
            None => {
                debug!(target_id = %target_id, "paste_slide: unknown target");
                return (next, None);
            }
        },
        None => None,
    };

    if clipboard.is_chapter() {
        let index = location.map_or(next.slides.len(), |path| path.chapter + 1);
        next.slides.insert(index, pasted);
        return (next, Some(new_id));
    }

    pasted.children = None;
    let (chapter_index, extract_index) = match location {
        Some(path) => (path.chapter, path.extract.map(|index| index + 1)),
        None => (0, None),
    };
    let Some(chapter) = next.slides.get_mut(chapter_index) else {
        debug!("paste_slide: no chapter to paste the extract into");
        return (next, None);
    };
    chapter.attach_extract(extract_index, pasted);

    (next, Some(new_id))
}
