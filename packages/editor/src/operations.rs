//! # Structural Operations
//!
//! Pure edits over a [`Novel`]: every function takes the current value and
//! returns a new one. Unknown ids never fail; they return an unchanged copy
//! and log at debug level.
//!
//! ## Move
//! - Removes the dragged slide first, then reinserts relative to the target
//! - `Inside` only targets chapters and only accepts extract-shaped slides
//! - `Before`/`After` a chapter makes the dragged slide a chapter
//! - `Before`/`After` an extract makes it a sibling extract, unless the
//!   dragged slide is a container, which lands beside the extract's chapter
//! - Self drops and drops into the dragged slide's own extracts are rejected

use crate::ids::{IdGenerator, IdKind};
use crate::model::{Novel, Slide, SlideId, SlideStatus};
use crate::mutations::MutationError;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const NEW_CHAPTER_TITLE: &str = "New Chapter";
pub const NEW_EXTRACT_TITLE: &str = "New Extract";

/// Index path of a slide: chapter index plus extract index for extracts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlidePath {
    pub chapter: usize,
    pub extract: Option<usize>,
}

impl SlidePath {
    pub fn is_extract(&self) -> bool {
        self.extract.is_some()
    }
}

/// A located slide and its surroundings
#[derive(Debug, Clone, Copy)]
pub struct SlideLocation<'a> {
    pub slide: &'a Slide,
    /// Sequence the slide belongs to
    pub siblings: &'a [Slide],
    pub index: usize,
    /// Owning chapter when the slide is an extract
    pub parent: Option<&'a Slide>,
    pub path: SlidePath,
}

/// Drop position relative to a target slide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropPosition {
    Before,
    After,
    Inside,
}

pub fn slide_path(novel: &Novel, id: &str) -> Option<SlidePath> {
    for (chapter_index, chapter) in novel.slides.iter().enumerate() {
        if chapter.id == id {
            return Some(SlidePath {
                chapter: chapter_index,
                extract: None,
            });
        }
        if let Some(extract_index) = chapter.extracts().iter().position(|e| e.id == id) {
            return Some(SlidePath {
                chapter: chapter_index,
                extract: Some(extract_index),
            });
        }
    }
    None
}

/// Locate a slide anywhere in the two-level tree
pub fn find_slide<'a>(novel: &'a Novel, id: &str) -> Option<SlideLocation<'a>> {
    let path = slide_path(novel, id)?;
    let chapter = novel.slides.get(path.chapter)?;

    match path.extract {
        None => Some(SlideLocation {
            slide: chapter,
            siblings: &novel.slides,
            index: path.chapter,
            parent: None,
            path,
        }),
        Some(index) => {
            let siblings = chapter.extracts();
            Some(SlideLocation {
                slide: siblings.get(index)?,
                siblings,
                index,
                parent: Some(chapter),
                path,
            })
        }
    }
}

pub(crate) fn slide_at_mut(novel: &mut Novel, path: SlidePath) -> Option<&mut Slide> {
    let chapter = novel.slides.get_mut(path.chapter)?;
    match path.extract {
        None => Some(chapter),
        Some(index) => chapter.children.as_mut()?.get_mut(index),
    }
}

fn take_slide(novel: &mut Novel, path: SlidePath) -> Option<Slide> {
    match path.extract {
        None => (path.chapter < novel.slides.len()).then(|| novel.slides.remove(path.chapter)),
        Some(index) => {
            let children = novel.slides.get_mut(path.chapter)?.children.as_mut()?;
            (index < children.len()).then(|| children.remove(index))
        }
    }
}

fn insert_chapter(novel: &mut Novel, index: usize, mut slide: Slide) {
    slide.children.get_or_insert_with(Vec::new);
    let index = index.min(novel.slides.len());
    novel.slides.insert(index, slide);
}

fn insert_extract(chapter: &mut Slide, index: Option<usize>, mut slide: Slide) {
    slide.children = None;
    chapter.attach_extract(index, slide);
}

/// Deep copy with a fresh id on the slide and every descendant
pub(crate) fn clone_with_fresh_ids(slide: &Slide, novel: &Novel, ids: &mut IdGenerator) -> Slide {
    let kind = if slide.is_chapter_shaped() {
        IdKind::Chapter
    } else {
        IdKind::Extract
    };
    let mut copy = slide.clone();
    copy.id = ids.next_id(kind, novel);
    if let Some(children) = copy.children.as_mut() {
        for child in children.iter_mut() {
            child.id = ids.next_id(IdKind::Extract, novel);
        }
    }
    copy
}

/// Append a new chapter, or a new extract under `parent_id`
pub fn add_slide(novel: &Novel, parent_id: Option<&str>, ids: &mut IdGenerator) -> (Novel, Option<SlideId>) {
    let mut next = novel.clone();

    let Some(parent_id) = parent_id else {
        let id = ids.next_id(IdKind::Chapter, novel);
        next.slides.push(Slide::chapter(id.clone(), NEW_CHAPTER_TITLE));
        return (next, Some(id));
    };

    let Some(path) = slide_path(novel, parent_id).filter(|path| !path.is_extract()) else {
        debug!(parent_id = %parent_id, "add_slide: parent is not a chapter");
        return (next, None);
    };

    let id = ids.next_id(IdKind::Extract, novel);
    next.slides[path.chapter].attach_extract(None, Slide::extract(id.clone(), NEW_EXTRACT_TITLE));
    (next, Some(id))
}

/// Remove a slide together with its extracts
pub fn delete_slide(novel: &Novel, id: &str) -> Novel {
    let mut next = novel.clone();
    match slide_path(novel, id) {
        Some(path) => {
            take_slide(&mut next, path);
        }
        None => debug!(slide_id = %id, "delete_slide: unknown slide"),
    }
    next
}

/// Clone a slide subtree with fresh ids right after the original
pub fn duplicate_slide(novel: &Novel, id: &str, ids: &mut IdGenerator) -> (Novel, Option<SlideId>) {
    let mut next = novel.clone();
    let Some(location) = find_slide(novel, id) else {
        debug!(slide_id = %id, "duplicate_slide: unknown slide");
        return (next, None);
    };

    let mut copy = clone_with_fresh_ids(location.slide, novel, ids);
    copy.title = format!("{} (Copy)", location.slide.title);
    let new_id = copy.id.clone();

    let path = location.path;
    match path.extract {
        None => insert_chapter(&mut next, path.chapter + 1, copy),
        Some(index) => insert_extract(&mut next.slides[path.chapter], Some(index + 1), copy),
    }

    (next, Some(new_id))
}

/// Reasons a move would be rejected, if any
pub fn check_move(
    novel: &Novel,
    dragged_id: &str,
    target_id: &str,
    position: DropPosition,
) -> Result<(), MutationError> {
    let dragged = find_slide(novel, dragged_id)
        .ok_or_else(|| MutationError::SlideNotFound(dragged_id.to_string()))?;
    let target = find_slide(novel, target_id)
        .ok_or_else(|| MutationError::SlideNotFound(target_id.to_string()))?;

    if dragged_id == target_id {
        return Err(MutationError::InvalidMove("cannot drop a slide onto itself".into()));
    }
    if dragged.slide.extracts().iter().any(|e| e.id == target_id) {
        return Err(MutationError::InvalidMove(
            "cannot drop a chapter onto its own extract".into(),
        ));
    }
    if position == DropPosition::Inside {
        if target.parent.is_some() || !target.slide.is_chapter_shaped() {
            return Err(MutationError::InvalidMove("only chapters accept extracts".into()));
        }
        if dragged.slide.is_container() {
            return Err(MutationError::InvalidMove(
                "a chapter with extracts cannot become an extract".into(),
            ));
        }
    }
    Ok(())
}

/// Reorder or reparent a slide relative to `target_id`
pub fn move_slide(novel: &Novel, dragged_id: &str, target_id: &str, position: DropPosition) -> Novel {
    if let Err(err) = check_move(novel, dragged_id, target_id, position) {
        debug!(dragged_id = %dragged_id, target_id = %target_id, error = %err, "move_slide rejected");
        return novel.clone();
    }

    let mut next = novel.clone();
    let Some(mut dragged) = slide_path(&next, dragged_id).and_then(|from| take_slide(&mut next, from)) else {
        return novel.clone();
    };
    let Some(to) = slide_path(&next, target_id) else {
        return novel.clone();
    };
    let offset = usize::from(position == DropPosition::After);

    match (position, to.extract) {
        (DropPosition::Inside, _) => insert_extract(&mut next.slides[to.chapter], None, dragged),
        (_, None) => insert_chapter(&mut next, to.chapter + offset, dragged),
        (_, Some(index)) if !dragged.is_container() => {
            dragged.children = None;
            insert_extract(&mut next.slides[to.chapter], Some(index + offset), dragged);
        }
        (_, Some(_)) => insert_chapter(&mut next, to.chapter + offset, dragged),
    }

    next
}

fn edit_slide(novel: &Novel, id: &str, op: &str, edit: impl FnOnce(&mut Slide)) -> Novel {
    let mut next = novel.clone();
    match slide_path(novel, id).and_then(|path| slide_at_mut(&mut next, path)) {
        Some(slide) => edit(slide),
        None => debug!(slide_id = %id, op, "unknown slide"),
    }
    next
}

/// Replace a slide's markup. Containers keep their empty content.
pub fn update_content(novel: &Novel, id: &str, content: &str) -> Novel {
    edit_slide(novel, id, "update_content", |slide| {
        if slide.is_container() {
            debug!(slide_id = %slide.id, "update_content: containers hold no content");
            return;
        }
        slide.content = content.to_string();
    })
}

pub fn update_title(novel: &Novel, id: &str, title: &str) -> Novel {
    edit_slide(novel, id, "update_title", |slide| slide.title = title.to_string())
}

pub fn update_status(novel: &Novel, id: &str, status: &SlideStatus) -> Novel {
    edit_slide(novel, id, "update_status", |slide| slide.status = status.clone())
}

/// Slide to activate after `deleted_id` was removed from `before`, giving `after`.
///
/// Order: the slide now at the vacated index, the previous sibling, the first
/// extract of the first chapter, the first chapter.
pub fn next_active_after_delete(before: &Novel, after: &Novel, deleted_id: &str) -> Option<SlideId> {
    if let Some(path) = slide_path(before, deleted_id) {
        let siblings: &[Slide] = match path.extract {
            None => &after.slides,
            Some(_) => after.slides.get(path.chapter).map_or(&[], |c| c.extracts()),
        };
        let index = path.extract.unwrap_or(path.chapter);
        let candidate = siblings
            .get(index)
            .or_else(|| index.checked_sub(1).and_then(|i| siblings.get(i)));
        if let Some(slide) = candidate {
            return Some(slide.id.clone());
        }
    }

    let first = after.slides.first()?;
    Some(first.extracts().first().unwrap_or(first).id.clone())
}
