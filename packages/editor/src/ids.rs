use crate::model::{Novel, SlideId};
use crc32fast::Hasher;
use std::time::{SystemTime, UNIX_EPOCH};

/// Seed derived from a document name using CRC32
pub fn document_seed(name: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(name.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Seed for one editing session: the document name mixed with the session start
pub fn session_seed(name: &str, started: SystemTime) -> String {
    let nanos = started
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default();
    document_seed(&format!("{name}@{nanos}"))
}

/// Which kind of slide an id is minted for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    Chapter,
    Extract,
}

impl IdKind {
    pub fn prefix(self) -> &'static str {
        match self {
            IdKind::Chapter => "chapter",
            IdKind::Extract => "extract",
        }
    }
}

/// Sequential slide id generator
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u32,
}

impl IdGenerator {
    pub fn new(name: &str) -> Self {
        Self {
            seed: document_seed(name),
            count: 0,
        }
    }

    /// Generator for a session starting now. Ids minted by earlier sessions,
    /// including ones since deleted, are not minted again.
    pub fn for_session(name: &str) -> Self {
        Self::from_seed(session_seed(name, SystemTime::now()))
    }

    pub fn from_seed(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            count: 0,
        }
    }

    /// Next id of the given kind that `novel` does not already use
    pub fn next_id(&mut self, kind: IdKind, novel: &Novel) -> SlideId {
        loop {
            self.count += 1;
            let id = format!("{}-{}-{}", kind.prefix(), self.seed, self.count);
            if !novel.contains_id(&id) {
                return id;
            }
        }
    }
}
