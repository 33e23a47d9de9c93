//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::mutations::MutationError),

    #[error("Store error: {0}")]
    Store(#[from] crate::storage::StoreError),

    #[error("Title suggestion error: {0}")]
    Suggest(#[from] crate::suggest::SuggestError),
}
