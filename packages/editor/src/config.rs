use std::time::Duration;

/// Settings passed explicitly into an [`crate::EditSession`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    /// Undo levels kept (0 = unlimited)
    pub history_limit: usize,

    pub autosave_debounce: Duration,

    /// Characters of slide text sent to the title service
    pub suggest_input_limit: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: 200,
            autosave_debounce: Duration::from_millis(1000),
            suggest_input_limit: 2000,
        }
    }
}
