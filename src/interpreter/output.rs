#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    Empty,
    Text(String),
    Error(String),
    CommandNotFound(String),
}

impl CommandOutput {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn error(value: impl Into<String>) -> Self {
        Self::Error(value.into())
    }

    /// Text or nothing when a listing is empty.
    pub fn text_or_empty(value: String) -> Self {
        if value.is_empty() {
            Self::Empty
        } else {
            Self::Text(value)
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_) | Self::CommandNotFound(_))
    }

    /// What the shell shows, if anything.
    pub fn rendered(&self) -> Option<String> {
        match self {
            Self::Empty => None,
            Self::Text(text) | Self::Error(text) => Some(text.clone()),
            Self::CommandNotFound(verb) => Some(format!("{verb}: command not found")),
        }
    }
}
