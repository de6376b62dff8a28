pub const ROOT_PATH: &str = "/";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CurrentPath {
    #[default]
    Root,
    InChat(String),
}

impl CurrentPath {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Root => ROOT_PATH,
            Self::InChat(name) => name,
        }
    }

    pub fn chat_name(&self) -> Option<&str> {
        match self {
            Self::Root => None,
            Self::InChat(name) => Some(name),
        }
    }
}

impl std::fmt::Display for CurrentPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-client interpreter state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub path: CurrentPath,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_chat(name: impl Into<String>) -> Self {
        Self {
            path: CurrentPath::InChat(name.into()),
        }
    }

    pub fn at_root(&self) -> Self {
        Self {
            path: CurrentPath::Root,
        }
    }

    pub fn is_root(&self) -> bool {
        self.path == CurrentPath::Root
    }
}
