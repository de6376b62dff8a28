use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChatPolicy {
    #[serde(default = "default_true")]
    pub require_membership_to_post: bool,
    #[serde(default = "default_true")]
    pub unique_members: bool,
}

impl ChatPolicy {
    /// Any signed-in caller may post, and members may repeat.
    pub fn permissive() -> Self {
        Self {
            require_membership_to_post: false,
            unique_members: false,
        }
    }
}

impl Default for ChatPolicy {
    fn default() -> Self {
        Self {
            require_membership_to_post: true,
            unique_members: true,
        }
    }
}

fn default_true() -> bool {
    true
}
