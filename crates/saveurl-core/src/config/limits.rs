//! Domain limits.

use serde::{Deserialize, Serialize};

/// Size limits applied to groups and memberships.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Maximum number of membership rows per group (owner excluded).
    #[serde(default = "default_max_members")]
    pub max_group_members: i64,
    /// Maximum length of a group name, in characters, after trimming.
    #[serde(default = "default_name_max")]
    pub group_name_max_length: usize,
    /// Maximum length of a group description, in characters, after trimming.
    #[serde(default = "default_description_max")]
    pub group_description_max_length: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_group_members: default_max_members(),
            group_name_max_length: default_name_max(),
            group_description_max_length: default_description_max(),
        }
    }
}

fn default_max_members() -> i64 {
    50
}

fn default_name_max() -> usize {
    50
}

fn default_description_max() -> usize {
    200
}
