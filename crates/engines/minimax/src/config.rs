use serde::{Deserialize, Serialize};

/// Depth searched below each root move when nothing else is configured.
pub const DEFAULT_DEPTH: u8 = 3;

/// Search settings, usually read from the `[engine]` table of a session file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Plies searched below the root move; the root adds one more.
    pub depth: u8,
    /// Score root moves on the rayon pool, each on its own board copy.
    pub parallel_root: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            parallel_root: false,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
