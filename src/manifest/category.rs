//! Manifest categories
//!
//! Each category maps to a subdirectory of the target root. Entries of the
//! `skill` category are directory bundles; every other category holds files.

use std::fmt;
use std::str::FromStr;

use crate::error::{GyoshuError, path};

/// A top-level grouping of installable entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Agent,
    Command,
    Tool,
    Skill,
    Lib,
    Bridge,
    Plugin,
}

impl Category {
    /// The fixed allow-list, in the order the installer documents them
    pub const ALL: [Category; 7] = [
        Category::Agent,
        Category::Command,
        Category::Tool,
        Category::Skill,
        Category::Lib,
        Category::Bridge,
        Category::Plugin,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Agent => "agent",
            Category::Command => "command",
            Category::Tool => "tool",
            Category::Skill => "skill",
            Category::Lib => "lib",
            Category::Bridge => "bridge",
            Category::Plugin => "plugin",
        }
    }

    /// Whether entries of this category are directory bundles
    pub fn is_bundle(self) -> bool {
        self == Category::Skill
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = GyoshuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| path::invalid_category(s))
    }
}
