use serde::Serialize;
use std::fmt;

/// Whether an activity type counts towards utilization.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Utilized {
    Yes,
    No,
    Unknown,
}

impl Utilized {
    const YES_TYPES: [&'static str; 4] = ["Worktime", "Vacation", "Holiday", "Time Bank"];
    const NO_TYPES: [&'static str; 5] = ["Idle", "Meeting", "Training", "Overhead", "RND"];

    /// Total mapping from an activity `Type`; unlisted types are `Unknown`.
    pub fn from_type(kind: &str) -> Self {
        if Self::YES_TYPES.contains(&kind) {
            Utilized::Yes
        } else if Self::NO_TYPES.contains(&kind) {
            Utilized::No
        } else {
            Utilized::Unknown
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Utilized::Yes => "yes",
            Utilized::No => "no",
            Utilized::Unknown => "unknown",
        }
    }

    pub fn is_yes(&self) -> bool {
        matches!(self, Utilized::Yes)
    }
}

impl fmt::Display for Utilized {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
