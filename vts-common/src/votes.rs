//! Good/bad vote ledger
//!
//! Two disjoint sets of clip ids. A clip is in at most one of them; voting
//! the same mark twice toggles the vote off, voting the other mark moves it.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::clip::ClipId;
use crate::Error;

/// Vote mark accepted from clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteMark {
    Good,
    Bad,
}

impl VoteMark {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteMark::Good => "good",
            VoteMark::Bad => "bad",
        }
    }
}

impl fmt::Display for VoteMark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoteMark {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "good" => Ok(VoteMark::Good),
            "bad" => Ok(VoteMark::Bad),
            other => Err(Error::InvalidInput(format!(
                "vote must be \"good\" or \"bad\", got {:?}",
                other
            ))),
        }
    }
}

/// Sorted copy of the ledger contents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VoteSnapshot {
    pub good: Vec<ClipId>,
    pub bad: Vec<ClipId>,
}

/// Vote state for the current dataset selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoteLedger {
    good: BTreeSet<ClipId>,
    bad: BTreeSet<ClipId>,
}

impl VoteLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a vote and return the clip's resulting mark
    ///
    /// | current | good    | bad     |
    /// |---------|---------|---------|
    /// | good    | none    | bad     |
    /// | bad     | good    | none    |
    /// | none    | good    | bad     |
    pub fn toggle(&mut self, id: ClipId, mark: VoteMark) -> Option<VoteMark> {
        let (same, other) = match mark {
            VoteMark::Good => (&mut self.good, &mut self.bad),
            VoteMark::Bad => (&mut self.bad, &mut self.good),
        };

        if same.remove(&id) {
            None
        } else {
            other.remove(&id);
            same.insert(id);
            Some(mark)
        }
    }

    /// Current mark of a clip, if any
    pub fn mark_of(&self, id: ClipId) -> Option<VoteMark> {
        if self.good.contains(&id) {
            Some(VoteMark::Good)
        } else if self.bad.contains(&id) {
            Some(VoteMark::Bad)
        } else {
            None
        }
    }

    pub fn snapshot(&self) -> VoteSnapshot {
        VoteSnapshot {
            good: self.good.iter().copied().collect(),
            bad: self.bad.iter().copied().collect(),
        }
    }

    pub fn good_count(&self) -> usize {
        self.good.len()
    }

    pub fn bad_count(&self) -> usize {
        self.bad.len()
    }

    pub fn is_empty(&self) -> bool {
        self.good.is_empty() && self.bad.is_empty()
    }

    /// Drop every vote
    pub(crate) fn reset(&mut self) {
        self.good.clear();
        self.bad.clear();
    }
}
