use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::ParticipantId;

/// Participants removed from every table of the cohort.
///
/// Built once (from quality-control fields or an exclusion-list file) and
/// then shared read-only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExclusionSet {
    ids: BTreeSet<ParticipantId>,
}

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: ParticipantId) -> bool {
        self.ids.insert(id)
    }

    pub fn contains(&self, id: ParticipantId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Identifiers in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = ParticipantId> + '_ {
        self.ids.iter().copied()
    }
}

impl FromIterator<ParticipantId> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = ParticipantId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

impl Extend<ParticipantId> for ExclusionSet {
    fn extend<I: IntoIterator<Item = ParticipantId>>(&mut self, iter: I) {
        self.ids.extend(iter);
    }
}
