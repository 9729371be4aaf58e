//! Seeded partition of participant identifiers.

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::info;

use cohort_model::ParticipantId;

use crate::proportions::SplitProportions;

/// Seed used when the caller does not supply one.
pub const DEFAULT_SEED: u64 = 147;

/// Disjoint train/validation/test identifier lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SplitAssignment {
    pub train: Vec<ParticipantId>,
    pub val: Vec<ParticipantId>,
    pub test: Vec<ParticipantId>,
}

impl SplitAssignment {
    /// Total number of assigned identifiers.
    pub fn len(&self) -> usize {
        self.train.len() + self.val.len() + self.test.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(train, val, test)` sizes.
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.train.len(), self.val.len(), self.test.len())
    }

    /// Every assigned identifier, sorted ascending.
    pub fn sorted_ids(&self) -> Vec<ParticipantId> {
        let mut ids: Vec<ParticipantId> = self
            .train
            .iter()
            .chain(&self.val)
            .chain(&self.test)
            .copied()
            .collect();
        ids.sort_unstable();
        ids
    }
}

/// Shuffles `ids` with a generator seeded from `seed` and cuts the result
/// into train, validation, and test subsets.
///
/// Identifiers are sorted and de-duplicated first, so the assignment depends
/// only on the identifier set and the seed, never on input order.
pub fn split_cohort<I>(ids: I, proportions: SplitProportions, seed: u64) -> SplitAssignment
where
    I: IntoIterator<Item = ParticipantId>,
{
    let mut ids: Vec<ParticipantId> = ids.into_iter().collect();
    ids.sort_unstable();
    ids.dedup();

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    ids.shuffle(&mut rng);

    let (n_train, n_val, _) = proportions.sizes(ids.len());
    let test = ids.split_off(n_train + n_val);
    let val = ids.split_off(n_train);
    let assignment = SplitAssignment {
        train: ids,
        val,
        test,
    };

    let (train, val, test) = assignment.counts();
    info!(seed, train, val, test, "cohort split");
    assignment
}
