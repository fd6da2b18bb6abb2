//! D-set index.
//!
//! Enumerates every size-d combination of interactions. A d-set tracks the
//! union of its members' rows and the set of other d-sets it currently
//! cannot be distinguished from (its location conflicts); the array is
//! locating once every conflict set is empty.

use smallvec::SmallVec;
use std::collections::BTreeSet;

use weft_core::{BuildError, DSetId, MemberInteractions, RowId, SingleId};

use crate::interactions::{InteractionIndex, MAX_ENTITIES};

// ── DSet ───────────────────────────────────────────────────────────

/// An unordered set of d distinct interactions.
#[derive(Clone, Debug)]
pub struct DSet {
    /// Member interactions, in enumeration order.
    pub members: MemberInteractions,
    /// Every member interaction's singles, flattened. Duplicates are
    /// preserved: a single shared by two members counts twice in the
    /// location bookkeeping.
    pub singles: SmallVec<[SingleId; 8]>,
    /// Rows containing any member (union of member rows).
    pub rows: BTreeSet<RowId>,
    /// Other d-sets whose row sets are currently identical to this one's.
    /// The relation is kept symmetric.
    pub conflicts: BTreeSet<DSetId>,
    /// Whether this d-set has appeared and has no remaining conflicts.
    pub is_locatable: bool,
}

// ── DSetIndex ──────────────────────────────────────────────────────

/// Arena of all size-d interaction sets.
#[derive(Clone, Debug)]
pub struct DSetIndex {
    sets: Vec<DSet>,
}

impl DSetIndex {
    /// An empty index, for coverage-only arrays that never enumerate d-sets.
    pub fn empty() -> Self {
        Self { sets: Vec::new() }
    }

    /// Enumerate every size-d combination of interactions and record the
    /// containing-set backlink on each member interaction.
    ///
    /// The combination count `C(|interactions|, d)` is checked against the
    /// ID space before any allocation.
    pub fn enumerate(interactions: &mut InteractionIndex, set_size: usize) -> Result<Self, BuildError> {
        let count = binomial(interactions.len() as u128, set_size as u128).unwrap_or(u128::MAX);
        if count > MAX_ENTITIES as u128 {
            return Err(BuildError::CapacityExceeded {
                entity: "d-sets",
                requested: count,
                limit: MAX_ENTITIES,
            });
        }

        let mut index = Self { sets: Vec::with_capacity(count as usize) };
        let mut stack = MemberInteractions::new();
        index.enumerate_rec(interactions, 0, set_size, &mut stack);

        // Backlinks: each member interaction learns which d-sets contain it.
        for (i, set) in index.sets.iter().enumerate() {
            for &member in &set.members {
                interactions.get_mut(member).sets.push(DSetId(i as u32));
            }
        }
        Ok(index)
    }

    fn enumerate_rec(
        &mut self,
        interactions: &InteractionIndex,
        start: usize,
        remaining: usize,
        stack: &mut MemberInteractions,
    ) {
        if remaining == 0 {
            let mut singles = SmallVec::new();
            for &member in stack.iter() {
                singles.extend(interactions.get(member).singles.iter().copied());
            }
            self.sets.push(DSet {
                members: stack.clone(),
                singles,
                rows: BTreeSet::new(),
                conflicts: BTreeSet::new(),
                is_locatable: false,
            });
            return;
        }
        for i in start..=(interactions.len() - remaining) {
            stack.push(weft_core::InteractionId(i as u32));
            self.enumerate_rec(interactions, i + 1, remaining - 1, stack);
            stack.pop();
        }
    }

    /// Number of d-sets.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Whether the index holds no sets.
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// The d-set at `id`.
    pub fn get(&self, id: DSetId) -> &DSet {
        &self.sets[id.0 as usize]
    }

    /// Mutable access to the d-set at `id`.
    pub fn get_mut(&mut self, id: DSetId) -> &mut DSet {
        &mut self.sets[id.0 as usize]
    }

    /// All d-sets with their IDs, in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (DSetId, &DSet)> {
        self.sets
            .iter()
            .enumerate()
            .map(|(i, s)| (DSetId(i as u32), s))
    }
}

/// Checked binomial coefficient. `None` on overflow.
fn binomial(n: u128, k: u128) -> Option<u128> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);
    let mut result: u128 = 1;
    for i in 0..k {
        result = result.checked_mul(n - i)?;
        result /= i + 1;
    }
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use weft_core::InteractionId;

    fn dsets_for(levels: &[u32], strength: usize, d: usize) -> (InteractionIndex, DSetIndex) {
        let catalog = Catalog::new(levels);
        let mut interactions = InteractionIndex::enumerate(&catalog, strength).unwrap();
        let sets = DSetIndex::enumerate(&mut interactions, d).unwrap();
        (interactions, sets)
    }

    #[test]
    fn size_one_sets_mirror_interactions() {
        let (interactions, sets) = dsets_for(&[2, 2, 2], 2, 1);
        assert_eq!(sets.len(), interactions.len());
        for (i, (_, set)) in sets.iter().enumerate() {
            assert_eq!(set.members.as_slice(), &[InteractionId(i as u32)]);
            assert_eq!(set.singles.len(), 2);
        }
    }

    #[test]
    fn pair_sets_count_is_binomial() {
        // 12 interactions, d = 2: C(12,2) = 66.
        let (_, sets) = dsets_for(&[2, 2, 2], 2, 2);
        assert_eq!(sets.len(), 66);
    }

    #[test]
    fn backlinks_match_membership() {
        let (interactions, sets) = dsets_for(&[2, 2], 2, 2);
        for (set_id, set) in sets.iter() {
            for &member in &set.members {
                assert!(interactions.get(member).sets.contains(&set_id));
            }
        }
        // And no spurious backlinks.
        for (id, interaction) in interactions.iter() {
            for &set_id in &interaction.sets {
                assert!(sets.get(set_id).members.contains(&id));
            }
        }
    }

    #[test]
    fn flattened_singles_preserve_duplicates() {
        // Strength 2 over two factors gives interactions that pairwise share
        // no singles only when values differ per factor; a d-set of two
        // interactions sharing a single must count it twice.
        let (interactions, sets) = dsets_for(&[2, 2], 2, 2);
        for (_, set) in sets.iter() {
            let expected: usize = set
                .members
                .iter()
                .map(|&m| interactions.get(m).singles.len())
                .sum();
            assert_eq!(set.singles.len(), expected);
        }
    }

    #[test]
    fn capacity_check_rejects_huge_combinations() {
        let catalog = Catalog::new(&[2; 12]);
        let mut interactions = InteractionIndex::enumerate(&catalog, 2).unwrap();
        // C(264, 8) is astronomically past the ID space.
        let err = DSetIndex::enumerate(&mut interactions, 8).unwrap_err();
        assert!(matches!(err, BuildError::CapacityExceeded { entity: "d-sets", .. }));
    }

    #[test]
    fn binomial_edge_cases() {
        assert_eq!(binomial(12, 1), Some(12));
        assert_eq!(binomial(12, 2), Some(66));
        assert_eq!(binomial(5, 7), Some(0));
        assert_eq!(binomial(5, 0), Some(1));
        assert_eq!(binomial(u128::MAX, 3), None);
    }
}
