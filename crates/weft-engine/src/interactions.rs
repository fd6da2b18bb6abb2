//! T-way interaction index.
//!
//! Enumerates every strength-t combination of singles (one per factor,
//! factors strictly ascending, full value product) and keys each by its
//! fingerprint for O(1) recovery from a candidate row. The index also
//! carries the per-interaction detection margins against disjoint d-sets.

use indexmap::IndexMap;
use smallvec::SmallVec;
use std::collections::BTreeSet;

use weft_core::{BuildError, CommitError, DSetId, FactorId, InteractionId, MemberSingles, RowId};

use crate::catalog::{fingerprint, Catalog};

/// Largest entity count an arena can hold; IDs are u32 indexes.
pub(crate) const MAX_ENTITIES: u64 = u32::MAX as u64;

// ── Interaction ────────────────────────────────────────────────────

/// A t-way interaction: one single from each of t distinct factors.
#[derive(Clone, Debug)]
pub struct Interaction {
    /// Member singles, sorted by factor index, strictly increasing.
    pub singles: MemberSingles,
    /// Rows containing the full interaction (intersection of member rows).
    pub rows: BTreeSet<RowId>,
    /// Whether at least one committed row contains this interaction.
    pub is_covered: bool,
    /// Whether every separation margin has reached the configured delta.
    pub is_detectable: bool,
    /// D-sets that contain this interaction.
    pub sets: SmallVec<[DSetId; 4]>,
    /// Separation margin against every d-set that does NOT contain this
    /// interaction: the number of committed rows holding the interaction
    /// but no member of the d-set.
    pub margins: IndexMap<DSetId, i64>,
}

impl Interaction {
    /// Fingerprint: member-single fragments concatenated in factor order.
    pub fn fingerprint(&self, catalog: &Catalog) -> String {
        let mut key = String::new();
        for &id in &self.singles {
            key.push_str(&catalog.single(id).fingerprint());
        }
        key
    }
}

// ── InteractionIndex ───────────────────────────────────────────────

/// Arena of all t-way interactions, keyed by fingerprint.
#[derive(Clone, Debug)]
pub struct InteractionIndex {
    strength: usize,
    interactions: Vec<Interaction>,
    by_fingerprint: IndexMap<String, InteractionId>,
}

impl InteractionIndex {
    /// Enumerate every strength-t interaction over the catalog.
    ///
    /// The exact count is computed first with checked arithmetic (it is
    /// the degree-t elementary symmetric polynomial of the level counts);
    /// enumeration only starts if the result fits the ID space.
    pub fn enumerate(catalog: &Catalog, strength: usize) -> Result<Self, BuildError> {
        let levels: Vec<u64> = catalog.factors().map(|f| f.level() as u64).collect();
        let count = interaction_count(&levels, strength).unwrap_or(u128::MAX);
        if count > MAX_ENTITIES as u128 {
            return Err(BuildError::CapacityExceeded {
                entity: "interactions",
                requested: count,
                limit: MAX_ENTITIES,
            });
        }

        let mut index = Self {
            strength,
            interactions: Vec::with_capacity(count as usize),
            by_fingerprint: IndexMap::with_capacity(count as usize),
        };
        let mut stack = MemberSingles::new();
        index.enumerate_rec(catalog, 0, strength, &mut stack);
        Ok(index)
    }

    fn enumerate_rec(
        &mut self,
        catalog: &Catalog,
        start: usize,
        remaining: usize,
        stack: &mut MemberSingles,
    ) {
        if remaining == 0 {
            let interaction = Interaction {
                singles: stack.clone(),
                rows: BTreeSet::new(),
                is_covered: false,
                is_detectable: false,
                sets: SmallVec::new(),
                margins: IndexMap::new(),
            };
            let key = interaction.fingerprint(catalog);
            let id = InteractionId(self.interactions.len() as u32);
            self.interactions.push(interaction);
            self.by_fingerprint.insert(key, id);
            return;
        }
        for col in start..=(catalog.num_factors() - remaining) {
            let factor = catalog.factor(FactorId(col as u32));
            for value in 0..factor.level() {
                stack.push(factor.singles[value as usize]);
                self.enumerate_rec(catalog, col + 1, remaining - 1, stack);
                stack.pop();
            }
        }
    }

    /// Configured strength.
    pub fn strength(&self) -> usize {
        self.strength
    }

    /// Number of interactions.
    pub fn len(&self) -> usize {
        self.interactions.len()
    }

    /// Whether the index is empty (only when the catalog is).
    pub fn is_empty(&self) -> bool {
        self.interactions.is_empty()
    }

    /// The interaction at `id`.
    pub fn get(&self, id: InteractionId) -> &Interaction {
        &self.interactions[id.0 as usize]
    }

    /// Mutable access to the interaction at `id`.
    pub fn get_mut(&mut self, id: InteractionId) -> &mut Interaction {
        &mut self.interactions[id.0 as usize]
    }

    /// All interactions with their IDs, in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (InteractionId, &Interaction)> {
        self.interactions
            .iter()
            .enumerate()
            .map(|(i, x)| (InteractionId(i as u32), x))
    }

    /// Resolve a fingerprint to an ID.
    pub fn lookup(&self, key: &str) -> Option<InteractionId> {
        self.by_fingerprint.get(key).copied()
    }

    /// Recover the interactions present in a row.
    ///
    /// Enumerates every strength-t column combination (ascending), builds
    /// its fingerprint from the row's values, and resolves it through the
    /// index. The output has `C(num_factors, t)` entries in enumeration
    /// order. Called on every commit and repeatedly during look-ahead
    /// scoring, so the key buffer is reused across combinations.
    pub fn row_interactions(&self, row: &[u32]) -> Result<Vec<InteractionId>, CommitError> {
        let mut out = Vec::new();
        let mut key = String::new();
        self.recover_rec(row, 0, self.strength, &mut key, &mut out)?;
        Ok(out)
    }

    fn recover_rec(
        &self,
        row: &[u32],
        start: usize,
        remaining: usize,
        key: &mut String,
        out: &mut Vec<InteractionId>,
    ) -> Result<(), CommitError> {
        if remaining == 0 {
            let id = self.by_fingerprint.get(key.as_str()).copied().ok_or_else(|| {
                CommitError::UnknownInteraction { fingerprint: key.clone() }
            })?;
            out.push(id);
            return Ok(());
        }
        for col in start..=(row.len() - remaining) {
            let mark = key.len();
            key.push_str(&fingerprint(FactorId(col as u32), row[col]));
            self.recover_rec(row, col + 1, remaining - 1, key, out)?;
            key.truncate(mark);
        }
        Ok(())
    }
}

/// Degree-t elementary symmetric polynomial of the level counts, i.e. the
/// number of strength-t interactions. `None` on overflow.
fn interaction_count(levels: &[u64], strength: usize) -> Option<u128> {
    let mut dp = vec![0u128; strength + 1];
    dp[0] = 1;
    for &level in levels {
        for j in (1..=strength).rev() {
            let term = dp[j - 1].checked_mul(level as u128)?;
            dp[j] = dp[j].checked_add(term)?;
        }
    }
    Some(dp[strength])
}
