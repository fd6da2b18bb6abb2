//! Row seeding and tweak heuristics.
//!
//! Each constructed row goes through three stages: a fresh shuffle of the
//! column visit order, a seed (random, greedy-by-singles, or anchored to
//! the most-conflicted d-set), and a phase-specific tweak. The heavy
//! exhaustive tweak scores every possible row through look-ahead clones
//! and is meant for the final few rows only.

use rand::seq::SliceRandom;
use rand::Rng;
use std::thread;

use weft_core::{CommitError, DSetId, DontCareLevel, FactorId, RowId};

use crate::array::Array;

// ── RowHeuristic ───────────────────────────────────────────────────

/// Which seeding/tweak pair [`Array::add_row_with`] uses for one row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowHeuristic {
    /// Greedy-singles seed plus the coverage tweak. Cheap; the workhorse
    /// while coverage problems dominate.
    Coverage,
    /// Random seed anchored to the most-conflicted d-set, plus the
    /// location tweak.
    Location,
    /// Random seed, no tweak. A separation-guided seed is reserved for
    /// future work.
    Detection,
    /// Random seed plus exhaustive look-ahead over every possible row.
    /// Exponential in the factor count; final-push only.
    Exhaustive,
}

impl Array {
    /// Append one row chosen by [`Array::select_heuristic`].
    ///
    /// Assumes at least one row is already present; seed the array with
    /// [`Array::add_random_row`] first.
    pub fn add_row(&mut self) -> Result<RowId, CommitError> {
        let heuristic = self.select_heuristic();
        self.add_row_with(heuristic)
    }

    /// Pick a heuristic from the outstanding problem counters.
    ///
    /// Coverage work always comes first. Location and detection phases
    /// run their dedicated heuristics while plenty of problems remain;
    /// once the score drops to the single count the exhaustive search
    /// takes over for the final push.
    pub fn select_heuristic(&self) -> RowHeuristic {
        let objective = self.params.objective;
        let few_left = self.score <= self.catalog.num_singles() as i64;
        if !self.is_covering {
            RowHeuristic::Coverage
        } else if objective.wants_location() && !self.is_locating && !few_left {
            RowHeuristic::Location
        } else if objective.wants_detection() && !self.is_detecting && !few_left {
            RowHeuristic::Detection
        } else {
            RowHeuristic::Exhaustive
        }
    }

    /// Append one row constructed under `heuristic`.
    pub fn add_row_with(&mut self, heuristic: RowHeuristic) -> Result<RowId, CommitError> {
        // Fresh column order for this row.
        self.permutation.shuffle(&mut self.rng);

        let row = match heuristic {
            RowHeuristic::Coverage => {
                let mut row = self.seed_greedy_singles();
                self.tweak_coverage(&mut row)?;
                row
            }
            RowHeuristic::Location if self.dsets.is_empty() => self.seed_random(),
            RowHeuristic::Location => {
                let (mut row, anchor) = self.seed_conflict_anchor();
                self.tweak_location(&mut row, anchor);
                row
            }
            RowHeuristic::Detection => self.seed_random(),
            RowHeuristic::Exhaustive => {
                let mut row = self.seed_random();
                self.tweak_exhaustive(&mut row)?;
                row
            }
        };
        self.commit_row(&row, true)
    }

    // ── Seeds ──────────────────────────────────────────────────────

    /// Uniform random level per column.
    fn seed_random(&mut self) -> Vec<u32> {
        let mut row = Vec::with_capacity(self.params.num_factors());
        for col in 0..self.params.num_factors() {
            let level = self.params.levels[col];
            row.push(self.rng.gen_range(0..level));
        }
        row
    }

    /// Per column (in permuted order), the single with the most
    /// outstanding work; don't-care columns draw randomly.
    ///
    /// Also advances each factor's don't-care progression as the chosen
    /// single's issue classes empty out.
    fn seed_greedy_singles(&mut self) -> Vec<u32> {
        let objective = self.params.objective;
        let num_factors = self.params.num_factors();
        let mut row = vec![0u32; num_factors];
        for i in 0..num_factors {
            let col = self.permutation[i];
            if self.dont_cares[col].satisfies(objective) {
                row[col] = self.rng.gen_range(0..self.params.levels[col]);
                continue;
            }

            // Assume level 0 is the neediest, then let any other level
            // displace it; ties fall to a fair coin.
            let members = self.catalog.factor(FactorId(col as u32)).singles.clone();
            let mut worst = members[0];
            let mut worst_weight = self.catalog.single(worst).issue_weight();
            for &candidate in &members[1..] {
                let weight = self.catalog.single(candidate).issue_weight();
                if weight > worst_weight || (weight == worst_weight && self.rng.gen_bool(0.5)) {
                    worst = candidate;
                    worst_weight = weight;
                }
            }
            let (value, coverage, location, detection) = {
                let single = self.catalog.single(worst);
                (
                    single.value,
                    single.coverage_issues,
                    single.location_issues,
                    single.detection_issues,
                )
            };
            row[col] = value;

            if self.dont_cares[col] == DontCareLevel::None && coverage == 0 {
                self.dont_cares[col] = DontCareLevel::Coverage;
            }
            if objective.wants_location()
                && self.dont_cares[col] == DontCareLevel::Coverage
                && location == 0
            {
                self.dont_cares[col] = DontCareLevel::CoverageLocation;
            }
            if objective.wants_detection()
                && self.dont_cares[col] == DontCareLevel::CoverageLocation
                && detection == 0
            {
                self.dont_cares[col] = DontCareLevel::All;
            }
            if self.dont_cares[col].satisfies(objective) {
                row[col] = self.rng.gen_range(0..self.params.levels[col]);
            }
        }
        row
    }

    /// Random seed with the most-conflicted d-set's singles locked in.
    ///
    /// Returns the anchor so the location tweak can avoid overwriting
    /// its columns. Ties for the most conflicts resolve uniformly.
    fn seed_conflict_anchor(&mut self) -> (Vec<u32>, DSetId) {
        let mut row = self.seed_random();

        let mut worst_count = i64::MIN;
        let mut worst_sets: Vec<DSetId> = Vec::new();
        for (sid, set) in self.dsets.iter() {
            let count = set.conflicts.len() as i64;
            if count >= worst_count {
                if count > worst_count {
                    worst_count = count;
                    worst_sets.clear();
                }
                worst_sets.push(sid);
            }
        }
        let anchor = worst_sets[self.rng.gen_range(0..worst_sets.len())];

        let singles = self.dsets.get(anchor).singles.clone();
        for s in singles {
            let single = self.catalog.single(s);
            row[single.factor.0 as usize] = single.value;
        }
        (row, anchor)
    }

    // ── Tweaks ─────────────────────────────────────────────────────

    /// Lightweight coverage-only tweak.
    ///
    /// Counts, per factor, how many of the row's interactions are wasted
    /// (already covered) minus how many are fresh. A row with no factor
    /// in surplus is kept as is; otherwise the worst factors get their
    /// values cycled until one trial strictly improves the surplus, and
    /// failing that, every still-active factor hunts for any value that
    /// exposes an uncovered interaction.
    fn tweak_coverage(&mut self, row: &mut Vec<u32>) -> Result<(), CommitError> {
        let num_factors = self.params.num_factors();
        let mut local_marks = self.dont_cares.clone();
        let mut problems = vec![0i64; num_factors];

        for &iid in &self.interactions.row_interactions(row)? {
            let inter = self.interactions.get(iid);
            if !inter.rows.is_empty() {
                // Covered interactions touching a mid-progression factor
                // are not charged against anyone.
                let exempt = inter.singles.iter().any(|&s| {
                    local_marks[self.catalog.single(s).factor.0 as usize] != DontCareLevel::None
                });
                if exempt {
                    continue;
                }
                for &s in &inter.singles {
                    problems[self.catalog.single(s).factor.0 as usize] += 1;
                }
            } else {
                for &s in &inter.singles {
                    problems[self.catalog.single(s).factor.0 as usize] -= 1;
                }
            }
        }

        let mut max_problems = 0i64;
        for &p in &problems {
            if p > max_problems {
                max_problems = p;
            }
        }
        if max_problems == 0 {
            return Ok(()); // row is good enough as is
        }

        // Cycle values on the worst factors; first strict improvement wins.
        for i in 0..num_factors {
            let col = self.permutation[i];
            if problems[col] != max_problems {
                continue;
            }
            let level = self.params.levels[col];
            let original = row[col];
            for _ in 1..level {
                row[col] = (row[col] + 1) % level;
                if self.coverage_trial_max(row)? < max_problems {
                    return Ok(());
                }
            }
            row[col] = original;
        }

        // Last resort: sweep for anything still missing.
        for i in 0..num_factors {
            let col = self.permutation[i];
            if local_marks[col] != DontCareLevel::None {
                continue;
            }
            let level = self.params.levels[col];
            let mut improved = false;
            for _ in 0..level {
                row[col] = (row[col] + 1) % level;
                let mut exposed_factors: Vec<usize> = Vec::new();
                improved = false;
                for &iid in &self.interactions.row_interactions(row)? {
                    let inter = self.interactions.get(iid);
                    if inter.rows.is_empty() {
                        for &s in &inter.singles {
                            exposed_factors.push(self.catalog.single(s).factor.0 as usize);
                        }
                        improved = true;
                    }
                }
                if improved {
                    for factor in exposed_factors {
                        local_marks[factor] = DontCareLevel::Coverage;
                    }
                    break;
                }
            }
            if !improved {
                row[col] = self.rng.gen_range(0..level);
            }
        }
        Ok(())
    }

    /// Surplus recount for one coverage trial, skipping factors that have
    /// no coverage work left.
    fn coverage_trial_max(&self, row: &[u32]) -> Result<i64, CommitError> {
        let num_factors = row.len();
        let mut problems = vec![0i64; num_factors];
        for &iid in &self.interactions.row_interactions(row)? {
            let inter = self.interactions.get(iid);
            if !inter.rows.is_empty() {
                let exempt = inter
                    .singles
                    .iter()
                    .any(|&s| self.catalog.single(s).coverage_issues == 0);
                if exempt {
                    continue;
                }
                for &s in &inter.singles {
                    problems[self.catalog.single(s).factor.0 as usize] += 1;
                }
            } else {
                for &s in &inter.singles {
                    problems[self.catalog.single(s).factor.0 as usize] -= 1;
                }
            }
        }
        let mut max = i64::MIN;
        for col in 0..num_factors {
            let current = self.catalog.single_at(FactorId(col as u32), row[col]);
            if self.catalog.single(current).coverage_issues == 0 {
                continue;
            }
            if problems[col] > max {
                max = problems[col];
            }
        }
        Ok(max)
    }

    /// Location tweak: bias unlocked columns toward the singles that
    /// appear in the most of the anchor's conflicting d-sets.
    fn tweak_location(&self, row: &mut [u32], anchor: DSetId) {
        let num_factors = row.len();
        let mut locked = vec![false; num_factors];
        for &s in &self.dsets.get(anchor).singles {
            locked[self.catalog.single(s).factor.0 as usize] = true;
        }

        let mut counts = vec![0i64; self.catalog.num_singles()];
        for &conflict in &self.dsets.get(anchor).conflicts {
            for &s in &self.dsets.get(conflict).singles {
                counts[s.0 as usize] += 1;
            }
        }

        for col in 0..num_factors {
            if locked[col] {
                continue;
            }
            let factor = self.catalog.factor(FactorId(col as u32));
            let mut best_value = 0u32;
            let mut best_count = 0i64;
            for (value, &sid) in factor.singles.iter().enumerate() {
                let count = counts[sid.0 as usize];
                if count > best_count {
                    best_value = value as u32;
                    best_count = count;
                }
            }
            if best_count != 0 {
                row[col] = best_value; // otherwise keep the random draw
            }
        }
    }

    /// Exhaustive tweak: score every possible row by simulated commit and
    /// take the best, ties resolved uniformly.
    fn tweak_exhaustive(&mut self, row: &mut Vec<u32>) -> Result<(), CommitError> {
        let candidates = self.exhaustive_candidates(row);
        let scores = self.lookahead_scores(&candidates)?;

        let mut best_score = i64::MIN;
        let mut best: Vec<usize> = Vec::new();
        for (idx, &score) in scores.iter().enumerate() {
            if score >= best_score {
                if score > best_score {
                    best_score = score;
                    best.clear();
                }
                best.push(idx);
            }
        }
        let choice = best[self.rng.gen_range(0..best.len())];
        row.copy_from_slice(&candidates[choice]);
        Ok(())
    }

    /// The full level product over columns in permuted order, each column
    /// cycling from the seeded value for variety.
    pub(crate) fn exhaustive_candidates(&self, row: &[u32]) -> Vec<Vec<u32>> {
        let mut out = Vec::new();
        let mut scratch = row.to_vec();
        self.candidates_rec(&mut scratch, 0, &mut out);
        out
    }

    fn candidates_rec(&self, row: &mut Vec<u32>, depth: usize, out: &mut Vec<Vec<u32>>) {
        if depth == row.len() {
            out.push(row.clone());
            return;
        }
        let col = self.permutation[depth];
        let level = self.params.levels[col];
        let original = row[col];
        for offset in 0..level {
            row[col] = (original + offset) % level;
            self.candidates_rec(row, depth + 1, out);
        }
        row[col] = original;
    }

    /// Score every candidate by simulated commit on an isolated clone.
    ///
    /// Work fans out over scoped threads; results come back through a
    /// channel keyed by candidate index, so the assembled vector (and
    /// therefore tie-breaking) is deterministic for a given seed.
    fn lookahead_scores(&self, candidates: &[Vec<u32>]) -> Result<Vec<i64>, CommitError> {
        let workers = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
            .min(candidates.len().max(1));
        let (tx, rx) = crossbeam_channel::unbounded();
        thread::scope(|scope| {
            for worker in 0..workers {
                let tx = tx.clone();
                scope.spawn(move || {
                    let mut idx = worker;
                    while idx < candidates.len() {
                        let result = self.score_candidate(&candidates[idx]);
                        if tx.send((idx, result)).is_err() {
                            return;
                        }
                        idx += workers;
                    }
                });
            }
            drop(tx);
        });

        let mut scores = vec![0i64; candidates.len()];
        for (idx, result) in rx.iter() {
            scores[idx] = result?;
        }
        Ok(scores)
    }

    /// The weighted counter movement a candidate row would cause.
    ///
    /// Higher-level factors weigh more, and later property phases weigh
    /// progressively more per unit of movement.
    fn score_candidate(&self, candidate: &[u32]) -> Result<i64, CommitError> {
        let mut sim = self.clone();
        sim.commit_row(candidate, false)?;

        let mut score = 0i64;
        for (id, before) in self.catalog.singles() {
            let after = sim.catalog.single(id);
            let weight = self.catalog.level(before.factor) as i64;
            score += weight * (before.coverage_issues - after.coverage_issues);
            score += 2 * weight * (before.location_issues - after.location_issues);
            score += 3 * weight * (before.detection_issues - after.detection_issues);
        }
        Ok(score)
    }
}
