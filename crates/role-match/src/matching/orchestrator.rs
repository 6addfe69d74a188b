//! Batch scoring over the full employee x role cross product.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use dashmap::DashMap;
use rayon::prelude::*;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::{debug, info};

use super::domain::{Employee, EmployeeId, Role, RoleId};
use super::scoring::{MatchResult, ScoringEngine, SoftSkillMode};
use super::text::{TextAnalyzer, TextSignals};
use crate::config::{MatchingConfig, TextConfig};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MatchError {
    #[error("batch matching was cancelled after {completed} of {total} pairs")]
    Cancelled { completed: usize, total: usize },
}

/// Cooperative cancellation flag checked between pairs.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }
}

/// Read-through memo of review signals keyed by employee id. Lives for one batch.
///
/// Each entry remembers the review text it was derived from. A record that shares an id
/// with a cached one but carries different reviews is scored from its own text and never
/// replaces the entry, so the outcome does not depend on worker scheduling.
#[derive(Debug, Default)]
pub struct SignalCache {
    entries: DashMap<EmployeeId, (String, TextSignals)>,
}

impl SignalCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_compute(
        &self,
        engine: &ScoringEngine,
        employee: &Employee,
    ) -> Option<TextSignals> {
        let reviews = employee.peer_reviews.as_deref()?;
        if let Some(cached) = self.entries.get(&employee.id) {
            let (source, signals) = cached.value();
            if source == reviews {
                return Some(signals.clone());
            }
        }

        let signals = engine.signals_for(employee)?;
        self.entries
            .entry(employee.id.clone())
            .or_insert_with(|| (reviews.to_string(), signals.clone()));
        Some(signals)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Matches grouped by id, kept in first-appearance order and serialized as a map.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedMatches<K> {
    entries: Vec<(K, Vec<MatchResult>)>,
}

impl<K> Default for RankedMatches<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: PartialEq> RankedMatches<K> {
    pub fn get(&self, key: &K) -> Option<&[MatchResult]> {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, matches)| matches.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &[MatchResult])> + '_ {
        self.entries
            .iter()
            .map(|(key, matches)| (key, matches.as_slice()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.entries.iter().map(|(key, _)| key)
    }
}

impl<K: fmt::Display> Serialize for RankedMatches<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, matches) in &self.entries {
            map.serialize_entry(&key.to_string(), matches)?;
        }
        map.end()
    }
}

/// Ranked output of a batch run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchMatchReport {
    pub employee_to_role: RankedMatches<EmployeeId>,
    pub role_to_employee: RankedMatches<RoleId>,
    pub all_matches: Vec<MatchResult>,
}

impl BatchMatchReport {
    pub fn empty() -> Self {
        Self {
            employee_to_role: RankedMatches::default(),
            role_to_employee: RankedMatches::default(),
            all_matches: Vec::new(),
        }
    }
}

/// Runs the cross product through a [`ScoringEngine`] and ranks the results.
#[derive(Debug, Clone)]
pub struct MatchOrchestrator {
    engine: ScoringEngine,
    parallel: bool,
}

impl Default for MatchOrchestrator {
    fn default() -> Self {
        Self::new(ScoringEngine::default())
    }
}

impl MatchOrchestrator {
    pub fn new(engine: ScoringEngine) -> Self {
        Self {
            engine,
            parallel: true,
        }
    }

    /// Build from configuration, selecting the tokenizer once up front.
    pub fn from_config(matching: &MatchingConfig, text: &TextConfig) -> Self {
        Self::new(ScoringEngine::new(TextAnalyzer::from_config(text)))
            .with_parallelism(matching.parallel)
    }

    pub fn with_parallelism(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    pub fn match_all(
        &self,
        employees: &[Employee],
        roles: &[Role],
        top_n: usize,
    ) -> BatchMatchReport {
        // A token nobody else holds can never be cancelled.
        match self.match_all_with_cancel(employees, roles, top_n, &CancellationToken::new()) {
            Ok(report) => report,
            Err(MatchError::Cancelled { .. }) => BatchMatchReport::empty(),
        }
    }

    pub fn match_all_with_cancel(
        &self,
        employees: &[Employee],
        roles: &[Role],
        top_n: usize,
        cancel: &CancellationToken,
    ) -> Result<BatchMatchReport, MatchError> {
        let started = Instant::now();
        let total = employees.len() * roles.len();
        info!(
            employees = employees.len(),
            roles = roles.len(),
            pairs = total,
            top_n,
            parallel = self.parallel,
            "batch matching started"
        );

        let cache = SignalCache::new();
        let score_pair = |idx: usize| -> Result<MatchResult, MatchError> {
            if cancel.is_cancelled() {
                return Err(MatchError::Cancelled {
                    completed: idx,
                    total,
                });
            }
            let employee = &employees[idx / roles.len()];
            let role = &roles[idx % roles.len()];
            let signals = cache.get_or_compute(&self.engine, employee);
            Ok(self
                .engine
                .score_with_signals(employee, role, SoftSkillMode::Included, signals.as_ref()))
        };

        let computed: Vec<MatchResult> = if total == 0 {
            Vec::new()
        } else if self.parallel {
            (0..total)
                .into_par_iter()
                .map(score_pair)
                .collect::<Result<Vec<_>, MatchError>>()?
        } else {
            (0..total)
                .map(score_pair)
                .collect::<Result<Vec<_>, MatchError>>()?
        };
        debug!(cached_signals = cache.len(), "pair scoring finished");

        let report = rank(computed, employees, roles, top_n);
        info!(
            matches = report.all_matches.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "batch matching finished"
        );
        Ok(report)
    }
}

/// Stable descending sort on overall score; equal scores keep computation order.
pub fn sort_by_score(matches: &mut [MatchResult]) {
    matches.sort_by(|a, b| b.overall.total_cmp(&a.overall));
}

fn rank(
    computed: Vec<MatchResult>,
    employees: &[Employee],
    roles: &[Role],
    top_n: usize,
) -> BatchMatchReport {
    let employee_to_role = group_top(
        &computed,
        employees.iter().map(|employee| &employee.id),
        |result| &result.employee_id,
        top_n,
    );
    let role_to_employee = group_top(
        &computed,
        roles.iter().map(|role| &role.id),
        |result| &result.role_id,
        top_n,
    );

    let mut all_matches = computed;
    sort_by_score(&mut all_matches);

    BatchMatchReport {
        employee_to_role,
        role_to_employee,
        all_matches,
    }
}

/// One pass buckets results by id; each bucket is then ranked and truncated.
fn group_top<'a, K, I, F>(
    computed: &[MatchResult],
    ids: I,
    key_of: F,
    top_n: usize,
) -> RankedMatches<K>
where
    K: Clone + Eq + Hash + 'a,
    I: Iterator<Item = &'a K>,
    F: Fn(&MatchResult) -> &K,
{
    let mut buckets: HashMap<&K, Vec<&MatchResult>> = HashMap::new();
    for result in computed {
        buckets.entry(key_of(result)).or_default().push(result);
    }

    let mut seen = HashSet::new();
    let mut entries = Vec::new();
    for id in ids {
        if !seen.insert(id) {
            continue;
        }
        let mut bucket = buckets.remove(id).unwrap_or_default();
        bucket.sort_by(|a, b| b.overall.total_cmp(&a.overall));
        bucket.truncate(top_n);
        entries.push((id.clone(), bucket.into_iter().cloned().collect()));
    }
    RankedMatches { entries }
}
