use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use super::domain::{EmployeeId, RoleId};
use super::orchestrator::{BatchMatchReport, CancellationToken, MatchError, MatchOrchestrator};
use super::repository::{
    EmployeeDirectory, MatchId, MatchRecord, MatchSink, RepositoryError, RoleCatalog,
};
use super::scoring::{MatchResult, SoftSkillMode};
use crate::config::DEFAULT_TOP_N;

/// Service composing the collaborators with the batch orchestrator.
pub struct MatchingService<D, C, S> {
    directory: Arc<D>,
    catalog: Arc<C>,
    sink: Arc<S>,
    orchestrator: Arc<MatchOrchestrator>,
    default_top_n: usize,
}

static MATCH_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_match_id() -> MatchId {
    let id = MATCH_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    MatchId(format!("match-{id:06}"))
}

/// Outcome of a persisted batch run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchRun {
    pub started_at: DateTime<Utc>,
    pub records_saved: usize,
    pub report: BatchMatchReport,
}

impl<D, C, S> MatchingService<D, C, S>
where
    D: EmployeeDirectory + 'static,
    C: RoleCatalog + 'static,
    S: MatchSink + 'static,
{
    pub fn new(
        directory: Arc<D>,
        catalog: Arc<C>,
        sink: Arc<S>,
        orchestrator: MatchOrchestrator,
    ) -> Self {
        Self {
            directory,
            catalog,
            sink,
            orchestrator: Arc::new(orchestrator),
            default_top_n: DEFAULT_TOP_N,
        }
    }

    pub fn with_default_top_n(mut self, top_n: usize) -> Self {
        self.default_top_n = top_n;
        self
    }

    pub fn default_top_n(&self) -> usize {
        self.default_top_n
    }

    pub fn orchestrator(&self) -> &MatchOrchestrator {
        &self.orchestrator
    }

    /// Load both collections, rank every pair and persist one record per pair.
    pub fn run_batch(&self, top_n: usize) -> Result<BatchRun, MatchingServiceError> {
        self.run_batch_with_cancel(top_n, &CancellationToken::new())
    }

    pub fn run_batch_with_cancel(
        &self,
        top_n: usize,
        cancel: &CancellationToken,
    ) -> Result<BatchRun, MatchingServiceError> {
        let started_at = Utc::now();
        let employees = self.directory.employees()?;
        let roles = self.catalog.roles()?;

        let report = self
            .orchestrator
            .match_all_with_cancel(&employees, &roles, top_n, cancel)?;

        let mut records_saved = 0;
        for result in &report.all_matches {
            let record = MatchRecord::new(next_match_id(), result.clone(), Utc::now());
            if let Err(error) = self.sink.save_match(record) {
                warn!(%error, saved = records_saved, "match persistence aborted");
                return Err(error.into());
            }
            records_saved += 1;
        }
        info!(records_saved, "batch matches persisted");

        Ok(BatchRun {
            started_at,
            records_saved,
            report,
        })
    }

    /// Score a single employee against a single role, both looked up by id.
    pub fn score_pair(
        &self,
        employee_id: &EmployeeId,
        role_id: &RoleId,
        include_soft_skills: bool,
    ) -> Result<MatchResult, MatchingServiceError> {
        let employee = self
            .directory
            .employee(employee_id)?
            .ok_or(RepositoryError::NotFound)?;
        let role = self
            .catalog
            .role(role_id)?
            .ok_or(RepositoryError::NotFound)?;

        Ok(self.orchestrator.engine().score(
            &employee,
            &role,
            SoftSkillMode::from_flag(include_soft_skills),
        ))
    }
}

/// Error raised by the matching service.
#[derive(Debug, thiserror::Error)]
pub enum MatchingServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Matching(#[from] MatchError),
}

impl MatchingServiceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Repository(RepositoryError::NotFound))
    }
}
