//! Employee to role matching: canonical records, review text signals, component scorers,
//! the batch orchestrator and the service/router plumbing around them.
//!
//! Scoring is pure. The same employee/role pair always yields the same [`MatchResult`],
//! and a batch carries no state from one call to the next.

pub mod domain;
pub mod filters;
pub mod insights;
pub mod orchestrator;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod text;

#[cfg(test)]
mod tests;

pub use domain::{Employee, EmployeeId, EmployeeRecord, LabelSet, Role, RoleId, RoleRecord};
pub use filters::{EmployeeFilter, RoleFilter};
pub use insights::{
    component_averages, generate_insights, workforce_summary, BestMatch, ComponentAverages,
    LabelCount, MatchInsights, SkillGapCount, WorkforceSummary,
};
pub use orchestrator::{
    sort_by_score, BatchMatchReport, CancellationToken, MatchError, MatchOrchestrator,
    RankedMatches, SignalCache,
};
pub use repository::{
    EmployeeDirectory, MatchId, MatchRecord, MatchSink, RepositoryError, RoleCatalog,
};
pub use router::matching_router;
pub use scoring::{score_match, MatchResult, ScoringEngine, SkillGaps, SoftSkillMode, Weights};
pub use service::{BatchRun, MatchingService, MatchingServiceError};
pub use text::{
    extract_key_phrases, extract_soft_skills, score_sentiment, SentimentScores, TextAnalyzer,
    TextSignals,
};

/// Default orchestrator when no configuration is at hand.
pub fn match_all(employees: &[Employee], roles: &[Role], top_n: usize) -> BatchMatchReport {
    MatchOrchestrator::default().match_all(employees, roles, top_n)
}
