use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{Employee, EmployeeId, Role, RoleId};
use super::scoring::MatchResult;

/// Identifier assigned to a persisted match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchId(pub String);

/// Persisted form of a scored pairing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub match_id: MatchId,
    pub result: MatchResult,
    pub matched_at: DateTime<Utc>,
}

impl MatchRecord {
    pub fn new(match_id: MatchId, result: MatchResult, matched_at: DateTime<Utc>) -> Self {
        Self {
            match_id,
            result,
            matched_at,
        }
    }
}

/// Source of employee profiles.
pub trait EmployeeDirectory: Send + Sync {
    fn employees(&self) -> Result<Vec<Employee>, RepositoryError>;

    fn employee(&self, id: &EmployeeId) -> Result<Option<Employee>, RepositoryError> {
        Ok(self
            .employees()?
            .into_iter()
            .find(|employee| &employee.id == id))
    }
}

/// Source of open roles.
pub trait RoleCatalog: Send + Sync {
    fn roles(&self) -> Result<Vec<Role>, RepositoryError>;

    fn role(&self, id: &RoleId) -> Result<Option<Role>, RepositoryError> {
        Ok(self.roles()?.into_iter().find(|role| &role.id == id))
    }
}

/// Destination for scored matches.
pub trait MatchSink: Send + Sync {
    fn save_match(&self, record: MatchRecord) -> Result<MatchRecord, RepositoryError>;
}

/// Error enumeration for collaborator failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
