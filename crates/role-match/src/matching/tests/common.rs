use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::matching::domain::{Employee, Role};
use crate::matching::orchestrator::MatchOrchestrator;
use crate::matching::repository::{
    EmployeeDirectory, MatchRecord, MatchSink, RepositoryError, RoleCatalog,
};
use crate::matching::service::MatchingService;
use crate::matching::text::{TextAnalyzer, TokenizerChoice, WhitespaceTokenizer};
use crate::matching::{matching_router, ScoringEngine};

pub(super) fn employees() -> Vec<Employee> {
    vec![
        Employee::new("emp-001", "Morgan Reyes")
            .with_department("Engineering")
            .with_job_title("Backend Developer")
            .with_skills(["rust", "sql", "kubernetes"])
            .with_certifications(["CKA"])
            .with_experience(6.0)
            .with_education("Master of Computer Science")
            .with_peer_reviews(
                "Morgan shows excellent leadership and clear communication. \
                 A reliable mentor with strong problem solving.",
            ),
        Employee::new("emp-002", "Taylor Chen")
            .with_department("Data")
            .with_job_title("Analyst")
            .with_skills(["sql", "python", "tableau"])
            .with_experience(3.0)
            .with_education("Bachelor of Statistics")
            .with_peer_reviews("Taylor is helpful but sometimes misses deadlines."),
        Employee::new("emp-003", "Jamie Ortiz")
            .with_department("Engineering")
            .with_skills(["javascript", "react"])
            .with_experience(1.5),
    ]
}

pub(super) fn roles() -> Vec<Role> {
    vec![
        Role::new("role-001", "Senior Backend Engineer")
            .with_department("Engineering")
            .with_required_skills(["rust", "sql"])
            .with_preferred_skills(["kubernetes", "kafka"])
            .with_required_certifications(["CKA"])
            .with_required_experience(5.0)
            .with_required_education("Bachelor's degree"),
        Role::new("role-002", "Data Analyst")
            .with_department("Data")
            .with_required_skills(["sql", "python"])
            .with_preferred_skills(["tableau"])
            .with_required_experience(2.0)
            .with_required_education("Bachelor"),
    ]
}

pub(super) fn orchestrator() -> MatchOrchestrator {
    MatchOrchestrator::new(ScoringEngine::new(TextAnalyzer::new(
        TokenizerChoice::Whitespace(WhitespaceTokenizer),
    )))
}

pub(super) type MemoryService = MatchingService<MemoryDirectory, MemoryCatalog, MemorySink>;

pub(super) fn build_service() -> (MemoryService, Arc<MemorySink>) {
    let directory = Arc::new(MemoryDirectory::with(employees()));
    let catalog = Arc::new(MemoryCatalog::with(roles()));
    let sink = Arc::new(MemorySink::default());
    let service = MatchingService::new(directory, catalog, sink.clone(), orchestrator());
    (service, sink)
}

#[derive(Default, Clone)]
pub(super) struct MemoryDirectory {
    employees: Arc<Mutex<Vec<Employee>>>,
}

impl MemoryDirectory {
    pub(super) fn with(employees: Vec<Employee>) -> Self {
        Self {
            employees: Arc::new(Mutex::new(employees)),
        }
    }
}

impl EmployeeDirectory for MemoryDirectory {
    fn employees(&self) -> Result<Vec<Employee>, RepositoryError> {
        Ok(self
            .employees
            .lock()
            .expect("directory mutex poisoned")
            .clone())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryCatalog {
    roles: Arc<Mutex<Vec<Role>>>,
}

impl MemoryCatalog {
    pub(super) fn with(roles: Vec<Role>) -> Self {
        Self {
            roles: Arc::new(Mutex::new(roles)),
        }
    }
}

impl RoleCatalog for MemoryCatalog {
    fn roles(&self) -> Result<Vec<Role>, RepositoryError> {
        Ok(self.roles.lock().expect("catalog mutex poisoned").clone())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemorySink {
    records: Arc<Mutex<Vec<MatchRecord>>>,
}

impl MemorySink {
    pub(super) fn records(&self) -> Vec<MatchRecord> {
        self.records.lock().expect("sink mutex poisoned").clone()
    }
}

impl MatchSink for MemorySink {
    fn save_match(&self, record: MatchRecord) -> Result<MatchRecord, RepositoryError> {
        self.records
            .lock()
            .expect("sink mutex poisoned")
            .push(record.clone());
        Ok(record)
    }
}

pub(super) struct UnavailableDirectory;

impl EmployeeDirectory for UnavailableDirectory {
    fn employees(&self) -> Result<Vec<Employee>, RepositoryError> {
        Err(RepositoryError::Unavailable("directory offline".to_string()))
    }
}

pub(super) struct ReadOnlySink;

impl MatchSink for ReadOnlySink {
    fn save_match(&self, _record: MatchRecord) -> Result<MatchRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn matching_router_with_service(service: MemoryService) -> axum::Router {
    matching_router(Arc::new(service))
}
