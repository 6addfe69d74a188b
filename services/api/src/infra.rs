use metrics_exporter_prometheus::PrometheusHandle;
use role_match::error::{AppError, InputError};
use role_match::matching::{
    Employee, EmployeeDirectory, MatchRecord, MatchSink, RepositoryError, Role, RoleCatalog,
};
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryEmployeeDirectory {
    employees: Arc<Mutex<Vec<Employee>>>,
}

impl InMemoryEmployeeDirectory {
    pub(crate) fn with_employees(employees: Vec<Employee>) -> Self {
        Self {
            employees: Arc::new(Mutex::new(employees)),
        }
    }
}

impl EmployeeDirectory for InMemoryEmployeeDirectory {
    fn employees(&self) -> Result<Vec<Employee>, RepositoryError> {
        let guard = self.employees.lock().expect("directory mutex poisoned");
        Ok(guard.clone())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryRoleCatalog {
    roles: Arc<Mutex<Vec<Role>>>,
}

impl InMemoryRoleCatalog {
    pub(crate) fn with_roles(roles: Vec<Role>) -> Self {
        Self {
            roles: Arc::new(Mutex::new(roles)),
        }
    }
}

impl RoleCatalog for InMemoryRoleCatalog {
    fn roles(&self) -> Result<Vec<Role>, RepositoryError> {
        let guard = self.roles.lock().expect("catalog mutex poisoned");
        Ok(guard.clone())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryMatchSink {
    records: Arc<Mutex<Vec<MatchRecord>>>,
}

impl MatchSink for InMemoryMatchSink {
    fn save_match(&self, record: MatchRecord) -> Result<MatchRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("sink mutex poisoned");
        guard.push(record.clone());
        Ok(record)
    }
}

impl InMemoryMatchSink {
    pub(crate) fn records(&self) -> Vec<MatchRecord> {
        self.records.lock().expect("sink mutex poisoned").clone()
    }
}

/// Read a JSON array of employees or roles. Both the canonical and the loosely shaped
/// record layouts are accepted.
pub(crate) fn load_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, AppError> {
    let raw = std::fs::read(path)?;
    parse_records(&raw, path)
}

pub(crate) fn parse_records<T: DeserializeOwned>(
    raw: &[u8],
    path: &Path,
) -> Result<Vec<T>, AppError> {
    serde_json::from_slice(raw).map_err(|source| {
        AppError::Input(InputError {
            path: path.to_path_buf(),
            source,
        })
    })
}
