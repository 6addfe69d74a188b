use serde::Deserialize;

use super::domain::{Employee, Role};

/// Narrowing criteria for employee listings. Empty criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EmployeeFilter {
    /// Case-insensitive substring of the employee name.
    pub name: Option<String>,
    /// Exact department.
    pub department: Option<String>,
    /// Every listed skill must be held.
    pub skills: Vec<String>,
    pub certifications: Vec<String>,
}

impl EmployeeFilter {
    pub fn matches(&self, employee: &Employee) -> bool {
        contains_ignore_case(&employee.name, self.name.as_deref())
            && equals_if_set(&employee.department, self.department.as_deref())
            && employee
                .skills
                .contains_all(self.skills.iter().map(String::as_str))
            && employee
                .certifications
                .contains_all(self.certifications.iter().map(String::as_str))
    }

    pub fn apply<'a>(&self, employees: &'a [Employee]) -> Vec<&'a Employee> {
        employees
            .iter()
            .filter(|employee| self.matches(employee))
            .collect()
    }
}

/// Narrowing criteria for role listings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RoleFilter {
    pub title: Option<String>,
    pub department: Option<String>,
    pub required_skills: Vec<String>,
    pub required_certifications: Vec<String>,
}

impl RoleFilter {
    pub fn matches(&self, role: &Role) -> bool {
        contains_ignore_case(&role.title, self.title.as_deref())
            && equals_if_set(&role.department, self.department.as_deref())
            && role
                .required_skills
                .contains_all(self.required_skills.iter().map(String::as_str))
            && role
                .required_certifications
                .contains_all(self.required_certifications.iter().map(String::as_str))
    }

    pub fn apply<'a>(&self, roles: &'a [Role]) -> Vec<&'a Role> {
        roles.iter().filter(|role| self.matches(role)).collect()
    }
}

fn contains_ignore_case(haystack: &str, needle: Option<&str>) -> bool {
    match needle.filter(|needle| !needle.is_empty()) {
        Some(needle) => haystack.to_lowercase().contains(&needle.to_lowercase()),
        None => true,
    }
}

fn equals_if_set(value: &str, expected: Option<&str>) -> bool {
    match expected.filter(|expected| !expected.is_empty()) {
        Some(expected) => value == expected,
        None => true,
    }
}
