use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Identifier wrapper for employees, opaque to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EmployeeId(pub String);

/// Identifier wrapper for open roles, opaque to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoleId(pub String);

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Insertion-ordered set of skill or certification labels.
///
/// Labels are trimmed on the way in, so `" python"` and `"python"` are the same label and
/// overlap with each other when scoring. Blanks are dropped and the first occurrence of a
/// duplicate wins. Membership is otherwise exact and case-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct LabelSet {
    items: Vec<String>,
    index: HashSet<String>,
}

impl LabelSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: impl Into<String>) -> bool {
        let label = label.into();
        let trimmed = label.trim();
        if trimmed.is_empty() || self.index.contains(trimmed) {
            return false;
        }
        let owned = trimmed.to_string();
        self.index.insert(owned.clone());
        self.items.push(owned);
        true
    }

    pub fn remove(&mut self, label: &str) -> bool {
        if self.index.remove(label) {
            self.items.retain(|item| item != label);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, label: &str) -> bool {
        self.index.contains(label)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.items.iter().map(String::as_str)
    }

    /// Number of labels in `self` that `other` also holds.
    pub fn overlap(&self, other: &LabelSet) -> usize {
        self.items.iter().filter(|item| other.contains(item)).count()
    }

    /// Labels in `self` that `other` lacks, in `self`'s order.
    pub fn missing_from(&self, other: &LabelSet) -> Vec<String> {
        self.items
            .iter()
            .filter(|item| !other.contains(item))
            .cloned()
            .collect()
    }

    pub fn contains_all<'a>(&self, labels: impl IntoIterator<Item = &'a str>) -> bool {
        labels.into_iter().all(|label| self.contains(label))
    }
}

impl<S: Into<String>> FromIterator<S> for LabelSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = LabelSet::new();
        for label in iter {
            set.insert(label);
        }
        set
    }
}

impl From<Vec<String>> for LabelSet {
    fn from(value: Vec<String>) -> Self {
        value.into_iter().collect()
    }
}

impl From<LabelSet> for Vec<String> {
    fn from(value: LabelSet) -> Self {
        value.items
    }
}

/// Canonical employee profile consumed by the scorers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "EmployeeRecord")]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub department: String,
    pub job_title: String,
    pub skills: LabelSet,
    pub certifications: LabelSet,
    /// Total years, already summed when supplied as a list of positions.
    #[serde(rename = "experience")]
    pub experience_years: f64,
    pub education: Option<String>,
    pub peer_reviews: Option<String>,
}

impl Employee {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: EmployeeId(id.into()),
            name: name.into(),
            department: String::new(),
            job_title: String::new(),
            skills: LabelSet::new(),
            certifications: LabelSet::new(),
            experience_years: 0.0,
            education: None,
            peer_reviews: None,
        }
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    pub fn with_job_title(mut self, job_title: impl Into<String>) -> Self {
        self.job_title = job_title.into();
        self
    }

    pub fn with_skills<S: Into<String>>(mut self, skills: impl IntoIterator<Item = S>) -> Self {
        self.skills = skills.into_iter().collect();
        self
    }

    pub fn with_certifications<S: Into<String>>(
        mut self,
        certifications: impl IntoIterator<Item = S>,
    ) -> Self {
        self.certifications = certifications.into_iter().collect();
        self
    }

    pub fn with_experience(mut self, years: f64) -> Self {
        self.experience_years = non_negative(years);
        self
    }

    pub fn with_education(mut self, education: impl Into<String>) -> Self {
        self.education = non_blank(Some(education.into()));
        self
    }

    pub fn with_peer_reviews(mut self, reviews: impl Into<String>) -> Self {
        self.peer_reviews = non_blank(Some(reviews.into()));
        self
    }
}

/// Canonical role requirements consumed by the scorers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RoleRecord")]
pub struct Role {
    pub id: RoleId,
    pub title: String,
    pub department: String,
    pub required_skills: LabelSet,
    pub preferred_skills: LabelSet,
    pub required_certifications: LabelSet,
    pub required_experience: f64,
    pub required_education: Option<String>,
}

impl Role {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: RoleId(id.into()),
            title: title.into(),
            department: String::new(),
            required_skills: LabelSet::new(),
            preferred_skills: LabelSet::new(),
            required_certifications: LabelSet::new(),
            required_experience: 0.0,
            required_education: None,
        }
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    pub fn with_required_skills<S: Into<String>>(
        mut self,
        skills: impl IntoIterator<Item = S>,
    ) -> Self {
        self.required_skills = skills.into_iter().collect();
        self
    }

    pub fn with_preferred_skills<S: Into<String>>(
        mut self,
        skills: impl IntoIterator<Item = S>,
    ) -> Self {
        self.preferred_skills = skills.into_iter().collect();
        self
    }

    pub fn with_required_certifications<S: Into<String>>(
        mut self,
        certifications: impl IntoIterator<Item = S>,
    ) -> Self {
        self.required_certifications = certifications.into_iter().collect();
        self
    }

    pub fn with_required_experience(mut self, years: f64) -> Self {
        self.required_experience = non_negative(years);
        self
    }

    pub fn with_required_education(mut self, education: impl Into<String>) -> Self {
        self.required_education = non_blank(Some(education.into()));
        self
    }
}

/// Loosely shaped employee payload as stored by the collaborator layer.
///
/// List fields accept a list, a single string, or null; experience accepts a number, a
/// numeric string, or a list of `{ "years": .. }` positions.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeRecord {
    #[serde(alias = "employee_id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub department: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub job_title: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub certifications: Vec<String>,
    #[serde(default, deserialize_with = "lenient_years")]
    pub experience: f64,
    #[serde(default, deserialize_with = "lenient_text")]
    pub education: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub peer_reviews: Option<String>,
}

impl From<EmployeeRecord> for Employee {
    fn from(record: EmployeeRecord) -> Self {
        Self {
            id: EmployeeId(record.id),
            name: record.name.unwrap_or_default(),
            department: record.department.unwrap_or_default(),
            job_title: record.job_title.unwrap_or_default(),
            skills: record.skills.into(),
            certifications: record.certifications.into(),
            experience_years: non_negative(record.experience),
            education: non_blank(record.education),
            peer_reviews: non_blank(record.peer_reviews),
        }
    }
}

/// Loosely shaped role payload as stored by the collaborator layer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoleRecord {
    #[serde(alias = "role_id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub department: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub required_skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub preferred_skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub required_certifications: Vec<String>,
    #[serde(default, deserialize_with = "lenient_years")]
    pub required_experience: f64,
    #[serde(default, deserialize_with = "lenient_text")]
    pub required_education: Option<String>,
}

impl From<RoleRecord> for Role {
    fn from(record: RoleRecord) -> Self {
        Self {
            id: RoleId(record.id),
            title: record.title.unwrap_or_default(),
            department: record.department.unwrap_or_default(),
            required_skills: record.required_skills.into(),
            preferred_skills: record.preferred_skills.into(),
            required_certifications: record.required_certifications.into(),
            required_experience: non_negative(record.required_experience),
            required_education: non_blank(record.required_education),
        }
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

fn scalar_label(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items.iter().filter_map(scalar_label).collect(),
        other => scalar_label(&other).into_iter().collect(),
    })
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_label(&value))
}

fn lenient_years<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let years = match &value {
        Value::Array(positions) => positions
            .iter()
            .filter_map(|position| position.get("years").and_then(numeric))
            .sum(),
        other => numeric(other).unwrap_or(0.0),
    };
    Ok(years)
}
