//! Component scorers. Each reads only the fields it needs and returns a value in [0, 1].

use super::super::domain::{Employee, Role};

const REQUIRED_SKILL_SHARE: f64 = 0.7;
const PREFERRED_SKILL_SHARE: f64 = 0.3;
const UNKNOWN_EDUCATION: f64 = 0.5;

/// Keyword to level mapping, searched case-insensitively as substrings.
const EDUCATION_LEVELS: &[(&str, u8)] = &[
    ("high school", 1),
    ("associate", 2),
    ("bachelor", 3),
    ("master", 4),
    ("phd", 5),
    ("doctorate", 5),
];

/// Required skills carry 70% and preferred skills 30% when a role lists both.
/// A role listing neither scores zero.
pub fn skill_match(employee: &Employee, role: &Role) -> f64 {
    let required = &role.required_skills;
    let preferred = &role.preferred_skills;

    match (required.is_empty(), preferred.is_empty()) {
        (true, true) => 0.0,
        (false, true) => ratio(required.overlap(&employee.skills), required.len()),
        (true, false) => ratio(preferred.overlap(&employee.skills), preferred.len()),
        (false, false) => {
            REQUIRED_SKILL_SHARE * ratio(required.overlap(&employee.skills), required.len())
                + PREFERRED_SKILL_SHARE
                    * ratio(preferred.overlap(&employee.skills), preferred.len())
        }
    }
}

pub fn experience_match(employee: &Employee, role: &Role) -> f64 {
    let required = role.required_experience;
    if required <= 0.0 || employee.experience_years >= required {
        return 1.0;
    }
    (employee.experience_years / required).clamp(0.0, 1.0)
}

pub fn certification_match(employee: &Employee, role: &Role) -> f64 {
    let required = &role.required_certifications;
    if required.is_empty() {
        return 1.0;
    }
    ratio(required.overlap(&employee.certifications), required.len())
}

/// Compares the highest recognized degree on each side. Missing text or an
/// unrecognized requirement scores 0.5.
pub fn education_match(employee: &Employee, role: &Role) -> f64 {
    let (Some(held), Some(wanted)) = (
        non_empty(employee.education.as_deref()),
        non_empty(role.required_education.as_deref()),
    ) else {
        return UNKNOWN_EDUCATION;
    };

    let required_level = education_level(wanted);
    if required_level == 0 {
        return UNKNOWN_EDUCATION;
    }
    let employee_level = education_level(held);
    if employee_level >= required_level {
        1.0
    } else {
        f64::from(employee_level) / f64::from(required_level)
    }
}

/// Highest level whose keyword occurs in `text`; 0 when none does.
pub fn education_level(text: &str) -> u8 {
    let lowered = text.to_lowercase();
    EDUCATION_LEVELS
        .iter()
        .filter(|(keyword, _)| lowered.contains(keyword))
        .map(|(_, level)| *level)
        .max()
        .unwrap_or(0)
}

fn ratio(hits: usize, total: usize) -> f64 {
    if total == 0 {
        return 1.0;
    }
    hits as f64 / total as f64
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.filter(|value| !value.trim().is_empty())
}
