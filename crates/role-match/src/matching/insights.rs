use std::collections::HashMap;

use serde::Serialize;

use super::domain::{Employee, EmployeeId, RoleId};
use super::orchestrator::BatchMatchReport;
use super::scoring::MatchResult;

/// Aggregates derived from a batch report for dashboards and summaries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchInsights {
    pub averages: ComponentAverages,
    pub skill_gaps: Vec<SkillGapCount>,
    pub best_per_role: Vec<BestMatch>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ComponentAverages {
    pub overall: f64,
    pub skill_match: f64,
    pub experience_match: f64,
    pub certification_match: f64,
    pub education_match: f64,
    pub soft_skills: f64,
}

/// How often a skill is missing among the top candidates of every role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillGapCount {
    pub skill: String,
    pub missing_required: usize,
    pub missing_preferred: usize,
}

impl SkillGapCount {
    pub fn total(&self) -> usize {
        self.missing_required + self.missing_preferred
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestMatch {
    pub role_id: RoleId,
    pub role_title: String,
    pub employee_id: EmployeeId,
    pub employee_name: String,
    pub overall: f64,
}

/// Label with its occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

/// Headcount broken down by department and by skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkforceSummary {
    pub headcount: usize,
    pub departments: Vec<LabelCount>,
    pub skills: Vec<LabelCount>,
}

pub fn generate_insights(report: &BatchMatchReport) -> MatchInsights {
    let mut gap_counts: Vec<SkillGapCount> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut best_per_role = Vec::new();

    for (_, candidates) in report.role_to_employee.iter() {
        for result in candidates {
            for skill in &result.skill_gaps.missing_required {
                gap_entry(&mut gap_counts, &mut positions, skill).missing_required += 1;
            }
            for skill in &result.skill_gaps.missing_preferred {
                gap_entry(&mut gap_counts, &mut positions, skill).missing_preferred += 1;
            }
        }
        if let Some(best) = candidates.first() {
            best_per_role.push(BestMatch {
                role_id: best.role_id.clone(),
                role_title: best.role_title.clone(),
                employee_id: best.employee_id.clone(),
                employee_name: best.employee_name.clone(),
                overall: best.overall,
            });
        }
    }

    // Most frequently missing first; first-seen order breaks ties.
    gap_counts.sort_by(|a, b| b.total().cmp(&a.total()));

    MatchInsights {
        averages: component_averages(&report.all_matches),
        skill_gaps: gap_counts,
        best_per_role,
    }
}

fn gap_entry<'a>(
    counts: &'a mut Vec<SkillGapCount>,
    positions: &mut HashMap<String, usize>,
    skill: &str,
) -> &'a mut SkillGapCount {
    let idx = *positions.entry(skill.to_string()).or_insert_with(|| {
        counts.push(SkillGapCount {
            skill: skill.to_string(),
            missing_required: 0,
            missing_preferred: 0,
        });
        counts.len() - 1
    });
    &mut counts[idx]
}

pub fn component_averages(matches: &[MatchResult]) -> ComponentAverages {
    if matches.is_empty() {
        return ComponentAverages::default();
    }
    let count = matches.len() as f64;
    let mean = |pick: fn(&MatchResult) -> f64| matches.iter().map(pick).sum::<f64>() / count;
    ComponentAverages {
        overall: mean(|m| m.overall),
        skill_match: mean(|m| m.skill_match),
        experience_match: mean(|m| m.experience_match),
        certification_match: mean(|m| m.certification_match),
        education_match: mean(|m| m.education_match),
        soft_skills: mean(|m| m.soft_skills),
    }
}

pub fn workforce_summary(employees: &[Employee]) -> WorkforceSummary {
    let departments = count_labels(
        employees
            .iter()
            .map(|employee| employee.department.as_str())
            .filter(|department| !department.is_empty()),
    );
    let skills = count_labels(employees.iter().flat_map(|employee| employee.skills.iter()));
    WorkforceSummary {
        headcount: employees.len(),
        departments,
        skills,
    }
}

/// Counts sorted by frequency, then label.
fn count_labels<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<LabelCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for label in labels {
        *counts.entry(label).or_default() += 1;
    }
    let mut counts: Vec<LabelCount> = counts
        .into_iter()
        .map(|(label, count)| LabelCount {
            label: label.to_string(),
            count,
        })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::domain::Role;
    use crate::matching::orchestrator::MatchOrchestrator;

    #[test]
    fn insights_summarize_top_candidates() {
        let employees = vec![
            Employee::new("e1", "Avery").with_skills(["rust"]),
            Employee::new("e2", "Blake").with_skills(["rust", "sql"]),
        ];
        let roles = vec![
            Role::new("r1", "Backend")
                .with_required_skills(["rust", "sql", "kafka"])
                .with_preferred_skills(["go"]),
        ];
        let report = MatchOrchestrator::default().match_all(&employees, &roles, 5);
        let insights = generate_insights(&report);

        assert_eq!(insights.best_per_role.len(), 1);
        assert_eq!(insights.best_per_role[0].employee_id, EmployeeId("e2".into()));

        let first = &insights.skill_gaps[0];
        assert_eq!(first.skill, "kafka");
        assert_eq!(first.missing_required, 2);
        assert_eq!(insights.skill_gaps.len(), 3);
        assert!((insights.averages.certification_match - 1.0).abs() < 1e-12);
    }

    #[test]
    fn averages_of_nothing_are_zero() {
        assert_eq!(component_averages(&[]), ComponentAverages::default());
    }

    #[test]
    fn workforce_summary_counts_departments_and_skills() {
        let employees = vec![
            Employee::new("e1", "Avery")
                .with_department("Engineering")
                .with_skills(["rust", "sql"]),
            Employee::new("e2", "Blake")
                .with_department("Engineering")
                .with_skills(["sql"]),
            Employee::new("e3", "Casey").with_skills(["excel"]),
        ];
        let summary = workforce_summary(&employees);
        assert_eq!(summary.headcount, 3);
        assert_eq!(
            summary.departments,
            vec![LabelCount {
                label: "Engineering".into(),
                count: 2
            }]
        );
        assert_eq!(summary.skills[0].label, "sql");
        assert_eq!(summary.skills[1].label, "excel");
    }
}
