mod gaps;
mod rules;
mod soft_skills;
mod weights;

pub use gaps::{skill_gaps, SkillGaps};
pub use rules::{
    certification_match, education_level, education_match, experience_match, skill_match,
};
pub use soft_skills::soft_skill_score;
pub use weights::{SoftSkillMode, Weights, WITHOUT_SOFT_SKILLS, WITH_SOFT_SKILLS};

use serde::{Deserialize, Serialize};

use super::domain::{Employee, EmployeeId, Role, RoleId};
use super::text::{TextAnalyzer, TextSignals};

/// Stateless scorer combining the component rules into one weighted result.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    text: TextAnalyzer,
}

impl ScoringEngine {
    pub fn new(text: TextAnalyzer) -> Self {
        Self { text }
    }

    pub fn text(&self) -> &TextAnalyzer {
        &self.text
    }

    /// Peer-review signals for an employee, `None` when there are no reviews.
    pub fn signals_for(&self, employee: &Employee) -> Option<TextSignals> {
        employee
            .peer_reviews
            .as_deref()
            .map(|reviews| self.text.signals(Some(reviews)))
    }

    pub fn score(&self, employee: &Employee, role: &Role, mode: SoftSkillMode) -> MatchResult {
        let signals = match mode {
            SoftSkillMode::Included => self.signals_for(employee),
            SoftSkillMode::Excluded => None,
        };
        self.score_with_signals(employee, role, mode, signals.as_ref())
    }

    /// Score using precomputed review signals, e.g. from a per-batch cache.
    pub fn score_with_signals(
        &self,
        employee: &Employee,
        role: &Role,
        mode: SoftSkillMode,
        signals: Option<&TextSignals>,
    ) -> MatchResult {
        let weights = Weights::for_mode(mode);
        let skill = skill_match(employee, role);
        let experience = experience_match(employee, role);
        let certification = certification_match(employee, role);
        let education = education_match(employee, role);
        let soft = match mode {
            SoftSkillMode::Included => soft_skill_score(signals),
            SoftSkillMode::Excluded => 0.0,
        };

        let overall = weights.skill * skill
            + weights.experience * experience
            + weights.certification * certification
            + weights.education * education
            + weights.soft_skills * soft;

        MatchResult {
            employee_id: employee.id.clone(),
            employee_name: employee.name.clone(),
            role_id: role.id.clone(),
            role_title: role.title.clone(),
            overall: overall.clamp(0.0, 1.0),
            skill_match: skill,
            experience_match: experience,
            certification_match: certification,
            education_match: education,
            soft_skills: soft,
            skill_gaps: skill_gaps(employee, role),
        }
    }
}

/// Score one pair with the default text pipeline.
pub fn score_match(employee: &Employee, role: &Role, include_soft_skills: bool) -> MatchResult {
    ScoringEngine::default().score(employee, role, SoftSkillMode::from_flag(include_soft_skills))
}

/// Scored employee/role pairing with its component breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub employee_id: EmployeeId,
    pub employee_name: String,
    pub role_id: RoleId,
    pub role_title: String,
    pub overall: f64,
    pub skill_match: f64,
    pub experience_match: f64,
    pub certification_match: f64,
    pub education_match: f64,
    pub soft_skills: f64,
    pub skill_gaps: SkillGaps,
}

impl MatchResult {
    /// Component scores in weighting order: skill, experience, certification, education,
    /// soft skills.
    pub fn components(&self) -> [f64; 5] {
        [
            self.skill_match,
            self.experience_match,
            self.certification_match,
            self.education_match,
            self.soft_skills,
        ]
    }
}
