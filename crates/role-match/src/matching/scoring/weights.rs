use serde::{Deserialize, Serialize};

/// Whether peer-review signals feed into the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoftSkillMode {
    #[default]
    Included,
    Excluded,
}

impl SoftSkillMode {
    pub fn from_flag(include_soft_skills: bool) -> Self {
        if include_soft_skills {
            Self::Included
        } else {
            Self::Excluded
        }
    }

    pub fn is_included(self) -> bool {
        self == Self::Included
    }
}

/// Weighting with the soft-skills component present.
pub const WITH_SOFT_SKILLS: Weights = Weights {
    skill: 0.40,
    experience: 0.25,
    certification: 0.15,
    education: 0.10,
    soft_skills: 0.10,
};

/// Soft-skills weight redistributed onto skill and experience.
pub const WITHOUT_SOFT_SKILLS: Weights = Weights {
    skill: 0.45,
    experience: 0.30,
    certification: 0.15,
    education: 0.10,
    soft_skills: 0.0,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Weights {
    pub skill: f64,
    pub experience: f64,
    pub certification: f64,
    pub education: f64,
    pub soft_skills: f64,
}

impl Weights {
    pub fn for_mode(mode: SoftSkillMode) -> Self {
        match mode {
            SoftSkillMode::Included => WITH_SOFT_SKILLS,
            SoftSkillMode::Excluded => WITHOUT_SOFT_SKILLS,
        }
    }

    pub fn sum(&self) -> f64 {
        self.skill + self.experience + self.certification + self.education + self.soft_skills
    }
}
