use serde::{Deserialize, Serialize};

use super::super::domain::{Employee, Role};

/// Role skills an employee lacks, in the role's listing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillGaps {
    pub missing_required: Vec<String>,
    pub missing_preferred: Vec<String>,
}

impl SkillGaps {
    pub fn is_empty(&self) -> bool {
        self.missing_required.is_empty() && self.missing_preferred.is_empty()
    }
}

pub fn skill_gaps(employee: &Employee, role: &Role) -> SkillGaps {
    SkillGaps {
        missing_required: role.required_skills.missing_from(&employee.skills),
        missing_preferred: role.preferred_skills.missing_from(&employee.skills),
    }
}
