use proptest::prelude::*;
use role_match::matching::scoring::{education_match, experience_match, skill_match};
use role_match::matching::{match_all, score_match, score_sentiment, Employee, Role};

const SKILLS: &[&str] = &[
    "rust", "python", "sql", "go", "terraform", "kubernetes", "react", "excel",
];

const EDUCATION: &[&str] = &[
    "",
    "High School Diploma",
    "Associate degree",
    "Bachelor of Science",
    "Master of Arts",
    "PhD in Physics",
    "bootcamp",
    "self taught",
];

const REVIEWS: &[&str] = &[
    "",
    "Excellent teamwork and clear communication.",
    "Often late, careless with details, not reliable.",
    "Good mentor but struggles with time management!!",
    "NEVER misses a deadline. Very dependable.",
];

fn skill_subset() -> impl Strategy<Value = Vec<&'static str>> {
    proptest::sample::subsequence(SKILLS.to_vec(), 0..=SKILLS.len())
}

fn employee_strategy() -> impl Strategy<Value = Employee> {
    (
        skill_subset(),
        0.0f64..30.0,
        proptest::sample::select(EDUCATION.to_vec()),
        proptest::sample::select(REVIEWS.to_vec()),
    )
        .prop_map(|(skills, years, education, review)| {
            Employee::new("emp", "Prop Employee")
                .with_skills(skills)
                .with_experience(years)
                .with_education(education)
                .with_peer_reviews(review)
        })
}

fn role_strategy() -> impl Strategy<Value = Role> {
    (
        skill_subset(),
        skill_subset(),
        skill_subset(),
        0.0f64..20.0,
        proptest::sample::select(EDUCATION.to_vec()),
    )
        .prop_map(|(required, preferred, certifications, years, education)| {
            Role::new("role", "Prop Role")
                .with_required_skills(required)
                .with_preferred_skills(preferred)
                .with_required_certifications(certifications)
                .with_required_experience(years)
                .with_required_education(education)
        })
}

fn in_unit(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}

proptest! {
    #[test]
    fn every_score_stays_in_unit_interval(
        employee in employee_strategy(),
        role in role_strategy(),
        include_soft in any::<bool>(),
    ) {
        let result = score_match(&employee, &role, include_soft);
        prop_assert!(in_unit(result.overall), "overall {}", result.overall);
        for component in result.components() {
            prop_assert!(in_unit(component), "component {}", component);
        }
        if !include_soft {
            prop_assert_eq!(result.soft_skills, 0.0);
        }
    }

    #[test]
    fn scoring_is_idempotent(employee in employee_strategy(), role in role_strategy()) {
        let first = score_match(&employee, &role, true);
        let second = score_match(&employee, &role, true);
        prop_assert_eq!(first.overall.to_bits(), second.overall.to_bits());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn gaining_a_required_skill_never_lowers_skill_match(
        employee in employee_strategy(),
        role in role_strategy(),
    ) {
        let before = skill_match(&employee, &role);
        for missing in role.required_skills.missing_from(&employee.skills) {
            let mut upskilled = employee.clone();
            upskilled.skills.insert(missing.clone());
            let after = skill_match(&upskilled, &role);
            prop_assert!(after >= before, "adding {} lowered {} to {}", missing, before, after);
        }
    }

    #[test]
    fn losing_a_required_skill_never_raises_skill_match(
        employee in employee_strategy(),
        role in role_strategy(),
    ) {
        let before = skill_match(&employee, &role);
        let held: Vec<String> = role
            .required_skills
            .iter()
            .filter(|skill| employee.skills.contains(skill))
            .map(str::to_string)
            .collect();
        for skill in held {
            let mut reduced = employee.clone();
            reduced.skills.remove(&skill);
            let after = skill_match(&reduced, &role);
            prop_assert!(after <= before, "removing {} raised {} to {}", skill, before, after);
        }
    }

    #[test]
    fn gaps_exclude_held_skills(employee in employee_strategy(), role in role_strategy()) {
        let result = score_match(&employee, &role, false);
        for skill in result
            .skill_gaps
            .missing_required
            .iter()
            .chain(result.skill_gaps.missing_preferred.iter())
        {
            prop_assert!(!employee.skills.contains(skill));
        }
    }

    #[test]
    fn zero_required_experience_is_full_credit(years in 0.0f64..50.0) {
        let employee = Employee::new("e", "Any").with_experience(years);
        let role = Role::new("r", "Any").with_required_experience(0.0);
        prop_assert_eq!(experience_match(&employee, &role), 1.0);
    }

    #[test]
    fn unrecognized_education_is_neutral(held in "[xyz ]{1,20}", wanted in "[xyz ]{1,20}") {
        let employee = Employee::new("e", "Any").with_education(held);
        let role = Role::new("r", "Any").with_required_education(wanted);
        prop_assert_eq!(education_match(&employee, &role), 0.5);
    }

    #[test]
    fn sentiment_stays_bounded(text in "[ -~]{0,120}") {
        let scores = score_sentiment(&text);
        prop_assert!((-1.0..=1.0).contains(&scores.compound));
        prop_assert!(in_unit(scores.positive));
        prop_assert!(in_unit(scores.negative));
        prop_assert!(in_unit(scores.neutral));
    }

    #[test]
    fn batch_shape_matches_inputs(
        employees in proptest::collection::vec(employee_strategy(), 0..5),
        roles in proptest::collection::vec(role_strategy(), 0..5),
        top_n in 0usize..4,
    ) {
        let employees: Vec<Employee> = employees
            .into_iter()
            .enumerate()
            .map(|(idx, mut employee)| {
                employee.id.0 = format!("emp-{idx}");
                employee
            })
            .collect();
        let roles: Vec<Role> = roles
            .into_iter()
            .enumerate()
            .map(|(idx, mut role)| {
                role.id.0 = format!("role-{idx}");
                role
            })
            .collect();

        let report = match_all(&employees, &roles, top_n);
        prop_assert_eq!(report.all_matches.len(), employees.len() * roles.len());
        prop_assert!(report
            .all_matches
            .windows(2)
            .all(|pair| pair[0].overall >= pair[1].overall));
        for (_, matches) in report.employee_to_role.iter() {
            prop_assert!(matches.len() <= roles.len().min(top_n));
            prop_assert!(matches.windows(2).all(|pair| pair[0].overall >= pair[1].overall));
        }
        for (_, matches) in report.role_to_employee.iter() {
            prop_assert!(matches.len() <= employees.len().min(top_n));
        }
    }
}
