use crate::infra::{
    load_records, InMemoryEmployeeDirectory, InMemoryMatchSink, InMemoryRoleCatalog,
};
use clap::Args;
use role_match::config::AppConfig;
use role_match::error::AppError;
use role_match::matching::{
    generate_insights, workforce_summary, BatchMatchReport, Employee, EmployeeId,
    MatchInsights, MatchOrchestrator, MatchResult, MatchingService, Role, RoleId,
};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct MatchArgs {
    /// JSON file holding an array of employee records
    #[arg(long)]
    pub(crate) employees: PathBuf,
    /// JSON file holding an array of role records
    #[arg(long)]
    pub(crate) roles: PathBuf,
    /// Matches kept per employee and per role (defaults to MATCHER_TOP_N)
    #[arg(long)]
    pub(crate) top_n: Option<usize>,
    /// Print the full report as JSON instead of a text summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON file holding an array of employee records
    #[arg(long)]
    pub(crate) employees: PathBuf,
    /// JSON file holding an array of role records
    #[arg(long)]
    pub(crate) roles: PathBuf,
    /// Employee id to score
    #[arg(long)]
    pub(crate) employee: String,
    /// Role id to score against
    #[arg(long)]
    pub(crate) role: String,
    /// Drop the review-text component and use the four-part weighting
    #[arg(long)]
    pub(crate) no_soft_skills: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Matches kept per employee and per role
    #[arg(long)]
    pub(crate) top_n: Option<usize>,
}

#[derive(Debug, Serialize)]
struct MatchOutput<'a> {
    report: &'a BatchMatchReport,
    insights: &'a MatchInsights,
}

pub(crate) fn run_match(args: MatchArgs) -> Result<(), AppError> {
    let MatchArgs {
        employees,
        roles,
        top_n,
        json,
    } = args;

    let config = AppConfig::load()?;
    let employees: Vec<Employee> = load_records(&employees)?;
    let roles: Vec<Role> = load_records(&roles)?;
    let top_n = top_n.unwrap_or(config.matching.top_n);

    let orchestrator = MatchOrchestrator::from_config(&config.matching, &config.text);
    let report = orchestrator.match_all(&employees, &roles, top_n);
    let insights = generate_insights(&report);

    if json {
        let output = MatchOutput {
            report: &report,
            insights: &insights,
        };
        let rendered = serde_json::to_string_pretty(&output).map_err(std::io::Error::other)?;
        println!("{rendered}");
        return Ok(());
    }

    println!(
        "Scored {} employees against {} roles ({} pairs)",
        employees.len(),
        roles.len(),
        report.all_matches.len()
    );
    render_rankings(&report);
    render_insights(&insights);
    Ok(())
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        employees,
        roles,
        employee,
        role,
        no_soft_skills,
    } = args;

    let config = AppConfig::load()?;
    let directory = Arc::new(InMemoryEmployeeDirectory::with_employees(load_records(
        &employees,
    )?));
    let catalog = Arc::new(InMemoryRoleCatalog::with_roles(load_records(&roles)?));
    let service = MatchingService::new(
        directory,
        catalog,
        Arc::new(InMemoryMatchSink::default()),
        MatchOrchestrator::from_config(&config.matching, &config.text),
    );

    let result = service.score_pair(&EmployeeId(employee), &RoleId(role), !no_soft_skills)?;
    render_result(&result);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let top_n = args.top_n.unwrap_or(config.matching.top_n);

    let employees = demo_employees();
    let summary = workforce_summary(&employees);
    println!("Role matching demo");
    println!("Workforce: {} employees", summary.headcount);
    for department in &summary.departments {
        println!("  - {}: {}", department.label, department.count);
    }

    let sink = Arc::new(InMemoryMatchSink::default());
    let service = MatchingService::new(
        Arc::new(InMemoryEmployeeDirectory::with_employees(employees)),
        Arc::new(InMemoryRoleCatalog::with_roles(demo_roles())),
        sink.clone(),
        MatchOrchestrator::from_config(&config.matching, &config.text),
    );

    let run = service.run_batch(top_n)?;
    println!(
        "\nBatch started {} | {} match records persisted",
        run.started_at.format("%Y-%m-%d %H:%M:%S UTC"),
        sink.records().len()
    );
    render_rankings(&run.report);
    render_insights(&generate_insights(&run.report));

    if let Some(best) = run.report.all_matches.first() {
        println!("\nStrongest pairing overall");
        render_result(best);
    }
    Ok(())
}

fn render_rankings(report: &BatchMatchReport) {
    println!("\nTop candidates per role");
    for (role_id, matches) in report.role_to_employee.iter() {
        let title = matches
            .first()
            .map(|result| result.role_title.as_str())
            .unwrap_or_default();
        println!("{role_id} {title}");
        if matches.is_empty() {
            println!("  (no candidates)");
        }
        for (rank, result) in matches.iter().enumerate() {
            println!(
                "  {}. {} ({}) overall {:.2}",
                rank + 1,
                result.employee_name,
                result.employee_id,
                result.overall
            );
        }
    }

    println!("\nBest roles per employee");
    for (employee_id, matches) in report.employee_to_role.iter() {
        let picks: Vec<String> = matches
            .iter()
            .map(|result| format!("{} {:.2}", result.role_title, result.overall))
            .collect();
        println!("  - {employee_id}: {}", picks.join(" | "));
    }
}

fn render_insights(insights: &MatchInsights) {
    let averages = &insights.averages;
    println!("\nAverage scores");
    println!(
        "  overall {:.2} | skills {:.2} | experience {:.2} | certifications {:.2} | education {:.2} | soft skills {:.2}",
        averages.overall,
        averages.skill_match,
        averages.experience_match,
        averages.certification_match,
        averages.education_match,
        averages.soft_skills
    );

    if insights.skill_gaps.is_empty() {
        return;
    }
    println!("Most common skill gaps among top candidates");
    for gap in insights.skill_gaps.iter().take(5) {
        println!(
            "  - {}: {} required / {} preferred",
            gap.skill, gap.missing_required, gap.missing_preferred
        );
    }
}

fn render_result(result: &MatchResult) {
    println!(
        "{} ({}) -> {} ({})",
        result.employee_name, result.employee_id, result.role_title, result.role_id
    );
    println!("  overall        {:.3}", result.overall);
    println!("  skills         {:.3}", result.skill_match);
    println!("  experience     {:.3}", result.experience_match);
    println!("  certifications {:.3}", result.certification_match);
    println!("  education      {:.3}", result.education_match);
    println!("  soft skills    {:.3}", result.soft_skills);
    if !result.skill_gaps.missing_required.is_empty() {
        println!(
            "  missing required: {}",
            result.skill_gaps.missing_required.join(", ")
        );
    }
    if !result.skill_gaps.missing_preferred.is_empty() {
        println!(
            "  missing preferred: {}",
            result.skill_gaps.missing_preferred.join(", ")
        );
    }
}

pub(crate) fn demo_employees() -> Vec<Employee> {
    vec![
        Employee::new("E001", "Avery Kim")
            .with_department("Engineering")
            .with_job_title("Backend Engineer")
            .with_skills(["Rust", "PostgreSQL", "Kubernetes", "gRPC"])
            .with_certifications(["CKA"])
            .with_experience(6.0)
            .with_education("Bachelor of Science in Computer Science")
            .with_peer_reviews(
                "Avery is a dependable mentor with excellent problem solving. \
                 Clear communication during incident reviews.",
            ),
        Employee::new("E002", "Jordan Patel")
            .with_department("Data")
            .with_job_title("Data Analyst")
            .with_skills(["SQL", "Python", "Tableau"])
            .with_experience(3.5)
            .with_education("Master of Statistics")
            .with_peer_reviews(
                "Great collaboration with product teams, though time management slips near deadlines.",
            ),
        Employee::new("E003", "Riley Okafor")
            .with_department("Engineering")
            .with_job_title("Platform Engineer")
            .with_skills(["Terraform", "Kubernetes", "Python", "AWS"])
            .with_certifications(["AWS Solutions Architect", "CKA"])
            .with_experience(8.0)
            .with_education("Associate degree")
            .with_peer_reviews("Strong leadership and adaptability. Calm under pressure."),
        Employee::new("E004", "Sam Novak")
            .with_department("Support")
            .with_job_title("Support Specialist")
            .with_skills(["SQL", "Customer Service"])
            .with_experience(1.0),
    ]
}

pub(crate) fn demo_roles() -> Vec<Role> {
    vec![
        Role::new("R001", "Senior Backend Engineer")
            .with_department("Engineering")
            .with_required_skills(["Rust", "PostgreSQL"])
            .with_preferred_skills(["Kubernetes", "Kafka"])
            .with_required_experience(5.0)
            .with_required_education("Bachelor"),
        Role::new("R002", "Analytics Lead")
            .with_department("Data")
            .with_required_skills(["SQL", "Python"])
            .with_preferred_skills(["dbt", "Tableau"])
            .with_required_experience(4.0)
            .with_required_education("Master"),
        Role::new("R003", "Cloud Platform Engineer")
            .with_department("Engineering")
            .with_required_skills(["Terraform", "AWS", "Kubernetes"])
            .with_required_certifications(["CKA"])
            .with_required_experience(5.0),
    ]
}
