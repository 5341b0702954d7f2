//! The `gradecalc summary` command.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use comfy_table::{Cell, Table};
use gradecalc_core::config::EngineConfig;
use gradecalc_core::semester::{SemesterGradeEngine, SemesterSummary};
use gradecalc_core::subject::GoalOutcome;

pub fn execute(
    gradebook: PathBuf,
    semester: Option<String>,
    format: String,
    config: &EngineConfig,
) -> Result<()> {
    let book = gradecalc_core::parser::parse_gradebook(&gradebook, config)?;

    let selected = match &semester {
        Some(name) => vec![book
            .semester(name)
            .ok_or_else(|| anyhow!("semester '{name}' not found in {}", gradebook.display()))?],
        None => book.semesters.iter().collect(),
    };

    let summaries: Vec<SemesterSummary> = selected
        .into_iter()
        .map(|s| SemesterGradeEngine::new(s, config).summary())
        .collect();

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&summaries)?),
        "text" => {
            if summaries.is_empty() {
                println!("No semesters in this gradebook.");
            }
            for summary in &summaries {
                print_semester(summary);
            }
        }
        other => anyhow::bail!("unknown format '{other}', expected text or json"),
    }

    Ok(())
}

fn print_semester(summary: &SemesterSummary) {
    println!(
        "\n{}: GPA {:.2} ({} of {} subjects graded)",
        summary.name,
        summary.gpa,
        summary.graded_subjects,
        summary.subjects.len()
    );
    if summary.subjects.is_empty() {
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Subject", "Percentage", "Letter", "GPA", "Max", "Goal"]);
    for s in &summary.subjects {
        let goal = match &s.goal {
            GoalOutcome::Achieved => format!("{:.0}% achieved", s.goal_percentage),
            GoalOutcome::Infeasible => format!("{:.0}% out of reach", s.goal_percentage),
            GoalOutcome::Required(_) => format!("{:.0}% reachable", s.goal_percentage),
        };
        table.add_row(vec![
            Cell::new(&s.name),
            Cell::new(format!("{:.1}%", s.percentage)),
            Cell::new(s.letter_grade),
            Cell::new(format!("{:.1}", s.gpa)),
            Cell::new(format!("{:.1}%", s.max_possible)),
            Cell::new(goal),
        ]);
    }
    println!("{table}");
}
