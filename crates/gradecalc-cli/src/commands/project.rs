//! The `gradecalc project` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};
use gradecalc_core::config::EngineConfig;
use gradecalc_core::projection::{ProgramGpaProjector, ProgramSummary};

use super::check_goal_gpa;

pub fn execute(
    gradebook: PathBuf,
    goal_gpa: Option<f64>,
    total_semesters: Option<u32>,
    format: String,
    config: &EngineConfig,
) -> Result<()> {
    check_goal_gpa(goal_gpa)?;

    let book = gradecalc_core::parser::parse_gradebook(&gradebook, config)?;
    let mut history = book.program_history(config);
    if let Some(total) = total_semesters {
        history.total_semesters = total;
        history.validate()?;
    }

    let summary = ProgramGpaProjector::new(&history).summary(goal_gpa);

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&summary)?),
        "text" => print_summary(&summary),
        other => anyhow::bail!("unknown format '{other}', expected text or json"),
    }

    Ok(())
}

fn print_summary(summary: &ProgramSummary) {
    println!(
        "Completed {} of {} semesters, current GPA {:.2}",
        summary.completed_semesters, summary.total_semesters, summary.projections.current
    );

    let p = &summary.projections;
    let mut table = Table::new();
    table.set_header(vec!["Scenario", "Final GPA"]);
    for (label, gpa) in [
        ("Best case", p.best),
        ("Realistic", p.realistic),
        ("Worst case", p.worst),
    ] {
        table.add_row(vec![Cell::new(label), Cell::new(format!("{gpa:.2}"))]);
    }
    println!("{table}");

    if let (Some(goal), Some(required), Some(difficulty)) =
        (summary.goal_gpa, summary.required_future_gpa, summary.difficulty)
    {
        println!(
            "To finish at {goal:.2}: average {required:.2} per remaining semester ({})",
            difficulty_label(difficulty)
        );
    }
}

fn difficulty_label(difficulty: f64) -> String {
    let label = if difficulty >= 1.0 {
        "out of reach"
    } else if difficulty >= 0.8 {
        "hard"
    } else if difficulty >= 0.5 {
        "moderate"
    } else {
        "comfortable"
    };
    format!("difficulty {:.0}%, {label}", difficulty * 100.0)
}
