//! The `gradecalc required` command.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use comfy_table::{Cell, Table};
use gradecalc_core::config::EngineConfig;
use gradecalc_core::error::validate_goal_percentage;
use gradecalc_core::model::{Gradebook, Subject};
use gradecalc_core::subject::{GoalOutcome, SubjectGradeEngine};

pub fn execute(
    gradebook: PathBuf,
    subject: String,
    semester: Option<String>,
    goal: Option<f64>,
    format: String,
    config: &EngineConfig,
) -> Result<()> {
    let book = gradecalc_core::parser::parse_gradebook(&gradebook, config)?;
    let found = find_subject(&book, &subject, semester.as_deref())?;

    let goal = validate_goal_percentage(goal.unwrap_or(found.goal_percentage))?;
    let engine = SubjectGradeEngine::new(found, config);
    let outcome = engine.required_scores(goal);

    tracing::debug!(subject = %found.name, goal, "computed required scores");

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&outcome)?),
        "text" => {
            let current = engine.overall_percentage();
            match &outcome {
                GoalOutcome::Achieved => {
                    println!(
                        "{}: goal of {goal:.1}% already achieved (currently {current:.1}%).",
                        found.name
                    );
                }
                GoalOutcome::Infeasible => {
                    println!(
                        "{}: goal of {goal:.1}% is out of reach (best possible {:.1}%).",
                        found.name,
                        engine.max_possible_score()
                    );
                }
                GoalOutcome::Required(scores) => {
                    println!(
                        "{}: currently {current:.1}%, to reach {goal:.1}% score at least:",
                        found.name
                    );
                    let mut table = Table::new();
                    table.set_header(vec!["Assessment", "Weight", "Required average"]);
                    for (kind, score) in scores {
                        let weight = found.types.get(kind).map(|t| t.weight).unwrap_or(0.0);
                        table.add_row(vec![
                            Cell::new(kind),
                            Cell::new(format!("{weight:.0}%")),
                            Cell::new(format!("{score:.1}%")),
                        ]);
                    }
                    println!("{table}");
                }
            }
        }
        other => anyhow::bail!("unknown format '{other}', expected text or json"),
    }

    Ok(())
}

fn find_subject<'a>(book: &'a Gradebook, name: &str, semester: Option<&str>) -> Result<&'a Subject> {
    match semester {
        Some(semester_name) => book
            .semester(semester_name)
            .ok_or_else(|| anyhow!("semester '{semester_name}' not found"))?
            .subject(name)
            .ok_or_else(|| anyhow!("subject '{name}' not found in semester '{semester_name}'")),
        None => book
            .semesters
            .iter()
            .find_map(|s| s.subject(name))
            .ok_or_else(|| anyhow!("subject '{name}' not found")),
    }
}
