//! The `gradecalc report` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use gradecalc_core::config::EngineConfig;
use gradecalc_core::report::GradeReport;

use super::check_goal_gpa;

pub fn execute(
    gradebook: PathBuf,
    output: PathBuf,
    format: String,
    goal_gpa: Option<f64>,
    config: &EngineConfig,
) -> Result<()> {
    check_goal_gpa(goal_gpa)?;

    let book = gradecalc_core::parser::parse_gradebook(&gradebook, config)?;
    let report = GradeReport::build(&book, config, goal_gpa);

    match format.as_str() {
        "json" => report.save_json(&output)?,
        "markdown" | "md" => {
            if let Some(parent) = output.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&output, report.to_markdown())
                .with_context(|| format!("failed to write report to {}", output.display()))?;
        }
        other => anyhow::bail!("unknown format '{other}', expected json or markdown"),
    }

    tracing::info!(id = %report.id, "report written");
    println!("Report saved to: {}", output.display());

    Ok(())
}
