//! Subcommand implementations.

pub mod init;
pub mod project;
pub mod report;
pub mod required;
pub mod summary;
pub mod validate;

use anyhow::Result;

/// Reject a target GPA outside 0.0–4.0.
pub(crate) fn check_goal_gpa(goal_gpa: Option<f64>) -> Result<()> {
    if let Some(goal) = goal_gpa {
        anyhow::ensure!(
            goal.is_finite() && (0.0..=4.0).contains(&goal),
            "goal GPA must be between 0.0 and 4.0, got {goal}"
        );
    }
    Ok(())
}
