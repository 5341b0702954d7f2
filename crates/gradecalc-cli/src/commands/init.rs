//! The `gradecalc init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    if Path::new("gradecalc.toml").exists() {
        println!("gradecalc.toml already exists, skipping.");
    } else {
        std::fs::write("gradecalc.toml", SAMPLE_CONFIG)?;
        println!("Created gradecalc.toml");
    }

    std::fs::create_dir_all("gradebooks")?;
    let example_path = Path::new("gradebooks/example.toml");
    if example_path.exists() {
        println!("gradebooks/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_GRADEBOOK)?;
        println!("Created gradebooks/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Enter your scores in gradebooks/example.toml");
    println!("  2. Run: gradecalc validate --gradebook gradebooks/example.toml");
    println!("  3. Run: gradecalc summary --gradebook gradebooks/example.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# gradecalc configuration

# Score suggested for assessments the goal planner does not need to push.
minimum_floor_score = 60.0

# Program length used when a gradebook does not state one.
total_semesters = 8

# Uncomment to replace the standard plus/minus scale. Bands are best first.
# [[scale.bands]]
# letter = "A"
# min_percentage = 90.0
# grade_points = 4.0
#
# [[scale.bands]]
# letter = "B"
# min_percentage = 80.0
# grade_points = 3.0
"#;

const EXAMPLE_GRADEBOOK: &str = r#"[program]
total_semesters = 8
completed_gpas = []

[[semesters]]
name = "First semester"

[[semesters.subjects]]
name = "Introduction to Programming"
goal_percentage = 85

[[semesters.subjects.types]]
kind = "assignment"
weight = 30
expected_count = 3
records = [
    { score = 92, final = true },
    { score = 88, final = true },
    { score = 0, final = false },
]

[[semesters.subjects.types]]
kind = "midterm"
weight = 30
records = [{ score = 81, final = true }]

[[semesters.subjects.types]]
kind = "final_exam"
weight = 40
"#;
