//! Required scores example: build a subject in code and ask what it needs.
//!
//! ```bash
//! cargo run -p gradecalc-core --example required_scores
//! ```

use gradecalc_core::config::load_config;
use gradecalc_core::model::{AssessmentKind, AssessmentRecord, AssessmentType, Category, Subject};
use gradecalc_core::{GoalOutcome, SubjectGradeEngine};

fn main() -> anyhow::Result<()> {
    // Picks up gradecalc.toml if present, defaults otherwise
    let config = load_config()?;

    let quizzes = AssessmentType::new(
        1,
        Category::new(AssessmentKind::Quiz, 4),
        20.0,
        vec![
            AssessmentRecord::new(1, 1, 1, 84.0, true)?,
            AssessmentRecord::new(2, 1, 2, 91.0, true)?,
            AssessmentRecord::new(3, 1, 3, 0.0, false)?,
            AssessmentRecord::new(4, 1, 4, 0.0, false)?,
        ],
    )?;
    let midterm = AssessmentType::new(
        2,
        Category::Midterm,
        35.0,
        vec![AssessmentRecord::new(5, 2, 1, 78.0, true)?],
    )?;
    let final_exam = AssessmentType::new(3, Category::FinalExam, 45.0, vec![])?;
    let subject = Subject::new(1, "Linear Algebra", 85.0, vec![quizzes, midterm, final_exam])?;

    let engine = SubjectGradeEngine::new(&subject, &config);
    println!(
        "{}: {:.1}% ({}), best possible {:.1}%",
        subject.name,
        engine.overall_percentage(),
        engine.letter_grade(),
        engine.max_possible_score()
    );

    for goal in [75.0, 85.0, 95.0] {
        match engine.required_scores(goal) {
            GoalOutcome::Achieved => println!("  {goal:.0}%: already achieved"),
            GoalOutcome::Infeasible => println!("  {goal:.0}%: out of reach"),
            GoalOutcome::Required(scores) => {
                let parts: Vec<String> = scores
                    .iter()
                    .map(|(kind, score)| format!("{kind} {score:.1}%"))
                    .collect();
                println!("  {goal:.0}%: {}", parts.join(", "));
            }
        }
    }

    Ok(())
}
