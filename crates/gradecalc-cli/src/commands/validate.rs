//! The `gradecalc validate` command.

use std::path::PathBuf;

use anyhow::Result;
use gradecalc_core::config::EngineConfig;

pub fn execute(gradebook_path: PathBuf, config: &EngineConfig) -> Result<()> {
    let books = if gradebook_path.is_dir() {
        gradecalc_core::parser::load_gradebook_directory(&gradebook_path, config)?
    } else {
        vec![gradecalc_core::parser::parse_gradebook(&gradebook_path, config)?]
    };

    let mut total_warnings = 0;

    for book in &books {
        let subjects: usize = book.semesters.iter().map(|s| s.subjects.len()).sum();
        println!(
            "Gradebook: {} semester(s), {subjects} subject(s)",
            book.semesters.len()
        );

        let warnings = gradecalc_core::parser::validate_gradebook(book);
        for w in &warnings {
            let prefix = w
                .location
                .as_ref()
                .map(|loc| format!("  [{loc}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if books.is_empty() {
        println!("No gradebooks found.");
    } else if total_warnings == 0 {
        println!("All gradebooks valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
