//! gradecalc CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand};

use gradecalc_core::config::load_config_from;

mod commands;

#[derive(Parser)]
#[command(name = "gradecalc", version, about = "Grade, GPA and goal calculator")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show percentage, letter grade and GPA for every subject
    Summary {
        /// Path to a gradebook .toml file
        #[arg(long)]
        gradebook: PathBuf,

        /// Only show this semester
        #[arg(long)]
        semester: Option<String>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Work out the scores still needed to reach a subject goal
    Required {
        /// Path to a gradebook .toml file
        #[arg(long)]
        gradebook: PathBuf,

        /// Subject name
        #[arg(long)]
        subject: String,

        /// Semester containing the subject (default: search all)
        #[arg(long)]
        semester: Option<String>,

        /// Goal percentage (default: the subject's own goal)
        #[arg(long)]
        goal: Option<f64>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Project cumulative GPA over the program
    Project {
        /// Path to a gradebook .toml file
        #[arg(long)]
        gradebook: PathBuf,

        /// Target cumulative GPA
        #[arg(long)]
        goal_gpa: Option<f64>,

        /// Override the program length
        #[arg(long)]
        total_semesters: Option<u32>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Validate gradebook TOML files
    Validate {
        /// Path to gradebook file or directory
        #[arg(long)]
        gradebook: PathBuf,
    },

    /// Write a full grade report
    Report {
        /// Path to a gradebook .toml file
        #[arg(long)]
        gradebook: PathBuf,

        /// Output file
        #[arg(long, default_value = "./gradecalc-report.json")]
        output: PathBuf,

        /// Output format: json, markdown
        #[arg(long, default_value = "json")]
        format: String,

        /// Target cumulative GPA
        #[arg(long)]
        goal_gpa: Option<f64>,
    },

    /// Create starter config and example gradebook
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("gradecalc=info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    if let Commands::Init = cli.command {
        return commands::init::execute();
    }

    let config = load_config_from(cli.config.as_deref())?;

    match cli.command {
        Commands::Summary {
            gradebook,
            semester,
            format,
        } => commands::summary::execute(gradebook, semester, format, &config),
        Commands::Required {
            gradebook,
            subject,
            semester,
            goal,
            format,
        } => commands::required::execute(gradebook, subject, semester, goal, format, &config),
        Commands::Project {
            gradebook,
            goal_gpa,
            total_semesters,
            format,
        } => commands::project::execute(gradebook, goal_gpa, total_semesters, format, &config),
        Commands::Validate { gradebook } => commands::validate::execute(gradebook, &config),
        Commands::Report {
            gradebook,
            output,
            format,
            goal_gpa,
        } => commands::report::execute(gradebook, output, format, goal_gpa, &config),
        Commands::Init => commands::init::execute(),
    }
}
