use clap::{Parser, Subcommand};

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2026-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

/// Parses a 1-based position from the command line into a 0-based index.
fn parse_position(raw: &str) -> Result<usize, String> {
    match raw.trim().parse::<usize>() {
        Ok(0) => Err("positions start at 1".to_string()),
        Ok(n) => Ok(n - 1),
        Err(_) => Err(format!("`{}` is not a position", raw)),
    }
}

#[derive(Parser, Debug)]
#[command(name = "weekplan", bin_name = "weekplan", version = get_version())]
#[command(about = "Plan your weeks: sections of notes to reorder and tick off")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Week to open before running the command
    #[arg(short, long, global = true, help_heading = "Options")]
    pub week: Option<String>,

    /// Verbose output (debug logging to stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the selected week
    #[command(display_order = 1)]
    Show,

    /// Manage weeks
    #[command(subcommand, display_order = 2)]
    Week(WeekCommands),

    /// Manage sections of the selected week
    #[command(subcommand, display_order = 3)]
    Section(SectionCommands),

    /// Manage notes of the selected week
    #[command(subcommand, display_order = 4)]
    Note(NoteCommands),

    /// Check and fix data inconsistencies
    #[command(display_order = 5)]
    Doctor,

    /// Print the active configuration and data directory
    #[command(display_order = 6)]
    Config,
}

#[derive(Subcommand, Debug)]
pub enum WeekCommands {
    /// List weeks
    #[command(alias = "ls")]
    List,

    /// Add a week (seeded with the default sections)
    Add {
        /// Week name (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// Delete a week and its notes
    #[command(alias = "rm")]
    Delete { id: String },

    /// Rename a week
    Rename { id: String, new_name: String },

    /// Move a week to another position
    #[command(alias = "mv")]
    Move {
        #[arg(value_parser = parse_position)]
        from: usize,
        #[arg(value_parser = parse_position)]
        to: usize,
    },

    /// Make a week the selected one
    Select { id: String },
}

#[derive(Subcommand, Debug)]
pub enum SectionCommands {
    /// Add a section
    Add {
        /// Section name (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// Delete a section and its notes
    #[command(alias = "rm")]
    Delete { id: String },

    /// Rename a section
    Rename { id: String, new_name: String },

    /// Move a section to another position
    #[command(alias = "mv")]
    Move {
        #[arg(value_parser = parse_position)]
        from: usize,
        #[arg(value_parser = parse_position)]
        to: usize,
    },

    /// Minimize or expand a section
    Toggle { id: String },
}

#[derive(Subcommand, Debug)]
pub enum NoteCommands {
    /// Add a note to a section
    Add {
        section: String,
        /// Note text (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        content: Vec<String>,
    },

    /// Delete a note
    #[command(alias = "rm")]
    Delete {
        section: String,
        #[arg(value_parser = parse_position)]
        position: usize,
    },

    /// Replace the text of a note
    Edit {
        section: String,
        #[arg(value_parser = parse_position)]
        position: usize,
        #[arg(required = true, num_args = 1..)]
        content: Vec<String>,
    },

    /// Mark a note done, or undone again
    Done {
        section: String,
        #[arg(value_parser = parse_position)]
        position: usize,
    },

    /// Move a note, within a section or to another one
    #[command(alias = "mv")]
    Move {
        section: String,
        #[arg(value_parser = parse_position)]
        position: usize,
        to_section: String,
        #[arg(value_parser = parse_position)]
        to_position: usize,
    },
}
