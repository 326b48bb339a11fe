use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "termkit")]
#[command(author = "Alberto Cavalcante")]
#[command(version)]
#[command(about = "Progress indicators and human-readable formatting for the terminal", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// When to use colors
    #[arg(
        long,
        value_enum,
        default_value_t = ColorMode::Auto,
        env = "TERMKIT_COLOR",
        global = true
    )]
    pub color: ColorMode,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ColorMode {
    /// Follow NO_COLOR, CLICOLOR_FORCE, CLICOLOR and terminal detection
    Auto,
    Always,
    Never,
}

#[derive(Subcommand)]
pub enum Command {
    /// Format a byte count (e.g. 1536 -> 1.5 KB)
    Size {
        /// Number of bytes
        bytes: u64,
    },

    /// Parse a size string into bytes (e.g. 1.5GB)
    Parse {
        /// Size string: <number>[B|KB|MB|GB|TB]
        #[arg(allow_hyphen_values = true)]
        text: String,
    },

    /// Format a duration given in milliseconds
    Duration {
        /// Duration in milliseconds
        millis: u64,
    },

    /// Format a number with thousands separators
    Count {
        /// The number
        n: u64,
    },

    /// Shorten a path to fit a column budget
    Truncate {
        /// Path to shorten
        path: String,

        /// Maximum width in columns
        max: usize,
    },

    /// Show progress indicators in action
    #[command(subcommand)]
    Demo(DemoCommand),
}

// ============================================================================
// Demo Commands
// ============================================================================

#[derive(Subcommand)]
pub enum DemoCommand {
    /// Animated spinner with message updates
    Spinner(DemoArgs),

    /// Determinate progress bar
    Bar(DemoArgs),

    /// Multi-stage run with a skipped stage
    Stages(DemoArgs),
}

#[derive(Args, Clone, Copy)]
pub struct DemoArgs {
    /// Number of work steps to simulate
    #[arg(short, long, default_value = "5")]
    pub steps: u64,

    /// Delay per step in milliseconds
    #[arg(short, long, default_value = "300")]
    pub delay_ms: u64,

    /// Finish with an error instead of success
    #[arg(long)]
    pub fail: bool,
}
