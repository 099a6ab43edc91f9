use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;

use calmspace_core::VERSION;

/// CalmSpace - a private, PIN-protected mood journal
#[derive(Parser)]
#[command(name = "calmspace")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the journal database
    #[arg(short, long, global = true, env = "CALMSPACE_PATH")]
    pub journal: Option<String>,

    /// User id whose journal to open
    #[arg(short, long, global = true, env = "CALMSPACE_USER")]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Use ASCII symbols only
    #[arg(long, global = true)]
    pub ascii: bool,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Path where the journal database will be created
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// Display name shown in greetings
    #[arg(long)]
    pub name: Option<String>,

    /// Set default editor
    #[arg(long)]
    pub editor: Option<String>,

    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `status` command
#[derive(Args)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `pin` command group
#[derive(Args)]
pub struct PinArgs {
    #[command(subcommand)]
    pub command: PinSubcommand,
}

#[derive(Subcommand)]
pub enum PinSubcommand {
    /// Choose the PIN that encrypts this journal
    Set(PinSetArgs),
}

/// Arguments for `pin set`
#[derive(Args)]
pub struct PinSetArgs {
    /// Disable interactive prompts (reads CALMSPACE_PIN and CALMSPACE_PIN_CONFIRM)
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `add` command
#[derive(Args)]
pub struct AddArgs {
    /// How you feel (ecstatic, happy, neutral, sad, anxious)
    #[arg(short, long)]
    pub mood: Option<String>,

    /// Entry body (overrides stdin/editor)
    #[arg(long)]
    pub body: Option<String>,

    /// Add tags to the entry (repeat or comma-separate)
    #[arg(short, long, value_name = "TAG")]
    pub tag: Vec<String>,

    /// Save as a draft instead of a complete entry
    #[arg(long)]
    pub draft: bool,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Only entries carrying every given tag
    #[arg(short, long, value_name = "TAG")]
    pub tag: Vec<String>,

    /// Limit number of results
    #[arg(long)]
    pub limit: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Output format (table, plain)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `show` command
#[derive(Args)]
pub struct ShowArgs {
    /// Entry ID (full or unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `delete` command
#[derive(Args)]
pub struct DeleteArgs {
    /// Entry ID (full or unique prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `insights` command
#[derive(Args)]
pub struct InsightsArgs {
    /// Mood trend window (7d, 30d, all)
    #[arg(long, default_value = "7d")]
    pub window: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `prompt` command
#[derive(Args)]
pub struct PromptArgs {
    /// Pick a random prompt instead of today's
    #[arg(long)]
    pub random: bool,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the config file and an empty journal
    Init(InitArgs),

    /// Show journal location and lock state
    Status(StatusArgs),

    /// Manage the journal PIN
    Pin(PinArgs),

    /// Write a new entry
    Add(AddArgs),

    /// List entries, newest first
    List(ListArgs),

    /// Show a single entry
    Show(ShowArgs),

    /// Delete an entry
    Delete(DeleteArgs),

    /// Streak, mood trend and tags
    Insights(InsightsArgs),

    /// Print a writing prompt
    Prompt(PromptArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}
