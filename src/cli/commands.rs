use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bb2", about = concat!("[*] bb2do v", env!("CARGO_PKG_VERSION"), " - barebones to-dos, refined"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different data directory
    #[arg(short = 'C', long = "data-dir", global = true)]
    pub data_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the data directory and a default config
    Init(InitArgs),
    /// Add a task
    Add(AddArgs),
    /// List active tasks in priority order
    List(ListArgs),
    /// Show task details
    Show(ShowArgs),
    /// Refine and prioritize all tasks (AI when a key is set, local rules otherwise)
    Refine(RefineArgs),
    /// Undo all refinements, restoring each task's add-time text
    Undo,
    /// Set a task's priority (1 = most urgent, 10 = least)
    Priority(PriorityArgs),
    /// Complete a task, moving it to the archive
    Done(DoneArgs),
    /// Permanently delete tasks
    Delete(DeleteArgs),
    /// List the archive, or move tasks into it
    Archive(ArchiveArgs),
    /// Record today's goal, or list recorded goals
    Goal(GoalCmd),
    /// Save a feedback note, or show the saved one
    Feedback(FeedbackCmd),
    /// Show task counts
    Stats,
}

// ---------------------------------------------------------------------------
// Setup
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct InitArgs {
    /// Overwrite an existing config.toml
    #[arg(long)]
    pub force: bool,
}

// ---------------------------------------------------------------------------
// Read command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ListArgs {
    /// Also list the archive
    #[arg(short, long)]
    pub archive: bool,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Task ID to show
    pub id: u64,
}

// ---------------------------------------------------------------------------
// Write command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct AddArgs {
    /// Task text
    pub text: String,
}

#[derive(Args)]
pub struct RefineArgs {
    /// Skip the API and use the local rules even if a key is configured
    #[arg(long)]
    pub local: bool,
}

#[derive(Args)]
pub struct PriorityArgs {
    /// Task ID
    pub id: u64,
    /// New priority (1-10)
    pub priority: u8,
}

#[derive(Args)]
pub struct DoneArgs {
    /// Task ID
    pub id: u64,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Task IDs to delete
    #[arg(required = true)]
    pub ids: Vec<u64>,
}

#[derive(Args)]
pub struct ArchiveArgs {
    /// Task IDs to archive (omit to list the archive)
    pub ids: Vec<u64>,
    /// Empty the archive irreversibly
    #[arg(long, conflicts_with = "ids")]
    pub clear: bool,
}

// ---------------------------------------------------------------------------
// Journal-ish extras
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct GoalCmd {
    /// Goal text (if omitted, lists recorded goals)
    pub text: Option<String>,
}

#[derive(Args)]
pub struct FeedbackCmd {
    /// Feedback text (if omitted, shows the saved note)
    pub text: Option<String>,
}
