use clap::{Parser, Subcommand};

/// Command-line interface definition for timecard
/// Offline-first timesheet client around a local SQLite mirror
#[derive(Parser)]
#[command(
    name = "timecard",
    version = env!("CARGO_PKG_VERSION"),
    about = "Compose time entries offline, mirror remote reference data, replay entries to the remote timesheet",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file writes)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration file, the database and the settings table
    Init,

    /// Show the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,
    },

    /// Add a time entry to the local database
    Add {
        /// Start time (HH:MM)
        start: String,

        /// End time (HH:MM)
        end: String,

        /// Remote project id
        project: i64,

        /// Remote task id
        task: i64,

        /// Free-text description
        #[arg(trailing_var_arg = true)]
        description: Vec<String>,

        /// Date of the entry (YYYY-MM-DD, default today)
        #[arg(long, short = 'd')]
        date: Option<String>,

        /// Mark the entry billable
        #[arg(long, short = 'b')]
        billable: bool,

        /// Override the default department id
        #[arg(long = "dept", short = 'D')]
        dept: Option<i64>,

        /// Free-text notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// Show the entries of one date
    Show {
        /// Date to show (YYYY-MM-DD, default today)
        #[arg(long, short = 'd')]
        date: Option<String>,

        /// Resolve department/project/task names in the listing
        #[arg(long, short = 'l')]
        long: bool,
    },

    /// List mirrored projects and tasks (or departments / templates)
    List {
        #[arg(long, short = 'd', help = "List departments instead")]
        dept: bool,

        #[arg(long, short = 't', help = "List templates instead")]
        template: bool,
    },

    /// Search mirrored reference data by name
    Search {
        /// Substring to look for
        query: String,

        #[arg(long, short = 'd', help = "Search departments instead")]
        dept: bool,

        #[arg(long, short = 't', help = "Search templates instead")]
        template: bool,
    },

    /// Delete local entries
    Del {
        #[arg(long, short = 'e', help = "Delete the entry with this id")]
        entry: Option<i64>,

        #[arg(long, short = 'd', help = "Delete all entries of this date (YYYY-MM-DD)")]
        date: Option<String>,
    },

    /// Pull current departments, projects and tasks from the remote system
    Update,

    /// Replay local entries to the remote system.
    ///
    /// Nothing marks an entry as already pushed: re-running the same
    /// selector submits the same entries again, and duplicates have to be
    /// cleaned up on the remote side.
    Push {
        #[arg(long, short = 'e', help = "Push a single entry by id")]
        entry: Option<i64>,

        #[arg(long, short = 'd', help = "Push all entries of this date (YYYY-MM-DD)")]
        date: Option<String>,

        #[arg(
            long,
            short = 'w',
            help = "Push the whole Sunday-Saturday week containing this date (YYYY-MM-DD)"
        )]
        week: Option<String>,
    },

    /// Expand a template into entries starting at the given time
    Run {
        /// Template name
        template: String,

        /// Start time of the first entry (HH:MM)
        start: String,

        /// Date to expand on (YYYY-MM-DD, default today)
        #[arg(long, short = 'd')]
        date: Option<String>,

        /// Placeholder value as NAME:VALUE (repeatable)
        #[arg(long = "field", short = 'f')]
        fields: Vec<String>,
    },

    /// Manage entry templates
    Template {
        #[command(subcommand)]
        command: TemplateCommands,
    },
}

#[derive(Subcommand)]
pub enum TemplateCommands {
    /// Create an empty template
    New {
        /// Template name (no spaces)
        name: String,

        /// Free-text description
        #[arg(default_value = "")]
        description: String,
    },

    /// Append an action to a template
    Add {
        /// Template name
        template: String,

        /// Stack position (actions expand in this order)
        stack: i64,

        /// Duration in minutes
        duration: i64,

        /// Department id
        dept: i64,

        /// Project id
        project: i64,

        /// Task id
        task: i64,

        /// Description; {NAME} markers are substituted at run time
        #[arg(trailing_var_arg = true)]
        description: Vec<String>,

        /// Mark produced entries billable
        #[arg(long, short = 'b')]
        billable: bool,

        /// Notes; {NAME} markers are substituted at run time
        #[arg(long)]
        notes: Option<String>,
    },

    /// Show a template and its actions
    Show {
        /// Template name
        name: String,
    },
}
