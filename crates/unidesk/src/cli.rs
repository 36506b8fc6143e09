//! Clap derive structures for the `unidesk` CLI.
//!
//! Only depends on clap and clap_complete so `build.rs` can include it to
//! render man pages.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// unidesk -- student records from the terminal
#[derive(Debug, Parser)]
#[command(
    name = "unidesk",
    version,
    about = "Manage university student records from the command line",
    long_about = "Browse and edit students, courses, departments and enrollments\n\
        held by a university records backend, track enrollments on a status\n\
        board, and ask a generative AI advisor for study suggestions.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Configuration profile to use
    #[arg(long, short = 'p', env = "UNIDESK_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Records backend URL (overrides profile)
    #[arg(long, short = 'u', env = "UNIDESK_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Output format [default: table]
    #[arg(long, short = 'o', env = "UNIDESK_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "UNIDESK_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "UNIDESK_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

impl GlobalOpts {
    /// The selected output format, table when none was chosen.
    pub fn format(&self) -> OutputFormat {
        self.output.clone().unwrap_or(OutputFormat::Table)
    }
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

/// Enrollment status as typed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Active,
    Completed,
    Failed,
    Dropped,
    Withdrawn,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage students
    #[command(alias = "st")]
    Students(StudentsArgs),

    /// Manage courses
    #[command(alias = "co")]
    Courses(CoursesArgs),

    /// Manage departments
    #[command(alias = "dept")]
    Departments(DepartmentsArgs),

    /// Manage enrollments
    #[command(alias = "en")]
    Enrollments(EnrollmentsArgs),

    /// Show enrollments grouped by status
    Board,

    /// Show record totals and recent enrollments
    #[command(alias = "dash")]
    Dashboard,

    /// Ask the AI academic advisor
    #[command(alias = "ai")]
    Advisor(AdvisorArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Students ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct StudentsArgs {
    #[command(subcommand)]
    pub command: StudentsCommand,
}

#[derive(Debug, Subcommand)]
pub enum StudentsCommand {
    /// List all students
    #[command(alias = "ls")]
    List,

    /// Get student details
    Get {
        /// Student ID
        id: i64,
    },

    /// Register a new student
    Create {
        #[command(flatten)]
        fields: StudentFields,
    },

    /// Change fields of an existing student
    Update {
        /// Student ID
        id: i64,

        #[command(flatten)]
        fields: StudentFields,
    },

    /// Delete a student
    #[command(alias = "rm")]
    Delete {
        /// Student ID
        id: i64,
    },
}

#[derive(Debug, Args)]
pub struct StudentFields {
    /// First name
    #[arg(long)]
    pub first_name: Option<String>,

    /// Last name
    #[arg(long)]
    pub last_name: Option<String>,

    /// Email address
    #[arg(long)]
    pub email: Option<String>,

    /// Phone number
    #[arg(long)]
    pub phone: Option<String>,

    /// Date of birth (YYYY-MM-DD)
    #[arg(long)]
    pub date_of_birth: Option<String>,

    /// Postal address
    #[arg(long)]
    pub address: Option<String>,

    /// Department ID
    #[arg(long)]
    pub department: Option<i64>,
}

// ── Courses ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CoursesArgs {
    #[command(subcommand)]
    pub command: CoursesCommand,
}

#[derive(Debug, Subcommand)]
pub enum CoursesCommand {
    /// List all courses
    #[command(alias = "ls")]
    List,

    /// Get course details
    Get {
        /// Course ID
        id: i64,
    },

    /// Create a course
    Create {
        #[command(flatten)]
        fields: CourseFields,
    },

    /// Change fields of an existing course
    Update {
        /// Course ID
        id: i64,

        #[command(flatten)]
        fields: CourseFields,
    },

    /// Delete a course
    #[command(alias = "rm")]
    Delete {
        /// Course ID
        id: i64,
    },
}

#[derive(Debug, Args)]
pub struct CourseFields {
    /// Course name
    #[arg(long)]
    pub name: Option<String>,

    /// Course code (e.g. MATH-201)
    #[arg(long)]
    pub code: Option<String>,

    /// Credit points
    #[arg(long)]
    pub credit: Option<u32>,

    /// Free-text description
    #[arg(long)]
    pub description: Option<String>,
}

// ── Departments ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DepartmentsArgs {
    #[command(subcommand)]
    pub command: DepartmentsCommand,
}

#[derive(Debug, Subcommand)]
pub enum DepartmentsCommand {
    /// List all departments
    #[command(alias = "ls")]
    List,

    /// Get department details
    Get {
        /// Department ID
        id: i64,
    },

    /// Create a department
    Create {
        #[command(flatten)]
        fields: DepartmentFields,
    },

    /// Change fields of an existing department
    Update {
        /// Department ID
        id: i64,

        #[command(flatten)]
        fields: DepartmentFields,
    },

    /// Delete a department
    #[command(alias = "rm")]
    Delete {
        /// Department ID
        id: i64,
    },
}

#[derive(Debug, Args)]
pub struct DepartmentFields {
    /// Department name
    #[arg(long)]
    pub name: Option<String>,

    /// Building or campus location
    #[arg(long)]
    pub location: Option<String>,

    /// Phone number
    #[arg(long)]
    pub phone: Option<String>,

    /// Head of department
    #[arg(long)]
    pub head: Option<String>,
}

// ── Enrollments ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct EnrollmentsArgs {
    #[command(subcommand)]
    pub command: EnrollmentsCommand,
}

#[derive(Debug, Subcommand)]
pub enum EnrollmentsCommand {
    /// List enrollments
    #[command(alias = "ls")]
    List {
        /// Only show enrollments in this status
        #[arg(long, short = 's', value_enum)]
        status: Option<StatusArg>,
    },

    /// Get enrollment details
    Get {
        /// Enrollment ID
        id: i64,
    },

    /// Enroll a student in a course
    Create {
        /// Student ID
        #[arg(long)]
        student: i64,

        /// Course ID
        #[arg(long)]
        course: i64,

        /// Initial status
        #[arg(long, value_enum, default_value = "active")]
        status: StatusArg,
    },

    /// Change the student, course or status of an enrollment
    Update {
        /// Enrollment ID
        id: i64,

        /// Student ID
        #[arg(long)]
        student: Option<i64>,

        /// Course ID
        #[arg(long)]
        course: Option<i64>,

        /// New status
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
    },

    /// Move an enrollment to another status
    #[command(alias = "mv")]
    Move {
        /// Enrollment ID
        id: i64,

        /// Target status
        #[arg(value_enum)]
        status: StatusArg,
    },

    /// Delete an enrollment
    #[command(alias = "rm")]
    Delete {
        /// Enrollment ID
        id: i64,
    },
}

// ── Advisor ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AdvisorArgs {
    #[command(subcommand)]
    pub command: AdvisorCommand,
}

#[derive(Debug, Subcommand)]
pub enum AdvisorCommand {
    /// Ask a free-form question
    Ask {
        /// Question text
        #[arg(required = true, num_args = 1..)]
        prompt: Vec<String>,
    },

    /// Suggest next courses from a student's completed enrollments
    Plan {
        /// Student ID
        student_id: i64,
    },
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current configuration
    Show,

    /// Print the config file location
    Path,

    /// Set a value on the active profile
    Set {
        /// Profile key (api_url, timeout, insecure, ca_cert, ai_model,
        /// ai_endpoint, ai_api_key, ai_api_key_env)
        key: String,

        /// Value to set
        value: String,
    },

    /// Store the AI API key in the system keyring
    SetAiKey {
        /// Profile to store the key for (defaults to the active profile)
        #[arg(long)]
        profile: Option<String>,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
