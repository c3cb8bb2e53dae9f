use amep_core::{AlertRowStatus, AlertSeverity, Role};
use clap::{Args, Parser, Subcommand, ValueEnum};

/// Top-level CLI parser for the `amep` binary.
#[derive(Debug, Parser)]
#[command(name = "amep", version, about = "AMEP - adaptive mastery platform client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Max rows to return from list commands
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
        }
    }
}

/// Global flags available before or after subcommands.
#[derive(Clone, Copy, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    pub limit: Option<u32>,
}

/// Shared output mode across all commands.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    Json,
    /// Single-line JSON for piping.
    Raw,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Account and session management.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Early-warning alerts and interventions.
    Interventions {
        #[command(subcommand)]
        action: InterventionCommands,
    },
    /// Deliverable and milestone grading.
    Grading {
        #[command(subcommand)]
        action: GradingCommands,
    },
    /// Classroom analytics summary.
    Analytics(AnalyticsArgs),
}

#[derive(Debug, Subcommand)]
pub enum AuthCommands {
    /// Log in and persist the session.
    Login(LoginArgs),
    /// Create an account and log in.
    Register(RegisterArgs),
    /// Clear the persisted session.
    Logout,
    /// Show who is logged in and where the session is stored.
    Status,
}

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Account email.
    #[arg(long)]
    pub email: String,
    /// Account password.
    #[arg(long)]
    pub password: String,
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// Account email.
    #[arg(long)]
    pub email: String,
    /// Account password.
    #[arg(long)]
    pub password: String,
    /// Display name.
    #[arg(long)]
    pub name: String,
    /// Account role.
    #[arg(long, value_enum)]
    pub role: RoleArg,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum RoleArg {
    Student,
    Teacher,
}

impl From<RoleArg> for Role {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Student => Self::Student,
            RoleArg::Teacher => Self::Teacher,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum InterventionCommands {
    /// List alerts merged with interventions, newest first.
    List(InterventionListArgs),
    /// Start an intervention for a student.
    Create(InterventionCreateArgs),
    /// Mark an intervention completed.
    Complete(InterventionCompleteArgs),
}

#[derive(Debug, Args)]
pub struct InterventionListArgs {
    /// Only rows in this triage state.
    #[arg(long, value_enum)]
    pub status: Option<RowStatusArg>,
    /// Only alerts of this severity.
    #[arg(long, value_enum)]
    pub severity: Option<SeverityArg>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum RowStatusArg {
    NeedsAttention,
    Active,
    Completed,
}

impl From<RowStatusArg> for AlertRowStatus {
    fn from(status: RowStatusArg) -> Self {
        match status {
            RowStatusArg::NeedsAttention => Self::NeedsAttention,
            RowStatusArg::Active => Self::InterventionActive,
            RowStatusArg::Completed => Self::Completed,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SeverityArg {
    Critical,
    AtRisk,
    Monitor,
}

impl From<SeverityArg> for AlertSeverity {
    fn from(severity: SeverityArg) -> Self {
        match severity {
            SeverityArg::Critical => Self::Critical,
            SeverityArg::AtRisk => Self::AtRisk,
            SeverityArg::Monitor => Self::Monitor,
        }
    }
}

#[derive(Debug, Args)]
pub struct InterventionCreateArgs {
    /// Student the intervention is for.
    pub student_id: String,
    /// Intervention type (e.g., tutoring, mentoring).
    #[arg(long)]
    pub kind: String,
    /// What the intervention involves.
    #[arg(long)]
    pub description: String,
}

#[derive(Debug, Args)]
pub struct InterventionCompleteArgs {
    /// Intervention to complete.
    pub id: String,
    /// Closing notes.
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum GradingCommands {
    /// Show the grading queue, newest first.
    Queue(GradingQueueArgs),
    /// Grade a deliverable.
    Grade(GradeArgs),
    /// Approve a milestone.
    Approve(MilestoneArgs),
    /// Reject a milestone.
    Reject(MilestoneRejectArgs),
}

#[derive(Debug, Args)]
pub struct GradingQueueArgs {
    /// Only ungraded items.
    #[arg(long)]
    pub pending: bool,
}

#[derive(Debug, Args)]
pub struct GradeArgs {
    /// Deliverable to grade.
    pub id: String,
    /// Numeric grade.
    #[arg(long)]
    pub grade: f64,
    /// Feedback for the student.
    #[arg(long)]
    pub feedback: String,
}

#[derive(Debug, Args)]
pub struct MilestoneArgs {
    /// Project the milestone belongs to.
    pub project_id: String,
    /// Milestone to review.
    pub milestone_id: String,
    /// Feedback for the team.
    #[arg(long, default_value = "")]
    pub feedback: String,
}

#[derive(Debug, Args)]
pub struct MilestoneRejectArgs {
    /// Project the milestone belongs to.
    pub project_id: String,
    /// Milestone to review.
    pub milestone_id: String,
    /// Why the milestone was rejected.
    #[arg(long)]
    pub reason: String,
}

#[derive(Debug, Args)]
pub struct AnalyticsArgs {
    /// How many recent alert rows to include.
    #[arg(long)]
    pub recent: Option<usize>,
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands, InterventionCommands, OutputFormat, RowStatusArg};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "amep",
            "--format",
            "raw",
            "--limit",
            "10",
            "--verbose",
            "analytics",
        ])
        .expect("cli should parse");
        assert_eq!(cli.format, OutputFormat::Raw);
        assert_eq!(cli.limit, Some(10));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Analytics(_)));
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from(["amep", "--limit", "3", "analytics"])
            .expect("cli should parse");
        let flags = cli.global_flags();
        assert_eq!(flags.limit, Some(3));
        assert_eq!(flags.format, OutputFormat::Json);
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["amep", "analytics", "--quiet"]).expect("cli should parse");
        assert!(cli.quiet);
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn intervention_list_accepts_filters() {
        let cli = Cli::try_parse_from([
            "amep",
            "interventions",
            "list",
            "--status",
            "active",
            "--severity",
            "critical",
        ])
        .expect("cli should parse");
        let Commands::Interventions {
            action: InterventionCommands::List(args),
        } = cli.command
        else {
            panic!("expected interventions list");
        };
        assert_eq!(args.status, Some(RowStatusArg::Active));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["amep", "--format", "xml", "analytics"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn grade_requires_grade_and_feedback() {
        let parsed = Cli::try_parse_from(["amep", "grading", "grade", "del-1"]);
        assert!(parsed.is_err());
    }
}
