use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for classtop
#[derive(Parser)]
#[command(
    name = "classtop",
    version = env!("CARGO_PKG_VERSION"),
    about = "Class schedule manager with a live terminal topbar and class reminders",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal operation log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, help = "Compress the backup into a .zip archive")]
        compress: bool,
    },

    /// Manage courses
    Course {
        #[command(subcommand)]
        action: CourseAction,
    },

    /// Manage the weekly timetable
    Schedule {
        #[command(subcommand)]
        action: ScheduleAction,
    },

    /// Semester week helpers
    Week {
        #[command(subcommand)]
        action: WeekAction,
    },

    /// Read or change stored settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Show timetable and attendance statistics
    Stats {
        #[arg(long, help = "Print as JSON")]
        json: bool,
    },

    /// Record or review attendance
    Attendance {
        #[command(subcommand)]
        action: AttendanceAction,
    },

    /// Export the timetable
    Export {
        #[arg(long, value_enum, help = "Output format")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE", help = "Absolute path of the output file")]
        file: String,

        #[arg(long, help = "Only slots recurring on this semester week")]
        week: Option<u32>,

        #[arg(long, help = "Overwrite an existing file without asking")]
        force: bool,
    },

    /// Run the live topbar
    Topbar {
        #[arg(long, help = "Print the current line once and exit")]
        once: bool,

        #[arg(long, value_name = "YYYY-MM-DD HH:MM[:SS]", help = "Pretend the clock reads this")]
        at: Option<String>,

        #[arg(long = "no-remind", help = "Do not start the reminder service")]
        no_remind: bool,
    },

    /// Run class-start reminders in the foreground
    Remind {
        #[arg(long, help = "Run a single check and exit")]
        once: bool,

        #[arg(long, value_name = "YYYY-MM-DD HH:MM[:SS]", help = "Pretend the clock reads this")]
        at: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum CourseAction {
    /// List courses, newest first
    List,

    /// Add a course
    Add {
        name: String,

        #[arg(long)]
        teacher: Option<String>,

        #[arg(long)]
        location: Option<String>,

        #[arg(long, help = "Display colour, e.g. #4ECDC4")]
        color: Option<String>,
    },

    /// Change some fields of a course
    Edit {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        teacher: Option<String>,

        #[arg(long)]
        location: Option<String>,

        #[arg(long)]
        color: Option<String>,
    },

    /// Delete a course together with its slots and attendance
    Del { id: i64 },
}

#[derive(Subcommand)]
pub enum ScheduleAction {
    /// List timetable slots
    List {
        #[arg(long, conflicts_with = "current", help = "Only slots recurring on week N")]
        week: Option<u32>,

        #[arg(long, help = "Only slots recurring on the current week")]
        current: bool,

        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=7), help = "Weekday (1 = Monday … 7 = Sunday)")]
        day: Option<u8>,

        #[arg(long, help = "Print as JSON")]
        json: bool,
    },

    /// Add a slot
    Add {
        #[arg(long)]
        course: i64,

        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=7), help = "Weekday (1 = Monday … 7 = Sunday)")]
        day: u8,

        #[arg(long, help = "Start time (HH:MM)")]
        start: String,

        #[arg(long, help = "End time (HH:MM)")]
        end: String,

        #[arg(long, help = "Semester weeks, e.g. \"1-8,10\" (default: every week)")]
        weeks: Option<String>,

        #[arg(long)]
        note: Option<String>,
    },

    /// Change some fields of a slot
    Edit {
        id: i64,

        #[arg(long)]
        course: Option<i64>,

        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=7))]
        day: Option<u8>,

        #[arg(long)]
        start: Option<String>,

        #[arg(long)]
        end: Option<String>,

        #[arg(long, help = "Semester weeks; an empty string means every week")]
        weeks: Option<String>,

        #[arg(long)]
        note: Option<String>,
    },

    /// Delete a slot
    Del { id: i64 },

    /// Check a prospective slot for overlaps without saving it
    Check {
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=7))]
        day: u8,

        #[arg(long)]
        start: String,

        #[arg(long)]
        end: String,

        #[arg(long)]
        weeks: Option<String>,

        #[arg(long, help = "Slot being edited (never conflicts with itself)")]
        exclude: Option<i64>,
    },
}

#[derive(Subcommand)]
pub enum WeekAction {
    /// Show the current semester week
    Current,

    /// Set the semester start date
    SetStart {
        #[arg(value_name = "YYYY-MM-DD")]
        date: String,
    },

    /// Forget the semester start date
    Clear,
}

#[derive(Subcommand)]
pub enum SettingsAction {
    /// List every stored setting
    List,

    /// Print one value
    Get { key: String },

    /// Store a value
    Set { key: String, value: String },

    /// Restore the defaults
    Reset,
}

#[derive(Subcommand)]
pub enum AttendanceAction {
    /// Mark a slot as attended (or absent) on a date
    Mark {
        entry_id: i64,

        #[arg(long, value_name = "YYYY-MM-DD", help = "Default: today")]
        date: Option<String>,

        #[arg(long)]
        absent: bool,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Attendance records, newest first
    History {
        #[arg(long)]
        course: Option<i64>,

        #[arg(long)]
        limit: Option<u32>,
    },
}
