use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for ProTip365
/// Track shifts, tips, sales and hours against your targets
#[derive(Parser)]
#[command(
    name = "protip365",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track shifts, tips, sales and hours, and see your earnings against your targets",
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

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields with their defaults")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/vim/notepad)"
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

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,

        #[arg(long = "limit", help = "Only the most recent N rows")]
        limit: Option<usize>,
    },

    /// Manage employers
    Employer {
        #[command(subcommand)]
        action: EmployerAction,
    },

    /// Plan and manage expected shifts
    Shift {
        #[command(subcommand)]
        action: ShiftAction,
    },

    /// Record what was actually worked and earned
    Entry {
        #[command(subcommand)]
        action: EntryAction,
    },

    /// Earnings statistics for a period
    Stats {
        #[arg(
            long,
            short,
            default_value = "today",
            help = "today, week, month, year or four-weeks"
        )]
        period: String,

        #[arg(long, help = "Custom range (YYYY, YYYY-MM, YYYY-MM-DD or A:B)")]
        range: Option<String>,

        #[arg(
            long = "four-weeks-view",
            help = "Show the month as the last four weeks"
        )]
        four_weeks_view: bool,

        #[arg(long, help = "Compare with the previous period")]
        compare: bool,

        #[arg(long, help = "Reference day instead of today (YYYY-MM-DD)")]
        date: Option<String>,
    },

    /// Show or change the earning targets
    Targets {
        #[command(subcommand)]
        action: TargetsAction,
    },

    /// Show or change the user profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Manage the app PIN
    Pin {
        #[command(subcommand)]
        action: PinAction,
    },

    /// In-app notifications
    Alerts {
        #[command(subcommand)]
        action: AlertsAction,
    },

    /// Badges earned from your tracking
    Achievements {
        #[command(subcommand)]
        action: AchievementsAction,
    },

    /// Subscription tier and weekly limits
    Subscription {
        #[command(subcommand)]
        action: SubscriptionAction,
    },

    /// Tip, tip-out and hourly rate calculators
    Calc {
        #[command(subcommand)]
        action: CalcAction,
    },

    /// Export worked shifts
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, short = 's', help = "Export period totals instead of shifts")]
        summary: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Import shifts and entries from a legacy JSON dump
    Import {
        #[arg(long, value_name = "FILE")]
        file: String,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum EmployerAction {
    /// Add an employer
    Add {
        name: String,

        #[arg(long, help = "Hourly rate (default: profile rate)")]
        rate: Option<f64>,

        #[arg(long, help = "Display color as #RRGGBB")]
        color: Option<String>,
    },

    /// List employers
    List {
        #[arg(long, help = "Include inactive employers")]
        all: bool,
    },

    /// Change an employer
    Edit {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        rate: Option<f64>,

        #[arg(long)]
        color: Option<String>,
    },

    /// Make an employer selectable again
    Activate { id: String },

    /// Hide an employer from new shifts
    Deactivate { id: String },

    /// Delete an employer
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum ShiftAction {
    /// Plan a shift
    Plan {
        /// Date of the shift (YYYY-MM-DD)
        date: String,

        #[arg(long = "start", help = "Start time (HH:MM)")]
        start: String,

        #[arg(long = "end", help = "End time (HH:MM), may be past midnight")]
        end: String,

        #[arg(long, help = "Employer id")]
        employer: Option<String>,

        #[arg(long, help = "Hourly rate (default: employer, then profile)")]
        rate: Option<f64>,

        #[arg(long = "lunch", help = "Unpaid break in minutes")]
        lunch: Option<i32>,

        #[arg(long = "sales-target")]
        sales_target: Option<f64>,

        #[arg(long = "alert", help = "Reminder minutes before the shift")]
        alert: Option<i32>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// List shifts with their entries
    List {
        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        period: Option<String>,

        #[arg(long, help = "planned, completed or missed")]
        status: Option<String>,

        #[arg(long = "today", help = "Show only today's shifts")]
        now: bool,
    },

    /// Change a planned shift
    Edit {
        id: String,

        #[arg(long)]
        date: Option<String>,

        #[arg(long)]
        start: Option<String>,

        #[arg(long)]
        end: Option<String>,

        #[arg(long)]
        employer: Option<String>,

        #[arg(long)]
        rate: Option<f64>,

        #[arg(long = "lunch")]
        lunch: Option<i32>,

        #[arg(long = "sales-target")]
        sales_target: Option<f64>,

        #[arg(long = "alert")]
        alert: Option<i32>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Set the status of a shift
    Status {
        id: String,

        /// planned, completed or missed
        status: String,
    },

    /// Delete a shift and its entry
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum EntryAction {
    /// Record the entry of a planned shift
    Add {
        /// Shift id
        shift: String,

        #[command(flatten)]
        data: EntryArgs,
    },

    /// Record unplanned work: shift and entry in one step
    Quick {
        /// Date of the shift (YYYY-MM-DD)
        date: String,

        #[arg(long = "start", help = "Start time (HH:MM)")]
        start: String,

        #[arg(long = "end", help = "End time (HH:MM)")]
        end: String,

        #[arg(long, help = "Employer id")]
        employer: Option<String>,

        #[arg(long)]
        rate: Option<f64>,

        #[arg(long = "lunch")]
        lunch: Option<i32>,

        #[arg(long)]
        hours: Option<f64>,

        #[arg(long, default_value_t = 0.0)]
        sales: f64,

        #[arg(long, default_value_t = 0.0)]
        tips: f64,

        #[arg(long = "tip-out", default_value_t = 0.0)]
        tip_out: f64,

        #[arg(long, default_value_t = 0.0)]
        other: f64,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Change an entry
    Edit {
        id: String,

        #[arg(long)]
        start: Option<String>,

        #[arg(long)]
        end: Option<String>,

        #[arg(long)]
        hours: Option<f64>,

        #[arg(long)]
        sales: Option<f64>,

        #[arg(long)]
        tips: Option<f64>,

        #[arg(long = "tip-out")]
        tip_out: Option<f64>,

        #[arg(long)]
        other: Option<f64>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Delete an entry; its shift goes back to planned
    Delete { id: String },
}

#[derive(clap::Args, Debug, Clone)]
pub struct EntryArgs {
    #[arg(long, help = "Actual start (HH:MM, default: planned start)")]
    pub start: Option<String>,

    #[arg(long, help = "Actual end (HH:MM, default: planned end)")]
    pub end: Option<String>,

    #[arg(long, help = "Worked hours (default: from the times minus lunch)")]
    pub hours: Option<f64>,

    #[arg(long, default_value_t = 0.0)]
    pub sales: f64,

    #[arg(long, default_value_t = 0.0)]
    pub tips: f64,

    #[arg(long = "tip-out", default_value_t = 0.0)]
    pub tip_out: f64,

    #[arg(long, default_value_t = 0.0)]
    pub other: f64,

    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Subcommand)]
pub enum TargetsAction {
    /// Show the targets
    Show,

    /// Change one or more targets
    Set {
        #[arg(long = "tip-daily")]
        tip_daily: Option<f64>,
        #[arg(long = "tip-weekly")]
        tip_weekly: Option<f64>,
        #[arg(long = "tip-monthly")]
        tip_monthly: Option<f64>,
        #[arg(long = "sales-daily")]
        sales_daily: Option<f64>,
        #[arg(long = "sales-weekly")]
        sales_weekly: Option<f64>,
        #[arg(long = "sales-monthly")]
        sales_monthly: Option<f64>,
        #[arg(long = "hours-daily")]
        hours_daily: Option<f64>,
        #[arg(long = "hours-weekly")]
        hours_weekly: Option<f64>,
        #[arg(long = "hours-monthly")]
        hours_monthly: Option<f64>,
        #[arg(long = "tip-percentage")]
        tip_percentage: Option<f64>,
    },
}

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show the profile
    Show,

    /// Change profile settings
    Set {
        #[arg(long)]
        name: Option<String>,

        #[arg(long, help = "Default hourly rate")]
        rate: Option<f64>,

        #[arg(long = "week-start", help = "0 = Sunday … 6 = Saturday")]
        week_start: Option<u32>,

        #[arg(long, help = "Average deduction percentage on wages")]
        deduction: Option<f64>,

        #[arg(long, help = "en, fr or es")]
        language: Option<String>,

        #[arg(long = "alert", help = "Default reminder minutes")]
        alert: Option<i32>,

        #[arg(long = "multiple-employers")]
        multiple_employers: Option<bool>,

        #[arg(long = "default-employer")]
        default_employer: Option<String>,

        #[arg(long = "auto-lock", help = "Minutes before the app locks (0 = never)")]
        auto_lock: Option<i32>,
    },
}

#[derive(Subcommand)]
pub enum PinAction {
    /// Set or replace the PIN (4 to 8 digits)
    Set {
        pin: String,

        #[arg(long = "auto-lock")]
        auto_lock: Option<i32>,
    },

    /// Check a PIN
    Verify { pin: String },

    /// Remove the PIN
    Clear,

    /// Show the lock settings
    Status,
}

#[derive(Subcommand)]
pub enum AlertsAction {
    /// List alerts, newest first
    List {
        #[arg(long, help = "Only unread alerts")]
        unread: bool,
    },

    /// Generate alerts for missed entries, targets and achievements
    Check {
        #[arg(long, help = "Reference day instead of today (YYYY-MM-DD)")]
        date: Option<String>,
    },

    /// Mark one alert, or all of them, as read
    Read { id: Option<String> },

    /// Delete an alert
    Clear { id: String },

    /// Delete alerts older than N days
    Purge {
        #[arg(long, default_value_t = 30)]
        days: u32,
    },
}

#[derive(Subcommand)]
pub enum AchievementsAction {
    /// Every achievement and whether it is unlocked
    List,

    /// Unlock what the current data earns
    Check,
}

#[derive(Subcommand)]
pub enum SubscriptionAction {
    /// Current tier and this week's usage
    Status,

    /// Record a purchased product id
    SetProduct { product_id: String },
}

#[derive(Subcommand)]
pub enum CalcAction {
    /// Tip on a bill; without --percent every preset is shown
    Tip {
        /// Bill amount
        bill: f64,

        #[arg(long, short, help = "Tip percentage")]
        percent: Option<f64>,

        #[arg(
            long,
            default_value_t = 1,
            value_parser = clap::value_parser!(u32).range(1..),
            help = "Number of people sharing the bill"
        )]
        split: u32,
    },

    /// Share of the tips handed to support staff
    TipOut {
        /// Total tips of the shift
        tips: f64,

        #[arg(long, short, help = "Tip-out percentage")]
        percent: Option<f64>,
    },

    /// Earnings per hour worked
    Hourly {
        earnings: f64,
        hours: f64,
    },
}
