//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use orgdesk_model::Role;

#[derive(Parser)]
#[command(
    name = "orgdesk",
    version,
    about = "Accounts, departments, employees and requests for a small organization",
    long_about = "Manage a small organization's accounts, departments, employees and requests.\n\n\
                  State lives in a local JSON store. Every command restores the session, \n\
                  performs one action and shows the view the router lands on."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path of the JSON store (overrides the settings file).
    #[arg(long = "store", value_name = "PATH", global = true)]
    pub store: Option<PathBuf>,

    /// Path of the settings file (default: platform config dir).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Print the prepared view as JSON instead of tables.
    #[arg(long = "json", global = true)]
    pub json: bool,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show a view, e.g. `#/departments` (default: the last location).
    Open {
        #[arg(value_name = "ROUTE")]
        route: Option<String>,
    },

    /// Create an unverified account.
    Register(RegisterArgs),

    /// Verify the most recently registered email.
    Verify,

    /// Sign in.
    Login(LoginArgs),

    /// Sign out.
    Logout,

    /// Manage accounts (admin).
    #[command(subcommand)]
    Account(AccountCommand),

    /// Manage departments (admin).
    #[command(subcommand)]
    Department(DepartmentCommand),

    /// Manage employees (admin).
    #[command(subcommand)]
    Employee(EmployeeCommand),

    /// File requests.
    #[command(subcommand)]
    Request(RequestCommand),
}

#[derive(Args)]
pub struct RegisterArgs {
    #[arg(long = "first-name")]
    pub first_name: String,

    #[arg(long = "last-name")]
    pub last_name: String,

    #[arg(long = "email")]
    pub email: String,

    #[arg(long = "password")]
    pub password: String,
}

#[derive(Args)]
pub struct LoginArgs {
    #[arg(long = "email")]
    pub email: String,

    #[arg(long = "password")]
    pub password: String,
}

#[derive(Subcommand)]
pub enum AccountCommand {
    /// Create an account.
    Add(AccountArgs),

    /// Edit an account; omit --password to keep the current one.
    Edit {
        #[arg(value_name = "ID")]
        id: String,

        #[command(flatten)]
        account: AccountArgs,
    },

    /// Replace an account's password.
    ResetPassword {
        #[arg(value_name = "ID")]
        id: String,

        #[arg(long = "password")]
        password: String,
    },

    /// Delete an account.
    Delete {
        #[arg(value_name = "ID")]
        id: String,
    },
}

#[derive(Args)]
pub struct AccountArgs {
    #[arg(long = "first-name")]
    pub first_name: String,

    #[arg(long = "last-name")]
    pub last_name: String,

    #[arg(long = "email")]
    pub email: String,

    #[arg(long = "password")]
    pub password: Option<String>,

    #[arg(long = "role", value_enum, default_value = "user")]
    pub role: RoleArg,

    /// Mark the account as verified.
    #[arg(long = "verified")]
    pub verified: bool,
}

#[derive(Subcommand)]
pub enum DepartmentCommand {
    /// Create a department.
    Add(DepartmentArgs),

    /// Edit a department.
    Edit {
        #[arg(value_name = "ID")]
        id: String,

        #[command(flatten)]
        department: DepartmentArgs,
    },

    /// Delete a department.
    Delete {
        #[arg(value_name = "ID")]
        id: String,
    },
}

#[derive(Args)]
pub struct DepartmentArgs {
    #[arg(long = "name")]
    pub name: String,

    #[arg(long = "description", default_value = "")]
    pub description: String,
}

#[derive(Subcommand)]
pub enum EmployeeCommand {
    /// Create an employee record.
    Add(EmployeeArgs),

    /// Edit an employee record.
    Edit {
        #[arg(value_name = "ID")]
        id: String,

        #[command(flatten)]
        employee: EmployeeArgs,
    },

    /// Delete an employee record.
    Delete {
        #[arg(value_name = "ID")]
        id: String,
    },
}

#[derive(Args)]
pub struct EmployeeArgs {
    /// External employee code.
    #[arg(long = "employee-id")]
    pub employee_id: String,

    /// Email of an existing account.
    #[arg(long = "email")]
    pub email: String,

    #[arg(long = "position")]
    pub position: String,

    /// Department id.
    #[arg(long = "dept", value_name = "ID")]
    pub dept: Option<String>,

    #[arg(long = "hire-date", value_name = "DATE", default_value = "")]
    pub hire_date: String,
}

#[derive(Subcommand)]
pub enum RequestCommand {
    /// Submit a new request for the signed-in account.
    Submit(RequestArgs),
}

#[derive(Args)]
pub struct RequestArgs {
    /// Request type, e.g. Equipment, Leave, Resources.
    #[arg(long = "type", default_value = "Equipment")]
    pub kind: String,

    /// Item as NAME or NAME:QTY; repeat for several items.
    #[arg(long = "item", value_name = "NAME[:QTY]")]
    pub items: Vec<String>,
}

/// Account role choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum RoleArg {
    Admin,
    User,
}

impl From<RoleArg> for Role {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Admin => Role::Admin,
            RoleArg::User => Role::User,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
