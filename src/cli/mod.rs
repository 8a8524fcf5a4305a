pub mod balance;
pub mod dashboard;
pub mod employees;
pub mod init;
pub mod profile;
pub mod services;
pub mod status;
pub mod transactions;

use chrono::{Local, NaiveDateTime};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use zeroize::Zeroize;

use crate::access::{self, Decision, View};
use crate::auth::{self, Session};
use crate::dates::{parse_date, parse_month, DateRange};
use crate::error::{Result, SalonError};
use crate::models::{Position, ServiceKind, TxnKind};
use crate::settings::{load_settings, Settings};
use crate::store::Salon;

pub const PASSWORD_ENV: &str = "SALON_PASSWORD";

#[derive(Parser)]
#[command(name = "salon", about = "Staff, services and balance ledger for a hair salon.")]
pub struct Cli {
    /// Log in as this email (password from SALON_PASSWORD or a prompt)
    #[arg(long, global = true)]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Choose a data directory and write the starting snapshot.
    Init {
        /// Path for salon data (default: ~/Documents/salon)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Show settings, snapshot location and record counts.
    Status,
    /// Income, clients, averages and trend for a period (admin).
    Dashboard {
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Income/expense totals and the merged ledger (admin).
    Balance {
        #[command(flatten)]
        range: RangeArgs,
        /// Only show income or expense lines
        #[arg(long)]
        kind: Option<TxnKind>,
        /// Case-insensitive text to find in concept or category
        #[arg(long)]
        search: Option<String>,
    },
    /// Manage employees (admin).
    Employees {
        #[command(subcommand)]
        command: EmployeesCommands,
    },
    /// Log and list services.
    Services {
        #[command(subcommand)]
        command: ServicesCommands,
    },
    /// Record manual ledger lines (admin).
    Transactions {
        #[command(subcommand)]
        command: TransactionsCommands,
    },
    /// Show the logged-in user's details and service figures.
    Profile,
}

#[derive(Subcommand)]
pub enum EmployeesCommands {
    /// List employees.
    List {
        /// Filter by role: Estilista, Colorista, Manicurista, Gerente
        #[arg(long)]
        role: Option<Position>,
        /// Match first name, last name or email
        #[arg(long)]
        search: Option<String>,
        /// Filter by active flag
        #[arg(long)]
        active: Option<bool>,
    },
    /// Show one employee with seniority and service figures.
    Show {
        /// Employee ID (shown in `salon employees list`)
        id: String,
    },
    /// Add an employee with a temporary password.
    Add {
        first_name: String,
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
        /// Estilista, Colorista, Manicurista or Gerente
        #[arg(long)]
        role: Position,
        /// Specialty tag; repeat or comma-separate for several
        #[arg(long = "specialty", value_delimiter = ',')]
        specialties: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum ServicesCommands {
    /// List services, newest first.
    List {
        #[command(flatten)]
        range: RangeArgs,
        /// Employee ID (admin only; staff always see their own)
        #[arg(long)]
        employee: Option<String>,
    },
    /// Log a completed service.
    Add {
        /// Service date: YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
        /// Peinado, Lavado, Corte, Color, Reflejos, Depilación, Manos, Belleza de pies, Pedicuria, Ampollas, Otros
        #[arg(long)]
        kind: ServiceKind,
        #[arg(long)]
        price: f64,
        /// Client name
        #[arg(long)]
        client: String,
        /// Employee ID (required for admin, ignored for staff)
        #[arg(long)]
        employee: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum TransactionsCommands {
    /// Record an income or expense line.
    Add {
        /// income or expense
        #[arg(long)]
        kind: TxnKind,
        #[arg(long)]
        concept: String,
        #[arg(long)]
        amount: f64,
        /// Date: YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
        /// e.g. servicios, productos, mantenimiento, publicidad, salarios, alquiler, otros
        #[arg(long)]
        category: String,
        /// Employee ID credited (income only)
        #[arg(long)]
        employee: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
}

/// Date window options shared by the reporting commands.
#[derive(Args, Debug, Clone, Default)]
pub struct RangeArgs {
    /// current-month, last-month, last-3-months, last-6-months, all-time
    #[arg(long)]
    pub range: Option<DateRange>,
    /// Month filter: YYYY-MM
    #[arg(long)]
    pub month: Option<String>,
    /// Start date: YYYY-MM-DD
    #[arg(long = "from")]
    pub from_date: Option<String>,
    /// End date: YYYY-MM-DD
    #[arg(long = "to")]
    pub to_date: Option<String>,
}

impl RangeArgs {
    /// Explicit dates win over `--month`, which wins over `--range`.
    pub fn resolve(&self) -> Result<DateRange> {
        match (self.from_date.as_deref(), self.to_date.as_deref()) {
            (Some(from), Some(to)) => {
                let start = parse_date(from)
                    .ok_or_else(|| SalonError::Validation(format!("--from must be YYYY-MM-DD, got '{from}'")))?;
                let end = parse_date(to)
                    .ok_or_else(|| SalonError::Validation(format!("--to must be YYYY-MM-DD, got '{to}'")))?;
                if start > end {
                    return Err(SalonError::Validation(format!(
                        "--from ({from}) must not be later than --to ({to})"
                    )));
                }
                return Ok(DateRange::Custom {
                    start: Some(start),
                    end: Some(end),
                });
            }
            (Some(_), None) => {
                return Err(SalonError::Validation(
                    "--from requires --to (both date boundaries must be specified)".to_string(),
                ));
            }
            (None, Some(_)) => {
                return Err(SalonError::Validation(
                    "--to requires --from (both date boundaries must be specified)".to_string(),
                ));
            }
            (None, None) => {}
        }
        if let Some(m) = &self.month {
            return parse_month(m)
                .and_then(|(y, mo)| DateRange::month(y, mo))
                .ok_or_else(|| SalonError::Validation(format!("--month must be YYYY-MM, got '{m}'")));
        }
        Ok(self.range.unwrap_or_default())
    }
}

/// Everything a command needs: configuration, the loaded records, who is
/// asking, and the clock reading used for every range in this invocation.
pub struct Context {
    pub settings: Settings,
    pub salon: Salon,
    pub session: Option<Session>,
    pub now: NaiveDateTime,
}

impl Context {
    pub fn load(user: Option<&str>) -> Result<Self> {
        let settings = load_settings();
        let salon = Salon::load(&settings.snapshot_path())?;
        let session = match user {
            Some(email) => Some(log_in(&salon, email)?),
            None => None,
        };
        Ok(Self {
            settings,
            salon,
            session,
            now: Local::now().naive_local(),
        })
    }

    pub fn save(&self) -> Result<()> {
        self.salon.save(&self.settings.snapshot_path())
    }

    pub fn today_str(&self) -> String {
        self.now.date().format("%Y-%m-%d").to_string()
    }

    /// The session of a gated command. Only reachable after [`route`] permitted it.
    pub fn session(&self) -> Result<&Session> {
        self.session
            .as_ref()
            .ok_or_else(|| SalonError::Other("Login required: pass --user <email>".to_string()))
    }
}

fn log_in(salon: &Salon, email: &str) -> Result<Session> {
    let mut password = match std::env::var(PASSWORD_ENV) {
        Ok(p) => p,
        Err(_) => rpassword::prompt_password("Password: ")?,
    };
    let result = auth::login(&salon.employees, email, &password);
    password.zeroize();
    result
}

/// Run `render` if the session may open `view`; otherwise show the
/// session's home view instead.
pub fn route<F>(ctx: &mut Context, view: View, render: F) -> Result<()>
where
    F: FnOnce(&mut Context) -> Result<()>,
{
    match access::check(ctx.session.as_ref(), view) {
        Decision::Permit => render(ctx),
        Decision::Redirect(View::Login) => Err(SalonError::Other(format!(
            "Login required for {}: pass --user <email>",
            view.path()
        ))),
        Decision::Redirect(target) => {
            println!(
                "{}",
                format!(
                    "Access denied to {}. Showing {} (`salon {}`) instead.",
                    view.path(),
                    target.path(),
                    target.command()
                )
                .yellow()
            );
            render_home(ctx, target)
        }
    }
}

fn render_home(ctx: &mut Context, view: View) -> Result<()> {
    match view {
        View::Dashboard => dashboard::run(ctx, &RangeArgs::default()),
        View::Services => services::list(ctx, &RangeArgs::default(), None),
        View::Balance => balance::run(ctx, &RangeArgs::default(), None, None),
        View::Employees => employees::list(ctx, None, None, None),
        View::Profile => profile::run(ctx),
        View::Login => Err(SalonError::Other("Login required: pass --user <email>".to_string())),
    }
}
