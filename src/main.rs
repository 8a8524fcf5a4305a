mod access;
mod auth;
mod cli;
mod dates;
mod demo;
mod error;
mod fmt;
mod metrics;
mod models;
mod settings;
mod store;

use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use access::View;
use cli::transactions::TransactionArgs;
use cli::{Cli, Commands, Context, EmployeesCommands, ServicesCommands, TransactionsCommands};
use error::Result;
use store::NewEmployee;

const LOG_ENV: &str = "SALON_LOG";

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn dispatch(user: Option<&str>, command: Commands) -> Result<()> {
    match command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Status => cli::status::run(),
        gated => {
            let mut ctx = Context::load(user)?;
            run_gated(&mut ctx, gated)
        }
    }
}

/// Commands that read the snapshot and go through the role check.
fn run_gated(ctx: &mut Context, command: Commands) -> Result<()> {
    match command {
        Commands::Init { .. } | Commands::Status => Ok(()),
        Commands::Dashboard { range } => {
            cli::route(ctx, View::Dashboard, |ctx| cli::dashboard::run(ctx, &range))
        }
        Commands::Balance {
            range,
            kind,
            search,
        } => cli::route(ctx, View::Balance, |ctx| {
            cli::balance::run(ctx, &range, kind, search)
        }),
        Commands::Employees { command } => match command {
            EmployeesCommands::List {
                role,
                search,
                active,
            } => cli::route(ctx, View::Employees, |ctx| {
                cli::employees::list(ctx, role, search, active)
            }),
            EmployeesCommands::Show { id } => {
                cli::route(ctx, View::Employees, |ctx| cli::employees::show(ctx, &id))
            }
            EmployeesCommands::Add {
                first_name,
                last_name,
                email,
                phone,
                role,
                specialties,
            } => {
                let form = NewEmployee {
                    first_name,
                    last_name,
                    email,
                    phone,
                    position: role,
                    specialties,
                };
                cli::route(ctx, View::Employees, |ctx| cli::employees::add(ctx, form))
            }
        },
        Commands::Services { command } => match command {
            ServicesCommands::List { range, employee } => {
                cli::route(ctx, View::Services, |ctx| {
                    cli::services::list(ctx, &range, employee)
                })
            }
            ServicesCommands::Add {
                date,
                kind,
                price,
                client,
                employee,
            } => cli::route(ctx, View::Services, |ctx| {
                cli::services::add(ctx, date, kind, price, client, employee)
            }),
        },
        Commands::Transactions { command } => match command {
            TransactionsCommands::Add {
                kind,
                concept,
                amount,
                date,
                category,
                employee,
                description,
            } => {
                let args = TransactionArgs {
                    kind,
                    concept,
                    amount,
                    date,
                    category,
                    employee,
                    description,
                };
                cli::route(ctx, View::Balance, |ctx| cli::transactions::add(ctx, args))
            }
        },
        Commands::Profile => cli::route(ctx, View::Profile, cli::profile::run),
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = dispatch(cli.user.as_deref(), cli.command) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
