//! Command-line front end for the customer core.
//!
//! # Responsibility
//! - Wire handlers to a SQLite file for local administration and smoke checks.
//! - Enforce the uniqueness caller contract before add/update commands.
//!
//! # Invariants
//! - Payloads are printed as JSON on stdout; failures go to stderr with a
//!   non-zero exit code.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use customer_core::db::open_db;
use customer_core::{
    default_log_level, init_logging, AddCustomerCommand, CancellationToken, CommandHandler,
    CustomerCommandHandler, CustomerFields, CustomerQueryHandler, CustomerRepository,
    DeleteCustomerCommand, GetCustomerByIdQuery, GetCustomersQuery, HandlerResult,
    IsExistCustomerEmailForUpdateQuery, IsExistCustomerEmailQuery,
    IsExistCustomerNameForUpdateQuery, IsExistCustomerNameQuery, QueryHandler,
    SqliteCustomerRepository, UpdateCustomerCommand,
};
use log::info;
use serde_json::json;
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "customer")]
#[command(about = "Customer management tool", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the SQLite database file
    #[arg(long, global = true, env = "CUSTOMER_DB_PATH", default_value = "customers.sqlite3")]
    db: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "CUSTOMER_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, global = true, env = "CUSTOMER_LOG_DIR")]
    log_dir: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check core linkage
    Ping,

    /// List every customer
    List,

    /// Show one customer
    Get {
        /// Customer id
        id: Uuid,
    },

    /// Add a customer (rejects duplicate email or name + birth date)
    Add(CustomerArgs),

    /// Replace a customer's fields
    Update {
        /// Customer id
        id: Uuid,

        #[command(flatten)]
        customer: CustomerArgs,
    },

    /// Delete a customer
    Delete {
        /// Customer id
        id: Uuid,
    },

    /// Check whether an email is already used
    EmailExists {
        email: String,

        /// Ignore this customer (edit validation)
        #[arg(long)]
        exclude: Option<Uuid>,
    },

    /// Check whether a name + birth date triple is already used
    NameExists {
        first_name: String,
        last_name: String,

        /// Date of birth (YYYY-MM-DD)
        date_of_birth: NaiveDate,

        /// Ignore this customer (edit validation)
        #[arg(long)]
        exclude: Option<Uuid>,
    },
}

#[derive(Args)]
struct CustomerArgs {
    #[arg(long)]
    first_name: String,

    #[arg(long)]
    last_name: String,

    #[arg(long)]
    email: String,

    /// Date of birth (YYYY-MM-DD)
    #[arg(long)]
    date_of_birth: NaiveDate,

    #[arg(long)]
    phone_number: String,
}

impl From<CustomerArgs> for CustomerFields {
    fn from(args: CustomerArgs) -> Self {
        Self {
            first_name: args.first_name,
            last_name: args.last_name,
            email: args.email,
            date_of_birth: args.date_of_birth,
            phone_number: args.phone_number,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).map_err(anyhow::Error::msg)?;
    }

    if let Commands::Ping = cli.command {
        println!("customer_core ping={}", customer_core::ping());
        println!("customer_core version={}", customer_core::core_version());
        return Ok(());
    }

    let conn = open_db(&cli.db)
        .with_context(|| format!("failed to open database `{}`", cli.db.display()))?;
    let repo = SqliteCustomerRepository::try_new(&conn)?;
    let cancel = CancellationToken::new();

    info!("event=cli_command module=cli status=start");
    run(cli.command, &repo, &cancel)
}

fn run(command: Commands, repo: &dyn CustomerRepository, cancel: &CancellationToken) -> Result<()> {
    let queries = CustomerQueryHandler::new(repo);
    let commands = CustomerCommandHandler::new(repo);

    match command {
        Commands::Ping => Ok(()),
        Commands::List => print_json(queries.handle(GetCustomersQuery, cancel)),
        Commands::Get { id } => print_json(queries.handle(GetCustomerByIdQuery { id }, cancel)),
        Commands::Add(args) => {
            let fields = CustomerFields::from(args);
            ensure_unique(&queries, None, &fields, cancel)?;
            print_json(commands.handle(AddCustomerCommand { customer: fields }, cancel))
        }
        Commands::Update { id, customer } => {
            let fields = CustomerFields::from(customer);
            ensure_unique(&queries, Some(id), &fields, cancel)?;
            print_json(commands.handle(
                UpdateCustomerCommand {
                    id,
                    customer: fields,
                },
                cancel,
            ))
        }
        Commands::Delete { id } => {
            commands
                .handle(DeleteCustomerCommand { id }, cancel)
                .into_result()?;
            println!("{}", json!({ "deleted": id }));
            Ok(())
        }
        Commands::EmailExists { email, exclude } => {
            let result = match exclude {
                Some(id) => queries.handle(IsExistCustomerEmailForUpdateQuery { id, email }, cancel),
                None => queries.handle(IsExistCustomerEmailQuery { email }, cancel),
            };
            print_json(result)
        }
        Commands::NameExists {
            first_name,
            last_name,
            date_of_birth,
            exclude,
        } => {
            let result = match exclude {
                Some(id) => queries.handle(
                    IsExistCustomerNameForUpdateQuery {
                        id,
                        first_name,
                        last_name,
                        date_of_birth,
                    },
                    cancel,
                ),
                None => queries.handle(
                    IsExistCustomerNameQuery {
                        first_name,
                        last_name,
                        date_of_birth,
                    },
                    cancel,
                ),
            };
            print_json(result)
        }
    }
}

/// Runs the email and name existence checks that must precede add/update.
fn ensure_unique<R: CustomerRepository>(
    queries: &CustomerQueryHandler<R>,
    exclude: Option<Uuid>,
    fields: &CustomerFields,
    cancel: &CancellationToken,
) -> Result<()> {
    let email_taken = match exclude {
        Some(id) => queries.handle(
            IsExistCustomerEmailForUpdateQuery {
                id,
                email: fields.email.clone(),
            },
            cancel,
        ),
        None => queries.handle(
            IsExistCustomerEmailQuery {
                email: fields.email.clone(),
            },
            cancel,
        ),
    }
    .into_result()?;
    if email_taken {
        bail!("email `{}` is already used by another customer", fields.email);
    }

    let name_taken = match exclude {
        Some(id) => queries.handle(
            IsExistCustomerNameForUpdateQuery {
                id,
                first_name: fields.first_name.clone(),
                last_name: fields.last_name.clone(),
                date_of_birth: fields.date_of_birth,
            },
            cancel,
        ),
        None => queries.handle(
            IsExistCustomerNameQuery {
                first_name: fields.first_name.clone(),
                last_name: fields.last_name.clone(),
                date_of_birth: fields.date_of_birth,
            },
            cancel,
        ),
    }
    .into_result()?;
    if name_taken {
        bail!(
            "a customer named `{} {}` born {} already exists",
            fields.first_name,
            fields.last_name,
            fields.date_of_birth
        );
    }

    Ok(())
}

fn print_json<T: serde::Serialize>(result: HandlerResult<T>) -> Result<()> {
    let data = result.into_result()?;
    println!("{}", serde_json::to_string_pretty(&data)?);
    Ok(())
}
