//! ticketing-cli
//!
//! Command-line front end for the ticketing client core.
//!
//! ```text
//!   ticketing-cli ──▶ config (TOML) ──▶ observability (tracing)
//!        │
//!        ├─ validate / sanitize / escape / detect-xss   (security, offline)
//!        ├─ token set|show|clear|status                 (auth + FileStore)
//!        └─ login / coupon / notifications / payment    (api client ──▶ REST API)
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;

use ticketing_core::api::{ApiClient, PaymentRequest};
use ticketing_core::auth::TokenStore;
use ticketing_core::config::{load_config, ClientConfig};
use ticketing_core::observability::logging::init_logging;
use ticketing_core::security::jwt::validate_jwt;
use ticketing_core::security::sanitize::{detect_xss, escape_html, sanitize_input};
use ticketing_core::security::validation::{
    validate_email, validate_password, validate_phone, validate_url, ValidationResult,
};
use ticketing_core::storage::FileStore;
use ticketing_core::Result;

#[derive(Parser)]
#[command(name = "ticketing-cli")]
#[command(about = "Validate input, manage the stored session and call the ticketing API", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `api.base_url`.
    #[arg(short, long)]
    url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Offline(OfflineCommand),
    #[command(flatten)]
    Online(OnlineCommand),
}

/// Commands that never touch storage or the network.
#[derive(Subcommand)]
enum OfflineCommand {
    /// Run a field validator
    Validate {
        #[command(subcommand)]
        field: Field,
    },
    /// Strip markup and script from a value
    Sanitize { value: String },
    /// HTML-escape a value
    Escape { value: String },
    /// Report whether a value looks like an XSS payload
    DetectXss { value: String },
}

#[derive(Subcommand)]
enum OnlineCommand {
    /// Inspect or change the stored auth token
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },
    /// Log in and store the returned token
    Login { email: String, password: String },
    /// Log out, forgetting the stored token
    Logout,
    /// Check a coupon code for an event
    Coupon {
        code: String,
        #[arg(long)]
        event: String,
    },
    /// List notifications
    Notifications {
        /// Only print the unread count
        #[arg(long)]
        unread: bool,
    },
    /// Mark a notification as read
    MarkRead { id: String },
    /// Create, inspect or confirm payments
    Payment {
        #[command(subcommand)]
        action: PaymentAction,
    },
}

#[derive(Subcommand)]
enum Field {
    Email { value: String },
    Password { value: String },
    Phone { value: Option<String> },
    Url { value: String },
    Jwt { value: String },
}

#[derive(Subcommand)]
enum TokenAction {
    Set { token: String },
    Show,
    Clear,
    Status,
}

#[derive(Subcommand)]
enum PaymentAction {
    Create {
        #[arg(long)]
        event: String,
        #[arg(long)]
        ticket_type: String,
        #[arg(long, default_value_t = 1)]
        quantity: u32,
        #[arg(long)]
        coupon: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    Get { id: String },
    Confirm { id: String },
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn bool_result(valid: bool, message: &str) -> ValidationResult {
    if valid {
        ValidationResult::valid()
    } else {
        ValidationResult::invalid(message)
    }
}

fn run_offline(command: OfflineCommand) -> Result<()> {
    match command {
        OfflineCommand::Validate { field } => {
            let result = match field {
                Field::Email { value } => {
                    bool_result(validate_email(&value), "Please enter a valid email address")
                }
                Field::Password { value } => validate_password(&value),
                Field::Phone { value } => validate_phone(value.as_deref()),
                Field::Url { value } => bool_result(validate_url(&value), "Not an http(s) URL"),
                Field::Jwt { value } => {
                    bool_result(validate_jwt(&value), "Malformed or expired token")
                }
            };
            print_json(&result)
        }
        OfflineCommand::Sanitize { value } => {
            println!("{}", sanitize_input(&value));
            Ok(())
        }
        OfflineCommand::Escape { value } => {
            println!("{}", escape_html(&value));
            Ok(())
        }
        OfflineCommand::DetectXss { value } => print_json(&json!({ "xss": detect_xss(&value) })),
    }
}

async fn run_online(command: OnlineCommand, config: &ClientConfig) -> Result<()> {
    let store = FileStore::open(&config.storage.path)?;
    let tokens = TokenStore::from_config(store, &config.storage);
    let client = ApiClient::new(&config.api, config.rate_limit, tokens)?;

    match command {
        OnlineCommand::Token { action } => match action {
            TokenAction::Set { token } => {
                if !validate_jwt(&token) {
                    tracing::warn!("Storing a token that is malformed or already expired");
                }
                client.tokens().set_token(&token);
            }
            TokenAction::Show => match client.tokens().get_token() {
                Some(token) => println!("{token}"),
                None => eprintln!("No token stored"),
            },
            TokenAction::Clear => client.logout(),
            TokenAction::Status => print_json(&json!({
                "authenticated": client.tokens().is_authenticated(),
                "claims": client.tokens().get_user_from_token(),
            }))?,
        },
        OnlineCommand::Login { email, password } => {
            let response = client.login(&email, &password).await?;
            print_json(&json!({ "user": response.user }))?;
        }
        OnlineCommand::Logout => client.logout(),
        OnlineCommand::Coupon { code, event } => {
            print_json(&client.validate_coupon(&code, &event).await?)?;
        }
        OnlineCommand::Notifications { unread } => {
            if unread {
                print_json(&json!({ "unread": client.unread_count().await? }))?;
            } else {
                print_json(&client.list_notifications().await?)?;
            }
        }
        OnlineCommand::MarkRead { id } => client.mark_notification_read(&id).await?,
        OnlineCommand::Payment { action } => match action {
            PaymentAction::Create {
                event,
                ticket_type,
                quantity,
                coupon,
                phone,
            } => {
                let payment = PaymentRequest {
                    event_id: event,
                    ticket_type_id: ticket_type,
                    quantity,
                    coupon_code: coupon,
                    contact_phone: phone,
                };
                print_json(&client.create_payment(&payment).await?)?;
            }
            PaymentAction::Get { id } => print_json(&client.get_payment(&id).await?)?,
            PaymentAction::Confirm { id } => print_json(&client.confirm_payment(&id).await?)?,
        },
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ClientConfig::default(),
    };
    if let Some(url) = cli.url {
        config.api.base_url = url;
    }
    init_logging(&config.observability);

    match cli.command {
        Commands::Offline(command) => run_offline(command),
        Commands::Online(command) => run_online(command, &config).await,
    }
}
