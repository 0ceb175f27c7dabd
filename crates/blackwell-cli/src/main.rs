//! Blackwell CLI - a terminal stand-in for the site's sign-up and login modal.
//!
//! Drives the in-memory identity store the same way the web modal does:
//! validate the form, call the store, show a notice, and re-render whenever
//! the session broadcast fires.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use blackwell_core::models::{Credentials, RegisterPayload, Session, SocialProvider};
use blackwell_core::notice::{error_message, AuthNotice};
use blackwell_core::validation::{validate_login, validate_signup, FieldErrors};
use blackwell_core::{IdentityStore, StoreConfig};

const HELP: &str = "\
Commands:
  signup     Create an account
  login      Sign in with email and password
  google     Sign in with Google
  facebook   Sign in with Facebook
  logout     Sign out
  whoami     Show the current session
  accounts   List registered accounts
  help       Show this help
  quit       Exit";

/// Initialize the tracing subscriber for logging
fn init_tracing() -> WorkerGuard {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let (writer, guard) = tracing_appender::non_blocking(io::stderr());
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer))
        .with(filter)
        .init();
    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let _log_guard = init_tracing();
    info!("Blackwell CLI starting");

    let config = StoreConfig::load().context("Failed to load configuration")?;
    let store = Arc::new(IdentityStore::from_config(&config));

    let _session_watch = store.subscribe(render_session);

    println!("Blackwell sign-in demo. Type `help` for commands.");
    let result = run(&store).await;

    info!("Blackwell CLI shutting down");
    result
}

async fn run(store: &IdentityStore) -> Result<()> {
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }

        match line.trim() {
            "" => {}
            "signup" => signup(store).await?,
            "login" => login(store).await?,
            "google" => social(store, SocialProvider::Google).await,
            "facebook" => social(store, SocialProvider::Facebook).await,
            "logout" => logout(store),
            "whoami" => whoami(&store.session()),
            "accounts" => {
                for account in store.accounts() {
                    println!("  {} ({})", account.email, account.display_name());
                }
            }
            "help" => println!("{}", HELP),
            "quit" | "exit" => return Ok(()),
            other => println!("Unknown command: {} (try `help`)", other),
        }
    }
}

/// Session observer: re-renders the header line on every change.
fn render_session(session: &Session) {
    match session {
        Some(account) => println!("[session] signed in as {}", account.email),
        None => println!("[session] signed out"),
    }
}

fn prompt(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;
    let mut value = String::new();
    io::stdin().lock().read_line(&mut value)?;
    Ok(value.trim().to_string())
}

fn prompt_optional(label: &str) -> Result<Option<String>> {
    let value = prompt(label)?;
    Ok(Some(value).filter(|v| !v.is_empty()))
}

fn prompt_password(label: &str) -> Result<String> {
    rpassword::prompt_password(format!("{}: ", label)).context("Failed to read password")
}

fn print_field_errors(errors: &FieldErrors) {
    for (field, message) in errors.iter() {
        println!("  {}: {}", field.label(), message);
    }
}

async fn signup(store: &IdentityStore) -> Result<()> {
    let payload = RegisterPayload {
        first_name: prompt_optional("First name")?,
        last_name: prompt_optional("Last name")?,
        mobile: prompt_optional("Mobile")?,
        country: prompt_optional("Country")?,
        email: prompt("Email")?,
        password: prompt_password("Password")?,
        confirm_password: prompt_password("Confirm password")?,
    };

    if let Err(errors) = validate_signup(&payload) {
        print_field_errors(&errors);
        return Ok(());
    }

    match store.register(payload).await {
        Ok(account) => println!("{}", AuthNotice::signed_up(&account).message()),
        Err(e) => println!("{}", error_message(&e)),
    }
    Ok(())
}

async fn login(store: &IdentityStore) -> Result<()> {
    let credentials = Credentials::new(prompt("Email")?, prompt_password("Password")?);

    if let Err(errors) = validate_login(&credentials) {
        print_field_errors(&errors);
        return Ok(());
    }

    match store.authenticate(credentials).await {
        Ok(session) => println!("{}", AuthNotice::logged_in(&session).message()),
        Err(e) => println!("{}", error_message(&e)),
    }
    Ok(())
}

async fn social(store: &IdentityStore, provider: SocialProvider) {
    println!("Waiting for {}...", provider.display_name());
    match store.authenticate_social(provider).await {
        Ok(session) => println!("{}", AuthNotice::logged_in(&session).message()),
        Err(e) => println!("{}", error_message(&e)),
    }
}

fn logout(store: &IdentityStore) {
    match store.clear_session() {
        Some(previous) => println!("{}", AuthNotice::logged_out(&previous).message()),
        None => println!("Not signed in."),
    }
}

fn whoami(session: &Session) {
    match session {
        Some(account) => {
            println!("  {} <{}>", account.display_name(), account.email);
            if let Some(provider) = account.auth_provider {
                println!("  via {} (verified: {})", provider.display_name(), account.email_verified);
            }
            if let Some(at) = account.last_login_at {
                println!("  last login: {}", at.format("%b %d, %Y %H:%M:%S"));
            }
        }
        None => println!("  Not signed in."),
    }
}
