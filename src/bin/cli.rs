use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand, ValueEnum};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use sentinel::cli::{create_user, delete_user, issue_token, set_user_active};
use sentinel_auth::{BcryptHasher, ClaimsCodec, ExpiryPolicy, TokenFactory, TokenKind};
use sentinel_config::{JwtConfig, ServerConfig};
use sentinel_db::{PgUserStore, init_pool, run_migrations};

#[derive(Parser)]
#[command(name = "sentinel-cli")]
#[command(about = "Sentinel CLI - account administration for the Sentinel token service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Access,
    Refresh,
}

impl From<Kind> for TokenKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Access => TokenKind::Access,
            Kind::Refresh => TokenKind::Refresh,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create a user account
    CreateUser {
        #[arg(short = 'u', long)]
        username: Option<String>,

        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,

        /// Create the account disabled
        #[arg(long)]
        inactive: bool,
    },
    /// Disable an account; its outstanding tokens stop validating
    DeactivateUser { username: String },
    /// Re-enable a disabled account
    ActivateUser { username: String },
    /// Delete an account; its outstanding tokens stop validating
    DeleteUser { username: String },
    /// Check a user's credentials and print a freshly signed token
    IssueToken {
        username: String,

        #[arg(short = 'k', long, value_enum, default_value = "access")]
        kind: Kind,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Apply database migrations
    Migrate,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\n❌ {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let database_url = ServerConfig::from_env()
        .database_url
        .ok_or_else(|| anyhow!("DATABASE_URL must be set"))?;
    let pool = init_pool(&database_url)
        .await
        .context("failed to connect to database")?;

    if let Commands::Migrate = cli.command {
        run_migrations(&pool).await?;
        println!("✅ Migrations applied");
        return Ok(());
    }

    let users = PgUserStore::new(pool);
    let hasher = BcryptHasher::default();

    match cli.command {
        Commands::CreateUser {
            username,
            email,
            password,
            inactive,
        } => {
            let username = prompt_or(username, "Username")?;
            let email = prompt_or(email, "Email address")?;
            let password = match password {
                Some(password) => password,
                None => Password::new()
                    .with_prompt("Password")
                    .with_confirmation("Confirm password", "Passwords don't match")
                    .interact()?,
            };

            let identity =
                create_user(&users, &hasher, &username, &email, &password, !inactive).await?;
            println!("\n✅ User created successfully!");
            println!("   Id: {}", identity.id);
            println!("   Username: {}", identity.username);
            println!("   Active: {}", identity.active);
        }
        Commands::DeactivateUser { username } => {
            set_user_active(&users, &username, false).await?;
            println!("✅ User '{username}' deactivated");
        }
        Commands::ActivateUser { username } => {
            set_user_active(&users, &username, true).await?;
            println!("✅ User '{username}' activated");
        }
        Commands::DeleteUser { username } => {
            let identity = delete_user(&users, &username).await?;
            println!("✅ User '{username}' (id {}) deleted", identity.id);
        }
        Commands::IssueToken {
            username,
            kind,
            password,
        } => {
            let password = match password {
                Some(password) => password,
                None => Password::new().with_prompt("Password").interact()?,
            };

            let jwt_config = JwtConfig::from_env();
            let codec = Arc::new(ClaimsCodec::from_config(&jwt_config)?);
            let tokens = TokenFactory::new(codec, ExpiryPolicy::from_config(&jwt_config)?);

            let token =
                issue_token(&users, &hasher, &tokens, &username, &password, kind.into()).await?;
            println!("{token}");
        }
        Commands::Migrate => {}
    }

    Ok(())
}

fn prompt_or(value: Option<String>, prompt: &str) -> anyhow::Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Ok(Input::new().with_prompt(prompt).interact_text()?),
    }
}
