use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use portal::{
    abstract_trait::{DynNavigator, Navigator},
    middleware::{GuardOutcome, NavigationRequest, PortalOutcome},
    state::AppState,
};
use shared::{
    config::{Config, TokenInspector},
    domain::requests::SignupRequest,
    model::Role,
    utils::init_logger,
};
use std::sync::Arc;

/// portal - property portal sign-in client
#[derive(Parser, Debug)]
#[command(name = "portal")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sign in on the staff portal
    Login { email: String, password: String },

    /// Sign in on the administrator portal
    AdminLogin { email: String, password: String },

    /// Sign in as a property owner
    OwnerLogin {
        /// 10-digit national ID
        national_id: String,
    },

    /// Create an account
    Signup {
        first_name: String,
        last_name: String,
        email: String,
        /// Mobile number, 09 followed by 9 digits
        phone: String,
        national_id: String,
        password: String,
        confirm_password: String,
        /// system_admin, manager or owner
        role: Role,
    },

    /// Forget the current session
    Logout,

    /// Show the current session
    Whoami,

    /// Run the route guard for a path
    Check {
        path: String,

        /// Roles the route requires; defaults to the roles of the path's area
        roles: Vec<Role>,
    },
}

struct PrintNavigator;

impl Navigator for PrintNavigator {
    fn navigate(&self, path: &str) {
        println!("-> navigate to {path}");
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;
    let _log_guard = init_logger("portal", config.is_dev, config.enable_file_log);

    let navigator = Arc::new(PrintNavigator) as DynNavigator;
    let state = AppState::new(&config, navigator).context("Failed to create AppState")?;
    state.start();

    run(&state, cli.command).await
}

async fn run(state: &AppState, command: Commands) -> Result<()> {
    match command {
        Commands::Login { email, password } => {
            report(state.portal.staff_login(&email, &password).await?);
        }
        Commands::AdminLogin { email, password } => {
            report(state.portal.admin_login(&email, &password).await?);
        }
        Commands::OwnerLogin { national_id } => {
            report(state.portal.owner_login(&national_id).await?);
        }
        Commands::Signup {
            first_name,
            last_name,
            email,
            phone,
            national_id,
            password,
            confirm_password,
            role,
        } => {
            let profile = SignupRequest {
                first_name,
                last_name,
                email,
                phone,
                national_id,
                password,
                confirm_password,
                role,
            };
            let created = state.exchange.signup(&profile).await?;
            println!(
                "{}",
                created.message.as_deref().unwrap_or("Account created")
            );
        }
        Commands::Logout => report(state.portal.logout()?),
        Commands::Whoami => whoami(state),
        Commands::Check { path, roles } => {
            let request = if roles.is_empty() {
                NavigationRequest::for_area(path.as_str())
            } else {
                NavigationRequest::to(path.as_str()).requiring(&roles)
            };

            match state.guard.check(&request) {
                GuardOutcome::Loading => println!("loading"),
                GuardOutcome::Render => println!("render {path}"),
                GuardOutcome::Redirected(_) => {}
                GuardOutcome::AccessDenied => println!("Access Denied"),
            }
        }
    }

    Ok(())
}

fn report(outcome: PortalOutcome) {
    match outcome {
        PortalOutcome::Navigate { to, notice } => {
            if let Some(notice) = notice {
                println!("{notice}");
            }
            println!("-> navigate to {to}");
        }
        PortalOutcome::Stay { on, notice } => {
            println!("{notice}");
            println!("(staying on {on})");
        }
    }
}

fn whoami(state: &AppState) {
    let snapshot = state.session.get();
    let Some(user) = snapshot.user else {
        println!("not signed in");
        return;
    };

    println!("{} <{}>", user.full_name(), user.email);
    println!("role: {}", user.role);
    if let Some(expires) = state
        .session
        .token()
        .and_then(|token| TokenInspector::expires_at(&token))
    {
        println!("token expires: {}", expires.to_rfc3339());
    }
}
