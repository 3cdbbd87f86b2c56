//! Command line arguments.
use clap::{Parser, Subcommand};
use n0_error::StdResultExt;
use std::{net::IpAddr, path::PathBuf};
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;
use webook::{
    HttpSignupFlow, Repo, SignupForm, SignupOutcome, config::API_URL_ENV, dev_backend::DevBackend,
};

/// webook signup client
#[derive(Parser, Debug)]
struct Args {
    #[clap(short, long, env = "WEBOOK_REPO")]
    repo: Option<PathBuf>,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Submit the signup form from the terminal.
    Signup(SignupArgs),

    /// Run a local backend that serves POST /users/signup.
    DevBackend(DevBackendArgs),

    /// Print the effective configuration.
    Config,
}

#[derive(Parser, Debug)]
pub struct SignupArgs {
    #[clap(long, default_value = "")]
    pub email: String,

    #[clap(long, default_value = "")]
    pub password: String,

    /// Sent as-is; it is not compared with --password.
    #[clap(long, default_value = "")]
    pub confirm_password: String,

    /// Backend base URL, overrides the config file.
    #[clap(long, env = API_URL_ENV)]
    pub api_url: Option<String>,
}

#[derive(Parser, Debug)]
pub struct DevBackendArgs {
    #[clap(long, default_value = "127.0.0.1")]
    pub bind_addr: IpAddr,
    #[clap(long, default_value = "8080")]
    pub port: u16,
}

#[tokio::main]
async fn main() -> n0_error::Result<()> {
    let dotenv_path = dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    if let Some(path) = dotenv_path {
        info!("Loaded environment variables from {}", path.display());
    }

    let args = Args::parse();

    let path = args.repo.unwrap_or_else(Repo::default_location);
    let repo = Repo::open_or_create(path).await?;
    let config = repo.config().await?.with_env_overrides();

    match args.command {
        Commands::Signup(args) => {
            let SignupArgs {
                email,
                password,
                confirm_password,
                api_url,
            } = args;
            let mut config = config;
            if let Some(api_url) = api_url {
                config.api_url = api_url;
            }
            let flow = HttpSignupFlow::from_config(config)?;
            info!(url = flow.transport().url(), "submitting signup");
            let outcome = flow
                .submit(&SignupForm::new(email, password, confirm_password))
                .await;
            print_outcome(&outcome, &flow.config().login_route);
        }
        Commands::DevBackend(args) => {
            let bind_addr = (args.bind_addr, args.port).into();
            let cancel = CancellationToken::new();
            let (addr, server) = DevBackend::default().spawn(bind_addr, cancel.clone()).await?;
            println!("dev backend serving on http://{addr}");
            tokio::signal::ctrl_c().await?;
            cancel.cancel();
            server.await.anyerr()??;
        }
        Commands::Config => {
            let yaml = serde_yml::to_string(&config).anyerr()?;
            print!("{yaml}");
        }
    }
    Ok(())
}

fn print_outcome(outcome: &SignupOutcome, login_route: &str) {
    for field in &outcome.missing {
        println!("  {}: {}", field.label(), field.required_message());
    }
    for notice in &outcome.notices {
        println!("[{}] {}", notice.level, notice.text);
    }
    if outcome.navigate.is_some() {
        println!("-> navigate to {login_route}");
    }
}
