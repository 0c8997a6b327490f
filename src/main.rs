//! `bizpilot` command-line client.
//!
//! A thin consumer of [`ApiClient`]: every data command prints whatever
//! payload the client hands back, live or substituted, exactly as a
//! dashboard view would render it. Only strict failures reach the user.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use bizpilot_client::api::ApiClient;
use bizpilot_client::config::{load_or_default, ClientConfig};
use bizpilot_client::observability;

#[derive(Parser)]
#[command(name = "bizpilot")]
#[command(about = "Command-line client for the BizPilot business dashboard API", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the backend base URL.
    #[arg(short, long)]
    url: Option<String>,

    /// Override the session file path.
    #[arg(short, long)]
    session: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the session
    Login { email: String, password: String },
    /// Register and store the session
    Signup {
        name: String,
        email: String,
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the stored session user
    Whoami,
    /// Fetch the signed-in user's profile from the backend
    Profile,
    /// Sales analytics
    Analytics,
    /// Revenue forecast
    Forecast {
        #[arg(short, long)]
        period: Option<String>,
    },
    /// Uploaded data files
    Files,
    /// Generated reports
    Reports,
    /// Customer list and stats
    Customers,
    /// Business alerts
    Alerts,
    /// Ask the assistant a question
    Chat { message: String },
    /// Upload a sales data file
    Upload { path: PathBuf },
}

fn build_config(cli: &Cli) -> Result<ClientConfig, Box<dyn std::error::Error>> {
    let mut config = load_or_default(cli.config.as_deref())?;
    if let Some(url) = &cli.url {
        config.backend.base_url = url.clone();
    }
    if let Some(path) = &cli.session {
        config.session.path = path.clone();
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;
    observability::init_logging(&config.observability.log_level);

    let client = ApiClient::from_config(&config)?;

    match cli.command {
        Commands::Login { email, password } => {
            let auth = client.login(&email, &password).await.into_result()?;
            println!("Signed in as {}", auth.user.email);
        }
        Commands::Signup {
            name,
            email,
            password,
        } => {
            let auth = client.signup(&name, &email, &password).await.into_result()?;
            println!("Account created for {}", auth.user.email);
        }
        Commands::Logout => {
            client.logout();
            println!("Signed out");
        }
        Commands::Whoami => match client.get_session() {
            Some(session) => print_json(&session.user)?,
            None => println!("Not signed in"),
        },
        Commands::Profile => print_json(&client.profile().await.into_result()?)?,
        Commands::Analytics => print_json(&client.analytics().await.into_result()?)?,
        Commands::Forecast { period } => {
            print_json(&client.forecast(period.as_deref()).await.into_result()?)?
        }
        Commands::Files => print_json(&client.files().await.into_result()?)?,
        Commands::Reports => print_json(&client.reports().await.into_result()?)?,
        Commands::Customers => print_json(&client.customers().await.into_result()?)?,
        Commands::Alerts => print_json(&client.alerts().await.into_result()?)?,
        Commands::Chat { message } => {
            let reply = client.chat(&message).await.into_result()?;
            println!("{}", reply.text().unwrap_or_default());
        }
        Commands::Upload { path } => {
            let contents = tokio::fs::read(&path).await?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "upload.csv".to_string());
            print_json(&client.upload_sales_data(&file_name, contents).await.into_result()?)?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
