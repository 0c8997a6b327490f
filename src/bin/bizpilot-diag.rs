use clap::{Parser, Subcommand};

use bizpilot_client::api::{ApiClient, Envelope, Verb};
use bizpilot_client::config::load_or_default;
use bizpilot_client::health::{self, ProbeStatus};
use bizpilot_client::observability;

#[derive(Parser)]
#[command(name = "bizpilot-diag")]
#[command(about = "Connectivity diagnostics for the BizPilot backend", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Override the backend base URL.
    #[arg(short, long)]
    url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check GET /health
    Health,
    /// Probe every read-only endpoint with the stored session token
    Sweep {
        /// Send each of these verbs to every route (e.g. `get,post`) and
        /// report 405 separately from 404. POST probes send `{}`.
        #[arg(long, value_delimiter = ',')]
        verbs: Vec<Verb>,
    },
    /// List endpoint descriptors and their fallback policies
    Endpoints,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut config = load_or_default(cli.config.as_deref())?;
    if let Some(url) = cli.url {
        config.backend.base_url = url;
    }
    observability::init_logging(&config.observability.log_level);

    let client = ApiClient::from_config(&config)?;

    match cli.command {
        Commands::Health => match health::check_health(&client).await {
            Envelope::Failed(failure) => {
                eprintln!("Error: backend unhealthy: {}", failure);
                std::process::exit(1);
            }
            envelope => {
                let body = envelope.into_payload().unwrap_or_default();
                println!("{}", serde_json::to_string_pretty(&body)?);
            }
        },
        Commands::Sweep { verbs } => {
            if !client.is_authenticated() {
                eprintln!("Warning: no stored session, authenticated endpoints will answer 401");
            }
            let reports = if verbs.is_empty() {
                health::sweep(&client).await
            } else {
                health::sweep_verbs(&client, &verbs).await
            };
            for report in &reports {
                let line = match &report.status {
                    ProbeStatus::Ok { status, elapsed } => {
                        format!("OK      {} ({} ms)", status, elapsed.as_millis())
                    }
                    ProbeStatus::WrongVerb { elapsed } => {
                        format!("405     route exists, wrong verb ({} ms)", elapsed.as_millis())
                    }
                    ProbeStatus::Rejected { elapsed, failure } => format!(
                        "{:<7} {} ({} ms)",
                        failure.kind().as_str(),
                        failure,
                        elapsed.as_millis()
                    ),
                    ProbeStatus::Unreachable(failure) => format!("DOWN    {}", failure),
                };
                println!(
                    "{:<5} {:<20} [{}] {}",
                    report.verb.as_str(),
                    report.endpoint.path,
                    report.endpoint.policy,
                    line
                );
            }
            if reports.iter().any(|r| matches!(r.status, ProbeStatus::Unreachable(_))) {
                std::process::exit(1);
            }
        }
        Commands::Endpoints => {
            for endpoint in bizpilot_client::api::catalog() {
                println!(
                    "{:<10} {:<5} {:<20} auth={:<5} {}",
                    endpoint.name,
                    endpoint.verb.as_str(),
                    endpoint.path,
                    endpoint.auth,
                    endpoint.policy
                );
            }
        }
    }

    Ok(())
}
