//! Forger: email feedback analysis service.

use std::path::PathBuf;
use std::sync::Arc;

use forger_core::ForgerConfig;
use forger_runtime::{parse_email, LogPublisher, Orchestrator};
use forger_server::routes;
use forger_server::state::AppState;
use forger_server::validate;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    // Handle CLI subcommands
    if args.len() > 1 {
        match args[1].as_str() {
            "--validate" | "validate" => {
                let mut config = ForgerConfig::from_env()?;
                if let Some(dir) = args.get(2) {
                    config.data_paths.lexicon_dir = Some(PathBuf::from(dir));
                }
                let report = validate::validate(&config.data_paths);
                validate::print_report(&report);
                std::process::exit(if report.is_valid() { 0 } else { 1 });
            }
            "--analyse" | "analyse" => {
                let Some(path) = args.get(2) else {
                    eprintln!("Usage: forger analyse <email.json>");
                    std::process::exit(1);
                };
                return analyse_file(PathBuf::from(path));
            }
            "--help" | "-h" | "help" => {
                println!("Forger: email feedback analysis service");
                println!();
                println!("Usage: forger [command]");
                println!();
                println!("Commands:");
                println!("  (none)                   Start the server");
                println!("  validate [lexicon-dir]   Load and compile lexicons and stopwords");
                println!("  analyse <file>           Analyse an email JSON file and print the payload");
                println!("  help                     Show this help message");
                return Ok(());
            }
            _ => {
                eprintln!("Unknown command: {}. Use 'forger help' for usage.", args[1]);
                std::process::exit(1);
            }
        }
    }

    // Normal server startup
    let config = ForgerConfig::from_env()?;
    let port = config.port;
    if config.is_test_env {
        info!("Running in test environment");
    }

    let orchestrator = Orchestrator::from_config(&config, Arc::new(LogPublisher))?;
    let state = Arc::new(AppState::new(config, orchestrator));

    // Build router
    let app = routes::build_router(state.clone());

    // Start server
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("{} listening on {}", state.config.api_name, addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Run the pipeline over one EmailInfo JSON file and print the payload.
fn analyse_file(path: PathBuf) -> anyhow::Result<()> {
    let config = ForgerConfig::from_env()?;
    let orchestrator = Orchestrator::from_config(&config, Arc::new(LogPublisher))?;

    let data = std::fs::read(&path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
    let email = parse_email(&data)?;
    let payload = orchestrator.analyse(&email, None)?;

    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}
