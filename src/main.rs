use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use fanforge::chat;
use fanforge::config::AppConfig;
use fanforge::web_server::{self, AppState};

// Define the command-line interface structure using clap
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Start the design assistant web server.
    Serve {
        #[arg(long, default_value_t = 9900, help = "Port for the web server.")]
        port: u16,
    },
    /// Chat with a running design assistant from the terminal.
    Chat {
        #[arg(
            long,
            default_value = "http://127.0.0.1:9900",
            help = "Base URL of a running fanforge server."
        )]
        server: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (for environment variables like API keys)
    dotenvy::dotenv().ok();

    // Reads log level from RUST_LOG environment variable (e.g., RUST_LOG=info,fanforge=debug)
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port } => {
            // Missing credentials are a startup failure, not a per-request one.
            let config = AppConfig::from_env().context("Failed to load configuration")?;
            info!(
                port,
                chat_model = %config.chat_model,
                images = config.enable_images,
                "Starting fanforge web server"
            );
            let state = AppState::new(config);

            let mut server_handle = tokio::spawn(async move {
                if let Err(e) = web_server::start_web_server(state, port).await {
                    error!("Web server failed: {:?}", e);
                }
            });

            let ctrl_c = tokio::signal::ctrl_c();
            tokio::pin!(ctrl_c);

            tokio::select! {
                _ = &mut ctrl_c => {
                    info!("Ctrl-C received, initiating shutdown...");
                }
                res = &mut server_handle => {
                    match res {
                        Ok(_) => info!("Web server task completed unexpectedly."),
                        Err(e) if e.is_panic() => error!("Web server task panicked: {:?}", e),
                        Err(e) => error!("Web server task failed: {:?}", e),
                    }
                }
            }

            if !server_handle.is_finished() {
                server_handle.abort();
            }
            info!("Shutdown complete.");
        }
        Commands::Chat { server } => {
            info!("Starting interactive chat against {}", server);
            chat::run_chat(&server).await.context("Chat session failed")?;
            info!("Chat session finished.");
        }
    }

    Ok(())
}
