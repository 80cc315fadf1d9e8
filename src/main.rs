// gemlens - Structured, multi-facet image analysis powered by Gemini
// Author: kelexine (https://github.com/kelexine)

use anyhow::Result;
use clap::Parser;
use gemlens::analysis::render::{render_state, render_text};
use gemlens::analysis::{AnalysisSession, AnalysisState, Analyzer, Language};
use gemlens::cli::{Args, Command, OutputFormat};
use gemlens::config::AppConfig;
use gemlens::gemini::GeminiClient;
use gemlens::server::create_router;
use gemlens::utils::logging;
use gemlens::vision::ImageInput;
use std::net::SocketAddr;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Parse CLI arguments
    let args = Args::parse();

    // Phase 1: Load configuration
    let mut config = AppConfig::load(args.config.as_deref())?;

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting gemlens v{}", env!("CARGO_PKG_VERSION"));

    // Phase 3: Resolve the API key before anything can call out
    let api_key = config.require_api_key()?;

    // Phase 4: Build the Gemini client and analyzer
    let client = GeminiClient::new(&config.gemini, api_key)?;
    info!("Using model {} at {}", client.model(), client.base_url());
    let analyzer = Analyzer::new(Arc::new(client), config.gemini.model.clone());

    match args.command {
        Command::Analyze {
            path,
            language,
            format,
        } => {
            let language = language
                .unwrap_or_else(|| Language::new(config.analysis.default_language.clone()));
            run_analyze(&analyzer, &path, language, format).await
        }
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(config, analyzer).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Analyze one file through a session and print what it ends up showing.
async fn run_analyze(
    analyzer: &Analyzer,
    path: &Path,
    language: Language,
    format: OutputFormat,
) -> Result<ExitCode> {
    let mut session = AnalysisSession::new(language);

    let image = match ImageInput::from_path(path).await {
        Ok(image) => image,
        Err(e) => {
            eprintln!("Error: {}", e.user_message());
            return Ok(ExitCode::FAILURE);
        }
    };
    session.select_image(image);

    match session.analyze(analyzer).await {
        AnalysisState::Succeeded(result) => {
            match format {
                OutputFormat::Text => print!("{}", render_text(result)),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(result)?),
            }
            Ok(ExitCode::SUCCESS)
        }
        state => {
            eprint!("{}", render_state(state));
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn serve(config: AppConfig, analyzer: Analyzer) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let app = create_router(config, analyzer);

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
