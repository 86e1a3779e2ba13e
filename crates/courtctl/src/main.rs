//! courtctl - Home Court in the terminal
//!
//! Two parties tell their side, the Honorable Panda Judge rules.

use anyhow::Result;
use clap::Parser;
use court_common::logging::{self, LogTarget};
use court_common::{CourtConfig, GeminiAdjudicator};
use std::sync::Arc;
use tracing::{info, warn};

use courtctl::cli::{run_judge, Cli, Commands};
use courtctl::tui::{self, AvatarState};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = CourtConfig::load(cli.config.as_deref())?;
    if let Some(model) = &cli.model {
        config.llm.model = model.clone();
    }

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            let level = if cli.verbose { "debug" } else { config.log.level.as_str() };
            let target = logging::init_tui(level, cli.log_file.or(config.log.file.clone()))?;
            info!("courtctl v{} starting, logging to {:?}", env!("CARGO_PKG_VERSION"), target);

            let adjudicator = GeminiAdjudicator::from_config(config.llm)?;
            info!(model = adjudicator.model(), "Judge ready");
            if !adjudicator.has_api_key() {
                warn!("No API key configured; submissions will fail until GEMINI_API_KEY or API_KEY is set");
            }

            let avatar = AvatarState::load(AvatarState::default_candidates());
            tui::run(Arc::new(adjudicator), avatar).await
        }
        Commands::Judge(args) => {
            let level = if cli.verbose { "debug" } else { "warn" };
            logging::init(level, LogTarget::Stderr)?;

            let adjudicator = GeminiAdjudicator::from_config(config.llm)?;
            let code = run_judge(
                &args,
                &adjudicator,
                &mut std::io::stdout(),
                &mut std::io::stderr(),
            )
            .await?;
            std::process::exit(code);
        }
    }
}
