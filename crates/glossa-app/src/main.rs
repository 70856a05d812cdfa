use std::sync::Arc;

use clap::Parser;
use glossa_binding::TranslationOptions;
use glossa_translator::TranslationService;
use tokio::io::BufReader;
use tokio::signal;

pub mod cli;
pub mod logging;
pub mod run;


use self::cli::Args;
use self::run::run;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    let config = args.load_config()?;
    logging::init(&config.log_filter, args.json_logs);

    let service = Arc::new(TranslationService::from_config(&config.translator)?);
    let options = TranslationOptions::from(&config.binding);

    if let Some(text) = args.once {
        let translated = service
            .translate(&text, &options.source_language, &options.target_language)
            .await;
        println!("{translated}");
        return Ok(());
    }

    // Shutdown future (Ctrl+C)
    let shutdown = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl+c: {e}");
            std::future::pending::<()>().await;
        }
    };

    let input = BufReader::new(tokio::io::stdin());
    run(service, options, input, tokio::io::stdout(), shutdown).await
}
