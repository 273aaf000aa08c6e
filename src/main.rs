use clap::Parser;
use feed_summarizer::config::secrets::{ChainedSecretStore, EnvSecretStore, TomlSecretStore};
use feed_summarizer::domain::ports::SecretStore;
use feed_summarizer::utils::logger;
use feed_summarizer::{
    CliConfig, DigestEngine, Exporter, GeminiConnector, HttpFeedSource, LocalStorage,
    TerminalProgress, TerminalRenderer,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting feed-summarizer");

    let settings = match cli.load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!(
                "❌ Configuration failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    let file_secrets = match TomlSecretStore::from_file(&settings.secrets_path) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("❌ Could not read secrets file {}: {}", settings.secrets_path, e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };
    let stores: Vec<Box<dyn SecretStore>> = vec![Box::new(EnvSecretStore), Box::new(file_secrets)];
    let secrets = ChainedSecretStore::new(stores);

    let engine = DigestEngine::new(HttpFeedSource::new()?, GeminiConnector, secrets)
        .with_progress(TerminalProgress);

    let page = engine.run(&settings).await;

    TerminalRenderer::new(std::io::stdout().lock()).render(&page)?;

    if !settings.formats.is_empty() {
        let storage = LocalStorage::new(settings.output_dir.clone());
        let exporter = Exporter::new(storage.clone(), settings.formats.clone());

        match exporter.export(&page).await {
            Ok(written) => {
                for name in written {
                    let path = storage.full_path(&name);
                    tracing::info!("📁 Export saved to: {}", path.display());
                    println!("📁 Export saved to: {}", path.display());
                }
            }
            Err(e) => {
                tracing::error!("❌ Export failed: {}", e);
                eprintln!("❌ {}", e.user_friendly_message());
                eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
