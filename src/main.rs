use boxfit::config::{CatalogAction, Command, GistAction};
use boxfit::core::exporter::export_bundle;
use boxfit::utils::error::ErrorSeverity;
use boxfit::utils::{logger, validation::Validate};
use boxfit::{AppConfig, BoxfitError, CliConfig, GistClient, LocalStore, Session};
use clap::Parser;
use std::path::PathBuf;

async fn run(cli: CliConfig, config: AppConfig) -> boxfit::Result<()> {
    let state_dir = cli
        .state_dir
        .clone()
        .unwrap_or_else(|| config.storage.state_dir.clone());
    tracing::debug!("Using state directory: {}", state_dir);

    let store = LocalStore::new(&state_dir);
    let mut session = Session::open(store, &config.recommend).await?;
    session.seed_token(cli.github_token.clone());

    match cli.command {
        Command::Recommend {
            length,
            width,
            height,
            cushion,
            reset,
        } => {
            if reset {
                session.reset();
            }
            if let Some(cushion) = cushion {
                session.set_cushion(cushion)?;
            }
            let recommendation = session.recommend(&length, &width, &height)?;
            println!("{}", recommendation);
        }
        Command::Import { file } => {
            let warnings = session.import_file(&file).await?;
            println!(
                "✅ Box definitions updated successfully! ({} boxes)",
                session.catalog().len()
            );
            for warning in warnings {
                println!("⚠️  Skipped {}", warning);
            }
        }
        Command::Export { format, output } => {
            let (payload, default_name) = match format.catalog_format() {
                Some(format) => (session.export(format)?, format.default_file_name()),
                None => (
                    export_bundle(session.catalog())?,
                    "box-definitions.zip".to_string(),
                ),
            };
            let output = output.unwrap_or_else(|| PathBuf::from(default_name));
            tokio::fs::write(&output, payload).await?;
            tracing::info!("📁 Output saved to: {}", output.display());
            println!("📁 Output saved to: {}", output.display());
        }
        Command::Catalog { action } => match action {
            CatalogAction::List => {
                for shipping_box in session.catalog() {
                    println!("{}", shipping_box);
                }
            }
            CatalogAction::Reset => {
                session.reset_catalog().await?;
                println!("✅ Restored {} built-in boxes", session.catalog().len());
            }
        },
        Command::Gist { action } => match action {
            GistAction::SetToken { token } => {
                session.set_token(&token).await?;
                println!("✅ GitHub token saved");
            }
            GistAction::SetId { id } => {
                session.set_gist_id(&id).await?;
                println!("✅ Gist id saved");
            }
            GistAction::Save => {
                let client = GistClient::new(&config.gist, session.require_token()?)?;
                println!("Saving to GitHub...");
                let id = session.save_remote(&client).await?;
                println!("Successfully saved to GitHub! (gist {})", id);
            }
            GistAction::Load => {
                let client = GistClient::new(&config.gist, session.require_token()?)?;
                println!("Loading from GitHub...");
                let count = session.load_remote(&client).await?;
                println!("Successfully loaded from GitHub! ({} boxes)", count);
            }
        },
    }

    Ok(())
}

fn exit_code(error: &BoxfitError) -> i32 {
    match error.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    let config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file: {}", e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    if let Err(e) = run(cli, config).await {
        tracing::error!(
            "❌ boxfit failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );

        // 輸入錯誤直接顯示訊息即可
        if e.severity() == ErrorSeverity::Low {
            println!("{}", e.user_friendly_message());
        } else {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
        }

        let code = exit_code(&e);
        if code > 0 {
            std::process::exit(code);
        }
    }

    Ok(())
}
