use clap::Parser;
use profile_intake::adapters::http;
use profile_intake::config::cli::{CliConfig, CliRequest, Command};
use profile_intake::utils::logger::{self, LogFormat};
use profile_intake::RequestFieldResolver;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_logger(LogFormat::Compact, config.verbose);

    tracing::info!("Starting profile-intake CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    let settings = match config.settings() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let resolver = RequestFieldResolver::from_config(&settings)?;

    match &config.command {
        Command::Resolve(args) => {
            let request = CliRequest::from(args);
            let resolved = resolver.resolve(&request).await;

            let output = if args.pretty {
                serde_json::to_string_pretty(&resolved)?
            } else {
                serde_json::to_string(&resolved)?
            };
            println!("{}", output);
        }
        Command::Serve(_) => {
            let listener = http::bind(settings.socket_addr()?).await?;
            http::serve(listener, resolver).await?;
        }
    }

    Ok(())
}
