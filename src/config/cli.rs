use crate::config::toml_config::TomlConfig;
use crate::config::Settings;
use crate::core::{RawInput, RequestSource};
use crate::utils::error::{IntakeError, Result};
use crate::utils::validation::Validate;
use async_trait::async_trait;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tokio::io::AsyncReadExt;

#[derive(Debug, Clone, Parser)]
#[command(name = "profile-intake")]
#[command(about = "Resolve name, email and age from query parameters or a JSON body")]
pub struct CliConfig {
    #[arg(long, global = true, help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Culture used to title-case names, e.g. en-US or tr-TR")]
    pub culture: Option<String>,

    #[arg(long, global = true, help = "Keep all-caps words in names unchanged")]
    pub preserve_uppercase_words: bool,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Resolve a single request and print the JSON response
    Resolve(ResolveArgs),
    /// Serve GET/POST /api/profile over HTTP
    Serve(ServeArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ResolveArgs {
    /// Query parameter as key=value (repeatable)
    #[arg(long = "query", short = 'q', value_parser = parse_query_pair)]
    pub query: Vec<(String, String)>,

    /// Inline request body
    #[arg(long, conflicts_with = "body_file")]
    pub body: Option<String>,

    /// Read the request body from a file ("-" for stdin)
    #[arg(long)]
    pub body_file: Option<PathBuf>,

    #[arg(long, help = "Pretty-print the JSON response")]
    pub pretty: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    /// Address to listen on (defaults to the config file, then 127.0.0.1:7071)
    #[arg(long)]
    pub bind: Option<String>,
}

fn parse_query_pair(raw: &str) -> std::result::Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got '{}'", raw)),
    }
}

impl CliConfig {
    /// 合併設定：TOML 檔案 < 命令列參數
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => {
                let file_config = TomlConfig::from_file(path)?;
                file_config.validate()?;
                file_config.into_settings()
            }
            None => Settings::default(),
        };

        if let Some(culture) = &self.culture {
            settings.culture = culture.clone();
        }
        if self.preserve_uppercase_words {
            settings.preserve_uppercase_words = true;
        }
        if let Command::Serve(ServeArgs {
            bind: Some(bind), ..
        }) = &self.command
        {
            settings.bind_address = bind.clone();
        }

        settings.validate()?;
        Ok(settings)
    }
}

/// A request assembled from command-line arguments.
#[derive(Debug, Clone)]
pub struct CliRequest {
    input: RawInput,
    body_file: Option<PathBuf>,
}

impl From<&ResolveArgs> for CliRequest {
    fn from(args: &ResolveArgs) -> Self {
        let mut input = RawInput::from_query_pairs(args.query.iter().cloned());
        if let Some(body) = &args.body {
            input = input.with_body(body.as_bytes());
        }

        Self {
            input,
            body_file: args.body_file.clone(),
        }
    }
}

#[async_trait]
impl RequestSource for CliRequest {
    fn query_param(&self, key: &str) -> Option<&str> {
        self.input.query_param(key)
    }

    async fn read_body(&self) -> Result<Option<Vec<u8>>> {
        let Some(path) = &self.body_file else {
            return self.input.read_body().await;
        };

        let read_error = |e: std::io::Error| IntakeError::BodyReadError {
            message: format!("{}: {}", path.display(), e),
        };

        if path.as_os_str() == "-" {
            let mut buffer = Vec::new();
            tokio::io::stdin()
                .read_to_end(&mut buffer)
                .await
                .map_err(read_error)?;
            return Ok(Some(buffer));
        }

        let data = tokio::fs::read(path).await.map_err(read_error)?;
        Ok(Some(data))
    }
}
