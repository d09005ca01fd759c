use anyhow::Context;
use clap::Parser;
use steamwebapi::utils::error::ErrorSeverity;
use steamwebapi::utils::{logger, validation::Validate};
use steamwebapi::{
    ApiSettings, CliConfig, Client, ClientBuilder, Command, RequestOptions, ResponseBody, Route,
    SteamId, SteamWebApiError,
};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    let settings = match config.settings() {
        Ok(settings) => settings,
        Err(e) => {
            logger::init_cli_logger(config.verbose, None);
            fail(&e);
        }
    };

    if settings.json_logs {
        logger::init_json_logger(config.verbose, settings.log_level.as_deref());
    } else {
        logger::init_cli_logger(config.verbose, settings.log_level.as_deref());
    }

    tracing::debug!(base_url = %settings.base_url, production = settings.production, "Starting steamwebapi CLI");

    if let Err(e) = settings.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        fail(&e);
    }

    if let Err(e) = run(config.command, &settings).await {
        match e.downcast_ref::<SteamWebApiError>() {
            Some(api_error) => fail(api_error),
            None => {
                tracing::error!("{:#}", e);
                eprintln!("error: {:#}", e);
                std::process::exit(1);
            }
        }
    }
}

async fn run(command: Command, settings: &ApiSettings) -> anyhow::Result<()> {
    match command {
        Command::Steamid { values } => {
            for value in values {
                let id = SteamId::parse(&value)?;
                println!(
                    "{}\tsteamid64={}\tsteamid={}\tsteamid3={}\taccount_id={}",
                    value,
                    id.as_steamid64(),
                    id.as_steamid(),
                    id.as_steamid3(),
                    id.as_account_id()
                );
            }
            Ok(())
        }
        Command::Get {
            path,
            params,
            output,
        } => {
            let client: Client = ClientBuilder::from_config(settings)?.build()?;
            let path = if path.starts_with('/') {
                path
            } else {
                format!("/{path}")
            };

            tracing::info!(path = %path, params = params.len(), "Requesting");
            let body = client
                .request(Route::get(path), RequestOptions::new().params(params))
                .await?;

            let bytes = match body {
                ResponseBody::Json(value) => {
                    let mut text = serde_json::to_string_pretty(&value)?;
                    text.push('\n');
                    text.into_bytes()
                }
                ResponseBody::Text(text) => text.into_bytes(),
                ResponseBody::Bytes(bytes) => bytes,
            };

            match output {
                Some(path) => {
                    std::fs::write(&path, &bytes)
                        .with_context(|| format!("writing response to {}", path.display()))?;
                    tracing::info!("Wrote {} bytes to {}", bytes.len(), path.display());
                }
                None => {
                    use std::io::Write;
                    std::io::stdout().write_all(&bytes)?;
                }
            }
            Ok(())
        }
    }
}

fn fail(e: &SteamWebApiError) -> ! {
    tracing::error!(
        "Request failed: {} (severity: {:?}, status: {:?})",
        e,
        e.severity(),
        e.status()
    );
    eprintln!("error: {}", e);
    eprintln!("hint: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code)
}
