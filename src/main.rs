use anyhow::Context;
use clap::Parser;
use iplocator::core::export::{default_export_name, export_outcome, render};
use iplocator::core::input::collect_addresses;
use iplocator::utils::error::{ErrorSeverity, LocateError, Result};
use iplocator::utils::{logger, validation::Validate};
use iplocator::{
    BatchOptions, BatchOutcome, CliConfig, IpLocateClient, LocalStorage, Locator, TomlConfig,
};
use std::io::Write;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    if let Some(path) = config.config.clone() {
        tracing::info!("📁 Loading configuration from: {}", path);
        let file = TomlConfig::from_file(&path)
            .with_context(|| format!("failed to load config file '{}'", path))?;
        config = config.with_file_defaults(&file);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        exit_with(&e);
    }

    if let Err(e) = run(&config).await {
        tracing::error!(
            "❌ Lookup failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        if let LocateError::NoSuccessfulResults { errors } = &e {
            for message in errors {
                eprintln!("{}", message);
            }
        }
        exit_with(&e);
    }

    Ok(())
}

async fn run(config: &CliConfig) -> Result<()> {
    let client = Arc::new(IpLocateClient::from_config(config)?);
    let locator = Locator::with_options(client, BatchOptions::from_config(config));
    let storage = LocalStorage::default();
    let format = config.output_format();

    let outcome = if config.self_lookup {
        let result = locator.locate_self().await?;
        BatchOutcome {
            results: vec![result],
            errors: vec![],
            excluded: vec![],
        }
    } else {
        let mut addresses =
            collect_addresses(&storage, config.file.as_deref(), &config.ips).await?;
        if addresses.is_empty() {
            addresses.extend(prompt_for_ip()?);
        }
        locator.locate(&addresses).await?
    };

    for address in &outcome.excluded {
        eprintln!("Skipped private/local address: {}", address);
    }
    for message in outcome.error_messages() {
        eprintln!("{}", message);
    }

    print!("{}", render(&outcome, format)?);
    if format == iplocator::OutputFormat::Json {
        println!();
    }

    if let Some(path) = &config.output {
        let path = if path.ends_with('/') {
            format!("{}{}", path, default_export_name(format))
        } else {
            path.clone()
        };
        export_outcome(&storage, &path, format, &outcome).await?;
        tracing::info!("📁 Results saved to: {}", path);
    }

    Ok(())
}

fn prompt_for_ip() -> Result<Option<String>> {
    print!("Enter an IP: ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    let ip = line.trim();
    Ok((!ip.is_empty()).then(|| ip.to_string()))
}

fn exit_with(e: &LocateError) -> ! {
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Medium => 2, // 可重試
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
