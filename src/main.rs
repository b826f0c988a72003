use anyhow::Context;
use atm_mapper_console::app::{console, server};
use atm_mapper_console::config::toml_config::DEFAULT_CONFIG_PATH;
use atm_mapper_console::config::{CliConfig, Command, ConsoleConfig};
use atm_mapper_console::utils::{logger, validation::Validate};
use atm_mapper_console::ConsoleApi;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let mut config = ConsoleConfig::load(cli.config.as_deref()).with_context(|| {
        format!(
            "Failed to load config file '{}'",
            cli.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH)
        )
    })?;

    // 應用命令列覆蓋設定
    if let Some(api) = &cli.api {
        config.console.api_base_url = api.clone();
    }
    if let Command::Serve { bind, upstream } = &cli.command {
        if let Some(bind) = bind {
            config.server.bind = bind.clone();
        }
        if let Some(upstream) = upstream {
            config.upstream.base_url = upstream.clone();
        }
    }

    if cli.json_logs || config.json_logs() {
        logger::init_json_logger(cli.verbose, config.logging.level.as_deref());
    } else {
        logger::init_cli_logger(cli.verbose, config.logging.level.as_deref());
    }

    if cli.verbose {
        tracing::debug!("Effective config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let page_size = config.page_size();
    let outcome = match cli.command {
        Command::Serve { .. } => server::serve(&config).await.map(|_| String::new()),
        Command::Clients(command) => {
            let api = ConsoleApi::new(config.console.api_base_url.clone())?;
            console::run_clients(&api, command, page_size).await
        }
        Command::Standards(command) => {
            let api = ConsoleApi::new(config.console.api_base_url.clone())?;
            console::run_standards(&api, command).await
        }
        Command::Mappings(command) => {
            let api = ConsoleApi::new(config.console.api_base_url.clone())?;
            console::run_mappings(&api, command, page_size).await
        }
    };

    match outcome {
        Ok(output) if !output.is_empty() => println!("{}", output),
        Ok(_) => {}
        Err(e) => {
            tracing::error!("❌ Command failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    }

    Ok(())
}
