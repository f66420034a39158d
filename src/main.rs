use anyhow::{anyhow, Context};
use clap::Parser;
use cloud_apis::config::Command;
use cloud_apis::providers::cloudstack::options::{ListTemplatesOptions, ListVirtualMachinesOptions};
use cloud_apis::providers::nova::options::ListOptions;
use cloud_apis::providers::nova::NovaApi;
use cloud_apis::utils::logger;
use cloud_apis::{ApiContext, CliConfig, ProviderApi, ProviderConfig};
use serde::Serialize;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = ProviderConfig::from_file(&cli.config)
        .with_context(|| format!("failed to load provider config '{}'", cli.config))?;

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(config.wire_log());
    } else {
        logger::init_cli_logger(cli.verbose, config.wire_log());
    }
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }
    let context = ApiContext::from_config(&config).context("invalid provider config")?;

    match context.api() {
        ProviderApi::CloudStack(api) => match &cli.command {
            Command::Servers => print(
                &api.virtual_machine_api()
                    .list(&ListVirtualMachinesOptions::new())
                    .await?,
            ),
            Command::Templates => print(&api.template_api().list(&ListTemplatesOptions::new()).await?),
            Command::Describe { id } => print(&api.virtual_machine_api().get(id).await?),
        },
        ProviderApi::Nova(api) => {
            let zone = pick_zone(api, cli.zone.as_deref())?;
            let servers = api
                .server_api(&zone)
                .ok_or_else(|| anyhow!("zone {zone} is not configured"))?;
            match &cli.command {
                Command::Servers => print(&servers.list_in_detail(&ListOptions::new()).await?),
                Command::Templates => {
                    let images = api
                        .image_api(&zone)
                        .ok_or_else(|| anyhow!("zone {zone} is not configured"))?;
                    print(&images.list_in_detail(&ListOptions::new()).await?)
                }
                Command::Describe { id } => print(&servers.get(id).await?),
            }
        }
        ProviderApi::Glesys(api) => match &cli.command {
            Command::Servers => print(&api.server_api().list().await?),
            Command::Templates => print(&api.server_api().list_templates().await?),
            Command::Describe { id } => print(&api.server_api().get(id).await?),
        },
    }
}

fn pick_zone(api: &NovaApi, requested: Option<&str>) -> anyhow::Result<String> {
    match requested {
        Some(zone) => Ok(zone.to_string()),
        None => api
            .configured_zones()
            .first()
            .map(|zone| zone.to_string())
            .ok_or_else(|| anyhow!("no Nova zone configured")),
    }
}

fn print<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
