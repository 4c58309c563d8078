#![forbid(unsafe_code)]

mod cli;

use std::process::ExitCode;

use serde::Serialize;
use tracing::{error, info};

use digitalocean_client::{DigitalOceanClient, Error, Pagination};

use crate::cli::{Args, Resource};

fn main() -> ExitCode {
    let args = Args::parse_args();

    #[cfg(windows)]
    let _ = nu_ansi_term::enable_ansi_support();

    tracing_subscriber::fmt()
        .with_max_level(args.level)
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Unable to list {:?}: {}", args.resource, e);
            if let Some(response) = e.error_response() {
                error!(
                    "DigitalOcean says {} ({})",
                    response.message, response.id
                );
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<String, Error> {
    let client = match &args.api_url {
        Some(url) => DigitalOceanClient::new_with_base_url(&args.token, url)?,
        None => DigitalOceanClient::new(&args.token)?,
    };
    info!("Fetching {:?} from {}", args.resource, client.api().base_url());

    let pagination = Pagination::new(args.page, args.per_page);
    match args.resource {
        Resource::Account => to_json(&client.account.get_account()?),
        Resource::Balance => to_json(&client.billing.get_balance()?),
        Resource::Droplets => to_json(&client.droplets.get_all_droplets(&pagination)?),
        Resource::Domains => to_json(&client.domains.get_all_domains()?),
        Resource::Volumes => to_json(&client.block_storage.get_all_block_storage()?),
        Resource::LoadBalancers => to_json(&client.load_balancers.get_all_load_balancers()?),
        Resource::Clusters => to_json(&client.kubernetes.get_all_clusters()?),
        Resource::Projects => to_json(&client.projects.get_all_projects()?),
        Resource::Regions => to_json(&client.regions.get_all_regions()?),
        Resource::Sizes => to_json(&client.sizes.get_all_sizes()?),
        Resource::Tags => to_json(&client.tags.get_all_tags()?),
        Resource::SshKeys => to_json(&client.ssh_keys.get_all_keys()?),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, Error> {
    Ok(serde_json::to_string_pretty(value)?)
}
