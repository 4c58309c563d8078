use clap::{Arg, ArgAction, Command, crate_name, crate_version, value_parser};
use tracing::Level;

/// The listings the binary knows how to print.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Resource {
    Account,
    Balance,
    Droplets,
    Domains,
    Volumes,
    LoadBalancers,
    Clusters,
    Projects,
    Regions,
    Sizes,
    Tags,
    SshKeys,
}

impl Resource {
    const NAMES: [(&'static str, Resource); 12] = [
        ("account", Resource::Account),
        ("balance", Resource::Balance),
        ("droplets", Resource::Droplets),
        ("domains", Resource::Domains),
        ("volumes", Resource::Volumes),
        ("load-balancers", Resource::LoadBalancers),
        ("clusters", Resource::Clusters),
        ("projects", Resource::Projects),
        ("regions", Resource::Regions),
        ("sizes", Resource::Sizes),
        ("tags", Resource::Tags),
        ("ssh-keys", Resource::SshKeys),
    ];

    fn from_name(name: &str) -> Option<Resource> {
        Resource::NAMES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, r)| *r)
    }
}

#[derive(Debug)]
pub struct Args {
    pub resource: Resource,
    pub token: String,
    pub api_url: Option<String>,
    pub page: u32,
    pub per_page: u32,
    pub level: Level,
}

impl Args {
    pub fn parse_args() -> Args {
        Args::from_matches(command().get_matches())
    }

    fn from_matches(matches: clap::ArgMatches) -> Args {
        let level = if matches.get_flag("quiet") {
            Level::ERROR
        } else {
            match matches.get_count("verbose") {
                0 => Level::INFO,
                1 => Level::DEBUG,
                _ => Level::TRACE,
            }
        };

        Args {
            resource: matches
                .get_one::<String>("RESOURCE")
                .and_then(|name| Resource::from_name(name))
                .unwrap_or(Resource::Account),
            token: matches
                .get_one::<String>("token")
                .cloned()
                .unwrap_or_default(),
            api_url: matches.get_one::<String>("api_url").cloned(),
            page: matches.get_one::<u32>("page").copied().unwrap_or(1),
            per_page: matches.get_one::<u32>("per_page").copied().unwrap_or(25),
            level,
        }
    }
}

fn command() -> Command {
    Command::new(crate_name!())
        .version(crate_version!())
        .author("Chris Lieb")
        .about("Print DigitalOcean resources as JSON")
        .arg(
            Arg::new("RESOURCE")
                .required(true)
                .value_parser(Resource::NAMES.map(|(name, _)| name))
                .help("The kind of resource to list"),
        )
        .arg(
            Arg::new("token")
                .short('t')
                .long("token")
                .required(true)
                .env("DIGITAL_OCEAN_TOKEN")
                .hide_env_values(true)
                .help("The API token to use to auth with DigitalOcean"),
        )
        .arg(
            Arg::new("api_url")
                .long("api-url")
                .env("DIGITAL_OCEAN_API_URL")
                .help("Talk to this API root instead of https://api.digitalocean.com/v2/"),
        )
        .arg(
            Arg::new("page")
                .long("page")
                .value_parser(value_parser!(u32).range(1..))
                .default_value("1")
                .help("Page of results to fetch, for paginated listings"),
        )
        .arg(
            Arg::new("per_page")
                .long("per-page")
                .value_parser(value_parser!(u32).range(1..=200))
                .default_value("25")
                .help("Number of results per page, for paginated listings"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .conflicts_with("quiet")
                .help("Log every request; repeat for more detail"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("Only log errors"),
        )
}
