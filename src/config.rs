use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_DATA_PATH: &str = "./data/london_ug_og.json";
pub const DEFAULT_PUBLIC_DIR: &str = "./public";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BIND: &str = "0.0.0.0";

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub data_path: PathBuf,
    pub public_dir: PathBuf,
    pub bind: IpAddr,
    pub port: u16,
    pub workers: usize,
    pub pretty_print: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            public_dir: PathBuf::from(DEFAULT_PUBLIC_DIR),
            bind: IpAddr::from([0, 0, 0, 0]),
            port: DEFAULT_PORT,
            workers: num_cpus::get(),
            pretty_print: false,
        }
    }
}

impl ServerConfig {
    pub fn command() -> Command {
        Command::new("railway-server")
            .version("0.1.0")
            .about("Serve railway features of an OpenStreetMap extract as GeoJSON")
            .arg(
                Arg::new("data")
                    .help("OSM JSON document ({\"elements\": [...]}) or .osm.pbf extract")
                    .default_value(DEFAULT_DATA_PATH)
                    .index(1),
            )
            .arg(
                Arg::new("port")
                    .short('p')
                    .long("port")
                    .value_name("PORT")
                    .help("TCP port to listen on")
                    .value_parser(clap::value_parser!(u16))
                    .default_value("3000"),
            )
            .arg(
                Arg::new("bind")
                    .short('b')
                    .long("bind")
                    .value_name("ADDR")
                    .help("Address to bind to")
                    .value_parser(clap::value_parser!(IpAddr))
                    .default_value(DEFAULT_BIND),
            )
            .arg(
                Arg::new("public")
                    .long("public")
                    .value_name("DIR")
                    .help("Directory of static assets")
                    .default_value(DEFAULT_PUBLIC_DIR),
            )
            .arg(
                Arg::new("workers")
                    .short('w')
                    .long("workers")
                    .value_name("N")
                    .help("Number of runtime worker threads (default: number of CPUs)")
                    .value_parser(clap::value_parser!(usize)),
            )
            .arg(
                Arg::new("pretty")
                    .long("pretty")
                    .action(clap::ArgAction::SetTrue)
                    .help("Pretty-print JSON responses"),
            )
    }

    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let data_path = matches
            .get_one::<String>("data")
            .map(PathBuf::from)
            .context("Missing data path")?;
        let public_dir = matches
            .get_one::<String>("public")
            .map(PathBuf::from)
            .context("Missing public directory")?;
        let port = *matches.get_one::<u16>("port").context("Missing port")?;
        let bind = *matches.get_one::<IpAddr>("bind").context("Missing bind address")?;
        let workers = matches
            .get_one::<usize>("workers")
            .copied()
            .unwrap_or_else(num_cpus::get);

        if workers == 0 {
            anyhow::bail!("--workers must be at least 1");
        }

        Ok(Self {
            data_path,
            public_dir,
            bind,
            port,
            workers,
            pretty_print: matches.get_flag("pretty"),
        })
    }

    pub fn parse_from<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let matches = Self::command().try_get_matches_from(args)?;
        Self::from_matches(&matches)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}
