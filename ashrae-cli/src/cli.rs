use anyhow::Context;
use ashrae_core::{
    AshraeClient, AshraeVersion, Config, Coordinate, DesignData, MeteoStation, UnitSystem,
};
use clap::{Args, Parser, Subcommand};
use serde_json::Value;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "ashrae", version, about = "ASHRAE climate design data lookup")]
pub struct Cli {
    /// Log requests and responses to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct Location {
    /// Latitude in degrees.
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    /// Longitude in degrees.
    #[arg(long, allow_negative_numbers = true)]
    pub lng: f64,

    /// ASHRAE edition: 2009, 2013, 2017 or 2021. Defaults to the configured one.
    #[arg(short, long)]
    pub revision: Option<AshraeVersion>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store defaults. Prompts for the edition when no option is given.
    Configure {
        #[arg(short, long)]
        revision: Option<AshraeVersion>,

        /// "SI" or "IP".
        #[arg(short, long)]
        units: Option<UnitSystem>,

        /// Alternate service root.
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Show the nearest meteo station.
    Station {
        #[command(flatten)]
        location: Location,
    },

    /// Show heating and cooling design temperatures for the nearest station.
    Design {
        #[command(flatten)]
        location: Location,

        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { revision, units, base_url } => configure(revision, units, base_url),
            Command::Station { location } => {
                let config = Config::load()?;
                let version = resolve_version(&location, &config)?;
                let client = AshraeClient::new(config.client_config()?);

                let station = client
                    .resolve_station(location.coordinate(), version)
                    .await
                    .context("Station lookup failed")?;

                print!("{}", format_station(&station));
                Ok(())
            }
            Command::Design { location, json } => {
                let config = Config::load()?;
                let version = resolve_version(&location, &config)?;
                let client = AshraeClient::new(config.client_config()?);

                let data = client
                    .fetch_design_data(location.coordinate(), version)
                    .await
                    .context("Design data lookup failed")?;

                match data {
                    None => println!("No design data available for this location."),
                    Some(data) if json => println!("{}", serde_json::to_string_pretty(&data)?),
                    Some(data) => print!("{}", format_design(&data, version, client.config().units)),
                }
                Ok(())
            }
        }
    }
}

impl Location {
    fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }
}

fn resolve_version(location: &Location, config: &Config) -> anyhow::Result<AshraeVersion> {
    match location.revision {
        Some(v) => Ok(v),
        None => config.default_version(),
    }
}

fn configure(
    revision: Option<AshraeVersion>,
    units: Option<UnitSystem>,
    base_url: Option<String>,
) -> anyhow::Result<()> {
    let mut config = Config::load()?;
    let interactive = revision.is_none() && units.is_none() && base_url.is_none();

    if interactive {
        let current = config.default_version()?;
        let options = AshraeVersion::all().to_vec();
        let cursor = options.iter().position(|v| *v == current).unwrap_or(0);

        let chosen = inquire::Select::new("Default ASHRAE edition:", options)
            .with_starting_cursor(cursor)
            .prompt()
            .context("Edition selection cancelled")?;
        config.set_default_version(chosen);
    }

    if let Some(v) = revision {
        config.set_default_version(v);
    }
    if let Some(u) = units {
        config.set_units(u);
    }
    if let Some(url) = base_url {
        config.base_url = Some(url);
    }

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}

fn format_station(station: &MeteoStation) -> String {
    let mut out = format!("WMO: {}\n", station.wmo.as_deref().unwrap_or("unknown"));
    for (key, value) in &station.fields {
        let shown = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        out.push_str(&format!("{key}: {shown}\n"));
    }
    out
}

fn format_design(data: &DesignData, version: AshraeVersion, units: UnitSystem) -> String {
    let unit = match units {
        UnitSystem::Si => "°C",
        UnitSystem::Ip => "°F",
    };

    format!(
        "ASHRAE {version} design conditions\n\
         Heating DB 99.6%: {:.1} {unit}\n\
         Cooling DB 0.4%:  {:.1} {unit}\n",
        data.heating_db_99_6, data.cooling_db_0_4,
    )
}
