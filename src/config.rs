//! Runtime configuration read from the environment (and `.env`).

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;

/// Station identity printed on quotations
#[derive(Debug, Clone)]
pub struct StationProfile {
    pub name: String,
    pub frequency: String,
    pub address: String,
    pub phone: String,
    pub tax_id: String,
}

impl Default for StationProfile {
    fn default() -> Self {
        Self {
            name: "MCOT Radio Network Phitsanulok".to_string(),
            frequency: "F.M. 106.25 MHz".to_string(),
            address: "361/4 Moo 2, Bueng Phra-Wat Lom Rd, Bueng Phra, Mueang, Phitsanulok 65000"
                .to_string(),
            phone: "055-287833".to_string(),
            tax_id: "0107547000745".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub data_file: PathBuf,
    pub autosave_interval: Duration,
    pub staff_name: String,
    pub staff_phone: String,
    pub station: StationProfile,
}

impl Default for Config {
    fn default() -> Self {
        let station = StationProfile::default();
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            data_file: PathBuf::from("data/airtime_sales.json"),
            autosave_interval: Duration::from_secs(30),
            staff_name: "Sales Department".to_string(),
            staff_phone: station.phone.clone(),
            station,
        }
    }
}

impl Config {
    /// Build the configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Config::default();

        let bind_addr = match lookup("BIND_ADDR") {
            Some(addr) => addr
                .parse()
                .with_context(|| format!("BIND_ADDR is not a socket address: {}", addr))?,
            None => defaults.bind_addr,
        };

        let autosave_interval = match lookup("AUTOSAVE_INTERVAL_SECS") {
            Some(secs) => {
                let secs: u64 = secs
                    .parse()
                    .with_context(|| format!("AUTOSAVE_INTERVAL_SECS is not a number: {}", secs))?;
                anyhow::ensure!(secs > 0, "AUTOSAVE_INTERVAL_SECS must be positive");
                Duration::from_secs(secs)
            }
            None => defaults.autosave_interval,
        };

        let mut station = defaults.station;
        if let Some(name) = lookup("STATION_NAME") {
            station.name = name;
        }

        Ok(Self {
            bind_addr,
            data_file: lookup("DATA_FILE").map(PathBuf::from).unwrap_or(defaults.data_file),
            autosave_interval,
            staff_name: lookup("STAFF_NAME").unwrap_or(defaults.staff_name),
            staff_phone: lookup("STAFF_PHONE").unwrap_or(defaults.staff_phone),
            station,
        })
    }
}
