//! Run configuration
//!
//! File paths, age-band bounds, the per-house party registries, and the
//! API endpoint all live here rather than as module constants. The
//! defaults carry the curated values; a TOML file can override any subset
//! of them. Resolution priority: `--config` flag, then the
//! `PARLIAMENT_AGES_CONFIG` environment variable, then built-in defaults.

use crate::aggregate::PartyDef;
use crate::member::House;
use crate::{fetch, Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

pub const CONFIG_ENV_VAR: &str = "PARLIAMENT_AGES_CONFIG";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding every input and output file
    pub data_dir: PathBuf,
    pub api_base_url: String,
    pub api_timeout_secs: u64,
    /// Age-band lower bounds; the last entry is a sentinel that caps the
    /// final band
    pub bands_lower: Vec<u32>,
    /// Parties worth a separate breakdown, per house. Must be kept in sync
    /// manually with real-world party membership counts; parties with only
    /// a few members are left out because the sample is too small.
    pub commons_parties: Vec<PartyDef>,
    pub lords_parties: Vec<PartyDef>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./public/data"),
            api_base_url: fetch::DEFAULT_BASE_URL.to_string(),
            api_timeout_secs: fetch::DEFAULT_TIMEOUT_SECS,
            bands_lower: vec![18, 20, 30, 40, 50, 60, 70, 80, 90, 100, 110],
            commons_parties: vec![
                PartyDef { id: 4, name: "Conservative".into() },
                PartyDef { id: 7, name: "DUP".into() },
                PartyDef { id: 15, name: "Labour".into() },
                PartyDef { id: 17, name: "Liberal Democrat".into() },
                PartyDef { id: 29, name: "SNP".into() },
            ],
            lords_parties: vec![
                PartyDef { id: 3, name: "Bishops".into() },
                PartyDef { id: 4, name: "Conservative".into() },
                PartyDef { id: 6, name: "Crossbench".into() },
                PartyDef { id: 15, name: "Labour".into() },
                PartyDef { id: 17, name: "Liberal Democrat".into() },
                PartyDef { id: 49, name: "Non-affiliated".into() },
            ],
        }
    }
}

impl Config {
    /// Resolve and load configuration: CLI flag, then environment
    /// variable, then defaults.
    pub fn load(cli_path: Option<&Path>) -> Result<Self> {
        let config = if let Some(path) = cli_path {
            info!("Loading configuration from {}", path.display());
            Self::from_toml_file(path)?
        } else if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            info!("Loading configuration from {path} ({CONFIG_ENV_VAR})");
            Self::from_toml_file(Path::new(&path))?
        } else {
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read config file {}: {e}", path.display()))
        })?;
        toml::from_str(&text)
            .map_err(|e| Error::Config(format!("invalid config file {}: {e}", path.display())))
    }

    pub fn validate(&self) -> Result<()> {
        // Surfaces bad band bounds at startup instead of mid-pipeline
        crate::bands::bands_from_lower_bounds(&self.bands_lower)?;
        if self.api_timeout_secs == 0 {
            return Err(Error::Config("api_timeout_secs must be positive".into()));
        }
        Ok(())
    }

    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api_timeout_secs)
    }

    pub fn parties(&self, house: House) -> &[PartyDef] {
        match house {
            House::Commons => &self.commons_parties,
            House::Lords => &self.lords_parties,
        }
    }

    /// Per-house member file, e.g. `<data_dir>/commons.json`
    pub fn members_path(&self, house: House) -> PathBuf {
        self.data_dir.join(format!("{}.json", house.as_str()))
    }

    /// Reference UK population histogram (prepared out-of-band)
    pub fn uk_population_path(&self) -> PathBuf {
        self.data_dir.join("uk.json")
    }

    /// Final chart document
    pub fn chart_path(&self) -> PathBuf {
        self.data_dir.join("chart.json")
    }
}
