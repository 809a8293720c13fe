//! Pipeline phases
//!
//! Two independently invocable phases that communicate only through files:
//! `fetch_house` writes a per-house member file, `build_chart_file` reads
//! the member files plus the reference population file and writes the
//! chart document. Each phase either completes or aborts; no partial
//! output is left behind.

use crate::aggregate::aggregate_house;
use crate::bands::bands_from_lower_bounds;
use crate::chart::build_chart;
use crate::config::Config;
use crate::fetch::MnisClient;
use crate::member::House;
use crate::normalize::normalize_member;
use crate::{store, Result};
use chrono::{Local, NaiveDate};
use tracing::info;

/// Fetch current members of one house, normalize them, and save the
/// per-house member file.
pub async fn fetch_house(config: &Config, house: House) -> Result<()> {
    info!("Fetching data for all current {}", house.member_label());

    let client = MnisClient::new(config.api_base_url.clone(), config.api_timeout())?;
    let raw_members = client.fetch_members(house, today()).await?;

    let members = raw_members
        .into_iter()
        .map(|raw| normalize_member(raw, house))
        .collect::<Result<Vec<_>>>()?;

    let path = config.members_path(house);
    store::save_members(&members, &path)?;

    info!(
        "Saved data for {} {} at {}",
        members.len(),
        house.member_label(),
        path.display()
    );
    Ok(())
}

/// Aggregate both houses' saved member files into age-band histograms and
/// merge them with the reference population into the chart document.
pub fn build_chart_file(config: &Config) -> Result<()> {
    let chart_path = config.chart_path();
    info!("Creating file of age bands at {}", chart_path.display());

    let bands = bands_from_lower_bounds(&config.bands_lower)?;
    let reference_date = today();

    let commons_members = store::load_members(&config.members_path(House::Commons), "build-chart")?;
    let lords_members = store::load_members(&config.members_path(House::Lords), "build-chart")?;

    let commons = aggregate_house(
        &commons_members,
        config.parties(House::Commons),
        &bands,
        reference_date,
    );
    let lords = aggregate_house(
        &lords_members,
        config.parties(House::Lords),
        &bands,
        reference_date,
    );

    let uk_population = store::load_uk_population(&config.uk_population_path(), "build-chart")?;

    let chart = build_chart(commons, lords, uk_population);
    store::save_chart(&chart, &chart_path)?;

    info!("Saved chart data at {}", chart_path.display());
    Ok(())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
