//! [Elpriset just nu](https://www.elprisetjustnu.se/elpris-api) client.

use std::{
    fmt::{Display, Formatter},
    time::Duration,
};

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate, Timelike};
use itertools::Itertools;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    api::PriceSource,
    core::slot::PriceSlot,
    prelude::*,
    quantity::rate::KilowattHourRate,
};

pub struct Api {
    client: Client,
    region: Region,
    currency: Currency,
}

impl Api {
    pub fn new(region: Region, currency: Currency) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self { client, region, currency })
    }
}

#[async_trait]
impl PriceSource for Api {
    #[instrument(skip_all, fields(region = %self.region, on = %on))]
    async fn get_prices(&self, on: NaiveDate) -> Result<Vec<PriceSlot>> {
        let url = format!(
            "https://www.elprisetjustnu.se/api/v1/prices/{}/{}_{}.json",
            on.format("%Y"),
            on.format("%m-%d"),
            self.region,
        );
        info!(%url, "fetching…");
        let points = self
            .client
            .get(&url)
            .send()
            .await
            .context("failed to call")?
            .error_for_status()
            .context("request failed")?
            .json::<Vec<PricePoint>>()
            .await
            .context("failed to deserialize the response")?;
        info!(n_points = points.len(), "fetched");
        ensure!(!points.is_empty(), "no prices published for {on}");
        Ok(hourly_slots(points, self.currency))
    }
}

/// Merge the points into hourly slots, averaging the sub-hourly prices.
///
/// Since the day-ahead market moved to 15-minute resolution, the API may return 4 points per
/// hour. Hourly points pass through unchanged. The repeated hour of a DST transition day stays
/// separate because its offset differs.
#[must_use]
pub fn hourly_slots(points: Vec<PricePoint>, currency: Currency) -> Vec<PriceSlot> {
    let chunks = points.into_iter().chunk_by(|point| {
        (point.time_start.hour(), point.time_start.offset().local_minus_utc())
    });
    chunks
        .into_iter()
        .map(|(_, chunk)| {
            let chunk = chunk.collect_vec();
            #[allow(clippy::cast_precision_loss)]
            let mean_price = chunk.iter().map(|point| point.price(currency).0).sum::<f64>()
                / chunk.len() as f64;
            // Chunks are never empty:
            let (first, last) = (&chunk[0], &chunk[chunk.len() - 1]);
            PriceSlot::new(
                KilowattHourRate(mean_price),
                first.time_start.time(),
                last.time_end.time(),
            )
        })
        .collect()
}

/// Price area.
#[derive(Copy, Clone, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum Region {
    /// Luleå.
    #[value(name = "SE1")]
    Se1,

    /// Sundsvall.
    #[value(name = "SE2")]
    Se2,

    /// Stockholm.
    #[value(name = "SE3")]
    Se3,

    /// Malmö.
    #[value(name = "SE4")]
    Se4,
}

impl Display for Region {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Se1 => write!(f, "SE1"),
            Self::Se2 => write!(f, "SE2"),
            Self::Se3 => write!(f, "SE3"),
            Self::Se4 => write!(f, "SE4"),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum Currency {
    Sek,
    Eur,
}

impl Display for Currency {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sek => write!(f, "SEK"),
            Self::Eur => write!(f, "EUR"),
        }
    }
}

#[derive(Deserialize)]
pub struct PricePoint {
    #[serde(rename = "SEK_per_kWh")]
    sek_per_kwh: KilowattHourRate,

    #[serde(rename = "EUR_per_kWh")]
    eur_per_kwh: KilowattHourRate,

    time_start: DateTime<FixedOffset>,
    time_end: DateTime<FixedOffset>,
}

impl PricePoint {
    const fn price(&self, currency: Currency) -> KilowattHourRate {
        match currency {
            Currency::Sek => self.sek_per_kwh,
            Currency::Eur => self.eur_per_kwh,
        }
    }
}
