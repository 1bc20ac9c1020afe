use async_trait::async_trait;
use chrono::NaiveDate;

use crate::{core::slot::PriceSlot, prelude::*};

#[async_trait]
pub trait PriceSource: Sync {
    /// Get the day's price slots in their natural order.
    async fn get_prices(&self, on: NaiveDate) -> Result<Vec<PriceSlot>>;
}
