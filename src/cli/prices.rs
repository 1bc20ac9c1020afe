use clap::Parser;

use crate::{
    api::elpris::{self, Currency, Region},
    prelude::*,
};

#[derive(Copy, Clone, Parser)]
pub struct PriceArgs {
    /// Price area.
    #[clap(long, env = "REGION", default_value = "SE2", ignore_case = true)]
    pub region: Region,

    /// Currency of the prices.
    #[clap(long, env = "CURRENCY", default_value = "sek", ignore_case = true)]
    pub currency: Currency,
}

impl PriceArgs {
    pub fn new_client(self) -> Result<elpris::Api> {
        elpris::Api::new(self.region, self.currency)
    }
}
