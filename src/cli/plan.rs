use chrono::{Local, NaiveDate, Timelike};
use clap::Parser;

use crate::{
    api::PriceSource,
    cli::{prices::PriceArgs, steering::SteeringArgs},
    prelude::*,
    tables::build_plan_table,
};

#[derive(Parser)]
pub struct PlanArgs {
    /// Date to plan, today by default.
    #[clap(long)]
    date: Option<NaiveDate>,

    #[clap(flatten)]
    prices: PriceArgs,

    #[clap(flatten)]
    steering: SteeringArgs,
}

impl PlanArgs {
    #[instrument(skip_all)]
    pub async fn run(self) -> Result {
        let now = Local::now();
        let date = self.date.unwrap_or_else(|| now.date_naive());
        let slots = self.prices.new_client()?.get_prices(date).await?;
        let plan = self.steering.planner().plan(slots);
        let current_hour = (date == now.date_naive()).then(|| now.hour() as usize);
        println!("{}", build_plan_table(&plan, self.prices.currency, current_hour));
        Ok(())
    }
}
