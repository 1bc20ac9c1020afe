//! Hourly steering cycle: prices → plan → command → sink.

use bon::Builder;
use chrono::{DateTime, DurationRound, Local, TimeDelta, TimeZone, Timelike};
use tokio::time::sleep;

use crate::{
    api::{CommandSink, PriceSource},
    core::{
        command::{Command, TransactionId},
        dispatcher::{DispatchError, Dispatcher},
        planner::Planner,
    },
    prelude::*,
};

#[derive(Debug, thiserror::Error)]
pub enum CycleError {
    #[error("failed to fetch the prices")]
    Prices(#[source] Error),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error("failed to publish the command #{transaction_id}")]
    Publish {
        transaction_id: TransactionId,

        #[source]
        source: Error,
    },
}

#[must_use]
#[derive(Builder)]
pub struct Steering<P, S> {
    price_source: P,
    sink: S,
    planner: Planner,
    dispatcher: Dispatcher,

    /// Minute of every hour when the cycle runs.
    #[builder(default)]
    tick_minute: u32,
}

impl<P: PriceSource, S: CommandSink> Steering<P, S> {
    /// Run a cycle right away, and then once every hour, until the future is dropped.
    pub async fn run(&self) {
        loop {
            if let Err(error) = self.run_cycle(Local::now()).await {
                log_cycle_error(error);
            }
            if let Some(current_status) = self.dispatcher.current_status() {
                info!(%current_status, "status");
            }

            let now = Local::now();
            let next_tick = next_tick(now, self.tick_minute).unwrap_or(now + TimeDelta::hours(1));
            info!(%next_tick, "sleeping…");
            sleep((next_tick - now).to_std().unwrap_or_default()).await;
        }
    }

    #[instrument(skip_all, fields(now = %now))]
    pub async fn run_cycle(&self, now: DateTime<Local>) -> Result<Command, CycleError> {
        let slots =
            self.price_source.get_prices(now.date_naive()).await.map_err(CycleError::Prices)?;
        let plan = self.planner.plan(slots);
        plan.trace();

        let command = self.dispatcher.dispatch(&plan, now.hour() as usize)?;
        self.sink.publish(&command).await.map_err(|source| CycleError::Publish {
            transaction_id: command.transaction_id,
            source,
        })?;
        Ok(command)
    }
}

fn log_cycle_error(error: CycleError) {
    match error {
        CycleError::Prices(_) => {
            error!("skipping the cycle: {:#}", Error::from(error));
        }
        CycleError::Dispatch(_) => {
            error!("plan does not match the clock, no command is sent: {:#}", Error::from(error));
        }
        CycleError::Publish { .. } => {
            error!("command is lost: {:#}", Error::from(error));
        }
    }
}

/// First `HH:minute:00` strictly after `now`.
pub fn next_tick<Tz: TimeZone>(now: DateTime<Tz>, minute: u32) -> Option<DateTime<Tz>> {
    let hour_start = now.clone().duration_trunc(TimeDelta::hours(1)).ok()?;
    let tick = hour_start + TimeDelta::minutes(minute.into());
    Some(if tick > now { tick } else { tick + TimeDelta::hours(1) })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::{NaiveDate, NaiveTime, Utc};

    use super::*;
    use crate::{
        api::elpris::{Currency, PricePoint, hourly_slots},
        core::{command::Instruction, slot::PriceSlot, soc::SocCell},
        quantity::{percent::Percent, power::Watts, rate::KilowattHourRate},
    };

    const POWER_REFERENCE: Watts = Watts(1500);

    struct FixedPrices(Vec<PriceSlot>);

    #[async_trait]
    impl PriceSource for FixedPrices {
        async fn get_prices(&self, _on: NaiveDate) -> Result<Vec<PriceSlot>> {
            Ok(self.0.clone())
        }
    }

    struct Unavailable;

    #[async_trait]
    impl PriceSource for Unavailable {
        async fn get_prices(&self, _on: NaiveDate) -> Result<Vec<PriceSlot>> {
            bail!("HTTP status server error (503 Service Unavailable)")
        }
    }

    #[derive(Default)]
    struct Recorder(Mutex<Vec<Command>>);

    #[async_trait]
    impl CommandSink for Recorder {
        async fn publish(&self, command: &Command) -> Result {
            self.0.lock().unwrap().push(*command);
            Ok(())
        }
    }

    struct Disconnected;

    #[async_trait]
    impl CommandSink for Disconnected {
        async fn publish(&self, _command: &Command) -> Result {
            bail!("request channel is closed")
        }
    }

    fn debug_day() -> Vec<PriceSlot> {
        let points: Vec<PricePoint> =
            serde_json::from_str(include_str!("../fixtures/prices_debug_day.json")).unwrap();
        hourly_slots(points, Currency::Sek)
    }

    /// Five slots from 01:00 till 06:00.
    fn short_day() -> Vec<PriceSlot> {
        [-0.15, -0.10, 0.05, 0.04, 0.02]
            .into_iter()
            .zip(1..)
            .map(|(price, hour)| {
                PriceSlot::new(
                    KilowattHourRate(price),
                    NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
                    NaiveTime::from_hms_opt(hour + 1, 0, 0).unwrap(),
                )
            })
            .collect()
    }

    fn steering<P: PriceSource, S: CommandSink>(
        price_source: P,
        sink: S,
        state_of_charge: f64,
    ) -> Steering<P, S> {
        let dispatcher = Dispatcher::builder()
            .state_of_charge(SocCell::new(Percent::new(state_of_charge).unwrap()))
            .power_reference(POWER_REFERENCE)
            .build();
        Steering::builder()
            .price_source(price_source)
            .sink(sink)
            .planner(Planner::default())
            .dispatcher(dispatcher)
            .build()
    }

    fn at(hour: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2023, 7, 1, hour, 30, 0).single().unwrap()
    }

    #[tokio::test]
    async fn test_cycle_ok() -> Result {
        let steering = steering(FixedPrices(debug_day()), Recorder::default(), 50.0);

        let command = steering.run_cycle(at(1)).await?;
        assert_eq!(command.transaction_id, TransactionId(1));
        assert_eq!(command.instruction, Instruction::Charge(POWER_REFERENCE));

        let command = steering.run_cycle(at(10)).await?;
        assert_eq!(command.transaction_id, TransactionId(2));
        assert_eq!(command.instruction, Instruction::Discharge(POWER_REFERENCE));

        let command = steering.run_cycle(at(16)).await?;
        assert_eq!(command.instruction, Instruction::Auto);

        assert_eq!(steering.sink.0.lock().unwrap().len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn test_cycle_guardrail() -> Result {
        let steering = steering(FixedPrices(debug_day()), Recorder::default(), 99.0);
        let command = steering.run_cycle(at(13)).await?;
        assert_eq!(command.instruction, Instruction::Charge(Watts::ZERO));
        assert_eq!(steering.sink.0.lock().unwrap().as_slice(), [command]);
        Ok(())
    }

    #[tokio::test]
    async fn test_prices_unavailable() {
        let steering = steering(Unavailable, Recorder::default(), 50.0);
        let result = steering.run_cycle(at(1)).await;
        assert!(matches!(result, Err(CycleError::Prices(_))));
        assert!(steering.sink.0.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_plan_and_clock_mismatch() -> Result {
        let steering = steering(FixedPrices(short_day()), Recorder::default(), 50.0);
        let result = steering.run_cycle(at(5)).await;
        assert!(matches!(
            result,
            Err(CycleError::Dispatch(DispatchError::IndexOutOfRange { hour: 5, len: 5 }))
        ));
        assert!(steering.sink.0.lock().unwrap().is_empty());

        // Position-based: 01:00-02:00 is the second slot and lands on hour #1.
        let command = steering.run_cycle(at(1)).await?;
        assert_eq!(command.instruction, Instruction::Charge(POWER_REFERENCE));
        assert_eq!(command.transaction_id, TransactionId(1));
        Ok(())
    }

    #[tokio::test]
    async fn test_publish_failure_consumes_transaction_id() {
        let steering = steering(FixedPrices(debug_day()), Disconnected, 50.0);
        let result = steering.run_cycle(at(1)).await;
        assert!(matches!(
            result,
            Err(CycleError::Publish { transaction_id: TransactionId(1), .. })
        ));
        let result = steering.run_cycle(at(1)).await;
        assert!(matches!(
            result,
            Err(CycleError::Publish { transaction_id: TransactionId(2), .. })
        ));
    }

    #[test]
    fn test_next_tick_on_the_hour() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 13, 20, 5).unwrap();
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 14, 0, 0).unwrap();
        assert_eq!(next_tick(now, 0), Some(expected));
    }

    #[test]
    fn test_next_tick_exactly_at_tick() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 13, 0, 0).unwrap();
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 14, 0, 0).unwrap();
        assert_eq!(next_tick(now, 0), Some(expected));
    }

    #[test]
    fn test_next_tick_with_minute() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 13, 20, 5).unwrap();
        assert_eq!(next_tick(now, 30), Some(Utc.with_ymd_and_hms(2024, 3, 1, 13, 30, 0).unwrap()));
        assert_eq!(next_tick(now, 10), Some(Utc.with_ymd_and_hms(2024, 3, 1, 14, 10, 0).unwrap()));
    }

    #[test]
    fn test_next_tick_crosses_midnight() {
        let now = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(next_tick(now, 0), Some(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()));
    }
}
