use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    api::elpris::Currency,
    core::plan::BehaviorPlan,
    quantity::rate::KilowattHourRate,
};

pub fn build_plan_table(
    plan: &BehaviorPlan,
    currency: Currency,
    current_hour: Option<usize>,
) -> Table {
    #[allow(clippy::cast_precision_loss)]
    let mean_price = if plan.is_empty() {
        KilowattHourRate::ZERO
    } else {
        let total: f64 = plan.iter().map(|planned| planned.slot.price.0).sum();
        KilowattHourRate(total / plan.len() as f64)
    };

    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    let price_header = format!("{currency}/kWh");
    table.set_header(vec!["#", "Start", "End", price_header.as_str(), "Behavior"]);
    for (hour, planned) in plan.iter().enumerate() {
        let mut index = Cell::new(hour).add_attribute(Attribute::Dim);
        if current_hour == Some(hour) {
            index = Cell::new(format!("▶ {hour}")).add_attribute(Attribute::Bold);
        }
        table.add_row(vec![
            index,
            Cell::new(planned.slot.time_start.format("%H:%M")),
            Cell::new(planned.slot.time_end.format("%H:%M")).add_attribute(Attribute::Dim),
            Cell::new(planned.slot.price).set_alignment(CellAlignment::Right).fg(
                if planned.slot.price.is_negative() {
                    Color::Green
                } else if planned.slot.price >= mean_price {
                    Color::Red
                } else {
                    Color::Reset
                },
            ),
            Cell::new(planned.behavior).fg(planned.behavior.color()),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        api::elpris::{PricePoint, hourly_slots},
        core::planner::Planner,
    };

    #[test]
    fn test_build_plan_table() -> crate::prelude::Result {
        let points: Vec<PricePoint> =
            serde_json::from_str(include_str!("../fixtures/prices_debug_day.json"))?;
        let plan = Planner::default().plan(hourly_slots(points, Currency::Sek));
        let table = build_plan_table(&plan, Currency::Sek, Some(12));
        assert_eq!(table.row_count(), 24);
        let rendered = table.to_string();
        assert!(rendered.contains("SEK/kWh"));
        assert!(rendered.contains("Discharge"));
        assert!(rendered.contains("▶ 12"));
        Ok(())
    }
}
