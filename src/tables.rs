use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use itertools::Itertools;

use crate::core::{normalize::HourlyPrice, summary::DailySummary, tier::Tier};

const fn tier_color(tier: Tier) -> Color {
    match tier {
        Tier::Low => Color::Green,
        Tier::Moderate => Color::DarkYellow,
        Tier::High => Color::Red,
        Tier::VeryHigh => Color::Magenta,
        Tier::Extreme => Color::DarkRed,
    }
}

fn tier_cell(tier: Tier) -> Cell {
    Cell::new(format!("{tier:?}")).fg(tier_color(tier))
}

fn hours_cell(prices: &[HourlyPrice]) -> Cell {
    Cell::new(prices.iter().map(|price| format!("{:02}:00", price.hour_local)).join(", "))
}

#[must_use]
pub fn build_prices_table(prices: &[HourlyPrice]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table.set_header(vec!["Hour", "UTC", "€/MWh", "€/kWh", "Tier"]);
    for price in prices {
        table.add_row(vec![
            Cell::new(format!("{:02}:00", price.hour_local)),
            Cell::new(price.datetime_utc.format("%H:%M")).add_attribute(Attribute::Dim),
            Cell::new(format!("{:.2}", price.price_mwh.0)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.4}", price.price_kwh.0))
                .set_alignment(CellAlignment::Right)
                .fg(tier_color(price.tier)),
            tier_cell(price.tier),
        ]);
    }
    table
}

#[must_use]
pub fn build_summary_table(summary: &DailySummary) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table.set_header(vec!["", "Price", "Tier", "Hours"]);
    table.add_row(vec![
        Cell::new("Cheapest"),
        Cell::new(summary.min_kwh).set_alignment(CellAlignment::Right),
        summary.best_hours.first().map_or_else(|| Cell::new(""), |price| tier_cell(price.tier)),
        hours_cell(&summary.best_hours),
    ]);
    table.add_row(vec![
        Cell::new("Mean"),
        Cell::new(summary.mean_kwh).set_alignment(CellAlignment::Right),
        tier_cell(summary.tier_of_mean),
        Cell::new(""),
    ]);
    table.add_row(vec![
        Cell::new("Priciest"),
        Cell::new(summary.max_kwh).set_alignment(CellAlignment::Right),
        summary.worst_hours.first().map_or_else(|| Cell::new(""), |price| tier_cell(price.tier)),
        hours_cell(&summary.worst_hours),
    ]);
    table
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::{
        core::tier::TierLadder,
        quantity::{KilowattHourPrice, MegawattHourPrice},
    };

    fn record(hour: u32, kwh: f64) -> HourlyPrice {
        HourlyPrice {
            hour_local: hour,
            datetime_utc: Utc.with_ymd_and_hms(2024, 1, 15, hour, 0, 0).unwrap(),
            price_mwh: MegawattHourPrice(kwh * 1000.0),
            price_kwh: KilowattHourPrice(kwh),
            tier: TierLadder::default().classify(KilowattHourPrice(kwh)),
        }
    }

    #[test]
    fn test_prices_table_lists_every_hour() {
        let table = build_prices_table(&[record(0, 0.08), record(1, 0.12)]);
        let rendered = table.to_string();
        assert!(rendered.contains("00:00"));
        assert!(rendered.contains("0.1200"));
        assert!(rendered.contains("Moderate"));
    }

    #[test]
    fn test_summary_table_joins_tied_hours() {
        let records = [record(3, 0.05), record(4, 0.05), record(20, 0.24)];
        let summary = DailySummary::try_new(&records, &TierLadder::default()).unwrap();
        let rendered = build_summary_table(&summary).to_string();
        assert!(rendered.contains("03:00, 04:00"));
        assert!(rendered.contains("20:00"));
    }
}
