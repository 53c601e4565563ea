use super::ui;
use crate::core::kpi::KpiSnapshot;
use crate::core::snapshot::DataOrigin;
use crate::store::metrics::MetricsStore;
use anyhow::Result;
use comfy_table::Cell;
use futures::future::join;
use std::time::Duration;

/// Short presentation delay before the dashboard appears. A cooperative
/// yield only; nothing else writes the snapshot.
const PRESENT_DELAY: Duration = Duration::from_millis(400);

impl KpiSnapshot {
    fn display_as_tables(&self, currency: &str) -> String {
        let mut headline = ui::new_styled_table();
        headline.set_header(vec![
            ui::header_cell(&format!("Revenue ({currency})")),
            ui::header_cell("Growth"),
            ui::header_cell("Customers"),
            ui::header_cell("Readiness"),
        ]);
        headline.add_row(vec![
            ui::value_cell(format!("{:.2}", self.revenue)),
            ui::change_cell(self.growth),
            ui::value_cell(self.customers.to_string()),
            ui::score_cell(self.readiness),
        ]);

        let mut monthly = ui::new_styled_table();
        monthly.set_header(vec![
            ui::header_cell("Month"),
            ui::header_cell(&format!("Revenue ({currency})")),
            ui::header_cell("Customers"),
            ui::header_cell("Transactions"),
        ]);
        for point in &self.monthly {
            monthly.add_row(vec![
                Cell::new(&point.label),
                ui::value_cell(format!("{:.2}", point.revenue)),
                ui::value_cell(point.customers.to_string()),
                ui::value_cell(point.transactions.to_string()),
            ]);
        }

        let mut output = format!(
            "{}\n\n{headline}\n\nLast 6 months\n{monthly}",
            ui::style_text("Business Dashboard", ui::StyleType::Title)
        );

        if !self.categories.is_empty() {
            let mut breakdown = ui::new_styled_table();
            breakdown.set_header(vec![
                ui::header_cell("Category"),
                ui::header_cell("Share"),
                ui::header_cell("Color"),
            ]);
            for slice in &self.categories {
                breakdown.add_row(vec![
                    Cell::new(&slice.category),
                    ui::value_cell(format!("{}%", slice.percentage)),
                    Cell::new(&slice.color),
                ]);
            }
            output.push_str(&format!("\n\nTop categories\n{breakdown}"));
        }

        output
    }
}

fn origin_note(origin: DataOrigin) -> Option<String> {
    match origin {
        DataOrigin::Real => None,
        DataOrigin::Cached => Some(ui::style_text(
            "Live sources returned no data; showing the last saved snapshot.",
            ui::StyleType::Subtle,
        )),
        DataOrigin::Default => Some(ui::style_text(
            "No data recorded yet; showing default values.",
            ui::StyleType::Subtle,
        )),
    }
}

pub async fn run(store: &MetricsStore) -> Result<()> {
    let spinner = ui::new_spinner("Crunching the latest numbers...");
    let (result, _) = join(store.get_kpi_data(), tokio::time::sleep(PRESENT_DELAY)).await;
    spinner.finish_and_clear();

    let (kpis, origin) = result?;
    let settings = store.settings().await;

    println!("{}", kpis.display_as_tables(&settings.currency));
    if let Some(note) = origin_note(origin) {
        println!("\n{note}");
    }
    Ok(())
}
