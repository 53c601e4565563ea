use super::ui;
use crate::core::scores::{GrowthPotential, ProfileScores};
use crate::core::snapshot::DataOrigin;
use crate::store::metrics::MetricsStore;
use anyhow::Result;
use comfy_table::{Cell, Color};

impl ProfileScores {
    fn display_as_table(&self) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![ui::header_cell("Metric"), ui::header_cell("Score")]);
        table.add_row(vec![
            Cell::new("Profile completeness"),
            ui::score_cell(self.completeness),
        ]);
        table.add_row(vec![
            Cell::new("Business health"),
            ui::score_cell(self.business_health),
        ]);
        table.add_row(vec![
            Cell::new("Investment readiness"),
            ui::score_cell(self.investment_readiness),
        ]);

        let potential_color = match self.growth_potential {
            GrowthPotential::High => Color::Green,
            GrowthPotential::Medium => Color::Yellow,
            GrowthPotential::Low => Color::Red,
        };
        table.add_row(vec![
            Cell::new("Growth potential"),
            Cell::new(self.growth_potential.to_string()).fg(potential_color),
        ]);

        format!(
            "{}\n\n{table}",
            ui::style_text("Profile Summary", ui::StyleType::Title)
        )
    }
}

pub async fn run(store: &MetricsStore) -> Result<()> {
    let (scores, origin) = store.get_profile_summary().await?;

    println!("{}", scores.display_as_table());
    match origin {
        DataOrigin::Real => {}
        DataOrigin::Cached => println!(
            "\n{}",
            ui::style_text(
                "No profile filled in; showing the last saved scores.",
                ui::StyleType::Subtle
            )
        ),
        DataOrigin::Default => println!(
            "\n{}",
            ui::style_text(
                "No profile filled in yet; complete it to see real scores.",
                ui::StyleType::Subtle
            )
        ),
    }
    Ok(())
}
