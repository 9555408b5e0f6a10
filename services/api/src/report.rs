use crate::infra::parse_section;
use clap::Args;
use usestage_carbon::config::{AppConfig, BuildingConfig};
use usestage_carbon::error::AppError;
use usestage_carbon::reporting::comfort::COMFORT_SCALE_NOTE;
use usestage_carbon::reporting::{Dashboard, DashboardView, Section, SectionBody};
use usestage_carbon::sources::{open_source, DataSource, InMemorySource};
use usestage_carbon::telemetry;

#[derive(Args, Debug, Default)]
pub(crate) struct ReportArgs {
    /// Section to print (Overview, Energy, Water, Waste, Transport, Comfort, Cost)
    #[arg(long, value_parser = parse_section, default_value = "Overview")]
    pub(crate) section: Section,
    /// Reporting year (defaults to the most recent year on record)
    #[arg(long)]
    pub(crate) year: Option<i32>,
    /// Override DB_URL (sqlite://<file>, csv://<dir>, or sample://)
    #[arg(long, conflicts_with = "sample")]
    pub(crate) db_url: Option<String>,
    /// Use the built-in sample building instead of a data store
    #[arg(long)]
    pub(crate) sample: bool,
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs {
        section,
        year,
        db_url,
        sample,
    } = args;

    let db_url = if sample {
        Some("sample://".to_string())
    } else {
        db_url
    };
    let config = AppConfig::load_with_database_url(db_url)?;
    telemetry::init(&config.telemetry)?;

    let source = open_source(&config.data.database_url)?;
    let dashboard = Dashboard::new(source.load_dataset()?, config.building)?;

    println!("Data source: {}", source.describe());
    let view = dashboard.render(section, year)?;
    render_view(&view);
    Ok(())
}

pub(crate) fn run_demo() -> Result<(), AppError> {
    let config = AppConfig::load_with_database_url(Some("sample://".to_string()))?;
    telemetry::init(&config.telemetry)?;

    let dataset = InMemorySource::sample().load_dataset()?;
    let dashboard = Dashboard::new(dataset, BuildingConfig::default())?;

    println!("Use-stage carbon dashboard demo (sample building)");
    for section in Section::ordered() {
        println!();
        match dashboard.render(section, None) {
            Ok(view) => render_view(&view),
            Err(err) => println!("{}: unavailable ({})", section, err),
        }
    }
    Ok(())
}

pub(crate) fn render_view(view: &DashboardView) {
    println!("== {} | {} ==", view.section_label, view.year);
    println!(
        "Baseline {} | years on record: {}",
        view.baseline_year,
        view.available_years
            .iter()
            .map(i32::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    );

    println!("Key indicators:");
    for card in view.kpis.cards() {
        let mut line = format!("  - {}: {:.2} {}", card.label, card.value, card.unit);
        if let Some(delta) = card.delta {
            line.push_str(&format!(
                " ({:+.1}% vs {})",
                delta.percent, delta.baseline_year
            ));
        }
        if let Some(note) = &card.note {
            line.push_str(&format!(" [{}]", note));
        }
        println!("{}", line);
    }

    println!(
        "Emissions by category (gross {:.1} tCO₂e):",
        view.gross_emissions_tco2e
    );
    for share in &view.emissions_by_category {
        println!(
            "  - {}: {:.1} tCO₂e ({:.1}%)",
            share.label, share.emissions, share.share_of_gross
        );
    }

    render_body(&view.body);

    if !view.data_sources.is_empty() {
        println!("Data sources:");
        for entry in &view.data_sources {
            println!(
                "  - {} [{}, {}] {}",
                entry.name, entry.category, entry.unit, entry.coverage
            );
        }
    }
}

fn render_body(body: &SectionBody) {
    match body {
        SectionBody::Overview { historical } => {
            println!("Historical data:");
            println!("  year | energy kWh | water m³ | waste kg | transport pkm | net tCO₂e");
            for row in historical {
                println!(
                    "  {} | {} | {} | {} | {} | {:.1}",
                    row.year,
                    row.energy_kwh,
                    row.water_m3,
                    row.waste_kg,
                    row.transport_pkm,
                    row.net_emissions_tco2e
                );
            }
        }
        SectionBody::Energy {
            details,
            renewables,
        } => {
            for detail in details {
                println!("  {}: {:.1} {}", detail.metric, detail.value, detail.units);
            }
            println!("Renewables:");
            for row in renewables {
                println!(
                    "  {} | PV {} kWh | thermal {} kWh | total {} kWh | offset {:.1}%",
                    row.year,
                    row.solar_pv_kwh,
                    row.solar_thermal_kwh,
                    row.total_renewables_kwh,
                    row.offset_share_pct
                );
            }
        }
        SectionBody::Category { category, details } => {
            println!("{} details:", category.label());
            for detail in details {
                println!("  {}: {:.1} {}", detail.metric, detail.value, detail.units);
            }
        }
        SectionBody::Comfort { indicators } => {
            for indicator in indicators.indicators() {
                let assessment = indicator.assessment.unwrap_or("-");
                println!(
                    "  {}: {:.0} {} ({})",
                    indicator.label, indicator.value, indicator.unit, assessment
                );
            }
            println!("  {}", COMFORT_SCALE_NOTE);
        }
        SectionBody::Cost { table, life_cycle } => {
            println!("Annual operating cost:");
            for row in &table.rows {
                println!(
                    "  - {}: {:.0} {} x {} = {:.2} {} ({:.1}%)",
                    row.label,
                    row.consumption,
                    row.unit,
                    row.unit_cost_display,
                    row.annual_cost,
                    row.currency,
                    row.share_of_total_pct
                );
            }
            let currency = life_cycle.currency.as_deref().unwrap_or("");
            println!("  Total: {:.2} {}", table.total_annual_cost, currency);
            println!(
                "  {}-year life cycle: {:.2} {}",
                life_cycle.years, life_cycle.total, currency
            );
            println!("  {}", life_cycle.note);
        }
    }
}
