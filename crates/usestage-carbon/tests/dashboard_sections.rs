use usestage_carbon::config::BuildingConfig;
use usestage_carbon::reporting::metrics::net_emissions;
use usestage_carbon::reporting::{
    Category, Dashboard, DashboardError, Dataset, Section, SectionBody,
};
use usestage_carbon::sources::{DataSource, InMemorySource};

fn sample_dashboard() -> Dashboard {
    let dataset = InMemorySource::sample()
        .load_dataset()
        .expect("sample dataset loads");
    Dashboard::new(dataset, BuildingConfig::default()).expect("sample has yearly data")
}

#[test]
fn empty_yearly_data_halts_the_render_pass() {
    let err = Dashboard::new(Dataset::default(), BuildingConfig::default())
        .expect_err("no yearly rows");
    assert_eq!(err, DashboardError::DataUnavailable);
}

#[test]
fn years_are_offered_newest_first_with_oldest_as_baseline() {
    let dashboard = sample_dashboard();
    assert_eq!(dashboard.years(), [2024, 2023, 2022, 2021, 2020]);
    assert_eq!(dashboard.latest_year(), 2024);
    assert_eq!(dashboard.baseline_year(), 2020);
}

#[test]
fn overview_defaults_to_latest_year_and_lists_history() {
    let dashboard = sample_dashboard();
    let view = dashboard
        .render(Section::Overview, None)
        .expect("overview renders");

    assert_eq!(view.year, 2024);
    assert_eq!(view.baseline_year, 2020);
    assert_eq!(view.data_sources.len(), 6);
    assert_eq!(view.emissions_by_category.len(), 4);

    match view.body {
        SectionBody::Overview { historical } => {
            assert_eq!(historical.len(), 5);
            assert_eq!(historical.first().map(|row| row.year), Some(2020));
        }
        other => panic!("unexpected body {other:?}"),
    }

    let latest = dashboard.record(2024).expect("2024 present");
    assert_eq!(view.kpis.net_operational_carbon.value, net_emissions(latest));
    let delta = view
        .kpis
        .net_operational_carbon
        .delta
        .expect("net carbon has a delta");
    assert!(delta.percent > 0.0, "sample building improves on its baseline");
}

#[test]
fn energy_section_includes_renewables_series() {
    let view = sample_dashboard()
        .render(Section::Energy, Some(2022))
        .expect("energy renders");

    match view.body {
        SectionBody::Energy {
            details,
            renewables,
        } => {
            let metrics: Vec<_> = details.iter().map(|detail| detail.metric).collect();
            assert_eq!(metrics, ["Consumption", "Emissions", "Renewable offset"]);
            assert_eq!(renewables.len(), 5);
        }
        other => panic!("unexpected body {other:?}"),
    }
    assert!(view.data_sources.iter().all(|entry| entry.category == "Energy"));
}

#[test]
fn category_sections_report_their_own_units() {
    let dashboard = sample_dashboard();
    for (section, category, units) in [
        (Section::Water, Category::Water, "m³/yr"),
        (Section::Waste, Category::Waste, "kg/yr"),
        (Section::Transport, Category::Transport, "pkm/yr"),
    ] {
        let view = dashboard.render(section, Some(2023)).expect("section renders");
        match view.body {
            SectionBody::Category {
                category: rendered,
                details,
            } => {
                assert_eq!(rendered, category);
                assert_eq!(details[0].units, units);
                assert_eq!(details[1].units, "tCO₂e/yr");
            }
            other => panic!("unexpected body {other:?}"),
        }
    }
}

#[test]
fn comfort_section_uses_the_selected_year() {
    let view = sample_dashboard()
        .render(Section::Comfort, Some(2023))
        .expect("comfort renders");

    match view.body {
        SectionBody::Comfort { indicators } => {
            assert_eq!(indicators.year, 2023);
            assert_eq!(indicators.indoor_air_quality.assessment, Some("Good IAQ"));
            assert_eq!(
                indicators.thermal_discomfort.assessment,
                Some("Within comfort targets")
            );
        }
        other => panic!("unexpected body {other:?}"),
    }
}

#[test]
fn comfort_section_without_readings_is_reported() {
    let mut dataset = InMemorySource::sample().into_dataset();
    dataset.comfort.retain(|record| record.year != 2024);
    let dashboard = Dashboard::new(dataset, BuildingConfig::default()).expect("yearly present");

    let err = dashboard
        .render(Section::Comfort, None)
        .expect_err("no 2024 comfort row");
    assert_eq!(err, DashboardError::ComfortUnavailable { year: 2024 });
}

#[test]
fn cost_section_projects_life_cycle_without_discounting() {
    let building = BuildingConfig {
        life_cycle_years: 10,
        ..BuildingConfig::default()
    };
    let dataset = InMemorySource::sample().into_dataset();
    let dashboard = Dashboard::new(dataset, building).expect("yearly present");

    let view = dashboard.render(Section::Cost, Some(2024)).expect("cost renders");
    match view.body {
        SectionBody::Cost { table, life_cycle } => {
            assert_eq!(table.rows.len(), 4);
            assert_eq!(life_cycle.years, 10);
            assert!((life_cycle.total - table.total_annual_cost * 10.0).abs() < 1e-6);
            assert_eq!(life_cycle.currency.as_deref(), Some("€"));
            assert!(life_cycle.note.contains("no discounting"));
        }
        other => panic!("unexpected body {other:?}"),
    }
    assert!(view.data_sources.is_empty());
}

#[test]
fn cost_section_surfaces_missing_rates() {
    let mut dataset = InMemorySource::sample().into_dataset();
    dataset
        .cost_rates
        .retain(|rate| rate.category != Category::Transport);
    let dashboard = Dashboard::new(dataset, BuildingConfig::default()).expect("yearly present");

    let err = dashboard
        .render(Section::Cost, None)
        .expect_err("transport rate missing");
    assert!(matches!(
        err,
        DashboardError::MissingRate(missing) if missing.category == Category::Transport
    ));

    assert!(dashboard.render(Section::Overview, None).is_ok());
}

#[test]
fn unknown_year_is_rejected() {
    let err = sample_dashboard()
        .render(Section::Overview, Some(1990))
        .expect_err("1990 not recorded");
    assert_eq!(err, DashboardError::UnknownYear { year: 1990 });
}

#[test]
fn view_serializes_with_tagged_body() {
    let view = sample_dashboard()
        .render(Section::Water, None)
        .expect("water renders");
    let json = serde_json::to_value(&view).expect("view serializes");

    assert_eq!(json["section"], "water");
    assert_eq!(json["body"]["kind"], "category");
    assert_eq!(json["body"]["category"], "water");
    assert_eq!(json["kpis"]["renewables_offset"]["unit"], "tCO₂e/yr");
}
