use fleetdetect_lib::{
    AnalysisRecord, Category, DetectionConfig, Pipeline, RawOwnerEntry, ScoringPolicy, SpecField,
};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

fn pipeline() -> Pipeline {
    Pipeline::new(DetectionConfig::default()).unwrap()
}

fn run_fixture(name: &str) -> AnalysisRecord {
    pipeline().run("AB123C", &load_fixture(name)).unwrap()
}

#[test]
fn fleetowner_scenario() {
    let record = run_fixture("fleetowner.html");

    assert_eq!(record.identifier, "AB123C");
    assert_eq!(
        record.owners,
        vec![RawOwnerEntry {
            raw_text: "Fleetowner BV".into(),
            normalized_name: "Current owner Fleetowner BV".into(),
            dates: vec![],
        }]
    );
    assert_eq!(record.vehicle_summary.display_text, "Unknown");
    assert!(record.specs.is_empty());

    let c = &record.classification;
    assert_eq!(c.category, Category::LikelyFleetOrUndercover);
    assert_eq!(c.confidence, 95);
    assert_eq!(c.score, 10);
    assert_eq!(c.reasons, vec!["owner type explicitly marked as fleet-owner".to_string()]);
}

#[test]
fn kia_proceed_scenario() {
    let record = run_fixture("kia_proceed.html");

    assert!(record.owners.is_empty());
    assert_eq!(record.vehicle_summary.display_text, "Kia ProCeed");
    assert_eq!(record.specs.len(), 1);
    assert_eq!(record.specs[&SpecField::Power], "150PK");

    let c = &record.classification;
    assert_eq!(c.category, Category::Private);
    assert_eq!(c.confidence, 10);
    assert_eq!(c.reasons, vec!["no ownership history available".to_string()]);
}

#[test]
fn full_page_extracts_everything() {
    let record = run_fixture("full_page.html");

    let raw: Vec<&str> = record.owners.iter().map(|o| o.raw_text.as_str()).collect();
    assert_eq!(raw, vec!["Particulier", "Leasemaatschappij", "Politie Eenheid Amsterdam"]);
    assert!(record.owners.iter().all(|o| o.dates.is_empty()));

    assert_eq!(
        record.vehicle_summary.display_text,
        "Volkswagen Golf 2.0 TDI Style (2021)"
    );
    assert_eq!(
        record.registration_label.as_deref(),
        Some("Voertuig is geregistreerd op een rechtspersoon")
    );

    assert_eq!(record.specs[&SpecField::Power], "150PK / 360Nm");
    assert_eq!(record.specs[&SpecField::TopSpeed], "223 km/h");
    assert_eq!(record.specs[&SpecField::Acceleration], "8.8s");
    assert_eq!(record.specs[&SpecField::Displacement], "1968cc");
    assert_eq!(record.specs[&SpecField::FuelType], "Diesel");

    let c = &record.classification;
    assert_eq!(c.category, Category::LikelyFleetOrUndercover);
    assert_eq!(c.confidence, 85);
    assert_eq!(c.reasons, vec!["government/undercover keyword found".to_string()]);
    assert_eq!(c.last_owner_name.as_deref(), Some("Current owner Politie Eenheid Amsterdam"));
}

#[test]
fn earlier_fleet_owner_does_not_flag_private_current_owner() {
    let record = run_fixture("private_owner.html");

    assert_eq!(record.owners.len(), 2);
    assert_eq!(record.classification.category, Category::Private);
    assert_eq!(record.classification.confidence, 70);
    assert_eq!(record.classification.score, 0);
    assert_eq!(
        record.vehicle_summary.display_text,
        "Toyota Yaris 1.5 Hybrid Dynamic (2018)"
    );
    assert_eq!(record.specs[&SpecField::TopSpeed], "175 km/h");
    assert_eq!(record.specs[&SpecField::FuelType], "Hybrid");
    assert!(!record.specs.contains_key(&SpecField::Power));
}

#[test]
fn government_confidence_below_fleet_owner() {
    let fleet = run_fixture("fleetowner.html").classification.confidence;
    let government = run_fixture("full_page.html").classification.confidence;
    assert!(government < fleet);
}

#[test]
fn repeated_runs_are_byte_identical() {
    let p = pipeline();
    for name in ["fleetowner.html", "kia_proceed.html", "full_page.html", "private_owner.html"] {
        let markup = load_fixture(name);
        let first = serde_json::to_string(&p.run("AB123C", &markup).unwrap()).unwrap();
        let second = serde_json::to_string(&p.run("AB123C", &markup).unwrap()).unwrap();
        assert_eq!(first, second, "{} differs between runs", name);
    }
}

#[test]
fn no_history_region_is_private_with_reason() {
    let markup = "<html><body><section data-sectiontype=\"Summary\"><h1>Opel Astra</h1></section></body></html>";
    let record = pipeline().run("AB123C", markup).unwrap();
    assert!(record.owners.is_empty());
    assert_eq!(record.classification.category, Category::Private);
    assert_eq!(record.classification.confidence, 10);
    assert!(!record.classification.reasons.is_empty());
}

#[test]
fn weighted_policy_on_full_page() {
    let mut config = DetectionConfig::default();
    config.classifier.policy = ScoringPolicy::Weighted;
    let record = Pipeline::new(config)
        .unwrap()
        .run("XY987Z", &load_fixture("full_page.html"))
        .unwrap();

    let c = &record.classification;
    assert_eq!(c.category, Category::LikelyFleetOrUndercover);
    assert_eq!(c.score, 10);
    assert_eq!(c.confidence, 100);
    assert_eq!(c.reasons.len(), 2);
}

#[test]
fn localized_config() {
    let config = DetectionConfig::from_toml_str(
        "[owners]\nname_prefix = \"Huidige eigenaar\"\n\n[summary]\nunknown_label = \"Onbekend\"\n",
    )
    .unwrap();
    let record = Pipeline::new(config)
        .unwrap()
        .run("AB123C", &load_fixture("fleetowner.html"))
        .unwrap();
    assert_eq!(record.owners[0].normalized_name, "Huidige eigenaar Fleetowner BV");
    assert_eq!(record.vehicle_summary.display_text, "Onbekend");
}

#[test]
fn unparseable_markup_is_an_error() {
    let result = pipeline().run("AB123C", "   ");
    assert!(result.is_err());
}

#[test]
fn serialized_shape() {
    let record = run_fixture("fleetowner.html");
    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value["identifier"], "AB123C");
    assert_eq!(value["vehicle_summary"]["display_text"], "Unknown");
    assert_eq!(value["specs"], serde_json::json!({}));
    assert_eq!(value["owners"][0]["raw_text"], "Fleetowner BV");
    assert_eq!(value["owners"][0]["normalized_name"], "Current owner Fleetowner BV");
    assert_eq!(value["owners"][0]["dates"], serde_json::json!([]));
    assert_eq!(value["classification"]["category"], "LIKELY_FLEET_OR_UNDERCOVER");
    assert_eq!(value["classification"]["confidence"], 95);
    assert_eq!(value["classification"]["score"], 10);

    let back: AnalysisRecord = serde_json::from_value(value).unwrap();
    assert_eq!(back, record);
}
