use fleetdetect_lib::AnalysisRecord;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
    Markdown,
}

#[derive(Tabled)]
struct VerdictRow {
    #[tabled(rename = "Identifier")]
    identifier: String,
    #[tabled(rename = "Vehicle")]
    vehicle: String,
    #[tabled(rename = "Flagged")]
    flagged: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Confidence")]
    confidence: u8,
    #[tabled(rename = "Score")]
    score: i32,
    #[tabled(rename = "Reasons")]
    reasons: String,
}

#[derive(Tabled)]
struct SpecRow {
    #[tabled(rename = "Spec")]
    field: String,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Tabled)]
struct OwnerRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Owner")]
    raw_text: String,
    #[tabled(rename = "Display Name")]
    normalized_name: String,
}

// -- Row builders --

fn build_verdict_rows(record: &AnalysisRecord) -> Vec<VerdictRow> {
    let c = &record.classification;
    vec![VerdictRow {
        identifier: record.identifier.clone(),
        vehicle: record.vehicle_summary.display_text.clone(),
        flagged: if c.is_flagged() { "yes" } else { "no" }.to_string(),
        category: c.category.to_string(),
        confidence: c.confidence,
        score: c.score,
        reasons: c.reasons.join("; "),
    }]
}

fn build_spec_rows(record: &AnalysisRecord) -> Vec<SpecRow> {
    record
        .specs
        .iter()
        .map(|(field, value)| SpecRow {
            field: field.to_string(),
            value: value.clone(),
        })
        .collect()
}

fn build_owner_rows(record: &AnalysisRecord) -> Vec<OwnerRow> {
    record
        .owners
        .iter()
        .enumerate()
        .map(|(i, o)| OwnerRow {
            position: i + 1,
            raw_text: o.raw_text.clone(),
            normalized_name: o.normalized_name.clone(),
        })
        .collect()
}

/// Verdict first, then specs and owners when there are any.
fn render_record(record: &AnalysisRecord, markdown: bool) -> String {
    let mut tables = vec![Table::new(build_verdict_rows(record))];
    let specs = build_spec_rows(record);
    if !specs.is_empty() {
        tables.push(Table::new(specs));
    }
    let owners = build_owner_rows(record);
    if !owners.is_empty() {
        tables.push(Table::new(owners));
    }

    tables
        .into_iter()
        .map(|mut table| {
            if markdown {
                table.with(Style::markdown());
            }
            table.to_string()
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

// -- Table output --

pub fn print_record_table(record: &AnalysisRecord) {
    println!("{}", render_record(record, false));
}

// -- Markdown output --

pub fn print_record_markdown(record: &AnalysisRecord) {
    println!("{}", render_record(record, true));
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}
