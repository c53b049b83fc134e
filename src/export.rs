use crate::draw::GeometryKind;
use crate::waypoints::WaypointTable;
use anyhow::Context as _;
use chrono::{SecondsFormat, Utc};
use rust_xlsxwriter::{Format, Workbook};
use serde_json::{Number, Value, json};
use std::io::BufWriter;
use std::path::Path;

const HEADERS: [&str; 4] = ["WP", "Latitude", "Longitude", "Distance (m)"];
const COORD_DECIMALS: i32 = 8;
const DISTANCE_DECIMALS: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
    Xlsx,
}

impl ExportFormat {
    pub const ALL: [Self; 3] = [Self::Csv, Self::Json, Self::Xlsx];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Csv => "CSV",
            Self::Json => "JSON",
            Self::Xlsx => "Excel",
        }
    }

    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Xlsx => "xlsx",
        }
    }
}

pub fn export_table(path: &Path, table: &WaypointTable, format: ExportFormat) -> anyhow::Result<()> {
    let result = match format {
        ExportFormat::Csv => export_to_csv(path, table),
        ExportFormat::Json => export_to_json(path, table),
        ExportFormat::Xlsx => export_to_xlsx(path, table),
    };
    match &result {
        Ok(()) => log::info!(
            "exported {} waypoints as {} to {}",
            table.rows.len(),
            format.label(),
            path.display()
        ),
        Err(err) => log::warn!("{} export to {} failed: {err:#}", format.label(), path.display()),
    }
    result
}

pub fn export_to_csv(path: &Path, table: &WaypointTable) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    wtr.write_record(HEADERS)?;
    for row in &table.rows {
        wtr.write_record([
            row.label(),
            format!("{:.8}", row.position.lat),
            format!("{:.8}", row.position.lon),
            format!("{:.2}", row.segment_distance_m),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn export_to_xlsx(path: &Path, table: &WaypointTable) -> anyhow::Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name(table.kind))?;

    let bold = Format::new().set_bold();
    for (col, header) in (0u16..).zip(HEADERS) {
        worksheet.write_string_with_format(0, col, header, &bold)?;
    }

    // Keep parity with CSV/JSON digits.
    let coord_format = Format::new().set_num_format("0.00000000");
    let distance_format = Format::new().set_num_format("0.00");

    for (row_idx, row) in (1u32..).zip(&table.rows) {
        worksheet.write_string(row_idx, 0, row.label())?;
        worksheet.write_number_with_format(row_idx, 1, row.position.lat, &coord_format)?;
        worksheet.write_number_with_format(row_idx, 2, row.position.lon, &coord_format)?;
        worksheet.write_number_with_format(row_idx, 3, row.segment_distance_m, &distance_format)?;
    }

    let total_row = u32::try_from(table.rows.len() + 1).context("Too many waypoints for Excel")?;
    worksheet.write_string_with_format(total_row, 0, "Total", &bold)?;
    worksheet.write_number_with_format(total_row, 3, table.total_distance_m(), &distance_format)?;

    workbook
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))
}

pub fn export_to_json(path: &Path, table: &WaypointTable) -> anyhow::Result<()> {
    let root = table_to_json(table);
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &root)?;
    Ok(())
}

fn table_to_json(table: &WaypointTable) -> Value {
    let waypoints: Vec<Value> = table
        .rows
        .iter()
        .map(|row| {
            json!({
                "wp": row.label(),
                "lat": rounded_number_json(row.position.lat, COORD_DECIMALS),
                "lon": rounded_number_json(row.position.lon, COORD_DECIMALS),
                "distance_m": rounded_number_json(row.segment_distance_m, DISTANCE_DECIMALS),
            })
        })
        .collect();

    json!({
        "title": table.title,
        "geometry": table.kind.label(),
        "generated_at": Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        "total_distance_m": rounded_number_json(table.total_distance_m(), DISTANCE_DECIMALS),
        "waypoints": waypoints,
    })
}

/// Tab-separated table as shown in the dialog, for pasting into spreadsheets.
pub fn table_to_tsv(table: &WaypointTable) -> String {
    let mut out = String::from("WP\tCoordinates\tDistance\n");
    for row in &table.rows {
        out.push_str(&row.label());
        out.push('\t');
        out.push_str(&row.coordinates_label());
        out.push('\t');
        out.push_str(&row.distance_label());
        out.push('\n');
    }
    out
}

const fn sheet_name(kind: GeometryKind) -> &'static str {
    match kind {
        GeometryKind::Polygon => "Polygon",
        GeometryKind::LineString => "LineString",
    }
}

fn rounded_number_json(value: f64, decimals: i32) -> Value {
    let scale = 10f64.powi(decimals);
    let rounded = (value * scale).round() / scale;
    Number::from_f64(rounded).map_or_else(|| Value::String(format!("{rounded}")), Value::Number)
}
