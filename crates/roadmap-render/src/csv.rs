//! CSV export of the visible sprints
//!
//! ## Example Output
//!
//! ```text
//! Sprint,Produit,Début,Fin,Durée (jours),Statut,Stories,Points,Progrès (%)
//! "Sprint 1","[ABC] Alpha",2025-01-01,2025-01-10,10,active,3,8,50
//! "Sprint 2","",2025-01-13,2025-01-24,12,planned,0,0,0
//! ```
//!
//! Text fields are always double-quoted with embedded quotes doubled. Dates,
//! status and numbers are written bare. Rows are separated by `\n` with no
//! trailing newline.

use std::io::Write;

use chrono::NaiveDate;
use roadmap_core::{ExportError, Product, Sprint, SprintStatus};
use roadmap_layout::{RoadmapView, SprintStats};

use crate::ViewRenderer;

/// Header row of the export
pub const CSV_HEADER: &str = "Sprint,Produit,Début,Fin,Durée (jours),Statut,Stories,Points,Progrès (%)";

const BOM: char = '\u{feff}';

/// CSV exporter over a computed view, in on-screen sprint order
#[derive(Clone, Debug, Default)]
pub struct CsvExporter {
    /// Prefix the output with a UTF-8 byte-order mark
    pub bom: bool,
}

impl CsvExporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a byte-order mark so spreadsheet tools detect UTF-8
    pub fn with_bom(mut self) -> Self {
        self.bom = true;
        self
    }

    /// Render and write to `writer`
    pub fn write_to<W: Write>(&self, view: &RoadmapView, mut writer: W) -> Result<(), ExportError> {
        let csv = self.render(view)?;
        writer.write_all(csv.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    fn finish(&self, rows: Vec<String>) -> String {
        let body = rows.join("\n");
        if self.bom {
            format!("{}{}", BOM, body)
        } else {
            body
        }
    }
}

impl ViewRenderer for CsvExporter {
    type Output = String;

    fn render(&self, view: &RoadmapView) -> Result<String, ExportError> {
        let mut rows = Vec::with_capacity(view.sprints.len() + 1);
        rows.push(CSV_HEADER.to_string());
        for sprint in &view.sprints {
            rows.push(row(
                &sprint.name,
                sprint.product_label.as_deref(),
                sprint.start_date,
                sprint.end_date,
                sprint.duration_days,
                sprint.status,
                &sprint.stats,
            ));
        }
        Ok(self.finish(rows))
    }
}

/// Serialize `sprints` with their stats, pairing both slices by position.
/// A sprint without a matching stats entry exports zero counts; a product id
/// that resolves to nothing exports an empty product column.
pub fn to_csv(sprints: &[&Sprint], stats: &[SprintStats], products: &[Product]) -> String {
    let mut rows = Vec::with_capacity(sprints.len() + 1);
    rows.push(CSV_HEADER.to_string());
    for (i, sprint) in sprints.iter().enumerate() {
        let product = sprint
            .product_id
            .as_deref()
            .and_then(|id| products.iter().find(|p| p.id == id))
            .map(|p| p.label());
        rows.push(row(
            &sprint.name,
            product.as_deref(),
            sprint.start_date,
            sprint.end_date,
            sprint.duration_days(),
            sprint.status,
            &stats.get(i).copied().unwrap_or_default(),
        ));
    }
    rows.join("\n")
}

fn row(
    name: &str,
    product: Option<&str>,
    start: NaiveDate,
    end: NaiveDate,
    duration_days: i64,
    status: SprintStatus,
    stats: &SprintStats,
) -> String {
    format!(
        "{},{},{},{},{},{},{},{},{}",
        quote(name),
        quote(product.unwrap_or_default()),
        start.format("%Y-%m-%d"),
        end.format("%Y-%m-%d"),
        duration_days,
        status.as_str(),
        stats.total_stories,
        stats.total_points,
        stats.progress_percent,
    )
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
