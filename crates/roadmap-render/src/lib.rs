//! # roadmap-render
//!
//! Outputs derived from a computed `RoadmapView`.
//!
//! This crate provides:
//! - CSV export of the visible sprints (French column headers)
//! - Desktop presentation: flat Gantt rows with vertical offsets
//! - Mobile presentation: one summary card per sprint
//! - The presentation switch picking one of the two from the view
//!
//! ## Example
//!
//! ```rust,ignore
//! use roadmap_layout::recompute;
//! use roadmap_render::{present, CsvExporter, ViewRenderer};
//!
//! let view = recompute(&input, &state);
//!
//! // CSV with a byte-order mark for spreadsheet tools
//! let csv = CsvExporter::new().with_bom().render(&view)?;
//!
//! // Gantt rows or cards depending on the viewport
//! let presentation = present(&view);
//! println!("{}", presentation.to_json()?);
//! ```

pub mod csv;
pub mod desktop;
pub mod mobile;

pub use csv::{to_csv, CsvExporter, CSV_HEADER};
pub use desktop::{DesktopRenderer, GanttChart, GanttRow, RowKind};
pub use mobile::{MobileRenderer, SprintCard};

use roadmap_core::ExportError;
use roadmap_layout::{PresentationMode, RoadmapView};
use serde::Serialize;

/// Output produced from a computed view
pub trait ViewRenderer {
    type Output;

    /// Render the view to the output format
    fn render(&self, view: &RoadmapView) -> Result<Self::Output, ExportError>;
}

/// The view in the shape its presentation mode calls for
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "mode", content = "content", rename_all = "lowercase")]
pub enum Presentation {
    Desktop(GanttChart),
    Mobile(Vec<SprintCard>),
}

impl Presentation {
    pub fn mode(&self) -> PresentationMode {
        match self {
            Presentation::Desktop(_) => PresentationMode::Desktop,
            Presentation::Mobile(_) => PresentationMode::Mobile,
        }
    }

    pub fn to_json(&self) -> Result<String, ExportError> {
        serde_json::to_string_pretty(self).map_err(|e| ExportError::Format(e.to_string()))
    }
}

/// Present `view` with the default renderers for its mode
pub fn present(view: &RoadmapView) -> Presentation {
    match view.presentation {
        PresentationMode::Desktop => Presentation::Desktop(DesktopRenderer::new().chart(view)),
        PresentationMode::Mobile => Presentation::Mobile(MobileRenderer::new().cards(view)),
    }
}
