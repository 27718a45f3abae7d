//! WebAssembly bindings for the roadmap timeline layout engine
//!
//! The `Roadmap` class owns the dataset, the user's settings and the
//! interaction state (zoom, expansion). Every read recomputes the view from
//! scratch and returns it as JSON.

use chrono::NaiveDate;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use roadmap_core::{parse_date, Direction, Granularity, RoadmapData};
use roadmap_layout::{
    get_range, navigate, recompute, InteractionState, RoadmapFilters, RoadmapInput, RoadmapView,
    Viewport,
};
use roadmap_render::{present, CsvExporter, ViewRenderer};

/// Viewport width assumed until the host reports one
const DEFAULT_WIDTH: f64 = 1280.0;

/// Initialize panic hook for better error messages in console
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Window for `date` at `granularity`, as JSON
#[wasm_bindgen]
pub fn timeline_range(date: &str, granularity: &str) -> Result<String, JsValue> {
    timeline_range_internal(date, granularity).map_err(|e| JsValue::from_str(&e))
}

/// One-shot CSV export of a dataset for the window around `reference_date`
///
/// `filters_json` may be empty for no filtering.
#[wasm_bindgen]
pub fn export_csv(
    data_json: &str,
    reference_date: &str,
    granularity: &str,
    filters_json: &str,
    bom: bool,
) -> Result<String, JsValue> {
    export_csv_internal(data_json, reference_date, granularity, filters_json, bom)
        .map_err(|e| JsValue::from_str(&e))
}

fn timeline_range_internal(date: &str, granularity: &str) -> Result<String, String> {
    let date = parse_date(date).map_err(|e| e.to_string())?;
    let granularity: Granularity = granularity
        .parse()
        .map_err(|e: roadmap_core::DataError| e.to_string())?;
    to_json(&get_range(date, granularity))
}

fn export_csv_internal(
    data_json: &str,
    reference_date: &str,
    granularity: &str,
    filters_json: &str,
    bom: bool,
) -> Result<String, String> {
    let mut roadmap = Roadmap::new();
    roadmap.load_internal(data_json)?;
    roadmap.set_reference_date_internal(reference_date)?;
    roadmap.set_granularity_internal(granularity)?;
    if !filters_json.trim().is_empty() {
        roadmap.set_filters_internal(filters_json)?;
    }
    roadmap.export_csv_internal(bom)
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

// ============================================================================
// Roadmap Class
// ============================================================================

/// Interactive roadmap session
#[wasm_bindgen]
pub struct Roadmap {
    data: RoadmapData,
    reference_date: NaiveDate,
    granularity: Granularity,
    filters: RoadmapFilters,
    viewport: Viewport,
    today: NaiveDate,
    state: InteractionState,
    last_error: Option<String>,
}

impl Default for Roadmap {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl Roadmap {
    /// Create an empty session framed on the current month
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        let today = chrono::Local::now().date_naive();
        Self {
            data: RoadmapData::default(),
            reference_date: today,
            granularity: Granularity::Month,
            filters: RoadmapFilters::default(),
            viewport: Viewport::new(DEFAULT_WIDTH),
            today,
            state: InteractionState::default(),
            last_error: None,
        }
    }

    /// Replace the dataset with `json` (sprints, stories, tasks, products,
    /// teams, contacts)
    pub fn load(&mut self, json: &str) -> Result<(), JsValue> {
        let result = self.load_internal(json);
        self.check(result)
    }

    /// Report the viewport width and, optionally, the measured timeline
    /// container width
    pub fn set_viewport(&mut self, width: f64, container_width: Option<f64>) {
        self.viewport = Viewport {
            width,
            container_width,
        };
    }

    pub fn set_reference_date(&mut self, date: &str) -> Result<(), JsValue> {
        let result = self.set_reference_date_internal(date);
        self.check(result)
    }

    /// Move the "today" marker, mostly for demos and tests
    pub fn set_today(&mut self, date: &str) -> Result<(), JsValue> {
        let result = parse_date(date).map(|d| self.today = d).map_err(|e| e.to_string());
        self.check(result)
    }

    /// `month`, `quarter` or `year`
    pub fn set_granularity(&mut self, granularity: &str) -> Result<(), JsValue> {
        let result = self.set_granularity_internal(granularity);
        self.check(result)
    }

    /// Step one window back (`previous`) or forward (`next`); returns the new
    /// window as JSON
    pub fn navigate(&mut self, direction: &str) -> Result<String, JsValue> {
        let result = self.navigate_internal(direction);
        self.check(result)
    }

    /// Jump back to the window containing today
    pub fn go_to_today(&mut self) {
        self.reference_date = self.today;
    }

    pub fn zoom_in(&mut self) -> f64 {
        self.state.zoom.zoom_in()
    }

    pub fn zoom_out(&mut self) -> f64 {
        self.state.zoom.zoom_out()
    }

    pub fn reset_zoom(&mut self) -> f64 {
        self.state.zoom.reset()
    }

    pub fn set_zoom(&mut self, level: f64) -> f64 {
        self.state.zoom.set(level)
    }

    pub fn can_zoom_in(&self) -> bool {
        self.state.zoom.can_zoom_in()
    }

    pub fn can_zoom_out(&self) -> bool {
        self.state.zoom.can_zoom_out()
    }

    /// Flip a sprint's expansion and return its new state
    pub fn toggle_sprint(&mut self, sprint_id: &str) -> bool {
        self.state.expansion.toggle_sprint(sprint_id)
    }

    /// Flip a story's expansion and return its new state
    pub fn toggle_story(&mut self, story_id: &str) -> bool {
        self.state.expansion.toggle_story(story_id)
    }

    /// Expand every story of the currently visible sprints
    pub fn expand_all_stories(&mut self) {
        let view = self.compute();
        let ids: Vec<String> = view
            .sprints
            .iter()
            .flat_map(|s| s.stories.iter().map(|story| story.id.clone()))
            .collect();
        self.state
            .expansion
            .expand_all_stories(ids.iter().map(String::as_str));
    }

    pub fn collapse_all_stories(&mut self) {
        self.state.expansion.collapse_all_stories();
    }

    /// Replace the filters with `json`, e.g.
    /// `{"status":"active","team":"all","assignee":"unassigned"}`.
    /// Missing keys reset to "all".
    pub fn set_filters(&mut self, json: &str) -> Result<(), JsValue> {
        let result = self.set_filters_internal(json);
        self.check(result)
    }

    /// Current filters as JSON
    pub fn get_filters(&self) -> String {
        to_json(&self.filters).unwrap_or_default()
    }

    /// Recompute and return the full view as JSON
    pub fn view(&mut self) -> String {
        let view = self.refresh();
        to_json(&view).unwrap_or_default()
    }

    /// Recompute and return the mobile cards or desktop rows as JSON
    pub fn presentation(&mut self) -> String {
        let view = self.refresh();
        to_json(&present(&view)).unwrap_or_default()
    }

    /// CSV of the visible sprints
    pub fn export_csv(&mut self, bom: bool) -> Result<String, JsValue> {
        let result = self.export_csv_internal(bom);
        self.check(result)
    }

    /// Zoom and expansion flags as JSON, for persisting between sessions
    pub fn interaction_state(&self) -> String {
        to_json(&self.state).unwrap_or_default()
    }

    pub fn restore_interaction_state(&mut self, json: &str) -> Result<(), JsValue> {
        let result = serde_json::from_str(json)
            .map(|state| self.state = state)
            .map_err(|e| format!("Invalid state: {}", e));
        self.check(result)
    }

    /// Get the last error message
    pub fn get_last_error(&self) -> Option<String> {
        self.last_error.clone()
    }
}

impl Roadmap {
    pub fn load_internal(&mut self, json: &str) -> Result<(), String> {
        self.data = RoadmapData::from_json(json).map_err(|e| e.to_string())?;
        self.refresh();
        Ok(())
    }

    pub fn set_reference_date_internal(&mut self, date: &str) -> Result<(), String> {
        self.reference_date = parse_date(date).map_err(|e| e.to_string())?;
        Ok(())
    }

    pub fn set_granularity_internal(&mut self, granularity: &str) -> Result<(), String> {
        self.granularity = granularity
            .parse()
            .map_err(|e: roadmap_core::DataError| e.to_string())?;
        Ok(())
    }

    pub fn navigate_internal(&mut self, direction: &str) -> Result<String, String> {
        let direction: Direction = direction
            .parse()
            .map_err(|e: roadmap_core::DataError| e.to_string())?;
        self.reference_date = navigate(self.reference_date, self.granularity, direction);
        to_json(&get_range(self.reference_date, self.granularity))
    }

    pub fn set_filters_internal(&mut self, json: &str) -> Result<(), String> {
        self.filters = serde_json::from_str(json).map_err(|e| format!("Invalid filters: {}", e))?;
        Ok(())
    }

    pub fn export_csv_internal(&mut self, bom: bool) -> Result<String, String> {
        let view = self.refresh();
        CsvExporter { bom }.render(&view).map_err(|e| e.to_string())
    }

    fn compute(&self) -> RoadmapView {
        let input = RoadmapInput {
            data: &self.data,
            reference_date: self.reference_date,
            granularity: self.granularity,
            filters: &self.filters,
            viewport: self.viewport,
            today: self.today,
        };
        recompute(&input, &self.state)
    }

    /// Recompute, then drop expansion flags of entities the view no longer shows
    pub fn refresh(&mut self) -> RoadmapView {
        let view = self.compute();
        self.state.reconcile(&view);
        view
    }

    fn check<T>(&mut self, result: Result<T, String>) -> Result<T, JsValue> {
        match result {
            Ok(value) => {
                self.last_error = None;
                Ok(value)
            }
            Err(e) => {
                self.last_error = Some(e.clone());
                Err(JsValue::from_str(&e))
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
