//! Map artifact rendering and storage
//!
//! The render adapter turns a marker list into a self-contained Leaflet
//! HTML page: CartoDB positron tiles, one fixed crimson boundary ring plus
//! one filled, colored, popup-bearing circle per marker. Popup fragments
//! are injected through an iframe `srcdoc` so their markup stays contained.
//!
//! Rendered artifacts are kept in memory, keyed by an incrementing name
//! (`map0`, `map1`, ...). Each response embeds exactly the artifact it
//! rendered, so concurrent submissions can interleave names without one
//! visitor ever seeing another's palette.

use std::collections::VecDeque;

use askama::Template;

use crate::config::MapViewConfig;
use crate::errors::AppError;
use crate::itinerary::{INNER_RADIUS, OUTER_RADIUS, RING_COLOR};
use crate::models::Marker;

/// Artifacts kept before the oldest is dropped. Only the most recent name
/// is ever linked from the index page; the window just tolerates stragglers
/// still loading an older iframe.
const ARTIFACT_WINDOW: usize = 8;

#[derive(Template)]
#[template(path = "map.html")]
struct MapTemplate<'a> {
    view: &'a MapViewConfig,
    markers: &'a [MarkerView],
    inner_radius: u32,
    outer_radius: u32,
    ring_color: &'static str,
}

/// Marker flattened for the template.
struct MarkerView {
    place: &'static str,
    lat: f64,
    lon: f64,
    color: String,
    popup_html: String,
}

/// Render a marker list into a named, self-contained Leaflet HTML page.
pub fn render_map(view: &MapViewConfig, markers: &[Marker]) -> Result<String, AppError> {
    let views: Vec<MarkerView> = markers
        .iter()
        .map(|m| MarkerView {
            place: m.place,
            lat: m.coordinate.lat,
            lon: m.coordinate.lon,
            color: m.color.to_string(),
            popup_html: m.popup_html.clone(),
        })
        .collect();

    let html = MapTemplate {
        view,
        markers: &views,
        inner_radius: INNER_RADIUS,
        outer_radius: OUTER_RADIUS,
        ring_color: RING_COLOR,
    }
    .render()?;
    Ok(html)
}

/// In-memory store of rendered map artifacts, keyed by name.
#[derive(Debug, Default)]
pub struct MapStore {
    artifacts: VecDeque<(String, String)>,
    counter: u64,
}

impl MapStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a rendered artifact under the next name and return that name.
    pub fn insert(&mut self, html: String) -> String {
        let name = format!("map{}", self.counter);
        self.counter += 1;
        self.artifacts.push_back((name.clone(), html));
        while self.artifacts.len() > ARTIFACT_WINDOW {
            self.artifacts.pop_front();
        }
        name
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.artifacts
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, html)| html.as_str())
    }

    /// Name of the most recently stored artifact.
    pub fn latest(&self) -> Option<&str> {
        self.artifacts.back().map(|(n, _)| n.as_str())
    }
}
