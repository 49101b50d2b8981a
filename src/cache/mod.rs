//! Per-render aggregation caches
//!
//! A render pass owns one [`ColorCache`] and one [`PopupCache`]. Both start
//! empty, are populated leg by leg by the itinerary builder, and are read
//! back once per leg to materialize a marker. Departure points shared by
//! several explorers collapse into a single entry: colors fold pairwise into
//! a truncated average, popup content concatenates in voyage order.
//!
//! Neither cache outlives its render pass, so serving concurrent requests
//! needs no coordination here; each request builds its own instances.

use std::collections::HashMap;

use crate::models::{Color, Coordinate};

/// Maps a coordinate to the single color currently associated with it.
#[derive(Debug, Default)]
pub struct ColorCache {
    entries: HashMap<Coordinate, Color>,
}

impl ColorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a color contribution for `coordinate` and return the stored
    /// result.
    ///
    /// A fresh coordinate stores `color` unchanged. An occupied coordinate
    /// replaces its entry with the per-channel truncated average of the
    /// existing and incoming colors. The fold is pairwise: a third
    /// contribution averages against the already averaged value, never
    /// against either original.
    pub fn upsert(&mut self, coordinate: Coordinate, color: Color) -> Color {
        let merged = match self.entries.get(&coordinate) {
            Some(existing) => existing.average(color),
            None => color,
        };
        self.entries.insert(coordinate, merged);
        merged
    }

    /// Current color for `coordinate`, if any contribution has been made.
    ///
    /// Absence is explicit; callers must not read `None` as black.
    pub fn get(&self, coordinate: Coordinate) -> Option<Color> {
        self.entries.get(&coordinate).copied()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Maps a coordinate to the accumulated popup content contributed by each
/// voyage leg departing from it.
///
/// Content is an opaque, pre-rendered HTML fragment; the cache only
/// concatenates, it never inspects or separates fragments.
#[derive(Debug, Default)]
pub struct PopupCache {
    entries: HashMap<Coordinate, String>,
}

impl PopupCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `content` for `coordinate`, creating the entry if absent.
    /// Accumulation order is call order, i.e. voyage order.
    pub fn append(&mut self, coordinate: Coordinate, content: &str) {
        self.entries
            .entry(coordinate)
            .and_modify(|existing| existing.push_str(content))
            .or_insert_with(|| content.to_string());
    }

    /// Accumulated content for `coordinate`, if any leg has contributed.
    pub fn get(&self, coordinate: Coordinate) -> Option<&str> {
        self.entries.get(&coordinate).map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
