//! Explorateurs: an interactive map of age-of-discovery departure points
//!
//! Three explorers — Christopher Columbus, Amerigo Vespucci and Vasco da
//! Gama — each have a fixed itinerary of departure points. The service
//! renders those points as colored Leaflet markers with popup stories and
//! lets a visitor pick a color per explorer. Departure points shared by
//! several explorers collapse into a single marker whose color is the
//! pairwise truncated average of the contributions and whose popup is their
//! concatenation in voyage order; see [`cache`] for the merge rules and
//! [`itinerary`] for the pass that applies them.

pub mod cache;
pub mod config;
pub mod content;
pub mod errors;
pub mod itinerary;
pub mod models;
pub mod render;
pub mod web;

pub use errors::AppError;
