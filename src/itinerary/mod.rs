//! The static voyage table and the render pass that drives the aggregators
//!
//! Each explorer has a fixed, ordered list of departure points. One render
//! pass walks that table leg by leg with a fresh pair of caches: the leg's
//! color contribution goes into the [`ColorCache`], its popup fragment(s)
//! into the [`PopupCache`], and the marker for the leg is materialized from
//! whatever both caches hold at that moment. A departure point already
//! visited by an earlier explorer therefore yields a merged marker (averaged
//! color, concatenated popup) instead of a fresh one.

use crate::cache::{ColorCache, PopupCache};
use crate::content::ContentStore;
use crate::errors::AppError;
use crate::models::{Color, Coordinate, Explorer, Marker};

/// Radius of the fixed boundary ring drawn behind every marker.
pub const INNER_RADIUS: u32 = 25;
/// Radius of the filled, colored, popup-bearing circle.
pub const OUTER_RADIUS: u32 = 50;
/// Outline color of the boundary ring.
pub const RING_COLOR: &str = "crimson";

pub const PALOS: Coordinate = Coordinate::new(37.2289, -6.8954);
pub const CADIZ: Coordinate = Coordinate::new(36.5271, -6.2886);
pub const SANLUCAR: Coordinate = Coordinate::new(36.7726, -6.3530);
pub const LISBON: Coordinate = Coordinate::new(38.7223, -9.1393);

/// One departure point of one explorer.
///
/// A leg can carry more than one content fragment (Columbus departed Cadiz
/// on both his second and fourth voyages) but still produces a single
/// marker.
#[derive(Debug, Clone, Copy)]
pub struct VoyageLeg {
    pub explorer: Explorer,
    pub place: &'static str,
    pub coordinate: Coordinate,
    pub content_keys: &'static [&'static str],
}

/// The full itinerary, in voyage order: Columbus, then Vespucci, then
/// da Gama. Adding a fourth explorer is a matter of appending legs here;
/// the merge rules in the caches apply unchanged.
pub const VOYAGES: [VoyageLeg; 6] = [
    VoyageLeg {
        explorer: Explorer::Columbus,
        place: "Palos de la Frontera",
        coordinate: PALOS,
        content_keys: &["palos_cc"],
    },
    VoyageLeg {
        explorer: Explorer::Columbus,
        place: "Cadiz",
        coordinate: CADIZ,
        content_keys: &["cadiz_cc_1", "cadiz_cc_2"],
    },
    VoyageLeg {
        explorer: Explorer::Columbus,
        place: "Sanlucar de Barrameda",
        coordinate: SANLUCAR,
        content_keys: &["sanlucar_cc"],
    },
    VoyageLeg {
        explorer: Explorer::Vespucci,
        place: "Cadiz",
        coordinate: CADIZ,
        content_keys: &["cadiz_av"],
    },
    VoyageLeg {
        explorer: Explorer::Vespucci,
        place: "Lisbon",
        coordinate: LISBON,
        content_keys: &["lisbon_av"],
    },
    VoyageLeg {
        explorer: Explorer::DaGama,
        place: "Lisbon",
        coordinate: LISBON,
        content_keys: &["lisbon_vdg"],
    },
];

/// The visitor's color choice for each explorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub columbus: Color,
    pub vespucci: Color,
    pub da_gama: Color,
}

impl Palette {
    pub fn color_for(&self, explorer: Explorer) -> Color {
        match explorer {
            Explorer::Columbus => self.columbus,
            Explorer::Vespucci => self.vespucci,
            Explorer::DaGama => self.da_gama,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            columbus: Explorer::Columbus.default_color(),
            vespucci: Explorer::Vespucci.default_color(),
            da_gama: Explorer::DaGama.default_color(),
        }
    }
}

/// Run one full render pass over the voyage table.
///
/// Constructs fresh caches, so nothing from a previous submission can leak
/// into this pass. Returns one marker per leg, in leg order.
pub fn build_markers(palette: &Palette, content: &ContentStore) -> Result<Vec<Marker>, AppError> {
    let mut colors = ColorCache::new();
    let mut popups = PopupCache::new();
    let mut markers = Vec::with_capacity(VOYAGES.len());

    for leg in &VOYAGES {
        let color = colors.upsert(leg.coordinate, palette.color_for(leg.explorer));
        for key in leg.content_keys {
            popups.append(leg.coordinate, content.popup_html(key)?);
        }
        let popup_html = popups
            .get(leg.coordinate)
            .ok_or_else(|| {
                AppError::internal(format!("no popup content accumulated for {}", leg.place))
            })?
            .to_string();
        tracing::debug!(
            explorer = leg.explorer.display_name(),
            place = leg.place,
            color = %color,
            "marker materialized"
        );
        markers.push(Marker {
            place: leg.place,
            coordinate: leg.coordinate,
            color,
            popup_html,
        });
    }

    Ok(markers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content() -> ContentStore {
        ContentStore::load().expect("embedded content must load")
    }

    #[test]
    fn default_pass_emits_one_marker_per_leg_in_order() {
        let markers = build_markers(&Palette::default(), &content()).unwrap();
        assert_eq!(markers.len(), VOYAGES.len());
        let places: Vec<_> = markers.iter().map(|m| m.place).collect();
        assert_eq!(
            places,
            [
                "Palos de la Frontera",
                "Cadiz",
                "Sanlucar de Barrameda",
                "Cadiz",
                "Lisbon",
                "Lisbon"
            ]
        );
    }

    #[test]
    fn cadiz_marker_merges_columbus_and_vespucci_colors() {
        let markers = build_markers(&Palette::default(), &content()).unwrap();
        // Columbus's Cadiz marker still carries his own color; Vespucci's
        // later Cadiz marker carries the average of both.
        assert_eq!(markers[1].color.to_string(), "#3186cc");
        assert_eq!(markers[3].color.to_string(), "#985666");
    }

    #[test]
    fn lisbon_popup_concatenates_in_voyage_order() {
        let store = content();
        let markers = build_markers(&Palette::default(), &store).unwrap();
        let lisbon = &markers[5];
        let av = store.popup_html("lisbon_av").unwrap();
        let vdg = store.popup_html("lisbon_vdg").unwrap();
        assert_eq!(lisbon.popup_html, format!("{av}{vdg}"));
        // da Gama's Lisbon color is the average of his and Vespucci's
        assert_eq!(lisbon.color.to_string(), "#7f9224");
    }

    #[test]
    fn cadiz_popup_carries_both_columbus_fragments_before_vespucci() {
        let store = content();
        let markers = build_markers(&Palette::default(), &store).unwrap();
        let cc1 = store.popup_html("cadiz_cc_1").unwrap();
        let cc2 = store.popup_html("cadiz_cc_2").unwrap();
        let av = store.popup_html("cadiz_av").unwrap();
        assert_eq!(markers[3].popup_html, format!("{cc1}{cc2}{av}"));
    }

    #[test]
    fn consecutive_passes_start_from_empty_caches() {
        let store = content();
        let first = build_markers(&Palette::default(), &store).unwrap();
        let second = build_markers(&Palette::default(), &store).unwrap();
        // identical palettes yield identical markers; a leaked cache would
        // keep averaging colors and re-appending content
        assert_eq!(first[3].color, second[3].color);
        assert_eq!(first[5].popup_html, second[5].popup_html);
    }
}
