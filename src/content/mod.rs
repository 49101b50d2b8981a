//! Embedded popup/page content, resolved once at startup
//!
//! All voyage texts, explorer portraits and the about/citations pages are
//! embedded in the binary with `rust-embed` and pre-rendered into popup
//! HTML fragments when the process starts. A missing or undecodable asset
//! is a fatal configuration error; the render path never runs with partial
//! content.

use std::collections::HashMap;

use askama::Template;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use rust_embed::RustEmbed;

use crate::errors::AppError;
use crate::itinerary::VOYAGES;
use crate::models::Explorer;

/// Embedded static content (voyage texts, portraits, page texts)
#[derive(RustEmbed)]
#[folder = "content/"]
#[prefix = "content/"]
struct ContentAssets;

/// Popup fragment: one explorer's portrait and departure story.
///
/// The fragment's internal structure is owned here and by the template; the
/// popup cache treats the rendered string as opaque.
#[derive(Template)]
#[template(path = "popup.html")]
struct PopupTemplate<'a> {
    explorer: &'a str,
    portrait_uri: &'a str,
    text: &'a str,
}

/// Startup-loaded content store.
///
/// Popup fragments are rendered eagerly so a render pass is pure in-memory
/// work and every content problem surfaces before the listener binds.
pub struct ContentStore {
    popups: HashMap<&'static str, String>,
    about: String,
    citations: Vec<String>,
}

impl ContentStore {
    pub fn load() -> Result<Self, AppError> {
        let mut portraits: HashMap<Explorer, String> = HashMap::new();
        for explorer in Explorer::ALL {
            portraits.insert(explorer, portrait_data_uri(explorer)?);
        }

        let mut popups = HashMap::new();
        for leg in &VOYAGES {
            for key in leg.content_keys {
                let text = embedded_text(&format!("content/text/{key}.txt"))?;
                let fragment = PopupTemplate {
                    explorer: leg.explorer.display_name(),
                    portrait_uri: &portraits[&leg.explorer],
                    text: text.trim_end(),
                }
                .render()?;
                popups.insert(*key, fragment);
            }
        }
        tracing::info!(fragments = popups.len(), "popup content pre-rendered");

        let about = embedded_text("content/text/about.txt")?;
        let citations = embedded_text("content/text/citations.txt")?
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            popups,
            about,
            citations,
        })
    }

    /// Pre-rendered popup fragment for a voyage-table content key.
    pub fn popup_html(&self, key: &str) -> Result<&str, AppError> {
        self.popups
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| AppError::configuration(format!("no popup content for key {key:?}")))
    }

    pub fn about(&self) -> &str {
        &self.about
    }

    pub fn citations(&self) -> &[String] {
        &self.citations
    }
}

fn embedded_text(path: &str) -> Result<String, AppError> {
    let file = ContentAssets::get(path)
        .ok_or_else(|| AppError::configuration(format!("missing embedded asset: {path}")))?;
    String::from_utf8(file.data.into_owned())
        .map_err(|e| AppError::configuration(format!("asset {path} is not UTF-8: {e}")))
}

/// Inline an explorer's portrait as a base64 data URI, the same shape the
/// popup markup expects from any image source.
fn portrait_data_uri(explorer: Explorer) -> Result<String, AppError> {
    let path = explorer.portrait_asset();
    let file = ContentAssets::get(path)
        .ok_or_else(|| AppError::configuration(format!("missing portrait: {path}")))?;
    Ok(format!(
        "data:image/svg+xml;base64,{}",
        BASE64.encode(file.data.as_ref())
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_every_voyage_fragment() {
        let store = ContentStore::load().unwrap();
        for leg in &VOYAGES {
            for key in leg.content_keys {
                let html = store.popup_html(key).unwrap();
                assert!(html.contains("data:image/svg+xml;base64,"), "{key}");
                assert!(html.contains(leg.explorer.display_name()), "{key}");
            }
        }
    }

    #[test]
    fn unknown_key_is_a_configuration_error() {
        let store = ContentStore::load().unwrap();
        assert!(matches!(
            store.popup_html("atlantis_pb"),
            Err(AppError::Configuration { .. })
        ));
    }

    #[test]
    fn about_and_citations_are_present() {
        let store = ContentStore::load().unwrap();
        assert!(!store.about().is_empty());
        assert!(!store.citations().is_empty());
    }
}
