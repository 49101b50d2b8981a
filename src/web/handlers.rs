//! HTTP request handlers
//!
//! The index handler runs a full render pass per request: validated colors
//! feed the itinerary builder, the resulting Leaflet artifact is stored
//! under a fresh name, and the page embeds exactly that artifact. Invalid
//! color input is a user error surfaced back onto the form, never a server
//! fault.

use askama::Template;
use axum::{
    extract::{Form, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;

use crate::errors::{AppError, WebError};
use crate::itinerary::{build_markers, Palette};
use crate::models::{Color, Explorer};
use crate::render::render_map;
use crate::web::AppState;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation { .. } | AppError::Web(WebError::InvalidRequest { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::NotFound { .. } | AppError::Web(WebError::UnknownArtifact { .. }) => {
                StatusCode::NOT_FOUND
            }
            _ => {
                tracing::error!(error = %self, "request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, self.to_string()).into_response()
    }
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    cc_color: String,
    av_color: String,
    vdg_color: String,
    map_name: String,
    error: Option<String>,
}

#[derive(Template)]
#[template(path = "about.html")]
struct AboutTemplate<'a> {
    about: &'a str,
}

#[derive(Template)]
#[template(path = "citations.html")]
struct CitationsTemplate<'a> {
    citations: &'a [String],
}

/// Three color values, one per explorer, as submitted by the form.
#[derive(Debug, Deserialize)]
pub struct ColorForm {
    pub cc_color: String,
    pub av_color: String,
    pub vdg_color: String,
}

impl ColorForm {
    /// Validate all three fields into a palette. Any malformed `#rrggbb`
    /// value is a validation error naming the explorer it belongs to.
    fn into_palette(self) -> Result<Palette, AppError> {
        let parse = |value: &str, explorer: Explorer| -> Result<Color, AppError> {
            value.trim().parse().map_err(|_| {
                AppError::validation(format!(
                    "invalid color {value:?} for {}: expected '#' followed by six hex digits",
                    explorer.display_name()
                ))
            })
        };
        Ok(Palette {
            columbus: parse(&self.cc_color, Explorer::Columbus)?,
            vespucci: parse(&self.av_color, Explorer::Vespucci)?,
            da_gama: parse(&self.vdg_color, Explorer::DaGama)?,
        })
    }
}

/// Serve the map with each explorer's default color
pub async fn index(State(state): State<AppState>) -> Result<Response, AppError> {
    let palette = Palette::default();
    let map_name = render_and_store(&state, &palette)?;
    respond_with_form(&palette, map_name, None, StatusCode::OK)
}

/// Handle a color submission and re-render the map
pub async fn submit_colors(
    State(state): State<AppState>,
    Form(form): Form<ColorForm>,
) -> Result<Response, AppError> {
    let submitted = (
        form.cc_color.clone(),
        form.av_color.clone(),
        form.vdg_color.clone(),
    );
    match form.into_palette() {
        Ok(palette) => {
            let map_name = render_and_store(&state, &palette)?;
            tracing::info!(map = %map_name, "map re-rendered from submitted colors");
            respond_with_form(&palette, map_name, None, StatusCode::OK)
        }
        Err(AppError::Validation { message }) => {
            tracing::debug!(%message, "rejected color submission");
            // keep the visitor's input on the form; fall back to the last
            // rendered artifact (or a default render) for the embedded map
            let map_name = match latest_artifact(&state)? {
                Some(name) => name,
                None => render_and_store(&state, &Palette::default())?,
            };
            let page = IndexTemplate {
                cc_color: submitted.0,
                av_color: submitted.1,
                vdg_color: submitted.2,
                map_name,
                error: Some(message),
            }
            .render()?;
            Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(page)).into_response())
        }
        Err(other) => Err(other),
    }
}

/// Serve a stored map artifact by name
pub async fn map_artifact(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, AppError> {
    let maps = state
        .maps
        .read()
        .map_err(|_| AppError::internal("map store lock poisoned"))?;
    match maps.get(&name) {
        Some(html) => Ok(Html(html.to_string()).into_response()),
        None => Err(AppError::not_found("map artifact", name)),
    }
}

/// Serve the about page
pub async fn about(State(state): State<AppState>) -> Result<Response, AppError> {
    let page = AboutTemplate {
        about: state.content.about(),
    }
    .render()?;
    Ok(Html(page).into_response())
}

/// Serve the citations page
pub async fn citations(State(state): State<AppState>) -> Result<Response, AppError> {
    let page = CitationsTemplate {
        citations: state.content.citations(),
    }
    .render()?;
    Ok(Html(page).into_response())
}

/// Run one render pass with fresh aggregators and store the artifact.
fn render_and_store(state: &AppState, palette: &Palette) -> Result<String, AppError> {
    let markers = build_markers(palette, &state.content)?;
    let html = render_map(&state.config.map, &markers)?;
    let mut maps = state
        .maps
        .write()
        .map_err(|_| AppError::internal("map store lock poisoned"))?;
    Ok(maps.insert(html))
}

fn latest_artifact(state: &AppState) -> Result<Option<String>, AppError> {
    let maps = state
        .maps
        .read()
        .map_err(|_| AppError::internal("map store lock poisoned"))?;
    Ok(maps.latest().map(str::to_string))
}

fn respond_with_form(
    palette: &Palette,
    map_name: String,
    error: Option<String>,
    status: StatusCode,
) -> Result<Response, AppError> {
    let page = IndexTemplate {
        cc_color: palette.columbus.to_string(),
        av_color: palette.vespucci.to_string(),
        vdg_color: palette.da_gama.to_string(),
        map_name,
        error,
    }
    .render()?;
    Ok((status, Html(page)).into_response())
}
