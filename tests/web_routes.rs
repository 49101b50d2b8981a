use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use explorateurs::{config::Config, content::ContentStore, web};

fn app() -> Router {
    let content = ContentStore::load().expect("embedded content must load");
    web::router(web::AppState::new(Config::default(), content))
}

async fn send(app: &Router, method: Method, uri: &str, form: Option<&str>) -> (StatusCode, String) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match form {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn index_renders_form_with_default_colors_and_embeds_artifact() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r##"name="cc_color" value="#3186cc""##));
    assert!(body.contains(r##"name="av_color" value="#ff2600""##));
    assert!(body.contains(r##"name="vdg_color" value="#00ff48""##));
    assert!(body.contains("/map/map0"));
}

#[tokio::test]
async fn submitting_colors_renders_a_fresh_merged_artifact() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/",
        Some("cc_color=%233186cc&av_color=%23ff2600&vdg_color=%2300ff48"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("/map/map0"));

    let (status, map) = send(&app, Method::GET, "/map/map0", None).await;
    assert_eq!(status, StatusCode::OK);
    // Cadiz: truncated average of Columbus #3186cc and Vespucci #ff2600
    assert!(map.contains("#985666"));
    // Lisbon: average of Vespucci #ff2600 and da Gama #00ff48
    assert!(map.contains("#7f9224"));
    // the fixed boundary ring around every marker
    assert!(map.contains("crimson"));
}

#[tokio::test]
async fn each_submission_renders_from_empty_caches() {
    let app = app();
    let form = "cc_color=%233186cc&av_color=%23ff2600&vdg_color=%2300ff48";
    send(&app, Method::POST, "/", Some(form)).await;
    send(&app, Method::POST, "/", Some(form)).await;

    let (_, first) = send(&app, Method::GET, "/map/map0", None).await;
    let (_, second) = send(&app, Method::GET, "/map/map1", None).await;
    // a leaked cache would keep folding colors; identical submissions must
    // yield identical artifacts
    assert_eq!(first, second);
}

#[tokio::test]
async fn malformed_color_is_rejected_back_onto_the_form() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/",
        Some("cc_color=blue&av_color=%23ff2600&vdg_color=%2300ff48"),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.contains("invalid color"));
    assert!(body.contains("Christopher Columbus"));
    // the visitor's input stays on the form
    assert!(body.contains(r#"name="cc_color" value="blue""#));
}

#[tokio::test]
async fn unknown_artifact_is_not_found() {
    let app = app();
    let (status, _) = send(&app, Method::GET, "/map/map99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn about_and_citations_pages_are_served() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/about", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Les Explorateurs"));

    let (status, body) = send(&app, Method::GET, "/citations", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<li>"));
}
