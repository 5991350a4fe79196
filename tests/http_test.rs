//! In-process handler tests for the routes that need no database: the
//! payment webhook stub and the landing page.

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use serde_json::{json, Value};

use rental_service::handlers;

#[actix_web::test]
async fn stripe_webhook_always_answers_not_configured() {
    let app = test::init_service(
        App::new().route(
            "/webhooks/stripe",
            web::post().to(handlers::webhooks::stripe_webhook),
        ),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/webhooks/stripe")
        .set_json(json!({ "type": "checkout.session.completed" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Stripe not configured" }));
}

#[actix_web::test]
async fn stripe_webhook_does_not_parse_the_payload() {
    let app = test::init_service(
        App::new().route(
            "/webhooks/stripe",
            web::post().to(handlers::webhooks::stripe_webhook),
        ),
    )
    .await;

    // Anything goes: the stub must answer 503 without inspecting the body.
    for payload in [&b""[..], b"not json at all", b"\xff\xfe\x00"] {
        let req = test::TestRequest::post()
            .uri("/webhooks/stripe")
            .set_payload(payload.to_vec())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}

#[actix_web::test]
async fn landing_page_links_to_login() {
    let app = test::init_service(
        App::new().route("/", web::get().to(handlers::pages::landing)),
    )
    .await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/html"));

    let body = test::read_body(resp).await;
    let html = std::str::from_utf8(&body).expect("landing page should be UTF-8");
    assert!(html.contains(r#"href="/login""#));
}
