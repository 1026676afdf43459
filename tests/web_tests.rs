mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use common::{test_user, wait_until, FakeAuth};
use freshbay::{
    geo::GeolocationOptions,
    handlers::{self, AppState},
    models::Role,
    signup::FormRegistry,
};
use std::{sync::Arc, time::Duration};
use tokio::sync::Notify;
use tower::ServiceExt;
use tower_sessions::{MemoryStore, SessionManagerLayer};

fn app(auth: Arc<FakeAuth>) -> Router {
    let state = Arc::new(AppState {
        auth,
        forms: FormRegistry::new(Duration::from_secs(60)),
        geolocation: GeolocationOptions::default(),
    });

    handlers::router(state).layer(SessionManagerLayer::new(MemoryStore::default()))
}

async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

/// The `name=value` part of the session cookie set by a response
fn session_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn post_form(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

const DONOR_FORM: &str = "form_token=&first_name=Jane&last_name=Doe&role=donor\
    &email=jane%40example.com&password=hunter22\
    &food_bank_title=&food_bank_address=&food_bank_website=&food_bank_description=\
    &latitude=&longitude=";

async fn sign_in(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(post_form(
            "/login",
            "email=jane%40example.com&password=correct-horse",
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");
    session_cookie(&response).expect("login sets a session cookie")
}

#[tokio::test]
async fn test_index_redirects_to_signup() {
    let app = app(Arc::new(FakeAuth::accepting()));

    let response = app.oneshot(get("/", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/signup");
}

#[tokio::test]
async fn test_signup_page_renders_form() {
    let app = app(Arc::new(FakeAuth::accepting()));

    let response = app.oneshot(get("/signup", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains("Create Your Account"));
    assert!(body.contains(r#"name="form_token""#));
    assert!(body.contains(">Reciever<"));
    assert!(body.contains("enableHighAccuracy: true, timeout: 5000"));
    assert_eq!(body.matches("fb-fade-in").count(), 35);
    assert!(!body.contains("fb-popup open"));
}

#[tokio::test]
async fn test_signup_page_redirects_signed_in_user() {
    let auth = Arc::new(FakeAuth::accepting().with_user(test_user()));
    let app = app(auth.clone());
    let cookie = sign_in(&app).await;

    let response = app.oneshot(get("/signup", Some(&cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");
    assert_eq!(auth.current_user_calls(), 1);
}

#[tokio::test]
async fn test_receiver_without_food_bank_reopens_form_with_popup() {
    let auth = Arc::new(FakeAuth::accepting());
    let app = app(auth.clone());

    let body = "form_token=&first_name=Sam&last_name=Lee&role=receiver\
        &email=sam%40example.com&password=hunter22&food_bank_title=";
    let response = app.oneshot(post_form("/signup", body, None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("fb-popup open"));
    assert!(html.contains(r#"value="Sam""#));
    assert_eq!(auth.sign_up_count(), 0);
}

#[tokio::test]
async fn test_donor_signup_redirects_to_login_with_notice() {
    let auth = Arc::new(FakeAuth::accepting());
    let app = app(auth.clone());

    let response = app
        .clone()
        .oneshot(post_form("/signup", DONOR_FORM, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let sent = auth.sign_ups();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].email, "jane@example.com");
    assert_eq!(sent[0].data.role, Role::Donor);
    assert!(sent[0].data.location.is_none());

    let cookie = session_cookie(&response).expect("notice stored in session");
    let login = app
        .clone()
        .oneshot(get("/login", Some(&cookie)))
        .await
        .unwrap();
    let html = body_text(login).await;
    assert!(html.contains("Check your email for the confirmation link."));

    // The notice is shown once
    let again = app.oneshot(get("/login", Some(&cookie))).await.unwrap();
    assert!(!body_text(again)
        .await
        .contains("Check your email for the confirmation link."));
}

#[tokio::test]
async fn test_posted_coordinates_become_location_string() {
    let auth = Arc::new(FakeAuth::accepting());
    let app = app(auth.clone());

    let body = DONOR_FORM.replace("latitude=&longitude=", "latitude=44.98&longitude=-93.27");
    let response = app.oneshot(post_form("/signup", &body, None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    assert_eq!(
        auth.sign_ups()[0].data.location.as_deref(),
        Some("44.98, -93.27")
    );
}

#[tokio::test]
async fn test_provider_error_is_rendered_without_echoing_password() {
    let auth = Arc::new(FakeAuth::rejecting("Invalid email"));
    let app = app(auth.clone());

    let response = app
        .oneshot(post_form("/signup", DONOR_FORM, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("Invalid email"));
    assert!(html.contains(r#"value="jane@example.com""#));
    assert!(!html.contains("hunter22"));
    assert_eq!(auth.sign_up_count(), 1);
}

#[tokio::test]
async fn test_reposting_same_form_while_in_flight_is_rejected() {
    let gate = Arc::new(Notify::new());
    let auth = Arc::new(FakeAuth::accepting().held(gate.clone()));
    let app = app(auth.clone());

    let page = app.clone().oneshot(get("/signup", None)).await.unwrap();
    let html = body_text(page).await;
    let token = html
        .split(r#"name="form_token" value=""#)
        .nth(1)
        .and_then(|rest| rest.split('"').next())
        .expect("form token rendered")
        .to_string();

    let body = DONOR_FORM.replace("form_token=", &format!("form_token={}", token));

    let first = tokio::spawn({
        let app = app.clone();
        let body = body.clone();
        async move { app.oneshot(post_form("/signup", &body, None)).await.unwrap() }
    });

    let counter = auth.clone();
    wait_until(|| counter.sign_up_count() == 1).await;

    let second = app
        .clone()
        .oneshot(post_form("/signup", &body, None))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);
    assert!(body_text(second)
        .await
        .contains(r#"id="signup-submit" disabled"#));

    gate.notify_one();
    let first = first.await.unwrap();
    assert_eq!(first.status(), StatusCode::SEE_OTHER);
    assert_eq!(auth.sign_up_count(), 1);
}

#[tokio::test]
async fn test_dashboard_requires_session() {
    let app = app(Arc::new(FakeAuth::accepting()));

    let response = app.oneshot(get("/dashboard", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_dashboard_shows_current_user() {
    let app = app(Arc::new(FakeAuth::accepting().with_user(test_user())));
    let cookie = sign_in(&app).await;

    let response = app.oneshot(get("/dashboard", Some(&cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Welcome, Jane Doe"));
}

#[tokio::test]
async fn test_login_failure_redirects_with_message() {
    let app = app(Arc::new(FakeAuth::accepting().with_user(test_user())));

    let response = app
        .clone()
        .oneshot(post_form(
            "/login",
            "email=jane%40example.com&password=wrong",
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        "/login?error=Invalid%20login%20credentials"
    );

    let page = app
        .oneshot(get("/login?error=Invalid%20login%20credentials", None))
        .await
        .unwrap();
    assert!(body_text(page).await.contains("Invalid login credentials"));
}

#[tokio::test]
async fn test_logout_clears_session() {
    let auth = Arc::new(FakeAuth::accepting().with_user(test_user()));
    let app = app(auth.clone());
    let cookie = sign_in(&app).await;

    let response = app
        .clone()
        .oneshot(post_form("/logout", "", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    assert_eq!(auth.sign_outs(), 1);

    let dashboard = app.oneshot(get("/dashboard", Some(&cookie))).await.unwrap();
    assert_eq!(location(&dashboard), "/login");
}

#[tokio::test]
async fn test_signed_in_user_posting_stale_form_goes_to_dashboard() {
    let auth = Arc::new(FakeAuth::accepting().with_user(test_user()));
    let app = app(auth.clone());
    let cookie = sign_in(&app).await;

    let response = app
        .oneshot(post_form("/signup", DONOR_FORM, Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");
    assert_eq!(auth.current_user_calls(), 1);
    assert_eq!(auth.sign_up_count(), 0);
}

#[tokio::test]
async fn test_signup_script_bounds_the_permission_prompt() {
    let app = app(Arc::new(FakeAuth::accepting()));

    let response = app.oneshot(get("/signup", None)).await.unwrap();
    let body = body_text(response).await;
    assert!(body.contains("setTimeout(function() { decided = true; }, 5000)"));
    assert!(body.contains("if (decided) return;"));
}
