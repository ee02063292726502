use axum::http::StatusCode;

use crate::config::Config;
use crate::tests::common::{body_json, get, location, router_with, send, set_cookie, test_router};

#[tokio::test]
async fn test_end_to_end_negotiated_redirect() {
    let response = send(
        test_router(),
        get("/settings", &[("accept-language", "de-DE,de;q=0.9,en;q=0.5")]),
    )
    .await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(response.headers()), Some("/de/settings"));
    assert!(set_cookie(response.headers()).is_none(), "Redirects must not set the cookie");
}

#[tokio::test]
async fn test_prefixed_paths_pass_through_for_every_locale() {
    for tag in ["en", "de", "fr"] {
        let uri = format!("/{}/anything", tag);
        let response = send(test_router(), get(&uri, &[("accept-language", "ja")])).await;

        assert_eq!(response.status(), StatusCode::OK, "{} should pass through", uri);
        let body = body_json(response).await;
        assert_eq!(body["language_tag"], tag);
        assert_eq!(body["locale"], tag);
        assert_eq!(body["path"], uri);
    }
}

#[tokio::test]
async fn test_cookie_takes_precedence_over_header() {
    let response = send(
        test_router(),
        get("/settings", &[("accept-language", "fr"), ("cookie", "theme=dark; language=de")]),
    )
    .await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(response.headers()), Some("/de/settings"));
}

#[tokio::test]
async fn test_unmatched_header_falls_back_to_default() {
    let response =
        send(test_router(), get("/settings", &[("accept-language", "ja, ko;q=0.8")])).await;

    assert_eq!(location(response.headers()), Some("/en/settings"));
}

#[tokio::test]
async fn test_refused_language_is_not_negotiated() {
    let response = send(test_router(), get("/settings", &[("accept-language", "de;q=0, ja")])).await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(response.headers()), Some("/en/settings"));
}

#[tokio::test]
async fn test_missing_header_falls_back_to_default() {
    let response = send(test_router(), get("/settings", &[])).await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(response.headers()), Some("/en/settings"));
}

#[tokio::test]
async fn test_root_path_redirects() {
    let response = send(test_router(), get("/", &[("accept-language", "fr")])).await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(response.headers()), Some("/fr/"));
}

#[tokio::test]
async fn test_pass_through_sets_header_and_cookie() {
    let response = send(test_router(), get("/en/dashboard?x=1", &[])).await;

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = set_cookie(response.headers()).expect("Missing Set-Cookie").to_string();
    assert!(cookie.starts_with("language=en"), "unexpected cookie: {}", cookie);
    assert!(cookie.contains("Max-Age=31536000"), "unexpected cookie: {}", cookie);

    let body = body_json(response).await;
    assert_eq!(body["language_tag"], "en");
    assert_eq!(body["path"], "/en/dashboard");
    assert_eq!(body["query"], "x=1");
    assert_eq!(body["default_locale"], "en");
}

#[tokio::test]
async fn test_redirect_keeps_query_string() {
    let response =
        send(test_router(), get("/search?q=rust&page=2", &[("accept-language", "de")])).await;

    assert_eq!(location(response.headers()), Some("/de/search?q=rust&page=2"));
}

#[tokio::test]
async fn test_following_redirect_reaches_pass_through() {
    let first = send(test_router(), get("/profile", &[("accept-language", "fr-CA")])).await;
    let target = location(first.headers()).expect("Missing Location").to_string();
    assert_eq!(target, "/fr/profile");

    let second = send(test_router(), get(&target, &[("accept-language", "fr-CA")])).await;
    assert_eq!(second.status(), StatusCode::OK);
    assert!(set_cookie(second.headers()).is_some_and(|c| c.starts_with("language=fr")));
}

#[tokio::test]
async fn test_locale_prefix_is_case_sensitive() {
    let response = send(test_router(), get("/DE/settings", &[("accept-language", "de")])).await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(response.headers()), Some("/de/DE/settings"));
}

#[tokio::test]
async fn test_unsupported_cookie_is_ignored_by_default() {
    let response = send(
        test_router(),
        get("/settings", &[("accept-language", "fr"), ("cookie", "language=xx")]),
    )
    .await;

    assert_eq!(location(response.headers()), Some("/fr/settings"));
}

#[tokio::test]
async fn test_unsupported_cookie_is_used_when_trusted() {
    let mut config = Config::default();
    config.locale.trust_cookie = true;

    let response = send(
        router_with(config),
        get("/settings", &[("accept-language", "fr"), ("cookie", "language=xx")]),
    )
    .await;

    assert_eq!(location(response.headers()), Some("/xx/settings"));
}

#[tokio::test]
async fn test_excluded_paths_bypass_locale_handling() {
    let response = send(test_router(), get("/api/health", &[("accept-language", "de")])).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookie(response.headers()).is_none());
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");

    let response = send(test_router(), get("/favicon.ico", &[])).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["language_tag"].is_null());
    assert!(body["locale"].is_null());
}

#[tokio::test]
async fn test_permanent_redirect_and_custom_names() {
    let mut config = Config::default();
    config.locale.permanent_redirect = true;
    config.locale.header = "X-Locale".to_string();
    config.cookie.name = "lang".to_string();
    config.cookie.max_age = 86_400;

    let response =
        send(router_with(config.clone()), get("/about", &[("cookie", "lang=fr")])).await;
    assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
    assert_eq!(location(response.headers()), Some("/fr/about"));

    let response = send(router_with(config), get("/fr/about", &[])).await;
    let cookie = set_cookie(response.headers()).expect("Missing Set-Cookie").to_string();
    assert!(cookie.starts_with("lang=fr"));
    assert!(cookie.contains("Max-Age=86400"));
    let body = body_json(response).await;
    assert_eq!(body["language_tag"], "fr");
}

#[tokio::test]
async fn test_regional_locales() {
    let mut config = Config::default();
    config.locale.supported = vec!["en-US".to_string(), "pt-BR".to_string()];
    config.locale.default = "en-US".to_string();

    let response = send(router_with(config), get("/", &[("accept-language", "pt;q=0.9, es")])).await;
    assert_eq!(location(response.headers()), Some("/pt-BR/"));
}

#[tokio::test]
async fn test_client_language_tag_header_is_overwritten() {
    let response =
        send(test_router(), get("/en/x", &[("x-language-tag", "de"), ("accept-language", "de")]))
            .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["language_tag"], "en");
    assert_eq!(body["locale"], "en");
}
