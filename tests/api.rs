//! End-to-end tests: the router on an ephemeral port, upstream APIs on wiremock.

use content_forge::AppState;
use content_forge::api::routes::create_router;
use content_forge::config::Config;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn spawn_app(config: Config) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = create_router(AppState::new(config, reqwest::Client::new()));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn config_for(upstream: &MockServer) -> Config {
    Config {
        groq_api_base: upstream.uri(),
        gemini_api_base: upstream.uri(),
        serper_api_base: upstream.uri(),
        duckduckgo_url: format!("{}/html/", upstream.uri()),
        ..Config::default()
    }
}

fn chat_reply(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "choices": [{ "message": { "role": "assistant", "content": text } }]
    }))
}

async fn mount_empty_duckduckgo(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/html/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<html><body><div class=\"no-results\"></div></body></html>", "text/html"),
        )
        .mount(server)
        .await;
}

async fn post_generate(base: &str, body: Value) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("{}/api/generate", base))
        .json(&body)
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn generation_without_sources_uses_fallback_research() {
    let upstream = MockServer::start().await;
    mount_empty_duckduckgo(&upstream).await;
    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .and(header("authorization", "Bearer groq-key"))
        .respond_with(chat_reply("EVs are taking over the roads. #EV"))
        .expect(1)
        .mount(&upstream)
        .await;

    let base = spawn_app(config_for(&upstream)).await;
    let res = post_generate(
        &base,
        json!({
            "provider": "groq",
            "model_name": "llama-3.3-70b-versatile",
            "api_key": "groq-key",
            "platform": "twitter",
            "input_text": "electric cars"
        }),
    )
    .await;

    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "success");
    assert_eq!(body["summary"], "Based on available information about electric cars");
    let content = body["content"].as_str().unwrap();
    assert_eq!(content, "EVs are taking over the roads. #EV");
    assert!(!content.contains("Sources:"));
    upstream.verify().await;
}

#[tokio::test]
async fn generation_with_sources_appends_citations() {
    let upstream = MockServer::start().await;
    let page = format!(
        "<html><head><title>Heat pump boom</title>\
         <meta property=\"article:published_time\" content=\"2024-03-05T08:00:00Z\"></head>\
         <body><article><p>{}</p></article></body></html>",
        "Heat pump installations rose sharply across Europe last year. ".repeat(6)
    );
    Mock::given(method("GET"))
        .and(path("/articles/heat-pumps"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(page, "text/html"))
        .mount(&upstream)
        .await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .and(header("x-api-key", "serper-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "organic": [{
                "title": "Heat pump boom",
                "link": format!("{}/articles/heat-pumps", upstream.uri()),
                "snippet": "Installations rose"
            }]
        })))
        .mount(&upstream)
        .await;
    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .and(body_string_contains("Analyze and synthesize"))
        .respond_with(chat_reply("Installations rose sharply [1]."))
        .with_priority(1)
        .expect(1)
        .mount(&upstream)
        .await;
    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .and(body_string_contains("Installations rose sharply [1]."))
        .respond_with(chat_reply("Heat pumps are having a moment."))
        .expect(1)
        .mount(&upstream)
        .await;

    let base = spawn_app(config_for(&upstream)).await;
    let res = post_generate(
        &base,
        json!({
            "provider": "groq",
            "model_name": "llama-3.3-70b-versatile",
            "api_key": "groq-key",
            "platform": "linkedin",
            "input_text": "heat pumps",
            "serper_api_key": "serper-key"
        }),
    )
    .await;

    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["summary"], "Installations rose sharply [1].");
    assert_eq!(
        body["content"],
        format!(
            "Heat pumps are having a moment.\n\nSources:\n1. Heat pump boom - {}/articles/heat-pumps (2024-03-05)\n",
            upstream.uri()
        )
    );
    upstream.verify().await;
}

#[tokio::test]
async fn unknown_platform_is_rejected() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&upstream)
        .await;

    let base = spawn_app(config_for(&upstream)).await;
    let res = post_generate(
        &base,
        json!({
            "provider": "groq",
            "model_name": "llama-3.3-70b-versatile",
            "api_key": "k",
            "platform": "unknown_platform_xyz",
            "input_text": "electric cars"
        }),
    )
    .await;

    assert_eq!(res.status(), 422);
    let body: Value = res.json().await.unwrap();
    assert!(body["detail"].as_str().unwrap().contains("unknown_platform_xyz"));
    upstream.verify().await;
}

#[tokio::test]
async fn missing_field_is_rejected() {
    let upstream = MockServer::start().await;
    let base = spawn_app(config_for(&upstream)).await;

    let res = post_generate(&base, json!({ "provider": "groq", "platform": "twitter" })).await;

    assert_eq!(res.status(), 422);
    let body: Value = res.json().await.unwrap();
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn llm_failure_is_a_server_error() {
    let upstream = MockServer::start().await;
    mount_empty_duckduckgo(&upstream).await;
    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&upstream)
        .await;

    let base = spawn_app(config_for(&upstream)).await;
    let res = post_generate(
        &base,
        json!({
            "provider": "groq",
            "model_name": "llama-3.3-70b-versatile",
            "api_key": "bad",
            "platform": "twitter",
            "input_text": "rust"
        }),
    )
    .await;

    assert_eq!(res.status(), 500);
    let body: Value = res.json().await.unwrap();
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.contains("401"));
    assert!(detail.contains("invalid api key"));
}

#[tokio::test]
async fn providers_are_listed() {
    let upstream = MockServer::start().await;
    let base = spawn_app(config_for(&upstream)).await;

    let body: Value = reqwest::get(format!("{}/api/providers", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let providers = body["providers"].as_array().unwrap();
    let names: Vec<&str> = providers.iter().map(|p| p["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["gemini", "groq"]);
    assert!(providers[1]["models"]
        .as_array()
        .unwrap()
        .contains(&json!("llama-3.3-70b-versatile")));
}

#[tokio::test]
async fn platforms_are_listed_with_instructions() {
    let upstream = MockServer::start().await;
    let base = spawn_app(config_for(&upstream)).await;

    let body: Value = reqwest::get(format!("{}/api/platforms", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let platforms = body["platforms"].as_array().unwrap();
    assert_eq!(platforms.len(), 15);
    for platform in platforms {
        assert!(!platform["instructions"].as_str().unwrap().is_empty());
    }
    let names: Vec<&str> = platforms.iter().map(|p| p["name"].as_str().unwrap()).collect();
    assert!(names.contains(&"twitter"));
    assert!(names.contains(&"email_marketing"));
}

#[tokio::test]
async fn concurrent_generations_do_not_share_sources() {
    let upstream = MockServer::start().await;
    for (route, title, sentence) in [
        ("/alpha", "Alpha", "Alpha topic details and facts for readers. "),
        ("/beta", "Beta", "Beta topic details and facts for readers. "),
    ] {
        let page = format!(
            "<html><head><title>{}</title></head><body><article><p>{}</p></article></body></html>",
            title,
            sentence.repeat(8)
        );
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_raw(page, "text/html"))
            .mount(&upstream)
            .await;
    }
    Mock::given(method("POST"))
        .and(path("/search"))
        .and(header("x-api-key", "key-alpha"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "organic": [{ "title": "Alpha", "link": format!("{}/alpha", upstream.uri()) }]
        })))
        .mount(&upstream)
        .await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .and(header("x-api-key", "key-beta"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "organic": [
                { "title": "Beta", "link": format!("{}/beta", upstream.uri()) },
                { "title": "Broken", "link": "http://127.0.0.1:9/beta-broken" }
            ]
        })))
        .mount(&upstream)
        .await;
    for (needle, reply) in [
        ("Alpha topic details", "Alpha synthesis [1]."),
        ("Beta topic details", "Beta synthesis [1]."),
    ] {
        Mock::given(method("POST"))
            .and(path("/openai/v1/chat/completions"))
            .and(body_string_contains(needle))
            .respond_with(chat_reply(reply))
            .with_priority(1)
            .expect(1)
            .mount(&upstream)
            .await;
    }
    for (needle, reply) in [
        ("Alpha synthesis [1].", "Alpha post"),
        ("Beta synthesis [1].", "Beta post"),
    ] {
        Mock::given(method("POST"))
            .and(path("/openai/v1/chat/completions"))
            .and(body_string_contains(needle))
            .respond_with(chat_reply(reply))
            .expect(1)
            .mount(&upstream)
            .await;
    }

    let base = spawn_app(config_for(&upstream)).await;
    let request = |topic: &str, key: &str| {
        json!({
            "provider": "groq",
            "model_name": "llama-3.3-70b-versatile",
            "api_key": "groq-key",
            "platform": "website",
            "input_text": topic,
            "serper_api_key": key
        })
    };

    let (alpha, beta) = tokio::join!(
        post_generate(&base, request("alpha", "key-alpha")),
        post_generate(&base, request("beta", "key-beta")),
    );

    assert_eq!(alpha.status(), 200);
    assert_eq!(beta.status(), 200);
    let alpha: Value = alpha.json().await.unwrap();
    let beta: Value = beta.json().await.unwrap();

    assert_eq!(alpha["summary"], "Alpha synthesis [1].");
    assert_eq!(
        alpha["content"],
        format!("Alpha post\n\nSources:\n1. Alpha - {}/alpha\n", upstream.uri())
    );
    assert_eq!(beta["summary"], "Beta synthesis [1].");
    assert_eq!(
        beta["content"],
        format!("Beta post\n\nSources:\n1. Beta - {}/beta\n", upstream.uri())
    );
    upstream.verify().await;
}
