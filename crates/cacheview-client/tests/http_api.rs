use cacheview_client::HttpApi;
use cacheview_core::{CacheApi, Origin, Payload, RequestError};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_operation_encodes_param() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/operation"))
        .and(query_param("param", "a b&c"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": "Resultado",
            "source": "Base de datos"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = HttpApi::new(&server.uri());
    let resp = api.operation("a b&c").await.unwrap();

    assert_eq!(resp.result, Payload::Text("Resultado".into()));
    assert_eq!(resp.source().origin, Origin::Database);
}

#[tokio::test]
async fn test_user_keeps_field_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user/3"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"data":{"user_id":3,"name":"Usuario 3","email":"user3@example.com"},"source":"Caché (pymemcache)"}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let api = HttpApi::new(&format!("{}/", server.uri()));
    let resp = api.user(3).await.unwrap();

    assert_eq!(
        resp.data,
        Payload::fields([
            ("user_id", "3"),
            ("name", "Usuario 3"),
            ("email", "user3@example.com"),
        ])
    );
    assert_eq!(resp.source().origin, Origin::Cache);
}

#[tokio::test]
async fn test_clear_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/clear_cache"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": "Caché completamente limpiada" })),
        )
        .mount(&server)
        .await;

    let resp = HttpApi::new(&server.uri()).clear_cache().await.unwrap();
    assert_eq!(resp.status, "Caché completamente limpiada");
}

#[tokio::test]
async fn test_error_status_is_typed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/clear_cache"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let err = HttpApi::new(&server.uri()).clear_cache().await.unwrap_err();
    assert_eq!(err, RequestError::Status(500));
}

#[tokio::test]
async fn test_html_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/operation"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<!doctype html>"))
        .mount(&server)
        .await;

    let err = HttpApi::new(&server.uri()).operation("x").await.unwrap_err();
    assert!(matches!(err, RequestError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    let err = HttpApi::new(&format!("http://127.0.0.1:{port}")).operation("x").await.unwrap_err();
    assert!(matches!(err, RequestError::Network(_)));
}
