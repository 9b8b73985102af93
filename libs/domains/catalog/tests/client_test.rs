//! HTTP client tests against a loopback stub of the upstream API.
//!
//! Each test serves one of the response shapes the real API has produced
//! over its lifetime (bare arrays, envelopes, failure envelopes, 5xx) and
//! drives the real reqwest client against it.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use domain_catalog::{
    CatalogApi, CatalogError, CatalogService, HttpCatalogClient, ProductInput, UpstreamConfig,
};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn client(base_url: &str) -> HttpCatalogClient {
    HttpCatalogClient::new(&UpstreamConfig {
        base_url: base_url.to_string(),
        timeout_secs: 5,
        upload_timeout_secs: 5,
        accept_invalid_certs: false,
    })
    .unwrap()
}

fn valid_input() -> ProductInput {
    ProductInput {
        name: "Café molido".to_string(),
        description: None,
        barcode: Some("7501031311309".to_string()),
        price: 129.5,
        stock: 40,
        category: "Alimentos".to_string(),
        image: None,
    }
}

#[tokio::test]
async fn list_accepts_a_bare_array() {
    let app = Router::new().route(
        "/api/productos",
        get(|| async {
            Json(json!([
                {"id": 1, "nombre": "Café", "precio": 129.5},
                {"id": 2, "nombre": "Té", "precio": 59.0}
            ]))
        }),
    );
    let base = spawn_upstream(app).await;

    let products = client(&base).list_products().await.unwrap();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].name.as_deref(), Some("Café"));
    assert_eq!(products[1].price, 59.0);
}

#[tokio::test]
async fn list_accepts_an_envelope() {
    let app = Router::new().route(
        "/api/productos",
        get(|| async {
            Json(json!({
                "success": true,
                "data": [{"id": 7, "nombre": "Azúcar", "stock": 12}],
                "pagination": {"currentPage": 1, "totalPages": 1, "totalItems": 1}
            }))
        }),
    );
    let base = spawn_upstream(app).await;

    let products = client(&base).list_products().await.unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id, 7);
    assert_eq!(products[0].stock, 12);
}

#[tokio::test]
async fn list_with_unparseable_body_is_empty() {
    let app = Router::new().route("/api/productos", get(|| async { "<html>oops</html>" }));
    let base = spawn_upstream(app).await;

    let products = client(&base).list_products().await.unwrap();
    assert!(products.is_empty());
}

#[tokio::test]
async fn list_maps_a_5xx_to_service_unavailable() {
    let app = Router::new().route(
        "/api/productos",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let base = spawn_upstream(app).await;

    let err = client(&base).list_products().await.unwrap_err();
    assert!(matches!(err, CatalogError::Unavailable(_)));
    assert_eq!(
        err.to_string(),
        "No se pudo conectar con el servidor. Por favor, intente más tarde."
    );
}

#[tokio::test]
async fn list_maps_a_refused_connection_to_service_unavailable() {
    // Bind, take the address, drop the listener: nothing is serving.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let err = client(&base).list_products().await.unwrap_err();
    assert!(matches!(err, CatalogError::Unavailable(_)));
}

#[tokio::test]
async fn get_accepts_both_shapes_and_null_data() {
    let app = Router::new()
        .route(
            "/api/productos/1",
            get(|| async { Json(json!({"id": 1, "nombre": "Café"})) }),
        )
        .route(
            "/api/productos/2",
            get(|| async { Json(json!({"success": true, "data": {"id": 2, "nombre": "Té"}})) }),
        )
        .route(
            "/api/productos/3",
            get(|| async { Json(json!({"success": true, "data": null})) }),
        );
    let base = spawn_upstream(app).await;
    let client = client(&base);

    assert_eq!(
        client.get_product(1).await.unwrap().unwrap().name.as_deref(),
        Some("Café")
    );
    assert_eq!(client.get_product(2).await.unwrap().unwrap().id, 2);
    assert!(client.get_product(3).await.unwrap().is_none());
}

#[tokio::test]
async fn create_returns_the_enveloped_product() {
    let app = Router::new().route(
        "/api/productos",
        post(|Json(body): Json<serde_json::Value>| async move {
            // Echo back what the client sent, plus an id.
            let mut stored = body;
            stored["id"] = json!(31);
            (
                StatusCode::CREATED,
                Json(json!({"success": true, "data": stored})),
            )
        }),
    );
    let base = spawn_upstream(app).await;

    let created = client(&base).create_product(valid_input()).await.unwrap();
    assert_eq!(created.id, 31);
    assert_eq!(created.name.as_deref(), Some("Café molido"));
    assert_eq!(created.barcode.as_deref(), Some("7501031311309"));
}

#[tokio::test]
async fn create_failure_envelope_surfaces_the_server_message() {
    let app = Router::new().route(
        "/api/productos",
        post(|| async {
            Json(json!({"success": false, "message": "Código de barras duplicado"}))
        }),
    );
    let base = spawn_upstream(app).await;

    let err = client(&base).create_product(valid_input()).await.unwrap_err();
    match err {
        CatalogError::Api(message) => assert_eq!(message, "Código de barras duplicado"),
        other => panic!("expected upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn create_non_success_status_carries_the_server_message() {
    let app = Router::new().route(
        "/api/productos",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({"success": false, "error": "precio inválido"})),
            )
        }),
    );
    let base = spawn_upstream(app).await;

    let err = client(&base).create_product(valid_input()).await.unwrap_err();
    match err {
        CatalogError::Api(message) => assert_eq!(message, "precio inválido"),
        other => panic!("expected upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn create_success_without_payload_is_an_error() {
    let app = Router::new().route(
        "/api/productos",
        post(|| async { Json(json!({"success": true, "data": null})) }),
    );
    let base = spawn_upstream(app).await;

    let err = client(&base).create_product(valid_input()).await.unwrap_err();
    match err {
        CatalogError::Api(message) => assert_eq!(message, "No se pudo crear el producto"),
        other => panic!("expected upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn update_returns_the_stored_product() {
    let app = Router::new().route(
        "/api/productos/5",
        put(|Json(body): Json<serde_json::Value>| async move {
            let mut stored = body;
            stored["id"] = json!(5);
            Json(json!({"success": true, "data": stored}))
        }),
    );
    let base = spawn_upstream(app).await;

    let updated = client(&base).update_product(5, valid_input()).await.unwrap();
    assert_eq!(updated.id, 5);
    assert_eq!(updated.category.as_deref(), Some("Alimentos"));
}

#[tokio::test]
async fn invalid_update_never_contacts_the_upstream() {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route(
            "/api/productos/{id}",
            put(|State(hits): State<Arc<AtomicUsize>>| async move {
                hits.fetch_add(1, Ordering::SeqCst);
                Json(json!({"success": true, "data": {"id": 1}}))
            }),
        )
        .with_state(hits.clone());
    let base = spawn_upstream(app).await;

    let service = CatalogService::new(client(&base));
    let mut input = valid_input();
    input.category = String::new();

    let result = service.update_product(1, input).await;
    assert!(matches!(result, Err(CatalogError::Validation(_))));
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn delete_succeeds_and_maps_failures() {
    let app = Router::new()
        .route("/api/productos/1", delete(|| async { StatusCode::NO_CONTENT }))
        .route(
            "/api/productos/2",
            delete(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
    let base = spawn_upstream(app).await;
    let client = client(&base);

    client.delete_product(1).await.unwrap();
    let err = client.delete_product(2).await.unwrap_err();
    assert!(matches!(err, CatalogError::Unavailable(_)));
}

#[tokio::test]
async fn upload_sends_multipart_and_returns_the_stored_path() {
    let app = Router::new().route(
        "/api/productos/upload-imagen",
        post(|headers: HeaderMap| async move {
            let content_type = headers
                .get("content-type")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default();
            assert!(content_type.starts_with("multipart/form-data"));
            Json(json!({"success": true, "imageUrl": "/images/cafe.png"}))
        }),
    );
    let base = spawn_upstream(app).await;

    let upload = client(&base)
        .upload_image("cafe.png".to_string(), vec![0xFF, 0xD8, 0xFF])
        .await
        .unwrap();
    assert!(upload.success);
    assert_eq!(upload.image_url.as_deref(), Some("/images/cafe.png"));
}

#[tokio::test]
async fn upload_failure_envelope_is_an_error() {
    let app = Router::new().route(
        "/api/productos/upload-imagen",
        post(|| async { Json(json!({"success": false, "error": "archivo demasiado grande"})) }),
    );
    let base = spawn_upstream(app).await;

    let err = client(&base)
        .upload_image("cafe.png".to_string(), vec![1, 2, 3])
        .await
        .unwrap_err();
    match err {
        CatalogError::Api(message) => assert_eq!(message, "archivo demasiado grande"),
        other => panic!("expected upstream error, got {other:?}"),
    }
}
