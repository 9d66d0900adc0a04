//! Integration tests for [`ApiClient`].
//!
//! Uses `wiremock` to stand up a local HTTP server for each test so no real
//! network traffic is made. Covers the happy paths and every branch of the
//! failure-message mapping (service message, detail suffix, raw body,
//! templated status fallback).

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use farmalabel_api::{ApiClient, ApiConfig, ApiError};

fn test_client(base_url: &str) -> ApiClient {
    ApiClient::new(ApiConfig {
        base_url: base_url.to_string(),
        token: None,
        timeout_secs: 5,
        user_agent: "farmalabel-test/0.1".to_string(),
    })
    .expect("failed to build test ApiClient")
}

fn test_client_with_token(base_url: &str, token: &str) -> ApiClient {
    ApiClient::new(ApiConfig {
        base_url: base_url.to_string(),
        token: Some(token.to_string()),
        timeout_secs: 5,
        user_agent: "farmalabel-test/0.1".to_string(),
    })
    .expect("failed to build test ApiClient")
}

/// Minimal valid product fixture.
fn product_json(codigo: &str) -> serde_json::Value {
    json!({
        "id": 17,
        "codigo": codigo,
        "codigoBarras": "2000000744902",
        "nombre": "BLOODYGREEN TEEN FLUJO INTENSO",
        "precioNormal": 16990,
        "precioActual": 14990,
        "precioOferta": 14990,
        "stock": 8
    })
}

// ---------------------------------------------------------------------------
// get_product
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_product_returns_the_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products/89997002"))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_json("89997002")))
        .mount(&server)
        .await;

    let product = test_client(&server.uri())
        .get_product("89997002")
        .await
        .expect("expected a product");
    assert_eq!(product.codigo, "89997002");
    assert_eq!(product.precio_actual, 14_990);
}

#[tokio::test]
async fn get_product_sends_the_token_header_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products/89997002"))
        .and(header("X-API-TOKEN", "MI_TOKEN_DEMO_123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_json("89997002")))
        .mount(&server)
        .await;

    let result = test_client_with_token(&server.uri(), "MI_TOKEN_DEMO_123")
        .get_product("89997002")
        .await;
    assert!(result.is_ok(), "token header did not match: {result:?}");
}

#[tokio::test]
async fn get_product_uses_the_service_message_on_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products/404404"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"message": "Producto no encontrado"})),
        )
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .get_product("404404")
        .await
        .expect_err("expected a service error");
    assert!(
        matches!(err, ApiError::Service { status: 404, ref message } if message == "Producto no encontrado"),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn get_product_falls_back_to_the_raw_body_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products/500500"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream caído"))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .get_product("500500")
        .await
        .expect_err("expected a service error");
    assert!(
        matches!(err, ApiError::Service { status: 500, ref message } if message == "upstream caído"),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn get_product_templates_a_message_when_the_body_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products/503503"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .get_product("503503")
        .await
        .expect_err("expected a service error");
    assert!(
        matches!(err, ApiError::Service { status: 503, ref message } if message.contains("503")),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn get_product_rejects_a_non_json_success_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products/89997002"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .get_product("89997002")
        .await
        .expect_err("expected a deserialize error");
    assert!(matches!(err, ApiError::Deserialize { .. }), "got: {err:?}");
}

// ---------------------------------------------------------------------------
// search_products
// ---------------------------------------------------------------------------

#[tokio::test]
async fn search_products_returns_the_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products/search/toallas"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([product_json("89997002"), product_json("89997001")])),
        )
        .mount(&server)
        .await;

    let products = test_client(&server.uri())
        .search_products("toallas")
        .await
        .expect("expected search results");
    assert_eq!(products.len(), 2);
    assert_eq!(products[1].codigo, "89997001");
}

// ---------------------------------------------------------------------------
// search_excel
// ---------------------------------------------------------------------------

#[tokio::test]
async fn search_excel_unwraps_the_items_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/meson/excel/search"))
        .and(query_param("term", "toallas teen"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "items": [
                {"sku": "89997002", "descripcion": "TOALLAS TEEN 14-15"},
                {"sku": "89997001"}
            ]
        })))
        .mount(&server)
        .await;

    let items = test_client(&server.uri())
        .search_excel("toallas teen")
        .await
        .expect("expected excel hits");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].sku, "89997002");
    assert!(items[1].descripcion.is_none());
}

#[tokio::test]
async fn search_excel_ok_false_is_a_service_error_with_detail() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/meson/excel/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": false,
            "message": "Índice no cargado",
            "detail": "sube el Excel primero"
        })))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .search_excel("toallas")
        .await
        .expect_err("expected a service error");
    assert!(
        matches!(err, ApiError::Service { ref message, .. }
            if message == "Índice no cargado · Detalle: sube el Excel primero"),
        "got: {err:?}"
    );
}

// ---------------------------------------------------------------------------
// enrich_from_dpofe
// ---------------------------------------------------------------------------

#[tokio::test]
async fn enrich_returns_the_pricing_record_when_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/meson/excel/enrich/89997002"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "foundInExcel": true,
            "foundInDPOFE": true,
            "producto": {
                "sku": "89997002",
                "descripcionPromo": "TOALLAS TEEN PROMO",
                "precioNormal": 16990,
                "precioOferta": 14990,
                "descuentoPct": 12
            }
        })))
        .mount(&server)
        .await;

    let response = test_client(&server.uri())
        .enrich_from_dpofe("89997002")
        .await
        .expect("expected an enrich response");
    assert!(response.found_in_dpofe);
    let record = response.producto.expect("expected pricing record");
    assert_eq!(record.precio_oferta, Some(14_990));
}

#[tokio::test]
async fn enrich_not_found_still_parses() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/meson/excel/enrich/0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "foundInExcel": false,
            "foundInDPOFE": false,
            "message": "SKU no está en el Excel"
        })))
        .mount(&server)
        .await;

    let response = test_client(&server.uri())
        .enrich_from_dpofe("0")
        .await
        .expect("expected an enrich response");
    assert!(!response.found_in_excel);
    assert!(response.producto.is_none());
}

// ---------------------------------------------------------------------------
// upload_meson_excel / excel_status
// ---------------------------------------------------------------------------

#[tokio::test]
async fn upload_sends_the_audit_user_header_and_returns_the_summary() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/meson/excel/upload"))
        .and(header("x-user", "claudia"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "summary": {
                "count": 1200,
                "lastUpdated": "2025-04-22T10:00:00Z",
                "sample": ["89997002"]
            }
        })))
        .mount(&server)
        .await;

    let summary = test_client(&server.uri())
        .upload_meson_excel("meson.xlsx", b"PK\x03\x04".to_vec(), "claudia")
        .await
        .expect("expected an upload summary");
    assert_eq!(summary.count, 1200);
}

#[tokio::test]
async fn upload_failure_surfaces_the_service_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/meson/excel/upload"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "Archivo inválido"})),
        )
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .upload_meson_excel("meson.xlsx", vec![0x00], "claudia")
        .await
        .expect_err("expected a service error");
    assert!(
        matches!(err, ApiError::Service { status: 400, ref message } if message == "Archivo inválido"),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn excel_status_unwraps_the_summary() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/meson/excel/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "summary": { "count": 7, "sample": [] }
        })))
        .mount(&server)
        .await;

    let summary = test_client(&server.uri())
        .excel_status()
        .await
        .expect("expected a status summary");
    assert_eq!(summary.count, 7);
}

// ---------------------------------------------------------------------------
// construction
// ---------------------------------------------------------------------------

#[test]
fn client_rejects_an_unparseable_base_url() {
    let result = ApiClient::new(ApiConfig {
        base_url: "not a url".to_string(),
        token: None,
        timeout_secs: 5,
        user_agent: "farmalabel-test/0.1".to_string(),
    });
    assert!(matches!(result, Err(ApiError::InvalidBaseUrl { .. })));
}
