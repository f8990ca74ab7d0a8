// Integration tests for FacetX
use actix_web::http::header::{self, ContentType};
use actix_web::http::StatusCode;
use actix_web::{test, web, App, HttpRequest, HttpResponse, HttpServer};
use async_trait::async_trait;
use facetx::{
    BackendConfig, CatalogItem, Color, Error, HttpBackend, OrchestratorConfig, QueryMatch,
    QueryOrchestrator, QueryRequest, Result, SearchBackend, Size, UpsertRecord,
};
use facetx_api::{configure, INTERNAL_ERROR_MESSAGE};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

/// Backend double that records every query it receives.
struct MockBackend {
    queries: Mutex<Vec<QueryRequest>>,
    failure: Option<String>,
}

impl MockBackend {
    fn healthy() -> Arc<Self> {
        Arc::new(Self { queries: Mutex::new(Vec::new()), failure: None })
    }

    fn failing(cause: &str) -> Arc<Self> {
        Arc::new(Self { queries: Mutex::new(Vec::new()), failure: Some(cause.to_string()) })
    }

    fn calls(&self) -> usize {
        self.queries.lock().len()
    }
}

#[async_trait]
impl SearchBackend for MockBackend {
    async fn query(&self, request: QueryRequest) -> Result<Vec<QueryMatch>> {
        self.queries.lock().push(request);
        if let Some(cause) = &self.failure {
            return Err(Error::BackendError { status: 503, message: cause.clone() });
        }
        Ok(vec![
            QueryMatch {
                id: json!("blue-m-1"),
                score: Some(0.98),
                vector: None,
                metadata: Some(json!({"id": "blue-m-1", "color": "blue", "size": "M", "price": 12, "name": "Blue tee"})),
                extra: Default::default(),
            },
            QueryMatch {
                id: json!("blue-m-2"),
                score: Some(0.91),
                vector: None,
                metadata: Some(json!({"id": "blue-m-2", "color": "blue", "size": "M", "price": 19, "name": "Blue shirt"})),
                extra: Default::default(),
            },
        ])
    }

    async fn upsert(&self, _records: Vec<UpsertRecord>) -> Result<()> {
        Ok(())
    }
}

fn orchestrator(backend: Arc<MockBackend>) -> Arc<QueryOrchestrator> {
    Arc::new(QueryOrchestrator::new(backend, OrchestratorConfig::default()).unwrap())
}

#[actix_web::test]
async fn test_products_endpoint_returns_results_verbatim() {
    let backend = MockBackend::healthy();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(orchestrator(backend.clone())))
            .configure(configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/products")
        .set_json(json!({
            "filter": {"color": ["blue"], "size": ["M"], "price": [0, 50], "sort": "price-asc"}
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let results = body.as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["id"], json!("blue-m-1"));
    assert_eq!(results[1]["metadata"]["name"], json!("Blue shirt"));

    let queries = backend.queries.lock();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].top_k, 12);
    assert!(queries[0].include_metadata);
    assert_eq!(queries[0].vector, vec![0.0, 0.0, 0.0]);
    assert_eq!(
        queries[0].filter.as_deref(),
        Some("(color = 2) AND (size = 1) AND (price >= 0 AND price <= 50)")
    );
}

#[actix_web::test]
async fn test_empty_color_selection_still_sends_match_nothing_clause() {
    let backend = MockBackend::healthy();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(orchestrator(backend.clone())))
            .configure(configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/products")
        .set_json(json!({
            "filter": {"color": [], "size": ["M"], "price": [0, 100], "sort": "none"}
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let queries = backend.queries.lock();
    assert_eq!(
        queries[0].filter.as_deref(),
        Some("(color = \"\") AND (size = 1) AND (price >= 0 AND price <= 100)")
    );
    assert_eq!(queries[0].vector, vec![0.0, 0.0, 25.0]);
}

#[actix_web::test]
async fn test_unknown_color_rejected_without_backend_call() {
    let backend = MockBackend::healthy();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(orchestrator(backend.clone())))
            .configure(configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/products")
        .set_json(json!({
            "filter": {"color": ["orange"], "size": ["M"], "price": [0, 100], "sort": "none"}
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["message"].as_str().unwrap().contains("orange"));
    assert_eq!(backend.calls(), 0);
}

#[actix_web::test]
async fn test_malformed_payloads_rejected() {
    let backend = MockBackend::healthy();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(orchestrator(backend.clone())))
            .configure(configure),
    )
    .await;

    let bad_bodies = [
        json!({"filter": {"color": [], "size": [], "price": [20, 10], "sort": "none"}}),
        json!({"filter": {"color": [], "size": [], "sort": "none"}}),
        json!({"filter": {"color": [], "size": [], "price": [0, 10], "sort": "random"}}),
        json!({"color": [], "size": [], "price": [0, 10], "sort": "none"}),
    ];
    for body in bad_bodies.iter() {
        let req = test::TestRequest::post()
            .uri("/api/products")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "body {}", body);

        let error: Value = test::read_body_json(resp).await;
        assert!(error["message"].is_string());
    }

    let req = test::TestRequest::post()
        .uri("/api/products")
        .insert_header(ContentType::json())
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    assert_eq!(backend.calls(), 0);
}

#[actix_web::test]
async fn test_backend_failure_hides_cause() {
    let backend = MockBackend::failing("index token expired for tenant 42");
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(orchestrator(backend.clone())))
            .configure(configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/products")
        .set_json(json!({
            "filter": {"color": ["white"], "size": ["L"], "price": [0, 10], "sort": "none"}
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"message": INTERNAL_ERROR_MESSAGE}));
    assert_eq!(backend.calls(), 1);
}

#[actix_web::test]
async fn test_health_endpoint() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(orchestrator(MockBackend::healthy())))
            .configure(configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["title"], json!("facetx"));
    assert_eq!(body["ordering"], json!("probe"));
}

// ---------------------------------------------------------------------------
// HttpBackend against an in-process stub index
// ---------------------------------------------------------------------------

type Captured = Arc<Mutex<Vec<(Option<String>, Value)>>>;

async fn stub_query(captured: web::Data<Captured>, req: HttpRequest, body: web::Json<Value>) -> HttpResponse {
    let auth = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    captured.lock().push((auth, body.into_inner()));

    HttpResponse::Ok().json(json!({
        "result": [
            {"id": "green-s-1", "score": 0.870000000123, "metadata": {"color": "green", "size": "S", "price": 44}, "data": "Green tee"}
        ]
    }))
}

async fn stub_upsert(captured: web::Data<Captured>, body: web::Json<Value>) -> HttpResponse {
    captured.lock().push((None, body.into_inner()));
    HttpResponse::Ok().json(json!({"result": "Success"}))
}

async fn stub_unavailable() -> HttpResponse {
    HttpResponse::ServiceUnavailable().json(json!({"error": "index offline"}))
}

#[actix_web::test]
async fn test_http_backend_round_trip() {
    let captured: Captured = Arc::new(Mutex::new(Vec::new()));
    let data = captured.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(data.clone()))
            .route("/query", web::post().to(stub_query))
            .route("/upsert", web::post().to(stub_upsert))
            .route("/offline/query", web::post().to(stub_unavailable))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();
    let port = server.addrs()[0].port();
    let server = server.run();
    let handle = server.handle();
    actix_web::rt::spawn(server);

    let base = format!("http://127.0.0.1:{}", port);
    let backend = HttpBackend::new(
        BackendConfig::new(&base, "secret-token").with_timeout(Duration::from_secs(5)),
    )
    .unwrap();

    let results = backend
        .query(QueryRequest {
            top_k: 12,
            vector: vec![0.0, 0.0, 50.0],
            include_metadata: true,
            filter: Some("(color = 3) AND (size = 0) AND (price >= 0 AND price <= 50)".to_string()),
            sort_by: None,
        })
        .await
        .unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(
        serde_json::to_value(&results[0]).unwrap(),
        json!({"id": "green-s-1", "score": 0.870000000123, "metadata": {"color": "green", "size": "S", "price": 44}, "data": "Green tee"})
    );
    assert_eq!(results[0].id, json!("green-s-1"));
    assert_eq!(results[0].metadata.as_ref().unwrap()["price"], json!(44));

    let item = CatalogItem::new(Color::Green, Size::S, 44.0);
    backend.upsert(vec![item.to_record().unwrap()]).await.unwrap();

    {
        let captured = captured.lock();
        assert_eq!(captured.len(), 2);

        let (auth, query) = &captured[0];
        assert_eq!(auth.as_deref(), Some("Bearer secret-token"));
        assert_eq!(query["topK"], json!(12));
        assert_eq!(query["includeMetadata"], json!(true));
        assert_eq!(query["vector"], json!([0.0, 0.0, 50.0]));
        assert_eq!(
            query["filter"],
            json!("(color = 3) AND (size = 0) AND (price >= 0 AND price <= 50)")
        );

        let (_, upsert) = &captured[1];
        assert_eq!(upsert[0]["vector"], json!([3.0, 0.0, 44.0]));
        assert_eq!(upsert[0]["metadata"]["color"], json!("green"));
    }

    let offline = HttpBackend::new(BackendConfig::new(format!("{}/offline", base), "secret-token")).unwrap();
    let err = offline
        .query(QueryRequest {
            top_k: 12,
            vector: vec![0.0, 0.0, 25.0],
            include_metadata: true,
            filter: None,
            sort_by: None,
        })
        .await
        .unwrap_err();
    match err {
        Error::BackendError { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "index offline");
        }
        other => panic!("expected BackendError, got {:?}", other),
    }

    handle.stop(true).await;
}
