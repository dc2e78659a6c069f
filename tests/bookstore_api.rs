use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use bookstore_db::Store;
use bookstore_kernel::settings::Settings;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Option<String>, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(request.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, location, body)
}

async fn app_over(store: Store) -> Router {
    let registry = bookstore_app::registry();
    registry.run_migrations(&store).await.unwrap();
    bookstore_http::build_router(&registry, &Settings::default(), store)
}

#[tokio::test]
async fn orwell_scenario() {
    let app = app_over(Store::in_memory().await.unwrap()).await;

    let (status, location, body) = call(&app, "POST", "/authors", Some(json!({"name": "Orwell"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(location.as_deref(), Some("/authors/1"));
    assert_eq!(body["id"], 1);

    let (status, location, body) = call(&app, "POST", "/categories", Some(json!({"name": "Fiction"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(location.as_deref(), Some("/categories/1"));
    assert_eq!(body["id"], 1);

    let (status, location, body) = call(
        &app,
        "POST",
        "/books",
        Some(json!({"title": "1984", "authorId": 1, "categoryId": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(location.as_deref(), Some("/books/1"));
    assert_eq!(body["id"], 1);

    let (status, _, body) = call(&app, "GET", "/books/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["author"]["name"], "Orwell");
    assert_eq!(body["category"]["name"], "Fiction");

    let (status, _, body) = call(&app, "DELETE", "/books/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, _, body) = call(&app, "GET", "/books/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_null());
}

#[tokio::test]
async fn data_survives_reopening_the_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("BookStore.db");
    let url = format!("sqlite://{}", path.display());

    let store = Store::connect(&url).await.unwrap();
    let app = app_over(store.clone()).await;
    call(&app, "POST", "/authors", Some(json!({"name": "Orwell"}))).await;
    drop(app);
    store.close().await;

    let store = Store::connect(&url).await.unwrap();
    let app = app_over(store.clone()).await;
    let (status, _, body) = call(&app, "GET", "/authors", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"id": 1, "name": "Orwell"}]));
    store.close().await;
}

#[tokio::test]
async fn openapi_lists_every_collection() {
    let app = app_over(Store::in_memory().await.unwrap()).await;

    let (status, _, doc) = call(&app, "GET", "/docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);

    for collection in ["books", "authors", "categories"] {
        let list = format!("/{collection}");
        let member = format!("/{collection}/{{id}}");
        assert!(doc["paths"][&list]["get"].is_object(), "missing GET {list}");
        assert!(doc["paths"][&list]["post"].is_object(), "missing POST {list}");
        assert!(doc["paths"][&member]["delete"].is_object(), "missing DELETE {member}");
    }
    for schema in ["Book", "BookInput", "Author", "Category"] {
        assert!(doc["components"]["schemas"][schema].is_object(), "missing schema {schema}");
    }
}
