//! In-process request driver for an axum `Router`.

use axum::Router;
use axum::body::{Body, to_bytes};
use http::{HeaderMap, Method, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

pub struct TestApp {
    router: Router,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Parsed JSON body, `Value::Null` when the body is empty or not JSON.
    pub body: Value,
}

impl TestApp {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        headers: HeaderMap,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(map) = builder.headers_mut() {
            map.extend(headers);
        }
        let request = match body {
            Some(json) => builder
                .header(http::header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        TestResponse {
            status,
            headers,
            body: serde_json::from_slice(&bytes).unwrap_or(Value::Null),
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, HeaderMap::new(), None).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::POST, uri, HeaderMap::new(), Some(body))
            .await
    }
}
