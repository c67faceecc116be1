//! Common test utilities and helpers

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use perfsim_core::{ApiServer, AppState, CpuSimulation, GrowthPlan};
use tower::ServiceExt;

/// State with workloads small enough to finish instantly
pub fn create_test_state(ceiling_bytes: Option<u64>) -> AppState {
    AppState::new(
        CpuSimulation {
            dataset_len: 10,
            target_sum: 12,
        },
        GrowthPlan {
            chunk_size: 1000,
            max_chunks: 5,
            ceiling_bytes,
        },
    )
}

pub fn create_test_router(state: AppState) -> Router {
    ApiServer::router(state)
}

/// Send a GET request and return status plus body text
pub async fn get(router: &Router, uri: &str) -> (StatusCode, String) {
    let response = router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}
