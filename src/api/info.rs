//! Pod metadata endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Response body for GET /get_info. Uppercase keys are part of the wire
/// contract.
#[derive(Debug, Serialize)]
pub struct InfoResponse {
    #[serde(rename = "APP_VERSION")]
    pub app_version: String,
    #[serde(rename = "APP_TITLE")]
    pub app_title: String,
    #[serde(rename = "POD_NAME")]
    pub pod_name: String,
    #[serde(rename = "POD_IP")]
    pub pod_ip: String,
}

/// GET /get_info - application metadata and pod identity.
///
/// Every invocation counts towards `get_info_requests_total`.
async fn get_info(State(state): State<Arc<AppState>>) -> Json<InfoResponse> {
    state.metrics.inc_get_info_requests();

    Json(InfoResponse {
        app_version: state.settings.app_version.clone(),
        app_title: state.settings.app_title.clone(),
        pod_name: state.identity.name.clone(),
        pod_ip: state.identity.ip.clone(),
    })
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/get_info", get(get_info))
}
