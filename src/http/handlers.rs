//! Route handlers.
//!
//! Bridge failures never become HTTP errors: every route answers 200 and
//! carries the failure text in its body.

use axum::{extract::State, response::Html, Json};
use serde::{Deserialize, Serialize};

use crate::config::RobotConfig;
use crate::http::page::render_topics_page;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::rosbridge::TopicListing;

/// Body of `GET /api/topics`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicsResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub topics: Vec<String>,
    pub count: usize,
}

impl From<TopicListing> for TopicsResponse {
    fn from(listing: TopicListing) -> Self {
        let count = listing.count();
        Self {
            error: listing.error,
            topics: listing.topics,
            count,
        }
    }
}

/// Body of `GET /api/robot_config`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotConfigResponse {
    pub robot_ip: String,
    pub rosbridge_port: u16,
    pub rosbridge_url: String,
}

impl From<&RobotConfig> for RobotConfigResponse {
    fn from(robot: &RobotConfig) -> Self {
        Self {
            robot_ip: robot.ip.clone(),
            rosbridge_port: robot.rosbridge_port,
            rosbridge_url: robot.rosbridge_url(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn home(State(state): State<AppState>) -> Html<String> {
    metrics::record_http_request("home");
    let listing = TopicListing::from(state.client.fetch_topics().await);
    Html(render_topics_page(state.client.url(), &listing))
}

pub async fn topics(State(state): State<AppState>) -> Json<TopicsResponse> {
    metrics::record_http_request("topics");
    let listing = TopicListing::from(state.client.fetch_topics().await);
    Json(listing.into())
}

pub async fn robot_config(State(state): State<AppState>) -> Json<RobotConfigResponse> {
    metrics::record_http_request("robot_config");
    Json(RobotConfigResponse::from(state.robot.as_ref()))
}

pub async fn health() -> Json<HealthStatus> {
    metrics::record_http_request("health");
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RelayConfig;
    use crate::http::server::build_router;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        Router,
    };
    use tower::ServiceExt;

    fn router_for(ip: &str, port: u16) -> Router {
        let mut config = RelayConfig::default();
        config.robot.ip = ip.to_string();
        config.robot.rosbridge_port = port;
        config.timeouts.connect_secs = 2;
        config.timeouts.response_secs = 2;
        build_router(&config, AppState::new(&config))
    }

    async fn get(router: Router, path: &str) -> (StatusCode, Vec<u8>) {
        let response = router
            .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    async fn closed_port() -> u16 {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap().port()
    }

    #[test]
    fn test_topics_response_omits_error_on_success() {
        let response = TopicsResponse::from(TopicListing {
            topics: vec!["/odom".to_string()],
            error: None,
        });
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({"topics": ["/odom"], "count": 1})
        );
    }

    #[tokio::test]
    async fn test_robot_config_route() {
        let (status, body) = get(router_for("10.0.0.5", 9090), "/api/robot_config").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            serde_json::from_slice::<serde_json::Value>(&body).unwrap(),
            serde_json::json!({
                "robot_ip": "10.0.0.5",
                "rosbridge_port": 9090,
                "rosbridge_url": "ws://10.0.0.5:9090"
            })
        );
    }

    #[tokio::test]
    async fn test_topics_route_on_refused_connection() {
        let port = closed_port().await;
        let (status, body) = get(router_for("127.0.0.1", port), "/api/topics").await;

        assert_eq!(status, StatusCode::OK);
        let response: TopicsResponse = serde_json::from_slice(&body).unwrap();
        assert!(response.topics.is_empty());
        assert_eq!(response.count, 0);
        assert!(response.error.unwrap().contains("Ошибка подключения"));
    }

    #[tokio::test]
    async fn test_home_route_renders_error_inline() {
        let port = closed_port().await;
        let (status, body) = get(router_for("127.0.0.1", port), "/").await;

        assert_eq!(status, StatusCode::OK);
        let page = String::from_utf8(body).unwrap();
        assert!(page.contains(r#"<div class="error">Ошибка подключения к rosbridge"#));
    }

    #[tokio::test]
    async fn test_health_route() {
        let (status, body) = get(router_for("10.0.0.5", 9090), "/healthz").await;
        assert_eq!(status, StatusCode::OK);
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["status"], "ok");
    }

    #[test]
    fn test_health_route_is_counted() {
        use futures_util::FutureExt;
        use metrics_exporter_prometheus::PrometheusBuilder;

        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        ::metrics::with_local_recorder(&recorder, || {
            health().now_or_never().expect("health handler does not await");
        });

        assert!(handle
            .render()
            .contains(r#"relay_http_requests_total{route="health"} 1"#));
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let (status, _) = get(router_for("10.0.0.5", 9090), "/api/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
