//! Server API tests

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use pulse_core::{Dataset, Department, KpiGraph, KpiStore, NewMetric, Reasoner};
use tower::ServiceExt;

fn setup_test_app() -> Router {
    let store = Dataset::embedded().unwrap().into_store().unwrap();
    create_router(KpiService::new(store, Reasoner::default()), ServerConfig::default())
}

fn app_with_graph(graph: KpiGraph) -> Router {
    create_router(
        KpiService::new(KpiStore::from_graph(graph), Reasoner::default()),
        ServerConfig::default(),
    )
}

async fn get_body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn get(app: Router, uri: &str) -> axum::response::Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

// ========== Health ==========

#[tokio::test]
async fn test_health() {
    let response = get(setup_test_app(), "/api/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("x-content-type-options").unwrap(),
        "nosniff"
    );

    let json = get_body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["graph_loaded"], true);
    assert_eq!(json["metrics"], 10);
}

// ========== KPI API Tests ==========

#[tokio::test]
async fn test_list_kpis() {
    let response = get(setup_test_app(), "/api/kpis").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let kpis = json.as_array().unwrap();
    assert_eq!(kpis.len(), 10);

    let first = &kpis[0];
    assert_eq!(first["id"], "ED_Wait_Time");
    assert_eq!(first["name"], "Door-to-Doctor Time");
    assert_eq!(first["department_name"], "Emergency Department");
    assert_eq!(first["actual"], 32.5);
    assert_eq!(first["target"], 30.0);
    assert_eq!(first["trend"], "stable");
    assert!(first["alert_level"].is_null());
}

#[tokio::test]
async fn test_get_kpi_detail() {
    let response = get(setup_test_app(), "/api/kpis/ED_Wait_Time").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["name"], "Door-to-Doctor Time");
    assert_eq!(json["weight"], 0.85);
    assert_eq!(json["unit"], "Minutes");
    assert_eq!(json["time_period"], "Monthly");
    assert_eq!(json["categories"], serde_json::json!(["Efficiency"]));
    assert_eq!(json["warning_threshold"], 35.0);
    assert_eq!(json["critical_threshold"], 45.0);
    assert_eq!(json["department"]["name"], "Emergency Department");
    assert_eq!(json["department"]["bed_capacity"], 45);
    assert_eq!(
        json["affects"],
        serde_json::json!(["ED_LWBS", "Patient_Satisfaction_Score"])
    );
    assert_eq!(json["status"], "NORMAL");
    assert!(json["alert_level"].is_null());
}

#[tokio::test]
async fn test_get_kpi_not_found() {
    let response = get(setup_test_app(), "/api/kpis/Nope").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = get_body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("Nope"));
}

#[tokio::test]
async fn test_kpi_impact() {
    let response = get(setup_test_app(), "/api/kpis/ED_Wait_Time/impact").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["direction"], "affects");
    let reached = json["reached"].as_array().unwrap();
    assert_eq!(reached.len(), 2);
    assert_eq!(reached[0]["depth"], 1);

    let response = get(
        setup_test_app(),
        "/api/kpis/ED_LWBS/impact?direction=depends_on",
    )
    .await;
    let json = get_body_json(response).await;
    assert_eq!(json["reached"][0]["id"], "ED_Wait_Time");
}

#[tokio::test]
async fn test_kpi_impact_bad_direction() {
    let response = get(
        setup_test_app(),
        "/api/kpis/ED_Wait_Time/impact?direction=sideways",
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_actual() {
    let app = setup_test_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/kpis/ED_Wait_Time/actual")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"value": 45.0}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["actual"], 45.0);

    let response = get(app, "/api/kpis/ED_Wait_Time").await;
    let json = get_body_json(response).await;
    assert_eq!(json["actual"], 45.0);
}

#[tokio::test]
async fn test_update_actual_unknown_metric() {
    let response = setup_test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/kpis/Nope/actual")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"value": 1.0}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ========== Reasoning ==========

#[tokio::test]
async fn test_reasoning() {
    let app = setup_test_app();

    let response = get(app.clone(), "/api/reasoning").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert!(json["alerts"].is_array());
    assert!(json["recommendations"].is_array());
    assert!(!json["insights"].as_array().unwrap().is_empty());
    assert_eq!(json["counts"]["critical"], 1);
    assert_eq!(json["published"], true);
    assert!(json.get("classification").is_none());

    // Levels are published for the listing view
    let json = get_body_json(get(app, "/api/kpis").await).await;
    let margin = json
        .as_array()
        .unwrap()
        .iter()
        .find(|k| k["id"] == "Hospital_Operating_Margin")
        .unwrap();
    assert_eq!(margin["alert_level"], "CRITICAL");
}

#[tokio::test]
async fn test_reasoning_rule_config_error() {
    let mut graph = KpiGraph::new();
    graph.add_department(Department::new("D", "Dept")).unwrap();
    graph
        .add_metric(NewMetric::new("Only", "Only", "D").values(1.0, 1.0))
        .unwrap();

    let response = get(app_with_graph(graph), "/api/reasoning").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = get_body_json(response).await;
    assert_eq!(json["error"], "Reasoning failed during rules");
}

// ========== Summaries ==========

#[tokio::test]
async fn test_departments() {
    let response = get(setup_test_app(), "/api/departments").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let ed = &json["Emergency Department"];
    assert_eq!(ed["total_kpis"], 3);
    assert_eq!(ed["critical_count"], 0);
    assert_eq!(ed["health_score"], 100.0);
    assert_eq!(json.as_object().unwrap().len(), 4);
}

#[tokio::test]
async fn test_summary() {
    let response = get(setup_test_app(), "/api/summary").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["total_kpis"], 10);
    assert_eq!(json["on_target"], 7);
    assert_eq!(json["below_target"], 3);
    assert!(json["avg_performance_ratio"].as_f64().unwrap() > 1.0);
}

#[tokio::test]
async fn test_summary_no_data() {
    let response = get(app_with_graph(KpiGraph::new()), "/api/summary").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = get_body_json(response).await;
    assert_eq!(json["error"], "No KPI data found");
}
