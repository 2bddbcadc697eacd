use std::sync::Arc;

use axum::Router;
use chrono::{TimeZone, Utc};
use document_actor::mock::create_mock_client;
use reqwest::StatusCode;
use serde_json::Value;
use tokio::net::TcpListener;

use tracking_refresh::clients::PurchaseOrderClient;
use tracking_refresh::http::{router, AppState};
use tracking_refresh::lifecycle::TrackingSystem;
use tracking_refresh::model::{CustomerPo, PurchaseOrder, ShipmentEntry, ShipmentStatus, TrackingSnapshot};
use tracking_refresh::sweep::Sweeper;
use tracking_refresh::tracking::ScriptedFetcher;

const SECRET: &str = "s3cret";

async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{address}")
}

fn snapshot(container: &str) -> TrackingSnapshot {
    TrackingSnapshot {
        container_number: container.to_string(),
        status: ShipmentStatus::OnWater,
        eta: Some(Utc.with_ymd_and_hms(2026, 4, 2, 0, 0, 0).unwrap()),
        events: vec![],
    }
}

async fn seeded_server(fetcher: Arc<ScriptedFetcher>, secret: Option<&str>) -> String {
    let system = TrackingSystem::new(fetcher);
    system
        .seed(vec![PurchaseOrder::new(
            "po-1",
            "1001",
            vec![CustomerPo::new(
                "C-1",
                vec![
                    ShipmentEntry::new("ABCU1", ShipmentStatus::InTransit),
                    ShipmentEntry::new("XYZW2", ShipmentStatus::Planned),
                ],
            )],
        )])
        .await
        .unwrap();
    serve(router(AppState::new(
        system.sweeper.clone(),
        secret.map(str::to_string),
    )))
    .await
}

#[tokio::test]
async fn test_unauthorized_trigger_touches_nothing() {
    let (client, mut requests) = create_mock_client::<PurchaseOrder>(8);
    let fetcher = Arc::new(ScriptedFetcher::new());
    let sweeper = Sweeper::new(PurchaseOrderClient::new(client), fetcher.clone());
    let base = serve(router(AppState::new(sweeper, Some(SECRET.to_string())))).await;
    let http = reqwest::Client::new();

    let no_token = http
        .get(format!("{base}/api/cron/refresh-tracking"))
        .send()
        .await
        .unwrap();
    assert_eq!(no_token.status(), StatusCode::UNAUTHORIZED);
    let body: Value = no_token.json().await.unwrap();
    assert_eq!(body["error"], "Unauthorized");

    let wrong_query = http
        .get(format!("{base}/api/cron/refresh-tracking?token=guess"))
        .send()
        .await
        .unwrap();
    assert_eq!(wrong_query.status(), StatusCode::UNAUTHORIZED);

    let wrong_bearer = http
        .get(format!("{base}/api/cron/refresh-tracking"))
        .bearer_auth("guess")
        .send()
        .await
        .unwrap();
    assert_eq!(wrong_bearer.status(), StatusCode::UNAUTHORIZED);

    let refresh_one = http
        .post(format!("{base}/api/tracking/refresh?container=ABCU1"))
        .send()
        .await
        .unwrap();
    assert_eq!(refresh_one.status(), StatusCode::UNAUTHORIZED);

    assert!(requests.try_recv().is_err(), "store was queried");
    assert!(fetcher.calls().is_empty(), "tracking service was called");
}

#[tokio::test]
async fn test_trigger_without_configured_secret_is_rejected() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    let base = seeded_server(fetcher.clone(), None).await;

    let response = reqwest::Client::new()
        .get(format!("{base}/api/cron/refresh-tracking?token="))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(fetcher.calls().is_empty());
}

#[tokio::test]
async fn test_trigger_runs_sweep() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    fetcher.respond(snapshot("ABCU1"));
    fetcher.fail("XYZW2", "connection reset");
    let base = seeded_server(fetcher.clone(), Some(SECRET)).await;

    let response = reqwest::Client::new()
        .get(format!("{base}/api/cron/refresh-tracking?token={SECRET}"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert!(body["message"].is_string());
    assert!(body["timestamp"].is_string());
    assert_eq!(body["summary"]["total"], 2);
    assert_eq!(body["summary"]["success"], 1);
    assert_eq!(body["summary"]["failed"], 1);
    assert_eq!(
        body["summary"]["errors"][0],
        "XYZW2: tracking request failed: connection reset"
    );
}

#[tokio::test]
async fn test_trigger_accepts_bearer_token() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    fetcher.respond(snapshot("ABCU1"));
    fetcher.respond(snapshot("XYZW2"));
    let base = seeded_server(fetcher, Some(SECRET)).await;

    let response = reqwest::Client::new()
        .get(format!("{base}/api/cron/refresh-tracking"))
        .bearer_auth(SECRET)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["summary"]["success"], 2);
}

#[tokio::test]
async fn test_enumeration_failure_is_500() {
    let (client, requests) = create_mock_client::<PurchaseOrder>(8);
    drop(requests);
    let sweeper = Sweeper::new(PurchaseOrderClient::new(client), Arc::new(ScriptedFetcher::new()));
    let base = serve(router(AppState::new(sweeper, Some(SECRET.to_string())))).await;

    let response = reqwest::Client::new()
        .get(format!("{base}/api/cron/refresh-tracking?token={SECRET}"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("failed to enumerate containers"));
}

#[tokio::test]
async fn test_single_container_lookup() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    fetcher.respond(snapshot("ABCU1"));
    fetcher.fail("BADC1", "HTTP 404");
    let base = seeded_server(fetcher, Some(SECRET)).await;
    let http = reqwest::Client::new();

    let ok = http
        .get(format!("{base}/api/tracking?container=ABCU1"))
        .send()
        .await
        .unwrap();
    assert_eq!(ok.status(), StatusCode::OK);
    let body: Value = ok.json().await.unwrap();
    assert_eq!(body["container_number"], "ABCU1");
    assert_eq!(body["status"], "on_water");

    for query in ["", "?container=", "?container=%20%20"] {
        let missing = http
            .get(format!("{base}/api/tracking{query}"))
            .send()
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::BAD_REQUEST, "{query}");
        let body: Value = missing.json().await.unwrap();
        assert!(body["error"].is_string());
    }

    let failed = http
        .get(format!("{base}/api/tracking?container=BADC1"))
        .send()
        .await
        .unwrap();
    assert_eq!(failed.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = failed.json().await.unwrap();
    assert_eq!(body["container"], "BADC1");
    assert_eq!(body["error"], "tracking request failed: HTTP 404");
}

#[tokio::test]
async fn test_single_container_refresh() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    fetcher.respond(snapshot("ABCU1"));
    fetcher.respond(snapshot("NOPE9"));
    let base = seeded_server(fetcher, Some(SECRET)).await;
    let http = reqwest::Client::new();

    let ok = http
        .post(format!("{base}/api/tracking/refresh?container=ABCU1"))
        .bearer_auth(SECRET)
        .send()
        .await
        .unwrap();
    assert_eq!(ok.status(), StatusCode::OK);
    let body: Value = ok.json().await.unwrap();
    assert_eq!(body["container"], "ABCU1");
    assert_eq!(body["outcome"]["entries_updated"], 1);

    let untracked = http
        .post(format!("{base}/api/tracking/refresh?container=NOPE9&token={SECRET}"))
        .send()
        .await
        .unwrap();
    assert_eq!(untracked.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = untracked.json().await.unwrap();
    assert_eq!(body["container"], "NOPE9");
    assert_eq!(body["error"], "no shipment entry found for container NOPE9");

    let missing = http
        .post(format!("{base}/api/tracking/refresh"))
        .bearer_auth(SECRET)
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health() {
    let base = seeded_server(Arc::new(ScriptedFetcher::new()), None).await;
    let response = reqwest::get(format!("{base}/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "ok");
}
