//! Store and orchestrator tests
//!
//! Remote behavior is exercised against a stub scoring service bound to an
//! ephemeral port, so every scenario runs the real client path.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::Query;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde_json::json;
use std::collections::HashMap;

use ssa_common::types::{
    AnalysisResponse, AnalysisWeights, Site, SiteDetail, SiteListResponse, SiteQuery,
};
use ssa_common::ClientError;

use crate::client::AnalysisClient;
use crate::store::{FilterUpdate, SiteStore};

fn site(site_id: i64, site_name: &str, score: Option<f64>) -> Site {
    Site {
        site_id,
        site_name: site_name.to_string(),
        latitude: 26.9,
        longitude: 70.9,
        region: "Rajasthan".to_string(),
        land_type: "barren".to_string(),
        total_suitability_score: score,
        analysis_timestamp: score.map(|_| Utc::now()),
    }
}

fn site_detail(site_id: i64, site_name: &str, score: Option<f64>) -> SiteDetail {
    SiteDetail {
        site_id,
        site_name: site_name.to_string(),
        latitude: 26.9,
        longitude: 70.9,
        region: "Rajasthan".to_string(),
        land_type: "barren".to_string(),
        area_sqm: 250_000,
        solar_irradiance_kwh: 5.8,
        grid_distance_km: 4.2,
        slope_degrees: 2.1,
        road_distance_km: 1.3,
        elevation_m: 220,
        solar_irradiance_score: score,
        area_score: score,
        grid_distance_score: score,
        slope_score: score,
        infrastructure_score: score,
        total_suitability_score: score,
        analysis_timestamp: score.map(|_| Utc::now()),
    }
}

fn site_list(sites: Vec<Site>) -> SiteListResponse {
    SiteListResponse {
        total: sites.len() as i64,
        limit: 50,
        offset: 0,
        sites,
    }
}

fn analysis_ok(weights: &AnalysisWeights) -> AnalysisResponse {
    AnalysisResponse {
        success: true,
        message: "Analysis completed".to_string(),
        sites_analyzed: 50,
        weights_used: weights.clone(),
        timestamp: Utc::now(),
    }
}

/// Store pointed at an address nothing listens on
fn offline_store() -> SiteStore {
    SiteStore::new(AnalysisClient::new("http://127.0.0.1:1").unwrap())
}

/// Serve a stub scoring service on an ephemeral port
async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn store_against(router: Router) -> SiteStore {
    let base_url = spawn_backend(router).await;
    SiteStore::new(AnalysisClient::new(base_url).unwrap())
}

// ----------------------------------------------------------------------
// Derived views
// ----------------------------------------------------------------------

#[test]
fn filtered_sites_honors_inclusive_bounds_and_excludes_null() {
    let store = offline_store();
    {
        let mut state = store.state.write().unwrap();
        state.sites = vec![
            site(1, "unanalyzed", None),
            site(2, "below", Some(19.9)),
            site(3, "lower edge", Some(20.0)),
            site(4, "middle", Some(50.0)),
            site(5, "upper edge", Some(80.0)),
            site(6, "above", Some(80.1)),
        ];
        state.filters.min_score = 20.0;
        state.filters.max_score = 80.0;
    }

    let filtered = store.filtered_sites();
    let ids: Vec<i64> = filtered.iter().map(|s| s.site_id).collect();
    assert_eq!(ids, vec![3, 4, 5]);
}

#[test]
fn sorted_sites_is_descending_and_stable() {
    let store = offline_store();
    store.state.write().unwrap().sites = vec![
        site(1, "first sixty", Some(60.0)),
        site(2, "ninety", Some(90.0)),
        site(3, "second sixty", Some(60.0)),
        site(4, "thirty", Some(30.0)),
        site(5, "third sixty", Some(60.0)),
    ];

    let sorted = store.sorted_sites();
    let ids: Vec<i64> = sorted.iter().map(|s| s.site_id).collect();
    // equal scores keep their original relative order
    assert_eq!(ids, vec![2, 1, 3, 5, 4]);

    let scores: Vec<f64> = sorted
        .iter()
        .map(|s| s.total_suitability_score.unwrap())
        .collect();
    assert!(scores.windows(2).all(|pair| pair[0] >= pair[1]));
}

#[test]
fn counts_ignore_filters() {
    let store = offline_store();
    {
        let mut state = store.state.write().unwrap();
        state.sites = vec![
            site(1, "a", Some(90.0)),
            site(2, "b", None),
            site(3, "c", Some(10.0)),
        ];
        state.filters.min_score = 50.0;
    }

    assert_eq!(store.total_sites(), 3);
    assert_eq!(store.analyzed_sites(), 2);
    assert_eq!(store.filtered_sites().len(), 1);
}

// ----------------------------------------------------------------------
// Weights and filters
// ----------------------------------------------------------------------

#[test]
fn reset_weights_restores_exact_default_vector() {
    let store = offline_store();
    store.update_weights(AnalysisWeights {
        solar: 0.9,
        area: 0.05,
        grid_distance: 0.03,
        slope: 0.01,
        infrastructure: 0.01,
    });
    assert_eq!(store.weights().solar, 0.9);

    store.reset_weights();
    let weights = store.weights();
    assert_eq!(weights.solar, 0.35);
    assert_eq!(weights.area, 0.25);
    assert_eq!(weights.grid_distance, 0.20);
    assert_eq!(weights.slope, 0.15);
    assert_eq!(weights.infrastructure, 0.05);
}

#[test]
fn update_filters_merges_partially_and_reset_restores_defaults() {
    let store = offline_store();

    store.update_filters(FilterUpdate {
        min_score: Some(40.0),
        max_score: None,
    });
    let filters = store.filters();
    assert_eq!(filters.min_score, 40.0);
    assert_eq!(filters.max_score, 100.0);

    store.update_filters(FilterUpdate {
        min_score: None,
        max_score: Some(70.0),
    });
    assert_eq!(store.filters().min_score, 40.0);
    assert_eq!(store.filters().max_score, 70.0);

    store.reset_filters();
    let filters = store.filters();
    assert_eq!(filters.min_score, 0.0);
    assert_eq!(filters.max_score, 100.0);
}

// ----------------------------------------------------------------------
// Orchestrated operations
// ----------------------------------------------------------------------

#[tokio::test]
async fn fetch_sites_success_replaces_sites_and_settles_flags() {
    let router = Router::new().route(
        "/api/sites",
        get(|Query(params): Query<HashMap<String, String>>| async move {
            let min_score: f64 = params
                .get("min_score")
                .expect("min_score should be forwarded")
                .parse()
                .unwrap();
            assert_eq!(min_score, 50.0);

            // hold the response long enough for the busy flag to be observed
            tokio::time::sleep(Duration::from_millis(200)).await;
            Json(site_list(vec![
                site(1, "a", Some(88.0)),
                site(2, "b", Some(72.0)),
                site(3, "c", Some(55.0)),
            ]))
        }),
    );
    let store = Arc::new(store_against(router).await);

    let task = {
        let store = store.clone();
        tokio::spawn(async move {
            store
                .fetch_sites(&SiteQuery {
                    min_score: Some(50.0),
                    ..Default::default()
                })
                .await
        })
    };

    let mut saw_loading = false;
    for _ in 0..40 {
        if store.is_loading() {
            saw_loading = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(saw_loading, "loading should be raised while in flight");

    let response = task.await.unwrap().unwrap();
    assert_eq!(response.sites.len(), 3);
    assert_eq!(store.sites().len(), 3);
    assert!(!store.is_loading());
    assert!(store.last_error().is_none());
}

#[tokio::test]
async fn fetch_detail_failure_keeps_previous_detail() {
    let router = Router::new().route(
        "/api/sites/:id",
        get(|| async {
            (
                StatusCode::NOT_FOUND,
                Json(json!({"detail": "Site with ID 999 not found"})),
            )
        }),
    );
    let store = store_against(router).await;
    store.state.write().unwrap().selected_site_detail =
        Some(site_detail(1, "kept", Some(77.0)));

    let result = store.fetch_site_detail(999).await;

    assert!(matches!(result, Err(ClientError::NotFound(_))));
    assert_eq!(
        store.last_error().as_deref(),
        Some("Site with ID 999 not found")
    );
    assert!(!store.is_loading());
    // the previously fetched detail is untouched
    assert_eq!(store.selected_site_detail().unwrap().site_id, 1);
}

#[tokio::test]
async fn analyze_success_commits_weights_and_refreshes_sites() {
    let weights = AnalysisWeights {
        solar: 0.5,
        area: 0.2,
        grid_distance: 0.15,
        slope: 0.1,
        infrastructure: 0.05,
    };
    let reply = analysis_ok(&weights);

    let router = Router::new()
        .route(
            "/api/analyze",
            post(move |Json(body): Json<serde_json::Value>| {
                let reply = reply.clone();
                async move {
                    assert_eq!(body["weights"]["solar"], 0.5);
                    Json(reply)
                }
            }),
        )
        .route(
            "/api/sites",
            get(|| async { Json(site_list(vec![site(1, "rescored", Some(91.0))])) }),
        );
    let store = store_against(router).await;

    let response = store.analyze_sites_with_weights(&weights).await.unwrap();

    assert!(response.success);
    assert_eq!(store.weights(), weights);
    assert_eq!(store.sites().len(), 1);
    assert_eq!(store.sites()[0].total_suitability_score, Some(91.0));
    assert!(!store.is_analyzing());
    assert!(!store.is_loading());
    assert!(store.last_error().is_none());
}

#[tokio::test]
async fn analyze_commits_weights_when_refetch_fails() {
    let weights = AnalysisWeights {
        solar: 0.4,
        area: 0.3,
        grid_distance: 0.2,
        slope: 0.08,
        infrastructure: 0.02,
    };
    let reply = analysis_ok(&weights);

    let router = Router::new()
        .route(
            "/api/analyze",
            post(move || {
                let reply = reply.clone();
                async move { Json(reply) }
            }),
        )
        .route(
            "/api/sites",
            get(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"detail": "Failed to retrieve sites: database gone"})),
                )
            }),
        );
    let store = store_against(router).await;

    let result = store.analyze_sites_with_weights(&weights).await;

    assert!(result.is_err());
    // the successful analysis step's weight commit is not rolled back
    assert_eq!(store.weights(), weights);
    assert_eq!(
        store.last_error().as_deref(),
        Some("Failed to retrieve sites: database gone")
    );
    assert!(!store.is_analyzing());
    assert!(!store.is_loading());
}

#[tokio::test]
async fn analyze_failure_leaves_weights_untouched() {
    let router = Router::new().route(
        "/api/analyze",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({"detail": "Weights must sum to approximately 1.0"})),
            )
        }),
    );
    let store = store_against(router).await;

    let bad_weights = AnalysisWeights {
        solar: 0.9,
        area: 0.9,
        grid_distance: 0.9,
        slope: 0.9,
        infrastructure: 0.9,
    };
    let result = store.analyze_sites_with_weights(&bad_weights).await;

    assert!(matches!(result, Err(ClientError::Server(400, _))));
    assert_eq!(store.weights(), AnalysisWeights::default());
    assert_eq!(
        store.last_error().as_deref(),
        Some("Weights must sum to approximately 1.0")
    );
    assert!(!store.is_analyzing());
}

#[tokio::test]
async fn fetch_statistics_replaces_stored_copy() {
    let router = Router::new().route(
        "/api/statistics",
        get(|| async {
            Json(json!({
                "total_sites": 50,
                "sites_analyzed": 48,
                "average_score": 61.2,
                "median_score": 63.0,
                "min_score": 12.5,
                "max_score": 94.1,
                "std_deviation": 18.4,
                "score_distribution": [],
                "regional_stats": [],
                "land_type_stats": [],
                "top_performing_sites": []
            }))
        }),
    );
    let store = store_against(router).await;

    assert!(store.statistics().is_none());
    let statistics = store.fetch_statistics().await.unwrap();
    assert_eq!(statistics.total_sites, 50);
    assert_eq!(store.statistics().unwrap().sites_analyzed, 48);
    assert!(!store.is_loading());
}

#[tokio::test]
async fn select_site_fetches_detail_for_selection() {
    let router = Router::new().route(
        "/api/sites/:id",
        get(|| async { Json(site_detail(4, "picked", Some(66.0))) }),
    );
    let store = store_against(router).await;

    store
        .select_site(Some(site(4, "picked", Some(66.0))))
        .await
        .unwrap();

    assert_eq!(store.selected_site().unwrap().site_id, 4);
    assert_eq!(store.selected_site_detail().unwrap().site_id, 4);
}

#[tokio::test]
async fn select_none_clears_selection_without_network() {
    // nothing listens here; a network call would surface as an error
    let store = offline_store();
    {
        let mut state = store.state.write().unwrap();
        state.selected_site = Some(site(4, "picked", Some(66.0)));
        state.selected_site_detail = Some(site_detail(4, "picked", Some(66.0)));
    }

    store.select_site(None).await.unwrap();

    assert!(store.selected_site().is_none());
    assert!(store.selected_site_detail().is_none());
    assert!(store.last_error().is_none());
    assert!(!store.is_loading());
}

// ----------------------------------------------------------------------
// Concurrency semantics
// ----------------------------------------------------------------------

#[tokio::test]
async fn overlapping_fetches_apply_in_completion_order() {
    let counter = Arc::new(AtomicUsize::new(0));
    let hits = counter.clone();
    let router = Router::new().route(
        "/api/sites",
        get(move || {
            let hits = hits.clone();
            async move {
                if hits.fetch_add(1, Ordering::SeqCst) == 0 {
                    // first-issued request resolves last
                    tokio::time::sleep(Duration::from_millis(400)).await;
                    Json(site_list(vec![site(1, "slow first", Some(50.0))]))
                } else {
                    Json(site_list(vec![site(2, "fast second", Some(60.0))]))
                }
            }
        }),
    );
    let store = Arc::new(store_against(router).await);

    let first = {
        let store = store.clone();
        tokio::spawn(async move { store.fetch_sites(&SiteQuery::default()).await })
    };
    tokio::time::sleep(Duration::from_millis(100)).await;
    let second = {
        let store = store.clone();
        tokio::spawn(async move { store.fetch_sites(&SiteQuery::default()).await })
    };

    first.await.unwrap().unwrap();
    second.await.unwrap().unwrap();

    // last writer wins: the slow, first-issued response overwrote the fast one
    assert_eq!(store.sites()[0].site_id, 1);
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn error_slot_holds_most_recent_failure() {
    let router = Router::new()
        .route(
            "/api/sites",
            get(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"detail": "list failed"})),
                )
            }),
        )
        .route(
            "/api/statistics",
            get(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"detail": "statistics failed"})),
                )
            }),
        );
    let store = store_against(router).await;

    let _ = store.fetch_sites(&SiteQuery::default()).await;
    assert_eq!(store.last_error().as_deref(), Some("list failed"));

    let _ = store.fetch_statistics().await;
    assert_eq!(store.last_error().as_deref(), Some("statistics failed"));

    store.clear_error();
    assert!(store.last_error().is_none());
}

#[tokio::test]
async fn transport_failure_is_recorded_and_returned() {
    let store = offline_store();

    let result = store.fetch_sites(&SiteQuery::default()).await;

    assert!(matches!(result, Err(ClientError::Transport(_))));
    assert!(store.last_error().is_some());
    assert!(!store.is_loading());
}
