//! End-to-end enrichment through the real HTTP client against a local
//! fake upstream.

mod common;

use common::{http_service, Upstream};
use peopledir_common::db::Gender;
use peopledir_svc::db::{UserFilter, UserStore};
use peopledir_svc::inference::{HttpUserApi, InferenceKind, UserApi, ApiError};
use peopledir_svc::service::{EnrichOutcome, EnrichStage, ErrorKind};
use std::time::Duration;

async fn row_count(store: &impl UserStore) -> usize {
    store.list(&UserFilter::default()).await.unwrap().len()
}

#[tokio::test]
async fn test_most_probable_nation_is_stored() {
    let upstream = Upstream::ivan();
    let settings = upstream.clone().spawn().await;
    let (service, store) = http_service(&settings, Duration::from_secs(5)).await;

    let outcome = service.handle_user("Ivan", "Ivanov", "Ivanovich").await.unwrap();

    let EnrichOutcome::Created(id) = outcome else {
        panic!("expected Created, got {:?}", outcome);
    };
    let record = store.get(id).await.unwrap();
    assert_eq!(record.gender, Gender::Male);
    assert_eq!(record.gender.code(), "м");
    assert_eq!(record.nation, "UA");
    assert_eq!(record.age, 42);

    let services: Vec<String> = upstream.hits().into_iter().map(|(s, _)| s).collect();
    assert_eq!(services, vec!["age", "gender", "nation"]);
}

#[tokio::test]
async fn test_empty_country_list_falls_back_to_ru() {
    let mut upstream = Upstream::ivan();
    upstream.nation = serde_json::json!({"count": 0, "name": "Ivan", "country": []});
    let settings = upstream.spawn().await;
    let (service, store) = http_service(&settings, Duration::from_secs(5)).await;

    service.handle_user("Ivan", "Ivanov", "Ivanovich").await.unwrap();

    let users = store.list(&UserFilter::default()).await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].nation, "RU");
}

#[tokio::test]
async fn test_repeat_submission_adds_one_row() {
    let settings = Upstream::ivan().spawn().await;
    let (service, store) = http_service(&settings, Duration::from_secs(5)).await;

    let before = row_count(&store).await;
    let first = service.handle_user("Ivan", "Ivanov", "Ivanovich").await.unwrap();
    let second = service.handle_user("Ivan", "Ivanov", "Ivanovich").await.unwrap();

    assert!(matches!(first, EnrichOutcome::Created(_)));
    assert_eq!(second, EnrichOutcome::Skipped);
    assert_eq!(row_count(&store).await, before + 1);
}

#[tokio::test]
async fn test_age_timeout_aborts_before_other_calls() {
    let mut upstream = Upstream::ivan();
    upstream.age_delay = Duration::from_secs(3);
    let settings = upstream.clone().spawn().await;
    let (service, store) = http_service(&settings, Duration::from_millis(200)).await;

    let err = service
        .handle_user("Ivan", "Ivanov", "Ivanovich")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Network);
    assert_eq!(err.stage(), EnrichStage::FetchingAge);
    assert_eq!(row_count(&store).await, 0);
    assert_eq!(upstream.hits_for("gender"), 0);
    assert_eq!(upstream.hits_for("nation"), 0);
}

#[tokio::test]
async fn test_unexpected_payload_shape_is_malformed() {
    let mut upstream = Upstream::ivan();
    upstream.gender = serde_json::json!(["male", 0.9]);
    let settings = upstream.clone().spawn().await;
    let (service, store) = http_service(&settings, Duration::from_secs(5)).await;

    let err = service
        .handle_user("Ivan", "Ivanov", "Ivanovich")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::UpstreamMalformed);
    assert_eq!(row_count(&store).await, 0);
    assert_eq!(upstream.hits_for("nation"), 0);
}

#[tokio::test]
async fn test_name_is_url_encoded() {
    let upstream = Upstream::ivan();
    let settings = upstream.clone().spawn().await;
    let api = HttpUserApi::new(&settings).unwrap();

    api.fetch_age("Анна Мария&x=1").await.unwrap();

    assert_eq!(
        upstream.hits(),
        vec![("age".to_string(), "Анна Мария&x=1".to_string())]
    );
}

#[tokio::test]
async fn test_non_success_status_is_reported() {
    let settings = Upstream::ivan().spawn().await;
    let mut broken = settings.clone();
    broken.gender_url = settings.gender_url.replace("/gender", "/missing");
    let api = HttpUserApi::new(&broken).unwrap();

    let err = api.fetch(InferenceKind::Gender, "Ivan").await.unwrap_err();

    assert!(matches!(err, ApiError::Status(404, _)), "got {:?}", err);
}

#[tokio::test]
async fn test_unreachable_upstream_is_network_error() {
    // Bind then drop to get a port nobody listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut settings = peopledir_common::config::ApiSettings::default();
    settings.age_url = format!("http://{}/age", addr);
    let api = HttpUserApi::new(&settings).unwrap();

    let err = api.fetch_age("Ivan").await.unwrap_err();

    assert!(matches!(err, ApiError::Network(_)), "got {:?}", err);
}
