use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use datawise::fetch::DataFetch;

use super::api_harness::{ApiHarness, personal_data_json};

#[tokio::test]
async fn follows_dependency_changes() {
    let harness = ApiHarness::start().await;
    for (id, name) in [("pd-1", "CPF"), ("pd-2", "E-mail")] {
        Mock::given(method("GET"))
            .and(path(format!("/lgpd/personal-data/{id}")))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(personal_data_json(id, name, "high")),
            )
            .mount(&harness.server)
            .await;
    }

    let service = harness.ctx.lgpd_service();
    let mut fetch = DataFetch::start("pd-1".to_string(), move |id: String| {
        let service = service.clone();
        async move { service.get_personal_data_by_id(&id).await }
    });

    assert_eq!(fetch.settled().await.data.unwrap().name, "CPF");
    assert!(fetch.set_deps("pd-2".to_string()));
    assert_eq!(fetch.settled().await.data.unwrap().name, "E-mail");
}

#[tokio::test]
async fn http_failure_surfaces_as_error_state() {
    let harness = ApiHarness::start().await;
    Mock::given(method("GET"))
        .and(path("/lgpd/personal-data/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("não encontrado"))
        .mount(&harness.server)
        .await;

    let service = harness.ctx.lgpd_service();
    let fetch = DataFetch::start("missing".to_string(), move |id: String| {
        let service = service.clone();
        async move { service.get_personal_data_by_id(&id).await }
    });

    let state = fetch.settled().await;
    assert!(state.data.is_none());
    assert_eq!(state.error.unwrap().status(), Some(404));
}

#[tokio::test]
async fn slow_response_for_old_dependency_is_discarded() {
    let harness = ApiHarness::start().await;
    Mock::given(method("GET"))
        .and(path("/lgpd/personal-data/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(personal_data_json("slow", "Antigo", "low"))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&harness.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/lgpd/personal-data/fast"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(personal_data_json("fast", "Novo", "high")),
        )
        .mount(&harness.server)
        .await;

    let service = harness.ctx.lgpd_service();
    let mut fetch = DataFetch::start("slow".to_string(), move |id: String| {
        let service = service.clone();
        async move { service.get_personal_data_by_id(&id).await }
    });
    fetch.set_deps("fast".to_string());

    assert_eq!(fetch.settled().await.data.unwrap().id, "fast");
    tokio::time::sleep(Duration::from_millis(500)).await;
    let state = fetch.state();
    assert_eq!(state.data.unwrap().id, "fast");
    assert!(!state.loading);
}
