use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use datawise::models::{
    AnalysisConfig, AnalysisStatus, NewPersonalData, PersonalDataPatch, Sensitivity,
};

use super::api_harness::{ApiHarness, personal_data_json};

#[tokio::test]
async fn list_replaces_store_contents() {
    let harness = ApiHarness::start().await;
    Mock::given(method("GET"))
        .and(path("/lgpd/personal-data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            personal_data_json("pd-1", "CPF", "high"),
            personal_data_json("pd-2", "E-mail", "medium"),
        ])))
        .mount(&harness.server)
        .await;

    let items = harness
        .ctx
        .lgpd_service()
        .get_all_personal_data()
        .await
        .unwrap();

    assert_eq!(items.len(), 2);
    let state = harness.ctx.lgpd().state();
    assert_eq!(state.personal_data, items);
    assert_eq!(state.personal_data[0].sensitivity, Sensitivity::High);
}

#[tokio::test]
async fn server_error_leaves_store_untouched() {
    let harness = ApiHarness::start().await;
    Mock::given(method("GET"))
        .and(path("/lgpd/personal-data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            personal_data_json("pd-1", "CPF", "high"),
        ])))
        .up_to_n_times(1)
        .mount(&harness.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/lgpd/personal-data"))
        .respond_with(ResponseTemplate::new(503).set_body_string("manutenção"))
        .mount(&harness.server)
        .await;

    let service = harness.ctx.lgpd_service();
    service.get_all_personal_data().await.unwrap();
    let before = harness.ctx.lgpd().state().personal_data.clone();

    let err = service.get_all_personal_data().await.unwrap_err();
    assert_eq!(err.status(), Some(503));
    assert_eq!(harness.ctx.lgpd().state().personal_data, before);
}

#[tokio::test]
async fn create_appends_server_record() {
    let harness = ApiHarness::start().await;
    Mock::given(method("POST"))
        .and(path("/lgpd/personal-data"))
        .and(body_json(json!({
            "name": "Telefone",
            "category": "contato",
            "source": "app",
            "sensitivity": "low"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "pd-9",
            "name": "Telefone",
            "category": "contato",
            "source": "app",
            "sensitivity": "low"
        })))
        .expect(1)
        .mount(&harness.server)
        .await;

    let created = harness
        .ctx
        .lgpd_service()
        .create_personal_data(&NewPersonalData {
            name: "Telefone".into(),
            category: "contato".into(),
            source: "app".into(),
            sensitivity: Sensitivity::Low,
            description: None,
        })
        .await
        .unwrap();

    assert_eq!(created.id, "pd-9");
    assert_eq!(harness.ctx.lgpd().state().personal_data, vec![created]);
    harness.server.verify().await;
}

#[tokio::test]
async fn update_sends_only_present_fields_and_patches_store() {
    let harness = ApiHarness::start().await;
    Mock::given(method("GET"))
        .and(path("/lgpd/personal-data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            personal_data_json("pd-1", "CPF", "medium"),
            personal_data_json("pd-2", "E-mail", "low"),
        ])))
        .mount(&harness.server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/lgpd/personal-data/pd-1"))
        .and(body_json(json!({"sensitivity": "high"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(personal_data_json("pd-1", "CPF", "high")),
        )
        .expect(1)
        .mount(&harness.server)
        .await;

    let service = harness.ctx.lgpd_service();
    service.get_all_personal_data().await.unwrap();
    let patch = PersonalDataPatch {
        sensitivity: Some(Sensitivity::High),
        ..PersonalDataPatch::default()
    };
    service.update_personal_data("pd-1", &patch).await.unwrap();

    let state = harness.ctx.lgpd().state();
    assert_eq!(state.personal_data[0].sensitivity, Sensitivity::High);
    assert_eq!(state.personal_data[0].name, "CPF");
    assert_eq!(state.personal_data[1].sensitivity, Sensitivity::Low);
    harness.server.verify().await;
}

#[tokio::test]
async fn delete_removes_from_store() {
    let harness = ApiHarness::start().await;
    Mock::given(method("GET"))
        .and(path("/lgpd/personal-data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            personal_data_json("pd-1", "CPF", "high"),
            personal_data_json("pd-2", "E-mail", "low"),
        ])))
        .mount(&harness.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/lgpd/personal-data/pd-1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&harness.server)
        .await;

    let service = harness.ctx.lgpd_service();
    service.get_all_personal_data().await.unwrap();
    service.delete_personal_data("pd-1").await.unwrap();

    let ids: Vec<_> = harness
        .ctx
        .lgpd()
        .state()
        .personal_data
        .iter()
        .map(|p| p.id.clone())
        .collect();
    assert_eq!(ids, vec!["pd-2"]);
    harness.server.verify().await;
}

#[tokio::test]
async fn failed_delete_keeps_record() {
    let harness = ApiHarness::start().await;
    harness.ctx.lgpd().set_personal_data(vec![
        serde_json::from_value(personal_data_json("pd-1", "CPF", "high")).unwrap(),
    ]);
    Mock::given(method("DELETE"))
        .and(path("/lgpd/personal-data/pd-1"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&harness.server)
        .await;

    let err = harness
        .ctx
        .lgpd_service()
        .delete_personal_data("pd-1")
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(harness.ctx.lgpd().state().personal_data.len(), 1);
}

#[tokio::test]
async fn ids_are_sent_as_a_single_path_segment() {
    let harness = ApiHarness::start().await;
    Mock::given(method("GET"))
        .and(path("/lgpd/personal-data"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([personal_data_json("pd/1?x", "CPF", "high")])),
        )
        .mount(&harness.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/lgpd/personal-data/pd%2F1%3Fx"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&harness.server)
        .await;

    let service = harness.ctx.lgpd_service();
    service.get_all_personal_data().await.unwrap();
    service.delete_personal_data("pd/1?x").await.unwrap();

    assert!(harness.ctx.lgpd().state().personal_data.is_empty());
    harness.server.verify().await;
}

#[tokio::test]
async fn clearing_description_sends_null() {
    let harness = ApiHarness::start().await;
    Mock::given(method("PUT"))
        .and(path("/lgpd/personal-data/pd-3"))
        .and(body_json(json!({"description": null})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(personal_data_json("pd-3", "RG", "low")),
        )
        .expect(1)
        .mount(&harness.server)
        .await;

    let patch = PersonalDataPatch {
        description: Some(None),
        ..PersonalDataPatch::default()
    };
    let updated = harness
        .ctx
        .lgpd_service()
        .update_personal_data("pd-3", &patch)
        .await
        .unwrap();
    assert_eq!(updated.description, None);
    harness.server.verify().await;
}

#[tokio::test]
async fn get_by_id_does_not_touch_store() {
    let harness = ApiHarness::start().await;
    Mock::given(method("GET"))
        .and(path("/lgpd/personal-data/pd-7"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(personal_data_json("pd-7", "RG", "high")),
        )
        .mount(&harness.server)
        .await;

    let item = harness
        .ctx
        .lgpd_service()
        .get_personal_data_by_id("pd-7")
        .await
        .unwrap();
    assert_eq!(item.name, "RG");
    assert!(harness.ctx.lgpd().state().personal_data.is_empty());
}

#[tokio::test]
async fn templates_are_mirrored() {
    let harness = ApiHarness::start().await;
    Mock::given(method("GET"))
        .and(path("/lgpd/templates"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "tpl-1",
            "name": "Auditoria completa",
            "description": "Todas as verificações",
            "type": "full",
            "config": {
                "sensitivity": "high",
                "includeContext": true,
                "identifyPatterns": true,
                "checkCompliance": true,
                "generateRecommendations": false
            },
            "createdAt": "2024-01-10T09:00:00Z",
            "updatedAt": "2024-02-10T09:00:00Z"
        }])))
        .mount(&harness.server)
        .await;

    let templates = harness.ctx.lgpd_service().get_templates().await.unwrap();
    assert_eq!(templates[0].kind, "full");
    assert!(!templates[0].config.generate_recommendations);
    assert_eq!(harness.ctx.lgpd().state().templates, templates);
}

#[tokio::test]
async fn analysis_start_and_result() {
    let harness = ApiHarness::start().await;
    Mock::given(method("POST"))
        .and(path("/lgpd/analysis"))
        .and(body_json(json!({
            "config": {
                "sensitivity": "medium",
                "includeContext": true,
                "identifyPatterns": true,
                "checkCompliance": true,
                "generateRecommendations": true
            }
        })))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({"analysisId": "an-1"})))
        .expect(1)
        .mount(&harness.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/lgpd/analysis/an-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "an-1",
            "personalData": [personal_data_json("pd-1", "CPF", "high")],
            "createdAt": "2024-05-01T10:00:00Z",
            "status": "completed",
            "recommendations": ["Criptografar CPF em repouso"],
            "compliance": {
                "score": 87.5,
                "issues": [{
                    "severity": "high",
                    "description": "CPF sem criptografia",
                    "recommendation": "Aplicar criptografia"
                }]
            }
        })))
        .mount(&harness.server)
        .await;

    let service = harness.ctx.lgpd_service();
    let ticket = service
        .start_analysis(&AnalysisConfig::default())
        .await
        .unwrap();
    assert_eq!(ticket.analysis_id, "an-1");

    let result = service.get_analysis_result(&ticket.analysis_id).await.unwrap();
    assert_eq!(result.status, AnalysisStatus::Completed);
    let compliance = result.compliance.unwrap();
    assert!((compliance.score - 87.5).abs() < f64::EPSILON);
    assert_eq!(compliance.issues[0].severity, Sensitivity::High);
    assert_eq!(result.personal_data.len(), 1);
    harness.server.verify().await;
}
