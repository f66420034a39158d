mod common;

use cloud_apis::core::http::Payload;
use cloud_apis::providers::nova::domain::BackupType;
use cloud_apis::providers::nova::options::CreateBackupOfServerOptions;
use cloud_apis::{CloudError, ExpectTransport, HttpRequest, HttpResponse};
use common::*;
use reqwest::Method;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

fn action(body: Value) -> HttpRequest {
    action_with_accept(body, None)
}

fn action_with_accept(body: Value, accept: Option<&str>) -> HttpRequest {
    nova_builder(Method::POST, "/servers/1/action", accept)
        .payload(Payload::json(body.to_string()))
        .build()
        .unwrap()
}

fn backup(body: Value) -> HttpRequest {
    action_with_accept(body, Some("application/json"))
}

#[tokio::test]
async fn test_standard_actions_send_null_bodies_without_accept() {
    let transport = Arc::new(
        ExpectTransport::new()
            .expect(action(json!({"suspend": null})), status(202))
            .expect(action(json!({"resume": null})), status(202))
            .expect(action(json!({"lock": null})), status(202))
            .expect(action(json!({"resetNetwork": null})), status(202))
            .expect(action(json!({"injectNetworkInfo": null})), status(202)),
    );
    let api = nova(transport).admin_actions_api(NOVA_ZONE).unwrap();

    assert!(api.suspend("1").await.unwrap());
    assert!(api.resume("1").await.unwrap());
    assert!(api.lock("1").await.unwrap());
    assert!(api.reset_network("1").await.unwrap());
    assert!(api.inject_network_info("1").await.unwrap());
}

#[tokio::test]
async fn test_action_on_missing_server_answers_false() {
    let api = nova(expect(action(json!({"pause": null})), status(404)))
        .admin_actions_api(NOVA_ZONE)
        .unwrap();

    assert!(!api.pause("1").await.unwrap());
}

#[tokio::test]
async fn test_action_in_wrong_state_fails() {
    let api = nova(expect(action(json!({"migrate": null})), status(409)))
        .admin_actions_api(NOVA_ZONE)
        .unwrap();

    let err = api.migrate("1").await.unwrap_err();
    assert!(matches!(err, CloudError::IllegalState { .. }));
}

#[tokio::test]
async fn test_live_migrate() {
    let body = json!({"os-migrateLive": {
        "host": "bighost",
        "block_migration": true,
        "disk_over_commit": false
    }});
    let api = nova(expect(action(body), status(202)))
        .admin_actions_api(NOVA_ZONE)
        .unwrap();

    assert!(api.live_migrate("1", "bighost", true, false).await.unwrap());
}

#[tokio::test]
async fn test_create_backup_answers_image_id() {
    let body = json!({"createBackup": {
        "backup_type": "weekly",
        "rotation": 3,
        "name": "mybackup",
        "metadata": {"some": "data or other"}
    }});
    let response = HttpResponse::builder()
        .status(202)
        .add_header(
            "Location",
            "http://172.16.89.149:8774/v2/images/1976b3b3-409a-468d-b16c-a9172c341b46",
        )
        .build();
    let api = nova(expect(backup(body), response))
        .admin_actions_api(NOVA_ZONE)
        .unwrap();

    let options = CreateBackupOfServerOptions::new().metadata(BTreeMap::from([(
        "some".to_string(),
        "data or other".to_string(),
    )]));
    let image_id = api
        .create_backup("1", "mybackup", BackupType::Weekly, 3, &options)
        .await
        .unwrap();
    assert_eq!(image_id, "1976b3b3-409a-468d-b16c-a9172c341b46");
}

#[tokio::test]
async fn test_create_backup_of_missing_server_fails() {
    let body = json!({"createBackup": {"backup_type": "daily", "rotation": 1, "name": "b"}});
    let api = nova(expect(backup(body), status(404)))
        .admin_actions_api(NOVA_ZONE)
        .unwrap();

    let err = api
        .create_backup("1", "b", BackupType::Daily, 1, &CreateBackupOfServerOptions::new())
        .await
        .unwrap_err();
    assert!(matches!(err, CloudError::ResourceNotFound { .. }));
}
