mod common;

use cloud_apis::core::http::Payload;
use cloud_apis::providers::nova::domain::{RebootType, ServerStatus};
use cloud_apis::providers::nova::options::{CreateServerOptions, ListOptions};
use cloud_apis::{CloudError, ExpectTransport, HttpResponse};
use common::*;
use reqwest::Method;
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;

fn server_body() -> serde_json::Value {
    json!({"server": {
        "id": 71752,
        "name": "sample-server",
        "uuid": "d84e2086-fc0d-11e0-8e08-2837371c69ae",
        "tenant_id": "37936628937291",
        "user_id": "54321",
        "created": "2010-08-10T12:00:00Z",
        "updated": "2010-10-10T12:00:00Z",
        "hostId": "e4d909c290d0fb1ca068ffaddf22cbd0",
        "status": "BUILD",
        "image": {"id": "1241", "links": [{"rel": "bookmark", "href": "https://compute.north.host/images/1241"}]},
        "flavor": {"id": "100", "links": []},
        "addresses": {"private": [{"addr": "10.176.42.16", "version": 4}]},
        "metadata": {"Server Label": "Web Head 1"},
        "links": [{"rel": "self", "href": "https://compute.north.host/v1.1/servers/71752"}]
    }})
}

#[tokio::test]
async fn test_list_in_detail() {
    let api = nova(expect(
        nova_get("/servers/detail"),
        ok_inline(json!({"servers": [server_body()["server"].clone()]})),
    ))
    .server_api(NOVA_ZONE)
    .unwrap();

    let servers = api.list_in_detail(&ListOptions::new()).await.unwrap();
    assert_eq!(servers.len(), 1);
    let server = &servers[0];
    assert_eq!(server.id, "71752");
    assert_eq!(server.status, ServerStatus::Build);
    assert_eq!(server.addresses_on("private")[0].addr, "10.176.42.16");
    assert_eq!(server.metadata["Server Label"], "Web Head 1");
    assert_eq!(server.image.as_ref().map(|i| i.id.as_str()), Some("1241"));
}

#[tokio::test]
async fn test_list_with_paging() {
    let request = nova_builder(Method::GET, "/servers", Some("application/json"))
        .add_query_param("limit", "10")
        .add_query_param("marker", "71751")
        .build()
        .unwrap();
    let api = nova(expect(request, ok_inline(json!({"servers": []}))))
        .server_api(NOVA_ZONE)
        .unwrap();

    let servers = api
        .list(&ListOptions::new().limit(10).marker("71751"))
        .await
        .unwrap();
    assert!(servers.is_empty());
}

#[tokio::test]
async fn test_get_and_missing_server() {
    let transport = Arc::new(
        ExpectTransport::new()
            .expect(nova_get("/servers/71752"), ok_inline(server_body()))
            .expect(nova_get("/servers/404"), status(404)),
    );
    let api = nova(transport).server_api(NOVA_ZONE).unwrap();

    let server = api.get("71752").await.unwrap().unwrap();
    assert_eq!(server.name.as_deref(), Some("sample-server"));
    assert_eq!(api.get("404").await.unwrap(), None);
}

#[tokio::test]
async fn test_create_with_options() {
    let body = json!({"server": {
        "name": "test-e92",
        "imageRef": "1241",
        "flavorRef": "100",
        "key_name": "foo",
        "security_groups": [{"name": "default"}, {"name": "web"}]
    }});
    let request = nova_builder(Method::POST, "/servers", Some("application/json"))
        .payload(Payload::json(body.to_string()))
        .build()
        .unwrap();
    let response = ok_inline(json!({"server": {
        "id": 71752,
        "adminPass": "MVk5HPrazHcG",
        "links": []
    }}));
    let api = nova(expect(request, response)).server_api(NOVA_ZONE).unwrap();

    let options = CreateServerOptions::new()
        .key_pair_name("foo")
        .security_group_names(["default", "web", "default"])
        .unwrap();
    let created = api.create("test-e92", "1241", "100", &options).await.unwrap();
    assert_eq!(created.id, "71752");
    assert_eq!(created.admin_pass.as_deref(), Some("MVk5HPrazHcG"));
}

#[tokio::test]
async fn test_delete_answers_false_when_gone() {
    let request = nova_builder(Method::DELETE, "/servers/71752", Some("application/json"))
        .build()
        .unwrap();
    let api = nova(expect(request, status(404))).server_api(NOVA_ZONE).unwrap();

    assert!(!api.delete("71752").await.unwrap());
}

#[tokio::test]
async fn test_actions_accept_anything() {
    let action = |body: serde_json::Value| {
        nova_builder(Method::POST, "/servers/71752/action", Some("*/*"))
            .payload(Payload::json(body.to_string()))
            .build()
            .unwrap()
    };
    let transport = Arc::new(
        ExpectTransport::new()
            .expect(action(json!({"reboot": {"type": "HARD"}})), status(202))
            .expect(action(json!({"resize": {"flavorRef": "3"}})), status(202))
            .expect(action(json!({"confirmResize": null})), status(202))
            .expect(action(json!({"changePassword": {"adminPass": "foo"}})), status(202)),
    );
    let api = nova(transport.clone()).server_api(NOVA_ZONE).unwrap();

    api.reboot("71752", RebootType::Hard).await.unwrap();
    api.resize("71752", "3").await.unwrap();
    api.confirm_resize("71752").await.unwrap();
    api.change_admin_pass("71752", "foo").await.unwrap();
    assert_eq!(transport.requests().len(), 4);
}

#[tokio::test]
async fn test_action_on_missing_server_fails() {
    let request = nova_builder(Method::POST, "/servers/71752/action", Some("*/*"))
        .payload(Payload::json(json!({"os-stop": null}).to_string()))
        .build()
        .unwrap();
    let api = nova(expect(request, status(404))).server_api(NOVA_ZONE).unwrap();

    let err = api.stop("71752").await.unwrap_err();
    assert!(matches!(err, CloudError::ResourceNotFound { .. }));
}

#[tokio::test]
async fn test_create_image_reads_location() {
    let request = nova_builder(Method::POST, "/servers/71752/action", Some("application/json"))
        .payload(Payload::json(
            json!({"createImage": {"name": "my-image", "metadata": {}}}).to_string(),
        ))
        .build()
        .unwrap();
    let response = HttpResponse::builder()
        .status(202)
        .add_header(
            "Location",
            "https://az-1.region-a.geo-1.compute.hpcloudsvc.com/v1.1/3456/images/52415800-8b69-11e0-9b19-734f5736d2a2",
        )
        .build();
    let api = nova(expect(request, response)).server_api(NOVA_ZONE).unwrap();

    let image_id = api.create_image_from_server("my-image", "71752").await.unwrap();
    assert_eq!(image_id, "52415800-8b69-11e0-9b19-734f5736d2a2");
}

#[tokio::test]
async fn test_create_image_without_location_is_illegal_state() {
    let request = nova_builder(Method::POST, "/servers/71752/action", Some("application/json"))
        .payload(Payload::json(
            json!({"createImage": {"name": "my-image", "metadata": {}}}).to_string(),
        ))
        .build()
        .unwrap();
    let api = nova(expect(request, status(202))).server_api(NOVA_ZONE).unwrap();

    let err = api
        .create_image_from_server("my-image", "71752")
        .await
        .unwrap_err();
    assert!(matches!(err, CloudError::IllegalState { .. }));
}

#[tokio::test]
async fn test_metadata() {
    let metadata = BTreeMap::from([("Server Label".to_string(), "Web Head 1".to_string())]);
    let transport = Arc::new(
        ExpectTransport::new()
            .expect(nova_get("/servers/1/metadata"), status(404))
            .expect(
                nova_builder(Method::PUT, "/servers/1/metadata", Some("application/json"))
                    .payload(Payload::json(json!({"metadata": metadata}).to_string()))
                    .build()
                    .unwrap(),
                ok_inline(json!({"metadata": metadata})),
            )
            .expect(
                nova_get("/servers/1/metadata/Server%20Label"),
                ok_inline(json!({"metadata": {"Server Label": "Web Head 1"}})),
            )
            .expect(
                nova_builder(Method::DELETE, "/servers/1/metadata/Server%20Label", Some("*/*"))
                    .build()
                    .unwrap(),
                status(404),
            ),
    );
    let api = nova(transport).server_api(NOVA_ZONE).unwrap();

    assert!(api.get_metadata("1").await.unwrap().is_empty());
    assert_eq!(api.set_metadata("1", &metadata).await.unwrap(), metadata);
    assert_eq!(
        api.get_metadata_item("1", "Server Label").await.unwrap().as_deref(),
        Some("Web Head 1")
    );
    api.delete_metadata_item("1", "Server Label").await.unwrap();
}

#[tokio::test]
async fn test_too_much_metadata_is_rejected_before_sending() {
    let api = nova(Arc::new(ExpectTransport::new()))
        .server_api(NOVA_ZONE)
        .unwrap();
    let metadata: BTreeMap<String, String> = (0..6)
        .map(|i| (format!("key{i}"), "value".to_string()))
        .collect();

    let err = api.update_metadata("1", &metadata).await.unwrap_err();
    assert!(matches!(err, CloudError::InvalidArgument { .. }));
}

#[tokio::test]
async fn test_unknown_zone_has_no_api() {
    let api = nova(Arc::new(ExpectTransport::new()));
    assert!(api.server_api("az-9").is_none());
    assert_eq!(api.configured_zones(), vec![NOVA_ZONE]);
}

#[tokio::test]
async fn test_get_diagnostics() {
    let response = HttpResponse::builder()
        .status(202)
        .message("Accepted")
        .payload_json(
            json!({
                "cpu0_time": 17300000000u64,
                "memory": 524288,
                "vda_errors": -1,
                "vda_read": 262144,
                "vda_write_req": 112,
                "vnet0_rx": 2070139,
                "vnet0_tx_drop": 0,
                "driver": "libvirt"
            })
            .to_string(),
        )
        .build();
    let api = nova(expect(nova_get("/servers/123/diagnostics"), response))
        .server_api(NOVA_ZONE)
        .unwrap();

    let diagnostics = api.get_diagnostics("123").await.unwrap().unwrap();
    assert_eq!(diagnostics["cpu0_time"], "17300000000");
    assert_eq!(diagnostics["memory"], "524288");
    assert_eq!(diagnostics["vda_errors"], "-1");
    assert_eq!(diagnostics["driver"], "libvirt");
    assert_eq!(diagnostics.len(), 8);
}

#[tokio::test]
async fn test_get_diagnostics_absent_when_refused_missing_or_failing() {
    for code in [403, 404, 500] {
        let api = nova(expect(nova_get("/servers/123/diagnostics"), status(code)))
            .server_api(NOVA_ZONE)
            .unwrap();
        assert!(api.get_diagnostics("123").await.unwrap().is_none(), "status {code}");
    }
}

#[tokio::test]
async fn test_get_diagnostics_unauthorized_is_an_error() {
    let api = nova(expect(nova_get("/servers/123/diagnostics"), status(401)))
        .server_api(NOVA_ZONE)
        .unwrap();
    assert!(api.get_diagnostics("123").await.unwrap_err().is_authorization());
}
