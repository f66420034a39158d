mod common;

use cloud_apis::providers::cloudstack::domain::{
    ExtractMode, TemplateFilter, TemplateFormat, TemplateMetadata, TemplateType,
};
use cloud_apis::providers::cloudstack::options::{
    CreateTemplateOptions, ExtractTemplateOptions, ListTemplatesOptions,
    UpdateTemplatePermissionsOptions,
};
use cloud_apis::providers::cloudstack::TemplateApi;
use common::*;
use serde_json::json;

#[tokio::test]
async fn test_list_templates_defaults_to_executable() {
    let api = cloudstack(expect(
        cloudstack_request(
            "listTemplates",
            &[("listAll", "true"), ("templatefilter", "executable")],
        ),
        ok_json("cloudstack_list_templates.json"),
    ))
    .template_api();

    let templates = api.list(&ListTemplatesOptions::new()).await.unwrap();

    assert_eq!(templates.len(), 2);
    assert_eq!(templates[0].id, "2");
    assert_eq!(templates[0].format, TemplateFormat::Vhd);
    assert_eq!(templates[0].template_type, TemplateType::Builtin);
    assert_eq!(templates[0].size, Some(8_589_934_592));
    assert!(templates[0].cross_zones);
    assert_eq!(templates[1].format, TemplateFormat::Qcow2);
    assert!(!templates[1].extractable);
}

#[tokio::test]
async fn test_list_templates_with_explicit_filter() {
    let api = cloudstack(expect(
        cloudstack_request(
            "listTemplates",
            &[("listAll", "true"), ("templatefilter", "featured"), ("zoneid", "2")],
        ),
        ok_json("cloudstack_list_templates.json"),
    ))
    .template_api();

    let options = ListTemplatesOptions::new()
        .filter(TemplateFilter::Featured)
        .zone_id("2");
    assert_eq!(api.list(&options).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_get_in_zone_is_none_on_404() {
    let api = cloudstack(expect(
        cloudstack_request(
            "listTemplates",
            &[
                ("listAll", "true"),
                ("templatefilter", "executable"),
                ("id", "2"),
                ("zoneid", "9"),
            ],
        ),
        status(404),
    ))
    .template_api();

    assert_eq!(api.get_in_zone("2", "9").await.unwrap(), None);
}

#[tokio::test]
async fn test_create_template_from_volume() {
    let api = cloudstack(expect(
        cloudstack_request(
            "createTemplate",
            &[
                ("volumeid", "3"),
                ("name", "thename"),
                ("ostypeid", "10"),
                ("displaytext", "description"),
            ],
        ),
        ok_inline(json!({"createtemplateresponse": {"id": 17, "jobid": 200}})),
    ))
    .template_api();

    let created = api
        .create(
            &TemplateMetadata::new("thename", "10", "description"),
            &CreateTemplateOptions::new().volume_id("3"),
        )
        .await
        .unwrap();
    assert_eq!(created.id, "17");
    assert_eq!(created.job_id, "200");
}

#[tokio::test]
async fn test_update_permissions_sends_no_accept() {
    let api = cloudstack(expect(
        cloudstack_request_without_accept(
            "updateTemplatePermissions",
            &[("id", "17"), ("accounts", "alice,bob"), ("ispublic", "false")],
        ),
        ok_inline(json!({"updatetemplatepermissionsresponse": {"success": "true"}})),
    ))
    .template_api();

    let options = UpdateTemplatePermissionsOptions::new()
        .accounts(["alice", "bob"])
        .is_public(false);
    api.update_permissions("17", &options).await.unwrap();
}

#[tokio::test]
async fn test_extract_template() {
    let api = cloudstack(expect(
        cloudstack_request(
            "extractTemplate",
            &[
                ("id", "3"),
                ("mode", "HTTP_DOWNLOAD"),
                ("zoneid", "5"),
                ("url", "http://example.com/template.vhd"),
            ],
        ),
        ok_inline(json!({"extracttemplateresponse": {"id": 3, "jobid": 99}})),
    ))
    .template_api();

    let job = api
        .extract(
            "3",
            ExtractMode::HttpDownload,
            "5",
            &ExtractTemplateOptions::new().url("http://example.com/template.vhd"),
        )
        .await
        .unwrap();
    assert_eq!(job.job_id, "99");
}

#[test]
fn test_extraction_from_job_result() {
    let result = json!({"template": {
        "id": 3, "name": "centos", "extractMode": "HTTP_DOWNLOAD", "state": "DOWNLOAD_URL_CREATED",
        "status": "DOWNLOAD_URL_CREATED", "zoneid": 5, "url": "http://example.com/download/3"
    }});
    let extraction = TemplateApi::extraction_from_job_result(&result)
        .unwrap()
        .unwrap();
    assert_eq!(extraction.id, "3");
    assert_eq!(extraction.zone_id.as_deref(), Some("5"));

    assert!(TemplateApi::extraction_from_job_result(&json!({}))
        .unwrap()
        .is_none());
}
