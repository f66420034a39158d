mod common;

use cloud_apis::providers::glesys::domain::{ServerSpec, ServerState};
use cloud_apis::providers::glesys::options::{
    CloneServerOptions, CreateServerOptions, DestroyServerOptions, ServerSizing,
    ServerStatusOptions, UpdateServerOptions,
};
use cloud_apis::{CloudError, ExpectTransport};
use common::*;
use reqwest::Method;
use serde_json::json;
use std::sync::Arc;

fn server_details() -> serde_json::Value {
    json!({"response": {
        "status": {"code": 200, "text": "OK"},
        "server": {
            "serverid": "xm3276891",
            "hostname": "glesys-s-6dd",
            "datacenter": "Falkenberg",
            "platform": "Xen",
            "templatename": "Ubuntu 11.04 x64",
            "description": "glesys-s-6dd",
            "cpucores": 1,
            "memorysize": 512,
            "disksize": 5,
            "transfer": 50,
            "state": "running",
            "cost": {"amount": 13.22, "currency": "EUR", "timeperiod": "month"},
            "iplist": [
                {"ipaddress": "109.74.10.13", "version": 4, "cost": 2.0, "currency": "EUR"},
                {"ipaddress": "2a00:1a28:1251:0:0:0:0:2", "version": 6, "cost": 0, "currency": "EUR"}
            ]
        }
    }})
}

#[tokio::test]
async fn test_list_servers() {
    let body = json!({"response": {"servers": [
        {"serverid": "xm3276891", "hostname": "glesys-s-6dd", "datacenter": "Falkenberg", "platform": "Xen"}
    ]}});
    let api = glesys(expect(glesys_post("server/list", &[]), ok_inline(body))).server_api();

    let servers = api.list().await.unwrap();
    assert_eq!(servers.len(), 1);
    assert_eq!(servers[0].id, "xm3276891");
    assert_eq!(servers[0].platform, "Xen");
}

#[tokio::test]
async fn test_list_servers_is_empty_on_404() {
    let api = glesys(expect(glesys_post("server/list", &[]), status(404))).server_api();

    assert!(api.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_server_details() {
    let api = glesys(expect(
        glesys_post(
            "server/details",
            &[("includestate", "true"), ("serverid", "xm3276891")],
        ),
        ok_inline(server_details()),
    ))
    .server_api();

    let server = api.get("xm3276891").await.unwrap().unwrap();
    assert_eq!(server.template_name, "Ubuntu 11.04 x64");
    assert_eq!(server.state, Some(ServerState::Running));
    assert_eq!(server.cost.currency, "EUR");
    assert_eq!(server.ips.len(), 2);
    assert!(server.ips[0].is_v4());
    assert!(!server.ips[1].is_v4());
}

#[tokio::test]
async fn test_get_missing_server_is_none() {
    let api = glesys(expect(
        glesys_post(
            "server/details",
            &[("includestate", "true"), ("serverid", "xm3276891")],
        ),
        status(404),
    ))
    .server_api();

    assert_eq!(api.get("xm3276891").await.unwrap(), None);
}

#[tokio::test]
async fn test_create_server() {
    let request = glesys_post(
        "server/create",
        &[
            ("hostname", "cloudapis-test"),
            ("rootpassword", "password"),
            ("datacenter", "Falkenberg"),
            ("platform", "OpenVZ"),
            ("templatename", "Ubuntu 32-bit"),
            ("disksize", "5"),
            ("memorysize", "512"),
            ("cpucores", "1"),
            ("transfer", "50"),
            ("description", "Description-of-server"),
            ("ip", "1.1.1.1"),
        ],
    );
    let api = glesys(expect(request, ok_inline(server_details()))).server_api();

    let spec = ServerSpec::builder()
        .datacenter("Falkenberg")
        .platform("OpenVZ")
        .template_name("Ubuntu 32-bit")
        .disk_size_gb(5)
        .memory_size_mb(512)
        .cpu_cores(1)
        .transfer_gb(50)
        .build()
        .unwrap();
    let options = CreateServerOptions::new()
        .description("Description-of-server")
        .ip("1.1.1.1");
    let server = api
        .create_with_hostname_and_root_password(&spec, "cloudapis-test", "password", &options)
        .await
        .unwrap();
    assert_eq!(server.id, "xm3276891");
}

#[tokio::test]
async fn test_edit_without_body_is_none() {
    let request = glesys_post(
        "server/edit",
        &[
            ("serverid", "server111"),
            ("description", "Description-of-server"),
            ("disksize", "1"),
            ("memorysize", "512"),
            ("cpucores", "1"),
            ("hostname", "cloudapis-test"),
        ],
    );
    let api = glesys(expect(request, status(206))).server_api();

    let options = UpdateServerOptions::new()
        .description("Description-of-server")
        .disk_size_gb(1)
        .memory_size_mb(512)
        .cpu_cores(1)
        .hostname("cloudapis-test");
    assert_eq!(api.update("server111", &options).await.unwrap(), None);
}

#[tokio::test]
async fn test_clone_missing_server_fails() {
    let request = glesys_post(
        "server/clone",
        &[
            ("serverid", "server111"),
            ("hostname", "hostname1"),
            ("disksize", "1"),
        ],
    );
    let api = glesys(expect(request, status(404))).server_api();

    let err = api
        .clone("server111", "hostname1", &CloneServerOptions::new().disk_size_gb(1))
        .await
        .unwrap_err();
    assert!(matches!(err, CloudError::ResourceNotFound { .. }));
}

#[tokio::test]
async fn test_status_with_state_only() {
    let request = glesys_post(
        "server/status",
        &[("serverid", "server321"), ("statustype", "state")],
    );
    let body = json!({"response": {"server": {"state": "locked"}}});
    let api = glesys(expect(request, ok_inline(body))).server_api();

    let options = ServerStatusOptions::new().state().state();
    let status = api.get_status("server321", &options).await.unwrap().unwrap();
    assert_eq!(status.state, Some(ServerState::Locked));
    assert_eq!(status.cpu, None);
}

#[tokio::test]
async fn test_full_status() {
    let body = json!({"response": {"server": {
        "state": "running",
        "cpu": {"usage": 0, "max": 1, "unit": "cores"},
        "memory": {"usage": "2", "max": "512", "unit": "MB"},
        "disk": {"usage": 0, "max": 5120, "unit": "MB"},
        "uptime": {"current": 21, "unit": "seconds"}
    }}});
    let api = glesys(expect(
        glesys_post("server/status", &[("serverid", "xm3276891")]),
        ok_inline(body),
    ))
    .server_api();

    let status = api
        .get_status("xm3276891", &ServerStatusOptions::new())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(status.memory.unwrap().usage, 2.0);
    assert_eq!(status.disk.unwrap().max, 5120.0);
    assert_eq!(status.uptime.unwrap().current, 21);
}

#[tokio::test]
async fn test_console() {
    let body = json!({"response": {"console": {
        "host": "79.99.2.147",
        "port": 59478,
        "protocol": "vnc",
        "password": "1476897311"
    }}});
    let api = glesys(expect(
        glesys_post("server/console", &[("serverid", "xm3276891")]),
        ok_inline(body),
    ))
    .server_api();

    let console = api.get_console("xm3276891").await.unwrap().unwrap();
    assert_eq!(console.port, 59478);
    assert_eq!(console.protocol, "vnc");
}

#[tokio::test]
async fn test_limits() {
    let body = json!({"response": {"limits": {
        "numproc": {"held": "19", "maxheld": "47", "barrier": "1000", "limit": "1000", "failcnt": "0"}
    }}});
    let api = glesys(expect(
        glesys_post("server/limits", &[("serverid", "server321")]),
        ok_inline(body),
    ))
    .server_api();

    let limits = api.get_limits("server321").await.unwrap();
    assert_eq!(limits["numproc"].max_held, 47);
    assert_eq!(limits["numproc"].barrier, 1000);
}

#[tokio::test]
async fn test_power_actions() {
    let transport = Arc::new(
        ExpectTransport::new()
            .expect(
                glesys_post("server/start", &[("serverid", "server777")]),
                status(401),
            )
            .expect(
                glesys_post("server/stop", &[("type", "hard"), ("serverid", "server777")]),
                ok_inline(json!({"response": {"status": {"code": 200}}})),
            )
            .expect(
                glesys_post("server/reboot", &[("serverid", "server777")]),
                ok_inline(json!({"response": {"status": {"code": 200}}})),
            ),
    );
    let api = glesys(transport).server_api();

    let err = api.start("server777").await.unwrap_err();
    assert!(matches!(err, CloudError::Authorization { .. }));
    api.hard_stop("server777").await.unwrap();
    api.reboot("server777").await.unwrap();
}

#[tokio::test]
async fn test_destroy_keeping_ips() {
    let request = glesys_request(
        Method::POST,
        "server/destroy",
        false,
        &[("serverid", "server777"), ("keepip", "true")],
    );
    let api = glesys(expect(request, status(200))).server_api();

    api.destroy("server777", &DestroyServerOptions::keep_ip())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_destroy_releases_ips_by_default() {
    let request = glesys_request(
        Method::POST,
        "server/destroy",
        false,
        &[("serverid", "server777"), ("keepip", "false")],
    );
    let api = glesys(expect(request, status(200))).server_api();

    api.destroy("server777", &DestroyServerOptions::new())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_resource_usage() {
    let body = json!({"response": {"usage": {
        "info": {"resource": "bandwidth", "resolution": "minute", "unit": "KB"},
        "values": [
            {"value": 0.032, "timestamp": "2012-06-24 19:30:48"},
            {"value": "1.5", "timestamp": "2012-06-24T19:31:48Z"}
        ]
    }}});
    let api = glesys(expect(
        glesys_post(
            "server/resourceusage",
            &[
                ("serverid", "xm3276891"),
                ("resource", "bandwidth"),
                ("resolution", "minute"),
            ],
        ),
        ok_inline(body),
    ))
    .server_api();

    let usage = api
        .get_resource_usage("xm3276891", "bandwidth", "minute")
        .await
        .unwrap();
    assert_eq!(usage.info.unit, "KB");
    assert_eq!(usage.values.len(), 2);
    assert_eq!(usage.values[1].value, 1.5);
    assert!(usage.values[0].timestamp < usage.values[1].timestamp);
}

#[tokio::test]
async fn test_templates_and_allowed_arguments() {
    let transport = Arc::new(
        ExpectTransport::new()
            .expect(
                glesys_request(Method::GET, "server/templates", true, &[]),
                ok_inline(json!({"response": {"templates": {
                    "OpenVZ": [{
                        "name": "Centos 5", "minimumdisksize": 5, "minimummemorysize": 128,
                        "operatingsystem": "centos", "platform": "OpenVZ"
                    }],
                    "Xen": [{
                        "name": "Debian 6.0 64-bit", "minimumdisksize": 5, "minimummemorysize": 512,
                        "operatingsystem": "debian", "platform": "Xen"
                    }]
                }}})),
            )
            .expect(
                glesys_request(Method::GET, "server/allowedarguments", true, &[]),
                ok_inline(json!({"response": {"argumentslist": {
                    "Xen": {
                        "disksize": {"allowedvalues": [5, 10], "units": "GB",
                                     "costperunit": {"amount": 1, "currency": "EUR", "timeperiod": "month"}},
                        "template": ["Debian 6.0 64-bit"],
                        "datacenter": ["Falkenberg", "Stockholm"]
                    }
                }}})),
            ),
    );
    let api = glesys(transport).server_api();

    let templates = api.list_templates().await.unwrap();
    assert_eq!(templates.len(), 2);
    assert!(templates.iter().any(|t| t.os == "debian" && t.min_mem_size == 512));

    let allowed = api.allowed_arguments_for_create_by_platform().await.unwrap();
    let xen = &allowed["Xen"];
    assert_eq!(xen.disk_sizes.allowed_units, vec![5, 10]);
    assert_eq!(xen.data_centers, vec!["Falkenberg", "Stockholm"]);
}
