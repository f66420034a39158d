mod common;

use cloud_apis::providers::cloudstack::domain::VirtualMachineState;
use cloud_apis::providers::cloudstack::options::{
    AccountInDomain, AccountInDomainOptions, DeployVirtualMachineOptions,
    ListVirtualMachinesOptions, StopVirtualMachineOptions,
};
use cloud_apis::CloudError;
use common::*;
use serde_json::json;

#[tokio::test]
async fn test_list_virtual_machines() {
    let api = cloudstack(expect(
        cloudstack_request("listVirtualMachines", &[("listAll", "true")]),
        ok_json("cloudstack_list_virtual_machines.json"),
    ))
    .virtual_machine_api();

    let machines = api.list(&ListVirtualMachinesOptions::new()).await.unwrap();

    assert_eq!(machines.len(), 1);
    let vm = &machines[0];
    assert_eq!(vm.id, "54");
    assert_eq!(vm.name.as_deref(), Some("i-3-54-VM"));
    assert_eq!(vm.state, VirtualMachineState::Running);
    assert_eq!(vm.cpu_used.as_deref(), Some("7.95%"));
    assert_eq!(vm.memory, 512);
    assert_eq!(vm.nics[0].ip_address.as_deref(), Some("10.1.1.18"));
    assert!(vm.nics[0].is_default);
    assert_eq!(vm.security_groups[0].name.as_deref(), Some("default"));
    assert!(vm.created.is_some());
}

#[tokio::test]
async fn test_list_virtual_machines_with_options() {
    let api = cloudstack(expect(
        cloudstack_request(
            "listVirtualMachines",
            &[("listAll", "true"), ("zoneid", "1"), ("account", "adrian"), ("domainid", "1")],
        ),
        ok_json("cloudstack_list_virtual_machines.json"),
    ))
    .virtual_machine_api();

    let options = ListVirtualMachinesOptions::new()
        .zone_id("1")
        .account_in_domain("adrian", "1");
    assert_eq!(api.list(&options).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_list_virtual_machines_is_empty_on_404() {
    let api = cloudstack(expect(
        cloudstack_request("listVirtualMachines", &[("listAll", "true")]),
        status(404),
    ))
    .virtual_machine_api();

    assert!(api
        .list(&ListVirtualMachinesOptions::new())
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_get_virtual_machine() {
    let api = cloudstack(expect(
        cloudstack_request("listVirtualMachines", &[("listAll", "true"), ("id", "54")]),
        ok_json("cloudstack_list_virtual_machines.json"),
    ))
    .virtual_machine_api();

    let vm = api.get("54").await.unwrap().unwrap();
    assert_eq!(vm.zone_name.as_deref(), Some("San Jose 1"));
}

#[tokio::test]
async fn test_get_virtual_machine_is_none_when_absent() {
    let transport = expect(
        cloudstack_request("listVirtualMachines", &[("listAll", "true"), ("id", "99")]),
        ok_inline(json!({"listvirtualmachinesresponse": {}})),
    );
    let api = cloudstack(transport).virtual_machine_api();

    assert_eq!(api.get("99").await.unwrap(), None);
}

#[tokio::test]
async fn test_deploy_virtual_machine() {
    let api = cloudstack(expect(
        cloudstack_request(
            "deployVirtualMachine",
            &[
                ("zoneid", "4"),
                ("serviceofferingid", "1"),
                ("templateid", "4"),
                ("displayname", "web-1"),
                ("networkids", "5,6"),
            ],
        ),
        ok_inline(json!({"deployvirtualmachineresponse": {"id": 1234, "jobid": 50006}})),
    ))
    .virtual_machine_api();

    let options = DeployVirtualMachineOptions::new()
        .display_name("web-1")
        .network_ids(["5", "6"]);
    let created = api.deploy("4", "1", "4", &options).await.unwrap();

    assert_eq!(created.id, "1234");
    assert_eq!(created.job_id, "50006");
}

#[tokio::test]
async fn test_stop_forced() {
    let api = cloudstack(expect(
        cloudstack_request("stopVirtualMachine", &[("id", "54"), ("forced", "true")]),
        ok_inline(json!({"stopvirtualmachineresponse": {"jobid": "50007"}})),
    ))
    .virtual_machine_api();

    let job = api
        .stop_with_options("54", &StopVirtualMachineOptions::new().forced(true))
        .await
        .unwrap();
    assert_eq!(job.job_id, "50007");
}

#[tokio::test]
async fn test_destroy_answers_job() {
    let api = cloudstack(expect(
        cloudstack_request("destroyVirtualMachine", &[("id", "54")]),
        ok_inline(json!({"destroyvirtualmachineresponse": {"jobid": 50008}})),
    ))
    .virtual_machine_api();

    assert_eq!(api.destroy("54").await.unwrap().job_id, "50008");
}

#[tokio::test]
async fn test_assign_virtual_machine() {
    let api = cloudstack(expect(
        cloudstack_request(
            "assignVirtualMachine",
            &[("virtualmachineid", "54"), ("account", "adrian"), ("domainid", "1")],
        ),
        ok_inline(json!({"assignvirtualmachineresponse": {"virtualmachine": [
            {"id": 54, "account": "adrian", "state": "Stopped"}
        ]}})),
    ))
    .virtual_machine_api();

    let vm = api
        .assign("54", &AccountInDomainOptions::new().account_in_domain("adrian", "1"))
        .await
        .unwrap();
    assert_eq!(vm.account.as_deref(), Some("adrian"));
    assert_eq!(vm.state, VirtualMachineState::Stopped);
}

#[tokio::test]
async fn test_unauthorized_maps_to_authorization() {
    let api = cloudstack(expect(
        cloudstack_request("rebootVirtualMachine", &[("id", "54")]),
        status(401),
    ))
    .virtual_machine_api();

    let err = api.reboot("54").await.unwrap_err();
    assert!(matches!(err, CloudError::Authorization { .. }));
}
