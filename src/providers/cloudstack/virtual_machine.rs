use super::domain::{AsyncCreateResponse, AsyncJobResponse, VirtualMachine};
use super::options::{
    AccountInDomainOptions, DeployVirtualMachineOptions, ListVirtualMachinesOptions,
    StopVirtualMachineOptions,
};
use super::CloudStackApi;
use crate::core::fallback::Fallback;
use crate::core::options::RequestOptions;
use crate::utils::error::Result;
use tracing::debug;

const LIST: &str = "listVirtualMachines";
const KEY: &str = "virtualmachine";

/// Virtual machine lifecycle. Commands that start a job answer with the job id.
#[derive(Debug, Clone)]
pub struct VirtualMachineApi {
    api: CloudStackApi,
}

impl VirtualMachineApi {
    pub(crate) fn new(api: CloudStackApi) -> Self {
        Self { api }
    }

    pub async fn list(&self, options: &ListVirtualMachinesOptions) -> Result<Vec<VirtualMachine>> {
        let builder = options.apply_to(self.api.list_command(LIST));
        self.api.call_list(LIST, KEY, builder).await.empty_on_not_found()
    }

    pub async fn get(&self, id: &str) -> Result<Option<VirtualMachine>> {
        let builder = self.api.list_command(LIST).add_query_param("id", id);
        Ok(self
            .api
            .call_named(LIST, KEY, builder)
            .await
            .null_on_not_found()?
            .flatten())
    }

    pub async fn deploy(
        &self,
        zone_id: &str,
        service_offering_id: &str,
        template_id: &str,
        options: &DeployVirtualMachineOptions,
    ) -> Result<AsyncCreateResponse> {
        debug!(zone_id, template_id, "Deploying virtual machine");
        let builder = self
            .api
            .command("deployVirtualMachine")
            .add_query_param("zoneid", zone_id)
            .add_query_param("serviceofferingid", service_offering_id)
            .add_query_param("templateid", template_id);
        self.api
            .call("deployVirtualMachine", options.apply_to(builder))
            .await
    }

    pub async fn reboot(&self, id: &str) -> Result<AsyncJobResponse> {
        self.job("rebootVirtualMachine", id).await
    }

    pub async fn start(&self, id: &str) -> Result<AsyncJobResponse> {
        self.job("startVirtualMachine", id).await
    }

    pub async fn stop(&self, id: &str) -> Result<AsyncJobResponse> {
        self.stop_with_options(id, &StopVirtualMachineOptions::new()).await
    }

    pub async fn stop_with_options(
        &self,
        id: &str,
        options: &StopVirtualMachineOptions,
    ) -> Result<AsyncJobResponse> {
        let builder = self
            .api
            .command("stopVirtualMachine")
            .add_query_param("id", id);
        self.api
            .call("stopVirtualMachine", options.apply_to(builder))
            .await
    }

    pub async fn reset_password(&self, id: &str) -> Result<AsyncJobResponse> {
        self.job("resetPasswordForVirtualMachine", id).await
    }

    pub async fn destroy(&self, id: &str) -> Result<AsyncJobResponse> {
        self.job("destroyVirtualMachine", id).await
    }

    pub async fn change_service_offering(
        &self,
        id: &str,
        service_offering_id: &str,
    ) -> Result<VirtualMachine> {
        let builder = self
            .api
            .command("changeServiceForVirtualMachine")
            .add_query_param("id", id)
            .add_query_param("serviceofferingid", service_offering_id);
        self.api
            .call_one("changeServiceForVirtualMachine", KEY, builder)
            .await
    }

    /// Moves a stopped machine to another account.
    pub async fn assign(
        &self,
        virtual_machine_id: &str,
        options: &AccountInDomainOptions,
    ) -> Result<VirtualMachine> {
        let builder = self
            .api
            .command("assignVirtualMachine")
            .add_query_param("virtualmachineid", virtual_machine_id);
        self.api
            .call_one("assignVirtualMachine", KEY, options.apply_to(builder))
            .await
    }

    async fn job(&self, command: &str, id: &str) -> Result<AsyncJobResponse> {
        let builder = self.api.command(command).add_query_param("id", id);
        self.api.call(command, builder).await
    }
}
