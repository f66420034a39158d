use super::domain::{AsyncCreateResponse, Volume};
use super::options::ListVolumesOptions;
use super::CloudStackApi;
use crate::core::fallback::Fallback;
use crate::core::options::RequestOptions;
use crate::utils::error::Result;

const LIST: &str = "listVolumes";
const KEY: &str = "volume";

#[derive(Debug, Clone)]
pub struct VolumeApi {
    api: CloudStackApi,
}

impl VolumeApi {
    pub(crate) fn new(api: CloudStackApi) -> Self {
        Self { api }
    }

    pub async fn list(&self, options: &ListVolumesOptions) -> Result<Vec<Volume>> {
        let builder = options.apply_to(self.api.list_command(LIST));
        self.api.call_list(LIST, KEY, builder).await.empty_on_not_found()
    }

    pub async fn get(&self, id: &str) -> Result<Option<Volume>> {
        let builder = self.api.list_command(LIST).add_query_param("id", id);
        Ok(self
            .api
            .call_named(LIST, KEY, builder)
            .await
            .null_on_not_found()?
            .flatten())
    }

    pub async fn create_from_disk_offering(
        &self,
        name: &str,
        disk_offering_id: &str,
        zone_id: &str,
    ) -> Result<AsyncCreateResponse> {
        let builder = self
            .api
            .command("createVolume")
            .add_query_param("name", name)
            .add_query_param("diskofferingid", disk_offering_id)
            .add_query_param("zoneid", zone_id);
        self.api.call("createVolume", builder).await
    }

    pub async fn create_from_snapshot(
        &self,
        name: &str,
        snapshot_id: &str,
        zone_id: &str,
    ) -> Result<AsyncCreateResponse> {
        let builder = self
            .api
            .command("createVolume")
            .add_query_param("name", name)
            .add_query_param("snapshotid", snapshot_id)
            .add_query_param("zoneid", zone_id);
        self.api.call("createVolume", builder).await
    }

    pub async fn attach(&self, id: &str, virtual_machine_id: &str) -> Result<AsyncCreateResponse> {
        let builder = self
            .api
            .command("attachVolume")
            .add_query_param("id", id)
            .add_query_param("virtualmachineid", virtual_machine_id);
        self.api.call("attachVolume", builder).await
    }

    pub async fn detach(&self, id: &str) -> Result<AsyncCreateResponse> {
        let builder = self.api.command("detachVolume").add_query_param("id", id);
        self.api.call("detachVolume", builder).await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let builder = self.api.command("deleteVolume").add_query_param("id", id);
        self.api.call_void(builder).await.void_on_not_found()
    }
}
