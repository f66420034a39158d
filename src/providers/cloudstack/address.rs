use super::domain::{AsyncCreateResponse, PublicIPAddress};
use super::options::{AssociateIPAddressOptions, ListPublicIPAddressesOptions};
use super::CloudStackApi;
use crate::core::fallback::Fallback;
use crate::core::options::RequestOptions;
use crate::utils::error::Result;

const LIST: &str = "listPublicIpAddresses";
const KEY: &str = "publicipaddress";

#[derive(Debug, Clone)]
pub struct AddressApi {
    api: CloudStackApi,
}

impl AddressApi {
    pub(crate) fn new(api: CloudStackApi) -> Self {
        Self { api }
    }

    pub async fn list(&self, options: &ListPublicIPAddressesOptions) -> Result<Vec<PublicIPAddress>> {
        let builder = options.apply_to(self.api.list_command(LIST));
        self.api.call_list(LIST, KEY, builder).await.empty_on_not_found()
    }

    pub async fn get(&self, id: &str) -> Result<Option<PublicIPAddress>> {
        let builder = self.api.list_command(LIST).add_query_param("id", id);
        Ok(self
            .api
            .call_named(LIST, KEY, builder)
            .await
            .null_on_not_found()?
            .flatten())
    }

    /// Acquires a public address in `zone_id`.
    pub async fn associate(
        &self,
        zone_id: &str,
        options: &AssociateIPAddressOptions,
    ) -> Result<AsyncCreateResponse> {
        let builder = self
            .api
            .command("associateIpAddress")
            .add_query_param("zoneid", zone_id);
        self.api
            .call("associateIpAddress", options.apply_to(builder))
            .await
    }

    pub async fn disassociate(&self, id: &str) -> Result<()> {
        let builder = self
            .api
            .command("disassociateIpAddress")
            .add_query_param("id", id);
        self.api.call_void(builder).await.void_on_not_found()
    }
}
