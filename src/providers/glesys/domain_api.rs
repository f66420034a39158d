//! DNS zones hosted by GleSYS and their records.

use super::domain::{Domain, DomainRecord};
use super::options::{AddDomainOptions, AddRecordOptions, DomainOptions, UpdateRecordOptions};
use super::GlesysApi;
use crate::core::fallback::Fallback;
use crate::core::options::RequestOptions;
use crate::utils::error::Result;
use reqwest::Method;

#[derive(Debug, Clone)]
pub struct DomainApi {
    api: GlesysApi,
}

impl DomainApi {
    pub(crate) fn new(api: GlesysApi) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<Domain>> {
        let builder = self.api.post(&["domain", "list"])?;
        self.api.fetch(builder, "domains").await.empty_on_not_found()
    }

    pub async fn get(&self, name: &str) -> Result<Option<Domain>> {
        let builder = self
            .api
            .post(&["domain", "details"])?
            .add_form_param("domainname", name);
        self.api.fetch(builder, "domain").await.null_on_not_found()
    }

    pub async fn create(&self, name: &str, options: &AddDomainOptions) -> Result<Domain> {
        let builder = self
            .api
            .post(&["domain", "add"])?
            .add_form_param("domainname", name);
        self.api.fetch(options.apply_to(builder), "domain").await
    }

    pub async fn update(&self, name: &str, options: &DomainOptions) -> Result<Domain> {
        let builder = self
            .api
            .post(&["domain", "edit"])?
            .add_form_param("domainname", name);
        self.api.fetch(options.apply_to(builder), "domain").await
    }

    pub async fn delete(&self, name: &str) -> Result<()> {
        let builder = self
            .api
            .request(Method::POST, &["domain", "delete"])?
            .add_form_param("domainname", name);
        self.api.send_void(builder).await
    }

    pub async fn list_records(&self, name: &str) -> Result<Vec<DomainRecord>> {
        let builder = self
            .api
            .post(&["domain", "listrecords"])?
            .add_form_param("domainname", name);
        self.api.fetch(builder, "records").await.empty_on_not_found()
    }

    pub async fn create_record(
        &self,
        name: &str,
        host: &str,
        record_type: &str,
        data: &str,
        options: &AddRecordOptions,
    ) -> Result<DomainRecord> {
        let builder = self
            .api
            .post(&["domain", "addrecord"])?
            .add_form_param("domainname", name)
            .add_form_param("host", host)
            .add_form_param("type", record_type)
            .add_form_param("data", data);
        self.api.fetch(options.apply_to(builder), "record").await
    }

    pub async fn update_record(
        &self,
        record_id: &str,
        options: &UpdateRecordOptions,
    ) -> Result<DomainRecord> {
        let builder = self
            .api
            .post(&["domain", "updaterecord"])?
            .add_form_param("recordid", record_id);
        self.api.fetch(options.apply_to(builder), "record").await
    }

    pub async fn delete_record(&self, record_id: &str) -> Result<()> {
        let builder = self
            .api
            .request(Method::POST, &["domain", "deleterecord"])?
            .add_form_param("recordid", record_id);
        self.api.send_void(builder).await
    }
}
