use super::domain::{
    AsyncCreateResponse, AsyncJobResponse, ExtractMode, Template, TemplateExtraction,
    TemplateFilter, TemplateFormat, TemplateMetadata, TemplatePermission,
};
use super::options::{
    AccountInDomainOptions, CreateTemplateOptions, DeleteTemplateOptions, ExtractTemplateOptions,
    ListTemplatesOptions, RegisterTemplateOptions, UpdateTemplateOptions,
    UpdateTemplatePermissionsOptions,
};
use super::CloudStackApi;
use crate::core::fallback::Fallback;
use crate::core::http::HttpRequestBuilder;
use crate::core::options::RequestOptions;
use crate::utils::error::Result;

const LIST: &str = "listTemplates";
const KEY: &str = "template";

#[derive(Debug, Clone)]
pub struct TemplateApi {
    api: CloudStackApi,
}

fn with_metadata(builder: HttpRequestBuilder, metadata: &TemplateMetadata) -> HttpRequestBuilder {
    builder
        .add_query_param("name", metadata.name.as_str())
        .add_query_param("ostypeid", metadata.os_type_id.as_str())
        .add_query_param("displaytext", metadata.display_text.as_str())
}

impl TemplateApi {
    pub(crate) fn new(api: CloudStackApi) -> Self {
        Self { api }
    }

    /// Creates a template from a volume or snapshot named in `options`.
    pub async fn create(
        &self,
        metadata: &TemplateMetadata,
        options: &CreateTemplateOptions,
    ) -> Result<AsyncCreateResponse> {
        let builder = options.apply_to(self.api.command("createTemplate"));
        self.api
            .call("createTemplate", with_metadata(builder, metadata))
            .await
    }

    pub async fn register(
        &self,
        metadata: &TemplateMetadata,
        format: TemplateFormat,
        hypervisor: &str,
        url: &str,
        zone_id: &str,
        options: &RegisterTemplateOptions,
    ) -> Result<Vec<Template>> {
        let builder = self
            .api
            .command("registerTemplate")
            .add_query_param("format", format.as_str())
            .add_query_param("hypervisor", hypervisor)
            .add_query_param("url", url)
            .add_query_param("zoneid", zone_id);
        let builder = with_metadata(options.apply_to(builder), metadata);
        self.api.call_list("registerTemplate", KEY, builder).await
    }

    pub async fn update(&self, id: &str, options: &UpdateTemplateOptions) -> Result<Template> {
        let builder = self.api.command("updateTemplate").add_query_param("id", id);
        self.api
            .call_one("updateTemplate", KEY, options.apply_to(builder))
            .await
    }

    pub async fn copy(
        &self,
        id: &str,
        source_zone_id: &str,
        dest_zone_id: &str,
    ) -> Result<AsyncCreateResponse> {
        let builder = self
            .api
            .command("copyTemplate")
            .add_query_param("id", id)
            .add_query_param("sourcezoneid", source_zone_id)
            .add_query_param("destzoneid", dest_zone_id);
        self.api.call("copyTemplate", builder).await
    }

    pub async fn delete(&self, id: &str, options: &DeleteTemplateOptions) -> Result<AsyncJobResponse> {
        let builder = self.api.command("deleteTemplate").add_query_param("id", id);
        self.api
            .call("deleteTemplate", options.apply_to(builder))
            .await
    }

    /// Without an explicit filter, lists templates the caller can execute.
    pub async fn list(&self, options: &ListTemplatesOptions) -> Result<Vec<Template>> {
        let mut builder = options.apply_to(self.api.list_command(LIST));
        if !options.has_filter() {
            builder = builder.add_query_param("templatefilter", TemplateFilter::Executable.as_str());
        }
        self.api.call_list(LIST, KEY, builder).await.empty_on_not_found()
    }

    pub async fn get_in_zone(&self, id: &str, zone_id: &str) -> Result<Option<Template>> {
        let builder = self
            .api
            .list_command(LIST)
            .add_query_param("templatefilter", TemplateFilter::Executable.as_str())
            .add_query_param("id", id)
            .add_query_param("zoneid", zone_id);
        Ok(self
            .api
            .call_named(LIST, KEY, builder)
            .await
            .null_on_not_found()?
            .flatten())
    }

    pub async fn update_permissions(
        &self,
        id: &str,
        options: &UpdateTemplatePermissionsOptions,
    ) -> Result<()> {
        let builder = self
            .api
            .command("updateTemplatePermissions")
            .add_query_param("id", id);
        self.api.call_void(options.apply_to(builder)).await
    }

    pub async fn list_permissions(
        &self,
        id: &str,
        options: &AccountInDomainOptions,
    ) -> Result<Vec<TemplatePermission>> {
        let builder = self
            .api
            .list_command("listTemplatePermissions")
            .add_query_param("id", id);
        self.api
            .call_list(
                "listTemplatePermissions",
                "templatepermission",
                options.apply_to(builder),
            )
            .await
            .empty_on_not_found()
    }

    pub async fn extract(
        &self,
        id: &str,
        mode: ExtractMode,
        zone_id: &str,
        options: &ExtractTemplateOptions,
    ) -> Result<AsyncCreateResponse> {
        let builder = self
            .api
            .command("extractTemplate")
            .add_query_param("id", id)
            .add_query_param("mode", mode.as_str())
            .add_query_param("zoneid", zone_id);
        self.api
            .call("extractTemplate", options.apply_to(builder))
            .await
    }

    /// Parses the `template` member of a finished extractTemplate job.
    pub fn extraction_from_job_result(result: &serde_json::Value) -> Result<Option<TemplateExtraction>> {
        match result.get(KEY) {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
        }
    }
}
