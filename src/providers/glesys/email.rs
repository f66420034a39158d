//! Mailboxes and aliases on domains hosted by GleSYS.

use super::domain::{EmailAccount, EmailAlias, EmailList, EmailOverview};
use super::options::{CreateAccountOptions, UpdateAccountOptions};
use super::GlesysApi;
use crate::core::fallback::Fallback;
use crate::core::options::RequestOptions;
use crate::utils::error::Result;
use reqwest::Method;
use tracing::info;

#[derive(Debug, Clone)]
pub struct EmailAccountApi {
    api: GlesysApi,
}

impl EmailAccountApi {
    pub(crate) fn new(api: GlesysApi) -> Self {
        Self { api }
    }

    /// Counts and limits of the account, per domain.
    pub async fn get_overview(&self) -> Result<Option<EmailOverview>> {
        let builder = self.api.post(&["email", "overview"])?;
        self.api.fetch(builder, "overview").await.null_on_not_found()
    }

    pub async fn list_domain(&self, domain: &str) -> Result<Vec<EmailAccount>> {
        Ok(self.list(domain).await?.accounts)
    }

    pub async fn list_aliases_in_domain(&self, domain: &str) -> Result<Vec<EmailAlias>> {
        Ok(self.list(domain).await?.aliases)
    }

    pub async fn create_with_password(
        &self,
        account: &str,
        password: &str,
        options: &CreateAccountOptions,
    ) -> Result<EmailAccount> {
        info!(account, "Creating email account");
        let builder = self
            .api
            .post(&["email", "createaccount"])?
            .add_form_param("emailaccount", account)
            .add_form_param("password", password);
        self.api.fetch(options.apply_to(builder), "emailaccount").await
    }

    pub async fn update(&self, account: &str, options: &UpdateAccountOptions) -> Result<EmailAccount> {
        let builder = self
            .api
            .post(&["email", "editaccount"])?
            .add_form_param("emailaccount", account);
        self.api.fetch(options.apply_to(builder), "emailaccount").await
    }

    pub async fn create_alias(&self, alias: &str, forward_to: &str) -> Result<()> {
        self.alias("createalias", alias, forward_to).await
    }

    pub async fn update_alias(&self, alias: &str, forward_to: &str) -> Result<()> {
        self.alias("editalias", alias, forward_to).await
    }

    /// Removes an account or an alias; already gone is fine.
    pub async fn delete(&self, email: &str) -> Result<()> {
        let builder = self
            .api
            .request(Method::POST, &["email", "delete"])?
            .add_form_param("email", email);
        self.api.send_void(builder).await.void_on_not_found()
    }

    async fn list(&self, domain: &str) -> Result<EmailList> {
        let builder = self
            .api
            .post(&["email", "list"])?
            .add_form_param("domainname", domain);
        self.api.fetch(builder, "list").await.empty_on_not_found()
    }

    async fn alias(&self, action: &str, alias: &str, forward_to: &str) -> Result<()> {
        let builder = self
            .api
            .post(&["email", action])?
            .add_form_param("emailalias", alias)
            .add_form_param("goto", forward_to);
        self.api.send_void(builder).await
    }
}
