use super::domain::{Image, Resource};
use super::options::ListOptions;
use super::{Accept, ZoneClient};
use crate::core::fallback::Fallback;
use crate::core::options::RequestOptions;
use crate::utils::error::Result;
use reqwest::Method;

#[derive(Debug, Clone)]
pub struct ImageApi {
    zone: ZoneClient,
}

impl ImageApi {
    pub(crate) fn new(zone: ZoneClient) -> Self {
        Self { zone }
    }

    pub async fn list(&self, options: &ListOptions) -> Result<Vec<Resource>> {
        let builder = options.apply_to(self.zone.get(&["images"])?);
        self.zone.fetch(builder, "images").await.empty_on_not_found()
    }

    pub async fn list_in_detail(&self, options: &ListOptions) -> Result<Vec<Image>> {
        let builder = options.apply_to(self.zone.get(&["images", "detail"])?);
        self.zone.fetch(builder, "images").await.empty_on_not_found()
    }

    pub async fn get(&self, id: &str) -> Result<Option<Image>> {
        let builder = self.zone.get(&["images", id])?;
        self.zone.fetch(builder, "image").await.null_on_not_found()
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let builder = self
            .zone
            .request(Method::DELETE, &["images", id], Accept::Json)?;
        self.zone.send_void(builder).await.void_on_not_found()
    }
}
