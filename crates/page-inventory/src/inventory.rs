use std::sync::Arc;

use action_primitives::{
    decode, ElementsResponse, LinkResponse, PageQuery, PageQueryChannel, UrlsResponse,
};
use async_trait::async_trait;
use autoweb_core_types::{ElementDescriptor, ElementSnapshot};
use tracing::{debug, info, instrument};

use crate::errors::InventoryError;
use crate::identity::element_identifier;
use crate::normalize::normalize_urls;

/// Read-only listings of the current document.
#[async_trait]
pub trait PageInventory: Send + Sync {
    /// Every element carrying an id or a class, in document order.
    async fn list_elements(&self) -> Result<Vec<ElementSnapshot>, InventoryError>;

    /// Absolute, fragment-free URLs referenced anywhere in the document.
    async fn list_urls(&self) -> Result<Vec<String>, InventoryError>;

    /// Descriptor of the first anchor pointing at `url`, fragments ignored.
    async fn find_link(&self, url: &str) -> Result<ElementDescriptor, InventoryError>;
}

pub struct DefaultPageInventory {
    channel: Arc<dyn PageQueryChannel>,
}

impl DefaultPageInventory {
    pub fn new(channel: Arc<dyn PageQueryChannel>) -> Self {
        Self { channel }
    }
}

#[async_trait]
impl PageInventory for DefaultPageInventory {
    #[instrument(skip_all)]
    async fn list_elements(&self) -> Result<Vec<ElementSnapshot>, InventoryError> {
        let raw = self.channel.evaluate(&PageQuery::ListElements).await?;
        let response: ElementsResponse = decode(&raw)?;
        let elements: Vec<ElementSnapshot> = response
            .nodes
            .iter()
            .map(|node| node.snapshot(element_identifier(node), &response.viewport))
            .collect();
        info!(count = elements.len(), "elements listed");
        Ok(elements)
    }

    #[instrument(skip_all)]
    async fn list_urls(&self) -> Result<Vec<String>, InventoryError> {
        let raw = self.channel.evaluate(&PageQuery::ListUrls).await?;
        let response: UrlsResponse = decode(&raw)?;
        let collected = response.urls.len();
        let urls = normalize_urls(response.base_url.as_deref(), &response.urls);
        info!(collected, unique = urls.len(), "urls listed");
        Ok(urls)
    }

    #[instrument(skip(self))]
    async fn find_link(&self, url: &str) -> Result<ElementDescriptor, InventoryError> {
        let raw = self
            .channel
            .evaluate(&PageQuery::FindLink {
                url: url.to_string(),
            })
            .await?;
        let response: LinkResponse = decode(&raw)?;
        match response.identifier {
            Some(identifier) if response.found => {
                debug!(%identifier, "link resolved");
                Ok(ElementDescriptor::new(identifier).with_title(&response.title))
            }
            _ => Err(InventoryError::LinkNotFound(url.to_string())),
        }
    }
}
