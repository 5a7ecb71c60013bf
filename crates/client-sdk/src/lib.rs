use anyhow::{Context, Result, anyhow};
use common::{CreateDataRequest, DataObject, ObjectList};
use reqwest::{Client, Url};

pub const DEFAULT_BASE_URL: &str = "https://api.restful-api.dev/objects";

/// HTTP client for the remote objects collection.
#[derive(Clone)]
pub struct ObjectsClient {
    http: Client,
    collection_url: String,
}

impl ObjectsClient {
    pub fn new(collection_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            collection_url: collection_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn collection_url(&self) -> &str {
        &self.collection_url
    }

    /// Item endpoint for `id`, with the id percent-encoded as one path segment.
    pub fn item_url(&self, id: &str) -> Result<Url> {
        let mut url = Url::parse(&self.collection_url)
            .with_context(|| format!("invalid collection url {}", self.collection_url))?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("collection url cannot carry a path: {}", self.collection_url))?
            .push(id);
        Ok(url)
    }

    pub async fn list(&self) -> Result<Vec<DataObject>> {
        let list = self
            .http
            .get(&self.collection_url)
            .send()
            .await
            .context("failed to GET objects")?
            .error_for_status()
            .context("server rejected GET for objects")?
            .json::<ObjectList>()
            .await
            .context("failed to decode objects list")?;

        Ok(list.items)
    }

    pub async fn create(&self, payload: &CreateDataRequest) -> Result<DataObject> {
        self.http
            .post(&self.collection_url)
            .json(payload)
            .send()
            .await
            .context("failed to POST object")?
            .error_for_status()
            .context("server rejected POST for object")?
            .json::<DataObject>()
            .await
            .context("failed to decode created object")
    }

    pub async fn update(&self, id: &str, payload: &CreateDataRequest) -> Result<DataObject> {
        self.http
            .put(self.item_url(id)?)
            .json(payload)
            .send()
            .await
            .with_context(|| format!("failed to PUT object id={id}"))?
            .error_for_status()
            .with_context(|| format!("server rejected PUT for id={id}"))?
            .json::<DataObject>()
            .await
            .with_context(|| format!("failed to decode updated object id={id}"))
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.http
            .delete(self.item_url(id)?)
            .send()
            .await
            .with_context(|| format!("failed to DELETE object id={id}"))?
            .error_for_status()
            .with_context(|| format!("server rejected DELETE for id={id}"))?;

        Ok(())
    }
}

impl Default for ObjectsClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
