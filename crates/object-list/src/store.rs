use anyhow::Result;
use client_sdk::ObjectsClient;
use common::{CreateDataRequest, DataObject};

/// Remote CRUD operations the controller issues. One call is one request.
pub trait ObjectStore: Send + Sync {
    fn list(&self) -> impl Future<Output = Result<Vec<DataObject>>> + Send;

    fn create(
        &self,
        payload: &CreateDataRequest,
    ) -> impl Future<Output = Result<DataObject>> + Send;

    fn update(
        &self,
        id: &str,
        payload: &CreateDataRequest,
    ) -> impl Future<Output = Result<DataObject>> + Send;

    fn delete(&self, id: &str) -> impl Future<Output = Result<()>> + Send;
}

impl ObjectStore for ObjectsClient {
    async fn list(&self) -> Result<Vec<DataObject>> {
        ObjectsClient::list(self).await
    }

    async fn create(&self, payload: &CreateDataRequest) -> Result<DataObject> {
        ObjectsClient::create(self, payload).await
    }

    async fn update(&self, id: &str, payload: &CreateDataRequest) -> Result<DataObject> {
        ObjectsClient::update(self, id, payload).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        ObjectsClient::delete(self, id).await
    }
}
