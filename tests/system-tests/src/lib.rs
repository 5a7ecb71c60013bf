#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use anyhow::{Context, Result};
    use axum::extract::{Path, State};
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use axum::routing::{get, put};
    use axum::{Json, Router};
    use client_sdk::ObjectsClient;
    use common::{CreateDataRequest, FORM_DATA_KEY};
    use object_list::{FormFields, ObjectListController, ViewModel};
    use reqwest::StatusCode as ClientStatus;
    use serde_json::{Value, json};
    use tokio::task::JoinHandle;

    /// In-process stand-in for the public objects API.
    #[derive(Clone, Default)]
    struct FakeRemote {
        objects: Arc<Mutex<Vec<Value>>>,
        requests: Arc<Mutex<Vec<(String, String, Value)>>>,
        next_id: Arc<AtomicUsize>,
        failing: Arc<AtomicBool>,
    }

    impl FakeRemote {
        fn seeded(objects: Vec<Value>) -> Self {
            let remote = Self::default();
            *remote.objects.lock().unwrap() = objects;
            remote
        }

        fn requests(&self) -> Vec<(String, String, Value)> {
            self.requests.lock().unwrap().clone()
        }

        fn record(&self, method: &str, path: String, body: Value) {
            self.requests
                .lock()
                .unwrap()
                .push((method.to_string(), path, body));
        }
    }

    struct RunningRemote {
        collection_url: String,
        remote: FakeRemote,
        handle: JoinHandle<()>,
    }

    impl Drop for RunningRemote {
        fn drop(&mut self) {
            self.handle.abort();
        }
    }

    async fn start_remote(remote: FakeRemote) -> Result<RunningRemote> {
        let app = Router::new()
            .route("/objects", get(list_objects).post(create_object))
            .route("/objects/{id}", put(update_object).delete(delete_object))
            .with_state(remote.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .context("failed to bind fake remote")?;
        let addr = listener.local_addr()?;
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(RunningRemote {
            collection_url: format!("http://{addr}/objects"),
            remote,
            handle,
        })
    }

    async fn list_objects(State(remote): State<FakeRemote>) -> Response {
        remote.record("GET", "/objects".to_string(), Value::Null);
        if remote.failing.load(Ordering::SeqCst) {
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
        let objects = remote.objects.lock().unwrap().clone();
        Json(Value::Array(objects)).into_response()
    }

    async fn create_object(State(remote): State<FakeRemote>, Json(body): Json<Value>) -> Response {
        remote.record("POST", "/objects".to_string(), body.clone());
        let id = format!("ff{}", remote.next_id.fetch_add(1, Ordering::SeqCst));
        let mut created = body;
        created["id"] = json!(id);
        remote.objects.lock().unwrap().push(created.clone());
        Json(created).into_response()
    }

    async fn update_object(
        State(remote): State<FakeRemote>,
        Path(id): Path<String>,
        Json(body): Json<Value>,
    ) -> Response {
        remote.record("PUT", format!("/objects/{id}"), body.clone());
        let mut objects = remote.objects.lock().unwrap();
        match objects.iter_mut().find(|object| object["id"] == json!(id)) {
            Some(object) => {
                object["name"] = body["name"].clone();
                object["data"] = body["data"].clone();
                Json(object.clone()).into_response()
            }
            None => not_found(&id),
        }
    }

    async fn delete_object(State(remote): State<FakeRemote>, Path(id): Path<String>) -> Response {
        remote.record("DELETE", format!("/objects/{id}"), Value::Null);
        let mut objects = remote.objects.lock().unwrap();
        match objects.iter().position(|object| object["id"] == json!(id)) {
            Some(position) => {
                objects.remove(position);
                Json(json!({ "message": format!("Object with id = {id} has been deleted.") }))
                    .into_response()
            }
            None => not_found(&id),
        }
    }

    fn not_found(id: &str) -> Response {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("Object with id = {id} doesn't exist.") })),
        )
            .into_response()
    }

    fn controller(running: &RunningRemote) -> ObjectListController<ObjectsClient, ViewModel> {
        ObjectListController::new(
            ObjectsClient::new(&running.collection_url),
            ViewModel::default(),
        )
    }

    #[tokio::test]
    async fn sdk_crud_roundtrip_against_fake_remote() -> Result<()> {
        let running = start_remote(FakeRemote::default()).await?;
        let client = ObjectsClient::new(&running.collection_url);

        let created = client
            .create(&CreateDataRequest::from_form("Foo", "bar"))
            .await?;
        assert_eq!(created.name, "Foo");
        assert_eq!(created.data[FORM_DATA_KEY], "bar");

        let listed = client.list().await?;
        assert_eq!(listed, vec![created.clone()]);

        let updated = client
            .update(&created.id, &CreateDataRequest::from_form("Foo2", "baz"))
            .await?;
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Foo2");

        client.delete(&created.id).await?;
        assert!(client.list().await?.is_empty());

        let err = client
            .delete(&created.id)
            .await
            .expect_err("second delete must fail");
        let status = err
            .chain()
            .find_map(|cause| cause.downcast_ref::<reqwest::Error>())
            .and_then(reqwest::Error::status);
        assert_eq!(status, Some(ClientStatus::NOT_FOUND));
        Ok(())
    }

    #[tokio::test]
    async fn list_decodes_seeded_objects_with_mixed_data() -> Result<()> {
        let running = start_remote(FakeRemote::seeded(vec![
            json!({ "id": "1", "name": "Widget", "data": { "color": "red" } }),
            json!({ "id": "2", "name": "Phone", "data": null }),
            json!({ "id": "3", "name": "Laptop", "data": { "price": 1849.99, "year": 2019 } }),
        ]))
        .await?;
        let controller = controller(&running);

        let count = controller.start().await?;

        assert_eq!(count, 3);
        let rows = controller.with_view(|view| view.rows.clone());
        let rendered: Vec<_> = rows
            .iter()
            .map(|row| (row.name.as_str(), row.data_text.as_str()))
            .collect();
        assert_eq!(
            rendered,
            vec![
                ("Widget", "color, red"),
                ("Phone", "No data"),
                ("Laptop", "price, 1849.99; year, 2019"),
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn form_submit_posts_json_and_refreshes_list() -> Result<()> {
        let running = start_remote(FakeRemote::default()).await?;
        let controller = controller(&running);

        controller.begin_create();
        controller.with_view(|view| view.set_form_fields(FormFields::new("Foo", "bar")));
        controller.submit().await?;

        let requests = running.remote.requests();
        assert_eq!(
            requests,
            vec![
                (
                    "POST".to_string(),
                    "/objects".to_string(),
                    json!({ "name": "Foo", "data": { "info": "bar" } }),
                ),
                ("GET".to_string(), "/objects".to_string(), Value::Null),
            ]
        );
        assert!(!controller.with_view(|view| view.form.visible));
        assert_eq!(controller.with_view(|view| view.rows.len()), 1);
        Ok(())
    }

    #[tokio::test]
    async fn edit_submit_puts_to_item_endpoint() -> Result<()> {
        let running = start_remote(FakeRemote::seeded(vec![
            json!({ "id": "42", "name": "Old", "data": { "info": "before" } }),
        ]))
        .await?;
        let controller = controller(&running);
        controller.list().await?;

        controller.begin_edit_by_id("42")?;
        controller.with_view(|view| view.set_form_fields(FormFields::new("New", "after")));
        controller.submit().await?;

        let methods: Vec<_> = running
            .remote
            .requests()
            .into_iter()
            .map(|(method, path, _)| format!("{method} {path}"))
            .collect();
        assert_eq!(methods, vec!["GET /objects", "PUT /objects/42", "GET /objects"]);
        assert_eq!(controller.session().editing, None);
        assert_eq!(
            controller.with_view(|view| view.rows[0].data_text.clone()),
            "info, after"
        );
        Ok(())
    }

    #[tokio::test]
    async fn rejected_delete_keeps_rendered_rows() -> Result<()> {
        let running = start_remote(FakeRemote::seeded(vec![
            json!({ "id": "1", "name": "a" }),
            json!({ "id": "2", "name": "b" }),
        ]))
        .await?;
        let controller = controller(&running);
        controller.list().await?;
        let before = controller.session();

        assert!(controller.delete("missing").await.is_err());

        assert_eq!(controller.session(), before);
        assert_eq!(controller.with_view(|view| view.rows.len()), 2);

        controller.delete("1").await?;
        assert_eq!(controller.with_view(|view| view.rows.len()), 1);
        assert!(controller.with_view(|view| view.row("2").is_some()));
        Ok(())
    }

    #[tokio::test]
    async fn server_error_on_list_keeps_previous_rows() -> Result<()> {
        let running = start_remote(FakeRemote::seeded(vec![json!({ "id": "1", "name": "a" })]))
            .await?;
        let controller = controller(&running);
        controller.list().await?;

        running.remote.failing.store(true, Ordering::SeqCst);
        assert!(controller.list().await.is_err());

        assert_eq!(controller.with_view(|view| view.rows.len()), 1);
        assert_eq!(controller.session().items.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn unreachable_remote_reports_error() -> Result<()> {
        let controller = ObjectListController::new(
            ObjectsClient::new("http://127.0.0.1:9/objects"),
            ViewModel::default(),
        );

        let err = controller.list().await.expect_err("nothing listens on port 9");

        assert!(format!("{err:#}").contains("failed to GET objects"));
        Ok(())
    }
}
