use std::sync::{Mutex, MutexGuard, PoisonError};

use anyhow::{Result, anyhow};
use common::{CreateDataRequest, DataObject, ObjectId};
use serde::Serialize;
use tracing::{error, info};

use crate::store::ObjectStore;
use crate::view::{FormFields, ListView, ObjectRow};

/// Client-side state: the last fetched objects and the object being edited,
/// if any. `editing == None` means the next submit creates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionState {
    pub items: Vec<DataObject>,
    pub editing: Option<ObjectId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewSnapshot<V> {
    pub editing: Option<ObjectId>,
    #[serde(flatten)]
    pub view: V,
}

/// A create or update the remote accepted, with the outcome of the list
/// refresh that follows it.
#[derive(Debug)]
pub struct Saved {
    pub object: DataObject,
    pub refresh: Result<usize>,
}

struct ControllerState<V> {
    session: SessionState,
    view: V,
}

/// Maps list/form actions onto remote calls and renders the results.
///
/// The state lock is only taken between awaits, so overlapping calls are
/// possible and the response that resolves last wins.
pub struct ObjectListController<S, V> {
    store: S,
    state: Mutex<ControllerState<V>>,
}

impl<S, V> ObjectListController<S, V>
where
    S: ObjectStore,
    V: ListView,
{
    pub fn new(store: S, view: V) -> Self {
        Self {
            store,
            state: Mutex::new(ControllerState {
                session: SessionState::default(),
                view,
            }),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn session(&self) -> SessionState {
        self.state().session.clone()
    }

    pub fn with_view<R>(&self, f: impl FnOnce(&mut V) -> R) -> R {
        f(&mut self.state().view)
    }

    pub fn snapshot(&self) -> ViewSnapshot<V>
    where
        V: Clone,
    {
        let state = self.state();
        ViewSnapshot {
            editing: state.session.editing.clone(),
            view: state.view.clone(),
        }
    }

    /// Initial load: form hidden, list fetched.
    pub async fn start(&self) -> Result<usize> {
        self.state().view.hide_form();
        self.list().await
    }

    pub async fn list(&self) -> Result<usize> {
        match self.store.list().await {
            Ok(items) => {
                let count = items.len();
                let mut state = self.state();
                state
                    .view
                    .render_rows(items.iter().map(ObjectRow::from).collect());
                state.session.items = items;
                info!(count, "loaded objects");
                Ok(count)
            }
            Err(err) => {
                error!(error = format_args!("{err:#}"), "GET failed");
                Err(err)
            }
        }
    }

    pub fn begin_create(&self) {
        let mut state = self.state();
        state.session.editing = None;
        state.view.show_form(FormFields::default());
    }

    pub fn begin_edit(&self, object: &DataObject) {
        open_edit(&mut self.state(), object);
    }

    /// Opens the form for an object from the last fetched list.
    pub fn begin_edit_by_id(&self, id: &str) -> Result<()> {
        let mut state = self.state();
        let object = state
            .session
            .items
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or_else(|| anyhow!("object not loaded: {id}"))?;
        open_edit(&mut state, &object);
        Ok(())
    }

    /// Sends the form: POST when creating, PUT to the edited object otherwise.
    pub async fn submit(&self) -> Result<Saved> {
        let (payload, editing) = {
            let state = self.state();
            let fields = state.view.form_fields();
            (
                CreateDataRequest::from_form(fields.name, fields.info),
                state.session.editing.clone(),
            )
        };

        match editing {
            None => self.create(&payload).await,
            Some(id) => self.update(&id, &payload).await,
        }
    }

    pub async fn create(&self, payload: &CreateDataRequest) -> Result<Saved> {
        let created = match self.store.create(payload).await {
            Ok(created) => created,
            Err(err) => {
                error!(error = format_args!("{err:#}"), "POST failed");
                return Err(err);
            }
        };
        info!(id = %created.id, "POST succeeded");

        self.state().view.hide_form();
        Ok(Saved {
            object: created,
            refresh: self.list().await,
        })
    }

    pub async fn update(&self, id: &str, payload: &CreateDataRequest) -> Result<Saved> {
        let updated = match self.store.update(id, payload).await {
            Ok(updated) => updated,
            Err(err) => {
                error!(id = %id, error = format_args!("{err:#}"), "PUT failed");
                return Err(err);
            }
        };
        info!(id = %id, "PUT succeeded");

        {
            let mut state = self.state();
            state.session.editing = None;
            state.view.hide_form();
        }
        Ok(Saved {
            object: updated,
            refresh: self.list().await,
        })
    }

    /// Removes the row in place on success; nothing is re-fetched.
    pub async fn delete(&self, id: &str) -> Result<()> {
        if let Err(err) = self.store.delete(id).await {
            error!(id = %id, error = format_args!("{err:#}"), "DELETE failed");
            return Err(err);
        }

        let mut state = self.state();
        state.view.remove_row(id);
        state.session.items.retain(|item| item.id != id);
        info!(id = %id, "deleted object");
        Ok(())
    }

    fn state(&self) -> MutexGuard<'_, ControllerState<V>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn open_edit<V: ListView>(state: &mut ControllerState<V>, object: &DataObject) {
    state.session.editing = Some(object.id.clone());
    state
        .view
        .show_form(FormFields::new(object.name.clone(), object.form_text()));
}
