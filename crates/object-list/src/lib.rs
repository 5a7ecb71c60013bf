mod controller;
mod store;
mod view;

pub use controller::{ObjectListController, Saved, SessionState, ViewSnapshot};
pub use store::ObjectStore;
pub use view::{FormFields, FormView, ListView, ObjectRow, ViewModel};
