//! Category management: list, create, edit and delete.
//!
//! Categories live on the backend; these pages are thin forms over the
//! category endpoints. The only checks done locally are the ones worth a
//! round-trip: a non-empty name and a well-formed color.

mod create;
mod delete;
mod domain;
mod edit;
mod form;
mod list;

pub use create::{create_category_endpoint, get_new_category_page};
pub use delete::delete_category_endpoint;
pub use edit::{get_edit_category_page, update_category_endpoint};
pub use list::get_categories_page;

pub(crate) use domain::{CategoryFormData, CategoryName, build_category_payload};
