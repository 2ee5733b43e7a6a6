//! Product catalog: the data model, its loading, and the presentation rules
//! shared by the interactive viewer and the `list` command.

mod errors;
mod loader;
mod rating;
mod types;
mod window;

pub use errors::{CatalogError, CatalogResult};
pub use loader::{fetch_logged, source_for, CatalogLoader, CatalogSource, CatalogUpdate, LoadHandle};
pub use types::{ColorVariant, Product};
pub use window::{PageWindow, PAGE_SIZE};

#[cfg(test)]
pub use loader::FileCatalogSource;
