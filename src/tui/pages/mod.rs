//! Full-screen views of the viewer

pub mod catalog;

pub use catalog::CatalogPage;
