// Library exports for blockedit

pub mod config;
pub mod document;
pub mod editor;
pub mod list_toggle;
pub mod schema;
pub mod transaction;
