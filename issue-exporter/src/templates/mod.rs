//! Body rendering using Handlebars.
//!
//! Destination issue and comment bodies are rendered from templates so the
//! original author, timestamp and metadata changes survive the migration.

mod error;
mod renderer;

pub use error::TemplateError;
pub use renderer::{
    create_handlebars_registry, TemplateRenderer, DEFAULT_COMMENT_TEMPLATE,
    DEFAULT_ISSUE_TEMPLATE,
};
