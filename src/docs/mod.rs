//! Documentation content, rendering and download

pub mod artifact;
pub mod markdown;
pub mod template;

pub use artifact::DocumentArtifact;
pub use markdown::{MarkdownView, excerpt, render, to_html};
pub use template::DOCUMENTATION_TEMPLATE;
