//! Content source adapters

pub mod html;

pub use html::HtmlContentSource;
