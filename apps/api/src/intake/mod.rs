pub mod extractor;
pub mod handlers;
