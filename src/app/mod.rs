// Presentation layer: renderers and file exports for a finished run.

pub mod export;
pub mod render;
