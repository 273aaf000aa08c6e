// Adapters layer: concrete implementations for external systems (feeds, Gemini, storage, terminal).

pub mod feed;
pub mod gemini;
pub mod progress;
pub mod storage;
