use std::sync::Arc;

/// Callback invoked with human-readable progress lines during a render.
pub type ProgressCallback = Arc<dyn Fn(&str) + Send + Sync>;
