// ==========================================
// Customer Analytics - configuration layer
// ==========================================
// Explicit immutable configuration values, passed in; no module-level
// singletons.
// ==========================================

pub mod settings;

pub use settings::{CleaningRules, RetryPolicy, Settings};
