pub mod settings;

pub use settings::{ProfileStoreSettings, RateLimitSettings, Settings};
