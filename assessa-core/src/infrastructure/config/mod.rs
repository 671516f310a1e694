pub mod settings;

pub use settings::{GatewaySettings, Settings, StoreSettings, apply_env_overrides, load_settings};
