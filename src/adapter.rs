pub mod app_config;
pub mod driven;
pub mod driver;

pub use app_config::AppConfig;
