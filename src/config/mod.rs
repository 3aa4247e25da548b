pub mod env_file;
pub mod global;
pub mod schema;
pub mod settings;

pub use env_file::{env_file_search_paths, load_env_file};
pub use global::load_global_config;
pub use schema::Config;
pub use settings::Settings;
