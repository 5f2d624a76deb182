use config::{Config, ConfigError, Environment};
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct Settings {
    pub service_name: String,
    pub listen_port: String,
    pub database_url: String,
    pub database_pool_max_connections: u32,
    pub jwt_secret: String,
    pub token_validity_minutes: i64,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let conf = Config::builder()
            .set_default("service_name", "resume-store")?
            .set_default("listen_port", "8000")?
            .set_default("database_pool_max_connections", 5)?
            .set_default("token_validity_minutes", 30)?
            .add_source(Environment::default())
            .build()?;
        conf.try_deserialize()
    }
}
