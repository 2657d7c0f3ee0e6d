use crate::common::{ConfigSnafu, Result};
use crate::ns1::Ns1;
use crate::service::Flipper;

pub const ENV_PREFIX: &str = "DNSFLIP";

/// Process level settings, read once from the environment at startup.
///
/// `DNSFLIP_NS1__API_KEY=...` sets `ns1.api_key`, and so on.
#[derive(Clone, serde::Deserialize)]
pub struct Config {
    pub ns1: crate::ns1::Config,
}

impl Config {
    pub fn populate_from_env() -> Result<Self> {
        Self::from_env_source(None)
    }

    /// Like `populate_from_env`, reading variables from `source` when given.
    pub fn from_env_source(source: Option<::config::Map<String, String>>) -> Result<Self> {
        ::config::Config::builder()
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .source(source),
            )
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|err| {
                ConfigSnafu {
                    message: err.to_string(),
                    prefix: ENV_PREFIX,
                }
                .build()
            })
    }

    pub fn get_service(self) -> Result<Flipper<Ns1>> {
        Ok(Flipper::new(Ns1::try_from(self.ns1)?))
    }
}
