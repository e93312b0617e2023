//! The seam between the lookup logic and the network.
//!
//! [`CatalogueTransport`] runs one ADQL query and returns the raw body, leaving classification
//! to [`crate::simbad::response`]. [`HttpTransport`] is the production implementation, talking
//! to SIMBAD's synchronous TAP endpoint through the environment's HTTP client.

use async_trait::async_trait;
use log::debug;

use crate::{env_state::TargetEnv, target_errors::TargetError};

#[async_trait]
pub trait CatalogueTransport: Send + Sync {
    /// Execute `adql` and return the unparsed response body.
    async fn fetch(&self, adql: &str) -> Result<String, TargetError>;
}

/// SIMBAD TAP over HTTP (`sim-tap/sync?request=doQuery&lang=adql&format=json&query=…`).
#[derive(Debug, Clone)]
pub struct HttpTransport {
    env: TargetEnv,
}

impl HttpTransport {
    pub fn new(env: TargetEnv) -> Self {
        HttpTransport { env }
    }
}

#[async_trait]
impl CatalogueTransport for HttpTransport {
    async fn fetch(&self, adql: &str) -> Result<String, TargetError> {
        debug!("SIMBAD TAP query: {adql}");
        let params = [
            ("request", "doQuery"),
            ("lang", "adql"),
            ("format", "json"),
            ("query", adql),
        ];
        self.env.get_text(&self.env.config.simbad_url, &params).await
    }
}
