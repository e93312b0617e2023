//! # Target entry environment state
//!
//! This module defines [`crate::env_state::TargetEnv`], the **shared environment object** handed to
//! the catalogue client and the target panel. It provides access to:
//!
//! - A persistent **HTTP client** with the configured request timeout.
//! - The **lookup configuration** ([`LookupConfig`]) the client was built from.
//!
//! The object is cheaply cloneable: `reqwest::Client` is reference counted internally, so clones
//! share one connection pool.
//!
//! ## Structure
//!
//! ```text
//! TargetEnv
//! ├── http_client (reqwest::Client, timeout = config.timeout_secs)
//! └── config      (LookupConfig)
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pst_target::{config::LookupConfig, env_state::TargetEnv};
//!
//! # async fn run() -> Result<(), pst_target::target_errors::TargetError> {
//! let env = TargetEnv::new(LookupConfig::default())?;
//! let body = env
//!     .get_text(&env.config.simbad_url, &[("request", "doQuery")])
//!     .await?;
//! println!("{}", &body[..100.min(body.len())]);
//! # Ok(())
//! # }
//! ```

use log::debug;
use reqwest::Client;

use crate::{config::LookupConfig, target_errors::TargetError};

#[derive(Debug, Clone)]
pub struct TargetEnv {
    pub http_client: Client,
    pub config: LookupConfig,
}

impl TargetEnv {
    /// Build the environment, creating an HTTP client bounded by `config.timeout()`.
    ///
    /// Return
    /// ------
    /// * The environment, or [`TargetError::Http`] if the TLS backend cannot be initialised.
    pub fn new(config: LookupConfig) -> Result<Self, TargetError> {
        let http_client = Client::builder().timeout(config.timeout()).build()?;
        Ok(TargetEnv {
            http_client,
            config,
        })
    }

    /// GET `url` with the given query parameters and return the raw body.
    ///
    /// The body is returned whatever its content type: SIMBAD answers errors with an XML
    /// document and a success status, so the caller has to look at the text itself.
    pub async fn get_text(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<String, TargetError> {
        debug!("GET {url} with {} parameter(s)", params.len());
        let body = self
            .http_client
            .get(url)
            .query(params)
            .send()
            .await?
            .text()
            .await?;
        Ok(body)
    }
}
