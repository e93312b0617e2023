use std::{sync::Arc, time::Duration};

use log::{debug, info, warn};

use crate::{
    constants::OidRef,
    env_state::TargetEnv,
    simbad::{
        query::{check_query_chars, detail_query, identifier_query, QueryKind},
        response::{
            classify_response, parse_candidates, parse_detail, CatalogueDetail,
            IdentifierCandidate,
        },
        transport::{CatalogueTransport, HttpTransport},
    },
    target_errors::TargetError,
};

/// One-shot SIMBAD queries: identifier search and object position.
///
/// The client holds no search state; debouncing and stale-response handling live in
/// [`crate::simbad::search::SimbadSearch`].
#[derive(Clone)]
pub struct SimbadClient {
    transport: Arc<dyn CatalogueTransport>,
    row_limit: usize,
    timeout: Duration,
}

impl std::fmt::Debug for SimbadClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimbadClient")
            .field("row_limit", &self.row_limit)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl SimbadClient {
    /// Arguments
    /// -----------------
    /// * `transport`: backend answering the ADQL queries.
    /// * `row_limit`: row cap of identifier searches.
    /// * `timeout`: upper bound on each request, whatever the transport.
    pub fn new(
        transport: Arc<dyn CatalogueTransport>,
        row_limit: usize,
        timeout: Duration,
    ) -> Self {
        SimbadClient {
            transport,
            row_limit,
            timeout,
        }
    }

    /// Client over HTTP, configured from the environment.
    pub fn from_env(env: &TargetEnv) -> Self {
        SimbadClient::new(
            Arc::new(HttpTransport::new(env.clone())),
            env.config.row_limit,
            env.config.timeout(),
        )
    }

    pub fn row_limit(&self) -> usize {
        self.row_limit
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn fetch(&self, adql: &str) -> Result<String, TargetError> {
        match tokio::time::timeout(self.timeout, self.transport.fetch(adql)).await {
            Ok(body) => body,
            Err(_) => {
                warn!("SIMBAD request abandoned after {:?}", self.timeout);
                Err(TargetError::Service(format!(
                    "request timed out after {}s",
                    self.timeout.as_secs()
                )))
            }
        }
    }

    /// Search identifiers matching `text`.
    ///
    /// Arguments
    /// -----------------
    /// * `text`: the user's search text; empty text issues no request.
    /// * `kind`: alternate-name prefix search or exact catalogue reference.
    ///
    /// Return
    /// ----------
    /// * The candidates in response order (possibly empty), or
    ///   - [`TargetError::InvalidCharacter`] before any request for blacklisted characters,
    ///   - [`TargetError::Service`] when SIMBAD answers with an error document,
    ///   - [`TargetError::Service`] when the request outlives the timeout,
    ///   - [`TargetError::Http`] on transport failure.
    pub async fn search_identifiers(
        &self,
        text: &str,
        kind: QueryKind,
    ) -> Result<Vec<IdentifierCandidate>, TargetError> {
        check_query_chars(text)?;
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let adql = identifier_query(text, kind, self.row_limit)?;
        let body = self.fetch(&adql).await?;
        let candidates = parse_candidates(classify_response(&body)?.into_rows()?)?;
        debug!("SIMBAD returned {} identifier(s) for '{text}'", candidates.len());
        Ok(candidates)
    }

    /// Fetch the position of the object referenced by `oidref`.
    ///
    /// Return
    /// ----------
    /// * The object position, or [`TargetError::ProtocolViolation`] when the answer does not
    ///   contain exactly one well-formed row.
    pub async fn fetch_detail(&self, oidref: OidRef) -> Result<CatalogueDetail, TargetError> {
        let body = self.fetch(&detail_query(oidref)).await?;
        let detail = parse_detail(classify_response(&body)?.into_rows()?)?;
        info!(
            "resolved oid {oidref} to '{}' at ra={}, dec={}",
            detail.main_id, detail.ra, detail.dec
        );
        Ok(detail)
    }
}
