//! Decoding of SIMBAD TAP answers.
//!
//! The service is asked for JSON, but query errors come back as a VOTable **XML** document with
//! a success status. [`classify_response`] is the single place where the two are told apart, by
//! the first non-blank character of the body (`<` means XML), and yields a
//! [`CatalogueResponse`].
//!
//! The JSON payload has the TAP shape `{"metadata": [...], "data": [[...], ...]}`; only `data`
//! is read.

use serde::Deserialize;
use serde_json::Value;

use crate::{
    constants::{Degree, OidRef},
    conversion::{normalize_fraction, CoordinateKind, CoordinateText},
    target_errors::TargetError,
};

const ERROR_TAG_HEAD: &str = r#"<INFO name="QUERY_STATUS" value="ERROR">"#;
const ERROR_TAG_TAIL: &str = "</INFO>";

/// Extract the message carried by a SIMBAD VOTable error document.
///
/// Returns an empty string for empty input, for text that is not XML, when the
/// `QUERY_STATUS` error tag is missing or unterminated, and when its content is empty.
pub fn simbad_error_message(votable: &str) -> String {
    if !votable.starts_with('<') {
        return String::new();
    }
    let Some(head) = votable.find(ERROR_TAG_HEAD) else {
        return String::new();
    };
    let start = head + ERROR_TAG_HEAD.len();
    let Some(len) = votable[start..].find(ERROR_TAG_TAIL) else {
        return String::new();
    };
    votable[start..start + len].to_string()
}

/// A classified catalogue answer.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogueResponse {
    Rows(Vec<Vec<Value>>),
    ServiceError(String),
}

#[derive(Debug, Deserialize)]
struct TapPayload {
    data: Vec<Vec<Value>>,
}

/// Classify a raw response body.
///
/// Return
/// ----------
/// * [`CatalogueResponse::ServiceError`] for an XML body, [`CatalogueResponse::Rows`] for a
///   TAP JSON body, or [`TargetError::Json`] when the body is neither.
pub fn classify_response(body: &str) -> Result<CatalogueResponse, TargetError> {
    let body = body.trim_start();
    if body.starts_with('<') {
        return Ok(CatalogueResponse::ServiceError(simbad_error_message(body)));
    }
    let payload: TapPayload = serde_json::from_str(body)?;
    Ok(CatalogueResponse::Rows(payload.data))
}

impl CatalogueResponse {
    /// Turn an error document into [`TargetError::Service`], keep rows otherwise.
    pub fn into_rows(self) -> Result<Vec<Vec<Value>>, TargetError> {
        match self {
            CatalogueResponse::Rows(rows) => Ok(rows),
            CatalogueResponse::ServiceError(msg) if msg.is_empty() => Err(TargetError::Service(
                "SIMBAD returned an error document without a message".into(),
            )),
            CatalogueResponse::ServiceError(msg) => Err(TargetError::Service(msg)),
        }
    }
}

/// One row of an identifier search.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentifierCandidate {
    pub id: String,
    pub oidref: OidRef,
}

/// Position of one object, from the detail query.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogueDetail {
    pub main_id: String,
    pub ra: Degree,
    pub dec: Degree,
    /// Sexagesimal position, when the service supplies one.
    pub sexagesimal: Option<String>,
}

impl CatalogueDetail {
    /// Split the sexagesimal column (`"05 34 31.94 +22 00 52.2"`) into RA and Dec texts.
    ///
    /// The declination half starts at its mandatory sign. `None` when the column is absent, or
    /// when either half is not an in-range sexagesimal value.
    pub fn sexagesimal_texts(&self) -> Option<(String, String)> {
        let text = self.sexagesimal.as_deref()?;
        let (ra, dec) = text.split_at(text.find(['+', '-'])?);
        let halves = [
            (CoordinateKind::RightAscension, normalize_fraction(ra.trim())),
            (CoordinateKind::Declination, normalize_fraction(dec.trim())),
        ];
        for (kind, half) in &halves {
            if kind.classify(half) != CoordinateText::Sexagesimal || kind.parse(half).is_err() {
                return None;
            }
        }
        let [(_, ra), (_, dec)] = halves;
        Some((ra, dec))
    }
}

fn cell_str(row: &[Value], idx: usize) -> Option<String> {
    row.get(idx)?.as_str().map(|s| s.trim().to_string())
}

fn cell_f64(row: &[Value], idx: usize) -> Option<f64> {
    row.get(idx)?.as_f64()
}

fn cell_i64(row: &[Value], idx: usize) -> Option<i64> {
    row.get(idx)?.as_i64()
}

/// Decode identifier rows `[id, oidref]`, preserving response order.
pub fn parse_candidates(rows: Vec<Vec<Value>>) -> Result<Vec<IdentifierCandidate>, TargetError> {
    rows.into_iter()
        .map(|row| {
            match (cell_str(&row, 0), cell_i64(&row, 1)) {
                (Some(id), Some(oidref)) => Ok(IdentifierCandidate { id, oidref }),
                _ => Err(TargetError::ProtocolViolation(format!(
                    "identifier row has an unexpected shape: {row:?}"
                ))),
            }
        })
        .collect()
}

/// Decode the single row `[main_id, ra, dec, sexagesimal?]` of a detail query.
///
/// Any row count other than one is a [`TargetError::ProtocolViolation`]: the `oid` came from a
/// previous answer of the same service, so it must resolve to exactly one object.
pub fn parse_detail(rows: Vec<Vec<Value>>) -> Result<CatalogueDetail, TargetError> {
    if rows.len() != 1 {
        return Err(TargetError::ProtocolViolation(format!(
            "expected exactly one row for the object position, got {}",
            rows.len()
        )));
    }
    let row = &rows[0];
    match (cell_str(row, 0), cell_f64(row, 1), cell_f64(row, 2)) {
        (Some(main_id), Some(ra), Some(dec)) => Ok(CatalogueDetail {
            main_id,
            ra,
            dec,
            sexagesimal: cell_str(row, 3),
        }),
        _ => Err(TargetError::ProtocolViolation(format!(
            "object position row has an unexpected shape: {row:?}"
        ))),
    }
}
