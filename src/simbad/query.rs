//! ADQL query construction for the SIMBAD TAP service.
//!
//! Two identifier searches are supported:
//!
//! * **Alternate name**: the text is turned into a SIMBAD `NAME …` identifier (first character
//!   capitalised) and matched as a prefix, keeping one identifier per object.
//! * **Catalogue reference**: the text is matched exactly against the `ident` table.
//!
//! A third query fetches the position of one object from its stable `oid`.

use serde::Deserialize;

use crate::{
    constants::{OidRef, QUERY_BLACKLIST},
    target_errors::TargetError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryKind {
    #[default]
    AlternateName,
    CatalogueReference,
}

/// Reject text containing a character that would break the ADQL literal.
///
/// Return
/// ----------
/// * `Ok(())`, or [`TargetError::InvalidCharacter`] holding the first offending character.
pub fn check_query_chars(text: &str) -> Result<(), TargetError> {
    match text.chars().find(|c| QUERY_BLACKLIST.contains(c)) {
        Some(c) => Err(TargetError::InvalidCharacter(c)),
        None => Ok(()),
    }
}

/// `"andromeda"` → `"NAME Andromeda"`
pub fn alternate_name(ident: &str) -> String {
    let mut chars = ident.chars();
    match chars.next() {
        Some(first) => format!("NAME {}{}", first.to_uppercase(), chars.as_str()),
        None => "NAME ".to_string(),
    }
}

/// Build the identifier search for `text`, capped at `limit` rows.
pub fn identifier_query(text: &str, kind: QueryKind, limit: usize) -> Result<String, TargetError> {
    check_query_chars(text)?;
    let query = match kind {
        QueryKind::AlternateName => format!(
            "select top {limit} min(id),oidref from ident where id like '{}%' group by oidref",
            alternate_name(text)
        ),
        QueryKind::CatalogueReference => {
            format!("select top {limit} id,oidref from ident where id = '{text}'")
        }
    };
    Ok(query)
}

/// Build the position lookup for one object.
pub fn detail_query(oidref: OidRef) -> String {
    format!("select main_id,ra,dec from basic where oid = {oidref}")
}
