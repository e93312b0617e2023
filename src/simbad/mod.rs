//! # SIMBAD catalogue lookup
//!
//! Resolves what the user types in the search box into catalogue objects, and a chosen object
//! into a sky position, using the [SIMBAD](https://simbad.cds.unistra.fr) TAP service.
//!
//! ## Layout
//!
//! - [`query`]: ADQL construction and the local character blacklist.
//! - [`response`]: JSON / XML-error classification and row decoding.
//! - [`transport`]: the network seam ([`transport::CatalogueTransport`]) and its HTTP implementation.
//! - [`client`]: one-shot identifier search and position fetch.
//! - [`search`]: the debounced, generation-guarded search box state.
//!
//! ## Error flow
//!
//! | Failure | Raised as | Reaches the network? |
//! |---|---|---|
//! | blacklisted character | [`TargetError::InvalidCharacter`](crate::target_errors::TargetError::InvalidCharacter) | no |
//! | XML error document | [`TargetError::Service`](crate::target_errors::TargetError::Service) | yes |
//! | request timeout | [`TargetError::Service`](crate::target_errors::TargetError::Service) | yes |
//! | transport failure | [`TargetError::Http`](crate::target_errors::TargetError::Http) | yes |
//! | wrong row count on position fetch | [`TargetError::ProtocolViolation`](crate::target_errors::TargetError::ProtocolViolation) | yes |

pub mod client;
pub mod query;
pub mod response;
pub mod search;
pub mod transport;

pub use client::SimbadClient;
pub use query::QueryKind;
pub use response::{CatalogueDetail, CatalogueResponse, IdentifierCandidate};
pub use search::{SearchSnapshot, SimbadSearch};
pub use transport::{CatalogueTransport, HttpTransport};
