//! # Constants and type definitions for target entry
//!
//! This module centralizes the **angular conversion factors**, the **SIMBAD defaults** and the
//! **common type aliases** shared by the converter, the input fields and the catalogue client.
//!
//! ## Overview
//!
//! - Angle unit conversions (hours ↔ degrees, arcminutes/arcseconds ↔ degrees)
//! - Coordinate bounds for right ascension and declination
//! - Default settings for the SIMBAD TAP lookup (URL, debounce, row cap, timeout)
//! - Core type aliases used across the crate

// -------------------------------------------------------------------------------------------------
// Angular conversions and bounds
// -------------------------------------------------------------------------------------------------

/// Degrees covered by one hour of right ascension
pub const DEG_PER_HOUR: f64 = 15.0;

/// Minutes in one hour / arcminutes in one degree
pub const MINUTES_PER_UNIT: f64 = 60.0;

/// Seconds in one hour / arcseconds in one degree
pub const SECONDS_PER_UNIT: f64 = 3600.0;

/// Upper bound (exclusive) of right ascension in degrees
pub const RA_MAX_DEG: f64 = 360.0;

/// Bound of the declination magnitude in degrees
pub const DEC_MAX_DEG: f64 = 90.0;

/// Number of fractional digits written for the seconds field
pub const SECONDS_PRECISION: usize = 3;

/// Epoch tag attached to every target draft
pub const DEFAULT_EPOCH: &str = "J2000";

/// Reference frame tag sent with the target payload
pub const DEFAULT_FRAME: &str = "ICRS";

// -------------------------------------------------------------------------------------------------
// SIMBAD lookup defaults
// -------------------------------------------------------------------------------------------------

/// SIMBAD TAP synchronous endpoint
pub const SIMBAD_TAP_URL: &str = "https://simbad.cds.unistra.fr/simbad/sim-tap/sync";

/// Delay between the last keystroke and the search request, in milliseconds
pub const DEFAULT_DEBOUNCE_MS: u64 = 1000;

/// Maximum number of identifier rows requested per search
pub const DEFAULT_ROW_LIMIT: usize = 100;

/// Timeout applied to each catalogue request, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Characters refused in a search query because they break the ADQL string literal
/// or act as wildcards.
pub const QUERY_BLACKLIST: &[char] = &['*', '\'', '"', '%', ';', '\\', '?', '`'];

/// Number of base-36 digits appended to generated target names
pub const NAME_SUFFIX_LEN: usize = 5;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in arcseconds
pub type ArcSec = f64;
/// Stable SIMBAD object reference (`oid` / `oidref` columns)
pub type OidRef = i64;
