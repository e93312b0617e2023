//! # Sexagesimal ↔ decimal-degree conversion
//!
//! Parsing, formatting and range validation for the two equatorial coordinates typed by users:
//!
//! - **Right ascension**: `HH:MM:SS[.sss]` (hours) or a bare decimal number of degrees.
//! - **Declination**: `±DD:MM:SS[.sss]` (degrees) or a bare signed decimal number of degrees.
//!
//! Field separators may be `:` or a single space, and may be mixed.
//!
//! Parsing and range checking are two distinct steps: a string such as `"25:00:00.0"` is
//! syntactically valid and converts to 375°, it is [`check_ra_range`] that rejects it.
//!
//! ## See also
//! ------------
//! * [`CoordinateKind`] – bundles grammar, conversion and bounds for one axis.
//! * [`crate::target_form::coordinate_field`] – blur-time state machine built on top of these helpers.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::{
    constants::{
        ArcSec, Degree, DEC_MAX_DEG, DEG_PER_HOUR, MINUTES_PER_UNIT, RA_MAX_DEG, SECONDS_PER_UNIT,
        SECONDS_PRECISION,
    },
    target_errors::TargetError,
};

static RA_SEXAGESIMAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<major>\d{1,2})[ :](?P<min>\d{1,2})[ :](?P<sec>\d{1,2}(?:\.\d+)?)$")
        .expect("valid RA sexagesimal regex")
});

static DEC_SEXAGESIMAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<sign>[-+])?(?P<major>\d{1,2})[ :](?P<min>\d{1,2})[ :](?P<sec>\d{1,2}(?:\.\d+)?)$",
    )
    .expect("valid Dec sexagesimal regex")
});

static RA_DECIMAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,3}(?:\.\d+)?$").expect("valid RA decimal regex"));

static DEC_DECIMAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-+]?\d{1,2}(?:\.\d+)?$").expect("valid Dec decimal regex"));

/// Which equatorial axis a piece of text describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoordinateKind {
    RightAscension,
    Declination,
}

/// Result of matching raw field text against the two grammars of an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateText {
    Sexagesimal,
    Decimal,
    Invalid,
}

impl CoordinateKind {
    /// Short label used in messages and logs.
    pub fn label(&self) -> &'static str {
        match self {
            CoordinateKind::RightAscension => "RA",
            CoordinateKind::Declination => "Dec",
        }
    }

    /// Characters a user may type into a field of this kind.
    pub fn is_allowed_char(&self, c: char) -> bool {
        match self {
            CoordinateKind::RightAscension => c.is_ascii_digit() || matches!(c, ' ' | ':' | '.'),
            CoordinateKind::Declination => {
                c.is_ascii_digit() || matches!(c, ' ' | ':' | '.' | '+' | '-')
            }
        }
    }

    /// Classify raw text as sexagesimal, bare decimal or neither.
    pub fn classify(&self, text: &str) -> CoordinateText {
        let (sgm, dec) = match self {
            CoordinateKind::RightAscension => (&*RA_SEXAGESIMAL, &*RA_DECIMAL),
            CoordinateKind::Declination => (&*DEC_SEXAGESIMAL, &*DEC_DECIMAL),
        };
        if sgm.is_match(text) {
            CoordinateText::Sexagesimal
        } else if dec.is_match(text) {
            CoordinateText::Decimal
        } else {
            CoordinateText::Invalid
        }
    }

    /// Parse sexagesimal text of this kind into degrees, without range validation.
    pub fn sexagesimal_to_degrees(&self, text: &str) -> Result<Degree, TargetError> {
        match self {
            CoordinateKind::RightAscension => hms_to_degrees(text),
            CoordinateKind::Declination => dms_to_degrees(text),
        }
    }

    /// Format degrees as sexagesimal text of this kind.
    pub fn degrees_to_sexagesimal(&self, value: Degree) -> String {
        match self {
            CoordinateKind::RightAscension => degrees_to_hms(value),
            CoordinateKind::Declination => degrees_to_dms(value),
        }
    }

    /// Validate that `value` lies inside the bounds of this axis.
    pub fn check_range(&self, value: Degree) -> Result<Degree, TargetError> {
        match self {
            CoordinateKind::RightAscension => check_ra_range(value),
            CoordinateKind::Declination => check_dec_range(value),
        }
    }

    /// Parse either grammar into degrees, then apply the range check.
    ///
    /// Return
    /// ----------
    /// * The angle in degrees, a [`TargetError::Format`] when no grammar matches, or a
    ///   [`TargetError::Range`] when the angle is well formed but out of bounds.
    pub fn parse(&self, text: &str) -> Result<Degree, TargetError> {
        let text = text.trim();
        let degrees = match self.classify(text) {
            CoordinateText::Sexagesimal => self.sexagesimal_to_degrees(text)?,
            CoordinateText::Decimal => parse_decimal_degrees(text)?,
            CoordinateText::Invalid => return Err(TargetError::Format(text.to_string())),
        };
        self.check_range(degrees)
    }
}

/// Append `.0` when the seconds field has no fractional part, so every accepted
/// string has the same shape.
pub fn normalize_fraction(text: &str) -> String {
    if text.contains('.') {
        text.to_string()
    } else {
        format!("{text}.0")
    }
}

fn capture_f64(caps: &Captures, name: &str, text: &str) -> Result<f64, TargetError> {
    caps.name(name)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .ok_or_else(|| TargetError::Format(text.to_string()))
}

/// Minutes and seconds share the same 0–59 constraint on both axes.
fn check_sub_fields(minutes: f64, seconds: f64, text: &str) -> Result<(), TargetError> {
    if minutes >= MINUTES_PER_UNIT || seconds >= MINUTES_PER_UNIT {
        return Err(TargetError::Format(text.to_string()));
    }
    Ok(())
}

/// Parse a right ascension string to degrees
///
/// Arguments
/// ---------
/// * `text`: a right ascension in the format `HH:MM:SS[.sss]` (`:` or space separated)
///
/// Returns
/// -------
/// * `(H + M/60 + S/3600) * 15` in degrees, or [`TargetError::Format`] on a pattern mismatch.
///   The hour field is not bounded here, see [`check_ra_range`].
pub fn hms_to_degrees(text: &str) -> Result<Degree, TargetError> {
    let normalized = normalize_fraction(text.trim());
    let caps = RA_SEXAGESIMAL
        .captures(&normalized)
        .ok_or_else(|| TargetError::Format(text.to_string()))?;

    let h = capture_f64(&caps, "major", text)?;
    let m = capture_f64(&caps, "min", text)?;
    let s = capture_f64(&caps, "sec", text)?;
    check_sub_fields(m, s, text)?;

    Ok((h + m / MINUTES_PER_UNIT + s / SECONDS_PER_UNIT) * DEG_PER_HOUR)
}

/// Parse a declination string to degrees
///
/// Arguments
/// ---------
/// * `text`: a declination in the format `±DD:MM:SS[.sss]`, the sign defaults to `+`
///
/// Returns
/// -------
/// * The signed angle in degrees, or [`TargetError::Format`] on a pattern mismatch.
///   `-00:30:00` yields `-0.5`: the sign is read from the text, not from the degree value.
pub fn dms_to_degrees(text: &str) -> Result<Degree, TargetError> {
    let normalized = normalize_fraction(text.trim());
    let caps = DEC_SEXAGESIMAL
        .captures(&normalized)
        .ok_or_else(|| TargetError::Format(text.to_string()))?;

    let sign = match caps.name("sign").map(|m| m.as_str()) {
        Some("-") => -1.0,
        _ => 1.0,
    };
    let d = capture_f64(&caps, "major", text)?;
    let m = capture_f64(&caps, "min", text)?;
    let s = capture_f64(&caps, "sec", text)?;
    check_sub_fields(m, s, text)?;

    Ok(sign * (d + m / MINUTES_PER_UNIT + s / SECONDS_PER_UNIT))
}

/// Parse a bare decimal number of degrees (either axis).
pub fn parse_decimal_degrees(text: &str) -> Result<Degree, TargetError> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| TargetError::Format(text.to_string()))
}

/// Split a non-negative quantity expressed in `unit` into zero-padded `major:min:sec.fff` fields.
///
/// The rounding happens on the integer count of thousandths of a second so that a value such as
/// `59.9996` seconds carries into the minute field instead of printing `60.000`.
fn split_sexagesimal(value: f64) -> (i64, i64, i64, i64) {
    let scale = 10_i64.pow(SECONDS_PRECISION as u32);
    let total = (value * SECONDS_PER_UNIT * scale as f64).round() as i64;

    let frac = total % scale;
    let whole_seconds = total / scale;
    let sec = whole_seconds % 60;
    let min = (whole_seconds / 60) % 60;
    let major = whole_seconds / 3600;
    (major, min, sec, frac)
}

/// Format degrees of right ascension as `HH:MM:SS.sss`.
///
/// Negative inputs and inputs past 360° are wrapped into `[0, 360)`; a value that rounds up
/// to 24h is printed as `00:00:00.000`.
pub fn degrees_to_hms(value: Degree) -> String {
    let hours = value.rem_euclid(RA_MAX_DEG) / DEG_PER_HOUR;
    let (h, m, s, frac) = split_sexagesimal(hours);
    format!(
        "{:02}:{:02}:{:02}.{:0width$}",
        h % 24,
        m,
        s,
        frac,
        width = SECONDS_PRECISION
    )
}

/// Format degrees of declination as `±DD:MM:SS.sss` (the sign is always written).
pub fn degrees_to_dms(value: Degree) -> String {
    let sign = if value < 0.0 { '-' } else { '+' };
    let (d, m, s, frac) = split_sexagesimal(value.abs());
    format!(
        "{sign}{:02}:{:02}:{:02}.{:0width$}",
        d,
        m,
        s,
        frac,
        width = SECONDS_PRECISION
    )
}

/// Reject right ascensions outside `[0, 360)`.
pub fn check_ra_range(value: Degree) -> Result<Degree, TargetError> {
    if (0.0..RA_MAX_DEG).contains(&value) {
        Ok(value)
    } else {
        Err(TargetError::Range {
            value,
            bounds: "[0, 360)",
        })
    }
}

/// Reject declinations outside `[-90, 90]`.
pub fn check_dec_range(value: Degree) -> Result<Degree, TargetError> {
    if (-DEC_MAX_DEG..=DEC_MAX_DEG).contains(&value) {
        Ok(value)
    } else {
        Err(TargetError::Range {
            value,
            bounds: "[-90, 90]",
        })
    }
}

/// Estimate the accuracy implied by the number of fractional digits of the seconds field.
///
/// Arguments
/// ---------------
/// * `text`: sexagesimal text (`"06 50 13.370"`, `"-14:47:05.4"`)
/// * `kind`: axis of the text; seconds of time are worth 15 arcseconds
///
/// Return
/// ----------
/// * The accuracy in arcseconds, or `None` if the text has no seconds field.
pub fn sexagesimal_accuracy(text: &str, kind: CoordinateKind) -> Option<ArcSec> {
    let seconds = text.trim().rsplit([':', ' ']).next()?;
    if seconds.is_empty() {
        return None;
    }
    let digits_after_dot = seconds
        .find('.')
        .map(|dot| seconds.len() - dot - 1)
        .unwrap_or(0);
    let acc = 10f64.powi(-(digits_after_dot as i32));
    match kind {
        CoordinateKind::RightAscension => Some(acc * DEG_PER_HOUR),
        CoordinateKind::Declination => Some(acc),
    }
}

#[cfg(test)]
mod conversion_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_hms_to_degrees() {
        assert_relative_eq!(
            hms_to_degrees("22 52 23.37").unwrap(),
            343.097375,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            hms_to_degrees("04:41:04.77").unwrap(),
            70.269875,
            epsilon = 1e-9
        );
        assert_relative_eq!(hms_to_degrees("00:42:00").unwrap(), 10.5, epsilon = 1e-12);
        assert_relative_eq!(
            hms_to_degrees("6 50 13.370").unwrap(),
            102.55570833333333,
            epsilon = 1e-9
        );
        assert!(matches!(hms_to_degrees("1 2"), Err(TargetError::Format(_))));
        assert!(matches!(
            hms_to_degrees("1 2 3.4.5"),
            Err(TargetError::Format(_))
        ));
        assert!(matches!(
            hms_to_degrees("10:75:00"),
            Err(TargetError::Format(_))
        ));
    }

    #[test]
    fn test_dms_to_degrees() {
        assert_relative_eq!(
            dms_to_degrees("-00 30 14.2").unwrap(),
            -0.5039444444444444,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            dms_to_degrees("+13:55:42.7").unwrap(),
            13.928527777777777,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            dms_to_degrees("89 15 50.2").unwrap(),
            89.26394444444445,
            epsilon = 1e-12
        );
        assert!(matches!(
            dms_to_degrees("89 15"),
            Err(TargetError::Format(_))
        ));
        assert!(matches!(
            dms_to_degrees("ab:cd:ef"),
            Err(TargetError::Format(_))
        ));
    }

    #[test]
    fn test_range_is_checked_after_parsing() {
        let parsed = hms_to_degrees("25:00:00.0").unwrap();
        assert_relative_eq!(parsed, 375.0);
        assert_eq!(
            check_ra_range(parsed),
            Err(TargetError::Range {
                value: 375.0,
                bounds: "[0, 360)"
            })
        );
        assert!(matches!(
            CoordinateKind::RightAscension.parse("25:00:00.0"),
            Err(TargetError::Range { .. })
        ));
        assert!(matches!(
            CoordinateKind::Declination.parse("-95.5"),
            Err(TargetError::Range { .. })
        ));
        assert!(check_ra_range(360.0).is_err());
        assert!(check_dec_range(90.0).is_ok());
    }

    #[test]
    fn test_formatting() {
        assert_eq!(degrees_to_hms(10.5), "00:42:00.000");
        assert_eq!(degrees_to_hms(343.097375), "22:52:23.370");
        assert_eq!(degrees_to_hms(-15.0), "23:00:00.000");
        assert_eq!(degrees_to_hms(359.9999999), "00:00:00.000");
        assert_eq!(degrees_to_dms(-0.5), "-00:30:00.000");
        assert_eq!(degrees_to_dms(41.26875), "+41:16:07.500");
        assert_eq!(degrees_to_dms(90.0), "+90:00:00.000");
    }

    #[test]
    fn test_classify() {
        let ra = CoordinateKind::RightAscension;
        assert_eq!(ra.classify("10:30:00"), CoordinateText::Sexagesimal);
        assert_eq!(ra.classify("10 30:00.25"), CoordinateText::Sexagesimal);
        assert_eq!(ra.classify("225.5"), CoordinateText::Decimal);
        assert_eq!(ra.classify("-10.5"), CoordinateText::Invalid);

        let dec = CoordinateKind::Declination;
        assert_eq!(dec.classify("-12 30 00.0"), CoordinateText::Sexagesimal);
        assert_eq!(dec.classify("-12.5"), CoordinateText::Decimal);
        assert_eq!(dec.classify("ab:cd:ef"), CoordinateText::Invalid);
        assert_eq!(dec.classify("123.4"), CoordinateText::Invalid);
    }

    #[test]
    fn test_allowed_chars() {
        assert!(CoordinateKind::RightAscension.is_allowed_char(':'));
        assert!(!CoordinateKind::RightAscension.is_allowed_char('-'));
        assert!(CoordinateKind::Declination.is_allowed_char('-'));
        assert!(!CoordinateKind::Declination.is_allowed_char('h'));
    }

    #[test]
    fn test_sexagesimal_accuracy() {
        assert_relative_eq!(
            sexagesimal_accuracy("-14 47 05.4", CoordinateKind::Declination).unwrap(),
            0.1,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            sexagesimal_accuracy("06:50:13.370", CoordinateKind::RightAscension).unwrap(),
            0.015,
            epsilon = 1e-12
        );
        assert_eq!(
            sexagesimal_accuracy("10:00:00", CoordinateKind::Declination),
            Some(1.0)
        );
    }
}
