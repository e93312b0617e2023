//! Per-field validation for the RA and Dec inputs.
//!
//! Two moments matter:
//!
//! * **on change** (every keystroke): only the character set is checked, so the user sees
//!   "Invalid character entered" as soon as they type a letter;
//! * **on blur**: the full text is classified and converted:
//!
//! ```text
//!             ┌────────── empty ─────────────► Empty (nothing happens)
//!  raw text ──┼── sexagesimal ──► range ok ──► Accepted(text + ".0" if no fraction)
//!             ├── bare decimal ─► range ok ──► Accepted(converted to sexagesimal)
//!             ├── either, out of range ──────► Rejected(Range)  "Value out-of-bounds"
//!             └── neither ───────────────────► Rejected(Format) "Invalid number format"
//! ```
//!
//! The field itself never touches the draft, the name or the viewer; [`super::TargetForm`]
//! reacts to the [`BlurOutcome`].

use crate::{
    constants::{ArcSec, Degree},
    conversion::{
        normalize_fraction, parse_decimal_degrees, sexagesimal_accuracy, CoordinateKind,
        CoordinateText,
    },
    target_errors::TargetError,
};

pub const INVALID_CHARACTER_MESSAGE: &str = "Invalid character entered";
pub const INVALID_FORMAT_MESSAGE: &str = "Invalid number format";
pub const OUT_OF_BOUNDS_MESSAGE: &str = "Value out-of-bounds";

#[derive(Debug, PartialEq)]
pub enum BlurOutcome {
    Empty,
    Accepted { text: String, degrees: Degree },
    Rejected(TargetError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateField {
    kind: CoordinateKind,
    message: Option<String>,
    degrees: Option<Degree>,
    accuracy: Option<ArcSec>,
}

impl CoordinateField {
    pub fn new(kind: CoordinateKind) -> Self {
        CoordinateField {
            kind,
            message: None,
            degrees: None,
            accuracy: None,
        }
    }

    pub fn kind(&self) -> CoordinateKind {
        self.kind
    }

    /// Inline validation message, `None` when the field is fine.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_invalid(&self) -> bool {
        self.message.is_some()
    }

    /// Decimal-degree reading of the accepted text, `None` once the text is edited or rejected.
    pub fn degrees(&self) -> Option<Degree> {
        self.degrees
    }

    /// Precision of the accepted text in arcseconds, from its fractional seconds digits.
    pub fn accuracy(&self) -> Option<ArcSec> {
        self.accuracy
    }

    pub fn reset(&mut self) {
        self.message = None;
        self.clear_reading();
    }

    fn clear_reading(&mut self) {
        self.degrees = None;
        self.accuracy = None;
    }

    /// Record `text` as accepted without running the blur grammar.
    ///
    /// Used when the value comes from a trusted source (catalogue, viewer) and has already been
    /// range checked as a [`super::SkyCoordinate`].
    pub fn set_accepted(&mut self, text: &str, degrees: Degree) {
        self.message = None;
        self.degrees = Some(degrees);
        self.accuracy = sexagesimal_accuracy(text, self.kind);
    }

    /// Keystroke check: flag the first character outside this axis' character set.
    ///
    /// The previous reading is dropped, the text no longer matches it.
    pub fn on_change(&mut self, text: &str) -> Result<(), TargetError> {
        self.clear_reading();
        match text.chars().find(|c| !self.kind.is_allowed_char(*c)) {
            Some(c) => {
                self.message = Some(INVALID_CHARACTER_MESSAGE.to_string());
                Err(TargetError::InvalidCharacter(c))
            }
            None => {
                self.message = None;
                Ok(())
            }
        }
    }

    /// Run the blur state machine on `text`.
    pub fn on_blur(&mut self, text: &str) -> BlurOutcome {
        let text = text.trim();
        if text.is_empty() {
            return BlurOutcome::Empty;
        }

        match self.convert(text) {
            Ok((text, degrees)) => {
                self.set_accepted(&text, degrees);
                BlurOutcome::Accepted { text, degrees }
            }
            Err(err) => {
                self.clear_reading();
                let message = match err {
                    TargetError::Range { .. } => OUT_OF_BOUNDS_MESSAGE,
                    _ => INVALID_FORMAT_MESSAGE,
                };
                self.message = Some(message.to_string());
                BlurOutcome::Rejected(err)
            }
        }
    }

    fn convert(&self, text: &str) -> Result<(String, Degree), TargetError> {
        match self.kind.classify(text) {
            CoordinateText::Sexagesimal => {
                let normalized = normalize_fraction(text);
                let degrees = self.kind.sexagesimal_to_degrees(&normalized)?;
                self.kind.check_range(degrees)?;
                Ok((normalized, degrees))
            }
            CoordinateText::Decimal => {
                let degrees = self.kind.check_range(parse_decimal_degrees(text)?)?;
                Ok((self.kind.degrees_to_sexagesimal(degrees), degrees))
            }
            CoordinateText::Invalid => Err(TargetError::Format(text.to_string())),
        }
    }
}

#[cfg(test)]
mod coordinate_field_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_on_change_flags_letters() {
        let mut ra = CoordinateField::new(CoordinateKind::RightAscension);
        assert_eq!(ra.on_change("10h"), Err(TargetError::InvalidCharacter('h')));
        assert_eq!(ra.message(), Some(INVALID_CHARACTER_MESSAGE));
        assert!(ra.on_change("10 30").is_ok());
        assert!(!ra.is_invalid());

        let mut dec = CoordinateField::new(CoordinateKind::Declination);
        assert!(dec.on_change("-12:30").is_ok());
        assert!(ra.on_change("-12").is_err());
    }

    #[test]
    fn test_blur_decimal_ra_is_rewritten() {
        let mut ra = CoordinateField::new(CoordinateKind::RightAscension);
        match ra.on_blur("10.5") {
            BlurOutcome::Accepted { text, degrees } => {
                assert_eq!(text, "00:42:00.000");
                assert_eq!(degrees, 10.5);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        assert_eq!(ra.degrees(), Some(10.5));
    }

    #[test]
    fn test_blur_sexagesimal_gets_fraction() {
        let mut dec = CoordinateField::new(CoordinateKind::Declination);
        match dec.on_blur("-12 30 00") {
            BlurOutcome::Accepted { text, degrees } => {
                assert_eq!(text, "-12 30 00.0");
                assert_eq!(degrees, -12.5);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn test_blur_rejections() {
        let mut dec = CoordinateField::new(CoordinateKind::Declination);
        assert!(matches!(
            dec.on_blur("ab:cd:ef"),
            BlurOutcome::Rejected(TargetError::Format(_))
        ));
        assert_eq!(dec.message(), Some(INVALID_FORMAT_MESSAGE));

        let mut ra = CoordinateField::new(CoordinateKind::RightAscension);
        assert!(matches!(
            ra.on_blur("25:00:00"),
            BlurOutcome::Rejected(TargetError::Range { .. })
        ));
        assert_eq!(ra.message(), Some(OUT_OF_BOUNDS_MESSAGE));
        assert!(matches!(
            ra.on_blur("400"),
            BlurOutcome::Rejected(TargetError::Range { .. })
        ));

        assert_eq!(ra.on_blur("   "), BlurOutcome::Empty);
    }

    #[test]
    fn test_rejected_blur_drops_previous_reading() {
        let mut ra = CoordinateField::new(CoordinateKind::RightAscension);
        assert!(matches!(ra.on_blur("10.5"), BlurOutcome::Accepted { .. }));
        assert_eq!(ra.degrees(), Some(10.5));

        assert!(matches!(ra.on_blur("ab"), BlurOutcome::Rejected(_)));
        assert_eq!(ra.message(), Some(INVALID_FORMAT_MESSAGE));
        assert_eq!(ra.degrees(), None);
        assert_eq!(ra.accuracy(), None);

        let mut dec = CoordinateField::new(CoordinateKind::Declination);
        dec.on_blur("-12 30 00");
        dec.on_blur("95");
        assert_eq!(dec.degrees(), None);
    }

    #[test]
    fn test_keystroke_drops_previous_reading() {
        let mut dec = CoordinateField::new(CoordinateKind::Declination);
        dec.on_blur("+41:16:07.5");
        assert_relative_eq!(dec.degrees().unwrap(), 41.26875, epsilon = 1e-12);
        assert_relative_eq!(dec.accuracy().unwrap(), 0.1, epsilon = 1e-12);

        dec.on_change("+41:16:07.").unwrap();
        assert_eq!(dec.degrees(), None);
        assert!(!dec.is_invalid());
    }

    #[test]
    fn test_accuracy_follows_accepted_text() {
        let mut ra = CoordinateField::new(CoordinateKind::RightAscension);
        ra.on_blur("05:34:31.94");
        assert_relative_eq!(ra.accuracy().unwrap(), 0.15, epsilon = 1e-12);

        // decimals are rewritten with millisecond seconds
        ra.on_blur("10.5");
        assert_relative_eq!(ra.accuracy().unwrap(), 0.015, epsilon = 1e-12);

        ra.set_accepted("00:42:00", 10.5);
        assert_eq!(ra.accuracy(), Some(15.0));
        assert_eq!(ra.degrees(), Some(10.5));
    }
}
