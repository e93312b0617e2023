use crate::{
    constants::{Degree, DEFAULT_EPOCH},
    conversion::CoordinateKind,
    target_errors::TargetError,
};

/// Equatorial position in decimal degrees, `ra ∈ [0, 360)`, `dec ∈ [-90, 90]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyCoordinate {
    pub ra: Degree,
    pub dec: Degree,
}

impl SkyCoordinate {
    /// Build a coordinate, rejecting out-of-range angles.
    pub fn new(ra: Degree, dec: Degree) -> Result<Self, TargetError> {
        Ok(SkyCoordinate {
            ra: CoordinateKind::RightAscension.check_range(ra)?,
            dec: CoordinateKind::Declination.check_range(dec)?,
        })
    }
}

/// The in-progress target as typed in the form.
///
/// Coordinates are kept as the text shown in the fields; they are only turned into
/// degrees on blur and on submission.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetDraft {
    pub name: String,
    pub ra: String,
    pub dec: String,
    pub epoch: String,
}

impl Default for TargetDraft {
    fn default() -> Self {
        TargetDraft {
            name: String::new(),
            ra: String::new(),
            dec: String::new(),
            epoch: DEFAULT_EPOCH.to_string(),
        }
    }
}

impl TargetDraft {
    pub fn text(&self, kind: CoordinateKind) -> &str {
        match kind {
            CoordinateKind::RightAscension => &self.ra,
            CoordinateKind::Declination => &self.dec,
        }
    }

    pub fn set_text(&mut self, kind: CoordinateKind, text: impl Into<String>) {
        match kind {
            CoordinateKind::RightAscension => self.ra = text.into(),
            CoordinateKind::Declination => self.dec = text.into(),
        }
    }

    /// Parse both coordinate fields.
    pub fn coordinates(&self) -> Result<SkyCoordinate, TargetError> {
        Ok(SkyCoordinate {
            ra: CoordinateKind::RightAscension.parse(&self.ra)?,
            dec: CoordinateKind::Declination.parse(&self.dec)?,
        })
    }
}
