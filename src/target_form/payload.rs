//! Target object handed to the proposal API on submission.
//!
//! The JSON shape follows the proposal tool schema (`proposal:CelestialTarget` holding a
//! `coords:EquatorialPoint`). As in the existing tool, `lat` carries the right ascension and
//! `lon` the declination, both in degrees.

use serde::Serialize;

use crate::{
    constants::{Degree, DEFAULT_FRAME},
    target_form::draft::SkyCoordinate,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Unit {
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RealQuantity {
    #[serde(rename = "@type")]
    pub type_tag: String,
    pub value: Degree,
    pub unit: Unit,
}

impl RealQuantity {
    pub fn degrees(value: Degree) -> Self {
        RealQuantity {
            type_tag: "ivoa:RealQuantity".into(),
            value,
            unit: Unit {
                value: "degrees".into(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceFrame {
    #[serde(rename = "@type")]
    pub type_tag: String,
    pub space_ref_frame: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoordSys {
    #[serde(rename = "@type")]
    pub type_tag: String,
    pub frame: SpaceFrame,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquatorialPoint {
    #[serde(rename = "@type")]
    pub type_tag: String,
    pub coord_sys: CoordSys,
    pub lat: RealQuantity,
    pub lon: RealQuantity,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionEpoch {
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CelestialTarget {
    #[serde(rename = "@type")]
    pub type_tag: String,
    pub source_name: String,
    pub source_coordinates: EquatorialPoint,
    pub position_epoch: PositionEpoch,
}

impl CelestialTarget {
    pub fn new(name: &str, position: SkyCoordinate, epoch: &str) -> Self {
        CelestialTarget {
            type_tag: "proposal:CelestialTarget".into(),
            source_name: name.trim().to_string(),
            source_coordinates: EquatorialPoint {
                type_tag: "coords:EquatorialPoint".into(),
                coord_sys: CoordSys {
                    type_tag: "coords:SpaceSys".into(),
                    frame: SpaceFrame {
                        type_tag: "coords:SpaceFrame".into(),
                        space_ref_frame: DEFAULT_FRAME.into(),
                    },
                },
                lat: RealQuantity::degrees(position.ra),
                lon: RealQuantity::degrees(position.dec),
            },
            position_epoch: PositionEpoch {
                value: epoch.to_string(),
            },
        }
    }

    pub fn position(&self) -> SkyCoordinate {
        SkyCoordinate {
            ra: self.source_coordinates.lat.value,
            dec: self.source_coordinates.lon.value,
        }
    }
}
