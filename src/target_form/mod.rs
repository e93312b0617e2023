//! # Target entry form
//!
//! [`TargetForm`] owns one [`TargetDraft`] together with everything that reacts to it:
//! the two [`CoordinateField`]s, the name validity, the sibling-name snapshot, the name
//! generator and the injected [`ViewerSlot`].
//!
//! ## Lifecycle
//!
//! 1. Created empty when the panel opens.
//! 2. Mutated by keystrokes ([`TargetForm::type_coordinate`], [`TargetForm::set_name`]),
//!    blur events ([`TargetForm::blur`]), catalogue lookups
//!    ([`TargetForm::apply_catalogue_detail`]) and viewer double-clicks
//!    ([`TargetForm::recenter_from_viewer`]).
//! 3. Turned into a [`CelestialTarget`] by [`TargetForm::prepare_submission`], then
//!    [`TargetForm::reset`].
//!
//! ## Blur side effects
//!
//! When a coordinate is accepted, an empty name is replaced by a generated one (checked against
//! the siblings straight away), and the viewer is recentered on the *combined* position read from
//! both fields. An empty sibling field counts as `0°`; an unparseable one skips the recenter.
//! A viewer that is not attached yet is not an error for the form.

pub mod coordinate_field;
pub mod draft;
pub mod payload;

use log::{debug, info};

use crate::{
    config::InvalidCoordinatePolicy,
    constants::Degree,
    conversion::CoordinateKind,
    naming::{NameValidity, SiblingNames, TargetNamer},
    simbad::response::CatalogueDetail,
    target_errors::TargetError,
    viewer::ViewerSlot,
};

pub use coordinate_field::{BlurOutcome, CoordinateField};
pub use draft::{SkyCoordinate, TargetDraft};
pub use payload::CelestialTarget;

#[derive(Debug)]
pub struct TargetForm {
    draft: TargetDraft,
    ra_field: CoordinateField,
    dec_field: CoordinateField,
    name_validity: NameValidity,
    siblings: SiblingNames,
    namer: TargetNamer,
    viewer: ViewerSlot,
    policy: InvalidCoordinatePolicy,
}

impl TargetForm {
    /// Construct an empty form.
    ///
    /// Arguments
    /// -----------------
    /// * `siblings`: names of the targets already on the proposal.
    /// * `namer`: generator for default / modified names.
    /// * `viewer`: sky viewer handle, possibly still empty.
    /// * `policy`: reaction to unparseable coordinate text.
    pub fn new(
        siblings: SiblingNames,
        namer: TargetNamer,
        viewer: ViewerSlot,
        policy: InvalidCoordinatePolicy,
    ) -> Self {
        TargetForm {
            draft: TargetDraft::default(),
            ra_field: CoordinateField::new(CoordinateKind::RightAscension),
            dec_field: CoordinateField::new(CoordinateKind::Declination),
            name_validity: NameValidity::Blank,
            siblings,
            namer,
            viewer,
            policy,
        }
    }

    pub fn draft(&self) -> &TargetDraft {
        &self.draft
    }

    pub fn field(&self, kind: CoordinateKind) -> &CoordinateField {
        match kind {
            CoordinateKind::RightAscension => &self.ra_field,
            CoordinateKind::Declination => &self.dec_field,
        }
    }

    fn field_mut(&mut self, kind: CoordinateKind) -> &mut CoordinateField {
        match kind {
            CoordinateKind::RightAscension => &mut self.ra_field,
            CoordinateKind::Declination => &mut self.dec_field,
        }
    }

    pub fn name_validity(&self) -> NameValidity {
        self.name_validity
    }

    pub fn siblings(&self) -> &SiblingNames {
        &self.siblings
    }

    pub fn siblings_mut(&mut self) -> &mut SiblingNames {
        &mut self.siblings
    }

    pub fn viewer(&self) -> &ViewerSlot {
        &self.viewer
    }

    pub fn viewer_mut(&mut self) -> &mut ViewerSlot {
        &mut self.viewer
    }

    /// The user edited the name field.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
        self.name_validity = self.siblings.validate(&self.draft.name);
    }

    /// The user typed into a coordinate field: store the text and run the character check.
    pub fn type_coordinate(&mut self, kind: CoordinateKind, text: &str) -> Result<(), TargetError> {
        self.draft.set_text(kind, text);
        self.field_mut(kind).on_change(text)
    }

    /// The user left a coordinate field.
    ///
    /// Return
    /// ----------
    /// * `Ok(Some(degrees))` when the text was accepted (and possibly rewritten),
    ///   `Ok(None)` for an empty field, or the [`TargetError::Format`] / [`TargetError::Range`]
    ///   that the field now displays.
    pub fn blur(&mut self, kind: CoordinateKind) -> Result<Option<Degree>, TargetError> {
        let text = self.draft.text(kind).to_string();
        match self.field_mut(kind).on_blur(&text) {
            BlurOutcome::Empty => Ok(None),
            BlurOutcome::Accepted { text, degrees } => {
                self.draft.set_text(kind, text);
                self.ensure_name();
                self.recenter_viewer();
                Ok(Some(degrees))
            }
            BlurOutcome::Rejected(err) => {
                if matches!(err, TargetError::Format(_))
                    && self.policy == InvalidCoordinatePolicy::ClearName
                {
                    debug!("{} text unparseable, clearing the target name", kind.label());
                    self.draft.name.clear();
                    self.name_validity = NameValidity::Blank;
                }
                Err(err)
            }
        }
    }

    fn ensure_name(&mut self) {
        if self.draft.name.trim().is_empty() {
            self.draft.name = self.namer.generate_default_name();
            self.name_validity = self.siblings.validate(&self.draft.name);
            debug!(
                "generated target name '{}' ({:?})",
                self.draft.name, self.name_validity
            );
        }
    }

    /// Degrees currently readable from a field: empty counts as zero.
    fn resolve(&self, kind: CoordinateKind) -> Option<Degree> {
        let text = self.draft.text(kind).trim();
        if text.is_empty() {
            return Some(0.0);
        }
        kind.parse(text).ok()
    }

    fn recenter_viewer(&mut self) {
        let (Some(ra), Some(dec)) = (
            self.resolve(CoordinateKind::RightAscension),
            self.resolve(CoordinateKind::Declination),
        ) else {
            debug!("one coordinate does not parse, viewer left in place");
            return;
        };
        if let Err(err) = self.viewer.goto_ra_dec(ra, dec) {
            debug!("viewer recenter skipped: {err}");
        }
    }

    /// Write an already range-checked value and its text to one field.
    fn write_coordinate(&mut self, kind: CoordinateKind, text: String, degrees: Degree) {
        self.field_mut(kind).set_accepted(&text, degrees);
        self.draft.set_text(kind, text);
    }

    fn write_position(&mut self, position: SkyCoordinate) {
        for (kind, value) in [
            (CoordinateKind::RightAscension, position.ra),
            (CoordinateKind::Declination, position.dec),
        ] {
            self.write_coordinate(kind, kind.degrees_to_sexagesimal(value), value);
        }
    }

    /// The user double-clicked the viewer: adopt its center as the target position.
    ///
    /// An empty name gets a default one; an existing name is marked as modified, since the
    /// target no longer sits at its catalogue position.
    pub fn recenter_from_viewer(&mut self) -> Result<SkyCoordinate, TargetError> {
        let (ra, dec) = self.viewer.get_ra_dec()?;
        let position = SkyCoordinate::new(ra.rem_euclid(360.0), dec)?;
        self.write_position(position);

        self.draft.name = if self.draft.name.trim().is_empty() {
            self.namer.generate_default_name()
        } else {
            self.namer.modify_name(self.draft.name.trim())
        };
        self.name_validity = self.siblings.validate(&self.draft.name);
        Ok(position)
    }

    /// Fill the form from a resolved catalogue object and recenter the viewer on it.
    ///
    /// The catalogue's own sexagesimal text is kept when it supplies a usable one, so the
    /// fields show the precision SIMBAD has; otherwise the text is formatted from the degrees.
    /// The form is left untouched when the position is out of range.
    pub fn apply_catalogue_detail(
        &mut self,
        detail: &CatalogueDetail,
    ) -> Result<SkyCoordinate, TargetError> {
        let position = SkyCoordinate::new(detail.ra, detail.dec)?;
        match detail.sexagesimal_texts() {
            Some((ra, dec)) => {
                self.write_coordinate(CoordinateKind::RightAscension, ra, position.ra);
                self.write_coordinate(CoordinateKind::Declination, dec, position.dec);
            }
            None => self.write_position(position),
        }
        self.set_name(detail.main_id.clone());
        self.recenter_viewer();
        Ok(position)
    }

    /// Whether the save action should be enabled.
    pub fn can_submit(&self) -> bool {
        self.name_validity.allows_submission()
            && !self.ra_field.is_invalid()
            && !self.dec_field.is_invalid()
            && self.draft.coordinates().is_ok()
    }

    /// Validate the draft and build the payload for the proposal API.
    ///
    /// Return
    /// ----------
    /// * The [`CelestialTarget`], or [`TargetError::EmptyName`], [`TargetError::DuplicateName`],
    ///   or the coordinate [`TargetError::Format`] / [`TargetError::Range`].
    pub fn prepare_submission(&self) -> Result<CelestialTarget, TargetError> {
        let name = self.draft.name.trim();
        match self.siblings.validate(name) {
            NameValidity::Blank => return Err(TargetError::EmptyName),
            NameValidity::Duplicate => return Err(TargetError::DuplicateName(name.to_string())),
            NameValidity::Unique => {}
        }
        let position = self.draft.coordinates()?;
        info!(
            "target '{name}' ready for submission at ra={}, dec={}",
            position.ra, position.dec
        );
        Ok(CelestialTarget::new(name, position, &self.draft.epoch))
    }

    /// Mark the current name as taken (the server or a fresh snapshot said so).
    pub fn mark_name_duplicate(&mut self) {
        self.name_validity = NameValidity::Duplicate;
    }

    /// Discard the draft after a successful submission.
    pub fn reset(&mut self) {
        self.draft = TargetDraft::default();
        self.ra_field.reset();
        self.dec_field.reset();
        self.name_validity = NameValidity::Blank;
    }
}
