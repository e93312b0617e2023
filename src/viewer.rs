//! # Sky viewer capability
//!
//! The embedded sky atlas is an external widget; this crate only needs to recenter it and to
//! read back its current center. [`SkyViewer`] is that two-method capability, and
//! [`ViewerSlot`] is the injected handle through which every component reaches it.
//!
//! A slot starts **empty**: the widget may still be loading when the user begins typing.
//! Calls made while the slot is empty return [`TargetError::ViewerNotReady`] and the caller
//! decides whether that matters (the coordinate fields simply skip the recenter).

use log::debug;

use crate::{constants::Degree, target_errors::TargetError};

/// Minimal control surface of a sky atlas widget.
pub trait SkyViewer: Send {
    /// Center the view on the given equatorial position (degrees).
    fn goto_ra_dec(&mut self, ra: Degree, dec: Degree);

    /// Current center of the view as `(ra, dec)` in degrees.
    fn get_ra_dec(&self) -> (Degree, Degree);
}

/// Headless viewer that only remembers where it was pointed.
///
/// Useful when no widget is attached (batch entry, tests) but callers still
/// want `get_ra_dec` to report the last recenter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CameraState {
    pub ra: Degree,
    pub dec: Degree,
    pub moves: usize,
}

impl SkyViewer for CameraState {
    fn goto_ra_dec(&mut self, ra: Degree, dec: Degree) {
        self.ra = ra;
        self.dec = dec;
        self.moves += 1;
    }

    fn get_ra_dec(&self) -> (Degree, Degree) {
        (self.ra, self.dec)
    }
}

/// Optional, late-bound handle on a [`SkyViewer`].
#[derive(Default)]
pub struct ViewerSlot {
    viewer: Option<Box<dyn SkyViewer>>,
}

impl std::fmt::Debug for ViewerSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewerSlot")
            .field("ready", &self.is_ready())
            .finish()
    }
}

impl ViewerSlot {
    /// A slot with no viewer attached yet.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A slot already holding `viewer`.
    pub fn with_viewer<V: SkyViewer + 'static>(viewer: V) -> Self {
        ViewerSlot {
            viewer: Some(Box::new(viewer)),
        }
    }

    /// Attach the viewer once the widget has finished loading, replacing any previous one.
    pub fn attach<V: SkyViewer + 'static>(&mut self, viewer: V) {
        debug!("sky viewer attached");
        self.viewer = Some(Box::new(viewer));
    }

    /// Detach and return the current viewer, leaving the slot empty.
    pub fn detach(&mut self) -> Option<Box<dyn SkyViewer>> {
        self.viewer.take()
    }

    pub fn is_ready(&self) -> bool {
        self.viewer.is_some()
    }

    /// Recenter the attached viewer.
    pub fn goto_ra_dec(&mut self, ra: Degree, dec: Degree) -> Result<(), TargetError> {
        let viewer = self.viewer.as_mut().ok_or(TargetError::ViewerNotReady)?;
        debug!("recentering sky viewer on ra={ra}, dec={dec}");
        viewer.goto_ra_dec(ra, dec);
        Ok(())
    }

    /// Read the attached viewer's center.
    pub fn get_ra_dec(&self) -> Result<(Degree, Degree), TargetError> {
        self.viewer
            .as_ref()
            .map(|v| v.get_ra_dec())
            .ok_or(TargetError::ViewerNotReady)
    }
}
