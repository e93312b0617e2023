//! # Target panel: form, catalogue search and viewer wired together
//!
//! This module defines the [`TargetPanel`](crate::target_panel::TargetPanel) struct, the façade
//! behind the "new target" panel. It ties together:
//!
//! 1. **Environment state** ([`TargetEnv`](crate::env_state::TargetEnv)): HTTP client and configuration.
//! 2. **Catalogue lookup** ([`SimbadClient`] + [`SimbadSearch`]): the debounced search box and the
//!    position fetch of a chosen candidate.
//! 3. **Target form** ([`TargetForm`]): the draft, the coordinate fields, naming and the viewer slot.
//! 4. **Notifications** ([`Notifier`]): where service-level failures are reported.
//!
//! ## Typical usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use pst_target::{
//!     config::LookupConfig, env_state::TargetEnv, naming::SiblingNames,
//!     notifications::NotificationLog, target_panel::TargetPanel, viewer::CameraState,
//! };
//!
//! # async fn run() -> Result<(), pst_target::target_errors::TargetError> {
//! let env = TargetEnv::new(LookupConfig::default())?;
//! let notifications = NotificationLog::new();
//! let mut panel = TargetPanel::new(&env, SiblingNames::new(), Arc::new(notifications.clone()));
//! panel.attach_viewer(CameraState::default());
//!
//! panel.search().input("crab")?;
//! panel.search().settle().await;
//! if let Some(first) = panel.search().candidates().first() {
//!     panel.select_candidate(first.oidref).await?;
//! }
//! let payload = panel.submit()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Errors
//!
//! - Lookup failures (service error, timeout, protocol violation) are notified **and** returned;
//!   the form keeps its previous content.
//! - A duplicate name on submission is notified and returned; other submission errors are
//!   field-level and only returned.

use std::sync::Arc;

use log::info;

use crate::{
    config::LookupConfig,
    constants::OidRef,
    env_state::TargetEnv,
    naming::{SiblingNames, TargetNamer},
    notifications::{Notification, Notifier},
    simbad::{SimbadClient, SimbadSearch},
    target_errors::TargetError,
    target_form::{CelestialTarget, SkyCoordinate, TargetForm},
    viewer::{SkyViewer, ViewerSlot},
};

pub struct TargetPanel {
    client: Arc<SimbadClient>,
    search: SimbadSearch,
    form: TargetForm,
    notifier: Arc<dyn Notifier>,
}

impl std::fmt::Debug for TargetPanel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TargetPanel")
            .field("client", &self.client)
            .field("search", &self.search)
            .field("form", &self.form)
            .finish_non_exhaustive()
    }
}

impl TargetPanel {
    /// Panel talking to SIMBAD over HTTP, with an empty viewer slot.
    pub fn new(env: &TargetEnv, siblings: SiblingNames, notifier: Arc<dyn Notifier>) -> Self {
        let client = Arc::new(SimbadClient::from_env(env));
        let form = TargetForm::new(
            siblings,
            TargetNamer::new(),
            ViewerSlot::empty(),
            env.config.invalid_coordinate_policy,
        );
        TargetPanel::with_parts(&env.config, client, form, notifier)
    }

    /// Assemble a panel from an existing client and form.
    pub fn with_parts(
        config: &LookupConfig,
        client: Arc<SimbadClient>,
        form: TargetForm,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let search = SimbadSearch::new(
            Arc::clone(&client),
            Arc::clone(&notifier),
            config.debounce(),
            config.query_kind,
        );
        TargetPanel {
            client,
            search,
            form,
            notifier,
        }
    }

    pub fn form(&self) -> &TargetForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut TargetForm {
        &mut self.form
    }

    pub fn search(&self) -> &SimbadSearch {
        &self.search
    }

    /// The sky atlas finished loading.
    pub fn attach_viewer<V: SkyViewer + 'static>(&mut self, viewer: V) {
        self.form.viewer_mut().attach(viewer);
    }

    /// Resolve the candidate `oidref` and copy its name and position into the form.
    ///
    /// Return
    /// ----------
    /// * The position written to the form, or the error (also notified): service-level failures
    ///   as "Catalogue lookup failed", an out-of-range catalogue position as
    ///   "Catalogue position rejected".
    pub async fn select_candidate(&mut self, oidref: OidRef) -> Result<SkyCoordinate, TargetError> {
        let result = match self.client.fetch_detail(oidref).await {
            Ok(detail) => self.form.apply_catalogue_detail(&detail),
            Err(err) => Err(err),
        };
        if let Err(err) = &result {
            let title = if err.is_service_level() {
                "Catalogue lookup failed"
            } else {
                "Catalogue position rejected"
            };
            self.notifier.notify(Notification::from_error(title, err));
        }
        result
    }

    /// Validate the draft and hand back the payload for the proposal API.
    ///
    /// On success the name joins the sibling snapshot and the draft is discarded.
    pub fn submit(&mut self) -> Result<CelestialTarget, TargetError> {
        match self.form.prepare_submission() {
            Ok(target) => {
                self.form.siblings_mut().insert(target.source_name.clone());
                self.form.reset();
                info!("submitted target '{}'", target.source_name);
                self.notifier.notify(Notification::success(
                    "Target ready",
                    format!("'{}' is ready to be added", target.source_name),
                ));
                Ok(target)
            }
            Err(TargetError::DuplicateName(name)) => {
                self.form.mark_name_duplicate();
                let err = TargetError::DuplicateName(name);
                self.notifier
                    .notify(Notification::from_error("Duplicate target", &err));
                Err(err)
            }
            Err(err) => Err(err),
        }
    }
}
