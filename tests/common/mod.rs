#![allow(dead_code)]

use std::{sync::Arc, time::Duration};

use approx::assert_abs_diff_eq;
use async_trait::async_trait;
use parking_lot::Mutex;
use pst_target::{
    config::{InvalidCoordinatePolicy, LookupConfig},
    naming::{SiblingNames, TargetNamer},
    notifications::NotificationLog,
    simbad::{CatalogueTransport, SimbadClient},
    target_errors::TargetError,
    target_form::TargetForm,
    target_panel::TargetPanel,
    viewer::{CameraState, SkyViewer, ViewerSlot},
};

/// Canned catalogue: the first route whose needle appears in the ADQL answers the query.
#[derive(Default)]
pub struct ScriptedTransport {
    routes: Mutex<Vec<(String, Duration, Result<String, String>)>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(self, needle: &str, delay: Duration, body: impl Into<String>) -> Self {
        self.routes
            .lock()
            .push((needle.to_string(), delay, Ok(body.into())));
        self
    }

    /// A route that fails like a timed-out request.
    pub fn failing_route(self, needle: &str, delay: Duration, message: &str) -> Self {
        self.routes
            .lock()
            .push((needle.to_string(), delay, Err(message.to_string())));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl CatalogueTransport for ScriptedTransport {
    async fn fetch(&self, adql: &str) -> Result<String, TargetError> {
        self.calls.lock().push(adql.to_string());
        let route = self
            .routes
            .lock()
            .iter()
            .find(|(needle, _, _)| adql.contains(needle.as_str()))
            .cloned();
        let Some((_, delay, reply)) = route else {
            return Err(TargetError::Service(format!("no scripted route for {adql}")));
        };
        tokio::time::sleep(delay).await;
        reply.map_err(TargetError::Service)
    }
}

/// Viewer whose camera stays observable after being moved into a [`ViewerSlot`].
#[derive(Clone, Default)]
pub struct SharedCamera(pub Arc<Mutex<CameraState>>);

impl SharedCamera {
    pub fn state(&self) -> CameraState {
        self.0.lock().clone()
    }
}

impl SkyViewer for SharedCamera {
    fn goto_ra_dec(&mut self, ra: f64, dec: f64) {
        self.0.lock().goto_ra_dec(ra, dec);
    }

    fn get_ra_dec(&self) -> (f64, f64) {
        self.0.lock().get_ra_dec()
    }
}

pub fn tap_rows(rows: serde_json::Value) -> String {
    serde_json::json!({ "metadata": [], "data": rows }).to_string()
}

pub fn new_form(policy: InvalidCoordinatePolicy, camera: &SharedCamera) -> TargetForm {
    TargetForm::new(
        ["M31", "Vega"].into_iter().collect::<SiblingNames>(),
        TargetNamer::seeded(2024),
        ViewerSlot::with_viewer(camera.clone()),
        policy,
    )
}

pub struct PanelFixture {
    pub panel: TargetPanel,
    pub transport: Arc<ScriptedTransport>,
    pub notifications: NotificationLog,
    pub camera: SharedCamera,
}

pub fn panel_with(transport: ScriptedTransport) -> PanelFixture {
    let config = LookupConfig::default();
    let transport = Arc::new(transport);
    let client = Arc::new(SimbadClient::new(
        transport.clone(),
        config.row_limit,
        config.timeout(),
    ));
    let camera = SharedCamera::default();
    let notifications = NotificationLog::new();
    let form = new_form(config.invalid_coordinate_policy, &camera);
    let panel = TargetPanel::with_parts(&config, client, form, Arc::new(notifications.clone()));
    PanelFixture {
        panel,
        transport,
        notifications,
        camera,
    }
}

pub fn assert_camera_at(camera: &SharedCamera, ra: f64, dec: f64, epsilon: f64) {
    let state = camera.state();
    assert_abs_diff_eq!(state.ra, ra, epsilon = epsilon);
    assert_abs_diff_eq!(state.dec, dec, epsilon = epsilon);
}
