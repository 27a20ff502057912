//! Interactive crop session.
//!
//! A [`CropSession`] backs one crop dialog: it tracks the live rotation and
//! zoom controls, stores the crop rectangle reported by the pan/zoom surface,
//! and runs the transform engine once when the user confirms.
//!
//! # States
//!
//! ```text
//! Closed --open--> Open --confirm ok--> Confirmed
//!                   |  \--cancel-----> Cancelled
//!                   \-- confirm failed: stays Open
//! ```
//!
//! Opening always starts from default parameters; nothing carries over from a
//! previous session.
//!
//! # Rendering off-thread
//!
//! [`CropSession::confirm`] renders inline. Hosts that render on a worker use
//! [`CropSession::begin_confirm`] to snapshot a [`RenderJob`], run it
//! elsewhere, and hand the result back through [`CropSession::finish_confirm`].
//! Only one job may be outstanding per session. Every job carries an epoch;
//! results from a job the session no longer waits for are rejected.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::SourceImage;
use crate::encode::OutputRaster;
use crate::transform::{
    normalize_degrees, render_with_filter, CropRectangle, InterpolationFilter, TransformError,
    TransformResult,
};

/// Tunables for a crop session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Smallest zoom factor the controls may reach.
    pub min_zoom: f64,
    /// Largest zoom factor the controls may reach.
    pub max_zoom: f64,
    /// Increment used by the zoom in/out buttons.
    pub zoom_step: f64,
    /// Sampling used when rendering rotated output.
    pub filter: InterpolationFilter,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            min_zoom: 1.0,
            max_zoom: 3.0,
            zoom_step: 0.1,
            filter: InterpolationFilter::Bilinear,
        }
    }
}

impl SessionConfig {
    /// Replace unusable zoom settings with the defaults.
    fn sanitized(self) -> Self {
        let defaults = Self::default();
        let mut config = self;

        let bounds_ok = config.min_zoom.is_finite()
            && config.max_zoom.is_finite()
            && config.min_zoom > 0.0
            && config.min_zoom <= config.max_zoom;
        if !bounds_ok {
            tracing::warn!(
                min_zoom = config.min_zoom,
                max_zoom = config.max_zoom,
                "invalid zoom bounds, using defaults"
            );
            config.min_zoom = defaults.min_zoom;
            config.max_zoom = defaults.max_zoom;
        }
        if !config.zoom_step.is_finite() || config.zoom_step <= 0.0 {
            config.zoom_step = defaults.zoom_step;
        }

        config
    }
}

/// Live parameters of an open session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformParameters {
    /// Clockwise rotation in degrees, `[0, 360]`.
    pub rotation_degrees: f64,
    /// Zoom of the crop surface. Does not affect rendering.
    pub zoom_factor: f64,
    /// Last rectangle reported by the crop surface.
    pub crop: Option<CropRectangle>,
}

impl Default for TransformParameters {
    fn default() -> Self {
        Self {
            rotation_degrees: 0.0,
            zoom_factor: 1.0,
            crop: None,
        }
    }
}

/// Lifecycle state of a [`CropSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    Closed,
    Open,
    Confirmed,
    Cancelled,
}

/// Errors reported by [`CropSession`].
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Crop session is not open")]
    NotOpen,

    /// Confirm was attempted before the crop surface reported a rectangle.
    #[error("No crop rectangle has been reported yet")]
    InvalidCropState,

    #[error("A render is already in progress for this session")]
    RenderInFlight,

    #[error(transparent)]
    Transform(#[from] TransformError),
}

/// Inputs of one render, detached from the session.
#[derive(Debug, Clone)]
pub struct RenderJob {
    pub source: SourceImage,
    pub crop: CropRectangle,
    pub rotation_degrees: f64,
    pub filter: InterpolationFilter,
    epoch: u64,
}

impl RenderJob {
    /// Identifies this job to [`CropSession::finish_confirm`].
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Run the transform engine.
    pub fn run(&self) -> TransformResult<OutputRaster> {
        render_with_filter(&self.source, &self.crop, self.rotation_degrees, self.filter)
    }
}

/// State controller for one crop dialog.
#[derive(Debug, Clone, Default)]
pub struct CropSession {
    config: SessionConfig,
    state: SessionState,
    source: Option<SourceImage>,
    params: TransformParameters,
    rendering: bool,
    epoch: u64,
}

impl CropSession {
    /// Create a closed session with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a closed session with custom configuration.
    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            config: config.sanitized(),
            ..Self::default()
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == SessionState::Open
    }

    /// Whether a job from [`begin_confirm`](Self::begin_confirm) is outstanding.
    pub fn is_rendering(&self) -> bool {
        self.rendering
    }

    pub fn source(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    pub fn params(&self) -> &TransformParameters {
        &self.params
    }

    pub fn rotation_degrees(&self) -> f64 {
        self.params.rotation_degrees
    }

    pub fn zoom_factor(&self) -> f64 {
        self.params.zoom_factor
    }

    pub fn crop_rectangle(&self) -> Option<CropRectangle> {
        self.params.crop
    }

    /// Whether the confirm action should be enabled.
    pub fn can_confirm(&self) -> bool {
        self.is_open() && self.params.crop.is_some() && !self.rendering
    }

    /// Start a fresh session for `source`, resetting every parameter.
    pub fn open(&mut self, source: SourceImage) {
        tracing::debug!(
            width = source.width(),
            height = source.height(),
            "crop session opened"
        );
        self.source = Some(source);
        self.params = TransformParameters::default();
        self.rendering = false;
        self.state = SessionState::Open;
    }

    /// Set the zoom factor, clamped to the configured range. NaN is ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if !self.is_open() || zoom.is_nan() {
            return;
        }
        self.params.zoom_factor = zoom.clamp(self.config.min_zoom, self.config.max_zoom);
    }

    /// Add `delta` to the zoom factor, clamped.
    pub fn adjust_zoom_step(&mut self, delta: f64) {
        self.set_zoom(self.params.zoom_factor + delta);
    }

    /// Zoom in by one configured step.
    pub fn zoom_in(&mut self) {
        self.adjust_zoom_step(self.config.zoom_step);
    }

    /// Zoom out by one configured step.
    pub fn zoom_out(&mut self) {
        self.adjust_zoom_step(-self.config.zoom_step);
    }

    /// Store the rotation slider value, clamped to `[0, 360]`. NaN is ignored.
    pub fn set_rotation(&mut self, degrees: f64) {
        if !self.is_open() || degrees.is_nan() {
            return;
        }
        self.params.rotation_degrees = degrees.clamp(0.0, 360.0);
    }

    /// Rotate a further 90° clockwise, wrapping at 360.
    pub fn rotate_quarter_turn(&mut self) {
        if !self.is_open() {
            return;
        }
        self.params.rotation_degrees = normalize_degrees(self.params.rotation_degrees + 90.0);
    }

    /// Record the crop rectangle the pan/zoom surface currently shows.
    pub fn report_crop_rectangle(&mut self, rect: CropRectangle) {
        if !self.is_open() {
            return;
        }
        self.params.crop = Some(rect);
    }

    /// Render the current parameters and finish the session.
    ///
    /// # Errors
    ///
    /// * `SessionError::InvalidCropState` if no crop was reported; nothing is rendered
    /// * `SessionError::Transform` if rendering failed; the session stays open
    pub fn confirm(&mut self) -> Result<OutputRaster, SessionError> {
        let job = self.begin_confirm()?;
        let result = job.run();
        self.finish_confirm(job.epoch(), result)
    }

    /// Snapshot the inputs for a render and mark the session busy.
    pub fn begin_confirm(&mut self) -> Result<RenderJob, SessionError> {
        if !self.is_open() {
            return Err(SessionError::NotOpen);
        }
        if self.rendering {
            return Err(SessionError::RenderInFlight);
        }
        let (Some(source), Some(crop)) = (self.source.as_ref(), self.params.crop) else {
            tracing::debug!("confirm ignored, no crop rectangle reported");
            return Err(SessionError::InvalidCropState);
        };

        self.epoch = self.epoch.wrapping_add(1);
        let job = RenderJob {
            source: source.clone(),
            crop,
            rotation_degrees: self.params.rotation_degrees,
            filter: self.config.filter,
            epoch: self.epoch,
        };
        self.rendering = true;
        Ok(job)
    }

    /// Join a finished [`RenderJob`] back into the session.
    ///
    /// `epoch` is [`RenderJob::epoch`] of the job that produced `result`.
    /// Results arriving after a cancel, or from a job begun before the current
    /// one, are dropped with `SessionError::NotOpen` and leave the session as is.
    pub fn finish_confirm(
        &mut self,
        epoch: u64,
        result: TransformResult<OutputRaster>,
    ) -> Result<OutputRaster, SessionError> {
        if !self.is_open() || !self.rendering || epoch != self.epoch {
            tracing::debug!(epoch, current = self.epoch, "stale render result dropped");
            return Err(SessionError::NotOpen);
        }
        self.rendering = false;

        match result {
            Ok(output) => {
                tracing::debug!(
                    width = output.width,
                    height = output.height,
                    "crop session confirmed"
                );
                self.state = SessionState::Confirmed;
                self.source = None;
                Ok(output)
            }
            Err(err) => {
                tracing::warn!(error = %err, "crop render failed, session left open");
                Err(err.into())
            }
        }
    }

    /// Abandon the session, discarding every parameter.
    pub fn cancel(&mut self) {
        if !self.is_open() {
            return;
        }
        tracing::debug!("crop session cancelled");
        self.reset(SessionState::Cancelled);
    }

    /// Return to `Closed` from any state.
    pub fn close(&mut self) {
        self.reset(SessionState::Closed);
    }

    fn reset(&mut self, state: SessionState) {
        self.source = None;
        self.params = TransformParameters::default();
        self.rendering = false;
        self.state = state;
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
