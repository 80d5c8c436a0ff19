//! Stateful coordinator between the builder, the raw-text field, validation
//! and the debounced preview.

use super::debounce::Debouncer;
use crate::error::EditorError;
use crate::preferences::PreferenceStore;
use crate::schedule::{
    DEFAULT_PREVIEW_COUNT, ScheduleBuilder, ScheduleConfig, ScheduleExample, SchedulePreview,
    ValidationErrors, ValidationResult, is_complex, preview, validate_config,
};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tokio::time::Instant;

pub const MODE_PREFERENCE_KEY: &str = "schedule_editor_mode";

pub const COMPLEXITY_WARNING: &str =
    "This schedule is too complex for the visual builder, so it is shown in advanced mode.";
pub const CONFIGURE_MESSAGE: &str = "Configure a cron expression and timezone to see a preview";
pub const FIX_ERRORS_MESSAGE: &str = "Fix validation errors to see a preview";
pub const PREVIEW_UNAVAILABLE_MESSAGE: &str = "Unable to generate a preview right now";

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EditorMode {
    /// Structured field-by-field editing
    #[default]
    Builder,
    /// Free-text cron entry
    Advanced,
}

impl EditorMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Builder => "builder",
            Self::Advanced => "advanced",
        }
    }
}

impl fmt::Display for EditorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EditorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "builder" => Ok(Self::Builder),
            "advanced" => Ok(Self::Advanced),
            other => Err(format!("Unknown editor mode '{}'", other)),
        }
    }
}

/// Output port. Every method defaults to doing nothing.
pub trait EditorEvents {
    /// A change made through the editor was committed.
    fn on_config_change(&mut self, _config: &ScheduleConfig) {}
    fn on_validation_change(&mut self, _result: &ValidationResult) {}
    fn on_preview_change(&mut self, _preview: Option<&SchedulePreview>) {}
}

impl EditorEvents for () {}

#[derive(Debug, Clone, Copy)]
pub struct EditorOptions {
    pub debounce: Duration,
    pub preview_count: usize,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            preview_count: DEFAULT_PREVIEW_COUNT,
        }
    }
}

/// Which representation accepts input. Only advanced mode owns a text
/// buffer; in builder mode the canonical cron is the single source.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Surface {
    Builder,
    Advanced { buffer: String },
}

pub struct ScheduleEditor<P: PreferenceStore, E: EditorEvents> {
    config: ScheduleConfig,
    surface: Surface,
    complexity_warning: Option<String>,
    external_errors: ValidationErrors,
    validation: ValidationResult,
    preview: Option<SchedulePreview>,
    preview_message: Option<&'static str>,
    preview_count: usize,
    debouncer: Debouncer,
    preferences: P,
    events: E,
    closed: bool,
}

impl<P: PreferenceStore, E: EditorEvents> ScheduleEditor<P, E> {
    pub fn new(initial: ScheduleConfig, preferences: P, events: E) -> Self {
        Self::with_options(initial, preferences, events, EditorOptions::default())
    }

    pub fn with_options(
        initial: ScheduleConfig,
        preferences: P,
        events: E,
        options: EditorOptions,
    ) -> Self {
        let (surface, complexity_warning) = if is_complex(&initial.cron) {
            (
                Surface::Advanced {
                    buffer: initial.cron.clone(),
                },
                Some(COMPLEXITY_WARNING.to_string()),
            )
        } else {
            let remembered = preferences
                .get(MODE_PREFERENCE_KEY)
                .and_then(|value| value.parse::<EditorMode>().ok())
                .unwrap_or_default();
            let surface = match remembered {
                EditorMode::Builder => Surface::Builder,
                EditorMode::Advanced => Surface::Advanced {
                    buffer: initial.cron.clone(),
                },
            };
            (surface, None)
        };

        let mut editor = Self {
            config: initial,
            surface,
            complexity_warning,
            external_errors: ValidationErrors::new(),
            validation: ValidationResult::valid(),
            preview: None,
            preview_message: None,
            preview_count: options.preview_count,
            debouncer: Debouncer::new(options.debounce),
            preferences,
            events,
            closed: false,
        };
        tracing::debug!(mode = %editor.mode(), cron = %editor.config.cron, "schedule editor opened");
        editor.refresh();
        editor
    }

    // ------------------------------------------------------------------
    // State
    // ------------------------------------------------------------------

    pub fn mode(&self) -> EditorMode {
        match self.surface {
            Surface::Builder => EditorMode::Builder,
            Surface::Advanced { .. } => EditorMode::Advanced,
        }
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Text shown in the raw field: the uncommitted buffer in advanced mode,
    /// otherwise the canonical cron.
    pub fn raw_buffer(&self) -> &str {
        match &self.surface {
            Surface::Builder => &self.config.cron,
            Surface::Advanced { buffer } => buffer,
        }
    }

    pub fn complexity_warning(&self) -> Option<&str> {
        self.complexity_warning.as_deref()
    }

    /// Structured view of the canonical cron, when the builder can show it.
    pub fn builder_value(&self) -> Option<ScheduleBuilder> {
        ScheduleBuilder::from_cron(&self.config.cron)
    }

    pub fn validation(&self) -> &ValidationResult {
        &self.validation
    }

    pub fn preview(&self) -> Option<&SchedulePreview> {
        self.preview.as_ref()
    }

    /// Why there is no preview, if there is none.
    pub fn preview_message(&self) -> Option<&'static str> {
        self.preview_message
    }

    pub fn is_preview_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn preview_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn preferences(&self) -> &P {
        &self.preferences
    }

    pub fn events(&self) -> &E {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut E {
        &mut self.events
    }

    // ------------------------------------------------------------------
    // Inputs
    // ------------------------------------------------------------------

    /// The host changed the value. The raw buffer follows it; the mode only
    /// changes through auto-escalation.
    pub fn sync_external(&mut self, config: ScheduleConfig) -> Result<(), EditorError> {
        self.ensure_open()?;
        if config == self.config {
            return Ok(());
        }

        let cron_changed = config.cron != self.config.cron;
        self.config = config;
        if cron_changed {
            self.resync_buffer();
            self.after_cron_change();
        }
        self.refresh();
        Ok(())
    }

    /// Apply a canned shortcut as if the host had set it, and report it as a
    /// committed change.
    pub fn apply_example(&mut self, example: ScheduleExample) -> Result<(), EditorError> {
        let next = ScheduleConfig {
            cron: example.cron().to_string(),
            ..self.config.clone()
        };
        let changed = next != self.config;
        self.sync_external(next)?;
        if changed {
            self.events.on_config_change(&self.config);
        }
        Ok(())
    }

    pub fn set_timezone(&mut self, timezone: &str) -> Result<(), EditorError> {
        self.ensure_open()?;
        if timezone == self.config.timezone {
            return Ok(());
        }
        self.config.timezone = timezone.to_string();
        self.events.on_config_change(&self.config);
        self.refresh();
        Ok(())
    }

    /// Replace the errors supplied by the host (e.g. server-side rejections).
    /// They override locally computed errors for the same field.
    pub fn set_external_errors(&mut self, errors: ValidationErrors) -> Result<(), EditorError> {
        self.ensure_open()?;
        if errors == self.external_errors {
            return Ok(());
        }
        self.external_errors = errors;
        self.refresh();
        Ok(())
    }

    /// Keystroke in the raw field. Nothing propagates until [`commit_raw`].
    ///
    /// [`commit_raw`]: Self::commit_raw
    pub fn edit_raw(&mut self, text: &str) -> Result<(), EditorError> {
        self.ensure_open()?;
        match &mut self.surface {
            Surface::Advanced { buffer } => {
                text.clone_into(buffer);
                Ok(())
            }
            Surface::Builder => Err(EditorError::NotInAdvancedMode),
        }
    }

    /// Push the raw buffer into the canonical value (focus loss). Returns
    /// whether anything changed.
    pub fn commit_raw(&mut self) -> Result<bool, EditorError> {
        self.ensure_open()?;
        let Surface::Advanced { buffer } = &self.surface else {
            return Err(EditorError::NotInAdvancedMode);
        };
        if *buffer == self.config.cron {
            return Ok(false);
        }

        self.config.cron = buffer.clone();
        self.after_cron_change();
        self.events.on_config_change(&self.config);
        self.refresh();
        Ok(true)
    }

    /// Structured change from the builder; always propagates immediately.
    pub fn edit_builder(&mut self, builder: &ScheduleBuilder) -> Result<(), EditorError> {
        self.ensure_open()?;
        if self.surface != Surface::Builder {
            return Err(EditorError::NotInBuilderMode);
        }
        let cron = builder.to_cron();
        if cron == self.config.cron {
            return Ok(());
        }

        self.config.cron = cron;
        self.after_cron_change();
        self.events.on_config_change(&self.config);
        self.refresh();
        Ok(())
    }

    /// User-initiated switch. Leaving advanced mode commits the buffer
    /// first; the switch is refused while the expression is complex.
    pub fn toggle_mode(&mut self) -> Result<EditorMode, EditorError> {
        self.ensure_open()?;
        if matches!(self.surface, Surface::Advanced { .. }) {
            self.commit_raw()?;
        }
        if is_complex(&self.config.cron) {
            return Err(EditorError::ComplexExpression);
        }

        self.surface = match self.surface {
            Surface::Builder => Surface::Advanced {
                buffer: self.config.cron.clone(),
            },
            Surface::Advanced { .. } => Surface::Builder,
        };
        self.complexity_warning = None;

        let mode = self.mode();
        if let Err(e) = self.preferences.set(MODE_PREFERENCE_KEY, mode.as_str()) {
            tracing::warn!(error = %e, "failed to remember editor mode");
        }
        tracing::debug!(%mode, "editor mode toggled");
        Ok(mode)
    }

    /// Toggle only if `mode` differs from the current one.
    pub fn set_mode(&mut self, mode: EditorMode) -> Result<EditorMode, EditorError> {
        if mode == self.mode() {
            return Ok(mode);
        }
        self.toggle_mode()
    }

    // ------------------------------------------------------------------
    // Preview scheduling
    // ------------------------------------------------------------------

    /// Run the pending preview if its debounce has elapsed by `now`.
    /// Returns whether a preview computation ran.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.closed {
            return false;
        }
        let Some(ticket) = self.debouncer.take_due(now) else {
            return false;
        };

        let result = preview(&self.config.cron, &self.config.timezone, self.preview_count);
        if !self.debouncer.is_current(&ticket) {
            tracing::debug!(generation = ticket.generation(), "discarding superseded preview");
            return false;
        }

        match result {
            Ok(preview) => {
                self.preview = Some(preview);
                self.preview_message = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "schedule preview failed");
                self.preview = None;
                self.preview_message = Some(PREVIEW_UNAVAILABLE_MESSAGE);
            }
        }
        self.events.on_preview_change(self.preview.as_ref());
        true
    }

    /// Wait out the debounce and apply the preview, if one is pending.
    pub async fn settle(&mut self) {
        while let Some(deadline) = self.debouncer.deadline() {
            if self.closed {
                break;
            }
            tokio::time::sleep_until(deadline).await;
            self.poll(Instant::now());
        }
    }

    /// Tear down: cancel any pending preview and refuse further input.
    pub fn close(&mut self) {
        self.debouncer.cancel();
        self.closed = true;
        tracing::debug!("schedule editor closed");
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn ensure_open(&self) -> Result<(), EditorError> {
        if self.closed {
            Err(EditorError::Closed)
        } else {
            Ok(())
        }
    }

    fn resync_buffer(&mut self) {
        if let Surface::Advanced { buffer } = &mut self.surface {
            self.config.cron.clone_into(buffer);
        }
    }

    /// Escalate on complex input; clear the warning once it is simple again.
    /// Advanced mode is never reverted automatically.
    fn after_cron_change(&mut self) {
        if !is_complex(&self.config.cron) {
            self.complexity_warning = None;
            return;
        }
        if self.surface == Surface::Builder {
            self.surface = Surface::Advanced {
                buffer: self.config.cron.clone(),
            };
            self.complexity_warning = Some(COMPLEXITY_WARNING.to_string());
            tracing::debug!(cron = %self.config.cron, "escalated to advanced mode");
        }
    }

    fn refresh(&mut self) {
        self.validation = validate_config(&self.config).merged_with(&self.external_errors);
        self.events.on_validation_change(&self.validation);

        if !self.config.is_complete() {
            self.clear_preview(CONFIGURE_MESSAGE);
        } else if !self.validation.is_valid {
            self.clear_preview(FIX_ERRORS_MESSAGE);
        } else {
            let ticket = self.debouncer.schedule(Instant::now());
            tracing::debug!(generation = ticket.generation(), "preview scheduled");
        }
    }

    fn clear_preview(&mut self, message: &'static str) {
        self.debouncer.cancel();
        self.preview = None;
        self.preview_message = Some(message);
        self.events.on_preview_change(None);
    }
}
