//! Shared test utilities for cronplan-cli integration tests

#![allow(dead_code)]

use cronplan_cli::editor::{EditorEvents, ScheduleEditor};
use cronplan_cli::preferences::MemoryPreferences;
use cronplan_cli::schedule::{ScheduleConfig, SchedulePreview, ValidationResult};

/// Collects every editor notification in arrival order.
#[derive(Debug, Default)]
pub struct RecordingEvents {
    pub configs: Vec<ScheduleConfig>,
    pub validations: Vec<ValidationResult>,
    pub previews: Vec<Option<SchedulePreview>>,
}

impl RecordingEvents {
    pub fn last_preview(&self) -> Option<&SchedulePreview> {
        self.previews.last().and_then(Option::as_ref)
    }

    pub fn computed_previews(&self) -> usize {
        self.previews.iter().filter(|p| p.is_some()).count()
    }
}

impl EditorEvents for RecordingEvents {
    fn on_config_change(&mut self, config: &ScheduleConfig) {
        self.configs.push(config.clone());
    }

    fn on_validation_change(&mut self, result: &ValidationResult) {
        self.validations.push(result.clone());
    }

    fn on_preview_change(&mut self, preview: Option<&SchedulePreview>) {
        self.previews.push(preview.cloned());
    }
}

pub type TestEditor = ScheduleEditor<MemoryPreferences, RecordingEvents>;

/// Editor over in-memory preferences seeded with `prefs`.
pub fn editor_with(cron: &str, timezone: &str, prefs: &[(&str, &str)]) -> TestEditor {
    let store = prefs
        .iter()
        .fold(MemoryPreferences::new(), |store, (k, v)| store.with(k, v));
    ScheduleEditor::new(
        ScheduleConfig::new(cron, timezone),
        store,
        RecordingEvents::default(),
    )
}

pub fn editor(cron: &str, timezone: &str) -> TestEditor {
    editor_with(cron, timezone, &[])
}
