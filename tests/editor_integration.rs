//! End-to-end behaviour of the schedule editor against in-memory
//! preferences and a recording event sink.

mod common;

use common::{editor, editor_with};
use cronplan_cli::editor::{
    COMPLEXITY_WARNING, CONFIGURE_MESSAGE, DEFAULT_DEBOUNCE, EditorMode, FIX_ERRORS_MESSAGE,
    MODE_PREFERENCE_KEY,
};
use cronplan_cli::preferences::PreferenceStore;
use cronplan_cli::schedule::{ScheduleConfig, ScheduleExample, ValidationField};
use pretty_assertions::assert_eq;
use std::time::Duration;
use tokio::time::Instant;

#[tokio::test(start_paused = true)]
async fn test_valid_config_previews_five_morning_runs() {
    let mut editor = editor("0 9 * * *", "America/New_York");
    assert!(editor.validation().is_valid);
    assert!(editor.preview().is_none());

    editor.settle().await;

    let preview = editor.preview().unwrap();
    assert_eq!(preview.next_executions.len(), 5);
    for execution in &preview.next_executions {
        assert!(execution.contains("9:00 AM"), "{}", execution);
        assert!(
            execution.ends_with("EST") || execution.ends_with("EDT"),
            "{}",
            execution
        );
    }
    assert!(preview.description.starts_with("At 09:00 AM ("));
    assert_eq!(editor.events().computed_previews(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_invalid_cron_has_no_preview() {
    let mut editor = editor("invalid", "UTC");

    let validation = editor.validation();
    assert!(!validation.is_valid);
    assert!(validation.error(ValidationField::Cron).is_some());
    assert_eq!(editor.preview_message(), Some(FIX_ERRORS_MESSAGE));

    editor.settle().await;
    assert!(editor.preview().is_none());
    assert_eq!(editor.events().previews, vec![None]);
}

#[tokio::test]
async fn test_complex_cron_overrides_builder_preference() {
    let editor = editor_with("*/5 * * * *", "UTC", &[(MODE_PREFERENCE_KEY, "builder")]);

    assert_eq!(editor.mode(), EditorMode::Advanced);
    assert_eq!(editor.complexity_warning(), Some(COMPLEXITY_WARNING));
    // Escalation is not a user choice and is not remembered.
    assert_eq!(
        editor.preferences().get(MODE_PREFERENCE_KEY),
        Some("builder".to_string())
    );
}

#[tokio::test(start_paused = true)]
async fn test_rapid_changes_compute_one_preview_for_the_latest_config() {
    let mut editor = editor("0 9 * * *", "UTC");

    tokio::time::advance(Duration::from_millis(100)).await;
    editor.set_timezone("Europe/London").unwrap();
    tokio::time::advance(Duration::from_millis(100)).await;
    editor.set_timezone("Asia/Tokyo").unwrap();

    // The first deadline has passed but was superseded.
    tokio::time::advance(Duration::from_millis(150)).await;
    assert!(!editor.poll(Instant::now()));
    assert!(editor.is_preview_pending());

    editor.settle().await;

    assert_eq!(editor.events().computed_previews(), 1);
    let preview = editor.events().last_preview().unwrap();
    assert!(preview.description.ends_with("(JST)"), "{}", preview.description);
}

#[tokio::test(start_paused = true)]
async fn test_invalid_edit_during_debounce_discards_pending_preview() {
    let mut editor = editor("0 9 * * *", "UTC");
    editor.set_timezone("Not/AZone").unwrap();

    tokio::time::advance(DEFAULT_DEBOUNCE * 2).await;
    assert!(!editor.poll(Instant::now()));
    editor.settle().await;

    assert!(editor.preview().is_none());
    assert_eq!(editor.events().computed_previews(), 0);
    assert!(editor.validation().error(ValidationField::Timezone).is_some());
}

#[tokio::test(start_paused = true)]
async fn test_clearing_a_field_asks_for_configuration() {
    let mut editor = editor("0 9 * * *", "UTC");
    editor.settle().await;
    assert!(editor.preview().is_some());

    editor.set_timezone("").unwrap();

    assert!(editor.preview().is_none());
    assert_eq!(editor.preview_message(), Some(CONFIGURE_MESSAGE));
    assert_eq!(editor.events().previews.last(), Some(&None));
}

#[tokio::test]
async fn test_external_sync_is_not_reported_back() {
    let mut editor = editor("0 9 * * *", "UTC");

    editor
        .sync_external(ScheduleConfig::new("0 10 * * *", "UTC"))
        .unwrap();

    assert_eq!(editor.config().cron, "0 10 * * *");
    assert!(editor.events().configs.is_empty());
}

#[tokio::test]
async fn test_example_is_reported_as_change() {
    let mut editor = editor("0 9 * * *", "UTC");

    editor.apply_example(ScheduleExample::MonthlyFirstNineAm).unwrap();

    assert_eq!(
        editor.events().configs,
        vec![ScheduleConfig::new("0 9 1 * *", "UTC")]
    );
    assert_eq!(editor.mode(), EditorMode::Builder);
}

#[tokio::test]
async fn test_manual_toggle_is_remembered() {
    let mut editor = editor("0 9 * * *", "UTC");

    editor.set_mode(EditorMode::Advanced).unwrap();

    assert_eq!(
        editor.preferences().get(MODE_PREFERENCE_KEY),
        Some("advanced".to_string())
    );
}

#[tokio::test(start_paused = true)]
async fn test_calendar_warning_reaches_validation_listeners() {
    let mut editor = editor("0 9 31 * *", "UTC");
    editor.settle().await;

    let validation = editor.events().validations.last().unwrap();
    assert!(validation.is_valid);
    assert!(validation.warnings.iter().any(|w| w.contains("Day 31")));
    assert!(editor.preview().is_some());
}

#[tokio::test(start_paused = true)]
async fn test_close_stops_pending_work() {
    let mut editor = editor("0 9 * * *", "UTC");
    editor.close();

    editor.settle().await;

    assert_eq!(editor.events().computed_previews(), 0);
    assert!(editor.edit_builder(&Default::default()).is_err());
}
