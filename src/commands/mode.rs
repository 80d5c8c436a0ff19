//! `cronplan mode`: inspect or pre-set the editor's remembered mode.

use crate::config::Context;
use crate::editor::{EditorMode, MODE_PREFERENCE_KEY};
use crate::exit_codes;
use crate::output::{OutputConfig, print_info_cfg, print_single, print_success_cfg};
use crate::preferences::{FilePreferences, PreferenceStore};
use anyhow::Result;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ModeStatus {
    mode: EditorMode,
    remembered: bool,
}

/// The stored mode, if any unexpired value parses.
pub fn remembered_mode<P: PreferenceStore>(prefs: &P) -> Option<EditorMode> {
    prefs
        .get(MODE_PREFERENCE_KEY)
        .and_then(|value| value.parse().ok())
}

pub fn execute(ctx: &Context, mode: Option<EditorMode>) -> Result<i32> {
    let mut prefs = FilePreferences::load()?;
    let out = OutputConfig::from_context(ctx);

    if let Some(mode) = mode {
        prefs.set(MODE_PREFERENCE_KEY, mode.as_str())?;
        tracing::debug!(path = %prefs.path().display(), %mode, "editor mode saved");
        if out.is_structured() {
            print_single(&out, &ModeStatus { mode, remembered: true })?;
        } else {
            print_success_cfg(&format!("Editor will open in {} mode", mode), &out);
        }
        return Ok(exit_codes::SUCCESS);
    }

    let remembered = remembered_mode(&prefs);
    let status = ModeStatus {
        mode: remembered.unwrap_or_default(),
        remembered: remembered.is_some(),
    };
    if out.is_structured() {
        print_single(&out, &status)?;
    } else if status.remembered {
        print_info_cfg(&format!("Editor mode: {}", status.mode), &out);
    } else {
        print_info_cfg(&format!("Editor mode: {} (default)", status.mode), &out);
    }
    Ok(exit_codes::SUCCESS)
}
