//! `cronplan edit`: terminal front-end for [`ScheduleEditor`].

use crate::cli::EditArgs;
use crate::config::Context;
use crate::editor::{EditorEvents, EditorMode, EditorOptions, ScheduleEditor};
use crate::error::EditorError;
use crate::exit_codes;
use crate::output::{
    OutputConfig, dim, print_error_cfg, print_heading, print_info_cfg, print_single,
    print_success_cfg, print_warning_cfg,
};
use crate::preferences::{FilePreferences, PreferenceStore};
use crate::schedule::field::fields_for;
use crate::schedule::{ScheduleBuilder, ScheduleConfig, ScheduleExample, SchedulePreview};
use anyhow::Result;
use dialoguer::{Input, Select};

use super::helpers::{print_preview, print_preview_message, print_validation};

/// Records what the editor reported so the session summary can say whether
/// anything was committed.
#[derive(Debug, Default)]
pub struct SessionEvents {
    pub committed: Option<ScheduleConfig>,
    pub previews: usize,
}

impl EditorEvents for SessionEvents {
    fn on_config_change(&mut self, config: &ScheduleConfig) {
        tracing::debug!(cron = %config.cron, timezone = %config.timezone, "schedule committed");
        self.committed = Some(config.clone());
    }

    fn on_preview_change(&mut self, preview: Option<&SchedulePreview>) {
        if preview.is_some() {
            self.previews += 1;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    EditField,
    EditText,
    ToggleMode,
    UseExample,
    ChangeTimezone,
    Done,
}

impl Action {
    fn menu(mode: EditorMode) -> [Action; 5] {
        match mode {
            EditorMode::Builder => [
                Self::EditField,
                Self::ToggleMode,
                Self::UseExample,
                Self::ChangeTimezone,
                Self::Done,
            ],
            EditorMode::Advanced => [
                Self::EditText,
                Self::ToggleMode,
                Self::UseExample,
                Self::ChangeTimezone,
                Self::Done,
            ],
        }
    }

    fn label(self, mode: EditorMode) -> &'static str {
        match (self, mode) {
            (Self::EditField, _) => "Edit a field",
            (Self::EditText, _) => "Edit the cron expression",
            (Self::ToggleMode, EditorMode::Builder) => "Switch to advanced mode",
            (Self::ToggleMode, EditorMode::Advanced) => "Switch to builder mode",
            (Self::UseExample, _) => "Use an example",
            (Self::ChangeTimezone, _) => "Change timezone",
            (Self::Done, _) => "Done",
        }
    }
}

pub async fn execute(ctx: &Context, args: EditArgs) -> Result<i32> {
    let out = OutputConfig::from_context(ctx);
    if !atty::is(atty::Stream::Stdin) || !atty::is(atty::Stream::Stdout) {
        print_error_cfg(
            "cronplan edit needs an interactive terminal; use `cronplan preview` in scripts",
            &out,
        );
        return Ok(exit_codes::USAGE);
    }

    let initial = ScheduleConfig::new(
        args.cron.unwrap_or_default(),
        ctx.timezone(args.tz.as_deref()),
    );
    let options = EditorOptions {
        debounce: ctx.debounce(),
        preview_count: ctx.preview_count(None),
    };
    let prefs = FilePreferences::load()?;
    let mut editor =
        ScheduleEditor::with_options(initial, prefs, SessionEvents::default(), options);

    loop {
        editor.settle().await;
        render(&editor, &out);

        let mode = editor.mode();
        let menu = Action::menu(mode);
        let labels: Vec<&str> = menu.iter().map(|a| a.label(mode)).collect();
        let choice = Select::new()
            .with_prompt("What next?")
            .items(&labels)
            .default(0)
            .interact()?;

        match menu[choice] {
            Action::EditField => edit_field(&mut editor, &out)?,
            Action::EditText => {
                let text: String = Input::new()
                    .with_prompt("Cron expression")
                    .with_initial_text(editor.raw_buffer())
                    .allow_empty(true)
                    .interact_text()?;
                editor.edit_raw(&text)?;
                // Leaving the prompt is the blur.
                editor.commit_raw()?;
            }
            Action::ToggleMode => match editor.toggle_mode() {
                Ok(mode) => print_success_cfg(&format!("Switched to {} mode", mode), &out),
                Err(EditorError::ComplexExpression) => {
                    print_warning_cfg(&EditorError::ComplexExpression.to_string(), &out)
                }
                Err(e) => return Err(e.into()),
            },
            Action::UseExample => {
                let labels: Vec<String> = ScheduleExample::ALL
                    .iter()
                    .map(|e| format!("{}  {}", e.label(), dim(e.cron(), &out)))
                    .collect();
                let picked = Select::new()
                    .with_prompt("Example")
                    .items(&labels)
                    .default(0)
                    .interact()?;
                editor.apply_example(ScheduleExample::ALL[picked])?;
            }
            Action::ChangeTimezone => {
                let tz: String = Input::new()
                    .with_prompt("Timezone (IANA format)")
                    .with_initial_text(editor.config().timezone.clone())
                    .allow_empty(true)
                    .interact_text()?;
                editor.set_timezone(tz.trim())?;
            }
            Action::Done => break,
        }
    }

    editor.close();
    finish(&editor, &out)
}

/// Prompt for one builder field and apply it if the builder can hold it.
fn edit_field<P: PreferenceStore>(
    editor: &mut ScheduleEditor<P, SessionEvents>,
    out: &OutputConfig,
) -> Result<()> {
    let builder = editor.builder_value().unwrap_or_default();
    let fields = fields_for(5);
    let names: Vec<&str> = fields.iter().map(|f| f.name()).collect();
    let index = Select::new()
        .with_prompt("Field")
        .items(&names)
        .default(0)
        .interact()?;

    let mut tokens: Vec<String> = builder
        .to_cron()
        .split_whitespace()
        .map(str::to_string)
        .collect();
    let (min, max) = fields[index].range();
    let value: String = Input::new()
        .with_prompt(format!("{} (*, N, N-M or N,M,...; {}-{})", names[index], min, max))
        .with_initial_text(tokens[index].clone())
        .interact_text()?;
    tokens[index] = value.trim().to_string();

    match ScheduleBuilder::from_cron(&tokens.join(" ")) {
        Some(next) => editor.edit_builder(&next)?,
        None => print_warning_cfg(
            "The builder cannot hold that value; switch to advanced mode to enter it",
            out,
        ),
    }
    Ok(())
}

fn render<P: PreferenceStore>(editor: &ScheduleEditor<P, SessionEvents>, out: &OutputConfig) {
    println!();
    print_heading(&format!("Schedule ({} mode)", editor.mode()), out);
    if let Some(warning) = editor.complexity_warning() {
        print_warning_cfg(warning, out);
    }
    println!("  cron:     {}", editor.raw_buffer());
    println!("  timezone: {}", editor.config().timezone);
    println!();

    print_validation(editor.validation(), out);
    match (editor.preview(), editor.preview_message()) {
        (Some(preview), _) => print_preview(preview, out),
        (None, Some(message)) => print_preview_message(message, out),
        (None, None) => {}
    }
}

fn finish<P: PreferenceStore>(
    editor: &ScheduleEditor<P, SessionEvents>,
    out: &OutputConfig,
) -> Result<i32> {
    let config = editor.config();
    if out.is_structured() {
        print_single(out, config)?;
    } else if editor.events().committed.is_some() {
        print_success_cfg(
            &format!("Schedule: \"{}\" in {}", config.cron, config.timezone),
            out,
        );
    } else {
        print_info_cfg("No changes", out);
    }

    Ok(if editor.validation().is_valid {
        exit_codes::SUCCESS
    } else {
        exit_codes::ISSUES
    })
}
