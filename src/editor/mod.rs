//! Interactive schedule editor: mode handling between the builder and raw
//! text, validation fan-out and a debounced preview.

pub mod controller;
pub mod debounce;

pub use controller::{
    COMPLEXITY_WARNING, CONFIGURE_MESSAGE, DEFAULT_DEBOUNCE, EditorEvents, EditorMode,
    EditorOptions, FIX_ERRORS_MESSAGE, MODE_PREFERENCE_KEY, PREVIEW_UNAVAILABLE_MESSAGE,
    ScheduleEditor,
};
pub use debounce::{Debouncer, Ticket};
