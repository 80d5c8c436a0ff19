pub mod classify;
pub mod completion;
pub mod edit;
pub mod examples;
pub mod helpers;
pub mod mode;
pub mod preview;
pub mod validate;
