/// State management module
///
/// This module handles all application state, including:
/// - The submission form and its validation rules (form.rs)
/// - The submit/response lifecycle state machine (flow.rs)
pub mod flow;
pub mod form;
