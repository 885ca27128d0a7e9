pub mod action;

// Re-export handler functions for use in routing
pub use action::action as document_action;
