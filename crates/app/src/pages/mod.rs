//! Page controllers.
//!
//! Each page owns its view state and talks to the persistence and
//! notification collaborators it was built with. Rendering is left to the
//! caller.

pub mod chat;
pub mod details;
pub mod form;
pub mod list;

pub use chat::ChatPanel;
pub use details::DetailsPage;
pub use form::FormPage;
pub use list::{Confirm, ListPage};

// ---------------------------------------------------------------------------
// User-facing messages
// ---------------------------------------------------------------------------

pub const MSG_DELETED: &str = "Student deleted successfully";
pub const MSG_CREATED: &str = "New student added successfully";
pub const MSG_UPDATED: &str = "Student updated successfully";
pub const MSG_OPERATION_FAILED: &str = "Failed to perform the operation";
pub const MSG_LOAD_FAILED: &str = "Failed to load students. Please try again later.";
pub const MSG_DETAILS_FAILED: &str =
    "Student not found or an error occurred while loading the details.";
pub const MSG_CHAT_FAILED: &str = "Sorry, there was an error processing your message.";
pub const MSG_CONFIRM_DELETE: &str = "Are you sure you want to delete this student?";
