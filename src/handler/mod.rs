//! Request handler module
//!
//! Routes form posts to the rating lookup or the contact mailer.

pub mod dispatch;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
