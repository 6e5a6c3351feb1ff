//! Dispute packages: an uploaded report in, dispute letters mailed out.
//!
//! Each request works in its own temporary directory under
//! `LETTER_OUTPUT_DIR`, which is removed once the mail has been dispatched.

pub mod handlers;
pub mod package;
