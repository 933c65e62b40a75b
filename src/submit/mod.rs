//! Submission handlers
//!
//! The form forwards its values as-is to whichever handler the embedding
//! application configured.

mod handlers;
mod traits;

pub use handlers::handler_for;
pub use traits::SubmitHandler;

#[cfg(test)]
pub use traits::MockSubmitHandler;
