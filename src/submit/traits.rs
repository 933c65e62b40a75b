//! Trait abstraction for submit handlers to enable mocking in tests

use crate::state::FormValues;
use anyhow::Result;

/// Receiver of the final form values
#[cfg_attr(test, mockall::automock)]
pub trait SubmitHandler {
    /// Called once per submit with the complete current values
    fn on_submit(&mut self, values: &FormValues) -> Result<()>;

    /// Called after the terminal is restored, before exit
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }

    /// Short description for the status bar
    fn describe(&self) -> String;
}
