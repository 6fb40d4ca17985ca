//! Sticky error state shared by every operation of a single coder.

use crate::Error;
use tracing::{debug, trace};

/// Holds the first error encountered by a coder.
///
/// A `Status` starts clear and becomes faulted at most once. Later faults are dropped
/// so the recorded error always points at the field that broke the pass.
#[derive(Debug, Default)]
pub struct Status {
    error: Option<Error>,
}

impl Status {
    /// Returns true if no fault has been recorded.
    pub fn is_clear(&self) -> bool {
        self.error.is_none()
    }

    /// Returns true if a fault has been recorded.
    pub fn is_faulted(&self) -> bool {
        self.error.is_some()
    }

    /// Returns the recorded fault, if any.
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Records `err` if the cell is still clear.
    pub fn fault(&mut self, err: Error) {
        if let Some(first) = &self.error {
            trace!(?err, ?first, "dropping fault on already faulted coder");
            return;
        }
        debug!(?err, "coder faulted");
        self.error = Some(err);
    }

    /// Converts the cell into the outcome of the pass.
    pub fn into_result(self) -> Result<(), Error> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
