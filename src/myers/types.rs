use crate::error::{ConfigurationError, DiffError};
use std::convert::Infallible;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A run of `len` matching elements starting at `old_start` in the original
/// and `new_start` in the revised sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Snake {
    pub old_start: usize,
    pub new_start: usize,
    pub len: usize,
}

/// Bounds for [`super::try_diff_with`].
///
/// `memory_limit` caps the bytes spent on the search frontier history;
/// `interrupt` is polled once per edit step and aborts the diff once set.
#[derive(Debug, Clone, Default)]
pub struct DiffOptions {
    pub memory_limit: Option<usize>,
    pub interrupt: Option<Arc<AtomicBool>>,
}

impl DiffOptions {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        match self.memory_limit {
            Some(0) => Err(ConfigurationError::ZeroMemoryLimit),
            _ => Ok(()),
        }
    }
}

/// Checked by the search before every edit step.
pub(crate) trait Budget {
    type Error;
    /// `cells` is the number of frontier entries retained once this step's
    /// snapshot is stored.
    fn step(&mut self, cells: usize) -> Result<(), Self::Error>;
}

pub(crate) struct Unbounded;

impl Budget for Unbounded {
    type Error = Infallible;

    fn step(&mut self, _cells: usize) -> Result<(), Infallible> {
        Ok(())
    }
}

impl Budget for &DiffOptions {
    type Error = DiffError;

    fn step(&mut self, cells: usize) -> Result<(), DiffError> {
        if let Some(flag) = &self.interrupt {
            if flag.load(Ordering::Relaxed) {
                return Err(DiffError::Interrupted);
            }
        }
        if let Some(limit) = self.memory_limit {
            let required = cells.saturating_mul(std::mem::size_of::<usize>());
            if required > limit {
                return Err(DiffError::MemoryLimitExceeded { limit, required });
            }
        }
        Ok(())
    }
}
