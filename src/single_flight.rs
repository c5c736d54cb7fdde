//! Single-flight load guard.
//!
//! [`LoadGuard`] runs an expensive, fallible load at most once at a time and
//! publishes the first successful result for the rest of the process lifetime.
//!
//! - Loaded: callers get the published value without taking a lock.
//! - Loading: callers block on a condition variable and receive the outcome
//!   of the attempt they joined.
//! - Not started or failed: the caller becomes the leader of a new attempt.
//!
//! A failed attempt does not poison the guard; the next caller retries. If the
//! leader unwinds (panic) before finishing, waiters are released with a
//! [`CatalogError::FetchFailure`] and the guard becomes retryable again.

use crate::error::CatalogError;
use arc_swap::ArcSwapOption;
use parking_lot::{Condvar, Mutex};
use std::fmt;
use std::sync::Arc;

/// Observable state of a [`LoadGuard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// No attempt has been made yet
    NotStarted,
    /// An attempt is in flight
    Loading,
    /// A value has been published; terminal
    Loaded,
    /// The most recent attempt failed; the next request retries
    Failed,
}

impl fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LoadStatus::NotStarted => "not started",
            LoadStatus::Loading => "loading",
            LoadStatus::Loaded => "loaded",
            LoadStatus::Failed => "failed",
        };
        f.write_str(name)
    }
}

struct Flight {
    status: LoadStatus,
    /// Generation of the most recently started attempt
    started: u64,
    /// Generation of the most recently finished attempt
    finished: u64,
    /// Error of the most recently finished attempt, if it failed
    last_error: Option<CatalogError>,
}

impl Flight {
    fn finish(&mut self, generation: u64, error: Option<CatalogError>) {
        self.status = if error.is_some() {
            LoadStatus::Failed
        } else {
            LoadStatus::Loaded
        };
        self.last_error = error;
        self.finished = self.finished.max(generation);
    }
}

/// Runs a load at most once concurrently and caches its success.
pub struct LoadGuard<T> {
    value: ArcSwapOption<T>,
    flight: Mutex<Flight>,
    done: Condvar,
}

impl<T> Default for LoadGuard<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LoadGuard<T> {
    pub fn new() -> Self {
        Self {
            value: ArcSwapOption::empty(),
            flight: Mutex::new(Flight {
                status: LoadStatus::NotStarted,
                started: 0,
                finished: 0,
                last_error: None,
            }),
            done: Condvar::new(),
        }
    }

    /// The published value, if a load has succeeded. Never blocks.
    pub fn get(&self) -> Option<Arc<T>> {
        self.value.load_full()
    }

    /// Current state, without triggering a load.
    pub fn status(&self) -> LoadStatus {
        if self.value.load().is_some() {
            return LoadStatus::Loaded;
        }
        self.flight.lock().status
    }

    /// Error of the most recent finished attempt, if it failed.
    pub fn last_error(&self) -> Option<CatalogError> {
        self.flight.lock().last_error.clone()
    }

    /// Return the published value, running `load` first if nothing has been
    /// published and no attempt is in flight.
    ///
    /// `load` is called outside the internal lock. Callers that arrive while
    /// another caller's `load` is running wait for it and share its outcome.
    ///
    /// # Errors
    ///
    /// Returns the error of the attempt this call ran or joined.
    pub fn get_or_load<F>(&self, load: F) -> Result<Arc<T>, CatalogError>
    where
        F: FnOnce() -> Result<T, CatalogError>,
    {
        if let Some(value) = self.value.load_full() {
            return Ok(value);
        }

        let mut flight = self.flight.lock();
        match flight.status {
            LoadStatus::Loading => {
                let joined = flight.started;
                log::debug!("Joining in-flight load attempt {joined}");
                while flight.finished < joined {
                    self.done.wait(&mut flight);
                }
                return self.joined_outcome(&flight);
            }
            LoadStatus::Loaded => return self.joined_outcome(&flight),
            LoadStatus::NotStarted | LoadStatus::Failed => {}
        }

        flight.started += 1;
        flight.status = LoadStatus::Loading;
        let generation = flight.started;
        drop(flight);

        let mut abandon = AbandonGuard {
            guard: self,
            generation,
            armed: true,
        };
        let outcome = load();
        abandon.armed = false;

        let mut flight = self.flight.lock();
        let result = match outcome {
            Ok(value) => {
                let value = Arc::new(value);
                self.value.store(Some(Arc::clone(&value)));
                flight.finish(generation, None);
                Ok(value)
            }
            Err(e) => {
                flight.finish(generation, Some(e.clone()));
                Err(e)
            }
        };
        self.done.notify_all();
        result
    }

    fn joined_outcome(&self, flight: &Flight) -> Result<Arc<T>, CatalogError> {
        if let Some(value) = self.value.load_full() {
            return Ok(value);
        }
        Err(flight.last_error.clone().unwrap_or_else(|| {
            CatalogError::FetchFailure("load attempt ended without a result".to_string())
        }))
    }
}

impl<T> fmt::Debug for LoadGuard<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadGuard")
            .field("status", &self.status())
            .finish()
    }
}

/// Releases waiters if the leader unwinds out of `load`.
struct AbandonGuard<'a, T> {
    guard: &'a LoadGuard<T>,
    generation: u64,
    armed: bool,
}

impl<T> Drop for AbandonGuard<'_, T> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        log::error!("Load attempt {} was abandoned", self.generation);
        let mut flight = self.guard.flight.lock();
        flight.finish(
            self.generation,
            Some(CatalogError::FetchFailure(
                "load attempt was abandoned before completing".to_string(),
            )),
        );
        self.guard.done.notify_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_loads_once_then_caches() {
        let guard = LoadGuard::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let value = guard
                .get_or_load(|| {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(42)
                })
                .unwrap();
            assert_eq!(*value, 42);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(guard.status(), LoadStatus::Loaded);
    }

    #[test]
    fn test_failure_is_retryable() {
        let guard = LoadGuard::new();

        let err = guard
            .get_or_load(|| Err::<u8, _>(CatalogError::MissingCredential))
            .unwrap_err();
        assert_eq!(err, CatalogError::MissingCredential);
        assert_eq!(guard.status(), LoadStatus::Failed);
        assert_eq!(guard.last_error(), Some(CatalogError::MissingCredential));
        assert!(guard.get().is_none());

        let value = guard.get_or_load(|| Ok(7u8)).unwrap();
        assert_eq!(*value, 7);
        assert_eq!(guard.status(), LoadStatus::Loaded);
        assert_eq!(guard.last_error(), None);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(LoadStatus::NotStarted.to_string(), "not started");
        assert_eq!(LoadStatus::Failed.to_string(), "failed");
    }
}
