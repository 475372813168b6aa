use std::fmt::Display;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, TimeZone};
use rand::Rng;
use rand::rngs::StdRng;

use crate::greeting::selector::{Greeting, GreetingSelector};
use crate::model::catalog::Catalog;

/// A [`GreetingSelector`] that several callers can draw from. Every call
/// holds the lock for one selection, so history updates never interleave.
pub struct SharedSelector<C, R = StdRng> {
    inner: Arc<Mutex<GreetingSelector<C, R>>>,
}

impl<C, R> Clone for SharedSelector<C, R> {
    fn clone(&self) -> Self {
        SharedSelector {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: Catalog, R: Rng> SharedSelector<C, R> {
    pub fn new(selector: GreetingSelector<C, R>) -> Self {
        SharedSelector {
            inner: Arc::new(Mutex::new(selector)),
        }
    }

    pub fn select_greeting(&self) -> String {
        self.lock().select_greeting()
    }

    pub fn choose<Tz>(&self, lang: &str, now: &DateTime<Tz>) -> Greeting
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        self.lock().choose(lang, now)
    }

    /// Run `f` with exclusive access to the selector.
    pub fn with<T>(&self, f: impl FnOnce(&mut GreetingSelector<C, R>) -> T) -> T {
        f(&mut self.lock())
    }

    // A panic mid-selection cannot leave the history half-written, so a
    // poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, GreetingSelector<C, R>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
