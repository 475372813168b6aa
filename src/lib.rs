//! Localized greetings that avoid repeating themselves.
//!
//! A [`GreetingSelector`] draws greeting templates at random from a
//! [`Catalog`], remembering the last few it showed for each language, and
//! fills in the weekday, month and hours left in the day.

pub mod cli;
pub mod greeting;
pub mod io;
pub mod model;
pub mod ops;
pub mod util;

pub use greeting::{Greeting, GreetingSelector, RecentHistory, SelectorOptions, SharedSelector};
pub use model::catalog::{Catalog, TomlCatalog};
