pub mod history;
pub mod selector;
pub mod shared;

pub use history::RecentHistory;
pub use selector::{Greeting, GreetingSelector, SelectorOptions};
pub use shared::SharedSelector;
