pub mod check;
pub mod ticker;
