pub mod locale;
pub mod template;
