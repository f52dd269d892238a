pub mod condition;
pub mod forecast;
pub mod summary;
