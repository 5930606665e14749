pub mod add;
pub mod budget;
pub mod dashboard;
pub mod history;
pub mod remove;
pub mod search_by_category;
pub mod summary;
pub mod validate;
