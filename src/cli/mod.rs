pub mod dashboard;
pub mod profile;
pub mod ui;
