pub mod core;
pub mod flow;
pub mod models;
pub mod stores;
pub mod ui;
pub mod utils;
pub mod validation;
