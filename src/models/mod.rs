pub mod account;
pub mod form;
