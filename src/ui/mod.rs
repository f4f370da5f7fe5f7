pub mod browser;
pub mod secret;
pub mod terminal;
