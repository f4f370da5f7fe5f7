pub mod forms;
pub mod pin;
