pub mod input;
pub mod selector;
pub mod spinner;
