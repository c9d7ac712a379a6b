#[macro_use]
pub mod studio_model;
