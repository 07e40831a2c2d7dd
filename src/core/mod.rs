pub mod compare;
pub mod context;
pub mod converter;
pub mod engine;
pub mod numeral;
pub mod registry;
pub mod types;
