pub mod rest;

pub use rest::{ApiError, Engine, RestApi};
