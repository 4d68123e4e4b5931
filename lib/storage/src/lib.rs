pub mod dataset;
pub mod store;

pub use dataset::{Dataset, DatasetDescription};
pub use store::{DatasetSnapshot, DatasetStore};
