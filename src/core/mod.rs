pub mod forms;
pub mod listing;
pub mod proxy;

pub use crate::domain::model::{Client, IsoStandardDefinition, MappingRecord};
pub use crate::domain::ports::{ConfigProvider, Upstream};
pub use crate::utils::error::Result;
