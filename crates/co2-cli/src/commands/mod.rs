pub mod config;
pub mod countries;
pub mod head;
pub mod map;
pub mod population;
pub mod trend;
