pub mod catalog;
pub mod config;
pub mod converter;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod osm;
pub mod server;
pub mod source;
pub mod store;

pub use catalog::*;
pub use config::*;
pub use converter::*;
pub use error::*;
pub use geometry::*;
pub use osm::*;
pub use server::*;
pub use source::*;
pub use store::*;
