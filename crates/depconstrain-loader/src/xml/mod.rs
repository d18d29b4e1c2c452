//! Tag-stream (XML) encoding of the constraints file

pub mod events;
pub mod handler;
pub mod reader;
pub mod tags;

pub use events::{drive, RegionAttributes, RegionHandler};
pub use handler::ConstraintsHandler;
pub use reader::{read_from_xml, read_from_xml_str};
