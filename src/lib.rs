pub mod error;
pub mod cli;
pub mod config;
pub mod geometry;
pub mod output;
pub mod sector;
pub mod tables;

pub use error::DumpError;
pub use config::ToolConfig;
pub use geometry::SectorGeometry;
pub use sector::{extract_file, ExtractReport, SectorStripper};
pub use tables::{scan_file, BlockClassifier, ScanReport, TableScanner, TagRecord};
