pub mod importer;
pub mod ski_area;
