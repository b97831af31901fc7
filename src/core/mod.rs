pub mod aggregate;
pub mod clean;
pub mod derive;
pub mod filter;
pub mod ingest;
pub mod load;
pub mod log;
pub mod project;
pub mod transform;
