pub mod config;
pub mod db;
pub mod init;
pub mod load;
pub mod log;
pub mod run;
pub mod transform;
