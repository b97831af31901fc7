pub mod activity;
pub mod aggregated;
pub mod frame;
pub mod utilized;
