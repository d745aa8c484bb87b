pub mod collector;
pub mod collector_scheduler;
pub mod instance_model;
pub mod point_writer;
