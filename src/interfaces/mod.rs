pub mod gateway;
pub mod mqtt;
