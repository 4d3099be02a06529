// Library for tests to access modules

pub mod collector;
pub mod config;
pub mod ifconfig;
pub mod models;
pub mod netstat;
pub mod routes;
pub mod worker;
