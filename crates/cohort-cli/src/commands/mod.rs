pub mod cluster;
pub mod session;
