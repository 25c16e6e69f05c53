pub mod container;
pub mod controller;
pub mod http;
pub mod router;

pub use container::{timestamp_now, Container, ContainerConfig, ServiceHealth, SERVICE_NAME};
pub use router::Router;
