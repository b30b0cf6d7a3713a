pub mod service;
pub mod telemetry;

pub use service::GatehouseService;
pub use telemetry::init_tracing;
