// 駆動される側アダプター（ストア実装など）

mod console_logger;
mod event_publisher;
mod in_memory_booking_context;
mod in_memory_vehicle_catalog;
mod simulated_latency;
mod system_clock;

pub use console_logger::{ConsoleLogger, LogEntry};
pub use event_publisher::ConsoleEventPublisher;
pub use in_memory_booking_context::InMemoryBookingContext;
pub use in_memory_vehicle_catalog::InMemoryVehicleCatalog;
pub use simulated_latency::SimulatedLatencyContext;
pub use system_clock::SystemClock;
