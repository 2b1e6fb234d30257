mod medicine;
mod metrics;
mod request_counter;

// Publicly expose the medicine resource store
pub use medicine::{parse_id, Medicine, MedicineStore, StoreError, StorePtr};

// Publicly expose the Metrics abstraction
pub use metrics::{EndpointHit, EndpointMetricSample, Metrics, MetricsPtr, MetricsReport};

pub use request_counter::RequestCounter;
