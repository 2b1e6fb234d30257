// Gateway module - controls public API for handlers
// Modules are private, only exported symbols are public

mod health;
mod medicines;
mod metrics;
mod root;
mod shared_types;
mod swagger;

// Core handlers
pub use health::health_check;
pub use metrics::metrics_handler;
pub use root::root_handler;
pub use swagger::swagger_handler;

// Medicine CRUD handlers
pub use medicines::{
    create_medicine, delete_medicine, get_medicine_by_id, get_medicines, update_medicine,
};

pub use shared_types::ErrorBody;
