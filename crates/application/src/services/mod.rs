//! Application services - Use case implementations

mod sensor_service;
mod update_service;

pub use sensor_service::{
    SENSOR_DESCRIPTIONS, Sensor, SensorDescription, SensorService, SensorState, attributes,
    native_value,
};
pub use update_service::UpdateService;
