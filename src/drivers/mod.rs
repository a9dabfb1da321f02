//! Actuator driver, hardware initialisation, and the tick timer.

pub mod actuator;
pub mod hw_init;
pub mod hw_timer;
