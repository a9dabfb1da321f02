//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements           | Connects to                    |
//! |-------------|----------------------|--------------------------------|
//! | `hardware`  | ActuatorPort         | ESP32 LEDC PWM, GPIO           |
//! |             | TickTimer            | ESP32 one-shot esp_timer       |
//! | `hal`       | ActuatorPort         | any embedded-hal 1.0 board     |
//! |             | TickTimer            | embedded-hal `DelayNs`         |
//! | `log_sink`  | EventSink            | Serial log output              |
//! | `console`   | (command producer)   | Serial line input              |
//! | `time`      | TickTimer            | `std::thread::sleep`           |

pub mod console;
pub mod hal;
pub mod hardware;
pub mod log_sink;
pub mod time;
