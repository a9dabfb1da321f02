//! One-shot tick timer using ESP-IDF's esp_timer API.
//!
//! [`delay`] arms a one-shot timer and parks the calling task on a condition
//! variable until the timer callback fires.  The callback only signals the
//! waiter; it performs no playback logic.  On simulation targets the delay
//! is a plain `thread::sleep`.
//!
//! Timer callbacks execute in the ESP timer task context (not ISR), so they
//! can take a std mutex.

use core::time::Duration;

#[cfg(all(target_os = "espidf", feature = "espidf"))]
use std::sync::{Condvar, Mutex, PoisonError};

#[cfg(all(target_os = "espidf", feature = "espidf"))]
use esp_idf_svc::sys::*;

use crate::drivers::hw_init::HwInitError;

#[cfg(all(target_os = "espidf", feature = "espidf"))]
static mut TICK_TIMER: esp_timer_handle_t = core::ptr::null_mut();

#[cfg(all(target_os = "espidf", feature = "espidf"))]
static FIRED: Mutex<bool> = Mutex::new(false);
#[cfg(all(target_os = "espidf", feature = "espidf"))]
static WAKE: Condvar = Condvar::new();

/// SAFETY: TICK_TIMER is written once in `init_tick_timer()` before any
/// delay is requested.  Only called from the single control task.
#[cfg(all(target_os = "espidf", feature = "espidf"))]
unsafe fn tick_timer() -> esp_timer_handle_t { unsafe { TICK_TIMER } }

#[cfg(all(target_os = "espidf", feature = "espidf"))]
unsafe extern "C" fn tick_fired_cb(_arg: *mut core::ffi::c_void) {
    *FIRED.lock().unwrap_or_else(PoisonError::into_inner) = true;
    WAKE.notify_one();
}

/// Create the one-shot tick timer.
#[cfg(all(target_os = "espidf", feature = "espidf"))]
pub fn init_tick_timer() -> Result<(), HwInitError> {
    // SAFETY: TICK_TIMER is written here once at boot from the control task
    // before any delay arms it.
    unsafe {
        let args = esp_timer_create_args_t {
            callback: Some(tick_fired_cb),
            arg: core::ptr::null_mut(),
            dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
            name: b"haptic_tick\0".as_ptr() as *const _,
            skip_unhandled_events: false,
        };
        let ret = esp_timer_create(&args, &raw mut TICK_TIMER);
        if ret != ESP_OK as i32 {
            return Err(HwInitError::TimerCreateFailed(ret));
        }
    }
    log::info!("hw_timer: one-shot tick timer ready");
    Ok(())
}

#[cfg(not(all(target_os = "espidf", feature = "espidf")))]
pub fn init_tick_timer() -> Result<(), HwInitError> {
    log::info!("hw_timer(sim): tick timer backed by thread::sleep");
    Ok(())
}

/// Block the calling task for at least `span`.
#[cfg(all(target_os = "espidf", feature = "espidf"))]
pub fn delay(span: Duration) {
    let us = span.as_micros() as u64;
    if us == 0 {
        return;
    }

    let mut fired = FIRED.lock().unwrap_or_else(PoisonError::into_inner);
    *fired = false;

    // SAFETY: tick_timer() contract; the handle is valid after
    // init_tick_timer().  The lock is held while arming so the callback
    // cannot signal before we wait.
    let ret = unsafe { esp_timer_start_once(tick_timer(), us) };
    if ret != ESP_OK as i32 {
        log::error!("hw_timer: arm failed (rc={}), busy-waiting {}us", ret, us);
        drop(fired);
        // SAFETY: ROM delay routine, no shared state.
        unsafe { esp_rom_delay_us(us as u32) };
        return;
    }

    while !*fired {
        fired = WAKE.wait(fired).unwrap_or_else(PoisonError::into_inner);
    }
}

#[cfg(not(all(target_os = "espidf", feature = "espidf")))]
pub fn delay(span: Duration) {
    if !span.is_zero() {
        std::thread::sleep(span);
    }
}
