//! Output of scripts.
//!
//! Everything a script prints goes through the `log` facade under the `[JS]` prefix.

use log::{error, info, warn};

/// Sink for `console.*` calls and uncaught script errors.
pub struct Console;

impl Console {
    pub fn log<M: AsRef<str>>(message: M) {
        info!("[JS]: {}", message.as_ref());
    }

    pub fn warn<M: AsRef<str>>(message: M) {
        warn!("[JS]: {}", message.as_ref());
    }

    /// Report an error a script raised, with its stack when the runtime provides one.
    pub fn exception<M: AsRef<str>>(message: M, stack: Option<&str>) {
        match stack {
            Some(stack_trace) if !stack_trace.is_empty() => {
                error!("[JS]: {}\n{}", message.as_ref(), stack_trace);
            }
            _ => {
                error!("[JS]: {}", message.as_ref());
            }
        }
    }
}
