//! Reflow counters, emitted as one JSON line per reflow when enabled.

use log::info;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ReflowCounters {
    pub reflows_total: u64,
    pub failed_reflows_total: u64,
    pub boxes_last: u64,
    pub paint_commands_last: u64,
    pub layout_time_last_us: u64,
    pub display_list_generation: u64,
}

impl ReflowCounters {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| String::from("{}"))
    }
}

pub fn maybe_emit(enabled: bool, counters: &ReflowCounters) {
    if enabled {
        info!(target: "telemetry", "{}", counters.to_json());
    }
}
