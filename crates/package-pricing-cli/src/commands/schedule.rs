use serde_json::Value;

use package_pricing_core::FeeSchedules;

/// Print the fee schedule in effect, so it can be edited and passed back with --schedule.
pub fn run_schedule(schedules: &FeeSchedules) -> Result<Value, Box<dyn std::error::Error>> {
    Ok(serde_json::to_value(schedules)?)
}
