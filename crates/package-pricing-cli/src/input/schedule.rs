use std::path::Path;

use package_pricing_core::FeeSchedules;

use crate::input::file;

/// Load the fee schedule: the standard price list, or a JSON/YAML file.
///
/// Files are validated the same way as the built-in list.
pub fn load_schedules(path: Option<&str>) -> Result<FeeSchedules, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        tracing::debug!("using standard fee schedule");
        return Ok(FeeSchedules::standard()?);
    };

    let (canonical, contents) = file::read_to_string(path)?;
    let is_yaml = matches!(
        Path::new(&canonical).extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );

    let schedules: FeeSchedules = if is_yaml {
        serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?
    } else {
        serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?
    };
    schedules.validate()?;

    tracing::info!(path = %canonical.display(), currency = %schedules.currency, "loaded fee schedule");
    Ok(schedules)
}
