pub const ALERT_ERROR: &str = "errorAlert";
pub const ALERT_SUCCESS: &str = "successAlert";
