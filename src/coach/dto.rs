use serde::{Deserialize, Serialize};
use time::Date;

#[derive(Debug, Default, Deserialize)]
pub struct AdviceRequest {
    /// Focus on this day's meals instead of the most recent ones.
    #[serde(default)]
    pub date: Option<Date>,
}

#[derive(Debug, Serialize)]
pub struct AdviceResponse {
    pub advice: String,
}
