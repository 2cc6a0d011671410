use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SearchRequest {
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<Show>,
}

/// One search result. The upstream makes no promises about these fields,
/// so every one of them tolerates being absent.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Show {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub casual_description: String,
    #[serde(default)]
    pub first_aired: String,
    #[serde(default)]
    pub image: String,
}

impl Show {
    /// Year displayed under the title. `first_aired` is normally an ISO
    /// date; a bare year is accepted too, anything else yields None.
    pub fn first_aired_year(&self) -> Option<i32> {
        if let Ok(date) = NaiveDate::parse_from_str(&self.first_aired, "%Y-%m-%d") {
            return Some(date.year());
        }
        self.first_aired.get(..4)?.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn response_without_results_field_deserializes_empty() {
        let response: SearchResponse = serde_json::from_value(json!({})).expect("deserialize");
        assert!(response.results.is_empty());
    }

    #[test]
    fn show_tolerates_missing_fields() {
        let show: Show = serde_json::from_value(json!({ "name": "Dark" })).expect("deserialize");
        assert_eq!(show.name, "Dark");
        assert!(show.id.is_empty());
        assert!(show.image.is_empty());
        assert_eq!(show.first_aired_year(), None);
    }

    #[test]
    fn first_aired_year_handles_dates_and_bare_years() {
        let mut show = Show {
            first_aired: "2017-12-01".to_string(),
            ..Show::default()
        };
        assert_eq!(show.first_aired_year(), Some(2017));

        show.first_aired = "2017".to_string();
        assert_eq!(show.first_aired_year(), Some(2017));

        show.first_aired = "unknown".to_string();
        assert_eq!(show.first_aired_year(), None);
    }
}
