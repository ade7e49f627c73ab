//! The profile payload the report is rendered from.
//!
//! Field names on the wire are camelCase, matching the JSON the
//! profile service sends (`userInfo`, `maintenances`, ...). Null or
//! missing lists are read as empty.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::error::ReportError;

/// Placeholder shown for a missing car link or maintenance type.
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileReport {
    #[serde(rename = "userInfo", default)]
    pub subject: Option<UserSummary>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub cars: Vec<CarSummary>,
    #[serde(rename = "maintenances", default, deserialize_with = "null_as_empty")]
    pub maintenance_records: Vec<MaintenanceSummary>,
    #[serde(default)]
    pub total_cars: u64,
    #[serde(rename = "totalMaintenances", default)]
    pub total_maintenance_records: u64,
    #[serde(default)]
    pub total_maintenance_cost: Option<f64>,
    #[serde(default)]
    pub generated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    #[serde(rename = "userId", default)]
    pub id: Uuid,
    pub username: Option<String>,
    pub email: Option<String>,
    /// Not drawn; the avatar bytes are supplied separately.
    #[serde(rename = "profilePictureUrl")]
    pub avatar_url: Option<String>,
    pub role: Option<String>,
    pub created_on: Option<NaiveDateTime>,
    pub updated_on: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarSummary {
    #[serde(rename = "carId", default)]
    pub id: Uuid,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub model: String,
    pub year: Option<i32>,
    #[serde(default)]
    pub vin: String,
    pub joined_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub maintenance_count: u64,
}

impl CarSummary {
    /// `Brand Model (Year)`, or `Brand Model` when the year is unknown.
    pub fn headline(&self) -> String {
        match self.year {
            Some(year) => format!("{} {} ({})", self.brand, self.model, year),
            None => format!("{} {}", self.brand, self.model),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceSummary {
    #[serde(rename = "maintenanceId", default)]
    pub id: Uuid,
    /// None when the car was deleted after the record was written.
    pub car_id: Option<Uuid>,
    pub car_brand: Option<String>,
    pub car_model: Option<String>,
    pub date: Option<NaiveDate>,
    #[serde(rename = "type")]
    pub maintenance_type: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub mileage: i64,
    pub cost: Option<f64>,
    pub next_due_date: Option<NaiveDate>,
}

impl MaintenanceSummary {
    pub fn car_brand(&self) -> &str {
        self.car_brand.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn car_model(&self) -> &str {
        self.car_model.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn type_label(&self) -> &str {
        self.maintenance_type.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    /// The description, unless it is missing or blank.
    pub fn description(&self) -> Option<&str> {
        self.description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
    }
}

impl ProfileReport {
    /// Parse the wire JSON payload.
    pub fn from_json(json: &str) -> Result<Self, ReportError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build a report whose totals are derived from the lists: the
    /// number of cars, the number of records, and the sum of every
    /// cost that is present.
    pub fn summarize(
        subject: Option<UserSummary>,
        cars: Vec<CarSummary>,
        maintenance_records: Vec<MaintenanceSummary>,
        generated_at: Option<NaiveDateTime>,
    ) -> Self {
        let total_cost = maintenance_records.iter().filter_map(|m| m.cost).sum();
        ProfileReport {
            subject,
            total_cars: cars.len() as u64,
            total_maintenance_records: maintenance_records.len() as u64,
            total_maintenance_cost: Some(total_cost),
            cars,
            maintenance_records,
            generated_at,
        }
    }

    /// Whether the stated totals agree with the list lengths.
    pub fn totals_match_lists(&self) -> bool {
        self.total_cars == self.cars.len() as u64
            && self.total_maintenance_records == self.maintenance_records.len() as u64
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
