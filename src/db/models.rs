use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

/// Role a user signs up with. Ride operations never check it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum UserType {
    Rider,
    Driver,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Rider => "rider",
            UserType::Driver => "driver",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rider" => Ok(UserType::Rider),
            "driver" => Ok(UserType::Driver),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum RideStatus {
    Requested,
    Ongoing,
    Completed,
}

impl RideStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RideStatus::Requested => "requested",
            RideStatus::Ongoing => "ongoing",
            RideStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for RideStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown value `{0}`")]
pub struct UnknownVariant(pub String);

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub user_type: UserType,
    pub password_hash: String,
    pub registered_at: DateTime<Utc>,
}

/// Fields needed to insert a user; id and timestamp are assigned on insert.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub phone: String,
    pub user_type: UserType,
    pub password_hash: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Ride {
    #[serde(rename = "ride_id")]
    pub id: i64,
    pub rider_id: i64,
    pub driver_id: Option<i64>,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub fare: f64,
    pub status: RideStatus,
    pub requested_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewRide {
    pub rider_id: i64,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub fare: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_type_parse() {
        assert_eq!("rider".parse::<UserType>(), Ok(UserType::Rider));
        assert_eq!("driver".parse::<UserType>(), Ok(UserType::Driver));
        assert!("Driver".parse::<UserType>().is_err());
        assert!("admin".parse::<UserType>().is_err());
    }

    #[test]
    fn test_status_display_is_lowercase() {
        assert_eq!(RideStatus::Requested.to_string(), "requested");
        assert_eq!(RideStatus::Ongoing.to_string(), "ongoing");
        assert_eq!(RideStatus::Completed.to_string(), "completed");
    }

    #[test]
    fn test_ride_serializes_with_ride_id() {
        let ride = Ride {
            id: 7,
            rider_id: 1,
            driver_id: None,
            pickup_location: "A".to_string(),
            dropoff_location: "B".to_string(),
            fare: 10.0,
            status: RideStatus::Requested,
            requested_at: Utc::now(),
        };

        let json = serde_json::to_value(&ride).unwrap();
        assert_eq!(json["ride_id"], 7);
        assert_eq!(json["status"], "requested");
        assert!(json["driver_id"].is_null());
        assert!(json.get("id").is_none());
    }
}
