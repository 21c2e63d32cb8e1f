use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::MessageResponse;
use crate::api::extract::{ApiJson, ApiQuery};
use crate::api::server::AppState;
use crate::db::models::{NewRide, Ride, UserType};
use crate::db::repo;
use crate::error::{ApiError, ApiResult};

#[derive(Debug, Deserialize)]
pub struct RideRequest {
    pub rider_id: i64,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub fare: f64,
}

#[derive(Debug, Serialize)]
pub struct RideRequested {
    pub message: &'static str,
    pub ride_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct AcceptRequest {
    pub ride_id: i64,
    pub driver_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct CompleteRequest {
    pub ride_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct RidesQuery {
    // Both kept as text so the filter is checked before the id
    pub user_id: Option<String>,
    pub user_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RidesResponse {
    pub rides: Vec<Ride>,
}

pub async fn request_ride(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<RideRequest>,
) -> ApiResult<Json<RideRequested>> {
    let new_ride = NewRide {
        rider_id: payload.rider_id,
        pickup_location: payload.pickup_location,
        dropoff_location: payload.dropoff_location,
        fare: payload.fare,
    };

    let ride_id = repo::insert_ride(&state.db, &new_ride).await?;
    tracing::info!("Rider {} requested ride {}", new_ride.rider_id, ride_id);

    Ok(Json(RideRequested {
        message: "Ride requested successfully",
        ride_id,
    }))
}

pub async fn accept_ride(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<AcceptRequest>,
) -> ApiResult<Json<MessageResponse>> {
    if !repo::accept_ride(&state.db, payload.ride_id, payload.driver_id).await? {
        return Err(ApiError::RideNotAvailable);
    }

    tracing::info!("Driver {} accepted ride {}", payload.driver_id, payload.ride_id);
    Ok(Json(MessageResponse::new("Ride accepted successfully")))
}

pub async fn complete_ride(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<CompleteRequest>,
) -> ApiResult<Json<MessageResponse>> {
    if !repo::complete_ride(&state.db, payload.ride_id).await? {
        return Err(ApiError::InvalidRide);
    }

    tracing::info!("Ride {} completed", payload.ride_id);
    Ok(Json(MessageResponse::new("Ride completed successfully")))
}

pub async fn list_rides(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<RidesQuery>,
) -> ApiResult<Json<RidesResponse>> {
    let user_type: UserType = query
        .user_type
        .as_deref()
        .and_then(|t| t.parse().ok())
        .ok_or(ApiError::InvalidUserType)?;

    let user_id: i64 = query
        .user_id
        .as_deref()
        .ok_or_else(|| ApiError::BadRequest("missing user_id".to_string()))?
        .parse()
        .map_err(|_| ApiError::BadRequest("user_id must be an integer".to_string()))?;

    let rides = repo::list_rides(&state.db, user_id, user_type).await?;
    Ok(Json(RidesResponse { rides }))
}
