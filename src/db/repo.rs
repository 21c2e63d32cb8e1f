use chrono::Utc;
use sqlx::SqlitePool;

use crate::db::models::{NewRide, NewUser, Ride, RideStatus, User, UserType};

pub async fn create_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name VARCHAR(50) NOT NULL,
            phone VARCHAR(15) UNIQUE NOT NULL,
            user_type VARCHAR(10) NOT NULL,
            password_hash VARCHAR(100) NOT NULL,
            registered_at DATETIME NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // rider_id and driver_id are not foreign keys: rides accept any user id.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS rides (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            rider_id INTEGER NOT NULL,
            driver_id INTEGER,
            pickup_location VARCHAR(200) NOT NULL,
            dropoff_location VARCHAR(200) NOT NULL,
            fare REAL NOT NULL,
            status VARCHAR(20) NOT NULL DEFAULT 'requested',
            requested_at DATETIME NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn get_user_by_phone(
    pool: &SqlitePool,
    phone: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE phone = ?")
        .bind(phone)
        .fetch_optional(pool)
        .await
}

/// Inserts a user and returns the assigned id.
pub async fn insert_user(pool: &SqlitePool, user: &NewUser) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO users (name, phone, user_type, password_hash, registered_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&user.name)
    .bind(&user.phone)
    .bind(user.user_type)
    .bind(&user.password_hash)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

pub async fn insert_ride(pool: &SqlitePool, ride: &NewRide) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO rides
            (rider_id, driver_id, pickup_location, dropoff_location, fare, status, requested_at)
        VALUES (?, NULL, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(ride.rider_id)
    .bind(&ride.pickup_location)
    .bind(&ride.dropoff_location)
    .bind(ride.fare)
    .bind(RideStatus::Requested)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

#[cfg(test)]
pub(crate) async fn get_ride(
    pool: &SqlitePool,
    ride_id: i64,
) -> Result<Option<Ride>, sqlx::Error> {
    sqlx::query_as::<_, Ride>("SELECT * FROM rides WHERE id = ?")
        .bind(ride_id)
        .fetch_optional(pool)
        .await
}

/// Assigns `driver_id` and moves the ride to `ongoing`.
///
/// Returns `false` when the ride does not exist or is not `requested`. The
/// status check and the write happen in a single statement, so two drivers
/// racing for the same ride cannot both win.
pub async fn accept_ride(
    pool: &SqlitePool,
    ride_id: i64,
    driver_id: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE rides SET driver_id = ?, status = ?
        WHERE id = ? AND status = ?
        "#,
    )
    .bind(driver_id)
    .bind(RideStatus::Ongoing)
    .bind(ride_id)
    .bind(RideStatus::Requested)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// Moves an `ongoing` ride to `completed`. Returns `false` for any other ride.
pub async fn complete_ride(pool: &SqlitePool, ride_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE rides SET status = ? WHERE id = ? AND status = ?")
        .bind(RideStatus::Completed)
        .bind(ride_id)
        .bind(RideStatus::Ongoing)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() == 1)
}

/// Rides where `user_id` is the rider or the driver, depending on `user_type`.
pub async fn list_rides(
    pool: &SqlitePool,
    user_id: i64,
    user_type: UserType,
) -> Result<Vec<Ride>, sqlx::Error> {
    let sql = match user_type {
        UserType::Rider => "SELECT * FROM rides WHERE rider_id = ? ORDER BY id",
        UserType::Driver => "SELECT * FROM rides WHERE driver_id = ? ORDER BY id",
    };

    sqlx::query_as::<_, Ride>(sql)
        .bind(user_id)
        .fetch_all(pool)
        .await
}
