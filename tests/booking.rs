use chrono::NaiveDate;

use cinebook::config::BookingConfig;
use cinebook::database::Database;
use cinebook::error::ApiError;
use cinebook::services::booking::{self, CreateBooking};
use cinebook::services::scheduling::{self, CreateShowtime};

async fn test_db() -> Database {
    let db = Database::new("sqlite::memory:", 1)
        .await
        .expect("failed to open in-memory database");
    db.run_migrations().await.expect("migrations failed");
    db
}

fn booking_cfg() -> BookingConfig {
    BookingConfig {
        overlap_window_hours: 3,
    }
}

async fn seed_hall(db: &Database, rows: i64, seats_per_row: i64) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO halls (name, total_rows, seats_per_row, capacity)
         VALUES ('Hall 1', ?, ?, ?) RETURNING id",
    )
    .bind(rows)
    .bind(seats_per_row)
    .bind(rows * seats_per_row)
    .fetch_one(&db.pool)
    .await
    .unwrap()
}

async fn seed_showtime(db: &Database, hall_id: i64, hour: u32) -> i64 {
    let start = NaiveDate::from_ymd_opt(2026, 9, 1)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap();
    let showtime = scheduling::create_showtime(
        db,
        &booking_cfg(),
        CreateShowtime {
            hall_id,
            start_time: start,
            price: 1200,
            movie_id: Some(1),
            event_id: None,
        },
    )
    .await
    .unwrap();
    showtime.id
}

fn booking_req(showtime_id: i64, seat: &str, customer: &str) -> CreateBooking {
    CreateBooking {
        showtime_id,
        seat_label: seat.to_string(),
        customer_name: customer.to_string(),
        user_id: Some(1),
        price: Some(1200),
    }
}

/* ---------- booking ---------- */

#[tokio::test]
async fn books_a_free_seat() {
    let db = test_db().await;
    let hall = seed_hall(&db, 2, 3).await;
    let showtime = seed_showtime(&db, hall, 10).await;

    let ticket = booking::create_booking(&db, booking_req(showtime, "A2", "Alice"))
        .await
        .unwrap();

    assert_eq!(ticket.seat_label, "A2");
    assert_eq!(ticket.customer_name, "Alice");
    assert_eq!(ticket.status, "booked");
    assert_eq!(ticket.price, 1200);
}

#[tokio::test]
async fn rejects_double_booking_of_same_seat() {
    let db = test_db().await;
    let hall = seed_hall(&db, 2, 3).await;
    let showtime = seed_showtime(&db, hall, 10).await;

    booking::create_booking(&db, booking_req(showtime, "A2", "Alice"))
        .await
        .unwrap();

    let err = booking::create_booking(&db, booking_req(showtime, "A2", "Bob"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::SeatConflict));
}

#[tokio::test]
async fn same_seat_in_another_showtime_is_independent() {
    let db = test_db().await;
    let hall = seed_hall(&db, 2, 3).await;
    let first = seed_showtime(&db, hall, 10).await;
    let second = seed_showtime(&db, hall, 14).await;

    booking::create_booking(&db, booking_req(first, "B1", "Alice"))
        .await
        .unwrap();
    booking::create_booking(&db, booking_req(second, "B1", "Bob"))
        .await
        .unwrap();
}

#[tokio::test]
async fn concurrent_bookings_admit_exactly_one_winner() {
    let db = test_db().await;
    let hall = seed_hall(&db, 2, 3).await;
    let showtime = seed_showtime(&db, hall, 10).await;

    let mut handles = Vec::new();
    for i in 0..8 {
        let db = db.clone();
        handles.push(tokio::spawn(async move {
            booking::create_booking(&db, booking_req(showtime, "B3", &format!("Customer {i}")))
                .await
        }));
    }

    let mut won = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => won += 1,
            Err(ApiError::SeatConflict) => conflicts += 1,
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }
    assert_eq!(won, 1);
    assert_eq!(conflicts, 7);

    let tickets: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM tickets WHERE showtime_id = ? AND seat_label = 'B3'",
    )
    .bind(showtime)
    .fetch_one(&db.pool)
    .await
    .unwrap();
    assert_eq!(tickets, 1);
}

#[tokio::test]
async fn unique_index_rejects_duplicate_rows() {
    let db = test_db().await;
    let hall = seed_hall(&db, 2, 3).await;
    let showtime = seed_showtime(&db, hall, 10).await;

    let insert = "INSERT INTO tickets (showtime_id, seat_label, customer_name, price)
                  VALUES (?, 'A1', 'Alice', 0)";
    sqlx::query(insert).bind(showtime).execute(&db.pool).await.unwrap();

    let err = sqlx::query(insert)
        .bind(showtime)
        .execute(&db.pool)
        .await
        .unwrap_err();
    match err {
        sqlx::Error::Database(e) => assert!(e.is_unique_violation()),
        other => panic!("expected unique violation, got {other:?}"),
    }
}

#[tokio::test]
async fn rejects_seat_outside_hall_geometry() {
    let db = test_db().await;
    let hall = seed_hall(&db, 2, 3).await;
    let showtime = seed_showtime(&db, hall, 10).await;

    for label in ["C1", "A4", "Z9", "A0", "b2", "xyz"] {
        let err = booking::create_booking(&db, booking_req(showtime, label, "Alice"))
            .await
            .unwrap_err();
        assert!(
            matches!(err, ApiError::InvalidSeat(_)),
            "{label:?} should be invalid"
        );
    }
}

#[tokio::test]
async fn rejects_booking_for_missing_showtime() {
    let db = test_db().await;
    let err = booking::create_booking(&db, booking_req(999, "A1", "Alice"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn rejects_blank_customer_name() {
    let db = test_db().await;
    let hall = seed_hall(&db, 2, 3).await;
    let showtime = seed_showtime(&db, hall, 10).await;

    let err = booking::create_booking(&db, booking_req(showtime, "A1", "   "))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
}

#[tokio::test]
async fn cancel_frees_seat_for_rebooking() {
    let db = test_db().await;
    let hall = seed_hall(&db, 2, 3).await;
    let showtime = seed_showtime(&db, hall, 10).await;

    let ticket = booking::create_booking(&db, booking_req(showtime, "B3", "Alice"))
        .await
        .unwrap();
    booking::cancel_booking(&db, ticket.id).await.unwrap();

    let rebooked = booking::create_booking(&db, booking_req(showtime, "B3", "Bob"))
        .await
        .unwrap();
    assert_eq!(rebooked.customer_name, "Bob");
}

#[tokio::test]
async fn cancelling_missing_ticket_is_not_found() {
    let db = test_db().await;
    let err = booking::cancel_booking(&db, 12345).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

/* ---------- scheduling ---------- */

#[tokio::test]
async fn overlapping_showtime_in_same_hall_is_rejected() {
    let db = test_db().await;
    let hall = seed_hall(&db, 2, 3).await;
    seed_showtime(&db, hall, 10).await;

    // 12:00 falls inside the 10:00 + 3h window
    let err = scheduling::create_showtime(
        &db,
        &booking_cfg(),
        CreateShowtime {
            hall_id: hall,
            start_time: NaiveDate::from_ymd_opt(2026, 9, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            price: 1000,
            movie_id: Some(2),
            event_id: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ApiError::SchedulingConflict));
}

#[tokio::test]
async fn back_to_back_showtimes_are_allowed() {
    let db = test_db().await;
    let hall = seed_hall(&db, 2, 3).await;
    seed_showtime(&db, hall, 10).await;
    // 13:00 touches the end of [10:00, 13:00) without overlapping it
    seed_showtime(&db, hall, 13).await;
}

#[tokio::test]
async fn same_slot_in_different_hall_is_allowed() {
    let db = test_db().await;
    let hall_a = seed_hall(&db, 2, 3).await;
    let hall_b = seed_hall(&db, 2, 3).await;
    seed_showtime(&db, hall_a, 10).await;
    seed_showtime(&db, hall_b, 10).await;
}

#[tokio::test]
async fn deleted_showtime_frees_its_slot() {
    let db = test_db().await;
    let hall = seed_hall(&db, 2, 3).await;
    let showtime = seed_showtime(&db, hall, 10).await;

    scheduling::delete_showtime(&db, showtime).await.unwrap();
    seed_showtime(&db, hall, 11).await;
}

#[tokio::test]
async fn showtime_requires_exactly_one_of_movie_or_event() {
    let db = test_db().await;
    let hall = seed_hall(&db, 2, 3).await;
    let start = NaiveDate::from_ymd_opt(2026, 9, 1)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap();

    for (movie_id, event_id) in [(None, None), (Some(1), Some(2))] {
        let err = scheduling::create_showtime(
            &db,
            &booking_cfg(),
            CreateShowtime {
                hall_id: hall,
                start_time: start,
                price: 1000,
                movie_id,
                event_id,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }
}

#[tokio::test]
async fn showtime_for_missing_hall_is_not_found() {
    let db = test_db().await;
    let err = scheduling::create_showtime(
        &db,
        &booking_cfg(),
        CreateShowtime {
            hall_id: 42,
            start_time: NaiveDate::from_ymd_opt(2026, 9, 1)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            price: 1000,
            movie_id: Some(1),
            event_id: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn event_showtime_sets_is_event_flag() {
    let db = test_db().await;
    let hall = seed_hall(&db, 2, 3).await;

    let showtime = scheduling::create_showtime(
        &db,
        &booking_cfg(),
        CreateShowtime {
            hall_id: hall,
            start_time: NaiveDate::from_ymd_opt(2026, 9, 1)
                .unwrap()
                .and_hms_opt(19, 0, 0)
                .unwrap(),
            price: 2500,
            movie_id: None,
            event_id: Some(7),
        },
    )
    .await
    .unwrap();

    assert!(showtime.is_event);
    assert_eq!(showtime.event_id, Some(7));
    assert_eq!(showtime.movie_id, None);
}
