mod common;

use common::*;
use std::sync::Arc;
use std::time::Duration;
use storefront::{
    abstract_trait::{
        AdjustOutcome,
        booking::{repository::BookingQueryRepositoryTrait, service::BookingServiceTrait},
        event::repository::EventCapacityRepositoryTrait,
    },
    di::RepositoryDeps,
    domain::errors::{BookingError, CapacityError},
    model::event::Event,
    repository::MemoryStore,
};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn two_and_three_against_two_remaining_seats() {
    let store = MemoryStore::new();
    let event = seed_event(&store, 10, 8).await;
    let services = services(RepositoryDeps::memory(store.clone()));

    let pair = {
        let booking = services.booking.clone();
        tokio::spawn(async move { booking.book(&booking_request(event.event_id, 2)).await })
    };
    let trio = {
        let booking = services.booking.clone();
        tokio::spawn(async move { booking.book(&booking_request(event.event_id, 3)).await })
    };

    let pair = pair.await.unwrap();
    let trio = trio.await.unwrap();

    assert!(pair.is_ok());
    match trio {
        Err(BookingError::Capacity(CapacityError::CapacityExceeded {
            requested,
            remaining,
            ..
        })) => {
            assert_eq!(requested, 3);
            assert!(remaining == 2 || remaining == 0);
        }
        other => panic!("expected CapacityExceeded, got {other:?}"),
    }

    assert_eq!(booked_count(&store, event.event_id).await, 10);
    assert_eq!(store.find_by_event(event.event_id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn over_capacity_reports_remaining_seats() {
    let store = MemoryStore::new();
    let event = seed_event(&store, 10, 8).await;
    let services = services(RepositoryDeps::memory(store.clone()));

    let err = services
        .booking
        .book(&booking_request(event.event_id, 3))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        BookingError::Capacity(CapacityError::CapacityExceeded { remaining: 2, .. })
    ));
    assert_eq!(booked_count(&store, event.event_id).await, 8);
    assert!(store.find_by_event(event.event_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn confirmed_booking_is_persisted() {
    let store = MemoryStore::new();
    let event = seed_event(&store, 4, 0).await;
    let services = services(RepositoryDeps::memory(store.clone()));

    let response = services
        .booking
        .book(&booking_request(event.event_id, 4))
        .await
        .unwrap();

    assert_eq!(response.data.status, "confirmed");
    assert_eq!(response.data.num_people, 4);
    assert_eq!(booked_count(&store, event.event_id).await, 4);
}

#[tokio::test]
async fn missing_event_and_bad_party_size_change_nothing() {
    let store = MemoryStore::new();
    let event = seed_event(&store, 5, 1).await;
    let services = services(RepositoryDeps::memory(store.clone()));

    assert!(matches!(
        services.booking.book(&booking_request(404, 1)).await,
        Err(BookingError::Capacity(CapacityError::EventNotFound(404)))
    ));
    assert!(matches!(
        services.booking.book(&booking_request(event.event_id, 0)).await,
        Err(BookingError::Capacity(CapacityError::InvalidQuantity(0)))
    ));
    assert_eq!(booked_count(&store, event.event_id).await, 1);
}

#[tokio::test]
async fn failed_booking_insert_releases_the_seats() {
    let store = MemoryStore::new();
    let event = seed_event(&store, 6, 2).await;

    let mut repos = RepositoryDeps::memory(store.clone());
    repos.booking_command = Arc::new(FailingBookings);
    let services = services(repos);

    let err = services
        .booking
        .book(&booking_request(event.event_id, 3))
        .await
        .unwrap_err();

    assert!(matches!(err, BookingError::PersistenceFailed(_)));
    assert_eq!(booked_count(&store, event.event_id).await, 2);
}

struct SlowCapacity {
    inner: MemoryStore,
    delay: Duration,
}

#[async_trait::async_trait]
impl EventCapacityRepositoryTrait for SlowCapacity {
    async fn adjust_booked_count(
        &self,
        event_id: i32,
        delta: i32,
    ) -> Result<AdjustOutcome<Event>, shared::errors::RepositoryError> {
        if delta > 0 {
            tokio::time::sleep(self.delay).await;
        }
        self.inner.adjust_booked_count(event_id, delta).await
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn timed_out_reservation_is_released_once_it_lands() {
    let store = MemoryStore::new();
    let event = seed_event(&store, 10, 0).await;

    let mut repos = RepositoryDeps::memory(store.clone());
    repos.event_capacity = Arc::new(SlowCapacity {
        inner: store.clone(),
        delay: Duration::from_millis(150),
    });
    let services = services_with_timeout(repos, Duration::from_millis(20));

    let err = services
        .booking
        .book(&booking_request(event.event_id, 4))
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::LedgerTimeout(id) if id == event.event_id));

    tokio::time::sleep(Duration::from_millis(400)).await;

    assert_eq!(booked_count(&store, event.event_id).await, 0);
    assert!(store.find_by_event(event.event_id).await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn booked_count_matches_successful_bookings() {
    let store = MemoryStore::new();
    let event = seed_event(&store, 25, 0).await;
    let services = services(RepositoryDeps::memory(store.clone()));

    let handles: Vec<_> = (0..30)
        .map(|i| {
            let booking = services.booking.clone();
            let seats = 1 + (i % 4);
            tokio::spawn(async move { booking.book(&booking_request(event.event_id, seats)).await })
        })
        .collect();

    let mut confirmed = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(response) => confirmed += response.data.num_people,
            Err(BookingError::Capacity(CapacityError::CapacityExceeded { .. })) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    let booked = booked_count(&store, event.event_id).await;
    assert!(booked <= 25);
    assert_eq!(booked, confirmed);

    let rows: i32 = store
        .find_by_event(event.event_id)
        .await
        .unwrap()
        .iter()
        .map(|b| b.num_people)
        .sum();
    assert_eq!(rows, confirmed);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn abandoned_booking_still_completes() {
    let store = MemoryStore::new();
    let event = seed_event(&store, 10, 0).await;

    let mut repos = RepositoryDeps::memory(store.clone());
    repos.booking_command = Arc::new(SlowBookings {
        inner: store.clone(),
        delay: Duration::from_millis(300),
    });
    let services = services(repos);

    // the caller gives up while the booking row is still being written
    let abandoned = tokio::time::timeout(
        Duration::from_millis(100),
        services.booking.book(&booking_request(event.event_id, 4)),
    )
    .await;
    assert!(abandoned.is_err());

    tokio::time::sleep(Duration::from_millis(600)).await;

    let bookings = store.find_by_event(event.event_id).await.unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].num_people, 4);
    assert_eq!(booked_count(&store, event.event_id).await, 4);
}
