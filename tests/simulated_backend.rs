use parkctl::backend::{BackendError, ParkingBackend, SimulatedBackend};
use parkctl::core::models::{SpotStatus, now_ms};

async fn first_spot_id(backend: &SimulatedBackend) -> String {
    backend.list().await.unwrap()[0].id.clone()
}

#[tokio::test]
async fn seeded_spots_start_free() {
    let backend = SimulatedBackend::seeded(5);
    let spots = backend.list().await.unwrap();

    assert_eq!(spots.len(), 5);
    assert!(spots.iter().all(|spot| spot.status == SpotStatus::Free));
    assert_eq!(spots[0].number, 1);
    assert_eq!(spots[4].number, 5);
}

#[tokio::test]
async fn reserve_sets_holder_and_expiry() {
    let backend = SimulatedBackend::seeded(3);
    let id = first_spot_id(&backend).await;

    let before = now_ms();
    let spot = backend.reserve(&id, "Alice", 30).await.unwrap();
    let after = now_ms();

    assert_eq!(spot.status, SpotStatus::Reserved);
    assert_eq!(spot.reserved_by.as_deref(), Some("Alice"));

    let until = spot.reserved_until.unwrap();
    assert!(until >= before + 30 * 60_000);
    assert!(until <= after + 30 * 60_000);
}

#[tokio::test]
async fn blank_name_reserves_as_guest() {
    let backend = SimulatedBackend::seeded(1);
    let id = first_spot_id(&backend).await;

    let spot = backend.reserve(&id, "   ", 10).await.unwrap();
    assert_eq!(spot.reserved_by.as_deref(), Some("Guest"));
}

#[tokio::test]
async fn full_lifecycle_reserve_occupy_free() {
    let backend = SimulatedBackend::seeded(1);
    let id = first_spot_id(&backend).await;

    let reserved = backend.reserve(&id, "Bob", 15).await.unwrap();
    assert_eq!(reserved.status, SpotStatus::Reserved);

    let occupied = backend.occupy(&id).await.unwrap();
    assert_eq!(occupied.status, SpotStatus::Occupied);
    // Expiry is cleared once the reservation is consumed.
    assert!(occupied.reserved_until.is_none());

    let freed = backend.free(&id).await.unwrap();
    assert_eq!(freed.status, SpotStatus::Free);
    assert!(freed.reserved_by.is_none());
}

#[tokio::test]
async fn early_cancel_frees_a_reservation() {
    let backend = SimulatedBackend::seeded(1);
    let id = first_spot_id(&backend).await;

    backend.reserve(&id, "Carol", 45).await.unwrap();
    let freed = backend.free(&id).await.unwrap();

    assert_eq!(freed.status, SpotStatus::Free);
    assert!(freed.reserved_until.is_none());
}

#[tokio::test]
async fn reserve_rejected_unless_free() {
    let backend = SimulatedBackend::seeded(1);
    let id = first_spot_id(&backend).await;

    backend.reserve(&id, "Dave", 30).await.unwrap();

    let second = backend.reserve(&id, "Eve", 30).await;
    assert!(matches!(second, Err(BackendError::Rejected(_))));

    // The loser's view after a re-fetch still shows the winner.
    let spots = backend.list().await.unwrap();
    assert_eq!(spots[0].reserved_by.as_deref(), Some("Dave"));
}

#[tokio::test]
async fn occupy_rejected_from_free_and_occupied() {
    let backend = SimulatedBackend::seeded(1);
    let id = first_spot_id(&backend).await;

    assert!(matches!(
        backend.occupy(&id).await,
        Err(BackendError::Rejected(_))
    ));

    backend.reserve(&id, "Frank", 30).await.unwrap();
    backend.occupy(&id).await.unwrap();

    // Double occupy is refused by the server; the client surfaces it.
    assert!(matches!(
        backend.occupy(&id).await,
        Err(BackendError::Rejected(_))
    ));
}

#[tokio::test]
async fn double_free_is_rejected_without_changing_state() {
    let backend = SimulatedBackend::seeded(1);
    let id = first_spot_id(&backend).await;

    backend.reserve(&id, "Grace", 30).await.unwrap();
    backend.free(&id).await.unwrap();

    let second = backend.free(&id).await;
    assert!(matches!(second, Err(BackendError::Rejected(_))));

    let spots = backend.list().await.unwrap();
    assert_eq!(spots[0].status, SpotStatus::Free);
}

#[tokio::test]
async fn unknown_spot_is_not_found() {
    let backend = SimulatedBackend::seeded(1);

    assert!(matches!(
        backend.occupy("no-such-id").await,
        Err(BackendError::NotFound(_))
    ));
}

#[tokio::test]
async fn zero_minutes_clamps_to_one() {
    let backend = SimulatedBackend::seeded(1);
    let id = first_spot_id(&backend).await;

    let spot = backend.reserve(&id, "Heidi", 0).await.unwrap();
    let until = spot.reserved_until.unwrap();
    assert!(until > now_ms());
    assert!(until <= now_ms() + 60_000);
}

#[tokio::test]
async fn expired_reservation_reads_back_as_free() {
    use parkctl::core::models::ParkingSpot;

    let backend = SimulatedBackend::with_spots(vec![ParkingSpot {
        id: "stale".into(),
        number: 7,
        status: SpotStatus::Reserved,
        reserved_by: Some("Ivan".into()),
        reserved_until: Some(now_ms() - 1_000),
    }]);

    let spots = backend.list().await.unwrap();
    assert_eq!(spots[0].status, SpotStatus::Free);
    assert!(spots[0].reserved_by.is_none());
    assert!(spots[0].reserved_until.is_none());
}
