//! Regression coverage for the in-memory store.

use chrono::{DateTime, Local, TimeZone};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::{Role, Username};

struct FixtureClock(DateTime<chrono::Utc>);

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<chrono::Utc> {
        self.0
    }
}

fn fixture_timestamp() -> DateTime<chrono::Utc> {
    chrono::Utc
        .with_ymd_and_hms(2026, 5, 10, 7, 15, 0)
        .single()
        .expect("valid fixture timestamp")
}

#[fixture]
fn store() -> InMemoryStore {
    InMemoryStore::new(Arc::new(FixtureClock(fixture_timestamp())))
}

fn new_user(name: &str, role: Role) -> NewUser {
    NewUser {
        username: Username::new(name).expect("valid username"),
        role,
        password_hash: format!("hash-of-{name}"),
    }
}

async fn register(store: &InMemoryStore, name: &str) -> UserId {
    store
        .create(&new_user(name, Role::User))
        .await
        .expect("create user")
        .user
        .id()
}

#[rstest]
#[tokio::test]
async fn create_assigns_ids_and_timestamps(store: InMemoryStore) {
    let first = store
        .create(&new_user("alice", Role::User))
        .await
        .expect("create alice");
    let second = store
        .create(&new_user("pat", Role::Provider))
        .await
        .expect("create pat");

    assert_eq!(first.user.id(), UserId::new(1));
    assert_eq!(second.user.id(), UserId::new(2));
    assert_eq!(second.user.role(), Role::Provider);
    assert_eq!(first.user.created_at(), fixture_timestamp());
    assert_eq!(first.password_hash, "hash-of-alice");
}

#[rstest]
#[tokio::test]
async fn usernames_are_unique(store: InMemoryStore) {
    store
        .create(&new_user("alice", Role::User))
        .await
        .expect("first registration");

    let err = store
        .create(&new_user("alice", Role::Provider))
        .await
        .expect_err("duplicate must fail");

    assert_eq!(err, UserPersistenceError::duplicate_username("alice"));
}

#[rstest]
#[tokio::test]
async fn find_by_username_is_exact(store: InMemoryStore) {
    register(&store, "alice").await;

    let found = store.find_by_username("alice").await.expect("lookup");
    let missing = store.find_by_username("Alice").await.expect("lookup");

    assert!(found.is_some());
    assert!(missing.is_none());
}

#[rstest]
#[tokio::test]
async fn inserts_require_an_existing_owner(store: InMemoryStore) {
    let draft = GuidanceDraft::new(Some("help"));

    let err = store
        .insert_guidance_request(UserId::new(99), &draft)
        .await
        .expect_err("unknown owner must fail");

    assert_eq!(err, BookingPersistenceError::missing_owner(99_i64));
}

#[rstest]
#[tokio::test]
async fn bookings_list_newest_first_and_only_for_owner(store: InMemoryStore) {
    let alice = register(&store, "alice").await;
    let bob = register(&store, "bob").await;
    for (owner, hours) in [(alice, 1), (bob, 2), (alice, 3)] {
        let draft = NurseBookingDraft::try_from_parts(Some("BTM"), Some(hours)).expect("valid");
        store
            .insert_nurse_booking(owner, &draft)
            .await
            .expect("insert booking");
    }

    let listed = store.list_nurse_bookings(alice).await.expect("list");

    let hours: Vec<i64> = listed.iter().map(|row| row.hours).collect();
    assert_eq!(hours, vec![3, 1]);
    assert!(listed.iter().all(|row| row.user_id == alice));
}

#[rstest]
#[tokio::test]
async fn addresses_list_in_insertion_order(store: InMemoryStore) {
    let alice = register(&store, "alice").await;
    for city in ["Pune", "Goa"] {
        let draft =
            AddressDraft::try_from_parts(None, Some("1 Road"), Some(city), None, None).expect("valid");
        store.insert_address(alice, &draft).await.expect("insert");
    }

    let cities: Vec<String> = store
        .list_addresses(alice)
        .await
        .expect("list")
        .into_iter()
        .map(|row| row.city)
        .collect();

    assert_eq!(cities, vec!["Pune".to_owned(), "Goa".to_owned()]);
}

#[rstest]
#[tokio::test]
async fn resolving_removes_request_from_pending_queue(store: InMemoryStore) {
    let alice = register(&store, "alice").await;
    let bob = register(&store, "bob").await;
    let first = store
        .insert_guidance_request(alice, &GuidanceDraft::new(None))
        .await
        .expect("insert");
    let second = store
        .insert_guidance_request(bob, &GuidanceDraft::new(Some("night shift advice")))
        .await
        .expect("insert");

    let pending: Vec<i64> = store
        .list_pending_guidance()
        .await
        .expect("pending")
        .iter()
        .map(|row| row.id)
        .collect();
    assert_eq!(pending, vec![second.id, first.id]);

    assert!(store.resolve_guidance(first.id).await.expect("resolve"));
    assert!(store.resolve_guidance(first.id).await.expect("resolve twice"));
    assert!(!store.resolve_guidance(404).await.expect("resolve unknown"));

    let pending = store.list_pending_guidance().await.expect("pending");
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, second.id);

    let own = store.list_guidance_requests(alice).await.expect("own");
    assert_eq!(own[0].status, GuidanceStatus::Resolved);
}

#[rstest]
#[tokio::test]
async fn deleting_a_user_cascades_to_owned_rows(store: InMemoryStore) {
    let alice = register(&store, "alice").await;
    let bob = register(&store, "bob").await;
    let subscription = SubscriptionDraft::try_from_parts(Some("day"), Some(1.0)).expect("valid");
    let ambulance = AmbulanceBookingDraft::try_from_parts(Some(2.0), Some("Gate 3")).expect("valid");
    for owner in [alice, bob] {
        store
            .insert_subscription(owner, &subscription)
            .await
            .expect("insert subscription");
        store
            .insert_ambulance_booking(owner, &ambulance)
            .await
            .expect("insert ambulance");
        store
            .insert_guidance_request(owner, &GuidanceDraft::new(None))
            .await
            .expect("insert guidance");
    }

    assert!(store.delete(alice).await.expect("delete"));
    assert!(!store.delete(alice).await.expect("delete twice"));

    assert!(store.list_subscriptions(alice).await.expect("list").is_empty());
    assert!(store.list_ambulance_bookings(alice).await.expect("list").is_empty());
    assert_eq!(store.list_subscriptions(bob).await.expect("list").len(), 1);
    assert_eq!(store.list_pending_guidance().await.expect("pending").len(), 1);
    assert!(store.find_by_username("alice").await.expect("lookup").is_none());
}
