//! In-process store implementing the credential and booking repositories.
//!
//! Used when no `DATABASE_URL` is configured and by the HTTP tests, which
//! build an isolated store per test. Semantics mirror the PostgreSQL schema:
//! per-table monotonically increasing ids, a unique username, owner foreign
//! keys and cascade delete.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{
    BookingPersistenceError, BookingRepository, UserPersistenceError, UserRepository,
};
use crate::domain::{
    Address, AddressDraft, AmbulanceBooking, AmbulanceBookingDraft, GuidanceDraft,
    GuidanceRequest, GuidanceStatus, NewUser, NurseBooking, NurseBookingDraft, Subscription,
    SubscriptionDraft, User, UserAccount, UserId,
};

/// Identity-column stand-in: the next id handed out for one table.
#[derive(Debug, Default)]
struct Sequence(i64);

impl Sequence {
    fn next(&mut self) -> i64 {
        self.0 += 1;
        self.0
    }
}

#[derive(Debug, Default)]
struct Tables {
    users: Vec<UserAccount>,
    addresses: Vec<Address>,
    nurse_bookings: Vec<NurseBooking>,
    subscriptions: Vec<Subscription>,
    ambulance_bookings: Vec<AmbulanceBooking>,
    guidance_requests: Vec<GuidanceRequest>,
    user_ids: Sequence,
    address_ids: Sequence,
    nurse_booking_ids: Sequence,
    subscription_ids: Sequence,
    ambulance_booking_ids: Sequence,
    guidance_request_ids: Sequence,
}

impl Tables {
    fn require_owner(&self, owner: UserId) -> Result<(), BookingPersistenceError> {
        if self.users.iter().any(|account| account.user.id() == owner) {
            Ok(())
        } else {
            Err(BookingPersistenceError::missing_owner(owner.get()))
        }
    }
}

/// Rows owned by `owner`, newest (highest id) first.
fn newest_first<T: Clone>(rows: &[T], owner: UserId, owner_of: impl Fn(&T) -> UserId) -> Vec<T> {
    rows.iter()
        .rev()
        .filter(|row| owner_of(row) == owner)
        .cloned()
        .collect()
}

/// Mutex-guarded in-memory implementation of both repository ports.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use carebook::outbound::memory::InMemoryStore;
/// use mockable::DefaultClock;
///
/// let store = InMemoryStore::new(Arc::new(DefaultClock));
/// # let _ = store;
/// ```
pub struct InMemoryStore {
    tables: Mutex<Tables>,
    clock: Arc<dyn Clock>,
}

impl InMemoryStore {
    /// Create an empty store stamping rows with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            tables: Mutex::new(Tables::default()),
            clock,
        }
    }

    // A panic while holding the lock cannot leave a row half written, so a
    // poisoned guard is still consistent.
    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: &NewUser) -> Result<UserAccount, UserPersistenceError> {
        let mut tables = self.lock();
        if tables
            .users
            .iter()
            .any(|account| account.user.username() == &user.username)
        {
            return Err(UserPersistenceError::duplicate_username(
                user.username.as_ref(),
            ));
        }
        let id = UserId::new(tables.user_ids.next());
        let account = UserAccount {
            user: User::new(id, user.username.clone(), user.role, self.clock.utc()),
            password_hash: user.password_hash.clone(),
        };
        tables.users.push(account.clone());
        Ok(account)
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|account| account.user.username().as_ref() == username)
            .cloned())
    }

    async fn delete(&self, id: UserId) -> Result<bool, UserPersistenceError> {
        let mut tables = self.lock();
        let before = tables.users.len();
        tables.users.retain(|account| account.user.id() != id);
        if tables.users.len() == before {
            return Ok(false);
        }
        tables.addresses.retain(|row| row.user_id != id);
        tables.nurse_bookings.retain(|row| row.user_id != id);
        tables.subscriptions.retain(|row| row.user_id != id);
        tables.ambulance_bookings.retain(|row| row.user_id != id);
        tables.guidance_requests.retain(|row| row.user_id != id);
        Ok(true)
    }
}

#[async_trait]
impl BookingRepository for InMemoryStore {
    async fn insert_address(
        &self,
        owner: UserId,
        draft: &AddressDraft,
    ) -> Result<Address, BookingPersistenceError> {
        let mut tables = self.lock();
        tables.require_owner(owner)?;
        let row = Address {
            id: tables.address_ids.next(),
            user_id: owner,
            label: draft.label().map(str::to_owned),
            line1: draft.line1().to_owned(),
            city: draft.city().to_owned(),
            state: draft.state().map(str::to_owned),
            pincode: draft.pincode().map(str::to_owned),
            created_at: self.clock.utc(),
        };
        tables.addresses.push(row.clone());
        Ok(row)
    }

    async fn list_addresses(&self, owner: UserId) -> Result<Vec<Address>, BookingPersistenceError> {
        Ok(self
            .lock()
            .addresses
            .iter()
            .filter(|row| row.user_id == owner)
            .cloned()
            .collect())
    }

    async fn insert_nurse_booking(
        &self,
        owner: UserId,
        draft: &NurseBookingDraft,
    ) -> Result<NurseBooking, BookingPersistenceError> {
        let mut tables = self.lock();
        tables.require_owner(owner)?;
        let row = NurseBooking {
            id: tables.nurse_booking_ids.next(),
            user_id: owner,
            area: draft.area().to_owned(),
            hours: draft.hours(),
            rate_per_hour: draft.rate_per_hour(),
            total: draft.total(),
            created_at: self.clock.utc(),
        };
        tables.nurse_bookings.push(row.clone());
        Ok(row)
    }

    async fn list_nurse_bookings(
        &self,
        owner: UserId,
    ) -> Result<Vec<NurseBooking>, BookingPersistenceError> {
        Ok(newest_first(&self.lock().nurse_bookings, owner, |row| {
            row.user_id
        }))
    }

    async fn insert_subscription(
        &self,
        owner: UserId,
        draft: &SubscriptionDraft,
    ) -> Result<Subscription, BookingPersistenceError> {
        let mut tables = self.lock();
        tables.require_owner(owner)?;
        let row = Subscription {
            id: tables.subscription_ids.next(),
            user_id: owner,
            kind: draft.kind(),
            days: draft.days(),
            rate_per_day: draft.rate_per_day(),
            total: draft.total(),
            created_at: self.clock.utc(),
        };
        tables.subscriptions.push(row.clone());
        Ok(row)
    }

    async fn list_subscriptions(
        &self,
        owner: UserId,
    ) -> Result<Vec<Subscription>, BookingPersistenceError> {
        Ok(newest_first(&self.lock().subscriptions, owner, |row| {
            row.user_id
        }))
    }

    async fn insert_ambulance_booking(
        &self,
        owner: UserId,
        draft: &AmbulanceBookingDraft,
    ) -> Result<AmbulanceBooking, BookingPersistenceError> {
        let mut tables = self.lock();
        tables.require_owner(owner)?;
        let row = AmbulanceBooking {
            id: tables.ambulance_booking_ids.next(),
            user_id: owner,
            distance_km: draft.distance_km(),
            pickup_address: draft.pickup_address().to_owned(),
            rate_per_km: draft.rate_per_km(),
            total: draft.total(),
            created_at: self.clock.utc(),
        };
        tables.ambulance_bookings.push(row.clone());
        Ok(row)
    }

    async fn list_ambulance_bookings(
        &self,
        owner: UserId,
    ) -> Result<Vec<AmbulanceBooking>, BookingPersistenceError> {
        Ok(newest_first(&self.lock().ambulance_bookings, owner, |row| {
            row.user_id
        }))
    }

    async fn insert_guidance_request(
        &self,
        owner: UserId,
        draft: &GuidanceDraft,
    ) -> Result<GuidanceRequest, BookingPersistenceError> {
        let mut tables = self.lock();
        tables.require_owner(owner)?;
        let row = GuidanceRequest {
            id: tables.guidance_request_ids.next(),
            user_id: owner,
            note: draft.note().map(str::to_owned),
            status: GuidanceStatus::Pending,
            created_at: self.clock.utc(),
        };
        tables.guidance_requests.push(row.clone());
        Ok(row)
    }

    async fn list_guidance_requests(
        &self,
        owner: UserId,
    ) -> Result<Vec<GuidanceRequest>, BookingPersistenceError> {
        Ok(newest_first(&self.lock().guidance_requests, owner, |row| {
            row.user_id
        }))
    }

    async fn list_pending_guidance(&self) -> Result<Vec<GuidanceRequest>, BookingPersistenceError> {
        Ok(self
            .lock()
            .guidance_requests
            .iter()
            .rev()
            .filter(|row| row.status == GuidanceStatus::Pending)
            .cloned()
            .collect())
    }

    async fn resolve_guidance(&self, id: i64) -> Result<bool, BookingPersistenceError> {
        let mut tables = self.lock();
        match tables.guidance_requests.iter_mut().find(|row| row.id == id) {
            Some(row) => {
                row.status = GuidanceStatus::Resolved;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests;
