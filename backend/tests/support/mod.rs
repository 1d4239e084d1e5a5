//! In-memory driven adapters shared by the integration suites.
//!
//! [`MemoryStore`] keeps users and naps behind one mutex and derives the
//! daily duration and duration-rating aggregates from the stored naps, the
//! same way the database views do.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use napchart::domain::ports::{
    DateDurationRepository, DateDurationRepositoryError, DurationRatingRepository,
    DurationRatingRepositoryError, NapRepository, NapRepositoryError, UserDirectory,
    UserDirectoryError,
};
use napchart::domain::{
    DailyDurationSummary, DurationRating, Login, Nap, NapDetails, NapId, ResolvedNap, User,
};
use pagination::{Page, PageRequest};

#[derive(Default)]
struct State {
    users: BTreeSet<String>,
    naps: BTreeMap<i64, Nap>,
    next_id: i64,
}

/// Users and naps held in process memory.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

pub fn login(raw: &str) -> Login {
    Login::new(raw).expect("valid login")
}

pub fn at(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .expect("valid timestamp")
        .with_timezone(&Utc)
}

fn paginate<T: Clone>(items: &[T], page: PageRequest) -> Page<T> {
    let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
    let slice = items
        .iter()
        .skip(offset)
        .take(page.size() as usize)
        .cloned()
        .collect();
    Page::new(slice, items.len() as u64, page)
}

impl MemoryStore {
    /// A store that knows the given logins.
    pub fn with_users<'a>(logins: impl IntoIterator<Item = &'a str>) -> Arc<Self> {
        let store = Self::default();
        store
            .lock()
            .users
            .extend(logins.into_iter().map(str::to_owned));
        Arc::new(store)
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().expect("memory store poisoned")
    }

    /// Insert a nap directly, bypassing access control.
    pub fn seed(&self, owner: &str, details: NapDetails) -> Nap {
        let mut state = self.lock();
        state.next_id += 1;
        let id = NapId::new(state.next_id).expect("positive id");
        let nap = Nap::new(id, login(owner), details);
        state.naps.insert(id.get(), nap.clone());
        nap
    }

    pub fn stored(&self, id: NapId) -> Option<Nap> {
        self.lock().naps.get(&id.get()).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().naps.len()
    }
}

#[async_trait]
impl NapRepository for MemoryStore {
    async fn save(&self, nap: &ResolvedNap) -> Result<Nap, NapRepositoryError> {
        let mut state = self.lock();
        if !state.users.contains(nap.owner().as_ref()) {
            return Err(NapRepositoryError::unknown_owner(nap.owner().as_ref()));
        }
        let id = match nap.id() {
            Some(id) if state.naps.contains_key(&id.get()) => id,
            Some(id) => return Err(NapRepositoryError::missing(id.get())),
            None => {
                state.next_id += 1;
                NapId::new(state.next_id).map_err(|err| NapRepositoryError::query(err.to_string()))?
            }
        };
        let stored = Nap::new(id, nap.owner().clone(), nap.details().clone());
        state.naps.insert(id.get(), stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: NapId) -> Result<Option<Nap>, NapRepositoryError> {
        Ok(self.stored(id))
    }

    async fn find_all(&self, page: PageRequest) -> Result<Page<Nap>, NapRepositoryError> {
        let naps: Vec<Nap> = self.lock().naps.values().cloned().collect();
        Ok(paginate(&naps, page))
    }

    async fn find_by_owner(
        &self,
        owner: &Login,
        page: PageRequest,
    ) -> Result<Page<Nap>, NapRepositoryError> {
        let naps: Vec<Nap> = self
            .lock()
            .naps
            .values()
            .filter(|nap| nap.owner() == owner)
            .cloned()
            .collect();
        Ok(paginate(&naps, page))
    }

    async fn delete_by_id(&self, id: NapId) -> Result<(), NapRepositoryError> {
        self.lock().naps.remove(&id.get());
        Ok(())
    }
}

#[async_trait]
impl UserDirectory for MemoryStore {
    async fn find_by_login(&self, login: &Login) -> Result<Option<User>, UserDirectoryError> {
        let state = self.lock();
        Ok(state
            .users
            .iter()
            .position(|known| known == login.as_ref())
            .map(|index| User::new(index as i64 + 1, login.clone())))
    }
}

#[async_trait]
impl DateDurationRepository for MemoryStore {
    async fn find_by_owner_login(
        &self,
        login: &Login,
        page: PageRequest,
    ) -> Result<Page<DailyDurationSummary>, DateDurationRepositoryError> {
        let mut totals: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for nap in self.lock().naps.values().filter(|nap| nap.owner() == login) {
            if let Some(start) = nap.details().start {
                *totals.entry(start.date_naive()).or_default() +=
                    nap.details().duration.unwrap_or_default();
            }
        }
        let summaries = totals
            .into_iter()
            .map(|(date, total)| {
                DailyDurationSummary::new(
                    DailyDurationSummary::key_for(login, date),
                    date,
                    total,
                    login.clone(),
                )
                .map_err(|err| DateDurationRepositoryError::query(err.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(paginate(&summaries, page))
    }
}

#[async_trait]
impl DurationRatingRepository for MemoryStore {
    async fn find_all(
        &self,
        page: PageRequest,
    ) -> Result<Page<DurationRating>, DurationRatingRepositoryError> {
        let mut buckets: BTreeMap<i32, (f64, u32)> = BTreeMap::new();
        for details in self.lock().naps.values().map(Nap::details) {
            if let (Some(duration), Some(rating)) = (details.duration, details.rating) {
                let bucket = buckets.entry(duration.round() as i32).or_default();
                bucket.0 += f64::from(rating);
                bucket.1 += 1;
            }
        }
        let ratings: Vec<DurationRating> = buckets
            .into_iter()
            .map(|(hours, (sum, count))| DurationRating::new(hours, sum / f64::from(count)))
            .collect();
        Ok(paginate(&ratings, page))
    }
}
