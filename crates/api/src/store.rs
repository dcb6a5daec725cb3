//! In-memory snapshot of the entity collections.
//!
//! The dashboard's three collections (campaigns, ad sets, ads) are
//! fetched from the ads platform and replaced wholesale on every load
//! cycle -- there is no incremental merge. Between cycles the snapshot is
//! mutated only by optimistic commands, which the follow-up fetch then
//! reconciles. The store also owns the manual-refresh cooldown gate, the
//! idle tracking the poller consults, and the latest-wins guard for
//! interest searches.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, RwLock};

use chrono::Utc;

use adboard_core::command::{self, Command};
use adboard_core::model::{AdAccount, Snapshot};
use adboard_core::refresh::{RefreshGate, RefreshMode};
use adboard_core::types::Timestamp;
use adboard_meta::{AdsApi, DateRange, InterestMatch, MetaApiError};

/// Accounts and date range the dashboard is currently looking at; the
/// poller refreshes exactly this set.
#[derive(Debug, Default, Clone)]
pub struct WatchList {
    pub accounts: Vec<String>,
    pub range: Option<DateRange>,
}

#[derive(Debug, Default)]
struct InterestCache {
    applied_generation: u64,
    results: Vec<InterestMatch>,
}

pub struct SnapshotStore {
    snapshot: RwLock<Snapshot>,
    gate: Mutex<RefreshGate>,
    watched: Mutex<WatchList>,
    last_touch: Mutex<Option<Timestamp>>,
    search_generation: AtomicU64,
    interests: Mutex<InterestCache>,
}

impl SnapshotStore {
    pub fn new(cooldown_secs: i64) -> Self {
        Self {
            snapshot: RwLock::new(Snapshot::default()),
            gate: Mutex::new(RefreshGate::new(cooldown_secs)),
            watched: Mutex::new(WatchList::default()),
            last_touch: Mutex::new(None),
            search_generation: AtomicU64::new(0),
            interests: Mutex::new(InterestCache::default()),
        }
    }

    // -- Reads ---------------------------------------------------------------

    /// Clone the current snapshot for a client read. Records the touch
    /// that keeps the background poller active.
    pub fn read(&self) -> Snapshot {
        *self.last_touch.lock().unwrap() = Some(Utc::now());
        self.snapshot.read().unwrap().clone()
    }

    /// Whether a snapshot has ever been loaded. Does not count as a
    /// client touch, so health probes do not keep the poller active.
    pub fn loaded(&self) -> bool {
        self.snapshot.read().unwrap().loaded_at.is_some()
    }

    /// Whether any client has read the snapshot within `window_secs`.
    pub fn touched_within(&self, window_secs: i64) -> bool {
        match *self.last_touch.lock().unwrap() {
            Some(at) => Utc::now() - at < chrono::Duration::seconds(window_secs),
            None => false,
        }
    }

    /// True when the given account has never been loaded.
    pub fn needs_load(&self, account_id: &str) -> bool {
        let snap = self.snapshot.read().unwrap();
        snap.loaded_at.is_none() || lookup_account(&snap, account_id).is_none()
    }

    // -- Watch list / refresh gate -------------------------------------------

    /// Add an account (and remember the date range) to the watched set.
    ///
    /// Returns `true` when the date range changed: what was loaded before
    /// belongs to the old range, so the caller must run a load cycle.
    pub fn watch(&self, account_id: &str, range: Option<DateRange>) -> bool {
        let mut watched = self.watched.lock().unwrap();
        if !watched.accounts.iter().any(|a| a == account_id) {
            watched.accounts.push(account_id.to_string());
        }
        if range.is_some() && watched.range != range {
            watched.range = range;
            return true;
        }
        false
    }

    pub fn watched(&self) -> WatchList {
        self.watched.lock().unwrap().clone()
    }

    /// Decide how a manual refresh executes (cooldown-gated).
    pub fn refresh_mode(&self) -> RefreshMode {
        self.gate.lock().unwrap().request(Utc::now())
    }

    // -- Load cycle ----------------------------------------------------------

    /// Fetch all watched accounts' collections and replace the snapshot
    /// wholesale. The per-account fetches fan out concurrently and are
    /// joined before any local state changes, so a slow collection never
    /// publishes a partial snapshot.
    pub async fn load(&self, ads: &dyn AdsApi) -> Result<(), MetaApiError> {
        let WatchList { accounts, range } = self.watched();
        if accounts.is_empty() {
            return Ok(());
        }

        let fetches = accounts.iter().map(|account_id| async move {
            let (account, campaigns, ad_sets, ads_list) = futures::try_join!(
                ads.fetch_account(account_id),
                ads.fetch_campaigns(account_id, range),
                ads.fetch_ad_sets(account_id, range),
                ads.fetch_ads(account_id, range),
            )?;
            Ok::<_, MetaApiError>((account_id.clone(), account, campaigns, ad_sets, ads_list))
        });
        let results = futures::future::try_join_all(fetches).await?;

        let mut next = Snapshot {
            loaded_at: Some(Utc::now()),
            ..Default::default()
        };
        for (account_id, account, campaigns, ad_sets, ads_list) in results {
            next.accounts.insert(account_id, account);
            next.campaigns.extend(campaigns);
            next.ad_sets.extend(ad_sets);
            next.ads.extend(ads_list);
        }

        let mut snap = self.snapshot.write().unwrap();
        *snap = next;
        tracing::debug!(
            campaigns = snap.campaigns.len(),
            ad_sets = snap.ad_sets.len(),
            ads = snap.ads.len(),
            "Snapshot replaced"
        );
        Ok(())
    }

    // -- Optimistic commands --------------------------------------------------

    /// Apply a command optimistically, returning the inverse for
    /// rollback. `None` when the target entity is not in the snapshot.
    pub fn apply(&self, cmd: &Command) -> Option<Command> {
        let mut snap = self.snapshot.write().unwrap();
        command::apply(&mut snap, cmd)
    }

    // -- Interest search (latest-wins) ----------------------------------------

    /// Start an interest search, invalidating any in-flight lookup.
    pub fn begin_interest_search(&self) -> u64 {
        self.search_generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Record a finished lookup's results. Only the latest in-flight
    /// request's results are applied; stale ones are discarded. Returns
    /// whether the results were applied.
    pub fn complete_interest_search(&self, generation: u64, results: Vec<InterestMatch>) -> bool {
        if generation != self.search_generation.load(Ordering::SeqCst) {
            tracing::debug!(generation, "Discarding stale interest search result");
            return false;
        }
        let mut cache = self.interests.lock().unwrap();
        if generation <= cache.applied_generation {
            return false;
        }
        cache.applied_generation = generation;
        cache.results = results;
        true
    }

    pub fn interest_results(&self) -> Vec<InterestMatch> {
        self.interests.lock().unwrap().results.clone()
    }
}

/// Account lookup tolerant of the platform's `act_` prefix.
pub fn lookup_account<'a>(snapshot: &'a Snapshot, account_id: &str) -> Option<&'a AdAccount> {
    snapshot
        .accounts
        .get(account_id)
        .or_else(|| snapshot.accounts.get(account_id.trim_start_matches("act_")))
}
