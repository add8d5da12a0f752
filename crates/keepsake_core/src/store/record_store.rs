//! In-memory record store mirrored to a key-value backend.
//!
//! # Responsibility
//! - Own one app's entry collection and keep it in default order.
//! - Mirror the full collection to storage after every mutation.
//! - Notify subscribed observers synchronously on every mutation.
//!
//! # Invariants
//! - Entry ids are unique within `entries`.
//! - `entries` is always sorted by `SortOrder::NewestFirst`.
//! - Lookups that miss never mutate, persist or notify.

use crate::config::StoreConfig;
use crate::model::category::Category;
use crate::model::entry::{Entry, EntryDraft, EntryId};
use crate::query::{self, EntryFilter, SortOrder};
use crate::stats::{self, Frequency, Statistics};
use crate::storage::KeyValueStore;
use crate::store::error::{PersistError, StoreError, StoreResult};
use chrono::{DateTime, Local, NaiveDate, Utc};
use log::{debug, error, info, warn};
use std::collections::HashSet;
use std::time::Instant;

/// Change signal delivered to observers after a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    Added(EntryId),
    Updated(EntryId),
    Deleted(EntryId),
    FavoriteToggled { id: EntryId, is_favorite: bool },
    Cleared,
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&StoreEvent)>;
type Clock = Box<dyn Fn() -> DateTime<Utc>>;

/// Owner of one app's entry collection.
///
/// Construct one per app at startup and pass it to every consumer.
pub struct RecordStore<C: Category, S: KeyValueStore> {
    config: StoreConfig,
    storage: S,
    entries: Vec<Entry<C>>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
    clock: Clock,
}

impl<C: Category, S: KeyValueStore> RecordStore<C, S> {
    /// Loads the collection persisted under `config.storage_key`.
    ///
    /// A missing key yields an empty store. Duplicate ids in the payload keep
    /// their first occurrence. When entries without an id were assigned one,
    /// or duplicates were dropped, the repaired collection is written back
    /// once so ids stay stable across opens; a failed write-back is logged
    /// and does not fail the open.
    ///
    /// # Errors
    /// - `StoreError::Storage` when the backend read fails.
    /// - `StoreError::Decode` when the payload is not a valid entry array.
    pub fn open(storage: S, config: StoreConfig) -> StoreResult<Self> {
        let started_at = Instant::now();
        let key = config.storage_key.as_str();

        let bytes = storage.read(key).map_err(|err| {
            error!(
                "event=store_open module=store status=error key={} error_code=read_failed error={}",
                key, err
            );
            StoreError::Storage(err)
        })?;

        let (mut entries, assigned_ids) = match bytes {
            Some(bytes) => decode_entries::<C>(&bytes).map_err(|err| {
                error!(
                    "event=store_open module=store status=error key={} error_code=decode_failed error={}",
                    key, err
                );
                StoreError::Decode(err)
            })?,
            None => (Vec::new(), 0),
        };

        let loaded = entries.len();
        let mut seen = HashSet::with_capacity(loaded);
        entries.retain(|entry| seen.insert(entry.id));
        let dropped_duplicates = loaded - entries.len();
        if dropped_duplicates > 0 {
            warn!(
                "event=store_open module=store status=warn key={} dropped_duplicates={}",
                key, dropped_duplicates
            );
        }
        entries.sort_by(|a, b| SortOrder::NewestFirst.compare(a, b));

        info!(
            "event=store_open module=store status=ok key={} entries={} assigned_ids={} duration_ms={}",
            key,
            entries.len(),
            assigned_ids,
            started_at.elapsed().as_millis()
        );

        let mut store = Self {
            config,
            storage,
            entries,
            observers: Vec::new(),
            next_subscription: 0,
            clock: Box::new(Utc::now),
        };

        if assigned_ids > 0 || dropped_duplicates > 0 {
            match store.persist() {
                Ok(()) => info!(
                    "event=store_repair module=store status=ok key={} entries={}",
                    store.config.storage_key,
                    store.entries.len()
                ),
                Err(err) => warn!(
                    "event=store_repair module=store status=error key={} error={}",
                    store.config.storage_key, err
                ),
            }
        }

        Ok(store)
    }

    /// Opens with `StoreConfig::for_category::<C>()`.
    pub fn open_default(storage: S) -> StoreResult<Self> {
        Self::open(storage, StoreConfig::for_category::<C>())
    }

    /// Replaces the timestamp source used for `created_at`/`updated_at`.
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Consumes the store, returning its backend.
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Adds a new entry with a fresh id and returns that id.
    ///
    /// The store does not validate drafts; see `EntryDraft::validate`.
    ///
    /// # Errors
    /// - `StoreError::Persist` when mirroring fails. The entry is still added
    ///   and can be found through `entries()`.
    pub fn add(&mut self, draft: EntryDraft<C>) -> StoreResult<EntryId> {
        let entry = Entry::from_draft(draft, (self.clock)());
        let id = entry.id;
        self.entries.push(entry);
        self.sort();
        self.commit(StoreEvent::Added(id))?;
        Ok(id)
    }

    /// Replaces every mutable field of the entry with `entry.id`.
    ///
    /// # Errors
    /// - `StoreError::NotFound` when no entry has that id; nothing changes.
    /// - `StoreError::Persist` when mirroring fails after the update.
    pub fn update(&mut self, entry: &Entry<C>) -> StoreResult<()> {
        let now = (self.clock)();
        let target = self.find_mut(entry.id)?;
        target.replace_fields(entry, now);
        self.sort();
        self.commit(StoreEvent::Updated(entry.id))
    }

    /// Removes the entry with `id` and returns it.
    ///
    /// # Errors
    /// - `StoreError::NotFound` when no entry has that id; nothing changes.
    /// - `StoreError::Persist` when mirroring fails after the removal. The
    ///   entry is gone from memory either way.
    pub fn delete(&mut self, id: EntryId) -> StoreResult<Entry<C>> {
        let index = self.position(id)?;
        let removed = self.entries.remove(index);
        self.commit(StoreEvent::Deleted(id))?;
        Ok(removed)
    }

    /// Flips the favorite flag of `id` and returns the new value.
    pub fn toggle_favorite(&mut self, id: EntryId) -> StoreResult<bool> {
        let now = (self.clock)();
        let target = self.find_mut(id)?;
        target.is_favorite = !target.is_favorite;
        target.updated_at = now;
        let is_favorite = target.is_favorite;
        self.commit(StoreEvent::FavoriteToggled { id, is_favorite })?;
        Ok(is_favorite)
    }

    /// Removes every entry.
    pub fn clear(&mut self) -> StoreResult<()> {
        self.entries.clear();
        self.commit(StoreEvent::Cleared)
    }

    pub fn get(&self, id: EntryId) -> Option<&Entry<C>> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Every entry in default order (newest first).
    pub fn entries(&self) -> &[Entry<C>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries matching `filter`, in `order`.
    pub fn filtered(&self, filter: &EntryFilter<C>, order: SortOrder) -> Vec<&Entry<C>> {
        query::apply(&self.entries, filter, order)
    }

    /// Favorite entries, in `order`.
    pub fn favorites(&self, order: SortOrder) -> Vec<&Entry<C>> {
        self.filtered(&EntryFilter::new().favorites_only(), order)
    }

    /// Aggregates as seen on `today`.
    pub fn statistics(&self, today: NaiveDate) -> Statistics<C> {
        Statistics::compute(&self.entries, today, self.config.frequent_threshold)
    }

    /// Aggregates as seen on the local calendar day.
    pub fn statistics_today(&self) -> Statistics<C> {
        self.statistics(Local::now().date_naive())
    }

    /// Classifies how often `name` occurs among titles.
    pub fn classify(&self, name: &str) -> Frequency {
        stats::classify_name(&self.entries, name, self.config.frequent_threshold)
    }

    /// Registers an observer called after every mutation.
    pub fn subscribe(&mut self, observer: impl FnMut(&StoreEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns whether the subscription existed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(subscription, _)| *subscription != id);
        self.observers.len() != before
    }

    fn position(&self, id: EntryId) -> StoreResult<usize> {
        self.entries
            .iter()
            .position(|entry| entry.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    fn find_mut(&mut self, id: EntryId) -> StoreResult<&mut Entry<C>> {
        let index = self.position(id)?;
        Ok(&mut self.entries[index])
    }

    fn sort(&mut self) {
        self.entries
            .sort_by(|a, b| SortOrder::NewestFirst.compare(a, b));
    }

    /// Persists, then notifies. Observers run even when persisting fails,
    /// since the in-memory collection already changed.
    fn commit(&mut self, event: StoreEvent) -> StoreResult<()> {
        let persisted = self.persist();
        match &persisted {
            Ok(()) => debug!(
                "event=store_persist module=store status=ok key={} entries={}",
                self.config.storage_key,
                self.entries.len()
            ),
            Err(err) => warn!(
                "event=store_persist module=store status=error key={} entries={} error={}",
                self.config.storage_key,
                self.entries.len(),
                err
            ),
        }

        for (_, observer) in self.observers.iter_mut() {
            observer(&event);
        }

        persisted.map_err(StoreError::from)
    }

    fn persist(&mut self) -> Result<(), PersistError> {
        let bytes = serde_json::to_vec(&self.entries).map_err(PersistError::Encode)?;
        self.storage
            .write(&self.config.storage_key, &bytes)
            .map_err(PersistError::Write)
    }
}

/// Decodes a persisted entry array, counting items that carried no `id`.
fn decode_entries<C: Category>(bytes: &[u8]) -> serde_json::Result<(Vec<Entry<C>>, usize)> {
    let value: serde_json::Value = serde_json::from_slice(bytes)?;
    let missing_ids = value.as_array().map_or(0, |items| {
        items
            .iter()
            .filter(|item| item.get("id").map_or(true, serde_json::Value::is_null))
            .count()
    });
    let entries = serde_json::from_value(value)?;
    Ok((entries, missing_ids))
}
