/// In-memory birthday store used by tests
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use poise::serenity_prelude::UserId;

use super::BirthdayStore;
use crate::error::BotError;
use crate::models::{BirthDate, BirthdayRecord};

#[derive(Default)]
pub struct InMemoryStore {
    birthdays: Mutex<HashMap<UserId, BirthDate>>,
    /// Rows present in storage that no longer read as a valid date
    unreadable: Mutex<HashSet<UserId>>,
    unavailable: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following call fail as if the database were unreachable
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Store a row for `user_id` that `get` and `list_all` skip, like a
    /// hand-edited `31-04` in the database
    pub fn insert_unreadable(&self, user_id: UserId) {
        self.birthdays.lock().unwrap().remove(&user_id);
        self.unreadable.lock().unwrap().insert(user_id);
    }

    fn check_available(&self) -> Result<(), BotError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(BotError::Storage(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl BirthdayStore for InMemoryStore {
    async fn upsert(&self, user_id: UserId, date: BirthDate) -> Result<(), BotError> {
        self.check_available()?;
        self.unreadable.lock().unwrap().remove(&user_id);
        self.birthdays.lock().unwrap().insert(user_id, date);
        Ok(())
    }

    async fn exists(&self, user_id: UserId) -> Result<bool, BotError> {
        self.check_available()?;
        Ok(self.birthdays.lock().unwrap().contains_key(&user_id)
            || self.unreadable.lock().unwrap().contains(&user_id))
    }

    async fn get(&self, user_id: UserId) -> Result<Option<BirthdayRecord>, BotError> {
        self.check_available()?;
        let birthdays = self.birthdays.lock().unwrap();
        Ok(birthdays
            .get(&user_id)
            .map(|&date| BirthdayRecord { user_id, date }))
    }

    async fn list_all(&self) -> Result<Vec<BirthdayRecord>, BotError> {
        self.check_available()?;
        let birthdays = self.birthdays.lock().unwrap();
        Ok(birthdays
            .iter()
            .map(|(&user_id, &date)| BirthdayRecord { user_id, date })
            .collect())
    }

    async fn delete(&self, user_id: UserId) -> Result<bool, BotError> {
        self.check_available()?;
        let removed = self.birthdays.lock().unwrap().remove(&user_id).is_some();
        let removed_unreadable = self.unreadable.lock().unwrap().remove(&user_id);
        Ok(removed || removed_unreadable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn date(input: &str) -> BirthDate {
        input.parse().unwrap()
    }

    #[tokio::test]
    async fn test_upsert_twice_keeps_one_record() {
        let store = InMemoryStore::new();
        let user = UserId::new(42);

        store.upsert(user, date("10-02")).await.unwrap();
        store.upsert(user, date("10-02")).await.unwrap();

        let all = store.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].date, date("10-02"));
    }

    #[tokio::test]
    async fn test_upsert_replaces_existing_date() {
        let store = InMemoryStore::new();
        let user = UserId::new(42);

        store.upsert(user, date("10-02")).await.unwrap();
        store.upsert(user, date("11-03")).await.unwrap();

        let record = store.get(user).await.unwrap().unwrap();
        assert_eq!(record.date, date("11-03"));
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_an_error() {
        let store = InMemoryStore::new();
        assert!(!store.delete(UserId::new(7)).await.unwrap());

        store.upsert(UserId::new(7), date("01-01")).await.unwrap();
        assert!(store.delete(UserId::new(7)).await.unwrap());
        assert!(store.get(UserId::new(7)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_upserts_resolve_to_one_record() {
        let store = Arc::new(InMemoryStore::new());
        let user = UserId::new(99);

        let first = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.upsert(user, date("01-05")).await })
        };
        let second = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.upsert(user, date("02-06")).await })
        };
        first.await.unwrap().unwrap();
        second.await.unwrap().unwrap();

        let all = store.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert!(all[0].date == date("01-05") || all[0].date == date("02-06"));

        // A later write always wins
        store.upsert(user, date("03-07")).await.unwrap();
        assert_eq!(store.get(user).await.unwrap().unwrap().date, date("03-07"));
    }

    #[tokio::test]
    async fn test_unavailable_store_fails_with_storage_error() {
        let store = InMemoryStore::new();
        store.set_unavailable(true);

        assert!(matches!(
            store.list_all().await,
            Err(BotError::Storage(_))
        ));
        assert!(matches!(
            store.upsert(UserId::new(1), date("01-01")).await,
            Err(BotError::Storage(_))
        ));
    }
}
