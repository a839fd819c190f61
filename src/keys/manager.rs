// Copyright 2025 Ojima Abraham
// SPDX-License-Identifier: Apache-2.0

//! Key lifecycle and access grant operations.

use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use crate::config::KeyManagerConfig;
use crate::context::TxContext;
use crate::storage::{crypto_key_key, key_access_key, Key, LedgerStore, StoreError, Value};

use super::error::KeyError;
use super::model::{expiry_after_days, AccessType, CryptoKey, KeyAccess, KeyStatus, KeyType};
use super::rotation::RotationOutcome;

/// Creates keys, manages grants, and drives the key status state machine.
///
/// Every operation reads what it needs fresh from the store and writes
/// whole records; nothing is cached between calls. Apart from
/// [`rotate_key`](Self::rotate_key), every mutating operation is a single
/// write that either happens completely or not at all.
pub struct KeyManager<S: LedgerStore + ?Sized> {
    store: Arc<S>,
    config: KeyManagerConfig,
}

impl<S: LedgerStore + ?Sized> KeyManager<S> {
    /// Creates a key manager with default configuration.
    pub fn new(store: Arc<S>) -> Self {
        Self::with_config(store, KeyManagerConfig::default())
    }

    /// Creates a key manager with the given configuration.
    pub fn with_config(store: Arc<S>, config: KeyManagerConfig) -> Self {
        Self { store, config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &KeyManagerConfig {
        &self.config
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Creates a new active key.
    ///
    /// The id is `<caller_id>-<first 8 chars of the transaction id>`.
    /// `owner_ids_json` must be a JSON array of strings; duplicates are
    /// kept as given. Fails with [`KeyError::KeyExists`] if the id is
    /// already in the ledger, whatever that record's status.
    #[instrument(skip(self, ctx, owner_ids_json), fields(tx_id = %ctx.tx_id()))]
    pub fn generate_key(
        &self,
        ctx: &dyn TxContext,
        caller_id: &str,
        key_type: &str,
        algorithm: &str,
        owner_ids_json: &str,
        expiration_days: u32,
    ) -> Result<CryptoKey, KeyError> {
        let key_type: KeyType = key_type.parse()?;
        let owner_ids: Vec<String> = serde_json::from_str(owner_ids_json)
            .map_err(|e| KeyError::decode("owner ids", e))?;

        let now = ctx.now();
        let key = CryptoKey {
            id: format!("{}-{}", caller_id, ctx.tx_id_prefix()),
            key_type,
            algorithm: algorithm.to_string(),
            status: KeyStatus::Active,
            owner_ids,
            created_at: now,
            activated_at: now,
            expires_at: expiry_after_days(now, expiration_days),
            revoked_at: 0,
            metadata: String::new(),
        };

        self.require_vacant(&key.id)?;
        self.put(crypto_key_key(&key.id), key.to_value()?)?;

        info!(
            key_id = %key.id,
            key_type = %key.key_type,
            algorithm = %key.algorithm,
            owners = key.owner_ids.len(),
            expires_at = key.expires_at,
            "Key generated"
        );
        Ok(key)
    }

    /// Grants `user_id` access to an active key, replacing any earlier
    /// grant for the same pair.
    #[instrument(skip(self, ctx), fields(tx_id = %ctx.tx_id()))]
    pub fn grant_key_access(
        &self,
        ctx: &dyn TxContext,
        key_id: &str,
        user_id: &str,
        access_type: &str,
        granted_by: &str,
        expiration_days: u32,
    ) -> Result<KeyAccess, KeyError> {
        let access_type: AccessType = access_type.parse()?;

        let key = self.load_key(key_id)?;
        Self::require_active(&key, "grant access")?;

        let now = ctx.now();
        let access = KeyAccess {
            key_id: key_id.to_string(),
            user_id: user_id.to_string(),
            access_type,
            granted_at: now,
            expires_at: expiry_after_days(now, expiration_days),
            granted_by: granted_by.to_string(),
        };

        self.put(key_access_key(key_id, user_id), access.to_value()?)?;

        info!(
            key_id = %key_id,
            user_id = %user_id,
            access_type = %access.access_type,
            granted_by = %granted_by,
            expires_at = access.expires_at,
            "Key access granted"
        );
        Ok(access)
    }

    /// Removes the grant of `key_id` to `user_id`.
    ///
    /// Fails with [`KeyError::GrantNotFound`] without deleting anything if
    /// no grant exists. The key's own status is not consulted: grants on
    /// rotated or revoked keys can always be cleaned up.
    #[instrument(skip(self))]
    pub fn revoke_key_access(&self, key_id: &str, user_id: &str) -> Result<(), KeyError> {
        let access_key = key_access_key(key_id, user_id);

        if self.store.get(&access_key)?.is_none() {
            warn!(key_id = %key_id, user_id = %user_id, "No grant to revoke");
            return Err(KeyError::GrantNotFound {
                key_id: key_id.to_string(),
                user_id: user_id.to_string(),
            });
        }

        self.store.delete(&access_key).map_err(|e| {
            error!(key = %access_key, error = %e, "Failed to delete grant");
            e
        })?;

        info!(key_id = %key_id, user_id = %user_id, "Key access revoked");
        Ok(())
    }

    /// Replaces an active key with a new active key.
    ///
    /// The predecessor is written back as `rotated` (its timestamps
    /// unchanged), then the successor `<key_id>-<first 8 chars of the
    /// transaction id>` is written with the predecessor's type, algorithm
    /// and owners and an expiry from the configured
    /// [`RotationExpiryPolicy`](super::RotationExpiryPolicy).
    ///
    /// Fails with [`KeyError::KeyExists`] before any write if the
    /// successor id is already taken.
    ///
    /// The two writes are not atomic. If the first fails nothing changed
    /// and [`KeyError::Store`] is returned. If the second fails the
    /// predecessor stays `rotated` without a successor and
    /// [`KeyError::PartialRotation`] is returned.
    #[instrument(skip(self, ctx), fields(tx_id = %ctx.tx_id()))]
    pub fn rotate_key(&self, ctx: &dyn TxContext, key_id: &str) -> Result<RotationOutcome, KeyError> {
        let key = self.load_key(key_id)?;
        Self::require_active(&key, "rotate")?;

        let now = ctx.now();
        let successor = CryptoKey {
            id: format!("{}-{}", key_id, ctx.tx_id_prefix()),
            key_type: key.key_type,
            algorithm: key.algorithm.clone(),
            status: KeyStatus::Active,
            owner_ids: key.owner_ids.clone(),
            created_at: now,
            activated_at: now,
            expires_at: self.config.rotation_expiry.successor_expiry(&key, now),
            revoked_at: 0,
            metadata: String::new(),
        };
        let successor_value = successor.to_value()?;
        self.require_vacant(&successor.id)?;

        let retired = CryptoKey {
            status: KeyStatus::Rotated,
            ..key
        };

        // Phase one: retire the predecessor
        self.put(crypto_key_key(&retired.id), retired.to_value()?)?;

        // Phase two: activate the successor
        if let Err(source) = self.store.put(crypto_key_key(&successor.id), successor_value) {
            error!(
                retired_id = %retired.id,
                successor_id = %successor.id,
                error = %source,
                "Rotation interrupted after retiring key"
            );
            return Err(KeyError::PartialRotation {
                retired_id: retired.id,
                successor_id: successor.id,
                source,
            });
        }

        info!(
            retired_id = %retired.id,
            successor_id = %successor.id,
            expires_at = successor.expires_at,
            "Key rotated"
        );
        Ok(RotationOutcome { retired, successor })
    }

    /// Revokes an active key, stamping `revoked_at`.
    ///
    /// Existing grants are left in place; they become unusable because
    /// grants can only be issued for and used with active keys.
    #[instrument(skip(self, ctx), fields(tx_id = %ctx.tx_id()))]
    pub fn revoke_key(&self, ctx: &dyn TxContext, key_id: &str) -> Result<CryptoKey, KeyError> {
        let key = self.load_key(key_id)?;
        Self::require_active(&key, "revoke")?;

        let revoked = CryptoKey {
            status: KeyStatus::Revoked,
            revoked_at: ctx.now(),
            ..key
        };

        self.put(crypto_key_key(&revoked.id), revoked.to_value()?)?;

        info!(key_id = %revoked.id, revoked_at = revoked.revoked_at, "Key revoked");
        Ok(revoked)
    }

    /// Reads a key record.
    pub fn get_key(&self, key_id: &str) -> Result<CryptoKey, KeyError> {
        self.load_key(key_id)
    }

    /// Reads the grant of `key_id` to `user_id`.
    pub fn get_key_access(&self, key_id: &str, user_id: &str) -> Result<KeyAccess, KeyError> {
        match self.store.get(&key_access_key(key_id, user_id))? {
            Some(value) => KeyAccess::from_value(&value),
            None => Err(KeyError::GrantNotFound {
                key_id: key_id.to_string(),
                user_id: user_id.to_string(),
            }),
        }
    }

    fn load_key(&self, key_id: &str) -> Result<CryptoKey, KeyError> {
        match self.store.get(&crypto_key_key(key_id))? {
            Some(value) => CryptoKey::from_value(&value),
            None => {
                warn!(key_id = %key_id, "Key not found");
                Err(KeyError::KeyNotFound(key_id.to_string()))
            }
        }
    }

    fn require_active(key: &CryptoKey, operation: &'static str) -> Result<(), KeyError> {
        if key.is_active() {
            return Ok(());
        }
        warn!(key_id = %key.id, status = %key.status, operation, "Key not active");
        Err(KeyError::InvalidState {
            key_id: key.id.clone(),
            status: key.status,
            operation,
        })
    }

    fn require_vacant(&self, key_id: &str) -> Result<(), KeyError> {
        if self.store.get(&crypto_key_key(key_id))?.is_none() {
            return Ok(());
        }
        warn!(key_id = %key_id, "Key id already taken");
        Err(KeyError::KeyExists(key_id.to_string()))
    }

    fn put(&self, key: Key, value: Value) -> Result<(), StoreError> {
        self.store.put(key.clone(), value).map_err(|e| {
            error!(key = %key, error = %e, "Ledger write failed");
            e
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KeyManagerConfig;
    use crate::context::FixedContext;
    use crate::error::ErrorKind;
    use crate::keys::{RotationExpiryPolicy, SECONDS_PER_DAY};
    use crate::storage::testing::FaultyStore;
    use crate::storage::{MemoryLedgerStore, RocksLedgerStore};
    use tempfile::TempDir;

    const NOW: i64 = 1_714_564_800;

    fn ctx(tx_id: &str) -> FixedContext {
        FixedContext::new(tx_id, NOW)
    }

    fn manager() -> KeyManager<MemoryLedgerStore> {
        KeyManager::new(Arc::new(MemoryLedgerStore::new()))
    }

    fn faulty_manager() -> KeyManager<FaultyStore> {
        KeyManager::new(Arc::new(FaultyStore::new()))
    }

    fn stored_key<S: LedgerStore>(mgr: &KeyManager<S>, id: &str) -> CryptoKey {
        let value = mgr.store().get(&crypto_key_key(id)).unwrap().unwrap();
        CryptoKey::from_value(&value).unwrap()
    }

    fn put_raw_key<S: LedgerStore>(mgr: &KeyManager<S>, id: &str, status: &str) {
        let raw = format!(
            r#"{{"id":"{id}","type":"symmetric","algorithm":"AES","status":"{status}","ownerIds":["user1"],"createdAt":1620000000,"activatedAt":1620000000,"expiresAt":1651536000,"revokedAt":0}}"#
        );
        mgr.store()
            .put(crypto_key_key(id), Value::from(raw.as_str()))
            .unwrap();
    }

    #[test]
    fn test_generate_key() {
        let mgr = manager();
        let key = mgr
            .generate_key(&ctx("tx123abcdef"), "key123", "symmetric", "AES", r#"["user1","user2"]"#, 365)
            .unwrap();

        assert_eq!(key.id, "key123-tx123abc");

        let stored = stored_key(&mgr, "key123-tx123abc");
        assert_eq!(stored, key);
        assert_eq!(stored.key_type, KeyType::Symmetric);
        assert_eq!(stored.algorithm, "AES");
        assert_eq!(stored.owner_ids, vec!["user1".to_string(), "user2".to_string()]);
        assert_eq!(stored.status, KeyStatus::Active);
        assert_eq!(stored.created_at, NOW);
        assert_eq!(stored.activated_at, NOW);
        assert_eq!(stored.expires_at, NOW + 365 * SECONDS_PER_DAY);
        assert_eq!(stored.revoked_at, 0);
        assert_eq!(stored.metadata, "");
    }

    #[test]
    fn test_generate_key_short_tx_id() {
        let mgr = manager();
        let key = mgr
            .generate_key(&ctx("tx1"), "key", "asymmetric", "RSA", "[]", 1)
            .unwrap();
        assert_eq!(key.id, "key-tx1");
        assert!(key.owner_ids.is_empty());
    }

    #[test]
    fn test_generate_key_keeps_duplicate_owners() {
        let mgr = manager();
        let key = mgr
            .generate_key(&ctx("tx00000001"), "dup", "symmetric", "AES", r#"["a","a","b"]"#, 1)
            .unwrap();
        assert_eq!(key.owner_ids, vec!["a", "a", "b"]);
    }

    #[test]
    fn test_generate_key_rejects_bad_owner_json() {
        let mgr = faulty_manager();

        for owners in ["not json", r#"{"a":"b"}"#, "[1,2]", "null", r#""user1""#] {
            let err = mgr
                .generate_key(&ctx("tx12345678"), "k", "symmetric", "AES", owners, 30)
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Decode, "owners {owners}");
        }
        assert_eq!(mgr.store().put_count(), 0);
    }

    #[test]
    fn test_generate_key_rejects_unknown_type() {
        let mgr = faulty_manager();
        let err = mgr
            .generate_key(&ctx("tx12345678"), "k", "quantum", "AES", "[]", 30)
            .unwrap_err();

        assert!(matches!(err, KeyError::Decode(_)));
        assert_eq!(mgr.store().put_count(), 0);
    }

    #[test]
    fn test_generate_key_store_failure() {
        let mgr = faulty_manager();
        mgr.store().fail_nth_put(1);

        let err = mgr
            .generate_key(&ctx("tx12345678"), "k", "symmetric", "AES", "[]", 30)
            .unwrap_err();

        assert!(matches!(err, KeyError::Store(_)));
        assert!(mgr.store().inner().is_empty());
    }

    #[test]
    fn test_grant_key_access() {
        let mgr = manager();
        put_raw_key(&mgr, "key123", "active");

        let access = mgr
            .grant_key_access(&ctx("tx2"), "key123", "user2", "encrypt-only", "user1", 30)
            .unwrap();

        let value = mgr
            .store()
            .get(&Key::from("keyaccess:key123-user2"))
            .unwrap()
            .unwrap();
        let stored = KeyAccess::from_value(&value).unwrap();

        assert_eq!(stored, access);
        assert_eq!(stored.key_id, "key123");
        assert_eq!(stored.user_id, "user2");
        assert_eq!(stored.access_type, AccessType::EncryptOnly);
        assert_eq!(stored.granted_by, "user1");
        assert_eq!(stored.granted_at, NOW);
        assert_eq!(stored.expires_at, NOW + 30 * SECONDS_PER_DAY);
    }

    #[test]
    fn test_grant_overwrites_previous_grant() {
        let mgr = manager();
        put_raw_key(&mgr, "key123", "active");

        mgr.grant_key_access(&ctx("tx1"), "key123", "user2", "encrypt-only", "user1", 30)
            .unwrap();
        mgr.grant_key_access(&ctx("tx2").at(NOW + 10), "key123", "user2", "full", "admin", 7)
            .unwrap();

        let access = mgr.get_key_access("key123", "user2").unwrap();
        assert_eq!(access.access_type, AccessType::Full);
        assert_eq!(access.granted_by, "admin");
        assert_eq!(access.granted_at, NOW + 10);
        // Key record plus a single grant
        assert_eq!(mgr.store().len(), 2);
    }

    #[test]
    fn test_grant_missing_key() {
        let mgr = manager();
        let err = mgr
            .grant_key_access(&ctx("tx1"), "ghost", "user2", "full", "user1", 30)
            .unwrap_err();

        assert!(matches!(err, KeyError::KeyNotFound(ref id) if id == "ghost"));
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_grant_corrupt_key() {
        let mgr = manager();
        mgr.store()
            .put(crypto_key_key("broken"), Value::from("{not json"))
            .unwrap();

        let err = mgr
            .grant_key_access(&ctx("tx1"), "broken", "user2", "full", "user1", 30)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn test_grant_on_inactive_key_performs_no_write() {
        for status in ["rotated", "revoked"] {
            let mgr = faulty_manager();
            put_raw_key(&mgr, "key123", status);
            let puts_before = mgr.store().put_count();

            let err = mgr
                .grant_key_access(&ctx("tx1"), "key123", "user2", "full", "user1", 30)
                .unwrap_err();

            assert_eq!(err.kind(), ErrorKind::InvalidState, "status {status}");
            assert_eq!(mgr.store().put_count(), puts_before);
            assert!(mgr.get_key_access("key123", "user2").is_err());
        }
    }

    #[test]
    fn test_grant_rejects_unknown_access_type() {
        let mgr = manager();
        put_raw_key(&mgr, "key123", "active");

        let err = mgr
            .grant_key_access(&ctx("tx1"), "key123", "user2", "admin", "user1", 30)
            .unwrap_err();
        assert!(matches!(err, KeyError::Decode(_)));
    }

    #[test]
    fn test_grant_then_revoke() {
        let mgr = manager();
        put_raw_key(&mgr, "key123", "active");

        mgr.grant_key_access(&ctx("tx1"), "key123", "user2", "decrypt-only", "user1", 30)
            .unwrap();
        mgr.revoke_key_access("key123", "user2").unwrap();

        assert!(mgr
            .store()
            .get(&Key::from("keyaccess:key123-user2"))
            .unwrap()
            .is_none());

        let err = mgr.revoke_key_access("key123", "user2").unwrap_err();
        assert!(matches!(err, KeyError::GrantNotFound { .. }));
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_revoke_absent_grant_performs_no_delete() {
        let mgr = faulty_manager();
        let err = mgr.revoke_key_access("key123", "nobody").unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(mgr.store().delete_count(), 0);
    }

    #[test]
    fn test_revoke_grant_on_rotated_key() {
        let mgr = manager();
        put_raw_key(&mgr, "key123", "active");
        mgr.grant_key_access(&ctx("tx1"), "key123", "user2", "full", "user1", 30)
            .unwrap();
        mgr.rotate_key(&ctx("tx2abcdef9"), "key123").unwrap();

        mgr.revoke_key_access("key123", "user2").unwrap();
    }

    #[test]
    fn test_rotate_key() {
        let mgr = manager();
        put_raw_key(&mgr, "key123", "active");
        let original = stored_key(&mgr, "key123");

        let outcome = mgr.rotate_key(&ctx("tx456789abc"), "key123").unwrap();

        assert_eq!(outcome.successor_id(), "key123-tx456789");

        let retired = stored_key(&mgr, "key123");
        assert_eq!(retired, outcome.retired);
        assert_eq!(retired.status, KeyStatus::Rotated);
        assert_eq!(retired.created_at, original.created_at);
        assert_eq!(retired.activated_at, original.activated_at);
        assert_eq!(retired.expires_at, original.expires_at);
        assert_eq!(retired.revoked_at, 0);

        let successor = stored_key(&mgr, "key123-tx456789");
        assert_eq!(successor, outcome.successor);
        assert_eq!(successor.status, KeyStatus::Active);
        assert_eq!(successor.key_type, original.key_type);
        assert_eq!(successor.algorithm, original.algorithm);
        assert_eq!(successor.owner_ids, original.owner_ids);
        assert_eq!(successor.created_at, NOW);
        assert_eq!(successor.activated_at, NOW);
        assert_eq!(successor.expires_at, NOW + 365 * SECONDS_PER_DAY);
        assert_eq!(successor.revoked_at, 0);
    }

    #[test]
    fn test_rotate_twice_fails() {
        let mgr = manager();
        put_raw_key(&mgr, "key123", "active");

        mgr.rotate_key(&ctx("txaaaaaaaa"), "key123").unwrap();
        let err = mgr.rotate_key(&ctx("txbbbbbbbb"), "key123").unwrap_err();

        assert!(matches!(
            err,
            KeyError::InvalidState { status: KeyStatus::Rotated, .. }
        ));
        assert!(mgr.store().get(&crypto_key_key("key123-txbbbbbb")).unwrap().is_none());
    }

    #[test]
    fn test_successor_can_be_rotated() {
        let mgr = manager();
        put_raw_key(&mgr, "key123", "active");

        let first = mgr.rotate_key(&ctx("txaaaaaaaa"), "key123").unwrap();
        let second = mgr
            .rotate_key(&ctx("txbbbbbbbb"), first.successor_id())
            .unwrap();

        assert_eq!(second.successor_id(), "key123-txaaaaaa-txbbbbbb");
        assert_eq!(second.successor.owner_ids, vec!["user1"]);
    }

    #[test]
    fn test_rotate_missing_key() {
        let mgr = manager();
        let err = mgr.rotate_key(&ctx("tx1"), "ghost").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(mgr.store().is_empty());
    }

    #[test]
    fn test_rotate_interrupted_after_first_write() {
        let mgr = faulty_manager();
        put_raw_key(&mgr, "key123", "active");
        mgr.store().fail_nth_put(2);

        let err = mgr.rotate_key(&ctx("tx456789abc"), "key123").unwrap_err();

        match &err {
            KeyError::PartialRotation {
                retired_id,
                successor_id,
                ..
            } => {
                assert_eq!(retired_id, "key123");
                assert_eq!(successor_id, "key123-tx456789");
            }
            other => panic!("expected PartialRotation, got {:?}", other),
        }
        assert_eq!(err.kind(), ErrorKind::Store);

        // The predecessor is retired and no successor exists
        assert_eq!(stored_key(&mgr, "key123").status, KeyStatus::Rotated);
        assert!(mgr
            .store()
            .get(&crypto_key_key("key123-tx456789"))
            .unwrap()
            .is_none());

        // The retired key cannot be rotated again to repair
        let retry = mgr.rotate_key(&ctx("txretry000"), "key123").unwrap_err();
        assert_eq!(retry.kind(), ErrorKind::InvalidState);
    }

    #[test]
    fn test_rotate_first_write_failure_changes_nothing() {
        let mgr = faulty_manager();
        put_raw_key(&mgr, "key123", "active");
        mgr.store().fail_nth_put(1);

        let err = mgr.rotate_key(&ctx("tx456789abc"), "key123").unwrap_err();

        assert!(matches!(err, KeyError::Store(_)));
        assert_eq!(stored_key(&mgr, "key123").status, KeyStatus::Active);
        assert_eq!(mgr.store().inner().len(), 1);
    }

    #[test]
    fn test_rotate_with_preserve_remaining_policy() {
        let config =
            KeyManagerConfig::new().with_rotation_expiry(RotationExpiryPolicy::PreserveRemaining);
        let mgr = KeyManager::with_config(Arc::new(MemoryLedgerStore::new()), config);

        let key = mgr
            .generate_key(&ctx("txgen00000"), "key", "symmetric", "AES", r#"["o"]"#, 90)
            .unwrap();
        let later = ctx("txrot00000").at(NOW + 10 * SECONDS_PER_DAY);
        let outcome = mgr.rotate_key(&later, &key.id).unwrap();

        assert_eq!(outcome.successor.expires_at, key.expires_at);
        assert_eq!(outcome.successor.created_at, NOW + 10 * SECONDS_PER_DAY);
    }

    #[test]
    fn test_revoke_key() {
        let mgr = manager();
        let key = mgr
            .generate_key(&ctx("txgen00000"), "key", "symmetric", "AES", "[]", 30)
            .unwrap();

        let revoked = mgr.revoke_key(&ctx("txrev").at(NOW + 60), &key.id).unwrap();

        assert_eq!(revoked.status, KeyStatus::Revoked);
        assert_eq!(revoked.revoked_at, NOW + 60);
        assert_eq!(revoked.created_at, key.created_at);
        assert_eq!(stored_key(&mgr, &key.id), revoked);
    }

    #[test]
    fn test_revoked_key_is_terminal() {
        let mgr = manager();
        put_raw_key(&mgr, "key123", "active");
        mgr.revoke_key(&ctx("tx1"), "key123").unwrap();

        let again = mgr.revoke_key(&ctx("tx2"), "key123").unwrap_err();
        let rotate = mgr.rotate_key(&ctx("tx3"), "key123").unwrap_err();
        let grant = mgr
            .grant_key_access(&ctx("tx4"), "key123", "u", "full", "a", 1)
            .unwrap_err();

        for err in [again, rotate, grant] {
            assert!(matches!(
                err,
                KeyError::InvalidState { status: KeyStatus::Revoked, .. }
            ));
        }
    }

    #[test]
    fn test_rotated_key_cannot_be_revoked() {
        let mgr = manager();
        put_raw_key(&mgr, "key123", "active");
        mgr.rotate_key(&ctx("tx1aaaaaaa"), "key123").unwrap();

        let err = mgr.revoke_key(&ctx("tx2"), "key123").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
    }

    #[test]
    fn test_store_read_failure_propagates() {
        let mgr = faulty_manager();
        put_raw_key(&mgr, "key123", "active");
        mgr.store().fail_gets(true);

        let err = mgr
            .grant_key_access(&ctx("tx1"), "key123", "u", "full", "a", 1)
            .unwrap_err();
        assert!(matches!(err, KeyError::Store(StoreError::Backend(_))));

        let err = mgr.revoke_key_access("key123", "u").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Store);
        assert_eq!(mgr.store().delete_count(), 0);
    }

    #[test]
    fn test_generate_after_revoke_in_same_tx_does_not_reactivate() {
        let mgr = faulty_manager();
        let tx = ctx("txsame000000");
        let key = mgr
            .generate_key(&tx, "k", "symmetric", "AES", "[]", 30)
            .unwrap();
        mgr.revoke_key(&tx, &key.id).unwrap();
        let puts = mgr.store().put_count();

        let err = mgr
            .generate_key(&tx, "k", "symmetric", "AES", "[]", 30)
            .unwrap_err();

        assert!(matches!(err, KeyError::KeyExists(ref id) if id == "k-txsame00"));
        assert_eq!(err.kind(), ErrorKind::InvalidState);
        assert_eq!(mgr.store().put_count(), puts);
        assert_eq!(stored_key(&mgr, "k-txsame00").status, KeyStatus::Revoked);
    }

    #[test]
    fn test_generate_after_rotate_in_same_tx_keeps_successor() {
        let mgr = faulty_manager();
        let tx = ctx("txsame000000");
        let key = mgr
            .generate_key(&tx, "k", "symmetric", "AES", r#"["o"]"#, 30)
            .unwrap();
        let outcome = mgr.rotate_key(&tx, &key.id).unwrap();
        let puts = mgr.store().put_count();

        // Same caller id collides with the retired key
        let err = mgr
            .generate_key(&tx, "k", "asymmetric", "RSA", "[]", 1)
            .unwrap_err();
        assert!(matches!(err, KeyError::KeyExists(_)));

        // Caller id equal to the retired id collides with the successor
        let err = mgr
            .generate_key(&tx, &key.id, "asymmetric", "RSA", "[]", 1)
            .unwrap_err();
        assert!(matches!(err, KeyError::KeyExists(ref id) if id == outcome.successor_id()));

        assert_eq!(mgr.store().put_count(), puts);
        assert_eq!(stored_key(&mgr, &key.id).status, KeyStatus::Rotated);
        assert_eq!(stored_key(&mgr, outcome.successor_id()), outcome.successor);
    }

    #[test]
    fn test_rotate_onto_taken_successor_id_writes_nothing() {
        let mgr = faulty_manager();
        put_raw_key(&mgr, "key123", "active");
        put_raw_key(&mgr, "key123-tx456789", "revoked");

        let err = mgr.rotate_key(&ctx("tx456789abc"), "key123").unwrap_err();

        assert!(matches!(err, KeyError::KeyExists(ref id) if id == "key123-tx456789"));
        assert_eq!(mgr.store().put_count(), 2);
        assert_eq!(stored_key(&mgr, "key123").status, KeyStatus::Active);
        assert_eq!(stored_key(&mgr, "key123-tx456789").status, KeyStatus::Revoked);
    }

    #[test]
    fn test_rotate_over_rocksdb() {
        let dir = TempDir::new().unwrap();
        let mgr = KeyManager::new(Arc::new(RocksLedgerStore::open(dir.path()).unwrap()));

        let key = mgr
            .generate_key(&ctx("txgen00000"), "key", "symmetric", "AES", r#"["user1"]"#, 30)
            .unwrap();
        mgr.grant_key_access(&ctx("txgrant000"), &key.id, "user2", "decrypt-only", "user1", 7)
            .unwrap();
        let outcome = mgr.rotate_key(&ctx("txrot00000").at(NOW + 60), &key.id).unwrap();

        assert_eq!(mgr.get_key(&key.id).unwrap().status, KeyStatus::Rotated);
        assert_eq!(mgr.get_key(outcome.successor_id()).unwrap(), outcome.successor);
        assert_eq!(
            mgr.get_key_access(&key.id, "user2").unwrap().access_type,
            AccessType::DecryptOnly
        );
    }

    #[test]
    fn test_get_key_not_found() {
        let mgr = manager();
        assert_eq!(mgr.get_key("none").unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(
            mgr.get_key_access("none", "u").unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }
}
