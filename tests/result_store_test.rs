//! Tests for the persisted result log.

use std::cell::Cell;

use tempfile::NamedTempFile;

use strictly_guessing::{
    BlobBackend, BlobRepository, DbError, DbErrorKind, GameResult, MemoryBlobs, ResultStore,
    StoreError,
};

/// Creates a temporary database file with schema applied, returns the file
/// handle (must stay in scope to keep the file alive) and a ready repository.
fn setup_test_db() -> (NamedTempFile, BlobRepository) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();
    let repo = BlobRepository::open(db_path).expect("Failed to open repository");
    (db_file, repo)
}

fn result(name: &str, score: u32, timestamp: i64) -> GameResult {
    GameResult::new(name.to_string(), score, 3, 12, timestamp, 42)
}

#[test]
fn test_empty_store_loads_nothing() {
    let (_db, repo) = setup_test_db();
    let store = ResultStore::new(repo);
    assert!(store.load_all().is_empty());
    assert!(store.try_load_all().expect("Absent blob is fine").is_empty());
}

#[test]
fn test_append_then_load_round_trip() {
    let (_db, repo) = setup_test_db();
    let store = ResultStore::new(repo);

    let first = result("Ann", 90, 1);
    let second = result("Bob", 80, 2);
    store.append(first.clone()).expect("Append failed");
    let before = store.load_all();
    store.append(second.clone()).expect("Append failed");

    let all = store.load_all();
    assert_eq!(all.len(), 2);
    assert_eq!(all[..1], before[..]);
    assert_eq!(all.last(), Some(&second));
    assert_eq!(all[0], first);
}

#[test]
fn test_load_is_a_stable_snapshot() {
    let (_db, repo) = setup_test_db();
    let store = ResultStore::new(repo);
    store.append(result("Ann", 90, 1)).expect("Append failed");
    assert_eq!(store.load_all(), store.load_all());
}

#[test]
fn test_persists_across_repository_instances() {
    let (db, repo) = setup_test_db();
    ResultStore::new(repo)
        .append(result("Ann", 90, 1))
        .expect("Append failed");

    let reopened = BlobRepository::open(db.path().to_str().expect("Invalid path").to_string())
        .expect("Reopen failed");
    let all = ResultStore::new(reopened).load_all();
    assert_eq!(all, vec![result("Ann", 90, 1)]);
}

#[test]
fn test_blob_uses_stored_field_names() {
    let (_db, repo) = setup_test_db();
    let store = ResultStore::new(repo.clone());
    store.append(result("Ann", 90, 7)).expect("Append failed");

    let payload = repo
        .load(store.key())
        .expect("Load failed")
        .expect("Blob present");
    let json: serde_json::Value = serde_json::from_str(&payload).expect("Valid JSON");
    let record = &json[0];
    assert_eq!(record["playerName"], "Ann");
    assert_eq!(record["timeTaken"], 12);
    assert_eq!(record["targetNumber"], 42);
    assert_eq!(record["timestamp"], 7);
}

#[test]
fn test_corrupt_blob_degrades_to_empty() {
    let blobs = MemoryBlobs::new();
    let store = ResultStore::new(blobs.clone());
    blobs
        .store(store.key(), "{not json".to_string())
        .expect("Store failed");

    assert!(store.load_all().is_empty());
    assert!(matches!(
        store.try_load_all(),
        Err(StoreError::CorruptPersistedData { .. })
    ));
}

#[test]
fn test_wrong_shape_counts_as_corrupt() {
    let blobs = MemoryBlobs::new();
    let store = ResultStore::new(blobs.clone());
    blobs
        .store(store.key(), r#"[{"playerName":"Ann"}]"#.to_string())
        .expect("Store failed");
    assert!(store.load_all().is_empty());
}

#[test]
fn test_append_over_corrupt_blob_starts_fresh() {
    let blobs = MemoryBlobs::new();
    let store = ResultStore::new(blobs.clone());
    blobs
        .store(store.key(), "garbage".to_string())
        .expect("Store failed");

    store.append(result("Ann", 90, 1)).expect("Append failed");
    assert_eq!(store.load_all(), vec![result("Ann", 90, 1)]);
}

/// Memory backend whose next read fails once when armed.
struct FlakyReads {
    inner: MemoryBlobs,
    fail_next_load: Cell<bool>,
}

impl BlobBackend for FlakyReads {
    fn load(&self, name: &str) -> Result<Option<String>, DbError> {
        if self.fail_next_load.replace(false) {
            return Err(DbError::new(DbErrorKind::Backend, "database is locked"));
        }
        self.inner.load(name)
    }

    fn store(&self, name: &str, payload: String) -> Result<(), DbError> {
        self.inner.store(name, payload)
    }
}

#[test]
fn test_append_after_failed_read_keeps_prior_results() {
    let blobs = MemoryBlobs::new();
    let store = ResultStore::new(FlakyReads {
        inner: blobs.clone(),
        fail_next_load: Cell::new(false),
    });
    let prior = vec![result("Ann", 90, 1), result("Bob", 80, 2), result("Cid", 70, 3)];
    for r in &prior {
        store.append(r.clone()).expect("Append failed");
    }

    store.backend().fail_next_load.set(true);
    let err = store
        .append(result("Dee", 60, 4))
        .expect_err("Unreadable backend must fail the append");
    assert_eq!(err.kind, DbErrorKind::Backend);
    assert_eq!(ResultStore::new(blobs.clone()).load_all(), prior);

    store.append(result("Dee", 60, 4)).expect("Append failed");
    let all = store.load_all();
    assert_eq!(all.len(), 4);
    assert_eq!(all[..3], prior[..]);
}

#[test]
fn test_load_all_degrades_on_failed_read() {
    let store = ResultStore::new(FlakyReads {
        inner: MemoryBlobs::new(),
        fail_next_load: Cell::new(false),
    });
    store.append(result("Ann", 90, 1)).expect("Append failed");

    store.backend().fail_next_load.set(true);
    assert!(matches!(
        store.try_load_all(),
        Err(StoreError::CorruptPersistedData { .. })
    ));
    assert_eq!(store.load_all(), vec![result("Ann", 90, 1)]);
}

#[test]
fn test_keys_are_independent() {
    let blobs = MemoryBlobs::new();
    let a = ResultStore::with_key(blobs.clone(), "a");
    let b = ResultStore::with_key(blobs, "b");
    a.append(result("Ann", 90, 1)).expect("Append failed");
    assert_eq!(a.load_all().len(), 1);
    assert!(b.load_all().is_empty());
}

#[test]
fn test_interleaved_writers_lose_an_update() {
    // Documents the accepted last-write-wins limitation of load-modify-store.
    let blobs = MemoryBlobs::new();
    let store = ResultStore::new(blobs.clone());
    store.append(result("Ann", 90, 1)).expect("Append failed");

    let stale = store.load_all();
    store.append(result("Bob", 80, 2)).expect("Append failed");

    let mut overwritten = stale;
    overwritten.push(result("Cid", 70, 3));
    blobs
        .store(
            store.key(),
            serde_json::to_string(&overwritten).expect("Serialize failed"),
        )
        .expect("Store failed");

    let names: Vec<String> = store
        .load_all()
        .iter()
        .map(|r| r.player_name().clone())
        .collect();
    assert_eq!(names, ["Ann", "Cid"]);
}
