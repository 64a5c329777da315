use patterns_core::model::{ProblemId, ProgressRecord};
use patterns_core::time::fixed_today;
use storage::file::FileStorage;
use storage::{
    PROGRESS_STORAGE_KEY, ProgressStorage, Storage, StorageError, decode_progress, encode_progress,
};

#[test]
fn file_storage_persists_progress_across_instances() {
    let dir = tempfile::tempdir().expect("tempdir");
    let data_dir = dir.path().join("algo-patterns");

    let mut record = ProgressRecord::new();
    record.toggle_completion(ProblemId::new("sw-1"), fixed_today());
    record.unlock_hint(ProblemId::new("sw-1"), 2);

    let writer = FileStorage::new(&data_dir);
    writer
        .set_item(PROGRESS_STORAGE_KEY, &encode_progress(&record).unwrap())
        .expect("write");
    assert!(writer.path_for(PROGRESS_STORAGE_KEY).exists());

    let reader = Storage::file(&data_dir);
    let raw = reader
        .progress
        .get_item(PROGRESS_STORAGE_KEY)
        .expect("read")
        .expect("blob present");
    let restored = decode_progress(&raw).expect("decode");
    assert_eq!(restored, record);
    assert_eq!(restored.streak(), 1);
}

#[test]
fn overwrite_leaves_no_temp_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let storage = FileStorage::new(dir.path());

    storage.set_item("k", "first").unwrap();
    storage.set_item("k", "second").unwrap();

    assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("second"));
    let names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["k.json".to_string()]);
}

#[test]
fn remove_deletes_blob() {
    let dir = tempfile::tempdir().expect("tempdir");
    let storage = FileStorage::new(dir.path());
    storage.set_item("k", "v").unwrap();
    storage.remove_item("k").unwrap();
    assert_eq!(storage.get_item("k").unwrap(), None);
}

#[test]
fn unwritable_directory_reports_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "plain file").unwrap();

    let storage = FileStorage::new(blocker.join("data"));
    let err = storage.set_item("k", "v").unwrap_err();
    assert!(matches!(err, StorageError::Io(_)));
}
