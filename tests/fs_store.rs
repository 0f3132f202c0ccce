use blogdesk::error::BlogError;
use blogdesk::model::{Category, Post};
use blogdesk::store::backend::{StorageBackend, StorageKey};
use blogdesk::store::fs_backend::FsBackend;
use blogdesk::store::BlogStore;
use std::fs;
use tempfile::TempDir;

fn open(dir: &TempDir) -> BlogStore<FsBackend> {
    BlogStore::new(FsBackend::open(dir.path()).unwrap())
}

#[test]
fn data_survives_reopening() {
    let dir = TempDir::new().unwrap();
    {
        let mut store = open(&dir);
        store.initialize().unwrap();
        store
            .save_post(Post::new("Persisted".into(), "Body".into()))
            .unwrap();
    }

    let store = open(&dir);
    assert_eq!(store.all_posts()[0].title, "Persisted");
    assert_eq!(store.all_categories().len(), 3);
    assert_eq!(store.active_theme().unwrap().id, "default-light");
}

#[test]
fn stored_json_uses_camel_case_keys() {
    let dir = TempDir::new().unwrap();
    let mut store = open(&dir);
    store
        .save_post(Post::new("Shape".into(), "Body".into()))
        .unwrap();

    let raw = fs::read_to_string(dir.path().join("blog-manager-posts.json")).unwrap();
    assert!(raw.contains("\"createdAt\""));
    assert!(raw.contains("\"updatedAt\""));
    assert!(raw.contains("\"published\":false"));
}

#[test]
fn corrupt_file_reads_as_empty_and_is_replaced_on_save() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("blog-manager-categories.json"), "{not json").unwrap();

    let mut store = open(&dir);
    assert!(store.all_categories().is_empty());

    store
        .save_category(Category::new("Fresh".into(), None))
        .unwrap();
    assert_eq!(store.all_categories().len(), 1);
}

#[test]
fn active_theme_deletion_is_refused_on_disk() {
    let dir = TempDir::new().unwrap();
    let mut store = open(&dir);
    store.initialize().unwrap();

    let err = store.delete_theme("default-light").unwrap_err();
    assert!(matches!(err, BlogError::ActiveThemeDeletion));
    assert_eq!(store.all_themes().len(), 3);
    assert_eq!(
        store
            .backend()
            .get_item(StorageKey::ActiveTheme)
            .unwrap()
            .as_deref(),
        Some("default-light")
    );
}
