//! Integration tests for the session store

use super::test_utils::{frame_part, host_with};
use tempfile::TempDir;
use weldsheet::host::{Document, HostMeta};
use weldsheet::orchestrator::{Orchestrator, PipelineSettings};
use weldsheet::store::{load_host, save_host, SessionStore, SledSessionStore};

/// Configurations and drawings survive a store reopen.
#[test]
fn test_generated_session_survives_reopen() {
    let store_dir = TempDir::new().unwrap();
    let (host, part) = host_with(&frame_part());
    let orchestrator = Orchestrator::new(host, PipelineSettings::default());
    let report = orchestrator.generate().unwrap();
    let host = orchestrator.into_host();

    {
        let store = SledSessionStore::new(store_dir.path()).unwrap();
        save_host(&store, &host).unwrap();
    }

    let store = SledSessionStore::new(store_dir.path()).unwrap();
    let restored = load_host(&store).unwrap();
    assert_eq!(restored.meta().active.as_ref(), Some(&report.drawing.id));
    assert_eq!(restored.part(&part), host.part(&part));
    assert_eq!(
        restored.drawing(&report.drawing.id),
        host.drawing(&report.drawing.id)
    );
}

/// A second generate after reload still reuses configurations and numbers the drawing on.
#[test]
fn test_reloaded_host_continues_numbering() {
    let store_dir = TempDir::new().unwrap();
    let store = SledSessionStore::new(store_dir.path()).unwrap();

    let (host, part) = host_with(&frame_part());
    let orchestrator = Orchestrator::new(host, PipelineSettings::default());
    let first = orchestrator.generate().unwrap();
    save_host(&store, &orchestrator.into_host()).unwrap();

    let mut host = load_host(&store).unwrap();
    host.activate(&part).unwrap();
    let orchestrator = Orchestrator::new(host, PipelineSettings::default());
    let second = orchestrator.generate().unwrap();

    assert_ne!(first.drawing.path, second.drawing.path);
    assert!(second.configurations.iter().all(|c| !c.created));
    let views: Vec<u64> = second.sheets.iter().flat_map(|s| s.views.iter().map(|v| v.view)).collect();
    let earlier: Vec<u64> = first.sheets.iter().flat_map(|s| s.views.iter().map(|v| v.view)).collect();
    assert!(views.iter().all(|v| !earlier.contains(v)));
}

#[test]
fn test_dangling_active_document_is_cleared() {
    let store_dir = TempDir::new().unwrap();
    let store = SledSessionStore::new(store_dir.path()).unwrap();
    let (host, part) = host_with(&frame_part());
    save_host(&store, &host).unwrap();

    assert!(store.remove(&part).unwrap());
    assert_eq!(store.meta().unwrap().active.as_ref(), Some(&part));

    let restored = load_host(&store).unwrap();
    assert_eq!(restored.meta().active, None);
    assert_eq!(restored.documents().count(), 0);
}

#[test]
fn test_documents_listed_in_id_order() {
    let store_dir = TempDir::new().unwrap();
    let store = SledSessionStore::new(store_dir.path()).unwrap();
    let (host, _) = host_with(&frame_part());
    let orchestrator = Orchestrator::new(host, PipelineSettings::default());
    orchestrator.generate().unwrap();
    save_host(&store, &orchestrator.into_host()).unwrap();

    let documents = store.list().unwrap();
    assert_eq!(documents.len(), 2);
    let ids: Vec<&str> = documents.iter().map(|d| d.id().as_str()).collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);
    assert!(documents.iter().any(|d| matches!(d, Document::Drawing(_))));
}

#[test]
fn test_meta_round_trip() {
    let store_dir = TempDir::new().unwrap();
    let store = SledSessionStore::new(store_dir.path()).unwrap();
    let meta = HostMeta {
        active: None,
        next_handle: 42,
        drawing_serial: 7,
    };
    store.put_meta(&meta).unwrap();
    assert_eq!(store.meta().unwrap(), meta);
}
