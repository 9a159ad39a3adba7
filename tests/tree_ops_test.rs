//! Structural operation tests: move, delete variants, corruption guards

mod common;

use common::{create_draft, create_page, scenario_store, test_store};
use docsite_store::{PageStore, SqliteStore, StoreError};

#[test]
fn test_move_to_new_parent() {
    let store = test_store();
    let a = create_page(&store, "A", "a", None);
    let b = create_page(&store, "B", "b", None);

    let moved = store.move_page(b.id, Some(a.id)).expect("move failed");
    assert_eq!(moved.parent_id, Some(a.id));
    assert!(moved.updated_at >= b.updated_at);

    let children = store.children(a.id).expect("query failed");
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].id, b.id);
}

#[test]
fn test_move_to_root() {
    let store = test_store();
    let a = create_page(&store, "A", "a", None);
    let b = create_page(&store, "B", "b", Some(a.id));

    let moved = store.move_page(b.id, None).expect("move failed");
    assert_eq!(moved.parent_id, None);
}

#[test]
fn test_move_to_self_is_cycle() {
    let store = test_store();
    let a = create_page(&store, "A", "a", None);

    let err = store
        .move_page(a.id, Some(a.id))
        .expect_err("self-parent must fail");
    assert!(matches!(err, StoreError::Cycle { .. }));
}

#[test]
fn test_move_under_descendant_is_cycle() {
    let store = test_store();
    let a = create_page(&store, "A", "a", None);
    let b = create_page(&store, "B", "b", Some(a.id));
    let c = create_page(&store, "C", "c", Some(b.id));

    // Direct child and deeper descendant both refuse
    for target in [b.id, c.id] {
        let err = store
            .move_page(a.id, Some(target))
            .expect_err("descendant move must fail");
        assert!(matches!(
            err,
            StoreError::Cycle { page_id, new_parent_id }
                if page_id == a.id && new_parent_id == target
        ));
    }

    // Nothing was mutated
    let unchanged = store
        .page_by_id(a.id)
        .expect("query failed")
        .expect("page missing");
    assert_eq!(unchanged.parent_id, None);
}

#[test]
fn test_move_between_siblings_allowed() {
    let store = test_store();
    let a = create_page(&store, "A", "a", None);
    let b = create_page(&store, "B", "b", Some(a.id));
    let c = create_page(&store, "C", "c", Some(a.id));

    // Moving a sibling under a sibling is not a cycle
    let moved = store.move_page(c.id, Some(b.id)).expect("move failed");
    assert_eq!(moved.parent_id, Some(b.id));
}

#[test]
fn test_move_unknown_ids() {
    let store = test_store();
    let a = create_page(&store, "A", "a", None);

    let err = store
        .move_page(9999, Some(a.id))
        .expect_err("unknown page must fail");
    assert!(err.is_not_found());

    let err = store
        .move_page(a.id, Some(9999))
        .expect_err("unknown parent must fail");
    assert!(err.is_not_found());
}

#[test]
fn test_update_reparent_gets_cycle_guard() {
    let store = test_store();
    let a = create_page(&store, "A", "a", None);
    let b = create_page(&store, "B", "b", Some(a.id));

    let err = store
        .update(
            a.id,
            docsite_store::PageUpdate {
                parent_id: Some(Some(b.id)),
                ..Default::default()
            },
        )
        .expect_err("reparent under descendant must fail");
    assert!(matches!(err, StoreError::Cycle { .. }));
}

#[test]
fn test_delete_promotes_children() {
    let store = test_store();
    let root = create_page(&store, "Root", "root", None);
    let mid = create_page(&store, "Mid", "mid", Some(root.id));
    let leaf_a = create_page(&store, "Leaf A", "leaf-a", Some(mid.id));
    let leaf_b = create_page(&store, "Leaf B", "leaf-b", Some(mid.id));

    assert!(store.delete(mid.id).expect("delete failed"));

    assert!(store.page_by_id(mid.id).expect("query failed").is_none());

    // Former grandchildren now hang off the old parent, subtrees intact
    let children = store.children(root.id).expect("query failed");
    let ids: Vec<i64> = children.iter().map(|p| p.id).collect();
    assert_eq!(ids, [leaf_a.id, leaf_b.id]);
}

#[test]
fn test_delete_root_promotes_children_to_root() {
    let store = test_store();
    let root = create_page(&store, "Root", "root", None);
    let child = create_page(&store, "Child", "child", Some(root.id));

    assert!(store.delete(root.id).expect("delete failed"));

    let promoted = store
        .page_by_id(child.id)
        .expect("query failed")
        .expect("page missing");
    assert_eq!(promoted.parent_id, None);
}

#[test]
fn test_delete_promotes_draft_children_too() {
    let store = test_store();
    let root = create_page(&store, "Root", "root", None);
    let mid = create_page(&store, "Mid", "mid", Some(root.id));
    let draft = create_draft(&store, "Draft", "draft", Some(mid.id));

    assert!(store.delete(mid.id).expect("delete failed"));

    let promoted = store
        .page_by_id(draft.id)
        .expect("query failed")
        .expect("page missing");
    assert_eq!(promoted.parent_id, Some(root.id));
}

#[test]
fn test_delete_unknown_id() {
    let store = test_store();
    assert!(!store.delete(9999).expect("delete must not error"));
}

#[test]
fn test_delete_recursive_removes_subtree() {
    let store = test_store();
    let keep = create_page(&store, "Keep", "keep", None);
    let root = create_page(&store, "Root", "root", None);
    let mid = create_page(&store, "Mid", "mid", Some(root.id));
    let leaf = create_page(&store, "Leaf", "leaf", Some(mid.id));
    let draft_leaf = create_draft(&store, "Draft Leaf", "draft-leaf", Some(mid.id));

    assert!(store.delete_recursive(root.id).expect("cascade failed"));

    // Every descendant is gone, drafts included
    for id in [root.id, mid.id, leaf.id, draft_leaf.id] {
        assert!(store.page_by_id(id).expect("query failed").is_none());
    }

    // Unrelated pages survive
    assert!(store.page_by_id(keep.id).expect("query failed").is_some());
    assert_eq!(store.all_pages().expect("query failed").len(), 1);
}

#[test]
fn test_delete_recursive_unknown_id() {
    let store = test_store();
    assert!(!store.delete_recursive(9999).expect("cascade must not error"));
}

#[test]
fn test_scenario_home_docs_intro() {
    // Seed Home(root), Docs(root), Intro(child of Docs)
    let (store, _home, docs, intro) = scenario_store();

    // Breadcrumbs for Intro
    let ancestors = store.ancestors(intro.id).expect("query failed");
    assert_eq!(ancestors.len(), 1);
    assert_eq!(ancestors[0].id, docs.id);

    // Docs cannot move under its own descendant
    let err = store
        .move_page(docs.id, Some(intro.id))
        .expect_err("cycle move must fail");
    assert!(matches!(err, StoreError::Cycle { .. }));

    // Deleting Docs promotes Intro to root
    assert!(store.delete(docs.id).expect("delete failed"));
    let promoted = store
        .page_by_id(intro.id)
        .expect("query failed")
        .expect("page missing");
    assert_eq!(promoted.parent_id, None);
    assert!(store.page_by_id(docs.id).expect("query failed").is_none());
}

#[test]
fn test_corrupt_parent_chain_is_detected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let db_path = dir.path().join("corrupt.db");

    let store = SqliteStore::new(&db_path).expect("create store");
    store.initialize().expect("initialize");
    let a = create_page(&store, "A", "a", None);
    let b = create_page(&store, "B", "b", Some(a.id));

    // Forge a cycle behind the store's back: A becomes B's child
    {
        let conn = rusqlite::Connection::open(&db_path).expect("raw connection");
        conn.execute(
            "UPDATE pages SET parent_id = ?1 WHERE id = ?2",
            rusqlite::params![b.id, a.id],
        )
        .expect("forge cycle");
    }

    let err = store.ancestors(a.id).expect_err("walk must detect cycle");
    assert!(matches!(err, StoreError::CorruptTraversal { .. }));
    assert!(err.is_fatal());

    let err = store.root_page(b.id).expect_err("walk must detect cycle");
    assert!(matches!(err, StoreError::CorruptTraversal { .. }));
}

#[test]
fn test_mutations_survive_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");
    let db_path = dir.path().join("docsite.db");

    {
        let store = SqliteStore::new(&db_path).expect("create store");
        store.initialize().expect("initialize");
        let root = create_page(&store, "Root", "root", None);
        create_page(&store, "Child", "child", Some(root.id));
        store.close().expect("close");
    }

    let store = SqliteStore::open(&db_path).expect("reopen store");
    assert!(store.is_initialized());
    let root = store
        .page_by_slug("root")
        .expect("query failed")
        .expect("root missing");
    let children = store.children(root.id).expect("query failed");
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].slug, "child");
}
