use waypost_core::db::open_db_in_memory;
use waypost_core::{EntityId, KeyedPostRepository, Post, PostRepository, RepoError};

#[test]
fn create_on_empty_collection_keeps_caller_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = KeyedPostRepository::new(&conn);

    let created = repo.create_post(Post::new(1, 1, "<p>hello</p>")).unwrap();
    assert_eq!(created.id, EntityId::Int(1));

    let found = repo.find_post_by_id(&EntityId::Int(1)).unwrap().unwrap();
    assert_eq!(found.content, "<p>hello</p>");
}

#[test]
fn create_assigns_sequential_ids_once_collection_is_seeded() {
    let conn = open_db_in_memory().unwrap();
    let repo = KeyedPostRepository::new(&conn);

    repo.create_post(Post::new(1, 1, "<p>first</p>")).unwrap();
    // Caller id is a placeholder here; the allocator overwrites it.
    let second = repo.create_post(Post::new(1, 1, "<p>second</p>")).unwrap();
    let third = repo.create_post(Post::new(1, 2, "<p>third</p>")).unwrap();

    assert_eq!(second.id, EntityId::Int(2));
    assert_eq!(third.id, EntityId::Int(3));
}

#[test]
fn find_all_returns_storage_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = KeyedPostRepository::new(&conn);

    repo.create_post(Post::new(1, 1, "<p>a</p>")).unwrap();
    repo.create_post(Post::new(1, 1, "<p>b</p>")).unwrap();
    repo.create_post(Post::new(1, 1, "<p>c</p>")).unwrap();

    let contents: Vec<String> = repo
        .find_all()
        .unwrap()
        .into_iter()
        .map(|post| post.content)
        .collect();
    assert_eq!(contents, vec!["<p>a</p>", "<p>b</p>", "<p>c</p>"]);
}

#[test]
fn find_all_is_idempotent_without_intervening_writes() {
    let conn = open_db_in_memory().unwrap();
    let repo = KeyedPostRepository::new(&conn);

    repo.create_post(Post::new(1, 1, "<p>a</p>")).unwrap();
    repo.create_post(Post::new(1, 1, "<p>b</p>")).unwrap();

    assert_eq!(repo.find_all().unwrap(), repo.find_all().unwrap());
}

#[test]
fn save_overwrites_the_entry_at_the_same_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = KeyedPostRepository::new(&conn);

    repo.save_post(Post::new(1, 1, "<p>draft</p>")).unwrap();
    repo.save_post(Post::new(1, 1, "<p>final</p>")).unwrap();

    let posts = repo.find_all().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].content, "<p>final</p>");
}

#[test]
fn find_by_unknown_id_is_none_not_error() {
    let conn = open_db_in_memory().unwrap();
    let repo = KeyedPostRepository::new(&conn);

    assert!(repo.find_post_by_id(&EntityId::Int(42)).unwrap().is_none());
}

#[test]
fn markup_only_content_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let repo = KeyedPostRepository::new(&conn);

    let err = repo.create_post(Post::new(1, 1, "<p><br></p>")).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert!(repo.find_all().unwrap().is_empty());
}
