use waypost_core::db::open_db_in_memory;
use waypost_core::{
    EntityId, KeyedPostRepository, KeyedUserRepository, Post, PostRepository, User, UserRepository,
};

fn seed_users(repo: &KeyedUserRepository<'_>) {
    repo.create_user(User::new(1, "ada", "ada@example.com"))
        .unwrap();
    repo.create_user(User::new(1, "grace", "grace@example.com"))
        .unwrap();
}

#[test]
fn find_by_username_returns_the_match() {
    let conn = open_db_in_memory().unwrap();
    let repo = KeyedUserRepository::new(&conn);
    seed_users(&repo);

    let found = repo.find_user_by_username("grace").unwrap().unwrap();
    assert_eq!(found.id, EntityId::Int(2));

    assert!(repo.find_user_by_username("nobody").unwrap().is_none());
}

#[test]
fn duplicate_usernames_resolve_to_the_last_stored_match() {
    let conn = open_db_in_memory().unwrap();
    let repo = KeyedUserRepository::new(&conn);

    repo.create_user(User::new(1, "ada", "first@example.com"))
        .unwrap();
    repo.create_user(User::new(1, "ada", "second@example.com"))
        .unwrap();

    let found = repo.find_user_by_username("ada").unwrap().unwrap();
    assert_eq!(found.email_address, "second@example.com");
}

#[test]
fn find_by_email_scans_the_whole_collection() {
    let conn = open_db_in_memory().unwrap();
    let repo = KeyedUserRepository::new(&conn);
    seed_users(&repo);

    let found = repo.find_user_by_email("ada@example.com").unwrap().unwrap();
    assert_eq!(found.username, "ada");

    assert!(repo
        .find_user_by_email("nobody@example.com")
        .unwrap()
        .is_none());
}

#[test]
fn posts_by_user_filters_in_storage_order() {
    let conn = open_db_in_memory().unwrap();
    let users = KeyedUserRepository::new(&conn);
    let posts = KeyedPostRepository::new(&conn);
    seed_users(&users);

    posts.create_post(Post::new(1, 1, "<p>P1</p>")).unwrap();
    posts.create_post(Post::new(1, 2, "<p>P2</p>")).unwrap();
    posts.create_post(Post::new(1, 1, "<p>P3</p>")).unwrap();

    let by_ada = users.all_posts_by_user(&EntityId::Int(1)).unwrap().unwrap();
    let contents: Vec<&str> = by_ada.iter().map(|post| post.content.as_str()).collect();
    assert_eq!(contents, vec!["<p>P1</p>", "<p>P3</p>"]);
}

#[test]
fn posts_by_unknown_user_is_none_not_empty() {
    let conn = open_db_in_memory().unwrap();
    let users = KeyedUserRepository::new(&conn);
    seed_users(&users);

    assert!(users.all_posts_by_user(&EntityId::Int(99)).unwrap().is_none());
}

#[test]
fn user_with_zero_posts_yields_an_empty_sequence() {
    let conn = open_db_in_memory().unwrap();
    let users = KeyedUserRepository::new(&conn);
    seed_users(&users);

    let by_grace = users.all_posts_by_user(&EntityId::Int(2)).unwrap().unwrap();
    assert!(by_grace.is_empty());
}
