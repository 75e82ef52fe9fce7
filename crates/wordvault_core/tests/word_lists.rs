use rusqlite::Connection;
use wordvault_core::db::open_store_in_memory;
use wordvault_core::{
    AccountRepository, NewUser, RepoError, SqliteAccountRepository, SqliteWordListRepository,
    SqliteWordRepository, UniqueRule, UserId, ValidationError, WordError, WordListError,
    WordListService, WordService,
};

#[test]
fn create_and_get_roundtrip_with_blank_description_dropped() {
    let conn = open_store_in_memory().unwrap();
    let alice = seed_user(&conn, "alice", "a@x.com");
    let service = WordListService::new(SqliteWordListRepository::new(&conn));

    let list = service
        .create_word_list(alice, " Travel ", Some("   "))
        .unwrap();
    assert_eq!(list.title, "Travel");
    assert_eq!(list.description, None);
    assert_eq!(list.date_last_opened, None);
    assert!(list.date_created > 0);

    let loaded = service.get_word_list(alice, list.id).unwrap().unwrap();
    assert_eq!(loaded, list);
}

#[test]
fn create_rejects_blank_title() {
    let conn = open_store_in_memory().unwrap();
    let alice = seed_user(&conn, "alice", "a@x.com");
    let service = WordListService::new(SqliteWordListRepository::new(&conn));

    assert!(matches!(
        service.create_word_list(alice, "  ", None),
        Err(WordListError::Validation(ValidationError::EmptyText {
            field: "title"
        }))
    ));
}

#[test]
fn duplicate_title_conflicts_per_user_only() {
    let conn = open_store_in_memory().unwrap();
    let alice = seed_user(&conn, "alice", "a@x.com");
    let bob = seed_user(&conn, "bob", "b@x.com");
    let service = WordListService::new(SqliteWordListRepository::new(&conn));

    service.create_word_list(alice, "Travel", None).unwrap();

    let err = service.create_word_list(alice, "Travel", None).unwrap_err();
    assert!(matches!(
        err,
        WordListError::Repo(RepoError::Conflict(UniqueRule::WordListTitle))
    ));

    // Same title under another account is fine.
    service.create_word_list(bob, "Travel", None).unwrap();
}

#[test]
fn lists_are_ordered_by_title_and_filterable() {
    let conn = open_store_in_memory().unwrap();
    let alice = seed_user(&conn, "alice", "a@x.com");
    let service = WordListService::new(SqliteWordListRepository::new(&conn));

    service.create_word_list(alice, "Home", None).unwrap();
    service.create_word_list(alice, "Travel", None).unwrap();
    service.create_word_list(alice, "travel notes", None).unwrap();

    let all = service.list_word_lists(alice, None).unwrap();
    let titles: Vec<_> = all.iter().map(|l| l.title.as_str()).collect();
    assert_eq!(titles, vec!["Home", "Travel", "travel notes"]);

    let filtered = service.list_word_lists(alice, Some("rav")).unwrap();
    let titles: Vec<_> = filtered.iter().map(|l| l.title.as_str()).collect();
    assert_eq!(titles, vec!["Travel", "travel notes"]);

    // Blank filters mean no filter.
    let blank = service.list_word_lists(alice, Some("   ")).unwrap();
    assert_eq!(blank.len(), 3);

    let none = service.list_word_lists(alice, Some("xyz")).unwrap();
    assert!(none.is_empty());
}

#[test]
fn update_replaces_fields_and_bumps_date_updated() {
    let conn = open_store_in_memory().unwrap();
    let alice = seed_user(&conn, "alice", "a@x.com");
    let service = WordListService::new(SqliteWordListRepository::new(&conn));

    let list = service
        .create_word_list(alice, "Travel", Some("places to go"))
        .unwrap();
    conn.execute(
        "UPDATE word_lists SET date_updated = 1000 WHERE id = ?1;",
        [list.id.to_string()],
    )
    .unwrap();

    let updated = service
        .update_word_list(alice, list.id, "Trips", None)
        .unwrap();
    assert_eq!(updated.title, "Trips");
    assert_eq!(updated.description, None);
    assert!(updated.date_updated > 1000);

    let missing = uuid::Uuid::new_v4();
    assert!(matches!(
        service.update_word_list(alice, missing, "Trips", None),
        Err(WordListError::Repo(RepoError::NotFound {
            entity: "word list",
            ..
        }))
    ));
}

#[test]
fn mark_opened_stamps_date_last_opened() {
    let conn = open_store_in_memory().unwrap();
    let alice = seed_user(&conn, "alice", "a@x.com");
    let service = WordListService::new(SqliteWordListRepository::new(&conn));

    let list = service.create_word_list(alice, "Travel", None).unwrap();
    assert_eq!(list.date_last_opened, None);

    service.mark_word_list_opened(alice, list.id).unwrap();

    let loaded = service.get_word_list(alice, list.id).unwrap().unwrap();
    assert!(loaded.date_last_opened.is_some());
}

#[test]
fn lists_are_invisible_to_other_users() {
    let conn = open_store_in_memory().unwrap();
    let alice = seed_user(&conn, "alice", "a@x.com");
    let bob = seed_user(&conn, "bob", "b@x.com");
    let service = WordListService::new(SqliteWordListRepository::new(&conn));

    let list = service.create_word_list(alice, "Travel", None).unwrap();

    assert!(service.get_word_list(bob, list.id).unwrap().is_none());
    assert!(matches!(
        service.delete_word_list(bob, list.id),
        Err(WordListError::Repo(RepoError::NotFound {
            entity: "word list",
            ..
        }))
    ));
    assert!(service.get_word_list(alice, list.id).unwrap().is_some());
}

#[test]
fn membership_is_unique_and_scoped_to_the_owner() {
    let conn = open_store_in_memory().unwrap();
    let alice = seed_user(&conn, "alice", "a@x.com");
    let bob = seed_user(&conn, "bob", "b@x.com");
    let lists = WordListService::new(SqliteWordListRepository::new(&conn));
    let words = WordService::new(SqliteWordRepository::new(&conn));

    let list = lists.create_word_list(alice, "Travel", None).unwrap();
    let word = words.create_word(alice, "bonjour", None, None, None).unwrap();

    words.add_word_to_list(alice, word.id, list.id).unwrap();

    let err = words.add_word_to_list(alice, word.id, list.id).unwrap_err();
    assert!(matches!(
        err,
        WordError::Repo(RepoError::Conflict(UniqueRule::ListMembership))
    ));

    // Another user cannot touch the membership at all.
    assert!(matches!(
        words.add_word_to_list(bob, word.id, list.id),
        Err(WordError::Repo(RepoError::NotFound { entity: "word", .. }))
    ));
    assert!(matches!(
        words.list_words_in_list(bob, list.id, None),
        Err(WordError::Repo(RepoError::NotFound {
            entity: "word list",
            ..
        }))
    ));

    words.remove_word_from_list(alice, word.id, list.id).unwrap();
    assert!(matches!(
        words.remove_word_from_list(alice, word.id, list.id),
        Err(WordError::Repo(RepoError::NotFound {
            entity: "list membership",
            ..
        }))
    ));
}

#[test]
fn deleting_a_list_keeps_its_member_words() {
    let conn = open_store_in_memory().unwrap();
    let alice = seed_user(&conn, "alice", "a@x.com");
    let lists = WordListService::new(SqliteWordListRepository::new(&conn));
    let words = WordService::new(SqliteWordRepository::new(&conn));

    let list = lists.create_word_list(alice, "Travel", None).unwrap();
    let word = words.create_word(alice, "bonjour", None, None, None).unwrap();
    words.add_word_to_list(alice, word.id, list.id).unwrap();

    lists.delete_word_list(alice, list.id).unwrap();

    assert!(words.get_word(alice, word.id).unwrap().is_some());
    let memberships: i64 = conn
        .query_row("SELECT COUNT(*) FROM word_word_lists;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(memberships, 0);
}

fn seed_user(conn: &Connection, username: &str, email: &str) -> UserId {
    let repo = SqliteAccountRepository::new(conn);
    let new_user = NewUser::parse(username, email, "Test", "User").unwrap();
    repo.create_user(&new_user, "hash-for-tests").unwrap().id
}
