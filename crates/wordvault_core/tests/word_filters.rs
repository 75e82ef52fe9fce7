use rusqlite::{params, Connection};
use wordvault_core::db::open_store_in_memory;
use wordvault_core::model::taxonomy::NewPartOfSpeech;
use wordvault_core::{
    AccountRepository, NewUser, SqliteAccountRepository, SqliteTaxonomyRepository,
    SqliteWordListRepository, SqliteWordRepository, TaxonomyRepository, UserId, WordListService,
    WordService,
};

#[test]
fn text_filter_matches_substrings_case_insensitively() {
    let conn = open_store_in_memory().unwrap();
    let alice = seed_user(&conn, "alice", "a@x.com");
    let service = WordService::new(SqliteWordRepository::new(&conn));

    seed_word(&conn, &service, alice, "concatenate", 1000);
    seed_word(&conn, &service, alice, "dog", 2000);
    seed_word(&conn, &service, alice, "CATALOG", 3000);

    let matched = service.list_words(alice, Some("cat"), None, 0).unwrap();
    let texts: Vec<_> = matched.iter().map(|w| w.text.as_str()).collect();
    assert_eq!(texts, vec!["concatenate", "CATALOG"]);

    let none = service.list_words(alice, Some("xyz"), None, 0).unwrap();
    assert!(none.is_empty());
}

#[test]
fn blank_filter_is_treated_as_no_filter() {
    let conn = open_store_in_memory().unwrap();
    let alice = seed_user(&conn, "alice", "a@x.com");
    let service = WordService::new(SqliteWordRepository::new(&conn));

    seed_word(&conn, &service, alice, "bonjour", 1000);
    seed_word(&conn, &service, alice, "salut", 2000);

    let all = service.list_words(alice, Some("   "), None, 0).unwrap();
    assert_eq!(all.len(), 2);
}

#[test]
fn like_metacharacters_in_the_filter_are_literal() {
    let conn = open_store_in_memory().unwrap();
    let alice = seed_user(&conn, "alice", "a@x.com");
    let service = WordService::new(SqliteWordRepository::new(&conn));

    seed_word(&conn, &service, alice, "100%_done", 1000);
    seed_word(&conn, &service, alice, "100xydone", 2000);

    let matched = service.list_words(alice, Some("0%_"), None, 0).unwrap();
    let texts: Vec<_> = matched.iter().map(|w| w.text.as_str()).collect();
    assert_eq!(texts, vec!["100%_done"]);
}

#[test]
fn listing_is_ordered_by_date_added_and_paginated() {
    let conn = open_store_in_memory().unwrap();
    let alice = seed_user(&conn, "alice", "a@x.com");
    let service = WordService::new(SqliteWordRepository::new(&conn));

    seed_word(&conn, &service, alice, "alpha", 3000);
    seed_word(&conn, &service, alice, "beta", 1000);
    seed_word(&conn, &service, alice, "gamma", 2000);

    let all = service.list_words(alice, None, None, 0).unwrap();
    let texts: Vec<_> = all.iter().map(|w| w.text.as_str()).collect();
    assert_eq!(texts, vec!["beta", "gamma", "alpha"]);

    let page = service.list_words(alice, None, Some(2), 1).unwrap();
    let texts: Vec<_> = page.iter().map(|w| w.text.as_str()).collect();
    assert_eq!(texts, vec!["gamma", "alpha"]);

    // Offset without limit still skips rows.
    let rest = service.list_words(alice, None, None, 2).unwrap();
    let texts: Vec<_> = rest.iter().map(|w| w.text.as_str()).collect();
    assert_eq!(texts, vec!["alpha"]);
}

#[test]
fn summaries_carry_part_of_speech_and_earliest_translation() {
    let conn = open_store_in_memory().unwrap();
    let alice = seed_user(&conn, "alice", "a@x.com");
    let service = WordService::new(SqliteWordRepository::new(&conn));
    let taxonomy = SqliteTaxonomyRepository::new(&conn);

    let pos = taxonomy
        .create_part_of_speech(&NewPartOfSpeech::parse("int.", "interjection", "exclaims").unwrap())
        .unwrap();
    let word = service
        .create_word(alice, "bonjour", Some("bɔ̃ʒuʁ"), Some(pos.id), None)
        .unwrap();
    let first = service.add_translation(alice, word.id, "hello").unwrap();
    let second = service.add_translation(alice, word.id, "good day").unwrap();
    conn.execute(
        "UPDATE translations SET date_added = 1000 WHERE id = ?1;",
        [first.id.to_string()],
    )
    .unwrap();
    conn.execute(
        "UPDATE translations SET date_added = 2000 WHERE id = ?1;",
        [second.id.to_string()],
    )
    .unwrap();

    let listed = service.list_words(alice, None, None, 0).unwrap();
    assert_eq!(listed.len(), 1);
    let summary = &listed[0];
    assert_eq!(summary.part_of_speech.as_deref(), Some("int."));
    assert_eq!(summary.first_translation.as_deref(), Some("hello"));
    assert_eq!(summary.translation_count, 2);
    assert_eq!(summary.to_string(), "(int.) bonjour /bɔ̃ʒuʁ/ - hello (+1)");
}

#[test]
fn bare_word_summary_substitutes_missing_pieces() {
    let conn = open_store_in_memory().unwrap();
    let alice = seed_user(&conn, "alice", "a@x.com");
    let service = WordService::new(SqliteWordRepository::new(&conn));

    service.create_word(alice, "bonjour", None, None, None).unwrap();

    let listed = service.list_words(alice, None, None, 0).unwrap();
    assert_eq!(listed[0].to_string(), "(n/a) bonjour /n/a/ - n/a");
}

#[test]
fn list_scoped_search_returns_only_matching_members() {
    let conn = open_store_in_memory().unwrap();
    let alice = seed_user(&conn, "alice", "a@x.com");
    let words = WordService::new(SqliteWordRepository::new(&conn));
    let lists = WordListService::new(SqliteWordListRepository::new(&conn));

    let travel = lists.create_word_list(alice, "Travel", None).unwrap();
    let bonjour = words.create_word(alice, "bonjour", None, None, None).unwrap();
    let merci = words.create_word(alice, "merci", None, None, None).unwrap();
    words.create_word(alice, "bonbon", None, None, None).unwrap();
    words.add_word_to_list(alice, bonjour.id, travel.id).unwrap();
    words.add_word_to_list(alice, merci.id, travel.id).unwrap();

    let matched = words
        .list_words_in_list(alice, travel.id, Some("bon"))
        .unwrap();
    let texts: Vec<_> = matched.iter().map(|w| w.text.as_str()).collect();
    assert_eq!(texts, vec!["bonjour"]);

    let none = words
        .list_words_in_list(alice, travel.id, Some("xyz"))
        .unwrap();
    assert!(none.is_empty());
}

fn seed_user(conn: &Connection, username: &str, email: &str) -> UserId {
    let repo = SqliteAccountRepository::new(conn);
    let new_user = NewUser::parse(username, email, "Test", "User").unwrap();
    repo.create_user(&new_user, "hash-for-tests").unwrap().id
}

fn seed_word(
    conn: &Connection,
    service: &WordService<SqliteWordRepository<'_>>,
    user_id: UserId,
    text: &str,
    date_added: i64,
) {
    let word = service.create_word(user_id, text, None, None, None).unwrap();
    conn.execute(
        "UPDATE words SET date_added = ?1 WHERE id = ?2;",
        params![date_added, word.id.to_string()],
    )
    .unwrap();
}
