use rusqlite::{params, Connection};
use wordvault_core::db::open_store_in_memory;
use wordvault_core::model::taxonomy::NewPartOfSpeech;
use wordvault_core::{
    AccountRepository, NewUser, RepoError, SqliteAccountRepository, SqliteTaxonomyRepository,
    SqliteWordRepository, TaxonomyRepository, UniqueRule, UserId, ValidationError, WordError,
    WordRepository, WordService,
};

#[test]
fn create_and_get_roundtrip() {
    let conn = open_store_in_memory().unwrap();
    let alice = seed_user(&conn, "alice", "a@x.com");
    let service = WordService::new(SqliteWordRepository::new(&conn));

    let word = service
        .create_word(alice, " bonjour ", Some("bɔ̃ʒuʁ"), None, None)
        .unwrap();
    assert_eq!(word.text, "bonjour");
    assert_eq!(word.transcription.as_deref(), Some("bɔ̃ʒuʁ"));
    assert_eq!(word.user_id, alice);
    assert!(word.date_added > 0);

    let loaded = service.get_word(alice, word.id).unwrap().unwrap();
    assert_eq!(loaded, word);
}

#[test]
fn words_are_invisible_to_other_users() {
    let conn = open_store_in_memory().unwrap();
    let alice = seed_user(&conn, "alice", "a@x.com");
    let bob = seed_user(&conn, "bob", "b@x.com");
    let service = WordService::new(SqliteWordRepository::new(&conn));

    let word = service.create_word(alice, "bonjour", None, None, None).unwrap();

    assert!(service.get_word(bob, word.id).unwrap().is_none());
    assert!(matches!(
        service.delete_word(bob, word.id),
        Err(WordError::Repo(RepoError::NotFound { entity: "word", .. }))
    ));
    assert!(service.get_word(alice, word.id).unwrap().is_some());
}

#[test]
fn create_rejects_blank_text_and_unknown_taxonomy_refs() {
    let conn = open_store_in_memory().unwrap();
    let alice = seed_user(&conn, "alice", "a@x.com");
    let service = WordService::new(SqliteWordRepository::new(&conn));

    assert!(matches!(
        service.create_word(alice, "   ", None, None, None),
        Err(WordError::Validation(ValidationError::EmptyText {
            field: "word text"
        }))
    ));

    let bogus = uuid::Uuid::new_v4();
    assert!(matches!(
        service.create_word(alice, "bonjour", None, Some(bogus), None),
        Err(WordError::Repo(RepoError::NotFound {
            entity: "part of speech",
            ..
        }))
    ));
    assert!(matches!(
        service.create_word(alice, "bonjour", None, None, Some(bogus)),
        Err(WordError::Repo(RepoError::NotFound {
            entity: "knowledge level",
            ..
        }))
    ));
}

#[test]
fn duplicate_word_text_conflicts_across_users() {
    let conn = open_store_in_memory().unwrap();
    let alice = seed_user(&conn, "alice", "a@x.com");
    let bob = seed_user(&conn, "bob", "b@x.com");
    let service = WordService::new(SqliteWordRepository::new(&conn));

    service.create_word(alice, "bonjour", None, None, None).unwrap();

    let err = service.create_word(bob, "bonjour", None, None, None).unwrap_err();
    assert!(matches!(
        err,
        WordError::Repo(RepoError::Conflict(UniqueRule::WordTextGlobal))
    ));
}

#[test]
fn update_replaces_fields_and_bumps_date_updated() {
    let conn = open_store_in_memory().unwrap();
    let alice = seed_user(&conn, "alice", "a@x.com");
    let service = WordService::new(SqliteWordRepository::new(&conn));
    let taxonomy = SqliteTaxonomyRepository::new(&conn);

    let pos = taxonomy
        .create_part_of_speech(&NewPartOfSpeech::parse("n.", "noun", "a thing").unwrap())
        .unwrap();
    let word = service
        .create_word(alice, "bonjour", Some("bɔ̃ʒuʁ"), None, None)
        .unwrap();

    conn.execute(
        "UPDATE words SET date_updated = 1000 WHERE id = ?1;",
        [word.id.to_string()],
    )
    .unwrap();

    let updated = service
        .update_word(alice, word.id, "salut", None, Some(pos.id), None)
        .unwrap();
    assert_eq!(updated.text, "salut");
    assert_eq!(updated.transcription, None);
    assert_eq!(updated.part_of_speech_id, Some(pos.id));
    assert!(updated.date_updated > 1000);

    let missing = uuid::Uuid::new_v4();
    assert!(matches!(
        service.update_word(alice, missing, "salut", None, None, None),
        Err(WordError::Repo(RepoError::NotFound { entity: "word", .. }))
    ));
}

#[test]
fn deleting_a_taxonomy_row_detaches_words() {
    let conn = open_store_in_memory().unwrap();
    let alice = seed_user(&conn, "alice", "a@x.com");
    let service = WordService::new(SqliteWordRepository::new(&conn));
    let taxonomy = SqliteTaxonomyRepository::new(&conn);

    let pos = taxonomy
        .create_part_of_speech(&NewPartOfSpeech::parse("n.", "noun", "a thing").unwrap())
        .unwrap();
    let word = service
        .create_word(alice, "bonjour", None, Some(pos.id), None)
        .unwrap();
    assert_eq!(word.part_of_speech_id, Some(pos.id));

    taxonomy.delete_part_of_speech(pos.id).unwrap();

    let detached = service.get_word(alice, word.id).unwrap().unwrap();
    assert_eq!(detached.part_of_speech_id, None);
}

#[test]
fn delete_word_cascades_to_children_and_links() {
    let conn = open_store_in_memory().unwrap();
    let alice = seed_user(&conn, "alice", "a@x.com");
    let service = WordService::new(SqliteWordRepository::new(&conn));

    let word = service.create_word(alice, "bonjour", None, None, None).unwrap();
    service.add_translation(alice, word.id, "hello").unwrap();
    let definition = service.add_definition(alice, word.id, "a greeting").unwrap();
    service
        .add_example(alice, definition.id, "Bonjour, ça va ?")
        .unwrap();

    service.delete_word(alice, word.id).unwrap();

    for table in ["words", "translations", "definitions", "examples"] {
        assert_eq!(count(&conn, table), 0, "table {table} should be empty");
    }
}

#[test]
fn translations_are_listed_oldest_first_and_unique_per_word() {
    let conn = open_store_in_memory().unwrap();
    let alice = seed_user(&conn, "alice", "a@x.com");
    let service = WordService::new(SqliteWordRepository::new(&conn));

    let word = service.create_word(alice, "bonjour", None, None, None).unwrap();
    let first = service.add_translation(alice, word.id, "hello").unwrap();
    let second = service.add_translation(alice, word.id, "good day").unwrap();
    backdate(&conn, "translations", first.id, 1000);
    backdate(&conn, "translations", second.id, 2000);

    let listed = service.list_translations(alice, word.id).unwrap();
    let texts: Vec<_> = listed.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["hello", "good day"]);

    let err = service.add_translation(alice, word.id, "hello").unwrap_err();
    assert!(matches!(
        err,
        WordError::Repo(RepoError::Conflict(UniqueRule::TranslationText))
    ));

    service.remove_translation(alice, first.id).unwrap();
    assert!(matches!(
        service.remove_translation(alice, first.id),
        Err(WordError::Repo(RepoError::NotFound {
            entity: "translation",
            ..
        }))
    ));
}

#[test]
fn children_of_foreign_words_are_unreachable() {
    let conn = open_store_in_memory().unwrap();
    let alice = seed_user(&conn, "alice", "a@x.com");
    let bob = seed_user(&conn, "bob", "b@x.com");
    let service = WordService::new(SqliteWordRepository::new(&conn));

    let word = service.create_word(alice, "bonjour", None, None, None).unwrap();
    let translation = service.add_translation(alice, word.id, "hello").unwrap();
    let definition = service.add_definition(alice, word.id, "a greeting").unwrap();

    assert!(matches!(
        service.add_translation(bob, word.id, "hi"),
        Err(WordError::Repo(RepoError::NotFound { entity: "word", .. }))
    ));
    assert!(matches!(
        service.list_translations(bob, word.id),
        Err(WordError::Repo(RepoError::NotFound { entity: "word", .. }))
    ));
    assert!(matches!(
        service.remove_translation(bob, translation.id),
        Err(WordError::Repo(RepoError::NotFound {
            entity: "translation",
            ..
        }))
    ));
    assert!(matches!(
        service.add_example(bob, definition.id, "Bonjour !"),
        Err(WordError::Repo(RepoError::NotFound {
            entity: "definition",
            ..
        }))
    ));
}

#[test]
fn examples_live_under_definitions() {
    let conn = open_store_in_memory().unwrap();
    let alice = seed_user(&conn, "alice", "a@x.com");
    let service = WordService::new(SqliteWordRepository::new(&conn));

    let word = service.create_word(alice, "bonjour", None, None, None).unwrap();
    let definition = service.add_definition(alice, word.id, "a greeting").unwrap();

    let example = service
        .add_example(alice, definition.id, " Bonjour, ça va ? ")
        .unwrap();
    assert_eq!(example.text, "Bonjour, ça va ?");
    assert_eq!(example.definition_id, definition.id);

    let err = service
        .add_example(alice, definition.id, "Bonjour, ça va ?")
        .unwrap_err();
    assert!(matches!(
        err,
        WordError::Repo(RepoError::Conflict(UniqueRule::ExampleText))
    ));

    let listed = service.list_examples(alice, definition.id).unwrap();
    assert_eq!(listed.len(), 1);

    service.remove_example(alice, example.id).unwrap();
    assert!(service.list_examples(alice, definition.id).unwrap().is_empty());
}

#[test]
fn overview_counts_words_lists_and_recent_additions() {
    let conn = open_store_in_memory().unwrap();
    let alice = seed_user(&conn, "alice", "a@x.com");
    let bob = seed_user(&conn, "bob", "b@x.com");
    let repo = SqliteWordRepository::new(&conn);
    let service = WordService::new(SqliteWordRepository::new(&conn));

    let now: i64 = 1_700_000_000_000;
    let day_ms: i64 = 24 * 60 * 60 * 1000;

    let recent = service.create_word(alice, "bonjour", None, None, None).unwrap();
    let older = service.create_word(alice, "salut", None, None, None).unwrap();
    let ancient = service.create_word(alice, "merci", None, None, None).unwrap();
    backdate_word(&conn, recent.id, now - day_ms);
    backdate_word(&conn, older.id, now - 6 * day_ms);
    backdate_word(&conn, ancient.id, now - 8 * day_ms);

    conn.execute(
        "INSERT INTO word_lists (id, user_id, title) VALUES (?1, ?2, 'Travel');",
        params![uuid::Uuid::new_v4().to_string(), alice.to_string()],
    )
    .unwrap();

    let overview = repo.overview(alice, now).unwrap();
    assert_eq!(overview.words_total, 3);
    assert_eq!(overview.word_lists_total, 1);
    assert_eq!(overview.words_added_last_week, 2);

    let empty = repo.overview(bob, now).unwrap();
    assert_eq!(empty.words_total, 0);
    assert_eq!(empty.word_lists_total, 0);
    assert_eq!(empty.words_added_last_week, 0);
}

fn seed_user(conn: &Connection, username: &str, email: &str) -> UserId {
    let repo = SqliteAccountRepository::new(conn);
    let new_user = NewUser::parse(username, email, "Test", "User").unwrap();
    repo.create_user(&new_user, "hash-for-tests").unwrap().id
}

fn backdate(conn: &Connection, table: &str, id: uuid::Uuid, date_added: i64) {
    conn.execute(
        &format!("UPDATE {table} SET date_added = ?1 WHERE id = ?2;"),
        params![date_added, id.to_string()],
    )
    .unwrap();
}

fn backdate_word(conn: &Connection, id: uuid::Uuid, date_added: i64) {
    backdate(conn, "words", id, date_added);
}

fn count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
        row.get(0)
    })
    .unwrap()
}
