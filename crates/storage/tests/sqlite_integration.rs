use sawadee_core::model::{AnswerStat, QuizDomain, Settings, StatsMap};
use storage::repository::{SettingsRepository, StatsRepository, StorageError};
use storage::sqlite::SqliteRepository;

async fn connect(name: &str) -> SqliteRepository {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    let repo = SqliteRepository::connect(&url).await.expect("connect");
    repo.migrate().await.expect("migrate");
    repo
}

#[tokio::test]
async fn sqlite_roundtrip_replaces_whole_domain_mapping() {
    let repo = connect("memdb_stats_roundtrip").await;

    let mut stats = StatsMap::new();
    stats.record_answer("ก", true);
    stats.record_answer("ข", false);
    repo.save_stats(QuizDomain::InitialConsonant, &stats)
        .await
        .unwrap();

    let mut replacement = StatsMap::new();
    replacement.record_answer("ค", true);
    repo.save_stats(QuizDomain::InitialConsonant, &replacement)
        .await
        .unwrap();

    let fetched = repo
        .load_stats(QuizDomain::InitialConsonant)
        .await
        .unwrap()
        .expect("stored");
    assert_eq!(fetched, replacement);
    assert!(fetched.get("ก").is_none());
}

#[tokio::test]
async fn sqlite_keeps_domains_independent() {
    let repo = connect("memdb_stats_domains").await;

    let mut consonants = StatsMap::new();
    consonants.record_answer("น", true);
    repo.save_stats(QuizDomain::InitialConsonant, &consonants)
        .await
        .unwrap();

    let mut finals = StatsMap::new();
    finals.record_answer("น", false);
    finals.record_answer("น", false);
    repo.save_stats(QuizDomain::FinalConsonant, &finals)
        .await
        .unwrap();

    let initial = repo
        .load_stats(QuizDomain::InitialConsonant)
        .await
        .unwrap()
        .unwrap();
    let fin = repo
        .load_stats(QuizDomain::FinalConsonant)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(initial.get("น"), Some(&AnswerStat::from_persisted(1, 1).unwrap()));
    assert_eq!(fin.get("น"), Some(&AnswerStat::from_persisted(2, 0).unwrap()));
    assert!(repo.load_stats(QuizDomain::Word).await.unwrap().is_none());
}

#[tokio::test]
async fn sqlite_reports_corrupt_entries() {
    let repo = connect("memdb_stats_corrupt").await;
    repo.put_entry("sawadee_number_stats_v1", "{\"๑\": {\"attempts\"")
        .await
        .unwrap();

    let err = repo.load_stats(QuizDomain::Number).await.unwrap_err();
    assert!(matches!(err, StorageError::Serialization(_)));
}

#[tokio::test]
async fn sqlite_keeps_valid_entries_next_to_invalid_ones() {
    let repo = connect("memdb_stats_partial").await;
    repo.put_entry(
        "sawadee_number_stats_v1",
        r#"{"๑":{"attempts":12,"correct":9},"๒":{"attempts":1,"correct":4}}"#,
    )
    .await
    .unwrap();

    let stats = repo.load_stats(QuizDomain::Number).await.unwrap().unwrap();
    assert_eq!(stats.len(), 1);
    assert_eq!(stats.get("๑"), Some(&AnswerStat::from_persisted(12, 9).unwrap()));
}

#[tokio::test]
async fn sqlite_settings_roundtrip() {
    let repo = connect("memdb_settings").await;
    assert!(repo.get_settings().await.unwrap().is_none());

    let settings = Settings::new()
        .with_adaptive_learning(false)
        .with_group_filter(QuizDomain::Vowel, vec!["long".into(), "short".into()]);
    repo.save_settings(&settings).await.unwrap();

    assert_eq!(repo.get_settings().await.unwrap(), Some(settings));
    let raw = repo.get_entry("sawadee_settings_v1").await.unwrap().unwrap();
    assert!(raw.contains("\"adaptiveLearning\":false"));
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let repo = connect("memdb_migrate_twice").await;
    repo.migrate().await.expect("second migrate");
}
