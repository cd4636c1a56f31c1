//! Database integration tests
//!
//! Each test starts its own PostgreSQL container, applies the migrations,
//! imports a small fixture and checks the read queries against it.
//!
//! ```bash
//! cargo test -p hamlet-server --test db_tests -- --ignored --nocapture
//! ```

mod common;

use common::{init_test_tracing, TestPostgres};
use hamlet_common::types::Gender;
use hamlet_server::features::candidates::queries::{
    get, list, stats, trending, GetCandidateQuery, ListCandidatesParams, TrendingCandidatesParams,
};
use hamlet_server::features::civic::queries::{
    get_governorate, list_governorates, list_parties, GetGovernorateQuery,
};
use hamlet_server::features::shared::error_helpers::{check_constraint_violation, ConstraintViolation};
use hamlet_server::ingest::{
    models::{NewGovernorate, NewParty},
    run_import, source::json_records, CandidateStore, ImportConfig, ImportReport, PgCandidateStore,
};
use sqlx::PgPool;
use std::io::Cursor;

const FIXTURE: &str = r#"[
    {"fullName": "Ali Hassan", "gender": "ذكر", "nominationType": "مستقل",
     "electoralDistrict": "Baghdad", "candidateSequence": "12",
     "nameOnBallot": "State of Law", "ballotNumber": "105"},
    {"fullName": "Zainab Karim", "gender": "F", "nominationType": "Party",
     "electoralDistrict": "bagdad", "candidateSequence": "3",
     "nameOnBallot": "state of law", "ballotNumber": "105"},
    {"fullName": "Huda Salim", "gender": "أنثى", "nominationType": "Coalition",
     "electoralDistrict": "Basrah", "candidateSequence": "1",
     "nameOnBallot": "Progress Alliance"},
    {"fullName": "Huda  Salim", "gender": "Female", "nominationType": "Coalition",
     "electoralDistrict": "Basra", "candidateSequence": "2",
     "nameOnBallot": "Progress Alliance"}
]"#;

async fn import_fixture(pool: &PgPool) -> ImportReport {
    let store = PgCandidateStore::new(pool.clone());
    let records = json_records(Cursor::new(FIXTURE.as_bytes().to_vec())).unwrap();
    run_import(records, &store, &ImportConfig::default()).await
}

async fn candidate_id(pool: &PgPool, full_name: &str) -> uuid::Uuid {
    sqlx::query_scalar("SELECT id FROM election_candidates WHERE full_name = $1")
        .bind(full_name)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Mark the second Huda Salim row as a duplicate of the first
async fn mark_duplicate(pool: &PgPool) {
    let original = candidate_id(pool, "Huda Salim").await;
    sqlx::query("UPDATE election_candidates SET duplicate_of_id = $1 WHERE full_name = 'Huda  Salim'")
        .bind(original)
        .execute(pool)
        .await
        .unwrap();
}

fn params(pairs: &[(&str, &str)]) -> ListCandidatesParams {
    let mut params = ListCandidatesParams::default();
    for (key, value) in pairs {
        let value = Some(value.to_string());
        match *key {
            "limit" => params.limit = value,
            "gender" => params.gender = value,
            "search" => params.search = value,
            "sort" => params.sort = value,
            "order" => params.order = value,
            other => panic!("unsupported param {other}"),
        }
    }
    params
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_import_is_idempotent_against_postgres() {
    init_test_tracing();
    let pg = TestPostgres::start().await.expect("Failed to start PostgreSQL");

    let first = import_fixture(pg.pool()).await;
    let second = import_fixture(pg.pool()).await;

    assert_eq!(first.imported, 4);
    assert_eq!(second.imported, 0);
    assert_eq!(second.duplicates, 4);

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM election_candidates")
        .fetch_one(pg.pool())
        .await
        .unwrap();
    assert_eq!(total, 4);

    let parties = list_parties::handle(pg.pool().clone()).await.unwrap();
    assert_eq!(parties.len(), 2);
    let governorates = list_governorates::handle(pg.pool().clone()).await.unwrap();
    let names: Vec<_> = governorates.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["Baghdad", "Basra"]);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_upserts_return_the_same_row() {
    init_test_tracing();
    let pg = TestPostgres::start().await.expect("Failed to start PostgreSQL");
    let store = PgCandidateStore::new(pg.pool().clone());

    let party = |name: &str, ballot_number| NewParty {
        name: name.to_string(),
        code: "SOL".to_string(),
        ballot_number,
    };
    let a = store.upsert_party(&party("State of Law", None)).await.unwrap();
    let b = store.upsert_party(&party("STATE OF LAW", Some(105))).await.unwrap();
    assert_eq!(a, b);

    let ballot: Option<i32> = sqlx::query_scalar("SELECT ballot_number FROM parties WHERE id = $1")
        .bind(a)
        .fetch_one(pg.pool())
        .await
        .unwrap();
    assert_eq!(ballot, Some(105));

    let governorate = NewGovernorate {
        name: "Dhi Qar".to_string(),
        name_arabic: Some("ذي قار".to_string()),
        code: "DHI".to_string(),
        slug: "dhi-qar".to_string(),
    };
    let g1 = store.upsert_governorate(&governorate).await.unwrap();
    let g2 = store.upsert_governorate(&governorate).await.unwrap();
    assert_eq!(g1, g2);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_listing_filters_and_caps() {
    init_test_tracing();
    let pg = TestPostgres::start().await.expect("Failed to start PostgreSQL");
    import_fixture(pg.pool()).await;
    mark_duplicate(pg.pool()).await;

    let females = list::handle(pg.pool().clone(), params(&[("gender", "Female")]))
        .await
        .unwrap();
    assert_eq!(females.pagination.total, 2);
    assert!(females.data.iter().all(|c| c.gender == Gender::Female));
    assert!(females.data.iter().all(|c| c.full_name != "Huda  Salim"));

    let capped = list::handle(pg.pool().clone(), params(&[("limit", "500")]))
        .await
        .unwrap();
    assert_eq!(capped.pagination.limit, 100);
    assert_eq!(capped.data.len(), 3);

    let searched = list::handle(pg.pool().clone(), params(&[("search", "zain")]))
        .await
        .unwrap();
    assert_eq!(searched.data.len(), 1);
    assert_eq!(searched.data[0].full_name, "Zainab Karim");

    let wildcard = list::handle(pg.pool().clone(), params(&[("search", "%")]))
        .await
        .unwrap();
    assert_eq!(wildcard.pagination.total, 0);

    let by_name = list::handle(pg.pool().clone(), params(&[("sort", "name"), ("order", "desc")]))
        .await
        .unwrap();
    let names: Vec<_> = by_name.data.iter().map(|c| c.full_name.as_str()).collect();
    assert_eq!(names, vec!["Zainab Karim", "Huda Salim", "Ali Hassan"]);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_detail_stats_and_trending() {
    init_test_tracing();
    let pg = TestPostgres::start().await.expect("Failed to start PostgreSQL");
    import_fixture(pg.pool()).await;
    mark_duplicate(pg.pool()).await;

    let ali = candidate_id(pg.pool(), "Ali Hassan").await;
    sqlx::query("UPDATE election_candidates SET votes = 900 WHERE id = $1")
        .bind(ali)
        .execute(pg.pool())
        .await
        .unwrap();

    let detail = get::handle(pg.pool().clone(), GetCandidateQuery { id: ali.to_string() })
        .await
        .unwrap();
    assert_eq!(detail.party.unwrap().name, "State of Law");
    assert_eq!(detail.governorate.unwrap().slug, "baghdad");
    assert!(detail.social_user.is_none());

    let missing = get::handle(
        pg.pool().clone(),
        GetCandidateQuery {
            id: uuid::Uuid::new_v4().to_string(),
        },
    )
    .await;
    assert!(matches!(missing, Err(get::GetCandidateError::NotFound)));

    let overview = stats::handle(pg.pool().clone()).await.unwrap();
    assert_eq!(overview.total_candidates, 3);
    assert_eq!(overview.gender_distribution.male, 1);
    assert_eq!(overview.gender_distribution.female, 2);

    let top = trending::handle(pg.pool().clone(), TrendingCandidatesParams { limit: Some("2".into()) })
        .await
        .unwrap();
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].full_name, "Ali Hassan");

    let baghdad = get_governorate::handle(
        pg.pool().clone(),
        GetGovernorateQuery {
            slug: "Baghdad".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(baghdad.candidate_count, 2);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_unique_violation_is_detected() {
    init_test_tracing();
    let pg = TestPostgres::start().await.expect("Failed to start PostgreSQL");

    let insert = "INSERT INTO governorates (name, code, slug) VALUES ($1, 'KIR', 'kirkuk')";
    sqlx::query(insert).bind("Kirkuk").execute(pg.pool()).await.unwrap();
    let err = sqlx::query(insert)
        .bind("Kirkuk City")
        .execute(pg.pool())
        .await
        .unwrap_err();

    assert!(matches!(
        check_constraint_violation(err),
        ConstraintViolation::UniqueViolation
    ));
}
