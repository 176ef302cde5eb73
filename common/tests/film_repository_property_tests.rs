// Property-based tests for the film repository contract
// Runs against the in-memory backend; the MySQL backend is covered by integration-tests

use common::db::{FilmRepository, InMemoryFilmRepository};
use common::errors::DatabaseError;
use common::models::{Film, SearchPattern, DEFAULT_LANGUAGE_ID};
use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

fn film_strategy() -> impl Strategy<Value = Film> {
    (
        "[A-Z][A-Z0-9 :/-]{0,30}",
        1901i32..=2155,
        1i32..=6,
    )
        .prop_map(|(title, year, language)| Film::new(title, year).with_language(language))
}

fn seeded_repository(films: &[Film]) -> (InMemoryFilmRepository, Vec<Film>) {
    let rt = runtime();
    let repo = InMemoryFilmRepository::new();
    let created = rt.block_on(async {
        let mut created = Vec::new();
        for film in films {
            created.push(repo.create(film).await.unwrap());
        }
        created
    });
    (repo, created)
}

/// **Property: create then lookup**
///
/// *For any* valid film r, `create(r)` returns a persisted id whose row
/// carries r's title, release year and language.
#[test]
fn property_create_then_lookup_round_trip() {
    proptest!(|(film in film_strategy())| {
        let rt = runtime();
        let repo = InMemoryFilmRepository::new();

        let created = rt.block_on(repo.create(&film)).unwrap();
        prop_assert!(created.is_persisted());

        let stored = rt.block_on(repo.find_by_id(created.id)).unwrap().unwrap();
        prop_assert_eq!(&stored.title, &film.title);
        prop_assert_eq!(stored.release_year, film.release_year);
        prop_assert_eq!(stored.language_id, film.language_id);
    });
}

/// **Property: prefix search is a filter of list_all**
///
/// *For any* stored films and prefix p, `search(p)` equals the subset of
/// `list_all()` whose title starts with p, in the same order.
#[test]
fn property_search_is_prefix_subset_of_list_all() {
    proptest!(|(
        films in prop::collection::vec(film_strategy(), 0..20),
        prefix in "[A-Z]{0,3}"
    )| {
        let (repo, _) = seeded_repository(&films);
        let rt = runtime();

        let all = rt.block_on(repo.list_all()).unwrap();
        let found = rt
            .block_on(repo.search(&SearchPattern::starts_with(prefix.clone())))
            .unwrap();

        let expected: Vec<Film> = all
            .into_iter()
            .filter(|f| f.title.starts_with(&prefix))
            .collect();
        prop_assert_eq!(found, expected);
    });
}

/// **Property: delete removes exactly one row**
///
/// *For any* stored films, deleting one id removes it from `list_all()`
/// and a second delete of the same id fails without touching other rows.
#[test]
fn property_delete_is_isolated() {
    proptest!(|(
        films in prop::collection::vec(film_strategy(), 1..15),
        pick in any::<prop::sample::Index>()
    )| {
        let (repo, created) = seeded_repository(&films);
        let rt = runtime();
        let victim = created[pick.index(created.len())].id;

        rt.block_on(repo.delete(victim)).unwrap();
        let after_first = rt.block_on(repo.list_all()).unwrap();
        prop_assert!(after_first.iter().all(|f| f.id != victim));
        prop_assert_eq!(after_first.len(), created.len() - 1);

        let second = rt.block_on(repo.delete(victim));
        prop_assert!(matches!(second, Err(DatabaseError::NotFound(_))));
        let after_second = rt.block_on(repo.list_all()).unwrap();
        prop_assert_eq!(after_first, after_second);
    });
}

/// **Property: update changes exactly one row**
///
/// *For any* stored films, `update(id, r)` rewrites that row to r's values
/// and leaves every other row as it was.
#[test]
fn property_update_is_isolated() {
    proptest!(|(
        films in prop::collection::vec(film_strategy(), 1..15),
        replacement in film_strategy(),
        pick in any::<prop::sample::Index>()
    )| {
        let (repo, created) = seeded_repository(&films);
        let rt = runtime();
        let target = created[pick.index(created.len())].id;

        let returned = rt.block_on(repo.update(target, &replacement)).unwrap();
        prop_assert_eq!(returned.id, target);

        for film in rt.block_on(repo.list_all()).unwrap() {
            if film.id == target {
                prop_assert_eq!(&film.title, &replacement.title);
                prop_assert_eq!(film.release_year, replacement.release_year);
                prop_assert_eq!(film.language_id, replacement.language_id);
            } else {
                let original = created.iter().find(|c| c.id == film.id).unwrap();
                prop_assert_eq!(&film, original);
            }
        }
    });
}

/// **Property: update of a missing id affects nothing**
#[test]
fn property_update_missing_id_is_not_found() {
    proptest!(|(
        films in prop::collection::vec(film_strategy(), 0..10),
        replacement in film_strategy(),
        offset in 1i64..1000
    )| {
        let (repo, created) = seeded_repository(&films);
        let rt = runtime();
        let missing = created.len() as i64 + offset;

        let result = rt.block_on(repo.update(missing, &replacement));
        prop_assert!(matches!(result, Err(DatabaseError::NotFound(_))));
        prop_assert_eq!(rt.block_on(repo.list_all()).unwrap(), created);
    });
}

/// **Property: concurrent creates get distinct ids**
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn property_concurrent_creates_receive_distinct_ids() {
    let repo = Arc::new(InMemoryFilmRepository::new());

    let handles: Vec<_> = (0..50)
        .map(|i| {
            let repo = repo.clone();
            tokio::spawn(async move {
                repo.create(&Film::new(format!("FILM {}", i), 2000))
                    .await
                    .unwrap()
                    .id
            })
        })
        .collect();

    let ids: Vec<i64> = futures::future::join_all(handles)
        .await
        .into_iter()
        .map(|r| r.expect("task panicked"))
        .collect();

    let distinct: HashSet<i64> = ids.iter().copied().collect();
    assert_eq!(distinct.len(), ids.len());
    assert!(ids.iter().all(|id| *id > 0));
}

/// Scenario: creating a new release returns its generated key
#[tokio::test]
async fn test_scenario_create_spider_man() {
    let repo = InMemoryFilmRepository::new();

    let created = repo
        .create(&Film::new("SPIDER-MAN: NO WAY HOME", 2021))
        .await
        .unwrap();

    assert!(created.id > 0);
    assert_eq!(created.title, "SPIDER-MAN: NO WAY HOME");
    assert_eq!(created.release_year, 2021);
    assert_eq!(created.language_id, DEFAULT_LANGUAGE_ID);
}

/// Scenario: update of film 1004 is visible on the next read
#[tokio::test]
async fn test_scenario_update_super_man() {
    let repo = InMemoryFilmRepository::with_films(vec![Film::with_id(1004, "SUPERMAN", 1978)]);

    let requested = Film::with_id(1004, "SUPER/MAN", 2024);
    let returned = repo.update(requested.id, &requested).await.unwrap();
    assert_eq!(returned, requested);

    let stored = repo.find_by_id(1004).await.unwrap().unwrap();
    assert_eq!(stored.title, "SUPER/MAN");
    assert_eq!(stored.release_year, 2024);
}

/// Scenario: delete of film 1005 removes it from the listing
#[tokio::test]
async fn test_scenario_delete_1005() {
    let repo = InMemoryFilmRepository::with_films(vec![
        Film::with_id(1004, "SUPER/MAN", 2024),
        Film::with_id(1005, "ALIEN", 1979),
    ]);

    repo.delete(1005).await.unwrap();

    let all = repo.list_all().await.unwrap();
    assert!(all.iter().all(|f| f.id != 1005));
    assert_eq!(all.len(), 1);
}

/// Scenario: prefix search returns only matching titles
#[tokio::test]
async fn test_scenario_search_alien() {
    let repo = InMemoryFilmRepository::with_films(vec![
        Film::with_id(1, "ALIEN", 1979),
        Film::with_id(2, "ALIENS", 1986),
        Film::with_id(3, "PREDATOR", 1987),
    ]);

    let titles: Vec<String> = repo
        .search(&SearchPattern::starts_with("ALIEN"))
        .await
        .unwrap()
        .into_iter()
        .map(|f| f.title)
        .collect();

    assert_eq!(titles, vec!["ALIEN".to_string(), "ALIENS".to_string()]);

    let everything = repo.search(&SearchPattern::starts_with("")).await.unwrap();
    assert_eq!(everything.len(), 3);
}

/// Validation failures reach the caller instead of being swallowed
#[tokio::test]
async fn test_create_invalid_film_is_reported() {
    let repo = InMemoryFilmRepository::new();

    let result = repo.create(&Film::new("ALIEN", 1800)).await;

    assert!(matches!(result, Err(DatabaseError::Validation(_))));
    assert!(repo.list_all().await.unwrap().is_empty());
}
