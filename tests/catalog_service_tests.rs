//! Catalog Service Tests
//!
//! End-to-end tests through the domain facade:
//! - Entity lifecycle with identity assignment and validation
//! - Friendship use cases resolving full user records
//! - Like/unlike and popularity queries
//! - Cascades on user and film deletion

use filmgraph::config::EngineConfig;
use filmgraph::errors::DomainError;
use filmgraph::service::CatalogService;
use filmgraph::types::{Film, FilmId, User, UserId};

fn setup_service() -> CatalogService {
    CatalogService::new(EngineConfig::default())
}

fn create_user(service: &CatalogService, email: &str, login: &str) -> UserId {
    service
        .create_user(User::new(email, login))
        .expect("user creation must succeed")
        .id
        .expect("id must be assigned")
}

fn create_film(service: &CatalogService, name: &str) -> FilmId {
    service
        .create_film(Film::new(name))
        .expect("film creation must succeed")
        .id
        .expect("id must be assigned")
}

#[test]
fn ids_are_assigned_from_one_per_type() {
    let service = setup_service();

    assert_eq!(create_user(&service, "a@example.com", "a"), UserId(1));
    assert_eq!(create_user(&service, "b@example.com", "b"), UserId(2));
    assert_eq!(create_film(&service, "Alien"), FilmId(1));
    assert_eq!(create_film(&service, "Brazil"), FilmId(2));
}

#[test]
fn created_user_is_registered_everywhere() {
    let service = setup_service();
    let id = create_user(&service, "a@example.com", "a");

    assert_eq!(service.get_user(id).unwrap().login, "a");
    // Friendless but present in the graph
    assert!(service.friends_of(id).unwrap().is_empty());
}

#[test]
fn created_film_starts_at_score_zero() {
    let service = setup_service();
    let id = create_film(&service, "Alien");

    assert_eq!(service.film_score(id).unwrap(), 0);
    assert_eq!(service.popular_films(Some(1)).unwrap()[0].id, Some(id));
}

#[test]
fn duplicate_email_rejected_at_create_and_update() {
    let service = setup_service();
    create_user(&service, "a@example.com", "a");
    let b = create_user(&service, "b@example.com", "b");

    assert!(matches!(
        service.create_user(User::new("a@example.com", "c")),
        Err(DomainError::DuplicateEmail(_))
    ));

    let mut updated = service.get_user(b).unwrap();
    updated.email = "a@example.com".to_string();
    assert!(matches!(
        service.update_user(updated),
        Err(DomainError::DuplicateEmail(_))
    ));
}

#[test]
fn blank_name_defaults_to_login() {
    let service = setup_service();
    let user = service
        .create_user(User::new("a@example.com", "alice"))
        .unwrap();
    assert_eq!(user.name, "alice");
}

#[test]
fn invalid_entities_rejected() {
    let service = setup_service();

    let err = service.create_user(User::new("", "x")).unwrap_err();
    assert_eq!(err.code(), "INVALID_ENTITY");

    let err = service.create_film(Film::new("")).unwrap_err();
    assert_eq!(err.code(), "INVALID_ENTITY");
}

#[test]
fn friendship_use_cases_resolve_records() {
    let service = setup_service();
    let a = create_user(&service, "a@example.com", "a");
    let b = create_user(&service, "b@example.com", "b");
    let c = create_user(&service, "c@example.com", "c");

    service.add_friend(a, b).unwrap();
    service.add_friend(a, c).unwrap();

    let friends = service.friends_of(a).unwrap();
    assert_eq!(
        friends.iter().map(|u| u.id).collect::<Vec<_>>(),
        vec![Some(b), Some(c)]
    );

    let common = service.common_friends(b, c).unwrap();
    assert_eq!(common.len(), 1);
    assert_eq!(common[0].id, Some(a));
    assert_eq!(common[0].login, "a");
}

#[test]
fn deleting_a_user_cascades_into_graph_and_index() {
    let service = setup_service();
    let a = create_user(&service, "a@example.com", "a");
    let b = create_user(&service, "b@example.com", "b");
    let c = create_user(&service, "c@example.com", "c");
    let film = create_film(&service, "Alien");

    service.add_friend(a, b).unwrap();
    service.add_friend(a, c).unwrap();
    service.like_film(film, b).unwrap();
    service.like_film(film, a).unwrap();

    service.delete_user(b).unwrap();

    // Scenario: friends of 1 collapse to {3}, symmetric on 3's side
    let friends_of_a: Vec<_> = service.friends_of(a).unwrap().iter().map(|u| u.id).collect();
    assert_eq!(friends_of_a, vec![Some(c)]);
    let friends_of_c: Vec<_> = service.friends_of(c).unwrap().iter().map(|u| u.id).collect();
    assert_eq!(friends_of_c, vec![Some(a)]);

    // The deleted user's like no longer counts
    assert_eq!(service.film_score(film).unwrap(), 1);

    // The freed email can be claimed again, under a fresh id
    let reborn = create_user(&service, "b@example.com", "b2");
    assert_eq!(reborn, UserId(4));
}

#[test]
fn deleting_a_film_forgets_its_likes() {
    let service = setup_service();
    let user = create_user(&service, "a@example.com", "a");
    let film = create_film(&service, "Alien");
    let other = create_film(&service, "Brazil");

    service.like_film(film, user).unwrap();
    service.delete_film(film).unwrap();

    assert!(matches!(
        service.get_film(film),
        Err(DomainError::FilmNotFound(_))
    ));
    assert!(service.film_score(film).is_err());

    let popular = service.popular_films(None).unwrap();
    assert_eq!(popular.len(), 1);
    assert_eq!(popular[0].id, Some(other));
}

#[test]
fn popularity_ranking_through_the_facade() {
    let service = setup_service();
    let u1 = create_user(&service, "a@example.com", "a");
    let u2 = create_user(&service, "b@example.com", "b");
    let hit = create_film(&service, "Hit");
    let niche = create_film(&service, "Niche");

    service.like_film(hit, u1).unwrap();
    service.like_film(hit, u2).unwrap();
    service.like_film(niche, u2).unwrap();

    let top = service.popular_films(Some(2)).unwrap();
    assert_eq!(top[0].id, Some(hit));
    assert_eq!(top[1].id, Some(niche));

    assert!(service.popular_films(Some(0)).unwrap().is_empty());
    assert!(matches!(
        service.popular_films(Some(-1)),
        Err(DomainError::InvalidArgument { .. })
    ));
}

#[test]
fn double_like_through_facade_keeps_state() {
    let service = setup_service();
    let user = create_user(&service, "a@example.com", "a");
    let film = create_film(&service, "Alien");

    service.like_film(film, user).unwrap();
    assert!(matches!(
        service.like_film(film, user),
        Err(DomainError::AlreadyLiked { .. })
    ));
    assert_eq!(service.film_score(film).unwrap(), 1);

    service.unlike_film(film, user).unwrap();
    assert!(matches!(
        service.unlike_film(film, user),
        Err(DomainError::NotLiked { .. })
    ));
    assert_eq!(service.film_score(film).unwrap(), 0);
}

#[test]
fn update_film_preserves_score() {
    let service = setup_service();
    let user = create_user(&service, "a@example.com", "a");
    let film_id = create_film(&service, "Alien");
    service.like_film(film_id, user).unwrap();

    let mut film = service.get_film(film_id).unwrap();
    film.description = "A haunted-house story on a spaceship".to_string();
    service.update_film(film).unwrap();

    assert_eq!(service.film_score(film_id).unwrap(), 1);
    assert!(service
        .get_film(film_id)
        .unwrap()
        .description
        .contains("spaceship"));
}

#[test]
fn updates_require_known_ids() {
    let service = setup_service();

    let mut ghost = User::new("g@example.com", "ghost");
    ghost.id = Some(UserId(99));
    assert!(matches!(
        service.update_user(ghost),
        Err(DomainError::UserNotFound(_))
    ));

    let mut unfilmed = Film::new("Ghost");
    unfilmed.id = Some(FilmId(99));
    assert!(matches!(
        service.update_film(unfilmed),
        Err(DomainError::FilmNotFound(_))
    ));

    assert!(matches!(
        service.update_user(User::new("g@example.com", "ghost")),
        Err(DomainError::InvalidEntity { .. })
    ));
}

#[test]
fn listings_are_sorted_by_id() {
    let service = setup_service();
    create_user(&service, "a@example.com", "a");
    create_user(&service, "b@example.com", "b");
    create_film(&service, "Beta");
    create_film(&service, "Alpha");

    let users: Vec<_> = service.list_users().iter().map(|u| u.id).collect();
    assert_eq!(users, vec![Some(UserId(1)), Some(UserId(2))]);

    let films: Vec<_> = service.list_films().iter().map(|f| f.id).collect();
    assert_eq!(films, vec![Some(FilmId(1)), Some(FilmId(2))]);
}
