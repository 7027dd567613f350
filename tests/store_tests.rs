mod support;

use showings::{
    prelude::*,
    store::{self, ShowingTour},
};

fn tour(owner: &str, name: &str) -> ShowingTour {
    ShowingTour::new(
        owner,
        name,
        support::stops(2),
        TourConfig::new(Time::from_hm(9, 0), Time::from_hm(12, 0)),
    )
}

#[tokio::test]
async fn save_assigns_id_and_timestamps() {
    let store = MemoryStore::new();
    let id = store.save(tour("agent-1", "Saturday")).await.unwrap();

    let saved = store.get(id).await.unwrap();
    assert_eq!(saved.id, Some(id));
    assert_eq!(saved.name, "Saturday");
    assert!(saved.created_at.is_some());
    assert_eq!(saved.created_at, saved.updated_at);
}

#[tokio::test]
async fn resave_replaces_and_keeps_created_at() {
    let store = MemoryStore::new();
    let id = store.save(tour("agent-1", "Saturday")).await.unwrap();
    let first = store.get(id).await.unwrap();

    let mut updated = first.clone();
    updated.name = "Saturday morning".into();
    updated.description = "Downtown condos".into();
    let same_id = store.save(updated).await.unwrap();

    assert_eq!(same_id, id);
    assert_eq!(store.len(), 1);
    let second = store.get(id).await.unwrap();
    assert_eq!(second.name, "Saturday morning");
    assert_eq!(second.created_at, first.created_at);
    assert!(second.updated_at >= first.updated_at);
}

#[tokio::test]
async fn resave_by_other_owner_is_rejected() {
    let store = MemoryStore::new();
    let id = store.save(tour("agent-1", "Saturday")).await.unwrap();

    let mut stolen = store.get(id).await.unwrap();
    stolen.owner_id = "agent-2".into();
    let result = store.save(stolen).await;
    assert!(matches!(result, Err(store::Error::OwnerMismatch(other)) if other == id));
}

#[tokio::test]
async fn list_is_per_owner() {
    let store = MemoryStore::new();
    store.save(tour("agent-1", "A")).await.unwrap();
    store.save(tour("agent-1", "B")).await.unwrap();
    store.save(tour("agent-2", "C")).await.unwrap();

    let mine = store.list("agent-1").await.unwrap();
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|tour| &*tour.owner_id == "agent-1"));
    assert!(store.list("nobody").await.unwrap().is_empty());
}

#[tokio::test]
async fn list_is_newest_first() {
    let store = MemoryStore::new();
    let old = store.save(tour("agent-1", "Old")).await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let new = store.save(tour("agent-1", "New")).await.unwrap();

    let ids: Vec<_> = store
        .list("agent-1")
        .await
        .unwrap()
        .into_iter()
        .filter_map(|tour| tour.id)
        .collect();
    assert_eq!(ids, vec![new, old]);
}

#[tokio::test]
async fn delete_removes() {
    let store = MemoryStore::new();
    let id = store.save(tour("agent-1", "Saturday")).await.unwrap();
    store.delete(id).await.unwrap();

    assert!(matches!(store.get(id).await, Err(store::Error::NotFound(_))));
    assert!(matches!(
        store.delete(id).await,
        Err(store::Error::NotFound(_))
    ));
}

#[tokio::test]
async fn invalid_tours_are_rejected() {
    let store = MemoryStore::new();
    let nameless = tour("agent-1", "  ");
    assert!(matches!(
        store.save(nameless).await,
        Err(store::Error::Invalid(_))
    ));

    let mut empty = tour("agent-1", "Empty");
    empty.stops.clear();
    assert!(matches!(store.save(empty).await, Err(store::Error::Invalid(_))));
    assert!(store.is_empty());
}

#[tokio::test]
async fn schedule_is_cached_with_the_tour() {
    let stops = support::stops(2);
    let config = TourConfig::new(Time::from_hm(9, 0), Time::from_hm(12, 0));
    let schedule = TourScheduler::new(support::LegTable::new().leg(2, 20))
        .compute_schedule(&stops, &config)
        .unwrap();

    let store = MemoryStore::new();
    let id = store
        .save(ShowingTour::new("agent-1", "Cached", stops, config).with_schedule(schedule.clone()))
        .await
        .unwrap();
    assert_eq!(store.get(id).await.unwrap().schedule, Some(schedule));
}

#[test]
fn tour_json_roundtrip() {
    let stops = support::stops(2);
    let config = TourConfig::new(Time::from_hm(9, 0), Time::from_hm(12, 0));
    let schedule = TourScheduler::new(support::LegTable::new().leg(2, 20))
        .compute_schedule(&stops, &config)
        .unwrap();
    let tour = ShowingTour::new("agent-1", "Json", stops, config).with_schedule(schedule);

    let json = serde_json::to_string(&tour).unwrap();
    let back: ShowingTour = serde_json::from_str(&json).unwrap();
    assert_eq!(back, tour);
}
