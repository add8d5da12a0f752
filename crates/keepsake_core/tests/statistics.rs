use chrono::NaiveDate;
use keepsake_core::{
    EntryDraft, Frequency, HairCareCategory, MemoryKeyValueStore, RecordStore, ReflectionMood,
    StoreConfig,
};

fn jan(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
}

fn reflection_store() -> RecordStore<ReflectionMood, MemoryKeyValueStore> {
    RecordStore::open_default(MemoryKeyValueStore::new()).unwrap()
}

fn hair_store() -> RecordStore<HairCareCategory, MemoryKeyValueStore> {
    RecordStore::open_default(MemoryKeyValueStore::new()).unwrap()
}

#[test]
fn streak_breaks_when_middle_day_is_deleted() {
    let mut store = reflection_store();
    store
        .add(EntryDraft::new("New year", ReflectionMood::Joyful, jan(1)))
        .unwrap();
    let middle = store
        .add(EntryDraft::new("Back to work", ReflectionMood::Anxious, jan(2)))
        .unwrap();
    store
        .add(EntryDraft::new("Quiet evening", ReflectionMood::Calm, jan(3)))
        .unwrap();

    let stats = store.statistics(jan(3));
    assert_eq!(stats.current_streak, 3);
    assert_eq!(stats.best_streak, 3);

    store.delete(middle).unwrap();

    let stats = store.statistics(jan(3));
    assert_eq!(stats.current_streak, 1);
    assert_eq!(stats.best_streak, 1);
}

#[test]
fn historical_run_beats_current_streak() {
    let mut store = reflection_store();
    for day in [20, 19, 18] {
        store
            .add(EntryDraft::new("recent", ReflectionMood::Neutral, jan(day)))
            .unwrap();
    }
    for day in 1..=5 {
        store
            .add(EntryDraft::new("earlier", ReflectionMood::Calm, jan(day)))
            .unwrap();
    }

    let stats = store.statistics(jan(20));
    assert_eq!(stats.current_streak, 3);
    assert_eq!(stats.best_streak, 5);
    assert_eq!(stats.distinct_days, 8);
}

#[test]
fn category_breakdown_covers_every_category_and_sums_to_hundred() {
    let mut store = reflection_store();
    for mood in [
        ReflectionMood::Calm,
        ReflectionMood::Calm,
        ReflectionMood::Sad,
        ReflectionMood::Joyful,
    ] {
        store.add(EntryDraft::new("day", mood, jan(1))).unwrap();
    }

    let stats = store.statistics(jan(1));
    assert_eq!(stats.total, 4);
    assert_eq!(stats.by_category.len(), 5);
    assert_eq!(stats.category_count(ReflectionMood::Calm), 2);
    assert_eq!(stats.category_count(ReflectionMood::Anxious), 0);
    assert_eq!(stats.most_common_category, Some(ReflectionMood::Calm));

    let calm = stats
        .by_category
        .iter()
        .find(|row| row.category == ReflectionMood::Calm)
        .unwrap();
    assert!((calm.percentage - 50.0).abs() < 1e-9);
    let sum: f64 = stats.by_category.iter().map(|row| row.percentage).sum();
    assert!((sum - 100.0).abs() < 1e-9);
}

#[test]
fn empty_store_has_zeroed_statistics() {
    let store = reflection_store();
    let stats = store.statistics(jan(1));
    assert_eq!(stats.total, 0);
    assert_eq!(stats.current_streak, 0);
    assert_eq!(stats.best_streak, 0);
    assert_eq!(stats.most_common_category, None);
    assert!(stats.by_category.iter().all(|row| row.percentage == 0.0));
    assert!(stats.frequencies.is_empty());
}

#[test]
fn same_product_three_times_is_frequent_two_times_is_rare() {
    let mut store = hair_store();
    for day in 1..=3 {
        store
            .add(EntryDraft::new("Argan Oil", HairCareCategory::Oil, jan(day)))
            .unwrap();
    }
    store
        .add(EntryDraft::new("Clay mask", HairCareCategory::Mask, jan(4)))
        .unwrap();
    store
        .add(EntryDraft::new("clay mask ", HairCareCategory::Mask, jan(5)))
        .unwrap();

    assert_eq!(store.classify("argan oil"), Frequency::Frequent);
    assert_eq!(store.classify("Clay Mask"), Frequency::Rare);
    assert_eq!(store.classify("Unused"), Frequency::Rare);

    let stats = store.statistics(jan(5));
    assert_eq!(stats.frequencies.len(), 2);
    assert_eq!(stats.frequencies[0].name, "Argan Oil");
    assert_eq!(stats.frequencies[0].count, 3);
    assert_eq!(stats.frequencies[1].name, "Clay mask");
    assert_eq!(stats.frequencies[1].frequency, Frequency::Rare);

    let frequent: Vec<&str> = stats.frequent_items().map(|i| i.name.as_str()).collect();
    assert_eq!(frequent, ["Argan Oil"]);
}

#[test]
fn configured_threshold_changes_classification() {
    let config = StoreConfig::for_category::<HairCareCategory>().with_frequent_threshold(2);
    let mut store = RecordStore::open(MemoryKeyValueStore::new(), config).unwrap();
    for day in 1..=2 {
        store
            .add(EntryDraft::new("Clay mask", HairCareCategory::Mask, jan(day)))
            .unwrap();
    }
    assert_eq!(store.classify("clay mask"), Frequency::Frequent);
}

#[test]
fn weekday_histogram_and_favorites_count() {
    let mut store = reflection_store();
    // 2024-01-01 and 2024-01-08 were Mondays.
    store
        .add(EntryDraft::new("a", ReflectionMood::Calm, jan(1)).favorite())
        .unwrap();
    store
        .add(EntryDraft::new("b", ReflectionMood::Calm, jan(8)))
        .unwrap();
    store
        .add(EntryDraft::new("c", ReflectionMood::Calm, jan(6)))
        .unwrap();

    let stats = store.statistics(jan(8));
    assert_eq!(stats.weekday_histogram, [2, 0, 0, 0, 0, 1, 0]);
    assert_eq!(stats.favorites, 1);
}
