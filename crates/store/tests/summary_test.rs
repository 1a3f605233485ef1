use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use slotbook_core::models::slot::Slot;
use slotbook_store::mock::MockSlotRepo;
use slotbook_store::{JsonSlotStore, SlotRepository, SlotSummary, summarize};

fn slot(id: &str, hour: u32) -> Slot {
    let start = Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2024, 3, 1, hour + 1, 0, 0).unwrap();
    Slot::new(id, start, end, start).unwrap()
}

#[test]
fn test_summarize_counts_each_status() {
    let free = slot("a", 9);
    let mut busy = slot("b", 10);
    busy.book(1, busy.created_at).unwrap();
    let mut canceled = slot("c", 11);
    canceled.cancel(canceled.created_at).unwrap();
    let mut released = slot("d", 12);
    released.book(2, released.created_at).unwrap();
    released.release(2, released.created_at).unwrap();

    let mut repo = MockSlotRepo::new();
    repo.expect_list_slots()
        .times(1)
        .return_const(vec![free, busy, canceled, released]);

    let summary = summarize(&repo);

    assert_eq!(
        summary,
        SlotSummary {
            free: 2,
            busy: 1,
            canceled: 1,
        }
    );
    assert_eq!(summary.total(), 4);
}

#[test]
fn test_summarize_empty_repository() {
    let mut repo = MockSlotRepo::new();
    repo.expect_list_slots().return_const(Vec::new());

    assert_eq!(summarize(&repo), SlotSummary::default());
}

#[test]
fn test_summarize_json_store() {
    let store = JsonSlotStore::in_memory();
    let start = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
    let created = store
        .create_slot(start, start + chrono::Duration::hours(1))
        .unwrap();
    store.book_slot(&created.id, 9).unwrap();

    let summary = summarize(&store);

    assert_eq!(summary.busy, 1);
    assert_eq!(summary.total(), 1);
}
