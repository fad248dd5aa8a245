//! Tests for the block and room controller.

use rstest::rstest;
use serde_json::json;

use super::*;
use crate::controllers::test_harness::{Harness, harness};
use crate::domain::ports::HttpMethod;
use crate::domain::{ErrorCode, Notice};
use crate::test_support::{FakePortalService, sample_block, sample_residency, sample_room};

fn seeded() -> Harness {
    harness(
        FakePortalService::new()
            .with_residency(sample_residency("h1", "Giza", "Hall B"))
            .with_block(sample_block("b1", "h1", "North"))
            .with_block(sample_block("b2", "h1", "South"))
            .with_block(sample_block("b9", "other", "Elsewhere"))
            .with_room(sample_room("101", "b1", "101"))
            .with_room(sample_room("201", "b2", "201")),
    )
}

fn dashboard(h: &Harness) -> LayoutDashboard {
    LayoutDashboard::new(h.api.clone(), h.session.clone())
}

fn residency(id: &str) -> ResidencyId {
    ResidencyId::new(id).expect("residency id")
}

fn block(id: &str) -> BlockId {
    BlockId::new(id).expect("block id")
}

#[rstest]
#[tokio::test]
async fn opening_a_residency_lists_only_its_blocks() {
    let h = seeded();
    let mut layout = dashboard(&h);

    layout.open_residency(residency("h1")).await.expect("blocks");

    let names: Vec<&str> = layout
        .blocks()
        .iter()
        .map(|b| b.block_name.as_str())
        .collect();
    assert_eq!(names, ["North", "South"]);
    assert!(h.notifier.notices().is_empty());
}

#[rstest]
#[tokio::test]
async fn adding_a_block_needs_an_open_residency() {
    let h = seeded();
    let mut layout = dashboard(&h);
    layout.block_draft_mut().block_name = "East".to_owned();

    let err = layout.add_block().await.expect_err("nothing open");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(h.notifier.last(), Some(Notice::error(NO_RESIDENCY_OPEN)));
    assert!(h.service.requests().is_empty());
}

#[rstest]
#[tokio::test]
async fn adding_a_block_posts_under_the_residency_and_refetches() {
    let h = seeded();
    let mut layout = dashboard(&h);
    layout.select_residency(residency("h1"));
    let draft = layout.block_draft_mut();
    draft.block_name = "East".to_owned();
    draft.number_of_floors = 2;
    draft.total_rooms = 16;

    layout.add_block().await.expect("created");

    assert_eq!(h.notifier.last(), Some(Notice::success(BLOCK_CREATED)));
    let posts = h.service.requests_to(HttpMethod::Post, "/residencies/h1/blocks");
    assert_eq!(
        posts[0].body,
        Some(json!({ "block_name": "East", "number_of_floors": 2, "total_rooms": 16 }))
    );
    assert_eq!(layout.blocks().len(), 3);
    assert!(layout.blocks().iter().any(|b| b.block_name == "East"));
}

#[rstest]
#[tokio::test]
async fn block_form_errors_never_reach_the_service() {
    let h = seeded();
    let mut layout = dashboard(&h);
    layout.select_residency(residency("h1"));
    layout.block_draft_mut().block_name = "East".to_owned();

    layout.add_block().await.expect_err("zero floors");

    assert_eq!(
        h.notifier.last(),
        Some(Notice::error("number of floors must be at least 1"))
    );
    assert!(h.service.requests().is_empty());
}

#[rstest]
#[tokio::test]
async fn updating_a_block_keeps_its_identity() {
    let h = seeded();
    let mut layout = dashboard(&h);
    layout.open_residency(residency("h1")).await.expect("blocks");
    let current = layout.find_block(&block("b1")).await.expect("found");
    *layout.block_draft_mut() = BlockDraft {
        block_name: "North Annex".to_owned(),
        ..BlockDraft::from(&current)
    };

    layout.update_block(&block("b1")).await.expect("updated");

    assert_eq!(layout.block_draft(), &BlockDraft::default());
    assert_eq!(h.notifier.last(), Some(Notice::success(BLOCK_UPDATED)));
    let renamed = layout
        .blocks()
        .iter()
        .find(|b| b.id == block("b1"))
        .expect("still listed");
    assert_eq!(renamed.block_name, "North Annex");
    assert_eq!(renamed.residency_id, "h1");
}

#[rstest]
#[tokio::test]
async fn deleting_the_open_block_closes_it() {
    let h = seeded();
    let mut layout = dashboard(&h);
    layout.open_residency(residency("h1")).await.expect("blocks");
    layout.open_block(block("b1")).await.expect("rooms");
    assert_eq!(layout.rooms().len(), 1);

    layout.delete_block(&block("b1")).await.expect("deleted");

    assert!(layout.rooms().is_empty());
    assert_eq!(layout.blocks().len(), 1);
    let err = layout.add_room().await.expect_err("no block open");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(h.notifier.last(), Some(Notice::error(NO_BLOCK_OPEN)));
}

#[rstest]
#[tokio::test]
async fn missing_block_lookup_is_reported() {
    let h = seeded();
    let layout = dashboard(&h);

    let err = layout.find_block(&block("nope")).await.expect_err("missing");

    assert_eq!(err.status(), Some(404));
    assert_eq!(h.notifier.last(), Some(Notice::error(BLOCK_NOT_FOUND)));
}

#[rstest]
#[tokio::test]
async fn adding_a_room_posts_under_the_block_and_resets_the_form() {
    let h = seeded();
    let mut layout = dashboard(&h);
    layout.open_block(block("b1")).await.expect("rooms");
    let draft = layout.room_draft_mut();
    draft.room_number = "102".to_owned();
    draft.floor = 1;

    layout.add_room().await.expect("created");

    assert_eq!(h.notifier.last(), Some(Notice::success(ROOM_CREATED)));
    let posts = h.service.requests_to(HttpMethod::Post, "/residencies/b1/rooms");
    assert_eq!(
        posts[0].body,
        Some(json!({ "room_number": "102", "floor": 1, "capacity": 1, "is_available": true }))
    );
    assert_eq!(layout.rooms().len(), 2);
    assert_eq!(layout.room_draft(), &RoomDraft::default());
}

#[rstest]
#[tokio::test]
async fn marking_a_room_unavailable_refetches_the_block() {
    let h = seeded();
    let mut layout = dashboard(&h);
    layout.open_block(block("b2")).await.expect("rooms");
    let id = RoomId::new("201").expect("room id");
    let room = layout.find_room(&id).await.expect("found");
    *layout.room_draft_mut() = RoomDraft {
        is_available: false,
        ..RoomDraft::from(&room)
    };

    layout.update_room(&id).await.expect("updated");

    assert_eq!(h.notifier.last(), Some(Notice::success(ROOM_UPDATED)));
    assert_eq!(layout.rooms().len(), 1);
    assert!(layout.rooms().iter().all(|r| !r.is_available));
}

#[rstest]
#[tokio::test]
async fn failed_room_delete_leaves_the_list() {
    let h = seeded();
    let mut layout = dashboard(&h);
    layout.open_block(block("b1")).await.expect("rooms");
    h.service.fail_next(500, json!({}));

    layout
        .delete_room(&RoomId::new("101").expect("room id"))
        .await
        .expect_err("server error");

    assert_eq!(layout.rooms().len(), 1);
    assert_eq!(h.notifier.last(), Some(Notice::error(ROOM_DELETE_FAILED)));
    assert_eq!(h.service.rooms().len(), 1);
}

#[rstest]
#[tokio::test]
async fn failed_block_fetch_is_reported() {
    let h = seeded();
    let mut layout = dashboard(&h);
    h.service.fail_next(500, json!({}));

    layout
        .open_residency(residency("h1"))
        .await
        .expect_err("server error");

    assert!(layout.blocks().is_empty());
    assert_eq!(h.notifier.last(), Some(Notice::error(FETCH_BLOCKS_FAILED)));
}
