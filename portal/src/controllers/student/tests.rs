//! Tests for the student dashboard controller.

use rstest::rstest;
use serde_json::json;

use super::*;
use crate::controllers::test_harness::{Harness, harness};
use crate::domain::ports::HttpMethod;
use crate::domain::{DEFAULT_DISEASE_STATUS, ErrorCode, Notice, Rating, SESSION_EXPIRED_MESSAGE};
use crate::test_support::{
    FakePortalService, sample_application, sample_residency, sample_review,
};

fn seeded() -> Harness {
    harness(
        FakePortalService::new()
            .with_residency(sample_residency("h1", "Giza", "Hall B"))
            .with_review(sample_review("r1", "h1", "Quiet and clean"))
            .with_review(sample_review("r2", "h1", "Close to campus")),
    )
}

fn dashboard(h: &Harness) -> StudentDashboard {
    StudentDashboard::new(h.api.clone(), h.session.clone())
}

#[rstest]
#[tokio::test]
async fn mount_loads_residencies_and_reviews_quietly() {
    let h = seeded();
    let mut student = dashboard(&h);

    student.mount().await.expect("mount");

    assert_eq!(student.residencies().len(), 1);
    assert_eq!(student.reviews().len(), 2);
    assert!(h.notifier.notices().is_empty());
}

#[rstest]
#[tokio::test]
async fn mount_stops_after_session_expiry() {
    let h = harness(FakePortalService::new().requiring_token("valid"));
    let mut student = dashboard(&h);

    let err = student.mount().await.expect_err("expired");

    assert!(err.is_session_expired());
    assert_eq!(h.service.requests().len(), 1);
    assert_eq!(h.notifier.messages(), [SESSION_EXPIRED_MESSAGE.to_owned()]);
}

#[rstest]
#[tokio::test]
async fn apply_posts_the_draft_and_resets_it() {
    let h = seeded();
    let mut student = dashboard(&h);
    student.select_residency(&ResidencyId::new("h1").expect("id"));
    student.application_mut().preferred_roommate = "Mona".to_owned();

    student.apply().await.expect("applied");

    assert_eq!(student.application(), &ApplicationDraft::default());
    assert_eq!(h.notifier.last(), Some(Notice::success(APPLIED_MESSAGE)));
    let posts = h.service.requests_to(HttpMethod::Post, "/residencies/apply");
    assert_eq!(
        posts[0].body,
        Some(json!({
            "residency_id": "h1",
            "preferred_roommate": "Mona",
            "disease_status": DEFAULT_DISEASE_STATUS,
        }))
    );
}

#[rstest]
#[tokio::test]
async fn apply_requires_a_disease_status() {
    let h = seeded();
    let mut student = dashboard(&h);
    student.application_mut().disease_status = "  ".to_owned();

    let err = student.apply().await.expect_err("invalid");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert!(h.service.requests().is_empty());
}

#[rstest]
#[tokio::test]
async fn failed_application_keeps_the_draft() {
    let h = seeded();
    let mut student = dashboard(&h);
    student.application_mut().preferred_roommate = "Mona".to_owned();
    h.service.fail_next(400, json!({"message": "Already applied"}));

    student.apply().await.expect_err("rejected");

    assert_eq!(student.application().preferred_roommate, "Mona");
    assert_eq!(h.notifier.last(), Some(Notice::error(APPLY_FAILED)));
}

#[rstest]
#[tokio::test]
async fn submitting_a_review_refetches_the_list() {
    let h = seeded();
    let mut student = dashboard(&h);
    student.mount().await.expect("mount");
    student.select_residency(&ResidencyId::new("h1").expect("id"));
    let review = student.review_mut();
    review.rating = Rating::new(4).expect("rating");
    review.review_text = "Good wifi".to_owned();

    student.submit_review().await.expect("reviewed");

    assert_eq!(student.review(), &ReviewDraft::default());
    assert_eq!(student.reviews().len(), 3);
    assert!(
        student
            .reviews()
            .iter()
            .any(|r| r.review_text == "Good wifi" && r.rating.get() == 4)
    );
}

#[rstest]
#[tokio::test]
async fn blank_review_text_is_rejected_locally() {
    let h = seeded();
    let mut student = dashboard(&h);

    student.submit_review().await.expect_err("blank");

    assert_eq!(
        h.notifier.last(),
        Some(Notice::error("review text is required"))
    );
    assert!(h.service.requests().is_empty());
}

#[rstest]
#[tokio::test]
async fn deleting_a_missing_review_reports_failure() {
    let h = seeded();
    let mut student = dashboard(&h);

    let err = student
        .delete_review(&ReviewId::new("nope").expect("id"))
        .await
        .expect_err("missing");

    assert_eq!(err.status(), Some(404));
    assert_eq!(h.notifier.last(), Some(Notice::error(REVIEW_DELETE_FAILED)));
}

#[rstest]
#[tokio::test]
async fn failed_review_fetch_is_reported() {
    let h = seeded();
    let mut student = dashboard(&h);
    h.service.fail_next(500, json!({}));

    student.fetch_reviews().await.expect_err("server error");

    assert_eq!(h.notifier.last(), Some(Notice::error(FETCH_REVIEWS_FAILED)));
}

#[rstest]
#[tokio::test]
async fn withdrawing_removes_the_application() {
    let h = harness(FakePortalService::new().with_application(sample_application("a1", "h1")));
    let mut student = dashboard(&h);

    student
        .withdraw_application(&ApplicationId::new("a1").expect("application id"))
        .await
        .expect("withdrawn");

    assert!(h.service.applications().is_empty());
    assert_eq!(h.notifier.last(), Some(Notice::success(WITHDRAWN_MESSAGE)));
    assert_eq!(
        h.service
            .requests_to(HttpMethod::Delete, "/residencies/applications/a1")
            .len(),
        1
    );
}

#[rstest]
#[tokio::test]
async fn withdrawing_an_unknown_application_reports_failure() {
    let h = seeded();
    let mut student = dashboard(&h);

    let err = student
        .withdraw_application(&ApplicationId::new("a9").expect("application id"))
        .await
        .expect_err("missing");

    assert_eq!(err.status(), Some(404));
    assert_eq!(h.notifier.last(), Some(Notice::error(WITHDRAW_FAILED)));
}
