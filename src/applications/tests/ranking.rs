use super::common::*;
use crate::applications::ranking::{rank_applications, SortKey};
use crate::applications::service::BoardError;

#[test]
fn sort_key_parsing_defaults_to_submission_order() {
    assert_eq!(SortKey::parse(Some("match")), SortKey::Match);
    assert_eq!(SortKey::parse(Some("newest")), SortKey::Submission);
    assert_eq!(SortKey::parse(None), SortKey::Submission);
}

#[test]
fn match_sort_is_descending_with_stable_ties() {
    let (service, jobs, _, _) = build_service();
    let job = post_standard_job(&service);

    // Scores: a=17, b=33, c=17 (tie with a, submitted later).
    service
        .submit_application(&seeker("s-a"), &job.id, payload_with_skills(&["Rust"]))
        .expect("a submits");
    service
        .submit_application(&seeker("s-b"), &job.id, payload_with_skills(&["Rust", "Tokio"]))
        .expect("b submits");
    service
        .submit_application(&seeker("s-c"), &job.id, payload_with_skills(&["rust"]))
        .expect("c submits");

    let roster = service
        .list_applicants(&recruiter(), &job.id, SortKey::Match)
        .expect("owner lists applicants");

    let order: Vec<&str> = roster
        .applicants
        .iter()
        .map(|view| view.applicant.0.as_str())
        .collect();
    assert_eq!(order, vec!["s-b", "s-a", "s-c"]);
    assert_eq!(roster.applicants[0].match_score, 33);

    // Ranking is a projection: stored order is untouched.
    let stored = stored_job(&jobs, &job.id);
    let stored_order: Vec<&str> = stored
        .applications
        .iter()
        .map(|application| application.applicant.0.as_str())
        .collect();
    assert_eq!(stored_order, vec!["s-a", "s-b", "s-c"]);
}

#[test]
fn default_sort_preserves_submission_order() {
    let (service, _, _, _) = build_service();
    let job = post_standard_job(&service);

    service
        .submit_application(&seeker("s-a"), &job.id, payload_with_skills(&["Rust"]))
        .expect("a submits");
    service
        .submit_application(&seeker("s-b"), &job.id, payload_with_skills(&["Rust", "Tokio"]))
        .expect("b submits");

    let roster = service
        .list_applicants(&recruiter(), &job.id, SortKey::Submission)
        .expect("owner lists applicants");

    let order: Vec<&str> = roster
        .applicants
        .iter()
        .map(|view| view.applicant.0.as_str())
        .collect();
    assert_eq!(order, vec!["s-a", "s-b"]);
}

#[test]
fn views_project_status_labels_and_match_data() {
    let (service, jobs, _, _) = build_service();
    let job = post_standard_job(&service);
    let application = service
        .submit_application(&seeker("s-a"), &job.id, payload_with_skills(&["Rust"]))
        .expect("submission succeeds");

    service
        .transition_status(&recruiter(), &job.id, &application.id, "reviewing")
        .expect("transition succeeds");

    let roster = rank_applications(&stored_job(&jobs, &job.id), SortKey::Submission);
    let view = &roster.applicants[0];

    assert_eq!(view.id, application.id);
    assert_eq!(view.status, "reviewing");
    assert_eq!(view.match_score, 17);
    assert_eq!(view.matched_keywords, vec!["rust".to_string()]);
    assert_eq!(roster.title, job.title);
}

#[test]
fn listing_is_restricted_to_owner_or_admin() {
    let (service, _, _, _) = build_service();
    let job = post_standard_job(&service);

    match service.list_applicants(&seeker("s-1"), &job.id, SortKey::Match) {
        Err(BoardError::Forbidden(_)) => {}
        other => panic!("expected forbidden, got {other:?}"),
    }

    service
        .list_applicants(&admin(), &job.id, SortKey::Match)
        .expect("admin may list applicants");
}
