//! Application lifecycle integration tests

use axum::http::{Method, StatusCode};
use chrono::{Duration, Utc};
use serde_json::{json, Value};

use crate::common::{
    authed_request, error_code, job_payload, marker, TestApp, UserFixture,
};

fn application_payload() -> Value {
    json!({"cover_letter": "I would like to join.", "resume": "resumes/alice.pdf"})
}

async fn apply(app: &TestApp, seeker: &UserFixture, job: &Value) -> (StatusCode, Value) {
    app.send(authed_request(
        Method::POST,
        &format!("/jobs/{}/apply", job["id"].as_str().unwrap()),
        &seeker.access,
        Some(application_payload()),
    ))
    .await
}

async fn set_status(
    app: &TestApp,
    actor: &UserFixture,
    application: &Value,
    status: &str,
) -> (StatusCode, Value) {
    app.send(authed_request(
        Method::PATCH,
        &format!("/applications/{}", application["id"].as_str().unwrap()),
        &actor.access,
        Some(json!({"status": status})),
    ))
    .await
}

mod test_applying {
    use super::*;

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_expired_job_refused_then_review_flow() {
        let app = TestApp::new().await.unwrap();
        let employer = app
            .register_with("employer", json!({"company_name": "Acme"}))
            .await;
        let seeker = app
            .register_with("job_seeker", json!({"first_name": "Alice", "last_name": "Smith"}))
            .await;

        let mut expired = job_payload(&format!("Expired {}", marker()));
        expired["application_deadline"] =
            json!((Utc::now().date_naive() - Duration::days(2)).to_string());
        let expired = app.create_job(&employer, expired).await;

        let (status, body) = apply(&app, &seeker, &expired).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_code(&body), "BUSINESS_RULE_VIOLATION");
        assert_eq!(
            app.count_applications(expired["id"].as_str().unwrap(), seeker.id)
                .await,
            0
        );

        let qa = app
            .create_job(&employer, job_payload(&format!("QA {}", marker())))
            .await;
        let (status, application) = apply(&app, &seeker, &qa).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(application["status"], "pending");
        assert_eq!(application["reviewed_at"], Value::Null);
        assert_eq!(application["company_name"], "Acme");
        assert_eq!(application["applicant_name"], "Alice Smith");

        let (status, reviewed) = set_status(&app, &employer, &application, "shortlisted").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(reviewed["status"], "shortlisted");
        assert!(reviewed["reviewed_at"].is_string());
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_duplicate_application_is_409() {
        let app = TestApp::new().await.unwrap();
        let employer = app.register("employer").await;
        let seeker = app.register("job_seeker").await;
        let job = app.create_job(&employer, job_payload("Duplicate target")).await;

        let (status, _) = apply(&app, &seeker, &job).await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, body) = apply(&app, &seeker, &job).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(error_code(&body), "CONFLICT");
        assert_eq!(
            app.count_applications(job["id"].as_str().unwrap(), seeker.id)
                .await,
            1
        );
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_parallel_applies_create_one_row() {
        let app = TestApp::new().await.unwrap();
        let employer = app.register("employer").await;
        let seeker = app.register("job_seeker").await;
        let job = app.create_job(&employer, job_payload("Contended opening")).await;
        let uri = format!("/jobs/{}/apply", job["id"].as_str().unwrap());

        let requests = (0..8)
            .map(|_| {
                authed_request(
                    Method::POST,
                    &uri,
                    &seeker.access,
                    Some(application_payload()),
                )
            })
            .collect();
        let statuses = app.send_concurrently(requests).await;

        let created = statuses
            .iter()
            .filter(|s| **s == StatusCode::CREATED)
            .count();
        let conflicts = statuses
            .iter()
            .filter(|s| **s == StatusCode::CONFLICT)
            .count();
        assert_eq!((created, conflicts), (1, 7), "statuses: {:?}", statuses);
        assert_eq!(
            app.count_applications(job["id"].as_str().unwrap(), seeker.id)
                .await,
            1
        );
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_employer_cannot_apply() {
        let app = TestApp::new().await.unwrap();
        let employer = app.register("employer").await;
        let other = app.register("employer").await;
        let job = app.create_job(&employer, job_payload("Employers only")).await;

        let (status, _) = apply(&app, &other, &job).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_missing_resume_is_field_error() {
        let app = TestApp::new().await.unwrap();
        let employer = app.register("employer").await;
        let seeker = app.register("job_seeker").await;
        let job = app.create_job(&employer, job_payload("Needs resume")).await;

        let (status, body) = app
            .send(authed_request(
                Method::POST,
                &format!("/jobs/{}/apply", job["id"].as_str().unwrap()),
                &seeker.access,
                Some(json!({"cover_letter": "Hello"})),
            ))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]["fields"]["resume"].is_array());
    }
}

mod test_review {
    use super::*;

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_only_owning_employer_sets_status() {
        let app = TestApp::new().await.unwrap();
        let employer = app.register("employer").await;
        let stranger = app.register("employer").await;
        let seeker = app.register("job_seeker").await;
        let job = app.create_job(&employer, job_payload("Guarded review")).await;
        let (_, application) = apply(&app, &seeker, &job).await;

        let (status, _) = set_status(&app, &seeker, &application, "accepted").await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = set_status(&app, &stranger, &application, "accepted").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = set_status(&app, &employer, &application, "pending").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_reviewed_at_never_moves_backwards() {
        let app = TestApp::new().await.unwrap();
        let employer = app.register("employer").await;
        let seeker = app.register("job_seeker").await;
        let job = app.create_job(&employer, job_payload("Monotonic review")).await;
        let (_, application) = apply(&app, &seeker, &job).await;

        let (_, first) = set_status(&app, &employer, &application, "reviewed").await;
        let (status, second) = set_status(&app, &employer, &application, "reviewed").await;
        assert_eq!(status, StatusCode::OK);

        let first_at: chrono::DateTime<Utc> =
            first["reviewed_at"].as_str().unwrap().parse().unwrap();
        let second_at: chrono::DateTime<Utc> =
            second["reviewed_at"].as_str().unwrap().parse().unwrap();
        assert!(second_at >= first_at);
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_applicant_amends_cover_letter() {
        let app = TestApp::new().await.unwrap();
        let employer = app.register("employer").await;
        let seeker = app.register("job_seeker").await;
        let job = app.create_job(&employer, job_payload("Amendable")).await;
        let (_, application) = apply(&app, &seeker, &job).await;
        let uri = format!("/applications/{}", application["id"].as_str().unwrap());

        let (status, body) = app
            .send(authed_request(
                Method::PATCH,
                &uri,
                &seeker.access,
                Some(json!({"cover_letter": "Updated letter"})),
            ))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["cover_letter"], "Updated letter");
        assert_eq!(body["status"], "pending");

        let (status, _) = app
            .send(authed_request(
                Method::PATCH,
                &uri,
                &employer.access,
                Some(json!({"cover_letter": "Rewritten by employer"})),
            ))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}

mod test_visibility {
    use super::*;

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_lists_are_scoped_by_role() {
        let app = TestApp::new().await.unwrap();
        let employer = app.register("employer").await;
        let rival = app.register("employer").await;
        let alice = app.register("job_seeker").await;
        let bob = app.register("job_seeker").await;
        let job = app.create_job(&employer, job_payload("Scoped listing")).await;
        apply(&app, &alice, &job).await;
        apply(&app, &bob, &job).await;

        let (_, received) = app
            .send(authed_request(Method::GET, "/applications", &employer.access, None))
            .await;
        assert_eq!(received["count"], 2);

        let (_, submitted) = app
            .send(authed_request(Method::GET, "/applications", &alice.access, None))
            .await;
        assert_eq!(submitted["count"], 1);
        assert_eq!(submitted["results"][0]["applicant_id"], alice.id.to_string());

        let (_, none) = app
            .send(authed_request(Method::GET, "/applications", &rival.access, None))
            .await;
        assert_eq!(none["count"], 0);

        let (_, pending) = app
            .send(authed_request(
                Method::GET,
                "/applications?status=accepted",
                &employer.access,
                None,
            ))
            .await;
        assert_eq!(pending["count"], 0);
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_unknown_status_filter_is_field_error() {
        let app = TestApp::new().await.unwrap();
        let seeker = app.register("job_seeker").await;

        let (status, body) = app
            .send(authed_request(
                Method::GET,
                "/applications?status=hired",
                &seeker.access,
                None,
            ))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_code(&body), "VALIDATION_ERROR");
        assert!(body["error"]["fields"]["status"].is_array());
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_applicant_withdraws() {
        let app = TestApp::new().await.unwrap();
        let employer = app.register("employer").await;
        let seeker = app.register("job_seeker").await;
        let other = app.register("job_seeker").await;
        let job = app.create_job(&employer, job_payload("Withdrawable")).await;
        let (_, application) = apply(&app, &seeker, &job).await;
        let uri = format!("/applications/{}", application["id"].as_str().unwrap());

        let (status, _) = app
            .send(authed_request(Method::GET, &uri, &other.access, None))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = app
            .send(authed_request(Method::DELETE, &uri, &seeker.access, None))
            .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = app
            .send(authed_request(Method::GET, &uri, &seeker.access, None))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            app.count_applications(job["id"].as_str().unwrap(), seeker.id)
                .await,
            0
        );
    }
}
