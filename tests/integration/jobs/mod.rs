//! Job posting integration tests

use axum::http::{Method, StatusCode};
use serde_json::json;
use uuid::Uuid;

use crate::common::{
    authed_request, error_code, job_payload, marker, unauthed_request, TestApp,
};

mod test_posting {
    use super::*;

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_employer_creates_job() {
        let app = TestApp::new().await.unwrap();
        let employer = app
            .register_with("employer", json!({"company_name": "Acme"}))
            .await;

        let job = app
            .create_job(&employer, job_payload(&format!("Backend {}", marker())))
            .await;
        assert_eq!(job["company_id"], employer.id.to_string());
        assert_eq!(job["company_name"], "Acme");
        assert_eq!(job["is_active"], true);
        assert_eq!(job["is_expired"], false);
        assert_eq!(job["applications_count"], 0);
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_job_seeker_cannot_post() {
        let app = TestApp::new().await.unwrap();
        let seeker = app.register("job_seeker").await;

        let (status, body) = app
            .send(authed_request(
                Method::POST,
                "/jobs",
                &seeker.access,
                Some(job_payload("Nope")),
            ))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(error_code(&body), "AUTHORIZATION_ERROR");
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_salary_range_must_be_ordered() {
        let app = TestApp::new().await.unwrap();
        let employer = app.register("employer").await;

        let mut payload = job_payload("Inverted salary");
        payload["salary_min"] = json!("90000.00");
        payload["salary_max"] = json!("50000.00");
        let (status, body) = app
            .send(authed_request(Method::POST, "/jobs", &employer.access, Some(payload)))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]["fields"]["salary_min"].is_array());
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_unknown_category_is_field_error() {
        let app = TestApp::new().await.unwrap();
        let employer = app.register("employer").await;

        let mut payload = job_payload("Orphan category");
        payload["category_id"] = json!(Uuid::new_v4());
        let (status, body) = app
            .send(authed_request(Method::POST, "/jobs", &employer.access, Some(payload)))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]["fields"]["category_id"].is_array());
    }
}

mod test_ownership {
    use super::*;

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_only_owner_updates() {
        let app = TestApp::new().await.unwrap();
        let owner = app.register("employer").await;
        let rival = app.register("employer").await;
        let job = app.create_job(&owner, job_payload("Owned posting")).await;
        let uri = format!("/jobs/{}", job["id"].as_str().unwrap());

        let (status, _) = app
            .send(authed_request(
                Method::PATCH,
                &uri,
                &rival.access,
                Some(json!({"title": "Hijacked"})),
            ))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = app
            .send(authed_request(
                Method::PATCH,
                &uri,
                &owner.access,
                Some(json!({"title": "Renamed posting", "salary_max": "120000.00"})),
            ))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Renamed posting");
        assert_eq!(body["location"], "Berlin");
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_delete_deactivates_posting() {
        let app = TestApp::new().await.unwrap();
        let owner = app.register("employer").await;
        let seeker = app.register("job_seeker").await;
        let job = app.create_job(&owner, job_payload("Short lived")).await;
        let uri = format!("/jobs/{}", job["id"].as_str().unwrap());

        let (status, _) = app
            .send(authed_request(Method::DELETE, &uri, &owner.access, None))
            .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = app.send(unauthed_request(Method::GET, &uri, None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = app
            .send(authed_request(Method::GET, &uri, &seeker.access, None))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = app
            .send(authed_request(Method::GET, &uri, &owner.access, None))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["is_active"], false);

        let (_, mine) = app
            .send(authed_request(Method::GET, "/jobs/mine", &owner.access, None))
            .await;
        assert_eq!(mine["count"], 1);
        assert_eq!(mine["results"][0]["id"], job["id"]);
    }
}

mod test_listing {
    use super::*;

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_search_returns_active_newest_first() {
        let app = TestApp::new().await.unwrap();
        let employer = app.register("employer").await;
        let tag = marker();

        let first = app
            .create_job(&employer, job_payload(&format!("First {}", tag)))
            .await;
        let second = app
            .create_job(&employer, job_payload(&format!("Second {}", tag)))
            .await;
        let mut hidden = job_payload(&format!("Hidden {}", tag));
        hidden["is_active"] = json!(false);
        app.create_job(&employer, hidden).await;

        let (status, body) = app
            .send(unauthed_request(
                Method::GET,
                &format!("/jobs?search={}", tag),
                None,
            ))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 2);
        assert_eq!(body["results"][0]["id"], second["id"]);
        assert_eq!(body["results"][1]["id"], first["id"]);
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_filters_and_salary_ordering() {
        let app = TestApp::new().await.unwrap();
        let employer = app.register("employer").await;
        let tag = marker();

        let mut low = job_payload(&format!("Low {}", tag));
        low["salary_min"] = json!("30000.00");
        let mut high = job_payload(&format!("High {}", tag));
        high["salary_min"] = json!("80000.00");
        let mut contract = job_payload(&format!("Contract {}", tag));
        contract["job_type"] = json!("contract");
        app.create_job(&employer, low).await;
        app.create_job(&employer, high).await;
        app.create_job(&employer, contract).await;

        let (_, body) = app
            .send(unauthed_request(
                Method::GET,
                &format!("/jobs?search={}&job_type=full_time&ordering=-salary_min", tag),
                None,
            ))
            .await;
        assert_eq!(body["count"], 2);
        assert_eq!(body["results"][0]["salary_min"], "80000.00");
        assert_eq!(body["results"][1]["salary_min"], "30000.00");
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_seeded_categories_are_listed() {
        let app = TestApp::new().await.unwrap();
        let (status, body) = app
            .send(unauthed_request(Method::GET, "/categories", None))
            .await;
        assert_eq!(status, StatusCode::OK);
        let names: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|c| c["name"].as_str())
            .collect();
        assert!(names.contains(&"Engineering"));
    }
}
