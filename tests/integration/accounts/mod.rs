//! Accounts integration tests: registration, login, refresh, profile

use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::common::{authed_request, error_code, unauthed_request, TestApp};

mod test_registration {
    use super::*;

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_register_returns_profile_and_tokens() {
        let app = TestApp::new().await.unwrap();
        let employer = app
            .register_with("employer", json!({"company_name": "Acme"}))
            .await;

        let (status, body) = app
            .send(authed_request(Method::GET, "/profile", &employer.access, None))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["username"], employer.username.as_str());
        assert_eq!(body["role"], "employer");
        assert_eq!(body["profile"]["kind"], "employer");
        assert_eq!(body["profile"]["company_name"], "Acme");
        assert!(body.get("password_hash").is_none());
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_duplicate_username_is_409() {
        let app = TestApp::new().await.unwrap();
        let seeker = app.register("job_seeker").await;

        let (status, body) = app
            .send(unauthed_request(
                Method::POST,
                "/register",
                Some(json!({
                    "username": seeker.username,
                    "email": "someone-else@jobboard.test",
                    "password": "s3cure-passw0rd",
                    "password2": "s3cure-passw0rd",
                })),
            ))
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(error_code(&body), "CONFLICT");
    }
}

mod test_login {
    use super::*;

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_login_with_valid_credentials() {
        let app = TestApp::new().await.unwrap();
        let seeker = app.register("job_seeker").await;

        let (status, body) = app
            .send(unauthed_request(
                Method::POST,
                "/login",
                Some(json!({"username": seeker.username, "password": "s3cure-passw0rd"})),
            ))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["token_type"], "Bearer");
        assert!(body["access"].as_str().is_some());
        assert_eq!(body["user"]["id"], seeker.id.to_string());
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_wrong_password_and_unknown_user_look_the_same() {
        let app = TestApp::new().await.unwrap();
        let seeker = app.register("job_seeker").await;

        let (wrong_status, wrong_body) = app
            .send(unauthed_request(
                Method::POST,
                "/login",
                Some(json!({"username": seeker.username, "password": "wrong-passw0rd"})),
            ))
            .await;
        let (unknown_status, unknown_body) = app
            .send(unauthed_request(
                Method::POST,
                "/login",
                Some(json!({"username": "nobody_here_at_all", "password": "wrong-passw0rd"})),
            ))
            .await;

        assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
        assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
        assert_eq!(wrong_body, unknown_body);
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_refresh_issues_new_pair() {
        let app = TestApp::new().await.unwrap();
        let seeker = app.register("job_seeker").await;

        let (status, body) = app
            .send(unauthed_request(
                Method::POST,
                "/token/refresh",
                Some(json!({"refresh": seeker.refresh})),
            ))
            .await;
        assert_eq!(status, StatusCode::OK);
        let access = body["access"].as_str().unwrap();

        let (status, _) = app
            .send(authed_request(Method::GET, "/profile", access, None))
            .await;
        assert_eq!(status, StatusCode::OK);
    }
}

mod test_profile {
    use super::*;

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_patch_updates_only_given_fields() {
        let app = TestApp::new().await.unwrap();
        let seeker = app
            .register_with("job_seeker", json!({"first_name": "Alice"}))
            .await;

        let (status, body) = app
            .send(authed_request(
                Method::PATCH,
                "/profile",
                &seeker.access,
                Some(json!({"skills": "rust, sql", "resume": "resumes/alice.pdf"})),
            ))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["first_name"], "Alice");
        assert_eq!(body["profile"]["skills"], "rust, sql");
        assert_eq!(body["profile"]["resume"], "resumes/alice.pdf");
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_role_is_read_only() {
        let app = TestApp::new().await.unwrap();
        let seeker = app.register("job_seeker").await;

        let (status, body) = app
            .send(authed_request(
                Method::PUT,
                "/profile",
                &seeker.access,
                Some(json!({"role": "employer"})),
            ))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]["fields"]["role"].is_array());

        let (_, body) = app
            .send(authed_request(Method::GET, "/profile", &seeker.access, None))
            .await;
        assert_eq!(body["role"], "job_seeker");
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL"]
    async fn test_employer_cannot_set_seeker_fields() {
        let app = TestApp::new().await.unwrap();
        let employer = app.register("employer").await;

        let (status, body) = app
            .send(authed_request(
                Method::PATCH,
                "/profile",
                &employer.access,
                Some(json!({"skills": "rust"})),
            ))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]["fields"]["skills"].is_array());
    }
}
