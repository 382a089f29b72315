//! API integration tests.
//!
//! These run against a live server on localhost with a freshly migrated,
//! empty database: the first identity bootstrapped below expects to become
//! the manager. Run with: cargo test -- --ignored

use chrono::Utc;
use reqwest::Client;
use serde_json::{json, Value};

use gearguard_server::models::user::UserClaims;

const BASE_URL: &str = "http://localhost:8080/api/v1";
// Matches config/default.toml; override with JWT_SECRET when testing elsewhere
const JWT_SECRET: &str = "change-this-secret-in-production";

/// Sign an upstream-style identity token for a test subject
fn token_for(auth_id: &str, email: &str) -> String {
    let now = Utc::now().timestamp();
    let claims = UserClaims {
        sub: auth_id.to_string(),
        email: email.to_string(),
        iat: now,
        exp: now + 3600,
    };
    claims.create_token(JWT_SECRET).expect("Failed to sign test token")
}

/// Provision a user and return (token, user json)
async fn bootstrap(client: &Client, auth_id: &str, email: &str, name: &str) -> (String, Value) {
    let token = token_for(auth_id, email);
    let response = client
        .post(format!("{}/auth/bootstrap", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "auth_id": auth_id,
            "email": email,
            "name": name
        }))
        .send()
        .await
        .expect("Failed to send bootstrap request");
    assert!(
        response.status().is_success(),
        "bootstrap failed: {}",
        response.status()
    );
    let user: Value = response.json().await.expect("Failed to parse bootstrap response");
    (token, user)
}

#[tokio::test]
#[ignore]
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_requests_require_authentication() {
    let client = Client::new();

    let response = client
        .get(format!("{}/requests", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

/// Full lifecycle scenario: bootstrap roles, route a request to a team,
/// progress it, scrap the equipment, and verify the equipment is dead.
#[tokio::test]
#[ignore]
async fn test_request_lifecycle_scenario() {
    let client = Client::new();

    // First identity ever provisioned becomes the manager
    let (manager_token, manager) =
        bootstrap(&client, "auth-manager", "manager@gearguard.test", "Morgan Manager").await;
    assert_eq!(manager["role"], "manager");

    // Re-bootstrap is idempotent
    let (_, manager_again) =
        bootstrap(&client, "auth-manager", "manager@gearguard.test", "Morgan Manager").await;
    assert_eq!(manager_again["id"], manager["id"]);
    assert_eq!(manager_again["role"], "manager");

    // Later identities come in as plain users
    let (user_token, user) =
        bootstrap(&client, "auth-reporter", "reporter@gearguard.test", "Riley Reporter").await;
    assert_eq!(user["role"], "user");
    let (tech_token, tech) =
        bootstrap(&client, "auth-tech", "tech@gearguard.test", "Taylor Tech").await;
    assert_eq!(tech["role"], "user");

    // Manager creates the IT team
    let team: Value = client
        .post(format!("{}/teams", BASE_URL))
        .header("Authorization", format!("Bearer {}", manager_token))
        .json(&json!({ "name": "IT", "description": "IT Support" }))
        .send()
        .await
        .expect("Failed to create team")
        .json()
        .await
        .expect("Failed to parse team");
    let team_id = team["id"].as_i64().unwrap();

    // Adding a plain user to the team promotes them to technician
    let response = client
        .post(format!("{}/teams/{}/members", BASE_URL, team_id))
        .header("Authorization", format!("Bearer {}", manager_token))
        .json(&json!({ "user_id": tech["id"] }))
        .send()
        .await
        .expect("Failed to add member");
    assert_eq!(response.status(), 204);

    let promoted: Value = client
        .get(format!("{}/auth/me", BASE_URL))
        .header("Authorization", format!("Bearer {}", tech_token))
        .send()
        .await
        .expect("Failed to fetch tech")
        .json()
        .await
        .expect("Failed to parse tech");
    assert_eq!(promoted["role"], "technician");
    assert_eq!(promoted["team_id"].as_i64().unwrap(), team_id);

    // Category and equipment routed to the IT team
    let category: Value = client
        .post(format!("{}/categories", BASE_URL))
        .header("Authorization", format!("Bearer {}", manager_token))
        .json(&json!({ "name": "Monitors", "company": "My Company" }))
        .send()
        .await
        .expect("Failed to create category")
        .json()
        .await
        .expect("Failed to parse category");

    let equipment: Value = client
        .post(format!("{}/equipment", BASE_URL))
        .header("Authorization", format!("Bearer {}", manager_token))
        .json(&json!({
            "name": "Samsung Monitor 15\"",
            "category_id": category["id"],
            "company": "My Company",
            "department": "IT",
            "maintenance_team_id": team_id
        }))
        .send()
        .await
        .expect("Failed to create equipment")
        .json()
        .await
        .expect("Failed to parse equipment");
    let equipment_id = equipment["id"].as_i64().unwrap();

    // Plain user files a corrective request; it routes to the IT team
    let request: Value = client
        .post(format!("{}/requests", BASE_URL))
        .header("Authorization", format!("Bearer {}", user_token))
        .json(&json!({
            "subject": "Screen flickers",
            "equipment_id": equipment_id,
            "type": "corrective"
        }))
        .send()
        .await
        .expect("Failed to create request")
        .json()
        .await
        .expect("Failed to parse request");
    let request_id = request["id"].as_i64().unwrap();
    assert_eq!(request["status"], "new");
    assert_eq!(request["priority"], "medium");
    assert_eq!(request["team_id"].as_i64().unwrap(), team_id);

    // The manager was notified about the new request
    let manager_notifications: Value = client
        .get(format!("{}/notifications", BASE_URL))
        .header("Authorization", format!("Bearer {}", manager_token))
        .send()
        .await
        .expect("Failed to list notifications")
        .json()
        .await
        .expect("Failed to parse notifications");
    let created_note = manager_notifications
        .as_array()
        .unwrap()
        .iter()
        .find(|n| n["type"] == "REQUEST_CREATED" && n["message"] == "Screen flickers was created");
    assert!(created_note.is_some(), "manager did not receive REQUEST_CREATED");

    // Plain users cannot move a request
    let response = client
        .put(format!("{}/requests/{}/status", BASE_URL, request_id))
        .header("Authorization", format!("Bearer {}", user_token))
        .json(&json!({ "status": "in_progress" }))
        .send()
        .await
        .expect("Failed to send status update");
    assert_eq!(response.status(), 403);

    // The technician can; the reporter gets notified
    let response = client
        .put(format!("{}/requests/{}/status", BASE_URL, request_id))
        .header("Authorization", format!("Bearer {}", tech_token))
        .json(&json!({ "status": "in_progress" }))
        .send()
        .await
        .expect("Failed to send status update");
    assert_eq!(response.status(), 204);

    let updated: Value = client
        .get(format!("{}/requests/{}", BASE_URL, request_id))
        .header("Authorization", format!("Bearer {}", user_token))
        .send()
        .await
        .expect("Failed to fetch request")
        .json()
        .await
        .expect("Failed to parse request");
    assert_eq!(updated["status"], "in_progress");
    let created_at: chrono::DateTime<Utc> =
        updated["created_at"].as_str().unwrap().parse().unwrap();
    let updated_at: chrono::DateTime<Utc> =
        updated["updated_at"].as_str().unwrap().parse().unwrap();
    assert!(updated_at > created_at);

    let user_notifications: Value = client
        .get(format!("{}/notifications", BASE_URL))
        .header("Authorization", format!("Bearer {}", user_token))
        .send()
        .await
        .expect("Failed to list notifications")
        .json()
        .await
        .expect("Failed to parse notifications");
    let status_note = user_notifications
        .as_array()
        .unwrap()
        .iter()
        .find(|n| n["type"] == "REQUEST_STATUS_CHANGED");
    assert!(status_note.is_some(), "reporter did not receive REQUEST_STATUS_CHANGED");

    // Manager scraps: request closes and equipment dies, atomically
    let response = client
        .post(format!("{}/requests/{}/scrap", BASE_URL, request_id))
        .header("Authorization", format!("Bearer {}", manager_token))
        .send()
        .await
        .expect("Failed to scrap");
    assert_eq!(response.status(), 204);

    let scrapped: Value = client
        .get(format!("{}/requests/{}", BASE_URL, request_id))
        .header("Authorization", format!("Bearer {}", manager_token))
        .send()
        .await
        .expect("Failed to fetch request")
        .json()
        .await
        .expect("Failed to parse request");
    assert_eq!(scrapped["status"], "scrap");

    let dead_equipment: Value = client
        .get(format!("{}/equipment/{}", BASE_URL, equipment_id))
        .header("Authorization", format!("Bearer {}", manager_token))
        .send()
        .await
        .expect("Failed to fetch equipment")
        .json()
        .await
        .expect("Failed to parse equipment");
    assert_eq!(dead_equipment["is_scrapped"], true);

    // Scrapped equipment accepts no further requests
    let response = client
        .post(format!("{}/requests", BASE_URL))
        .header("Authorization", format!("Bearer {}", user_token))
        .json(&json!({
            "subject": "Still broken",
            "equipment_id": equipment_id,
            "type": "corrective"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 422);
}

#[tokio::test]
#[ignore]
async fn test_role_matrix_over_http() {
    let client = Client::new();

    let (manager_token, _) =
        bootstrap(&client, "auth-manager", "manager@gearguard.test", "Morgan Manager").await;
    let (user_token, _) =
        bootstrap(&client, "auth-matrix-user", "matrix-user@gearguard.test", "Plain User").await;

    // Plain users: no listing all requests, no reports, no equipment management
    for (method, path) in [
        ("GET", "/requests"),
        ("GET", "/reports/overview"),
        ("GET", "/users"),
    ] {
        let request = match method {
            "GET" => client.get(format!("{}{}", BASE_URL, path)),
            _ => unreachable!(),
        };
        let response = request
            .header("Authorization", format!("Bearer {}", user_token))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), 403, "{} {}", method, path);
    }

    let response = client
        .post(format!("{}/teams", BASE_URL))
        .header("Authorization", format!("Bearer {}", user_token))
        .json(&json!({ "name": "Rogue Team" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 403);

    // Users cannot file preventive requests
    let team: Value = client
        .post(format!("{}/teams", BASE_URL))
        .header("Authorization", format!("Bearer {}", manager_token))
        .json(&json!({ "name": "Matrix Team" }))
        .send()
        .await
        .expect("Failed to create team")
        .json()
        .await
        .expect("Failed to parse team");
    let category: Value = client
        .post(format!("{}/categories", BASE_URL))
        .header("Authorization", format!("Bearer {}", manager_token))
        .json(&json!({ "name": "Matrix Gear", "company": "My Company" }))
        .send()
        .await
        .expect("Failed to create category")
        .json()
        .await
        .expect("Failed to parse category");
    let equipment: Value = client
        .post(format!("{}/equipment", BASE_URL))
        .header("Authorization", format!("Bearer {}", manager_token))
        .json(&json!({
            "name": "Matrix Printer",
            "category_id": category["id"],
            "company": "My Company",
            "department": "IT",
            "maintenance_team_id": team["id"]
        }))
        .send()
        .await
        .expect("Failed to create equipment")
        .json()
        .await
        .expect("Failed to parse equipment");

    let response = client
        .post(format!("{}/requests", BASE_URL))
        .header("Authorization", format!("Bearer {}", user_token))
        .json(&json!({
            "subject": "Routine check",
            "equipment_id": equipment["id"],
            "type": "preventive"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 403);

    // Managers see reports
    let response = client
        .get(format!("{}/reports/overview", BASE_URL))
        .header("Authorization", format!("Bearer {}", manager_token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let overview: Value = response.json().await.expect("Failed to parse overview");
    assert!(overview["total"].is_number());
    assert!(overview["corrective_percentage"].is_number());
}

#[tokio::test]
#[ignore]
async fn test_mark_as_read_is_owner_scoped_and_idempotent() {
    let client = Client::new();

    let (manager_token, _) =
        bootstrap(&client, "auth-manager", "manager@gearguard.test", "Morgan Manager").await;
    let (user_token, _) =
        bootstrap(&client, "auth-note-user", "note-user@gearguard.test", "Note User").await;

    let notifications: Value = client
        .get(format!("{}/notifications", BASE_URL))
        .header("Authorization", format!("Bearer {}", manager_token))
        .send()
        .await
        .expect("Failed to list notifications")
        .json()
        .await
        .expect("Failed to parse notifications");
    let Some(first) = notifications.as_array().unwrap().first() else {
        // No notifications yet on this database; nothing to verify
        return;
    };
    let id = first["id"].as_i64().unwrap();

    // Another user cannot touch it
    let response = client
        .post(format!("{}/notifications/{}/read", BASE_URL, id))
        .header("Authorization", format!("Bearer {}", user_token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);

    // The owner can, twice
    for _ in 0..2 {
        let response = client
            .post(format!("{}/notifications/{}/read", BASE_URL, id))
            .header("Authorization", format!("Bearer {}", manager_token))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), 204);
    }
}

#[tokio::test]
#[ignore]
async fn test_mobile_bridge_round_trip() {
    let client = Client::new();
    // Requires MOBILE_API_KEY=test-api-key on the server
    const API_KEY: &str = "test-api-key";

    let (_, user) =
        bootstrap(&client, "auth-mobile", "mobile@gearguard.test", "Mobile User").await;

    // Without the API key the bridge refuses
    let response = client
        .post(format!("{}/mobile/auth/login", BASE_URL))
        .json(&json!({ "email": "mobile@gearguard.test" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 401);

    let login: Value = client
        .post(format!("{}/mobile/auth/login", BASE_URL))
        .header("X-API-Key", API_KEY)
        .json(&json!({ "email": "mobile@gearguard.test" }))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse login");
    assert_eq!(login["success"], true);
    assert_eq!(login["user"]["id"], user["id"]);

    let verify: Value = client
        .get(format!("{}/mobile/auth/verify", BASE_URL))
        .header("X-API-Key", API_KEY)
        .header(
            "Authorization",
            format!("Bearer {}", login["token"].as_str().unwrap()),
        )
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse verify");
    assert_eq!(verify["valid"], true);
    assert_eq!(verify["user"]["email"], "mobile@gearguard.test");
}
