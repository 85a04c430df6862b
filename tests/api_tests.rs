#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use chrono::Duration;
use serde_json::{Value, json};

use common::state;

#[actix_web::test]
async fn health_reports_memory_backend() {
    let state = state();
    let app = test_app!(state);

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "OK");
    assert_eq!(body["storage"], "memory");
}

#[actix_web::test]
async fn unknown_route_is_json_404() {
    let state = state();
    let app = test_app!(state);

    let req = test::TestRequest::get().uri("/api/nowhere").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Route not found" }));
}

#[actix_web::test]
async fn login_then_logout_reports_hours() {
    let state = state();
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/timesheets/login")
        .set_json(json!({
            "employee_id": 1,
            "latitude": 40.7128,
            "longitude": -74.006,
            "phone_type": "iPhone",
            "phone_number": "555-0123"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let log: Value = test::read_body_json(resp).await;
    assert_eq!(log["employee_id"], 1);
    assert_eq!(log["status"], "logged_in");
    assert_eq!(log["device_type"], "iPhone");
    assert_eq!(log["login_time"], "2024-01-15T09:00:00Z");
    assert!(log["logout_time"].is_null());

    state.clock.advance(Duration::hours(8));

    let req = test::TestRequest::post()
        .uri("/api/timesheets/logout")
        .set_json(json!({ "employee_id": 1, "latitude": 40.7130, "longitude": -74.0062 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let summary: Value = test::read_body_json(resp).await;
    assert_eq!(summary["log_id"], log["id"]);
    assert_eq!(summary["hours_worked"], 8.0);
    assert_eq!(summary["status"], "logged_out");
    assert_eq!(summary["logout_time"], "2024-01-15T17:00:00Z");
}

#[actix_web::test]
async fn logout_without_session_is_rejected() {
    let state = state();
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/timesheets/logout")
        .set_json(json!({ "employee_id": 2 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["error"],
        "No active login session found for employee 2"
    );
}

#[actix_web::test]
async fn second_login_conflicts() {
    let state = state();
    let app = test_app!(state);

    for expected in [StatusCode::CREATED, StatusCode::CONFLICT] {
        let req = test::TestRequest::post()
            .uri("/api/timesheets/login")
            .set_json(json!({ "employee_id": 3 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), expected);
    }
}

#[actix_web::test]
async fn login_with_half_a_location_is_rejected() {
    let state = state();
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/timesheets/login")
        .set_json(json!({ "employee_id": 1, "latitude": 40.7 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/timesheets/login")
        .set_json(json!({ "employee_id": 1, "latitude": 123.0, "longitude": 0.0 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // nothing was recorded
    let req = test::TestRequest::get()
        .uri("/api/timesheets/logs/1")
        .to_request();
    let logs: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(logs, json!([]));
}

#[actix_web::test]
async fn malformed_body_is_bad_request() {
    let state = state();
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/timesheets/login")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"employee_id\": \"abc\"}")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().starts_with("Invalid request body"));
}

#[actix_web::test]
async fn logs_are_newest_first() {
    let state = state();
    let app = test_app!(state);

    for _ in 0..3 {
        let req = test::TestRequest::post()
            .uri("/api/timesheets/login")
            .set_json(json!({ "employee_id": 4 }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
        state.clock.advance(Duration::minutes(30));

        let req = test::TestRequest::post()
            .uri("/api/timesheets/logout")
            .set_json(json!({ "employee_id": 4 }))
            .to_request();
        let summary: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(summary["hours_worked"], 0.5);
        state.clock.advance(Duration::hours(1));
    }

    let req = test::TestRequest::get()
        .uri("/api/timesheets/logs/4")
        .to_request();
    let logs: Value = test::call_and_read_body_json(&app, req).await;
    let logs = logs.as_array().unwrap();
    assert_eq!(logs.len(), 3);

    let logins: Vec<&str> = logs
        .iter()
        .map(|l| l["login_time"].as_str().unwrap())
        .collect();
    assert_eq!(
        logins,
        [
            "2024-01-15T12:00:00Z",
            "2024-01-15T10:30:00Z",
            "2024-01-15T09:00:00Z"
        ]
    );
    assert!(logs.iter().all(|l| l["status"] == "logged_out"));
}

#[actix_web::test]
async fn non_numeric_id_is_bad_request() {
    let state = state();
    let app = test_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/employees/abc")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn employee_lifecycle_and_stats() {
    let state = state();
    let app = test_app!(state);

    let req = test::TestRequest::get().uri("/api/employees/stats").to_request();
    let stats: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(stats["total"], 4);
    assert_eq!(stats["active"], 3);
    assert_eq!(stats["avgSalary"], 87500.0);
    assert_eq!(stats["departments"]["Engineering"], 1);

    let req = test::TestRequest::post()
        .uri("/api/employees")
        .set_json(json!({
            "name": "Jane Doe",
            "email": "jane@company.com",
            "department": "Engineering",
            "role": "Junior",
            "salary": 65000.0,
            "start_date": "2024-02-01"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["id"], 5);
    assert_eq!(created["status"], "Active");

    let req = test::TestRequest::put()
        .uri("/api/employees/5")
        .set_json(json!({ "role": "Senior" }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["role"], "Senior");
    assert_eq!(updated["name"], "Jane Doe");

    let req = test::TestRequest::put()
        .uri("/api/employees/5")
        .set_json(json!({}))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );

    let req = test::TestRequest::delete().uri("/api/employees/5").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/api/employees/5").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Employee not found");
}

#[actix_web::test]
async fn inventory_reorder_restocks_to_max() {
    let state = state();
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/inventory")
        .set_json(json!({
            "name": "Laptop",
            "sku": "LAP-001",
            "category": "Electronics",
            "stock": 0,
            "min_stock": 5,
            "max_stock": 50,
            "price": 1200.0
        }))
        .to_request();
    let item: Value = test::call_and_read_body_json(&app, req).await;
    let id = item["id"].as_u64().unwrap();

    let req = test::TestRequest::get().uri("/api/inventory/stats").to_request();
    let stats: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(stats["totalItems"], 1);
    assert_eq!(stats["lowStockItems"], 1);
    assert_eq!(stats["outOfStockItems"], 1);

    let req = test::TestRequest::put()
        .uri(&format!("/api/inventory/{id}/reorder"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["newStock"], 50);

    let req = test::TestRequest::put()
        .uri(&format!("/api/inventory/{id}/reorder"))
        .set_json(json!({ "maxStock": 20 }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["newStock"], 20);

    let req = test::TestRequest::get().uri("/api/inventory/stats").to_request();
    let stats: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(stats["outOfStockItems"], 0);
    assert_eq!(stats["totalValue"], 24000.0);

    let req = test::TestRequest::put().uri("/api/inventory/999/reorder").to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_web::test]
async fn timesheet_crud() {
    let state = state();
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/timesheets")
        .set_json(json!({
            "employee_id": 1,
            "date": "2024-01-20",
            "hours_worked": 8.0,
            "project": "Website Redesign"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let sheet: Value = test::read_body_json(resp).await;
    assert_eq!(sheet["status"], "Submitted");
    let id = sheet["id"].as_u64().unwrap();

    let req = test::TestRequest::post()
        .uri("/api/timesheets")
        .set_json(json!({
            "employee_id": 1,
            "date": "2024-01-21",
            "hours_worked": 30.0,
            "project": "Website Redesign"
        }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );

    let req = test::TestRequest::put()
        .uri(&format!("/api/timesheets/{id}"))
        .set_json(json!({ "status": "Approved" }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["status"], "Approved");

    let req = test::TestRequest::get().uri("/api/timesheets").to_request();
    let all: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(all.as_array().unwrap().len(), 1);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/timesheets/{id}"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/timesheets/{id}"))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}
