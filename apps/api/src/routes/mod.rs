pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::assessment::handlers as assessments;
use crate::catalog::handlers as courses;
use crate::dashboard::handlers as dashboard;
use crate::state::AppState;
use crate::users::handlers as users;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/ping", get(health::ping_handler))
        // Course catalog
        .route(
            "/api/v1/courses",
            get(courses::handle_list_courses).post(courses::handle_create_course),
        )
        .route(
            "/api/v1/courses/:id",
            put(courses::handle_update_course).delete(courses::handle_delete_course),
        )
        // Assessments
        .route(
            "/api/v1/assessments",
            get(assessments::handle_list_assessments).post(assessments::handle_submit_assessment),
        )
        .route(
            "/api/v1/assessments/:id",
            get(assessments::handle_get_assessment).delete(assessments::handle_delete_assessment),
        )
        .route(
            "/api/v1/assessments/:id/review",
            post(assessments::handle_review_assessment),
        )
        .route(
            "/api/v1/assessments/:id/report",
            get(assessments::handle_get_report),
        )
        .route(
            "/api/v1/assessments/:id/report/text",
            get(assessments::handle_get_report_text),
        )
        .route(
            "/api/v1/assessments/:id/comments",
            get(assessments::handle_list_comments).post(assessments::handle_add_comment),
        )
        // Dashboards
        .route("/api/v1/stats", get(dashboard::handle_stats))
        .route(
            "/api/v1/dashboard/manager",
            get(dashboard::handle_manager_dashboard),
        )
        .route(
            "/api/v1/dashboard/executive",
            get(dashboard::handle_executive_dashboard),
        )
        .route("/api/v1/backup", get(dashboard::handle_backup))
        // Users
        .route(
            "/api/v1/users",
            get(users::handle_list_users).post(users::handle_create_user),
        )
        .route(
            "/api/v1/users/:id",
            put(users::handle_update_user).delete(users::handle_delete_user),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use sqlx::SqlitePool;
    use tower::ServiceExt;

    use super::*;
    use crate::assessment::area::CompetencyArea;
    use crate::assessment::matcher::AreaCourseMap;
    use crate::catalog::seed::seed_default_courses;
    use crate::config::Config;
    use crate::db::test_pool;

    fn test_config() -> Config {
        Config {
            database_url: "sqlite::memory:".to_string(),
            port: 0,
            rust_log: "info".to_string(),
            seed_courses: true,
            hourly_training_cost: 50_000.0,
        }
    }

    async fn test_app() -> (Router, SqlitePool) {
        let pool = test_pool().await;
        seed_default_courses(&pool).await.unwrap();
        let state = AppState {
            db: pool.clone(),
            config: test_config(),
            area_courses: Arc::new(AreaCourseMap::default()),
        };
        (build_router(state), pool)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes.to_vec())
    }

    async fn send_json(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let (status, bytes) = send(app, method, uri, body).await;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn submission(levels: [i32; 8]) -> Value {
        let ratings: Vec<Value> = CompetencyArea::ALL
            .iter()
            .zip(levels)
            .map(|(area, level)| {
                json!({
                    "area": area.label(),
                    "nivel_actual": level,
                    "interes": 4,
                    "relevancia": 3
                })
            })
            .collect();
        json!({
            "nombre": "María Gómez",
            "area": "Ingeniería",
            "rol": "Desarrolladora",
            "experiencia": "3-5 años",
            "competencias": ratings
        })
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = test_app().await;
        let (status, body) = send_json(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_submit_creates_recommendations() {
        let (app, _) = test_app().await;
        let (status, body) =
            send_json(&app, "POST", "/api/v1/assessments", Some(submission([1, 2, 3, 4, 1, 2, 3, 4]))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["recommendations"], 11);
        let id = body["id"].as_i64().unwrap();

        let (status, detail) = send_json(&app, "GET", &format!("/api/v1/assessments/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(detail["employee_name"], "María Gómez");
        assert_eq!(detail["ratings"][0]["area"], "gestion_proyectos");
        let recs = detail["recommendations"].as_array().unwrap();
        assert_eq!(recs.len(), 11);
        // Gestión de Proyectos at level 1: gap 3 -> 1.2 + 1.2 + 0.9 = 3.3
        assert_eq!(recs[0]["priority"], "Alta");
        assert_eq!(recs[0]["justification"], "Gap significativo. Alto interés.");
        assert_eq!(recs[0]["course_name"], "Prácticas ágiles para la gerencia de proyectos");
    }

    #[tokio::test]
    async fn test_submit_missing_fields_is_rejected() {
        let (app, _) = test_app().await;
        let mut body = submission([1; 8]);
        body["nombre"] = json!("");
        let (status, response) = send_json(&app, "POST", "/api/v1/assessments", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_submit_incomplete_ratings_is_rejected() {
        let (app, _) = test_app().await;
        let mut body = submission([1; 8]);
        body["competencias"].as_array_mut().unwrap().pop();
        let (status, _) = send_json(&app, "POST", "/api/v1/assessments", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_submit_with_small_catalog_is_unprocessable() {
        let (app, pool) = test_app().await;
        sqlx::query("DELETE FROM courses WHERE id = (SELECT MAX(id) FROM courses)")
            .execute(&pool)
            .await
            .unwrap();

        let (status, body) = send_json(&app, "POST", "/api/v1/assessments", Some(submission([2; 8]))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "UNPROCESSABLE_ENTITY");

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM assessments")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_unknown_assessment_is_not_found() {
        let (app, _) = test_app().await;
        let (status, _) = send_json(&app, "GET", "/api/v1/assessments/42", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send_json(&app, "POST", "/api/v1/assessments/42/review", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_review_updates_stats() {
        let (app, _) = test_app().await;
        send_json(&app, "POST", "/api/v1/assessments", Some(submission([1; 8]))).await;
        let (_, created) = send_json(&app, "POST", "/api/v1/assessments", Some(submission([4; 8]))).await;
        let id = created["id"].as_i64().unwrap();

        let (status, _) = send_json(
            &app,
            "POST",
            &format!("/api/v1/assessments/{id}/review"),
            Some(json!({ "notas_gestor": "Sin gaps" })),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, stats) = send_json(&app, "GET", "/api/v1/stats", None).await;
        assert_eq!(stats["total"], 2);
        assert_eq!(stats["pending"], 1);
        assert_eq!(stats["reviewed"], 1);
        assert_eq!(stats["courses"], 9);
    }

    #[tokio::test]
    async fn test_dashboards_aggregate_submissions() {
        let (app, _) = test_app().await;
        send_json(&app, "POST", "/api/v1/assessments", Some(submission([1; 8]))).await;
        send_json(&app, "POST", "/api/v1/assessments", Some(submission([2; 8]))).await;

        let (status, manager) = send_json(&app, "GET", "/api/v1/dashboard/manager", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(manager["total"], 2);
        assert_eq!(manager["areas"].as_array().unwrap().len(), 8);
        assert_eq!(manager["areas"][0]["averages"]["level"], 1.5);
        assert_eq!(manager["areas"][0]["averages"]["gap"], 2.5);
        assert_eq!(manager["total_recommendations"], 22);
        // 2 * (24 + 16 + 12 + 16 + 12 + 16 + 16 + 24 + 16 + 24 + 16)
        assert_eq!(manager["total_recommended_hours"], 384);

        let (_, executive) = send_json(&app, "GET", "/api/v1/dashboard/executive", None).await;
        assert_eq!(executive["global"]["interest"], 4.0);
        assert_eq!(executive["global"]["relevance"], 3.0);
        assert_eq!(executive["comparisons"].as_array().unwrap().len(), 8);
    }

    #[tokio::test]
    async fn test_executive_dashboard_without_data() {
        let (app, _) = test_app().await;
        let (status, body) = send_json(&app, "GET", "/api/v1/dashboard/executive", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["global"].is_null());
        assert!(body["comparisons"][0]["averages"].is_null());
    }

    #[tokio::test]
    async fn test_report_json_and_text() {
        let (app, _) = test_app().await;
        let (_, created) = send_json(&app, "POST", "/api/v1/assessments", Some(submission([1, 1, 1, 1, 4, 4, 4, 4]))).await;
        let id = created["id"].as_i64().unwrap();

        let (status, report) = send_json(&app, "GET", &format!("/api/v1/assessments/{id}/report"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(report["total_courses"], 11);
        assert_eq!(report["total_hours"], 192);
        assert_eq!(report["estimated_investment"], 9_600_000.0);
        assert_eq!(report["critical_areas"].as_array().unwrap().len(), 4);
        assert_eq!(report["strengths"].as_array().unwrap().len(), 4);

        let (status, bytes) = send(&app, "GET", &format!("/api/v1/assessments/{id}/report/text"), None).await;
        assert_eq!(status, StatusCode::OK);
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("Empleado: María Gómez"));
        assert!(text.contains("Horas estimadas de capacitación: 192"));
    }

    #[tokio::test]
    async fn test_comments_default_author() {
        let (app, _) = test_app().await;
        let (_, created) = send_json(&app, "POST", "/api/v1/assessments", Some(submission([2; 8]))).await;
        let id = created["id"].as_i64().unwrap();
        let uri = format!("/api/v1/assessments/{id}/comments");

        let (status, _) = send_json(&app, "POST", &uri, Some(json!({ "comentario": "  " }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, comment) = send_json(&app, "POST", &uri, Some(json!({ "comentario": "Agendar curso" }))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(comment["author"], "Gestor");

        let (_, comments) = send_json(&app, "GET", &uri, None).await;
        assert_eq!(comments.as_array().unwrap().len(), 1);
        assert_eq!(comments[0]["body"], "Agendar curso");
    }

    #[tokio::test]
    async fn test_course_crud() {
        let (app, _) = test_app().await;
        let (status, created) = send_json(
            &app,
            "POST",
            "/api/v1/courses",
            Some(json!({ "name": "Rust para backend", "hours": 20, "instructors": "Equipo Plataforma" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_i64().unwrap();

        let (status, _) = send_json(
            &app,
            "PUT",
            &format!("/api/v1/courses/{id}"),
            Some(json!({ "name": "Rust avanzado", "hours": 0, "instructors": "Equipo" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send_json(&app, "DELETE", &format!("/api/v1/courses/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send_json(&app, "DELETE", &format!("/api/v1/courses/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, courses) = send_json(&app, "GET", "/api/v1/courses", None).await;
        assert_eq!(courses.as_array().unwrap().len(), 9);
    }

    #[tokio::test]
    async fn test_course_update_and_missing_course() {
        let (app, _) = test_app().await;
        let (status, _) = send_json(
            &app,
            "PUT",
            "/api/v1/courses/2",
            Some(json!({ "name": "Gestión del cambio", "hours": 30, "instructors": "Equipo RRHH" })),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, courses) = send_json(&app, "GET", "/api/v1/courses", None).await;
        let updated = courses
            .as_array()
            .unwrap()
            .iter()
            .find(|c| c["id"] == 2)
            .unwrap();
        assert_eq!(updated["name"], "Gestión del cambio");
        assert_eq!(updated["hours"], 30);

        let (status, body) = send_json(
            &app,
            "PUT",
            "/api/v1/courses/999",
            Some(json!({ "name": "Fantasma", "hours": 5, "instructors": "Nadie" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_recommended_course_cannot_be_deleted() {
        let (app, pool) = test_app().await;
        let (_, created) = send_json(&app, "POST", "/api/v1/assessments", Some(submission([1; 8]))).await;
        let id = created["id"].as_i64().unwrap();
        let (_, detail) = send_json(&app, "GET", &format!("/api/v1/assessments/{id}"), None).await;
        let course_id = detail["recommendations"][0]["course_id"].as_i64().unwrap();
        let (_, before) = send_json(&app, "GET", &format!("/api/v1/assessments/{id}/report"), None).await;

        let (status, body) = send_json(&app, "DELETE", &format!("/api/v1/courses/{course_id}"), None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "UNPROCESSABLE_ENTITY");

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recommendations")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 11);
        let (_, after) = send_json(&app, "GET", &format!("/api/v1/assessments/{id}/report"), None).await;
        assert_eq!(after["total_hours"], before["total_hours"]);
        let (_, courses) = send_json(&app, "GET", "/api/v1/courses", None).await;
        assert_eq!(courses.as_array().unwrap().len(), 9);
    }

    #[tokio::test]
    async fn test_delete_assessment_removes_its_data() {
        let (app, pool) = test_app().await;
        let (_, created) = send_json(&app, "POST", "/api/v1/assessments", Some(submission([2; 8]))).await;
        let id = created["id"].as_i64().unwrap();
        let uri = format!("/api/v1/assessments/{id}");
        send_json(&app, "POST", &format!("{uri}/comments"), Some(json!({ "comentario": "Seguimiento" }))).await;

        let (status, _) = send_json(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send_json(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send_json(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, comments) = send_json(&app, "GET", &format!("{uri}/comments"), None).await;
        assert!(comments.as_array().unwrap().is_empty());
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recommendations")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
        let (_, courses) = send_json(&app, "GET", "/api/v1/courses", None).await;
        assert_eq!(courses.as_array().unwrap().len(), 9);
    }

    #[tokio::test]
    async fn test_user_update_and_delete() {
        let (app, _) = test_app().await;
        let (_, created) = send_json(
            &app,
            "POST",
            "/api/v1/users",
            Some(json!({ "nombre": "Laura", "email": "laura@empresa.co", "rol": "empleado" })),
        )
        .await;
        let id = created["id"].as_i64().unwrap();
        let uri = format!("/api/v1/users/{id}");

        let update = json!({ "nombre": "Laura Ruiz", "email": "lruiz@empresa.co", "rol": "gestor", "activo": false });
        let (status, _) = send_json(&app, "PUT", &uri, Some(update.clone())).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (_, users) = send_json(&app, "GET", "/api/v1/users", None).await;
        assert_eq!(users[0]["name"], "Laura Ruiz");
        assert_eq!(users[0]["email"], "lruiz@empresa.co");
        assert_eq!(users[0]["role"], "gestor");
        assert_eq!(users[0]["active"], false);

        let (status, _) = send_json(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send_json(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send_json(&app, "PUT", &uri, Some(update)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, users) = send_json(&app, "GET", "/api/v1/users", None).await;
        assert!(users.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_body_rejections_use_error_envelope() {
        let (app, pool) = test_app().await;

        let mut body = submission([2; 8]);
        body["competencias"][0]["area"] = json!("Marketing");
        let (status, response) = send_json(&app, "POST", "/api/v1/assessments", Some(body)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response["error"]["code"], "UNPROCESSABLE_ENTITY");

        let (status, response) = send_json(
            &app,
            "POST",
            "/api/v1/courses",
            Some(json!({ "name": "Excel", "hours": "veinte", "instructors": "Equipo" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response["error"]["code"], "UNPROCESSABLE_ENTITY");

        let req = Request::builder()
            .method("POST")
            .uri("/api/v1/assessments")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"nombre\": "))
            .unwrap();
        let response = app.clone().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["error"]["code"], "VALIDATION_ERROR");

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM assessments")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_duplicate_user_email_is_unprocessable() {
        let (app, _) = test_app().await;
        let user = json!({ "nombre": "Carlos", "email": "carlos@empresa.co", "rol": "gestor" });
        let (status, _) = send_json(&app, "POST", "/api/v1/users", Some(user.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, _) = send_json(&app, "POST", "/api/v1/users", Some(user)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (_, users) = send_json(&app, "GET", "/api/v1/users", None).await;
        assert_eq!(users[0]["active"], true);
    }

    #[tokio::test]
    async fn test_backup_includes_everything() {
        let (app, _) = test_app().await;
        send_json(&app, "POST", "/api/v1/assessments", Some(submission([3; 8]))).await;
        let (status, backup) = send_json(&app, "GET", "/api/v1/backup", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(backup["assessments"].as_array().unwrap().len(), 1);
        assert_eq!(backup["courses"].as_array().unwrap().len(), 9);
        assert!(backup["comments"].as_array().unwrap().is_empty());
    }
}
