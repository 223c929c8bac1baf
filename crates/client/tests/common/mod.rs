//! In-process fake of the students REST API.
//!
//! Mirrors the json-server behaviour the tracker runs against: numeric
//! ids, full replace on `PUT`, `404` for unknown ids, `{}` on delete.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::sync::Mutex;

#[derive(Clone, Default)]
pub struct FakeApi {
    students: Arc<Mutex<Vec<Value>>>,
    next_id: Arc<AtomicU64>,
}

impl FakeApi {
    pub async fn seed(&self, student: Value) -> String {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let mut student = student;
        student["id"] = json!(id);
        self.students.lock().await.push(student);
        id.to_string()
    }

    pub async fn len(&self) -> usize {
        self.students.lock().await.len()
    }
}

fn id_matches(student: &Value, id: &str) -> bool {
    match &student["id"] {
        Value::Number(n) => n.to_string() == id,
        Value::String(s) => s == id,
        _ => false,
    }
}

async fn list(State(api): State<FakeApi>) -> Json<Vec<Value>> {
    Json(api.students.lock().await.clone())
}

async fn create(State(api): State<FakeApi>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let id = api.seed(body).await;
    let students = api.students.lock().await;
    let created = students
        .iter()
        .find(|s| id_matches(s, &id))
        .cloned()
        .unwrap_or(Value::Null);
    (StatusCode::CREATED, Json(created))
}

async fn read(
    State(api): State<FakeApi>,
    Path(id): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    api.students
        .lock()
        .await
        .iter()
        .find(|s| id_matches(s, &id))
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update(
    State(api): State<FakeApi>,
    Path(id): Path<String>,
    Json(mut body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    let mut students = api.students.lock().await;
    let slot = students
        .iter_mut()
        .find(|s| id_matches(s, &id))
        .ok_or(StatusCode::NOT_FOUND)?;
    body["id"] = slot["id"].clone();
    *slot = body.clone();
    Ok(Json(body))
}

async fn remove(
    State(api): State<FakeApi>,
    Path(id): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    let mut students = api.students.lock().await;
    let before = students.len();
    students.retain(|s| !id_matches(s, &id));
    if students.len() == before {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(json!({})))
}

async fn broken() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "database offline")
}

/// Start the fake API on an ephemeral port and return its address.
pub async fn spawn_api(api: FakeApi) -> SocketAddr {
    let app = Router::new()
        .route("/students", get(list).post(create))
        .route("/students/{id}", get(read).put(update).delete(remove))
        .route("/broken", get(broken).post(broken))
        .with_state(api);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

pub fn student_json(name: &str, class: u32, section: &str, scores: [i64; 3]) -> Value {
    let total: i64 = scores.iter().sum();
    let grade = tracker_core::Grade::for_total(total);
    json!({
        "name": name,
        "class": class,
        "section": section,
        "math": scores[0],
        "science": scores[1],
        "english": scores[2],
        "total": total,
        "grade": grade.as_str(),
    })
}
