use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, mpsc};
use std::thread;
use std::time::Duration;

use serde_json::Value;

/// In-process stand-in for the LearnDash v2 REST API.
///
/// Courses are served one per page so clients must follow
/// `X-WP-TotalPages`.
#[derive(Debug, Clone, Default)]
pub struct WpRestFixture {
    pub courses: Vec<(u64, String)>,
    pub lessons: HashMap<u64, Vec<(u64, String)>>,
    pub failing_lessons: HashSet<u64>,
}

impl WpRestFixture {
    pub fn course(mut self, id: u64, title: &str, lessons: &[(u64, &str)]) -> Self {
        self.courses.push((id, title.to_owned()));
        self.lessons.insert(
            id,
            lessons
                .iter()
                .map(|(id, title)| (*id, (*title).to_owned()))
                .collect(),
        );
        self
    }
}

pub struct WpRestStub {
    pub base_url: String,
    updates: Arc<Mutex<Vec<(u64, String)>>>,
    shutdown_tx: Option<mpsc::Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl WpRestStub {
    pub fn spawn(fixture: WpRestFixture) -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("start wp rest stub server");
        let addr = server.server_addr();
        let base_url = format!("http://{addr}");

        let updates = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&updates);
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

        let handle = thread::spawn(move || {
            loop {
                if shutdown_rx.try_recv().is_ok() {
                    break;
                }

                let mut request = match server.recv_timeout(Duration::from_millis(50)) {
                    Ok(Some(req)) => req,
                    Ok(None) => continue,
                    Err(_) => break,
                };

                let authorized = request
                    .headers()
                    .iter()
                    .any(|h| h.field.equiv("Authorization") && h.value.as_str().starts_with("Basic "));
                if !authorized {
                    let _ = request.respond(json_response(
                        401,
                        &serde_json::json!({"code": "rest_not_logged_in", "message": "Not logged in."}),
                        None,
                    ));
                    continue;
                }

                let url = url::Url::parse(&format!("http://stub{}", request.url()))
                    .expect("parse request url");
                let query: HashMap<String, String> = url.query_pairs().into_owned().collect();
                let path = url.path().trim_start_matches("/wp-json/ldlms/v2/").to_owned();

                let method = request.method().clone();
                let response = match (&method, path.as_str()) {
                    (tiny_http::Method::Get, "sfwd-courses") => {
                        let page: usize = query
                            .get("page")
                            .and_then(|p| p.parse().ok())
                            .unwrap_or(1);
                        let rows: Vec<Value> = fixture
                            .courses
                            .iter()
                            .skip(page.saturating_sub(1))
                            .take(1)
                            .map(|(id, title)| post_json(*id, title))
                            .collect();
                        json_response(
                            200,
                            &Value::Array(rows),
                            Some(fixture.courses.len().max(1)),
                        )
                    }
                    (tiny_http::Method::Get, "sfwd-lessons") => {
                        let course_id: u64 = query
                            .get("course")
                            .and_then(|c| c.parse().ok())
                            .unwrap_or(0);
                        let rows: Vec<Value> = fixture
                            .lessons
                            .get(&course_id)
                            .map(|lessons| {
                                lessons
                                    .iter()
                                    .map(|(id, title)| post_json(*id, title))
                                    .collect()
                            })
                            .unwrap_or_default();
                        json_response(200, &Value::Array(rows), Some(1))
                    }
                    (tiny_http::Method::Post, lesson_path)
                        if lesson_path.starts_with("sfwd-lessons/") =>
                    {
                        let lesson_id: u64 = lesson_path
                            .trim_start_matches("sfwd-lessons/")
                            .parse()
                            .unwrap_or(0);
                        let mut body = String::new();
                        let _ = request.as_reader().read_to_string(&mut body);
                        let parsed: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
                        let title = parsed
                            .get("title")
                            .and_then(|t| t.as_str())
                            .unwrap_or_default()
                            .to_owned();

                        if fixture.failing_lessons.contains(&lesson_id) {
                            json_response(
                                500,
                                &serde_json::json!({"code": "db_update_error", "message": "Could not update post in the database."}),
                                None,
                            )
                        } else {
                            recorded
                                .lock()
                                .expect("lock updates")
                                .push((lesson_id, title.clone()));
                            json_response(200, &post_json(lesson_id, &title), None)
                        }
                    }
                    _ => json_response(
                        404,
                        &serde_json::json!({"code": "rest_no_route", "message": "No route."}),
                        None,
                    ),
                };
                let _ = request.respond(response);
            }
        });

        Self {
            base_url,
            updates,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    pub fn updates(&self) -> Vec<(u64, String)> {
        self.updates.lock().expect("lock updates").clone()
    }
}

impl Drop for WpRestStub {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn post_json(id: u64, title: &str) -> Value {
    serde_json::json!({
        "id": id,
        "title": { "raw": title, "rendered": title },
    })
}

fn json_response(
    status: u16,
    body: &Value,
    total_pages: Option<usize>,
) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    let mut response =
        tiny_http::Response::from_string(body.to_string()).with_status_code(status);
    let header = tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
        .expect("build header");
    response = response.with_header(header);
    if let Some(pages) = total_pages {
        let header =
            tiny_http::Header::from_bytes(&b"X-WP-TotalPages"[..], pages.to_string().as_bytes())
                .expect("build header");
        response = response.with_header(header);
    }
    response
}
