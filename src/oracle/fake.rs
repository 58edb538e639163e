use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::OracleError;
use crate::oracle::transport::OracleTransport;

type Responder = Box<dyn Fn(&Value) -> Result<Value, OracleError> + Send + Sync>;

#[derive(Debug, Clone)]
pub struct RecordedGet {
    pub path: String,
    pub query: Vec<(String, String)>,
    pub bearer: Option<String>,
}

/// Scripted oracle: responses are keyed by exact path. Unscripted paths
/// answer with a 404.
#[derive(Default)]
pub struct FakeTransport {
    posts: Mutex<HashMap<String, Responder>>,
    gets: Mutex<HashMap<String, Result<Value, OracleError>>>,
    post_log: Mutex<Vec<(String, Value)>>,
    get_log: Mutex<Vec<RecordedGet>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_post<F>(&self, path: &str, responder: F)
    where
        F: Fn(&Value) -> Result<Value, OracleError> + Send + Sync + 'static,
    {
        self.posts
            .lock()
            .unwrap()
            .insert(path.to_string(), Box::new(responder));
    }

    pub fn on_get(&self, path: &str, response: Result<Value, OracleError>) {
        self.gets.lock().unwrap().insert(path.to_string(), response);
    }

    pub fn post_count(&self, path: &str) -> usize {
        self.post_bodies(path).len()
    }

    pub fn post_bodies(&self, path: &str) -> Vec<Value> {
        self.post_log
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, _)| p == path)
            .map(|(_, body)| body.clone())
            .collect()
    }

    pub fn gets(&self) -> Vec<RecordedGet> {
        self.get_log.lock().unwrap().clone()
    }
}

fn not_found(path: &str) -> OracleError {
    OracleError::Status {
        status: 404,
        body: format!("no route for {path}"),
    }
}

#[async_trait]
impl OracleTransport for FakeTransport {
    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, OracleError> {
        // Let concurrent callers interleave like a real round trip would.
        tokio::task::yield_now().await;
        self.post_log
            .lock()
            .unwrap()
            .push((path.to_string(), body.clone()));
        let posts = self.posts.lock().unwrap();
        match posts.get(path) {
            Some(responder) => responder(body),
            None => Err(not_found(path)),
        }
    }

    async fn get_json(
        &self,
        path: &str,
        query: &[(&str, &str)],
        bearer: Option<&str>,
    ) -> Result<Value, OracleError> {
        self.get_log.lock().unwrap().push(RecordedGet {
            path: path.to_string(),
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            bearer: bearer.map(str::to_string),
        });
        self.gets
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .unwrap_or_else(|| Err(not_found(path)))
    }
}
