#![allow(dead_code)]

use async_trait::async_trait;
use contracts::shared::envelope::{FetchEnvelope, Page};
use contracts::shared::record::{Record, RecordId};
use frontend::shared::api::{ApiError, RecordApi};
use std::sync::Mutex;

/// In-memory backend speaking wire field names
#[derive(Default)]
pub struct FakeApi {
    pub rows: Mutex<Vec<Record>>,
    pub calls: Mutex<Vec<String>>,
    pub fail_with: Mutex<Option<ApiError>>,
    pub paginated: bool,
    next_id: Mutex<i64>,
}

impl FakeApi {
    pub fn with_rows(rows: Vec<serde_json::Value>) -> Self {
        let rows: Vec<Record> = rows.into_iter().filter_map(Record::from_json).collect();
        let max_id = rows
            .iter()
            .filter_map(|r| r.get("id").and_then(|v| v.as_i64()))
            .max()
            .unwrap_or(0);
        Self {
            rows: Mutex::new(rows),
            next_id: Mutex::new(max_id + 1),
            ..Default::default()
        }
    }

    pub fn paginated(mut self) -> Self {
        self.paginated = true;
        self
    }

    pub fn fail_next(&self, error: ApiError) {
        *self.fail_with.lock().unwrap() = Some(error);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn row(&self, id: i64) -> Option<Record> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id() == Some(RecordId::Int(id)))
            .cloned()
    }

    fn record_call(&self, call: String) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(call);
        match self.fail_with.lock().unwrap().take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RecordApi for FakeApi {
    async fn fetch_all(&self, endpoint: &str) -> Result<FetchEnvelope, ApiError> {
        self.record_call(format!("GET {}", endpoint))?;
        let rows = self.rows.lock().unwrap().clone();
        if self.paginated {
            Ok(FetchEnvelope::Paginated(Page {
                count: Some(rows.len() as u64),
                results: rows,
                next: None,
                previous: None,
            }))
        } else {
            Ok(FetchEnvelope::Bare(rows))
        }
    }

    async fn create(&self, endpoint: &str, payload: &Record) -> Result<Record, ApiError> {
        self.record_call(format!("POST {}", endpoint))?;
        let mut id = self.next_id.lock().unwrap();
        let mut created = Record::new();
        created.set("id", *id);
        for (key, value) in payload.iter() {
            created.set(key.clone(), value.clone());
        }
        *id += 1;
        self.rows.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update(&self, endpoint: &str, id: &RecordId, payload: &Record) -> Result<Record, ApiError> {
        self.record_call(format!("PUT {}{}", endpoint, id))?;
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|r| r.id().as_ref() == Some(id))
            .ok_or_else(|| ApiError::Validation {
                status: 404,
                body: "not found".into(),
            })?;
        for (key, value) in payload.iter() {
            row.set(key.clone(), value.clone());
        }
        Ok(row.clone())
    }

    async fn delete(&self, endpoint: &str, id: &RecordId) -> Result<(), ApiError> {
        self.record_call(format!("DELETE {}{}", endpoint, id))?;
        self.rows.lock().unwrap().retain(|r| r.id().as_ref() != Some(id));
        Ok(())
    }
}
