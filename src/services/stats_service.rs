use chrono::Utc;
use serde_json::{json, Value as JsonValue};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Fire-and-forget usage counters. Callers increment from spawned tasks so
/// the exam response is never delayed by bookkeeping.
#[derive(Clone, Default)]
pub struct StatsService {
    counters: Arc<Mutex<HashMap<String, u64>>>,
}

impl StatsService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&self, key: &str, amount: u64) {
        let mut counters = self.counters.lock().expect("stats mutex poisoned");
        *counters.entry(key.to_string()).or_insert(0) += amount;
    }

    /// Bumps the daily, monthly and all-time buckets for a counter family
    /// (`v` for visits, `e` for exams).
    pub fn increment_daily(&self, family: &str, amount: u64) {
        let now = Utc::now();
        let today = now.format("%Y-%m-%d");
        let month = now.format("%Y-%m");

        self.increment(&format!("{}:{}", family, today), amount);
        self.increment(&format!("{}:{}", family, month), amount);
        self.increment(&format!("{}:all", family), amount);
    }

    pub fn record_exam(&self, difficulty: &str, course: &str, questions: u64, gen_time_ms: u64) {
        self.increment_daily("e", 1);
        self.increment(&format!("diff:{}", difficulty), 1);
        self.increment(&format!("course:{}", course), 1);
        self.increment("stats:total_questions", questions);
        self.increment("stats:total_gen_time", gen_time_ms);
    }

    pub fn record_event(&self, event: &str) {
        self.increment(&format!("event:{}", event), 1);
    }

    fn get(&self, key: &str) -> u64 {
        self.counters
            .lock()
            .expect("stats mutex poisoned")
            .get(key)
            .copied()
            .unwrap_or(0)
    }

    fn bucket(&self, family: &str) -> JsonValue {
        let now = Utc::now();
        json!({
            "today": self.get(&format!("{}:{}", family, now.format("%Y-%m-%d"))),
            "month": self.get(&format!("{}:{}", family, now.format("%Y-%m"))),
            "total": self.get(&format!("{}:all", family)),
        })
    }

    fn by_prefix(&self, prefix: &str) -> JsonValue {
        let counters = self.counters.lock().expect("stats mutex poisoned");
        let map: serde_json::Map<String, JsonValue> = counters
            .iter()
            .filter_map(|(key, value)| {
                key.strip_prefix(prefix)
                    .map(|name| (name.to_string(), json!(value)))
            })
            .collect();
        JsonValue::Object(map)
    }

    /// Snapshot served by `GET /api/stats`.
    pub fn snapshot(&self) -> JsonValue {
        json!({
            "visitors": self.bucket("v"),
            "exams": self.bucket("e"),
            "difficulties": {
                "facil": self.get("diff:facil"),
                "media": self.get("diff:media"),
                "dificil": self.get("diff:dificil"),
            },
            "courses": self.by_prefix("course:"),
            "technical": {
                "total_questions": self.get("stats:total_questions"),
                "total_gen_time": self.get("stats:total_gen_time"),
            },
            "events": self.by_prefix("event:"),
        })
    }
}
