use crate::delivery::{EmailMessage, Notifier, ReportStore};
use crate::error::{DeliveryError, StoreError};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

/// In-memory report store with switchable failures.
#[derive(Debug, Default)]
pub struct FakeReportStore {
    pub buckets: Mutex<BTreeSet<String>>,
    pub objects: Mutex<BTreeMap<(String, String), String>>,
    pub fail_create: Option<StoreError>,
    pub fail_put: Option<StoreError>,
    pub fail_get: Option<StoreError>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeReportStore {
    pub fn with_bucket(bucket: &str) -> Self {
        let store = Self::default();
        let _ = store.buckets.lock().unwrap().insert(bucket.to_string());
        store
    }

    pub fn with_object(bucket: &str, key: &str, body: &str) -> Self {
        let store = Self::with_bucket(bucket);
        let _ = store
            .objects
            .lock()
            .unwrap()
            .insert((bucket.to_string(), key.to_string()), body.to_string());
        store
    }

    pub fn object(&self, bucket: &str, key: &str) -> Option<String> {
        self.objects.lock().unwrap().get(&(bucket.to_string(), key.to_string())).cloned()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }
}

impl ReportStore for FakeReportStore {
    async fn head_bucket(&self, bucket: &str) -> Result<(), StoreError> {
        self.record("head_bucket");
        if self.buckets.lock().unwrap().contains(bucket) {
            Ok(())
        } else {
            Err(StoreError::BucketNotFound(bucket.to_string()))
        }
    }

    async fn create_bucket(&self, bucket: &str) -> Result<(), StoreError> {
        self.record("create_bucket");
        if let Some(e) = &self.fail_create {
            return Err(e.clone());
        }
        let _ = self.buckets.lock().unwrap().insert(bucket.to_string());
        Ok(())
    }

    async fn put_object(&self, bucket: &str, key: &str, body: &str) -> Result<(), StoreError> {
        self.record("put_object");
        if let Some(e) = &self.fail_put {
            return Err(e.clone());
        }
        let _ = self
            .objects
            .lock()
            .unwrap()
            .insert((bucket.to_string(), key.to_string()), body.to_string());
        Ok(())
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<String, StoreError> {
        self.record("get_object");
        if let Some(e) = &self.fail_get {
            return Err(e.clone());
        }
        self.object(bucket, key).ok_or_else(|| StoreError::ObjectNotFound {
            bucket: bucket.to_string(),
            key: key.to_string(),
        })
    }
}

/// Notifier that keeps every message it is asked to send.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<EmailMessage>>,
    pub fail: Option<DeliveryError>,
}

impl Notifier for RecordingNotifier {
    async fn send(&self, message: &EmailMessage) -> Result<(), DeliveryError> {
        if let Some(e) = &self.fail {
            return Err(e.clone());
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}
