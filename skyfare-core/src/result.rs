use serde::Serialize;
use serde_json::Value;

/// Why a service call did not produce data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Well-formed reply with nothing in it.
    NotFound,
    /// The provider reported a fault.
    ProviderError,
    /// Transport, decoding, timeout or worker failure.
    UnexpectedFault,
}

/// Data returned by a successful service call, passed through as the provider sent it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServicePayload {
    pub data: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dictionaries: Option<Value>,
}

impl ServicePayload {
    pub fn new(data: Value) -> Self {
        Self { data, meta: None, dictionaries: None }
    }

    pub fn with_meta(mut self, meta: Option<Value>) -> Self {
        self.meta = meta;
        self
    }

    pub fn with_dictionaries(mut self, dictionaries: Option<Value>) -> Self {
        self.dictionaries = dictionaries;
        self
    }

    /// Number of records carried: list length, or 1 for a single record.
    pub fn count(&self) -> usize {
        match &self.data {
            Value::Array(items) => items.len(),
            Value::Null => 0,
            Value::Object(map) if map.is_empty() => 0,
            _ => 1,
        }
    }
}

/// A failed service call. `data` holds the empty payload matching the
/// operation's shape: `[]` for searches, `{}` for single-record lookups.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[error("{message}")]
pub struct ServiceFailure {
    pub kind: FailureKind,
    pub message: String,
    pub data: Value,
}

impl ServiceFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>, data: Value) -> Self {
        Self { kind, message: message.into(), data }
    }
}

pub type ServiceResult = Result<ServicePayload, ServiceFailure>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_count() {
        assert_eq!(ServicePayload::new(json!([1, 2, 3])).count(), 3);
        assert_eq!(ServicePayload::new(json!({"iataCode": "ICN"})).count(), 1);
        assert_eq!(ServicePayload::new(json!({})).count(), 0);
        assert_eq!(ServicePayload::new(Value::Null).count(), 0);
    }

    #[test]
    fn test_payload_omits_absent_sections() {
        let value = serde_json::to_value(ServicePayload::new(json!([]))).unwrap();
        assert!(value.get("meta").is_none());
        assert!(value.get("dictionaries").is_none());
    }

    #[test]
    fn test_failure_kind_serializes_snake_case() {
        let failure = ServiceFailure::new(FailureKind::ProviderError, "API error: D", json!([]));
        let value = serde_json::to_value(&failure).unwrap();
        assert_eq!(value["kind"], "provider_error");
        assert_eq!(failure.to_string(), "API error: D");
    }
}
