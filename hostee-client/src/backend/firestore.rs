// hostee-client/src/backend/firestore.rs
// 文档存储 - Firestore REST 文档接口与类型化值编解码

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{Map, Number, Value, json};
use shared::models::{Fields, Session};

use super::DocumentStore;
use super::http::HttpTransport;
use crate::{ClientConfig, ClientError, ClientResult};

#[derive(Debug, Deserialize)]
struct DocumentReply {
    #[serde(default)]
    fields: Map<String, Value>,
}

/// Document store over the Firestore REST API
#[derive(Debug, Clone)]
pub struct FirestoreStore {
    http: HttpTransport,
    documents_url: String,
}

impl FirestoreStore {
    pub fn new(http: HttpTransport, config: &ClientConfig) -> Self {
        Self {
            http,
            documents_url: format!(
                "{}/projects/{}/databases/(default)/documents",
                config.firestore_url.trim_end_matches('/'),
                config.project_id
            ),
        }
    }

    fn document_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{}/{}", self.documents_url, collection, id)
    }
}

#[async_trait]
impl DocumentStore for FirestoreStore {
    async fn get_document(
        &self,
        session: &Session,
        collection: &str,
        id: &str,
    ) -> ClientResult<Option<Fields>> {
        let request = self
            .http
            .get(&self.document_url(collection, id))
            .bearer_auth(&session.id_token);

        match self.http.send(request).await? {
            Ok(response) => {
                let reply: DocumentReply = HttpTransport::decode(response).await?;
                decode_fields(reply.fields).map(Some)
            }
            Err(rejection) if rejection.status == StatusCode::NOT_FOUND => Ok(None),
            Err(rejection) => Err(rejection.into_store_error()),
        }
    }

    async fn set_document(
        &self,
        session: &Session,
        collection: &str,
        id: &str,
        fields: Fields,
        merge: bool,
    ) -> ClientResult<()> {
        let mut request = self
            .http
            .patch(&self.document_url(collection, id))
            .bearer_auth(&session.id_token);

        // 合并写入: 只更新 updateMask 中列出的字段
        if merge {
            let mask: Vec<(&str, String)> = fields
                .keys()
                .map(|key| ("updateMask.fieldPaths", field_path(key)))
                .collect();
            request = request.query(&mask);
        }

        let body = json!({ "fields": encode_fields(fields) });
        match self.http.send(request.json(&body)).await? {
            Ok(_) => Ok(()),
            Err(rejection) => Err(rejection.into_store_error()),
        }
    }
}

/// Field path for an update mask; non-identifier keys are backquoted
fn field_path(key: &str) -> String {
    let mut chars = key.chars();
    let simple = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if simple {
        key.to_string()
    } else {
        format!("`{}`", key.replace('\\', "\\\\").replace('`', "\\`"))
    }
}

fn encode_fields(fields: Fields) -> Map<String, Value> {
    fields.into_iter().map(|(k, v)| (k, encode_value(v))).collect()
}

/// Plain JSON to a typed Firestore value
fn encode_value(value: Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                json!({ "integerValue": i.to_string() })
            } else if let Some(u) = n.as_u64() {
                json!({ "integerValue": u.to_string() })
            } else {
                json!({ "doubleValue": n.as_f64() })
            }
        }
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => {
            let values: Vec<Value> = items.into_iter().map(encode_value).collect();
            json!({ "arrayValue": { "values": values } })
        }
        Value::Object(map) => json!({ "mapValue": { "fields": encode_fields(map) } }),
    }
}

fn decode_fields(fields: Map<String, Value>) -> ClientResult<Fields> {
    fields
        .into_iter()
        .map(|(k, v)| decode_value(v).map(|v| (k, v)))
        .collect()
}

/// Typed Firestore value to plain JSON
fn decode_value(typed: Value) -> ClientResult<Value> {
    let mut map = match typed {
        Value::Object(map) => map,
        other => {
            return Err(ClientError::InvalidResponse(format!(
                "expected typed value, got {other}"
            )));
        }
    };
    let Some((kind, inner)) = map.iter_mut().next().map(|(k, v)| (k.clone(), v.take())) else {
        return Err(ClientError::InvalidResponse("empty typed value".into()));
    };

    match (kind.as_str(), inner) {
        ("nullValue", _) => Ok(Value::Null),
        ("booleanValue", Value::Bool(b)) => Ok(Value::Bool(b)),
        ("integerValue", Value::String(s)) => s
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| ClientError::InvalidResponse(format!("bad integerValue {s}"))),
        ("integerValue", Value::Number(n)) => Ok(Value::Number(n)),
        ("doubleValue", Value::Number(n)) => Ok(Value::Number(n)),
        ("doubleValue", Value::String(s)) => Ok(s
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map_or(Value::Null, Value::Number)),
        (
            "stringValue" | "timestampValue" | "referenceValue" | "bytesValue",
            Value::String(s),
        ) => Ok(Value::String(s)),
        ("geoPointValue", point @ Value::Object(_)) => Ok(point),
        ("arrayValue", Value::Object(mut array)) => match array.remove("values") {
            Some(Value::Array(values)) => values
                .into_iter()
                .map(decode_value)
                .collect::<ClientResult<Vec<_>>>()
                .map(Value::Array),
            _ => Ok(Value::Array(Vec::new())),
        },
        ("mapValue", Value::Object(mut inner)) => match inner.remove("fields") {
            Some(Value::Object(fields)) => decode_fields(fields).map(Value::Object),
            _ => Ok(Value::Object(Map::new())),
        },
        (kind, inner) => Err(ClientError::InvalidResponse(format!(
            "unsupported {kind}: {inner}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_document_url() {
        let http = HttpTransport::new(Duration::from_secs(1)).unwrap();
        let store = FirestoreStore::new(http, &ClientConfig::new("k", "hostee2"));
        assert_eq!(
            store.document_url("users", "u1"),
            "https://firestore.googleapis.com/v1/projects/hostee2/databases/(default)/documents/users/u1"
        );
    }

    #[test]
    fn test_field_path_quoting() {
        assert_eq!(field_path("nombre"), "nombre");
        assert_eq!(field_path("createdAt"), "createdAt");
        assert_eq!(field_path("ultima-actualizacion"), "`ultima-actualizacion`");
        assert_eq!(field_path("1st"), "`1st`");
    }

    #[test]
    fn test_encode_profile_document() {
        let fields = match json!({
            "nombre": "Ana",
            "stats": { "satisfaccion": 95, "calificacion": 5.5 },
            "tags": ["a"],
            "baja": null,
            "activo": true
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        let encoded = Value::Object(encode_fields(fields));
        assert_eq!(encoded["nombre"], json!({ "stringValue": "Ana" }));
        assert_eq!(
            encoded["stats"]["mapValue"]["fields"]["satisfaccion"],
            json!({ "integerValue": "95" })
        );
        assert_eq!(
            encoded["stats"]["mapValue"]["fields"]["calificacion"],
            json!({ "doubleValue": 5.5 })
        );
        assert_eq!(
            encoded["tags"],
            json!({ "arrayValue": { "values": [{ "stringValue": "a" }] } })
        );
        assert_eq!(encoded["baja"], json!({ "nullValue": null }));
        assert_eq!(encoded["activo"], json!({ "booleanValue": true }));
    }

    #[test]
    fn test_decode_document_reply() {
        let reply: DocumentReply = serde_json::from_value(json!({
            "name": "projects/p/databases/(default)/documents/users/u1",
            "fields": {
                "nombre": { "stringValue": "Ana" },
                "createdAt": { "timestampValue": "2024-06-24T14:10:00Z" },
                "stats": { "mapValue": { "fields": {
                    "ordenes": { "integerValue": "12" },
                    "calificacion": { "doubleValue": 4.5 }
                } } },
                "vacio": { "arrayValue": {} }
            }
        }))
        .unwrap();

        let fields = decode_fields(reply.fields).unwrap();
        assert_eq!(fields["nombre"], json!("Ana"));
        assert_eq!(fields["createdAt"], json!("2024-06-24T14:10:00Z"));
        assert_eq!(fields["stats"], json!({ "ordenes": 12, "calificacion": 4.5 }));
        assert_eq!(fields["vacio"], json!([]));
    }

    #[test]
    fn test_decode_empty_document() {
        let reply: DocumentReply = serde_json::from_value(json!({ "name": "x" })).unwrap();
        assert!(decode_fields(reply.fields).unwrap().is_empty());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            decode_value(json!("plain")),
            Err(ClientError::InvalidResponse(_))
        ));
        assert!(matches!(
            decode_value(json!({ "integerValue": "doce" })),
            Err(ClientError::InvalidResponse(_))
        ));
    }
}
