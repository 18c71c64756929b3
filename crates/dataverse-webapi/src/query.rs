//! Read-only SQL through the server-side query procedure.

use serde_json::{Map, Value};
use tracing::{debug, instrument};

use dataverse_core::error::{InvalidInputError, ProtocolError};
use dataverse_core::traits::Method;
use dataverse_core::{Record, Result};

use crate::WebApiClient;
use crate::endpoints::{QUERY_RESULT, SqlQueryRequest};

impl WebApiClient {
    /// Run a SQL query and return its rows.
    ///
    /// A `null` or blank result yields no rows.
    ///
    /// # Errors
    ///
    /// An empty query is rejected without a request. A response without
    /// `queryresult`, or one whose value is neither a string nor `null`,
    /// is a protocol error.
    #[instrument(skip(self))]
    pub async fn query_sql(&self, sql: &str) -> Result<Vec<Record>> {
        if sql.trim().is_empty() {
            return Err(InvalidInputError::Other {
                message: "query text is required".to_string(),
            }
            .into());
        }

        let procedure = &self.config().sql_api_name;
        let body = serde_json::to_value(SqlQueryRequest { querytext: sql })?;
        let request = self
            .request(Method::Post, self.url(procedure))
            .await?
            .json(body);

        let envelope: Map<String, Value> = self.execute(request).await?.json()?;
        let rows = parse_query_result(procedure, envelope)?;
        debug!(rows = rows.len(), "query completed");
        Ok(rows)
    }
}

fn parse_query_result(procedure: &str, mut envelope: Map<String, Value>) -> Result<Vec<Record>> {
    let result = envelope
        .remove(QUERY_RESULT)
        .ok_or_else(|| ProtocolError::MissingField {
            endpoint: procedure.to_string(),
            field: QUERY_RESULT.to_string(),
        })?;

    match result {
        Value::Null => Ok(Vec::new()),
        Value::String(text) if text.trim().is_empty() => Ok(Vec::new()),
        Value::String(text) => Ok(serde_json::from_str(text.trim())?),
        other => Err(ProtocolError::UnexpectedType {
            field: QUERY_RESULT.to_string(),
            found: json_type(&other).to_string(),
        }
        .into()),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dataverse_core::ErrorKind;
    use serde_json::json;

    fn envelope(value: Value) -> Map<String, Value> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn string_result_is_parsed_as_rows() {
        let rows = parse_query_result(
            "mcp_ExecuteSqlQuery",
            envelope(json!({"queryresult": "[{\"name\":\"A\"},{\"name\":\"B\"}]"})),
        )
        .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1]["name"], "B");
    }

    #[test]
    fn null_and_blank_results_are_empty() {
        for value in [json!(null), json!(""), json!("   ")] {
            let rows = parse_query_result("p", envelope(json!({ "queryresult": value }))).unwrap();
            assert!(rows.is_empty());
        }
    }

    #[test]
    fn missing_envelope_key_is_protocol_error() {
        let err = parse_query_result("mcp_ExecuteSqlQuery", envelope(json!({"value": []})))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Protocol);
        assert!(err.to_string().contains("mcp_ExecuteSqlQuery"));
    }

    #[test]
    fn non_string_result_is_protocol_error() {
        let err = parse_query_result("p", envelope(json!({"queryresult": [1, 2]}))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Protocol);
        assert!(err.to_string().contains("array"));
    }

    #[test]
    fn malformed_result_string_is_protocol_error() {
        let err = parse_query_result("p", envelope(json!({"queryresult": "[{"}))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Protocol);
    }
}
