//! Record CRUD.
//!
//! Every failure is returned wrapped in [`Error::Record`] naming the entity
//! set and, for keyed operations, the key.

use serde_json::Value;
use tracing::{debug, instrument, warn};

use dataverse_core::batch::{BATCH_SIZE, BatchRequest, BatchResponse, PREFER_REPRESENTATION};
use dataverse_core::record::format_key;
use dataverse_core::traits::Method;
use dataverse_core::{Error, Record, RecordId, Result, TabularSource, extract_id};

use crate::WebApiClient;
use crate::endpoints::*;

fn in_record<'a>(entity_set: &'a str, key: Option<&'a str>) -> impl Fn(Error) -> Error + 'a {
    move |err| err.for_record(entity_set, key)
}

impl WebApiClient {
    /// Create one record and return the created representation.
    #[instrument(skip(self, record))]
    pub async fn create(&self, entity_set: &str, record: &Record) -> Result<Record> {
        let context = in_record(entity_set, None);
        let request = self
            .request(Method::Post, self.url(entity_set))
            .await
            .map_err(&context)?
            .header(HEADER_PREFER, PREFER_REPRESENTATION)
            .json(Value::Object(record.clone()));

        let created: Record = self
            .execute(request)
            .await
            .and_then(|response| response.json())
            .map_err(&context)?;
        debug!(fields = created.len(), "record created");
        Ok(created)
    }

    /// Create one record and return only its id.
    pub async fn create_id(&self, entity_set: &str, record: &Record) -> Result<RecordId> {
        let created = self.create(entity_set, record).await?;
        extract_id(&created).map_err(in_record(entity_set, None))
    }

    /// Create records through `$batch`, 25 per request.
    ///
    /// The result is aligned with `records`: a `None` marks an item whose
    /// changeset member did not come back as created.
    #[instrument(skip(self, records), fields(count = records.len()))]
    pub async fn create_many(
        &self,
        entity_set: &str,
        records: &[Record],
    ) -> Result<Vec<Option<Record>>> {
        let mut results = Vec::with_capacity(records.len());
        for (index, chunk) in records.chunks(BATCH_SIZE).enumerate() {
            let created = self
                .execute_batch(entity_set, chunk)
                .await
                .map_err(in_record(entity_set, None))?;
            let failed = created.iter().filter(|r| r.is_none()).count();
            if failed > 0 {
                warn!(batch = index, failed, size = chunk.len(), "batch items not created");
            } else {
                debug!(batch = index, size = chunk.len(), "batch created");
            }
            results.extend(created);
        }
        Ok(results)
    }

    /// Batch create returning ids. A failed item stays `None`; a created
    /// record without an id field is an error.
    pub async fn create_many_ids(
        &self,
        entity_set: &str,
        records: &[Record],
    ) -> Result<Vec<Option<RecordId>>> {
        self.create_many(entity_set, records)
            .await?
            .iter()
            .map(|created| created.as_ref().map(extract_id).transpose())
            .collect::<Result<Vec<_>>>()
            .map_err(in_record(entity_set, None))
    }

    /// Batch create from any tabular source. An empty source sends nothing.
    pub async fn create_from<S>(&self, entity_set: &str, source: &S) -> Result<Vec<Option<Record>>>
    where
        S: TabularSource + ?Sized,
    {
        if source.is_empty() {
            return Ok(Vec::new());
        }
        self.create_many(entity_set, &source.to_records()).await
    }

    async fn execute_batch(&self, entity_set: &str, chunk: &[Record]) -> Result<Vec<Option<Record>>> {
        let batch = BatchRequest::create(self.api_url(), entity_set, chunk);
        let encoded = batch.encode();
        debug!(batch = %encoded.batch, items = batch.len(), "sending batch");

        let request = self
            .request(Method::Post, batch.endpoint())
            .await?
            .header(HEADER_CONTENT_TYPE, encoded.content_type)
            .text(encoded.body);

        let response = self.execute(request).await?;
        Ok(BatchResponse::decode(&response.body, batch.len()).into_records())
    }

    /// Patch a record unconditionally and return the updated representation.
    #[instrument(skip(self, record))]
    pub async fn update(&self, entity_set: &str, key: &str, record: &Record) -> Result<Record> {
        let context = in_record(entity_set, Some(key));
        let url = self.url(&format!("{}{}", entity_set, format_key(key)));
        let request = self
            .request(Method::Patch, url)
            .await
            .map_err(&context)?
            .header(HEADER_IF_MATCH, MATCH_ANY)
            .header(HEADER_PREFER, PREFER_REPRESENTATION)
            .json(Value::Object(record.clone()));

        self.execute(request)
            .await
            .and_then(|response| response.json())
            .map_err(&context)
    }

    /// Delete a record unconditionally.
    #[instrument(skip(self))]
    pub async fn delete(&self, entity_set: &str, key: &str) -> Result<()> {
        let context = in_record(entity_set, Some(key));
        let url = self.url(&format!("{}{}", entity_set, format_key(key)));
        let request = self
            .request(Method::Delete, url)
            .await
            .map_err(&context)?
            .header(HEADER_IF_MATCH, MATCH_ANY);

        self.execute(request).await.map_err(&context)?;
        debug!("record deleted");
        Ok(())
    }

    /// Fetch a record, optionally limited to a comma-separated field list.
    #[instrument(skip(self))]
    pub async fn get(&self, entity_set: &str, key: &str, select: Option<&str>) -> Result<Record> {
        let context = in_record(entity_set, Some(key));
        let url = self.url(&format!("{}{}", entity_set, format_key(key)));
        let mut request = self.request(Method::Get, url).await.map_err(&context)?;
        if let Some(select) = select.filter(|s| !s.trim().is_empty()) {
            request = request.query("$select", select);
        }

        self.execute(request)
            .await
            .and_then(|response| response.json())
            .map_err(&context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::ScriptedTransport;
    use dataverse_core::traits::{Body, HttpResponse};
    use dataverse_core::{ClientConfig, ErrorKind, OrgUrl, StaticTokenCredential};
    use serde_json::json;

    fn client(transport: ScriptedTransport) -> WebApiClient {
        let org = OrgUrl::new("https://contoso.crm.dynamics.com").unwrap();
        let config = ClientConfig::default().with_http_retries(0);
        WebApiClient::with_transport(org, StaticTokenCredential::new("t"), config, transport)
    }

    fn record(value: Value) -> Record {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn empty_batch_sends_nothing() {
        let transport = ScriptedTransport::new();
        let client = client(transport.clone());

        let created = client.create_many("accounts", &[]).await.unwrap();
        assert!(created.is_empty());

        let empty: Vec<Record> = Vec::new();
        assert!(client.create_from("accounts", &empty).await.unwrap().is_empty());
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn create_id_requires_an_id_field() {
        let transport =
            ScriptedTransport::new().respond_json(201, json!({"name": "Contoso", "revenue": 1}));
        let client = client(transport);

        let err = client
            .create_id("accounts", &record(json!({"name": "Contoso"})))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[tokio::test]
    async fn batch_request_is_multipart() {
        let transport = ScriptedTransport::new().respond(HttpResponse::new(200, ""));
        let client = client(transport.clone());

        let created = client
            .create_many("accounts", &[record(json!({"name": "A"}))])
            .await
            .unwrap();
        assert_eq!(created, vec![None]);

        let requests = transport.requests();
        assert_eq!(
            requests[0].url,
            "https://contoso.crm.dynamics.com/api/data/v9.2/$batch"
        );
        assert!(
            requests[0]
                .header_value("Content-Type")
                .unwrap()
                .starts_with("multipart/mixed; boundary=batch_")
        );
        match &requests[0].body {
            Some(Body::Text(body)) => assert!(body.contains(r#"{"name":"A"}"#)),
            other => panic!("expected multipart text body, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn failures_name_the_entity_set_and_key() {
        let key = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
        let transport = ScriptedTransport::new()
            .respond_json(
                404,
                json!({"error": {"code": "0x80040217", "message": "Does Not Exist"}}),
            )
            .respond_json(201, json!({"name": "Contoso"}));
        let client = client(transport);

        let err = client.delete("new_sampleitems", key).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Status);
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.entity_set(), Some("new_sampleitems"));
        let message = err.to_string();
        assert!(message.contains("new_sampleitems(3fa85f64-5717-4562-b3fc-2c963f66afa6)"));
        assert!(message.contains("Does Not Exist"));

        let err = client
            .create_id("new_sampleitems", &record(json!({"name": "Contoso"})))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(err.to_string().starts_with("new_sampleitems: "));
    }

    #[tokio::test]
    async fn keys_are_wrapped_once() {
        let transport = ScriptedTransport::new()
            .respond(HttpResponse::new(204, ""))
            .respond(HttpResponse::new(204, ""));
        let client = client(transport.clone());

        client.delete("accounts", "abc").await.unwrap();
        client.delete("accounts", "(abc)").await.unwrap();

        let requests = transport.requests();
        for request in &requests {
            assert!(request.url.ends_with("/accounts(abc)"));
            assert_eq!(request.header_value("If-Match"), Some("*"));
        }
    }
}
