//! HTTP client for document database REST requests.
//!
//! Wraps reqwest with the project's document root, the API key and the
//! signed-in user's ID token, and converts typed documents to plain JSON.

use super::value::{decode_document, encode_fields};
use super::FirestoreError;
use log::*;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde_json::{json, Value};

/// Page size requested when listing a collection.
///
const PAGE_SIZE: usize = 100;

/// How a patch treats the existing document.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Create the document if needed and overwrite only the given fields.
    Merge,
    /// Overwrite only the given fields; fail if the document is missing.
    MustExist,
}

/// Makes requests to the database and decodes typed documents.
///
pub struct Client {
    pub(crate) base_url: String,
    project_id: String,
    api_key: String,
    id_token: Option<String>,
    pub(crate) http_client: reqwest::Client,
}

impl Client {
    /// Returns a new instance for the given endpoint, project and key.
    ///
    pub fn new(base_url: &str, project_id: &str, api_key: &str) -> Self {
        Client {
            base_url: base_url.trim_end_matches('/').to_owned(),
            project_id: project_id.to_owned(),
            api_key: api_key.to_owned(),
            id_token: None,
            http_client: reqwest::Client::new(),
        }
    }

    /// Set or clear the token sent with writes.
    ///
    pub fn set_id_token(&mut self, id_token: Option<String>) -> &mut Self {
        self.id_token = id_token;
        self
    }

    pub fn has_id_token(&self) -> bool {
        self.id_token.is_some()
    }

    fn documents_url(&self, path: &str) -> String {
        let root = format!(
            "{}/v1/projects/{}/databases/(default)/documents",
            self.base_url, self.project_id
        );
        if path.is_empty() {
            root
        } else {
            format!("{}/{}", root, path.trim_start_matches('/'))
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http_client
            .request(method, self.documents_url(path))
            .query(&[("key", self.api_key.as_str())])
    }

    fn authorized(&self, method: Method, path: &str) -> Result<RequestBuilder, FirestoreError> {
        let token = self.id_token.as_ref().ok_or(FirestoreError::NotSignedIn)?;
        Ok(self.request(method, path).bearer_auth(token))
    }

    /// Send a request and turn non-success statuses into API errors.
    ///
    async fn send(&self, request: RequestBuilder) -> Result<Response, FirestoreError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let response_text = response
            .text()
            .await
            .unwrap_or_else(|_| String::from("Unable to read response"));
        let message = serde_json::from_str::<Value>(&response_text)
            .ok()
            .and_then(|v| {
                v.pointer("/error/message")
                    .and_then(Value::as_str)
                    .map(str::to_owned)
            })
            .unwrap_or(response_text);
        error!("API request failed with status {}: {}", status, message);
        Err(FirestoreError::ApiError {
            status: status.as_u16(),
            message,
        })
    }

    /// Return the decoded document at `path`, or `None` if it doesn't exist.
    ///
    pub async fn get_document(&self, path: &str) -> Result<Option<Value>, FirestoreError> {
        debug!("Requesting document {}...", path);
        match self.send(self.request(Method::GET, path)).await {
            Ok(response) => {
                let document: Value = response.json().await?;
                Ok(Some(decode_document(&document)?))
            }
            Err(FirestoreError::ApiError { status, .. })
                if status == StatusCode::NOT_FOUND.as_u16() =>
            {
                debug!("Document {} does not exist.", path);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Return every decoded document in a collection, following page tokens.
    ///
    pub async fn list_documents(&self, collection: &str) -> Result<Vec<Value>, FirestoreError> {
        let mut all_data = Vec::new();
        let mut page_token: Option<String> = None;
        let mut page = 0;

        loop {
            let mut params: Vec<(&str, String)> = vec![("pageSize", PAGE_SIZE.to_string())];
            if let Some(ref token) = page_token {
                params.push(("pageToken", token.clone()));
            }

            let response = self
                .send(self.request(Method::GET, collection).query(&params))
                .await?;
            let body: Value = response.json().await?;

            // An empty collection comes back as `{}`.
            if let Some(documents) = body.get("documents").and_then(Value::as_array) {
                for document in documents {
                    all_data.push(decode_document(document)?);
                }
                debug!(
                    "Fetched page {} of {}: {} documents (total so far: {})",
                    page,
                    collection,
                    documents.len(),
                    all_data.len()
                );
            }

            page_token = body
                .get("nextPageToken")
                .and_then(Value::as_str)
                .filter(|t| !t.is_empty())
                .map(str::to_owned);
            if page_token.is_none() {
                break;
            }
            page += 1;
        }

        Ok(all_data)
    }

    /// Write the fields of `data` into the document at `path`.
    ///
    pub async fn patch_document(
        &self,
        path: &str,
        data: &Value,
        mode: WriteMode,
    ) -> Result<Value, FirestoreError> {
        debug!("Patching document {} ({:?})...", path, mode);
        let fields = encode_fields(data)?;
        let mut params: Vec<(&str, &str)> = fields
            .keys()
            .map(|k| ("updateMask.fieldPaths", k.as_str()))
            .collect();
        if mode == WriteMode::MustExist {
            params.push(("currentDocument.exists", "true"));
        }

        let request = self
            .authorized(Method::PATCH, path)?
            .query(&params)
            .json(&json!({ "fields": fields }));
        let response = match self.send(request).await {
            Err(FirestoreError::ApiError { status, .. })
                if status == StatusCode::NOT_FOUND.as_u16() && mode == WriteMode::MustExist =>
            {
                return Err(FirestoreError::NotFound {
                    path: path.to_owned(),
                })
            }
            other => other?,
        };
        let document: Value = response.json().await?;
        decode_document(&document)
    }

    /// Add a document with a store-assigned id to `collection`.
    ///
    pub async fn create_document(
        &self,
        collection: &str,
        data: &Value,
    ) -> Result<Value, FirestoreError> {
        debug!("Creating document in {}...", collection);
        let fields = encode_fields(data)?;
        let request = self
            .authorized(Method::POST, collection)?
            .json(&json!({ "fields": fields }));
        let document: Value = self.send(request).await?.json().await?;
        decode_document(&document)
    }

    /// Delete the document at `path`. Deleting a missing document succeeds.
    ///
    pub async fn delete_document(&self, path: &str) -> Result<(), FirestoreError> {
        debug!("Deleting document {}...", path);
        self.send(self.authorized(Method::DELETE, path)?).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::uuid::UUIDv4;
    use fake::Fake;
    use httpmock::MockServer;
    use uuid::Uuid;

    const ROOT: &str = "/v1/projects/folio/databases/(default)/documents";

    fn client(server: &MockServer) -> Client {
        Client::new(&server.base_url(), "folio", "api-key")
    }

    #[tokio::test]
    async fn get_document_success() -> Result<(), FirestoreError> {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("GET")
                    .path(format!("{}/portfolio/contact", ROOT))
                    .query_param("key", "api-key");
                then.status(200).json_body(json!({
                    "name": "projects/folio/databases/(default)/documents/portfolio/contact",
                    "fields": { "email": { "stringValue": "me@example.com" } }
                }));
            })
            .await;

        let document = client(&server).get_document("portfolio/contact").await?;
        mock.assert_async().await;
        let document = document.unwrap();
        assert_eq!(document["email"], "me@example.com");
        assert_eq!(document["id"], "contact");
        Ok(())
    }

    #[tokio::test]
    async fn get_document_missing_is_none() -> Result<(), FirestoreError> {
        let server = MockServer::start();
        server
            .mock_async(|when, then| {
                when.method("GET").path(format!("{}/portfolio/about", ROOT));
                then.status(404).json_body(json!({
                    "error": { "code": 404, "message": "Document not found", "status": "NOT_FOUND" }
                }));
            })
            .await;

        assert!(client(&server)
            .get_document("portfolio/about")
            .await?
            .is_none());
        Ok(())
    }

    #[tokio::test]
    async fn get_document_server_error() {
        let server = MockServer::start();
        server
            .mock_async(|when, then| {
                when.method("GET").path(format!("{}/portfolio/about", ROOT));
                then.status(500).json_body(json!({
                    "error": { "code": 500, "message": "backend down" }
                }));
            })
            .await;

        match client(&server).get_document("portfolio/about").await {
            Err(FirestoreError::ApiError { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "backend down");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn list_documents_follows_page_tokens() -> Result<(), FirestoreError> {
        let server = MockServer::start();
        let second = server
            .mock_async(|when, then| {
                when.method("GET")
                    .path(format!("{}/projects", ROOT))
                    .query_param("pageToken", "next");
                then.status(200).json_body(json!({
                    "documents": [
                        { "name": "x/documents/projects/b", "fields": { "name": { "stringValue": "B" } } }
                    ]
                }));
            })
            .await;
        let first = server
            .mock_async(|when, then| {
                when.method("GET")
                    .path(format!("{}/projects", ROOT))
                    .query_param("pageSize", "100")
                    .matches(|req| {
                        !req.query_params
                            .as_ref()
                            .map(|params| params.iter().any(|(k, _)| k == "pageToken"))
                            .unwrap_or(false)
                    });
                then.status(200).json_body(json!({
                    "documents": [
                        { "name": "x/documents/projects/a", "fields": { "name": { "stringValue": "A" } } }
                    ],
                    "nextPageToken": "next"
                }));
            })
            .await;

        let documents = client(&server).list_documents("projects").await?;
        first.assert_async().await;
        second.assert_async().await;
        let ids: Vec<_> = documents.iter().map(|d| d["id"].clone()).collect();
        assert_eq!(ids, vec![json!("a"), json!("b")]);
        Ok(())
    }

    #[tokio::test]
    async fn list_documents_empty_collection() -> Result<(), FirestoreError> {
        let server = MockServer::start();
        server
            .mock_async(|when, then| {
                when.method("GET").path(format!("{}/socials", ROOT));
                then.status(200).json_body(json!({}));
            })
            .await;

        assert!(client(&server).list_documents("socials").await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn patch_document_merge_sends_mask_and_token() -> Result<(), FirestoreError> {
        let token: Uuid = UUIDv4.fake();
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("PATCH")
                    .path(format!("{}/portfolio/about", ROOT))
                    .header("Authorization", &format!("Bearer {}", &token))
                    .query_param("updateMask.fieldPaths", "skills")
                    .json_body(json!({ "fields": {
                        "skills": { "arrayValue": { "values": [ { "stringValue": "Rust" } ] } }
                    } }));
                then.status(200).json_body(json!({
                    "name": "x/documents/portfolio/about",
                    "fields": { "skills": { "arrayValue": { "values": [ { "stringValue": "Rust" } ] } } }
                }));
            })
            .await;

        let mut client = client(&server);
        client.set_id_token(Some(token.to_string()));
        client
            .patch_document("portfolio/about", &json!({ "skills": ["Rust"] }), WriteMode::Merge)
            .await?;
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn patch_document_must_exist_maps_missing_to_not_found() {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("PATCH")
                    .path(format!("{}/experience/gone", ROOT))
                    .query_param("currentDocument.exists", "true");
                then.status(404).json_body(json!({
                    "error": { "code": 404, "message": "No document to update" }
                }));
            })
            .await;

        let mut client = client(&server);
        client.set_id_token(Some("token".to_string()));
        let result = client
            .patch_document("experience/gone", &json!({ "role": "Dev" }), WriteMode::MustExist)
            .await;
        mock.assert_async().await;
        assert!(matches!(result, Err(FirestoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn writes_require_token() {
        let server = MockServer::start();
        let client = client(&server);
        assert!(matches!(
            client.delete_document("projects/a").await,
            Err(FirestoreError::NotSignedIn)
        ));
        assert!(matches!(
            client.create_document("projects", &json!({})).await,
            Err(FirestoreError::NotSignedIn)
        ));
    }

    #[tokio::test]
    async fn create_and_delete_document() -> Result<(), FirestoreError> {
        let server = MockServer::start();
        let create = server
            .mock_async(|when, then| {
                when.method("POST")
                    .path(format!("{}/projects", ROOT))
                    .header("Authorization", "Bearer token");
                then.status(200).json_body(json!({
                    "name": "x/documents/projects/new-id",
                    "fields": { "name": { "stringValue": "Folio" } }
                }));
            })
            .await;
        let delete = server
            .mock_async(|when, then| {
                when.method("DELETE")
                    .path(format!("{}/projects/new-id", ROOT))
                    .header("Authorization", "Bearer token");
                then.status(200).json_body(json!({}));
            })
            .await;

        let mut client = client(&server);
        client.set_id_token(Some("token".to_string()));
        let created = client
            .create_document("projects", &json!({ "name": "Folio" }))
            .await?;
        assert_eq!(created["id"], "new-id");
        client.delete_document("projects/new-id").await?;
        create.assert_async().await;
        delete.assert_async().await;
        Ok(())
    }
}
