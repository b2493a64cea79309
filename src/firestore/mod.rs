mod client;
mod error;
pub mod value;

pub use client::{Client, WriteMode};
pub use error::FirestoreError;

use crate::content::*;
use crate::provider::FetchedContent;
use chrono::prelude::*;
use log::*;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};

/// Collection holding the singleton documents.
///
pub const PORTFOLIO_COLLECTION: &str = "portfolio";

pub type Result<T> = std::result::Result<T, FirestoreError>;

/// Responsible for asynchronous interaction with the content database
/// including transformation of documents into content records.
///
pub struct Portfolio {
    client: Client,
}

impl Portfolio {
    /// Returns a new instance for the given endpoint, project and API key.
    ///
    pub fn new(base_url: &str, project_id: &str, api_key: &str) -> Portfolio {
        debug!(
            "Initializing content client for project {} at {}...",
            project_id, base_url
        );
        Portfolio {
            client: Client::new(base_url, project_id, api_key),
        }
    }

    /// Set or clear the ID token used to authorize writes.
    ///
    pub fn set_id_token(&mut self, id_token: Option<String>) -> &mut Self {
        self.client.set_id_token(id_token);
        self
    }

    fn singleton_path<T: SingletonRecord>() -> String {
        format!("{}/{}", PORTFOLIO_COLLECTION, T::DOCUMENT)
    }

    fn record_path<T: CollectionRecord>(id: &str) -> String {
        format!("{}/{}", T::COLLECTION, id)
    }

    async fn fetch_singleton<T: SingletonRecord + DeserializeOwned>(&self) -> Result<Option<T>> {
        match self.client.get_document(&Self::singleton_path::<T>()).await? {
            Some(document) => Ok(Some(serde_json::from_value(document)?)),
            None => Ok(None),
        }
    }

    async fn fetch_collection<T: CollectionRecord + DeserializeOwned>(&self) -> Result<Vec<T>> {
        let documents = self.client.list_documents(T::COLLECTION).await?;
        let mut records: Vec<T> = documents
            .into_iter()
            .filter_map(|document| {
                let id = document["id"].as_str().unwrap_or("?").to_string();
                match serde_json::from_value(document) {
                    Ok(record) => Some(record),
                    Err(e) => {
                        warn!("Skipping {}/{}: {}", T::COLLECTION, id, e);
                        None
                    }
                }
            })
            .collect();
        order_records(&mut records);
        debug!("Retrieved {} records from {}", records.len(), T::COLLECTION);
        Ok(records)
    }

    /// Returns the about document, if one has been saved.
    ///
    pub async fn fetch_about(&self) -> Result<Option<About>> {
        debug!("Requesting about content...");
        self.fetch_singleton().await
    }

    /// Returns experience entries ordered by `sort_order`.
    ///
    pub async fn fetch_experience(&self) -> Result<Vec<Experience>> {
        debug!("Requesting experience entries...");
        self.fetch_collection().await
    }

    /// Returns projects ordered by `sort_order`.
    ///
    pub async fn fetch_projects(&self) -> Result<Vec<Project>> {
        debug!("Requesting projects...");
        self.fetch_collection().await
    }

    pub async fn fetch_contact(&self) -> Result<Option<Contact>> {
        debug!("Requesting contact details...");
        self.fetch_singleton().await
    }

    /// Returns social links ordered by `sort_order`.
    ///
    pub async fn fetch_socials(&self) -> Result<Vec<SocialLink>> {
        debug!("Requesting social links...");
        self.fetch_collection().await
    }

    pub async fn fetch_settings(&self) -> Result<Option<Settings>> {
        debug!("Requesting site settings...");
        self.fetch_singleton().await
    }

    /// Fetch every resource concurrently. A failed read is logged and
    /// reported as missing so the caller can substitute fallback data.
    ///
    pub async fn fetch_all(&self) -> FetchedContent {
        let (about, experience, projects, contact, socials, settings) = tokio::join!(
            self.fetch_about(),
            self.fetch_experience(),
            self.fetch_projects(),
            self.fetch_contact(),
            self.fetch_socials(),
            self.fetch_settings(),
        );
        FetchedContent {
            about: settle("about", about).flatten(),
            experience: settle("experience", experience),
            projects: settle("projects", projects),
            contact: settle("contact", contact).flatten(),
            socials: settle("socials", socials),
            settings: settle("settings", settings).flatten(),
        }
    }

    async fn merge_singleton<T: SingletonRecord>(&self, data: &Value) -> Result<()> {
        self.client
            .patch_document(&Self::singleton_path::<T>(), data, WriteMode::Merge)
            .await?;
        Ok(())
    }

    async fn create_record<T: CollectionRecord + Serialize>(&self, record: &T) -> Result<String> {
        let mut data = serde_json::to_value(record)?;
        if let Some(object) = data.as_object_mut() {
            object
                .entry("sort_order")
                .or_insert_with(|| Value::from(0));
            object.insert("created_at".to_string(), Value::from(Utc::now().to_rfc3339()));
        }
        let created = self.client.create_document(T::COLLECTION, &data).await?;
        created
            .get("id")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| FirestoreError::MalformedValue("created document has no name".into()))
    }

    async fn update_record<T: CollectionRecord + Serialize>(&self, id: &str, record: &T) -> Result<()> {
        let data = serde_json::to_value(record)?;
        self.client
            .patch_document(&Self::record_path::<T>(id), &data, WriteMode::MustExist)
            .await?;
        Ok(())
    }

    async fn delete_record<T: CollectionRecord>(&self, id: &str) -> Result<()> {
        self.client
            .delete_document(&Self::record_path::<T>(id))
            .await
    }

    /// Merge the about fields into the stored document.
    ///
    pub async fn update_about(&self, about: &About) -> Result<()> {
        debug!("Updating about content...");
        self.merge_singleton::<About>(&serde_json::to_value(about)?)
            .await
    }

    /// Overwrite only the skills list of the about document.
    ///
    pub async fn update_skills(&self, skills: &[String]) -> Result<()> {
        debug!("Updating {} skills...", skills.len());
        self.merge_singleton::<About>(&json!({ "skills": skills }))
            .await
    }

    /// Create an experience entry and return its new id.
    ///
    pub async fn create_experience(&self, entry: &Experience) -> Result<String> {
        debug!("Creating experience entry at {}...", entry.company);
        self.create_record(entry).await
    }

    pub async fn update_experience(&self, id: &str, entry: &Experience) -> Result<()> {
        debug!("Updating experience entry {}...", id);
        self.update_record(id, entry).await
    }

    pub async fn delete_experience(&self, id: &str) -> Result<()> {
        debug!("Deleting experience entry {}...", id);
        self.delete_record::<Experience>(id).await
    }

    /// Create a project and return its new id.
    ///
    pub async fn create_project(&self, project: &Project) -> Result<String> {
        debug!("Creating project {}...", project.name);
        self.create_record(project).await
    }

    pub async fn update_project(&self, id: &str, project: &Project) -> Result<()> {
        debug!("Updating project {}...", id);
        self.update_record(id, project).await
    }

    pub async fn delete_project(&self, id: &str) -> Result<()> {
        debug!("Deleting project {}...", id);
        self.delete_record::<Project>(id).await
    }

    pub async fn update_contact(&self, contact: &Contact) -> Result<()> {
        debug!("Updating contact details...");
        self.merge_singleton::<Contact>(&serde_json::to_value(contact)?)
            .await
    }

    /// Replace the whole social link list. Links with an empty URL are
    /// dropped and the rest are stored in order with a dense sort order.
    ///
    pub async fn replace_socials(&self, links: &[SocialLink]) -> Result<Vec<SocialLink>> {
        let existing = self.client.list_documents(SocialLink::COLLECTION).await?;
        debug!(
            "Replacing {} stored social links with {}...",
            existing.len(),
            links.len()
        );
        for id in existing
            .iter()
            .filter_map(|d| d.get("id").and_then(Value::as_str))
        {
            self.delete_record::<SocialLink>(id).await?;
        }

        let mut saved = vec![];
        for (i, link) in links.iter().filter(|l| !l.url.trim().is_empty()).enumerate() {
            let data = json!({
                "platform": link.platform,
                "url": link.url.trim(),
                "sort_order": i as i64 + 1,
            });
            let created = self
                .client
                .create_document(SocialLink::COLLECTION, &data)
                .await?;
            saved.push(serde_json::from_value(created)?);
        }
        Ok(saved)
    }

    /// Merge the site settings, page list included, into the stored document.
    ///
    pub async fn update_settings(&self, settings: &Settings) -> Result<()> {
        debug!("Updating site settings...");
        self.merge_singleton::<Settings>(&serde_json::to_value(settings)?)
            .await
    }
}

/// Log a failed read and turn it into `None`.
///
fn settle<T>(resource: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Failed to fetch {}, using fallback: {}", resource, e);
            None
        }
    }
}
