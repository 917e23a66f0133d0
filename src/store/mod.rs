/*!
 * Page Store
 * Read-all/write-all JSON persistence for the pages collection, plus the
 * generated HTML artifact per page. Every mutating operation recomposes the
 * artifact and keeps it consistent with the persisted record: the artifact
 * is written before the record is committed.
 */

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::sync::Mutex;

use crate::engine::compose::compose;
use crate::engine::page::{merged, new_page, NewPageRequest, Page, UpdatePageRequest};
use crate::engine::theme::ThemeCatalog;
use crate::engine::EngineError;

/// Filesystem layout under the data directory, configurable via
/// SCENTPAGE_DATA_DIR (default `data`).
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: std::env::var("SCENTPAGE_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data")),
        }
    }
}

impl StoreConfig {
    pub fn pages_file(&self) -> PathBuf {
        self.data_dir.join("pages.json")
    }

    pub fn themes_file(&self) -> PathBuf {
        self.data_dir.join("themes.json")
    }

    pub fn generated_dir(&self) -> PathBuf {
        self.data_dir.join("generated")
    }

    pub fn upload_dir(&self) -> PathBuf {
        self.data_dir.join("uploads")
    }

    pub fn artifact_path(&self, page_id: &str) -> PathBuf {
        self.generated_dir().join(format!("{}.html", page_id))
    }
}

/// On-disk shape of the pages collection.
#[derive(Debug, Default, Serialize, Deserialize)]
struct PagesFile {
    pages: Vec<Page>,
}

/// The page store: theme catalog + pages collection + artifact directory.
///
/// Mutating operations serialize on an internal mutex; the collection file
/// is read and rewritten wholesale per operation.
pub struct SiteStore {
    config: StoreConfig,
    catalog: ThemeCatalog,
    write_lock: Mutex<()>,
}

impl SiteStore {
    pub fn new(config: StoreConfig, catalog: ThemeCatalog) -> Self {
        Self {
            config,
            catalog,
            write_lock: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn catalog(&self) -> &ThemeCatalog {
        &self.catalog
    }

    async fn load_pages(&self) -> Result<Vec<Page>, EngineError> {
        let path = self.config.pages_file();
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            tokio::fs::create_dir_all(&self.config.data_dir).await?;
            let empty = serde_json::to_string_pretty(&PagesFile::default())?;
            tokio::fs::write(&path, empty).await?;
            return Ok(Vec::new());
        }
        let raw = tokio::fs::read_to_string(&path).await?;
        let file: PagesFile = serde_json::from_str(&raw)?;
        Ok(file.pages)
    }

    async fn save_pages(&self, pages: Vec<Page>) -> Result<(), EngineError> {
        tokio::fs::create_dir_all(&self.config.data_dir).await?;
        let raw = serde_json::to_string_pretty(&PagesFile { pages })?;
        tokio::fs::write(self.config.pages_file(), raw).await?;
        Ok(())
    }

    async fn write_artifact(&self, page_id: &str, html: &str) -> Result<(), EngineError> {
        tokio::fs::create_dir_all(self.config.generated_dir()).await?;
        tokio::fs::write(self.config.artifact_path(page_id), html).await?;
        Ok(())
    }

    /// Remove the artifact; a file that is already gone is not an error.
    async fn remove_artifact(&self, page_id: &str) -> Result<(), EngineError> {
        match tokio::fs::remove_file(self.config.artifact_path(page_id)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// New page ids are millisecond timestamps; bump until unique within
    /// the collection so rapid successive creates cannot collide.
    fn unique_page_id(pages: &[Page]) -> String {
        let mut millis = Utc::now().timestamp_millis();
        loop {
            let candidate = format!("page-{}", millis);
            if !pages.iter().any(|p| p.id == candidate) {
                return candidate;
            }
            millis += 1;
        }
    }

    pub async fn list_pages(&self) -> Result<Vec<Page>, EngineError> {
        self.load_pages().await
    }

    pub async fn get_page(&self, id: &str) -> Result<Page, EngineError> {
        self.load_pages()
            .await?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| EngineError::PageNotFound(id.to_string()))
    }

    pub async fn create_page(&self, req: NewPageRequest) -> Result<Page, EngineError> {
        let _guard = self.write_lock.lock().await;

        let brand_name = req
            .brand_name
            .as_deref()
            .filter(|b| !b.is_empty())
            .ok_or(EngineError::MissingRequiredFields)?
            .to_string();
        let theme_id = req
            .theme_id
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(EngineError::MissingRequiredFields)?;
        let theme = self
            .catalog
            .get(theme_id)
            .map_err(|_| EngineError::InvalidTheme(theme_id.to_string()))?
            .clone();

        let mut pages = self.load_pages().await?;
        let mut page = new_page(&req, &brand_name, &theme);
        page.id = Self::unique_page_id(&pages);

        let html = compose(&page, &theme);
        self.write_artifact(&page.id, &html).await?;

        pages.push(page.clone());
        self.save_pages(pages).await?;

        tracing::info!(page_id = %page.id, brand = %page.brand_name, "page created");
        Ok(page)
    }

    pub async fn update_page(
        &self,
        id: &str,
        req: UpdatePageRequest,
    ) -> Result<Page, EngineError> {
        let _guard = self.write_lock.lock().await;

        let mut pages = self.load_pages().await?;
        let index = pages
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| EngineError::PageNotFound(id.to_string()))?;

        let effective = req.effective_theme_id(&pages[index]).to_string();
        let theme = self
            .catalog
            .get(&effective)
            .map_err(|_| EngineError::InvalidTheme(effective.clone()))?
            .clone();

        let updated = merged(&pages[index], &req, &theme);
        let html = compose(&updated, &theme);
        self.write_artifact(&updated.id, &html).await?;

        pages[index] = updated.clone();
        self.save_pages(pages).await?;

        tracing::info!(page_id = %id, "page updated");
        Ok(updated)
    }

    pub async fn duplicate_page(&self, id: &str) -> Result<Page, EngineError> {
        let _guard = self.write_lock.lock().await;

        let mut pages = self.load_pages().await?;
        let original = pages
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| EngineError::PageNotFound(id.to_string()))?
            .clone();

        let theme = self.catalog.get(&original.theme_id)?.clone();

        let mut copy = original.clone();
        copy.id = Self::unique_page_id(&pages);
        copy.brand_name = format!("{} (Copy)", original.brand_name);
        // sections are cloned by value above; edits to the copy never touch
        // the original. createdAt is history and carries over; only
        // updatedAt reflects the duplication.
        copy.updated_at = Utc::now();

        let html = compose(&copy, &theme);
        self.write_artifact(&copy.id, &html).await?;

        pages.push(copy.clone());
        self.save_pages(pages).await?;

        tracing::info!(source = %id, page_id = %copy.id, "page duplicated");
        Ok(copy)
    }

    pub async fn delete_page(&self, id: &str) -> Result<(), EngineError> {
        let _guard = self.write_lock.lock().await;

        let mut pages = self.load_pages().await?;
        let index = pages
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| EngineError::PageNotFound(id.to_string()))?;

        self.remove_artifact(id).await?;
        pages.remove(index);
        self.save_pages(pages).await?;

        tracing::info!(page_id = %id, "page deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::page::Section;
    use serde_json::json;
    use uuid::Uuid;

    fn temp_store() -> SiteStore {
        let data_dir = std::env::temp_dir().join(format!("scentpage-store-{}", Uuid::new_v4()));
        SiteStore::new(StoreConfig { data_dir }, ThemeCatalog::builtin())
    }

    fn noor_request() -> NewPageRequest {
        NewPageRequest {
            brand_name: Some("Noor".to_string()),
            theme_id: Some("modern-luxury".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_noor_scenario() {
        let store = temp_store();
        let page = store.create_page(noor_request()).await.unwrap();

        assert_eq!(page.theme_name, "Modern Luxury");
        assert_eq!(page.tagline, "Luxury Scents. Timeless Elegance.");
        assert_eq!(page.cta_text, "Get Offer");
        let kinds: Vec<&str> = page.sections.iter().map(|s| s.kind.as_str()).collect();
        assert_eq!(
            kinds,
            vec!["hero", "about", "features", "offer", "policy", "footer"]
        );

        let artifact = std::fs::read_to_string(store.config().artifact_path(&page.id)).unwrap();
        assert!(artifact.contains("mailto:info@noor.com"));
        assert!(artifact.contains("Luxury Scents. Timeless Elegance."));
        // fragments appear in section order
        let hero = artifact.find("Get Offer").unwrap();
        let footer = artifact.find("All rights reserved").unwrap();
        assert!(hero < footer);
    }

    #[tokio::test]
    async fn test_create_requires_brand_and_theme() {
        let store = temp_store();
        let missing = NewPageRequest {
            brand_name: Some("".to_string()),
            theme_id: Some("modern-luxury".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            store.create_page(missing).await,
            Err(EngineError::MissingRequiredFields)
        ));

        let bad_theme = NewPageRequest {
            brand_name: Some("Noor".to_string()),
            theme_id: Some("no-such-theme".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            store.create_page(bad_theme).await,
            Err(EngineError::InvalidTheme(_))
        ));
    }

    #[tokio::test]
    async fn test_rapid_creates_get_distinct_ids() {
        let store = temp_store();
        let a = store.create_page(noor_request()).await.unwrap();
        let b = store.create_page(noor_request()).await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_update_falsy_field_rule() {
        let store = temp_store();
        let page = store.create_page(noor_request()).await.unwrap();

        let req: UpdatePageRequest =
            serde_json::from_str(r#"{ "tagline": "", "logoPath": null }"#).unwrap();
        let updated = store.update_page(&page.id, req).await.unwrap();
        assert_eq!(updated.tagline, page.tagline);
        assert_eq!(updated.logo_path, None);
    }

    #[tokio::test]
    async fn test_update_recomposes_artifact_in_place() {
        let store = temp_store();
        let page = store.create_page(noor_request()).await.unwrap();

        // brand name flows from the record into the hero heading, policy
        // intro and footer; section data baked at creation stays as-is
        let req: UpdatePageRequest = serde_json::from_str(r#"{ "brandName": "Zahra" }"#).unwrap();
        store.update_page(&page.id, req).await.unwrap();

        let artifact = std::fs::read_to_string(store.config().artifact_path(&page.id)).unwrap();
        assert!(artifact.contains("ZAHRA"));
        assert!(artifact.contains("At Zahra,"));
        assert!(!artifact.contains("NOOR"));
    }

    #[tokio::test]
    async fn test_update_unknown_page_is_not_found() {
        let store = temp_store();
        let result = store
            .update_page("page-0", UpdatePageRequest::default())
            .await;
        assert!(matches!(result, Err(EngineError::PageNotFound(_))));
    }

    #[tokio::test]
    async fn test_duplicate_is_independent_of_original() {
        let store = temp_store();
        let page = store.create_page(noor_request()).await.unwrap();
        let copy = store.duplicate_page(&page.id).await.unwrap();

        assert_ne!(copy.id, page.id);
        assert_eq!(copy.brand_name, "Noor (Copy)");
        assert_eq!(copy.created_at, page.created_at);
        assert!(store
            .config()
            .artifact_path(&copy.id)
            .exists());

        // mutate the copy's sections; the original must be untouched
        let req = UpdatePageRequest {
            sections: Some(vec![Section::new("text", json!({ "text": "changed" }))]),
            ..Default::default()
        };
        store.update_page(&copy.id, req).await.unwrap();

        let original = store.get_page(&page.id).await.unwrap();
        assert_eq!(original.sections.len(), 6);
        assert_eq!(original.sections[0].kind, "hero");
    }

    #[tokio::test]
    async fn test_delete_cleans_up_record_and_artifact() {
        let store = temp_store();
        let page = store.create_page(noor_request()).await.unwrap();
        let artifact = store.config().artifact_path(&page.id);
        assert!(artifact.exists());

        store.delete_page(&page.id).await.unwrap();
        assert!(!artifact.exists());
        assert!(matches!(
            store.get_page(&page.id).await,
            Err(EngineError::PageNotFound(_))
        ));

        // second delete is NotFound, not a crash
        assert!(matches!(
            store.delete_page(&page.id).await,
            Err(EngineError::PageNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_tolerates_missing_artifact() {
        let store = temp_store();
        let page = store.create_page(noor_request()).await.unwrap();
        std::fs::remove_file(store.config().artifact_path(&page.id)).unwrap();
        store.delete_page(&page.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_list_pages_empty_store() {
        let store = temp_store();
        assert!(store.list_pages().await.unwrap().is_empty());
        // bootstrap created the collection file
        assert!(store.config().pages_file().exists());
    }
}
