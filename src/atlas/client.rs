//! Atlas Client
//!
//! Main client for interacting with the Atlas Admin API, combining
//! authentication, HTTP functionality and the endpoint layout.

use super::auth::AtlasCredentials;
use super::cluster::{AdvancedClusterDescription, ClusterDescriptionProcessArgs};
use super::http::{AtlasHttpClient, ATLAS_MEDIA_TYPE, ATLAS_SEARCH_MEDIA_TYPE};
use super::restore_job::DiskBackupSnapshotRestoreJob;
use super::search_index::ClusterSearchIndex;
use crate::config::ProfileConfig;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;
use urlencoding::encode;

/// Page size requested from list endpoints
const ITEMS_PER_PAGE: usize = 500;

/// Paginated list envelope
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub total_count: Option<usize>,
}

/// Main Atlas client
#[derive(Clone)]
pub struct AtlasClient {
    pub credentials: AtlasCredentials,
    pub http: AtlasHttpClient,
    pub base_url: String,
}

impl AtlasClient {
    /// Create a new Atlas client for a resolved profile
    pub fn new(profile: &ProfileConfig) -> Result<Self> {
        let base = Url::parse(profile.base_url()).context("Invalid Atlas base URL")?;
        let http = AtlasHttpClient::new()?;
        let credentials = AtlasCredentials::from_profile(profile, http.inner().clone())
            .context("Failed to initialize Atlas credentials")?;

        Ok(Self {
            credentials,
            http,
            base_url: base.as_str().trim_end_matches('/').to_string(),
        })
    }

    /// Get the current access token
    pub async fn get_token(&self) -> Result<String> {
        self.credentials.get_token().await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, media_type: &str) -> Result<T> {
        let token = self.get_token().await?;
        let value = self.http.get(url, &token, media_type).await?;
        serde_json::from_value(value).context("Unexpected Atlas response shape")
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        url: &str,
        media_type: &str,
        body: &B,
    ) -> Result<T> {
        let token = self.get_token().await?;
        let body = serde_json::to_value(body).context("Failed to encode request body")?;
        let value = self.http.post(url, &token, media_type, &body).await?;
        serde_json::from_value(value).context("Unexpected Atlas response shape")
    }

    async fn patch_json<B: Serialize, T: DeserializeOwned>(
        &self,
        url: &str,
        media_type: &str,
        body: &B,
    ) -> Result<T> {
        let token = self.get_token().await?;
        let body = serde_json::to_value(body).context("Failed to encode request body")?;
        let value = self.http.patch(url, &token, media_type, &body).await?;
        serde_json::from_value(value).context("Unexpected Atlas response shape")
    }

    async fn delete_url(&self, url: &str, media_type: &str) -> Result<()> {
        let token = self.get_token().await?;
        self.http.delete(url, &token, media_type).await?;
        Ok(())
    }

    /// Fetch every page of a paginated list endpoint
    async fn list_all<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>> {
        let mut all_items = Vec::new();
        let mut page_num = 1;

        loop {
            let page_url = format!("{}?pageNum={}&itemsPerPage={}", url, page_num, ITEMS_PER_PAGE);
            let page: Paginated<T> = self.get_json(&page_url, ATLAS_MEDIA_TYPE).await?;
            let fetched = page.results.len();
            all_items.extend(page.results);

            let done = match page.total_count {
                Some(total) => all_items.len() >= total,
                None => fetched < ITEMS_PER_PAGE,
            };
            if done || fetched == 0 {
                break;
            }
            page_num += 1;
        }

        Ok(all_items)
    }

    // =========================================================================
    // URL helpers
    // =========================================================================

    /// Build Admin API v2 URL
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/api/atlas/v2/{}", self.base_url, path)
    }

    pub fn clusters_url(&self, group_id: &str) -> String {
        self.api_url(&format!("groups/{}/clusters", encode(group_id)))
    }

    pub fn cluster_url(&self, group_id: &str, name: &str) -> String {
        format!("{}/{}", self.clusters_url(group_id), encode(name))
    }

    pub fn process_args_url(&self, group_id: &str, name: &str) -> String {
        format!("{}/processArgs", self.cluster_url(group_id, name))
    }

    pub fn search_indexes_url(&self, group_id: &str, cluster: &str) -> String {
        format!("{}/fts/indexes", self.cluster_url(group_id, cluster))
    }

    pub fn search_index_url(&self, group_id: &str, cluster: &str, index_id: &str) -> String {
        format!("{}/{}", self.search_indexes_url(group_id, cluster), encode(index_id))
    }

    pub fn search_indexes_by_collection_url(
        &self,
        group_id: &str,
        cluster: &str,
        database: &str,
        collection: &str,
    ) -> String {
        format!(
            "{}/{}/{}",
            self.search_indexes_url(group_id, cluster),
            encode(database),
            encode(collection)
        )
    }

    /// Restore jobs live under the cluster or the serverless instance
    pub fn restore_jobs_url(&self, group_id: &str, instance: &str, serverless: bool) -> String {
        let kind = if serverless { "serverless" } else { "clusters" };
        self.api_url(&format!(
            "groups/{}/{}/{}/backup/restoreJobs",
            encode(group_id),
            kind,
            encode(instance)
        ))
    }

    pub fn restore_job_url(&self, group_id: &str, instance: &str, serverless: bool, job_id: &str) -> String {
        format!("{}/{}", self.restore_jobs_url(group_id, instance, serverless), encode(job_id))
    }

    // =========================================================================
    // Clusters
    // =========================================================================

    pub async fn get_cluster(&self, group_id: &str, name: &str) -> Result<AdvancedClusterDescription> {
        self.get_json(&self.cluster_url(group_id, name), ATLAS_MEDIA_TYPE)
            .await
            .with_context(|| format!("Failed to get cluster {}", name))
    }

    pub async fn list_clusters(&self, group_id: &str) -> Result<Vec<AdvancedClusterDescription>> {
        self.list_all(&self.clusters_url(group_id))
            .await
            .context("Failed to list clusters")
    }

    pub async fn create_cluster(
        &self,
        group_id: &str,
        request: &AdvancedClusterDescription,
    ) -> Result<AdvancedClusterDescription> {
        self.post_json(&self.clusters_url(group_id), ATLAS_MEDIA_TYPE, request)
            .await
            .context("Failed to create cluster")
    }

    pub async fn update_cluster(
        &self,
        group_id: &str,
        name: &str,
        request: &AdvancedClusterDescription,
    ) -> Result<AdvancedClusterDescription> {
        self.patch_json(&self.cluster_url(group_id, name), ATLAS_MEDIA_TYPE, request)
            .await
            .with_context(|| format!("Failed to update cluster {}", name))
    }

    pub async fn delete_cluster(&self, group_id: &str, name: &str) -> Result<()> {
        self.delete_url(&self.cluster_url(group_id, name), ATLAS_MEDIA_TYPE)
            .await
            .with_context(|| format!("Failed to delete cluster {}", name))
    }

    pub async fn get_process_args(&self, group_id: &str, name: &str) -> Result<ClusterDescriptionProcessArgs> {
        self.get_json(&self.process_args_url(group_id, name), ATLAS_MEDIA_TYPE)
            .await
            .with_context(|| format!("Failed to get advanced settings of cluster {}", name))
    }

    pub async fn update_process_args(
        &self,
        group_id: &str,
        name: &str,
        args: &ClusterDescriptionProcessArgs,
    ) -> Result<ClusterDescriptionProcessArgs> {
        self.patch_json(&self.process_args_url(group_id, name), ATLAS_MEDIA_TYPE, args)
            .await
            .with_context(|| format!("Failed to update advanced settings of cluster {}", name))
    }

    // =========================================================================
    // Search indexes
    // =========================================================================

    pub async fn create_search_index(
        &self,
        group_id: &str,
        cluster: &str,
        index: &ClusterSearchIndex,
    ) -> Result<ClusterSearchIndex> {
        self.post_json(&self.search_indexes_url(group_id, cluster), ATLAS_SEARCH_MEDIA_TYPE, index)
            .await
            .context("Failed to create search index")
    }

    pub async fn get_search_index(&self, group_id: &str, cluster: &str, index_id: &str) -> Result<ClusterSearchIndex> {
        self.get_json(&self.search_index_url(group_id, cluster, index_id), ATLAS_SEARCH_MEDIA_TYPE)
            .await
            .with_context(|| format!("Failed to get search index {}", index_id))
    }

    pub async fn update_search_index(
        &self,
        group_id: &str,
        cluster: &str,
        index_id: &str,
        index: &ClusterSearchIndex,
    ) -> Result<ClusterSearchIndex> {
        self.patch_json(
            &self.search_index_url(group_id, cluster, index_id),
            ATLAS_SEARCH_MEDIA_TYPE,
            index,
        )
        .await
        .with_context(|| format!("Failed to update search index {}", index_id))
    }

    pub async fn delete_search_index(&self, group_id: &str, cluster: &str, index_id: &str) -> Result<()> {
        self.delete_url(&self.search_index_url(group_id, cluster, index_id), ATLAS_SEARCH_MEDIA_TYPE)
            .await
            .with_context(|| format!("Failed to delete search index {}", index_id))
    }

    /// Search index listing is not paginated
    pub async fn list_search_indexes(
        &self,
        group_id: &str,
        cluster: &str,
        database: &str,
        collection: &str,
    ) -> Result<Vec<ClusterSearchIndex>> {
        self.get_json(
            &self.search_indexes_by_collection_url(group_id, cluster, database, collection),
            ATLAS_SEARCH_MEDIA_TYPE,
        )
        .await
        .context("Failed to list search indexes")
    }

    // =========================================================================
    // Cloud backup restore jobs
    // =========================================================================

    pub async fn create_restore_job(
        &self,
        group_id: &str,
        instance: &str,
        serverless: bool,
        job: &DiskBackupSnapshotRestoreJob,
    ) -> Result<DiskBackupSnapshotRestoreJob> {
        self.post_json(&self.restore_jobs_url(group_id, instance, serverless), ATLAS_MEDIA_TYPE, job)
            .await
            .context("Failed to create restore job")
    }

    pub async fn get_restore_job(
        &self,
        group_id: &str,
        instance: &str,
        serverless: bool,
        job_id: &str,
    ) -> Result<DiskBackupSnapshotRestoreJob> {
        self.get_json(
            &self.restore_job_url(group_id, instance, serverless, job_id),
            ATLAS_MEDIA_TYPE,
        )
        .await
        .with_context(|| format!("Failed to get restore job {}", job_id))
    }

    pub async fn list_restore_jobs(
        &self,
        group_id: &str,
        instance: &str,
        serverless: bool,
    ) -> Result<Vec<DiskBackupSnapshotRestoreJob>> {
        self.list_all(&self.restore_jobs_url(group_id, instance, serverless))
            .await
            .context("Failed to list restore jobs")
    }

    /// Only cluster restore jobs can be cancelled
    pub async fn cancel_restore_job(&self, group_id: &str, instance: &str, job_id: &str) -> Result<()> {
        self.delete_url(&self.restore_job_url(group_id, instance, false, job_id), ATLAS_MEDIA_TYPE)
            .await
            .with_context(|| format!("Failed to cancel restore job {}", job_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> AtlasClient {
        let profile = ProfileConfig {
            base_url: Some("https://atlas.example.com/".to_string()),
            access_token: Some("t".to_string()),
            ..Default::default()
        };
        AtlasClient::new(&profile).unwrap()
    }

    #[test]
    fn test_cluster_urls() {
        let client = client();
        assert_eq!(
            client.cluster_url("p1", "my cluster"),
            "https://atlas.example.com/api/atlas/v2/groups/p1/clusters/my%20cluster"
        );
        assert_eq!(
            client.process_args_url("p1", "c0"),
            "https://atlas.example.com/api/atlas/v2/groups/p1/clusters/c0/processArgs"
        );
    }

    #[test]
    fn test_restore_job_urls_by_instance_type() {
        let client = client();
        assert_eq!(
            client.restore_jobs_url("p1", "c0", false),
            "https://atlas.example.com/api/atlas/v2/groups/p1/clusters/c0/backup/restoreJobs"
        );
        assert_eq!(
            client.restore_job_url("p1", "s0", true, "j1"),
            "https://atlas.example.com/api/atlas/v2/groups/p1/serverless/s0/backup/restoreJobs/j1"
        );
    }

    #[test]
    fn test_search_index_collection_url() {
        let client = client();
        assert_eq!(
            client.search_indexes_by_collection_url("p1", "c0", "db", "movies"),
            "https://atlas.example.com/api/atlas/v2/groups/p1/clusters/c0/fts/indexes/db/movies"
        );
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let profile = ProfileConfig {
            base_url: Some("not a url".to_string()),
            access_token: Some("t".to_string()),
            ..Default::default()
        };
        assert!(AtlasClient::new(&profile).is_err());
    }
}
