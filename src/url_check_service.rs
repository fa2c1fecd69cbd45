use crate::errors::ServiceError;
use crate::models::{CheckedUrl, RemoteVerdict, UrlCheckRequest, UrlCheckResponse};
use crate::validation;
use chrono::Utc;
use dashmap::DashMap;
use tracing::info;
use uuid::Uuid;

pub struct UrlCheckService {
    http_client: reqwest::Client,
    check_api_url: String,
    checks: DashMap<String, CheckedUrl>,
}

impl UrlCheckService {
    pub fn new() -> Result<Self, ServiceError> {
        let check_api_url = std::env::var("URL_CHECK_API_URL")
            .unwrap_or_else(|_| "https://api.example.com/check-url".to_string());

        let http_client = reqwest::Client::builder()
            .cookie_store(true) // the check API authenticates via session cookies
            .build()?;

        Ok(Self {
            http_client,
            check_api_url,
            checks: DashMap::new(),
        })
    }

    pub async fn check_and_display_url(
        &self,
        request: &UrlCheckRequest,
    ) -> Result<UrlCheckResponse, ServiceError> {
        info!("Processing URL check request: {:?}", request);

        let check_id = Uuid::new_v4().to_string();
        let parsed = validation::validate(&request.url)?;

        let verdict = self.fetch_verdict(parsed.as_str()).await?;
        let safe = verdict.error.is_none();
        let message = verdict
            .error
            .clone()
            .unwrap_or_else(|| "URL is safe".to_string());

        let checked_url = CheckedUrl {
            id: check_id.clone(),
            url: verdict.url.unwrap_or_else(|| parsed.to_string()),
            host: parsed.host_str().unwrap_or_default().to_string(),
            safe,
            status: "checked".to_string(),
            error: verdict.error,
            timestamp: Utc::now(),
            client_id: request.client_id.clone(),
        };
        let displayed_url = checked_url.url.clone();
        self.checks.insert(check_id.clone(), checked_url);
        info!("URL check stored and displayed: {}", check_id);
        Ok(UrlCheckResponse {
            check_id,
            url: displayed_url,
            safe,
            status: "checked".to_string(),
            message,
            timestamp: Utc::now(),
        })
    }

    async fn fetch_verdict(&self, url: &str) -> Result<RemoteVerdict, ServiceError> {
        let response = self
            .http_client
            .post(&self.check_api_url)
            .json(&serde_json::json!({ "url": url }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ServiceError::UpstreamStatus(response.status().as_u16()));
        }

        let verdict = response.json::<RemoteVerdict>().await?;
        info!("Check API verdict for {}: error={:?}", url, verdict.error);
        Ok(verdict)
    }

    pub async fn get_all_checks(&self) -> Result<Vec<CheckedUrl>, ServiceError> {
        let checks: Vec<CheckedUrl> = self
            .checks
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        let mut sorted_checks = checks;
        sorted_checks.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(sorted_checks)
    }

    pub async fn get_check_by_id(&self, id: &str) -> Result<CheckedUrl, ServiceError> {
        self.checks
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| ServiceError::CheckNotFound(id.to_string()))
    }

    pub async fn get_checks_by_host(&self, host: &str) -> Result<Vec<CheckedUrl>, ServiceError> {
        let checks: Vec<CheckedUrl> = self
            .checks
            .iter()
            .filter(|entry| entry.value().host == host)
            .map(|entry| entry.value().clone())
            .collect();
        Ok(checks)
    }

    pub async fn get_check_count(&self) -> usize {
        self.checks.len()
    }

    pub async fn clear_checks(&self) {
        self.checks.clear();
        info!("All checks cleared");
    }
}
