//! HTTP client for the FAST Protocol community-activity API.

use super::types::RawPayload;
use crate::parser::payload::parse_user_page;
use crate::utils::config::{AppConfig, DEFAULT_API_TIMEOUT, RATE_LIMIT_DELAY, USER_PAGE_LIMIT};
use crate::utils::error::{ApiError, ParseError};
use log::{debug, info, warn};
use reqwest::blocking::Client;

/// Client for fetching entity and user data from the FAST Protocol API
pub struct FastProtocolClient {
    client: Client,
    base_url: String,
    max_users_per_entity: usize,
}

impl FastProtocolClient {
    /// Create a new API client from the application configuration
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(DEFAULT_API_TIMEOUT)
            .build()
            .map_err(ApiError::RequestFailed)?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            max_users_per_entity: config.max_users_per_entity,
        })
    }

    /// Fetch the list of available entities (collections)
    pub fn fetch_entities(&self) -> Result<RawPayload, ApiError> {
        let url = format!("{}/api/user-community-activity/entities", self.base_url);
        info!("Fetching entity list");
        self.get_json(&url, &[])
    }

    /// Fetch aggregate statistics for a specific entity
    ///
    /// A failed stats call is downgraded to an empty object: the stats
    /// endpoint is best effort and the pipeline can proceed without it.
    pub fn fetch_entity_stats(&self, entity: &str) -> RawPayload {
        let url = format!("{}/api/user-community-activity/stats", self.base_url);

        match self.get_json(&url, &[("entity", entity)]) {
            Ok(stats) => stats,
            Err(e) => {
                warn!("Stats fetch failed for {}: {}", entity, e);
                serde_json::json!({})
            }
        }
    }

    /// Fetch the users who claimed a specific entity, following pagination
    ///
    /// **Public** - one call per entity during a refresh
    ///
    /// # Arguments
    /// * `entity` - entity slug from the entity list
    ///
    /// # Returns
    /// All user entries up to the configured per-entity cap. Pagination
    /// stops at the first short or empty page.
    ///
    /// # Errors
    /// * `ApiError` - transport or HTTP failure on any page
    /// * A malformed page shape surfaces as `ApiError::InvalidResponse`
    pub fn fetch_entity_users(&self, entity: &str) -> Result<Vec<RawPayload>, ApiError> {
        let url = format!(
            "{}/api/user-community-activity/entity/{}",
            self.base_url, entity
        );

        let mut all_users = Vec::new();
        let mut offset = 0usize;

        info!("Fetching users for entity: {}", entity);

        loop {
            if all_users.len() >= self.max_users_per_entity {
                debug!(
                    "Reached per-entity cap ({}) for {}",
                    self.max_users_per_entity, entity
                );
                break;
            }

            let limit_param = USER_PAGE_LIMIT.to_string();
            let offset_param = offset.to_string();
            let raw = self.get_json(
                &url,
                &[("limit", limit_param.as_str()), ("offset", offset_param.as_str())],
            )?;

            let page = parse_user_page(&raw).map_err(map_parse_error)?;

            if page.is_empty() {
                debug!("Empty page at offset {} for {}", offset, entity);
                break;
            }

            let page_len = page.len();
            all_users.extend(page);

            // A short page means we are done
            if page_len < USER_PAGE_LIMIT {
                break;
            }

            offset += USER_PAGE_LIMIT;
            std::thread::sleep(RATE_LIMIT_DELAY);
        }

        debug!("Fetched {} user entries for {}", all_users.len(), entity);
        Ok(all_users)
    }

    /// Perform a GET request and decode the JSON body
    ///
    /// **Private** - shared transport path
    fn get_json(&self, url: &str, query: &[(&str, &str)]) -> Result<RawPayload, ApiError> {
        debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .map_err(ApiError::RequestFailed)?;

        if !response.status().is_success() {
            return Err(ApiError::InvalidResponse(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().unwrap_or_default()
            )));
        }

        response.json().map_err(ApiError::RequestFailed)
    }
}

/// Map a page-shape parse failure into the API error space
///
/// **Private** - the pagination loop reports transport-level errors
fn map_parse_error(e: ParseError) -> ApiError {
    ApiError::InvalidResponse(e.to_string())
}
