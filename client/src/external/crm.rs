//! CRM API client for contract data
//!
//! Consumes the two endpoints the contract detail view depends on: the
//! sub-contract listing (filtered by parent contract id) and the
//! participant address lookup. Neither fetch may block rendering of the
//! computed inventory values, so each request method has a degrading
//! wrapper that logs the failure and returns a placeholder.

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

use shared::models::{parse_sub_contract_list, RawSubContract};
use shared::validation::validate_sub_contract;
use validator::Validate;

use crate::config::CrmConfig;
use crate::error::{AppError, AppResult};

/// Placeholder shown when the address endpoint fails or returns nothing.
pub const ADDRESS_UNAVAILABLE: &str = "Address not available";

/// CRM API client
#[derive(Clone)]
pub struct CrmClient {
    client: Client,
    base_url: String,
    organization_key: String,
    access_token: String,
}

/// Address lookup response envelope
#[derive(Debug, Deserialize)]
struct CrmAddressResponse {
    data: Option<CrmAddress>,
}

/// Address payload; either pre-formatted or structured
#[derive(Debug, Deserialize)]
struct CrmAddress {
    string_format: Option<String>,
    address_line_1: Option<String>,
    city: Option<String>,
    state_code: Option<String>,
    zip_code: Option<String>,
    country_slug: Option<String>,
}

/// Prefer the server-side formatted string, else join the structured
/// fields, else nothing.
fn format_address(address: &CrmAddress) -> Option<String> {
    if let Some(formatted) = &address.string_format {
        if !formatted.is_empty() {
            return Some(formatted.clone());
        }
    }
    match (
        &address.address_line_1,
        &address.city,
        &address.state_code,
        &address.zip_code,
        &address.country_slug,
    ) {
        (Some(line), Some(city), Some(state), Some(zip), Some(country)) => {
            Some(format!("{line}, {city}, {state} {zip}, {country}"))
        }
        _ => None,
    }
}

impl CrmClient {
    /// Create a new CrmClient from configuration
    pub fn new(config: &CrmConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::Configuration(format!("HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            organization_key: config.organization_key.clone(),
            access_token: config.access_token.clone(),
        })
    }

    /// Create a new CrmClient with custom base URL (for testing)
    pub fn with_base_url(config: &CrmConfig, base_url: String) -> AppResult<Self> {
        let mut client = Self::new(config)?;
        client.base_url = base_url;
        Ok(client)
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .bearer_auth(&self.access_token)
            .header("_partitionkey", &self.organization_key)
            .header("bt-organization", &self.organization_key)
            .header("organization_id", &self.organization_key)
    }

    /// Fetch the sub-contracts drawing down a contract.
    ///
    /// Malformed entries in the response are skipped; structurally suspect
    /// ones are kept but logged, since the engine tolerates them.
    pub async fn list_sub_contracts(&self, contract_id: &str) -> AppResult<Vec<RawSubContract>> {
        let url = format!("{}/sub-contracts?contract_id={}", self.base_url, contract_id);

        let response = self
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("sub-contract request failed: {}", e)))?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => return Err(AppError::Unauthorized),
            StatusCode::NOT_FOUND => {
                return Err(AppError::NotFound(format!("contract {}", contract_id)))
            }
            status if !status.is_success() => {
                let message = response.text().await.unwrap_or_default();
                return Err(AppError::CrmApi {
                    status: status.as_u16(),
                    message,
                });
            }
            _ => {}
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::Decode(format!("sub-contract list: {}", e)))?;

        let subs = parse_sub_contract_list(&payload);
        for sub in &subs {
            if let Err(errors) = sub.validate() {
                tracing::warn!(folio = %sub.folio, %errors, "invalid sub-contract fields");
            }
            if let Err(reason) = validate_sub_contract(sub) {
                tracing::warn!(folio = %sub.folio, reason, "suspect sub-contract payload");
            }
        }
        Ok(subs)
    }

    /// Degrading variant: an endpoint failure yields an empty list so the
    /// contract view still renders.
    pub async fn sub_contracts_or_empty(&self, contract_id: &str) -> Vec<RawSubContract> {
        match self.list_sub_contracts(contract_id).await {
            Ok(subs) => subs,
            Err(error) => {
                tracing::warn!(%contract_id, %error, "sub-contract fetch degraded to empty list");
                Vec::new()
            }
        }
    }

    /// Fetch the display address of a contract participant.
    pub async fn participant_address(&self, people_id: &str) -> AppResult<String> {
        let url = format!(
            "{}/crm-locations/address/contracts-owner/{}",
            self.base_url, people_id
        );

        let response = self
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("address request failed: {}", e)))?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => return Err(AppError::Unauthorized),
            status if !status.is_success() => {
                let message = response.text().await.unwrap_or_default();
                return Err(AppError::CrmApi {
                    status: status.as_u16(),
                    message,
                });
            }
            _ => {}
        }

        let payload: CrmAddressResponse = response
            .json()
            .await
            .map_err(|e| AppError::Decode(format!("address payload: {}", e)))?;

        Ok(payload
            .data
            .as_ref()
            .and_then(format_address)
            .unwrap_or_else(|| ADDRESS_UNAVAILABLE.to_string()))
    }

    /// Degrading variant: an endpoint failure yields the placeholder.
    pub async fn address_or_placeholder(&self, people_id: &str) -> String {
        match self.participant_address(people_id).await {
            Ok(address) => address,
            Err(error) => {
                tracing::warn!(%people_id, %error, "address fetch degraded to placeholder");
                ADDRESS_UNAVAILABLE.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(json: &str) -> CrmAddress {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_format_address_prefers_string_format() {
        let formatted = format_address(&address(
            r#"{"string_format": "123 Grain Rd, Topeka, KS 66601, us",
                "address_line_1": "ignored", "city": "ignored",
                "state_code": "XX", "zip_code": "0", "country_slug": "xx"}"#,
        ));
        assert_eq!(formatted.as_deref(), Some("123 Grain Rd, Topeka, KS 66601, us"));
    }

    #[test]
    fn test_format_address_joins_structured_fields() {
        let formatted = format_address(&address(
            r#"{"address_line_1": "123 Grain Rd", "city": "Topeka",
                "state_code": "KS", "zip_code": "66601", "country_slug": "us"}"#,
        ));
        assert_eq!(formatted.as_deref(), Some("123 Grain Rd, Topeka, KS 66601, us"));
    }

    #[test]
    fn test_format_address_empty_string_format_falls_through() {
        let formatted = format_address(&address(
            r#"{"string_format": "", "address_line_1": "123 Grain Rd", "city": "Topeka",
                "state_code": "KS", "zip_code": "66601", "country_slug": "us"}"#,
        ));
        assert_eq!(formatted.as_deref(), Some("123 Grain Rd, Topeka, KS 66601, us"));
    }

    #[test]
    fn test_format_address_incomplete_fields_yield_none() {
        let formatted = format_address(&address(r#"{"city": "Topeka"}"#));
        assert!(formatted.is_none());
    }
}
