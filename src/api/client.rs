use crate::api::traits::ListingApi;
use crate::api::types::ApiConfig;
use crate::models::ListingPayload;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use std::time::Duration;
use tracing::{debug, info, warn};

/// HTTP implementation of the listings API
pub struct HttpListingApi {
    client: Client,
    config: ApiConfig,
}

impl HttpListingApi {
    /// Create a client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ApiConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(config: ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    fn listings_url(&self) -> String {
        format!("{}/listings", self.config.base_url.trim_end_matches('/'))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn check_response(&self, response: Response) -> Result<()> {
        let status = response.status();
        if status.is_success() {
            debug!("Listings API responded with {}", status);
            return Ok(());
        }

        warn!("Listings API returned status: {}", status);
        let message = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| body.get("message").and_then(|m| m.as_str()).map(String::from))
            .unwrap_or_else(|| "no failure reason given".to_string());
        anyhow::bail!("Listing submission failed ({}): {}", status, message);
    }
}

#[async_trait]
impl ListingApi for HttpListingApi {
    async fn create_listing(&self, payload: &ListingPayload) -> Result<()> {
        let url = self.listings_url();
        debug!("POST {}", url);

        let response = self
            .authorize(self.client.post(&url))
            .json(payload)
            .send()
            .await
            .context("Failed to reach listings API")?;

        self.check_response(response).await?;
        info!("Created listing '{}'", payload.name);
        Ok(())
    }

    async fn update_listing(&self, id: &str, payload: &ListingPayload) -> Result<()> {
        let url = format!("{}/{}", self.listings_url(), id);
        debug!("PUT {}", url);

        let response = self
            .authorize(self.client.put(&url))
            .json(payload)
            .send()
            .await
            .context("Failed to reach listings API")?;

        self.check_response(response).await?;
        info!("Updated listing {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ListingType, RentalPlan};
    use chrono::Utc;
    use std::collections::BTreeMap;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_payload() -> ListingPayload {
        ListingPayload {
            listing_type: ListingType::BioAlliedLabs,
            name: "Lab A".to_string(),
            description: "Shared wet lab".to_string(),
            images: vec!["u1".to_string()],
            video_link: None,
            rental_plans: vec![RentalPlan {
                name: "Monthly".to_string(),
                price: 5000.0,
                duration: "Monthly".to_string(),
            }],
            submitted_at: Utc::now(),
            extra: BTreeMap::new(),
        }
    }

    fn test_config(server: &MockServer, token: Option<&str>) -> ApiConfig {
        ApiConfig {
            base_url: server.uri(),
            auth_token: token.map(String::from),
            timeout_secs: 5,
        }
    }

    #[tokio::test]
    async fn create_posts_tagged_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/listings"))
            .and(body_partial_json(serde_json::json!({
                "type": "bioAlliedLabs",
                "name": "Lab A",
                "rentalPlans": [{"name": "Monthly", "price": 5000.0, "duration": "Monthly"}],
            })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let api = HttpListingApi::with_config(test_config(&server, None)).unwrap();
        api.create_listing(&sample_payload()).await.unwrap();
    }

    #[tokio::test]
    async fn update_puts_to_listing_id() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/listings/abc123"))
            .and(header("authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let api = HttpListingApi::with_config(test_config(&server, Some("tok"))).unwrap();
        api.update_listing("abc123", &sample_payload()).await.unwrap();
    }

    #[tokio::test]
    async fn form_controller_submits_through_http_client() {
        use crate::forms::{FormController, SubmitOutcome};
        use serde_json::json;

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/listings"))
            .and(body_partial_json(serde_json::json!({
                "type": "bioAlliedLabs",
                "rentalPlans": [{"name": "Monthly", "price": 5000.0, "duration": "Monthly"}],
            })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let api = HttpListingApi::with_config(test_config(&server, None)).unwrap();
        let mut form = FormController::new(ListingType::BioAlliedLabs);
        form.set_field("name", json!("Lab A"));
        form.set_field("description", json!("Shared wet lab"));
        form.set_field("address", json!("12 Science Park"));
        form.set_field("images", json!(["u1"]));
        form.set_field("selectedRentalPlans", json!(["Monthly"]));
        form.set_field("rentPerMonth", json!(5000));
        form.set_field(
            "equipment",
            json!([{"labName": "L1", "equipmentName": "E1", "capacityAndMake": "C1"}]),
        );

        let outcome = form.validate_and_submit(&api).await;

        assert_eq!(outcome, SubmitOutcome::Submitted);
        assert!(form.draft().fields.is_empty());
    }

    #[tokio::test]
    async fn server_failure_surfaces_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/listings"))
            .respond_with(
                ResponseTemplate::new(422)
                    .set_body_json(serde_json::json!({"message": "name already taken"})),
            )
            .mount(&server)
            .await;

        let api = HttpListingApi::with_config(test_config(&server, None)).unwrap();
        let err = api.create_listing(&sample_payload()).await.unwrap_err();
        assert!(err.to_string().contains("name already taken"));
    }
}
