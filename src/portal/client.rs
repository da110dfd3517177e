use crate::config::PortalConfig;
use crate::domain::model::{Credentials, FetchResult};
use crate::domain::ports::PointsSource;
use crate::portal::scrape;
use crate::utils::error::{BotError, Result};
use async_trait::async_trait;
use reqwest::header::REFERER;
use reqwest::Client;
use std::sync::Arc;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Performs the login + scrape sequence against the configured portal.
///
/// Each fetch runs on its own cookie jar, so sessions from concurrent
/// conversations never mix and nothing outlives the fetch.
pub struct PortalClient {
    config: Arc<PortalConfig>,
}

impl PortalClient {
    pub fn new(config: Arc<PortalConfig>) -> Self {
        Self { config }
    }

    fn session(&self) -> Result<Client> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(self.config.timeout())
            .user_agent(USER_AGENT)
            .build()?;
        Ok(client)
    }

    fn url(&self, path: &str) -> String {
        // Absolute URLs in config are used as-is
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
        }
    }

    async fn login(&self, session: &Client, credentials: &Credentials) -> Result<()> {
        let login_url = self.url(&self.config.login_path);

        let mut form: Vec<(String, String)> = vec![
            (
                self.config.username_field.clone(),
                credentials.username.clone(),
            ),
            (
                self.config.password_field.clone(),
                credentials.password.clone(),
            ),
        ];

        if let Some(csrf_field) = &self.config.csrf_field {
            tracing::debug!("Fetching login page for CSRF token");
            let login_page = session.get(&login_url).send().await?;
            tracing::debug!("Login page status: {}", login_page.status());

            let html = login_page.text().await?;
            let token =
                scrape::extract_csrf_token(&html, csrf_field).ok_or_else(|| BotError::Parse {
                    what: format!("CSRF token field `{}`", csrf_field),
                })?;
            form.push((csrf_field.clone(), token));
        }

        tracing::debug!("Submitting login form");
        let response = session
            .post(&login_url)
            .header(REFERER, login_url.as_str())
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Login response status: {}", status);

        if !status.is_success() {
            return Err(BotError::Authentication { status });
        }

        Ok(())
    }
}

#[async_trait]
impl PointsSource for PortalClient {
    async fn fetch_points(&self, credentials: &Credentials) -> FetchResult {
        let session = self.session()?;
        self.login(&session, credentials).await?;

        let points_url = self.url(&self.config.points_path);
        tracing::debug!("Fetching points page");
        let response = session.get(&points_url).send().await?;

        let status = response.status();
        tracing::debug!("Points page status: {}", status);

        if !status.is_success() {
            // The portal let the login POST through but rejects the session
            return Err(BotError::Authentication { status });
        }

        let html = response.text().await?;
        scrape::extract_points(&html, &self.config.points_selector)
    }
}
