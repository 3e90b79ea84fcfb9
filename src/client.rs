//! Shared outbound HTTP client
//!
//! One `reqwest` client wrapped in `reqwest-middleware`, with a middleware that
//! logs every call's method, target, status and duration.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use async_trait::async_trait;
use ::http::Extensions;
use reqwest::{Request, Response};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, Middleware, Next};
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("skyreport/", env!("CARGO_PKG_VERSION"));
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const SLOW_RESPONSE_THRESHOLD: Duration = Duration::from_secs(5);

/// Build the client shared by the geocoding and forecast services.
///
/// No overall timeout is set here; each service applies its own per request.
pub fn build_client() -> Result<ClientWithMiddleware> {
    let client = reqwest::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()
        .with_context(|| "Failed to create HTTP client")?;

    Ok(ClientBuilder::new(client)
        .with(RequestTiming::new(SLOW_RESPONSE_THRESHOLD))
        .build())
}

/// Logs request outcome and latency, warning on slow calls
#[derive(Debug, Clone)]
pub struct RequestTiming {
    slow_threshold: Duration,
}

impl RequestTiming {
    #[must_use]
    pub fn new(slow_threshold: Duration) -> Self {
        Self { slow_threshold }
    }
}

#[async_trait]
impl Middleware for RequestTiming {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        let method = req.method().clone();
        let target = format!(
            "{}{}",
            req.url().host_str().unwrap_or_default(),
            req.url().path()
        );
        let start = Instant::now();

        let result = next.run(req, extensions).await;
        let elapsed = start.elapsed();

        match &result {
            Ok(response) => debug!(
                "{} {} -> {} in {:.3}s",
                method,
                target,
                response.status(),
                elapsed.as_secs_f64()
            ),
            Err(e) => warn!(
                "{} {} failed after {:.3}s: {}",
                method,
                target,
                elapsed.as_secs_f64(),
                e
            ),
        }

        if elapsed > self.slow_threshold {
            warn!(
                "Slow API response detected: {} {} took {:.3}s",
                method,
                target,
                elapsed.as_secs_f64()
            );
        }

        result
    }
}
