use crate::config::ClientConfig;
use crate::domain::loan::LoanInput;
use crate::domain::plan::PaymentPlan;
use crate::domain::ports::PlanGateway;
use crate::error::{LoanError, Result};
use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use tracing::{debug, info};

/// Path of the plan endpoint, relative to the configured base URL.
pub const LOAN_ENDPOINT: &str = "/loan/";

const JSON_UTF8: &str = "application/json; charset=utf-8";

/// Validation error body: `{"detail": [{"msg": "..."}, ...]}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    msg: String,
}

/// Requests payment plans from the loan server over HTTP.
#[derive(Debug, Clone)]
pub struct HttpPlanGateway {
    http: Client,
    endpoint: Url,
}

impl HttpPlanGateway {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let endpoint = config
            .base_url
            .join(LOAN_ENDPOINT)
            .map_err(|e| LoanError::Config(format!("invalid endpoint URL: {e}")))?;

        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl PlanGateway for HttpPlanGateway {
    async fn request_plan(&self, input: &LoanInput) -> Result<PaymentPlan> {
        let body = serde_json::to_vec(input)?;
        debug!(endpoint = %self.endpoint, "POST payment plan request");

        let response = self
            .http
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, HeaderValue::from_static(JSON_UTF8))
            .body(body)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(classify)?;

        if status.is_success() {
            let plan: PaymentPlan = serde_json::from_slice(&bytes)?;
            info!(rows = plan.len(), "payment plan loaded");
            Ok(plan)
        } else {
            Err(rejection(status, &bytes))
        }
    }
}

fn classify(e: reqwest::Error) -> LoanError {
    if e.is_timeout() {
        LoanError::Timeout
    } else {
        LoanError::Transport(e)
    }
}

/// Pulls the first reported message out of an error response.
fn rejection(status: StatusCode, body: &[u8]) -> LoanError {
    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(ErrorBody { detail }) if !detail.is_empty() => {
            let first = detail.into_iter().next().map(|d| d.msg).unwrap_or_default();
            info!(status = status.as_u16(), message = %first, "server rejected loan input");
            LoanError::Rejected(first)
        }
        _ => LoanError::MalformedRejection {
            status: status.as_u16(),
        },
    }
}
