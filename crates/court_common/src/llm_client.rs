//! Verdict Service
//!
//! `Adjudicator` is the seam between the court and the model. The real
//! implementation makes exactly one generateContent call per case and never
//! retries; the fake serves scripted verdicts for tests.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::config::LlmConfig;
use crate::error::VerdictError;
use crate::llm_protocol::{GenerateContentRequest, GenerateContentResponse};
use crate::prompts::{build_prompt, new_case_number, verdict_schema, PANDA_JUDGE_SYSTEM_PROMPT};
use crate::types::{CaseSubmission, Verdict};

/// Anything that can rule on a case
#[async_trait]
pub trait Adjudicator: Send + Sync {
    /// Rule on a case. Callers have already rejected blank statements.
    async fn adjudicate(&self, case: &CaseSubmission) -> Result<Verdict, VerdictError>;
}

/// Build the generateContent URL for a model
pub fn generate_content_url(endpoint: &str, model: &str) -> String {
    format!(
        "{}/v1beta/models/{}:generateContent",
        endpoint.trim_end_matches('/'),
        model
    )
}

/// Real adjudicator backed by the hosted Gemini API
pub struct GeminiAdjudicator {
    config: LlmConfig,
    api_key: Option<String>,
    http_client: reqwest::Client,
}

impl GeminiAdjudicator {
    /// Create from config, resolving the credential from env or config.
    ///
    /// A missing credential is not an error here; it fails each adjudication
    /// before any network attempt.
    pub fn from_config(config: LlmConfig) -> Result<Self> {
        let api_key = config.resolve_api_key();
        Self::with_api_key(config, api_key)
    }

    pub fn with_api_key(config: LlmConfig, api_key: Option<String>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            config,
            api_key,
            http_client,
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Build the request body for one case
    pub fn build_request(&self, case: &CaseSubmission, case_number: i64) -> GenerateContentRequest {
        GenerateContentRequest::json(
            PANDA_JUDGE_SYSTEM_PROMPT,
            &build_prompt(case, case_number),
            verdict_schema(),
            self.config.temperature,
        )
    }

    async fn generate(&self, api_key: &str, request: &GenerateContentRequest) -> Result<GenerateContentResponse> {
        let url = generate_content_url(&self.config.endpoint, &self.config.model);

        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(request)
            .send()
            .await
            .context("Request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("HTTP {} from generateContent: {}", status, body);
        }

        response
            .json::<GenerateContentResponse>()
            .await
            .context("Failed to decode generateContent response")
    }
}

#[async_trait]
impl Adjudicator for GeminiAdjudicator {
    async fn adjudicate(&self, case: &CaseSubmission) -> Result<Verdict, VerdictError> {
        let api_key = self.api_key.as_deref().ok_or(VerdictError::MissingApiKey)?;

        let case_number = new_case_number();
        let request = self.build_request(case, case_number);
        info!(case_number, model = %self.config.model, "Court is in session");

        let response = self.generate(api_key, &request).await.map_err(|e| {
            error!(case_number, "Error judging case: {:#}", e);
            VerdictError::Unavailable
        })?;

        let text = response.text().ok_or_else(|| {
            warn!(case_number, "Model returned no text");
            VerdictError::EmptyResponse
        })?;
        debug!(case_number, chars = text.len(), "Received decree");

        Verdict::from_response_text(&text).map_err(|e| {
            if let VerdictError::Malformed(detail) = &e {
                error!(case_number, "Unreadable decree: {}", detail);
            }
            e
        })
    }
}

/// Fake adjudicator for testing
///
/// Serves scripted results in order; the last one repeats. Records every
/// case it receives.
pub struct FakeAdjudicator {
    responses: Mutex<VecDeque<Result<Verdict, VerdictError>>>,
    received: Mutex<Vec<CaseSubmission>>,
}

impl FakeAdjudicator {
    pub fn new(responses: Vec<Result<Verdict, VerdictError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            received: Mutex::new(Vec::new()),
        }
    }

    pub fn always(verdict: Verdict) -> Self {
        Self::new(vec![Ok(verdict)])
    }

    pub fn always_error(error: VerdictError) -> Self {
        Self::new(vec![Err(error)])
    }

    /// Number of adjudications requested so far
    pub fn call_count(&self) -> usize {
        self.received.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Cases received so far, oldest first
    pub fn received(&self) -> Vec<CaseSubmission> {
        self.received.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl Adjudicator for FakeAdjudicator {
    async fn adjudicate(&self, case: &CaseSubmission) -> Result<Verdict, VerdictError> {
        self.received
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(case.clone());

        let mut responses = self.responses.lock().unwrap_or_else(|e| e.into_inner());
        match responses.len() {
            0 => Err(VerdictError::EmptyResponse),
            1 => responses[0].clone(),
            _ => responses.pop_front().unwrap_or(Err(VerdictError::EmptyResponse)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    fn sample_verdict() -> Verdict {
        Verdict {
            plaintiff_responsibility: 40.0,
            defendant_responsibility: 60.0,
            decree: "The court finds for the bamboo.".to_string(),
            plaintiff_reparation: "Take 3 deep breaths".to_string(),
            defendant_reparation: "Return the toy and apologize".to_string(),
        }
    }

    fn sample_case() -> CaseSubmission {
        CaseSubmission::from_form("", "He took my toy", "", "I was just borrowing it")
    }

    #[test]
    fn test_generate_content_url() {
        assert_eq!(
            generate_content_url("https://generativelanguage.googleapis.com/", "gemini-2.5-flash"),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_build_request_uses_persona_schema_and_temperature() {
        let judge = GeminiAdjudicator::with_api_key(LlmConfig::default(), Some("k".into())).unwrap();
        let request = judge.build_request(&sample_case(), 42);

        assert_eq!(
            request.system_instruction.parts[0].text.as_deref(),
            Some(PANDA_JUDGE_SYSTEM_PROMPT)
        );
        let prompt = request.contents[0].parts[0].text.as_deref().unwrap();
        assert!(prompt.starts_with("CASE NUMBER: 42"));
        assert_eq!(request.generation_config.response_schema, verdict_schema());
        assert!((request.generation_config.temperature - 0.7).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_without_network() {
        // Unroutable endpoint: reaching the network would surface as Unavailable
        let config = LlmConfig {
            endpoint: "http://127.0.0.1:9".to_string(),
            ..LlmConfig::default()
        };
        let judge = GeminiAdjudicator::with_api_key(config, None).unwrap();
        assert!(!judge.has_api_key());

        let result = judge.adjudicate(&sample_case()).await;
        assert_eq!(result, Err(VerdictError::MissingApiKey));
    }

    #[tokio::test]
    async fn test_transport_failure_is_unavailable() {
        let config = LlmConfig {
            endpoint: "http://127.0.0.1:9".to_string(),
            timeout_secs: Some(2),
            ..LlmConfig::default()
        };
        let judge = GeminiAdjudicator::with_api_key(config, Some("k".into())).unwrap();

        let result = judge.adjudicate(&sample_case()).await;
        assert_eq!(result, Err(VerdictError::Unavailable));
    }

    /// Read one HTTP/1.1 request (head plus Content-Length body), return the head
    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf);
            if let Some(head_end) = text.find("\r\n\r\n") {
                let head = text[..head_end].to_string();
                let body_len = head
                    .lines()
                    .filter_map(|l| l.split_once(':'))
                    .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, v)| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= head_end + 4 + body_len {
                    return head;
                }
            }
        }
        String::from_utf8_lossy(&buf).to_string()
    }

    /// Local server answering every request with one canned response.
    /// Returns the endpoint and the heads of the requests it saw.
    async fn canned_server(status: &'static str, body: String) -> (String, Arc<Mutex<Vec<String>>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("http://{}", listener.local_addr().unwrap());
        let seen = Arc::new(Mutex::new(Vec::new()));

        let log = seen.clone();
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let head = read_request(&mut socket).await;
                log.lock().unwrap().push(head);

                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        (endpoint, seen)
    }

    fn envelope(text: &str) -> String {
        json!({"candidates": [{"content": {"role": "model", "parts": [{"text": text}]}}]}).to_string()
    }

    async fn adjudicate_against(status: &'static str, body: String) -> (Result<Verdict, VerdictError>, Vec<String>) {
        let (endpoint, seen) = canned_server(status, body).await;
        let config = LlmConfig {
            endpoint,
            timeout_secs: Some(5),
            ..LlmConfig::default()
        };
        let judge = GeminiAdjudicator::with_api_key(config, Some("k".into())).unwrap();

        let result = judge.adjudicate(&sample_case()).await;
        let requests = seen.lock().unwrap().clone();
        (result, requests)
    }

    #[tokio::test]
    async fn test_successful_ruling_is_parsed() {
        let text = serde_json::to_string(&sample_verdict()).unwrap();
        let (result, requests) = adjudicate_against("200 OK", envelope(&text)).await;

        assert_eq!(result, Ok(sample_verdict()));
        assert_eq!(requests.len(), 1);
        assert!(requests[0].starts_with("POST /v1beta/models/gemini-2.5-flash:generateContent HTTP/1.1"));
        assert!(requests[0].to_ascii_lowercase().contains("x-goog-api-key: k"));
    }

    #[tokio::test]
    async fn test_error_status_is_unavailable() {
        let body = json!({"error": {"code": 500, "message": "internal"}}).to_string();
        let (result, requests) = adjudicate_against("500 Internal Server Error", body).await;

        assert_eq!(result, Err(VerdictError::Unavailable));
        assert_eq!(requests.len(), 1);
    }

    #[tokio::test]
    async fn test_rate_limited_is_not_retried() {
        let (result, requests) = adjudicate_against("429 Too Many Requests", "{}".to_string()).await;

        assert_eq!(result, Err(VerdictError::Unavailable));
        assert_eq!(requests.len(), 1);
    }

    #[tokio::test]
    async fn test_undecodable_envelope_is_unavailable() {
        let (result, requests) = adjudicate_against("200 OK", "<html>gateway</html>".to_string()).await;

        assert_eq!(result, Err(VerdictError::Unavailable));
        assert_eq!(requests.len(), 1);
    }

    #[tokio::test]
    async fn test_no_candidates_is_empty_response() {
        let (result, requests) = adjudicate_against("200 OK", "{}".to_string()).await;

        assert_eq!(result, Err(VerdictError::EmptyResponse));
        assert_eq!(requests.len(), 1);
    }

    #[tokio::test]
    async fn test_blank_text_is_empty_response() {
        let (result, _) = adjudicate_against("200 OK", envelope("")).await;
        assert_eq!(result, Err(VerdictError::EmptyResponse));

        let (result, requests) = adjudicate_against("200 OK", envelope("   \n")).await;
        assert_eq!(result, Err(VerdictError::EmptyResponse));
        assert_eq!(requests.len(), 1);
    }

    #[tokio::test]
    async fn test_unreadable_decree_is_malformed() {
        let (result, requests) = adjudicate_against("200 OK", envelope("The panda is napping.")).await;

        assert!(matches!(result, Err(VerdictError::Malformed(_))));
        assert_eq!(requests.len(), 1);
    }

    #[tokio::test]
    async fn test_decree_missing_field_is_malformed() {
        let partial = json!({"plaintiffResponsibility": 40, "defendantResponsibility": 60}).to_string();
        let (result, _) = adjudicate_against("200 OK", envelope(&partial)).await;

        assert!(matches!(result, Err(VerdictError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_fake_records_cases_and_repeats_last() {
        let fake = FakeAdjudicator::new(vec![
            Err(VerdictError::Unavailable),
            Ok(sample_verdict()),
        ]);

        assert_eq!(fake.adjudicate(&sample_case()).await, Err(VerdictError::Unavailable));
        assert_eq!(fake.adjudicate(&sample_case()).await, Ok(sample_verdict()));
        assert_eq!(fake.adjudicate(&sample_case()).await, Ok(sample_verdict()));

        assert_eq!(fake.call_count(), 3);
        assert_eq!(fake.received()[0].plaintiff_name, "Plaintiff");
    }

    #[tokio::test]
    async fn test_fake_survives_poisoned_lock() {
        let fake = Arc::new(FakeAdjudicator::always(sample_verdict()));
        let holder = fake.clone();
        let _ = std::thread::spawn(move || {
            let _guard = holder.received.lock().unwrap();
            panic!("panicked while holding the lock");
        })
        .join();

        assert_eq!(fake.call_count(), 0);
        assert_eq!(fake.adjudicate(&sample_case()).await, Ok(sample_verdict()));
        assert_eq!(fake.call_count(), 1);
    }

    #[tokio::test]
    async fn test_fake_empty_script() {
        let fake = FakeAdjudicator::new(vec![]);
        assert_eq!(fake.adjudicate(&sample_case()).await, Err(VerdictError::EmptyResponse));
    }
}
