//! Google Generative AI (Gemini) chat sessions

use crate::{
    error::{Error, Result},
    providers::{ChatSession, GenerationService},
    stream::FragmentStream,
    types::{Message, ModelConfig},
};
use async_stream::stream;
use async_trait::async_trait;
use futures::{Stream, StreamExt};
use parking_lot::Mutex;
use reqwest::{StatusCode, header::HeaderMap};
use reqwest_eventsource::{Event, EventSource};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Gemini service: hands out chat sessions that share one HTTP client
pub struct GeminiService {
    client: reqwest::Client,
    api_key: String,
    model: ModelConfig,
}

impl GeminiService {
    /// Create a new service with an API key
    pub fn new(api_key: impl Into<String>, model: ModelConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model,
        }
    }
}

#[async_trait]
impl GenerationService for GeminiService {
    async fn create_session(&self, system_instruction: &str) -> Result<Box<dyn ChatSession>> {
        if self.api_key.trim().is_empty() {
            return Err(Error::InvalidApiKey);
        }
        if system_instruction.trim().is_empty() {
            return Err(Error::ServiceUnavailable(
                "system instruction must not be empty".to_string(),
            ));
        }

        tracing::debug!(model = %self.model.id, "creating gemini chat session");

        Ok(Box::new(GeminiChat {
            client: self.client.clone(),
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            system_instruction: system_instruction.to_string(),
            history: Arc::new(Mutex::new(Vec::new())),
        }))
    }
}

/// A Gemini conversation. History lives client-side and is replayed on every turn.
pub struct GeminiChat {
    client: reqwest::Client,
    api_key: String,
    model: ModelConfig,
    system_instruction: String,
    history: Arc<Mutex<Vec<Message>>>,
}

impl GeminiChat {
    fn url(&self, method: &str) -> String {
        format!(
            "{}/models/{}:{}",
            self.model.base_url.trim_end_matches('/'),
            self.model.id,
            method
        )
    }

    fn request_for(&self, text: &str) -> GeminiRequest {
        let history = self.history.lock().clone();
        build_request(&self.system_instruction, &self.model, &history, text)
    }
}

#[async_trait]
impl ChatSession for GeminiChat {
    fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    async fn send(&self, text: &str) -> Result<String> {
        let request = self.request_for(text);
        let url = format!("{}?key={}", self.url("generateContent"), self.api_key);

        let response = self.client.post(&url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = retry_after(response.headers());
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, retry_after, &body));
        }

        let body = response.text().await?;
        let parsed: GeminiResponse = serde_json::from_str(&body)?;
        if parsed.candidates.is_empty() {
            if let Some(reason) = parsed.prompt_feedback.and_then(|f| f.block_reason) {
                return Err(Error::api("blocked", reason));
            }
            return Err(Error::UnexpectedResponse("reply had no candidates".to_string()));
        }
        let reply = candidate_texts(&parsed.candidates).concat();

        self.history
            .lock()
            .extend([Message::user(text), Message::model(reply.clone())]);

        Ok(reply)
    }

    async fn send_streaming(&self, text: &str) -> Result<FragmentStream> {
        let request = self.request_for(text);
        let url = format!(
            "{}?alt=sse&key={}",
            self.url("streamGenerateContent"),
            self.api_key
        );

        let request_builder = self
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .json(&request);

        let event_source = EventSource::new(request_builder)
            .map_err(|e| Error::Sse(format!("Failed to create event source: {}", e)))?;

        Ok(Box::pin(fold_events(
            sse_events(event_source),
            Arc::clone(&self.history),
            text.to_string(),
        )))
    }
}

fn build_request(
    system_instruction: &str,
    model: &ModelConfig,
    history: &[Message],
    text: &str,
) -> GeminiRequest {
    let contents = history
        .iter()
        .chain(std::iter::once(&Message::user(text)))
        .map(|m| GeminiContent {
            role: Some(m.role.as_str().to_string()),
            parts: vec![GeminiPart {
                text: m.text.clone(),
            }],
        })
        .collect();

    let generation_config = if model.max_output_tokens.is_some() || model.temperature.is_some() {
        Some(GeminiGenerationConfig {
            max_output_tokens: model.max_output_tokens,
            temperature: model.temperature,
        })
    } else {
        None
    };

    GeminiRequest {
        contents,
        system_instruction: Some(GeminiContent {
            role: None,
            parts: vec![GeminiPart {
                text: system_instruction.to_string(),
            }],
        }),
        generation_config,
    }
}

fn retry_after(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

fn status_error(status: StatusCode, retry_after: Option<u64>, body: &str) -> Error {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Error::RateLimited { retry_after };
    }
    let message = serde_json::from_str::<GeminiErrorResponse>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string());
    Error::api(format!("http_{}", status.as_u16()), message)
}

fn candidate_texts(candidates: &[GeminiCandidate]) -> Vec<String> {
    candidates
        .iter()
        .filter_map(|c| c.content.as_ref())
        .flat_map(|content| content.parts.iter())
        .filter(|part| !part.thought)
        .filter_map(|part| part.text.clone())
        .collect()
}

/// Decode one SSE payload into its text deltas
fn parse_chunk(data: &str) -> Result<Vec<String>> {
    if let Ok(error_response) = serde_json::from_str::<GeminiErrorResponse>(data) {
        let error_type = error_response
            .error
            .status
            .unwrap_or_else(|| "api_error".to_string());
        return Err(Error::api(error_type, error_response.error.message));
    }

    let response: GeminiResponse = serde_json::from_str(data)
        .map_err(|e| Error::MalformedFragment(format!("{}: {}", e, data)))?;

    if response.candidates.is_empty() {
        if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(Error::api("blocked", reason));
        }
    }

    Ok(candidate_texts(&response.candidates))
}

/// One server-sent event, reduced to what the reply folding needs
enum SseEvent {
    Data(String),
    Ended,
    Failed(Error),
}

fn sse_events(event_source: EventSource) -> impl Stream<Item = SseEvent> + Send {
    event_source.filter_map(|event| async move {
        match event {
            Ok(Event::Open) => None,
            Ok(Event::Message(msg)) => Some(SseEvent::Data(msg.data)),
            Err(reqwest_eventsource::Error::StreamEnded) => Some(SseEvent::Ended),
            Err(reqwest_eventsource::Error::InvalidStatusCode(status, response)) => {
                let retry_after = retry_after(response.headers());
                let body = response.text().await.unwrap_or_default();
                Some(SseEvent::Failed(status_error(status, retry_after, &body)))
            }
            Err(reqwest_eventsource::Error::Transport(e)) => Some(SseEvent::Failed(Error::Http(e))),
            Err(e) => Some(SseEvent::Failed(Error::Sse(e.to_string()))),
        }
    })
}

/// Turn SSE events into text fragments.
///
/// The exchange is recorded in `history` only once the stream ends normally.
fn fold_events<S>(
    events: S,
    history: Arc<Mutex<Vec<Message>>>,
    user_text: String,
) -> impl Stream<Item = Result<String>>
where
    S: Stream<Item = SseEvent>,
{
    stream! {
        let mut events = std::pin::pin!(events);
        let mut reply = String::new();

        while let Some(event) = events.next().await {
            match event {
                SseEvent::Data(data) => {
                    if data.is_empty() || data == "[DONE]" {
                        continue;
                    }
                    match parse_chunk(&data) {
                        Ok(texts) => {
                            for text in texts.into_iter().filter(|t| !t.is_empty()) {
                                reply.push_str(&text);
                                yield Ok(text);
                            }
                        }
                        Err(e) => {
                            yield Err(e);
                            return;
                        }
                    }
                }
                // The event source would reconnect if polled past this point
                SseEvent::Ended => break,
                SseEvent::Failed(e) => {
                    yield Err(e);
                    return;
                }
            }
        }

        history
            .lock()
            .extend([Message::user(user_text), Message::model(reply)]);
    }
}

// Request types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

// Response types

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    prompt_feedback: Option<GeminiPromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiResponseContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorResponse {
    error: GeminiError,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
    status: Option<String>,
}
