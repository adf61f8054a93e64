//! Streaming chat session with search grounding.
//!
//! The session keeps the conversation history and replays it on every
//! request, the way the UI rebuilds its chat from the stored conversation.
//! A transport failure mid-stream degrades to one fixed interference
//! notice instead of an error.

use std::collections::VecDeque;

use cosmic_core::conversation::{ChatMessage, GroundingSource, MessageRole};
use futures::stream::{self, BoxStream, StreamExt};

use crate::gemini::{Content, GeminiClient, GenerateContentResponse, GenerationConfig};

/// The assistant's identity and behavior instructions.
pub const LUCAS_SYSTEM_INSTRUCTION: &str = "Eres LUCAS (Laboratorio de Unidades de Consulta Astronómica y Solar). \
Tu misión es asistir al usuario con datos precisos sobre el cosmos.\n\n\
INFORMACIÓN DE IDENTIDAD CRÍTICA:\n\
- Si te preguntan quién te creó: Fuiste creado por Darwin Florentino Bocio para fines educativos el 7 de enero de 2026.\n\n\
INSTRUCCIONES DE COMPORTAMIENTO:\n\
- Usa la herramienta de búsqueda para noticias de 2024 y 2025.\n\
- Sé profesional, curioso y educativo.\n\
- Mantén respuestas concisas pero fascinantes.";

/// Notice yielded when the stream breaks mid-reply.
pub const INTERFERENCE_NOTICE: &str =
    "⚠️ Interferencia detectada. Por favor, verifica tu conexión o reintenta en unos segundos.";

/// Fallback title when title generation fails outright.
const TITLE_FALLBACK: &str = "Chat Astronómico";
/// Title used when the model returns a blank title.
const TITLE_BLANK: &str = "Nueva Consulta";

/// One increment of a streamed reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatChunk {
    pub text: String,
    pub sources: Option<Vec<GroundingSource>>,
}

impl ChatChunk {
    fn interference() -> Self {
        Self {
            text: INTERFERENCE_NOTICE.to_string(),
            sources: None,
        }
    }
}

/// A chat conversation against the Gemini streaming endpoint.
pub struct ChatSession {
    client: GeminiClient,
    history: Vec<ChatMessage>,
}

impl ChatSession {
    /// Starts an empty session with the LUCAS instruction installed.
    pub fn new(client: GeminiClient) -> Self {
        Self::with_history(client, Vec::new())
    }

    /// Resumes a session from a stored conversation's messages.
    pub fn with_history(client: GeminiClient, history: Vec<ChatMessage>) -> Self {
        Self {
            client: client.with_system_instruction(LUCAS_SYSTEM_INSTRUCTION),
            history,
        }
    }

    /// The messages exchanged so far.
    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Records the completed model reply so the next request replays it.
    pub fn record_reply(&mut self, text: impl Into<String>, sources: Option<Vec<GroundingSource>>) {
        self.history.push(ChatMessage::model(text, sources));
    }

    /// Sends a user message and streams the reply chunk by chunk.
    ///
    /// The user message is appended to the history immediately; the caller
    /// collects the streamed text and records it via [`Self::record_reply`].
    pub async fn send_message_stream(
        &mut self,
        text: impl Into<String>,
    ) -> BoxStream<'static, ChatChunk> {
        self.history.push(ChatMessage::user(text));

        let contents = self
            .history
            .iter()
            .map(|msg| {
                let role = match msg.role {
                    MessageRole::User => "user",
                    MessageRole::Model => "model",
                };
                Content::new(role, msg.text.clone())
            })
            .collect();

        let request = self.client.build_request(
            contents,
            Some(GenerationConfig {
                temperature: Some(0.7),
                ..Default::default()
            }),
            true,
        );

        match self.client.stream_generate(&request).await {
            Ok(response) => sse_chunks(response),
            Err(err) => {
                tracing::error!(%err, "chat stream request failed");
                stream::iter(vec![ChatChunk::interference()]).boxed()
            }
        }
    }
}

struct SseState {
    body: BoxStream<'static, reqwest::Result<bytes::Bytes>>,
    buffer: String,
    pending: VecDeque<ChatChunk>,
    finished: bool,
}

/// Turns an SSE response body into a stream of chat chunks.
fn sse_chunks(response: reqwest::Response) -> BoxStream<'static, ChatChunk> {
    let state = SseState {
        body: response.bytes_stream().boxed(),
        buffer: String::new(),
        pending: VecDeque::new(),
        finished: false,
    };

    stream::unfold(state, |mut state| async move {
        loop {
            if let Some(chunk) = state.pending.pop_front() {
                return Some((chunk, state));
            }
            if state.finished {
                return None;
            }

            match state.body.next().await {
                None => {
                    state.finished = true;
                    // Flush a final event that arrived without a newline.
                    let leftover = std::mem::take(&mut state.buffer);
                    if let Some(chunk) = parse_sse_line(leftover.trim_end()) {
                        state.pending.push_back(chunk);
                    }
                }
                Some(Err(err)) => {
                    tracing::error!(%err, "chat stream interrupted");
                    state.finished = true;
                    state.pending.push_back(ChatChunk::interference());
                }
                Some(Ok(bytes)) => {
                    state.buffer.push_str(&String::from_utf8_lossy(&bytes));
                    while let Some(pos) = state.buffer.find('\n') {
                        let line = state.buffer[..pos].trim_end_matches('\r').to_string();
                        state.buffer.drain(..=pos);
                        if let Some(chunk) = parse_sse_line(&line) {
                            state.pending.push_back(chunk);
                        }
                    }
                }
            }
        }
    })
    .boxed()
}

/// Parses one SSE line into a chat chunk. Non-data lines and unparseable
/// payloads yield nothing.
fn parse_sse_line(line: &str) -> Option<ChatChunk> {
    let data = line.strip_prefix("data:")?.trim();
    if data.is_empty() || data == "[DONE]" {
        return None;
    }

    let response: GenerateContentResponse = match serde_json::from_str(data) {
        Ok(response) => response,
        Err(err) => {
            tracing::warn!(%err, "skipping malformed stream event");
            return None;
        }
    };

    let candidate = response.candidates?.into_iter().next()?;

    let sources: Vec<GroundingSource> = candidate
        .grounding_metadata
        .as_ref()
        .and_then(|m| m.grounding_chunks.as_ref())
        .map(|chunks| {
            chunks
                .iter()
                .filter_map(|chunk| chunk.web.as_ref())
                .map(|web| GroundingSource {
                    title: web.title.clone().unwrap_or_else(|| "Referencia".to_string()),
                    uri: web.uri.clone().unwrap_or_default(),
                })
                .collect()
        })
        .unwrap_or_default();

    let text = candidate
        .content
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
        .unwrap_or_default();

    Some(ChatChunk {
        text,
        sources: (!sources.is_empty()).then_some(sources),
    })
}

/// Generates a very short title for a new conversation from its first
/// message. Falls back to a fixed title on failure, and to the default
/// new-chat title when the model answers blank.
pub async fn generate_chat_title(client: &GeminiClient, first_message: &str) -> String {
    let prompt = format!(
        "Genera un título muy corto (max 3 palabras) para un chat sobre: \"{}\"",
        first_message
    );

    match client.generate(prompt).await {
        Ok(text) => {
            let title = text.trim().to_string();
            if title.is_empty() {
                TITLE_BLANK.to_string()
            } else {
                title
            }
        }
        Err(err) => {
            tracing::warn!(%err, "chat title generation failed");
            TITLE_FALLBACK.to_string()
        }
    }
}
