//! Planet telemetry: structured fact generation with an offline fallback.

use cosmic_core::planet::{PlanetData, PlanetInfoResponse, SYSTEM_OFFLINE};

use crate::gemini::{GeminiClient, GenerationConfig};
use crate::retry::retry_with_backoff;

/// The fixed response schema the model must fill.
fn planet_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "introduction": {
                "type": "STRING",
                "description": "Un breve párrafo introductorio cautivador."
            },
            "description": {
                "type": "STRING",
                "description": "Descripción técnica detallada en formato Markdown."
            },
            "keyPoints": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Lista de 3 a 5 datos fascinantes."
            },
            "news": {
                "type": "STRING",
                "description": "Noticias o misiones recientes (2020-2025)."
            },
            "lastUpdate": {
                "type": "STRING",
                "description": "Fecha de la última telemetría (formato texto)."
            }
        },
        "required": ["introduction", "description", "keyPoints", "news", "lastUpdate"]
    })
}

/// The degraded payload handed to the UI when telemetry cannot be fetched.
fn offline_payload() -> PlanetInfoResponse {
    PlanetInfoResponse {
        data: Some(PlanetData {
            introduction: "Enlace Orbital Inestable".to_string(),
            description: "Los servidores de telemetría no responden. Esto puede deberse a una \
                          alta demanda o a una interrupción en la señal estelar. Por favor, \
                          reintenta la conexión."
                .to_string(),
            key_points: vec![
                "Error de comunicación.".to_string(),
                "Reintento sugerido.".to_string(),
            ],
            news: "Telemetría bloqueada por interferencia.".to_string(),
            last_update: SYSTEM_OFFLINE.to_string(),
        }),
        sources: Vec::new(),
    }
}

/// Strips markdown code fences the model sometimes wraps around JSON.
fn clean_json_string(raw: &str) -> String {
    let mut clean = raw.trim();
    if let Some(stripped) = clean.strip_prefix("```json") {
        clean = stripped;
    } else if let Some(stripped) = clean.strip_prefix("```") {
        clean = stripped;
    }
    if let Some(stripped) = clean.strip_suffix("```") {
        clean = stripped;
    }
    let clean = clean.trim();
    if clean.is_empty() {
        "{}".to_string()
    } else {
        clean.to_string()
    }
}

/// Fetches structured facts about `planet_name`.
///
/// Quota-class failures are retried with bounded backoff; any remaining
/// failure (transport, blank reply, malformed JSON) degrades to the fixed
/// offline payload instead of an error.
pub async fn planet_details(client: &GeminiClient, planet_name: &str) -> PlanetInfoResponse {
    let prompt = format!(
        "Actúa como un experto de la NASA. Proporciona información técnica, descubrimientos \
         recientes y datos curiosos sobre {planet_name}. \
         IMPORTANTE: Responde ÚNICAMENTE en formato JSON siguiendo el esquema."
    );

    let result = retry_with_backoff(|| {
        client.generate_with_config(
            prompt.clone(),
            GenerationConfig {
                temperature: Some(0.1),
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(planet_schema()),
            },
        )
    })
    .await;

    let text = match result {
        Ok(text) => text,
        Err(err) => {
            tracing::error!(%err, planet = planet_name, "planet telemetry request failed");
            return offline_payload();
        }
    };

    match serde_json::from_str::<PlanetData>(&clean_json_string(&text)) {
        Ok(data) => PlanetInfoResponse {
            data: Some(data),
            sources: Vec::new(),
        },
        Err(err) => {
            tracing::error!(%err, planet = planet_name, "planet telemetry payload malformed");
            offline_payload()
        }
    }
}
