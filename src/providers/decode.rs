/*!
 * Decoder for batch-execute responses.
 *
 * The body starts with an anti-JSON-hijacking guard (`)]}'`) followed by
 * one or more JSON chunks, optionally preceded by length lines. The chunk
 * of interest is an array of envelopes; the one tagged
 * `["wrb.fr", <rpc id>, "<payload>"]` carries the actual result as a JSON
 * string, which is itself a deeply nested array:
 *
 * ```text
 * payload[1][0][0][5][*][0]  translated sentences
 * payload[1][0][0][0]        whole translation (older layout)
 * payload[1][0][0][1]        transliteration
 * payload[2]                 detected source language
 * payload[1][3]              requested source language, "auto" when detected
 * ```
 *
 * Every level may be missing or null; each step returns a `DecodeError`
 * naming the path it stopped at.
 */

use serde_json::Value;

use crate::errors::DecodeError;
use crate::providers::TranslationResult;

const RESPONSE_GUARD: &str = ")]}'";

/// Position inside the payload, carrying its path for error messages
#[derive(Debug, Clone, Copy)]
struct Cursor<'a> {
    value: &'a Value,
    path: &'a str,
}

impl<'a> Cursor<'a> {
    fn root(value: &'a Value) -> Self {
        Self { value, path: "payload" }
    }

    /// Descend into an array element
    fn index(self, index: usize, path: &'a str) -> Result<Cursor<'a>, DecodeError> {
        match self.value {
            Value::Array(items) => match items.get(index) {
                Some(Value::Null) | None => Err(DecodeError::MissingField(path.to_string())),
                Some(value) => Ok(Cursor { value, path }),
            },
            _ => Err(DecodeError::MissingField(self.path.to_string())),
        }
    }

    fn as_str(self) -> Result<&'a str, DecodeError> {
        self.value
            .as_str()
            .ok_or_else(|| DecodeError::MissingField(self.path.to_string()))
    }

    fn as_array(self) -> Result<&'a [Value], DecodeError> {
        self.value
            .as_array()
            .map(Vec::as_slice)
            .ok_or_else(|| DecodeError::MissingField(self.path.to_string()))
    }
}

/// Decode a full response body into a translation result
pub fn decode_response(body: &str, rpc_id: &str, source_locale: &str) -> Result<TranslationResult, DecodeError> {
    let payload = extract_payload(body, rpc_id)?;
    let inner: Value = serde_json::from_str(&payload).map_err(|e| DecodeError::InvalidJson {
        context: "payload",
        message: e.to_string(),
    })?;
    decode_payload(&inner, source_locale)
}

/// Find the payload string of the `wrb.fr` envelope for `rpc_id`
pub fn extract_payload(body: &str, rpc_id: &str) -> Result<String, DecodeError> {
    let body = body.trim_start();
    let body = body.strip_prefix(RESPONSE_GUARD).unwrap_or(body);

    // Single JSON document (no `rt=c`) first, then chunked lines
    if let Ok(chunk) = serde_json::from_str::<Value>(body.trim()) {
        if let Some(payload) = find_envelope(&chunk, rpc_id)? {
            return Ok(payload);
        }
    }

    for line in body.lines().map(str::trim).filter(|line| line.starts_with('[')) {
        let Ok(chunk) = serde_json::from_str::<Value>(line) else {
            continue;
        };
        if let Some(payload) = find_envelope(&chunk, rpc_id)? {
            return Ok(payload);
        }
    }

    Err(DecodeError::MissingEnvelope(rpc_id.to_string()))
}

fn find_envelope(chunk: &Value, rpc_id: &str) -> Result<Option<String>, DecodeError> {
    let Some(envelopes) = chunk.as_array() else {
        return Ok(None);
    };

    for envelope in envelopes {
        let Some(fields) = envelope.as_array() else {
            continue;
        };
        let is_match = fields.first().and_then(Value::as_str) == Some("wrb.fr")
            && fields.get(1).and_then(Value::as_str) == Some(rpc_id);
        if !is_match {
            continue;
        }
        return match fields.get(2) {
            Some(Value::String(payload)) => Ok(Some(payload.clone())),
            _ => Err(DecodeError::MissingField("envelope[2]".to_string())),
        };
    }

    Ok(None)
}

/// Walk the inner payload
pub fn decode_payload(payload: &Value, source_locale: &str) -> Result<TranslationResult, DecodeError> {
    let root = Cursor::root(payload);
    let block = root
        .index(1, "payload[1]")?
        .index(0, "payload[1][0]")?
        .index(0, "payload[1][0][0]")?;

    let target_text = translation_text(block)?;
    if target_text.is_empty() {
        return Err(DecodeError::EmptyTranslation);
    }

    let transliteration = block
        .index(1, "payload[1][0][0][1]")
        .and_then(Cursor::as_str)
        .unwrap_or_default()
        .to_string();

    Ok(TranslationResult {
        target_text,
        detected_language: detected_language(root).unwrap_or(source_locale).to_string(),
        transliteration,
        degraded: false,
    })
}

fn translation_text(block: Cursor<'_>) -> Result<String, DecodeError> {
    match block.index(5, "payload[1][0][0][5]") {
        Ok(sentences) => {
            let mut text = String::new();
            for sentence in sentences.as_array()? {
                let part = Cursor { value: sentence, path: "payload[1][0][0][5][*]" }
                    .index(0, "payload[1][0][0][5][*][0]")?
                    .as_str()?;
                text.push_str(part);
            }
            Ok(text)
        }
        Err(_) => Ok(block.index(0, "payload[1][0][0][0]")?.as_str()?.to_string()),
    }
}

fn detected_language(root: Cursor<'_>) -> Option<&str> {
    let detected = root
        .index(2, "payload[2]")
        .and_then(Cursor::as_str)
        .ok()
        .filter(|code| !code.is_empty());

    detected.or_else(|| {
        root.index(1, "payload[1]")
            .and_then(|c| c.index(3, "payload[1][3]"))
            .and_then(Cursor::as_str)
            .ok()
            .filter(|code| !code.is_empty() && *code != "auto")
    })
}
