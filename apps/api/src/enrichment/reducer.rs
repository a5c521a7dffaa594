//! Result reducers — convert raw terminal payloads into typed results.
//!
//! The analysis model is *asked* to return JSON but is not guaranteed to
//! comply, so the analysis reducer is total: strict parse first, and on any
//! failure a degraded-but-well-formed result with the raw text preserved
//! verbatim in the assessment field. Parse failures never surface as errors.

use serde::Deserialize;
use serde_json::Value;

use crate::enrichment::models::{MatchResult, MatchScore, TranscriptResult};

/// A reduced result, tagged by fidelity. `Degraded` means the expected
/// structure was absent and a fallback was applied.
#[derive(Debug)]
pub enum Reduction<T> {
    Parsed(T),
    Degraded(T),
}

impl<T> Reduction<T> {
    pub fn into_inner(self) -> T {
        match self {
            Reduction::Parsed(inner) | Reduction::Degraded(inner) => inner,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Reduction::Degraded(_))
    }
}

/// Shape the analysis model is instructed to return.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAnalysis {
    #[serde(default)]
    match_score: Value,
    #[serde(default)]
    skills: Vec<String>,
    #[serde(default)]
    matching_skills: Vec<String>,
    #[serde(default)]
    missing_skills: Vec<String>,
    #[serde(default)]
    assessment: String,
}

/// Reduces raw analysis model output to a `MatchResult`. Never fails.
pub fn reduce_analysis(raw_text: &str) -> Reduction<MatchResult> {
    let candidate = strip_json_fences(raw_text);

    match serde_json::from_str::<RawAnalysis>(candidate) {
        Ok(raw) => Reduction::Parsed(MatchResult {
            match_score: parse_match_score(&raw.match_score),
            skills: raw.skills,
            matching_skills: raw.matching_skills,
            missing_skills: raw.missing_skills,
            assessment: raw.assessment,
        }),
        // The model ignored the JSON instruction: keep its prose verbatim.
        Err(_) => Reduction::Degraded(MatchResult {
            match_score: MatchScore::unavailable(),
            skills: vec![],
            matching_skills: vec![],
            missing_skills: vec![],
            assessment: raw_text.to_string(),
        }),
    }
}

/// Interprets the model's score field: a number, a numeric string (with an
/// optional `%` suffix), or anything else, which maps to `"N/A"`.
fn parse_match_score(value: &Value) -> MatchScore {
    match value {
        Value::Number(n) => n
            .as_f64()
            .map(MatchScore::clamped)
            .unwrap_or_else(MatchScore::unavailable),
        Value::String(s) => {
            let trimmed = s.trim().trim_end_matches('%').trim();
            match trimmed.parse::<f64>() {
                // "NaN"/"inf" parse as f64 but are not scores.
                Ok(n) if n.is_finite() => MatchScore::clamped(n),
                _ => MatchScore::unavailable(),
            }
        }
        _ => MatchScore::unavailable(),
    }
}

/// Reduces a completed transcript payload to a `TranscriptResult`.
///
/// Field presence is checked leniently: a missing `text` becomes an empty
/// string, missing `words`/`utterances` become empty sequences, and a
/// malformed element is skipped rather than failing the whole transcript.
/// Partial transcripts are still useful.
pub fn reduce_transcript(payload: &Value) -> TranscriptResult {
    TranscriptResult {
        text: payload
            .get("text")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        words: collect_lenient(payload.get("words")),
        utterances: collect_lenient(payload.get("utterances")),
    }
}

fn collect_lenient<T: serde::de::DeserializeOwned>(field: Option<&Value>) -> Vec<T> {
    field
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| serde_json::from_value(item.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_analysis_json_parses_fully() {
        let raw = r#"{"matchScore": 85, "skills": ["Rust", "SQL"], "matchingSkills": ["Rust"], "missingSkills": ["Go"], "assessment": "Solid candidate."}"#;
        let reduction = reduce_analysis(raw);
        assert!(!reduction.is_degraded());

        let result = reduction.into_inner();
        assert_eq!(result.match_score, MatchScore::Percent(85));
        assert_eq!(result.skills, vec!["Rust", "SQL"]);
        assert_eq!(result.matching_skills, vec!["Rust"]);
        assert_eq!(result.missing_skills, vec!["Go"]);
        assert_eq!(result.assessment, "Solid candidate.");
    }

    #[test]
    fn test_invalid_json_degrades_with_verbatim_assessment() {
        let raw = "The candidate looks strong overall, though I could not score them.";
        let reduction = reduce_analysis(raw);
        assert!(reduction.is_degraded());

        let result = reduction.into_inner();
        assert_eq!(result.match_score, MatchScore::unavailable());
        assert!(result.skills.is_empty());
        assert!(result.matching_skills.is_empty());
        assert!(result.missing_skills.is_empty());
        assert_eq!(result.assessment, raw);
    }

    #[test]
    fn test_truncated_json_degrades() {
        let raw = r#"{"matchScore": 85, "skills": ["Rust""#;
        let reduction = reduce_analysis(raw);
        assert!(reduction.is_degraded());
        assert_eq!(reduction.into_inner().assessment, raw);
    }

    #[test]
    fn test_score_above_range_clamps_to_100() {
        let raw = r#"{"matchScore": 137, "assessment": "x"}"#;
        let result = reduce_analysis(raw).into_inner();
        assert_eq!(result.match_score, MatchScore::Percent(100));
    }

    #[test]
    fn test_score_below_range_clamps_to_0() {
        let raw = r#"{"matchScore": -5, "assessment": "x"}"#;
        let result = reduce_analysis(raw).into_inner();
        assert_eq!(result.match_score, MatchScore::Percent(0));
    }

    #[test]
    fn test_score_as_percent_string_is_accepted() {
        let raw = r#"{"matchScore": "85%", "assessment": "x"}"#;
        let result = reduce_analysis(raw).into_inner();
        assert_eq!(result.match_score, MatchScore::Percent(85));
    }

    #[test]
    fn test_non_numeric_score_becomes_unavailable() {
        for score in [json!("N/A"), json!(null), json!("high"), json!({})] {
            let raw = json!({"matchScore": score.clone(), "assessment": "x"}).to_string();
            let result = reduce_analysis(&raw).into_inner();
            assert_eq!(result.match_score, MatchScore::unavailable(), "score {score}");
        }
    }

    #[test]
    fn test_non_finite_score_strings_become_unavailable() {
        for score in ["NaN", "inf", "-inf", "infinity"] {
            let raw = json!({"matchScore": score, "assessment": "x"}).to_string();
            let result = reduce_analysis(&raw).into_inner();
            assert_eq!(result.match_score, MatchScore::unavailable(), "score {score}");
        }
    }

    #[test]
    fn test_missing_score_field_becomes_unavailable() {
        let raw = r#"{"skills": [], "assessment": "no score given"}"#;
        let reduction = reduce_analysis(raw);
        assert!(!reduction.is_degraded());
        assert_eq!(reduction.into_inner().match_score, MatchScore::unavailable());
    }

    #[test]
    fn test_fenced_json_is_unwrapped() {
        let raw = "```json\n{\"matchScore\": 70, \"assessment\": \"ok\"}\n```";
        let reduction = reduce_analysis(raw);
        assert!(!reduction.is_degraded());
        assert_eq!(reduction.into_inner().match_score, MatchScore::Percent(70));
    }

    #[test]
    fn test_full_transcript_payload_reduces() {
        let payload = json!({
            "status": "completed",
            "text": "hello world",
            "words": [
                {"text": "hello", "start": 0, "end": 400, "confidence": 0.98},
                {"text": "world", "start": 410, "end": 800, "confidence": 0.95}
            ],
            "utterances": [
                {"speaker": "A", "text": "hello world", "start": 0, "end": 800}
            ]
        });

        let result = reduce_transcript(&payload);
        assert_eq!(result.text, "hello world");
        assert_eq!(result.words.len(), 2);
        assert_eq!(result.words[0].text, "hello");
        assert_eq!(result.utterances.len(), 1);
        assert_eq!(result.utterances[0].speaker, "A");
    }

    #[test]
    fn test_missing_words_and_utterances_yield_empty_sequences() {
        let payload = json!({"status": "completed", "text": "partial"});
        let result = reduce_transcript(&payload);
        assert_eq!(result.text, "partial");
        assert!(result.words.is_empty());
        assert!(result.utterances.is_empty());
    }

    #[test]
    fn test_missing_text_yields_empty_string() {
        let result = reduce_transcript(&json!({"status": "completed"}));
        assert_eq!(result.text, "");
    }

    #[test]
    fn test_malformed_word_entries_are_skipped() {
        let payload = json!({
            "text": "x",
            "words": [
                {"text": "ok", "start": 0, "end": 100, "confidence": 0.9},
                {"start": "not-a-number"},
                42
            ]
        });
        let result = reduce_transcript(&payload);
        assert_eq!(result.words.len(), 1);
        assert_eq!(result.words[0].text, "ok");
    }
}
