//! Resume analysis contract — decodes the schema-constrained critique
//! response into a typed result.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::llm_client::strip_json_fences;

/// Structured resume critique produced by the analysis stage.
///
/// All four fields are required; a response missing any of them is rejected
/// whole, never partially accepted. The instructed list lengths (3/3/3/2-3)
/// are a generation-time contract and deliberately NOT re-checked here — the
/// consumer iterates whatever arrived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeAnalysis {
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub ats_optimization: Vec<String>,
    pub skills_gaps: Vec<String>,
}

#[derive(Debug, Error)]
pub enum AnalysisParseError {
    #[error("Error parsing resume analysis results: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Decodes a raw analysis response. Fences are stripped first so a
/// markdown-wrapped payload still decodes.
pub fn parse_analysis(raw: &str) -> Result<ResumeAnalysis, AnalysisParseError> {
    Ok(serde_json::from_str(strip_json_fences(raw))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = r#"{
        "strengths": ["Strong backend depth", "Clear impact metrics", "Leadership signals"],
        "improvements": ["Add a summary", "Quantify outcomes", "Trim old roles"],
        "ats_optimization": ["Use standard headers", "Mirror JD keywords", "Avoid tables"],
        "skills_gaps": ["Kubernetes", "Terraform"]
    }"#;

    #[test]
    fn test_well_formed_payload_parses_with_matching_fields() {
        let analysis = parse_analysis(WELL_FORMED).unwrap();
        assert_eq!(analysis.strengths.len(), 3);
        assert_eq!(analysis.strengths[0], "Strong backend depth");
        assert_eq!(analysis.improvements[1], "Quantify outcomes");
        assert_eq!(analysis.ats_optimization[2], "Avoid tables");
        assert_eq!(analysis.skills_gaps, vec!["Kubernetes", "Terraform"]);
    }

    #[test]
    fn test_missing_skills_gaps_is_rejected() {
        let raw = r#"{
            "strengths": ["a", "b", "c"],
            "improvements": ["a", "b", "c"],
            "ats_optimization": ["a", "b", "c"]
        }"#;
        assert!(parse_analysis(raw).is_err());
    }

    #[test]
    fn test_missing_strengths_is_rejected() {
        let raw = r#"{
            "improvements": ["a"],
            "ats_optimization": ["a"],
            "skills_gaps": ["a"]
        }"#;
        assert!(parse_analysis(raw).is_err());
    }

    #[test]
    fn test_non_json_is_rejected() {
        assert!(parse_analysis("not json").is_err());
    }

    #[test]
    fn test_fenced_payload_still_parses() {
        let fenced = format!("```json\n{WELL_FORMED}\n```");
        let analysis = parse_analysis(&fenced).unwrap();
        assert_eq!(analysis.skills_gaps.len(), 2);
    }

    #[test]
    fn test_list_lengths_are_not_enforced_at_parse_time() {
        // Counts are instructed at generation time only; an off-count
        // response with all four fields present still decodes.
        let raw = r#"{
            "strengths": ["a", "b", "c", "d"],
            "improvements": ["a"],
            "ats_optimization": [],
            "skills_gaps": ["a", "b", "c"]
        }"#;
        let analysis = parse_analysis(raw).unwrap();
        assert_eq!(analysis.strengths.len(), 4);
        assert_eq!(analysis.improvements.len(), 1);
        assert!(analysis.ats_optimization.is_empty());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let raw = r#"{
            "strengths": ["a"],
            "improvements": ["a"],
            "ats_optimization": ["a"],
            "skills_gaps": ["a"],
            "overall_score": 87
        }"#;
        assert!(parse_analysis(raw).is_ok());
    }

    #[test]
    fn test_round_trips_through_serde() {
        let analysis = parse_analysis(WELL_FORMED).unwrap();
        let json = serde_json::to_string(&analysis).unwrap();
        let recovered: ResumeAnalysis = serde_json::from_str(&json).unwrap();
        assert_eq!(recovered, analysis);
    }
}
