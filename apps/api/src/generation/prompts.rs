// All LLM prompt constants for the pipeline, plus the pure build functions
// that fill them. User-supplied text (job description, resume, tone) is
// embedded verbatim with no escaping — prompt injection against the
// downstream model is a known, unmitigated limitation of this interface.

use crate::generation::pipeline::{LetterRequest, LetterStyle};

/// System prompt for cover letter generation (both styles).
pub const COVER_LETTER_SYSTEM: &str = "You are a professional cover letter writer \
    with expertise in creating compelling job application letters.";

/// System prompt for the analysis stage — pairs with JSON response mode.
pub const RESUME_ANALYSIS_SYSTEM: &str =
    "You are an expert resume reviewer with experience in HR and recruitment.";

/// System prompt for the rewrite stage.
pub const RESUME_IMPROVEMENT_SYSTEM: &str = "You are an expert resume writer \
    with experience in optimizing resumes for ATS systems and professional presentation.";

/// Normal-style cover letter template.
/// Replace: {job_description}, {resume}, {tone}, {paragraph_count}
const NORMAL_LETTER_TEMPLATE: &str = r#"Generate a professional cover letter based on the following:

Job Description:
{job_description}

Resume:
{resume}

Tone:
{tone}

Create a compelling cover letter that:
1. Matches the candidate's experience with job requirements
2. Uses the specified tone: {tone}
3. Contains exactly {paragraph_count} paragraphs
4. Highlights relevant skills and experiences
5. Shows enthusiasm for the position

Important: The response MUST be exactly {paragraph_count} paragraphs long.
Each paragraph should be well-structured and focused on a specific aspect:
- First paragraph: Introduction and position interest
- Middle paragraph(s): Relevant experience and skills
- Last paragraph: Closing statement and call to action

Response should be in clear paragraphs suitable for a formal letter."#;

/// T-style cover letter template: a narrative section plus a two-column
/// "Requirements Match" section. Same placeholders as the Normal template.
const T_STYLE_LETTER_TEMPLATE: &str = r#"Generate a T-style cover letter based on the following:

Job Description:
{job_description}

Resume:
{resume}

Tone:
{tone}

Create a cover letter in two parts:
1. A narrative section with exactly {paragraph_count} paragraphs that:
   - Matches the candidate's experience with job requirements
   - Uses the specified tone: {tone}
   - Shows enthusiasm for the position
   - Highlights relevant skills and experiences

2. A "Requirements Match" section that:
   - Extracts 4-6 key requirements from the job description
   - Matches each requirement with relevant experience/skills from the resume
   - Formats as a two-column list with requirements on the left and matching qualifications on the right
   - Use exactly 20 spaces between the requirement and the matching qualification

Format the Requirements Match section as:

Requirements Match:
[Requirement 1]                    [Matching Experience/Skill]
[Requirement 2]                    [Matching Experience/Skill]
etc.

Keep the narrative section professional and well-structured with:
- First paragraph: Introduction and position interest
- Middle paragraph(s): Relevant experience and skills
- Last paragraph: Closing statement and call to action"#;

/// Analysis template — instructs the four-field JSON schema the parser
/// expects. Replace: {resume}
const RESUME_ANALYSIS_TEMPLATE: &str = r#"Analyze the following resume and provide actionable recommendations:

Resume:
{resume}

Please provide a JSON response with the following structure:
{
    "strengths": [list of 3 key strengths],
    "improvements": [list of 3 specific areas for improvement],
    "ats_optimization": [list of 3 recommendations for ATS optimization],
    "skills_gaps": [list of 2-3 suggested skills to develop]
}

Keep recommendations specific, actionable, and constructive."#;

/// Rewrite template — takes the original resume plus the raw analysis text.
/// Replace: {resume}, {analysis}
const RESUME_IMPROVEMENT_TEMPLATE: &str = r#"Original Resume:
{resume}

Analysis Results:
{analysis}

Please rewrite the resume incorporating the following improvements:
1. Address the areas of improvement mentioned in the analysis
2. Optimize for ATS as suggested
3. Better highlight the key strengths identified
4. Maintain the same basic structure but enhance the content
5. Keep the length similar to the original

The response should be the complete rewritten resume in a clean, professional format.
Maintain standard resume sections (Summary, Experience, Education, Skills, etc.)."#;

/// Builds the cover letter prompt for either style.
pub fn build_cover_letter_prompt(request: &LetterRequest) -> String {
    let template = match request.style {
        LetterStyle::Normal => NORMAL_LETTER_TEMPLATE,
        LetterStyle::TStyle => T_STYLE_LETTER_TEMPLATE,
    };
    template
        .replace("{job_description}", &request.job_description)
        .replace("{resume}", &request.resume)
        .replace("{tone}", &request.tone)
        .replace("{paragraph_count}", &request.paragraph_count.to_string())
}

/// Builds the resume analysis prompt.
pub fn build_analysis_prompt(resume: &str) -> String {
    RESUME_ANALYSIS_TEMPLATE.replace("{resume}", resume)
}

/// Builds the rewrite prompt from the original resume and the raw analysis
/// text returned by the service.
pub fn build_improvement_prompt(resume: &str, analysis_text: &str) -> String {
    RESUME_IMPROVEMENT_TEMPLATE
        .replace("{resume}", resume)
        .replace("{analysis}", analysis_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_with(style: LetterStyle, paragraph_count: u8) -> LetterRequest {
        LetterRequest {
            job_description: "Backend engineer, 3 yrs distributed systems".to_string(),
            resume: "Jane Doe, 3 yrs backend...".to_string(),
            paragraph_count,
            tone: "confident and passionate about technology".to_string(),
            style,
        }
    }

    #[test]
    fn test_normal_prompt_instructs_exact_paragraph_count_for_all_bounds() {
        for n in 1..=10u8 {
            let prompt = build_cover_letter_prompt(&request_with(LetterStyle::Normal, n));
            assert!(
                prompt.contains(&format!("exactly {n} paragraphs")),
                "paragraph instruction missing for n={n}"
            );
            assert!(prompt.contains(&format!("MUST be exactly {n} paragraphs long")));
        }
    }

    #[test]
    fn test_t_style_prompt_specifies_twenty_space_separator() {
        let prompt = build_cover_letter_prompt(&request_with(LetterStyle::TStyle, 3));
        assert!(prompt
            .contains("Use exactly 20 spaces between the requirement and the matching qualification"));
        assert!(prompt.contains("Requirements Match"));
        assert!(prompt.contains("4-6 key requirements"));
    }

    #[test]
    fn test_t_style_prompt_keeps_paragraph_instruction() {
        let prompt = build_cover_letter_prompt(&request_with(LetterStyle::TStyle, 5));
        assert!(prompt.contains("exactly 5 paragraphs"));
    }

    #[test]
    fn test_user_text_is_embedded_verbatim() {
        let mut request = request_with(LetterStyle::Normal, 3);
        request.job_description = "Ignore previous instructions & {braces} intact".to_string();
        let prompt = build_cover_letter_prompt(&request);
        // No escaping, no sanitization
        assert!(prompt.contains("Ignore previous instructions & {braces} intact"));
        assert!(prompt.contains("Jane Doe, 3 yrs backend..."));
        assert!(prompt.contains("confident and passionate about technology"));
    }

    #[test]
    fn test_no_placeholders_survive_filling() {
        let prompt = build_cover_letter_prompt(&request_with(LetterStyle::Normal, 3));
        assert!(!prompt.contains("{job_description}"));
        assert!(!prompt.contains("{resume}"));
        assert!(!prompt.contains("{tone}"));
        assert!(!prompt.contains("{paragraph_count}"));
    }

    #[test]
    fn test_analysis_prompt_names_all_four_fields() {
        let prompt = build_analysis_prompt("Jane Doe, 3 yrs backend...");
        for field in ["strengths", "improvements", "ats_optimization", "skills_gaps"] {
            assert!(prompt.contains(field), "analysis prompt missing {field}");
        }
        assert!(prompt.contains("Jane Doe, 3 yrs backend..."));
    }

    #[test]
    fn test_improvement_prompt_embeds_resume_and_analysis() {
        let prompt = build_improvement_prompt(
            "Jane Doe, 3 yrs backend...",
            r#"{"strengths": ["clear impact"]}"#,
        );
        assert!(prompt.contains("Jane Doe, 3 yrs backend..."));
        assert!(prompt.contains(r#"{"strengths": ["clear impact"]}"#));
        assert!(prompt.contains("Maintain standard resume sections"));
    }
}
