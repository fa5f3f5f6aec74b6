// LLM prompt templates for resume analysis and interview practice.

use crate::llm_client::GenerationParams;

pub const ANALYSIS_PARAMS: GenerationParams = GenerationParams::new(1024, 0.2, 0.7);
pub const QUESTIONS_PARAMS: GenerationParams = GenerationParams::new(1024, 0.5, 0.8);
pub const ANSWER_PARAMS: GenerationParams = GenerationParams::new(1024, 0.3, 0.8);
pub const FEEDBACK_PARAMS: GenerationParams = GenerationParams::new(1024, 0.3, 0.8);

/// Replace `{resume}` before sending.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze the following resume and identify the technical skills mentioned:

{resume}

Please provide:
1. A list of technical skills found in the resume
2. A brief assessment of the candidate's technical profile
3. 5-10 technical questions that would be relevant for an interview based on the skills mentioned

Format your response as JSON with the following structure:
{
    "skills": ["skill1", "skill2", ...],
    "assessment": "brief assessment",
    "questions": ["question1", "question2", ...]
}"#;

/// Replace `{resume}` before sending.
pub const QUESTIONS_PROMPT_TEMPLATE: &str = "\
Based on the following resume, please generate exactly 10 thoughtful questions that would help assess the candidate's skills, experience, and potential areas for improvement.

Resume:
{resume}

Please provide the questions as a numbered list (1 to 10) without any markdown formatting.";

/// Replace `{resume}` and `{question}` before sending.
pub const ANSWER_PROMPT_TEMPLATE: &str = "\
Based on the following resume, please provide a thoughtful answer to the question.

Resume:
{resume}

Question:
{question}";

/// Replace `{resume}` and `{qa}` before sending.
pub const FEEDBACK_PROMPT_TEMPLATE: &str = "\
Based on the following resume and the candidate's responses to questions about their experience, please provide a comprehensive analysis with:
1. Overall assessment of the candidate's self-awareness and communication skills
2. Key strengths demonstrated through their responses
3. Areas for improvement in their answers
4. Specific recommendations for skill development

Resume:
{resume}

Questions and Answers:
{qa}

Please provide your analysis in exactly 4-6 lines of plain text.";
