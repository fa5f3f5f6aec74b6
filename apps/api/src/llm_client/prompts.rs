// Shared prompt fragments.
// Each module that calls the LLM defines its own prompts.rs alongside it.

/// Appended to prompts whose answer is shown verbatim in the dashboard.
pub const PLAIN_TEXT_INSTRUCTION: &str =
    "Do not use markdown, bullet points, headings or any other special formatting.";

/// Appended to prompts that must come back as a single JSON object.
pub const JSON_ONLY_INSTRUCTION: &str = "Respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";
