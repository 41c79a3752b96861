// Shared prompt fragments used by the client itself.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

/// System message sent with every call. The validation reply parser tolerates
/// prose around the JSON, but asking for JSON only keeps replies small.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";
