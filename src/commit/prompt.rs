//! System instruction and request construction for commit message generation.

use crate::config::GenerationConfig;
use crate::git::Diff;
use crate::llm::CompletionRequest;

/// Default system instruction. The diff itself is sent as the user turn.
pub const SYSTEM_PROMPT: &str = "You are a GitHub commit writer. Write a well-crafted GitHub commit based off this git diff.
Consider each change made as well as how each change relates to other changes.
Your commit message should be short.
Respond using JSON ONLY in the following schema:
{ \"message\" : \"Your commit message\" }";

/// Build the completion request for one candidate.
pub fn build_request(diff: &Diff, config: &GenerationConfig) -> CompletionRequest {
    CompletionRequest {
        system_prompt: config.system_prompt.clone(),
        user_text: diff.as_str().to_string(),
        model: config.model.clone(),
        temperature: config.temperature,
        max_tokens: config.max_tokens,
        top_p: config.top_p,
    }
}
