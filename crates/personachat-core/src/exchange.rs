//! ExchangeClient trait definition.
//!
//! The exchange client turns a (prompt, persona) pair into the bot's reply
//! text. Every call is stateless from the endpoint's perspective: only the
//! persona and the latest prompt are sent, never the message history.
//!
//! Implementations live in personachat-infra (e.g., `GeminiExchangeClient`).

/// Trait for reply generation backends.
///
/// `reply` never fails: transport errors, bad statuses, and empty streams
/// all resolve to a displayable fallback string, so the conversation always
/// receives a reply.
pub trait ExchangeClient: Send + Sync {
    /// Produce the reply to `prompt` in the voice described by `persona`.
    fn reply(
        &self,
        prompt: &str,
        persona: &str,
    ) -> impl std::future::Future<Output = String> + Send;
}

/// Build the text sent to the endpoint: the persona, a blank line, then a
/// `User:`/`AI:` turn marker around the prompt.
pub fn compose_prompt(persona: &str, prompt: &str) -> String {
    format!("{persona}\n\nUser: {prompt}\nAI:")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_prompt_layout() {
        assert_eq!(
            compose_prompt("You are Luna.", "Hi there"),
            "You are Luna.\n\nUser: Hi there\nAI:"
        );
    }

    #[test]
    fn test_compose_prompt_empty_persona() {
        assert_eq!(compose_prompt("", "Hi"), "\n\nUser: Hi\nAI:");
    }
}
