//! Prompt templates sent to the providers

use crate::domain::value_objects::ChatProvider;

/// Prompt asking `provider` to answer `user_message` with its JSON schema
pub fn structured_prompt(provider: ChatProvider, user_message: &str) -> String {
    let (schema, rules) = match provider {
        ChatProvider::Claude => (
            r#"{
  "subject": "",
  "do the ai know the answer": "",
  "the answer": ""
}"#,
            r#"- "subject" = a short string
- "do the ai know the answer" = "yes" or "no",
- "the answer" = detailed answer to the question"#,
        ),
        ChatProvider::OpenAi => (
            r#"{
  "subject": "",
  "what to seach in youtube": ""
}"#,
            r#"- "subject" = a short string
- "what to seach in youtube" = keyword to search in youtube on this subject"#,
        ),
    };

    format!(
        "Return ONLY a valid JSON object.\n\
         No explanations. No markdown. No text before or after the JSON.\n\
         \n\
         Use this exact schema (valid JSON object):\n\
         {schema}\n\
         \n\
         Where:\n\
         {rules}\n\
         \n\
         User message:\n\
         \"{user_message}\""
    )
}

/// Instructions of the file-search assistant
pub const RAG_INSTRUCTIONS: &str = r#"You MUST respond ONLY in this JSON format:
{
  "answer": "...",
  "fromData": true/false,
  "fromAI": true/false,
  "tokens": number
}"#;

/// System prompt for similarity explanations
pub const SIMILARITY_SYSTEM_PROMPT: &str = "You are helping users understand semantic similarity scores. Explain in simple, plain English without technical jargon.";

/// Fallback when no explanation could be generated
pub const SIMILARITY_FALLBACK: &str = "These words share some semantic meaning.";

/// User prompt asking why two words scored `similarity`
pub fn similarity_prompt(word1: &str, word2: &str, similarity: f64) -> String {
    format!(
        "Explain in 1-2 short sentences why \"{}\" and \"{}\" have a similarity score of {:.1}%. \
         Focus on their relationship and meaning. Do not mention cosine, vectors, embeddings, or models. \
         Just explain why they are similar or different in simple terms.",
        word1,
        word2,
        similarity * 100.0
    )
}
