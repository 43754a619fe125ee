//! Turn a free-text introduction into a JSON user record via a schema-constrained LLM call.

use crate::error::{Error, Result};
use crate::llm::LlmClient;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

pub const SYSTEM_PROMPT: &str =
    "You are a JSON generator. Process introduction statement from a new user into valid JSON.";

/// Output contract for the model. Only its schema is used at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct User {
    pub name: String,
    pub age: i64,
    pub hometown: String,
    pub squadron: i64,
    pub major: String,
}

/// JSON Schema of [`User`], as sent in the chat request's format constraint.
pub fn user_schema() -> Result<Value> {
    serde_json::to_value(schemars::schema_for!(User))
        .map_err(|e| Error::parse(format!("serialize User schema: {e}")))
}

/// Ask the model to extract a [`User`] from `introduction`. The reply is returned verbatim.
pub async fn create_user(llm: &LlmClient, introduction: &str) -> Result<String> {
    let schema = user_schema()?;
    info!(model = llm.model(), chars = introduction.len(), "requesting user record");
    llm.complete_with_schema(SYSTEM_PROMPT, introduction, "User", &schema)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_requires_every_field() {
        let schema = user_schema().unwrap();
        let mut required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        required.sort_unstable();
        assert_eq!(required, ["age", "hometown", "major", "name", "squadron"]);
    }

    #[test]
    fn schema_types_match_fields() {
        let schema = user_schema().unwrap();
        let props = &schema["properties"];
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["title"], "User");
        assert_eq!(schema["additionalProperties"], false);
        assert_eq!(props["name"]["type"], "string");
        assert_eq!(props["age"]["type"], "integer");
        assert_eq!(props["hometown"]["type"], "string");
        assert_eq!(props["squadron"]["type"], "integer");
        assert_eq!(props["major"]["type"], "string");
    }

    #[test]
    fn model_output_matches_user_shape() {
        let raw = r#"{"name":"Ada Lovelace","age":20,"hometown":"London","squadron":12,"major":"Mathematics"}"#;
        let user: User = serde_json::from_str(raw).unwrap();
        assert_eq!(user.name, "Ada Lovelace");
        assert_eq!(user.squadron, 12);
    }
}
