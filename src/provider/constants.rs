//! Provider-specific constants.

pub mod openai {
    pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo-instruct";
    pub const API_BASE: &str = "https://api.openai.com/v1";
    pub const COMPLETIONS_ENDPOINT: &str = "/completions";
    pub const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";
}
