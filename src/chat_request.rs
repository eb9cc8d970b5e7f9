use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct ChatRequest {
    prompt: String,
}

impl ChatRequest {
    pub fn get_prompt(&self) -> &str {
        &self.prompt
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct Greeting {
    pub message: String,
}

impl Greeting {
    pub fn hello() -> Self {
        Greeting {
            message: "Hello World".to_string(),
        }
    }
}
