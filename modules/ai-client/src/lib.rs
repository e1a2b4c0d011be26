pub mod gemini;
pub mod openai;
pub mod traits;

pub use gemini::Gemini;
pub use openai::OpenAi;
pub use traits::{Agent, Message, MessageRole, PromptBuilder};
