//! Agent runner with tool calling loop.

use super::tools::{parse_tool_call, tool_definitions, ToolContext};
use crate::config::Settings;
use crate::error::{Result, SvarError};
use crate::openai::{create_client, GROQ_API_BASE};
use async_openai::types::{
    ChatCompletionMessageToolCall, ChatCompletionRequestAssistantMessageArgs,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestToolMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use tracing::{debug, info};

/// Default system prompt for the agent.
const DEFAULT_SYSTEM_PROMPT: &str = r#"You are an expert assistant answering benchmark questions.

You have tools to search the web, Wikipedia, and arXiv, and to extract YouTube video transcripts.
Think step-by-step about what information you need, then use the appropriate tools.

Guidelines:
- Use 'wikipedia_search' for encyclopedic facts
- Use 'youtube_search' when the question contains a YouTube URL
- Use 'arxiv_search' for questions about scientific papers
- Use 'web_search' for everything else
- If the question mentions a locally saved file, read the path from the question text

When you have gathered enough information, reply with the final answer only:
no explanation, no restating the question, just the answer in the exact
format the question asks for."#;

/// LLM providers the agent can be built on.
///
/// Closed set; anything else fails at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Groq,
    OpenAi,
}

impl std::str::FromStr for Provider {
    type Err = SvarError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "groq" => Ok(Provider::Groq),
            "openai" => Ok(Provider::OpenAi),
            other => Err(SvarError::UnsupportedProvider(other.to_string())),
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::Groq => write!(f, "groq"),
            Provider::OpenAi => write!(f, "openai"),
        }
    }
}

/// The stable contract the run loop depends on: a question in, an answer out.
#[async_trait]
pub trait Answerer: Send + Sync {
    async fn answer(&self, task_id: &str, question: &str) -> Result<String>;
}

/// Tool-calling agent over an OpenAI-compatible backend.
pub struct Agent {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    tools: ToolContext,
    max_iterations: usize,
    system_prompt: String,
}

impl Agent {
    /// Build an agent for the configured provider with the fixed tool set.
    ///
    /// Fails with `UnsupportedProvider` before any tool is invoked.
    pub fn build(settings: &Settings, tools: ToolContext) -> Result<Self> {
        let provider: Provider = settings.agent.provider.parse()?;

        let client = match provider {
            Provider::Groq => create_client(
                Some(GROQ_API_BASE),
                settings.credentials.groq_api_key.as_deref(),
            ),
            Provider::OpenAi => {
                create_client(None, settings.credentials.openai_api_key.as_deref())
            }
        };

        info!("Built {} agent with model {}", provider, settings.agent.model);

        Ok(Self {
            client,
            model: settings.agent.model.clone(),
            tools,
            max_iterations: settings.agent.max_iterations,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        })
    }

    /// Run the tool-calling loop for a single question.
    async fn run(&self, question: &str) -> Result<String> {
        let mut messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(self.system_prompt.clone())
                .build()
                .map_err(|e| SvarError::Agent(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(question.to_string())
                .build()
                .map_err(|e| SvarError::Agent(e.to_string()))?
                .into(),
        ];

        let mut iterations = 0;

        loop {
            iterations += 1;
            if iterations > self.max_iterations {
                return Err(SvarError::Agent(format!(
                    "Agent exceeded maximum iterations ({})",
                    self.max_iterations
                )));
            }

            debug!("Agent iteration {}", iterations);

            let request = CreateChatCompletionRequestArgs::default()
                .model(&self.model)
                .messages(messages.clone())
                .tools(tool_definitions())
                .build()
                .map_err(|e| SvarError::Agent(e.to_string()))?;

            let response = self
                .client
                .chat()
                .create(request)
                .await
                .map_err(|e| SvarError::OpenAI(format!("Agent API error: {}", e)))?;

            let choice = response
                .choices
                .first()
                .ok_or_else(|| SvarError::Agent("No response from model".to_string()))?;

            let Some(tool_calls) = choice.message.tool_calls.as_ref().filter(|c| !c.is_empty())
            else {
                // No tool calls - the model is done
                return Ok(choice.message.content.clone().unwrap_or_default());
            };

            let assistant_msg = ChatCompletionRequestAssistantMessageArgs::default()
                .tool_calls(tool_calls.clone())
                .build()
                .map_err(|e| SvarError::Agent(e.to_string()))?;
            messages.push(assistant_msg.into());

            for tool_call in tool_calls {
                let result = self.execute_tool_call(tool_call).await;

                let tool_msg = ChatCompletionRequestToolMessageArgs::default()
                    .tool_call_id(&tool_call.id)
                    .content(result)
                    .build()
                    .map_err(|e| SvarError::Agent(e.to_string()))?;
                messages.push(tool_msg.into());
            }
        }
    }

    /// Execute a single tool call, mapping failures to result text so the
    /// model can decide how to proceed.
    async fn execute_tool_call(&self, tool_call: &ChatCompletionMessageToolCall) -> String {
        let name = &tool_call.function.name;
        let arguments = &tool_call.function.arguments;

        info!("Agent calling tool: {} with args: {}", name, arguments);

        match parse_tool_call(name, arguments) {
            Ok(tool) => match self.tools.execute(&tool).await {
                Ok(output) => output,
                Err(e) => format!("Tool error: {}", e),
            },
            Err(e) => format!("Failed to parse tool call: {}", e),
        }
    }
}

#[async_trait]
impl Answerer for Agent {
    async fn answer(&self, task_id: &str, question: &str) -> Result<String> {
        debug!("Answering task {}", task_id);
        self.run(question).await
    }
}
