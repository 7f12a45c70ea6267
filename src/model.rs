//! Provider dispatch for the configured generative model.

use reqwest::Client;

use crate::error::Error;
use crate::providers::dummy::DummyProvider;
use crate::providers::google_ai_studio_gemini::GoogleAIStudioGeminiProvider;

/// Whether the prompt expects a JSON object back. When on, providers that
/// support a structured-output constraint request it; the brace-scanning
/// extraction in `output` remains as a compatibility shim either way.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum JsonMode {
    On,
    Off,
}

#[derive(Debug)]
pub enum GenerativeModel {
    GoogleAIStudioGemini(GoogleAIStudioGeminiProvider),
    Dummy(DummyProvider),
}

impl GenerativeModel {
    /// Sends a single prompt and returns the raw text completion.
    pub async fn generate(
        &self,
        http_client: &Client,
        prompt: &str,
        json_mode: JsonMode,
    ) -> Result<String, Error> {
        match self {
            GenerativeModel::GoogleAIStudioGemini(provider) => {
                provider.generate(http_client, prompt, json_mode).await
            }
            GenerativeModel::Dummy(provider) => provider.generate(prompt, json_mode).await,
        }
    }
}
