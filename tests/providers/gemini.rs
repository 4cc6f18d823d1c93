use super::{ProviderConfig, ProviderTestSetup};
use social_post_generator::{GeminiProvider, LLMProvider};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub struct GeminiTestSetup;

const GENERATE_PATH: &str = "/v1beta/models/gemini-1.5-flash:generateContent";

#[async_trait::async_trait]
impl ProviderTestSetup for GeminiTestSetup {
    fn get_config() -> ProviderConfig {
        ProviderConfig {
            name: "Gemini",
            model: "gemini-1.5-flash",
        }
    }

    fn create_provider(base_url: &str) -> Box<dyn LLMProvider> {
        let provider = GeminiProvider::new_with_base_url(
            base_url.to_string(),
            Self::get_config().model.to_string(),
        )
        .expect("Failed to create Gemini provider");
        Box::new(provider)
    }

    async fn mount_reply(mock_server: &MockServer, api_key: &str, prompt: &str, reply: &str) {
        let expected_request = json!({
            "contents": [{"role": "user", "parts": [{"text": prompt}]}]
        });

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .and(header("x-goog-api-key", api_key))
            .and(body_json(expected_request))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": {"role": "model", "parts": [{"text": reply}]},
                    "finishReason": "STOP",
                    "safetyRatings": []
                }],
                "usageMetadata": {
                    "promptTokenCount": 90,
                    "candidatesTokenCount": 40,
                    "totalTokenCount": 130
                },
                "modelVersion": "gemini-1.5-flash-002"
            })))
            .expect(1)
            .mount(mock_server)
            .await;
    }

    async fn mount_failure(mock_server: &MockServer, status: u16, body: &str) {
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(mock_server)
            .await;
    }

    async fn mount_empty(mock_server: &MockServer) {
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "promptFeedback": {"blockReason": "SAFETY"}
            })))
            .mount(mock_server)
            .await;
    }
}
