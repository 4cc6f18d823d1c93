use super::{ProviderConfig, ProviderTestSetup};
use social_post_generator::{LLMProvider, OpenAIProvider};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub struct OpenAITestSetup;

#[async_trait::async_trait]
impl ProviderTestSetup for OpenAITestSetup {
    fn get_config() -> ProviderConfig {
        ProviderConfig {
            name: "OpenAI",
            model: "gpt-3.5-turbo",
        }
    }

    fn create_provider(base_url: &str) -> Box<dyn LLMProvider> {
        let provider = OpenAIProvider::new_with_base_url(
            base_url.to_string(),
            Self::get_config().model.to_string(),
        )
        .expect("Failed to create OpenAI provider");
        Box::new(provider)
    }

    async fn mount_reply(mock_server: &MockServer, api_key: &str, prompt: &str, reply: &str) {
        let expected_request = json!({
            "model": "gpt-3.5-turbo",
            "messages": [{"role": "user", "content": prompt}]
        });

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", format!("Bearer {api_key}").as_str()))
            .and(body_json(expected_request))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "chatcmpl-123",
                "object": "chat.completion",
                "model": "gpt-3.5-turbo-0125",
                "choices": [{
                    "index": 0,
                    "message": {"role": "assistant", "content": reply},
                    "finish_reason": "stop"
                }],
                "usage": {"prompt_tokens": 90, "completion_tokens": 40, "total_tokens": 130}
            })))
            .expect(1)
            .mount(mock_server)
            .await;
    }

    async fn mount_failure(mock_server: &MockServer, status: u16, body: &str) {
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(mock_server)
            .await;
    }

    async fn mount_empty(mock_server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{
                    "index": 0,
                    "message": {"role": "assistant", "content": null},
                    "finish_reason": "content_filter"
                }]
            })))
            .mount(mock_server)
            .await;
    }
}
