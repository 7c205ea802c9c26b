//! Upstream request and response shapes.

use pixmorph_core::prompt::render_instruction;
use serde::{Deserialize, Serialize};

/// JSON pointer to the generated image in a chat-completion response.
pub const IMAGE_URL_POINTER: &str = "/choices/0/message/images/0/image_url/url";

/// Body of the upstream chat-completion call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    /// Output modalities requested from the model.
    pub modalities: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: Vec<ContentPart>,
}

/// One segment of a multimodal message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageUrl {
    pub url: String,
}

impl ChatRequest {
    /// Build the single-user-message request for `prompt` over `images`.
    ///
    /// The content holds the rendered instruction first, then one
    /// `image_url` part per image in input order.
    pub fn for_generation(model: &str, prompt: &str, images: &[String]) -> Self {
        let content = std::iter::once(ContentPart::Text {
            text: render_instruction(prompt, images.len()),
        })
        .chain(images.iter().map(|url| ContentPart::ImageUrl {
            image_url: ImageUrl { url: url.clone() },
        }))
        .collect();

        Self {
            model: model.to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content,
            }],
            modalities: vec!["image".to_string(), "text".to_string()],
        }
    }
}

/// Pull the generated image URL out of an upstream response body.
///
/// Returns `None` when the path is missing, not a string, or empty.
pub fn extract_image_url(body: &serde_json::Value) -> Option<String> {
    body.pointer(IMAGE_URL_POINTER)
        .and_then(serde_json::Value::as_str)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn images(n: usize) -> Vec<String> {
        (0..n)
            .map(|i| format!("data:image/png;base64,IMG{i}"))
            .collect()
    }

    #[test]
    fn content_has_text_then_images_in_order() {
        for n in 1..=4 {
            let input = images(n);
            let req = ChatRequest::for_generation("m", "do it", &input);
            let content = &req.messages[0].content;

            assert_eq!(content.len(), 1 + n);
            assert!(matches!(&content[0], ContentPart::Text { text } if text.contains("do it")));
            for (i, part) in content[1..].iter().enumerate() {
                assert_eq!(
                    part,
                    &ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: input[i].clone()
                        }
                    }
                );
            }
        }
    }

    #[test]
    fn serializes_to_chat_completion_shape() {
        let req = ChatRequest::for_generation("google/model", "p", &images(1));
        let json = serde_json::to_value(&req).unwrap();

        assert_eq!(json["model"], "google/model");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"][0]["type"], "text");
        assert_eq!(json["messages"][0]["content"][1]["type"], "image_url");
        assert_eq!(
            json["messages"][0]["content"][1]["image_url"]["url"],
            "data:image/png;base64,IMG0"
        );
        assert_eq!(json["modalities"], json!(["image", "text"]));
    }

    #[test]
    fn extracts_nested_url() {
        let body = json!({
            "choices": [{
                "message": {
                    "images": [{ "image_url": { "url": "https://cdn/result.png" } }]
                }
            }]
        });
        assert_eq!(extract_image_url(&body).as_deref(), Some("https://cdn/result.png"));
    }

    #[test]
    fn missing_or_empty_url_is_none() {
        assert!(extract_image_url(&json!({})).is_none());
        assert!(extract_image_url(&json!({"choices": []})).is_none());
        assert!(extract_image_url(&json!({
            "choices": [{ "message": { "content": "I cannot do that" } }]
        }))
        .is_none());
        assert!(extract_image_url(&json!({
            "choices": [{ "message": { "images": [{ "image_url": { "url": "" } }] } }]
        }))
        .is_none());
    }
}
