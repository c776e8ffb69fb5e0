use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct UploadPhotoRequest {
    pub image_b64: String,
    pub content_type: String,
    #[serde(default)]
    pub caption: Option<String>,
}
