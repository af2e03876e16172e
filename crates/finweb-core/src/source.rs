//! Where dependent options come from

use crate::error::LoadError;
use crate::types::SelectOption;
use async_trait::async_trait;
use std::sync::Arc;

/// Fetches the child options of a parent id
#[async_trait]
pub trait OptionSource: Send + Sync {
    async fn fetch(&self, parent_id: &str) -> Result<Vec<SelectOption>, LoadError>;
}

#[async_trait]
impl<S: OptionSource + ?Sized> OptionSource for Arc<S> {
    async fn fetch(&self, parent_id: &str) -> Result<Vec<SelectOption>, LoadError> {
        (**self).fetch(parent_id).await
    }
}

/// Decode a response body into options, preserving server order
pub fn parse_options(body: &str) -> Result<Vec<SelectOption>, LoadError> {
    serde_json::from_str(body).map_err(|e| LoadError::MalformedResponse {
        message: e.to_string(),
    })
}
