use crate::domain::model::RawInput;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Transport-side view of one request.
#[async_trait]
pub trait RequestSource: Send + Sync {
    fn query_param(&self, key: &str) -> Option<&str>;

    /// `Ok(None)` when the request carries no body at all.
    async fn read_body(&self) -> Result<Option<Vec<u8>>>;
}

pub trait ConfigProvider: Send + Sync {
    fn culture(&self) -> &str;
    fn preserve_uppercase_words(&self) -> bool;
}

#[async_trait]
impl RequestSource for RawInput {
    fn query_param(&self, key: &str) -> Option<&str> {
        self.query().get(key).map(String::as_str)
    }

    async fn read_body(&self) -> Result<Option<Vec<u8>>> {
        Ok(self.body().map(<[u8]>::to_vec))
    }
}
