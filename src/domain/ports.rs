use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Supplies the rendered HTML of a page.
///
/// A browser-automation session plugs in here; `HttpPageSource` is the plain
/// HTTP implementation.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn page_html(&self, url: &str) -> Result<String>;
}
