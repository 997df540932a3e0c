use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("网络请求失败: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("请求失败，状态码: {0}")]
    Status(u16),

    #[error("响应解析失败: {0}")]
    InvalidResponse(String),

    // 上游在响应体里明确返回的错误信息
    #[error("API返回错误: {0}")]
    ApiError(String),

    #[error("请求已取消")]
    Cancelled,
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidResponse(e.to_string())
    }
}
