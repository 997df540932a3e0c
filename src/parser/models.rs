use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

use crate::common::models::VideoInfo;

/// 平台标识。
///
/// 内置平台使用关联常量，其它值（包括空字符串）也可以出现在请求里，
/// 由注册表和解析器去判断是否支持。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Platform(Cow<'static, str>);

impl Platform {
    pub const DOUYIN: Platform = Platform(Cow::Borrowed("douyin")); // 抖音
    pub const KUAISHOU: Platform = Platform(Cow::Borrowed("kuaishou")); // 快手
    pub const XIAOHONGSHU: Platform = Platform(Cow::Borrowed("xiaohongshu")); // 小红书
    pub const BILIBILI: Platform = Platform(Cow::Borrowed("bilibili")); // B站（预留）
    pub const YOUTUBE: Platform = Platform(Cow::Borrowed("youtube")); // YouTube（预留）

    pub fn new(key: impl Into<String>) -> Self {
        Self(Cow::Owned(key.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self(Cow::Borrowed(""))
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Platform {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

// 解析请求参数
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseRequest {
    pub platform: Platform,
    #[serde(default)]
    pub video_id: String, // 作品ID，部分平台这里本身就是链接
    #[serde(default)]
    pub url: String, // 作品链接
    #[serde(default)]
    pub cookie: String,
    #[serde(default)]
    pub proxy: String, // 由上游服务使用的代理地址
    #[serde(default)]
    pub source: bool, // 是否让上游返回原始数据
}

impl ParseRequest {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            ..Default::default()
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_video_id(mut self, video_id: impl Into<String>) -> Self {
        self.video_id = video_id.into();
        self
    }

    pub fn with_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.cookie = cookie.into();
        self
    }

    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = proxy.into();
        self
    }

    pub fn with_source(mut self, source: bool) -> Self {
        self.source = source;
        self
    }

    pub fn has_target(&self) -> bool {
        !self.video_id.trim().is_empty() || !self.url.trim().is_empty()
    }
}

/// 统一响应信封。`success` 为真时只有 `data`，为假时只有 `error`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<VideoInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub time: DateTime<Utc>,
}

impl ParseResponse {
    pub fn success(data: VideoInfo) -> Self {
        Self {
            success: true,
            message: "解析成功".to_string(),
            data: Some(data),
            error: None,
            time: Utc::now(),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: "解析失败".to_string(),
            data: None,
            error: Some(error.into()),
            time: Utc::now(),
        }
    }
}
