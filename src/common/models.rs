use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::parser::models::Platform;

// -----------------------------------------------------------------------------------------------

// 作品类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VideoType {
    Video, // 视频
    Image, // 图文 / 图集
    Live,  // 实况
    #[default]
    Unknown,
}

impl fmt::Display for VideoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Video => write!(f, "视频"),
            Self::Image => write!(f, "图文"),
            Self::Live => write!(f, "实况"),
            Self::Unknown => write!(f, "未知"),
        }
    }
}

// 单个下载文件的媒体类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Video, // 视频文件
    Image, // 图片文件
    Gif,   // 动图文件
}

// 下载项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadItem {
    pub url: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
}

impl DownloadItem {
    /// 空链接（或只有空白）返回 `None`，保证 `downloads` 中不会出现空 URL
    pub fn new(url: impl Into<String>, media_type: MediaType) -> Option<Self> {
        let url = url.into();
        let trimmed = url.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            url: trimmed.to_string(),
            media_type,
        })
    }
}

// -----------------------------------------------------------------------------------------------

// 作者信息，缺失字段一律为空字符串 / 0
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorInfo {
    pub uid: String,
    pub sec_uid: String,
    pub unique_id: String,
    pub nickname: String,
    pub avatar: String,
    pub signature: String,
    pub age: i64,
}

// 统计信息
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoStats {
    pub play_count: i64,
    pub like_count: i64,
    pub comment_count: i64,
    pub share_count: i64,
    pub collect_count: i64,
}

// 背景音乐，平台没有时保持默认值
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MusicInfo {
    pub id: String,
    pub title: String,
    pub author: String,
    pub url: String,
}

impl MusicInfo {
    pub fn is_empty(&self) -> bool {
        self.id.is_empty() && self.title.is_empty() && self.author.is_empty() && self.url.is_empty()
    }
}

// -----------------------------------------------------------------------------------------------

/// 各平台解析结果统一后的作品信息。
///
/// 每次请求新建，返回后不再修改。无法确定的可选字段取零值，
/// 只有上游致命错误才会让解析失败。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoInfo {
    // 基础信息
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub video_type: VideoType,
    pub platform: Platform,
    pub url: String,
    pub create_time: DateTime<Utc>,
    pub duration: String,

    // 媒体信息
    pub downloads: Vec<DownloadItem>,
    pub cover_url: String,
    pub width: i64,
    pub height: i64,

    pub author: AuthorInfo,
    pub stats: VideoStats,
    pub music: MusicInfo,

    // 多个来源的标签直接拼接，保留顺序，不去重
    pub tags: Vec<String>,

    // 平台特有的扩展字段
    pub extra: Map<String, Value>,
}

impl VideoInfo {
    pub fn new(platform: Platform) -> Self {
        Self {
            id: String::new(),
            title: String::new(),
            description: String::new(),
            video_type: VideoType::Unknown,
            platform,
            url: String::new(),
            create_time: Utc::now(),
            duration: String::new(),
            downloads: Vec::new(),
            cover_url: String::new(),
            width: 0,
            height: 0,
            author: AuthorInfo::default(),
            stats: VideoStats::default(),
            music: MusicInfo::default(),
            tags: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn push_download(&mut self, url: impl Into<String>, media_type: MediaType) {
        if let Some(item) = DownloadItem::new(url, media_type) {
            self.downloads.push(item);
        }
    }

    pub fn insert_extra(&mut self, key: &str, value: impl Into<Value>) {
        self.extra.insert(key.to_string(), value.into());
    }
}
