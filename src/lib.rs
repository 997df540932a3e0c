//! 抖音、快手、小红书作品信息解析 SDK。
//!
//! 各平台解析器把上游抓取接口返回的 JSON 统一转换成 [`VideoInfo`]，
//! 由 [`VideoSdk`] 负责按平台分发、超时控制和响应包装。

pub mod common;
pub mod parser;

pub use common::models::{AuthorInfo, DownloadItem, MediaType, MusicInfo, VideoInfo, VideoStats, VideoType};
pub use parser::{
    SdkConfig, VideoSdk,
    context::ParseContext,
    detector::detect_platform,
    errors::{ParseError, ParseFailure},
    models::{ParseRequest, ParseResponse, Platform},
    parser_trait::Parser,
    platforms::{AnyParser, DouyinParser, Endpoints, KuaishouParser, XiaohongshuParser},
    registry::ParserRegistry,
};
