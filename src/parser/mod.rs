use std::sync::{Arc, RwLock};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use context::ParseContext;
use errors::{ParseError, ParseFailure};
use models::{ParseRequest, ParseResponse, Platform};
use parser_trait::Parser;
use registry::ParserRegistry;

pub mod context;
pub mod detector;
pub mod errors;
pub mod models;
pub mod parser_trait;
pub mod platforms;
pub mod registry;
pub mod utils;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/139.0.0.0 Safari/537.36";

// SDK 运行时配置，构建后仍可修改
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdkConfig {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// 解析入口：按平台找到解析器，校验请求，在超时范围内调用并包装成统一响应。
///
/// 每个进程构建一次，通过引用共享；不做重试，也不缓存结果。
#[derive(Debug, Default)]
pub struct VideoSdk {
    registry: ParserRegistry,
    config: RwLock<SdkConfig>,
}

impl VideoSdk {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SdkConfig) -> Self {
        Self {
            registry: ParserRegistry::new(),
            config: RwLock::new(config),
        }
    }

    pub fn with_registry(registry: ParserRegistry, config: SdkConfig) -> Self {
        Self {
            registry,
            config: RwLock::new(config),
        }
    }

    pub fn register_parser(&self, parser: Arc<dyn Parser>) -> Result<(), ParseError> {
        self.registry.register(parser)
    }

    pub fn supported_platforms(&self) -> Vec<Platform> {
        self.registry.platforms()
    }

    pub fn set_timeout(&self, timeout: Duration) {
        self.config.write().unwrap_or_else(|e| e.into_inner()).timeout = timeout;
    }

    pub fn set_user_agent(&self, user_agent: impl Into<String>) {
        self.config.write().unwrap_or_else(|e| e.into_inner()).user_agent = user_agent.into();
    }

    pub fn timeout(&self) -> Duration {
        self.config().timeout
    }

    pub fn user_agent(&self) -> String {
        self.config().user_agent
    }

    pub fn config(&self) -> SdkConfig {
        self.config.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub async fn parse(&self, req: &ParseRequest) -> Result<ParseResponse, ParseFailure> {
        self.parse_with_token(req, &CancellationToken::new()).await
    }

    /// 在 `parent` 派生出的可取消范围内解析。父令牌取消或超时都会中止上游请求。
    pub async fn parse_with_token(
        &self,
        req: &ParseRequest,
        parent: &CancellationToken,
    ) -> Result<ParseResponse, ParseFailure> {
        if req.platform.is_empty() {
            warn!("请求缺少平台");
            return Err(ParseError::InvalidRequest("platform is required".to_string()).into());
        }

        let parser = self.registry.get(&req.platform).ok_or_else(|| {
            warn!("平台 {} 未注册解析器", req.platform);
            ParseError::UnsupportedPlatform(req.platform.clone())
        })?;

        parser.validate_request(req).map_err(|e| match e {
            ParseError::Validation(_) => e,
            other => ParseError::Validation(other.to_string()),
        })?;

        let SdkConfig { timeout, user_agent } = self.config();
        let ctx = ParseContext::child_of(parent, timeout, user_agent);
        debug!("开始解析 {}，超时 {:?}", req.platform, timeout);

        let result = tokio::select! {
            _ = ctx.done() => Err(ParseError::Timeout),
            result = parser.parse_video(req, &ctx) => result,
        };
        // 结束本次范围，释放仍在等待的子任务
        ctx.cancel();

        match result {
            Ok(mut info) => {
                // 平台以请求为准
                info.platform = req.platform.clone();
                info!("解析成功: {} {}", info.platform, info.id);
                Ok(ParseResponse::success(info))
            }
            Err(e) => {
                error!("解析失败: {} {}", req.platform, e);
                Err(e.into())
            }
        }
    }
}
