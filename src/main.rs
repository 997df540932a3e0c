use std::time::Duration;

use anyhow::{Result, anyhow, bail};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use video_parser_sdk::{
    Endpoints, ParseRequest, ParserRegistry, Platform, SdkConfig, VideoSdk,
    common::logger::PrettyLogger,
    detect_platform, log_error, log_info, log_success, log_warning,
    parser::DEFAULT_USER_AGENT,
};

mod cli;

/// 从命令行参数构建解析请求
fn create_parse_request(args: &cli::Cli) -> Result<ParseRequest> {
    let url = args.url.clone().unwrap_or_default();
    let id = args.id.clone().unwrap_or_default();
    if url.trim().is_empty() && id.trim().is_empty() {
        bail!("--url 或 --id 至少需要提供一个");
    }

    let platform = match &args.platform {
        Some(p) => Platform::new(p.trim()),
        None => detect_platform(&url)
            .or_else(|| detect_platform(&id))
            .ok_or_else(|| anyhow!("无法根据链接判断平台，请使用 --platform 指定"))?,
    };
    debug!("目标平台: {}", platform);

    Ok(ParseRequest::new(platform)
        .with_url(url)
        .with_video_id(id)
        .with_cookie(args.cookie.clone().unwrap_or_default())
        .with_proxy(args.proxy.clone().unwrap_or_default())
        .with_source(args.source))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    // 初始化日志
    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    let config = SdkConfig {
        timeout: Duration::from_secs(args.timeout),
        user_agent: args
            .user_agent
            .clone()
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
    };
    let endpoints = Endpoints {
        douyin: args.douyin_api.clone(),
        kuaishou: args.kuaishou_api.clone(),
        xiaohongshu: args.xiaohongshu_api.clone(),
    };

    let registry = ParserRegistry::with_builtin(&endpoints)?;
    let sdk = VideoSdk::with_registry(registry, config);

    let mut platforms = sdk.supported_platforms();
    platforms.sort();
    let names: Vec<String> = platforms.iter().map(ToString::to_string).collect();
    log_info!("支持的平台: {}", names.join(", "));
    if args.list {
        return Ok(());
    }

    if args.cookie.is_none() {
        log_warning!("未提供Cookie，部分作品可能无法解析");
    }

    let req = create_parse_request(&args)?;
    info!("开始解析: {}", req.platform);

    // Ctrl-C 取消进行中的请求
    let token = CancellationToken::new();
    let ctrl_c_token = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c_token.cancel();
        }
    });

    match sdk.parse_with_token(&req, &token).await {
        Ok(resp) => {
            if let Some(info) = &resp.data {
                PrettyLogger::video_summary(info);
            }
            PrettyLogger::separator();
            println!("{}", serde_json::to_string_pretty(&resp)?);
            log_success!("{}", resp.message);
            Ok(())
        }
        Err(failure) => {
            println!("{}", serde_json::to_string_pretty(&failure.response)?);
            log_error!("{}", failure.error);
            Err(failure.into())
        }
    }
}
