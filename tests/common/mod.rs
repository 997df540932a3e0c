#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use video_parser_sdk::{
    ParseContext, ParseError, ParseRequest, Parser, Platform, VideoInfo,
    common::api::{client::Transport, error::ApiError},
};

pub const BASE_URL: &str = "http://upstream.test";

// 按路径后缀返回预设响应，并记录每次调用
#[derive(Default)]
pub struct ScriptedTransport {
    responses: HashMap<String, Result<Value, u16>>,
    calls: Mutex<Vec<(String, Value)>>,
    user_agents: Mutex<Vec<String>>,
    delay: Option<Duration>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, path: &str, body: Value) -> Self {
        self.responses.insert(path.to_string(), Ok(body));
        self
    }

    pub fn fail(mut self, path: &str, status: u16) -> Self {
        self.responses.insert(path.to_string(), Err(status));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }

    // 每次调用时上下文携带的 User-Agent
    pub fn user_agents(&self) -> Vec<String> {
        self.user_agents.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .map(|(url, _)| url.trim_start_matches(BASE_URL).to_string())
            .collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn post_json(&self, url: &str, body: &Value, ctx: &ParseContext) -> Result<Value, ApiError> {
        self.calls.lock().unwrap().push((url.to_string(), body.clone()));
        self.user_agents.lock().unwrap().push(ctx.user_agent().to_string());

        if let Some(delay) = self.delay {
            tokio::select! {
                _ = ctx.done() => return Err(ApiError::Cancelled),
                _ = tokio::time::sleep(delay) => {}
            }
        }

        let path = url.trim_start_matches(BASE_URL);
        match self.responses.get(path) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(status)) => Err(ApiError::Status(*status)),
            None => Err(ApiError::Status(404)),
        }
    }
}

// 记录调用次数的假解析器
pub struct CountingParser {
    pub platform: Platform,
    pub validations: AtomicUsize,
    pub parses: AtomicUsize,
    pub delay: Option<Duration>,
    pub reject: bool,
}

impl CountingParser {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            validations: AtomicUsize::new(0),
            parses: AtomicUsize::new(0),
            delay: None,
            reject: false,
        }
    }

    pub fn validations(&self) -> usize {
        self.validations.load(Ordering::SeqCst)
    }

    pub fn parses(&self) -> usize {
        self.parses.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Parser for CountingParser {
    fn platform(&self) -> Platform {
        self.platform.clone()
    }

    fn validate_request(&self, req: &ParseRequest) -> Result<(), ParseError> {
        self.validations.fetch_add(1, Ordering::SeqCst);
        if self.reject {
            return Err(ParseError::Validation("cookie 不能为空".to_string()));
        }
        video_parser_sdk::parser::parser_trait::validate_common(&self.platform, req)
    }

    fn extract_video_id(&self, url: &str) -> Result<String, ParseError> {
        Ok(url.to_string())
    }

    async fn parse_video(&self, _req: &ParseRequest, _ctx: &ParseContext) -> Result<VideoInfo, ParseError> {
        self.parses.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let mut info = VideoInfo::new(Platform::new("wrong"));
        info.id = "42".to_string();
        Ok(info)
    }
}
