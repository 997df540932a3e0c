use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// 单次解析的执行范围：可取消、有截止时间，并携带本次请求使用的 User-Agent。
///
/// 由 `VideoSdk::parse` 从调用方的父令牌派生；父令牌取消或者超时都会让
/// 正在进行的上游请求尽快结束。
#[derive(Debug, Clone)]
pub struct ParseContext {
    token: CancellationToken,
    deadline: Option<Instant>,
    user_agent: String,
}

impl ParseContext {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: None,
            user_agent: user_agent.into(),
        }
    }

    // 从父令牌派生子范围，父级取消会传递下来，子级取消不影响父级
    pub fn child_of(parent: &CancellationToken, timeout: Duration, user_agent: impl Into<String>) -> Self {
        Self {
            token: parent.child_token(),
            deadline: Some(Instant::now() + timeout),
            user_agent: user_agent.into(),
        }
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// 被取消或到达截止时间时返回
    pub async fn done(&self) {
        match self.deadline {
            Some(deadline) => {
                tokio::select! {
                    _ = self.token.cancelled() => {}
                    _ = tokio::time::sleep_until(deadline) => {}
                }
            }
            None => self.token.cancelled().await,
        }
    }
}

impl Default for ParseContext {
    fn default() -> Self {
        Self::new(crate::parser::DEFAULT_USER_AGENT)
    }
}
