use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::info;

use super::{
    errors::ParseError,
    models::Platform,
    parser_trait::Parser,
    platforms::{AnyParser, Endpoints},
};

/// 平台 -> 解析器 的注册表。
///
/// 读多写少，用读写锁保护；并发查询互不阻塞，查询只会看到注册前或注册后的完整绑定。
#[derive(Default)]
pub struct ParserRegistry {
    parsers: RwLock<HashMap<Platform, Arc<dyn Parser>>>,
}

impl ParserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // 注册全部内置平台
    pub fn with_builtin(endpoints: &Endpoints) -> Result<Self, ParseError> {
        let registry = Self::new();
        for parser in AnyParser::builtin(endpoints)? {
            registry.register(Arc::new(parser))?;
        }
        Ok(registry)
    }

    /// 同一平台重复注册时后者覆盖前者
    pub fn register(&self, parser: Arc<dyn Parser>) -> Result<(), ParseError> {
        let platform = parser.platform();
        if platform.is_empty() {
            return Err(ParseError::InvalidAdapter(
                "parser platform cannot be empty".to_string(),
            ));
        }

        info!("注册解析器: {}", platform);
        self.write().insert(platform, parser);
        Ok(())
    }

    pub fn get(&self, platform: &Platform) -> Option<Arc<dyn Parser>> {
        self.read().get(platform).cloned()
    }

    // 顺序不固定
    pub fn platforms(&self) -> Vec<Platform> {
        self.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // 持锁期间不会 panic，中毒的锁直接恢复使用
    fn read(&self) -> RwLockReadGuard<'_, HashMap<Platform, Arc<dyn Parser>>> {
        self.parsers.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<Platform, Arc<dyn Parser>>> {
        self.parsers.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParserRegistry")
            .field("platforms", &self.platforms())
            .finish()
    }
}
