use colored::*;

use crate::common::models::VideoInfo;

/// 漂亮的终端输出工具
pub struct PrettyLogger;

impl PrettyLogger {
    /// 显示成功消息
    pub fn success(message: impl AsRef<str>) {
        println!("{} {}", "✓".green().bold(), message.as_ref());
    }

    /// 显示信息消息
    pub fn info(message: impl AsRef<str>) {
        println!("{} {}", "ℹ".blue().bold(), message.as_ref());
    }

    pub fn warning(message: impl AsRef<str>) {
        println!("{} {}", "⚠".yellow().bold(), message.as_ref());
    }

    pub fn error(message: impl AsRef<str>) {
        eprintln!("{} {}", "✗".red().bold(), message.as_ref());
    }

    /// 显示分割线
    pub fn separator() {
        println!("{}", "─".repeat(50).bright_black());
    }

    /// 显示作品摘要
    pub fn video_summary(info: &VideoInfo) {
        println!(
            "{} {} [{} / {}]",
            "🎬".magenta().bold(),
            info.title.bold(),
            info.platform.to_string().cyan(),
            info.video_type
        );
        println!("{} {} ({})", "👤".green().bold(), info.author.nickname, info.author.uid);
        println!(
            "{} 播放 {}  点赞 {}  评论 {}  分享 {}  收藏 {}",
            "📊".blue().bold(),
            info.stats.play_count,
            info.stats.like_count,
            info.stats.comment_count,
            info.stats.share_count,
            info.stats.collect_count
        );
        for item in &info.downloads {
            println!("  {} {:?} {}", "⬇".blue().bold(), item.media_type, item.url);
        }
    }
}

#[macro_export]
macro_rules! log_success {
    ($($arg:tt)*) => {
        $crate::common::logger::PrettyLogger::success(format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::common::logger::PrettyLogger::info(format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warning {
    ($($arg:tt)*) => {
        $crate::common::logger::PrettyLogger::warning(format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::common::logger::PrettyLogger::error(format!($($arg)*))
    };
}
