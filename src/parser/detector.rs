use url::Url;

use super::models::Platform;

// 域名后缀 -> 平台
const HOST_SUFFIXES: &[(&str, &str)] = &[
    ("douyin.com", "douyin"),
    ("iesdouyin.com", "douyin"),
    ("kuaishou.com", "kuaishou"),
    ("chenzhongtech.com", "kuaishou"),
    ("xiaohongshu.com", "xiaohongshu"),
    ("xhslink.com", "xiaohongshu"),
];

/// 根据链接域名判断平台。输入可以是分享文案，会取其中第一个链接。
pub fn detect_platform(input: &str) -> Option<Platform> {
    let candidate = input
        .split_whitespace()
        .find(|s| s.starts_with("http://") || s.starts_with("https://"))
        .unwrap_or_else(|| input.trim());

    let url = Url::parse(candidate).ok()?;
    let host = url.host_str()?.to_ascii_lowercase();

    HOST_SUFFIXES
        .iter()
        .find(|(suffix, _)| host == *suffix || host.ends_with(&format!(".{}", suffix)))
        .map(|(_, key)| Platform::new(*key))
}
