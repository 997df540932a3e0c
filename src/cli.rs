use clap::Parser;

/// 短视频作品信息解析工具
#[derive(Parser, Debug)]
#[command(name = "vparse")]
#[command(version = "0.1")]
#[command(author = "rpeng252@gmail.com")]
#[command(about = "解析抖音/快手/小红书作品信息", long_about = None)]
pub struct Cli {
    /// 作品链接 (支持分享短链接)
    #[arg(long, value_name = "URL")]
    #[arg(value_hint = clap::ValueHint::Url)]
    pub url: Option<String>,

    /// 作品ID
    #[arg(long, value_name = "ID")]
    pub id: Option<String>,

    /// 平台: douyin / kuaishou / xiaohongshu，省略时根据链接判断
    #[arg(long, value_name = "PLATFORM")]
    pub platform: Option<String>,

    /// Cookie字符串 (可选)
    #[arg(long, value_name = "COOKIE")]
    pub cookie: Option<String>,

    /// 上游服务使用的代理地址 (可选)
    #[arg(long, value_name = "PROXY")]
    pub proxy: Option<String>,

    /// 让上游返回原始数据
    #[arg(long)]
    pub source: bool,

    /// 请求超时（秒）
    #[arg(long, value_name = "SECONDS", default_value_t = 30)]
    pub timeout: u64,

    #[arg(long, value_name = "UA")]
    pub user_agent: Option<String>,

    #[arg(long, value_name = "ADDR", default_value = "http://localhost:5555")]
    pub douyin_api: String,

    #[arg(long, value_name = "ADDR", default_value = "http://localhost:5557")]
    pub kuaishou_api: String,

    #[arg(long, value_name = "ADDR", default_value = "http://localhost:5556")]
    pub xiaohongshu_api: String,

    /// 只列出支持的平台
    #[arg(long)]
    pub list: bool,

    /// 输出调试日志
    #[arg(short, long)]
    pub verbose: bool,
}
