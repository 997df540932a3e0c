use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;
use tracing::warn;

use crate::common::models::{MediaType, VideoType};

// 万
const TEN_THOUSAND_SUFFIX: char = '万';

/// 对上游 JSON 的防御式读取：路径不存在时返回零值，从不报错。
pub struct FieldReader<'a> {
    data: &'a Value,
}

impl<'a> FieldReader<'a> {
    pub fn new(data: &'a Value) -> Self {
        Self { data }
    }

    pub fn get(&self, key: &str) -> Option<&'a Value> {
        match self.data.get(key) {
            Some(Value::Null) | None => None,
            Some(v) => Some(v),
        }
    }

    pub fn exists(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn str(&self, key: &str) -> String {
        self.get(key).map(value_to_string).unwrap_or_default()
    }

    pub fn int(&self, key: &str) -> i64 {
        self.get(key).map(value_to_i64).unwrap_or(0)
    }

    pub fn count(&self, key: &str) -> i64 {
        self.get(key).map(parse_count).unwrap_or(0)
    }

    pub fn strings(&self, key: &str) -> Vec<String> {
        match self.get(key) {
            Some(Value::Array(items)) => items.iter().map(value_to_string).collect(),
            _ => Vec::new(),
        }
    }

    pub fn urls(&self, key: &str) -> Vec<String> {
        collect_urls(self.get(key))
    }
}

// 数字按原样转成文本，对象和数组保留 JSON 文本
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

pub fn value_to_i64(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f as i64))
                .unwrap_or(0)
        }
        Value::Bool(true) => 1,
        _ => 0,
    }
}

/// 解析计数字段：数字直接使用；“203.7万”这类缩写乘以一万后截断；
/// 纯数字字符串直接解析；其余情况一律为 0。
pub fn parse_count(value: &Value) -> i64 {
    match value {
        Value::Number(_) => value_to_i64(value),
        Value::String(s) => parse_abbreviated_count(s),
        _ => 0,
    }
}

pub fn parse_abbreviated_count(raw: &str) -> i64 {
    let raw = raw.trim();
    if raw.contains(TEN_THOUSAND_SUFFIX) {
        let digits = raw.replace(TEN_THOUSAND_SUFFIX, "");
        let digits = digits.trim();
        return scale_decimal(digits, 4)
            .or_else(|| {
                digits
                    .parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(|f| (f * 10000.0) as i64)
            })
            .unwrap_or(0);
    }
    raw.parse::<i64>().unwrap_or(0)
}

// 按十进制精确计算 digits * 10^scale 并截断小数，避免浮点误差
fn scale_decimal(digits: &str, scale: usize) -> Option<i64> {
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, f),
        None => (digits, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !int_part.chars().all(|c| c.is_ascii_digit()) || !frac_part.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let mut frac: String = frac_part.chars().take(scale).collect();
    while frac.len() < scale {
        frac.push('0');
    }
    let int_value: i64 = if int_part.is_empty() { 0 } else { int_part.parse().ok()? };
    let frac_value: i64 = frac.parse().ok()?;
    int_value
        .checked_mul(10_i64.pow(scale as u32))?
        .checked_add(frac_value)
}

/// 依次尝试 `layouts` 中的格式，第一个成功的为准；全部失败或为空时退回当前时间。
pub fn parse_time_or_now(raw: &str, layouts: &[&str]) -> DateTime<Utc> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Utc::now();
    }
    match parse_time(raw, layouts) {
        Some(t) => t,
        None => {
            warn!("无法解析时间 {:?}，使用当前时间", raw);
            Utc::now()
        }
    }
}

pub fn parse_time(raw: &str, layouts: &[&str]) -> Option<DateTime<Utc>> {
    layouts.iter().find_map(|layout| {
        NaiveDateTime::parse_from_str(raw, layout)
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(raw, layout)
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            })
            .map(|naive| naive.and_utc())
    })
}

/// 把上游的下载字段展开成链接列表：数组保持顺序，字符串按空白切分。
pub fn collect_urls(value: Option<&Value>) -> Vec<String> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().map(value_to_string).collect(),
        Some(other) => split_urls(&value_to_string(other)),
    }
}

pub fn split_urls(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}

// 命中图片 CDN 的链接一律视为图片
pub fn media_type_for(url: &str, image_hosts: &[&str], fallback: MediaType) -> MediaType {
    if image_hosts.iter().any(|host| url.contains(host)) {
        MediaType::Image
    } else {
        fallback
    }
}

pub fn classify(label: &str, table: &[(&str, VideoType)], default: VideoType) -> VideoType {
    table
        .iter()
        .find(|(name, _)| *name == label.trim())
        .map(|(_, t)| *t)
        .unwrap_or(default)
}
