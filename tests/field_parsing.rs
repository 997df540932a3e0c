use chrono::{Duration, TimeZone, Utc};
use serde_json::json;
use video_parser_sdk::{
    MediaType, Platform, VideoType, detect_platform,
    parser::utils::{
        FieldReader, classify, collect_urls, media_type_for, parse_abbreviated_count, parse_count,
        parse_time_or_now,
    },
};

#[test]
fn test_abbreviated_count() {
    assert_eq!(parse_abbreviated_count("203.7万"), 2_037_000);
    assert_eq!(parse_abbreviated_count("15000"), 15_000);
    assert_eq!(parse_abbreviated_count("1万"), 10_000);
    assert_eq!(parse_abbreviated_count("0.12345万"), 1_234);
    assert_eq!(parse_abbreviated_count(""), 0);
    assert_eq!(parse_abbreviated_count("很多"), 0);
    assert_eq!(parse_abbreviated_count("万"), 0);
    assert_eq!(parse_abbreviated_count("12k"), 0);
}

#[test]
fn test_count_from_json_value() {
    assert_eq!(parse_count(&json!(321)), 321);
    assert_eq!(parse_count(&json!("203.7万")), 2_037_000);
    assert_eq!(parse_count(&json!("88")), 88);
    assert_eq!(parse_count(&json!(null)), 0);
    assert_eq!(parse_count(&json!({"n": 1})), 0);

    let data = json!({"viewCount": "3.5万", "likes": 12});
    let reader = FieldReader::new(&data);
    assert_eq!(reader.count("viewCount"), 35_000);
    assert_eq!(reader.count("likes"), 12);
    assert_eq!(reader.count("missing"), 0);
}

#[test]
fn test_field_reader_defaults() {
    let data = json!({
        "id": 7301234567890123456_u64,
        "title": "hello",
        "width": "1080",
        "nothing": null,
        "list": ["a", 1],
    });
    let reader = FieldReader::new(&data);

    assert_eq!(reader.str("id"), "7301234567890123456");
    assert_eq!(reader.str("title"), "hello");
    assert_eq!(reader.int("width"), 1080);
    assert_eq!(reader.str("nothing"), "");
    assert!(!reader.exists("nothing"));
    assert_eq!(reader.int("absent"), 0);
    assert_eq!(reader.strings("list"), vec!["a".to_string(), "1".to_string()]);
    assert!(reader.strings("title").is_empty());
}

#[test]
fn test_time_layouts_in_order() {
    let layouts = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%SZ", "%Y-%m-%d"];

    let t = parse_time_or_now("2024-03-05 12:30:00", &layouts);
    assert_eq!(t, Utc.with_ymd_and_hms(2024, 3, 5, 12, 30, 0).unwrap());

    let t = parse_time_or_now("2024-03-05T01:02:03Z", &layouts);
    assert_eq!(t, Utc.with_ymd_and_hms(2024, 3, 5, 1, 2, 3).unwrap());

    let t = parse_time_or_now("2024-03-05", &layouts);
    assert_eq!(t, Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap());

    let t = parse_time_or_now("2024-03-05_08:00:00", &["%Y-%m-%d_%H:%M:%S"]);
    assert_eq!(t, Utc.with_ymd_and_hms(2024, 3, 5, 8, 0, 0).unwrap());
}

#[test]
fn test_time_falls_back_to_now() {
    for raw in ["", "   ", "昨天", "2024/03/05"] {
        let before = Utc::now();
        let t = parse_time_or_now(raw, &["%Y-%m-%d %H:%M:%S"]);
        let after = Utc::now();
        assert!(t >= before - Duration::seconds(1) && t <= after + Duration::seconds(1), "{raw:?}");
        assert!(t.timestamp() > 0);
    }
}

#[test]
fn test_collect_urls() {
    assert_eq!(
        collect_urls(Some(&json!("a.mp4 b.mp4"))),
        vec!["a.mp4".to_string(), "b.mp4".to_string()]
    );
    assert_eq!(collect_urls(Some(&json!("a.mp4"))), vec!["a.mp4".to_string()]);
    assert!(collect_urls(Some(&json!(""))).is_empty());
    assert!(collect_urls(None).is_empty());
    assert_eq!(
        collect_urls(Some(&json!(["x.jpg", "y.mp4", "x.jpg"]))),
        vec!["x.jpg".to_string(), "y.mp4".to_string(), "x.jpg".to_string()]
    );
}

#[test]
fn test_media_type_and_classification() {
    let hosts = ["douyinpic.com"];
    assert_eq!(
        media_type_for("https://p3.douyinpic.com/a.webp", &hosts, MediaType::Video),
        MediaType::Image
    );
    assert_eq!(
        media_type_for("https://v26.douyinvod.com/a.mp4", &hosts, MediaType::Video),
        MediaType::Video
    );

    let table = [("视频", VideoType::Video), ("图集", VideoType::Image)];
    assert_eq!(classify("图集", &table, VideoType::Unknown), VideoType::Image);
    assert_eq!(classify("合集", &table, VideoType::Unknown), VideoType::Unknown);
    assert_eq!(classify("合集", &table, VideoType::Video), VideoType::Video);
}

#[test]
fn test_detect_platform() {
    assert_eq!(detect_platform("https://v.douyin.com/iRNBho6u/"), Some(Platform::DOUYIN));
    assert_eq!(
        detect_platform("7.94 复制打开抖音 https://v.douyin.com/iRNBho6u/ 看看"),
        Some(Platform::DOUYIN)
    );
    assert_eq!(
        detect_platform("https://www.kuaishou.com/short-video/3x8abc"),
        Some(Platform::KUAISHOU)
    );
    assert_eq!(detect_platform("http://xhslink.com/a/Abc"), Some(Platform::XIAOHONGSHU));
    assert_eq!(detect_platform("https://notdouyin.com/video/1"), None);
    assert_eq!(detect_platform("not a url"), None);
}
