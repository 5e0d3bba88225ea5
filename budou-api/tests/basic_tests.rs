//! Basic tests for budou-api

use budou_api::*;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/recorded.json")
}

fn syntax_config() -> ConfigBuilder {
    Config::builder()
        .segmenter(SegmenterKind::Syntax)
        .recordings(fixture_path())
}

#[test]
fn test_parse_convenience() {
    let output = parse("今日は晴れ。").unwrap();

    assert_eq!(output.words(), vec!["今日は", "晴れ。"]);
    assert_eq!(
        output.html_code,
        "<span><span class=\"ww\">今日は</span><span class=\"ww\">晴れ。</span></span>"
    );
}

#[test]
fn test_syntax_parser_from_recordings() {
    let config = syntax_config().classname("w").build().unwrap();
    let parser = Parser::from_config(config).unwrap();
    let output = parser.parse("Google Home を使った。").unwrap();

    assert_eq!(output.words(), vec!["Google ", "Home を", "使った。"]);
    assert_eq!(
        output.html_code,
        "<span>Google <span class=\"w\">Home を</span><span class=\"w\">使った。</span></span>"
    );
}

#[test]
fn test_entity_grouping() {
    let plain = Parser::from_config(syntax_config().build().unwrap()).unwrap();
    assert_eq!(
        plain.parse("東京タワーに行った。").unwrap().words(),
        vec!["東京", "タワーに", "行った。"]
    );

    let grouped =
        Parser::from_config(syntax_config().use_entity(true).build().unwrap()).unwrap();
    assert_eq!(
        grouped.parse("東京タワーに行った。").unwrap().words(),
        vec!["東京タワーに", "行った。"]
    );
}

#[test]
fn test_with_service() {
    let service = RecordedService::from_path(fixture_path()).unwrap();
    let config = Config::builder()
        .segmenter(SegmenterKind::Syntax)
        .build()
        .unwrap();
    let parser = Parser::with_service(config, Arc::new(service)).unwrap();
    assert_eq!(parser.segmenter_name(), "syntax");
    assert!(parser.parse("東京タワーに行った。").is_ok());
}

#[test]
fn test_syntax_without_service_is_config_error() {
    let config = Config::builder()
        .segmenter(SegmenterKind::Syntax)
        .build()
        .unwrap();
    assert!(matches!(
        Parser::from_config(config),
        Err(ApiError::Config(_))
    ));
}

#[test]
fn test_unsupported_language_rejected_at_construction() {
    let config = Config::builder().language("ko").unwrap().build().unwrap();
    assert!(matches!(
        Parser::from_config(config),
        Err(ApiError::Engine(_))
    ));
}

#[test]
fn test_breaks_and_policies() {
    let output = parse("今日は 晴れ").unwrap();
    assert_eq!(output.words(), vec!["今日は", "\n", "晴れ"]);
    assert_eq!(
        output.html_code,
        "<span><span class=\"ww\">今日は</span>\n<span class=\"ww\">晴れ</span></span>"
    );

    let config = Config::builder().wbr().build().unwrap();
    let output = Parser::from_config(config).unwrap().parse("今日は 晴れ").unwrap();
    assert_eq!(
        output.html_code,
        "<span><span class=\"ww\">今日は</span><wbr><span class=\"ww\">晴れ</span></span>"
    );
}

#[test]
fn test_max_length() {
    let config = Config::builder().max_length(Some(2)).build().unwrap();
    let output = Parser::from_config(config).unwrap().parse("今日は晴れ。").unwrap();
    assert_eq!(output.html_code, "<span>今日は晴れ。</span>");
}

#[test]
fn test_markup_input_is_preprocessed() {
    let output = parse("<p>今日は\n<b>晴れ</b>。</p>").unwrap();
    assert_eq!(output.words(), vec!["今日は", "晴れ。"]);
}

#[test]
fn test_bare_angle_brackets_survive() {
    let output = parse("値は 1 < 2 です。<b>3 > 2</b>").unwrap();
    assert_eq!(output.chunks.normalized_text(), "値は 1 < 2 です。3 > 2");
    assert!(output.html_code.contains("&lt;"));
    assert!(output.html_code.contains("&gt;"));
}

#[test]
fn test_inline_style_attributes() {
    let config = Config::builder()
        .classname("a,b")
        .inline_style(true)
        .build()
        .unwrap();
    let output = Parser::from_config(config).unwrap().parse("晴れ").unwrap();
    assert_eq!(
        output.html_code,
        "<span><span class=\"a b\" style=\"display:inline-block\">晴れ</span></span>"
    );
}

#[test]
fn test_empty_source() {
    let output = parse("   ").unwrap();
    assert!(output.chunks.is_empty());
    assert_eq!(output.html_code, "<span></span>");
}

#[test]
fn test_parse_cached_memory() {
    let parser = Parser::new().unwrap();
    let mut cache = MemoryCache::new();

    let first = parser.parse_cached("今日は晴れ。", &mut cache).unwrap();
    assert_eq!(cache.len(), 1);
    let second = parser.parse_cached("今日は晴れ。", &mut cache).unwrap();
    assert_eq!(cache.len(), 1);
    assert_eq!(first, second);
    assert_eq!(first, parser.parse("今日は晴れ。").unwrap());
}

#[test]
fn test_cache_key_depends_on_options() {
    let plain = Parser::new().unwrap();
    let wbr = Parser::from_config(Config::builder().wbr().build().unwrap()).unwrap();

    assert_eq!(
        plain.cache_key("今日は晴れ。").unwrap(),
        plain.cache_key(" 今日は\n晴れ。").unwrap()
    );
    assert_ne!(
        plain.cache_key("今日は晴れ。").unwrap(),
        wbr.cache_key("今日は晴れ。").unwrap()
    );
}

#[test]
fn test_parse_cached_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("budou-cache.json");
    let parser = Parser::new().unwrap();

    let output = {
        let mut cache = FileCache::open(&path).unwrap();
        parser.parse_cached("今日は晴れ。", &mut cache).unwrap()
    };

    let cache = FileCache::open(&path).unwrap();
    let key = parser.cache_key("今日は晴れ。").unwrap();
    assert_eq!(cache.get(&key).unwrap(), Some(output));
}

#[test]
fn test_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("budou.toml");
    std::fs::write(
        &path,
        format!(
            "segmenter = \"nlapi\"\nclassname = \"w\"\nuse_entity = true\nrecordings = {:?}\n",
            fixture_path().display().to_string()
        ),
    )
    .unwrap();

    let output = parse_with_config_file("東京タワーに行った。", &path).unwrap();
    assert_eq!(
        output.html_code,
        "<span><span class=\"w\">東京タワーに</span><span class=\"w\">行った。</span></span>"
    );
}

#[test]
fn test_report_json() {
    let output = parse("今日は晴れ。").unwrap();
    let report = output.report();
    assert_eq!(report.chunks.len(), 2);
    assert!(report.chunks.iter().all(|c| c.has_cjk));

    let json = report.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["chunks"][0]["word"], "今日は");
    assert_eq!(value["chunks"][0]["dependency"], serde_json::Value::Null);
}

#[test]
fn test_error_conversions() {
    use std::io;

    let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let api_error: ApiError = io_error.into();

    match api_error {
        ApiError::Io(_) => (), // Expected
        _ => panic!("Wrong error type"),
    }
}
