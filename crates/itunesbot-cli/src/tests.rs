use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["itunesbot"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_crawl_with_defaults() {
    let cli = Cli::try_parse_from(["itunesbot", "crawl"]).expect("expected valid cli args");
    let Some(Commands::Crawl {
        target,
        max_requests,
        dry_run,
    }) = cli.command
    else {
        panic!("expected crawl command");
    };
    assert_eq!(target.start, DEFAULT_START_URL);
    assert_eq!(target.start_letter, "A");
    assert_eq!(target.end_letter, "Z");
    assert!(!target.popular);
    assert_eq!(max_requests, None);
    assert!(!dry_run);
}

#[test]
fn parses_crawl_with_letter_range() {
    let cli = Cli::try_parse_from([
        "itunesbot",
        "crawl",
        "--start",
        "https://itunes.apple.com/gb/genre/ios-games/id6014?mt=8",
        "--start-letter",
        "C",
        "--end-letter",
        "*",
        "--max-requests",
        "50",
    ])
    .expect("expected valid cli args");
    let Some(Commands::Crawl {
        target,
        max_requests,
        ..
    }) = cli.command
    else {
        panic!("expected crawl command");
    };
    let options = CrawlOptions::from(target);
    assert_eq!(
        options.start,
        "https://itunes.apple.com/gb/genre/ios-games/id6014?mt=8"
    );
    assert_eq!(options.start_letter, "C");
    assert_eq!(options.end_letter, "*");
    assert!(!options.popular);
    assert_eq!(max_requests, Some(50));
}

#[test]
fn parses_crawl_popular_dry_run() {
    let cli = Cli::try_parse_from(["itunesbot", "crawl", "--popular", "--dry-run"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Crawl {
            target: CrawlTarget { popular: true, .. },
            dry_run: true,
            ..
        })
    ));
}

#[test]
fn crawl_rejects_non_numeric_max_requests() {
    assert!(Cli::try_parse_from(["itunesbot", "crawl", "--max-requests", "lots"]).is_err());
}

#[test]
fn parses_extract_command() {
    let cli = Cli::try_parse_from([
        "itunesbot",
        "extract",
        "--file",
        "page.html",
        "--url",
        "https://itunes.apple.com/us/app/x/id1",
    ])
    .expect("expected valid cli args");
    let Some(Commands::Extract { file, url, status }) = cli.command else {
        panic!("expected extract command");
    };
    assert_eq!(file, PathBuf::from("page.html"));
    assert_eq!(url, "https://itunes.apple.com/us/app/x/id1");
    assert_eq!(status, 200);
}

#[test]
fn extract_requires_url() {
    assert!(Cli::try_parse_from(["itunesbot", "extract", "--file", "page.html"]).is_err());
}

#[test]
fn extract_file_builds_record_from_saved_page() {
    let path = std::env::temp_dir().join(format!("itunesbot-extract-{}.html", std::process::id()));
    std::fs::write(
        &path,
        r#"<html lang="en"><head><title>Saved</title></head><body>
<h1 class="product-header__title">Saved App</h1></body></html>"#,
    )
    .unwrap();

    let record =
        crawl::extract_file(&path, "https://itunes.apple.com/fr/app/saved/id77", 200).unwrap();
    std::fs::remove_file(&path).ok();

    assert!(record.is_success());
    assert_eq!(record.name.as_deref(), Some("Saved App"));
    assert_eq!(record.geo.as_deref(), Some("fr"));
    assert_eq!(record.country.as_deref(), Some("France"));
}

#[test]
fn extract_file_with_error_status_is_failed_record() {
    let path = std::env::temp_dir().join(format!("itunesbot-extract-404-{}.html", std::process::id()));
    std::fs::write(&path, "<html></html>").unwrap();

    let record = crawl::extract_file(&path, "https://itunes.apple.com/us/app/x/id1", 404).unwrap();
    std::fs::remove_file(&path).ok();

    assert!(!record.is_success());
}

#[test]
fn extract_file_missing_path_is_error() {
    let path = std::env::temp_dir().join("itunesbot-does-not-exist.html");
    assert!(crawl::extract_file(&path, "https://itunes.apple.com/us/app/x/id1", 200).is_err());
}
