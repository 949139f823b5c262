use saflix_config::SaflixConfigLoader;
use serial_test::serial;
use std::{fs, path::PathBuf};
use tempfile::TempDir;

/// Helper to write a YAML file in a temp dir and return its path.
fn write_yaml(tmp: &TempDir, name: &str, yaml: &str) -> PathBuf {
    let p = tmp.path().join(name);
    fs::write(&p, yaml).expect("write yaml");
    p
}

#[test]
#[serial]
fn test_config_load() {
    let tmp = TempDir::new().unwrap();

    let file_yaml = r#"
version: "1"
site:
  base_url: "https://www.4khotvideo.com"
server:
  host: "127.0.0.1"
  port: 9090
browser:
  webdriver_url: "${SAFLIX_TEST_WEBDRIVER}"
  headless: true
  stealth: maximum
  navigation_timeout_secs: 15
"#;
    let p = write_yaml(&tmp, "saflix.yaml", file_yaml);

    temp_env::with_var(
        "SAFLIX_TEST_WEBDRIVER",
        Some("http://chromedriver:4444"),
        || {
            let config = SaflixConfigLoader::new()
                .with_file(&p)
                .load()
                .expect("load system config");

            assert_eq!(config.server.port, 9090);
            assert_eq!(config.browser.webdriver_url, "http://chromedriver:4444");
            assert_eq!(config.browser.navigation_timeout_secs, 15);
        },
    );
}

#[test]
#[serial]
fn test_missing_file_falls_back_to_defaults() {
    let tmp = TempDir::new().unwrap();

    let config = SaflixConfigLoader::new()
        .with_file(tmp.path().join("does-not-exist.yaml"))
        .load()
        .expect("defaults apply without a file");

    assert_eq!(config.site.base_url, "https://www.4khotvideo.com");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.browser.navigation_timeout_secs, 30);
}
