use httpmock::prelude::*;
use profile_etl::utils::logger::LogFormat;
use profile_etl::{CliConfig, EtlEngine, EtlError, LocalStorage, ProfilePipeline};
use tempfile::TempDir;

fn cli_config(server: &MockServer, output_path: String) -> CliConfig {
    CliConfig {
        profile_url: "https://www.linkedin.com/in/janedoe/".to_string(),
        api_endpoint: server.url("/proxycurl/api/v2/linkedin"),
        api_key: Some("integration-key".to_string()),
        output_path,
        table_file: "linkedin_profile_data.csv".to_string(),
        parameters: vec![],
        timeout_seconds: Some(10),
        skip_images: false,
        save_json: false,
        verbose: false,
        monitor: false,
        log_format: LogFormat::Compact,
    }
}

#[tokio::test]
async fn test_end_to_end_profile_etl() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/proxycurl/api/v2/linkedin")
            .header("Authorization", "Bearer integration-key")
            .query_param("linkedin_profile_url", "https://www.linkedin.com/in/janedoe/");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "full_name": "Jane Doe",
                "first_name": "Jane",
                "last_name": "Doe",
                "connections": 42,
                "profile_pic_url": server.url("/images/jane.jpg"),
                "background_cover_image_url": "",
                "education": [{"school": "NTU", "starts_at": {"year": 2008}}],
                "accomplishment_projects": [{"title": "ETL"}]
            }));
    });
    let image_mock = server.mock(|when, then| {
        when.method(GET).path("/images/jane.jpg");
        then.status(200).body("jpeg-bytes");
    });

    let config = cli_config(&server, output_path.clone());
    let storage = LocalStorage::new(output_path.clone());
    let engine = EtlEngine::new_with_monitoring(ProfilePipeline::new(storage, config), false);

    let result = engine.run().await.unwrap();

    api_mock.assert();
    image_mock.assert();
    assert!(result.ends_with("linkedin_profile_data.csv"));

    let image = std::fs::read(temp_dir.path().join("Jane_Doe/profile_pic.jpg")).unwrap();
    assert_eq!(image, b"jpeg-bytes".to_vec());
    assert!(!temp_dir.path().join("Jane_Doe/background_cover.jpg").exists());

    let table = std::fs::read(temp_dir.path().join("linkedin_profile_data.csv")).unwrap();
    let mut reader = csv::Reader::from_reader(table.as_slice());
    let headers = reader.headers().unwrap().clone();
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 1);

    let column = |name: &str| headers.iter().position(|h| h == name).unwrap();
    assert_eq!(&rows[0][column("Full Name")], "Jane Doe");
    assert_eq!(&rows[0][column("Connections")], "42");
    assert_eq!(&rows[0][column("Education")], r#"["NTU"]"#);
    assert_eq!(&rows[0][column("Projects")], r#"["ETL"]"#);
    assert_eq!(&rows[0][column("Follower Count")], "");
}

#[tokio::test]
async fn test_second_run_appends_row() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/proxycurl/api/v2/linkedin");
        then.status(200)
            .json_body(serde_json::json!({"full_name": "Jane Doe"}));
    });

    for _ in 0..2 {
        let mut config = cli_config(&server, output_path.clone());
        config.skip_images = true;
        let storage = LocalStorage::new(output_path.clone());
        let engine = EtlEngine::new(ProfilePipeline::new(storage, config));
        engine.run().await.unwrap();
    }

    api_mock.assert_hits(2);

    let table = std::fs::read(temp_dir.path().join("linkedin_profile_data.csv")).unwrap();
    let mut reader = csv::Reader::from_reader(table.as_slice());
    assert_eq!(reader.records().count(), 2);
}

#[tokio::test]
async fn test_profile_not_found_still_writes_default_row() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/proxycurl/api/v2/linkedin");
        then.status(404);
    });

    let config = cli_config(&server, output_path.clone());
    let storage = LocalStorage::new(output_path.clone());
    let engine = EtlEngine::new(ProfilePipeline::new(storage, config));

    engine.run().await.unwrap();

    let table = std::fs::read(temp_dir.path().join("linkedin_profile_data.csv")).unwrap();
    let mut reader = csv::Reader::from_reader(table.as_slice());
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(&rows[0][0], "");
    // 空名稱的圖片資料夾不應被建立
    assert!(!temp_dir.path().join("unknown_profile").exists());
}

#[tokio::test]
async fn test_unauthorized_response_fails_run() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/proxycurl/api/v2/linkedin");
        then.status(401);
    });

    let config = cli_config(&server, output_path.clone());
    let storage = LocalStorage::new(output_path.clone());
    let engine = EtlEngine::new(ProfilePipeline::new(storage, config));

    let err = engine.run().await.unwrap_err();
    assert!(matches!(err, EtlError::HttpStatusError { status: 401, .. }));
    assert_eq!(err.severity().exit_code(), 1);
    assert!(!temp_dir.path().join("linkedin_profile_data.csv").exists());
}
