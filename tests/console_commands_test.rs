use atm_mapper_console::app::console::{run_clients, run_mappings};
use atm_mapper_console::config::cli::{ClientsCommand, MappingsCommand, PageArgs};
use atm_mapper_console::ConsoleApi;
use httpmock::prelude::*;
use serde_json::json;

fn first_page() -> PageArgs {
    PageArgs {
        page: 1,
        per_page: None,
    }
}

fn harbor_bank() -> serde_json::Value {
    json!({
        "clientId": 5,
        "clientName": "Harbor Bank",
        "isoVersion": "1993",
        "encoding": "ASCII",
        "bitmapType": "HEX",
        "active": "Y"
    })
}

#[tokio::test]
async fn test_delete_without_yes_leaves_client_alone() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/clients");
            then.status(200)
                .json_body(json!({"success": true, "data": [harbor_bank()]}));
        })
        .await;
    let delete = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/api/v1/clients/5");
            then.status(200).json_body(json!({"success": true}));
        })
        .await;

    let api = ConsoleApi::new(server.url("/api/v1")).unwrap();
    let output = run_clients(
        &api,
        ClientsCommand::Delete {
            id: "5".to_string(),
            yes: false,
        },
        10,
    )
    .await
    .unwrap();

    assert!(output.contains("Harbor Bank will be removed permanently"));
    assert!(output.contains("Re-run with --yes"));
    assert_eq!(delete.hits_async().await, 0);
}

#[tokio::test]
async fn test_delete_falls_back_to_generic_name_when_list_fails() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/clients");
            then.status(500);
        })
        .await;
    let delete = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/api/v1/clients/5");
            then.status(200).json_body(json!({"success": true}));
        })
        .await;

    let api = ConsoleApi::new(server.url("/api/v1")).unwrap();
    let output = run_clients(
        &api,
        ClientsCommand::Delete {
            id: "5".to_string(),
            yes: true,
        },
        10,
    )
    .await
    .unwrap();

    delete.assert_async().await;
    assert_eq!(
        output,
        "✅ Client deleted: Client 5 was deleted successfully."
    );
}

#[tokio::test]
async fn test_update_merges_overrides_into_existing_record() {
    let server = MockServer::start_async().await;
    let list = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/clients");
            then.status(200).json_body(json!({
                "success": true,
                "data": [
                    {"clientId": 4, "clientName": "Other", "isoVersion": "1987",
                     "encoding": "EBCDIC", "bitmapType": "BINARY", "active": "N"},
                    harbor_bank()
                ]
            }));
        })
        .await;
    let put = server
        .mock_async(|when, then| {
            when.method(PUT).path("/api/v1/clients/5").json_body(json!({
                "clientId": 5,
                "clientName": "Harbor Bank Ltd",
                "isoVersion": "1993",
                "encoding": "ASCII",
                "bitmapType": "HEX",
                "active": "N"
            }));
            then.status(200).json_body(json!({"success": true, "message": "Updated"}));
        })
        .await;

    let api = ConsoleApi::new(server.url("/api/v1")).unwrap();
    let output = run_clients(
        &api,
        ClientsCommand::Update {
            id: "5".to_string(),
            name: Some("Harbor Bank Ltd".to_string()),
            iso_version: None,
            encoding: None,
            bitmap_type: None,
            active: Some("false".to_string()),
        },
        10,
    )
    .await
    .unwrap();

    list.assert_async().await;
    put.assert_async().await;
    assert!(output.contains("Harbor Bank Ltd was updated successfully"));
}

#[tokio::test]
async fn test_update_unknown_client_is_not_sent() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/clients");
            then.status(200)
                .json_body(json!({"success": true, "data": [harbor_bank()]}));
        })
        .await;
    let put = server
        .mock_async(|when, then| {
            when.method(PUT);
            then.status(200);
        })
        .await;

    let api = ConsoleApi::new(server.url("/api/v1")).unwrap();
    let err = run_clients(
        &api,
        ClientsCommand::Update {
            id: "77".to_string(),
            name: Some("Ghost".to_string()),
            iso_version: None,
            encoding: None,
            bitmap_type: None,
            active: None,
        },
        10,
    )
    .await
    .unwrap_err();

    assert_eq!(err.to_string(), "Client 77 not found");
    assert_eq!(put.hits_async().await, 0);
}

#[tokio::test]
async fn test_active_status_filter_uses_active_endpoint() {
    let server = MockServer::start_async().await;
    let active = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/clients/active");
            then.status(200)
                .json_body(json!({"success": true, "data": [harbor_bank()]}));
        })
        .await;
    let all = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/clients");
            then.status(200).json_body(json!({"success": true, "data": []}));
        })
        .await;

    let api = ConsoleApi::new(server.url("/api/v1")).unwrap();
    let output = run_clients(
        &api,
        ClientsCommand::List {
            search: String::new(),
            status: "active".to_string(),
            paging: first_page(),
        },
        10,
    )
    .await
    .unwrap();

    active.assert_async().await;
    assert_eq!(all.hits_async().await, 0);
    assert!(output.contains("Harbor Bank"));
    assert!(output.contains("Showing 1-1 of 1 clients"));
}

#[tokio::test]
async fn test_list_page_past_end_shows_last_page() {
    let server = MockServer::start_async().await;
    let rows: Vec<serde_json::Value> = (1..=12)
        .map(|id| json!({"clientId": id, "clientName": format!("Bank {}", id), "active": "Y"}))
        .collect();
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/clients");
            then.status(200).json_body(json!({"success": true, "data": rows}));
        })
        .await;

    let api = ConsoleApi::new(server.url("/api/v1")).unwrap();
    let output = run_clients(
        &api,
        ClientsCommand::List {
            search: String::new(),
            status: "all".to_string(),
            paging: PageArgs {
                page: usize::MAX,
                per_page: Some(5),
            },
        },
        10,
    )
    .await
    .unwrap();

    assert!(output.contains("Showing 11-12 of 12 clients"));
    assert!(output.contains("Pages: 1 2 [3]"));
}

#[tokio::test]
async fn test_empty_mapping_list_reports_no_mappings() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/mappings/client/12");
            then.status(200)
                .json_body(json!({"success": true, "data": {"mappings": []}}));
        })
        .await;

    let api = ConsoleApi::new(server.url("/api/v1")).unwrap();
    let output = run_mappings(
        &api,
        MappingsCommand::List {
            client: "12".to_string(),
            search: String::new(),
            paging: first_page(),
        },
        10,
    )
    .await
    .unwrap();

    mock.assert_async().await;
    assert_eq!(output, "ℹ️  No mappings found for this client ID");
}

#[tokio::test]
async fn test_mapping_delete_rejects_garbled_id() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.any_request();
            then.status(200);
        })
        .await;

    let api = ConsoleApi::new(server.url("/api/v1")).unwrap();
    let err = run_mappings(
        &api,
        MappingsCommand::Delete {
            id: "1-2".to_string(),
            yes: true,
        },
        10,
    )
    .await
    .unwrap_err();

    assert_eq!(err.to_string(), "Invalid mapping ID: Please provide a numeric ID.");
    assert_eq!(mock.hits_async().await, 0);
}
