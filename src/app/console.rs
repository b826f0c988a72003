use crate::adapters::ConsoleApi;
use crate::config::cli::{ClientsCommand, MappingsCommand, PageArgs, StandardsCommand};
use crate::core::forms::{ClientForm, MappingForm};
use crate::core::listing::{
    filter_clients, filter_mappings, filter_standards, page_window, paginate, sort_clients, Page,
    PageItem, StatusFilter, CLIENT_PAGE_WINDOW, MAPPING_PAGE_WINDOW,
};
use crate::domain::model::{status_label, Client, IsoStandardDefinition, MappingRecord};
use crate::utils::error::{ConsoleError, Result};
use crate::utils::validation::is_numeric_id;

/// 依欄寬對齊輸出純文字表格
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (index, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(index) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let format_row = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![format_row(headers.to_vec())];
    lines.push(
        widths
            .iter()
            .map(|width| "-".repeat(*width))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in rows {
        lines.push(format_row(row.iter().map(String::as_str).collect()));
    }
    lines.join("\n")
}

pub fn render_page_bar(items: &[PageItem]) -> String {
    items
        .iter()
        .map(|item| match item {
            PageItem::Page { number, active: true } => format!("[{}]", number),
            PageItem::Page { number, .. } => number.to_string(),
            PageItem::Ellipsis => "…".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_summary<T>(page: &Page<T>, noun: &str, window: usize) -> String {
    let mut lines = Vec::new();
    match page.range() {
        Some((start, end)) => lines.push(format!(
            "Showing {}-{} of {} {}",
            start, end, page.total_items, noun
        )),
        None => lines.push(format!("No {} found", noun)),
    }
    if page.total_pages > 1 {
        lines.push(format!(
            "Pages: {}",
            render_page_bar(&page_window(page.page, page.total_pages, window))
        ));
    }
    lines.join("\n")
}

fn dash_if_empty(value: &str) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

pub fn render_clients(page: &Page<Client>) -> String {
    let rows: Vec<Vec<String>> = page
        .items
        .iter()
        .map(|client| {
            vec![
                client
                    .client_id
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                dash_if_empty(&client.client_name),
                dash_if_empty(&client.iso_version),
                dash_if_empty(&client.encoding),
                dash_if_empty(&client.bitmap_type),
                client.status_label(),
            ]
        })
        .collect();

    let table = render_table(
        &["ID", "NAME", "ISO VERSION", "ENCODING", "BITMAP", "STATUS"],
        &rows,
    );
    format!(
        "{}\n\n{}",
        table,
        render_summary(page, "clients", CLIENT_PAGE_WINDOW)
    )
}

pub fn render_standards(filtered: &[IsoStandardDefinition], total: usize) -> String {
    let rows: Vec<Vec<String>> = filtered
        .iter()
        .map(|standard| {
            vec![
                standard.iso_field_no.to_string(),
                standard.length.to_string(),
                dash_if_empty(&standard.iso_field_name),
            ]
        })
        .collect();

    format!(
        "{}\n\nTotal: {} / {}",
        render_table(&["FIELD", "LENGTH", "NAME"], &rows),
        filtered.len(),
        total
    )
}

pub fn render_mappings(page: &Page<MappingRecord>) -> String {
    let rows: Vec<Vec<String>> = page
        .items
        .iter()
        .map(|mapping| {
            let standard = mapping.iso_standard_definition.as_ref();
            let definition = mapping.client_definition.as_ref();
            vec![
                mapping
                    .mapping_id
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                standard
                    .map(|s| s.iso_field_no.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                standard
                    .map(|s| dash_if_empty(&s.iso_field_name))
                    .unwrap_or_else(|| "-".to_string()),
                definition
                    .map(|d| d.client_field_no.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                definition
                    .map(|d| dash_if_empty(&d.direction))
                    .unwrap_or_else(|| "-".to_string()),
                definition
                    .and_then(|d| d.transformation.clone())
                    .unwrap_or_else(|| "-".to_string()),
                definition
                    .and_then(|d| d.default_value.clone())
                    .unwrap_or_else(|| "-".to_string()),
                definition
                    .map(|d| status_label(&d.active))
                    .unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect();

    let table = render_table(
        &[
            "ID",
            "ISO FIELD",
            "ISO NAME",
            "CLIENT FIELD",
            "DIRECTION",
            "TRANSFORMATION",
            "DEFAULT",
            "STATUS",
        ],
        &rows,
    );
    format!(
        "{}\n\n{}",
        table,
        render_summary(page, "mappings", MAPPING_PAGE_WINDOW)
    )
}

fn parse_record_id(raw: &str, title: &str) -> Result<u64> {
    let trimmed = raw.trim();
    if !is_numeric_id(trimmed) {
        return Err(ConsoleError::validation(title, "Please provide a numeric ID."));
    }
    trimmed
        .parse::<u64>()
        .map_err(|_| ConsoleError::validation(title, "Please provide a numeric ID."))
}

fn per_page(paging: &PageArgs, default_page_size: usize) -> usize {
    paging.per_page.unwrap_or(default_page_size)
}

/// 名稱只用於提示訊息，清單讀取失敗時退回 `Client {id}`
async fn client_display_name(api: &ConsoleApi, client_id: u64) -> String {
    let fallback = || format!("Client {}", client_id);
    match api.list_clients().await {
        Ok(clients) => clients
            .into_iter()
            .find(|client| client.client_id == Some(client_id))
            .map(|client| client.client_name)
            .unwrap_or_else(fallback),
        Err(e) => {
            tracing::warn!("Could not load client name for {}: {}", client_id, e);
            fallback()
        }
    }
}

/// 執行 clients 子命令，回傳要輸出的文字
pub async fn run_clients(
    api: &ConsoleApi,
    command: ClientsCommand,
    default_page_size: usize,
) -> Result<String> {
    match command {
        ClientsCommand::List {
            search,
            status,
            paging,
        } => {
            let status: StatusFilter = status.parse()?;
            let clients = match status {
                StatusFilter::Active => api.list_active_clients().await?,
                _ => api.list_clients().await?,
            };
            tracing::debug!("Fetched {} clients", clients.len());

            let mut filtered = filter_clients(&clients, &search, status);
            sort_clients(&mut filtered);
            let page = paginate(&filtered, paging.page, per_page(&paging, default_page_size));
            Ok(render_clients(&page))
        }
        ClientsCommand::Create {
            id,
            name,
            iso_version,
            encoding,
            bitmap_type,
            active,
        } => {
            let form = ClientForm {
                client_id: id,
                client_name: name,
                iso_version,
                encoding,
                bitmap_type,
                active,
            };
            let payload = form.validate_for_create()?;
            api.create_client(&payload).await?;
            Ok(format!(
                "✅ Client created: {} was added successfully.",
                payload.client_name
            ))
        }
        ClientsCommand::Update {
            id,
            name,
            iso_version,
            encoding,
            bitmap_type,
            active,
        } => {
            let client_id = parse_record_id(&id, "Invalid client ID")?;
            let existing = api
                .list_clients()
                .await?
                .into_iter()
                .find(|client| client.client_id == Some(client_id))
                .ok_or_else(|| ConsoleError::api(format!("Client {} not found", client_id)))?;

            let mut form = ClientForm::from_client(&existing);
            if let Some(name) = name {
                form.client_name = name;
            }
            if let Some(iso_version) = iso_version {
                form.iso_version = iso_version;
            }
            if let Some(encoding) = encoding {
                form.encoding = encoding;
            }
            if let Some(bitmap_type) = bitmap_type {
                form.bitmap_type = bitmap_type;
            }
            if let Some(active) = active {
                form.active = active;
            }

            let payload = form.validate_for_update()?;
            api.update_client(&payload).await?;
            Ok(format!(
                "✅ Client updated: {} was updated successfully.",
                payload.client_name
            ))
        }
        ClientsCommand::Delete { id, yes } => {
            let client_id = parse_record_id(&id, "Invalid client ID")?;
            let name = client_display_name(api, client_id).await;

            if !yes {
                return Ok(format!(
                    "⚠️  {} will be removed permanently. Re-run with --yes to confirm.",
                    name
                ));
            }

            api.delete_client(client_id).await?;
            Ok(format!("✅ Client deleted: {} was deleted successfully.", name))
        }
    }
}

pub async fn run_standards(api: &ConsoleApi, command: StandardsCommand) -> Result<String> {
    match command {
        StandardsCommand::List { search } => {
            let standards = api.list_standards().await?;
            let filtered = filter_standards(&standards, &search);
            Ok(render_standards(&filtered, standards.len()))
        }
    }
}

pub async fn run_mappings(
    api: &ConsoleApi,
    command: MappingsCommand,
    default_page_size: usize,
) -> Result<String> {
    match command {
        MappingsCommand::List {
            client,
            search,
            paging,
        } => {
            let mappings = api.mappings_for_client(&client).await?;
            if mappings.is_empty() {
                return Ok("ℹ️  No mappings found for this client ID".to_string());
            }

            let filtered = filter_mappings(&mappings, &search);
            let page = paginate(&filtered, paging.page, per_page(&paging, default_page_size));
            Ok(render_mappings(&page))
        }
        MappingsCommand::Create {
            client,
            iso_field,
            client_field,
            direction,
            transformation,
            default_value,
        } => {
            let form = MappingForm {
                client_id: client,
                iso_rec_id: iso_field,
                client_field_no: client_field,
                direction,
                transformation,
                default_value,
            };
            let payload = form.to_payload()?;
            api.create_mapping(&payload).await?;
            Ok("✅ Mapping created: the mapping was added successfully.".to_string())
        }
        MappingsCommand::Delete { id, yes } => {
            let mapping_id = parse_record_id(&id, "Invalid mapping ID")?;
            if !yes {
                return Ok(format!(
                    "⚠️  Mapping {} will be removed permanently. Re-run with --yes to confirm.",
                    mapping_id
                ));
            }

            api.delete_mapping(mapping_id).await?;
            Ok(format!(
                "✅ Mapping deleted: mapping {} was deleted successfully.",
                mapping_id
            ))
        }
    }
}
