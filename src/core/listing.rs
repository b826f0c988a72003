use crate::domain::model::{Client, IsoStandardDefinition, MappingRecord};
use crate::utils::error::{ConsoleError, Result};
use std::str::FromStr;

pub const CLIENT_PAGE_WINDOW: usize = 5;
pub const MAPPING_PAGE_WINDOW: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl FromStr for StatusFilter {
    type Err = ConsoleError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "all" | "" => Ok(StatusFilter::All),
            "active" => Ok(StatusFilter::Active),
            "inactive" => Ok(StatusFilter::Inactive),
            other => Err(ConsoleError::validation(
                "Invalid status filter",
                format!("'{}' is not one of all, active, inactive", other),
            )),
        }
    }
}

impl StatusFilter {
    pub fn matches(&self, client: &Client) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => !client.is_inactive(),
            StatusFilter::Inactive => client.is_inactive(),
        }
    }
}

/// 名稱、bitmap、編碼、ISO 版本做不分大小寫的子字串比對，再套用狀態篩選
pub fn filter_clients(clients: &[Client], search: &str, status: StatusFilter) -> Vec<Client> {
    let term = search.to_lowercase();
    clients
        .iter()
        .filter(|client| {
            let matches_search = [
                &client.client_name,
                &client.bitmap_type,
                &client.encoding,
                &client.iso_version,
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(&term));

            matches_search && status.matches(client)
        })
        .cloned()
        .collect()
}

/// Ascending by client id; records without an id go last.
pub fn sort_clients(clients: &mut [Client]) {
    clients.sort_by_key(|client| (client.client_id.is_none(), client.client_id));
}

pub fn filter_mappings(mappings: &[MappingRecord], search: &str) -> Vec<MappingRecord> {
    let term = search.to_lowercase();
    mappings
        .iter()
        .filter(|mapping| {
            let id_text = mapping
                .mapping_id
                .map(|id| id.to_string())
                .unwrap_or_default();
            if id_text.contains(search) {
                return true;
            }

            if let Some(standard) = &mapping.iso_standard_definition {
                if standard.iso_field_name.to_lowercase().contains(&term)
                    || standard.iso_field_no.to_string().contains(search)
                {
                    return true;
                }
            }

            mapping
                .client_definition
                .as_ref()
                .map(|definition| definition.direction.to_lowercase().contains(&term))
                .unwrap_or(false)
        })
        .cloned()
        .collect()
}

pub fn filter_standards(
    standards: &[IsoStandardDefinition],
    search: &str,
) -> Vec<IsoStandardDefinition> {
    let term = search.to_lowercase();
    standards
        .iter()
        .filter(|standard| {
            standard.iso_field_name.to_lowercase().contains(&term)
                || standard.iso_field_no.to_string().contains(search)
        })
        .cloned()
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// 1-based 的顯示範圍 (start, end)，空頁回傳 None
    pub fn range(&self) -> Option<(usize, usize)> {
        if self.items.is_empty() {
            return None;
        }
        let start = (self.page - 1) * self.per_page + 1;
        Some((start, start + self.items.len() - 1))
    }
}

/// 每頁筆數為 0 時全部放在同一頁，超出範圍的頁碼會夾到最後一頁
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let total_items = items.len();
    let effective = if per_page == 0 {
        total_items.max(1)
    } else {
        per_page
    };
    let total_pages = total_items.div_ceil(effective);
    let page = page.clamp(1, total_pages.max(1));

    let start = (page - 1).saturating_mul(effective);
    let slice = if start >= total_items {
        Vec::new()
    } else {
        let end = (start + effective).min(total_items);
        items[start..end].to_vec()
    };

    Page {
        items: slice,
        page,
        per_page: effective,
        total_items,
        total_pages,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageItem {
    Page { number: usize, active: bool },
    Ellipsis,
}

pub fn page_window(current: usize, total_pages: usize, max_visible: usize) -> Vec<PageItem> {
    let current = current.clamp(1, total_pages.max(1));
    let link = |number: usize| PageItem::Page {
        number,
        active: number == current,
    };

    if total_pages <= max_visible {
        return (1..=total_pages).map(link).collect();
    }

    let start = current.saturating_sub(2).max(1);
    let end = current.saturating_add(2).min(total_pages);
    let mut items = Vec::new();

    if start > 1 {
        items.push(link(1));
        if start > 2 {
            items.push(PageItem::Ellipsis);
        }
    }

    items.extend((start..=end).map(link));

    if end < total_pages {
        if end + 1 < total_pages {
            items.push(PageItem::Ellipsis);
        }
        items.push(link(total_pages));
    }

    items
}
