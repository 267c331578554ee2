//! Tabular view of a result set

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::mods::types::ModRecord;

#[derive(Tabled)]
struct CompactRow<'a> {
    #[tabled(rename = "Name")]
    name: &'a str,
    #[tabled(rename = "Version")]
    version: &'a str,
    #[tabled(rename = "Date Updated")]
    date_updated: &'a str,
    #[tabled(rename = "URL")]
    url: &'a str,
}

#[derive(Tabled)]
struct FullRow<'a> {
    #[tabled(rename = "Name")]
    name: &'a str,
    #[tabled(rename = "Description")]
    description: &'a str,
    #[tabled(rename = "URL")]
    url: &'a str,
    #[tabled(rename = "Download URL")]
    download_url: &'a str,
    #[tabled(rename = "Icon URL")]
    icon_url: &'a str,
    #[tabled(rename = "Channel")]
    channel: &'a str,
    #[tabled(rename = "Owner")]
    owner: &'a str,
    #[tabled(rename = "Package")]
    package: &'a str,
    #[tabled(rename = "Version")]
    version: &'a str,
    #[tabled(rename = "Date Updated")]
    date_updated: &'a str,
    #[tabled(rename = "Full Name")]
    full_name: &'a str,
}

/// Render records as a table, or a short notice when there are none
pub fn render_table(records: &[ModRecord], full: bool) -> String {
    if records.is_empty() {
        return "No updates found.".to_string();
    }

    let mut table = if full {
        Table::new(records.iter().map(|r| FullRow {
            name: &r.name,
            description: &r.details.description,
            url: &r.url,
            download_url: r.details.download_url.as_deref().unwrap_or(""),
            icon_url: &r.details.icon_url,
            channel: &r.details.channel,
            owner: &r.details.owner,
            package: &r.details.package,
            version: r.version.as_deref().unwrap_or(""),
            date_updated: &r.date_updated,
            full_name: &r.details.full_name,
        }))
    } else {
        Table::new(records.iter().map(|r| CompactRow {
            name: &r.name,
            version: r.version.as_deref().unwrap_or(""),
            date_updated: &r.date_updated,
            url: &r.url,
        }))
    };

    table.with(Style::ascii()).to_string()
}
