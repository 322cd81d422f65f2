// ==========================================
// Customer Analytics - orders XML parser
// ==========================================
// Streams the hierarchical order source into raw records. Field values
// come from the child elements of each <order>; attributes on the
// <order> element itself are accepted as fields too, so
// <order id="10"><amount>100</amount></order> works.
// ==========================================

use crate::domain::order::RawOrderRecord;
use crate::importer::error::{IngestError, IngestResult};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use std::path::Path;

/// Parses an orders XML file into raw records.
pub fn parse_orders_xml(path: &Path) -> IngestResult<Vec<RawOrderRecord>> {
    if !path.exists() {
        return Err(IngestError::FileNotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    parse_orders_xml_str(&content)
}

/// Parses orders XML from an in-memory string (the file entry above and
/// tests both land here).
pub fn parse_orders_xml_str(content: &str) -> IngestResult<Vec<RawOrderRecord>> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut records = Vec::new();
    let mut buf = Vec::new();

    // Parser state: the field map of the <order> being read, and the
    // name of the child element whose text is expected next.
    let mut current: Option<HashMap<String, String>> = None;
    let mut current_field: Option<String> = None;
    let mut position = 0usize;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) if e.name().as_ref() == b"order" => {
                position += 1;
                let mut fields = HashMap::new();
                collect_attributes(e, &mut fields);
                current = Some(fields);
                current_field = None;
            }
            Ok(Event::Empty(ref e)) if e.name().as_ref() == b"order" => {
                // self-closing order: attributes are all it carries
                position += 1;
                let mut fields = HashMap::new();
                collect_attributes(e, &mut fields);
                records.push(map_order_fields(fields, position));
            }
            Ok(Event::Start(ref e)) if current.is_some() => {
                current_field = Some(fold_name(&String::from_utf8_lossy(e.name().as_ref())));
            }
            Ok(Event::Text(ref e)) => {
                if let (Some(fields), Some(field)) = (current.as_mut(), current_field.as_ref()) {
                    let text = e
                        .decode()
                        .ok()
                        .and_then(|d| {
                            quick_xml::escape::unescape(&d).ok().map(|c| c.into_owned())
                        })
                        .unwrap_or_default()
                        .trim()
                        .to_string();
                    if !text.is_empty() {
                        fields.insert(field.clone(), text);
                    }
                }
            }
            Ok(Event::End(ref e)) if e.name().as_ref() == b"order" => {
                if let Some(fields) = current.take() {
                    records.push(map_order_fields(fields, position));
                }
                current_field = None;
            }
            Ok(Event::End(_)) => {
                current_field = None;
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(IngestError::XmlParse {
                    position: reader.buffer_position() as u64,
                    message: e.to_string(),
                })
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(records)
}

fn collect_attributes(element: &BytesStart<'_>, fields: &mut HashMap<String, String>) {
    for attr in element.attributes().flatten() {
        let key = fold_name(&String::from_utf8_lossy(attr.key.as_ref()));
        let value = String::from_utf8_lossy(&attr.value).trim().to_string();
        if !value.is_empty() {
            fields.insert(key, value);
        }
    }
}

fn fold_name(name: &str) -> String {
    name.trim().to_lowercase()
}

fn map_order_fields(mut fields: HashMap<String, String>, position: usize) -> RawOrderRecord {
    RawOrderRecord {
        order_id: take_first(&mut fields, &["order_id", "orderid", "id"]),
        customer_id: take_first(&mut fields, &["customer_id", "customerid", "customer"]),
        order_date: take_first(&mut fields, &["order_date", "date"]),
        amount: take_first(&mut fields, &["amount", "total", "price"]),
        status: take_first(&mut fields, &["status", "state"]),
        row_number: position,
    }
}

fn take_first(fields: &mut HashMap<String, String>, aliases: &[&str]) -> Option<String> {
    aliases.iter().find_map(|alias| fields.remove(*alias))
}
