use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde::Serialize;
use std::io::Cursor;

use inveskit_lib::{AlignedSeries, ChartTarget, PortfolioSummary};

/// Singularize array field names for XML child elements.
fn singular(field: &str) -> &str {
    match field {
        "topStocks" => "stock",
        "distribution" => "slice",
        "points" => "point",
        "trades" | "unmatchedTrades" => "trade",
        "markers" => "marker",
        _ => field,
    }
}

/// Whether `name` can be used as an element name as-is.
///
/// Map keys such as stock names can contain spaces or start with a digit;
/// those are written as `<entry key="...">` instead.
fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    !name.to_ascii_lowercase().starts_with("xml")
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

fn start_tag(tag: &str) -> BytesStart<'_> {
    if is_xml_name(tag) {
        BytesStart::new(tag)
    } else {
        let mut start = BytesStart::new("entry");
        start.push_attribute(("key", tag));
        start
    }
}

fn end_tag(tag: &str) -> BytesEnd<'_> {
    if is_xml_name(tag) {
        BytesEnd::new(tag)
    } else {
        BytesEnd::new("entry")
    }
}

/// Recursively write a serde_json::Value as XML elements.
fn write_value<W: std::io::Write>(
    writer: &mut Writer<W>,
    tag: &str,
    value: &serde_json::Value,
) -> Result<(), quick_xml::Error> {
    match value {
        serde_json::Value::Null => {
            // Omit null fields entirely
        }
        serde_json::Value::Bool(b) => {
            write_text(writer, tag, if *b { "true" } else { "false" })?;
        }
        serde_json::Value::Number(n) => {
            write_text(writer, tag, &n.to_string())?;
        }
        serde_json::Value::String(s) => {
            write_text(writer, tag, s)?;
        }
        serde_json::Value::Array(arr) => {
            writer.write_event(Event::Start(start_tag(tag)))?;
            let child_tag = singular(tag);
            for item in arr {
                write_value(writer, child_tag, item)?;
            }
            writer.write_event(Event::End(end_tag(tag)))?;
        }
        serde_json::Value::Object(map) => {
            writer.write_event(Event::Start(start_tag(tag)))?;
            for (key, val) in map {
                write_value(writer, key, val)?;
            }
            writer.write_event(Event::End(end_tag(tag)))?;
        }
    }
    Ok(())
}

fn write_text<W: std::io::Write>(
    writer: &mut Writer<W>,
    tag: &str,
    text: &str,
) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::Start(start_tag(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(end_tag(tag)))?;
    Ok(())
}

/// Serialize a value into an XML document rooted at `root_tag`.
fn to_xml<T: Serialize>(root_tag: &str, item: &T) -> anyhow::Result<String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let val = serde_json::to_value(item)?;
    write_value(&mut writer, root_tag, &val)?;

    let buf = writer.into_inner().into_inner();
    Ok(String::from_utf8(buf)?)
}

pub fn summary_to_xml(summary: &PortfolioSummary) -> anyhow::Result<String> {
    to_xml("portfolioSummary", summary)
}

pub fn series_to_xml(series: &AlignedSeries) -> anyhow::Result<String> {
    to_xml("alignedSeries", series)
}

pub fn chart_target_to_xml(target: &ChartTarget) -> anyhow::Result<String> {
    to_xml("chartTarget", target)
}
