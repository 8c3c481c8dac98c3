use std::fmt::Display;
use std::io::Cursor;

use appcast_core::{numeric_version, Asset, ChannelInfo, ReleaseInfo};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

pub const SPARKLE_NAMESPACE: &str = "http://www.andymatuschak.org/xml-namespaces/sparkle";
pub const DC_NAMESPACE: &str = "http://purl.org/dc/elements/1.1/";
pub const ENCLOSURE_TYPE: &str = "application/octet-stream";

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("xml write error: {0}")]
    Xml(String),
    #[error("appcast is not valid utf-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

fn xml_error(err: impl Display) -> FeedError {
    FeedError::Xml(err.to_string())
}

type XmlWriter = Writer<Cursor<Vec<u8>>>;

/// Build the single-item RSS 2.0 appcast for one release.
///
/// The document is regenerated from scratch each time; previous items are not kept.
pub fn build_appcast_document(
    channel: &ChannelInfo,
    info: &ReleaseInfo,
    asset: &Asset,
    release_notes_link: &str,
) -> Result<String, FeedError> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(xml_error)?;

    let mut rss = BytesStart::new("rss");
    rss.push_attribute(("version", "2.0"));
    rss.push_attribute(("xmlns:sparkle", SPARKLE_NAMESPACE));
    rss.push_attribute(("xmlns:dc", DC_NAMESPACE));
    writer.write_event(Event::Start(rss)).map_err(xml_error)?;

    start(&mut writer, "channel")?;
    text_element(&mut writer, "title", &channel.title)?;
    text_element(&mut writer, "link", &channel.link)?;
    text_element(&mut writer, "description", &channel.description)?;
    text_element(&mut writer, "language", &channel.language)?;

    start(&mut writer, "item")?;
    text_element(&mut writer, "title", &format!("Version {}", info.version))?;
    text_element(&mut writer, "sparkle:releaseNotesLink", release_notes_link)?;
    text_element(&mut writer, "pubDate", &info.pub_date)?;

    let numeric = numeric_version(&info.version);
    let length = asset.size_bytes.to_string();
    let mut enclosure = BytesStart::new("enclosure");
    enclosure.push_attribute(("url", asset.download_url.as_str()));
    enclosure.push_attribute(("sparkle:version", numeric.as_str()));
    enclosure.push_attribute(("sparkle:shortVersionString", info.version.as_str()));
    enclosure.push_attribute(("length", length.as_str()));
    enclosure.push_attribute(("type", ENCLOSURE_TYPE));
    writer.write_event(Event::Empty(enclosure)).map_err(xml_error)?;

    end(&mut writer, "item")?;
    end(&mut writer, "channel")?;
    end(&mut writer, "rss")?;

    let mut xml = String::from_utf8(writer.into_inner().into_inner())?;
    xml.push('\n');
    Ok(xml)
}

fn start(writer: &mut XmlWriter, name: &str) -> Result<(), FeedError> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(xml_error)
}

fn end(writer: &mut XmlWriter, name: &str) -> Result<(), FeedError> {
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(xml_error)
}

fn text_element(writer: &mut XmlWriter, name: &str, text: &str) -> Result<(), FeedError> {
    start(writer, name)?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(xml_error)?;
    end(writer, name)
}
