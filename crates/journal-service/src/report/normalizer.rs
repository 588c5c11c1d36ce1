//! XML report document → [`ReportRecord`].
//!
//! Parsing is permissive: any missing element or attribute becomes an
//! absent value. Only a document that is not well-formed XML is an error.
//!
//! Scalar fields take the text of the *first* element with the matching
//! name anywhere in the document (pre-order), even when that element is
//! empty. Element text is the character data before the element's first
//! child, kept as written; text that is only whitespace is absent. Dynamic fields are the `Field` elements that are direct
//! children of a `DynamicFieldsData` element.

use std::collections::HashMap;

use chrono::NaiveDate;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use journal_core::error::{AppError, ErrorKind};
use journal_core::result::AppResult;
use journal_core::traits::ReportDocument;
use journal_core::types::{ReportField, ReportRecord, UNKNOWN_FIELD_NAME, parse_four_digit_year};

/// Format of the `Date` element in source documents.
pub const SOURCE_DATE_FORMAT: &str = "%d/%m/%Y";

const DYNAMIC_CONTAINER: &str = "DynamicFieldsData";
const DYNAMIC_FIELD: &str = "Field";
const DYNAMIC_NAME_ATTR: &str = "name";

/// Build the record for a report folder: parsed XML plus its photo list.
pub fn normalize(doc: &ReportDocument) -> AppResult<ReportRecord> {
    let mut record = parse_report(&doc.id, &doc.xml)?;
    record.photos = doc.photos.clone();
    record.folder_path = doc.folder_path.clone();
    Ok(record)
}

/// Parse an XML report document into a record with id `id`.
pub fn parse_report(id: &str, xml: &[u8]) -> AppResult<ReportRecord> {
    let mut reader = Reader::from_reader(xml);
    let mut walker = Walker::default();

    loop {
        let event = reader.read_event().map_err(|e| {
            AppError::with_source(
                ErrorKind::Parse,
                format!("XML error at byte {}: {e}", reader.buffer_position()),
                e,
            )
        })?;

        match event {
            Event::Start(e) => walker.open(&e)?,
            Event::Empty(e) => {
                walker.open(&e)?;
                walker.close()?;
            }
            Event::End(_) => walker.close()?,
            Event::Text(t) => walker.text(&t.unescape()?)?,
            Event::CData(c) => walker.text(&String::from_utf8_lossy(&c.into_inner()))?,
            Event::Eof => break,
            _ => {}
        }
    }

    walker.finish(id)
}

/// Parse a source date (`day/month/year`). Anything else yields `None`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    parse_four_digit_year(raw.trim(), SOURCE_DATE_FORMAT, '/', 2)
}

/// An element currently open while walking the document.
#[derive(Debug)]
struct Frame {
    name: String,
    /// Character data seen before the first child element.
    text: String,
    child_seen: bool,
    /// Scalar field this element was the first occurrence of.
    field: Option<ReportField>,
    /// Key of the dynamic field this element defines.
    dynamic_key: Option<String>,
}

#[derive(Debug, Default)]
struct Walker {
    stack: Vec<Frame>,
    root_seen: bool,
    /// Claimed scalar fields; `None` until the claiming element closes or
    /// when it had no text.
    values: HashMap<ReportField, Option<String>>,
    dynamic: Vec<(String, Option<String>)>,
}

impl Walker {
    fn open(&mut self, e: &BytesStart<'_>) -> AppResult<()> {
        let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();

        let parent_is_container = match self.stack.last_mut() {
            Some(parent) => {
                parent.child_seen = true;
                parent.name == DYNAMIC_CONTAINER
            }
            None if self.root_seen => {
                return Err(AppError::parse(format!(
                    "Junk after document element: <{name}>"
                )));
            }
            None => {
                self.root_seen = true;
                false
            }
        };

        let field = ReportField::from_element(&name).filter(|f| !self.values.contains_key(f));
        if let Some(field) = field {
            self.values.insert(field, None);
        }

        let dynamic_key = if parent_is_container && name == DYNAMIC_FIELD {
            let key = match e
                .try_get_attribute(DYNAMIC_NAME_ATTR)
                .map_err(|err| AppError::parse(format!("Invalid attribute on <{name}>: {err}")))?
            {
                Some(attr) => attr.unescape_value()?.into_owned(),
                None => UNKNOWN_FIELD_NAME.to_string(),
            };
            Some(key)
        } else {
            None
        };

        self.stack.push(Frame {
            name,
            text: String::new(),
            child_seen: false,
            field,
            dynamic_key,
        });
        Ok(())
    }

    fn close(&mut self) -> AppResult<()> {
        let frame = self
            .stack
            .pop()
            .ok_or_else(|| AppError::parse("Closing tag without matching opening tag"))?;

        let text = (!frame.text.trim().is_empty()).then_some(frame.text);

        if let Some(field) = frame.field {
            self.values.insert(field, text.clone());
        }
        if let Some(key) = frame.dynamic_key {
            self.dynamic.push((key, text));
        }
        Ok(())
    }

    fn text(&mut self, content: &str) -> AppResult<()> {
        match self.stack.last_mut() {
            Some(frame) if !frame.child_seen => frame.text.push_str(content),
            Some(_) => {}
            None if content.trim().is_empty() => {}
            None => return Err(AppError::parse("Text outside the document element")),
        }
        Ok(())
    }

    fn finish(mut self, id: &str) -> AppResult<ReportRecord> {
        if let Some(open) = self.stack.last() {
            return Err(AppError::parse(format!("Unclosed element <{}>", open.name)));
        }
        if !self.root_seen {
            return Err(AppError::parse("No document element found"));
        }

        let mut record = ReportRecord::new(id);
        for field in ReportField::ALL {
            let value = self.values.remove(&field).flatten();
            match field {
                ReportField::Date => record.date = value.as_deref().and_then(parse_date),
                _ => record.set_text(field, value),
            }
        }
        record.dynamic_fields.extend(self.dynamic);
        Ok(record)
    }
}
