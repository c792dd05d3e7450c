//! Rhythmbox database (rhythmdb.xml) parser

use super::model::{EntryField, RhythmboxEntry};
use crate::error::LoadError;
use crate::model::Entry;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Parse rhythmdb.xml and return every entry in file order
pub fn parse_database(path: &Path) -> Result<Vec<Entry>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let entries = parse_reader(BufReader::new(file))?;
    log::info!("Parsed {} entries from Rhythmbox database", entries.len());
    Ok(entries)
}

/// Parse a rhythmdb document from any buffered reader
///
/// Entry ids are assigned from their position in the document.
pub fn parse_reader<R: BufRead>(input: R) -> Result<Vec<Entry>, LoadError> {
    // Field text is kept verbatim; "Foo " and "Foo" are different albums
    let mut reader = Reader::from_reader(input);

    let mut entries = Vec::new();
    let mut current_entry: Option<RhythmboxEntry> = None;
    let mut current_field: Option<EntryField> = None;
    let mut text = String::new();
    let mut root_seen = false;
    // 1 inside <rhythmdb>, 2 inside <entry>, 3 inside an entry field
    let mut depth = 0usize;
    let mut buf = Vec::new();

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| xml_error(reader.buffer_position() as u64, e))?;

        match event {
            Event::Start(e) => {
                if !root_seen {
                    check_root(&e)?;
                    root_seen = true;
                    depth = 1;
                } else {
                    depth += 1;
                    match depth {
                        2 if e.name().as_ref() == b"entry" => {
                            current_entry = Some(RhythmboxEntry::new(entries.len(), entry_type(&e)));
                        }
                        3 if current_entry.is_some() => {
                            current_field = EntryField::from_tag(e.name().as_ref());
                            text.clear();
                        }
                        _ => {}
                    }
                }
            }

            Event::Empty(e) => {
                if !root_seen {
                    check_root(&e)?;
                    root_seen = true;
                } else if depth == 1 && e.name().as_ref() == b"entry" {
                    let entry = RhythmboxEntry::new(entries.len(), entry_type(&e));
                    entries.push(entry.finish());
                }
                // An empty field element keeps its default value
            }

            Event::Text(e) => {
                if current_field.is_some() {
                    let unescaped = e
                        .unescape()
                        .map_err(|err| xml_error(reader.buffer_position() as u64, err))?;
                    text.push_str(&unescaped);
                }
            }

            Event::CData(e) => {
                if current_field.is_some() {
                    text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }

            Event::End(e) => {
                match depth {
                    3 => {
                        if let (Some(field), Some(entry)) = (current_field.take(), current_entry.as_mut()) {
                            if !text.is_empty() {
                                entry.set(field, std::mem::take(&mut text))?;
                            }
                        }
                    }
                    2 if e.name().as_ref() == b"entry" => {
                        if let Some(entry) = current_entry.take() {
                            entries.push(entry.finish());
                        }
                    }
                    _ => {}
                }
                depth = depth.saturating_sub(1);
            }

            Event::Eof => {
                if !root_seen {
                    return Err(LoadError::Schema("missing <rhythmdb> root element".to_string()));
                }
                if depth > 0 {
                    return Err(LoadError::Xml {
                        position: reader.buffer_position() as u64,
                        message: "unexpected end of document".to_string(),
                    });
                }
                break;
            }

            _ => {}
        }

        buf.clear();
    }

    Ok(entries)
}

fn check_root(e: &BytesStart) -> Result<(), LoadError> {
    if e.name().as_ref() != b"rhythmdb" {
        return Err(LoadError::Schema(format!(
            "expected <rhythmdb> root element, found <{}>",
            String::from_utf8_lossy(e.name().as_ref())
        )));
    }

    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == b"version" {
            log::debug!("rhythmdb version {}", String::from_utf8_lossy(&attr.value));
        }
    }
    Ok(())
}

/// Value of the `type` attribute of an `<entry>`
fn entry_type(e: &BytesStart) -> String {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == b"type")
        .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
        .unwrap_or_default()
}

fn xml_error(position: u64, err: impl std::fmt::Display) -> LoadError {
    LoadError::Xml {
        position,
        message: err.to_string(),
    }
}
