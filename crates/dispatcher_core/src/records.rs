//! Delimited-text import.
//!
//! The format is deliberately loose: the first line is a header and is always
//! skipped, fields are separated by `,` or `;`, and quoting is not understood.
//! A delimiter inside a quoted value therefore splits the value.

use crate::contact::NewContact;

const FIELD_DELIMITERS: [char; 2] = [',', ';'];
const MIN_FIELDS: usize = 2;

/// Parses raw file content into contact drafts in file order.
///
/// Rows with fewer than two fields are dropped without error.
pub fn parse_contacts(content: &str) -> Vec<NewContact> {
    content
        .split(['\n', '\r'])
        .skip(1)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(parse_row)
        .collect()
}

fn parse_row(line: &str) -> Option<NewContact> {
    let fields: Vec<&str> = line.split(FIELD_DELIMITERS).map(str::trim).collect();
    if fields.len() < MIN_FIELDS {
        return None;
    }
    Some(NewContact::from_raw(
        fields[0],
        fields[1],
        fields.get(2).copied(),
        fields.get(3).copied(),
    ))
}
