//! Rule list file loader.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::entry::{FileClass, RawList};
use crate::parser::{clean_line, parse_ip_line, parse_site_line};
use crate::Result;

/// Load a rule list from a file.
///
/// The list is named after the upper-cased base file name and classified by
/// [`FileClass::from_file_name`]. Any read or parse error aborts the file.
pub fn load_file(path: &Path) -> Result<RawList> {
    let base = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file = File::open(path)?;
    load_reader(&base, file)
}

/// Load a rule list from a reader, using `base` as the file name.
pub fn load_reader<R: Read>(base: &str, reader: R) -> Result<RawList> {
    let class = FileClass::from_file_name(base);
    let mut list = RawList::new(base.to_uppercase(), class);

    for line in BufReader::new(reader).lines() {
        let line = line?;
        let Some(line) = clean_line(&line) else {
            continue;
        };

        let entry = match class {
            FileClass::Site => parse_site_line(line)?,
            FileClass::Ip => parse_ip_line(line)?,
        };
        list.entries.push(entry);
    }

    Ok(list)
}
