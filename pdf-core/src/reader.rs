use std::collections::HashMap;
use std::io::Read;

use flate2::read::ZlibDecoder;

use crate::fonts::winansi_decode;

// ── Error type ────────────────────────────────────────────────────────────────

/// Errors that can occur when reading a PDF.
#[derive(Debug, PartialEq)]
pub enum PdfReadError {
    /// The bytes do not start with a valid `%PDF-` header.
    NotAPdf,
    /// The `startxref` keyword or its offset could not be found.
    StartxrefNotFound,
    /// The cross-reference table is missing or could not be parsed.
    MalformedXref,
    /// The trailer dictionary is missing or malformed.
    MalformedTrailer,
    /// The PDF uses a cross-reference stream (PDF 1.5+), which is not supported.
    XrefStreamNotSupported,
    /// An object reference could not be resolved (offset out of range or malformed).
    UnresolvableObject(u32),
    /// The page tree structure is invalid (missing /Count, /Pages or /Kids).
    MalformedPageTree,
    /// A content stream is truncated or could not be decompressed.
    MalformedStream(u32),
    /// A page index past the end of the document.
    PageOutOfRange(usize),
}

impl std::fmt::Display for PdfReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PdfReadError::NotAPdf => write!(f, "not a PDF file"),
            PdfReadError::StartxrefNotFound => write!(f, "startxref not found"),
            PdfReadError::MalformedXref => write!(f, "malformed or missing xref table"),
            PdfReadError::MalformedTrailer => write!(f, "malformed or missing trailer"),
            PdfReadError::XrefStreamNotSupported => {
                write!(f, "cross-reference streams (PDF 1.5+) are not supported")
            }
            PdfReadError::UnresolvableObject(n) => write!(f, "cannot resolve object {}", n),
            PdfReadError::MalformedPageTree => write!(f, "malformed page tree"),
            PdfReadError::MalformedStream(n) => write!(f, "malformed stream in object {}", n),
            PdfReadError::PageOutOfRange(i) => write!(f, "page index {} out of range", i),
        }
    }
}

impl std::error::Error for PdfReadError {}

// ── Public API ─────────────────────────────────────────────────────────────────

/// Reads an existing PDF.
///
/// `PdfReader` parses the cross-reference table and trailer, walks the
/// page tree, and can pull the text shown on each page back out of its
/// content stream. Only literal strings drawn with `Tj` are extracted,
/// decoded as WinAnsi, one line per text object.
///
/// # Limitations
/// PDF 1.5+ cross-reference streams are not supported. Files that use them
/// return `PdfReadError::XrefStreamNotSupported`.
pub struct PdfReader {
    data: Vec<u8>,
    /// Maps each object number to its byte offset in `data`.
    xref: HashMap<u32, usize>,
    version: String,
    pages: Vec<u32>,
}

impl PdfReader {
    /// Parse a PDF from raw bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, PdfReadError> {
        let version = parse_version(&data)?;
        let xref_offset = find_startxref(&data)?;
        let (xref, root_ref) = parse_xref_and_trailer(&data, xref_offset)?;
        let pages = resolve_pages(&data, &xref, root_ref)?;

        Ok(PdfReader {
            data,
            xref,
            version,
            pages,
        })
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// PDF version string (e.g. `"1.7"`).
    pub fn pdf_version(&self) -> &str {
        &self.version
    }

    /// Text shown on page `index` (zero-based).
    pub fn page_text(&self, index: usize) -> Result<String, PdfReadError> {
        let page_num = *self
            .pages
            .get(index)
            .ok_or(PdfReadError::PageOutOfRange(index))?;
        let page = resolve_dict(&self.data, &self.xref, page_num)?;
        let content_num: u32 = match page.get("Contents") {
            Some(r) => r.parse().map_err(|_| PdfReadError::MalformedPageTree)?,
            None => return Ok(String::new()),
        };
        let content = resolve_stream(&self.data, &self.xref, content_num)?;
        Ok(extract_shown_text(&content))
    }

    /// Text of every page, in page order.
    pub fn text(&self) -> Result<String, PdfReadError> {
        let mut out = String::new();
        for i in 0..self.pages.len() {
            out.push_str(&self.page_text(i)?);
        }
        Ok(out)
    }
}

// ── Internal parsing ───────────────────────────────────────────────────────────

/// Extract the PDF version from the `%PDF-x.y` header.
fn parse_version(data: &[u8]) -> Result<String, PdfReadError> {
    if data.len() < 8 || !data.starts_with(b"%PDF-") {
        return Err(PdfReadError::NotAPdf);
    }
    let rest = &data[5..];
    let end = rest
        .iter()
        .position(|&b| b == b'\n' || b == b'\r' || b == b' ')
        .unwrap_or(rest.len());
    std::str::from_utf8(&rest[..end])
        .map(|s| s.to_string())
        .map_err(|_| PdfReadError::NotAPdf)
}

/// Scan backward from the end of the file to find the `startxref` offset.
fn find_startxref(data: &[u8]) -> Result<usize, PdfReadError> {
    let search_start = data.len().saturating_sub(1024);
    let tail = &data[search_start..];

    let keyword = b"startxref";
    let pos = tail
        .windows(keyword.len())
        .rposition(|w| w == keyword)
        .ok_or(PdfReadError::StartxrefNotFound)?;

    let after = &tail[pos + keyword.len()..];
    let (offset_str, _) = next_token(after).ok_or(PdfReadError::StartxrefNotFound)?;
    let offset: usize = offset_str
        .parse()
        .map_err(|_| PdfReadError::StartxrefNotFound)?;

    if offset >= data.len() {
        return Err(PdfReadError::StartxrefNotFound);
    }
    Ok(offset)
}

/// Parse the xref table starting at `xref_offset` and the following trailer.
///
/// Returns `(object_offset_map, root_object_number)`.
fn parse_xref_and_trailer(
    data: &[u8],
    xref_offset: usize,
) -> Result<(HashMap<u32, usize>, u32), PdfReadError> {
    let section = &data[xref_offset..];

    if !skip_ascii_whitespace(section).starts_with(b"xref") {
        return Err(PdfReadError::XrefStreamNotSupported);
    }

    let xref = parse_xref_table(section)?;
    let root = parse_trailer_root(section)?;
    Ok((xref, root))
}

/// Parse the traditional xref table.
///
/// Each subsection has a header line `{first_obj} {count}` followed by
/// 20-byte fixed-width entries: `{offset:010} {gen:05} {n|f}\r\n`.
fn parse_xref_table(section: &[u8]) -> Result<HashMap<u32, usize>, PdfReadError> {
    const ENTRY_SIZE: usize = 20;
    let mut map = HashMap::new();

    let trimmed = skip_ascii_whitespace(section);
    let mut cursor = &trimmed[b"xref".len()..];
    loop {
        let trimmed = skip_ascii_whitespace(cursor);
        if trimmed.is_empty() || trimmed.starts_with(b"trailer") {
            break;
        }

        let (first_obj_str, after_first) =
            next_token(trimmed).ok_or(PdfReadError::MalformedXref)?;
        let first_obj: u32 = first_obj_str
            .parse()
            .map_err(|_| PdfReadError::MalformedXref)?;
        let (count_str, after_count) =
            next_token(after_first).ok_or(PdfReadError::MalformedXref)?;
        let count: usize = count_str.parse().map_err(|_| PdfReadError::MalformedXref)?;

        let entries = skip_line(after_count);
        if entries.len() < count * ENTRY_SIZE {
            return Err(PdfReadError::MalformedXref);
        }

        for i in 0..count {
            let entry = &entries[i * ENTRY_SIZE..(i + 1) * ENTRY_SIZE];
            // Status: byte 17 ('n' = in-use, 'f' = free)
            if entry[17] != b'n' {
                continue;
            }
            let offset: usize = std::str::from_utf8(&entry[..10])
                .ok()
                .and_then(|s| s.parse().ok())
                .ok_or(PdfReadError::MalformedXref)?;
            let obj_num = first_obj + i as u32;
            if obj_num > 0 {
                map.insert(obj_num, offset);
            }
        }

        cursor = &entries[count * ENTRY_SIZE..];
    }

    Ok(map)
}

/// Extract the `/Root` object number from the trailer dictionary.
fn parse_trailer_root(section: &[u8]) -> Result<u32, PdfReadError> {
    let pos = section
        .windows(7)
        .position(|w| w == b"trailer")
        .ok_or(PdfReadError::MalformedTrailer)?;

    let dict = parse_dict_bytes(&section[pos + 7..]).ok_or(PdfReadError::MalformedTrailer)?;
    dict.get("Root")
        .and_then(|r| r.parse().ok())
        .ok_or(PdfReadError::MalformedTrailer)
}

/// Follow catalog → pages and collect leaf page object numbers in
/// document order, checking them against `/Count`.
fn resolve_pages(
    data: &[u8],
    xref: &HashMap<u32, usize>,
    catalog_obj_num: u32,
) -> Result<Vec<u32>, PdfReadError> {
    let catalog = resolve_dict(data, xref, catalog_obj_num)?;
    let pages_obj_num: u32 = catalog
        .get("Pages")
        .and_then(|r| r.parse().ok())
        .ok_or(PdfReadError::MalformedPageTree)?;

    let root = resolve_dict(data, xref, pages_obj_num)?;
    let count: usize = root
        .get("Count")
        .and_then(|c| c.parse().ok())
        .ok_or(PdfReadError::MalformedPageTree)?;

    let mut pages = Vec::with_capacity(count);
    collect_pages(data, xref, pages_obj_num, &mut pages, 0)?;
    if pages.len() != count {
        return Err(PdfReadError::MalformedPageTree);
    }
    Ok(pages)
}

fn collect_pages(
    data: &[u8],
    xref: &HashMap<u32, usize>,
    node: u32,
    pages: &mut Vec<u32>,
    depth: usize,
) -> Result<(), PdfReadError> {
    // Page trees are shallow; deep nesting means a reference cycle.
    if depth > 32 {
        return Err(PdfReadError::MalformedPageTree);
    }
    let body = object_body(data, xref, node)?;
    let dict = parse_dict_bytes(body).ok_or(PdfReadError::UnresolvableObject(node))?;
    match dict.get("Type").map(String::as_str) {
        Some("/Page") => pages.push(node),
        Some("/Pages") => {
            let kids = find_reference_array(body, b"/Kids")
                .ok_or(PdfReadError::MalformedPageTree)?;
            for kid in kids {
                collect_pages(data, xref, kid, pages, depth + 1)?;
            }
        }
        _ => return Err(PdfReadError::MalformedPageTree),
    }
    Ok(())
}

/// Bytes of an indirect object, starting after its `N G obj` header.
fn object_body<'a>(
    data: &'a [u8],
    xref: &HashMap<u32, usize>,
    obj_num: u32,
) -> Result<&'a [u8], PdfReadError> {
    let offset = xref
        .get(&obj_num)
        .copied()
        .filter(|&off| off < data.len())
        .ok_or(PdfReadError::UnresolvableObject(obj_num))?;
    let after_header =
        skip_obj_header(&data[offset..]).ok_or(PdfReadError::UnresolvableObject(obj_num))?;
    Ok(skip_ascii_whitespace(after_header))
}

/// Resolve an indirect object by number, parse its body as a dictionary,
/// and return a flat `name → first-token-of-value` map.
fn resolve_dict(
    data: &[u8],
    xref: &HashMap<u32, usize>,
    obj_num: u32,
) -> Result<HashMap<String, String>, PdfReadError> {
    let body = object_body(data, xref, obj_num)?;
    parse_dict_bytes(body).ok_or(PdfReadError::UnresolvableObject(obj_num))
}

/// Resolve a stream object and return its decoded data.
/// Handles unfiltered and `/FlateDecode` streams.
fn resolve_stream(
    data: &[u8],
    xref: &HashMap<u32, usize>,
    obj_num: u32,
) -> Result<Vec<u8>, PdfReadError> {
    let body = object_body(data, xref, obj_num)?;
    let dict = parse_dict_bytes(body).ok_or(PdfReadError::UnresolvableObject(obj_num))?;
    let length: usize = dict
        .get("Length")
        .and_then(|l| l.parse().ok())
        .ok_or(PdfReadError::MalformedStream(obj_num))?;

    let after_dict = skip_nested_dict(body)
        .map(skip_ascii_whitespace)
        .ok_or(PdfReadError::MalformedStream(obj_num))?;
    let Some(after_keyword) = after_dict.strip_prefix(b"stream") else {
        return Err(PdfReadError::MalformedStream(obj_num));
    };
    let raw = after_keyword
        .strip_prefix(b"\r\n")
        .or_else(|| after_keyword.strip_prefix(b"\n"))
        .and_then(|s| s.get(..length))
        .ok_or(PdfReadError::MalformedStream(obj_num))?;

    match dict.get("Filter").map(String::as_str) {
        None => Ok(raw.to_vec()),
        Some("/FlateDecode") => {
            let mut out = Vec::new();
            ZlibDecoder::new(raw)
                .read_to_end(&mut out)
                .map_err(|_| PdfReadError::MalformedStream(obj_num))?;
            Ok(out)
        }
        Some(_) => Err(PdfReadError::MalformedStream(obj_num)),
    }
}

/// Collect the strings drawn with `Tj`, one output line per `BT`/`ET`
/// text object.
fn extract_shown_text(content: &[u8]) -> String {
    let mut out = String::new();
    let mut line = String::new();
    let mut operand: Option<Vec<u8>> = None;
    let mut i = 0;

    while i < content.len() {
        let b = content[i];
        if b.is_ascii_whitespace() {
            i += 1;
            continue;
        }
        if b == b'(' {
            match read_literal_string(&content[i..]) {
                Some((bytes, used)) => {
                    operand = Some(bytes);
                    i += used;
                    continue;
                }
                None => break,
            }
        }

        let start = i;
        while i < content.len() && !content[i].is_ascii_whitespace() && content[i] != b'(' {
            i += 1;
        }
        match &content[start..i] {
            b"Tj" => {
                if let Some(bytes) = operand.take() {
                    line.extend(bytes.into_iter().map(winansi_decode));
                }
            }
            b"ET" => {
                out.push_str(&line);
                out.push('\n');
                line.clear();
            }
            _ => {}
        }
    }
    out
}

/// Decode a `(...)` literal string at the start of `data`.
/// Returns the unescaped bytes and the number of input bytes consumed.
fn read_literal_string(data: &[u8]) -> Option<(Vec<u8>, usize)> {
    let mut out = Vec::new();
    let mut depth = 1usize;
    let mut i = 1;
    while i < data.len() {
        match data[i] {
            b'\\' => {
                let next = *data.get(i + 1)?;
                i += 2;
                match next {
                    b'n' => out.push(b'\n'),
                    b'r' => out.push(b'\r'),
                    b't' => out.push(b'\t'),
                    b'b' => out.push(0x08),
                    b'f' => out.push(0x0C),
                    b'\n' => {}
                    b'0'..=b'7' => {
                        let mut value = (next - b'0') as u32;
                        let mut digits = 1;
                        while digits < 3 {
                            match data.get(i) {
                                Some(&d) if (b'0'..=b'7').contains(&d) => {
                                    value = value * 8 + (d - b'0') as u32;
                                    i += 1;
                                    digits += 1;
                                }
                                _ => break,
                            }
                        }
                        out.push(value as u8);
                    }
                    other => out.push(other),
                }
            }
            b'(' => {
                depth += 1;
                out.push(b'(');
                i += 1;
            }
            b')' => {
                depth -= 1;
                i += 1;
                if depth == 0 {
                    return Some((out, i));
                }
                out.push(b')');
            }
            other => {
                out.push(other);
                i += 1;
            }
        }
    }
    None
}

// ── Token / byte utilities ─────────────────────────────────────────────────────

/// Parse `<<...>>` dictionary bytes into a flat `key → first-token-of-value` map.
///
/// Values that are indirect references (`N G R`) are stored as just the object
/// number string. Nested dictionaries and arrays are skipped.
fn parse_dict_bytes(data: &[u8]) -> Option<HashMap<String, String>> {
    let data = skip_ascii_whitespace(data);
    if !data.starts_with(b"<<") {
        return None;
    }

    let mut map = HashMap::new();
    let mut cursor = &data[2..];

    loop {
        cursor = skip_ascii_whitespace(cursor);

        if cursor.starts_with(b">>") {
            break;
        }

        if !cursor.starts_with(b"/") {
            let (_, rest) = next_token(cursor)?;
            cursor = rest;
            continue;
        }

        let (key, after_key) = next_token(&cursor[1..])?;
        cursor = skip_ascii_whitespace(after_key);

        if cursor.starts_with(b"<<") {
            cursor = skip_nested_dict(cursor)?;
        } else if cursor.starts_with(b"[") {
            cursor = skip_array(cursor)?;
        } else if cursor.starts_with(b"(") {
            let (_, used) = read_literal_string(cursor)?;
            cursor = &cursor[used..];
        } else {
            let (val, rest) = next_token(cursor)?;
            cursor = skip_ascii_whitespace(rest);

            // An indirect reference "N G R" is stored as just N.
            if let Some((gen_str, after_gen)) = next_token(cursor) {
                if let Some((r_str, after_r)) = next_token(after_gen) {
                    if r_str == "R"
                        && val.chars().all(|c| c.is_ascii_digit())
                        && gen_str.chars().all(|c| c.is_ascii_digit())
                    {
                        map.insert(key.to_string(), val.to_string());
                        cursor = after_r;
                        continue;
                    }
                }
            }
            map.insert(key.to_string(), val.to_string());
        }
    }

    Some(map)
}

/// Find `key` followed by an array of indirect references in a dictionary
/// body and return the referenced object numbers.
fn find_reference_array(body: &[u8], key: &[u8]) -> Option<Vec<u32>> {
    let pos = body.windows(key.len()).position(|w| w == key)?;
    let after = skip_ascii_whitespace(&body[pos + key.len()..]);
    let inner = after.strip_prefix(b"[")?;
    let end = inner.iter().position(|&b| b == b']')?;
    let tokens: Vec<&str> = std::str::from_utf8(&inner[..end])
        .ok()?
        .split_ascii_whitespace()
        .collect();

    let mut refs = Vec::new();
    for triple in tokens.chunks(3) {
        match triple {
            [num, _, "R"] => refs.push(num.parse().ok()?),
            _ => return None,
        }
    }
    Some(refs)
}

/// Skip over a `<<...>>` block (with nested dicts), returning bytes after `>>`.
fn skip_nested_dict(data: &[u8]) -> Option<&[u8]> {
    let mut depth = 0usize;
    let mut i = 0;
    while i < data.len() {
        if data[i..].starts_with(b"<<") {
            depth += 1;
            i += 2;
        } else if data[i..].starts_with(b">>") {
            depth = depth.checked_sub(1)?;
            i += 2;
            if depth == 0 {
                return Some(&data[i..]);
            }
        } else {
            i += 1;
        }
    }
    None
}

/// Skip over a `[...]` array, returning bytes after `]`.
fn skip_array(data: &[u8]) -> Option<&[u8]> {
    let pos = data.iter().position(|&b| b == b']')?;
    Some(&data[pos + 1..])
}

/// Skip "N G obj" indirect object header, returning bytes after "obj".
fn skip_obj_header(data: &[u8]) -> Option<&[u8]> {
    let (_, rest) = next_token(data)?; // object number
    let (_, rest) = next_token(rest)?; // generation number
    let (keyword, rest) = next_token(rest)?;
    if keyword != "obj" {
        return None;
    }
    Some(rest)
}

/// Return a sub-slice starting at the first non-whitespace byte.
fn skip_ascii_whitespace(data: &[u8]) -> &[u8] {
    let pos = data
        .iter()
        .position(|&b| !b.is_ascii_whitespace())
        .unwrap_or(data.len());
    &data[pos..]
}

/// Skip to the end of the current line (past `\n` or `\r\n`).
fn skip_line(data: &[u8]) -> &[u8] {
    match data.iter().position(|&b| b == b'\n') {
        Some(pos) => &data[pos + 1..],
        None => &data[data.len()..],
    }
}

/// Read the next whitespace-delimited token from `data`.
/// Returns `(token_str, remaining_bytes)` or `None` if at end.
fn next_token(data: &[u8]) -> Option<(&str, &[u8])> {
    let data = skip_ascii_whitespace(data);
    if data.is_empty() {
        return None;
    }
    let end = data
        .iter()
        .position(|&b| b.is_ascii_whitespace() || b == b'<' || b == b'>')
        .unwrap_or(data.len());
    if end == 0 {
        // Single delimiter character
        let token = std::str::from_utf8(&data[..1]).ok()?;
        return Some((token, &data[1..]));
    }
    let token = std::str::from_utf8(&data[..end]).ok()?;
    Some((token, &data[end..]))
}
