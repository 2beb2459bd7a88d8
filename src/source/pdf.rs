//! lopdf-backed line source.
//!
//! Walks each page's decompressed content stream, collects positioned text
//! spans, and groups them by baseline into [`TextLine`]s. Only the metrics
//! the outline pipeline needs survive: line text, average span font size,
//! and the primary font name.

use std::collections::BTreeMap;

use lopdf::{Document as LopdfDocument, Object};

use super::{LineSource, TextLine};
use crate::error::{Error, Result};

/// Page identifier: (object number, generation number).
type PageId = (u32, u16);

/// TJ adjustments larger than this (in 1/1000 text-space units) are treated
/// as word spaces.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// A positioned piece of text from a content stream.
#[derive(Debug, Clone)]
struct Span {
    text: String,
    x: f32,
    y: f32,
    font_size: f32,
    font_name: String,
}

/// PDF-backed [`LineSource`] built on `lopdf`.
pub struct PdfLineSource {
    doc: LopdfDocument,
    /// Page ids in ascending page-number order.
    pages: Vec<PageId>,
}

impl PdfLineSource {
    /// Open a PDF file.
    pub fn open<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// Load a PDF from an in-memory byte slice.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if !data.starts_with(b"%PDF-") {
            return Err(Error::UnknownFormat);
        }

        let doc = LopdfDocument::load_mem(data).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;

        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }

        let pages: Vec<PageId> = doc.get_pages().into_values().collect();
        Ok(Self { doc, pages })
    }

    /// Load a PDF from a reader.
    pub fn from_reader<R: std::io::Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    /// Get the raw (decompressed) content stream bytes for a page.
    fn page_content(&self, page_id: PageId) -> Result<Vec<u8>> {
        let page_dict = self
            .doc
            .get_dictionary(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        let contents = page_dict
            .get(b"Contents")
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        match contents {
            Object::Reference(r) => {
                if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                    return s
                        .decompressed_content()
                        .map_err(|e| Error::PdfParse(e.to_string()));
                }
                Err(Error::PdfParse("Invalid content stream".to_string()))
            }
            Object::Array(arr) => {
                let mut content = Vec::new();
                for obj in arr {
                    if let Object::Reference(r) = obj {
                        if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                            if let Ok(data) = s.decompressed_content() {
                                content.extend_from_slice(&data);
                                content.push(b' ');
                            }
                        }
                    }
                }
                Ok(content)
            }
            _ => Err(Error::PdfParse("Invalid content stream".to_string())),
        }
    }

    /// Collect positioned text spans from one page's content stream.
    fn extract_spans(&self, page_id: PageId) -> Result<Vec<Span>> {
        let fonts = self
            .doc
            .get_page_fonts(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        let content = self.page_content(page_id)?;
        let content = lopdf::content::Content::decode(&content)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        let mut spans = Vec::new();
        let mut state = TextState::default();
        let mut font_resource: Vec<u8> = Vec::new();
        let mut font_name = String::new();
        let mut font_size: f32 = 12.0;
        let mut in_text = false;

        for op in content.operations {
            match op.operator.as_str() {
                "BT" => {
                    in_text = true;
                    state = TextState::default();
                }
                "ET" => in_text = false,
                "Tf" => {
                    if op.operands.len() >= 2 {
                        if let Object::Name(name) = &op.operands[0] {
                            font_resource = name.clone();
                            font_name = base_font_name(&fonts, name);
                        }
                        font_size = number(&op.operands[1]).unwrap_or(12.0);
                    }
                }
                "Td" | "TD" => {
                    if op.operands.len() >= 2 {
                        let tx = number(&op.operands[0]).unwrap_or(0.0);
                        let ty = number(&op.operands[1]).unwrap_or(0.0);
                        state.translate(tx, ty);
                    }
                }
                "Tm" => {
                    if op.operands.len() >= 6 {
                        state.set(
                            number(&op.operands[0]).unwrap_or(1.0),
                            number(&op.operands[1]).unwrap_or(0.0),
                            number(&op.operands[2]).unwrap_or(0.0),
                            number(&op.operands[3]).unwrap_or(1.0),
                            number(&op.operands[4]).unwrap_or(0.0),
                            number(&op.operands[5]).unwrap_or(0.0),
                        );
                    }
                }
                "T*" => state.next_line(),
                "Tj" | "TJ" => {
                    if !in_text {
                        continue;
                    }
                    let text = if op.operator == "TJ" {
                        self.decode_tj(&fonts, &font_resource, op.operands.first())
                    } else if let Some(Object::String(bytes, _)) = op.operands.first() {
                        self.decode_string(&fonts, &font_resource, bytes)
                    } else {
                        String::new()
                    };

                    if !text.trim().is_empty() {
                        let (x, y) = state.position();
                        spans.push(Span {
                            text,
                            x,
                            y,
                            font_size: font_size * state.scale(),
                            font_name: font_name.clone(),
                        });
                    }
                }
                "'" | "\"" => {
                    state.next_line();
                    if !in_text {
                        continue;
                    }
                    let text_idx = if op.operator == "\"" { 2 } else { 0 };
                    if let Some(Object::String(bytes, _)) = op.operands.get(text_idx) {
                        let text = self.decode_string(&fonts, &font_resource, bytes);
                        if !text.trim().is_empty() {
                            let (x, y) = state.position();
                            spans.push(Span {
                                text,
                                x,
                                y,
                                font_size: font_size * state.scale(),
                                font_name: font_name.clone(),
                            });
                        }
                    }
                }
                _ => {}
            }
        }

        Ok(spans)
    }

    /// Decode a string operand using the current font's encoding.
    fn decode_string(
        &self,
        fonts: &BTreeMap<Vec<u8>, &lopdf::Dictionary>,
        font_resource: &[u8],
        bytes: &[u8],
    ) -> String {
        if let Some(font_dict) = fonts.get(font_resource) {
            if let Ok(enc) = font_dict.get_font_encoding(&self.doc) {
                if let Ok(text) = LopdfDocument::decode_text(&enc, bytes) {
                    return text;
                }
            }
        }
        decode_text_simple(bytes)
    }

    /// Decode a TJ array, turning large kerning adjustments into spaces.
    fn decode_tj(
        &self,
        fonts: &BTreeMap<Vec<u8>, &lopdf::Dictionary>,
        font_resource: &[u8],
        operand: Option<&Object>,
    ) -> String {
        let Some(Object::Array(arr)) = operand else {
            return String::new();
        };

        let mut combined = String::new();
        for item in arr {
            match item {
                Object::String(bytes, _) => {
                    combined.push_str(&self.decode_string(fonts, font_resource, bytes));
                }
                Object::Integer(n) => push_kerning_space(&mut combined, -(*n as f32)),
                Object::Real(n) => push_kerning_space(&mut combined, -n),
                _ => {}
            }
        }
        combined
    }

    /// Group a page's spans into reading-order text lines.
    fn group_into_lines(&self, mut spans: Vec<Span>, page_index: usize) -> Vec<TextLine> {
        if spans.is_empty() {
            return Vec::new();
        }

        // PDF Y is bottom-up: sort top to bottom, then left to right.
        spans.sort_by(|a, b| {
            b.y.partial_cmp(&a.y)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))
        });

        let mut lines = Vec::new();
        let mut current: Vec<Span> = Vec::new();
        let mut current_y: Option<f32> = None;

        for span in spans {
            let tolerance = span.font_size * 0.3;
            match current_y {
                Some(y) if (span.y - y).abs() <= tolerance => current.push(span),
                _ => {
                    if !current.is_empty() {
                        lines.push(line_from_spans(std::mem::take(&mut current), page_index));
                    }
                    current_y = Some(span.y);
                    current.push(span);
                }
            }
        }
        if !current.is_empty() {
            lines.push(line_from_spans(current, page_index));
        }

        lines
    }
}

impl LineSource for PdfLineSource {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn lines(&self, page_index: usize) -> Result<Vec<TextLine>> {
        let page_id = *self
            .pages
            .get(page_index)
            .ok_or(Error::PageOutOfRange(page_index, self.pages.len()))?;

        let spans = self.extract_spans(page_id)?;
        log::debug!("page {}: {} spans", page_index, spans.len());
        Ok(self.group_into_lines(spans, page_index))
    }
}

/// Build a [`TextLine`] from baseline-grouped spans: texts joined with
/// single spaces, font size averaged across spans, font name from the
/// first span.
fn line_from_spans(spans: Vec<Span>, page_index: usize) -> TextLine {
    let text = spans
        .iter()
        .map(|s| s.text.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let font_size = spans.iter().map(|s| s.font_size).sum::<f32>() / spans.len() as f32;
    let font_name = spans[0].font_name.clone();

    TextLine::new(text, font_size, font_name, page_index)
}

/// Append a space for a TJ kerning adjustment that is wide enough to be a
/// word break. CJK text carries no word spaces, so ideographs and kana are
/// left untouched.
fn push_kerning_space(combined: &mut String, adjustment: f32) {
    if adjustment <= TJ_SPACE_THRESHOLD || combined.is_empty() || combined.ends_with(' ') {
        return;
    }
    if let Some(c) = combined.chars().last() {
        if !is_cjk(c) {
            combined.push(' ');
        }
    }
}

fn is_cjk(c: char) -> bool {
    let code = c as u32;
    // CJK Unified Ideographs, Hiragana, Katakana
    (0x4E00..=0x9FFF).contains(&code)
        || (0x3400..=0x4DBF).contains(&code)
        || (0x3040..=0x30FF).contains(&code)
}

/// Resolve a font resource name to its BaseFont name.
fn base_font_name(fonts: &BTreeMap<Vec<u8>, &lopdf::Dictionary>, resource: &[u8]) -> String {
    fonts
        .get(resource)
        .and_then(|dict| dict.get(b"BaseFont").ok())
        .and_then(|o| o.as_name().ok())
        .map(|n| String::from_utf8_lossy(n).to_string())
        .unwrap_or_else(|| String::from_utf8_lossy(resource).to_string())
}

fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Simple text decoding fallback when no font encoding is available.
fn decode_text_simple(bytes: &[u8]) -> String {
    // UTF-16BE with BOM
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16(&utf16).unwrap_or_default();
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    // Latin-1
    bytes.iter().map(|&b| b as char).collect()
}

/// Current text positioning state (Tm matrix plus line tracking).
#[derive(Debug, Clone)]
struct TextState {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }
}

impl TextState {
    #[allow(clippy::many_single_char_names)]
    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        self.a = a;
        self.b = b;
        self.c = c;
        self.d = d;
        self.e = e;
        self.f = f;
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    fn next_line(&mut self) {
        // Default leading; a TL-aware interpreter is not needed for line grouping
        self.f -= 12.0 * self.d;
    }

    fn position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    fn scale(&self) -> f32 {
        (self.a * self.a + self.c * self.c).sqrt()
    }
}
