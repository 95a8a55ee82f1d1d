//! Snapshot PDF export.
//!
//! The rendered text view is painted as-is onto a single page: A4 wide, dark
//! background, monospace glyphs, page height grown to fit the content. This
//! is a visual snapshot, not a re-layout of the report structure.

use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::Write;

const PAGE_WIDTH: f32 = 595.28;
const A4_HEIGHT: f32 = 841.89;
const MARGIN: f32 = 36.0;
const FONT_SIZE: f32 = 8.0;
const LINE_HEIGHT: f32 = 10.0;
/// Courier advance is 0.6em, so 108 columns fit inside the margins
const WRAP_COLUMNS: usize = 108;

/// #111827 page background, light grey text
const BACKGROUND_RGB: (f32, f32, f32) = (0.067, 0.094, 0.153);
const TEXT_RGB: (f32, f32, f32) = (0.898, 0.906, 0.922);

/// Map a line onto characters the WinAnsi Courier font can show
fn transliterate(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    for c in line.chars() {
        match c {
            '₹' => out.push_str("Rs."),
            '–' | '—' | '→' => out.push('-'),
            '‘' | '’' => out.push('\''),
            '“' | '”' => out.push('"'),
            '•' => out.push('*'),
            '…' => out.push_str("..."),
            '\t' => out.push(' '),
            ' '..='~' | '\u{a0}'..='\u{ff}' => out.push(c),
            c if c.is_control() => {}
            _ => out.push('?'),
        }
    }
    out
}

/// Split the snapshot into physical lines no wider than the page.
///
/// Lines are transliterated first so the wrap width matches what is painted.
fn layout_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    for line in text.lines() {
        let line = transliterate(line);
        let wrapped = textwrap::wrap(&line, WRAP_COLUMNS);
        if wrapped.is_empty() {
            lines.push(String::new());
        }
        lines.extend(wrapped.into_iter().map(|l| l.into_owned()));
    }
    lines
}

/// Encode a transliterated line as a PDF literal string body
fn escape_literal(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    for c in line.chars() {
        match c {
            '(' | ')' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            '\u{a0}'..='\u{ff}' => out.push_str(&format!("\\{:03o}", c as u32)),
            _ => out.push(c),
        }
    }
    out
}

fn content_stream(lines: &[String], page_height: f32) -> String {
    let (br, bg, bb) = BACKGROUND_RGB;
    let (tr, tg, tb) = TEXT_RGB;

    let mut content = String::new();
    content.push_str(&format!(
        "q {:.3} {:.3} {:.3} rg 0 0 {:.2} {:.2} re f Q\n",
        br, bg, bb, PAGE_WIDTH, page_height
    ));
    content.push_str("BT\n");
    content.push_str(&format!("/F1 {:.1} Tf\n", FONT_SIZE));
    content.push_str(&format!("{:.3} {:.3} {:.3} rg\n", tr, tg, tb));
    content.push_str(&format!("{:.1} TL\n", LINE_HEIGHT));
    content.push_str(&format!(
        "{:.2} {:.2} Td\n",
        MARGIN,
        page_height - MARGIN - FONT_SIZE
    ));
    for line in lines {
        content.push_str(&format!("({}) Tj T*\n", escape_literal(line)));
    }
    content.push_str("ET\n");
    content
}

/// Page height for a given number of lines, never below A4
fn page_height(line_count: usize) -> f32 {
    let needed = 2.0 * MARGIN + line_count as f32 * LINE_HEIGHT;
    needed.max(A4_HEIGHT)
}

/// Render text as a single-page PDF document
pub fn render_pdf(text: &str) -> std::io::Result<Vec<u8>> {
    let lines = layout_lines(text);
    let height = page_height(lines.len());

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(content_stream(&lines, height).as_bytes())?;
    let stream = encoder.finish()?;

    let objects: Vec<Vec<u8>> = vec![
        b"<< /Type /Catalog /Pages 2 0 R >>".to_vec(),
        b"<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_vec(),
        format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] \
             /Resources << /Font << /F1 4 0 R >> >> /Contents 5 0 R >>",
            PAGE_WIDTH, height
        )
        .into_bytes(),
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Courier /Encoding /WinAnsiEncoding >>"
            .to_vec(),
        {
            let mut obj = format!("<< /Length {} /Filter /FlateDecode >>\nstream\n", stream.len())
                .into_bytes();
            obj.extend_from_slice(&stream);
            obj.extend_from_slice(b"\nendstream");
            obj
        },
        b"<< /Title (Meta Ads Expert Report) /Producer (adsctl) >>".to_vec(),
    ];

    let mut pdf: Vec<u8> = Vec::new();
    pdf.extend_from_slice(b"%PDF-1.4\n%\xe2\xe3\xcf\xd3\n");

    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.extend_from_slice(format!("{} 0 obj\n", i + 1).as_bytes());
        pdf.extend_from_slice(body);
        pdf.extend_from_slice(b"\nendobj\n");
    }

    let xref_offset = pdf.len();
    pdf.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    pdf.extend_from_slice(b"0000000000 65535 f \n");
    for offset in &offsets {
        pdf.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    pdf.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R /Info 6 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        )
        .as_bytes(),
    );

    Ok(pdf)
}
