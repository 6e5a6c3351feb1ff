//! Per-category PDF letters, one file per kind group.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use tracing::{debug, info};

use crate::extraction::group_by_kind;
use crate::letters::files::{retain_deliverable, safe_filename, write_file};
use crate::letters::renderer::render_letter;
use crate::letters::LetterError;
use crate::models::{DerogatoryItem, ItemKind, UserData};

const PAGE_WIDTH: i64 = 612;
const PAGE_HEIGHT: i64 = 792;
const MARGIN: i64 = 72;
const FONT_SIZE: i64 = 11;
const LEADING: i64 = 14;
const WRAP_COLUMNS: usize = 90;
const LINES_PER_PAGE: usize = ((PAGE_HEIGHT - 2 * MARGIN) / LEADING) as usize;

/// `3Bureau_Dispute_{kind}_{name}.pdf`, both components made filename-safe.
pub fn pdf_letter_file_name(kind: ItemKind, full_name: &str) -> String {
    format!(
        "3Bureau_Dispute_{}_{}.pdf",
        safe_filename(kind.tag()),
        safe_filename(full_name.trim())
    )
}

/// Writes one PDF letter per kind group into `output_dir`. Returns only the
/// files that passed the existence / non-empty check.
pub fn write_letter_pdfs(
    items: &[DerogatoryItem],
    user: &UserData,
    date: NaiveDate,
    output_dir: &Path,
) -> Result<Vec<PathBuf>, LetterError> {
    std::fs::create_dir_all(output_dir)?;

    let sender_address = user.mailing_address();
    let mut written = Vec::new();
    for group in group_by_kind(items) {
        let letter = render_letter(&group, user.full_name.trim(), &sender_address, date);
        let bytes = build_pdf(&letter)?;
        let path = output_dir.join(pdf_letter_file_name(group.kind, &user.full_name));
        write_file(&path, &bytes)?;
        debug!("PDF generated: {} ({} bytes)", path.display(), bytes.len());
        written.push(path);
    }

    let deliverable = retain_deliverable(written);
    info!("Generated {} PDF dispute letters", deliverable.len());
    Ok(deliverable)
}

/// Lays plain text out on US-letter pages in 11pt Helvetica.
pub fn build_pdf(text: &str) -> Result<Vec<u8>, LetterError> {
    let lines: Vec<String> = text
        .lines()
        .flat_map(|line| wrap_line(&to_win_ansi(line), WRAP_COLUMNS))
        .collect();

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    let chunks: Vec<&[String]> = if lines.is_empty() {
        vec![lines.as_slice()]
    } else {
        lines.chunks(LINES_PER_PAGE).collect()
    };
    for chunk in chunks {
        let page_id = add_page(&mut doc, pages_id, chunk)?;
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(PAGE_WIDTH),
                Object::Integer(PAGE_HEIGHT),
            ],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| LetterError::Pdf(e.to_string()))?;
    Ok(bytes)
}

fn add_page(doc: &mut Document, pages_id: ObjectId, lines: &[String]) -> Result<ObjectId, LetterError> {
    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), Object::Integer(FONT_SIZE)]),
        Operation::new("TL", vec![Object::Integer(LEADING)]),
        Operation::new(
            "Td",
            vec![Object::Integer(MARGIN), Object::Integer(PAGE_HEIGHT - MARGIN)],
        ),
    ];
    for line in lines {
        operations.push(Operation::new("Tj", vec![Object::string_literal(line.as_str())]));
        operations.push(Operation::new("T*", vec![]));
    }
    operations.push(Operation::new("ET", vec![]));

    let content = Content { operations }
        .encode()
        .map_err(|e| LetterError::Pdf(e.to_string()))?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, content));

    Ok(doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    }))
}

/// The standard Type1 font only covers single-byte text.
fn to_win_ansi(line: &str) -> String {
    line.chars()
        .map(|c| if c.is_ascii() && !c.is_ascii_control() { c } else { '?' })
        .collect()
}

/// Greedy word wrap keeping the leading indent on every output line. Words
/// longer than the room after the indent are hard-split.
fn wrap_line(line: &str, width: usize) -> Vec<String> {
    if line.len() <= width {
        return vec![line.to_string()];
    }

    let indent: String = line.chars().take_while(|c| *c == ' ').collect();
    let room = width.saturating_sub(indent.len()).max(1);
    let mut wrapped = Vec::new();
    let mut current = String::new();
    for word in line.split_whitespace() {
        let mut word = word.to_string();
        while word.len() > room {
            let rest = word.split_off(room);
            if !current.is_empty() {
                wrapped.push(std::mem::take(&mut current));
            }
            wrapped.push(format!("{indent}{word}"));
            word = rest;
        }
        let candidate_len = if current.is_empty() {
            indent.len() + word.len()
        } else {
            current.len() + 1 + word.len()
        };
        if candidate_len > width && !current.is_empty() {
            wrapped.push(std::mem::take(&mut current));
        }
        if current.is_empty() {
            current.push_str(&indent);
            current.push_str(&word);
        } else {
            current.push(' ');
            current.push_str(&word);
        }
    }
    if !current.is_empty() {
        wrapped.push(current);
    }
    wrapped
}
