use anyhow::{Context, Result, anyhow, bail};
use image::DynamicImage;
use printpdf::{
    BuiltinFont, Image, ImageTransform, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference,
};
use std::path::PathBuf;

use crate::fs::{ScopedFile, atomic_write, file_stem_for};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 10.0;
const FONT_SIZE: f32 = 12.0;
const LINE_HEIGHT: f32 = 7.0;
/// Width available to a line of text, in millimetres.
const TEXT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;
/// Embedded image width in millimetres.
const IMAGE_WIDTH: f32 = 180.0;
/// printpdf places images at this DPI when no scale is given.
const IMAGE_DPI: f32 = 300.0;
const MM_PER_POINT: f32 = 25.4 / 72.0;

/// Helvetica advance widths for `' '..='~'`, in 1/1000 em.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];
/// Used for Latin-1 letters and symbols outside the ASCII table.
const FALLBACK_WIDTH: u16 = 667;
/// Helvetica-Bold glyphs are at most this much wider than the regular cut.
const BOLD_FACTOR: f32 = 1.25;

/// Characters above Latin-1's control block that WinAnsi still encodes.
const WIN_ANSI_EXTRAS: &str = "€‚ƒ„…†‡ˆ‰Š‹ŒŽ‘’“”•–—˜™š›œžŸ";

/// Returns the title line written at the top of every export.
pub fn title_for(topic: &str) -> String {
    format!("Summary about {topic}")
}

/// Whether the built-in PDF fonts can draw `c`.
fn is_encodable(c: char) -> bool {
    matches!(c, ' '..='~' | '\u{a0}'..='\u{ff}') || c.is_whitespace() || WIN_ANSI_EXTRAS.contains(c)
}

/// Distinct characters of `text` the built-in fonts cannot draw, in order of
/// first appearance.
pub fn unsupported_chars(text: &str) -> Vec<char> {
    let mut found = Vec::new();
    for c in text.chars().filter(|&c| !is_encodable(c)) {
        if !found.contains(&c) {
            found.push(c);
        }
    }
    found
}

/// Rendered width of `text` in millimetres at the body font size.
pub fn text_width(text: &str, bold: bool) -> f32 {
    let units: u32 = text
        .chars()
        .map(|c| {
            let width = match c {
                ' '..='~' => HELVETICA_WIDTHS[c as usize - 0x20],
                _ => FALLBACK_WIDTH,
            };
            u32::from(width)
        })
        .sum();
    let width = units as f32 / 1000.0 * FONT_SIZE * MM_PER_POINT;
    if bold { width * BOLD_FACTOR } else { width }
}

/// Greedy word wrap against `max_width` as measured by `width_of`.
///
/// Words wider than a whole line are split between characters.
pub fn wrap_text(text: &str, max_width: f32, width_of: impl Fn(&str) -> f32) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let mut word = word.to_string();
            while width_of(&word) > max_width {
                if !line.is_empty() {
                    lines.push(std::mem::take(&mut line));
                }
                let rest = word.split_off(split_point(&word, max_width, &width_of));
                lines.push(std::mem::replace(&mut word, rest));
            }
            if word.is_empty() {
                continue;
            }

            if line.is_empty() {
                line = word;
            } else if width_of(&format!("{line} {word}")) > max_width {
                lines.push(std::mem::replace(&mut line, word));
            } else {
                line.push(' ');
                line.push_str(&word);
            }
        }
        lines.push(line);
    }

    lines
}

/// Byte index ending the longest prefix of `word` that fits. Always keeps at
/// least one character so wrapping makes progress.
fn split_point(word: &str, max_width: f32, width_of: &impl Fn(&str) -> f32) -> usize {
    let mut end = 0;
    for (idx, c) in word.char_indices() {
        let next = idx + c.len_utf8();
        if end > 0 && width_of(&word[..next]) > max_width {
            break;
        }
        end = next;
    }
    end
}

/// Writes a topic summary, and optionally its thumbnail, to a PDF file.
#[derive(Debug, Clone)]
pub struct PdfExporter {
    output_dir: PathBuf,
}

impl Default for PdfExporter {
    fn default() -> Self {
        Self::new(PathBuf::from("."))
    }
}

/// Tracks the current page layer and the vertical text cursor.
struct Cursor {
    layer: PdfLayerReference,
    y: f32,
    pages: usize,
}

impl Cursor {
    fn ensure_room(&mut self, doc: &PdfDocumentReference, height: f32) {
        if self.y - height < MARGIN {
            self.pages += 1;
            let (page, layer) = doc.add_page(
                Mm(PAGE_WIDTH),
                Mm(PAGE_HEIGHT),
                format!("Page {}", self.pages),
            );
            self.layer = doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT - MARGIN;
        }
    }

    fn write_line(
        &mut self,
        doc: &PdfDocumentReference,
        text: &str,
        x: f32,
        font: &IndirectFontRef,
    ) {
        self.ensure_room(doc, LINE_HEIGHT);
        self.y -= LINE_HEIGHT;
        self.layer.use_text(text, FONT_SIZE, Mm(x), Mm(self.y), font);
    }
}

impl PdfExporter {
    pub const fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    /// Path of the PDF written for `topic`.
    pub fn output_path(&self, topic: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}_summary.pdf", file_stem_for(topic)))
    }

    /// Path of the transient PNG used while embedding the thumbnail.
    pub fn image_path(&self, topic: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}_image.png", file_stem_for(topic)))
    }

    /// Writes the PDF and returns its path.
    ///
    /// Fails without writing anything if the title or summary contains
    /// characters the built-in fonts cannot draw.
    pub fn export(
        &self,
        topic: &str,
        summary: &str,
        image: Option<&DynamicImage>,
    ) -> Result<PathBuf> {
        let title = title_for(topic);
        check_encodable(&title, summary)?;

        let (doc, page, layer) =
            PdfDocument::new(title.as_str(), Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Page 1");
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| anyhow!("Failed to load PDF font: {e}"))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| anyhow!("Failed to load PDF font: {e}"))?;

        let mut cursor = Cursor {
            layer: doc.get_page(page).get_layer(layer),
            y: PAGE_HEIGHT - MARGIN,
            pages: 1,
        };

        for line in wrap_text(&title, TEXT_WIDTH, |s| text_width(s, true)) {
            let x = MARGIN + (TEXT_WIDTH - text_width(&line, true)).max(0.0) / 2.0;
            cursor.write_line(&doc, &line, x, &bold);
        }
        cursor.y -= LINE_HEIGHT / 2.0;

        for line in wrap_text(summary, TEXT_WIDTH, |s| text_width(s, false)) {
            cursor.write_line(&doc, &line, MARGIN, &regular);
        }

        // Removed on every exit path, including the error returns below.
        let _scratch = match image {
            Some(image) => Some(self.embed_image(&doc, &mut cursor, topic, image)?),
            None => None,
        };

        let pages = cursor.pages;
        drop(cursor);

        let bytes = doc
            .save_to_bytes()
            .map_err(|e| anyhow!("Failed to render PDF: {e}"))?;
        let path = self.output_path(topic);
        atomic_write(&path, &bytes)?;

        tracing::debug!(path = %path.display(), pages, "exported PDF");
        Ok(path)
    }

    fn embed_image(
        &self,
        doc: &PdfDocumentReference,
        cursor: &mut Cursor,
        topic: &str,
        image: &DynamicImage,
    ) -> Result<ScopedFile> {
        let scratch = ScopedFile::new(self.image_path(topic));
        image
            .save_with_format(scratch.path(), image::ImageFormat::Png)
            .with_context(|| format!("Failed to write {}", scratch.path().display()))?;
        let stored = image::open(scratch.path())
            .with_context(|| format!("Failed to read {}", scratch.path().display()))?;

        let native_width = stored.width() as f32 / IMAGE_DPI * 25.4;
        let native_height = stored.height() as f32 / IMAGE_DPI * 25.4;
        if native_width <= 0.0 || native_height <= 0.0 {
            return Ok(scratch);
        }
        let (scale, height) = fit_image(native_width, native_height);

        cursor.ensure_room(doc, height);
        cursor.y -= height;

        let rgb = DynamicImage::ImageRgb8(stored.to_rgb8());
        Image::from_dynamic_image(&rgb).add_to_layer(
            cursor.layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(MARGIN)),
                translate_y: Some(Mm(cursor.y)),
                scale_x: Some(scale),
                scale_y: Some(scale),
                dpi: Some(IMAGE_DPI),
                ..Default::default()
            },
        );

        Ok(scratch)
    }
}

fn check_encodable(title: &str, summary: &str) -> Result<()> {
    let count = title
        .chars()
        .chain(summary.chars())
        .filter(|&c| !is_encodable(c))
        .count();
    if count == 0 {
        return Ok(());
    }

    let mut sample = unsupported_chars(title);
    for c in unsupported_chars(summary) {
        if !sample.contains(&c) {
            sample.push(c);
        }
    }
    let sample: String = sample.into_iter().take(8).collect();
    bail!("{count} characters cannot be rendered with the built-in PDF font (e.g. \"{sample}\")")
}

/// Scale and drawn height for an image `width` x `height` mm at native size.
///
/// The image is drawn `IMAGE_WIDTH` wide unless that would make it taller
/// than a page, in which case it is shrunk to the page height.
fn fit_image(width: f32, height: f32) -> (f32, f32) {
    let max_height = PAGE_HEIGHT - 2.0 * MARGIN;
    let scale = IMAGE_WIDTH / width;
    if height * scale > max_height {
        let scale = max_height / height;
        (scale, max_height)
    } else {
        (scale, height * scale)
    }
}
