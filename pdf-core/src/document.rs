use std::collections::BTreeSet;
use std::io::{self, Write};

use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::fonts::BuiltinFont;
use crate::images::{ImageData, ImageFormat, ImageId};
use crate::objects::{ObjId, PdfObject};
use crate::textflow::TextStyle;
use crate::writer::{encode_pdf_string, PdfWriter};

const CATALOG_OBJ: ObjId = ObjId(1, 0);
const PAGES_OBJ: ObjId = ObjId(2, 0);
const FIRST_FONT_OBJ_NUM: u32 = 3;
const FIRST_FREE_OBJ_NUM: u32 = FIRST_FONT_OBJ_NUM + BuiltinFont::ALL.len() as u32;

/// High-level API for building PDF documents.
///
/// Generic over `Write` so it works with files (`BufWriter<File>`),
/// in-memory buffers (`Vec<u8>`), or any other writer.
///
/// Pages are written incrementally: `end_page()` flushes page data
/// to the writer and frees page content from memory. Images are
/// written once when embedded and referenced by every page that
/// places them.
pub struct PdfDocument<W: Write> {
    writer: PdfWriter<W>,
    info: Vec<(String, String)>,
    page_obj_ids: Vec<ObjId>,
    current_page: Option<PageBuilder>,
    image_obj_ids: Vec<ObjId>,
    next_obj_num: u32,
    compress: bool,
}

struct PageBuilder {
    width: f64,
    height: f64,
    content_ops: Vec<u8>,
    images_used: BTreeSet<ImageId>,
}

impl<W: Write> PdfDocument<W> {
    /// Create a new PDF document that writes to the given writer.
    /// Writes the PDF header and the shared Helvetica font objects
    /// immediately.
    pub fn new(writer: W) -> io::Result<Self> {
        let mut pdf_writer = PdfWriter::new(writer);
        pdf_writer.write_header()?;

        for (i, font) in BuiltinFont::ALL.iter().enumerate() {
            let dict = PdfObject::dict(vec![
                ("Type", PdfObject::name("Font")),
                ("Subtype", PdfObject::name("Type1")),
                ("BaseFont", PdfObject::name(font.pdf_base_name())),
                ("Encoding", PdfObject::name("WinAnsiEncoding")),
            ]);
            pdf_writer.write_object(ObjId(FIRST_FONT_OBJ_NUM + i as u32, 0), &dict)?;
        }

        Ok(PdfDocument {
            writer: pdf_writer,
            info: Vec::new(),
            page_obj_ids: Vec::new(),
            current_page: None,
            image_obj_ids: Vec::new(),
            next_obj_num: FIRST_FREE_OBJ_NUM,
            compress: false,
        })
    }

    /// Set a document info entry (e.g. "Creator", "Title").
    pub fn set_info(&mut self, key: &str, value: &str) -> &mut Self {
        self.info.push((key.to_string(), value.to_string()));
        self
    }

    /// Enable FlateDecode compression for content streams and raw
    /// image data written from now on.
    pub fn set_compression(&mut self, enabled: bool) -> &mut Self {
        self.compress = enabled;
        self
    }

    /// Number of pages begun so far, including an open page.
    pub fn page_count(&self) -> usize {
        self.page_obj_ids.len() + usize::from(self.current_page.is_some())
    }

    pub fn has_open_page(&self) -> bool {
        self.current_page.is_some()
    }

    /// Begin a new page with the given dimensions in points.
    /// If a page is currently open, it is closed first.
    pub fn begin_page(&mut self, width: f64, height: f64) -> io::Result<()> {
        if self.current_page.is_some() {
            self.end_page()?;
        }
        self.current_page = Some(PageBuilder {
            width,
            height,
            content_ops: Vec::new(),
            images_used: BTreeSet::new(),
        });
        Ok(())
    }

    /// Place one line of text with its baseline starting at (x, y).
    /// Coordinates use PDF's default bottom-left origin.
    pub fn place_text_styled(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        style: &TextStyle,
    ) -> &mut Self {
        let page = self
            .current_page
            .as_mut()
            .expect("place_text_styled called with no open page");
        let ops = &mut page.content_ops;
        ops.extend_from_slice(
            format!(
                "BT\n/{} {} Tf\n{} {} Td\n(",
                style.font.pdf_name(),
                format_coord(style.font_size),
                format_coord(x),
                format_coord(y),
            )
            .as_bytes(),
        );
        ops.extend_from_slice(&encode_pdf_string(text));
        ops.extend_from_slice(b") Tj\nET\n");
        self
    }

    /// Write an image XObject (and its SMask, if any) and return a
    /// handle for placing it on pages.
    pub fn embed_image(&mut self, image: ImageData) -> io::Result<ImageId> {
        let smask_id = match &image.smask_data {
            Some(alpha) => {
                let id = self.alloc_obj_id();
                let (filter, data) = self.encode_stream_data(alpha)?;
                let mut dict = vec![
                    ("Type", PdfObject::name("XObject")),
                    ("Subtype", PdfObject::name("Image")),
                    ("Width", PdfObject::Integer(image.width as i64)),
                    ("Height", PdfObject::Integer(image.height as i64)),
                    ("ColorSpace", PdfObject::name("DeviceGray")),
                    ("BitsPerComponent", PdfObject::Integer(8)),
                ];
                dict.extend(filter);
                self.writer.write_object(id, &PdfObject::stream(dict, data))?;
                Some(id)
            }
            None => None,
        };

        let (filter, data) = match image.format {
            ImageFormat::Jpeg => (
                Some(("Filter", PdfObject::name("DCTDecode"))),
                image.data,
            ),
            ImageFormat::Png => self.encode_stream_data(&image.data)?,
        };
        let mut dict = vec![
            ("Type", PdfObject::name("XObject")),
            ("Subtype", PdfObject::name("Image")),
            ("Width", PdfObject::Integer(image.width as i64)),
            ("Height", PdfObject::Integer(image.height as i64)),
            ("ColorSpace", PdfObject::name(image.color_space.pdf_name())),
            (
                "BitsPerComponent",
                PdfObject::Integer(image.bits_per_component as i64),
            ),
        ];
        dict.extend(filter);
        if let Some(smask) = smask_id {
            dict.push(("SMask", PdfObject::Reference(smask)));
        }

        let id = self.alloc_obj_id();
        self.writer.write_object(id, &PdfObject::stream(dict, data))?;
        self.image_obj_ids.push(id);
        Ok(ImageId(self.image_obj_ids.len() - 1))
    }

    /// Draw an embedded image scaled to `width` x `height` with its
    /// lower-left corner at (x, y).
    pub fn place_image(
        &mut self,
        image: ImageId,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> &mut Self {
        let page = self
            .current_page
            .as_mut()
            .expect("place_image called with no open page");
        page.images_used.insert(image);
        page.content_ops.extend_from_slice(
            format!(
                "q\n{} 0 0 {} {} {} cm\n/{} Do\nQ\n",
                format_coord(width),
                format_coord(height),
                format_coord(x),
                format_coord(y),
                image.pdf_name(),
            )
            .as_bytes(),
        );
        self
    }

    /// End the current page. Writes page objects to the
    /// writer and frees page content from memory.
    pub fn end_page(&mut self) -> io::Result<()> {
        let page = self
            .current_page
            .take()
            .expect("end_page called with no open page");

        let content_id = self.alloc_obj_id();
        let page_id = self.alloc_obj_id();

        let (filter, data) = self.encode_stream_data(&page.content_ops)?;
        let content_stream = PdfObject::stream(filter.into_iter().collect(), data);
        self.writer.write_object(content_id, &content_stream)?;

        let fonts = BuiltinFont::ALL
            .iter()
            .enumerate()
            .map(|(i, font)| {
                (
                    font.pdf_name(),
                    PdfObject::Reference(ObjId(FIRST_FONT_OBJ_NUM + i as u32, 0)),
                )
            })
            .collect();
        let mut resources = vec![("Font", PdfObject::dict(fonts))];
        if !page.images_used.is_empty() {
            let xobjects = page
                .images_used
                .iter()
                .map(|img| {
                    (
                        img.pdf_name(),
                        PdfObject::Reference(self.image_obj_ids[img.0]),
                    )
                })
                .collect();
            resources.push(("XObject", PdfObject::dict_owned(xobjects)));
        }

        let page_dict = PdfObject::dict(vec![
            ("Type", PdfObject::name("Page")),
            ("Parent", PdfObject::Reference(PAGES_OBJ)),
            (
                "MediaBox",
                PdfObject::array(vec![
                    PdfObject::Integer(0),
                    PdfObject::Integer(0),
                    PdfObject::Real(page.width),
                    PdfObject::Real(page.height),
                ]),
            ),
            ("Contents", PdfObject::Reference(content_id)),
            ("Resources", PdfObject::dict(resources)),
        ]);
        self.writer.write_object(page_id, &page_dict)?;

        self.page_obj_ids.push(page_id);
        Ok(())
    }

    /// Finish the document. Writes the catalog, pages tree,
    /// info dictionary, xref table, and trailer.
    /// Consumes self; no further operations are possible.
    pub fn end_document(mut self) -> io::Result<W> {
        if self.current_page.is_some() {
            self.end_page()?;
        }

        let info_id = if !self.info.is_empty() {
            let id = self.alloc_obj_id();
            let entries: Vec<(&str, PdfObject)> = self
                .info
                .iter()
                .map(|(k, v)| (k.as_str(), PdfObject::literal_string(v)))
                .collect();
            self.writer.write_object(id, &PdfObject::dict(entries))?;
            Some(id)
        } else {
            None
        };

        let kids: Vec<PdfObject> = self
            .page_obj_ids
            .iter()
            .map(|id| PdfObject::Reference(*id))
            .collect();
        let pages = PdfObject::dict(vec![
            ("Type", PdfObject::name("Pages")),
            ("Kids", PdfObject::Array(kids)),
            ("Count", PdfObject::Integer(self.page_obj_ids.len() as i64)),
        ]);
        self.writer.write_object(PAGES_OBJ, &pages)?;

        let catalog = PdfObject::dict(vec![
            ("Type", PdfObject::name("Catalog")),
            ("Pages", PdfObject::Reference(PAGES_OBJ)),
        ]);
        self.writer.write_object(CATALOG_OBJ, &catalog)?;

        self.writer.write_xref_and_trailer(CATALOG_OBJ, info_id)?;

        Ok(self.writer.into_inner())
    }

    fn alloc_obj_id(&mut self) -> ObjId {
        let id = ObjId(self.next_obj_num, 0);
        self.next_obj_num += 1;
        id
    }

    /// Compress stream data when compression is on, returning the
    /// `/Filter` entry to add to the stream dictionary.
    fn encode_stream_data(
        &self,
        data: &[u8],
    ) -> io::Result<(Option<(&'static str, PdfObject)>, Vec<u8>)> {
        if !self.compress {
            return Ok((None, data.to_vec()));
        }
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data)?;
        let compressed = encoder.finish()?;
        Ok((Some(("Filter", PdfObject::name("FlateDecode"))), compressed))
    }
}

/// Format a coordinate value for PDF content streams.
pub(crate) fn format_coord(v: f64) -> String {
    if v == v.floor() && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        let s = format!("{:.4}", v);
        let s = s.trim_end_matches('0');
        let s = s.trim_end_matches('.');
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coords_drop_trailing_zeros() {
        assert_eq!(format_coord(50.0), "50");
        assert_eq!(format_coord(742.5), "742.5");
        assert_eq!(format_coord(-20.0), "-20");
        assert_eq!(format_coord(1.0 / 3.0), "0.3333");
    }

    #[test]
    fn page_count_includes_open_page() {
        let mut doc = PdfDocument::new(Vec::<u8>::new()).unwrap();
        assert_eq!(doc.page_count(), 0);
        doc.begin_page(612.0, 792.0).unwrap();
        assert_eq!(doc.page_count(), 1);
        doc.begin_page(612.0, 792.0).unwrap();
        assert_eq!(doc.page_count(), 2);
        doc.end_page().unwrap();
        assert_eq!(doc.page_count(), 2);
        assert!(!doc.has_open_page());
    }
}
