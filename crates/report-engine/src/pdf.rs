//! Canvas to PDF serialization with lopdf
//!
//! Builds the document object by object: standard Type1 fonts, one image
//! XObject per distinct image, and one content stream per page.

use std::collections::BTreeSet;
use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat};

use crate::canvas::{Canvas, Color, DrawOp, ImageData, ImageId};
use crate::error::ReportError;
use crate::layout::Rect;
use crate::text::{encode_win_ansi, Font};

/// Baseline offset from the top of a line box, as a fraction of font size
const ASCENT: f32 = 0.8;

/// Serialize every page of the canvas into a PDF byte stream
pub fn write_pdf(canvas: &Canvas) -> Result<Vec<u8>, ReportError> {
    let page_height = canvas.geometry().height;
    let page_width = canvas.geometry().width;

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut fonts = Dictionary::new();
    for font in [Font::Regular, Font::Bold] {
        let font_id = doc.add_object(font_dictionary(font));
        fonts.set(font.resource_name(), Object::Reference(font_id));
    }

    let mut image_ids: Vec<ObjectId> = Vec::with_capacity(canvas.images().len());
    for image in canvas.images() {
        image_ids.push(doc.add_object(image_stream(image)?));
    }

    let mut page_ids = Vec::with_capacity(canvas.page_count());
    for page in canvas.pages() {
        let mut operations = Vec::new();
        let mut used_images = BTreeSet::new();

        for op in &page.ops {
            if let DrawOp::Image { id, .. } = op {
                used_images.insert(*id);
            }
            operations.extend(encode_op(op, page_height));
        }

        let content = Content { operations };
        let encoded = content
            .encode()
            .map_err(|e| ReportError::SerializationError(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(Dictionary::new(), encoded));

        let mut xobjects = Dictionary::new();
        for id in used_images {
            let object_id = image_ids.get(id.0).ok_or_else(|| {
                ReportError::SerializationError(format!("unknown image {}", id.0))
            })?;
            xobjects.set(image_resource_name(id), Object::Reference(*object_id));
        }

        let resources = Dictionary::from_iter(vec![
            ("Font", Object::Dictionary(fonts.clone())),
            ("XObject", Object::Dictionary(xobjects)),
        ]);

        let page_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Real(page_width),
                    Object::Real(page_height),
                ]),
            ),
            ("Contents", Object::Reference(content_id)),
            ("Resources", Object::Dictionary(resources)),
        ]);
        page_ids.push(doc.add_object(page_dict));
    }

    let pages = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(page_ids.len() as i64)),
        (
            "Kids",
            Object::Array(page_ids.iter().map(|id| Object::Reference(*id)).collect()),
        ),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]);
    let catalog_id = doc.add_object(catalog);
    doc.trailer.set("Root", Object::Reference(catalog_id));

    // Image streams are already deflated and opt out
    doc.compress();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| ReportError::SerializationError(format!("Save failed: {}", e)))?;
    Ok(buffer)
}

fn image_resource_name(id: ImageId) -> String {
    format!("Im{}", id.0)
}

fn font_dictionary(font: Font) -> Dictionary {
    Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(font.base_font().as_bytes().to_vec())),
        ("Encoding", Object::Name(b"WinAnsiEncoding".to_vec())),
    ])
}

fn image_stream(image: &ImageData) -> Result<Stream, ReportError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(&image.rgb)
        .map_err(|e| ReportError::SerializationError(format!("Image compression: {}", e)))?;
    let data = encoder
        .finish()
        .map_err(|e| ReportError::SerializationError(format!("Image compression: {}", e)))?;

    let dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"XObject".to_vec())),
        ("Subtype", Object::Name(b"Image".to_vec())),
        ("Width", Object::Integer(image.width as i64)),
        ("Height", Object::Integer(image.height as i64)),
        ("ColorSpace", Object::Name(b"DeviceRGB".to_vec())),
        ("BitsPerComponent", Object::Integer(8)),
        ("Filter", Object::Name(b"FlateDecode".to_vec())),
    ]);
    Ok(Stream::new(dict, data).with_compression(false))
}

fn real(v: f32) -> Object {
    Object::Real(v)
}

fn color_operands(color: Color) -> Vec<Object> {
    vec![real(color.r), real(color.g), real(color.b)]
}

/// Rectangle operands in PDF space (bottom-left origin)
fn rect_operands(rect: &Rect, page_height: f32) -> Vec<Object> {
    vec![
        real(rect.x),
        real(page_height - rect.y - rect.height),
        real(rect.width),
        real(rect.height),
    ]
}

fn encode_op(op: &DrawOp, page_height: f32) -> Vec<Operation> {
    match op {
        DrawOp::Text {
            x,
            y,
            text,
            font,
            size,
            color,
        } => vec![
            Operation::new("BT", vec![]),
            Operation::new(
                "Tf",
                vec![
                    Object::Name(font.resource_name().as_bytes().to_vec()),
                    real(*size),
                ],
            ),
            Operation::new("rg", color_operands(*color)),
            Operation::new("Td", vec![real(*x), real(page_height - y - size * ASCENT)]),
            Operation::new(
                "Tj",
                vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
            ),
            Operation::new("ET", vec![]),
        ],
        DrawOp::StrokeRect {
            rect,
            line_width,
            color,
        } => vec![
            Operation::new("q", vec![]),
            Operation::new("w", vec![real(*line_width)]),
            Operation::new("RG", color_operands(*color)),
            Operation::new("re", rect_operands(rect, page_height)),
            Operation::new("S", vec![]),
            Operation::new("Q", vec![]),
        ],
        DrawOp::FillRect { rect, color } => vec![
            Operation::new("q", vec![]),
            Operation::new("rg", color_operands(*color)),
            Operation::new("re", rect_operands(rect, page_height)),
            Operation::new("f", vec![]),
            Operation::new("Q", vec![]),
        ],
        DrawOp::Line {
            from,
            to,
            line_width,
            color,
        } => vec![
            Operation::new("q", vec![]),
            Operation::new("w", vec![real(*line_width)]),
            Operation::new("RG", color_operands(*color)),
            Operation::new("m", vec![real(from.0), real(page_height - from.1)]),
            Operation::new("l", vec![real(to.0), real(page_height - to.1)]),
            Operation::new("S", vec![]),
            Operation::new("Q", vec![]),
        ],
        DrawOp::Image { id, rect } => vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    real(rect.width),
                    real(0.0),
                    real(0.0),
                    real(rect.height),
                    real(rect.x),
                    real(page_height - rect.y - rect.height),
                ],
            ),
            Operation::new(
                "Do",
                vec![Object::Name(image_resource_name(*id).into_bytes())],
            ),
            Operation::new("Q", vec![]),
        ],
    }
}
