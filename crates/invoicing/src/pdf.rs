//! Single-page PDF serialization of a drawn [`Page`].
//!
//! Text uses the standard Helvetica faces with WinAnsi encoding, so no font
//! program is embedded. The content stream is left uncompressed and no
//! timestamps or document ids are written: identical input yields identical
//! bytes.

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

use crate::error::RenderError;
use crate::layout::{DrawOp, FontFace, MmRect, PAGE_HEIGHT_MM, PAGE_WIDTH_MM, Page, Rgb};
use crate::logo::Logo;

const PT_PER_MM: f32 = 72.0 / 25.4;
const RULE_WIDTH_MM: f32 = 0.2;

const REGULAR_FONT: &str = "F1";
const BOLD_FONT: &str = "F2";
const LOGO_XOBJECT: &str = "Im1";

fn pt(mm: f32) -> f32 {
    mm * PT_PER_MM
}

/// Page y (top-down, mm) to PDF user space y (bottom-up, pt).
fn flip_y(mm: f32) -> f32 {
    pt(PAGE_HEIGHT_MM - mm)
}

fn set_fill(color: Rgb) -> Operation {
    let Rgb(r, g, b) = color;
    Operation::new(
        "rg",
        vec![
            (r as f32 / 255.0).into(),
            (g as f32 / 255.0).into(),
            (b as f32 / 255.0).into(),
        ],
    )
}

fn rect_operands(rect: &MmRect) -> Vec<Object> {
    vec![
        pt(rect.x).into(),
        flip_y(rect.y + rect.height).into(),
        pt(rect.width).into(),
        pt(rect.height).into(),
    ]
}

/// Encode text for a WinAnsi (CP1252) simple font. Unmappable characters become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match ch {
            '\t' => b' ',
            ' '..='~' => ch as u8,
            '\u{a0}'..='\u{ff}' => ch as u32 as u8,
            '€' => 0x80,
            '‚' => 0x82,
            'ƒ' => 0x83,
            '„' => 0x84,
            '…' => 0x85,
            '†' => 0x86,
            '‡' => 0x87,
            'ˆ' => 0x88,
            '‰' => 0x89,
            'Š' => 0x8a,
            '‹' => 0x8b,
            'Œ' => 0x8c,
            'Ž' => 0x8e,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '˜' => 0x98,
            '™' => 0x99,
            'š' => 0x9a,
            '›' => 0x9b,
            'œ' => 0x9c,
            'ž' => 0x9e,
            'Ÿ' => 0x9f,
            _ => b'?',
        })
        .collect()
}

fn content_operations(page: &Page) -> Vec<Operation> {
    let mut ops = Vec::with_capacity(page.ops.len() * 5);
    for op in &page.ops {
        match op {
            DrawOp::Text {
                x,
                y,
                face,
                size,
                text,
            } => {
                let font = match face {
                    FontFace::Regular => REGULAR_FONT,
                    FontFace::Bold => BOLD_FONT,
                };
                ops.push(Operation::new("BT", vec![]));
                ops.push(Operation::new("Tf", vec![font.into(), (*size).into()]));
                ops.push(Operation::new("Td", vec![pt(*x).into(), flip_y(*y).into()]));
                ops.push(Operation::new(
                    "Tj",
                    vec![Object::string_literal(encode_win_ansi(text))],
                ));
                ops.push(Operation::new("ET", vec![]));
            }
            DrawOp::Rule { x1, x2, y } => {
                ops.push(Operation::new("q", vec![]));
                ops.push(Operation::new("w", vec![pt(RULE_WIDTH_MM).into()]));
                ops.push(Operation::new("m", vec![pt(*x1).into(), flip_y(*y).into()]));
                ops.push(Operation::new("l", vec![pt(*x2).into(), flip_y(*y).into()]));
                ops.push(Operation::new("S", vec![]));
                ops.push(Operation::new("Q", vec![]));
            }
            DrawOp::FillRect { rect, color } => {
                ops.push(Operation::new("q", vec![]));
                ops.push(set_fill(*color));
                ops.push(Operation::new("re", rect_operands(rect)));
                ops.push(Operation::new("f", vec![]));
                ops.push(Operation::new("Q", vec![]));
            }
            DrawOp::Logo { rect } => {
                ops.push(Operation::new("q", vec![]));
                ops.push(Operation::new(
                    "cm",
                    vec![
                        pt(rect.width).into(),
                        0.into(),
                        0.into(),
                        pt(rect.height).into(),
                        pt(rect.x).into(),
                        flip_y(rect.y + rect.height).into(),
                    ],
                ));
                ops.push(Operation::new("Do", vec![LOGO_XOBJECT.into()]));
                ops.push(Operation::new("Q", vec![]));
            }
        }
    }
    ops
}

fn standard_font(doc: &mut Document, base_font: &str) -> lopdf::ObjectId {
    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base_font,
        "Encoding" => "WinAnsiEncoding",
    })
}

fn logo_xobject(doc: &mut Document, logo: &Logo) -> lopdf::ObjectId {
    let mut dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => logo.width as i64,
        "Height" => logo.height as i64,
        "ColorSpace" => "DeviceRGB",
        "BitsPerComponent" => 8,
    };

    if let Some(alpha) = &logo.alpha {
        let mask = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => logo.width as i64,
                "Height" => logo.height as i64,
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => 8,
            },
            alpha.clone(),
        );
        let mask_id = doc.add_object(mask);
        dict.set("SMask", mask_id);
    }

    doc.add_object(Stream::new(dict, logo.rgb.clone()))
}

/// Serialize `page` as a one-page A4 PDF with `logo` bound to the logo draw op.
pub fn write_pdf(page: &Page, logo: &Logo) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = standard_font(&mut doc, "Helvetica");
    let bold_id = standard_font(&mut doc, "Helvetica-Bold");
    let logo_id = logo_xobject(&mut doc, logo);

    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            REGULAR_FONT => regular_id,
            BOLD_FONT => bold_id,
        },
        "XObject" => dictionary! {
            LOGO_XOBJECT => logo_id,
        },
    });

    let content = Content {
        operations: content_operations(page),
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => vec![
            0.into(),
            0.into(),
            pt(PAGE_WIDTH_MM).into(),
            pt(PAGE_HEIGHT_MM).into(),
        ],
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}
