use image::ImageError;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};
use std::path::Path;

use super::fonts::{encode_win_ansi, Font};
use crate::error::Result;

/// Letter 纸 (8.5 x 11 英寸)
pub const LETTER: (f32, f32) = (612.0, 792.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// 已绘制的文本 (坐标原点在左下角)
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font: Font,
    pub size: f32,
}

/// 已绘制的直线
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: (f32, f32),
    pub to: (f32, f32),
    pub width: f32,
}

/// 单页 PDF 画布
pub struct Canvas {
    doc: Document,
    width: f32,
    height: f32,
    operations: Vec<Operation>,
    images: Vec<(String, ObjectId)>,
    runs: Vec<TextRun>,
    fills: Vec<(Rect, f32)>,
    segments: Vec<Segment>,
}

impl Canvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            doc: Document::with_version("1.5"),
            width,
            height,
            operations: Vec::new(),
            images: Vec::new(),
            runs: Vec::new(),
            fills: Vec::new(),
            segments: Vec::new(),
        }
    }

    pub fn letter() -> Self {
        Self::new(LETTER.0, LETTER.1)
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn text_runs(&self) -> &[TextRun] {
        &self.runs
    }

    /// 已填充的矩形及其灰度
    pub fn fills(&self) -> &[(Rect, f32)] {
        &self.fills
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    /// 在 (x, y) 处绘制单行文本, y 为基线
    pub fn draw_string(&mut self, font: Font, size: f32, x: f32, y: f32, text: &str) {
        self.operations.push(Operation::new("BT", vec![]));
        self.operations.push(Operation::new(
            "Tf",
            vec![Object::Name(font.resource_name().as_bytes().to_vec()), size.into()],
        ));
        self.operations.push(Operation::new("Td", vec![x.into(), y.into()]));
        self.operations.push(Operation::new(
            "Tj",
            vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
        ));
        self.operations.push(Operation::new("ET", vec![]));

        self.runs.push(TextRun {
            text: text.to_string(),
            x,
            y,
            font,
            size,
        });
    }

    pub fn line(&mut self, from: (f32, f32), to: (f32, f32), width: f32) {
        self.operations.push(Operation::new("q", vec![]));
        self.operations.push(Operation::new("w", vec![width.into()]));
        self.operations.push(Operation::new("G", vec![0.0f32.into()]));
        self.operations.push(Operation::new("m", vec![from.0.into(), from.1.into()]));
        self.operations.push(Operation::new("l", vec![to.0.into(), to.1.into()]));
        self.operations.push(Operation::new("S", vec![]));
        self.operations.push(Operation::new("Q", vec![]));
        self.segments.push(Segment { from, to, width });
    }

    /// 灰度填充矩形 (0 = 黑, 1 = 白)
    pub fn fill_rect(&mut self, rect: Rect, gray: f32) {
        self.operations.push(Operation::new("q", vec![]));
        self.operations.push(Operation::new("g", vec![gray.into()]));
        self.operations.push(Operation::new(
            "re",
            vec![rect.x.into(), rect.y.into(), rect.width.into(), rect.height.into()],
        ));
        self.operations.push(Operation::new("f", vec![]));
        self.operations.push(Operation::new("Q", vec![]));
        self.fills.push((rect, gray));
    }

    /// 读取图片并等比缩放居中放入 frame
    pub fn draw_image(&mut self, path: &Path, frame: Rect) -> std::result::Result<(), ImageError> {
        let rgba = image::open(path)?.to_rgba8();
        let (px_width, px_height) = rgba.dimensions();
        if px_width == 0 || px_height == 0 {
            return Ok(());
        }

        let mut rgb = Vec::with_capacity((px_width * px_height * 3) as usize);
        let mut alpha = Vec::with_capacity((px_width * px_height) as usize);
        for pixel in rgba.pixels() {
            let [r, g, b, a] = pixel.0;
            rgb.extend_from_slice(&[r, g, b]);
            alpha.push(a);
        }

        let smask_id = self.doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => px_width as i64,
                "Height" => px_height as i64,
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => 8,
            },
            alpha,
        ));
        let image_id = self.doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => px_width as i64,
                "Height" => px_height as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
                "SMask" => smask_id,
            },
            rgb,
        ));

        let name = format!("Im{}", self.images.len() + 1);
        self.images.push((name.clone(), image_id));

        let scale = (frame.width / px_width as f32).min(frame.height / px_height as f32);
        let (w, h) = (px_width as f32 * scale, px_height as f32 * scale);
        let x = frame.x + (frame.width - w) / 2.0;
        let y = frame.y + (frame.height - h) / 2.0;

        self.operations.push(Operation::new("q", vec![]));
        self.operations.push(Operation::new(
            "cm",
            vec![w.into(), 0.0f32.into(), 0.0f32.into(), h.into(), x.into(), y.into()],
        ));
        self.operations.push(Operation::new("Do", vec![Object::Name(name.into_bytes())]));
        self.operations.push(Operation::new("Q", vec![]));
        Ok(())
    }

    /// 组装页面树并写入文件
    pub fn save(mut self, path: &Path) -> Result<()> {
        let pages_id = self.doc.new_object_id();

        let mut fonts = lopdf::Dictionary::new();
        for font in Font::ALL {
            let font_id = self.doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => font.base_font(),
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(font.resource_name(), font_id);
        }

        let mut xobjects = lopdf::Dictionary::new();
        for (name, id) in &self.images {
            xobjects.set(name.as_str(), *id);
        }

        let resources_id = self.doc.add_object(dictionary! {
            "Font" => fonts,
            "XObject" => xobjects,
        });

        let content = Content {
            operations: std::mem::take(&mut self.operations),
        };
        let content_id = self.doc.add_object(Stream::new(dictionary! {}, content.encode()?));

        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), self.width.into(), self.height.into()],
        });

        self.doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }),
        );

        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        self.doc.trailer.set("Root", catalog_id);

        self.doc.compress();
        self.doc.save(path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(obj: &Object) -> f32 {
        match obj {
            Object::Integer(i) => *i as f32,
            Object::Real(r) => *r as f32,
            other => panic!("not a number: {other:?}"),
        }
    }

    #[test]
    fn text_runs_record_position_and_font() {
        let mut canvas = Canvas::letter();
        canvas.draw_string(Font::HelveticaBold, 10.0, 72.0, 627.0, "Bill To:");

        let run = &canvas.text_runs()[0];
        assert_eq!(run.text, "Bill To:");
        assert_eq!((run.x, run.y), (72.0, 627.0));
        assert_eq!(run.font, Font::HelveticaBold);
        assert_eq!((canvas.width(), canvas.height()), LETTER);
    }

    #[test]
    fn fills_and_lines_are_recorded() {
        let mut canvas = Canvas::letter();
        let rect = Rect {
            x: 50.0,
            y: 400.0,
            width: 520.0,
            height: 16.8,
        };
        canvas.fill_rect(rect, 0.5);
        canvas.line((50.0, 400.0), (570.0, 400.0), 0.5);

        assert_eq!(canvas.fills(), &[(rect, 0.5)]);
        assert_eq!(
            canvas.segments(),
            &[Segment {
                from: (50.0, 400.0),
                to: (570.0, 400.0),
                width: 0.5,
            }]
        );
    }

    #[test]
    fn missing_image_is_an_error_and_draws_nothing() {
        let mut canvas = Canvas::letter();
        let frame = Rect {
            x: 50.0,
            y: 692.0,
            width: 200.0,
            height: 100.0,
        };
        assert!(canvas.draw_image(Path::new("no/such/logo.png"), frame).is_err());
        assert_eq!(canvas.image_count(), 0);
    }

    #[test]
    fn saved_page_is_letter_sized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.pdf");

        let mut canvas = Canvas::letter();
        canvas.draw_string(Font::Helvetica, 10.0, 72.0, 550.0, "Invoice Number: R1");
        canvas.fill_rect(
            Rect {
                x: 50.0,
                y: 400.0,
                width: 100.0,
                height: 20.0,
            },
            0.5,
        );
        canvas.line((50.0, 400.0), (150.0, 400.0), 0.5);
        canvas.save(&path).unwrap();

        let doc = Document::load(&path).unwrap();
        let pages = doc.get_pages();
        assert_eq!(pages.len(), 1);
        let page = doc.get_dictionary(pages[&1]).unwrap();
        let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
        assert_eq!(number(&media_box[2]), 612.0);
        assert_eq!(number(&media_box[3]), 792.0);
    }

    #[test]
    fn image_is_fitted_into_frame() {
        let dir = tempfile::tempdir().unwrap();
        let logo = dir.path().join("logo.png");
        image::RgbaImage::from_pixel(40, 10, image::Rgba([10, 20, 30, 255]))
            .save(&logo)
            .unwrap();

        let mut canvas = Canvas::letter();
        let frame = Rect {
            x: 50.0,
            y: 692.0,
            width: 200.0,
            height: 100.0,
        };
        canvas.draw_image(&logo, frame).unwrap();
        assert_eq!(canvas.image_count(), 1);

        let out = dir.path().join("logo.pdf");
        canvas.save(&out).unwrap();
        assert!(Document::load(&out).is_ok());
    }
}
