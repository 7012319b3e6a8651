//! Page geometry and stamp compositing on `lopdf` documents.
//!
//! The stamp is embedded once as an RGB image `XObject` with a grayscale
//! soft mask carrying its alpha channel. Each stamped page references that
//! object from its resources and draws it from an extra content stream.
//! Existing page content is wrapped in `q`/`Q` first, so a graphics state
//! left dirty by the page cannot move or clip the stamp.

use image::RgbaImage;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};
use tracing::{debug, instrument};

use crate::error::{Error, Result};
use crate::placement::Rect;

/// Upper bound on `Parent` hops when looking up inherited page attributes.
const MAX_TREE_DEPTH: usize = 64;

/// Prefix of the resource names given to embedded stamps.
const STAMP_RESOURCE_PREFIX: &str = "Stamp";

/// Which pages receive the stamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSelection {
    /// Only the first page.
    #[default]
    First,
    /// Every page, in document order.
    All,
}

/// Visible page area: the `CropBox` clipped to the `MediaBox`, seen with the
/// page's `/Rotate` applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    /// Visible box `[llx, lly, urx, ury]` in unrotated user space.
    pub visible: [f64; 4],
    /// Clockwise display rotation: 0, 90, 180 or 270.
    pub rotation: u16,
    /// Displayed page width.
    pub width: f64,
    /// Displayed page height.
    pub height: f64,
}

impl PageGeometry {
    /// Map a point measured from the displayed page's bottom-left corner
    /// into user space.
    #[must_use]
    pub fn to_user(&self, u: f64, v: f64) -> (f64, f64) {
        let [llx, lly, urx, ury] = self.visible;
        match self.rotation {
            90 => (urx - v, lly + u),
            180 => (urx - u, ury - v),
            270 => (llx + v, ury - u),
            _ => (llx + u, lly + v),
        }
    }

    /// `cm` operands that draw an image upright inside `rect`, where `rect`
    /// is measured on the displayed page.
    #[must_use]
    pub fn image_matrix(&self, rect: &Rect) -> [f64; 6] {
        let (w, h) = (rect.width(), rect.height());
        let (e, f) = self.to_user(rect.left, rect.bottom);
        match self.rotation {
            90 => [0.0, w, -h, 0.0, e, f],
            180 => [-w, 0.0, 0.0, -h, e, f],
            270 => [0.0, -w, h, 0.0, e, f],
            _ => [w, 0.0, 0.0, h, e, f],
        }
    }
}

/// Pages to stamp as `(page_number, object_id)`, 1-based and in order.
///
/// # Errors
///
/// Returns [`Error::EmptyDocument`] if the document has no pages.
pub fn select_pages(doc: &Document, selection: PageSelection) -> Result<Vec<(u32, ObjectId)>> {
    let pages = doc.get_pages();
    if pages.is_empty() {
        return Err(Error::EmptyDocument);
    }
    let selected = match selection {
        PageSelection::First => pages.into_iter().take(1).collect(),
        PageSelection::All => pages.into_iter().collect(),
    };
    Ok(selected)
}

/// Read a page's visible geometry, following `MediaBox`, `CropBox` and
/// `Rotate` inheritance through the page tree.
///
/// A `CropBox` is clipped to the `MediaBox`; one that is missing, malformed
/// or outside the media box falls back to the `MediaBox`.
///
/// # Errors
///
/// Returns [`Error::MissingMediaBox`] if neither the page nor any ancestor
/// carries a four-number `MediaBox`.
pub fn page_dimensions(
    doc: &Document,
    page_number: u32,
    page_id: ObjectId,
) -> Result<PageGeometry> {
    let media =
        page_box(doc, page_id, b"MediaBox").ok_or(Error::MissingMediaBox(page_number))?;
    let visible = page_box(doc, page_id, b"CropBox")
        .and_then(|crop| intersect(crop, media))
        .unwrap_or(media);

    let rotation = inherited_attribute(doc, page_id, b"Rotate")
        .and_then(|o| resolve(doc, o))
        .and_then(|o| o.as_i64().ok())
        .map_or(0, |r| r.rem_euclid(360));
    let rotation = match rotation {
        90 => 90,
        180 => 180,
        270 => 270,
        _ => 0,
    };

    let (w, h) = (visible[2] - visible[0], visible[3] - visible[1]);
    let (width, height) = if rotation % 180 == 0 { (w, h) } else { (h, w) };
    Ok(PageGeometry {
        visible,
        rotation,
        width,
        height,
    })
}

/// Add the stamp bitmap to the document as an image `XObject` with an
/// `SMask` built from its alpha channel.
pub fn embed_stamp(doc: &mut Document, stamp: &RgbaImage) -> ObjectId {
    let (width, height) = stamp.dimensions();
    let pixels = (width as usize) * (height as usize);
    let mut rgb = Vec::with_capacity(pixels * 3);
    let mut alpha = Vec::with_capacity(pixels);
    for px in stamp.pixels() {
        rgb.extend_from_slice(&px.0[..3]);
        alpha.push(px[3]);
    }

    let smask_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => i64::from(width),
            "Height" => i64::from(height),
            "ColorSpace" => "DeviceGray",
            "BitsPerComponent" => 8,
        },
        alpha,
    ));
    let image_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => i64::from(width),
            "Height" => i64::from(height),
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "SMask" => smask_id,
        },
        rgb,
    ));

    debug!(width, height, ?image_id, ?smask_id, "Stamp embedded");
    image_id
}

/// Draw an embedded stamp on one page inside `rect`.
///
/// `rect` is measured from the bottom-left corner of the page as displayed,
/// so it is mapped through the visible box origin and the page rotation
/// before drawing. Returns the resource name the stamp was registered under.
///
/// # Errors
///
/// Returns [`Error::MissingMediaBox`] or [`Error::MalformedPage`] when the
/// page cannot be edited, and [`Error::Pdf`] if the content stream cannot be
/// encoded.
#[instrument(skip(doc, rect), fields(page = page_number))]
pub fn overlay_stamp(
    doc: &mut Document,
    page_number: u32,
    page_id: ObjectId,
    stamp_id: ObjectId,
    rect: &Rect,
) -> Result<String> {
    let geometry = page_dimensions(doc, page_number, page_id)?;

    let mut resources = page_resources(doc, page_number, page_id)?;
    let mut xobjects = match resources.get(b"XObject").ok() {
        Some(obj) => resolve(doc, obj)
            .and_then(|o| o.as_dict().ok())
            .cloned()
            .ok_or_else(|| malformed(page_number, "XObject resources are not a dictionary"))?,
        None => Dictionary::new(),
    };
    let name = unused_resource_name(&xobjects);
    xobjects.set(name.as_str(), stamp_id);
    resources.set("XObject", xobjects);

    let existing = page_content_refs(doc, page_number, page_id)?;
    let wrap = !existing.is_empty();

    let mut operations = Vec::with_capacity(6);
    if wrap {
        operations.push(Operation::new("Q", vec![]));
    }
    operations.extend([
        Operation::new("q", vec![]),
        Operation::new(
            "cm",
            geometry.image_matrix(rect).into_iter().map(real).collect(),
        ),
        Operation::new("Do", vec![Object::Name(name.clone().into_bytes())]),
        Operation::new("Q", vec![]),
    ]);
    let stamp_content = Content { operations }.encode()?;

    let mut contents = Vec::with_capacity(existing.len() + 2);
    if wrap {
        let save_id = doc.add_object(Stream::new(Dictionary::new(), b"q\n".to_vec()));
        contents.push(Object::Reference(save_id));
        contents.extend(existing);
    }
    let stamp_stream_id = doc.add_object(Stream::new(Dictionary::new(), stamp_content));
    contents.push(Object::Reference(stamp_stream_id));

    let page = doc
        .get_object_mut(page_id)
        .and_then(Object::as_dict_mut)
        .map_err(|_| malformed(page_number, "page is not a dictionary"))?;
    page.set("Resources", resources);
    page.set("Contents", contents);

    debug!(%name, wrapped = wrap, "Stamp drawn on page");
    Ok(name)
}

/// Copy of the resources that apply to a page, inherited ones included.
///
/// The copy is written back inline on the page, so resource dictionaries
/// shared with other pages are never mutated.
fn page_resources(doc: &Document, page_number: u32, page_id: ObjectId) -> Result<Dictionary> {
    match inherited_attribute(doc, page_id, b"Resources") {
        Some(obj) => resolve(doc, obj)
            .and_then(|o| o.as_dict().ok())
            .cloned()
            .ok_or_else(|| malformed(page_number, "Resources is not a dictionary")),
        None => Ok(Dictionary::new()),
    }
}

/// References to the page's existing content streams, in drawing order.
fn page_content_refs(doc: &Document, page_number: u32, page_id: ObjectId) -> Result<Vec<Object>> {
    let page = doc
        .get_object(page_id)
        .and_then(Object::as_dict)
        .map_err(|_| malformed(page_number, "page is not a dictionary"))?;

    match page.get(b"Contents").ok() {
        None | Some(Object::Null) => Ok(Vec::new()),
        Some(Object::Reference(id)) => match doc.get_object(*id) {
            Ok(Object::Array(items)) => Ok(items.clone()),
            Ok(Object::Stream(_)) => Ok(vec![Object::Reference(*id)]),
            _ => Err(malformed(page_number, "Contents does not point to a stream")),
        },
        Some(Object::Array(items)) => Ok(items.clone()),
        Some(_) => Err(malformed(page_number, "Contents is neither a reference nor an array")),
    }
}

/// Look up a page attribute on the page or its nearest ancestor.
fn inherited_attribute<'a>(
    doc: &'a Document,
    page_id: ObjectId,
    key: &[u8],
) -> Option<&'a Object> {
    let mut current = Some(page_id);
    for _ in 0..MAX_TREE_DEPTH {
        let dict = doc.get_object(current?).and_then(Object::as_dict).ok()?;
        if let Ok(value) = dict.get(key) {
            return Some(value);
        }
        current = dict.get(b"Parent").and_then(Object::as_reference).ok();
    }
    None
}

/// An inherited four-number box, normalized to `[llx, lly, urx, ury]`.
fn page_box(doc: &Document, page_id: ObjectId, key: &[u8]) -> Option<[f64; 4]> {
    let arr = inherited_attribute(doc, page_id, key)
        .and_then(|o| resolve(doc, o))
        .and_then(|o| o.as_array().ok())
        .filter(|arr| arr.len() == 4)?;
    let mut v = [0.0; 4];
    for (slot, obj) in v.iter_mut().zip(arr) {
        *slot = f64::from(resolve(doc, obj)?.as_float().ok()?);
    }
    Some([v[0].min(v[2]), v[1].min(v[3]), v[0].max(v[2]), v[1].max(v[3])])
}

fn intersect(a: [f64; 4], b: [f64; 4]) -> Option<[f64; 4]> {
    let clipped = [a[0].max(b[0]), a[1].max(b[1]), a[2].min(b[2]), a[3].min(b[3])];
    (clipped[0] < clipped[2] && clipped[1] < clipped[3]).then_some(clipped)
}

/// Follow a single indirect reference.
fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Object> {
    match obj {
        Object::Reference(id) => doc.get_object(*id).ok(),
        other => Some(other),
    }
}

fn unused_resource_name(xobjects: &Dictionary) -> String {
    (0u32..)
        .map(|i| format!("{STAMP_RESOURCE_PREFIX}{i}"))
        .find(|name| !xobjects.has(name.as_bytes()))
        .unwrap_or_else(|| STAMP_RESOURCE_PREFIX.to_string())
}

#[allow(clippy::cast_possible_truncation)]
fn real(value: f64) -> Object {
    Object::Real(value as f32)
}

fn malformed(page: u32, reason: &str) -> Error {
    Error::MalformedPage {
        page,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    /// Single-page document; `media_box` goes on the page tree root so the
    /// page has to inherit it.
    fn doc_with_page(
        media_box: Option<[i64; 4]>,
        resources: Option<Dictionary>,
    ) -> (Document, ObjectId) {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let content_id =
            doc.add_object(Stream::new(Dictionary::new(), b"0 0 m 10 10 l S\n".to_vec()));
        let mut page = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        };
        if let Some(res) = resources {
            page.set("Resources", res);
        }
        let page_id = doc.add_object(page);

        let mut pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => 1,
        };
        if let Some(mb) = media_box {
            pages.set("MediaBox", mb.iter().map(|v| Object::Integer(*v)).collect::<Vec<_>>());
        }
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        (doc, page_id)
    }

    fn set_page_attr(doc: &mut Document, page_id: ObjectId, key: &str, value: Object) {
        doc.get_object_mut(page_id)
            .and_then(Object::as_dict_mut)
            .unwrap()
            .set(key, value);
    }

    fn int_box(values: [i64; 4]) -> Object {
        Object::Array(values.iter().map(|v| Object::Integer(*v)).collect())
    }

    fn stamp_ops(doc: &Document, page_id: ObjectId) -> Vec<Operation> {
        let bytes = doc.get_page_content(page_id).unwrap();
        Content::decode(&bytes).unwrap().operations
    }

    fn operand(op: &Operation, i: usize) -> f32 {
        op.operands[i].as_float().unwrap()
    }

    #[test]
    fn media_box_is_inherited() {
        let (doc, page_id) = doc_with_page(Some([0, 0, 612, 792]), None);
        let geo = page_dimensions(&doc, 1, page_id).unwrap();
        assert!((geo.width - 612.0).abs() < f64::EPSILON);
        assert!((geo.height - 792.0).abs() < f64::EPSILON);
        assert_eq!(geo.visible, [0.0, 0.0, 612.0, 792.0]);
        assert_eq!(geo.rotation, 0);
    }

    #[test]
    fn media_box_origin_is_reported() {
        let (doc, page_id) = doc_with_page(Some([10, 20, 622, 812]), None);
        let geo = page_dimensions(&doc, 1, page_id).unwrap();
        assert_eq!(geo.visible, [10.0, 20.0, 622.0, 812.0]);
        assert!((geo.width - 612.0).abs() < f64::EPSILON);
    }

    #[test]
    fn crop_box_defines_visible_width() {
        let (mut doc, page_id) = doc_with_page(Some([0, 0, 612, 792]), None);
        set_page_attr(&mut doc, page_id, "CropBox", int_box([0, 0, 400, 400]));

        let geo = page_dimensions(&doc, 1, page_id).unwrap();
        assert!((geo.width - 400.0).abs() < f64::EPSILON);
        assert!((geo.height - 400.0).abs() < f64::EPSILON);

        let rect = crate::placement::placement_rect(
            geo.width,
            320,
            160,
            crate::placement::Placement::Default,
        );
        assert!(rect.left >= 0.0 && rect.right <= 400.0);
    }

    #[test]
    fn crop_box_is_clipped_to_media_box() {
        let (mut doc, page_id) = doc_with_page(Some([0, 0, 612, 792]), None);
        set_page_attr(&mut doc, page_id, "CropBox", int_box([50, -100, 700, 500]));
        let geo = page_dimensions(&doc, 1, page_id).unwrap();
        assert_eq!(geo.visible, [50.0, 0.0, 612.0, 500.0]);

        set_page_attr(&mut doc, page_id, "CropBox", int_box([700, 800, 900, 900]));
        let geo = page_dimensions(&doc, 1, page_id).unwrap();
        assert_eq!(geo.visible, [0.0, 0.0, 612.0, 792.0]);
    }

    #[test]
    fn rotated_page_swaps_width_and_height() {
        let (mut doc, page_id) = doc_with_page(Some([0, 0, 612, 792]), None);
        set_page_attr(&mut doc, page_id, "Rotate", Object::Integer(90));
        let geo = page_dimensions(&doc, 1, page_id).unwrap();
        assert_eq!(geo.rotation, 90);
        assert!((geo.width - 792.0).abs() < f64::EPSILON);
        assert!((geo.height - 612.0).abs() < f64::EPSILON);

        set_page_attr(&mut doc, page_id, "Rotate", Object::Integer(-90));
        let geo = page_dimensions(&doc, 1, page_id).unwrap();
        assert_eq!(geo.rotation, 270);
        assert!((geo.width - 792.0).abs() < f64::EPSILON);
    }

    #[test]
    fn image_matrix_keeps_stamp_upright_on_rotated_pages() {
        let rect = Rect {
            left: 10.0,
            bottom: 20.0,
            right: 40.0,
            top: 60.0,
        };
        let geo = |rotation| PageGeometry {
            visible: [0.0, 0.0, 612.0, 792.0],
            rotation,
            width: 0.0,
            height: 0.0,
        };
        assert_eq!(geo(0).image_matrix(&rect), [30.0, 0.0, 0.0, 40.0, 10.0, 20.0]);
        assert_eq!(geo(90).image_matrix(&rect), [0.0, 30.0, -40.0, 0.0, 592.0, 10.0]);
        assert_eq!(geo(180).image_matrix(&rect), [-30.0, 0.0, 0.0, -40.0, 602.0, 772.0]);
        assert_eq!(geo(270).image_matrix(&rect), [0.0, -30.0, 40.0, 0.0, 20.0, 782.0]);
    }

    #[test]
    fn missing_media_box_is_an_error() {
        let (doc, page_id) = doc_with_page(None, None);
        let err = page_dimensions(&doc, 1, page_id).unwrap_err();
        assert!(matches!(err, Error::MissingMediaBox(1)));
    }

    #[test]
    fn empty_document_has_nothing_to_select() {
        let doc = Document::with_version("1.5");
        assert!(matches!(
            select_pages(&doc, PageSelection::All),
            Err(Error::EmptyDocument)
        ));
    }

    #[test]
    fn embedded_stamp_carries_soft_mask() {
        let (mut doc, _) = doc_with_page(Some([0, 0, 612, 792]), None);
        let mut stamp = RgbaImage::new(3, 2);
        stamp.put_pixel(0, 0, Rgba([200, 10, 10, 255]));

        let id = embed_stamp(&mut doc, &stamp);
        let image = doc.get_object(id).unwrap().as_stream().unwrap();
        assert_eq!(image.dict.get(b"Width").unwrap().as_i64().unwrap(), 3);
        assert_eq!(image.dict.get(b"Height").unwrap().as_i64().unwrap(), 2);
        assert_eq!(image.content.len(), 3 * 2 * 3);
        assert_eq!(&image.content[..3], &[200, 10, 10]);

        let smask_id = image.dict.get(b"SMask").unwrap().as_reference().unwrap();
        let smask = doc.get_object(smask_id).unwrap().as_stream().unwrap();
        assert_eq!(smask.dict.get(b"ColorSpace").unwrap().as_name().unwrap(), b"DeviceGray");
        assert_eq!(smask.content, vec![255, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn overlay_wraps_content_and_draws_stamp() {
        let (mut doc, page_id) = doc_with_page(Some([0, 0, 612, 792]), None);
        let stamp_id = embed_stamp(&mut doc, &RgbaImage::new(4, 2));
        let rect = Rect {
            left: 242.0,
            bottom: 80.0,
            right: 562.0,
            top: 240.0,
        };

        let name = overlay_stamp(&mut doc, 1, page_id, stamp_id, &rect).unwrap();
        assert_eq!(name, "Stamp0");

        let ops = stamp_ops(&doc, page_id);
        let operators: Vec<&str> = ops.iter().map(|o| o.operator.as_str()).collect();
        assert_eq!(operators.first(), Some(&"q"));
        assert_eq!(&operators[operators.len() - 5..], &["Q", "q", "cm", "Do", "Q"]);

        let cm = ops.iter().find(|o| o.operator == "cm").unwrap();
        assert!((operand(cm, 0) - 320.0).abs() < f32::EPSILON);
        assert!((operand(cm, 3) - 160.0).abs() < f32::EPSILON);
        assert!((operand(cm, 4) - 242.0).abs() < f32::EPSILON);
        assert!((operand(cm, 5) - 80.0).abs() < f32::EPSILON);

        let page = doc.get_object(page_id).unwrap().as_dict().unwrap();
        let xobjects = page
            .get(b"Resources")
            .and_then(Object::as_dict)
            .and_then(|r| r.get(b"XObject"))
            .and_then(Object::as_dict)
            .unwrap();
        assert_eq!(xobjects.get(b"Stamp0").unwrap().as_reference().unwrap(), stamp_id);
    }

    #[test]
    fn overlay_offsets_by_visible_box_origin() {
        let (mut doc, page_id) = doc_with_page(Some([10, 20, 622, 812]), None);
        let stamp_id = embed_stamp(&mut doc, &RgbaImage::new(1, 1));
        let rect = Rect {
            left: 5.0,
            bottom: 5.0,
            right: 15.0,
            top: 15.0,
        };
        overlay_stamp(&mut doc, 1, page_id, stamp_id, &rect).unwrap();

        let ops = stamp_ops(&doc, page_id);
        let cm = ops.iter().find(|o| o.operator == "cm").unwrap();
        assert!((operand(cm, 4) - 15.0).abs() < f32::EPSILON);
        assert!((operand(cm, 5) - 25.0).abs() < f32::EPSILON);
    }

    #[test]
    fn overlay_uses_crop_box_and_rotation() {
        let (mut doc, page_id) = doc_with_page(Some([0, 0, 612, 792]), None);
        set_page_attr(&mut doc, page_id, "CropBox", int_box([100, 50, 512, 742]));
        set_page_attr(&mut doc, page_id, "Rotate", Object::Integer(90));
        let stamp_id = embed_stamp(&mut doc, &RgbaImage::new(1, 1));
        let rect = Rect {
            left: 10.0,
            bottom: 20.0,
            right: 40.0,
            top: 60.0,
        };
        overlay_stamp(&mut doc, 1, page_id, stamp_id, &rect).unwrap();

        let ops = stamp_ops(&doc, page_id);
        let cm = ops.iter().find(|o| o.operator == "cm").unwrap();
        let expected = [0.0, 30.0, -40.0, 0.0, 492.0, 60.0];
        for (i, e) in expected.iter().enumerate() {
            assert!((operand(cm, i) - e).abs() < f32::EPSILON, "operand {i}");
        }
    }

    #[test]
    fn overlay_keeps_existing_resources_and_avoids_name_clash() {
        let font_id: ObjectId = (900, 0);
        let other_image: ObjectId = (901, 0);
        let resources = dictionary! {
            "Font" => dictionary! { "F1" => font_id },
            "XObject" => dictionary! { "Stamp0" => other_image },
        };
        let (mut doc, page_id) = doc_with_page(Some([0, 0, 612, 792]), Some(resources));
        let stamp_id = embed_stamp(&mut doc, &RgbaImage::new(1, 1));
        let rect = Rect {
            left: 0.0,
            bottom: 0.0,
            right: 1.0,
            top: 1.0,
        };

        let name = overlay_stamp(&mut doc, 1, page_id, stamp_id, &rect).unwrap();
        assert_eq!(name, "Stamp1");

        let res = doc
            .get_object(page_id)
            .and_then(Object::as_dict)
            .and_then(|p| p.get(b"Resources"))
            .and_then(Object::as_dict)
            .unwrap();
        assert!(res.get(b"Font").unwrap().as_dict().unwrap().has(b"F1"));
        let xobjects = res.get(b"XObject").unwrap().as_dict().unwrap();
        assert_eq!(xobjects.get(b"Stamp0").unwrap().as_reference().unwrap(), other_image);
        assert_eq!(xobjects.get(b"Stamp1").unwrap().as_reference().unwrap(), stamp_id);
    }

    #[test]
    fn page_without_content_gets_only_the_stamp() {
        let (mut doc, page_id) = doc_with_page(Some([0, 0, 100, 100]), None);
        doc.get_object_mut(page_id)
            .and_then(Object::as_dict_mut)
            .unwrap()
            .remove(b"Contents");
        let stamp_id = embed_stamp(&mut doc, &RgbaImage::new(1, 1));
        let rect = Rect {
            left: 0.0,
            bottom: 0.0,
            right: 10.0,
            top: 10.0,
        };
        overlay_stamp(&mut doc, 1, page_id, stamp_id, &rect).unwrap();

        let operators: Vec<String> = stamp_ops(&doc, page_id)
            .into_iter()
            .map(|o| o.operator)
            .collect();
        assert_eq!(operators, vec!["q", "cm", "Do", "Q"]);
    }
}
