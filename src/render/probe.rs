//! Intrinsic size of rendered images.

use crate::model::RenderError;
use crate::viewport::Extent;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Size of an SVG document taken from its root element.
///
/// `width`/`height` win; units `pt` and `px` are stripped, percentages are
/// ignored. Without both, the last two numbers of `viewBox` are used.
pub fn svg_size(markup: &str) -> Result<Extent, RenderError> {
    let mut reader = Reader::from_str(markup);
    loop {
        match reader.read_event() {
            Ok(Event::Start(element)) | Ok(Event::Empty(element)) => {
                if element.local_name().as_ref() != b"svg" {
                    let name = String::from_utf8_lossy(element.name().as_ref()).into_owned();
                    return Err(RenderError::MalformedSvg(format!(
                        "root element is <{name}>, expected <svg>"
                    )));
                }
                return size_of_root(&element);
            }
            Ok(Event::Eof) => {
                return Err(RenderError::MalformedSvg(
                    "document has no <svg> element".to_string(),
                ))
            }
            // declaration, doctype, comments, whitespace
            Ok(_) => {}
            Err(e) => return Err(RenderError::MalformedSvg(e.to_string())),
        }
    }
}

fn size_of_root(element: &BytesStart<'_>) -> Result<Extent, RenderError> {
    let mut width = None;
    let mut height = None;
    let mut view_box = None;

    for attr in element.attributes() {
        let attr = attr.map_err(|e| RenderError::MalformedSvg(e.to_string()))?;
        let value = String::from_utf8_lossy(&attr.value).into_owned();
        match attr.key.local_name().as_ref() {
            b"width" => width = parse_length(&value),
            b"height" => height = parse_length(&value),
            b"viewBox" => view_box = parse_view_box(&value),
            _ => {}
        }
    }

    match (width, height, view_box) {
        (Some(w), Some(h), _) => Ok(Extent::new(w, h)),
        (_, _, Some(extent)) => Ok(extent),
        _ => Err(RenderError::MalformedSvg(
            "root <svg> has neither width/height nor viewBox".to_string(),
        )),
    }
}

fn parse_length(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.ends_with('%') {
        return None;
    }
    let number = raw
        .strip_suffix("pt")
        .or_else(|| raw.strip_suffix("px"))
        .unwrap_or(raw);
    number.trim().parse::<f64>().ok().filter(|v| v.is_finite() && *v >= 0.0)
}

fn parse_view_box(raw: &str) -> Option<Extent> {
    let numbers: Vec<f64> = raw
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(str::parse::<f64>)
        .collect::<Result<_, _>>()
        .ok()?;
    match numbers.as_slice() {
        [_, _, w, h] => Some(Extent::new(*w, *h)),
        _ => None,
    }
}

/// Pixel size of a PNG image, read from its IHDR chunk.
pub fn png_size(bytes: &[u8]) -> Result<Extent, RenderError> {
    if bytes.len() < 24 || bytes[..8] != PNG_SIGNATURE {
        return Err(RenderError::MalformedRaster(
            "missing PNG signature".to_string(),
        ));
    }
    if &bytes[12..16] != b"IHDR" {
        return Err(RenderError::MalformedRaster(
            "first chunk is not IHDR".to_string(),
        ));
    }
    let width = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
    let height = u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);
    Ok(Extent::new(f64::from(width), f64::from(height)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRAPHVIZ_SVG: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>
<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN"
 "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd">
<!-- Generated by graphviz -->
<svg width="62pt" height="116pt"
 viewBox="0.00 0.00 62.00 116.00" xmlns="http://www.w3.org/2000/svg">
<g id="graph0" class="graph"></g>
</svg>"#;

    fn png_header(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = PNG_SIGNATURE.to_vec();
        bytes.extend_from_slice(&13u32.to_be_bytes());
        bytes.extend_from_slice(b"IHDR");
        bytes.extend_from_slice(&width.to_be_bytes());
        bytes.extend_from_slice(&height.to_be_bytes());
        bytes.extend_from_slice(&[8, 6, 0, 0, 0]);
        bytes
    }

    #[test]
    fn svg_size_reads_point_dimensions() {
        assert_eq!(svg_size(GRAPHVIZ_SVG).unwrap(), Extent::new(62.0, 116.0));
    }

    #[test]
    fn svg_size_falls_back_to_view_box() {
        let svg = r#"<svg viewBox="0,0,300,150" xmlns="http://www.w3.org/2000/svg"/>"#;
        assert_eq!(svg_size(svg).unwrap(), Extent::new(300.0, 150.0));
    }

    #[test]
    fn svg_size_ignores_percentages() {
        let svg = r#"<svg width="100%" height="100%" viewBox="0 0 40 20"></svg>"#;
        assert_eq!(svg_size(svg).unwrap(), Extent::new(40.0, 20.0));
    }

    #[test]
    fn svg_size_accepts_unitless_and_px() {
        let svg = r#"<svg width="640" height="480px"></svg>"#;
        assert_eq!(svg_size(svg).unwrap(), Extent::new(640.0, 480.0));
    }

    #[test]
    fn svg_without_dimensions_is_malformed() {
        let err = svg_size("<svg></svg>").unwrap_err();
        assert!(matches!(err, RenderError::MalformedSvg(_)));
    }

    #[test]
    fn non_svg_root_is_malformed() {
        let err = svg_size("<html><body/></html>").unwrap_err();
        assert!(err.to_string().contains("<html>"));
    }

    #[test]
    fn empty_document_is_malformed() {
        assert!(matches!(svg_size(""), Err(RenderError::MalformedSvg(_))));
    }

    #[test]
    fn png_size_reads_ihdr() {
        assert_eq!(png_size(&png_header(320, 200)).unwrap(), Extent::new(320.0, 200.0));
    }

    #[test]
    fn png_size_rejects_other_bytes() {
        assert!(matches!(
            png_size(b"GIF89a............................"),
            Err(RenderError::MalformedRaster(_))
        ));
        assert!(png_size(&PNG_SIGNATURE).is_err());
    }
}
