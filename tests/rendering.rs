use mast_report::fonts::{self, FontStore};
use mast_report::{ReportBuilder, ReportRequest, Translations};
use sha2::{Digest, Sha256};

const SAMPLE_REQUEST: &[u8] = include_bytes!("../demos/sample_request.json");

fn render_sample_pdf(store: &FontStore) -> Option<Vec<u8>> {
    if !store.is_available() {
        return None;
    }

    let translations = Translations::embedded();
    let request = ReportRequest::from_slice(SAMPLE_REQUEST).expect("sample request is valid");
    let bytes = ReportBuilder::new(&translations)
        .render(&request, store)
        .expect("render sample pdf")
        .bytes;

    Some(bytes)
}

fn scrub_pdf(bytes: &[u8]) -> Vec<u8> {
    fn scrub_segment(data: &mut [u8], tag: &[u8], terminator: u8) {
        let mut index = 0;
        while index + tag.len() < data.len() {
            if data[index..].starts_with(tag) {
                let mut cursor = index + tag.len();
                while cursor < data.len() {
                    let byte = data[cursor];
                    if byte == terminator {
                        break;
                    }
                    if terminator == b')' {
                        data[cursor] = b'0';
                    } else if !matches!(byte, b'<' | b'>' | b' ' | b'\n' | b'\r' | b'\t') {
                        data[cursor] = b'0';
                    }
                    cursor += 1;
                }
                index = cursor;
            } else {
                index += 1;
            }
        }
    }

    fn scrub_xml(data: &mut [u8], start: &[u8], end: &[u8]) {
        let mut offset = 0;
        while offset + start.len() < data.len() {
            let Some(start_pos) = data[offset..]
                .windows(start.len())
                .position(|window| window == start)
            else {
                break;
            };
            let start_index = offset + start_pos + start.len();
            let Some(end_pos) = data[start_index..]
                .windows(end.len())
                .position(|window| window == end)
            else {
                break;
            };
            for byte in &mut data[start_index..start_index + end_pos] {
                if !matches!(*byte, b'<' | b'>' | b'/' | b' ' | b'\n' | b'\r' | b'\t') {
                    *byte = b'0';
                }
            }
            offset = start_index + end_pos + end.len();
        }
    }

    let mut normalized = bytes.to_vec();
    let string_tags: [&[u8]; 3] = [b"/CreationDate(", b"/ModDate(", b"/Producer("];
    for tag in string_tags {
        scrub_segment(&mut normalized, tag, b')');
    }
    scrub_segment(&mut normalized, b"/ID[", b']');
    let xml_tags: [(&[u8], &[u8]); 6] = [
        (b"<xmp:CreateDate>", b"</xmp:CreateDate>"),
        (b"<xmp:ModifyDate>", b"</xmp:ModifyDate>"),
        (b"<xmp:MetadataDate>", b"</xmp:MetadataDate>"),
        (b"<xmpMM:DocumentID>", b"</xmpMM:DocumentID>"),
        (b"<xmpMM:InstanceID>", b"</xmpMM:InstanceID>"),
        (b"<xmpMM:VersionID>", b"</xmpMM:VersionID>"),
    ];
    for (start, end) in xml_tags {
        scrub_xml(&mut normalized, start, end);
    }
    normalized
}

fn normalized_hash(bytes: &[u8]) -> [u8; 32] {
    let normalized = scrub_pdf(bytes);
    let digest = Sha256::digest(&normalized);
    digest.into()
}

#[test]
fn renders_parseable_pdf() {
    let store = FontStore::default();
    let Some(bytes) = render_sample_pdf(&store) else {
        eprintln!(
            "Skipping renders_parseable_pdf: report fonts missing. Set MAST_REPORT_FONTS_DIR or copy assets/fonts next to the binary."
        );
        return;
    };

    assert!(bytes.starts_with(b"%PDF-"), "output must be a PDF document");
    let document = lopdf::Document::load_mem(&bytes).expect("rendered PDF parses");
    assert!(!document.get_pages().is_empty(), "report has at least one page");
}

#[test]
fn rendering_is_deterministic() {
    let store = FontStore::default();
    let Some(bytes_a) = render_sample_pdf(&store) else {
        eprintln!(
            "Skipping rendering_is_deterministic: report fonts missing. Set MAST_REPORT_FONTS_DIR or copy assets/fonts next to the binary."
        );
        return;
    };
    let Some(bytes_b) = render_sample_pdf(&store) else {
        return;
    };

    assert_eq!(bytes_a.len(), bytes_b.len(), "PDF sizes should match");
    assert_eq!(
        normalized_hash(&bytes_a),
        normalized_hash(&bytes_b),
        "PDF renders must be deterministic after metadata normalization"
    );
}

#[test]
fn missing_fonts_are_reported_as_font_errors() {
    if fonts::default_fonts_available() {
        return;
    }
    let store = FontStore::default();
    let translations = Translations::embedded();
    let request = ReportRequest::from_slice(SAMPLE_REQUEST).expect("sample request is valid");
    let err = ReportBuilder::new(&translations)
        .render(&request, &store)
        .expect_err("render fails without fonts");
    assert!(err.to_string().starts_with("failed to load fonts"));
}
