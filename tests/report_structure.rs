use mast_report::model::{FlowDocument, FlowElement, Table, TableLines, TextStyle};
use mast_report::report::findings::DETECTED_COLOR;
use mast_report::report::sections::{APP_INFO_LINE_COLOR, LINE_COLOR};
use mast_report::{ReportBuilder, ReportRequest, Translations};
use serde_json::{json, Value};

const SAMPLE_REQUEST: &str = include_str!("../demos/sample_request.json");

fn assemble(value: Value) -> FlowDocument {
    let translations = Translations::embedded();
    let request = ReportRequest::from_value(value).expect("valid request");
    ReportBuilder::new(&translations).assemble(&request)
}

fn tables(document: &FlowDocument) -> (Table, Table, Table) {
    let tables: Vec<Table> = document.tables().cloned().collect();
    assert_eq!(tables.len(), 3, "app info, findings and URL tables expected");
    let mut iter = tables.into_iter();
    (
        iter.next().unwrap(),
        iter.next().unwrap(),
        iter.next().unwrap(),
    )
}

fn demo_request() -> Value {
    json!({
        "system": "demo",
        "rule": {
            "R1": {"title": "T1", "real_mstg": "", "mas": "", "owasp_mobile": "", "desc": ""}
        },
        "result": {
            "url_list": ["http://a"],
            "mast_report": {"R1": {"isDetected": false, "data": []}}
        }
    })
}

#[test]
fn end_to_end_scenario_structure() {
    let mut request = demo_request();
    request["lang"] = json!("en");
    let document = assemble(request);

    let titles = document.paragraphs_with_style(TextStyle::Title);
    assert_eq!(titles.len(), 1);
    assert!(titles[0].contains("demo"));
    assert_eq!(document.title(), titles[0]);

    let (app_info, findings, urls) = tables(&document);
    assert!(app_info.rows().is_empty());

    assert_eq!(findings.rows().len(), 1);
    assert_eq!(findings.rows()[0][0].plain_text(), "Passed");
    assert_eq!(findings.rows()[0][1].plain_text(), "R1 - T1");

    assert_eq!(urls.rows().len(), 1);
    assert_eq!(urls.rows()[0][0].plain_text(), "http://a");
}

#[test]
fn default_locale_is_traditional_chinese() {
    let document = assemble(demo_request());
    let titles = document.paragraphs_with_style(TextStyle::Title);
    assert_eq!(titles[0], "demo 行動應用程式資安檢測報告");
    let (_, findings, _) = tables(&document);
    assert_eq!(findings.rows()[0][0].plain_text(), "通過");
}

#[test]
fn sections_appear_in_fixed_order() {
    let document = assemble(serde_json::from_str(SAMPLE_REQUEST).unwrap());
    assert_eq!(
        document.paragraphs_with_style(TextStyle::SectionHeading),
        vec!["Application Information", "Scan Results", "Discovered URLs"]
    );

    let kinds: Vec<&str> = document
        .elements()
        .iter()
        .take(6)
        .map(|element| match element {
            FlowElement::Paragraph { .. } => "paragraph",
            FlowElement::Table(_) => "table",
            FlowElement::Spacer(_) => "spacer",
            FlowElement::Rule { .. } => "rule",
        })
        .collect();
    assert_eq!(
        kinds,
        vec!["paragraph", "spacer", "rule", "spacer", "rule", "spacer"]
    );

    let weights: Vec<f64> = document
        .elements()
        .iter()
        .filter_map(|element| match element {
            FlowElement::Rule { weight_pt, .. } => Some(*weight_pt),
            _ => None,
        })
        .collect();
    assert_eq!(weights.len(), 2);
    assert!(weights[0] > weights[1]);
}

#[test]
fn findings_rows_follow_catalog_order_and_skip_rules_without_findings() {
    let document = assemble(json!({
        "lang": "en",
        "system": "demo",
        "rule": {
            "C": {"title": "third"},
            "A": {"title": "first"},
            "X": {"title": "no finding"},
            "B": {"title": "second"}
        },
        "result": {
            "url_list": [],
            "mast_report": {
                "A": {"isDetected": true},
                "B": {"isDetected": false},
                "C": {"isDetected": false},
                "Z": {"isDetected": true}
            }
        }
    }));
    let (_, findings, _) = tables(&document);
    let headings: Vec<String> = findings
        .rows()
        .iter()
        .map(|row| row[1].paragraphs()[0].plain_text())
        .collect();
    assert_eq!(headings, vec!["C - third", "A - first", "B - second"]);
    assert_eq!(
        findings.header().map(|cells| cells.len()),
        Some(2),
        "header row is separate from data rows"
    );
}

#[test]
fn detected_rows_use_colored_label() {
    let document = assemble(serde_json::from_str(SAMPLE_REQUEST).unwrap());
    let (_, findings, _) = tables(&document);
    let status: Vec<(String, bool)> = findings
        .rows()
        .iter()
        .map(|row| {
            let span = &row[0].paragraphs()[0].spans()[0];
            (span.text().to_owned(), span.color() == Some(DETECTED_COLOR))
        })
        .collect();
    assert_eq!(
        status,
        vec![
            ("Detected".to_owned(), true),
            ("Passed".to_owned(), false),
            ("Detected".to_owned(), true),
        ]
    );
}

#[test]
fn only_first_detail_entry_is_rendered() {
    let document = assemble(serde_json::from_str(SAMPLE_REQUEST).unwrap());
    let (_, findings, _) = tables(&document);
    let storage = findings.rows()[0][1].plain_text();
    assert!(storage.contains("· com/example/bank/cache/Store.java"));
    assert!(!storage.contains("Export.java"));
}

#[test]
fn malformed_detail_entry_omits_detail_block_only() {
    let document = assemble(serde_json::from_str(SAMPLE_REQUEST).unwrap());
    let (_, findings, _) = tables(&document);
    let debuggable = findings.rows()[2][1].plain_text();
    assert!(debuggable.starts_with("LAB-CODE-01 - Debuggable build"));
    assert!(debuggable.contains("android:debuggable is enabled"));
    assert!(!debuggable.contains("Detail Information"));
    assert!(!debuggable.contains("AndroidManifest.xml"));
}

#[test]
fn empty_fields_leave_no_section_artifacts() {
    let document = assemble(serde_json::from_str(SAMPLE_REQUEST).unwrap());
    let (_, findings, _) = tables(&document);
    let network = findings.rows()[1][1].plain_text();
    assert!(network.contains("MASTG References"));
    assert!(!network.contains("Description"));
    assert!(!network.contains("Detail Information"));
}

#[test]
fn app_info_rows_keep_input_order_with_localized_labels() {
    let document = assemble(serde_json::from_str(SAMPLE_REQUEST).unwrap());
    let (app_info, _, _) = tables(&document);
    let rows: Vec<(String, String)> = app_info
        .rows()
        .iter()
        .map(|row| (row[0].plain_text(), row[1].plain_text()))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("App Name".to_owned(), "Example Bank".to_owned()),
            ("Package Name".to_owned(), "com.example.bank".to_owned()),
            ("Version Name".to_owned(), "4.2.0".to_owned()),
            ("Version Code".to_owned(), "420".to_owned()),
            (
                "SHA-256".to_owned(),
                "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08".to_owned()
            ),
        ]
    );
}

#[test]
fn app_info_key_is_lowercased_before_lookup() {
    let document = assemble(json!({
        "lang": "en",
        "system": "demo",
        "rule": {},
        "result": {"url_list": [], "mast_report": {}, "App_Name": "Mixed", "custom_key": "x"}
    }));
    let (app_info, _, _) = tables(&document);
    assert_eq!(app_info.rows()[0][0].plain_text(), "App Name");
    assert_eq!(app_info.rows()[1][0].plain_text(), "label.custom_key");
}

#[test]
fn url_rows_follow_input_order() {
    let document = assemble(serde_json::from_str(SAMPLE_REQUEST).unwrap());
    let (_, _, urls) = tables(&document);
    let rows: Vec<String> = urls.rows().iter().map(|row| row[0].plain_text()).collect();
    assert_eq!(
        rows,
        vec![
            "https://api.example.com/v1/accounts",
            "http://tracking.example.net/collect"
        ]
    );
}

#[test]
fn empty_url_list_renders_hint_row() {
    let mut request = demo_request();
    request["lang"] = json!("en");
    request["result"]["url_list"] = json!([]);
    let document = assemble(request);
    let (_, _, urls) = tables(&document);
    assert_eq!(urls.rows().len(), 1);
    assert_eq!(
        urls.rows()[0][0].plain_text(),
        "No URLs were discovered in this application."
    );
}

#[test]
fn odd_shapes_still_assemble() {
    let document = assemble(json!({
        "system": null,
        "rule": {"R1": {"title": 7, "mas": null}},
        "result": {"mast_report": {"R1": {"isDetected": "yes", "data": "n/a"}}}
    }));
    let (_, findings, urls) = tables(&document);
    assert_eq!(findings.rows().len(), 1);
    assert_eq!(findings.rows()[0][1].plain_text(), "R1 - 7");
    assert_eq!(urls.rows().len(), 1);
}

#[test]
fn app_info_rows_are_underlined_and_other_tables_boxed() {
    let document = assemble(serde_json::from_str(SAMPLE_REQUEST).unwrap());
    let (app_info, findings, urls) = tables(&document);
    assert_eq!(app_info.frame().lines, TableLines::BelowRows);
    assert_eq!(app_info.frame().color, APP_INFO_LINE_COLOR);
    for table in [&findings, &urls] {
        assert_eq!(table.frame().lines, TableLines::Boxed);
        assert_eq!(table.frame().color, LINE_COLOR);
    }
}

#[test]
fn description_markup_becomes_lines_and_bold_text() {
    let document = assemble(serde_json::from_str(SAMPLE_REQUEST).unwrap());
    let (_, findings, _) = tables(&document);
    let storage = &findings.rows()[0][1];
    let text = storage.plain_text();
    assert!(text.contains(
        "Files created with world readable permissions or on shared storage\ncan be read by other applications."
    ));
    assert!(!text.contains("<b>"));
    assert!(storage
        .paragraphs()
        .iter()
        .flat_map(|paragraph| paragraph.spans())
        .any(|span| span.text() == "world readable" && span.is_bold()));
}

#[test]
fn mistyped_catalog_entries_and_findings_still_assemble() {
    let document = assemble(json!({
        "lang": "en",
        "system": "demo",
        "rule": {"R1": "oops", "R2": {"title": "T2"}},
        "result": {"mast_report": {"R2": true}, "url_list": []}
    }));
    let (_, findings, _) = tables(&document);
    assert_eq!(findings.rows().len(), 1);
    assert_eq!(findings.rows()[0][0].plain_text(), "Passed");
    assert_eq!(findings.rows()[0][1].plain_text(), "R2 - T2");

    let document = assemble(json!({
        "system": "demo",
        "rule": {"R1": {"title": "T1"}},
        "result": {"mast_report": "n/a"}
    }));
    let (_, findings, urls) = tables(&document);
    assert!(findings.rows().is_empty());
    assert_eq!(urls.rows().len(), 1);
}
