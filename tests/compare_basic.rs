use std::path::PathBuf;

use pretty_assertions::assert_eq;
use xml_compare_core::{
    compare, compare_with_options, format_json, format_summary, format_text, parse, parse_file,
    ComparisonEvent, ComparisonOptions, Difference, NodeContent, RecordingListener, XmlNode,
};

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(path)
}

fn run(control: Option<&XmlNode>, test: Option<&XmlNode>) -> RecordingListener {
    let mut listener = RecordingListener::new();
    compare(control, test, &mut listener);
    listener
}

#[test]
fn identical_trees_invoke_listener_zero_times() {
    let xml = br#"<root a="1"><child>text</child><!--note--></root>"#;
    let control = parse(xml).expect("parse control");
    let test = parse(xml).expect("parse test");

    let listener = run(Some(&control), Some(&test));
    assert!(listener.events().is_empty());
}

#[test]
fn absent_test_node_reports_null_vs_not_null() {
    let control = XmlNode::element("root");

    let listener = run(Some(&control), None);
    assert_eq!(
        listener.events(),
        &[ComparisonEvent::Difference {
            kind: Difference::NodeType,
            recoverable: false,
            expected: "not null".to_string(),
            actual: "null".to_string(),
            control: Some("<root/>".to_string()),
            test: None,
        }]
    );
}

#[test]
fn absent_control_node_reports_null_vs_not_null_and_stops() {
    let test = XmlNode::element("root");

    let listener = run(None, Some(&test));
    assert_eq!(
        listener.events(),
        &[ComparisonEvent::Difference {
            kind: Difference::NodeType,
            recoverable: false,
            expected: "null".to_string(),
            actual: "not null".to_string(),
            control: None,
            test: Some("<root/>".to_string()),
        }]
    );
}

#[test]
fn two_absent_nodes_are_equal() {
    let listener = run(None, None);
    assert!(listener.events().is_empty());
}

#[test]
fn node_kind_mismatch_fires_exactly_one_callback() {
    let control = parse(br#"<root><child/></root>"#).expect("parse control");
    let test = XmlNode::text("root");

    let listener = run(Some(&control), Some(&test));
    assert_eq!(listener.differences(), vec![Difference::NodeType]);

    let [ComparisonEvent::Difference {
        expected, actual, ..
    }] = listener.events()
    else {
        panic!("expected a single difference event");
    };
    assert_eq!(expected, "element");
    assert_eq!(actual, "text");
}

#[test]
fn text_value_difference_aborts_after_one_report() {
    let control = parse(br#"<root>one</root>"#).expect("parse control");
    let test = parse(br#"<root>two</root>"#).expect("parse test");

    let listener = run(Some(&control), Some(&test));
    assert_eq!(listener.differences(), vec![Difference::TextValue]);
}

#[test]
fn repeated_comparison_yields_identical_callbacks() {
    let control = parse_file(&fixture("fixtures/report_a.xml")).expect("parse control");
    let test = parse_file(&fixture("fixtures/report_b.xml")).expect("parse test");

    let first = run(Some(&control), Some(&test));
    let second = run(Some(&control), Some(&test));
    assert_eq!(first.events(), second.events());

    // Attribute reordering surfaces before the fatal text difference.
    assert_eq!(
        first.differences(),
        vec![
            Difference::AttributeSequence,
            Difference::AttributeSequence,
            Difference::TextValue,
        ]
    );
}

#[test]
fn ignore_whitespace_trims_outer_whitespace_only() {
    let opts = ComparisonOptions {
        ignore_whitespace: true,
    };

    let control = parse(br#"<root> x </root>"#).expect("parse control");
    let test = parse(br#"<root>x</root>"#).expect("parse test");
    let mut listener = RecordingListener::new();
    compare_with_options(Some(&control), Some(&test), &mut listener, &opts);
    assert!(listener.events().is_empty());

    // Internal whitespace is never collapsed.
    let control = parse(br#"<root>a b</root>"#).expect("parse control");
    let test = parse(br#"<root>a  b</root>"#).expect("parse test");
    let mut listener = RecordingListener::new();
    compare_with_options(Some(&control), Some(&test), &mut listener, &opts);
    assert_eq!(listener.differences(), vec![Difference::TextValue]);

    let control = parse(br#"<root> x </root>"#).expect("parse control");
    let test = parse(br#"<root>y</root>"#).expect("parse test");
    let mut listener = RecordingListener::new();
    compare_with_options(Some(&control), Some(&test), &mut listener, &opts);
    assert_eq!(listener.differences(), vec![Difference::TextValue]);
}

#[test]
fn whitespace_differences_are_reported_by_default() {
    let control = parse(br#"<root> x </root>"#).expect("parse control");
    let test = parse(br#"<root>x</root>"#).expect("parse test");

    let listener = run(Some(&control), Some(&test));
    assert_eq!(listener.differences(), vec![Difference::TextValue]);
}

#[test]
fn unsupported_node_kinds_are_skipped_not_compared() {
    let other = XmlNode {
        namespace_uri: None,
        prefix: None,
        children: Vec::new(),
        content: NodeContent::Other,
    };

    let listener = run(Some(&other), Some(&other.clone()));
    assert_eq!(
        listener.events(),
        &[ComparisonEvent::Skipped {
            control: "#other".to_string(),
            test: "#other".to_string(),
        }]
    );
}

#[test]
fn namespace_prefix_difference_is_recoverable() {
    let mut control = XmlNode::element("item");
    control.prefix = Some("a".to_string());
    control.children.push(XmlNode::text("one"));
    let mut test = XmlNode::element("item");
    test.prefix = Some("b".to_string());
    test.children.push(XmlNode::text("two"));

    // The walk continues past the prefix difference and still reaches the
    // fatal text difference below it.
    let listener = run(Some(&control), Some(&test));
    assert_eq!(
        listener.differences(),
        vec![Difference::NamespacePrefix, Difference::TextValue]
    );
}

#[test]
fn namespace_uri_difference_is_fatal() {
    let mut control = XmlNode::element("item");
    control.namespace_uri = Some("urn:a".to_string());
    let mut test = XmlNode::element("item");
    test.namespace_uri = Some("urn:b".to_string());

    let listener = run(Some(&control), Some(&test));
    assert_eq!(listener.differences(), vec![Difference::NamespaceUri]);
}

#[test]
fn doctype_nodes_compare_name_and_identifiers() {
    let control = XmlNode::document_type(
        "report",
        Some("-//EX//DTD report//EN".to_string()),
        Some("http://example.com/report.dtd".to_string()),
    );
    let matching = control.clone();
    let listener = run(Some(&control), Some(&matching));
    assert!(listener.events().is_empty());

    let test = XmlNode::document_type(
        "report",
        None,
        Some("http://example.com/report.dtd".to_string()),
    );
    let listener = run(Some(&control), Some(&test));
    assert_eq!(listener.differences(), vec![Difference::DoctypePublicId]);

    let [ComparisonEvent::Difference { actual, .. }] = listener.events() else {
        panic!("expected a single difference event");
    };
    assert_eq!(actual, "null");
}

#[test]
fn processing_instruction_data_difference_is_fatal() {
    let control =
        XmlNode::processing_instruction("xml-stylesheet", Some("href=\"a.xsl\"".to_string()));
    let test =
        XmlNode::processing_instruction("xml-stylesheet", Some("href=\"b.xsl\"".to_string()));

    let listener = run(Some(&control), Some(&test));
    assert_eq!(
        listener.differences(),
        vec![Difference::ProcessingInstructionData]
    );
}

#[test]
fn formatters_render_recorded_events() {
    let control = parse_file(&fixture("fixtures/report_a.xml")).expect("parse control");
    let test = parse_file(&fixture("fixtures/report_b.xml")).expect("parse test");
    let listener = run(Some(&control), Some(&test));

    let text = format_text(listener.events());
    assert!(text.contains("~ sequence of attributes"));
    assert!(text.contains("! text value"));

    let json = format_json(listener.events());
    assert!(json.contains("\"type\""));

    let summary = format_summary(listener.events());
    assert_eq!(summary, "differences=3 recoverable=2 fatal=1 skipped=0");
}
