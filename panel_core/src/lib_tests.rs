use super::*;
use crate::status::Severity;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64_STD; // Decodes QR data URLs.

/// Mimics the page: one buffer, one status line, each button overwrites both.
struct Page {
    buffer: String,
    message: String,
    color: &'static str,
}

impl Page {
    fn new(text: &str) -> Self {
        Self {
            buffer: text.to_string(),
            message: String::new(),
            color: "",
        }
    }

    fn apply(&mut self, outcome: Outcome) {
        self.color = outcome.status.severity.color();
        self.message = outcome.status.message;
        self.buffer = outcome.buffer;
    }
}

#[test]
fn comma_list_then_sort_flows_through_one_buffer() {
    let mut page = Page::new("pear, apple10, apple9,, Banana");
    page.apply(convert::comma_to_newline(&page.buffer));
    assert_eq!(page.buffer, "pear\napple10\napple9\nBanana");
    assert_eq!(
        page.message,
        "Converted 4 comma-separated values to newlines"
    );
    assert_eq!(page.color, "green");

    page.apply(sort::sort_lines(&page.buffer, "ascending"));
    assert_eq!(page.buffer, "apple9\napple10\nBanana\npear");
    assert_eq!(page.message, "Sorted 4 lines in ascending order");

    page.apply(sort::sort_lines(&page.buffer, "descending"));
    assert_eq!(page.buffer, "pear\nBanana\napple10\napple9");
}

#[test]
fn failed_operation_keeps_buffer_and_turns_status_red() {
    let mut page = Page::new("key: [unclosed");
    page.apply(convert::convert_json_yaml(&page.buffer));
    assert_eq!(page.buffer, "key: [unclosed");
    assert_eq!(page.message, "Invalid JSON or YAML format");
    assert_eq!(page.color, "red");
}

#[test]
fn every_operation_reports_empty_input() {
    let outcomes = [
        convert::convert_json_yaml(""),
        convert::comma_to_newline(""),
        sort::sort_lines("", "ascending"),
        sort::sort_lines("", "descending"),
    ];
    for outcome in outcomes {
        assert_eq!(outcome.buffer, "");
        assert_eq!(outcome.status.message, "Input is empty");
        assert_eq!(outcome.status.severity, Severity::Error);
    }
}

#[test]
fn yaml_round_trip_through_page() {
    let mut page = Page::new("server:\n  host: localhost\n  ports:\n    - 80\n    - 443\n");
    page.apply(convert::convert_json_yaml(&page.buffer));
    assert_eq!(page.message, "Converted YAML to JSON");
    assert_eq!(
        page.buffer,
        "{\n  \"server\": {\n    \"host\": \"localhost\",\n    \"ports\": [\n      80,\n      443\n    ]\n  }\n}"
    );

    page.apply(convert::convert_json_yaml(&page.buffer));
    assert_eq!(page.message, "Converted JSON to YAML");
    let reparsed = convert::json_utils::parse_yaml(&page.buffer).expect("yaml output parses");
    assert_eq!(reparsed["server"]["ports"][1], 443);
}

#[test]
fn report_serializes_in_host_shape() {
    let outcome = sort::sort_lines("b\na", "ascending");
    let json = serde_json::to_value(outcome.to_report()).expect("report serializes");
    assert_eq!(
        json,
        serde_json::json!({
            "buffer": "a\nb",
            "message": "Sorted 2 lines in ascending order",
            "severity": "success",
            "color": "green",
        })
    );
}

#[test]
fn qr_region_renders_buffer_text_as_png() {
    let mut region = QrRegion::new(QrOptions::default()).expect("default options valid");
    let image = region
        .render("https://example.com/?q=1")
        .expect("qr rendered")
        .cloned()
        .expect("image present");

    assert_eq!(image.width, qr::QR_DEFAULT_SIZE);
    assert_eq!(image.height, qr::QR_DEFAULT_SIZE);
    assert_eq!(image.payload, "https://example.com/?q=1");
    let bytes = B64_STD
        .decode(image.data_base64.as_bytes())
        .expect("decode png");
    assert!(
        bytes.starts_with(b"\x89PNG\r\n\x1a\n"),
        "png header must be present"
    );

    region.clear();
    assert!(!region.has_surface());
}

#[test]
fn qr_options_image_serializes_camel_case() {
    let mut region = QrRegion::default();
    let image = region.render("x").expect("render").expect("image");
    let json = serde_json::to_value(image).expect("serialize");
    assert!(json.get("dataUrl").is_some());
    assert!(json.get("dataBase64").is_some());
    assert_eq!(json["format"], "png");
}
