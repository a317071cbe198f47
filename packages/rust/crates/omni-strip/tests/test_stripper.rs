//! Tests for the call stripper - matching rules and rewrite output.

use omni_strip::{CallStripper, MatchSpan};

fn strip(text: &str) -> String {
    CallStripper::default().strip(text).modified
}

#[test]
fn test_text_without_calls_is_unchanged() {
    let samples = [
        "",
        "const x = 1;\nfunction f() { return x; }\n",
        "console.error('kept');\nlogger.log(1);\n",
        "const s = \"console.log\";\n",
        "console.log\n",
    ];
    for text in samples {
        let result = CallStripper::default().strip(text);
        assert_eq!(result.modified, text);
        assert!(result.is_unchanged());
    }
}

#[test]
fn test_single_call_with_semicolon() {
    let text = "a;\nconsole.log(\"x\", 1, f(2));\nb;";
    assert_eq!(strip(text), "a;\n\nb;");
}

#[test]
fn test_single_call_without_semicolon() {
    assert_eq!(strip("if (x) console.log(x)\nnext()"), "if (x) \nnext()");
}

#[test]
fn test_escaped_quotes_do_not_end_literal() {
    assert_eq!(strip(r#"console.log("a\"b");rest"#), "rest");
    assert_eq!(strip(r#"console.log("a\") b");rest"#), "rest");
    assert_eq!(strip(r"console.log('it\'s');rest"), "rest");
    assert_eq!(strip(r"console.log(`tick \` (`);rest"), "rest");
}

#[test]
fn test_literals_hide_parentheses() {
    assert_eq!(strip("console.log(')', \"(\", `)`);x"), "x");
    assert_eq!(strip("console.log(`value: ${fn(a)}`);x"), "x");
}

#[test]
fn test_two_calls_on_one_line() {
    let text = "x(); console.log(1); y(); console.log('z'); z();";
    assert_eq!(strip(text), "x();  y();  z();");
}

#[test]
fn test_spans_are_ordered_and_disjoint() {
    let text = "ab console.log(1); cd console.log(2)";
    let spans = CallStripper::default().find_spans(text);
    assert_eq!(
        spans,
        vec![
            MatchSpan { start: 3, end: 18 },
            MatchSpan { start: 22, end: 36 },
        ]
    );
    assert_eq!(&text[spans[0].range()], "console.log(1);");
}

#[test]
fn test_one_level_of_nesting_is_removed() {
    assert_eq!(strip("console.log(a(b,c));done"), "done");
    assert_eq!(strip("console.log('n', JSON.stringify(obj, null, 2));done"), "done");
}

#[test]
fn test_deeper_nesting_is_left_in_place() {
    // Two levels exceed the default bound; the call is kept verbatim.
    let text = "before(); console.log(a(b(c))); after();";
    assert_eq!(strip(text), text);
}

#[test]
fn test_deeper_nesting_with_raised_limit() {
    let stripper = CallStripper::new(["console.log"], 2);
    let result = stripper.strip("before(); console.log(a(b(c))); after();");
    assert_eq!(result.modified, "before();  after();");
}

#[test]
fn test_unterminated_call_is_left_in_place() {
    let text = "console.log('never closed';\nfoo();\n";
    assert_eq!(strip(text), text);
    let text = "console.log(a, b\nfoo();\n";
    assert_eq!(strip(text), text);
}

#[test]
fn test_callee_match_is_not_word_bounded() {
    // Callee search is a plain substring scan.
    assert_eq!(strip("myconsole.log(1);"), "my");
}

#[test]
fn test_multiple_callees() {
    let stripper = CallStripper::new(["console.log", "console.debug"], 1);
    let text = "a();console.debug('d');b();console.log('l');c();console.warn('w');";
    assert_eq!(
        stripper.strip(text).modified,
        "a();b();c();console.warn('w');"
    );
}

#[test]
fn test_crlf_line_endings_preserved() {
    assert_eq!(
        strip("a();\r\nconsole.log(1);\r\nb();\r\n"),
        "a();\r\n\r\nb();\r\n"
    );
}

#[test]
fn test_idempotent() {
    let samples = [
        "a();\nconsole.log(1);\nconsole.log(\"x\", f(2)) ;\n",
        "console.log(console.log(1));",
        "x console.log('a\\'b'); y",
        "nothing to do here",
    ];
    let stripper = CallStripper::default();
    for text in samples {
        let once = stripper.strip(text).modified;
        let twice = stripper.strip(&once).modified;
        assert_eq!(once, twice, "input: {text:?}");
    }
}
