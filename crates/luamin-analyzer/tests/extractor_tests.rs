use luamin_analyzer::{AnalysisFailure, extract_elements};
use luamin_ast::{Chunk, Node, ParseFailure, SourceTree, StringDelimiter};

#[test]
fn test_strings_and_comments_in_source_order() {
    let tree: SourceTree = Ok(Chunk::new(vec![
        Node::comment("-- header").at(1, 1),
        Node::local_assign(
            vec![Node::name("a")],
            vec![Node::string_with("one", StringDelimiter::SingleQuote).at(2, 11)],
        )
        .at(2, 1)
        .with_trailing_comment("-- after a"),
        Node::call(
            Node::name("print"),
            vec![Node::string_with("two", StringDelimiter::DoubleSquare).at(3, 7)],
        )
        .at(3, 1),
    ]));
    let elements = extract_elements(&tree).expect("extract");

    let strings: Vec<(&str, Option<u32>)> = elements
        .strings
        .iter()
        .map(|e| (e.text.as_str(), e.line))
        .collect();
    assert_eq!(strings, vec![("one", Some(2)), ("two", Some(3))]);

    let comments: Vec<&str> = elements.comments.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(comments, vec!["-- header", "-- after a"]);
    assert_eq!(elements.comments[1].column, Some(1));
}

#[test]
fn test_nested_strings_are_found() {
    let tree: SourceTree = Ok(Chunk::new(vec![Node::local_function(
        "f",
        vec![],
        vec![Node::ret(vec![Node::table(vec![Node::keyed_field(
            Node::string("k"),
            Node::string("v"),
        )])])],
    )]));
    let elements = extract_elements(&tree).expect("extract");
    let texts: Vec<&str> = elements.strings.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(texts, vec!["k", "v"]);
    assert_eq!(elements.strings[0].line, None);
}

#[test]
fn test_serializes_as_two_groups() {
    let tree: SourceTree = Ok(Chunk::new(vec![Node::ret(vec![Node::string("x").at(1, 8)])]));
    let elements = extract_elements(&tree).expect("extract");
    let json = serde_json::to_string(&elements).expect("json");
    assert_eq!(
        json,
        r#"{"strings":[{"line":1,"column":8,"text":"x"}],"comments":[]}"#
    );
}

#[test]
fn test_parse_failure_is_reported() {
    let tree: SourceTree = Err(ParseFailure::new("bad"));
    assert_eq!(
        extract_elements(&tree),
        Err(AnalysisFailure::Parse(ParseFailure::new("bad")))
    );
}
