use luamin_ast::{Chunk, Node};
use luamin_emitter::{Options, regenerate};

fn emit_table(fields: Vec<Node>, options: Options) -> String {
    let chunk = Chunk::new(vec![Node::local_assign(
        vec![Node::name("t")],
        vec![Node::table(fields)],
    )]);
    let out = regenerate(&Ok(chunk), options).expect("regenerate").text;
    out.strip_prefix("local t = ")
        .expect("assignment prefix")
        .to_string()
}

fn positional(values: &[&str]) -> Vec<Node> {
    values.iter().map(|v| Node::field(Node::number(*v))).collect()
}

#[test]
fn test_empty_table() {
    assert_eq!(emit_table(vec![], Options::default()), "{}");
}

#[test]
fn test_single_field_stays_inline() {
    assert_eq!(emit_table(positional(&["1"]), Options::default()), "{1}");
}

#[test]
fn test_fields_go_one_per_line() {
    let out = emit_table(positional(&["1", "2", "3"]), Options::default());
    assert_eq!(out, "{\n\t1,\n\t2,\n\t3\n}");
}

#[test]
fn test_separator_count_is_one_less_than_fields() {
    let out = emit_table(positional(&["1", "2", "3", "4", "5"]), Options::default());
    assert_eq!(out.matches(',').count(), 4);
    assert!(!out.contains(",\n}"));
}

#[test]
fn test_separator_count_holds_with_comments_kept() {
    let names = ["one", "two", "three", "four", "five"];
    let fields: Vec<Node> = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            Node::field(Node::number((i + 1).to_string()))
                .with_leading_comment(format!("-- before {name}"))
                .with_trailing_comment(format!("-- after {name}"))
        })
        .collect();
    let options = Options {
        keep_comments: true,
        ..Options::default()
    };
    let out = emit_table(fields, options);

    assert_eq!(out.matches(',').count(), names.len() - 1);
    assert!(out.starts_with('{') && out.ends_with('}'));
    for name in names {
        assert!(out.contains(&format!("-- before {name}")), "{out}");
        assert!(out.contains(&format!("-- after {name}")), "{out}");
    }
    // A line comment always ends its line.
    for line in out.lines() {
        if let Some(at) = line.find("--") {
            let comment = &line[at..];
            assert!(
                comment.starts_with("-- before ") || comment.starts_with("-- after "),
                "code after a line comment: {line:?}"
            );
            assert!(!comment.contains(','), "code after a line comment: {line:?}");
        }
    }
}

#[test]
fn test_named_fields() {
    let fields = vec![
        Node::named_field("x", Node::number("1")),
        Node::named_field("y", Node::number("2")),
    ];
    let out = emit_table(fields, Options::default());
    assert_eq!(out, "{\n\tx = 1,\n\ty = 2\n}");
}

#[test]
fn test_named_fields_keep_brackets_when_asked() {
    let fields = vec![
        Node::named_field("x", Node::number("1")),
        Node::named_field("y", Node::number("2")),
    ];
    let options = Options {
        keep_table_field_brackets: true,
        ..Options::default()
    };
    let out = emit_table(fields, options);
    assert_eq!(out, "{\n\t[\"x\"] = 1,\n\t[\"y\"] = 2\n}");
}

#[test]
fn test_expression_keys_use_brackets() {
    let fields = vec![Node::keyed_field(Node::number("1"), Node::string("a"))];
    assert_eq!(emit_table(fields, Options::default()), "{[1] = \"a\"}");

    let fields = vec![Node::keyed_field(Node::string("k"), Node::boolean(true))];
    assert_eq!(emit_table(fields, Options::default()), "{[\"k\"] = true}");
}

#[test]
fn test_bracketed_name_key_is_not_rewritten() {
    // `{[x] = 1}` indexes by the value of `x`, not by the string "x".
    let fields = vec![Node::keyed_field(Node::name("x"), Node::number("1"))];
    assert_eq!(emit_table(fields, Options::default()), "{[x] = 1}");
}

#[test]
fn test_nested_table_indents_one_level_deeper() {
    let inner = Node::table(positional(&["2", "3"]));
    let fields = vec![Node::field(Node::number("1")), Node::field(inner)];
    let out = emit_table(fields, Options::default());
    assert_eq!(out, "{\n\t1,\n\t{\n\t\t2,\n\t\t3\n\t}\n}");
}

#[test]
fn test_function_value_in_table() {
    let fields = vec![
        Node::named_field("n", Node::number("1")),
        Node::named_field(
            "f",
            Node::anonymous_function(vec![], vec![Node::ret(vec![Node::name("n")])]),
        ),
    ];
    let out = emit_table(fields, Options::default());
    assert_eq!(out, "{\n\tn = 1,\n\tf = function()\n\t\treturn n\n\tend\n}");
}
