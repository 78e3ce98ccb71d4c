use luamin_analyzer::{AnalysisFailure, BlockId, analyze_nesting};
use luamin_ast::{Block, Chunk, ElseBranch, Node, ParseFailure, SourceTree, UnaryOperator};
use serde_json::json;

fn print(arg: &str) -> Node {
    Node::call(Node::name("print"), vec![Node::number(arg)])
}

/// `if a then if b then print(1) end end`
fn nested_ifs() -> SourceTree {
    let inner = Node::if_then(Node::name("b"), vec![print("1").at(3, 3)], None);
    Ok(Chunk::new(vec![Node::if_then(
        Node::name("a"),
        vec![inner],
        None,
    )]))
}

fn level_sizes(tree: &SourceTree) -> Vec<usize> {
    analyze_nesting(tree)
        .per_level_blocks()
        .iter()
        .map(Vec::len)
        .collect()
}

#[test]
fn test_nested_ifs_record_one_block_per_level() {
    let tree = nested_ifs();
    let report = analyze_nesting(&tree);
    assert!(report.ok());
    assert_eq!(level_sizes(&tree), vec![1, 1, 1]);
    assert_eq!(report.max_nested_depth(), 2);
}

#[test]
fn test_top_level_only_has_depth_zero() {
    let tree: SourceTree = Ok(Chunk::new(vec![print("1"), print("2")]));
    let report = analyze_nesting(&tree);
    assert_eq!(level_sizes(&tree), vec![1]);
    assert_eq!(report.max_nested_depth(), 0);

    let empty: SourceTree = Ok(Chunk::default());
    assert_eq!(analyze_nesting(&empty).max_nested_depth(), 0);
}

#[test]
fn test_loop_containing_if() {
    let tree: SourceTree = Ok(Chunk::new(vec![Node::fornum(
        "i",
        Node::number("1"),
        Node::number("3"),
        None,
        vec![Node::if_then(Node::name("x"), vec![print("1")], None)],
    )]));
    assert_eq!(analyze_nesting(&tree).max_nested_depth(), 2);
}

#[test]
fn test_branches_share_a_level() {
    let else_if = Node::else_if(
        Node::name("b"),
        vec![print("2")],
        Some(ElseBranch::Else(Block::new(vec![print("3")]))),
    );
    let tree: SourceTree = Ok(Chunk::new(vec![Node::if_then(
        Node::name("a"),
        vec![print("1")],
        Some(ElseBranch::ElseIf(Box::new(else_if))),
    )]));
    let report = analyze_nesting(&tree);
    assert_eq!(level_sizes(&tree), vec![1, 3]);
    for block in &report.per_level_blocks()[1] {
        assert_eq!(block.parent, Some(BlockId(0)));
    }
}

#[test]
fn test_function_bodies_inside_expressions_are_counted() {
    let func = Node::anonymous_function(
        vec![],
        vec![Node::if_then(Node::name("a"), vec![], None)],
    );
    let tree: SourceTree = Ok(Chunk::new(vec![Node::local_assign(
        vec![Node::name("t")],
        vec![Node::table(vec![Node::named_field("f", func)])],
    )]));
    assert_eq!(analyze_nesting(&tree).max_nested_depth(), 2);
}

#[test]
fn test_parents_link_to_enclosing_blocks() {
    let tree = nested_ifs();
    let report = analyze_nesting(&tree);
    let innermost = &report.per_level_blocks()[2][0];
    assert_eq!(innermost.id, BlockId(2));

    let parent = report.parent_of(innermost).expect("parent");
    assert_eq!(parent.level, 1);
    let root = report.parent_of(parent).expect("root");
    assert_eq!(root.level, 0);
    assert!(report.parent_of(root).is_none());
}

#[test]
fn test_parse_failure_yields_no_data() {
    let tree: SourceTree = Err(ParseFailure::new("unexpected symbol").at(1, 5));
    let report = analyze_nesting(&tree);
    assert!(!report.ok());
    assert_eq!(report.max_nested_depth(), 0);
    assert!(report.per_level_blocks().is_empty());
    assert!(matches!(report.failure(), Some(AnalysisFailure::Parse(_))));
    assert!(!report.exceeds(0));
}

#[test]
fn test_deep_tree_fails_instead_of_overflowing() {
    let handle = std::thread::Builder::new()
        .stack_size(64 * 1024 * 1024)
        .spawn(|| {
            let mut expr = Node::name("x");
            for _ in 0..1200 {
                expr = Node::unary(UnaryOperator::Not, expr);
            }
            let tree: SourceTree = Ok(Chunk::new(vec![Node::ret(vec![expr])]));
            let report = analyze_nesting(&tree);
            (report.ok(), report.failure().cloned())
        })
        .expect("spawn");
    let (ok, failure) = handle.join().expect("join");
    assert!(!ok);
    assert_eq!(failure, Some(AnalysisFailure::TooDeep { limit: 1000 }));
}

#[test]
fn test_tree_just_under_the_limit_fits_a_worker_stack() {
    let handle = std::thread::Builder::new()
        .stack_size(64 * 1024 * 1024)
        .spawn(|| {
            // 1 + 2 * 495 + 1 = 992 nodes on the deepest path.
            let mut inner = Node::name("x");
            for _ in 0..495 {
                inner = Node::anonymous_function(vec![], vec![Node::ret(vec![inner])]);
            }
            let tree: SourceTree = Ok(Chunk::new(vec![Node::ret(vec![inner])]));
            std::thread::scope(|scope| {
                std::thread::Builder::new()
                    .stack_size(2 * 1024 * 1024)
                    .spawn_scoped(scope, || {
                        let report = analyze_nesting(&tree);
                        (report.ok(), report.max_nested_depth())
                    })
                    .expect("spawn worker")
                    .join()
                    .expect("join worker")
            })
        })
        .expect("spawn");
    let (ok, depth) = handle.join().expect("join");
    assert!(ok);
    assert_eq!(depth, 495);
}

#[test]
fn test_threshold_is_strictly_greater() {
    let tree = nested_ifs();
    let report = analyze_nesting(&tree);
    assert!(report.exceeds(1));
    assert!(!report.exceeds(2));
}

#[test]
fn test_blocks_beyond_lists_deepest_first() {
    let tree = nested_ifs();
    let report = analyze_nesting(&tree);
    let levels: Vec<usize> = report.blocks_beyond(0).iter().map(|b| b.level).collect();
    assert_eq!(levels, vec![2, 1]);
    assert!(report.blocks_beyond(2).is_empty());
    assert_eq!(report.blocks().count(), 3);
}

#[test]
fn test_snippet_has_banner_and_block_text() {
    let tree = nested_ifs();
    let report = analyze_nesting(&tree);
    let innermost = &report.per_level_blocks()[2][0];
    assert_eq!(
        innermost.render_snippet().expect("snippet"),
        "[nesting level 2]\nprint(1)"
    );

    let root = &report.per_level_blocks()[0][0];
    assert_eq!(
        root.render_snippet().expect("snippet"),
        "[nesting level 0]\nif a then\n\tif b then\n\t\tprint(1)\n\tend\nend"
    );
}

#[test]
fn test_block_info_serializes() {
    let tree = nested_ifs();
    let report = analyze_nesting(&tree);
    let info = report.block(BlockId(2)).expect("block").info();
    assert_eq!(
        serde_json::to_value(&info).expect("json"),
        json!({"id": 2, "level": 2, "parent": 1, "statements": 1, "line": 3})
    );

    let root = report.block(BlockId(0)).expect("root").info();
    assert_eq!(
        serde_json::to_value(&root).expect("json"),
        json!({"id": 0, "level": 0, "statements": 1})
    );
}
