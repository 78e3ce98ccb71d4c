//! Syntax tree nodes.
//!
//! A [`Chunk`] owns one [`Block`]; a block is an ordered list of statement
//! [`Node`]s. Every node carries its [`NodeKind`] plus the comments the
//! parser attached before and after it.
//!
//! The serde representation is the interchange format for external parsers:
//!
//! ```json
//! { "body": [
//!     { "kind": "LocalAssign",
//!       "targets": [{ "kind": "Name", "id": "x" }],
//!       "values": [{ "kind": "Number", "n": "1" }],
//!       "leadingComments": [{ "text": "-- answer" }] }
//! ] }
//! ```

use crate::operators::{BinaryOperator, UnaryOperator};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 1-based location of a node's first token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

/// A comment token, including its leading `--`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub text: String,
}

impl Comment {
    pub fn new(text: impl Into<String>) -> Self {
        Comment { text: text.into() }
    }

    /// True unless the comment opens a long bracket (`--[[`, `--[==[`).
    ///
    /// A line comment runs to the end of the line, so whatever follows it
    /// must start on a fresh line.
    pub fn is_line_comment(&self) -> bool {
        let Some(rest) = self.text.strip_prefix("--") else {
            return true;
        };
        let Some(rest) = rest.strip_prefix('[') else {
            return true;
        };
        !rest.trim_start_matches('=').starts_with('[')
    }
}

/// Quote style a string literal was written with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StringDelimiter {
    SingleQuote,
    DoubleQuote,
    /// Long bracket: `[[ ... ]]` (any `=` level).
    DoubleSquare,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexNotation {
    /// `value.name`
    Dot,
    /// `value[expr]`
    Square,
}

/// The `else` part of an `if`/`elseif`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElseBranch {
    Else(Block),
    /// Holds an `ElseIf` node.
    ElseIf(Box<Node>),
}

/// One lexical scope: chunk, function body, loop body or branch body.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Block {
    pub body: Vec<Node>,
}

impl Block {
    pub fn new(body: Vec<Node>) -> Self {
        Block { body }
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// A whole Lua source unit. Its block is nesting level 0.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub body: Block,
}

impl Chunk {
    pub fn new(body: Vec<Node>) -> Self {
        Chunk {
            body: Block::new(body),
        }
    }
}

/// Upstream parse error reported by the external parser.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseFailure {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
}

impl ParseFailure {
    pub fn new(message: impl Into<String>) -> Self {
        ParseFailure {
            message: message.into(),
            line: None,
            column: None,
        }
    }

    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.line, self.column) {
            (Some(line), Some(column)) => write!(f, "{}:{}: {}", line, column, self.message),
            (Some(line), None) => write!(f, "{}: {}", line, self.message),
            _ => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for ParseFailure {}

/// Outcome of the external parser for one source unit.
pub type SourceTree = Result<Chunk, ParseFailure>;

fn is_false(value: &bool) -> bool {
    !*value
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    #[serde(flatten)]
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub leading_comments: Vec<Comment>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trailing_comments: Vec<Comment>,
    /// The source had this expression in parentheses.
    #[serde(default, skip_serializing_if = "is_false")]
    pub wrapped: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all_fields = "camelCase")]
pub enum NodeKind {
    // =========================================================================
    // Statements
    // =========================================================================
    Assign {
        targets: Vec<Node>,
        values: Vec<Node>,
    },
    LocalAssign {
        targets: Vec<Node>,
        #[serde(default)]
        values: Vec<Node>,
    },
    While {
        test: Box<Node>,
        body: Block,
    },
    Do {
        body: Block,
    },
    Repeat {
        body: Block,
        test: Box<Node>,
    },
    If {
        test: Box<Node>,
        body: Block,
        #[serde(default)]
        orelse: Option<ElseBranch>,
    },
    ElseIf {
        test: Box<Node>,
        body: Block,
        #[serde(default)]
        orelse: Option<ElseBranch>,
    },
    Label {
        id: String,
    },
    Goto {
        label: String,
    },
    SemiColon,
    Break,
    Return {
        #[serde(default)]
        values: Vec<Node>,
    },
    Fornum {
        target: String,
        start: Box<Node>,
        stop: Box<Node>,
        #[serde(default)]
        step: Option<Box<Node>>,
        body: Block,
    },
    Forin {
        targets: Vec<Node>,
        iter: Vec<Node>,
        body: Block,
    },
    Call {
        func: Box<Node>,
        #[serde(default)]
        args: Vec<Node>,
    },
    Invoke {
        source: Box<Node>,
        func: String,
        #[serde(default)]
        args: Vec<Node>,
    },
    /// `function a.b.c(...) end`; `name` is a `Name` or an `Index` chain.
    Function {
        name: Box<Node>,
        #[serde(default)]
        args: Vec<Node>,
        body: Block,
    },
    LocalFunction {
        name: String,
        #[serde(default)]
        args: Vec<Node>,
        body: Block,
    },
    /// `function source:name(...) end`
    Method {
        source: Box<Node>,
        name: String,
        #[serde(default)]
        args: Vec<Node>,
        body: Block,
    },
    /// A free-standing comment statement.
    Comment {
        text: String,
    },

    // =========================================================================
    // Expressions
    // =========================================================================
    Name {
        id: String,
    },
    Index {
        value: Box<Node>,
        idx: Box<Node>,
        notation: IndexNotation,
    },
    Nil,
    True,
    False,
    /// Numeric literal, kept as written (`0x1F`, `1e10`, `3.0`).
    Number {
        n: String,
    },
    Varargs,
    /// String literal; `s` is the text between the delimiters, escapes untouched.
    String {
        s: String,
        delimiter: StringDelimiter,
    },
    Table {
        #[serde(default)]
        fields: Vec<Node>,
    },
    /// Table field. `key: None` is a positional field.
    Field {
        #[serde(default)]
        key: Option<Box<Node>>,
        value: Box<Node>,
        #[serde(default)]
        between_brackets: bool,
    },
    AnonymousFunction {
        #[serde(default)]
        args: Vec<Node>,
        body: Block,
    },
    BinaryOp {
        op: BinaryOperator,
        left: Box<Node>,
        right: Box<Node>,
    },
    UnaryOp {
        op: UnaryOperator,
        operand: Box<Node>,
    },

    /// A node kind the external parser produced that this model does not
    /// cover (dialect extensions). Carries the parser's kind name.
    Unsupported {
        name: String,
    },
}

impl NodeKind {
    /// Kind name as written in the AST trace log and in diagnostics.
    pub fn name(&self) -> &str {
        match self {
            NodeKind::Assign { .. } => "Assign",
            NodeKind::LocalAssign { .. } => "LocalAssign",
            NodeKind::While { .. } => "While",
            NodeKind::Do { .. } => "Do",
            NodeKind::Repeat { .. } => "Repeat",
            NodeKind::If { .. } => "If",
            NodeKind::ElseIf { .. } => "ElseIf",
            NodeKind::Label { .. } => "Label",
            NodeKind::Goto { .. } => "Goto",
            NodeKind::SemiColon => "SemiColon",
            NodeKind::Break => "Break",
            NodeKind::Return { .. } => "Return",
            NodeKind::Fornum { .. } => "Fornum",
            NodeKind::Forin { .. } => "Forin",
            NodeKind::Call { .. } => "Call",
            NodeKind::Invoke { .. } => "Invoke",
            NodeKind::Function { .. } => "Function",
            NodeKind::LocalFunction { .. } => "LocalFunction",
            NodeKind::Method { .. } => "Method",
            NodeKind::Comment { .. } => "Comment",
            NodeKind::Name { .. } => "Name",
            NodeKind::Index { .. } => "Index",
            NodeKind::Nil => "Nil",
            NodeKind::True => "True",
            NodeKind::False => "False",
            NodeKind::Number { .. } => "Number",
            NodeKind::Varargs => "Varargs",
            NodeKind::String { .. } => "String",
            NodeKind::Table { .. } => "Table",
            NodeKind::Field { .. } => "Field",
            NodeKind::AnonymousFunction { .. } => "AnonymousFunction",
            NodeKind::BinaryOp { op, .. } => op.display_name(),
            NodeKind::UnaryOp { op, .. } => op.display_name(),
            NodeKind::Unsupported { name } => name,
        }
    }

    pub fn is_expression(&self) -> bool {
        matches!(
            self,
            NodeKind::Name { .. }
                | NodeKind::Index { .. }
                | NodeKind::Call { .. }
                | NodeKind::Invoke { .. }
                | NodeKind::Nil
                | NodeKind::True
                | NodeKind::False
                | NodeKind::Number { .. }
                | NodeKind::Varargs
                | NodeKind::String { .. }
                | NodeKind::Table { .. }
                | NodeKind::AnonymousFunction { .. }
                | NodeKind::BinaryOp { .. }
                | NodeKind::UnaryOp { .. }
        )
    }
}

// =============================================================================
// Builders
// =============================================================================

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Node {
            kind,
            leading_comments: Vec::new(),
            trailing_comments: Vec::new(),
            wrapped: false,
            position: None,
        }
    }

    pub fn name(id: impl Into<String>) -> Self {
        Self::new(NodeKind::Name { id: id.into() })
    }

    pub fn number(n: impl Into<String>) -> Self {
        Self::new(NodeKind::Number { n: n.into() })
    }

    /// Double-quoted string literal.
    pub fn string(s: impl Into<String>) -> Self {
        Self::string_with(s, StringDelimiter::DoubleQuote)
    }

    pub fn string_with(s: impl Into<String>, delimiter: StringDelimiter) -> Self {
        Self::new(NodeKind::String {
            s: s.into(),
            delimiter,
        })
    }

    pub fn nil() -> Self {
        Self::new(NodeKind::Nil)
    }

    pub fn boolean(value: bool) -> Self {
        Self::new(if value { NodeKind::True } else { NodeKind::False })
    }

    pub fn varargs() -> Self {
        Self::new(NodeKind::Varargs)
    }

    pub fn call(func: Node, args: Vec<Node>) -> Self {
        Self::new(NodeKind::Call {
            func: Box::new(func),
            args,
        })
    }

    pub fn invoke(source: Node, func: impl Into<String>, args: Vec<Node>) -> Self {
        Self::new(NodeKind::Invoke {
            source: Box::new(source),
            func: func.into(),
            args,
        })
    }

    /// `value.name`
    pub fn dot(value: Node, name: impl Into<String>) -> Self {
        Self::new(NodeKind::Index {
            value: Box::new(value),
            idx: Box::new(Node::name(name)),
            notation: IndexNotation::Dot,
        })
    }

    /// `value[idx]`
    pub fn index(value: Node, idx: Node) -> Self {
        Self::new(NodeKind::Index {
            value: Box::new(value),
            idx: Box::new(idx),
            notation: IndexNotation::Square,
        })
    }

    pub fn binary(op: BinaryOperator, left: Node, right: Node) -> Self {
        Self::new(NodeKind::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn unary(op: UnaryOperator, operand: Node) -> Self {
        Self::new(NodeKind::UnaryOp {
            op,
            operand: Box::new(operand),
        })
    }

    pub fn table(fields: Vec<Node>) -> Self {
        Self::new(NodeKind::Table { fields })
    }

    /// Positional field: `{ value }`
    pub fn field(value: Node) -> Self {
        Self::new(NodeKind::Field {
            key: None,
            value: Box::new(value),
            between_brackets: false,
        })
    }

    /// Name-keyed field: `{ name = value }`
    pub fn named_field(name: impl Into<String>, value: Node) -> Self {
        Self::new(NodeKind::Field {
            key: Some(Box::new(Node::name(name))),
            value: Box::new(value),
            between_brackets: false,
        })
    }

    /// Expression-keyed field: `{ [key] = value }`
    pub fn keyed_field(key: Node, value: Node) -> Self {
        Self::new(NodeKind::Field {
            key: Some(Box::new(key)),
            value: Box::new(value),
            between_brackets: true,
        })
    }

    pub fn assign(targets: Vec<Node>, values: Vec<Node>) -> Self {
        Self::new(NodeKind::Assign { targets, values })
    }

    pub fn local_assign(targets: Vec<Node>, values: Vec<Node>) -> Self {
        Self::new(NodeKind::LocalAssign { targets, values })
    }

    pub fn ret(values: Vec<Node>) -> Self {
        Self::new(NodeKind::Return { values })
    }

    pub fn if_then(test: Node, body: Vec<Node>, orelse: Option<ElseBranch>) -> Self {
        Self::new(NodeKind::If {
            test: Box::new(test),
            body: Block::new(body),
            orelse,
        })
    }

    pub fn else_if(test: Node, body: Vec<Node>, orelse: Option<ElseBranch>) -> Self {
        Self::new(NodeKind::ElseIf {
            test: Box::new(test),
            body: Block::new(body),
            orelse,
        })
    }

    pub fn while_do(test: Node, body: Vec<Node>) -> Self {
        Self::new(NodeKind::While {
            test: Box::new(test),
            body: Block::new(body),
        })
    }

    pub fn do_block(body: Vec<Node>) -> Self {
        Self::new(NodeKind::Do {
            body: Block::new(body),
        })
    }

    pub fn repeat_until(body: Vec<Node>, test: Node) -> Self {
        Self::new(NodeKind::Repeat {
            body: Block::new(body),
            test: Box::new(test),
        })
    }

    pub fn fornum(
        target: impl Into<String>,
        start: Node,
        stop: Node,
        step: Option<Node>,
        body: Vec<Node>,
    ) -> Self {
        Self::new(NodeKind::Fornum {
            target: target.into(),
            start: Box::new(start),
            stop: Box::new(stop),
            step: step.map(Box::new),
            body: Block::new(body),
        })
    }

    pub fn forin(targets: Vec<Node>, iter: Vec<Node>, body: Vec<Node>) -> Self {
        Self::new(NodeKind::Forin {
            targets,
            iter,
            body: Block::new(body),
        })
    }

    pub fn function(name: Node, args: Vec<Node>, body: Vec<Node>) -> Self {
        Self::new(NodeKind::Function {
            name: Box::new(name),
            args,
            body: Block::new(body),
        })
    }

    pub fn local_function(name: impl Into<String>, args: Vec<Node>, body: Vec<Node>) -> Self {
        Self::new(NodeKind::LocalFunction {
            name: name.into(),
            args,
            body: Block::new(body),
        })
    }

    pub fn method(source: Node, name: impl Into<String>, args: Vec<Node>, body: Vec<Node>) -> Self {
        Self::new(NodeKind::Method {
            source: Box::new(source),
            name: name.into(),
            args,
            body: Block::new(body),
        })
    }

    pub fn anonymous_function(args: Vec<Node>, body: Vec<Node>) -> Self {
        Self::new(NodeKind::AnonymousFunction {
            args,
            body: Block::new(body),
        })
    }

    pub fn label(id: impl Into<String>) -> Self {
        Self::new(NodeKind::Label { id: id.into() })
    }

    pub fn goto(label: impl Into<String>) -> Self {
        Self::new(NodeKind::Goto {
            label: label.into(),
        })
    }

    pub fn break_stmt() -> Self {
        Self::new(NodeKind::Break)
    }

    pub fn semicolon() -> Self {
        Self::new(NodeKind::SemiColon)
    }

    pub fn comment(text: impl Into<String>) -> Self {
        Self::new(NodeKind::Comment { text: text.into() })
    }

    pub fn unsupported(name: impl Into<String>) -> Self {
        Self::new(NodeKind::Unsupported { name: name.into() })
    }

    // =========================================================================
    // Decorators
    // =========================================================================

    pub fn with_leading_comment(mut self, text: impl Into<String>) -> Self {
        self.leading_comments.push(Comment::new(text));
        self
    }

    pub fn with_trailing_comment(mut self, text: impl Into<String>) -> Self {
        self.trailing_comments.push(Comment::new(text));
        self
    }

    /// Mark the expression as parenthesized in source.
    pub fn wrapped(mut self) -> Self {
        self.wrapped = true;
        self
    }

    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.position = Some(Position { line, column });
        self
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn kind_name(&self) -> &str {
        self.kind.name()
    }

    /// Whether the node can stand as the base of a call, method call or
    /// index without extra parentheses.
    pub fn is_prefix_expression(&self) -> bool {
        self.wrapped
            || matches!(
                self.kind,
                NodeKind::Name { .. }
                    | NodeKind::Index { .. }
                    | NodeKind::Call { .. }
                    | NodeKind::Invoke { .. }
            )
    }
}
