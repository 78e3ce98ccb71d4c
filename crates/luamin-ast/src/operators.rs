//! Lua operators and their binding priorities.
//!
//! Priorities follow the table in the Lua 5.4 reference parser: every binary
//! operator has a left and a right priority, and the operand of a unary
//! operator is parsed at [`UNARY_PRIORITY`]. Right-associative operators
//! (`..` and `^`) have a right priority lower than their left one.

use serde::{Deserialize, Serialize};

/// Priority at which the operand of a unary operator is parsed.
pub const UNARY_PRIORITY: u8 = 12;

/// Left/right binding priority of a binary operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Priority {
    pub left: u8,
    pub right: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOperator {
    // Arithmetic
    Add,
    Sub,
    Mul,
    FloatDiv,
    FloorDiv,
    Mod,
    Expo,
    // Bitwise
    BAnd,
    BOr,
    BXor,
    ShiftR,
    ShiftL,
    // Relational
    Lt,
    Gt,
    LtEq,
    GtEq,
    Eq,
    NotEq,
    // Logical
    And,
    Or,
    Concat,
}

impl BinaryOperator {
    /// Surface syntax of the operator, without surrounding spaces.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::FloatDiv => "/",
            Self::FloorDiv => "//",
            Self::Mod => "%",
            Self::Expo => "^",
            Self::BAnd => "&",
            Self::BOr => "|",
            Self::BXor => "~",
            Self::ShiftR => ">>",
            Self::ShiftL => "<<",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::LtEq => "<=",
            Self::GtEq => ">=",
            Self::Eq => "==",
            Self::NotEq => "~=",
            Self::And => "and",
            Self::Or => "or",
            Self::Concat => "..",
        }
    }

    /// Name used in the AST trace log.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Add => "AddOp",
            Self::Sub => "SubOp",
            Self::Mul => "MultOp",
            Self::FloatDiv => "FloatDivOp",
            Self::FloorDiv => "FloorDivOp",
            Self::Mod => "ModOp",
            Self::Expo => "ExpoOp",
            Self::BAnd => "BAndOp",
            Self::BOr => "BOrOp",
            Self::BXor => "BXorOp",
            Self::ShiftR => "BShiftROp",
            Self::ShiftL => "BShiftLOp",
            Self::Lt => "RLtOp",
            Self::Gt => "RGtOp",
            Self::LtEq => "RLtEqOp",
            Self::GtEq => "RGtEqOp",
            Self::Eq => "REqOp",
            Self::NotEq => "RNotEqOp",
            Self::And => "LAndOp",
            Self::Or => "LOrOp",
            Self::Concat => "Concat",
        }
    }

    pub fn priority(self) -> Priority {
        let (left, right) = match self {
            Self::Add | Self::Sub => (10, 10),
            Self::Mul | Self::Mod | Self::FloatDiv | Self::FloorDiv => (11, 11),
            Self::Expo => (14, 13),
            Self::BAnd => (6, 6),
            Self::BOr => (4, 4),
            Self::BXor => (5, 5),
            Self::ShiftL | Self::ShiftR => (7, 7),
            Self::Concat => (9, 8),
            Self::Eq | Self::Lt | Self::LtEq | Self::NotEq | Self::Gt | Self::GtEq => (3, 3),
            Self::And => (2, 2),
            Self::Or => (1, 1),
        };
        Priority { left, right }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOperator {
    Minus,
    BNot,
    Not,
    Length,
}

impl UnaryOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Minus => "-",
            Self::BNot => "~",
            Self::Not => "not",
            Self::Length => "#",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Minus => "UMinusOp",
            Self::BNot => "UBNotOp",
            Self::Not => "ULNotOp",
            Self::Length => "ULengthOp",
        }
    }
}
