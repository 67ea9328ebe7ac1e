//! Toy shape-program interpreter
//!
//! Parses a line-oriented bytecode text format and interprets it into shape
//! *descriptions*. Drawing them is someone else's job; the output here is
//! plain serializable data.
//!
//! ```text
//! SET_COLOR 255 0 0
//! DRAW_RECTANGLE 100 50 10 10
//! DRAW_CIRCLE 25 300 200
//! END
//! ```

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::{error::Error, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpCode {
    DrawRectangle,
    DrawCircle,
    SetColor,
    End,
}

impl OpCode {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "DRAW_RECTANGLE" => Some(OpCode::DrawRectangle),
            "DRAW_CIRCLE" => Some(OpCode::DrawCircle),
            "SET_COLOR" => Some(OpCode::SetColor),
            "END" => Some(OpCode::End),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            OpCode::DrawRectangle => "DRAW_RECTANGLE",
            OpCode::DrawCircle => "DRAW_CIRCLE",
            OpCode::SetColor => "SET_COLOR",
            OpCode::End => "END",
        }
    }

    fn operand_count(self) -> usize {
        match self {
            OpCode::DrawRectangle => 4, // width height x y
            OpCode::DrawCircle => 3,    // radius x y
            OpCode::SetColor => 3,      // r g b
            OpCode::End => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    pub op: OpCode,
    pub operands: Vec<f32>,
}

/// RGB color carried by shape descriptions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
    };

    fn from_operands(operands: &[f32]) -> Self {
        let channel = |v: f32| v.clamp(0.0, 255.0) as u8;
        Color {
            r: channel(operands[0]),
            g: channel(operands[1]),
            b: channel(operands[2]),
        }
    }
}

/// A shape description produced by the interpreter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Rect { size: Vec2, pos: Vec2, color: Color },
    Circle { radius: f32, pos: Vec2, color: Color },
}

/// Malformed program text. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgramError {
    UnknownOpCode { line: usize, token: String },
    BadOperandCount {
        line: usize,
        opcode: &'static str,
        expected: usize,
        found: usize,
    },
    BadNumber { line: usize, token: String },
}

impl fmt::Display for ProgramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgramError::UnknownOpCode { line, token } => {
                write!(f, "line {line}: unknown opcode {token:?}")
            }
            ProgramError::BadOperandCount {
                line,
                opcode,
                expected,
                found,
            } => write!(
                f,
                "line {line}: {opcode} takes {expected} operands, found {found}"
            ),
            ProgramError::BadNumber { line, token } => {
                write!(f, "line {line}: invalid operand {token:?}")
            }
        }
    }
}

impl Error for ProgramError {}

/// Parse one instruction per line; blank lines are skipped.
pub fn parse_program(src: &str) -> Result<Vec<Instruction>, ProgramError> {
    let mut program = Vec::new();
    for (index, line) in src.lines().enumerate() {
        let line_no = index + 1;
        let mut tokens = line.split_whitespace();
        let Some(op_token) = tokens.next() else {
            continue;
        };
        let op = OpCode::from_token(op_token).ok_or_else(|| ProgramError::UnknownOpCode {
            line: line_no,
            token: op_token.to_string(),
        })?;

        let mut operands = Vec::with_capacity(op.operand_count());
        for token in tokens {
            let value = token.parse::<f32>().map_err(|_| ProgramError::BadNumber {
                line: line_no,
                token: token.to_string(),
            })?;
            operands.push(value);
        }
        if operands.len() != op.operand_count() {
            return Err(ProgramError::BadOperandCount {
                line: line_no,
                opcode: op.name(),
                expected: op.operand_count(),
                found: operands.len(),
            });
        }
        program.push(Instruction { op, operands });
    }
    Ok(program)
}

/// Execute a program, collecting shape descriptions. `END` stops execution;
/// anything after it is ignored.
pub fn run(program: &[Instruction]) -> Vec<Shape> {
    let mut shapes = Vec::new();
    let mut current_color = Color::WHITE;
    for instruction in program {
        let ops = &instruction.operands;
        match instruction.op {
            OpCode::DrawRectangle => shapes.push(Shape::Rect {
                size: Vec2::new(ops[0], ops[1]),
                pos: Vec2::new(ops[2], ops[3]),
                color: current_color,
            }),
            OpCode::DrawCircle => shapes.push(Shape::Circle {
                radius: ops[0],
                pos: Vec2::new(ops[1], ops[2]),
                color: current_color,
            }),
            OpCode::SetColor => current_color = Color::from_operands(ops),
            OpCode::End => break,
        }
    }
    shapes
}
