//! Shared fixtures: a small arithmetic expression tree and two handler
//! sets over it - an evaluator producing `f64` and a code generator
//! emitting stack-machine instructions.

use std::fmt;

use treadle_node::TreeNode;

use crate::errors::HandlerError;
use crate::handler::{Flow, Handler, StepResult};
use crate::registry::HandlerRegistry;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Number,
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Clone, Debug)]
pub struct Expr {
    kind: Kind,
    pub value: f64,
    children: Vec<Expr>,
}

impl Expr {
    pub fn number(value: f64) -> Self {
        Expr {
            kind: Kind::Number,
            value,
            children: Vec::new(),
        }
    }

    pub fn binary(kind: Kind, lhs: Expr, rhs: Expr) -> Self {
        Expr::with_children(kind, vec![lhs, rhs])
    }

    pub fn with_children(kind: Kind, children: Vec<Expr>) -> Self {
        Expr {
            kind,
            value: 0.0,
            children,
        }
    }
}

impl TreeNode for Expr {
    type Kind = Kind;

    fn kind(&self) -> Kind {
        self.kind
    }

    fn children(&self) -> &[Expr] {
        &self.children
    }
}

/// `1 + 2*(3-4)/5` as a tree.
pub fn sample_tree() -> Expr {
    Expr::binary(
        Kind::Add,
        Expr::number(1.0),
        Expr::binary(
            Kind::Div,
            Expr::binary(
                Kind::Mul,
                Expr::number(2.0),
                Expr::binary(Kind::Sub, Expr::number(3.0), Expr::number(4.0)),
            ),
            Expr::number(5.0),
        ),
    )
}

pub fn binary_operands(node: &Expr) -> Result<(&Expr, &Expr), HandlerError> {
    match node.children() {
        [lhs, rhs] => Ok((lhs, rhs)),
        _ => Err(HandlerError::new("expected exactly two operands")),
    }
}

/// Plain recursive evaluation, used as an independent oracle.
pub fn direct_eval(node: &Expr) -> f64 {
    match node.children() {
        [] => node.value,
        [lhs, rhs] => {
            let l = direct_eval(lhs);
            let r = direct_eval(rhs);
            match node.kind() {
                Kind::Add => l + r,
                Kind::Sub => l - r,
                Kind::Mul => l * r,
                Kind::Div => l / r,
                Kind::Number => f64::NAN,
            }
        }
        _ => f64::NAN,
    }
}

// -- Evaluator handlers --

pub struct NumberHandler;

impl Handler<Expr, f64> for NumberHandler {
    fn call<'t>(&self, node: &'t Expr) -> StepResult<'t, Expr, f64> {
        Ok(Flow::Done(node.value))
    }
}

pub struct AddHandler;

impl Handler<Expr, f64> for AddHandler {
    fn call<'t>(&self, node: &'t Expr) -> StepResult<'t, Expr, f64> {
        let (lhs, rhs) = binary_operands(node)?;
        Ok(Flow::need(lhs, move |l: f64| {
            Ok(Flow::need(rhs, move |r| Ok(Flow::Done(l + r))))
        }))
    }
}

pub struct SubHandler;

impl Handler<Expr, f64> for SubHandler {
    fn call<'t>(&self, node: &'t Expr) -> StepResult<'t, Expr, f64> {
        let (lhs, rhs) = binary_operands(node)?;
        Ok(Flow::need(lhs, move |l: f64| {
            Ok(Flow::need(rhs, move |r| Ok(Flow::Done(l - r))))
        }))
    }
}

pub struct MulHandler;

impl Handler<Expr, f64> for MulHandler {
    fn call<'t>(&self, node: &'t Expr) -> StepResult<'t, Expr, f64> {
        let (lhs, rhs) = binary_operands(node)?;
        Ok(Flow::need(lhs, move |l: f64| {
            Ok(Flow::need(rhs, move |r| Ok(Flow::Done(l * r))))
        }))
    }
}

pub struct DivHandler;

impl Handler<Expr, f64> for DivHandler {
    fn call<'t>(&self, node: &'t Expr) -> StepResult<'t, Expr, f64> {
        let (lhs, rhs) = binary_operands(node)?;
        Ok(Flow::need(lhs, move |l: f64| {
            Ok(Flow::need(rhs, move |r| {
                if r == 0.0 {
                    Err(HandlerError::new("division by zero"))
                } else {
                    Ok(Flow::Done(l / r))
                }
            }))
        }))
    }
}

pub fn evaluator_registry() -> HandlerRegistry<Expr, f64> {
    let mut registry = HandlerRegistry::new();
    registry
        .register(Kind::Number, NumberHandler)
        .expect("fresh registry");
    registry.register(Kind::Add, AddHandler).expect("fresh registry");
    registry.register(Kind::Sub, SubHandler).expect("fresh registry");
    registry.register(Kind::Mul, MulHandler).expect("fresh registry");
    registry.register(Kind::Div, DivHandler).expect("fresh registry");
    registry
}

// -- Code generator handlers --

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instr {
    Push(i64),
    Add,
    Sub,
    Mul,
    Div,
}

impl fmt::Display for Instr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instr::Push(n) => write!(f, "PUSH {n}"),
            Instr::Add => f.write_str("ADD"),
            Instr::Sub => f.write_str("SUB"),
            Instr::Mul => f.write_str("MUL"),
            Instr::Div => f.write_str("DIV"),
        }
    }
}

pub struct PushHandler;

impl Handler<Expr, Vec<Instr>> for PushHandler {
    fn call<'t>(&self, node: &'t Expr) -> StepResult<'t, Expr, Vec<Instr>> {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "fixtures use small integral literals"
        )]
        let literal = node.value as i64;
        Ok(Flow::Done(vec![Instr::Push(literal)]))
    }
}

/// Emits both operand programs followed by `op`.
pub struct BinaryCodegen {
    op: Instr,
}

impl BinaryCodegen {
    pub fn new(op: Instr) -> Self {
        BinaryCodegen { op }
    }
}

impl Handler<Expr, Vec<Instr>> for BinaryCodegen {
    fn call<'t>(&self, node: &'t Expr) -> StepResult<'t, Expr, Vec<Instr>> {
        let (lhs, rhs) = binary_operands(node)?;
        let op = self.op;
        Ok(Flow::need(lhs, move |mut code: Vec<Instr>| {
            Ok(Flow::need(rhs, move |rhs_code: Vec<Instr>| {
                code.extend(rhs_code);
                code.push(op);
                Ok(Flow::Done(code))
            }))
        }))
    }
}

pub fn codegen_registry() -> HandlerRegistry<Expr, Vec<Instr>> {
    let mut registry = HandlerRegistry::new();
    registry
        .register(Kind::Number, PushHandler)
        .expect("fresh registry");
    registry
        .register(Kind::Add, BinaryCodegen::new(Instr::Add))
        .expect("fresh registry");
    registry
        .register(Kind::Sub, BinaryCodegen::new(Instr::Sub))
        .expect("fresh registry");
    registry
        .register(Kind::Mul, BinaryCodegen::new(Instr::Mul))
        .expect("fresh registry");
    registry
        .register(Kind::Div, BinaryCodegen::new(Instr::Div))
        .expect("fresh registry");
    registry
}
