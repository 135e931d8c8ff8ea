use crate::builder::Builder;
use crate::context::Context;
use crate::function::{ArcFunction, Arg};
use crate::types::{BuildError, Expr, Literal};
use crate::validator;

/// Walk the AST, resolving identifiers against the builder's registry and
/// appending the built validators into `ctx`.
pub(crate) fn build_into(b: &Builder, expr: &Expr, ctx: &mut Context) -> Result<(), BuildError> {
    match expr {
        // Both sides accumulate in the same context; finalize AND-folds them.
        Expr::And(left, right) => {
            build_into(b, left, ctx)?;
            build_into(b, right, ctx)
        }

        // Each arm of an OR chain builds in its own child context.
        Expr::Or(_, _) => {
            let mut arms = Vec::new();
            flatten_or(expr, &mut arms);
            let mut branches = Vec::with_capacity(arms.len());
            for arm in arms {
                let mut child = ctx.child();
                build_into(b, arm, &mut child)?;
                branches.push(child.finalize()?);
            }
            ctx.append(validator::or(branches)?);
            Ok(())
        }

        Expr::Call { name, args } => {
            let function = b.function(name).ok_or_else(|| BuildError::Undefined {
                name: name.clone(),
            })?;
            let mut call_args = Vec::with_capacity(args.len());
            for arg in args {
                call_args.push(eval_arg(b, arg, ctx)?);
            }
            function.call(ctx, call_args)
        }

        // "zero" is shorthand for "zero()".
        Expr::Ident(name) => {
            if let Some(function) = b.function(name) {
                return function.call(ctx, Vec::new());
            }
            if b.symbol(name).is_some() {
                return Err(BuildError::NotAValidator {
                    token: name.clone(),
                });
            }
            Err(BuildError::Undefined { name: name.clone() })
        }

        Expr::Eq(left, right) => build_eq(b, left, right, ctx),

        Expr::Literal(lit) => Err(BuildError::NotAValidator {
            token: lit.to_string(),
        }),
    }
}

fn flatten_or<'e>(expr: &'e Expr, arms: &mut Vec<&'e Expr>) {
    if let Expr::Or(left, right) = expr {
        flatten_or(left, arms);
        flatten_or(right, arms);
    } else {
        arms.push(expr);
    }
}

// Classify a call argument: literals stay literal, symbol identifiers
// substitute their value, and everything else (nested calls, boolean chains,
// zero-argument function identifiers) builds into a sub-validator.
fn eval_arg(b: &Builder, expr: &Expr, ctx: &Context) -> Result<Arg, BuildError> {
    match expr {
        Expr::Literal(Literal::Int(i)) => Ok(Arg::Int(*i)),
        Expr::Literal(Literal::Float(f)) => Ok(Arg::Float(*f)),
        Expr::Literal(Literal::Str(s)) => Ok(Arg::Str(s.clone())),

        Expr::Ident(name) => {
            if let Some(function) = b.function(name) {
                let mut child = ctx.child();
                function.call(&mut child, Vec::new())?;
                return Ok(Arg::Validator(child.finalize()?));
            }
            if let Some(symbol) = b.symbol(name) {
                return Ok(literal_arg(symbol));
            }
            Err(BuildError::Undefined { name: name.clone() })
        }

        nested => {
            let mut child = ctx.child();
            build_into(b, nested, &mut child)?;
            Ok(Arg::Validator(child.finalize()?))
        }
    }
}

fn literal_arg(lit: Literal) -> Arg {
    match lit {
        Literal::Int(i) => Arg::Int(i),
        Literal::Float(f) => Arg::Float(f),
        Literal::Str(s) => Arg::Str(s),
    }
}

// The "==" short-form: exactly one operand must resolve to a builder
// function, the other to a literal; the function is invoked with the
// literal as its sole argument.
fn build_eq(b: &Builder, left: &Expr, right: &Expr, ctx: &mut Context) -> Result<(), BuildError> {
    let left = eq_operand(b, left)?;
    let right = eq_operand(b, right)?;
    match (left, right) {
        (EqOperand::Function(f), EqOperand::Literal(arg))
        | (EqOperand::Literal(arg), EqOperand::Function(f)) => f.call(ctx, vec![arg]),
        (left, right) => Err(BuildError::EqOperands {
            left: left.kind(),
            right: right.kind(),
        }),
    }
}

enum EqOperand {
    Function(ArcFunction),
    Literal(Arg),
    Other(&'static str),
}

impl EqOperand {
    fn kind(&self) -> &'static str {
        match self {
            EqOperand::Function(_) => "function",
            EqOperand::Literal(arg) => arg.kind(),
            EqOperand::Other(kind) => kind,
        }
    }
}

fn eq_operand(b: &Builder, expr: &Expr) -> Result<EqOperand, BuildError> {
    match expr {
        Expr::Literal(Literal::Int(i)) => Ok(EqOperand::Literal(Arg::Int(*i))),
        Expr::Literal(Literal::Float(f)) => Ok(EqOperand::Literal(Arg::Float(*f))),
        Expr::Literal(Literal::Str(s)) => Ok(EqOperand::Literal(Arg::Str(s.clone()))),
        Expr::Ident(name) => {
            if let Some(function) = b.function(name) {
                return Ok(EqOperand::Function(function));
            }
            if let Some(symbol) = b.symbol(name) {
                return Ok(EqOperand::Literal(literal_arg(symbol)));
            }
            Err(BuildError::Undefined { name: name.clone() })
        }
        other => Ok(EqOperand::Other(other.kind())),
    }
}
