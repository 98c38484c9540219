use crate::{
    ast::{BinaryOperator, Expr, UnaryOperator},
    error::EvalError,
};

/// Result type used by the evaluation pipeline.
///
/// All parsing and evaluation functions return either a value of type `T` or
/// an [`EvalError`] describing the failure.
pub type EvalResult<T> = Result<T, EvalError>;

/// Folds an expression tree into its numeric value.
///
/// The fold is stateless and idempotent: evaluating the same tree twice
/// yields bit-identical results. Division checks its denominator for exact
/// zero and reports [`EvalError::DivisionByZero`] instead of producing a
/// non-finite number.
///
/// # Parameters
/// - `expr`: Expression to evaluate.
///
/// # Returns
/// The computed `f64` value.
///
/// # Example
/// ```
/// use tagcalc::{
///     ast::{BinaryOperator, Expr},
///     evaluator::core::eval_expr,
/// };
///
/// let expr = Expr::BinaryOp { left:  Box::new(Expr::Number(2.0)),
///                             op:    BinaryOperator::Mul,
///                             right: Box::new(Expr::Number(3.0)) };
/// assert_eq!(eval_expr(&expr).unwrap(), 6.0);
/// ```
pub fn eval_expr(expr: &Expr) -> EvalResult<f64> {
    use BinaryOperator::{Add, Div, Mul, Pow, Sub};

    match expr {
        Expr::Number(value) => Ok(*value),

        Expr::UnaryOp { op: UnaryOperator::Negate,
                        expr, } => Ok(-eval_expr(expr)?),

        Expr::BinaryOp { left, op, right } => {
            let left = eval_expr(left)?;
            let right = eval_expr(right)?;

            match op {
                Add => Ok(left + right),
                Sub => Ok(left - right),
                Mul => Ok(left * right),
                Div => {
                    if right == 0.0 {
                        return Err(EvalError::DivisionByZero);
                    }
                    Ok(left / right)
                },
                Pow => Ok(left.powf(right)),
            }
        },
    }
}
