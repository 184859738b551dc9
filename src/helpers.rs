/// Returns a [`ProblemError::ShapeMismatch`](crate::simplex::ProblemError::ShapeMismatch)
/// from the enclosing function when the two dimensions differ.
#[macro_export]
macro_rules! ensure_shape {
    ($what: expr, $expected: expr, $actual: expr) => {
        if $expected != $actual {
            return Err($crate::simplex::ProblemError::ShapeMismatch {
                what: $what,
                expected: $expected,
                actual: $actual,
            });
        }
    };
}

#[macro_export]
macro_rules! dbg_display {
    ($e: expr) => {{
        let val = $e;
        log::debug!(
            "[{}/{}:{}] {} = {}",
            file!(),
            line!(),
            column!(),
            stringify!($e),
            val
        );
        val
    }};
}
