//! The exactness retry shared by division and square root.
//!
//! An attempt at the full precision can fail for reasons that
//! do not apply to exact results: a buffer sized by the
//! precision could not be allocated, or the working precision
//! was insufficient. If the exact result provably fits in
//! a smaller precision, the operation is run once more at that
//! precision and the result is kept only if it is exact.

use tracing::{debug, trace, warn};

use crate::{
    ctx::{Condition, Context},
    dec::Decimal,
};

/// The outcome of one attempt: the result and the conditions it
/// raised.
pub(crate) type Attempt = (Decimal, Condition);

/// A permanent failure.
///
/// Committing it is the only way an exhausted operation writes
/// its output.
#[must_use]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Failure(Condition);

impl Failure {
    /// Writes the error sentinel to `out` and reports the
    /// original conditions.
    pub fn commit(self, out: &mut Decimal, status: &mut Condition) {
        out.set_error_sentinel();
        *status |= self.0;
    }
}

/// Runs `op` at the context's precision and, if it raises one of
/// `triggers`, once more at the precision `bound`.
///
/// `bound` must be an upper bound on the number of digits of
/// the exact result.
pub(crate) fn exact_retry<F>(
    name: &'static str,
    out: &mut Decimal,
    ctx: &Context,
    status: &mut Condition,
    triggers: Condition,
    bound: usize,
    op: F,
) where
    F: Fn(&Context) -> Attempt,
{
    let (result, first) = op(ctx);
    if !first.intersects(triggers) {
        *out = result;
        *status |= first;
        return;
    }

    let prec = ctx.prec as usize;
    if bound >= prec {
        trace!(op = name, bound, prec, status = ?first, "exact result cannot be smaller, not retrying");
        return Failure(first).commit(out, status);
    }

    // `bound < prec`, so it fits.
    let work = ctx.with_precision(bound as u32);
    debug!(op = name, bound, prec, status = ?first, "retrying at bounded precision");
    let (result, retry) = op(&work);
    if retry.is_empty() {
        debug!(op = name, bound, "bounded retry is exact");
        *out = result;
        return;
    }

    warn!(op = name, bound, prec, status = ?first, retry = ?retry, "retry exhausted");
    Failure(first).commit(out, status)
}
