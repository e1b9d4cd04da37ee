use crate::{Condition, ItemContext, TemplateRegistry};

/// Picks the template for an item: the first registered template whose condition holds.
///
/// Order is the contract (first registered, first matched). Templates without a condition
/// are skipped. A condition that fails is treated as a non-match and selection moves on.
/// When nothing matches, `default_name` is returned.
pub fn select<'r, T, N>(
    registry: &'r TemplateRegistry<T, N>,
    ctx: &ItemContext<'_, T>,
    default_name: &'r str,
) -> &'r str {
    for template in registry.iter() {
        let Some(condition) = template.condition() else {
            continue;
        };
        if evaluate(condition, ctx, template.name()) {
            ltrace!(name = template.name(), index = ctx.index(), "select: matched");
            return template.name();
        }
    }
    default_name
}

#[cfg(feature = "std")]
fn evaluate<T>(condition: &Condition<T>, ctx: &ItemContext<'_, T>, _name: &str) -> bool {
    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| condition(ctx)));
    match outcome {
        Ok(Ok(matched)) => matched,
        Ok(Err(_err)) => {
            ldebug!(name = _name, index = ctx.index(), error = %_err, "select: condition failed");
            false
        }
        Err(_) => {
            ldebug!(name = _name, index = ctx.index(), "select: condition panicked");
            false
        }
    }
}

#[cfg(not(feature = "std"))]
fn evaluate<T>(condition: &Condition<T>, ctx: &ItemContext<'_, T>, _name: &str) -> bool {
    condition(ctx).unwrap_or(false)
}
