use crate::FilterError::{self, ConversionError};

/// Rounds `number` up and converts it into a `usize`.
///
/// Fails for non-finite numbers and for results outside of `0..=limit`.
pub fn ceil_to_usize(
    number: f64,
    limit: usize,
    argument: &'static str,
) -> Result<usize, FilterError> {
    if number.is_finite() {
        let ceiled = number.ceil();
        // `usize::MAX as f64` rounds up past `usize::MAX`, so the bound is exclusive.
        if 0.0 <= ceiled && ceiled < usize::MAX as f64 && ceiled as usize <= limit {
            Ok(ceiled as usize)
        } else {
            Err(ConversionError {
                argument,
                value: ceiled,
            })
        }
    } else {
        Err(ConversionError {
            argument,
            value: number,
        })
    }
}
