use crate::effects::MAX_OUTPUT_LEN;
use crate::{Error, Result};

/// Change the playback speed of a signal by nearest-index decimation or
/// repetition.
///
/// Output sample `k` is `y[round(k * factor)]` for every `k` whose index
/// stays inside the input. Indices are rounded half-to-even. A factor
/// above 1 shortens the signal and raises its apparent pitch, below 1
/// lengthens and lowers it, and exactly 1 returns the input unchanged.
///
/// No interpolation or anti-alias filtering is applied.
///
/// # Errors
/// Returns `Error::InvalidFactor` if `factor` is not finite or `<= 0`, and
/// `Error::OutputTooLong` if the output would exceed [`MAX_OUTPUT_LEN`].
///
/// # Example
/// ```
/// use keytone::effects::resample::speedx;
///
/// let y = [0, 1, 2, 3, 4, 5, 6, 7];
/// assert_eq!(speedx(&y, 2.0).unwrap(), vec![0, 2, 4, 6]);
/// assert_eq!(speedx(&y[..3], 0.5).unwrap(), vec![0, 0, 1, 2, 2, 2]);
/// ```
pub fn speedx<T: Copy>(y: &[T], factor: f64) -> Result<Vec<T>> {
    check_factor(factor)?;
    let mut out = Vec::with_capacity(output_len(y.len(), factor)?);
    for idx in indices(y.len(), factor) {
        out.push(y[idx]);
    }
    Ok(out)
}

/// Number of samples [`speedx`] produces for an input of `len` samples.
pub fn output_len(len: usize, factor: f64) -> Result<usize> {
    check_factor(factor)?;
    // upper bound on the number of k with round(k·f) < len
    let bound = (len as f64 / factor).ceil() + 1.0;
    if bound > MAX_OUTPUT_LEN as f64 {
        return Err(Error::OutputTooLong {
            requested: bound,
            limit: MAX_OUTPUT_LEN,
        });
    }
    Ok(indices(len, factor).count())
}

fn check_factor(factor: f64) -> Result<()> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(Error::InvalidFactor {
            name: "factor",
            value: factor,
        });
    }
    Ok(())
}

fn indices(len: usize, factor: f64) -> impl Iterator<Item = usize> {
    (0u64..)
        .map(move |k| (k as f64 * factor).round_ties_even())
        .take_while(move |&idx| idx < len as f64)
        .map(|idx| idx as usize)
}
