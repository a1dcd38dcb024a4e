use sr_core::Error;

/// Coefficient element of a filter table.
pub trait Tap: Copy {
    /// Whether this tap contributes to its output sample.
    fn is_active(self) -> bool;
}

impl Tap for i16 {
    #[inline]
    fn is_active(self) -> bool {
        self != 0
    }
}

impl Tap for i32 {
    #[inline]
    fn is_active(self) -> bool {
        self != 0
    }
}

impl Tap for bool {
    #[inline]
    fn is_active(self) -> bool {
        self
    }
}

/// Precomputed per-axis filter: `filter_length` taps for every destination
/// coordinate, stored row-major, plus the source start index of each row.
///
/// Rows are indexed by the absolute destination coordinate along the filtered
/// axis. `scale` is carried for diagnostics and does not enter the weighting.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterTable<C> {
    coeffs: Vec<C>,
    offset: Vec<isize>,
    filter_length: usize,
    scale: f64,
}

impl<C: Tap> FilterTable<C> {
    pub fn new(
        coeffs: Vec<C>,
        offset: Vec<isize>,
        filter_length: usize,
        scale: f64,
    ) -> Result<Self, Error> {
        if filter_length == 0 {
            return Err(Error::ZeroFilterLength);
        }
        let expected = offset
            .len()
            .checked_mul(filter_length)
            .ok_or(Error::TableLength {
                expected: usize::MAX,
                actual: coeffs.len(),
            })?;
        if coeffs.len() != expected {
            return Err(Error::TableLength {
                expected,
                actual: coeffs.len(),
            });
        }

        Ok(Self {
            coeffs,
            offset,
            filter_length,
            scale,
        })
    }

    /// Number of destination coordinates the table covers.
    pub fn len(&self) -> usize {
        self.offset.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offset.is_empty()
    }

    pub fn filter_length(&self) -> usize {
        self.filter_length
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn coeffs(&self) -> &[C] {
        &self.coeffs
    }

    pub fn offsets(&self) -> &[isize] {
        &self.offset
    }

    /// Source coordinate of the first tap of row `d`.
    #[inline]
    pub fn start(&self, d: usize) -> isize {
        self.offset[d]
    }

    /// Taps of row `d`.
    #[inline]
    pub fn row(&self, d: usize) -> &[C] {
        let base = d * self.filter_length;
        &self.coeffs[base..base + self.filter_length]
    }

    /// Verifies that every row has at least one contributing tap, so the
    /// per-pixel normalization never divides by zero.
    pub fn check_weights(&self) -> Result<(), Error> {
        for d in 0..self.len() {
            if !self.row(d).iter().any(|c| c.is_active()) {
                return Err(Error::ZeroWeightRow { row: d });
            }
        }
        Ok(())
    }
}

impl FilterTable<i16> {
    /// Verifies that no row's weights sum to zero, which would divide by zero
    /// during normalization even with active taps.
    pub fn check_sums(&self) -> Result<(), Error> {
        check_sums(self.len(), |d| self.row(d).iter().map(|&c| i64::from(c)).sum())
    }
}

impl FilterTable<i32> {
    /// Verifies that no row's weights sum to zero.
    pub fn check_sums(&self) -> Result<(), Error> {
        check_sums(self.len(), |d| self.row(d).iter().map(|&c| i64::from(c)).sum())
    }
}

fn check_sums(rows: usize, sum: impl Fn(usize) -> i64) -> Result<(), Error> {
    for d in 0..rows {
        if sum(d) == 0 {
            return Err(Error::ZeroWeightRow { row: d });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use sr_core::Error;

    use super::FilterTable;

    #[test]
    fn rows_are_row_major() {
        let table = FilterTable::new(vec![1i16, 2, 3, 4, 5, 6], vec![-1, 0, 2], 2, 0.5)
            .expect("valid table");
        assert_eq!(table.len(), 3);
        assert_eq!(table.row(1), &[3, 4]);
        assert_eq!(table.start(0), -1);
        assert_eq!(table.start(2), 2);
        assert_eq!(table.scale(), 0.5);
    }

    #[test]
    fn rejects_mismatched_lengths() {
        assert_eq!(
            FilterTable::new(vec![1i32; 5], vec![0, 1], 3, 1.0).unwrap_err(),
            Error::TableLength {
                expected: 6,
                actual: 5
            }
        );
        assert_eq!(
            FilterTable::<bool>::new(vec![], vec![], 0, 1.0).unwrap_err(),
            Error::ZeroFilterLength
        );
    }

    #[test]
    fn weight_checks_find_dead_rows() {
        let table = FilterTable::new(vec![1i16, 0, 0, 0], vec![0, 1], 2, 1.0).expect("valid");
        assert_eq!(table.check_weights(), Err(Error::ZeroWeightRow { row: 1 }));

        let nearest = FilterTable::new(vec![false, true, true, false], vec![0, 1], 2, 1.0)
            .expect("valid");
        assert_eq!(nearest.check_weights(), Ok(()));

        let cancelling = FilterTable::new(vec![3i32, -3, 1, 1], vec![0, 1], 2, 1.0).expect("valid");
        assert_eq!(cancelling.check_weights(), Ok(()));
        assert_eq!(cancelling.check_sums(), Err(Error::ZeroWeightRow { row: 0 }));
    }
}
