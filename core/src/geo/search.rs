/// Index of the first item whose key is `>= min`, assuming `items` is sorted
/// ascending by that key. Returns `items.len()` when every key is smaller.
pub fn first_index_at_or_above<T, F>(items: &[T], min: f64, key: F) -> usize
where
    F: Fn(&T) -> f64,
{
    items.partition_point(|item| key(item) < min)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lower_bound(values: &[f64], min: f64) -> usize {
        first_index_at_or_above(values, min, |v| *v)
    }

    #[test]
    fn finds_first_value_at_or_above() {
        let values = [1.0, 2.0, 2.0, 3.0, 5.0];
        assert_eq!(lower_bound(&values, 2.0), 1);
        assert_eq!(lower_bound(&values, 2.5), 3);
        assert_eq!(lower_bound(&values, 0.0), 0);
        assert_eq!(lower_bound(&values, 6.0), values.len());
    }

    #[test]
    fn empty_slice_yields_zero() {
        assert_eq!(lower_bound(&[], 1.0), 0);
    }
}
