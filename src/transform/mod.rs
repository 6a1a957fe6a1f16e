//! Pure transforms: word capitalisation and numeric operation dispatch.

mod operation;
pub mod error;

pub use error::*;
pub use operation::*;

/// Maps `f` over `items`, producing an equal-length output in the same order.
pub fn apply_operation<T, R>(items: &[T], f: impl Fn(&T) -> R) -> Vec<R> {
    items.iter().map(f).collect()
}

/// Upper-cases the first character of each word and lower-cases the rest.
pub fn capitalize_words<S: AsRef<str>>(words: &[S]) -> Vec<String> {
    words.iter().map(|w| capitalize(w.as_ref())).collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize_words() {
        assert_eq!(
            capitalize_words(&["apple", "banana", "cherry"]),
            vec!["Apple", "Banana", "Cherry"]
        );
        assert_eq!(capitalize_words(&["bANANA", "", "éclair"]), vec!["Banana", "", "Éclair"]);
    }

    #[test]
    fn test_square() {
        let op: Operation = "square".parse().unwrap();
        assert_eq!(op.apply_all(&[1.5, 2.0, 3.5]), vec![2.25, 4.0, 12.25]);
    }

    #[test]
    fn test_double_and_cube() {
        assert_eq!(Operation::Double.apply_all(&[1.0, -2.5]), vec![2.0, -5.0]);
        assert_eq!(Operation::Cube.apply_all(&[2.0, -3.0]), vec![8.0, -27.0]);
    }

    #[test]
    fn test_unknown_operation() {
        let err = "mystery".parse::<Operation>().unwrap_err();
        assert_eq!(err, OperationError::UnknownOperation("mystery".into()));
        assert_eq!(err.to_string(), "Operation not supported. Available: square, double, cube");
        // Names are case-sensitive.
        assert!("Square".parse::<Operation>().is_err());
    }

    #[test]
    fn test_apply_operation_is_generic() {
        let lengths = apply_operation(&["a", "bcd"], |s| s.len());
        assert_eq!(lengths, vec![1, 3]);
    }
}
