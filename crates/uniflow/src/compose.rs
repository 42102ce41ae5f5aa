//! Right-to-left function composition.

/// A boxed unary function, the unit [`compose`] chains.
pub type ComposeFn<T> = Box<dyn Fn(T) -> T>;

/// Composes functions right to left: `compose([f, g, h])` runs `h` first and
/// `f` last. No functions yields the identity; a single function is handed
/// back unchanged, same callable and all.
pub fn compose<T: 'static>(funcs: Vec<ComposeFn<T>>) -> ComposeFn<T> {
    let mut rightmost_first = funcs.into_iter().rev();
    match rightmost_first.next() {
        None => Box::new(|value| value),
        Some(innermost) => rightmost_first
            .fold(innermost, |inner, outer| Box::new(move |value| outer(inner(value)))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn double() -> ComposeFn<i64> {
        Box::new(|x| x * 2)
    }

    fn square() -> ComposeFn<i64> {
        Box::new(|x| x * x)
    }

    #[test]
    fn composes_from_right_to_left() {
        assert_eq!(compose(vec![square()])(5), 25);
        assert_eq!(compose(vec![square(), double()])(5), 100);
        assert_eq!(compose(vec![double(), square(), double()])(5), 200);
    }

    #[test]
    fn composes_wrappers_from_right_to_left() {
        let tag = |label: &'static str| -> ComposeFn<ComposeFn<String>> {
            Box::new(move |next: ComposeFn<String>| {
                Box::new(move |text: String| next(format!("{text}{label}")))
            })
        };

        let run = |order: Vec<ComposeFn<ComposeFn<String>>>| {
            compose(order)(Box::new(|text| text))(String::new())
        };

        assert_eq!(run(vec![tag("a"), tag("b"), tag("c")]), "abc");
        assert_eq!(run(vec![tag("b"), tag("c"), tag("a")]), "bca");
        assert_eq!(run(vec![tag("c"), tag("a"), tag("b")]), "cab");
    }

    #[test]
    fn no_functions_yields_the_identity() {
        assert_eq!(compose::<i64>(vec![])(7), 7);
        assert_eq!(compose::<String>(vec![])("x".to_string()), "x");
    }

    #[test]
    fn a_single_function_is_returned_unchanged() {
        let lone = square();
        let before = {
            let r: &dyn Fn(i64) -> i64 = lone.as_ref();
            r as *const dyn Fn(i64) -> i64 as *const ()
        };
        let composed = compose(vec![lone]);
        let after = {
            let r: &dyn Fn(i64) -> i64 = composed.as_ref();
            r as *const dyn Fn(i64) -> i64 as *const ()
        };
        assert_eq!(before, after);
        assert_eq!(composed(6), 36);
    }
}
