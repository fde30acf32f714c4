/// DSL macros for building test schemas.
///
/// # Syntax
///
/// ```ignore
/// relation! {
///     R(a, b, c, d) {
///         a -> b;
///         a, c -> d;
///     }
/// }
/// ```
///
/// - `attrs!(a, c)` → `AttributeSet` of `"a"` and `"c"`
/// - `relation!` admits its dependencies with `AttributeMode::Extend`, so an
///   attribute mentioned only by a dependency still joins the relation.
///
/// Build an `AttributeSet`.
#[macro_export]
macro_rules! attrs {
    ($($attr:ident),* $(,)?) => {
        [$(stringify!($attr)),*]
            .into_iter()
            .collect::<fdnorm_core::AttributeSet>()
    };
}

/// Build a `(lhs, rhs)` pair for `Relation::with_dependencies`.
#[macro_export]
macro_rules! fd {
    ($($lhs:ident),+ -> $($rhs:ident),+) => {
        ($crate::attrs!($($lhs),+), $crate::attrs!($($rhs),+))
    };
}

/// Build a `Relation`.
#[macro_export]
macro_rules! relation {
    ($name:ident ( $($attr:ident),* $(,)? ) { $( $($lhs:ident),+ -> $($rhs:ident),+ );* $(;)? }) => {
        fdnorm_core::Relation::with_dependencies(
            stringify!($name),
            $crate::attrs!($($attr),*),
            vec![$($crate::fd!($($lhs),+ -> $($rhs),+)),*],
        )
    };
}

/// `R(a..h)` with `a -> b, f`, `a, c -> d, g` and `b, c, d -> e, h`.
#[allow(dead_code)]
pub fn textbook() -> fdnorm_core::Relation {
    relation! {
        R(a, b, c, d, e, f, g, h) {
            a -> b, f;
            a, c -> d, g;
            b, c, d -> e, h;
        }
    }
}
