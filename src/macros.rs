/// Build a `Default` value and override some of its fields.
///
/// ```
/// use brood::{new_t, config::TrainingParameters};
/// let p = new_t!(TrainingParameters, population_count = 8, crossover_rate = 0.25);
/// assert_eq!(p.population_count, 8);
/// ```
#[macro_export]
macro_rules! new_t {
    ($t:ty, $($k:ident = $v:expr),+ $(,)?) => {{
        let mut c = <$t>::default();
        $(c.$k = $v;)+
        c
    }};
    ($($k:ident = $v:expr),+ $(,)?) => {$crate::new_t!(T, $($k = $v,)+)};
}

/// [TrainingParameters](crate::config::TrainingParameters) with some fields overridden
#[macro_export]
macro_rules! params {
    ($($k:ident = $v:expr),+ $(,)?) => {
        $crate::new_t!($crate::config::TrainingParameters, $($k = $v,)+)
    };
}

/// Stamp out one test per listed type, with the type bound to `T` inside the body.
#[macro_export]
macro_rules! test_t {
  ( #[should_panic(expected = $panic_msg:literal)]
    $name:ident[T: $($impl:ty)|*]() $body:tt ) => {$(
      ::paste::paste! {
          #[test]
          #[should_panic(expected = $panic_msg)]
          fn [<$name _ $impl:snake>]() {
            type T=$impl;
            $body
          }
      }
  )+};
  ($name:ident[T: $($impl:ty)|*]() $body:tt ) => {$(
      ::paste::paste! {
          #[test]
          fn [<test_ $name _ $impl:snake>]() {
            type T=$impl;
            $body
          }
      }
  )+};
}
