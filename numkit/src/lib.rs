//! Numkit - exact rationals and complex numbers over a compute engine

pub use numkit_core::{
    codes, parse_complex, parse_rational, Complex, ErrorKind, FormatOptions, NumkitError,
    Rational, Value,
};
pub use numkit_engine::{Arith, ComputeEngine, EngineError, Kernel, NativeEngine};
pub use numkit_plugin::{EvalContext, FunctionMeta, FunctionPlugin, PluginRegistry};

use std::sync::Arc;

/// Function registry bound to a compute engine
#[derive(Clone)]
pub struct Numkit {
    registry: Arc<PluginRegistry>,
    engine: Arc<dyn ComputeEngine>,
    format: FormatOptions,
}

impl Numkit {
    pub fn new(registry: PluginRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            engine: Arc::new(NativeEngine::new()),
            format: FormatOptions::default(),
        }
    }

    pub fn with_standard_library() -> Self {
        Self::new(numkit_std::standard_registry())
    }

    /// Replace the in-process engine
    pub fn with_engine(mut self, engine: Arc<dyn ComputeEngine>) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_format(mut self, format: FormatOptions) -> Self {
        self.format = format;
        self
    }

    pub fn context(&self) -> EvalContext {
        EvalContext::new(self.registry.clone())
            .with_engine(self.engine.clone())
            .with_format(self.format)
    }

    pub fn arith(&self) -> Arith {
        Arith::new(self.engine.clone())
    }

    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value, NumkitError> {
        tracing::trace!(function = name, args = args.len(), "call");
        self.registry.call_function(name, args, &self.context())
    }

    pub fn help(&self, name: Option<&str>) -> Result<serde_json::Value, NumkitError> {
        self.registry.help(name)
    }

    pub fn list_functions(&self, category: Option<&str>) -> serde_json::Value {
        self.registry.list_functions(category)
    }

    pub fn catalog(&self) -> serde_json::Value {
        self.registry.catalog()
    }
}

impl Default for Numkit {
    fn default() -> Self {
        Self::with_standard_library()
    }
}

impl std::fmt::Debug for Numkit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Numkit")
            .field("engine", &self.engine.name())
            .field("functions", &self.registry.len())
            .field("format", &self.format)
            .finish()
    }
}

/// Build an argument vector: `args!["1/2", 3, 0.5]`
#[macro_export]
macro_rules! args {
    () => { Vec::<$crate::Value>::new() };
    ($($value:expr),+ $(,)?) => {
        vec![$($crate::Value::from($value)),+]
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nk() -> Numkit {
        Numkit::with_standard_library()
    }

    fn rat(text: &str) -> Value {
        Value::Rational(text.parse().unwrap())
    }

    mod scenario_tests {
        use super::*;

        #[test]
        fn test_fraction_sum() {
            assert_eq!(nk().call("frac_add", &args!["1/2", "1/3", "-1/5"]).unwrap(), rat("23/30"));
        }

        #[test]
        fn test_fraction_product() {
            assert_eq!(nk().call("frac_mul", &args!["3/4", "2/3", "4/5"]).unwrap(), rat("2/5"));
        }

        #[test]
        fn test_one_over_zero_is_positive_infinity() {
            let v = nk().call("frac", &args!["1/0"]).unwrap();
            let r = v.as_rational().unwrap();
            assert!(r.is_infinite());
            assert_eq!(r.signum(), 1);
        }

        #[test]
        fn test_zero_over_zero_is_nan() {
            let v = nk().call("frac", &args!["0/0"]).unwrap();
            let r = v.as_rational().unwrap();
            assert!(r.is_nan());
            assert_ne!(*r, r.clone());
        }

        #[test]
        fn test_limit_den_pi() {
            let v = nk().call("limit_den", &args![3.14159265, 10000i64]).unwrap();
            assert_eq!(v, rat("355/113"));
        }

        #[test]
        fn test_complex_sum() {
            let v = nk().call("complex_add", &args!["1+2i", "3+4i", "2i"]).unwrap();
            assert_eq!(v, Value::Complex(Complex::new(4.0, 8.0)));
            assert_eq!(v.to_string(), "4+8i");
        }

        #[test]
        fn test_domain_promotion() {
            let nk = nk();
            assert!(matches!(nk.call("asin", &args![2i64]).unwrap(), Value::Complex(_)));
            assert!(matches!(nk.call("asin", &args![0.5]).unwrap(), Value::Real(_)));
        }

        #[test]
        fn test_parsing_equivalence() {
            let nk = nk();
            let a = nk.call("frac", &args!["5/-4"]).unwrap();
            let b = nk.call("frac", &args![-5i64, 4i64]).unwrap();
            let c = nk.call("frac", &args!["-5/4"]).unwrap();
            assert_eq!(a, b);
            assert_eq!(b, c);
        }
    }

    mod property_tests {
        use super::*;

        #[test]
        fn test_limit_den_is_best() {
            let nk = nk();
            let x: Rational = "0.2718281828".parse().unwrap();
            let target = x.to_f64();
            for bound in [1i64, 2, 7, 32, 100, 1000] {
                let v = nk.call("limit_den", &[Value::Rational(x.clone()), Value::Int(bound)]).unwrap();
                let r = v.as_rational().unwrap();
                let q: i64 = r.denominator().to_string().parse().unwrap();
                assert!(q <= bound);
                let err = (r.to_f64() - target).abs();
                for d in 1..=bound {
                    let n = (target * d as f64).round();
                    assert!(err <= (n / d as f64 - target).abs() + 1e-15, "bound {} beaten by {}/{}", bound, n, d);
                }
            }
        }

        #[test]
        fn test_bezout() {
            let nk = nk();
            for (a, b) in [(240i64, 46i64), (-7, 21), (13, -8), (1, 0)] {
                let v = nk.call("extended_gcd", &args![a, b]).unwrap();
                let items = v.as_list().unwrap();
                let (g, u, w) = (
                    items[0].as_int().unwrap(),
                    items[1].as_int().unwrap(),
                    items[2].as_int().unwrap(),
                );
                assert!(g >= 0);
                assert_eq!(u * a + w * b, g);
            }
        }

        #[test]
        fn test_canonical_results() {
            let nk = nk();
            for (a, b) in [("6/8", "10/12"), ("-9/12", "3/18"), ("100/7", "-1/14")] {
                for op in ["frac_add", "frac_sub", "frac_mul", "frac_div"] {
                    let v = nk.call(op, &args![a, b]).unwrap();
                    assert!(v.as_rational().unwrap().is_canonical(), "{}({}, {})", op, a, b);
                }
            }
        }
    }

    mod facade_tests {
        use super::*;

        #[test]
        fn test_unknown_function() {
            let err = nk().call("asinn", &args![1i64]).unwrap_err();
            assert_eq!(err.code(), codes::UNKNOWN_FUNCTION);
            assert!(err.suggestion.unwrap().contains("asin"));
        }

        #[test]
        fn test_case_insensitive_lookup() {
            assert_eq!(nk().call("SQRT", &args![9i64]).unwrap(), Value::Real(3.0));
        }

        #[test]
        fn test_help_and_listing() {
            let nk = nk();
            let help = nk.help(Some("limit_den")).unwrap();
            assert_eq!(help["category"], "fraction");
            let listed = nk.list_functions(Some("number_theory"));
            assert_eq!(listed.as_array().unwrap().len(), 4);
            assert_eq!(nk.catalog().as_array().unwrap().len(), 56);
        }

        #[test]
        fn test_format_defaults_flow_into_calls() {
            let nk = nk().with_format(FormatOptions {
                plus_sign: true,
                explicit_one: true,
                ascii_minus: true,
            });
            assert_eq!(nk.call("frac_str", &args![3i64]).unwrap(), Value::from("+3/1"));
        }

        #[test]
        fn test_substituted_engine() {
            let nk = nk().with_engine(Arc::new(NativeEngine::new()));
            assert_eq!(nk.arith().engine().name(), "native");
            assert_eq!(nk.call("frac_add", &args!["1/2", "1/2"]).unwrap(), rat("1"));
        }

        #[test]
        fn test_shared_across_threads() {
            let nk = Arc::new(nk());
            let handles: Vec<_> = (1..=8i64)
                .map(|n| {
                    let nk = Arc::clone(&nk);
                    std::thread::spawn(move || nk.call("frac", &args![n, 2 * n]).unwrap())
                })
                .collect();
            for h in handles {
                assert_eq!(h.join().unwrap(), rat("1/2"));
            }
        }
    }
}
