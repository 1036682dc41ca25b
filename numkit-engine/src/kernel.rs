//! Catalog of named numeric kernels

/// A named function with a real kernel and, usually, a complex one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kernel {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Asinh,
    Acosh,
    Atanh,
    Exp,
    Ln,
    Log2,
    Log10,
    Sqrt,
    Cbrt,
    Gamma,
    Digamma,
    Erf,
    Beta,
    Zeta,
    AiryAi,
    AiryBi,
    BesselJ,
    BesselY,
}

impl Kernel {
    pub const ALL: [Kernel; 27] = [
        Kernel::Sin,
        Kernel::Cos,
        Kernel::Tan,
        Kernel::Asin,
        Kernel::Acos,
        Kernel::Atan,
        Kernel::Sinh,
        Kernel::Cosh,
        Kernel::Tanh,
        Kernel::Asinh,
        Kernel::Acosh,
        Kernel::Atanh,
        Kernel::Exp,
        Kernel::Ln,
        Kernel::Log2,
        Kernel::Log10,
        Kernel::Sqrt,
        Kernel::Cbrt,
        Kernel::Gamma,
        Kernel::Digamma,
        Kernel::Erf,
        Kernel::Beta,
        Kernel::Zeta,
        Kernel::AiryAi,
        Kernel::AiryBi,
        Kernel::BesselJ,
        Kernel::BesselY,
    ];

    /// Entry-point name of the real kernel; the complex one appends `_complex`
    pub fn entry_point(&self) -> &'static str {
        match self {
            Kernel::Sin => "sin",
            Kernel::Cos => "cos",
            Kernel::Tan => "tan",
            Kernel::Asin => "asin",
            Kernel::Acos => "acos",
            Kernel::Atan => "atan",
            Kernel::Sinh => "sinh",
            Kernel::Cosh => "cosh",
            Kernel::Tanh => "tanh",
            Kernel::Asinh => "asinh",
            Kernel::Acosh => "acosh",
            Kernel::Atanh => "atanh",
            Kernel::Exp => "exp",
            Kernel::Ln => "ln",
            Kernel::Log2 => "log2",
            Kernel::Log10 => "log10",
            Kernel::Sqrt => "sqrt",
            Kernel::Cbrt => "cbrt",
            Kernel::Gamma => "gamma",
            Kernel::Digamma => "digamma",
            Kernel::Erf => "erf",
            Kernel::Beta => "beta",
            Kernel::Zeta => "zeta",
            Kernel::AiryAi => "airy_ai",
            Kernel::AiryBi => "airy_bi",
            Kernel::BesselJ => "bessel_j",
            Kernel::BesselY => "bessel_y",
        }
    }

    /// Number of real arguments
    pub fn arity(&self) -> usize {
        match self {
            Kernel::Beta | Kernel::BesselJ | Kernel::BesselY => 2,
            _ => 1,
        }
    }

    /// Bessel functions are real-only here
    pub fn has_complex(&self) -> bool {
        !matches!(self, Kernel::BesselJ | Kernel::BesselY)
    }

    pub fn from_entry_point(name: &str) -> Option<Kernel> {
        Kernel::ALL.iter().copied().find(|k| k.entry_point() == name)
    }
}

impl std::fmt::Display for Kernel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.entry_point())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_points_are_unique() {
        for k in Kernel::ALL {
            assert_eq!(Kernel::from_entry_point(k.entry_point()), Some(k));
        }
    }

    #[test]
    fn test_bessel_is_real_only() {
        assert!(!Kernel::BesselJ.has_complex());
        assert_eq!(Kernel::BesselY.arity(), 2);
        assert!(Kernel::Asin.has_complex());
        assert_eq!(Kernel::Asin.arity(), 1);
    }

    #[test]
    fn test_zeta_and_airy_are_unary_with_complex_kernels() {
        for k in [Kernel::Zeta, Kernel::AiryAi, Kernel::AiryBi] {
            assert_eq!(k.arity(), 1);
            assert!(k.has_complex());
        }
        assert_eq!(Kernel::from_entry_point("airy_bi"), Some(Kernel::AiryBi));
        assert_eq!(Kernel::ALL.len(), 27);
    }
}
