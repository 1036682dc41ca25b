//! Numkit Standard Library

pub mod complex;
pub mod fraction;
pub mod functions;
mod helpers;
pub mod number_theory;

use numkit_plugin::PluginRegistry;

/// Load standard library into registry
pub fn load_standard_library(registry: PluginRegistry) -> PluginRegistry {
    let registry = functions::FUNCTIONS
        .iter()
        .fold(registry, |r, spec| r.with_function(functions::Dispatched(spec)));

    registry
        .with_function(functions::Beta)
        .with_function(functions::BesselJ)
        .with_function(functions::BesselY)
        .with_function(functions::Log)
        // Fractions
        .with_function(fraction::Frac)
        .with_function(fraction::FracAdd)
        .with_function(fraction::FracMul)
        .with_function(fraction::FracSub)
        .with_function(fraction::FracDiv)
        .with_function(fraction::FracPow)
        .with_function(fraction::FracNeg)
        .with_function(fraction::FracRecip)
        .with_function(fraction::LimitDen)
        .with_function(fraction::FracStr)
        .with_function(fraction::FracMath)
        // Complex numbers
        .with_function(complex::ComplexFrom)
        .with_function(complex::ComplexPolar)
        .with_function(complex::ComplexAdd)
        .with_function(complex::ComplexSub)
        .with_function(complex::ComplexMul)
        .with_function(complex::ComplexDiv)
        .with_function(complex::ComplexPow)
        .with_function(complex::ComplexNeg)
        .with_function(complex::Conj)
        .with_function(complex::Re)
        .with_function(complex::Im)
        .with_function(complex::ComplexAbs)
        .with_function(complex::ComplexArg)
        // Number theory
        .with_function(number_theory::PrimeFactors)
        .with_function(number_theory::ExtendedGcd)
        .with_function(number_theory::NthPrime)
        .with_function(number_theory::PrimePi)
}

/// Create registry with standard library
pub fn standard_registry() -> PluginRegistry {
    load_standard_library(PluginRegistry::new())
}
