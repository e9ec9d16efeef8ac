//! Built-in parameter table for the DMC simulation

use super::{ParameterDefinition, ParameterSchema, ValueType};

/// key, type, symbol, default, description
type Row = (&'static str, ValueType, &'static str, &'static str, &'static str);

const PARAMETERS: &[Row] = &[
    (
        "pid",
        ValueType::Integer,
        "pid",
        "0",
        "The MPI process id of this process. Will be in [0,np).",
    ),
    (
        "np",
        ValueType::Integer,
        "np",
        "1",
        "The number of MPI processes.",
    ),
    (
        "dimensions",
        ValueType::Integer,
        "dimensions",
        "3",
        "The spatial dimensions of the system.",
    ),
    (
        "walkers",
        ValueType::Integer,
        "target_population",
        "1000",
        "The target population of DMC walkers. The actual number of dmc walkers will \
         fluctuate during runtime, but will be bias towards this value.",
    ),
    (
        "max_pop_ratio",
        ValueType::Real,
        "max_pop_ratio",
        "4.0",
        "The maximum allowed population, expressed as a multiple of the target population.",
    ),
    (
        "min_pop_ratio",
        ValueType::Real,
        "min_pop_ratio",
        "0.5",
        "The minimum allowed population, expressed as a fraction of the target population.",
    ),
    (
        "iterations",
        ValueType::Integer,
        "dmc_iterations",
        "10000",
        "The number of DMC iterations, each corresponding to a step of tau in imaginary time.",
    ),
    (
        "tau",
        ValueType::Real,
        "tau",
        "0.01",
        "The DMC timestep in atomic units.",
    ),
    (
        "tau_c_ratio",
        ValueType::Real,
        "tau_c_ratio",
        "1.0",
        "The ratio of tau_c:tau, where tau_c is the effective cancellation timestep and \
         tau is the DMC timestep.",
    ),
    (
        "trial_energy",
        ValueType::Real,
        "trial_energy",
        "0.0",
        "The DMC trial energy in atomic units (Hartree). This value is used to control the \
         DMC population and will fluctuate during runtime. After equilibriation, it will \
         fluctuate around the ground state energy of the system.",
    ),
    (
        "pre_diffusion",
        ValueType::Real,
        "pre_diffusion",
        "1.0",
        "The amount of imaginary time that the walkers will diffuse for before the first \
         full DMC iteration. Effectively, this is how spread out the initial wavefunction is.",
    ),
    (
        "write_wavefunction",
        ValueType::Boolean,
        "write_wavefunction",
        "true",
        "True if wavefunction files are to be written.",
    ),
    (
        "exchange_moves",
        ValueType::Boolean,
        "exchange_moves",
        "true",
        "True if exchange moves are to be made.",
    ),
    (
        "exchange_prob",
        ValueType::Real,
        "exchange_prob",
        "0.5",
        "The probability of a walker making an exchange move in any given timestep. The \
         actual exchange move made will be chosen at random. 1 - this is the probability of \
         simply diffusing, making no exchange moves.",
    ),
    (
        "cancel_scheme",
        ValueType::Text,
        "cancel_scheme",
        "\"voronoi\"",
        "The cancellation scheme used.",
    ),
    (
        "correct_seperations",
        ValueType::Boolean,
        "correct_seperations",
        "false",
        "True if seperation corrections are applied.",
    ),
];

impl ParameterSchema {
    /// The parameter table compiled into the generator
    pub fn builtin() -> Self {
        let mut schema = Self::new();
        for &(key, value_type, symbol, default, description) in PARAMETERS {
            schema
                .register(ParameterDefinition::new(
                    key,
                    value_type,
                    symbol,
                    default,
                    description,
                ))
                .expect("built-in parameter table should be valid");
        }
        schema
    }
}
