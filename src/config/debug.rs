//! Debugging feature flags.

pub struct LogFlags {
    /// Activate trace_time macro (scope-level timing of model fits)
    pub log_performance: bool,

    /// Log estimated coefficients, CSS and optimiser iterations after every fit
    pub log_fit_diagnostics: bool,

    /// Log each training split (cutoff, rows kept)
    pub log_splits: bool,
}

pub const DF: LogFlags = LogFlags {
    log_performance: false,
    log_fit_diagnostics: true,
    log_splits: false,
};
