// ========================================================================= //

/// Records a non-fatal decoding problem and logs it.
macro_rules! degrade {
    ($warnings:expr, $warning:expr) => {{
        let warning = $warning;
        log::warn!("{}", warning);
        $warnings.push(warning);
    }};
}

/// Records a `Warning::TruncatedStructure` describing what was cut short.
macro_rules! truncated {
    ($warnings:expr, $e:expr) => {
        degrade!(
            $warnings,
            crate::Warning::TruncatedStructure { what: String::from($e) }
        )
    };
    ($warnings:expr, $fmt:expr, $($arg:tt)+) => {
        degrade!(
            $warnings,
            crate::Warning::TruncatedStructure {
                what: format!($fmt, $($arg)+),
            }
        )
    };
}

// ========================================================================= //
