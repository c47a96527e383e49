use echoprobe::FuzzError;

/// Format a FuzzError for the terminal, with a hint on how to fix it
pub fn format_error(error: &FuzzError) -> String {
    match error {
        FuzzError::InvalidDomain { message } => {
            format!(
                "Invalid domain: {}\n  Help: pass bounds with --min <= --max",
                message
            )
        }
        FuzzError::InvalidConfig { field, message } => {
            format!(
                "Invalid configuration: {} {}\n  Help: check the --{} flag",
                field, message, field
            )
        }
        FuzzError::InvalidSeed { input } => {
            format!(
                "Invalid seed: '{}'\n  Help: use a decimal u64 such as 42 or hex such as 0x2a",
                input
            )
        }
    }
}
