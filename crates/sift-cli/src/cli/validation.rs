/// Parse and validate a worker thread count.
///
/// Must be a positive integer.
///
/// # Errors
///
/// Returns an error message if the value is not a number or is zero.
pub fn parse_jobs(s: &str) -> Result<usize, String> {
    let jobs: usize = s
        .trim()
        .parse()
        .map_err(|_| format!("Job count must be a positive integer: '{}'", s))?;

    if jobs == 0 {
        return Err("Job count must be at least 1".to_string());
    }

    Ok(jobs)
}

/// Parse and validate a module id given on the command line.
///
/// Ids are opaque to the policy, so the only requirement is that the id is
/// not blank.
///
/// # Errors
///
/// Returns an error message if the id is empty or only whitespace.
pub fn parse_module_id(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        return Err("Module id cannot be empty".to_string());
    }
    Ok(s.to_string())
}
