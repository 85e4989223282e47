/// Reduces a possibly fully-qualified context name to its final path segment.
///
/// `projects/p/agent/sessions/s1/contexts/greeted` becomes `greeted`; a name
/// without any `/` is returned as is.
pub fn short_name(name: &str) -> &str {
    match name.rsplit_once('/') {
        Some((_, short)) => short,
        None => name,
    }
}

/// Builds the fully-qualified wire name `{session}/contexts/{short}`.
pub fn qualify_name(session: &str, short: &str) -> String {
    format!("{session}/contexts/{short}")
}
