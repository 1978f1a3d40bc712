//! URL normalisation.
//!
//! Navigation paths arrive in whatever shape the host hands us
//! (`/dashboard/`, `dashboard//mytickets?tab=open`). Matching only ever
//! sees the cleaned segment list.

/// Strip query and fragment, then split into non-empty segments.
pub fn segments(path: &str) -> Vec<String> {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    path[..end]
        .split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Join segments back into the canonical (slash-free at both ends) form.
pub fn join(segments: &[String]) -> String {
    segments.join("/")
}
